use std::collections::{BTreeMap, BTreeSet};

use crate::config::DashboardConfig;
use crate::data::filter::{apply, classify, ColumnClass, ColumnFilter};
use crate::data::loader::load_all;
use crate::data::model::Table;
use crate::text::{cloud, preprocess, word_frequency, FrequencyTable, WordCloudLayout};

/// Layout canvas for the word cloud, in points.
pub const CLOUD_WIDTH: f32 = 720.0;
pub const CLOUD_HEIGHT: f32 = 420.0;
/// Upper bound on words placed in the cloud.
pub const CLOUD_MAX_WORDS: usize = 60;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Course/year selections driving the loader.
    pub selected_courses: BTreeSet<String>,
    pub selected_years: BTreeSet<String>,

    /// Dataset as loaded (None until a load succeeds and finds files).
    /// Never mutated by filtering; refiltering restarts from here.
    pub dataset: Option<Table>,

    /// Columns the user chose to filter on, in selection order.
    pub filter_columns: Vec<String>,
    /// Per-column filter widget state.
    pub filters: BTreeMap<String, ColumnFilter>,

    /// Derived artifacts, recomputed on every load or filter change.
    pub filtered: Option<Table>,
    pub frequency: FrequencyTable,
    pub cloud: Option<WordCloudLayout>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let selected_courses = config.courses.iter().cloned().collect();
        let selected_years = config.years.iter().cloned().collect();
        let mut state = Self {
            config,
            selected_courses,
            selected_years,
            dataset: None,
            filter_columns: Vec::new(),
            filters: BTreeMap::new(),
            filtered: None,
            frequency: FrequencyTable::default(),
            cloud: None,
            status_message: None,
        };
        state.reload();
        state
    }

    /// Re-run the loader for the current course/year selections and reset
    /// the filter state. Called on every selection change.
    pub fn reload(&mut self) {
        self.dataset = None;
        self.filter_columns.clear();
        self.filters.clear();

        if self.selected_courses.is_empty() || self.selected_years.is_empty() {
            self.status_message =
                Some("Select at least one course and one year to load data.".to_string());
            self.recompute_derived();
            return;
        }

        let courses: Vec<String> = self.selected_courses.iter().cloned().collect();
        let years: Vec<String> = self.selected_years.iter().cloned().collect();

        match load_all(&self.config.data_root, &courses, &years) {
            Ok(Some(table)) => {
                log::info!("Loaded {} projects, {} columns", table.len(), table.columns.len());
                // Default: every column participates in filtering.
                self.filter_columns = table.columns.clone();
                for column in &table.columns {
                    let filter = self.default_filter(&table, column);
                    self.filters.insert(column.clone(), filter);
                }
                self.dataset = Some(table);
                self.status_message = None;
            }
            Ok(None) => {
                self.status_message = Some("No data loaded.".to_string());
            }
            Err(err) => {
                log::error!("Failed to load data: {err:#}");
                self.status_message = Some(format!("Error: {err:#}"));
            }
        }
        self.recompute_derived();
    }

    /// The no-op filter for a column, per its current classification:
    /// all values selected / the full range / an empty pattern.
    pub fn default_filter(&self, table: &Table, column: &str) -> ColumnFilter {
        match classify(table, column, self.config.categorical_threshold) {
            ColumnClass::Categorical(distinct) => ColumnFilter::IncludeSet(distinct),
            ColumnClass::Numeric { min, max } => ColumnFilter::Range { lo: min, hi: max },
            ColumnClass::Text | ColumnClass::Absent => ColumnFilter::Pattern {
                pattern: String::new(),
                case_sensitive: false,
            },
        }
    }

    /// Add or remove a column from the filter set.
    pub fn toggle_filter_column(&mut self, column: &str) {
        if let Some(pos) = self.filter_columns.iter().position(|c| c == column) {
            self.filter_columns.remove(pos);
            self.filters.remove(column);
        } else {
            self.filter_columns.push(column.to_string());
            if let Some(table) = &self.dataset {
                let filter = self.default_filter(table, column);
                self.filters.insert(column.to_string(), filter);
            }
        }
        self.refilter();
    }

    /// Recompute the filtered table and every text-analysis derivative.
    pub fn refilter(&mut self) {
        self.recompute_derived();
    }

    fn recompute_derived(&mut self) {
        let Some(dataset) = &self.dataset else {
            self.filtered = None;
            self.frequency = FrequencyTable::default();
            self.cloud = None;
            return;
        };

        let specs: Vec<(String, ColumnFilter)> = self
            .filter_columns
            .iter()
            .filter_map(|col| {
                self.filters
                    .get(col)
                    .map(|f| (col.clone(), f.clone()))
            })
            .collect();

        let filtered = apply(dataset, &specs);

        // Title text pipeline runs on the filtered rows only.
        let titles: Vec<String> = filtered
            .column_values(&self.config.title_column)
            .filter(|v| !v.is_null())
            .map(|v| preprocess(&v.to_string()))
            .collect();
        self.frequency = word_frequency(&titles);
        self.cloud = cloud::generate(
            &self.frequency,
            CLOUD_WIDTH,
            CLOUD_HEIGHT,
            CLOUD_MAX_WORDS,
        );
        self.filtered = Some(filtered);
    }

    /// Toggle one course selection and reload.
    pub fn toggle_course(&mut self, course: &str) {
        if !self.selected_courses.remove(course) {
            self.selected_courses.insert(course.to_string());
        }
        self.reload();
    }

    /// Toggle one year selection and reload.
    pub fn toggle_year(&mut self, year: &str) {
        if !self.selected_years.remove(year) {
            self.selected_years.insert(year.to_string());
        }
        self.reload();
    }
}
