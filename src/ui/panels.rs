use eframe::egui::{self, Color32, DragValue, RichText, ScrollArea, Ui};

use crate::data::filter::{classify, range_step, ColumnClass, ColumnFilter};
use crate::data::loader::to_csv;
use crate::data::model::CellValue;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selections and dynamic filters
// ---------------------------------------------------------------------------

/// Render the left panel: course/year selections plus one filter widget per
/// selected column, widget kind chosen by the column's classification.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Selections");
    ui.separator();

    let mut selection_changed = false;

    ui.strong("Courses");
    for course in state.config.courses.clone() {
        let mut checked = state.selected_courses.contains(&course);
        if ui.checkbox(&mut checked, &course).changed() {
            state.toggle_course(&course);
            selection_changed = true;
        }
    }
    ui.add_space(4.0);

    ui.strong("Years");
    for year in state.config.years.clone() {
        let mut checked = state.selected_years.contains(&year);
        if ui.checkbox(&mut checked, &year).changed() {
            state.toggle_year(&year);
            selection_changed = true;
        }
    }

    ui.separator();
    ui.heading("Filters");

    let dataset = match &state.dataset {
        Some(ds) => ds.clone(),
        None => {
            if !selection_changed {
                ui.label("No dataset loaded.");
            }
            return;
        }
    };

    let mut filters_changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Which columns participate in filtering ----
            egui::CollapsingHeader::new(RichText::new("Columns to filter").strong())
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    for column in &dataset.columns {
                        let mut selected = state.filter_columns.iter().any(|c| c == column);
                        if ui.checkbox(&mut selected, column).changed() {
                            state.toggle_filter_column(column);
                        }
                    }
                });
            ui.add_space(4.0);

            // ---- Per-column filter widgets ----
            // Classification is re-derived from the loaded table on every
            // render pass, so the widgets always match the current data.
            for column in state.filter_columns.clone() {
                let class = classify(&dataset, &column, state.config.categorical_threshold);
                if matches!(class, ColumnClass::Absent) {
                    continue;
                }

                // A stale filter (e.g. after a reload changed the column's
                // shape) is replaced by the no-op default for its class.
                if !filter_matches_class(state.filters.get(&column), &class) {
                    let default = state.default_filter(&dataset, &column);
                    state.filters.insert(column.clone(), default);
                }

                match class {
                    ColumnClass::Categorical(distinct) => {
                        filters_changed |=
                            categorical_widget(ui, state, &column, &distinct);
                    }
                    ColumnClass::Numeric { min, max } => {
                        filters_changed |= numeric_widget(ui, state, &column, min, max);
                    }
                    ColumnClass::Text => {
                        filters_changed |= text_widget(ui, state, &column);
                    }
                    ColumnClass::Absent => {}
                }
            }
        });

    if filters_changed {
        state.refilter();
    }
}

fn filter_matches_class(filter: Option<&ColumnFilter>, class: &ColumnClass) -> bool {
    matches!(
        (filter, class),
        (Some(ColumnFilter::IncludeSet(_)), ColumnClass::Categorical(_))
            | (Some(ColumnFilter::Range { .. }), ColumnClass::Numeric { .. })
            | (Some(ColumnFilter::Pattern { .. }), ColumnClass::Text)
    )
}

/// Inclusion-set widget: one checkbox per distinct value, All/None buttons.
fn categorical_widget(
    ui: &mut Ui,
    state: &mut AppState,
    column: &str,
    distinct: &std::collections::BTreeSet<CellValue>,
) -> bool {
    let mut changed = false;

    let Some(ColumnFilter::IncludeSet(selected)) = state.filters.get_mut(column) else {
        return false;
    };

    let header = format!("{column}  ({}/{})", selected.len(), distinct.len());
    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt(column)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    *selected = distinct.clone();
                    changed = true;
                }
                if ui.small_button("None").clicked() {
                    selected.clear();
                    changed = true;
                }
            });

            for value in distinct {
                let label = match value {
                    CellValue::Null => "<missing>".to_string(),
                    other => other.to_string(),
                };
                let mut checked = selected.contains(value);
                if ui.checkbox(&mut checked, label).changed() {
                    if checked {
                        selected.insert(value.clone());
                    } else {
                        selected.remove(value);
                    }
                    changed = true;
                }
            }
        });

    changed
}

/// Range widget: two drag values stepped at 1/100 of the column span. When
/// min == max the range collapses to a single-point equality filter.
fn numeric_widget(ui: &mut Ui, state: &mut AppState, column: &str, min: f64, max: f64) -> bool {
    let mut changed = false;

    let Some(ColumnFilter::Range { lo, hi }) = state.filters.get_mut(column) else {
        return false;
    };

    let step = range_step(min, max).max(f64::EPSILON);
    egui::CollapsingHeader::new(RichText::new(column).strong())
        .id_salt(column)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                ui.label("from");
                changed |= ui
                    .add(DragValue::new(lo).speed(step).range(min..=max))
                    .changed();
                ui.label("to");
                changed |= ui
                    .add(DragValue::new(hi).speed(step).range(min..=max))
                    .changed();
            });
            if *lo > *hi {
                *hi = *lo;
                changed = true;
            }
        });

    changed
}

/// Free-text widget: substring-or-regex pattern with a case toggle.
fn text_widget(ui: &mut Ui, state: &mut AppState, column: &str) -> bool {
    let mut changed = false;

    let Some(ColumnFilter::Pattern {
        pattern,
        case_sensitive,
    }) = state.filters.get_mut(column)
    else {
        return false;
    };

    egui::CollapsingHeader::new(RichText::new(column).strong())
        .id_salt(column)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            changed |= ui
                .add(egui::TextEdit::singleline(pattern).hint_text("substring or regex"))
                .changed();
            changed |= ui.checkbox(case_sensitive, "Case sensitive").changed();
        });

    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top bar: row counts, CSV export, status message.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Zoomboard");
        ui.separator();

        if let (Some(ds), Some(filtered)) = (&state.dataset, &state.filtered) {
            ui.label(format!(
                "{} projects loaded, {} after filters",
                ds.len(),
                filtered.len()
            ));
            ui.separator();
            if ui.button("Save CSV…").clicked() {
                save_csv_dialog(state);
            }
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// CSV export dialog
// ---------------------------------------------------------------------------

/// Ask for a destination and write the filtered table as CSV.
pub fn save_csv_dialog(state: &mut AppState) {
    let Some(filtered) = &state.filtered else {
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Save filtered projects")
        .set_file_name("data.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        let result = to_csv(filtered)
            .and_then(|csv| std::fs::write(&path, csv).map_err(anyhow::Error::from));
        match result {
            Ok(()) => {
                log::info!("Wrote {} rows to {}", filtered.len(), path.display());
                state.status_message = Some(format!("Saved {}", path.display()));
            }
            Err(err) => {
                log::error!("Failed to save CSV: {err:#}");
                state.status_message = Some(format!("Error: {err:#}"));
            }
        }
    }
}
