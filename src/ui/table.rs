use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::state::AppState;

/// Rows rendered before the grid cuts off; keeps painting bounded on
/// large cohorts while the CSV export still contains everything.
const MAX_RENDERED_ROWS: usize = 1000;

// ---------------------------------------------------------------------------
// Filtered-table grid
// ---------------------------------------------------------------------------

/// Render the filtered table. The project-URL column becomes hyperlinks;
/// every other cell is plain text.
pub fn project_table(ui: &mut Ui, state: &AppState) {
    let Some(filtered) = &state.filtered else {
        ui.label("No data loaded.");
        return;
    };

    ui.label(format!("Number of projects: {}", filtered.len()));
    ui.add_space(4.0);

    ScrollArea::both()
        .id_salt("project_table")
        .max_height(320.0)
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("project_grid")
                .striped(true)
                .min_col_width(60.0)
                .show(ui, |ui: &mut Ui| {
                    for column in &filtered.columns {
                        ui.label(RichText::new(column).strong());
                    }
                    ui.end_row();

                    for row in filtered.rows.iter().take(MAX_RENDERED_ROWS) {
                        for column in &filtered.columns {
                            let cell = filtered.cell(row, column);
                            if column == &state.config.url_column {
                                match cell.as_str() {
                                    Some(url) => {
                                        ui.hyperlink(url);
                                    }
                                    None => {
                                        ui.label("");
                                    }
                                }
                            } else {
                                ui.label(cell.to_string());
                            }
                        }
                        ui.end_row();
                    }
                });

            if filtered.len() > MAX_RENDERED_ROWS {
                ui.weak(format!(
                    "Showing the first {MAX_RENDERED_ROWS} of {} rows; save as CSV for the full set.",
                    filtered.len()
                ));
            }
        });
}
