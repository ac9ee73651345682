use eframe::egui::{self, Align2, Color32, FontId, RichText, Sense, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::color::{color_for_rank, generate_palette};
use crate::state::{AppState, CLOUD_HEIGHT, CLOUD_WIDTH};
use crate::viz::{self, ChartError};

// ---------------------------------------------------------------------------
// Descriptive charts (central panel)
// ---------------------------------------------------------------------------

/// Render the four descriptive visualizations below the table. Each chart's
/// data comes back as a Result; an error shows as an inline notice and the
/// remaining charts still render.
pub fn charts_section(ui: &mut Ui, state: &AppState) {
    let Some(filtered) = &state.filtered else {
        return;
    };

    ui.heading(format!("Top {} Most Frequent Project Titles", state.config.top_n));
    match viz::top_values(
        filtered,
        &state.config.title_column,
        state.config.top_n,
        "project titles",
    ) {
        Ok(data) => bar_chart(ui, "top_titles", &data),
        Err(err) => chart_notice(ui, &err),
    }
    ui.separator();

    ui.heading(format!("Top {} Most Frequent Words", state.config.top_n));
    match viz::top_words(&state.frequency, state.config.top_n) {
        Ok(data) => bar_chart(ui, "top_words", &data),
        Err(err) => chart_notice(ui, &err),
    }
    ui.separator();

    ui.heading("Word Cloud");
    match &state.cloud {
        Some(layout) => word_cloud(ui, layout),
        None => chart_notice(ui, &ChartError::EmptySeries("word cloud")),
    }
    ui.separator();

    ui.heading("Deployment Type Distribution");
    match viz::top_values(
        filtered,
        &state.config.deployment_column,
        usize::MAX,
        "deployment types",
    ) {
        Ok(data) => bar_chart(ui, "deployment_types", &data),
        Err(err) => chart_notice(ui, &err),
    }
}

/// Non-fatal, user-visible notice for a chart that could not be prepared.
fn chart_notice(ui: &mut Ui, err: &ChartError) {
    ui.label(RichText::new(err.to_string()).color(Color32::LIGHT_RED));
}

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

/// Vertical bar chart of (label, count) pairs, one palette colour per bar.
fn bar_chart(ui: &mut Ui, id: &str, data: &[(String, usize)]) {
    let palette = generate_palette(data.len());
    let bars: Vec<Bar> = data
        .iter()
        .enumerate()
        .map(|(i, (label, count))| {
            Bar::new(i as f64, *count as f64)
                .name(label)
                .width(0.7)
                .fill(color_for_rank(&palette, i))
        })
        .collect();

    let labels: Vec<String> = data.iter().map(|(label, _)| label.clone()).collect();

    Plot::new(id)
        .height(220.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show_grid(true)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round() as i64;
            if idx >= 0 && (mark.value - idx as f64).abs() < 1e-6 {
                labels.get(idx as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        })
        .y_axis_label("Frequency")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Word cloud
// ---------------------------------------------------------------------------

/// Paint a pre-computed word-cloud layout. Placement comes from the core;
/// this only rasterizes it.
fn word_cloud(ui: &mut Ui, layout: &crate::text::WordCloudLayout) {
    let palette = generate_palette(layout.words.len().min(24).max(1));

    let (response, painter) =
        ui.allocate_painter(egui::vec2(CLOUD_WIDTH, CLOUD_HEIGHT), Sense::hover());
    let origin = response.rect.min;

    for word in &layout.words {
        painter.text(
            origin + egui::vec2(word.x, word.y),
            Align2::LEFT_TOP,
            &word.text,
            FontId::proportional(word.font_size),
            color_for_rank(&palette, word.color_index),
        );
    }
}
