use eframe::egui::{Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints, Points};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central plot
// ---------------------------------------------------------------------------

/// Render the Y-vs-X relationship plot in the central panel.
pub fn relationship_plot(ui: &mut Ui, state: &AppState) {
    if state.table.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a CSV file to start the analysis  (File → Open…)");
        });
        return;
    }

    let (Some(x), Some(y)) = (state.x_axis.as_deref(), state.y_axis.as_deref()) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("At least two numeric columns are needed for a plot.");
        });
        return;
    };

    let title = format!("{y} vs {x}");
    ui.heading(&title);

    let points = state.plot_points();
    let line_points: PlotPoints = points.iter().copied().collect();
    let marker_points: PlotPoints = points.iter().copied().collect();

    Plot::new("relationship_plot")
        .x_axis_label(x.to_owned())
        .y_axis_label(y.to_owned())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(line_points)
                    .name(&title)
                    .color(Color32::LIGHT_BLUE)
                    .width(1.5),
            );
            plot_ui.points(
                Points::new(marker_points)
                    .name(&title)
                    .color(Color32::LIGHT_BLUE)
                    .radius(3.0),
            );
        });
}
