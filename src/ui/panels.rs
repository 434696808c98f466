use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use geoviz::analysis::thresholds::ColumnNaming;
use geoviz::data::loader::DataSource;

use crate::state::{AppState, PREVIEW_ROWS};

const CRITICAL: Color32 = Color32::from_rgb(220, 50, 47);
const NORMAL: Color32 = Color32::from_rgb(60, 160, 70);
const WARNING: Color32 = Color32::from_rgb(230, 160, 20);

// ---------------------------------------------------------------------------
// Left side panel – alerts, axes, statistics
// ---------------------------------------------------------------------------

/// Render the left analysis panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Alerts");
    ui.separator();

    if state.table.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    alerts_section(ui, state);
    ui.separator();

    ui.strong("Plot axes");
    axis_selectors(ui, state);
    ui.separator();

    ui.strong("Basic statistics");
    ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            statistics_grid(ui, state);
        });
}

fn alerts_section(ui: &mut Ui, state: &AppState) {
    let Some(analysis) = &state.analysis else {
        return;
    };
    if analysis.alerts.is_empty() {
        ui.label("No monitored sensor columns in this dataset.");
        return;
    }
    for outcome in &analysis.alerts {
        let text = match outcome {
            Ok(verdict) if verdict.triggered => {
                RichText::new(format!("⚠ {}", verdict.message)).color(CRITICAL).strong()
            }
            Ok(verdict) => RichText::new(format!("✔ {}", verdict.message)).color(NORMAL),
            Err(e) => RichText::new(format!("⚠ Data-quality warning: {e}")).color(WARNING),
        };
        ui.label(text);
    }
}

fn axis_selectors(ui: &mut Ui, state: &mut AppState) {
    let candidates = state.axis_candidates();
    if candidates.len() < 2 {
        ui.label("Need at least two numeric columns to plot.");
        return;
    }

    egui::Grid::new("axis_grid").num_columns(2).show(ui, |ui: &mut Ui| {
        ui.label("X axis");
        axis_combo(ui, "x_axis", &mut state.x_axis, &candidates);
        ui.end_row();

        ui.label("Y axis");
        axis_combo(ui, "y_axis", &mut state.y_axis, &candidates);
        ui.end_row();
    });
}

fn axis_combo(ui: &mut Ui, id: &str, selected: &mut Option<String>, candidates: &[String]) {
    let current = selected.clone().unwrap_or_default();
    egui::ComboBox::from_id_salt(id)
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for col in candidates {
                if ui.selectable_label(current == *col, col).clicked() {
                    *selected = Some(col.clone());
                }
            }
        });
}

/// Statistics laid out like a describe() table: one column per numeric
/// column, one row per statistic.
fn statistics_grid(ui: &mut Ui, state: &AppState) {
    let Some(analysis) = &state.analysis else {
        return;
    };
    let records = analysis.summary.records();
    if records.is_empty() {
        ui.label("No numeric columns.");
        return;
    }

    egui::Grid::new("stats_grid")
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            for (name, _) in records {
                ui.strong(name);
            }
            ui.end_row();

            for row in 0..8 {
                let label = records[0].1.rows()[row].0;
                ui.label(label);
                for (_, record) in records {
                    let value = record.rows()[row].1;
                    let text = if row == 0 {
                        format!("{}", record.count)
                    } else {
                        format_stat(value)
                    };
                    ui.monospace(text);
                }
                ui.end_row();
            }
        });
}

fn format_stat(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.4}")
    }
}

// ---------------------------------------------------------------------------
// Bottom panel – raw data preview
// ---------------------------------------------------------------------------

/// Render the first rows of the loaded table.
pub fn data_preview(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        ui.label("No dataset loaded.");
        return;
    };
    let rows = table.row_count().min(PREVIEW_ROWS);
    ui.strong(format!("Raw data (first {rows} of {} rows)", table.row_count()));

    ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .columns(TableColumn::auto().at_least(60.0), table.column_count())
            .header(20.0, |mut header| {
                for col in table.columns() {
                    header.col(|ui: &mut Ui| {
                        ui.strong(&col.name);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, rows, |mut row| {
                    let idx = row.index();
                    for col in table.columns() {
                        row.col(|ui: &mut Ui| {
                            ui.label(col.display_cell(idx));
                        });
                    }
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(table), Some(label)) = (&state.table, &state.source_label) {
            ui.label(format!(
                "{label}: {} rows, {} columns",
                table.row_count(),
                table.column_count()
            ));
            ui.separator();
        }

        ui.label("Column names");
        let mut naming = state.naming;
        egui::ComboBox::from_id_salt("column_naming")
            .selected_text(naming.display_name())
            .show_ui(ui, |ui: &mut Ui| {
                for option in ColumnNaming::ALL {
                    ui.selectable_value(&mut naming, option, option.display_name());
                }
            });
        state.set_naming(naming);

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open geotechnical data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_source(DataSource::Path(path));
    }
}
