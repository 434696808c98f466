use std::path::Path;

use anyhow::Context;
use geoviz::analysis::alerts::AlertEvaluator;
use geoviz::analysis::thresholds::{AlertConfig, ColumnNaming};
use geoviz::analysis::{analyze, Analysis};
use geoviz::data::loader::{self, DataSource};
use geoviz::data::model::Table;

/// Data file picked up from the working directory at startup.
pub const DEFAULT_DATA_FILE: &str = "dados_geotecnicos.csv";

/// Rows shown in the raw data preview.
pub const PREVIEW_ROWS: usize = 20;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table (None until a file is loaded).
    pub table: Option<Table>,

    /// Name of the file the table came from.
    pub source_label: Option<String>,

    /// Derived results for `table`, rebuilt on every load.
    pub analysis: Option<Analysis>,

    /// Header convention used to find the alert columns.
    pub naming: ColumnNaming,

    evaluator: AlertEvaluator,

    /// Selected plot axes (numeric column names).
    pub x_axis: Option<String>,
    pub y_axis: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(naming: ColumnNaming) -> Self {
        Self {
            table: None,
            source_label: None,
            analysis: None,
            naming,
            evaluator: AlertEvaluator::new(AlertConfig::new(naming)),
            x_axis: None,
            y_axis: None,
            status_message: None,
        }
    }

    /// Load the file named on the command line, or the default data file if
    /// it exists in the working directory.
    pub fn load_initial(&mut self, cli_path: Option<&Path>) {
        match cli_path {
            Some(path) => self.load_source(DataSource::Path(path.to_path_buf())),
            None => {
                let default = Path::new(DEFAULT_DATA_FILE);
                if default.exists() {
                    self.load_source(DataSource::Path(default.to_path_buf()));
                } else {
                    log::info!("No {DEFAULT_DATA_FILE} in working directory; waiting for a file");
                }
            }
        }
    }

    /// Load a new source. On failure the previous table stays on screen and
    /// the error is shown in the status line.
    pub fn load_source(&mut self, source: DataSource) {
        let label = source.label();
        match loader::load(&source).with_context(|| format!("loading {label}")) {
            Ok(table) => self.set_table(table, label),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded table and recompute everything derived from it.
    pub fn set_table(&mut self, table: Table, label: String) {
        self.table = Some(table);
        self.source_label = Some(label);
        self.x_axis = None;
        self.y_axis = None;
        self.reanalyze();
    }

    /// Switch the recognized alert column names and re-run the analysis.
    pub fn set_naming(&mut self, naming: ColumnNaming) {
        if naming == self.naming {
            return;
        }
        self.naming = naming;
        self.evaluator = AlertEvaluator::new(AlertConfig::new(naming));
        self.reanalyze();
    }

    fn reanalyze(&mut self) {
        let Some(table) = &self.table else {
            return;
        };
        match analyze(table, &self.evaluator).context("analyzing dataset") {
            Ok(analysis) => {
                let numeric = analysis.numeric_columns();
                self.x_axis = pick_axis(self.x_axis.take(), &numeric, 0);
                self.y_axis = pick_axis(self.y_axis.take(), &numeric, 1);
                self.analysis = Some(analysis);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("{e:#}");
                self.analysis = None;
                self.x_axis = None;
                self.y_axis = None;
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Numeric column names available as plot axes.
    pub fn axis_candidates(&self) -> Vec<String> {
        self.analysis
            .as_ref()
            .map(|a| a.numeric_columns().into_iter().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// `(x, y)` pairs for the selected axes, skipping rows where either
    /// value is missing.
    pub fn plot_points(&self) -> Vec<[f64; 2]> {
        let (Some(table), Some(x), Some(y)) = (&self.table, &self.x_axis, &self.y_axis) else {
            return Vec::new();
        };
        let (Some(xs), Some(ys)) = (
            table.column(x).and_then(|c| c.as_numeric()),
            table.column(y).and_then(|c| c.as_numeric()),
        ) else {
            return Vec::new();
        };
        xs.iter()
            .zip(ys)
            .filter_map(|(xv, yv)| Some([(*xv)?, (*yv)?]))
            .collect()
    }
}

/// Keep the current selection if it is still a numeric column, otherwise
/// fall back to the `index`-th numeric column. Axes need two candidates.
fn pick_axis(current: Option<String>, numeric: &[&str], index: usize) -> Option<String> {
    if numeric.len() < 2 {
        return None;
    }
    match current {
        Some(name) if numeric.contains(&name.as_str()) => Some(name),
        _ => numeric.get(index).map(|s| s.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(csv: &str) -> AppState {
        let mut state = AppState::new(ColumnNaming::English);
        state.load_source(DataSource::Bytes(csv.as_bytes().to_vec()));
        state
    }

    #[test]
    fn default_axes_are_first_two_numeric_columns() {
        let state = state_with("sensor,time,displacement_mm\nA,1,2.5\nB,2,3.5\n");
        assert_eq!(state.x_axis.as_deref(), Some("time"));
        assert_eq!(state.y_axis.as_deref(), Some("displacement_mm"));
        assert_eq!(state.plot_points(), vec![[1.0, 2.5], [2.0, 3.5]]);
    }

    #[test]
    fn single_numeric_column_disables_axes() {
        let state = state_with("sensor,time\nA,1\n");
        assert!(state.x_axis.is_none());
        assert!(state.plot_points().is_empty());
    }

    #[test]
    fn plot_points_skip_missing_cells() {
        let state = state_with("t,v\n1,\n2,5\n,6\n");
        assert_eq!(state.plot_points(), vec![[2.0, 5.0]]);
    }

    #[test]
    fn failed_load_keeps_previous_table() {
        let mut state = state_with("t,v\n1,2\n");
        state.load_source(DataSource::Bytes(Vec::new()));
        assert!(state.table.is_some());
        let status = state.status_message.as_deref().unwrap();
        assert!(status.starts_with("Error: loading upload (0 bytes): cannot read file"));
    }

    #[test]
    fn switching_naming_reevaluates_alerts() {
        let mut state = state_with("deslocamento_mm,pressao_poros_kpa\n31,10\n");
        assert!(state.analysis.as_ref().unwrap().alerts.is_empty());

        state.set_naming(ColumnNaming::Portuguese);
        let analysis = state.analysis.as_ref().unwrap();
        assert_eq!(analysis.alerts.len(), 2);
        assert!(analysis.has_critical_alert());
    }
}
