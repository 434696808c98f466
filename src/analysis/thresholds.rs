//! Built-in safety thresholds for the monitored sensor columns.
//!
//! The two rules are fixed; only the column names they look for can vary,
//! since datasets exist with both English and Portuguese headers.

/// Upper bound for displacement, in millimeters.
pub const DISPLACEMENT_LIMIT_MM: f64 = 30.0;

/// Upper bound for pore pressure, in kilopascals.
pub const PORE_PRESSURE_LIMIT_KPA: f64 = 60.0;

/// Environment variable selecting the recognized column names (`en` / `pt`).
pub const NAMING_ENV_VAR: &str = "GEOVIZ_COLUMN_NAMING";

/// A fixed (column, bound, unit) triple. A reading strictly above `limit`
/// is critical.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdRule {
    pub column: String,
    pub limit: f64,
    pub unit: &'static str,
    /// Quantity name used in messages, e.g. "Displacement".
    pub label: &'static str,
}

/// Header naming convention used by a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnNaming {
    /// `displacement_mm`, `pore_pressure_kpa`
    #[default]
    English,
    /// `deslocamento_mm`, `pressao_poros_kpa`
    Portuguese,
}

impl ColumnNaming {
    pub const ALL: [ColumnNaming; 2] = [ColumnNaming::English, ColumnNaming::Portuguese];

    pub fn displacement_column(self) -> &'static str {
        match self {
            ColumnNaming::English => "displacement_mm",
            ColumnNaming::Portuguese => "deslocamento_mm",
        }
    }

    pub fn pore_pressure_column(self) -> &'static str {
        match self {
            ColumnNaming::English => "pore_pressure_kpa",
            ColumnNaming::Portuguese => "pressao_poros_kpa",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ColumnNaming::English => "English",
            ColumnNaming::Portuguese => "Portuguese",
        }
    }

    /// Parse `en`/`english` or `pt`/`portuguese`, ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Some(ColumnNaming::English),
            "pt" | "portuguese" => Some(ColumnNaming::Portuguese),
            _ => None,
        }
    }

    /// Read the naming from [`NAMING_ENV_VAR`], falling back to English.
    pub fn from_env() -> Self {
        match std::env::var(NAMING_ENV_VAR) {
            Ok(value) => Self::parse(&value).unwrap_or_else(|| {
                log::warn!("Ignoring unknown {NAMING_ENV_VAR}={value:?}; using English names");
                ColumnNaming::English
            }),
            Err(_) => ColumnNaming::English,
        }
    }
}

/// The immutable rule set handed to the alert evaluator. Rules are
/// evaluated in order: displacement first, then pore pressure.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertConfig {
    rules: Vec<ThresholdRule>,
}

impl AlertConfig {
    pub fn new(naming: ColumnNaming) -> Self {
        AlertConfig {
            rules: vec![
                ThresholdRule {
                    column: naming.displacement_column().to_string(),
                    limit: DISPLACEMENT_LIMIT_MM,
                    unit: "mm",
                    label: "Displacement",
                },
                ThresholdRule {
                    column: naming.pore_pressure_column().to_string(),
                    limit: PORE_PRESSURE_LIMIT_KPA,
                    unit: "kPa",
                    label: "Pore pressure",
                },
            ],
        }
    }

    pub fn rules(&self) -> &[ThresholdRule] {
        &self.rules
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self::new(ColumnNaming::default())
    }
}
