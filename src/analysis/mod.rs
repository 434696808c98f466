/// Analysis layer: statistics and threshold alerts over a loaded table.
///
/// ```text
///   Table ──► schema::classify ──► summary::summarize (numeric columns)
///     │
///     └─────► alerts::AlertEvaluator::evaluate (raw columns)
/// ```

pub mod alerts;
pub mod summary;
pub mod thresholds;

use crate::data::model::Table;
use crate::data::schema::{classify, Classification};
use crate::error::Result;

use alerts::{AlertEvaluator, RuleOutcome};
use summary::{summarize, Summary};

/// Everything derived from one table, recomputed in full on every load.
#[derive(Debug)]
pub struct Analysis {
    pub classification: Classification,
    pub summary: Summary,
    pub alerts: Vec<RuleOutcome>,
}

impl Analysis {
    /// Numeric column names in table order.
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.classification.numeric_columns()
    }

    /// Whether any rule reported a critical reading.
    pub fn has_critical_alert(&self) -> bool {
        self.alerts
            .iter()
            .any(|outcome| matches!(outcome, Ok(verdict) if verdict.triggered))
    }
}

/// Run a full analysis cycle over `table`.
///
/// Summary failures abort the cycle; alert failures stay in their rule's
/// outcome.
pub fn analyze(table: &Table, evaluator: &AlertEvaluator) -> Result<Analysis> {
    let classification = classify(table);
    let summary = summarize(table, &classification.numeric_columns())?;
    let alerts = evaluator.evaluate(table);
    log::info!(
        "Analysis: {} numeric of {} columns, {} alert rule(s) applied",
        summary.len(),
        classification.len(),
        alerts.len()
    );
    Ok(Analysis {
        classification,
        summary,
        alerts,
    })
}
