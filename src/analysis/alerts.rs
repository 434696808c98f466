//! Threshold checking for the monitored sensor columns.
//!
//! Each rule is evaluated on its own: a rule whose column is missing is
//! skipped, and a rule whose column is not numeric fails without affecting
//! the other rule.

use crate::data::model::{Column, Table};
use crate::error::{AnalysisError, Result};

use super::thresholds::{AlertConfig, ThresholdRule};

/// Result of checking one rule against the loaded table.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertVerdict {
    pub column: String,
    /// Largest present reading, `None` if every cell is missing.
    pub observed_max: Option<f64>,
    /// `observed_max` is strictly above the rule's limit.
    pub triggered: bool,
    pub message: String,
}

/// Outcome of a single rule. Errors are scoped to the rule that raised them.
pub type RuleOutcome = Result<AlertVerdict>;

/// Evaluates a fixed rule set against tables.
#[derive(Debug, Clone, Default)]
pub struct AlertEvaluator {
    config: AlertConfig,
}

impl AlertEvaluator {
    pub fn new(config: AlertConfig) -> Self {
        AlertEvaluator { config }
    }

    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// One outcome per rule whose column exists, in rule order.
    pub fn evaluate(&self, table: &Table) -> Vec<RuleOutcome> {
        self.config
            .rules()
            .iter()
            .filter_map(|rule| match table.column(&rule.column) {
                Some(column) => Some(evaluate_rule(rule, column)),
                None => {
                    log::debug!("No '{}' column; skipping {} check", rule.column, rule.label);
                    None
                }
            })
            .collect()
    }
}

fn evaluate_rule(rule: &ThresholdRule, column: &Column) -> RuleOutcome {
    if column.as_numeric().is_none() {
        log::warn!("Alert column '{}' is not numeric", rule.column);
        return Err(AnalysisError::NonNumericColumn(rule.column.clone()));
    }

    let observed_max = column.present_values().into_iter().reduce(f64::max);
    let triggered = observed_max.is_some_and(|max| max > rule.limit);

    let message = match observed_max {
        Some(max) if triggered => format!(
            "Critical {} detected: {} {}",
            rule.label.to_lowercase(),
            format_two_decimals(max),
            rule.unit
        ),
        Some(max) => format!(
            "{} within limits: {} {}",
            rule.label,
            format_two_decimals(max),
            rule.unit
        ),
        None => format!("{}: no readings", rule.label),
    };

    if triggered {
        log::warn!("{message}");
    } else {
        log::info!("{message}");
    }

    Ok(AlertVerdict {
        column: rule.column.clone(),
        observed_max,
        triggered,
        message,
    })
}

/// Two decimal places. Exact ties on the binary value round to even.
pub fn format_two_decimals(value: f64) -> String {
    format!("{value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::thresholds::ColumnNaming;

    fn displacement_table(values: Vec<Option<f64>>) -> Table {
        Table::new(vec![Column::numeric("displacement_mm", values)]).unwrap()
    }

    fn only_verdict(table: &Table) -> AlertVerdict {
        let mut outcomes = AlertEvaluator::default().evaluate(table);
        assert_eq!(outcomes.len(), 1);
        outcomes.remove(0).unwrap()
    }

    #[test]
    fn limit_itself_is_not_critical() {
        let verdict = only_verdict(&displacement_table(vec![Some(12.0), Some(30.0)]));
        assert!(!verdict.triggered);
        assert_eq!(verdict.observed_max, Some(30.0));
        assert_eq!(verdict.message, "Displacement within limits: 30.00 mm");
    }

    #[test]
    fn just_above_limit_is_critical() {
        let verdict = only_verdict(&displacement_table(vec![Some(30.01)]));
        assert!(verdict.triggered);
        assert_eq!(verdict.message, "Critical displacement detected: 30.01 mm");
    }

    #[test]
    fn missing_cells_are_ignored_for_max() {
        let verdict = only_verdict(&displacement_table(vec![None, Some(4.25), None]));
        assert_eq!(verdict.observed_max, Some(4.25));
    }

    #[test]
    fn all_missing_is_not_triggered() {
        let verdict = only_verdict(&displacement_table(vec![None, None]));
        assert_eq!(verdict.observed_max, None);
        assert!(!verdict.triggered);
        assert_eq!(verdict.message, "Displacement: no readings");
    }

    #[test]
    fn rounding_ties_go_to_even() {
        assert_eq!(format_two_decimals(30.125), "30.12");
        assert_eq!(format_two_decimals(30.375), "30.38");
        assert_eq!(format_two_decimals(35.2), "35.20");
        assert_eq!(format_two_decimals(59.999), "60.00");
    }

    #[test]
    fn text_column_fails_only_its_rule() {
        let table = Table::new(vec![
            Column::text("displacement_mm", vec![Some("high".into()), Some("low".into())]),
            Column::numeric("pore_pressure_kpa", vec![Some(61.5), Some(20.0)]),
        ])
        .unwrap();
        let outcomes = AlertEvaluator::default().evaluate(&table);
        assert_eq!(outcomes.len(), 2);
        assert!(matches!(
            &outcomes[0],
            Err(AnalysisError::NonNumericColumn(col)) if col == "displacement_mm"
        ));
        let pore = outcomes[1].as_ref().unwrap();
        assert!(pore.triggered);
        assert_eq!(pore.message, "Critical pore pressure detected: 61.50 kPa");
    }

    #[test]
    fn absent_columns_produce_no_outcomes() {
        let table = Table::new(vec![Column::numeric("time", vec![Some(1.0)])]).unwrap();
        assert!(AlertEvaluator::default().evaluate(&table).is_empty());
    }

    #[test]
    fn portuguese_rules_read_portuguese_columns() {
        let table = Table::new(vec![
            Column::numeric("deslocamento_mm", vec![Some(31.0)]),
            Column::numeric("displacement_mm", vec![Some(1.0)]),
        ])
        .unwrap();
        let evaluator = AlertEvaluator::new(AlertConfig::new(ColumnNaming::Portuguese));
        let outcomes = evaluator.evaluate(&table);
        assert_eq!(outcomes.len(), 1);
        let verdict = outcomes[0].as_ref().unwrap();
        assert_eq!(verdict.column, "deslocamento_mm");
        assert!(verdict.triggered);
    }
}
