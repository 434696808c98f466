use crate::data::model::Table;
use crate::error::{AnalysisError, Result};

// ---------------------------------------------------------------------------
// SummaryRecord – descriptive statistics of one numeric column
// ---------------------------------------------------------------------------

/// Descriptive statistics over the non-missing values of a column.
///
/// Statistics that are undefined for the data (everything but `count` when
/// there are no values, `std` when there is only one) are `NaN`.
#[derive(Debug, Clone, Copy)]
pub struct SummaryRecord {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (denominator `count - 1`).
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl SummaryRecord {
    /// Compute the record from the present values of a column.
    pub fn from_values(values: &[f64]) -> Self {
        let count = values.len();
        if count == 0 {
            return SummaryRecord {
                count,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                p25: f64::NAN,
                p50: f64::NAN,
                p75: f64::NAN,
                max: f64::NAN,
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std = if count < 2 {
            f64::NAN
        } else {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        };

        SummaryRecord {
            count,
            mean,
            std,
            min: sorted[0],
            p25: percentile(&sorted, 0.25),
            p50: percentile(&sorted, 0.50),
            p75: percentile(&sorted, 0.75),
            max: sorted[count - 1],
        }
    }

    /// Row labels and values in display order.
    pub fn rows(&self) -> [(&'static str, f64); 8] {
        [
            ("count", self.count as f64),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.p25),
            ("50%", self.p50),
            ("75%", self.p75),
            ("max", self.max),
        ]
    }
}

/// Linear interpolation between the order statistics around `(n - 1) * q`.
/// `sorted` must be non-empty and ascending. The result always lies between
/// the two order statistics, including for infinite or near-overflow values.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * q;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    let (a, b) = (sorted[lo], sorted[hi]);
    if frac == 0.0 || a == b {
        return a;
    }
    let value = a * (1.0 - frac) + b * frac;
    if value.is_nan() {
        // opposite infinities: take the nearer order statistic
        return if frac < 0.5 { a } else { b };
    }
    value.clamp(a, b)
}

// ---------------------------------------------------------------------------
// Summary – per-column records
// ---------------------------------------------------------------------------

/// Summary records keyed by column name, in the order they were requested.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    records: Vec<(String, SummaryRecord)>,
}

impl Summary {
    pub fn get(&self, column: &str) -> Option<&SummaryRecord> {
        self.records
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, record)| record)
    }

    pub fn records(&self) -> &[(String, SummaryRecord)] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Summarize the given numeric columns of `table`.
///
/// Fails on the first column that is unknown, not numeric, or has no rows.
pub fn summarize<S: AsRef<str>>(table: &Table, numeric_columns: &[S]) -> Result<Summary> {
    let mut records = Vec::with_capacity(numeric_columns.len());
    for name in numeric_columns {
        let name = name.as_ref();
        let column = table
            .column(name)
            .ok_or_else(|| AnalysisError::ColumnNotFound(name.to_string()))?;
        if column.is_empty() {
            return Err(AnalysisError::EmptyColumn(name.to_string()));
        }
        if column.as_numeric().is_none() {
            return Err(AnalysisError::NonNumericColumn(name.to_string()));
        }
        let record = SummaryRecord::from_values(&column.present_values());
        log::debug!("Summarized '{name}': {} values", record.count);
        records.push((name.to_string(), record));
    }
    Ok(Summary { records })
}
