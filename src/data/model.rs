use std::fmt;

// ---------------------------------------------------------------------------
// ColumnType – the inferred type tag of a column
// ---------------------------------------------------------------------------

/// Type tag assigned to every column at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Every non-missing cell parsed as a number.
    Numeric,
    /// At least one non-missing cell is not a number.
    Other,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Numeric => write!(f, "numeric"),
            ColumnType::Other => write!(f, "other"),
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnData – typed cell storage
// ---------------------------------------------------------------------------

/// Cells of one column. `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Column – a named, typed sequence of cells
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Column {
            name: name.into(),
            data: ColumnData::Numeric(values),
        }
    }

    pub fn text(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Column {
            name: name.into(),
            data: ColumnData::Text(values),
        }
    }

    /// The inferred type, read from the storage variant.
    pub fn kind(&self) -> ColumnType {
        match self.data {
            ColumnData::Numeric(_) => ColumnType::Numeric,
            ColumnData::Text(_) => ColumnType::Other,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Numeric cells, or `None` for a text column.
    pub fn as_numeric(&self) -> Option<&[Option<f64>]> {
        match &self.data {
            ColumnData::Numeric(v) => Some(v),
            ColumnData::Text(_) => None,
        }
    }

    /// Non-missing numeric values in row order. Empty for text columns.
    pub fn present_values(&self) -> Vec<f64> {
        self.as_numeric()
            .map(|cells| cells.iter().flatten().copied().collect())
            .unwrap_or_default()
    }

    /// Render one cell for display. Missing cells render as an empty string.
    pub fn display_cell(&self, row: usize) -> String {
        match &self.data {
            ColumnData::Numeric(v) => match v.get(row).copied().flatten() {
                Some(x) => format!("{x}"),
                None => String::new(),
            },
            ColumnData::Text(v) => v.get(row).cloned().flatten().unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// An immutable, column-oriented table. Column names are unique and every
/// column holds exactly `row_count` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Build a table from columns of equal length.
    ///
    /// Returns `None` if the columns disagree on length or repeat a name.
    pub fn new(columns: Vec<Column>) -> Option<Self> {
        let row_count = columns.first().map_or(0, Column::len);
        if columns.iter().any(|c| c.len() != row_count) {
            return None;
        }
        for (i, c) in columns.iter().enumerate() {
            if columns[..i].iter().any(|other| other.name == c.name) {
                return None;
            }
        }
        Some(Table { columns, row_count })
    }

    /// Columns in insertion (header) order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of data rows (header excluded).
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_ragged_columns() {
        let cols = vec![
            Column::numeric("a", vec![Some(1.0), Some(2.0)]),
            Column::numeric("b", vec![Some(1.0)]),
        ];
        assert!(Table::new(cols).is_none());
    }

    #[test]
    fn new_rejects_duplicate_names() {
        let cols = vec![
            Column::numeric("a", vec![Some(1.0)]),
            Column::text("a", vec![Some("x".into())]),
        ];
        assert!(Table::new(cols).is_none());
    }

    #[test]
    fn kind_follows_storage() {
        let num = Column::numeric("n", vec![None]);
        let txt = Column::text("t", vec![None]);
        assert_eq!(num.kind(), ColumnType::Numeric);
        assert_eq!(txt.kind(), ColumnType::Other);
    }

    #[test]
    fn present_values_skip_missing() {
        let col = Column::numeric("n", vec![Some(1.5), None, Some(-2.0)]);
        assert_eq!(col.present_values(), vec![1.5, -2.0]);
        assert_eq!(col.display_cell(1), "");
        assert_eq!(col.display_cell(0), "1.5");
    }
}
