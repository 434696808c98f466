use super::model::{ColumnType, Table};

/// Column name → type tag, in the table's column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    entries: Vec<(String, ColumnType)>,
}

impl Classification {
    pub fn get(&self, name: &str) -> Option<ColumnType> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, kind)| *kind)
    }

    pub fn entries(&self) -> &[(String, ColumnType)] {
        &self.entries
    }

    /// Numeric column names in input order. These are the axis candidates
    /// for plotting; fewer than two means there is nothing to plot.
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, kind)| *kind == ColumnType::Numeric)
            .map(|(n, _)| n.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Classify every column by the type the loader inferred for it.
pub fn classify(table: &Table) -> Classification {
    Classification {
        entries: table
            .columns()
            .iter()
            .map(|c| (c.name.clone(), c.kind()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Column;

    fn sample() -> Table {
        Table::new(vec![
            Column::text("sensor", vec![Some("P1".into()), Some("P2".into())]),
            Column::numeric("time", vec![Some(1.0), Some(2.0)]),
            Column::numeric("displacement_mm", vec![Some(3.0), None]),
        ])
        .unwrap()
    }

    #[test]
    fn every_column_appears_once() {
        let table = sample();
        let classes = classify(&table);
        let names: Vec<&str> = classes.entries().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, table.column_names());
        assert_eq!(classes.len(), table.column_count());
    }

    #[test]
    fn numeric_subset_keeps_input_order() {
        let classes = classify(&sample());
        assert_eq!(classes.numeric_columns(), vec!["time", "displacement_mm"]);
        assert_eq!(classes.get("sensor"), Some(ColumnType::Other));
        assert_eq!(classes.get("missing"), None);
    }

    #[test]
    fn empty_table_classifies_to_nothing() {
        let classes = classify(&Table::new(Vec::new()).unwrap());
        assert!(classes.is_empty());
        assert!(classes.numeric_columns().is_empty());
    }
}
