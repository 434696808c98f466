use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;

use super::model::{Column, Table};
use crate::error::{AnalysisError, Result};

/// Cell contents treated as a missing value, after trimming. Same set as the
/// default NA markers of the pandas CSV reader.
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Where a CSV document comes from.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// A file on the local filesystem.
    Path(PathBuf),
    /// An in-memory document, e.g. an uploaded file's contents.
    Bytes(Vec<u8>),
}

impl DataSource {
    /// Short human-readable name for status lines.
    pub fn label(&self) -> String {
        match self {
            DataSource::Path(p) => p
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.display().to_string()),
            DataSource::Bytes(b) => format!("upload ({} bytes)", b.len()),
        }
    }
}

/// Load a table from either kind of source. The source is left untouched.
pub fn load(source: &DataSource) -> Result<Table> {
    match source {
        DataSource::Path(path) => load_path(path),
        DataSource::Bytes(bytes) => parse_csv(bytes),
    }
}

/// Read and parse a CSV file.
pub fn load_path(path: &Path) -> Result<Table> {
    let bytes = std::fs::read(path)?;
    log::debug!("Read {} bytes from {}", bytes.len(), path.display());
    parse_csv(&bytes)
}

/// Drain a reader and parse its contents as CSV.
pub fn load_reader<R: Read>(mut reader: R) -> Result<Table> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    parse_csv(&bytes)
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// CSV layout: UTF-8, comma separated, header row first.
///
/// Rows shorter than the header are padded with missing cells and longer
/// rows are truncated to the header width.
fn parse_csv(bytes: &[u8]) -> Result<Table> {
    check_quotes(bytes)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let raw_headers = reader
        .headers()
        .map_err(|e| malformed(format!("reading header: {e}")))?
        .clone();
    if raw_headers.is_empty() {
        return Err(malformed("document is empty".to_string()));
    }
    let headers = unique_headers(&raw_headers);
    let width = headers.len();

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); width];
    let mut ragged_rows = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| malformed(format!("row {}: {e}", row_no + 1)))?;
        if record.len() != width {
            ragged_rows += 1;
        }
        for (col_idx, column) in cells.iter_mut().enumerate() {
            column.push(record.get(col_idx).and_then(normalize_cell));
        }
    }

    if ragged_rows > 0 {
        log::warn!("{ragged_rows} row(s) did not match the header width of {width}; padded or truncated");
    }

    let columns: Vec<Column> = headers
        .into_iter()
        .zip(cells)
        .map(|(name, values)| infer_column(name, values))
        .collect();

    let table = Table::new(columns)
        .ok_or_else(|| malformed("columns have inconsistent lengths".to_string()))?;
    log::info!(
        "Loaded {} rows with columns {:?}",
        table.row_count(),
        table.column_names()
    );
    Ok(table)
}

fn malformed(msg: String) -> AnalysisError {
    AnalysisError::MalformedInput(msg)
}

/// Reject documents whose last quoted field is never closed. The csv reader
/// accepts these silently and swallows the rest of the file into one cell.
fn check_quotes(bytes: &[u8]) -> Result<()> {
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut line = 1usize;
    let mut opened_on = 0usize;

    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if in_quotes {
            match b {
                b'"' if bytes.get(i + 1) == Some(&b'"') => i += 1,
                b'"' => in_quotes = false,
                b'\n' => line += 1,
                b'\r' if bytes.get(i + 1) != Some(&b'\n') => line += 1,
                _ => {}
            }
        } else {
            match b {
                b',' => at_field_start = true,
                b'\n' => {
                    line += 1;
                    at_field_start = true;
                }
                // CR-only line endings end a record too
                b'\r' => {
                    if bytes.get(i + 1) != Some(&b'\n') {
                        line += 1;
                    }
                    at_field_start = true;
                }
                b'"' if at_field_start => {
                    in_quotes = true;
                    opened_on = line;
                    at_field_start = false;
                }
                _ => at_field_start = false,
            }
        }
        i += 1;
    }

    if in_quotes {
        return Err(malformed(format!("unterminated quote starting on line {opened_on}")));
    }
    Ok(())
}

/// Make header names unique: a repeated `a` becomes `a.1`, `a.2`, ...
/// Blank names become `Unnamed: <index>`.
fn unique_headers(raw: &StringRecord) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(raw.len());
    for (idx, header) in raw.iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {idx}")
        } else {
            header.to_string()
        };
        let mut name = base.clone();
        let mut suffix = 1;
        while names.contains(&name) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        if name != base {
            log::debug!("Renamed duplicate column '{base}' to '{name}'");
        }
        names.push(name);
    }
    names
}

fn normalize_cell(raw: &str) -> Option<String> {
    if MISSING_MARKERS.contains(&raw.trim()) {
        None
    } else {
        Some(raw.to_string())
    }
}

fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok()
}

// ---------------------------------------------------------------------------
// Type inference
// ---------------------------------------------------------------------------

/// Two-pass inference: decide the type over every present cell, then build
/// the typed column. A column without rows cannot be numeric.
fn infer_column(name: String, values: Vec<Option<String>>) -> Column {
    let numeric = !values.is_empty()
        && values
            .iter()
            .flatten()
            .all(|cell| parse_number(cell).is_some());

    if numeric {
        let parsed = values
            .iter()
            .map(|cell| {
                cell.as_deref()
                    .and_then(parse_number)
                    .filter(|v| !v.is_nan())
            })
            .collect();
        Column::numeric(name, parsed)
    } else {
        Column::text(name, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ColumnType;

    fn parse(text: &str) -> Result<Table> {
        load_reader(text.as_bytes())
    }

    #[test]
    fn infers_numeric_and_text_columns() {
        let table = parse("time,site,depth\n1,A,2.5\n2,B,3\n").unwrap();
        let kinds: Vec<_> = table.columns().iter().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![ColumnType::Numeric, ColumnType::Other, ColumnType::Numeric]
        );
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column("depth").unwrap().present_values(), vec![2.5, 3.0]);
    }

    #[test]
    fn one_bad_cell_makes_column_text() {
        let table = parse("v\n1\n2\nthree\n").unwrap();
        assert_eq!(table.column("v").unwrap().kind(), ColumnType::Other);
    }

    #[test]
    fn empty_cells_and_markers_are_missing() {
        let table = parse("v,w\n1,\nNA,x\n3,\n").unwrap();
        let v = table.column("v").unwrap();
        assert_eq!(v.kind(), ColumnType::Numeric);
        assert_eq!(v.as_numeric().unwrap(), &[Some(1.0), None, Some(3.0)]);

        let w = table.column("w").unwrap();
        assert_eq!(w.kind(), ColumnType::Other);
        assert_eq!(w.display_cell(0), "");
    }

    #[test]
    fn pandas_style_markers_are_missing() {
        let table = parse("v\nNone\n1\n<NA>\n-nan\n1.#QNAN\n#NA\n2\n").unwrap();
        let v = table.column("v").unwrap();
        assert_eq!(v.kind(), ColumnType::Numeric);
        assert_eq!(v.present_values(), vec![1.0, 2.0]);
        assert_eq!(table.row_count(), 7);
    }

    #[test]
    fn all_missing_column_is_numeric() {
        let table = parse("a,b\n1,\n2,\n").unwrap();
        assert_eq!(table.column("b").unwrap().kind(), ColumnType::Numeric);
        assert!(table.column("b").unwrap().present_values().is_empty());
    }

    #[test]
    fn header_only_has_no_numeric_columns() {
        let table = parse("a,b\n").unwrap();
        assert_eq!(table.row_count(), 0);
        assert!(table.columns().iter().all(|c| c.kind() == ColumnType::Other));
    }

    #[test]
    fn whitespace_around_numbers_is_accepted() {
        let table = parse("v\n 1.5 \n-2\n").unwrap();
        assert_eq!(table.column("v").unwrap().present_values(), vec![1.5, -2.0]);
    }

    #[test]
    fn duplicate_headers_are_suffixed() {
        let table = parse("a,a,b,a\n1,2,3,4\n").unwrap();
        assert_eq!(table.column_names(), vec!["a", "a.1", "b", "a.2"]);
        assert_eq!(table.column("a.1").unwrap().present_values(), vec![2.0]);
    }

    #[test]
    fn blank_header_gets_placeholder_name() {
        let table = parse(",value\n0,1\n").unwrap();
        assert_eq!(table.column_names(), vec!["Unnamed: 0", "value"]);
    }

    #[test]
    fn short_rows_are_padded_long_rows_truncated() {
        let table = parse("a,b,c\n1,2\n4,5,6,7\n").unwrap();
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column("c").unwrap().as_numeric().unwrap(), &[None, Some(6.0)]);
    }

    #[test]
    fn quoted_fields_are_unwrapped() {
        let table = parse("name,v\n\"Site, north\",1\n\"say \"\"hi\"\"\",2\n").unwrap();
        let name = table.column("name").unwrap();
        assert_eq!(name.display_cell(0), "Site, north");
        assert_eq!(name.display_cell(1), "say \"hi\"");
    }

    #[test]
    fn unterminated_quote_is_malformed() {
        let err = parse("a,b\n1,\"open\n2,3\n").unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedInput(_)));
    }

    #[test]
    fn carriage_return_line_endings_reset_field_start() {
        let table = parse("a,b\r\",\",1\r").unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.column("a").unwrap().display_cell(0), ",");
        assert_eq!(table.column("b").unwrap().present_values(), vec![1.0]);

        assert!(matches!(
            parse("a,b\r1,\"open\r2,3\r"),
            Err(AnalysisError::MalformedInput(_))
        ));
    }

    #[test]
    fn empty_document_is_malformed() {
        assert!(matches!(parse(""), Err(AnalysisError::MalformedInput(_))));
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let bytes: &[u8] = b"a,b\n1,\xff\xfe\n";
        assert!(matches!(
            load_reader(bytes),
            Err(AnalysisError::MalformedInput(_))
        ));
    }

    #[test]
    fn missing_path_is_io_error() {
        let source = DataSource::Path(PathBuf::from("/nonexistent/geoviz/readings.csv"));
        assert!(matches!(load(&source), Err(AnalysisError::Io(_))));
        assert_eq!(source.label(), "readings.csv");
    }

    #[test]
    fn bytes_source_matches_reader() {
        let text = "x,y\n1,2\n";
        let source = DataSource::Bytes(text.as_bytes().to_vec());
        assert_eq!(load(&source).unwrap(), parse(text).unwrap());
    }
}
