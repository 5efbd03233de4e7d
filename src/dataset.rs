//! Load a delimited file into a typed [`Table`].
//!
//! Columns are addressed by header name. Each column's kind is inferred from all
//! of its non-empty cells: integer if every cell parses as `i64`, real if every
//! cell parses as `f64`, text otherwise.

use crate::error::{Result, ScatterError};
use crate::models::{Column, ColumnKind, Table, Value};
use crate::settings::PlotSettings;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::info;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read a CSV file with a header row.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let table = read_table(file)?;
    info!(
        "loaded {} rows x {} columns from {}",
        table.len(),
        table.columns().len(),
        path.display()
    );
    Ok(table)
}

/// Read a CSV file and check it carries every column the plot needs.
pub fn load_for_plot<P: AsRef<Path>>(path: P, settings: &PlotSettings) -> Result<Table> {
    let table = load_csv(path)?;
    table.require_columns(settings.required_columns())?;
    if table.is_empty() {
        return Err(ScatterError::EmptyTable);
    }
    Ok(table)
}

/// Parse CSV text from any reader.
pub fn read_table<R: Read>(reader: R) -> Result<Table> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let raw: Vec<StringRecord> = rdr.records().collect::<std::result::Result<_, _>>()?;

    let columns: Vec<Column> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| Column {
            name: name.to_string(),
            kind: infer_kind(raw.iter().map(|r| r.get(i).unwrap_or(""))),
        })
        .collect();

    let rows = raw
        .iter()
        .map(|rec| {
            columns
                .iter()
                .enumerate()
                .map(|(i, c)| Value::parse(rec.get(i).unwrap_or(""), c.kind))
                .collect()
        })
        .collect();

    Ok(Table::new(columns, rows))
}

fn infer_kind<'a, I: Iterator<Item = &'a str>>(cells: I) -> ColumnKind {
    let mut kind: Option<ColumnKind> = None;
    for cell in cells.map(str::trim).filter(|c| !c.is_empty()) {
        let cell_kind = if cell.parse::<i64>().is_ok() {
            ColumnKind::Integer
        } else if cell.parse::<f64>().is_ok() {
            ColumnKind::Real
        } else {
            return ColumnKind::Text;
        };
        kind = Some(match (kind, cell_kind) {
            (Some(ColumnKind::Real), _) | (_, ColumnKind::Real) => ColumnKind::Real,
            _ => ColumnKind::Integer,
        });
    }
    kind.unwrap_or(ColumnKind::Text)
}

/// Hover text for one record: `"{label}: Gold: {g}; Silver: {s}; Bronze: {b}"`.
pub fn tooltip_label(table: &Table, row: usize, label_field: &str) -> String {
    format!(
        "{}: Gold: {}; Silver: {}; Bronze: {}",
        table.get(row, label_field),
        table.get(row, "Gold"),
        table.get(row, "Silver"),
        table.get(row, "Bronze"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Country,Continent,Gold,Literacy
Kenya,3,2,87.0
Germany,2,11,
";

    #[test]
    fn infers_kinds_per_column() {
        let t = read_table(SAMPLE.as_bytes()).unwrap();
        let kinds: Vec<ColumnKind> = t.columns().iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ColumnKind::Text,
                ColumnKind::Integer,
                ColumnKind::Integer,
                ColumnKind::Real
            ]
        );
        assert_eq!(t.get(1, "Literacy"), &Value::Missing);
        assert_eq!(t.get(0, "Literacy"), &Value::Real(87.0));
    }

    #[test]
    fn mixed_integer_and_real_is_real() {
        assert_eq!(infer_kind(["1", "2.5", ""].into_iter()), ColumnKind::Real);
        assert_eq!(infer_kind(["1", "x"].into_iter()), ColumnKind::Text);
        assert_eq!(infer_kind(["", " "].into_iter()), ColumnKind::Text);
    }

    #[test]
    fn tooltip_uses_medal_columns() {
        let t = read_table("Country,Gold,Silver,Bronze\nKenya,2,4,5\n".as_bytes()).unwrap();
        assert_eq!(
            tooltip_label(&t, 0, "Country"),
            "Kenya: Gold: 2; Silver: 4; Bronze: 5"
        );
    }

    #[test]
    fn ragged_rows_are_errors() {
        let err = read_table("a,b\n1,2,3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ScatterError::Csv(_)));
    }
}
