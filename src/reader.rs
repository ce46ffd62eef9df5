//! CSV ingestion into the raw table tier.

use crate::error::{ParserError, Result};
use crate::table::{Cell, Column, Table};
use std::collections::HashSet;
use std::io::Read;
use tracing::debug;

/// Read a CSV stream (header row first) into a raw table.
///
/// Fields keep their source text; only NA tokens are turned into missing
/// cells (see [`Cell::from_raw`]). Rows whose field count differs from the
/// header fail the whole read.
pub fn read_table<R: Read>(reader: R) -> Result<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(ParserError::parse_failure)?
        .clone();
    let names = dedupe_headers(headers.iter());
    let mut cells: Vec<Vec<Cell>> = vec![Vec::new(); names.len()];

    for record in csv_reader.records() {
        let record = record.map_err(ParserError::parse_failure)?;
        for (column, field) in cells.iter_mut().zip(record.iter()) {
            column.push(Cell::from_raw(field));
        }
    }

    let columns: Vec<Column> = names
        .into_iter()
        .zip(cells)
        .map(|(name, cells)| Column::new(name, cells))
        .collect();
    let table = Table::from_columns(columns)?;
    debug!(
        "Read {} rows x {} columns",
        table.row_count(),
        table.column_count()
    );
    Ok(table)
}

/// Make header names unique by suffixing repeats with `.1`, `.2`, ...
fn dedupe_headers<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let headers: Vec<&str> = headers.collect();
    let mut taken: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(headers.len());

    for header in &headers {
        let mut name = header.to_string();
        let mut suffix = 1;
        while taken.contains(&name) || (name != *header && headers.contains(&name.as_str())) {
            name = format!("{}.{}", header, suffix);
            suffix += 1;
        }
        taken.insert(name.clone());
        names.push(name);
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_keeps_source_text() {
        let csv = "time,open,label\n1754179200,100.5,up\n1754265600,,down\n";
        let table = read_table(csv.as_bytes()).unwrap();

        assert_eq!(table.column_names(), vec!["time", "open", "label"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.column("open").unwrap().cells,
            vec![Cell::Text("100.5".into()), Cell::Missing]
        );
        assert!(table.column("open").unwrap().is_numeric());
        assert_eq!(
            table.column("label").unwrap().cells,
            vec![Cell::Text("up".into()), Cell::Text("down".into())]
        );
    }

    #[test]
    fn test_header_only_is_zero_rows() {
        let table = read_table("a,b\n".as_bytes()).unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_input_has_no_columns() {
        let table = read_table("".as_bytes()).unwrap();
        assert_eq!(table.column_count(), 0);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_ragged_row_is_parse_failure() {
        let result = read_table("a,b\n1,2\n3\n".as_bytes());
        assert!(matches!(result, Err(ParserError::ParseFailure { .. })));
    }

    #[test]
    fn test_quoted_fields() {
        let table = read_table("name,value\n\"Smart, Trail\",1\n".as_bytes()).unwrap();
        assert_eq!(
            table.column("name").unwrap().cells,
            vec![Cell::Text("Smart, Trail".into())]
        );
    }

    #[test]
    fn test_dedupe_headers() {
        let names = dedupe_headers(["a", "b", "a", "a"].into_iter());
        assert_eq!(names, vec!["a", "b", "a.1", "a.2"]);

        let names = dedupe_headers(["a", "a", "a.1"].into_iter());
        assert_eq!(names, vec!["a", "a.2", "a.1"]);
    }
}
