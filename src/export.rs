//! CSV and JSON serialization of tables.
//!
//! CSV output mirrors the input layout: header row, data rows, no index
//! column, missing cells as empty fields. JSON output is an array of row
//! objects keyed by column name, indented for readability.

use crate::error::Result;
use crate::table::Table;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Write a table as CSV
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(table.column_names())?;
    for row in table.rows() {
        csv_writer.write_record(row.iter().map(|cell| cell.to_field()))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write a table as a pretty-printed JSON array of row objects
pub fn write_json<W: Write>(table: &Table, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, &JsonRecords(table))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write a table to a CSV file, replacing any existing file
pub fn export_csv(table: &Table, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_csv(table, BufWriter::new(file))?;
    info!(
        "Exported {} rows to CSV: {}",
        table.row_count(),
        path.display()
    );
    Ok(())
}

/// Write a table to a JSON file, replacing any existing file
pub fn export_json(table: &Table, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_json(table, BufWriter::new(file))?;
    info!(
        "Exported {} rows to JSON: {}",
        table.row_count(),
        path.display()
    );
    Ok(())
}

/// Row-oriented JSON view of a table
struct JsonRecords<'a>(&'a Table);

impl Serialize for JsonRecords<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let names = self.0.column_names();
        let mut seq = serializer.serialize_seq(Some(self.0.row_count()))?;
        for row in self.0.rows() {
            seq.serialize_element(&JsonRow {
                names: &names,
                cells: &row,
            })?;
        }
        seq.end()
    }
}

struct JsonRow<'a> {
    names: &'a [&'a str],
    cells: &'a [&'a crate::table::Cell],
}

impl Serialize for JsonRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.names.len()))?;
        for (name, cell) in self.names.iter().zip(self.cells) {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}
