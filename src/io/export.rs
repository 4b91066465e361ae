//! Spreadsheet export of frequency tables
//!
//! Tables are written as comma-separated values with a UTF-8 byte-order
//! mark so spreadsheet applications pick the right encoding for Hangul.

use crate::io::error::{Result, file_system_error};
use crate::text::frequency::FrequencyEntry;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Column names of exported tables
pub const CSV_COLUMNS: [&str; 3] = ["word", "frequency", "percentage"];

const BOM: &[u8] = "\u{feff}".as_bytes();

/// Write a table as CSV to `writer`, BOM and header included
///
/// Rows end in CRLF. The header is written even for an empty table.
///
/// # Errors
///
/// Returns an error if the writer fails
pub fn write_table_csv<W: Write>(entries: &[FrequencyEntry], mut writer: W) -> io::Result<W> {
    writer.write_all(BOM)?;

    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    if entries.is_empty() {
        csv.write_record(CSV_COLUMNS)?;
    }
    for entry in entries {
        csv.serialize(entry)?;
    }

    csv.into_inner().map_err(csv::IntoInnerError::into_error)
}

/// Write a table to `path` as CSV
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The file cannot be written
pub fn export_table_csv(entries: &[FrequencyEntry], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(file_system_error(parent, "create directory"))?;
    }

    let file = File::create(path).map_err(file_system_error(path, "create table"))?;
    write_table_csv(entries, BufWriter::new(file))
        .and_then(|mut writer| writer.flush())
        .map_err(file_system_error(path, "export table"))
}
