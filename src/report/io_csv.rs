// Primitives for writing CSV files.

use log::info;
use snafu::prelude::*;
use std::io::Write;

use crate::report::tables::Row;
use crate::report::*;

/// Writes the rows with the given header. Missing values are left empty.
///
/// `dest` is a file path, or `stdout`.
pub fn write_to_csv(rows: &[Row], fields: &[String], dest: &str) -> BReportResult<()> {
    if dest == "stdout" {
        let mut wtr = csv::Writer::from_writer(std::io::stdout());
        write_rows(&mut wtr, rows, fields).context(WritingCsvSnafu { path: dest })?;
    } else {
        let mut wtr = csv::Writer::from_path(dest).context(WritingCsvSnafu { path: dest })?;
        write_rows(&mut wtr, rows, fields).context(WritingCsvSnafu { path: dest })?;
        info!("New csv generated at {:?}", dest);
    }
    Ok(())
}

fn write_rows<W: Write>(wtr: &mut csv::Writer<W>, rows: &[Row], fields: &[String]) -> csv::Result<()> {
    wtr.write_record(fields)?;
    for row in rows.iter() {
        wtr.write_record(
            fields
                .iter()
                .map(|f| row.get(f).map(|s| s.as_str()).unwrap_or("")),
        )?;
    }
    wtr.flush()?;
    Ok(())
}
