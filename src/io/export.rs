//! CSV and JSON export of the profile table.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::table::ProfileTable;

/// Column header for CSV export.
pub const HEADER: [&str; 3] = ["hour", "value", "profile"];

/// Output format for table export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    /// Comma-separated rows with a header line.
    #[default]
    Csv,
    /// JSON array of row objects.
    Json,
}

/// Exports the table to a file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_table(table: &ProfileTable, format: Format, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_table(table, format, buf)
}

/// Writes the table in the given format to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing or serialization fails.
pub fn write_table(table: &ProfileTable, format: Format, writer: impl Write) -> io::Result<()> {
    match format {
        Format::Csv => write_csv(table, writer),
        Format::Json => write_json(table, writer),
    }
}

/// Writes the table as CSV: header row, then one row per `(hour, profile)`.
///
/// Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(table: &ProfileTable, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(HEADER)?;
    for row in table.rows() {
        wtr.write_record(&[
            row.hour.to_string(),
            format!("{:.4}", row.value),
            row.profile.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the table as a JSON array of `{hour, value, profile}` objects.
///
/// # Errors
///
/// Returns an `io::Error` if serialization or writing fails.
pub fn write_json(table: &ProfileTable, mut writer: impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, table).map_err(io::Error::other)?;
    writeln!(writer)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::{Profile, ProfileMode};
    use crate::schedule::types::Schedule;
    use crate::table::ProfileRow;

    fn make_table(hours: usize) -> ProfileTable {
        let profiles: Vec<Profile> = ["Grid Energy", "Solar Power"]
            .iter()
            .map(|name| Profile {
                name: (*name).to_string(),
                mode: ProfileMode::PriorityWindow,
                schedule: Schedule::from_values((0..hours).map(|h| 5.0 + h as f64).collect()),
                intervals: Vec::new(),
                smoothing: None,
            })
            .collect();
        ProfileTable::from_profiles(&profiles)
    }

    #[test]
    fn header_matches_table_columns() {
        let mut buf = Vec::new();
        write_csv(&make_table(1), &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let first_line = output.as_deref().unwrap_or("").lines().next().unwrap_or("");
        assert_eq!(first_line, "hour,value,profile");
    }

    #[test]
    fn row_count_matches_profiles_times_hours() {
        let mut buf = Vec::new();
        write_csv(&make_table(24), &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let lines: Vec<&str> = output.as_deref().unwrap_or("").lines().collect();
        // 1 header + 2 profiles * 24 hours
        assert_eq!(lines.len(), 49);
    }

    #[test]
    fn deterministic_output() {
        let table = make_table(5);
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_csv(&table, &mut buf1).ok();
        write_csv(&table, &mut buf2).ok();
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn csv_rows_parse_back() {
        let mut buf = Vec::new();
        write_csv(&make_table(3), &mut buf).ok();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let rows: Vec<ProfileRow> = rdr.deserialize().filter_map(Result::ok).collect();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].profile, "Grid Energy");
        assert_eq!(rows[3].profile, "Solar Power");
        assert_eq!(rows[4].hour, 1);
        assert_eq!(rows[4].value, 6.0);
    }

    #[test]
    fn json_is_an_array_of_rows() {
        let mut buf = Vec::new();
        write_table(&make_table(2), Format::Json, &mut buf).ok();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap_or_default();
        let rows = value.as_array().map(Vec::len);
        assert_eq!(rows, Some(4));
        assert_eq!(value[1]["hour"], 1);
        assert_eq!(value[1]["profile"], "Grid Energy");
    }
}
