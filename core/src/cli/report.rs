use crate::error::Result;
use crate::record::Record;
use std::io::Write;

/// Header of the identifier column
pub const FILENAME_HEADER: &str = "Filename";

/// Tabular report of scanned records
pub struct TableReport<'a> {
    headers: &'a [String],
    records: &'a [Record],
}

impl<'a> TableReport<'a> {
    /// Creates a new report; `headers` are the tag names, one per value column
    pub fn new(headers: &'a [String], records: &'a [Record]) -> Self {
        Self { headers, records }
    }

    /// Writes a header row followed by one row per record
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails
    pub fn write_csv<W: Write>(&self, out: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(
            std::iter::once(FILENAME_HEADER).chain(self.headers.iter().map(String::as_str)),
        )?;
        for record in self.records {
            writer.write_record(record.fields())?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Serializes the report as a JSON document
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        #[derive(serde::Serialize)]
        struct ReportJson<'r> {
            columns: Vec<&'r str>,
            records: &'r [Record],
        }

        let columns = std::iter::once(FILENAME_HEADER)
            .chain(self.headers.iter().map(String::as_str))
            .collect();
        serde_json::to_string_pretty(&ReportJson {
            columns,
            records: self.records,
        })
    }
}
