//! Re-archiving of matched items
//!
//! Copies the original bytes of every record into a new zip file. Disk files
//! keep their path as entry name; zip-nested items keep their inner name.

use crate::error::{DicomTagsError, Result};
use crate::record::Record;
use crate::source::SourceRef;
use log::{info, warn};
use std::fs::File;
use std::io::{self, BufWriter, Read, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Outcome of an archive run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveReport {
    /// Entry names written, in record order
    pub written: Vec<String>,
    /// Identifiers that could not be copied, with the reason
    pub skipped: Vec<(String, String)>,
}

/// Writes the source bytes of every record into a new zip at `output`
///
/// Items that cannot be located or copied are reported and skipped.
///
/// # Errors
///
/// Returns `ArchiveCreate` if the output file cannot be created, or an error
/// if the finished archive cannot be flushed
pub fn write_archive(output: &Path, records: &[Record]) -> Result<ArchiveReport> {
    let file = File::create(output).map_err(|source| DicomTagsError::ArchiveCreate {
        path: output.to_path_buf(),
        source,
    })?;

    let mut writer = ZipWriter::new(BufWriter::new(file));
    let mut report = ArchiveReport::default();

    for record in records {
        let name = record.source.archive_name();
        match copy_item(&mut writer, &record.source, &name) {
            Ok(()) => report.written.push(name),
            Err(e) => {
                warn!("Skipping archive of {} due to: {}", record.identifier, e);
                report.skipped.push((record.identifier.clone(), e.to_string()));
            }
        }
    }

    writer.finish()?.flush()?;
    info!(
        "Archived {} item(s) to {}",
        report.written.len(),
        output.display()
    );
    Ok(report)
}

fn copy_item<W: Write + Seek>(
    writer: &mut ZipWriter<W>,
    source: &SourceRef,
    name: &str,
) -> Result<()> {
    match source {
        SourceRef::OnDisk(path) => {
            let input = File::open(path)?;
            copy_entry(writer, input, name)
        }
        SourceRef::InArchive { archive, entry } => {
            let mut container = ZipArchive::new(File::open(archive)?)?;
            let input = container.by_name(entry)?;
            copy_entry(writer, input, name)
        }
    }
}

/// Streams `input` into a new entry, removing the entry again if the copy fails
fn copy_entry<W: Write + Seek, R: Read>(
    writer: &mut ZipWriter<W>,
    mut input: R,
    name: &str,
) -> Result<()> {
    writer.start_file(name, SimpleFileOptions::default())?;
    if let Err(e) = io::copy(&mut input, writer) {
        writer.abort_file()?;
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{patch_file, write_stored_zip};
    use tempfile::TempDir;

    fn record(source: SourceRef) -> Record {
        Record {
            identifier: source.identifier(),
            source,
            values: vec!["v".to_string()],
        }
    }

    fn read_entry(zip_path: &Path, name: &str) -> Vec<u8> {
        let mut archive = ZipArchive::new(File::open(zip_path).unwrap()).unwrap();
        let mut entry = archive.by_name(name).unwrap();
        let mut data = Vec::new();
        entry.read_to_end(&mut data).unwrap();
        data
    }

    #[test]
    fn test_archive_disk_and_nested_entries() {
        let temp_dir = TempDir::new().unwrap();
        let disk_path = temp_dir.path().join("plain.dcm");
        std::fs::write(&disk_path, b"disk bytes").unwrap();
        let container = temp_dir.path().join("container.zip");
        crate::testing::write_zip(&container, &[("inner.dcm", b"nested bytes".to_vec())]);

        let output = temp_dir.path().join("out.zip");
        let records = vec![
            record(SourceRef::on_disk(&disk_path)),
            record(SourceRef::in_archive(&container, "inner.dcm")),
        ];
        let report = write_archive(&output, &records).unwrap();

        let disk_name = disk_path.to_string_lossy().into_owned();
        assert_eq!(report.written, vec![disk_name.clone(), "inner.dcm".to_string()]);
        assert!(report.skipped.is_empty());

        let archive = ZipArchive::new(File::open(&output).unwrap()).unwrap();
        assert_eq!(archive.len(), 2);
        assert_eq!(read_entry(&output, &disk_name), b"disk bytes");
        assert_eq!(read_entry(&output, "inner.dcm"), b"nested bytes");
    }

    #[test]
    fn test_missing_items_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let present = temp_dir.path().join("present.dcm");
        std::fs::write(&present, b"ok").unwrap();
        let container = temp_dir.path().join("container.zip");
        crate::testing::write_zip(&container, &[("inner.dcm", b"x".to_vec())]);

        let output = temp_dir.path().join("out.zip");
        let records = vec![
            record(SourceRef::on_disk(temp_dir.path().join("gone.dcm"))),
            record(SourceRef::in_archive(temp_dir.path().join("gone.zip"), "a.dcm")),
            record(SourceRef::in_archive(&container, "missing.dcm")),
            record(SourceRef::on_disk(&present)),
        ];
        let report = write_archive(&output, &records).unwrap();

        assert_eq!(report.written.len(), 1);
        assert_eq!(report.skipped.len(), 3);
        assert_eq!(read_entry(&output, &present.to_string_lossy()), b"ok");
    }

    #[test]
    fn test_corrupted_entry_is_left_out() {
        let temp_dir = TempDir::new().unwrap();
        let container = temp_dir.path().join("container.zip");
        write_stored_zip(
            &container,
            &[
                ("inner.dcm", b"Nested bytes payload".to_vec()),
                ("other.dcm", b"intact".to_vec()),
            ],
        );
        // flip one stored byte so the entry fails its checksum
        patch_file(&container, b"Nested bytes payload", 0, b"n");

        let output = temp_dir.path().join("out.zip");
        let records = vec![
            record(SourceRef::in_archive(&container, "inner.dcm")),
            record(SourceRef::in_archive(&container, "other.dcm")),
        ];
        let report = write_archive(&output, &records).unwrap();

        assert_eq!(report.written, vec!["other.dcm".to_string()]);
        assert_eq!(report.skipped.len(), 1);

        let archive = ZipArchive::new(File::open(&output).unwrap()).unwrap();
        let names: Vec<_> = archive.file_names().collect();
        assert_eq!(names, vec!["other.dcm"]);
        assert_eq!(read_entry(&output, "other.dcm"), b"intact");
    }

    #[test]
    fn test_uncreatable_output_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("no/such/dir/out.zip");
        let result = write_archive(&output, &[]);
        assert!(matches!(result, Err(DicomTagsError::ArchiveCreate { .. })));
    }
}
