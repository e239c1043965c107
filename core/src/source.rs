use std::fmt;
use std::path::{Path, PathBuf};

/// Separator between a container path and an entry name in identifiers
pub const ENTRY_SEPARATOR: char = '#';

/// Where the bytes of a scanned item live
///
/// Identifiers render as `path` or `archive#entry`, but the two cases are
/// kept apart here so a path containing `#` is never mistaken for an entry.
///
/// # Example
///
/// ```
/// use dicomtags_core::SourceRef;
///
/// let nested = SourceRef::in_archive("studies/batch.zip", "series1/img001.dcm");
/// assert_eq!(nested.identifier(), "studies/batch.zip#series1/img001.dcm");
///
/// let plain = SourceRef::on_disk("studies/img002.dcm");
/// assert_eq!(plain.identifier(), "studies/img002.dcm");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceRef {
    /// A plain file on disk
    OnDisk(PathBuf),
    /// An entry inside a zip container on disk
    InArchive { archive: PathBuf, entry: String },
}

impl SourceRef {
    /// Creates a reference to a plain file
    pub fn on_disk(path: impl Into<PathBuf>) -> Self {
        SourceRef::OnDisk(path.into())
    }

    /// Creates a reference to an entry inside a zip container
    pub fn in_archive(archive: impl Into<PathBuf>, entry: impl Into<String>) -> Self {
        SourceRef::InArchive {
            archive: archive.into(),
            entry: entry.into(),
        }
    }

    /// Returns the display identifier (`path` or `archive#entry`)
    pub fn identifier(&self) -> String {
        self.to_string()
    }

    /// Reads an identifier back into a reference
    ///
    /// An identifier naming an existing path is a plain file. Otherwise, if it
    /// contains `#`, it is split on the first occurrence into container and entry.
    pub fn resolve(identifier: &str) -> Self {
        if Path::new(identifier).exists() {
            return SourceRef::on_disk(identifier);
        }
        match identifier.split_once(ENTRY_SEPARATOR) {
            Some((archive, entry)) => SourceRef::in_archive(archive, entry),
            None => SourceRef::on_disk(identifier),
        }
    }

    /// Name the item is stored under when re-archived
    pub fn archive_name(&self) -> String {
        match self {
            SourceRef::OnDisk(path) => path.to_string_lossy().into_owned(),
            SourceRef::InArchive { entry, .. } => entry.clone(),
        }
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceRef::OnDisk(path) => write!(f, "{}", path.display()),
            SourceRef::InArchive { archive, entry } => {
                write!(f, "{}{}{}", archive.display(), ENTRY_SEPARATOR, entry)
            }
        }
    }
}
