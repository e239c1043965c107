//! Path enumeration
//!
//! Walks a directory tree and yields every candidate item: plain files, and
//! the entries of any file that opens as a zip container.

use crate::dataset::Dataset;
use crate::error::{DicomTagsError, Result};
use crate::source::SourceRef;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use log::{debug, warn};
use std::fs::File;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::ZipArchive;

/// Compiled exclusion globs
///
/// `*` stays within one path component, `**` spans any number of them and
/// `{a,b}` matches either alternative.
///
/// # Example
///
/// ```
/// use dicomtags_core::ExclusionSet;
/// use std::path::Path;
///
/// let exclusions = ExclusionSet::new(&["**/scout/**".to_string()]).unwrap();
/// assert!(exclusions.is_excluded(Path::new("data/p1/scout/img.dcm")));
/// assert!(!exclusions.is_excluded(Path::new("data/p1/axial/img.dcm")));
/// ```
#[derive(Debug, Clone)]
pub struct ExclusionSet {
    globs: GlobSet,
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self {
            globs: GlobSet::empty(),
        }
    }
}

impl ExclusionSet {
    /// Compiles the given globs
    ///
    /// # Errors
    ///
    /// Returns `InvalidPattern` for the first glob that does not compile
    pub fn new(globs: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for glob in globs {
            let compiled = GlobBuilder::new(glob)
                .literal_separator(true)
                .build()
                .map_err(|e| DicomTagsError::InvalidPattern {
                    pattern: glob.clone(),
                    reason: e.to_string(),
                })?;
            builder.add(compiled);
        }
        let globs = builder
            .build()
            .map_err(|e| DicomTagsError::InvalidPattern {
                pattern: globs.join(" "),
                reason: e.to_string(),
            })?;
        Ok(Self { globs })
    }

    /// Returns whether any glob matches the full path
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.globs.is_match(path)
    }

    pub fn is_empty(&self) -> bool {
        self.globs.is_empty()
    }
}

/// How a file found on disk is to be read
pub enum FileKind {
    /// Opened as a zip container; its entries are the candidates
    Container(ZipArchive<File>),
    /// Anything else, read as a single candidate
    Plain,
}

/// Decides once whether a file is a zip container or a plain file
pub fn classify(path: &Path) -> FileKind {
    match File::open(path).map(ZipArchive::new) {
        Ok(Ok(archive)) => FileKind::Container(archive),
        _ => FileKind::Plain,
    }
}

/// An item to be parsed
#[derive(Debug)]
pub enum Candidate {
    /// A plain file, parsed straight from disk
    File(PathBuf),
    /// A zip entry, parsed while its container was open
    ArchiveEntry {
        archive: PathBuf,
        name: String,
        parsed: Result<Dataset>,
    },
}

impl Candidate {
    /// Returns where this candidate's bytes came from
    pub fn source(&self) -> SourceRef {
        match self {
            Candidate::File(path) => SourceRef::OnDisk(path.clone()),
            Candidate::ArchiveEntry { archive, name, .. } => {
                SourceRef::in_archive(archive.clone(), name.clone())
            }
        }
    }

    /// Parses the candidate
    ///
    /// # Errors
    ///
    /// Returns an error if the item could not be read or is not a readable DICOM file
    pub fn load(self) -> Result<Dataset> {
        match self {
            Candidate::File(path) => Dataset::open_file(&path),
            Candidate::ArchiveEntry { parsed, .. } => parsed,
        }
    }
}

/// A zip container whose entries are being yielded
struct OpenContainer {
    path: PathBuf,
    archive: ZipArchive<File>,
    next: usize,
}

impl OpenContainer {
    /// Parses the next non-directory entry straight from its decompressing reader
    fn next_entry(&mut self) -> Option<Candidate> {
        while self.next < self.archive.len() {
            let index = self.next;
            self.next += 1;

            let name = match self.archive.name_for_index(index) {
                Some(name) => name.to_string(),
                None => continue,
            };
            let parsed = match self.archive.by_index(index) {
                Ok(entry) if entry.is_dir() => continue,
                Ok(entry) => Dataset::from_reader(entry),
                Err(e) => {
                    warn!("Unable to open {}#{}: {}", self.path.display(), name, e);
                    Err(e.into())
                }
            };

            return Some(Candidate::ArchiveEntry {
                archive: self.path.clone(),
                name,
                parsed,
            });
        }
        None
    }
}

/// Lazy, single-pass enumeration of candidates under a root directory
///
/// Yields `Err` once on a traversal failure and then stops.
pub struct Enumerator {
    root: PathBuf,
    walker: walkdir::IntoIter,
    exclusions: ExclusionSet,
    current: Option<OpenContainer>,
    finished: bool,
}

impl Enumerator {
    /// Starts an enumeration of `root`
    pub fn new(root: &Path, exclusions: ExclusionSet) -> Self {
        Self {
            root: root.to_path_buf(),
            walker: WalkDir::new(root).sort_by_file_name().into_iter(),
            exclusions,
            current: None,
            finished: false,
        }
    }
}

impl Iterator for Enumerator {
    type Item = Result<Candidate>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            if let Some(container) = self.current.as_mut() {
                if let Some(candidate) = container.next_entry() {
                    return Some(Ok(candidate));
                }
                self.current = None;
            }

            let entry = match self.walker.next() {
                None => {
                    self.finished = true;
                    return None;
                }
                Some(Err(source)) => {
                    self.finished = true;
                    return Some(Err(DicomTagsError::Traversal {
                        root: self.root.clone(),
                        source,
                    }));
                }
                Some(Ok(entry)) => entry,
            };

            if entry.file_type().is_dir() {
                continue;
            }

            let path = entry.into_path();
            if self.exclusions.is_excluded(&path) {
                debug!("Excluded {}", path.display());
                continue;
            }

            match classify(&path) {
                FileKind::Container(archive) => {
                    debug!("Opened container {}", path.display());
                    self.current = Some(OpenContainer {
                        path,
                        archive,
                        next: 0,
                    });
                }
                FileKind::Plain => return Some(Ok(Candidate::File(path))),
            }
        }
    }
}
