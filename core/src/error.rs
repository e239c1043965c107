use std::path::PathBuf;
use thiserror::Error;

/// Result type for dicom-tags operations
pub type Result<T> = std::result::Result<T, DicomTagsError>;

/// Error types for dicom-tags operations
#[derive(Error, Debug)]
pub enum DicomTagsError {
    /// None of the requested column tags resolved to a known attribute
    #[error("No valid tags found")]
    NoTagsResolved,

    /// A filter names an attribute the catalog does not know
    #[error("Invalid Filter tag: {0}")]
    UnknownFilterTag(String),

    /// A filter expression is not of the form `tag=value`
    #[error("Invalid filter expression '{0}', expected tag=value")]
    InvalidFilter(String),

    /// An exclusion glob could not be compiled
    #[error("Invalid exclusion pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Walking the directory tree failed; aborts the whole scan
    #[error("Error processing directory: {root}")]
    Traversal {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The output archive could not be created
    #[error("Unable to create archive {path}")]
    ArchiveCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// DICOM reading error
    #[error("DICOM error: {0}")]
    DicomError(String),

    /// Zip container error
    #[error("Zip error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// The requested output format is not available in this build
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Output serialization error
    #[error("Output error: {0}")]
    OutputError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DicomTagsError {
    /// Process exit status reported for this error when it ends a run
    pub fn exit_code(&self) -> i32 {
        match self {
            DicomTagsError::NoTagsResolved => 1,
            DicomTagsError::Traversal { .. } => 3,
            DicomTagsError::UnknownFilterTag(_) => 4,
            DicomTagsError::ArchiveCreate { .. } => 5,
            DicomTagsError::InvalidFilter(_)
            | DicomTagsError::InvalidPattern { .. }
            | DicomTagsError::UnsupportedFormat(_) => 127,
            DicomTagsError::DicomError(_)
            | DicomTagsError::ZipError(_)
            | DicomTagsError::OutputError(_)
            | DicomTagsError::IoError(_) => 2,
        }
    }
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for DicomTagsError {
    fn from(e: dicom_object::ReadError) -> Self {
        DicomTagsError::DicomError(format!("{}", e))
    }
}

impl From<csv::Error> for DicomTagsError {
    fn from(e: csv::Error) -> Self {
        DicomTagsError::OutputError(format!("{}", e))
    }
}
