pub mod archive;
pub mod catalog;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod order;
pub mod record;
pub mod scan;
pub mod source;
pub mod walk;

#[cfg(test)]
mod testing;

pub use archive::{write_archive, ArchiveReport};
pub use catalog::{StandardTagCatalog, TagCatalog, TagDescriptor, ValueMultiplicity};
pub use cli::report::TableReport;
pub use dataset::{Dataset, ElementValue, ScalarValue};
pub use error::{DicomTagsError, Result};
pub use filter::FilterSpec;
pub use order::{Pagination, SortOrder};
pub use record::Record;
pub use scan::{scan, ScanConfig, ScanOutcome, Skipped};
pub use source::SourceRef;
pub use walk::{classify, Candidate, Enumerator, ExclusionSet, FileKind};
