use crate::catalog::TagDescriptor;
use crate::error::Result;
use crate::filter::FilterSpec;
use crate::order::{Pagination, SortOrder};
use crate::record::Record;
use crate::walk::{Enumerator, ExclusionSet};
use log::{debug, info, warn};
use std::path::Path;

/// Settings for one scan, fixed for its whole duration
///
/// # Example
///
/// ```
/// use dicomtags_core::{ExclusionSet, Pagination, ScanConfig, SortOrder};
///
/// let config = ScanConfig::default()
///     .with_exclusions(ExclusionSet::new(&["**/*.txt".to_string()]).unwrap())
///     .with_order(SortOrder::none().numeric(true))
///     .with_page(Pagination::new(10, 5));
///
/// assert!(config.order.numeric);
/// assert_eq!(config.page.limit, 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Paths suppressed during enumeration
    pub exclusions: ExclusionSet,
    /// Constraints a dataset must satisfy to produce a row
    pub filter: FilterSpec,
    /// Sort passes applied after traversal
    pub order: SortOrder,
    /// Window applied after sorting
    pub page: Pagination,
}

impl ScanConfig {
    /// Builder: set exclusion globs
    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Builder: set the filter
    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = filter;
        self
    }

    /// Builder: set the sort passes
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Builder: set the pagination window
    pub fn with_page(mut self, page: Pagination) -> Self {
        self.page = page;
        self
    }
}

/// An item left out of the result because it could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub identifier: String,
    pub reason: String,
}

/// Result of a scan
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Visible rows, sorted and paginated
    pub records: Vec<Record>,
    /// Number of matching rows before pagination
    pub total: usize,
    /// Items that failed to parse
    pub skipped: Vec<Skipped>,
}

/// Scans `root` and builds one row per matching dataset
///
/// Parse failures are reported and skipped; a traversal failure aborts.
///
/// # Errors
///
/// Returns `Traversal` if the directory tree cannot be walked
pub fn scan(root: &Path, tags: &[TagDescriptor], config: &ScanConfig) -> Result<ScanOutcome> {
    info!("Processing directory: {}", root.display());
    if !config.exclusions.is_empty() {
        debug!("Exclusions active for {}", root.display());
    }

    let mut outcome = ScanOutcome::default();
    for candidate in Enumerator::new(root, config.exclusions.clone()) {
        let candidate = candidate?;
        let source = candidate.source();

        let dataset = match candidate.load() {
            Ok(dataset) => dataset,
            Err(e) => {
                warn!("Skipping {} due to: {}", source, e);
                outcome.skipped.push(Skipped {
                    identifier: source.identifier(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        if config.filter.matches(&dataset) {
            debug!("Matched {}", source);
            outcome.records.push(Record::build(source, tags, &dataset));
        }
    }

    outcome.total = outcome.records.len();
    config.order.apply(&mut outcome.records);
    config.page.apply(&mut outcome.records);

    info!(
        "Found {} matching record(s), {} skipped",
        outcome.total,
        outcome.skipped.len()
    );
    Ok(outcome)
}
