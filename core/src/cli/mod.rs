pub mod report;

use crate::catalog::TagCatalog;
use crate::error::Result;
use crate::filter::FilterSpec;
use crate::order::{Pagination, SortOrder};
use crate::scan::ScanConfig;
use crate::walk::ExclusionSet;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for dicom-tags
#[derive(Parser, Debug)]
#[command(name = "dicom-tags")]
#[command(about = "Prints selected DICOM tags")]
#[command(
    long_about = "Walks a directory and prints the selected tags for each DICOM that is found, including DICOMs inside zip files"
)]
#[command(version)]
pub struct Cli {
    /// Directory to walk
    #[arg(value_name = "FOLDER")]
    pub folder: PathBuf,

    /// Tags to print, by keyword (PatientID) or number ((0010,0020))
    #[arg(value_name = "TAG", required = true, num_args = 1..)]
    pub tags: Vec<String>,

    /// Exclude paths using glob
    #[arg(short, long = "exclusion", value_name = "GLOB")]
    pub exclusions: Vec<String>,

    /// Filter the printed records using tag=value
    #[arg(short, long = "filter", value_name = "TAG=VALUE")]
    pub filters: Vec<String>,

    /// Limit the number of records printed, 0 indicates no limit
    #[arg(short, long, default_value_t = 0)]
    pub limit: usize,

    /// Skip printing a number of records
    #[arg(short, long, default_value_t = 0)]
    pub offset: usize,

    /// Sort by the first tag
    #[arg(short, long)]
    pub sort: bool,

    /// Sort by the first tag numerically
    #[arg(short, long)]
    pub numeric: bool,

    /// Create an archive of the selected DICOMs found at the given path
    #[arg(short, long, value_name = "PATH")]
    pub archive: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "csv")]
    pub format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Builds the scan configuration from the parsed arguments
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown filter tag, a malformed filter
    /// expression or an invalid exclusion glob
    pub fn scan_config(&self, catalog: &impl TagCatalog) -> Result<ScanConfig> {
        Ok(ScanConfig::default()
            .with_filter(FilterSpec::parse(&self.filters, catalog)?)
            .with_exclusions(ExclusionSet::new(&self.exclusions)?)
            .with_order(
                SortOrder::none()
                    .lexicographic(self.sort)
                    .numeric(self.numeric),
            )
            .with_page(Pagination::new(self.offset, self.limit)))
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated values with a header row
    Csv,
    /// JSON document (requires the `json` feature)
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StandardTagCatalog;
    use crate::error::DicomTagsError;

    #[test]
    fn test_parse_full_invocation() {
        let cli = Cli::try_parse_from([
            "dicom-tags",
            "/data",
            "InstanceNumber",
            "PatientID",
            "-e",
            "**/*.txt",
            "--exclusion",
            "**/scout/**",
            "-f",
            "Modality=CT",
            "-l",
            "5",
            "-o",
            "2",
            "-s",
            "-n",
            "-a",
            "out.zip",
        ])
        .unwrap();

        assert_eq!(cli.folder, PathBuf::from("/data"));
        assert_eq!(cli.tags, vec!["InstanceNumber", "PatientID"]);
        assert_eq!(cli.exclusions.len(), 2);
        assert_eq!(cli.filters, vec!["Modality=CT"]);
        assert_eq!((cli.offset, cli.limit), (2, 5));
        assert!(cli.sort && cli.numeric);
        assert_eq!(cli.archive, Some(PathBuf::from("out.zip")));
        assert_eq!(cli.format, OutputFormat::Csv);

        let config = cli.scan_config(&StandardTagCatalog::new()).unwrap();
        assert_eq!(config.filter.len(), 1);
        assert!(config.order.lexicographic && config.order.numeric);
        assert_eq!(config.page, Pagination::new(2, 5));
    }

    #[test]
    fn test_tag_list_required() {
        assert!(Cli::try_parse_from(["dicom-tags", "/data"]).is_err());
    }

    #[test]
    fn test_unknown_filter_tag() {
        let cli =
            Cli::try_parse_from(["dicom-tags", "/data", "Modality", "-f", "Nope=1"]).unwrap();
        let result = cli.scan_config(&StandardTagCatalog::new());
        assert!(matches!(result, Err(DicomTagsError::UnknownFilterTag(_))));
    }
}
