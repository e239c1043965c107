use clap::Parser;
use dicomtags_core::cli::report::TableReport;
use dicomtags_core::cli::{Cli, OutputFormat};
use dicomtags_core::{
    scan, write_archive, DicomTagsError, Result, StandardTagCatalog, TagCatalog,
};
use log::{error, info};
use std::error::Error;
use std::io;
use std::process;

/// Exit status for a malformed invocation
const INVALID_INVOCATION: i32 = 127;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { INVALID_INVOCATION } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    // Setup logging
    setup_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        if let Some(source) = e.source() {
            eprintln!("  {}", source);
        }
        process::exit(e.exit_code());
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: &Cli) -> Result<()> {
    let catalog = StandardTagCatalog::new();

    let columns = catalog.resolve_all(&cli.tags);
    if columns.is_empty() {
        return Err(DicomTagsError::NoTagsResolved);
    }
    let config = cli.scan_config(&catalog)?;
    let (headers, tags): (Vec<String>, Vec<_>) = columns.into_iter().unzip();

    let outcome = scan(&cli.folder, &tags, &config)?;
    let report = TableReport::new(&headers, &outcome.records);
    match cli.format {
        OutputFormat::Csv => report.write_csv(io::stdout().lock())?,
        OutputFormat::Json => print_json(&report)?,
    }

    if let Some(archive) = &cli.archive {
        let archived = write_archive(archive, &outcome.records)?;
        info!(
            "{} of {} record(s) archived",
            archived.written.len(),
            outcome.records.len()
        );
    }

    Ok(())
}

#[cfg(feature = "json")]
fn print_json(report: &TableReport<'_>) -> Result<()> {
    let json = report
        .to_json()
        .map_err(|e| DicomTagsError::OutputError(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

#[cfg(not(feature = "json"))]
fn print_json(_report: &TableReport<'_>) -> Result<()> {
    Err(DicomTagsError::UnsupportedFormat(
        "json output requires the 'json' feature, rebuild with: cargo build --features json"
            .to_string(),
    ))
}
