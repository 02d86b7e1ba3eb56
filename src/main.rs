//! Link Auditor main entry point
//!
//! This is the command-line interface for scanning a content corpus for broken links.

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use link_auditor::config::{load_config_with_hash, Config};
use link_auditor::output::{
    format_json_report, format_text_report, generate_markdown_report, print_statistics,
    ScanStatistics,
};
use link_auditor::scan::{LinkMode, ScanJob, ScanOptions, Scanner};
use link_auditor::source::{ContentSource, EntryScope, ManifestSource, PageFilter, SiteRegistry};
use link_auditor::storage::{ScanStore, SqliteScanStore, StoredScan};
use link_auditor::verify::Verifier;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Link Auditor: broken link and asset detection
///
/// Scans the pages of a content corpus, extracts every link they reference and
/// verifies each one over HTTP. Exits non-zero when any link is broken.
#[derive(Parser, Debug)]
#[command(name = "link-auditor")]
#[command(version = "1.0.0")]
#[command(about = "Broken link and asset detection for content corpora", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Path to TOML page manifest
    #[arg(short, long, value_name = "MANIFEST", required_unless_present = "last")]
    pages: Option<PathBuf>,

    /// Only scan these sites (comma-separated labels)
    #[arg(short, long, value_delimiter = ',')]
    sites: Vec<String>,

    /// Also scan pages that are not live
    #[arg(short, long)]
    include_disabled: bool,

    /// Only scan these sections (comma-separated)
    #[arg(long, value_delimiter = ',', conflicts_with = "entry_types")]
    sections: Vec<String>,

    /// Only scan these entry types (comma-separated)
    #[arg(long, value_delimiter = ',')]
    entry_types: Vec<String>,

    /// Which links to keep (overrides the config file)
    #[arg(short = 'm', long, value_enum)]
    link_mode: Option<ModeArg>,

    /// Also check images and documents
    #[arg(short = 'a', long)]
    check_assets: bool,

    /// Skip checking the page URLs themselves
    #[arg(long)]
    no_entry_urls: bool,

    /// Skip links inside page content
    #[arg(long)]
    no_content_links: bool,

    /// Ignore URLs containing this text (repeatable)
    #[arg(long = "ignore", value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Maximum concurrent verification requests (1-50)
    #[arg(long)]
    concurrency: Option<usize>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Also list links that are OK (text format)
    #[arg(long)]
    show_ok: bool,

    /// Run as a stored scan job (status and results kept in the database)
    #[arg(long)]
    store: bool,

    /// Owner key of the stored scan job
    #[arg(long, default_value = "cli")]
    owner: String,

    /// Report the owner's last stored scan instead of scanning
    #[arg(long, conflicts_with = "pages")]
    last: bool,

    /// Write a markdown report to this path
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Print scan statistics after the report
    #[arg(long)]
    stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Internal,
    External,
    Both,
}

impl From<ModeArg> for LinkMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Internal => LinkMode::Internal,
            ModeArg::External => LinkMode::External,
            ModeArg::Both => LinkMode::Both,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let scan = if cli.last {
        handle_last(&cli, &config)?
    } else {
        handle_scan(&cli, &config, config_hash).await?
    };

    report(&cli, &scan)?;

    if scan.results.broken_count() > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so reports on stdout stay machine-readable.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("link_auditor=info,warn"),
            1 => EnvFilter::new("link_auditor=debug,info"),
            2 => EnvFilter::new("link_auditor=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Applies command-line overrides to the configured scan options
fn scan_options(cli: &Cli, config: &Config) -> ScanOptions {
    let mut options = config.scan.clone();

    if let Some(mode) = cli.link_mode {
        options.link_mode = mode.into();
    }
    if cli.check_assets {
        options.check_assets = true;
    }
    if cli.no_entry_urls {
        options.check_entry_urls = false;
    }
    if cli.no_content_links {
        options.check_content_links = false;
    }
    options.ignore_patterns.extend(cli.ignore.iter().cloned());
    if let Some(concurrency) = cli.concurrency {
        options.concurrency = concurrency;
    }

    options
}

fn page_filter(cli: &Cli) -> PageFilter {
    let scope = if !cli.sections.is_empty() {
        EntryScope::Sections(cli.sections.clone())
    } else if !cli.entry_types.is_empty() {
        EntryScope::EntryTypes(cli.entry_types.clone())
    } else {
        EntryScope::All
    };

    PageFilter {
        sites: cli.sites.clone(),
        include_disabled: cli.include_disabled,
        scope,
    }
}

/// Handles the --last mode: loads the owner's stored scan
fn handle_last(cli: &Cli, config: &Config) -> anyhow::Result<StoredScan> {
    let store = open_store(config)?;
    match store.get_results(&cli.owner)? {
        Some(scan) => Ok(scan),
        None => bail!("No stored scan for '{}' (never run, or expired)", cli.owner),
    }
}

/// Handles the main scan operation
async fn handle_scan(
    cli: &Cli,
    config: &Config,
    config_hash: String,
) -> anyhow::Result<StoredScan> {
    let Some(pages_path) = cli.pages.as_deref() else {
        bail!("--pages is required to run a scan");
    };

    let source = ManifestSource::load(pages_path)
        .with_context(|| format!("Failed to load page manifest {}", pages_path.display()))?;
    let verifier = Verifier::new(&config.client).context("Failed to build HTTP client")?;
    let scanner = Scanner::new(verifier, config.list_site_hosts());

    let options = scan_options(cli, config);
    let filter = page_filter(cli);

    if cli.store {
        let mut store = open_store(config)?;
        let job = ScanJob::new(cli.owner.clone(), filter, options).with_config_hash(config_hash);
        job.queue(&mut store)?;
        return Ok(job.run(&scanner, &source, &mut store).await?);
    }

    let pages = source.list_scannable_pages(&filter)?;
    let results = scanner.scan(&pages, &options).await;

    Ok(StoredScan {
        results,
        scanned_at: chrono::Utc::now(),
        options,
        config_hash: Some(config_hash),
    })
}

fn open_store(config: &Config) -> anyhow::Result<SqliteScanStore> {
    let path = Path::new(&config.storage.database_path);
    SqliteScanStore::open(path, config.storage.ttl_secs)
        .with_context(|| format!("Failed to open scan store {}", path.display()))
}

/// Prints the report and writes the optional markdown summary
fn report(cli: &Cli, scan: &StoredScan) -> anyhow::Result<()> {
    match cli.format {
        Format::Text => print!("{}", format_text_report(&scan.results, cli.show_ok)),
        Format::Json => println!("{}", format_json_report(&scan.results)?),
    }

    if cli.stats {
        println!();
        print_statistics(&ScanStatistics::from_results(&scan.results));
    }

    if let Some(path) = &cli.summary {
        generate_markdown_report(scan, path)
            .with_context(|| format!("Failed to write summary {}", path.display()))?;
        tracing::info!("Summary exported to: {}", path.display());
    }

    Ok(())
}
