mod collector;
mod export;
mod fetch;
mod model;
mod parser;
mod urls;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use crate::fetch::{Fetch, HttpFetcher};

#[derive(Parser)]
#[command(
    name = "pca_scraper",
    about = "Scrape accredited research laboratories from the PCA registry"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan accreditation numbers and export the valid records
    Run {
        /// Highest accreditation number to try
        #[arg(short = 'n', long, default_value = "2000")]
        ceiling: u32,
        /// Fixed delay between page requests, in milliseconds
        #[arg(long, default_value = "500")]
        delay_ms: u64,
        /// Output directory
        #[arg(short, long, default_value = "data")]
        out_dir: PathBuf,
        /// Output format (repeatable)
        #[arg(short, long = "format", default_values = ["json"])]
        formats: Vec<Format>,
        /// Record unparsable pages and continue instead of aborting
        #[arg(long)]
        keep_going: bool,
    },
    /// Fetch and scan a single accreditation number, printing the outcome
    Probe { id: u32 },
    /// Re-export a previously written labs.json without re-scanning
    Convert {
        /// JSON file written by a previous run
        #[arg(short, long, default_value = "data/labs.json")]
        input: PathBuf,
        /// Output directory
        #[arg(short, long, default_value = "data")]
        out_dir: PathBuf,
        /// Output format (repeatable)
        #[arg(short, long = "format", default_values = ["csv"])]
        formats: Vec<Format>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Csv,
    Xlsx,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            ceiling,
            delay_ms,
            out_dir,
            formats,
            keep_going,
        } => {
            let fetcher = HttpFetcher::new(Duration::from_millis(delay_ms));
            let config = collector::CollectorConfig { ceiling, keep_going };
            println!("Scanning accreditation numbers 1..={ceiling}...");
            let harvest = collector::collect(&fetcher, &config).await?;
            harvest.print_summary();
            write_formats(&harvest.records, &out_dir, &formats)
        }
        Commands::Probe { id } => {
            let fetcher = HttpFetcher::new(Duration::ZERO);
            let contents = fetcher.fetch(&urls::address_for(id)).await?;
            let today = chrono::Local::now().date_naive();
            let outcome = parser::scan_page(&urls::number_for(id), &contents, today);
            println!("{outcome:#?}");
            Ok(())
        }
        Commands::Convert {
            input,
            out_dir,
            formats,
        } => {
            let records = export::load_json(&input)?;
            println!("Loaded {} records from {}", records.len(), input.display());
            write_formats(&records, &out_dir, &formats)
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn write_formats(records: &[model::LabRecord], out_dir: &Path, formats: &[Format]) -> Result<()> {
    std::fs::create_dir_all(out_dir)?;
    for format in formats {
        let (path, write): (PathBuf, fn(&[model::LabRecord], &Path) -> Result<()>) = match format {
            Format::Json => (out_dir.join("labs.json"), export::write_json),
            Format::Csv => (out_dir.join("labs.csv"), export::write_table),
            Format::Xlsx => (out_dir.join("labs.xlsx"), export::write_sheet),
        };
        write(records, &path)?;
        println!("Wrote {} records to {}", records.len(), path.display());
    }
    Ok(())
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
