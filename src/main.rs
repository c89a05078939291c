//! Library Checker - which wanted books can be borrowed today
//!
//! Cross-references a Goodreads export with the library catalog, one book at
//! a time.

use clap::Parser;
use library_checker::{format_summary, read_wanted_books, save_json, CatalogClient, Checker};
use std::path::PathBuf;
use std::time::Duration;

const EXPORT_HELP: &str = "To export from Goodreads:
  1. Go to goodreads.com/review/import
  2. Click 'Export Library'
  3. Download the CSV file";

/// Check which books on your Goodreads "Want to Read" shelf the library has on the shelf
#[derive(Parser, Debug)]
#[command(name = "library_checker")]
#[command(version, about, long_about = None, after_help = EXPORT_HELP)]
struct Args {
    /// Goodreads library export (CSV)
    input_csv: PathBuf,

    /// Write results as JSON to this file
    output_json: Option<PathBuf>,

    /// Also check whether available books are on the shelf at this branch,
    /// e.g. "Squirrel Hill (CLP)"
    #[arg(long)]
    branch: Option<String>,

    /// Pause between catalog lookups, in milliseconds
    #[arg(long, default_value_t = 300)]
    delay_ms: u64,
}

fn main() {
    // Set RUST_LOG to control log level, e.g. RUST_LOG=library_checker=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    println!("Loading books from {}...", args.input_csv.display());
    let books = match read_wanted_books(&args.input_csv) {
        Ok(books) => books,
        Err(e) => {
            log::error!("Failed to load {}: {}", args.input_csv.display(), e);
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    println!("Found {} books on your 'Want to Read' shelf\n", books.len());

    let client = match CatalogClient::new() {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to create HTTP client: {}", e);
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let checker = Checker::new(client)
        .with_delay(Duration::from_millis(args.delay_ms))
        .with_branch(args.branch);

    let stdout = std::io::stdout();
    let report = match checker.run(&books, &mut stdout.lock()) {
        Ok(report) => report,
        Err(e) => {
            log::error!("Check failed: {}", e);
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    print!("{}", format_summary(&report));

    if let Some(path) = args.output_json {
        if let Err(e) = save_json(&report, &path) {
            log::error!("Failed to save results to {}: {}", path.display(), e);
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("\nResults saved to {}", path.display());
    }
}
