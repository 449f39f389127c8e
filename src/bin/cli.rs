use anyhow::{Context, Result};
use chrono::FixedOffset;
use clap::Parser;
use std::path::PathBuf;
use tennis_odds::config::TENNIS_URL;
use tennis_odds::data::{save_records_to_csv, save_records_to_json};
use tennis_odds::page::write_html_for_debugging;
use tennis_odds::{
    FailurePolicy, PageSource, ReferenceClock, ScraperConfig, SiteSelectors, TennisScraper,
};

/// Scrape pre-match tennis odds into a JSON file
#[derive(Debug, Parser)]
#[command(name = "cli", version)]
struct Args {
    /// Betting page to fetch
    #[arg(long, env = "SCRAPE_URL", default_value = TENNIS_URL)]
    url: String,

    /// Read a saved page instead of fetching the URL
    #[arg(long)]
    input: Option<PathBuf>,

    /// Where to write the JSON output
    #[arg(long, default_value = "output.json")]
    output: String,

    /// Also write the matches as CSV
    #[arg(long)]
    csv: Option<String>,

    /// Dump the raw page markup for debugging selectors
    #[arg(long)]
    dump_html: Option<PathBuf>,

    /// UTC offset of the times shown on the site
    #[arg(long, env = "SITE_UTC_OFFSET", default_value = "+01:00", allow_hyphen_values = true)]
    utc_offset: FixedOffset,

    /// JSON file overriding the site's CSS selectors
    #[arg(long)]
    selectors: Option<PathBuf>,

    /// Log and skip matches that cannot be parsed instead of aborting
    #[arg(long)]
    skip_failed_matches: bool,

    /// Keep matches that are already in play
    #[arg(long)]
    no_live_check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    // Timestamp the session before the page is loaded
    let clock = ReferenceClock::now();

    let selectors = match &args.selectors {
        Some(path) => SiteSelectors::from_json_file(path)?,
        None => SiteSelectors::default(),
    };

    let config = ScraperConfig {
        url: args.url,
        selectors,
        check_for_live_event: !args.no_live_check,
        site_offset: args.utc_offset,
        failure_policy: if args.skip_failed_matches {
            FailurePolicy::SkipMatch
        } else {
            FailurePolicy::Abort
        },
    };

    let scraper = TennisScraper::new(config, clock).context("Invalid scraper configuration")?;

    let source = match args.input {
        Some(path) => PageSource::File(path),
        None => PageSource::Url(scraper.config().url.clone()),
    };

    println!("Tennis Odds Scraper\n");
    println!("Loading betting page from {}\n", source);

    let markup = source.load().await.context("Failed to load betting page")?;

    if let Some(path) = &args.dump_html {
        write_html_for_debugging(&markup, path)?;
        println!("Saved page markup to {}\n", path.display());
    }

    let records = scraper
        .scrape_markup(&markup)
        .context("Failed to extract tennis matches")?;

    if records.is_empty() {
        println!("No bettable matches found.");
    } else {
        println!("Found {} Bettable Matches:\n", records.len());
        for (i, record) in records.iter().enumerate() {
            println!("{}. {}", i + 1, record.format());
        }
    }

    save_records_to_json(&records, &args.output)?;
    println!("\nSaved matches to {}", args.output);

    if let Some(csv_file) = &args.csv {
        save_records_to_csv(&records, csv_file)?;
        println!("Saved matches to {}", csv_file);
    }

    Ok(())
}
