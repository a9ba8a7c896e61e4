/// Command-line front for the APOD feed
use anyhow::{anyhow, bail};
use apod_feed::utils::parse_query_date;
use apod_feed::{Apod, ApodClient, ApodFeed, ApodService, AppConfig, FilterState};
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "apod-feed")]
#[command(about = "List Astronomy Pictures of the Day", long_about = None)]
struct Cli {
    /// Show a single day (YYYY-MM-DD) instead of the last 7 days
    #[arg(long, value_parser = parse_date_arg)]
    date: Option<NaiveDate>,

    /// Print the items as JSON
    #[arg(long)]
    json: bool,
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_query_date(s).ok_or_else(|| format!("expected YYYY-MM-DD, got {:?}", s))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::from_env()?;
    info!("Configuration loaded for {}{}", config.api_host, config.api_path);

    let filter = match cli.date {
        Some(date) if date > Local::now().date_naive() => {
            bail!("{} is in the future", date)
        }
        Some(date) => FilterState::SingleDate(date),
        None => FilterState::DateRange,
    };

    let client = ApodClient::from_config(&config)?;
    let service = Arc::new(ApodService::new(client));
    let (feed, mut updates) = ApodFeed::new(service);

    let ticket = match filter {
        FilterState::DateRange => feed.apply_range_filter(),
        FilterState::SingleDate(date) => feed.apply_single_date_filter(date),
    };
    info!("Requested {:?} as ticket {}", filter, ticket.value());

    let update = updates
        .recv()
        .await
        .ok_or_else(|| anyhow!("feed closed before delivering a result"))?;
    let items = update.outcome?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        print_items(&update.filter, &items);
    }

    Ok(())
}

fn print_items(filter: &FilterState, items: &[Apod]) {
    println!("{}", filter.header_title());
    if items.is_empty() {
        println!("  (no pictures)");
        return;
    }
    for item in items {
        println!(
            "  {:<13} {} [{}]",
            item.display_date(),
            item.title,
            item.media_type
        );
        println!("  {:<13} {}", "", item.best_image_url());
        if let Some(copyright) = &item.copyright {
            println!("  {:<13} (c) {}", "", copyright.trim());
        }
    }
}
