//! Fetch an AniList user's anime list and print the franchise report.
//! Usage:
//!   cargo run --bin anilist_list -- <username> [--json]
//! Honors ANILIST_ENDPOINT / ANILIST_TIMEOUT_SECS (.env supported).

use anyhow::Result;
use dotenvy::dotenv;
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;
use watchtally::anilist::AniListClient;
use watchtally::config::Settings;
use watchtally::franchise::analyze;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn usage() -> ! {
    eprintln!("Usage: cargo run --bin anilist_list -- <username> [--json]");
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv();
    init_tracing();

    let mut args = env::args().skip(1);
    let username = args.next().unwrap_or_else(|| usage());
    let as_json = match args.next().as_deref() {
        None => false,
        Some("--json") => true,
        Some(_) => usage(),
    };

    let settings = Settings::from_env()?;
    let client = AniListClient::with_endpoint(settings.anilist_endpoint, settings.anilist_timeout)?;
    // Fetch errors surface here instead of collapsing into an empty report.
    let entries = client.fetch_list_entries(&username).await?;
    info!("Fetched {} entries for '{}'", entries.len(), username);

    let report = analyze(&entries, &settings.vocabulary);
    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{}: {} franchises, total {}",
        username, report.count, report.total_time
    );
    for franchise in &report.franchises {
        println!("{:>12}  {}", franchise.total_time, franchise.franchise_name);
        for entry in &franchise.titles {
            println!("{:>12}    - {}", entry.time_spent, entry.title);
        }
    }
    Ok(())
}
