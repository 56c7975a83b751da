use anyhow::Context;
use clap::Parser;
use listing_scout::config::{search_request, Cli, Command};
use listing_scout::pipeline::{filter_listings, related_listings, run_search, ListingStats};
use listing_scout::sources::load_snapshot;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let source = cli.source.build()?;

    info!("🏠 Listing Scout - loading snapshot from {}", source.source_name());
    let snapshot = load_snapshot(source.as_ref()).await;
    if snapshot.is_empty() {
        warn!("Snapshot is empty, results will be empty too");
    }

    match cli.command {
        Command::Search {
            filter,
            sort,
            page,
            page_size,
            reference,
            request,
        } => {
            let request =
                search_request(&filter, sort, page, page_size, reference, request.as_ref()).await?;
            let results = run_search(&snapshot, &request);
            info!(
                "✅ {} matching listings, page {}/{}",
                results.page.total_count, results.page.page, results.page.total_pages
            );
            print_json(&results)?;
        }
        Command::Related { id, page, page_size } => {
            let reference = snapshot
                .iter()
                .find(|listing| listing.id == id)
                .with_context(|| format!("Listing {} is not in the snapshot", id))?;
            let related = related_listings(&snapshot, reference, page, page_size);
            info!(
                "✅ {} related listings for {}, page {}/{}",
                related.total_count, reference.slug, related.page, related.total_pages
            );
            print_json(&related)?;
        }
        Command::Stats { filter } => {
            let filtered = filter_listings(&snapshot, &filter.to_spec());
            let stats = ListingStats::compute(filtered.iter().copied());
            info!("✅ Statistics over {} listings", stats.count);
            print_json(&stats)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}
