use crate::analysis::{all_locations, analyze, FilterSelection, MarketView};
use crate::cli::args::{Cli, Commands, FilterArgs};
use crate::config::Config;
use crate::dashboard::{self, format::format_price, PageContext};
use crate::geocoding::{Enricher, NominatimGeocoder};
use crate::parsers::{extract_listings, CardSelectors};
use crate::scrapers::{fetch_snapshot, FetchRequest};
use crate::storage;
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;
use tracing::{info, warn};

pub async fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Fetch {
            output,
            url,
            scrolls,
        } => {
            let mut request = FetchRequest::from_config(&config);
            if let Some(url) = url {
                request.url = url;
            }
            if let Some(scrolls) = scrolls {
                request.settings.scrolls = scrolls;
            }
            fetch(request, &output).await
        }

        Commands::Extract { input, output } => extract(&config, &input, &output).await,

        Commands::Geocode { input, output } => geocode(&config, &input, &output).await,

        Commands::Dashboard {
            input,
            output,
            filter,
        } => render_dashboard(&config, &input, &output, &filter),

        Commands::Pipeline {
            snapshot,
            clean,
            final_csv,
            dashboard,
            skip_fetch,
            filter,
        } => {
            if skip_fetch {
                info!("Skipping fetch, reusing {}", snapshot.display());
            } else {
                fetch(FetchRequest::from_config(&config), &snapshot).await?;
            }
            extract(&config, &snapshot, &clean).await?;
            geocode(&config, &clean, &final_csv).await?;
            render_dashboard(&config, &final_csv, &dashboard, &filter)
        }
    }
}

async fn fetch(request: FetchRequest, output: &Path) -> Result<()> {
    info!("Fetching {}", request.url);

    let snapshot = fetch_snapshot(request).await?;

    tokio::fs::write(output, &snapshot.html)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        "💾 Saved {} ({} cards after {} scrolls, {} load attempts)",
        output.display(),
        snapshot.cards,
        snapshot.scrolls,
        snapshot.attempts
    );
    Ok(())
}

async fn extract(config: &Config, input: &Path, output: &Path) -> Result<()> {
    info!("Loading snapshot {}", input.display());

    let html = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let selectors = CardSelectors::magicbricks()?;
    let extraction = extract_listings(&html, &selectors, &config.city);

    if extraction.listings.is_empty() {
        warn!("No complete listings found in {}", input.display());
    }

    storage::write_listings(output, &extraction.listings)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        "✅ Saved {} with {} clean listings ({} cards dropped)",
        output.display(),
        extraction.listings.len(),
        extraction.dropped()
    );
    Ok(())
}

async fn geocode(config: &Config, input: &Path, output: &Path) -> Result<()> {
    let listings = storage::read_listings(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    info!("Loaded {} listings from {}", listings.len(), input.display());

    let geocoder = NominatimGeocoder::new(&config.geocode)?;
    let mut enricher = Enricher::new(geocoder, &config.city, config.geocode.min_delay)
        .with_max_retries(config.geocode.max_retries);

    let (mapped, report) = enricher.enrich(listings).await;

    if !report.locations_failed.is_empty() {
        warn!(
            "Could not geocode {} locations: {}",
            report.locations_failed.len(),
            report.locations_failed.join(", ")
        );
    }

    storage::write_mapped(output, &mapped)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        "🎉 Saved {} with {} mappable listings ({} dropped, {} locations resolved)",
        output.display(),
        report.rows_kept,
        report.rows_dropped,
        report.locations_resolved
    );
    Ok(())
}

fn render_dashboard(config: &Config, input: &Path, output: &Path, filter: &FilterArgs) -> Result<()> {
    let data = dashboard::load_dataset(input)?;

    let selection =
        FilterSelection::from_choices(&data, &filter.locations, filter.min_price, filter.max_price);
    let locations = all_locations(&data);
    let view = analyze(&data, &selection);

    let ctx = PageContext {
        city: &config.city,
        all_locations: &locations,
        selection: &selection,
        generated_at: Utc::now(),
    };
    dashboard::write_dashboard(output, &dashboard::dashboard_page(&ctx, &view))?;

    print_summary(&selection, &view);
    Ok(())
}

fn print_summary(selection: &FilterSelection, view: &MarketView) {
    let locations: Vec<_> = selection.locations.iter().map(String::as_str).collect();
    println!("Locations: {}", locations.join(", "));
    println!(
        "Budget:    {} to {}",
        format_price(selection.min_price as f64),
        format_price(selection.max_price as f64)
    );
    println!();

    let Some(report) = view.report() else {
        println!("No listings match your filters.");
        return;
    };

    let summary = &report.summary;
    println!("Listings found:    {}", summary.count);
    println!("Median price:      {}", dashboard::format::format_lakhs(summary.median_price));
    println!("Median price/sqft: {}", dashboard::format::format_rupees(summary.median_price_per_sqft));
    println!();

    if report.deals.is_empty() {
        println!("No undervalued listings in this selection.");
        return;
    }

    println!("🔥 Undervalued picks:");
    for (i, deal) in report.deals.iter().enumerate() {
        let listing = &deal.listing.listing;
        println!("{}. {} ({})", i + 1, listing.title, format_price(listing.price as f64));
        println!(
            "   {} sqft, ₹ {}/sqft vs ₹ {} median in {}",
            listing.sqft, listing.price_per_sqft, deal.market_median, listing.location
        );
    }
}
