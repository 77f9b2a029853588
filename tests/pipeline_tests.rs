use async_trait::async_trait;
use housing_insights::analysis::{analyze, FilterSelection, MarketView};
use housing_insights::dashboard;
use housing_insights::error::{DashboardError, GeocodeError};
use housing_insights::geocoding::{Enricher, Geocoder};
use housing_insights::models::{Coordinates, Listing};
use housing_insights::parsers::{extract_listings, CardSelectors};
use housing_insights::storage;
use pretty_assertions::assert_eq;
use std::time::Duration;
use tempfile::TempDir;

const SNAPSHOT: &str = r#"
<html><body>
  <div class="mb-srp__card">
    <h2 class="mb-srp__card--title">3 BHK Flat for Sale in Adyar</h2>
    <div class="mb-srp__card__price--amount">₹1.25 Cr</div>
    <div class="mb-srp__card__summary--value">1250 sqft</div>
  </div>
  <div class="mb-srp__card">
    <h2 class="mb-srp__card--title">2 BHK Flat for Sale in Adyar</h2>
    <div class="mb-srp__card__price--amount">₹75 Lac</div>
    <div class="mb-srp__card__summary--value">1000 sqft</div>
  </div>
  <div class="mb-srp__card">
    <h2 class="mb-srp__card--title">2 BHK Flat for Sale in Adyar</h2>
    <div class="mb-srp__card__price--amount">₹1 Cr</div>
    <div class="mb-srp__card__summary--value">1000 sqft</div>
  </div>
  <div class="mb-srp__card">
    <h2 class="mb-srp__card--title">2 BHK Flat for Sale in Adyar</h2>
    <div class="mb-srp__card__price--amount">₹1 Cr</div>
    <div class="mb-srp__card__summary--value">1000 sqft</div>
  </div>
  <div class="mb-srp__card">
    <h2 class="mb-srp__card--title">2 BHK Flat for Sale in Velachery</h2>
    <div class="mb-srp__card__price--amount">₹68 Lacs</div>
    <div class="mb-srp__card__summary--value">950 sqft</div>
  </div>
  <div class="mb-srp__card">
    <h2 class="mb-srp__card--title">Plot for Sale in Atlantis</h2>
    <div class="mb-srp__card__price--amount">₹40 Lac</div>
    <div class="mb-srp__card__summary--value">2400 sqft</div>
  </div>
  <div class="mb-srp__card">
    <h2 class="mb-srp__card--title">Villa for Sale in ECR</h2>
    <div class="mb-srp__card__price--amount">Price on Request</div>
    <div class="mb-srp__card__summary--value">3000 sqft</div>
  </div>
</body></html>
"#;

struct FixedGeocoder;

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn geocode(&self, query: &str) -> Result<Coordinates, GeocodeError> {
        match query {
            "Adyar, Chennai" => Ok(Coordinates { lat: 13.0012, lon: 80.2565 }),
            "Velachery, Chennai" => Ok(Coordinates { lat: 12.9815, lon: 80.218 }),
            _ => Err(GeocodeError::NotFound(query.to_string())),
        }
    }

    fn service_name(&self) -> &'static str {
        "fixed"
    }
}

#[test]
fn test_cleaned_csv_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("clean.csv");

    let selectors = CardSelectors::magicbricks().unwrap();
    let extraction = extract_listings(SNAPSHOT, &selectors, "Chennai");

    assert_eq!(extraction.cards_found, 7);
    assert_eq!(extraction.listings.len(), 6);
    assert!(extraction.listings.iter().all(|l| l.price > 0 && l.sqft > 0));

    storage::write_listings(&path, &extraction.listings).unwrap();
    let back = storage::read_listings(&path).unwrap();

    assert_eq!(back, extraction.listings);
    assert_eq!(
        back[4],
        Listing {
            title: "2 BHK Flat for Sale in Velachery".into(),
            location: "Velachery".into(),
            price: 6_800_000,
            sqft: 950,
            price_per_sqft: 7157,
        }
    );
}

#[tokio::test]
async fn test_full_pipeline_without_network() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let clean_path = temp_dir.path().join("clean.csv");
    let final_path = temp_dir.path().join("final.csv");
    let page_path = temp_dir.path().join("dashboard.html");

    let selectors = CardSelectors::magicbricks().unwrap();
    let extraction = extract_listings(SNAPSHOT, &selectors, "Chennai");
    storage::write_listings(&clean_path, &extraction.listings).unwrap();

    let cleaned = storage::read_listings(&clean_path).unwrap();
    let mut enricher = Enricher::new(FixedGeocoder, "Chennai", Duration::ZERO);
    let (mapped, report) = enricher.enrich(cleaned).await;

    assert_eq!(report.locations_failed, vec!["Atlantis".to_string()]);
    assert_eq!(report.rows_kept, 5);
    storage::write_mapped(&final_path, &mapped).unwrap();

    let data = dashboard::load_dataset(&final_path).unwrap();
    assert_eq!(data, mapped);

    let selection = FilterSelection::defaults_for(&data);
    assert_eq!(selection.locations.len(), 2);

    let view = analyze(&data, &selection);
    let report = view.report().expect("listings should match the defaults");

    // Adyar per-sqft: 10000, 7500, 10000, 10000 -> median 10000; 7500 is a deal
    assert_eq!(report.summary.count, 5);
    assert_eq!(report.deals.len(), 1);
    assert_eq!(report.deals[0].listing.listing.price, 7_500_000);
    assert_eq!(report.deals[0].market_median, 10_000.0);

    let locations = housing_insights::analysis::all_locations(&data);
    let ctx = dashboard::PageContext {
        city: "Chennai",
        all_locations: &locations,
        selection: &selection,
        generated_at: chrono::Utc::now(),
    };
    dashboard::write_dashboard(&page_path, &dashboard::dashboard_page(&ctx, &view)).unwrap();

    let html = std::fs::read_to_string(&page_path).unwrap();
    assert!(html.contains("Top Undervalued Picks"));
}

#[test]
fn test_empty_selection_short_circuits() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let final_path = temp_dir.path().join("final.csv");
    std::fs::write(
        &final_path,
        "title,location,price,sqft,price_per_sqft,lat,lon\nFlat in Adyar,Adyar,9000000,1000,9000,13.0,80.25\n",
    )
    .unwrap();

    let data = dashboard::load_dataset(&final_path).unwrap();
    let selection = FilterSelection::from_choices(&data, &["Guindy".to_string()], None, None);

    assert!(matches!(analyze(&data, &selection), MarketView::NoResults));
}

#[test]
fn test_dashboard_requires_final_dataset() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let result = dashboard::load_dataset(&temp_dir.path().join("missing.csv"));
    assert!(matches!(result, Err(DashboardError::MissingDataset(_))));
}
