use crate::geocoding::rate_limit::RequestThrottle;
use crate::geocoding::traits::Geocoder;
use crate::models::{Coordinates, Listing, MappedListing};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tracing::{info, warn};

/// Counts describing one enrichment run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichmentReport {
    pub locations_resolved: usize,
    pub locations_failed: Vec<String>,
    pub rows_kept: usize,
    pub rows_dropped: usize,
}

/// Attaches coordinates to listings, one lookup per distinct location
pub struct Enricher<G: Geocoder> {
    geocoder: G,
    throttle: RequestThrottle,
    /// Appended to every query to keep matches inside the target city
    query_suffix: String,
    max_retries: usize,
}

impl<G: Geocoder> Enricher<G> {
    pub fn new(geocoder: G, city: &str, min_delay: Duration) -> Self {
        Self {
            geocoder,
            throttle: RequestThrottle::new(min_delay),
            query_suffix: city.to_string(),
            max_retries: 0,
        }
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Resolve every distinct location, in first-seen order
    pub async fn resolve_locations(
        &mut self,
        listings: &[Listing],
    ) -> (HashMap<String, Coordinates>, Vec<String>) {
        let locations = unique_locations(listings);
        info!(
            "Found {} unique neighbourhoods, geocoding with {}",
            locations.len(),
            self.geocoder.service_name()
        );

        let mut resolved = HashMap::new();
        let mut failed = Vec::new();

        for location in locations {
            match self.lookup(&location).await {
                Some(coordinates) => {
                    info!("Found: {} -> {}, {}", location, coordinates.lat, coordinates.lon);
                    resolved.insert(location, coordinates);
                }
                None => failed.push(location),
            }
        }

        (resolved, failed)
    }

    /// Geocode, join coordinates onto each listing and drop unmappable rows
    pub async fn enrich(&mut self, listings: Vec<Listing>) -> (Vec<MappedListing>, EnrichmentReport) {
        let (resolved, failed) = self.resolve_locations(&listings).await;
        let total = listings.len();

        let mapped: Vec<MappedListing> = listings
            .into_iter()
            .filter_map(|listing| {
                let coordinates = resolved.get(&listing.location).copied()?;
                Some(MappedListing::new(listing, coordinates))
            })
            .collect();

        let report = EnrichmentReport {
            locations_resolved: resolved.len(),
            locations_failed: failed,
            rows_kept: mapped.len(),
            rows_dropped: total - mapped.len(),
        };

        (mapped, report)
    }

    async fn lookup(&mut self, location: &str) -> Option<Coordinates> {
        let query = format!("{}, {}", location, self.query_suffix);

        for attempt in 0..=self.max_retries {
            self.throttle.wait().await;

            match self.geocoder.geocode(&query).await {
                Ok(coordinates) => return Some(coordinates),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    warn!(
                        location = %location,
                        attempt = attempt + 1,
                        "Geocoding failed, retrying: {}", e
                    );
                }
                Err(e) => {
                    warn!(location = %location, "Could not geocode: {}", e);
                    return None;
                }
            }
        }

        None
    }
}

/// Distinct locations, exact and case-sensitive, in order of first appearance
pub fn unique_locations(listings: &[Listing]) -> Vec<String> {
    let mut seen = HashSet::new();
    listings
        .iter()
        .filter(|l| seen.insert(l.location.as_str()))
        .map(|l| l.location.clone())
        .collect()
}
