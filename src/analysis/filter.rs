use crate::models::MappedListing;
use std::collections::BTreeSet;

/// Number of locations selected when the user picks none
pub const DEFAULT_LOCATION_COUNT: usize = 3;

/// The user's current filter: location subset AND inclusive price range
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSelection {
    pub locations: BTreeSet<String>,
    pub min_price: i64,
    pub max_price: i64,
}

/// All distinct locations of the full dataset, sorted
pub fn all_locations(data: &[MappedListing]) -> Vec<String> {
    data.iter()
        .map(|l| l.location().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Lowest and highest price of the full dataset
pub fn price_bounds(data: &[MappedListing]) -> Option<(i64, i64)> {
    let min = data.iter().map(MappedListing::price).min()?;
    let max = data.iter().map(MappedListing::price).max()?;
    Some((min, max))
}

impl FilterSelection {
    /// First three locations in sorted order and the full price range
    pub fn defaults_for(data: &[MappedListing]) -> Self {
        Self::from_choices(data, &[], None, None)
    }

    /// Build a selection from user choices, defaulting whatever was not chosen.
    ///
    /// Chosen prices are clamped to the dataset's range.
    pub fn from_choices(
        data: &[MappedListing],
        locations: &[String],
        min_price: Option<i64>,
        max_price: Option<i64>,
    ) -> Self {
        let locations = if locations.is_empty() {
            all_locations(data)
                .into_iter()
                .take(DEFAULT_LOCATION_COUNT)
                .collect()
        } else {
            locations.iter().cloned().collect()
        };

        let (lo, hi) = price_bounds(data).unwrap_or((0, 0));

        Self {
            locations,
            min_price: min_price.map_or(lo, |p| p.clamp(lo, hi)),
            max_price: max_price.map_or(hi, |p| p.clamp(lo, hi)),
        }
    }

    pub fn matches(&self, listing: &MappedListing) -> bool {
        self.locations.contains(listing.location())
            && (self.min_price..=self.max_price).contains(&listing.price())
    }

    /// Listings passing both predicates, in dataset order
    pub fn apply(&self, data: &[MappedListing]) -> Vec<MappedListing> {
        data.iter().filter(|l| self.matches(l)).cloned().collect()
    }
}
