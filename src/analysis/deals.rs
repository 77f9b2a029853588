use crate::analysis::stats::median;
use crate::models::MappedListing;
use std::collections::HashMap;

/// A listing is a deal when it is priced below this fraction of its market median
pub const DEAL_THRESHOLD: f64 = 0.9;

/// An undervalued listing together with the baseline it beat
#[derive(Debug, Clone, PartialEq)]
pub struct Deal {
    pub listing: MappedListing,
    pub market_median: f64,
}

/// Median price-per-sqft per location over the given listings
pub fn market_medians(listings: &[MappedListing]) -> HashMap<String, f64> {
    let mut groups: HashMap<&str, Vec<i64>> = HashMap::new();
    for listing in listings {
        groups
            .entry(listing.location())
            .or_default()
            .push(listing.price_per_sqft());
    }

    groups
        .into_iter()
        .filter_map(|(location, values)| Some((location.to_string(), median(&values)?)))
        .collect()
}

pub fn is_deal(price_per_sqft: i64, market_median: f64) -> bool {
    (price_per_sqft as f64) < market_median * DEAL_THRESHOLD
}

/// Undervalued listings of the current view, cheapest per sqft first
pub fn find_deals(listings: &[MappedListing]) -> Vec<Deal> {
    let medians = market_medians(listings);

    let mut deals: Vec<Deal> = listings
        .iter()
        .filter_map(|listing| {
            let market_median = *medians.get(listing.location())?;
            is_deal(listing.price_per_sqft(), market_median).then(|| Deal {
                listing: listing.clone(),
                market_median,
            })
        })
        .collect();

    deals.sort_by_key(|deal| deal.listing.price_per_sqft());
    deals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, Listing};

    fn mapped(title: &str, location: &str, price_per_sqft: i64) -> MappedListing {
        MappedListing::new(
            Listing {
                title: title.into(),
                location: location.into(),
                price: price_per_sqft * 1000,
                sqft: 1000,
                price_per_sqft,
            },
            Coordinates { lat: 13.0, lon: 80.2 },
        )
    }

    #[test]
    fn test_market_median_per_location() {
        let listings = vec![
            mapped("a1", "A", 100),
            mapped("a2", "A", 100),
            mapped("a3", "A", 100),
            mapped("b1", "B", 50),
        ];
        let medians = market_medians(&listings);
        assert_eq!(medians["A"], 100.0);
        assert_eq!(medians["B"], 50.0);
        assert!(find_deals(&listings).is_empty());
    }

    #[test]
    fn test_deal_is_strictly_more_than_ten_percent_below() {
        assert!(is_deal(85, 100.0));
        assert!(!is_deal(95, 100.0));
        assert!(!is_deal(90, 100.0));
    }

    #[test]
    fn test_flags_relative_to_own_neighbourhood() {
        let listings = vec![
            mapped("a1", "A", 100),
            mapped("a2", "A", 100),
            mapped("a3", "A", 100),
            mapped("cheap", "A", 85),
            mapped("slightly cheap", "A", 95),
            mapped("b1", "B", 50),
        ];

        let deals = find_deals(&listings);

        assert_eq!(deals.len(), 1);
        assert_eq!(deals[0].listing.listing.title, "cheap");
        assert_eq!(deals[0].market_median, 100.0);
    }

    #[test]
    fn test_deals_sorted_by_price_per_sqft() {
        let listings = vec![
            mapped("x1", "X", 1000),
            mapped("x2", "X", 1000),
            mapped("x3", "X", 1000),
            mapped("x-deal", "X", 800),
            mapped("y1", "Y", 500),
            mapped("y2", "Y", 500),
            mapped("y3", "Y", 500),
            mapped("y-deal", "Y", 300),
        ];

        let titles: Vec<_> = find_deals(&listings)
            .into_iter()
            .map(|d| d.listing.listing.title)
            .collect();
        assert_eq!(titles, vec!["y-deal", "x-deal"]);
    }

    #[test]
    fn test_empty_view_has_no_deals() {
        assert!(find_deals(&[]).is_empty());
        assert!(market_medians(&[]).is_empty());
    }
}
