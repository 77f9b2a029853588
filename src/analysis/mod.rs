//! Filtering, summary metrics and the undervaluation heuristic.
//!
//! Everything here is recomputed from the dataset and the current
//! [`FilterSelection`]; nothing is cached between selections.

pub mod deals;
pub mod filter;
pub mod stats;

pub use deals::{find_deals, market_medians, Deal, DEAL_THRESHOLD};
pub use filter::{all_locations, price_bounds, FilterSelection};
pub use stats::median;

use crate::models::MappedListing;

/// Headline numbers of the filtered view
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub median_price: f64,
    pub median_price_per_sqft: f64,
}

/// Everything the dashboard shows for a non-empty view
#[derive(Debug, Clone)]
pub struct MarketReport {
    pub listings: Vec<MappedListing>,
    pub summary: Summary,
    pub deals: Vec<Deal>,
}

/// Outcome of applying a filter; an empty view is a normal state
#[derive(Debug, Clone)]
pub enum MarketView {
    NoResults,
    Report(MarketReport),
}

impl MarketView {
    pub fn report(&self) -> Option<&MarketReport> {
        match self {
            MarketView::NoResults => None,
            MarketView::Report(report) => Some(report),
        }
    }
}

/// Apply the selection and derive metrics and deals for whatever remains
pub fn analyze(data: &[MappedListing], selection: &FilterSelection) -> MarketView {
    let listings = selection.apply(data);

    let prices: Vec<i64> = listings.iter().map(MappedListing::price).collect();
    let per_sqft: Vec<i64> = listings.iter().map(MappedListing::price_per_sqft).collect();

    let (Some(median_price), Some(median_price_per_sqft)) = (median(&prices), median(&per_sqft))
    else {
        return MarketView::NoResults;
    };

    let summary = Summary {
        count: listings.len(),
        median_price,
        median_price_per_sqft,
    };
    let deals = find_deals(&listings);

    MarketView::Report(MarketReport {
        listings,
        summary,
        deals,
    })
}
