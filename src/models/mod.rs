use serde::{Deserialize, Serialize};

/// A cleaned listing: both price and area are known and positive
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub title: String,
    pub location: String,
    /// Asking price in rupees
    pub price: i64,
    pub sqft: i64,
    pub price_per_sqft: i64,
}

/// Geographic position of a neighbourhood
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A listing whose location resolved to coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct MappedListing {
    pub listing: Listing,
    pub coordinates: Coordinates,
}

impl MappedListing {
    pub fn new(listing: Listing, coordinates: Coordinates) -> Self {
        Self {
            listing,
            coordinates,
        }
    }

    pub fn location(&self) -> &str {
        &self.listing.location
    }

    pub fn price(&self) -> i64 {
        self.listing.price
    }

    pub fn price_per_sqft(&self) -> i64 {
        self.listing.price_per_sqft
    }
}
