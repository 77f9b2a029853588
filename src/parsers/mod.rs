pub mod amount;
pub mod listing;

pub use amount::{derive_location, derive_location_or, parse_amount, parse_area, try_parse_amount};
pub use listing::{extract_listings, CardSelectors, Extraction, ListingDraft};
