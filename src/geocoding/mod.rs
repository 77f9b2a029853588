pub mod enrich;
pub mod nominatim;
pub mod rate_limit;
pub mod traits;

pub use enrich::{unique_locations, Enricher, EnrichmentReport};
pub use nominatim::NominatimGeocoder;
pub use rate_limit::RequestThrottle;
pub use traits::Geocoder;
