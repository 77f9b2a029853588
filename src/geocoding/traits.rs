use crate::error::GeocodeError;
use crate::models::Coordinates;
use async_trait::async_trait;

/// A service that turns a free-text place query into coordinates
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Look up a single query; `GeocodeError::NotFound` when nothing matches
    async fn geocode(&self, query: &str) -> Result<Coordinates, GeocodeError>;

    /// Get the name of the geocoding service
    fn service_name(&self) -> &'static str;
}
