use crate::config::GeocodeSettings;
use crate::error::GeocodeError;
use crate::geocoding::traits::Geocoder;
use crate::models::Coordinates;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

/// One entry of a Nominatim `/search?format=json` response
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
}

/// Geocoder backed by the OpenStreetMap Nominatim search API
pub struct NominatimGeocoder {
    client: Client,
    endpoint: String,
}

impl NominatimGeocoder {
    pub fn new(settings: &GeocodeSettings) -> Result<Self> {
        // Nominatim's usage policy requires an identifying User-Agent
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[instrument(skip(self))]
    async fn geocode(&self, query: &str) -> Result<Coordinates, GeocodeError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeocodeError::Status(response.status()));
        }

        let places: Vec<NominatimPlace> = response.json().await?;
        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NotFound(query.to_string()))?;

        let coordinates = parse_place(&place)?;
        debug!(
            "Geocoded {} -> ({}, {}) [{}]",
            query, coordinates.lat, coordinates.lon, place.display_name
        );

        Ok(coordinates)
    }

    fn service_name(&self) -> &'static str {
        "Nominatim"
    }
}

fn parse_place(place: &NominatimPlace) -> Result<Coordinates, GeocodeError> {
    let lat = place
        .lat
        .trim()
        .parse()
        .map_err(|_| GeocodeError::InvalidCoordinate(place.lat.clone()))?;
    let lon = place
        .lon
        .trim()
        .parse()
        .map_err(|_| GeocodeError::InvalidCoordinate(place.lon.clone()))?;
    Ok(Coordinates { lat, lon })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_response() {
        let body = r#"[{"place_id":1,"lat":"13.0067","lon":"80.2206","display_name":"Adyar, Chennai"}]"#;
        let places: Vec<NominatimPlace> = serde_json::from_str(body).unwrap();
        let coordinates = parse_place(&places[0]).unwrap();
        assert_eq!(coordinates, Coordinates { lat: 13.0067, lon: 80.2206 });
    }

    #[test]
    fn test_invalid_coordinate() {
        let place = NominatimPlace {
            lat: "north".into(),
            lon: "80.2".into(),
            display_name: String::new(),
        };
        assert!(matches!(
            parse_place(&place),
            Err(GeocodeError::InvalidCoordinate(v)) if v == "north"
        ));
    }
}
