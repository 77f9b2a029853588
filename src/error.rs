use std::path::PathBuf;
use thiserror::Error;

/// Why a price string could not be turned into an amount
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AmountError {
    #[error("price text is empty")]
    Empty,

    #[error("price '{0}' has no recognised unit (expected Cr or Lac)")]
    UnrecognizedUnit(String),

    #[error("price '{0}' is not a valid number")]
    InvalidNumber(String),
}

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("geocoding service returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("no match for '{0}'")]
    NotFound(String),

    #[error("invalid coordinate '{0}' in geocoding response")]
    InvalidCoordinate(String),
}

impl GeocodeError {
    /// Transport-level failures are worth another attempt; a missing match is not
    pub fn is_retryable(&self) -> bool {
        match self {
            GeocodeError::Request(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            GeocodeError::Status(status) => status.is_server_error() || status.as_u16() == 429,
            GeocodeError::NotFound(_) | GeocodeError::InvalidCoordinate(_) => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("{} not found. Run the `geocode` stage first", .0.display())]
    MissingDataset(PathBuf),

    #[error("failed to read dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write dashboard: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode chart data: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_not_retried() {
        assert!(!GeocodeError::NotFound("Nowhere, Chennai".into()).is_retryable());
        assert!(GeocodeError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE).is_retryable());
        assert!(!GeocodeError::Status(reqwest::StatusCode::FORBIDDEN).is_retryable());
    }

    #[test]
    fn test_missing_dataset_message_names_file() {
        let err = DashboardError::MissingDataset(PathBuf::from("final.csv"));
        assert_eq!(err.to_string(), "final.csv not found. Run the `geocode` stage first");
    }
}
