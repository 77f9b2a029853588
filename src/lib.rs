pub mod analysis;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod geocoding;
pub mod models;
pub mod parsers;
pub mod scrapers;
pub mod storage;

pub use config::Config;
pub use error::{AmountError, DashboardError, GeocodeError};
