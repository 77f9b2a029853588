pub mod charts;
pub mod format;
pub mod page;

pub use page::{dashboard_page, PageContext};

use crate::error::DashboardError;
use crate::models::MappedListing;
use crate::storage;
use maud::Markup;
use std::path::Path;
use tracing::info;

/// Load the final mappable dataset; a missing file is a user-facing error
pub fn load_dataset(path: &Path) -> Result<Vec<MappedListing>, DashboardError> {
    match storage::read_mapped(path) {
        Ok(listings) => {
            info!("Loaded {} mappable listings from {}", listings.len(), path.display());
            Ok(listings)
        }
        Err(e) if storage::is_not_found(&e) => {
            Err(DashboardError::MissingDataset(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Write the rendered page, replacing any previous dashboard
pub fn write_dashboard(path: &Path, page: &Markup) -> Result<(), DashboardError> {
    std::fs::write(path, page.0.as_bytes())?;
    info!("Dashboard written to {}", path.display());
    Ok(())
}
