pub mod browser;
pub mod types;
pub mod wait;

pub use browser::{fetch_snapshot, BrowserSession, ListingPageFetcher};
pub use types::{FetchRequest, PageSnapshot};
pub use wait::poll_until;
