use crate::scrapers::types::{FetchRequest, PageSnapshot};
use crate::scrapers::wait::poll_until;
use anyhow::{bail, Context, Result};
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::sync::Arc;
use tracing::{debug, info, warn};

const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// A headless Chrome process with one open tab, closed when dropped
pub struct BrowserSession {
    // Dropping the browser kills the Chrome process
    _browser: Browser,
    tab: Arc<Tab>,
}

impl BrowserSession {
    pub fn launch() -> Result<Self> {
        info!("Launching headless Chrome...");

        let options = LaunchOptions::default_builder()
            .headless(true)
            .window_size(Some((1366, 900)))
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;
        let tab = browser.new_tab().context("Failed to open browser tab")?;

        Ok(Self {
            _browser: browser,
            tab,
        })
    }

    pub fn tab(&self) -> &Tab {
        &self.tab
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if let Err(e) = self.tab.close(false) {
            warn!("Failed to close browser tab: {}", e);
        }
        info!("Browser session closed");
    }
}

/// Loads a search results page and scrolls until lazy loading stops
pub struct ListingPageFetcher {
    request: FetchRequest,
}

impl ListingPageFetcher {
    pub fn new(request: FetchRequest) -> Self {
        Self { request }
    }

    /// Fetch the page in a fresh browser session.
    ///
    /// Blocking; run it off the async runtime.
    pub fn fetch(&self) -> Result<PageSnapshot> {
        let session = BrowserSession::launch()?;
        let tab = session.tab();

        let attempts = self.load_with_retries(tab)?;
        let scrolls = self.scroll_until_exhausted(tab)?;

        let html = tab.get_content().context("Failed to read page markup")?;
        let cards = self.card_count(tab)?;
        info!("Captured {} bytes of markup with {} cards", html.len(), cards);

        Ok(PageSnapshot {
            html,
            cards,
            scrolls,
            attempts,
        })
    }

    /// Navigate until at least one card renders, up to `max_attempts` times
    fn load_with_retries(&self, tab: &Tab) -> Result<usize> {
        let settings = &self.request.settings;

        for attempt in 1..=settings.max_attempts {
            info!("Opening {} (attempt {}/{})", self.request.url, attempt, settings.max_attempts);

            match self.load_once(tab) {
                Ok(true) => return Ok(attempt),
                Ok(false) => warn!(
                    "No listings rendered within {:?}",
                    settings.page_load_timeout
                ),
                Err(e) => warn!("Page load failed: {:#}", e),
            }
        }

        bail!(
            "No listings appeared on {} after {} attempts",
            self.request.url,
            settings.max_attempts
        )
    }

    fn load_once(&self, tab: &Tab) -> Result<bool> {
        let settings = &self.request.settings;

        tab.navigate_to(&self.request.url)?;
        tab.wait_until_navigated()?;

        poll_until(settings.page_load_timeout, settings.poll_interval, || {
            Ok(self.card_count(tab)? > 0)
        })
    }

    /// Scroll to the bottom repeatedly; stop early once a scroll loads nothing new
    fn scroll_until_exhausted(&self, tab: &Tab) -> Result<usize> {
        let settings = &self.request.settings;
        let mut performed = 0;

        for i in 0..settings.scrolls {
            let before = self.card_count(tab)?;
            tab.evaluate(SCROLL_TO_BOTTOM, false)
                .context("Failed to scroll page")?;
            performed += 1;

            let grew = poll_until(settings.scroll_timeout, settings.poll_interval, || {
                Ok(self.card_count(tab)? > before)
            })?;

            if !grew {
                info!("Scroll {} loaded no new listings, stopping", i + 1);
                break;
            }
            debug!("Scrolled {} times, {} cards so far", i + 1, self.card_count(tab)?);
        }

        Ok(performed)
    }

    fn card_count(&self, tab: &Tab) -> Result<usize> {
        let result = tab
            .evaluate(&self.request.card_count_script(), false)
            .context("Failed to count listing cards")?;

        Ok(result
            .value
            .and_then(|value| value.as_u64())
            .unwrap_or(0) as usize)
    }
}

/// Run the blocking browser fetch on tokio's blocking pool
pub async fn fetch_snapshot(request: FetchRequest) -> Result<PageSnapshot> {
    let snapshot = tokio::task::spawn_blocking(move || ListingPageFetcher::new(request).fetch())
        .await
        .context("Browser task panicked")??;
    Ok(snapshot)
}
