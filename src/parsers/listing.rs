use crate::models::Listing;
use crate::parsers::amount::{derive_location_or, try_parse_amount, try_parse_area};
use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

const UNKNOWN_TITLE: &str = "Unknown";

/// CSS selectors locating a listing card and its fields
#[derive(Debug, Clone)]
pub struct CardSelectors {
    pub card: Selector,
    pub price: Selector,
    pub title: Selector,
    pub area: Selector,
}

impl CardSelectors {
    pub fn new(card: &str, price: &str, title: &str, area: &str) -> Result<Self> {
        Ok(Self {
            card: parse_selector(card)?,
            price: parse_selector(price)?,
            title: parse_selector(title)?,
            area: parse_selector(area)?,
        })
    }

    /// Selectors for the MagicBricks search results markup
    pub fn magicbricks() -> Result<Self> {
        Self::new(
            "div.mb-srp__card",
            "div.mb-srp__card__price--amount",
            "h2.mb-srp__card--title",
            "div.mb-srp__card__summary--value",
        )
    }
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid selector '{}': {}", css, e))
}

/// Fields read from one card before validation; `None` means absent or unparseable
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingDraft {
    pub title: Option<String>,
    pub price: Option<i64>,
    pub sqft: Option<i64>,
}

impl ListingDraft {
    pub fn from_card(card: ElementRef<'_>, selectors: &CardSelectors) -> Self {
        let title = first_text(card, &selectors.title);

        let price = first_text(card, &selectors.price).and_then(|raw| match try_parse_amount(&raw) {
            Ok(amount) => Some(amount),
            Err(e) => {
                debug!("Unusable price: {}", e);
                None
            }
        });

        let sqft = first_text(card, &selectors.area).and_then(|raw| try_parse_area(&raw));

        Self { title, price, sqft }
    }

    /// Whether this draft can become a listing: price and area both positive
    pub fn is_complete(&self) -> bool {
        matches!((self.price, self.sqft), (Some(p), Some(s)) if p > 0 && s > 0)
    }

    /// Build a listing, or `None` when the draft is incomplete
    pub fn into_listing(self, fallback_location: &str) -> Option<Listing> {
        if !self.is_complete() {
            return None;
        }
        let price = self.price?;
        let sqft = self.sqft?;

        let title = self.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string());
        let location = derive_location_or(&title, fallback_location);

        Some(Listing {
            title,
            location,
            price,
            sqft,
            price_per_sqft: price / sqft,
        })
    }
}

fn first_text(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

/// Result of extracting a page snapshot
#[derive(Debug, Clone)]
pub struct Extraction {
    pub listings: Vec<Listing>,
    pub cards_found: usize,
}

impl Extraction {
    pub fn dropped(&self) -> usize {
        self.cards_found - self.listings.len()
    }
}

/// Extract complete listings from a saved search page, keeping page order
pub fn extract_listings(html: &str, selectors: &CardSelectors, fallback_location: &str) -> Extraction {
    let document = Html::parse_document(html);

    let cards: Vec<_> = document.select(&selectors.card).collect();
    info!("Found {} listing cards in snapshot", cards.len());

    let mut listings = Vec::new();

    for (idx, card) in cards.iter().enumerate() {
        let draft = ListingDraft::from_card(*card, selectors);

        match draft.clone().into_listing(fallback_location) {
            Some(listing) => listings.push(listing),
            None => debug!(
                "Skipped card {}: title={:?}, price={:?}, sqft={:?}",
                idx, draft.title, draft.price, draft.sqft
            ),
        }
    }

    let extraction = Extraction {
        listings,
        cards_found: cards.len(),
    };

    info!(
        kept = extraction.listings.len(),
        dropped = extraction.dropped(),
        "Extraction complete"
    );

    extraction
}
