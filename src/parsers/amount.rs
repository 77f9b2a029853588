//! Normalisation of the free-text fields shown on listing cards.
//!
//! Prices are written in the Indian numbering system ("₹ 1.25 Cr", "85 Lacs"),
//! areas as "1943 sqft", and the neighbourhood only appears inside the card
//! title ("3 BHK Flat for Sale in Mogappair East Chennai").

use crate::error::AmountError;

pub const CRORE: i64 = 10_000_000;
pub const LAKH: i64 = 100_000;

const RUPEE: char = '₹';
const LOCATION_MARKER: &str = " in ";

/// Parse a price such as "₹ 1.25 Cr" or "₹ 85 Lac" into rupees.
///
/// Text without a Cr/Lac unit, including a bare number, is rejected.
pub fn try_parse_amount(text: &str) -> Result<i64, AmountError> {
    let text = text.replace(RUPEE, "");
    let text = text.trim();

    if text.is_empty() {
        return Err(AmountError::Empty);
    }

    let (number, multiplier) = if text.contains("Cr") {
        (text.replace("Cr", ""), CRORE)
    } else if text.contains("Lac") {
        (text.replace("Lacs", "").replace("Lac", ""), LAKH)
    } else {
        return Err(AmountError::UnrecognizedUnit(text.to_string()));
    };

    let number = number.trim();
    let value: f64 = number
        .parse()
        .map_err(|_| AmountError::InvalidNumber(number.to_string()))?;

    if !value.is_finite() {
        return Err(AmountError::InvalidNumber(number.to_string()));
    }

    // Truncates toward zero
    Ok((value * multiplier as f64) as i64)
}

/// Like [`try_parse_amount`], but any failure becomes zero
pub fn parse_amount(text: &str) -> i64 {
    try_parse_amount(text).unwrap_or(0)
}

/// Leading whitespace-delimited integer of an area field ("1943 sqft" -> 1943)
pub fn try_parse_area(text: &str) -> Option<i64> {
    text.split_whitespace().next()?.parse().ok()
}

pub fn parse_area(text: &str) -> i64 {
    try_parse_area(text).unwrap_or(0)
}

/// Neighbourhood named after the last " in " of a title, or `fallback`
pub fn derive_location_or(title: &str, fallback: &str) -> String {
    title
        .rsplit_once(LOCATION_MARKER)
        .map(|(_, tail)| tail.trim())
        .filter(|tail| !tail.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

pub fn derive_location(title: &str) -> String {
    derive_location_or(title, crate::config::DEFAULT_CITY)
}
