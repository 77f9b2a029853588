//! Plotly figure specs (`{"data": [...], "layout": {...}}`) for the dashboard.

use crate::dashboard::format::{format_price, price_ticks};
use crate::models::MappedListing;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Largest marker diameter in pixels
const MAX_MARKER_SIZE: f64 = 20.0;

/// Plotly Express "IceFire" cyclical scale
const ICE_FIRE: [&str; 17] = [
    "#000000", "#001f4d", "#003786", "#0e58a8", "#217eb8", "#30a4ca", "#54c8df", "#9be4ef",
    "#e1e9d1", "#f3d573", "#e7b000", "#da8200", "#c65400", "#ac2301", "#820000", "#4c0000",
    "#000000",
];

fn ice_fire_scale() -> Value {
    let last = (ICE_FIRE.len() - 1) as f64;
    Value::Array(
        ICE_FIRE
            .iter()
            .enumerate()
            .map(|(i, color)| json!([i as f64 / last, color]))
            .collect(),
    )
}

/// `sizeref` for area-scaled markers whose largest value maps to MAX_MARKER_SIZE
fn size_ref(values: impl Iterator<Item = i64>) -> f64 {
    let max = values.max().unwrap_or(1).max(1) as f64;
    2.0 * max / (MAX_MARKER_SIZE * MAX_MARKER_SIZE)
}

fn by_location(listings: &[MappedListing]) -> BTreeMap<&str, Vec<&MappedListing>> {
    let mut groups: BTreeMap<&str, Vec<&MappedListing>> = BTreeMap::new();
    for listing in listings {
        groups.entry(listing.location()).or_default().push(listing);
    }
    groups
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Map of listing positions, coloured by price per sqft and sized by area
pub fn price_map(listings: &[MappedListing]) -> Value {
    let hover: Vec<String> = listings
        .iter()
        .map(|l| {
            format!(
                "{}<br>{}<br>₹ {}/sqft",
                l.listing.title,
                l.location(),
                l.price_per_sqft()
            )
        })
        .collect();

    let center = json!({
        "lat": mean(listings.iter().map(|l| l.coordinates.lat)).unwrap_or(0.0),
        "lon": mean(listings.iter().map(|l| l.coordinates.lon)).unwrap_or(0.0),
    });

    json!({
        "data": [{
            "type": "scattermapbox",
            "mode": "markers",
            "lat": listings.iter().map(|l| l.coordinates.lat).collect::<Vec<_>>(),
            "lon": listings.iter().map(|l| l.coordinates.lon).collect::<Vec<_>>(),
            "text": hover,
            "hoverinfo": "text",
            "marker": {
                "color": listings.iter().map(MappedListing::price_per_sqft).collect::<Vec<_>>(),
                "colorscale": ice_fire_scale(),
                "showscale": true,
                "size": listings.iter().map(|l| l.listing.sqft).collect::<Vec<_>>(),
                "sizemode": "area",
                "sizeref": size_ref(listings.iter().map(|l| l.listing.sqft)),
            },
        }],
        "layout": {
            "mapbox": { "style": "open-street-map", "zoom": 10, "center": center },
            "height": 500,
            "margin": { "r": 0, "t": 0, "l": 0, "b": 0 },
        },
    })
}

/// Price against floor area, one series per location
pub fn price_vs_size(listings: &[MappedListing]) -> Value {
    let sizeref = size_ref(listings.iter().map(MappedListing::price_per_sqft));

    let traces: Vec<Value> = by_location(listings)
        .into_iter()
        .map(|(location, group)| {
            json!({
                "type": "scatter",
                "mode": "markers",
                "name": location,
                "x": group.iter().map(|l| l.listing.sqft).collect::<Vec<_>>(),
                "y": group.iter().map(|l| l.price()).collect::<Vec<_>>(),
                "text": group
                    .iter()
                    .map(|l| format!("{}<br>{} sqft<br>{}", format_price(l.price() as f64), l.listing.sqft, location))
                    .collect::<Vec<_>>(),
                "hoverinfo": "text",
                "marker": {
                    "size": group.iter().map(|l| l.price_per_sqft()).collect::<Vec<_>>(),
                    "sizemode": "area",
                    "sizeref": sizeref,
                },
            })
        })
        .collect();

    let max_price = listings.iter().map(MappedListing::price).max().unwrap_or(0) as f64;
    let (tick_vals, tick_text): (Vec<f64>, Vec<String>) = price_ticks(max_price).into_iter().unzip();

    json!({
        "data": traces,
        "layout": {
            "title": { "text": "Bigger Bubble = More Expensive per Sqft" },
            "xaxis": { "title": { "text": "sqft" } },
            "yaxis": {
                "title": { "text": "price" },
                "tickmode": "array",
                "tickvals": tick_vals,
                "ticktext": tick_text,
            },
        },
    })
}

/// Spread of price per sqft within each location, every point shown
pub fn price_distribution(listings: &[MappedListing]) -> Value {
    let traces: Vec<Value> = by_location(listings)
        .into_iter()
        .map(|(location, group)| {
            json!({
                "type": "box",
                "name": location,
                "y": group.iter().map(|l| l.price_per_sqft()).collect::<Vec<_>>(),
                "boxpoints": "all",
            })
        })
        .collect();

    json!({
        "data": traces,
        "layout": {
            "showlegend": false,
            "yaxis": { "tickformat": ",", "tickprefix": "₹ " },
        },
    })
}
