use crate::analysis::{Deal, FilterSelection, MarketReport, MarketView};
use crate::dashboard::charts;
use crate::dashboard::format::{format_lakhs, format_price, format_rupees};
use chrono::{DateTime, Utc};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use serde_json::Value;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; display: flex; color: #1f2937; }
aside { width: 260px; padding: 1.5rem; background: #f3f4f6; min-height: 100vh; }
main { flex: 1; padding: 1.5rem 2rem; }
.metrics { display: flex; gap: 2rem; }
.metric { padding: 1rem; border: 1px solid #e5e7eb; border-radius: 8px; min-width: 160px; }
.metric .value { font-size: 1.6rem; font-weight: 600; }
.charts { display: grid; grid-template-columns: 2fr 1fr; gap: 1rem; }
.selected { font-weight: 600; }
.unselected { color: #9ca3af; }
.warning { padding: 1rem; background: #fef3c7; border-radius: 8px; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: 0.4rem 0.6rem; border-bottom: 1px solid #e5e7eb; }
"#;

/// What the page needs besides the analysed view
pub struct PageContext<'a> {
    pub city: &'a str,
    pub all_locations: &'a [String],
    pub selection: &'a FilterSelection,
    pub generated_at: DateTime<Utc>,
}

pub fn dashboard_page(ctx: &PageContext<'_>, view: &MarketView) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (ctx.city) " Real Estate Insights" }
                script src=(PLOTLY_CDN) {}
                style { (PreEscaped(STYLE)) }
            }
            body {
                (filter_panel(ctx))
                main {
                    h1 { (ctx.city) " Real Estate Insights Engine" }
                    h3 { "Analysis of undervalued listings" }
                    p class="unselected" {
                        "Generated " (ctx.generated_at.format("%Y-%m-%d %H:%M UTC").to_string())
                    }
                    @match view {
                        MarketView::NoResults => {
                            p class="warning" { "No listings match your filters." }
                        }
                        MarketView::Report(report) => (report_body(report)),
                    }
                }
            }
        }
    }
}

fn filter_panel(ctx: &PageContext<'_>) -> Markup {
    html! {
        aside {
            h2 { "Filter Options" }
            h4 { "Location" }
            ul {
                @for location in ctx.all_locations {
                    @if ctx.selection.locations.contains(location) {
                        li class="selected" { "✔ " (location) }
                    } @else {
                        li class="unselected" { (location) }
                    }
                }
            }
            h4 { "Budget Range (₹)" }
            p {
                (format_price(ctx.selection.min_price as f64))
                " – "
                (format_price(ctx.selection.max_price as f64))
            }
        }
    }
}

fn report_body(report: &MarketReport) -> Markup {
    let summary = &report.summary;

    html! {
        section class="metrics" {
            (metric("Listings Found", &summary.count.to_string()))
            (metric("Median Price", &format_lakhs(summary.median_price)))
            (metric("Median Price/Sqft", &format_rupees(summary.median_price_per_sqft)))
        }
        hr;
        h2 { "Neighborhood Price Heatmap" }
        p class="unselected" { "Brighter colors = higher price per sqft" }
        (figure("price-map", &charts::price_map(&report.listings)))
        section class="charts" {
            div {
                h2 { "Price vs. Size Analysis" }
                (figure("price-vs-size", &charts::price_vs_size(&report.listings)))
            }
            div {
                h2 { "Price Distribution" }
                (figure("price-distribution", &charts::price_distribution(&report.listings)))
            }
        }
        h2 { "Top Undervalued Picks" }
        p class="unselected" {
            "Listings priced significantly lower than their neighborhood median."
        }
        (deals_table(&report.deals))
    }
}

fn metric(label: &str, value: &str) -> Markup {
    html! {
        div class="metric" {
            div { (label) }
            div class="value" { (value) }
        }
    }
}

/// A div plus the script that draws `spec` into it
fn figure(id: &str, spec: &Value) -> Markup {
    // Keep "</script>" inside JSON strings from closing the tag
    let json = spec.to_string().replace("</", "<\\/");
    let script = format!(
        "Plotly.newPlot({:?}, {json}.data, {json}.layout, {{responsive: true}});",
        id,
        json = json
    );

    html! {
        div id=(id) {}
        script { (PreEscaped(script)) }
    }
}

fn deals_table(deals: &[Deal]) -> Markup {
    html! {
        @if deals.is_empty() {
            p { "No listing is more than 10% below its neighborhood median." }
        } @else {
            table {
                thead {
                    tr {
                        th { "location" }
                        th { "title" }
                        th { "sqft" }
                        th { "price" }
                        th { "price_per_sqft" }
                        th { "market_median" }
                    }
                }
                tbody {
                    @for deal in deals {
                        tr {
                            td { (deal.listing.location()) }
                            td { (deal.listing.listing.title) }
                            td { (deal.listing.listing.sqft) }
                            td { (format_price(deal.listing.price() as f64)) }
                            td { (deal.listing.price_per_sqft()) }
                            td { (deal.market_median) }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::models::{Coordinates, Listing, MappedListing};
    use chrono::TimeZone;

    fn mapped(title: &str, location: &str, price: i64) -> MappedListing {
        MappedListing::new(
            Listing {
                title: title.into(),
                location: location.into(),
                price,
                sqft: 1000,
                price_per_sqft: price / 1000,
            },
            Coordinates { lat: 13.0, lon: 80.2 },
        )
    }

    fn render(data: &[MappedListing], selection: &FilterSelection) -> String {
        let locations = crate::analysis::all_locations(data);
        let ctx = PageContext {
            city: "Chennai",
            all_locations: &locations,
            selection,
            generated_at: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 0).unwrap(),
        };
        dashboard_page(&ctx, &analyze(data, selection)).into_string()
    }

    #[test]
    fn test_renders_metrics_charts_and_deals() {
        let data = vec![
            mapped("a1", "Adyar", 10_000_000),
            mapped("a2", "Adyar", 10_000_000),
            mapped("a3", "Adyar", 10_000_000),
            mapped("Bargain <flat> in Adyar", "Adyar", 8_000_000),
        ];
        let selection = FilterSelection::defaults_for(&data);

        let page = render(&data, &selection);

        assert!(page.contains("Listings Found"));
        assert!(page.contains("₹ 100.0 L"));
        assert!(page.contains(r#"Plotly.newPlot("price-map""#));
        assert!(page.contains("Bargain &lt;flat&gt; in Adyar"));
        assert!(page.contains("Generated 2026-01-02 03:04 UTC"));
    }

    #[test]
    fn test_empty_view_renders_warning_only() {
        let data = vec![mapped("a1", "Adyar", 10_000_000)];
        let selection = FilterSelection::from_choices(&data, &["Guindy".into()], None, None);

        let page = render(&data, &selection);

        assert!(page.contains("No listings match your filters."));
        assert!(!page.contains("Plotly.newPlot"));
    }

    #[test]
    fn test_script_safe_json() {
        let markup = figure("x", &serde_json::json!({"data": ["</script>"], "layout": {}}));
        let html = markup.into_string();
        assert!(!html.contains("\"</script>\""));
        assert!(html.contains("<\\/script>"));
    }
}
