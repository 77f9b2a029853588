//! Indian-style price labels (lakhs and crores).

use crate::parsers::amount::{CRORE, LAKH};

const CRORE_F: f64 = CRORE as f64;
const LAKH_F: f64 = LAKH as f64;

/// "₹ 1.25 Cr" from one crore upwards, "₹ 85.00 L" below
pub fn format_price(amount: f64) -> String {
    if amount >= CRORE_F {
        format!("₹ {:.2} Cr", amount / CRORE_F)
    } else {
        format!("₹ {:.2} L", amount / LAKH_F)
    }
}

/// Amount in lakhs with one decimal, e.g. "₹ 85.0 L"
pub fn format_lakhs(amount: f64) -> String {
    format!("₹ {:.1} L", amount / LAKH_F)
}

/// Whole rupees, e.g. "₹ 8500"
pub fn format_rupees(amount: f64) -> String {
    format!("₹ {}", amount as i64)
}

/// Six evenly spaced y-axis ticks from zero to `max`, labelled in Cr or L
pub fn price_ticks(max: f64) -> Vec<(f64, String)> {
    const TICKS: usize = 6;

    (0..TICKS)
        .map(|i| {
            let value = max * i as f64 / (TICKS - 1) as f64;
            let label = if value >= CRORE_F {
                format!("₹ {:.1} Cr", value / CRORE_F)
            } else {
                format!("₹ {:.0} L", value / LAKH_F)
            };
            (value, label)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(12_500_000.0), "₹ 1.25 Cr");
        assert_eq!(format_price(10_000_000.0), "₹ 1.00 Cr");
        assert_eq!(format_price(8_500_000.0), "₹ 85.00 L");
    }

    #[test]
    fn test_metric_formats() {
        assert_eq!(format_lakhs(8_550_000.0), "₹ 85.5 L");
        assert_eq!(format_rupees(8_500.5), "₹ 8500");
    }

    #[test]
    fn test_price_ticks() {
        let ticks = price_ticks(20_000_000.0);
        let labels: Vec<_> = ticks.iter().map(|(_, l)| l.as_str()).collect();
        assert_eq!(
            labels,
            vec!["₹ 0 L", "₹ 40 L", "₹ 80 L", "₹ 1.2 Cr", "₹ 1.6 Cr", "₹ 2.0 Cr"]
        );
        assert_eq!(ticks[5].0, 20_000_000.0);
    }
}
