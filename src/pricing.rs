//! Booking price calculation.
//!
//! A package price covers up to the number of travelers named in its
//! group-size text. Every traveler beyond that adds 30% of the base price.
//! The same rule is applied to the pre-discount price so the storefront can
//! show what the customer saves.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Surcharge per extra traveler, as a fraction of the base price.
pub const EXTRA_TRAVELER_RATE: f64 = 0.3;

static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub travelers: u32,
    pub max_included: u32,
    pub extra_travelers: u32,
    pub total_price: f64,
    pub original_total: Option<f64>,
    pub savings: f64,
    pub savings_percent: f64,
}

/// Largest group the base price covers, read from text like `"2-15"`.
///
/// Takes the last number in the string; falls back to 1.
pub fn max_included_travelers(group_size: &str) -> u32 {
    NUMBER
        .find_iter(group_size)
        .last()
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(1)
}

pub fn total_price(base_price: f64, travelers: u32, max_included: u32) -> f64 {
    let extra = travelers.saturating_sub(max_included);
    (base_price + f64::from(extra) * base_price * EXTRA_TRAVELER_RATE).round()
}

pub fn quote(
    base_price: f64,
    original_price: Option<f64>,
    travelers: u32,
    group_size: &str,
) -> PriceQuote {
    let max_included = max_included_travelers(group_size);
    let total = total_price(base_price, travelers, max_included);
    let original_total = original_price.map(|p| total_price(p, travelers, max_included));

    let (savings, savings_percent) = match original_total {
        Some(orig) if orig > total => {
            let savings = orig - total;
            (savings, (savings / orig * 100.0).round())
        }
        _ => (0.0, 0.0),
    };

    PriceQuote {
        travelers,
        max_included,
        extra_travelers: travelers.saturating_sub(max_included),
        total_price: total,
        original_total,
        savings,
        savings_percent,
    }
}
