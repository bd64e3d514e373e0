//! Cart totals. Prices are whole currency units; shipping is a flat base plus a
//! percentage of every line, rounded once at the end.

use crate::config::CartLimits;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: u64,
    pub shipping: u64,
    pub total: u64,
}

/// A priced cart line: unit price and quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    pub price: u64,
    pub quantity: u32,
}

pub fn total_price(lines: &[PricedLine]) -> u64 {
    lines
        .iter()
        .map(|line| line.price.saturating_mul(u64::from(line.quantity)))
        .fold(0, u64::saturating_add)
}

pub fn shipping_cost(lines: &[PricedLine], limits: &CartLimits) -> u64 {
    let surcharge: f64 = lines
        .iter()
        .map(|line| limits.shipping_rate * line.price as f64 * f64::from(line.quantity))
        .sum();
    limits.shipping_base + surcharge.round() as u64
}

pub fn totals(lines: &[PricedLine], limits: &CartLimits) -> CartTotals {
    let subtotal = total_price(lines);
    let shipping = shipping_cost(lines, limits);
    CartTotals {
        subtotal,
        shipping,
        total: subtotal.saturating_add(shipping),
    }
}
