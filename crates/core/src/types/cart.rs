//! Cart line arithmetic.
//!
//! Pure price computation over cart contents: per-line totals and the
//! aggregate subtotal/item count a cart view is built from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::VariantId;
use super::price::{CurrencyCode, Price};

/// A single merchandise line in a cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// The product variant this line holds.
    pub variant_id: VariantId,
    /// Number of units.
    pub quantity: u32,
    /// Price per unit.
    pub unit_price: Price,
}

impl CartLine {
    /// Total for this line (`quantity * unit_price`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price.amount() * Decimal::from(self.quantity)
    }
}

/// Aggregate totals for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    /// Total number of units across all lines.
    pub item_count: u32,
    /// Sum of all line totals.
    pub subtotal: Price,
}

impl CartTotals {
    /// Compute totals over cart lines.
    ///
    /// Carts are single-currency upstream; the first line's currency is
    /// used for the subtotal (USD for an empty cart).
    #[must_use]
    pub fn compute(lines: &[CartLine]) -> Self {
        let item_count = lines.iter().map(|line| line.quantity).sum();
        let subtotal: Decimal = lines.iter().map(CartLine::line_total).sum();
        let currency = lines
            .first()
            .map_or_else(CurrencyCode::default, |line| line.unit_price.currency());

        Self {
            item_count,
            subtotal: Price::new(subtotal, currency),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(variant: i32, quantity: u32, cents: i64) -> CartLine {
        CartLine {
            variant_id: VariantId::new(variant),
            quantity,
            unit_price: Price::from_cents(cents, CurrencyCode::USD),
        }
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line(1, 3, 1250).line_total(), Decimal::new(3750, 2));
    }

    #[test]
    fn test_totals_over_mixed_quantities() {
        let lines = vec![line(1, 2, 8999), line(2, 1, 4500)];
        let totals = CartTotals::compute(&lines);
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.subtotal.display(), "$224.98");
    }

    #[test]
    fn test_totals_empty_cart() {
        let totals = CartTotals::compute(&[]);
        assert_eq!(totals.item_count, 0);
        assert_eq!(totals.subtotal.display(), "$0.00");
    }
}
