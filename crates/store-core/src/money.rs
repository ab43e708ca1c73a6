//! # Money Module
//!
//! `Money` holds an amount in cents. `DiscountRate` holds a discount in basis
//! points. Order amounts are computed from these two alone:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product.price_cents ── × quantity ──► subtotal                        │
//! │                                           │                             │
//! │                    Discount.value_bps ──► │ percentage (i128, half up)  │
//! │                                           ▼                             │
//! │                               subtotal − off ──► Order.amount_cents     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No floating point is involved anywhere; the only rounding step is the
//! percentage, rounded once, half up, to the cent.
//!
//! ```rust
//! use store_core::money::{DiscountRate, Money};
//!
//! let subtotal = Money::from_cents(1099).checked_multiply_quantity(3).unwrap(); // $32.97
//! let charged = subtotal.apply_discount(DiscountRate::from_bps(1000));
//! assert_eq!(charged.cents(), 2967);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use ts_rs::TS;

/// Amount in the smallest currency unit.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole dollars, truncated toward zero.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// The 0..=99 cents after the dollars.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Unit price times quantity, `None` if the product leaves `i64`.
    #[inline]
    pub const fn checked_multiply_quantity(&self, quantity: i64) -> Option<Self> {
        match self.0.checked_mul(quantity) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// `rate` of this amount, rounded half up to the cent.
    ///
    /// `(cents × bps + 5000) / 10000`, computed in i128.
    pub fn percentage(&self, rate: DiscountRate) -> Money {
        let off = (self.0 as i128 * rate.bps() as i128 + 5000) / 10_000;
        Money(off as i64)
    }

    /// This amount minus `rate` of it.
    pub fn apply_discount(&self, rate: DiscountRate) -> Money {
        *self - self.percentage(rate)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount in basis points: 1 bp = 0.01 %, 1000 bps = 10 %.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// 100 %.
    pub const MAX_BPS: u32 = 10_000;

    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Builds a rate from a stored value, clamping it into 0..=100 %.
    pub fn clamped(bps: i64) -> Self {
        DiscountRate(bps.clamp(0, Self::MAX_BPS as i64) as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(DiscountRate::from_bps(1250).to_string(), "12.50%");
    }

    #[test]
    fn test_subtotal() {
        let subtotal = Money::from_cents(299).checked_multiply_quantity(3).unwrap();
        assert_eq!(subtotal.cents(), 897);
        assert_eq!((subtotal - Money::from_cents(97)).cents(), 800);
        assert_eq!((subtotal + Money::from_cents(3)).cents(), 900);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 25% of 10 cents is 2.5 cents
        let amount = Money::from_cents(10);
        assert_eq!(amount.percentage(DiscountRate::from_bps(2500)).cents(), 3);

        // 12.5% of $10.00 is exact
        let amount = Money::from_cents(1000);
        assert_eq!(amount.percentage(DiscountRate::from_bps(1250)).cents(), 125);

        // 10% of 4 cents is 0.4 cents
        let amount = Money::from_cents(4);
        assert_eq!(amount.percentage(DiscountRate::from_bps(1000)).cents(), 0);
    }

    #[test]
    fn test_apply_discount_bounds() {
        let subtotal = Money::from_cents(10_000);
        assert_eq!(subtotal.apply_discount(DiscountRate::default()), subtotal);
        assert_eq!(
            subtotal.apply_discount(DiscountRate::from_bps(DiscountRate::MAX_BPS)),
            Money::default()
        );
    }

    #[test]
    fn test_multiply_overflow_is_none() {
        let price = Money::from_cents(100);
        assert!(price.checked_multiply_quantity(100_000_000_000_000_000).is_none());
        assert!(Money::from_cents(-1).checked_multiply_quantity(i64::MAX).is_some());
    }

    #[test]
    fn test_percentage_on_large_amounts() {
        let huge = Money::from_cents(i64::MAX / 2);
        assert!(huge.percentage(DiscountRate::from_bps(5000)).cents() > 0);
    }

    #[test]
    fn test_clamped() {
        assert_eq!(DiscountRate::clamped(-20).bps(), 0);
        assert_eq!(DiscountRate::clamped(1500).bps(), 1500);
        assert_eq!(DiscountRate::clamped(25_000).bps(), DiscountRate::MAX_BPS);
    }
}
