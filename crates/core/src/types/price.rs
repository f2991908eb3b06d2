//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::quantity::Quantity;

/// Narrow no-break space used by French number grouping.
const GROUP_SEPARATOR: char = '\u{202f}';

/// A price with currency information.
///
/// Catalog prices arrive from the remote service as bare numbers in the
/// shop currency (West African CFA franc); this type attaches the currency
/// so totals can be formatted consistently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Price of `quantity` units at this unit price.
    ///
    /// Saturates at the bounds of [`Decimal`]; the unit price comes from the
    /// remote catalog and is not range-checked.
    #[must_use]
    pub fn times(self, quantity: Quantity) -> Self {
        Self::new(
            self.amount.saturating_mul(Decimal::from(quantity.get())),
            self.currency_code,
        )
    }

    /// Format for display the way the storefront shows prices
    /// (`fr-FR` grouping, currency's minor units).
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use saho_core::{CurrencyCode, Price};
    ///
    /// let price = Price::new(Decimal::from(1_250_000), CurrencyCode::XOF);
    /// assert_eq!(price.display(), "1\u{202f}250\u{202f}000\u{a0}F\u{a0}CFA");
    /// ```
    #[must_use]
    pub fn display(&self) -> String {
        let scale = self.currency_code.minor_units();
        let rounded = self
            .amount
            .round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
        let text = format!("{:.*}", scale as usize, rounded.abs());
        let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

        let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
        for (i, ch) in integer.chars().enumerate() {
            if i > 0 && (integer.len() - i) % 3 == 0 {
                grouped.push(GROUP_SEPARATOR);
            }
            grouped.push(ch);
        }

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };

        if fraction.is_empty() {
            format!("{sign}{grouped}\u{a0}{}", self.currency_code.symbol())
        } else {
            format!(
                "{sign}{grouped},{fraction}\u{a0}{}",
                self.currency_code.symbol()
            )
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl Add for Price {
    type Output = Self;

    /// Adds two prices. Mixed currencies never occur in a single catalog;
    /// the left-hand currency wins. Saturates like [`Price::times`].
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.amount.saturating_add(rhs.amount), self.currency_code)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(CurrencyCode::default()), Add::add)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    /// West African CFA franc (the shop currency).
    #[default]
    XOF,
    EUR,
    USD,
}

impl CurrencyCode {
    /// Symbol used when formatting amounts.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::XOF => "F\u{a0}CFA",
            Self::EUR => "€",
            Self::USD => "$US",
        }
    }

    /// Number of decimal places shown for this currency.
    #[must_use]
    pub const fn minor_units(self) -> u32 {
        match self {
            Self::XOF => 0,
            Self::EUR | Self::USD => 2,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn xof(amount: i64) -> Price {
        Price::new(Decimal::from(amount), CurrencyCode::XOF)
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(xof(0).display(), "0\u{a0}F\u{a0}CFA");
        assert_eq!(xof(950).display(), "950\u{a0}F\u{a0}CFA");
        assert_eq!(xof(45_000).display(), "45\u{202f}000\u{a0}F\u{a0}CFA");
    }

    #[test]
    fn test_display_rounds_to_minor_units() {
        let price = Price::new(Decimal::new(19_995, 1), CurrencyCode::XOF);
        assert_eq!(price.display(), "2\u{202f}000\u{a0}F\u{a0}CFA");

        let price = Price::new(Decimal::new(123_456, 2), CurrencyCode::EUR);
        assert_eq!(price.display(), "1\u{202f}234,56\u{a0}€");
    }

    #[test]
    fn test_times_and_sum() {
        let unit = xof(12_500);
        let line = unit.times(Quantity::new(3).unwrap());
        assert_eq!(line, xof(37_500));

        let total: Price = vec![xof(100), xof(250)].into_iter().sum();
        assert_eq!(total, xof(350));
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let unit = Price::new(
            Decimal::from_i128_with_scale(5 * 10_i128.pow(28), 0),
            CurrencyCode::XOF,
        );
        let line = unit.times(Quantity::new(3).unwrap());
        assert_eq!(line.amount, Decimal::MAX);

        let total: Price = vec![line, xof(1)].into_iter().sum();
        assert_eq!(total.amount, Decimal::MAX);

        let refund = Price::new(Decimal::MIN, CurrencyCode::XOF) + xof(-1);
        assert_eq!(refund.amount, Decimal::MIN);
    }
}
