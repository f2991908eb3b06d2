//! Cart line quantity.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Quantity`] strictly.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityError {
    /// The value is below one.
    #[error("quantity must be at least 1 (got {0})")]
    BelowOne(i64),
    /// The value does not fit the supported range.
    #[error("quantity {0} is too large")]
    TooLarge(i64),
}

/// A line item quantity, always at least one.
///
/// The storefront never persists or displays a quantity below one. Use
/// [`Quantity::clamped`] for user input (spinner buttons, typed numbers) and
/// [`Quantity::new`] when a bad value should be rejected instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A quantity of one.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Build a quantity, rejecting values below one.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::BelowOne`] for zero or negative input and
    /// [`QuantityError::TooLarge`] above `u32::MAX`.
    pub fn new(value: i64) -> Result<Self, QuantityError> {
        if value < 1 {
            return Err(QuantityError::BelowOne(value));
        }
        u32::try_from(value)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(QuantityError::TooLarge(value))
    }

    /// Build a quantity, clamping into `1..=u32::MAX`.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        let bounded = value.clamp(1, i64::from(u32::MAX));
        u32::try_from(bounded)
            .ok()
            .and_then(NonZeroU32::new)
            .map_or(Self::ONE, Self)
    }

    /// The underlying count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// One more, saturating at the maximum.
    #[must_use]
    pub const fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// One less, never going below one.
    #[must_use]
    pub fn decremented(self) -> Self {
        Self::clamped(i64::from(self.get()) - 1)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_below_one() {
        assert_eq!(Quantity::new(0), Err(QuantityError::BelowOne(0)));
        assert_eq!(Quantity::new(-3), Err(QuantityError::BelowOne(-3)));
        assert_eq!(Quantity::new(4).unwrap().get(), 4);
    }

    #[test]
    fn test_clamped() {
        assert_eq!(Quantity::clamped(0), Quantity::ONE);
        assert_eq!(Quantity::clamped(-10), Quantity::ONE);
        assert_eq!(Quantity::clamped(7).get(), 7);
        assert_eq!(Quantity::clamped(i64::MAX).get(), u32::MAX);
    }

    #[test]
    fn test_increment_decrement() {
        assert_eq!(Quantity::ONE.incremented().get(), 2);
        assert_eq!(Quantity::ONE.decremented(), Quantity::ONE);
        assert_eq!(Quantity::clamped(5).decremented().get(), 4);
    }

    #[test]
    fn test_serde_rejects_zero() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert_eq!(serde_json::from_str::<Quantity>("3").unwrap().get(), 3);
        assert_eq!(serde_json::to_string(&Quantity::ONE).unwrap(), "1");
    }
}
