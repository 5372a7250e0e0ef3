//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are captured from product attributes when an item is added and
//! never recomputed afterwards. They serialize as plain JSON numbers, which
//! is what the storefront's stored carts have always contained.
//!
//! Amounts are kept in whole cents and capped at [`MAX_PRICE`], so every
//! price survives the trip through an `f64` unchanged and no line total can
//! overflow.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors that can occur when parsing a [`Price`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("price is not a number: {0}")]
    Invalid(String),
    /// The amount is zero or negative.
    #[error("price must be positive (got {0})")]
    NotPositive(Decimal),
    /// The amount is above [`MAX_PRICE`].
    #[error("price is too large (got {0})")]
    TooLarge(Decimal),
}

/// Largest accepted unit price (one trillion).
pub const MAX_PRICE: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Decimal places kept on every price.
const CENTS_DP: u32 = 2;

/// A positive unit price in the store's currency.
///
/// ## Examples
///
/// ```
/// use tranquil_trails_core::Price;
///
/// assert!(Price::parse("499.00").is_ok());
/// assert!(Price::parse(" 12.5 ").is_ok());
///
/// assert!(Price::parse("").is_err());    // empty
/// assert!(Price::parse("abc").is_err()); // not a number
/// assert!(Price::parse("0").is_err());   // not positive
///
/// // Sub-cent amounts round half away from zero.
/// assert_eq!(Price::parse("0.005").unwrap().to_string(), "0.01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Create a price from a decimal amount, rounded to whole cents.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotPositive`] if the rounded amount is zero or
    /// negative, or [`PriceError::TooLarge`] if it exceeds [`MAX_PRICE`].
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        let cents = amount.round_dp_with_strategy(CENTS_DP, RoundingStrategy::MidpointAwayFromZero);
        if cents <= Decimal::ZERO {
            return Err(PriceError::NotPositive(amount));
        }
        if cents > MAX_PRICE {
            return Err(PriceError::TooLarge(amount));
        }
        Ok(Self(cents))
    }

    /// Parse a price from an attribute value such as `"499.00"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, not a decimal number, or not
    /// positive.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }
        let amount = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| PriceError::Invalid(trimmed.to_owned()))?;
        Self::new(amount)
    }

    /// The unit amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The amount for `quantity` units, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Decimal {
        self.0
            .checked_mul(Decimal::from(quantity))
            .unwrap_or(Decimal::MAX)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_amount(self.0))
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Format an amount with exactly two decimal places (`998` -> `"998.00"`).
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
    INR,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
            Self::INR => "₹",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
            Self::INR => "INR",
        }
    }

    /// Format an amount for display (e.g. `"$19.99"`).
    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        format!("{}{}", self.symbol(), format_amount(amount))
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            "INR" => Ok(Self::INR),
            other => Err(format!("unsupported currency: {other}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(Price::parse("499").unwrap().amount(), Decimal::new(499, 0));
        assert_eq!(Price::parse("19.99").unwrap().amount(), Decimal::new(1999, 2));
        assert_eq!(Price::parse("1e2").unwrap().amount(), Decimal::new(100, 0));
    }

    #[test]
    fn test_parse_rejects() {
        assert_eq!(Price::parse("  "), Err(PriceError::Empty));
        assert!(matches!(Price::parse("12abc"), Err(PriceError::Invalid(_))));
        assert!(matches!(Price::parse("0"), Err(PriceError::NotPositive(_))));
        assert!(matches!(Price::parse("-3.50"), Err(PriceError::NotPositive(_))));
        assert!(matches!(Price::parse("0.004"), Err(PriceError::NotPositive(_))));
        assert!(matches!(
            Price::parse("50000000000000000000000000000"),
            Err(PriceError::TooLarge(_))
        ));
        assert!(matches!(Price::parse("1e25"), Err(PriceError::TooLarge(_))));
    }

    #[test]
    fn test_parse_rounds_to_cents() {
        let long = Price::parse("19.123456789012345678").unwrap();
        assert_eq!(long.amount(), Decimal::new(1912, 2));
        assert_eq!(long.amount().scale(), 2);

        assert_eq!(Price::parse("0.005").unwrap().amount(), Decimal::new(1, 2));
        assert_eq!(Price::parse("2.675").unwrap().to_string(), "2.68");
        assert_eq!(Price::parse("1000000000000").unwrap().amount(), MAX_PRICE);
        assert!(Price::parse("1000000000000.01").is_err());
    }

    #[test]
    fn test_json_round_trip_keeps_cents() {
        for raw in ["19.123456789012345678", "0.005", "999999999999.99", "0.01"] {
            let price = Price::parse(raw).unwrap();
            let json = serde_json::to_string(&price).unwrap();
            let back: Price = serde_json::from_str(&json).unwrap();
            assert_eq!(back, price, "{raw} reloaded as {json}");
        }
    }

    #[test]
    fn test_deserialize_validates() {
        assert!(serde_json::from_str::<Price>("0").is_err());
        assert!(serde_json::from_str::<Price>("1e25").is_err());
        let rounded: Price = serde_json::from_str("4.499").unwrap();
        assert_eq!(rounded.amount(), Decimal::new(450, 2));
    }

    #[test]
    fn test_times() {
        let price = Price::parse("499.0").unwrap();
        assert_eq!(format_amount(price.times(2)), "998.00");

        let top = Price::new(MAX_PRICE).unwrap();
        assert_eq!(
            top.times(u32::MAX),
            MAX_PRICE * Decimal::from(u32::MAX)
        );
    }

    #[test]
    fn test_format_amount_pads_and_rounds() {
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
        assert_eq!(format_amount(Decimal::new(125, 1)), "12.50");
        assert_eq!(format_amount(Decimal::new(19_999, 3)), "20.00");
    }

    #[test]
    fn test_currency_format() {
        assert_eq!(CurrencyCode::USD.format(Decimal::new(1999, 2)), "$19.99");
        assert_eq!(CurrencyCode::INR.format(Decimal::new(499, 0)), "₹499.00");
        assert_eq!("gbp".parse::<CurrencyCode>().unwrap(), CurrencyCode::GBP);
        assert!("XYZ".parse::<CurrencyCode>().is_err());
    }

    #[test]
    fn test_serializes_as_number() {
        let price = Price::parse("19.99").unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "19.99");

        let parsed: Price = serde_json::from_str("499").unwrap();
        assert_eq!(parsed.amount(), Decimal::new(499, 0));
    }
}
