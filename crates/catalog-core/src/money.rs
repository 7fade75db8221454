//! Price display helpers.
//!
//! Prices in the catalog are integers in the smallest currency unit, so no
//! floating-point value is ever stored; floats appear only when computing
//! discount ratios.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported display currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    JPY,
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Get the currency code (e.g., "JPY").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::JPY => "JPY",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    /// Get the currency symbol (e.g., "¥").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::JPY => "\u{00a5}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
        }
    }

    /// Number of decimal places in the smallest unit.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "JPY" => Some(Currency::JPY),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// An amount in the smallest unit of a currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    pub amount: u64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount: u64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Format with symbol and thousands separators (e.g., "¥12,800", "$49.99").
    pub fn display(&self) -> String {
        let places = self.currency.decimal_places();
        let divisor = 10_u64.pow(places);
        let whole = group_thousands(self.amount / divisor);

        if places == 0 {
            format!("{}{}", self.currency.symbol(), whole)
        } else {
            let frac = self.amount % divisor;
            format!(
                "{}{}.{:0width$}",
                self.currency.symbol(),
                whole,
                frac,
                width = places as usize
            )
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Format a catalog price for display.
pub fn format_price(amount: u64, currency: Currency) -> String {
    Money::new(amount, currency).display()
}

/// Discount off the original price as a rounded whole percentage.
///
/// Returns 0 when there is no original price or it does not exceed `price`.
pub fn discount_percentage(price: u64, original_price: Option<u64>) -> u32 {
    match original_price {
        Some(original) if original > price => {
            let ratio = (original - price) as f64 / original as f64;
            (ratio * 100.0).round() as u32
        }
        _ => 0,
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_yen() {
        assert_eq!(format_price(0, Currency::JPY), "\u{00a5}0");
        assert_eq!(format_price(980, Currency::JPY), "\u{00a5}980");
        assert_eq!(format_price(12800, Currency::JPY), "\u{00a5}12,800");
        assert_eq!(format_price(1234567, Currency::JPY), "\u{00a5}1,234,567");
    }

    #[test]
    fn test_format_with_decimals() {
        assert_eq!(format_price(4999, Currency::USD), "$49.99");
        assert_eq!(format_price(123456705, Currency::USD), "$1,234,567.05");
    }

    #[test]
    fn test_discount_percentage() {
        assert_eq!(discount_percentage(100, Some(200)), 50);
        assert_eq!(discount_percentage(90, Some(100)), 10);
        assert_eq!(discount_percentage(2980, Some(3980)), 25);
        assert_eq!(discount_percentage(100, Some(100)), 0);
        assert_eq!(discount_percentage(100, Some(50)), 0);
        assert_eq!(discount_percentage(100, None), 0);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("jpy"), Some(Currency::JPY));
        assert_eq!(Currency::from_code("XYZ"), None);
    }
}
