//! # Quantity Display Module
//!
//! One formatting rule for every scaled or consolidated quantity that ends up
//! in a document.

use crate::catering_errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How non-integer quantities are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuantityPrecision {
    /// Whole numbers without decimals, anything else in the shortest
    /// representation that round-trips (e.g. `0.30000000000000004`)
    #[default]
    Raw,
    /// Round to the given number of decimal places, trailing zeros trimmed
    Fixed(u8),
}

impl FromStr for QuantityPrecision {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim().to_lowercase();
        if trimmed == "raw" {
            return Ok(QuantityPrecision::Raw);
        }
        trimmed
            .strip_prefix("fixed:")
            .and_then(|places| places.parse::<u8>().ok())
            .filter(|places| *places <= 12)
            .map(QuantityPrecision::Fixed)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "quantity precision".to_string(),
                value: value.to_string(),
            })
    }
}

/// Format a quantity for display
///
/// # Examples
///
/// ```rust
/// use catering_companion::quantity_display::{format_quantity, QuantityPrecision};
///
/// assert_eq!(format_quantity(500.0, QuantityPrecision::Raw), "500");
/// assert_eq!(format_quantity(1.5, QuantityPrecision::Raw), "1.5");
/// assert_eq!(format_quantity(2.0 / 3.0, QuantityPrecision::Fixed(2)), "0.67");
/// ```
pub fn format_quantity(value: f64, precision: QuantityPrecision) -> String {
    match precision {
        QuantityPrecision::Raw => {
            if is_whole(value) {
                format!("{}", value.trunc() as i64)
            } else {
                format!("{value}")
            }
        }
        QuantityPrecision::Fixed(places) => {
            let rounded = format!("{:.*}", usize::from(places), value);
            let trimmed = if rounded.contains('.') {
                rounded.trim_end_matches('0').trim_end_matches('.')
            } else {
                rounded.as_str()
            };
            // "-0" after rounding a tiny negative value
            if trimmed == "-0" {
                "0".to_string()
            } else {
                trimmed.to_string()
            }
        }
    }
}

fn is_whole(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_integers_have_no_decimals() {
        assert_eq!(format_quantity(12000.0, QuantityPrecision::Raw), "12000");
        assert_eq!(format_quantity(0.0, QuantityPrecision::Raw), "0");
    }

    #[test]
    fn test_raw_keeps_native_representation() {
        assert_eq!(format_quantity(0.1 + 0.2, QuantityPrecision::Raw), "0.30000000000000004");
        assert_eq!(format_quantity(2.5, QuantityPrecision::Raw), "2.5");
        assert_eq!(format_quantity(10.0 / 3.0, QuantityPrecision::Raw), "3.3333333333333335");
    }

    #[test]
    fn test_fixed_rounds_and_trims() {
        assert_eq!(format_quantity(10.0 / 3.0, QuantityPrecision::Fixed(2)), "3.33");
        assert_eq!(format_quantity(2.5, QuantityPrecision::Fixed(2)), "2.5");
        assert_eq!(format_quantity(4.0, QuantityPrecision::Fixed(2)), "4");
        assert_eq!(format_quantity(0.1 + 0.2, QuantityPrecision::Fixed(2)), "0.3");
        assert_eq!(format_quantity(7.6, QuantityPrecision::Fixed(0)), "8");
    }

    #[test]
    fn test_precision_from_str() {
        assert_eq!("raw".parse::<QuantityPrecision>(), Ok(QuantityPrecision::Raw));
        assert_eq!("fixed:2".parse::<QuantityPrecision>(), Ok(QuantityPrecision::Fixed(2)));
        assert!("fixed:".parse::<QuantityPrecision>().is_err());
        assert!("rounded".parse::<QuantityPrecision>().is_err());
    }
}
