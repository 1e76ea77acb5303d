//! # Unit Consolidation Module
//!
//! Collapses large amounts of small units into a bigger unit for the recipe
//! guide (2500 g becomes 2.5 kg). The shopping list is never converted.
//!
//! The conversion is a single step: 4096 tsp becomes tbsp, not gallons. When
//! a unit has several tiers, the largest threshold that the quantity reaches
//! wins, so 40 oz becomes 1.25 quarts rather than 2.5 lb.

/// One row of the conversion table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitRule {
    /// Source unit, compared case-insensitively
    pub unit: &'static str,
    /// Minimum quantity (inclusive) for the rule to apply
    pub threshold: f64,
    /// Unit the quantity is converted to
    pub target: &'static str,
    /// Amount of the source unit in one target unit
    pub divisor: f64,
}

/// Conversion table; rules of the same unit are listed by descending threshold
pub const UNIT_RULES: [UnitRule; 9] = [
    UnitRule::new("g", 1000.0, "kg", 1000.0),
    UnitRule::new("ml", 1000.0, "l", 1000.0),
    UnitRule::new("oz", 128.0, "gallons", 128.0),
    UnitRule::new("oz", 32.0, "quarts", 32.0),
    UnitRule::new("oz", 16.0, "lb", 16.0),
    UnitRule::new("cups", 4.0, "quarts", 4.0),
    UnitRule::new("cups", 2.0, "pints", 2.0),
    UnitRule::new("tbsp", 2.0, "oz", 2.0),
    UnitRule::new("tsp", 3.0, "tbsp", 3.0),
];

impl UnitRule {
    const fn new(unit: &'static str, threshold: f64, target: &'static str, divisor: f64) -> Self {
        Self {
            unit,
            threshold,
            target,
            divisor,
        }
    }
}

/// A quantity paired with the unit it should be displayed in
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayQuantity {
    pub quantity: f64,
    pub unit: String,
}

/// Convert a quantity to a larger unit when the table allows it
///
/// Quantities that match no rule come back unchanged, with the unit text
/// exactly as given.
///
/// # Examples
///
/// ```rust
/// use catering_companion::unit_consolidation::consolidate_unit;
///
/// let converted = consolidate_unit(1500.0, "g");
/// assert_eq!(converted.quantity, 1.5);
/// assert_eq!(converted.unit, "kg");
///
/// let unchanged = consolidate_unit(999.0, "g");
/// assert_eq!(unchanged.unit, "g");
/// ```
pub fn consolidate_unit(quantity: f64, unit: &str) -> DisplayQuantity {
    let unit_lower = unit.trim().to_lowercase();

    let rule = UNIT_RULES
        .iter()
        .filter(|rule| rule.unit == unit_lower && quantity >= rule.threshold)
        .max_by(|a, b| a.threshold.total_cmp(&b.threshold));

    match rule {
        Some(rule) => DisplayQuantity {
            quantity: quantity / rule.divisor,
            unit: rule.target.to_string(),
        },
        None => DisplayQuantity {
            quantity,
            unit: unit.to_string(),
        },
    }
}
