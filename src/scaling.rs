//! # Scaling Engine
//!
//! Linear scaling of a recipe's per-batch quantities to a guest count.

use crate::catalog::RecipeCatalogEntry;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An ingredient quantity scaled to the requested guest count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledIngredientLine {
    pub ingredient: String,
    pub unit: String,
    pub category: String,
    pub scaled_quantity: f64,
}

/// Ratio of requested guests to the servings a batch is calibrated for
pub fn scale_factor(guest_count: u32, base_servings: u32) -> f64 {
    f64::from(guest_count) / f64::from(base_servings)
}

/// Scale every row of one recipe, preserving row order
///
/// The factor is computed per row from that row's `base_servings`; the
/// catalog guarantees every row of a recipe carries the same value.
///
/// # Examples
///
/// ```rust
/// use catering_companion::catalog::RecipeCatalogEntry;
/// use catering_companion::scaling::scale_recipe;
///
/// let beef = RecipeCatalogEntry {
///     recipe_name: "Meatballs".to_string(),
///     ingredient: "Beef".to_string(),
///     unit: "g".to_string(),
///     category: "Meat".to_string(),
///     quantity: 2000.0,
///     base_servings: 50,
///     method: "Roll and bake".to_string(),
/// };
///
/// let scaled = scale_recipe(&[&beef], 300);
/// assert_eq!(scaled[0].scaled_quantity, 12000.0);
/// ```
pub fn scale_recipe(rows: &[&RecipeCatalogEntry], guest_count: u32) -> Vec<ScaledIngredientLine> {
    rows.iter()
        .map(|row| {
            let factor = scale_factor(guest_count, row.base_servings);
            debug!(
                recipe = %row.recipe_name,
                ingredient = %row.ingredient,
                factor,
                "Scaling ingredient"
            );
            ScaledIngredientLine {
                ingredient: row.ingredient.clone(),
                unit: row.unit.clone(),
                category: row.category.clone(),
                scaled_quantity: row.quantity * factor,
            }
        })
        .collect()
}
