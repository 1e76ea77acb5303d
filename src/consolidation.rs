//! # List Consolidator
//!
//! Merges scaled ingredient lines from every matched recipe into one shopping
//! list. Lines merge only when ingredient, unit and category are all equal
//! (case-sensitive), so 500 g of flour and 4 cups of flour stay separate.
//!
//! Sections come out in ascending category order; lines inside a section are
//! sorted by ingredient, ignoring case.

use crate::scaling::ScaledIngredientLine;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// A summed shopping list line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedLine {
    pub ingredient: String,
    pub unit: String,
    pub category: String,
    pub total_quantity: f64,
}

/// All consolidated lines of one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingSection {
    pub category: String,
    pub lines: Vec<ConsolidatedLine>,
}

impl ShoppingSection {
    /// Look up a line by ingredient and unit
    pub fn line(&self, ingredient: &str, unit: &str) -> Option<&ConsolidatedLine> {
        self.lines
            .iter()
            .find(|line| line.ingredient == ingredient && line.unit == unit)
    }
}

/// Sum quantities that share ingredient, unit and category
///
/// Output keeps the order in which each key first appeared. Each key's
/// contributions are summed in ascending order, so the total does not depend
/// on the order the recipes came in.
pub fn merge_lines(lines: &[ScaledIngredientLine]) -> Vec<ConsolidatedLine> {
    let mut merged: Vec<(ConsolidatedLine, Vec<f64>)> = Vec::new();
    let mut positions: HashMap<(&str, &str, &str), usize> = HashMap::new();

    for line in lines {
        let key = (
            line.ingredient.as_str(),
            line.unit.as_str(),
            line.category.as_str(),
        );
        match positions.get(&key) {
            Some(&index) => merged[index].1.push(line.scaled_quantity),
            None => {
                positions.insert(key, merged.len());
                merged.push((
                    ConsolidatedLine {
                        ingredient: line.ingredient.clone(),
                        unit: line.unit.clone(),
                        category: line.category.clone(),
                        total_quantity: 0.0,
                    },
                    vec![line.scaled_quantity],
                ));
            }
        }
    }

    let merged: Vec<ConsolidatedLine> = merged
        .into_iter()
        .map(|(mut consolidated, mut quantities)| {
            quantities.sort_by(f64::total_cmp);
            consolidated.total_quantity = quantities.iter().sum();
            consolidated
        })
        .collect();

    debug!(input = lines.len(), merged = merged.len(), "Merged scaled lines");
    merged
}

/// Merge scaled lines and group them into shopping sections
///
/// # Examples
///
/// ```rust
/// use catering_companion::consolidation::consolidate;
/// use catering_companion::scaling::ScaledIngredientLine;
///
/// let flour = |qty: f64| ScaledIngredientLine {
///     ingredient: "Flour".to_string(),
///     unit: "g".to_string(),
///     category: "Dry Goods".to_string(),
///     scaled_quantity: qty,
/// };
///
/// let sections = consolidate(&[flour(200.0), flour(300.0)]);
/// assert_eq!(sections.len(), 1);
/// assert_eq!(sections[0].lines[0].total_quantity, 500.0);
/// ```
pub fn consolidate(lines: &[ScaledIngredientLine]) -> Vec<ShoppingSection> {
    let mut by_category: BTreeMap<String, Vec<ConsolidatedLine>> = BTreeMap::new();
    for line in merge_lines(lines) {
        by_category
            .entry(line.category.clone())
            .or_default()
            .push(line);
    }

    by_category
        .into_iter()
        .map(|(category, mut lines)| {
            lines.sort_by(|a, b| {
                a.ingredient
                    .to_lowercase()
                    .cmp(&b.ingredient.to_lowercase())
                    .then_with(|| a.ingredient.cmp(&b.ingredient))
                    .then_with(|| a.unit.cmp(&b.unit))
            });
            ShoppingSection { category, lines }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(ingredient: &str, unit: &str, category: &str, qty: f64) -> ScaledIngredientLine {
        ScaledIngredientLine {
            ingredient: ingredient.to_string(),
            unit: unit.to_string(),
            category: category.to_string(),
            scaled_quantity: qty,
        }
    }

    #[test]
    fn test_same_key_lines_are_summed() {
        let sections = consolidate(&[
            line("Flour", "g", "Dry Goods", 200.0),
            line("Flour", "g", "Dry Goods", 300.0),
        ]);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].category, "Dry Goods");
        assert_eq!(sections[0].lines.len(), 1);
        assert_eq!(sections[0].line("Flour", "g").unwrap().total_quantity, 500.0);
    }

    #[test]
    fn test_different_units_never_merge() {
        let sections = consolidate(&[
            line("Cheese", "g", "Dairy", 200.0),
            line("Cheese", "oz", "Dairy", 8.0),
        ]);
        assert_eq!(sections[0].lines.len(), 2);
        assert_eq!(sections[0].lines[0].unit, "g");
        assert_eq!(sections[0].lines[1].unit, "oz");
    }

    #[test]
    fn test_key_comparison_is_case_sensitive() {
        let merged = merge_lines(&[
            line("flour", "g", "Dry Goods", 1.0),
            line("Flour", "g", "Dry Goods", 1.0),
            line("Flour", "G", "Dry Goods", 1.0),
        ]);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_same_ingredient_in_two_categories_stays_apart() {
        let sections = consolidate(&[
            line("Butter", "g", "Dairy", 100.0),
            line("Butter", "g", "Bakery", 50.0),
        ]);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].category, "Bakery");
        assert_eq!(sections[1].category, "Dairy");
    }

    #[test]
    fn test_sections_sorted_and_lines_sorted_case_insensitively() {
        let sections = consolidate(&[
            line("tomatoes", "pcs", "Produce", 4.0),
            line("Salt", "g", "Dry Goods", 10.0),
            line("Basil", "bunch", "Produce", 1.0),
            line("apples", "pcs", "Produce", 6.0),
        ]);

        let categories: Vec<&str> = sections.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(categories, vec!["Dry Goods", "Produce"]);

        let produce: Vec<&str> = sections[1]
            .lines
            .iter()
            .map(|l| l.ingredient.as_str())
            .collect();
        assert_eq!(produce, vec!["apples", "Basil", "tomatoes"]);
    }

    #[test]
    fn test_merge_keeps_first_appearance_order() {
        let merged = merge_lines(&[
            line("Onion", "pcs", "Produce", 1.0),
            line("Beef", "g", "Meat", 100.0),
            line("Onion", "pcs", "Produce", 2.0),
        ]);
        assert_eq!(merged[0].ingredient, "Onion");
        assert_eq!(merged[0].total_quantity, 3.0);
        assert_eq!(merged[1].ingredient, "Beef");
    }

    #[test]
    fn test_three_way_total_independent_of_order() {
        let forward = [
            line("Oil", "l", "Pantry", 0.1),
            line("Oil", "l", "Pantry", 0.2),
            line("Oil", "l", "Pantry", 0.3),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let forward_total = consolidate(&forward)[0].lines[0].total_quantity;
        let reversed_total = consolidate(&reversed)[0].lines[0].total_quantity;
        assert_eq!(forward_total, reversed_total);
    }

    #[test]
    fn test_empty_input_gives_no_sections() {
        assert!(consolidate(&[]).is_empty());
    }
}
