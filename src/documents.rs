//! # Documents Module
//!
//! Backend-neutral models of the two printable documents. Each is an ordered
//! list of titled sections holding the text lines to print, so a renderer never
//! needs to redo any aggregation.

use crate::localization::{t_args_lang, t_lang};
use crate::planner::CateringPlan;
use crate::quantity_display::{format_quantity, QuantityPrecision};
use serde::{Deserialize, Serialize};

/// A titled block of lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSection {
    pub title: String,
    pub lines: Vec<String>,
}

/// Checkbox shopping list, one section per category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListDocument {
    pub title: String,
    pub sections: Vec<DocumentSection>,
}

/// One recipe page of the guide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeGuidePage {
    pub title: String,
    pub servings_note: String,
    pub ingredients_heading: String,
    pub ingredients: Vec<String>,
    pub method_heading: String,
    pub method: String,
}

/// Per-recipe guide with unit-consolidated ingredients and method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeGuideDocument {
    pub title: String,
    pub pages: Vec<RecipeGuidePage>,
}

/// Build a `"{qty} {unit} {ingredient}"` line
pub fn quantity_line(
    quantity: f64,
    unit: &str,
    ingredient: &str,
    precision: QuantityPrecision,
) -> String {
    format!("{} {} {}", format_quantity(quantity, precision), unit, ingredient)
}

impl ShoppingListDocument {
    pub fn from_plan(plan: &CateringPlan, precision: QuantityPrecision, language: &str) -> Self {
        let sections = plan
            .shopping_list
            .iter()
            .map(|section| DocumentSection {
                title: t_args_lang(
                    "shopping-section-title",
                    &[("category", section.category.as_str())],
                    language,
                ),
                lines: section
                    .lines
                    .iter()
                    .map(|line| {
                        quantity_line(line.total_quantity, &line.unit, &line.ingredient, precision)
                    })
                    .collect(),
            })
            .collect();

        Self {
            title: t_lang("shopping-list-title", language),
            sections,
        }
    }
}

impl RecipeGuideDocument {
    pub fn from_plan(plan: &CateringPlan, precision: QuantityPrecision, language: &str) -> Self {
        let pages = plan
            .recipe_guides
            .iter()
            .map(|guide| {
                let guests = guide.guest_count.to_string();
                let base = guide.base_servings.to_string();
                RecipeGuidePage {
                    title: guide.recipe_name.clone(),
                    servings_note: t_args_lang(
                        "recipe-servings",
                        &[("guests", guests.as_str()), ("base", base.as_str())],
                        language,
                    ),
                    ingredients_heading: t_lang("recipe-ingredients-heading", language),
                    ingredients: guide
                        .ingredients
                        .iter()
                        .map(|item| {
                            quantity_line(item.quantity, &item.unit, &item.ingredient, precision)
                        })
                        .collect(),
                    method_heading: t_lang("recipe-method-heading", language),
                    method: guide.method.clone(),
                }
            })
            .collect();

        Self {
            title: t_lang("recipe-guide-title", language),
            pages,
        }
    }
}

/// A shopping line prepared for checkbox rendering
#[derive(Debug, Clone, PartialEq)]
pub enum ChecklistItem {
    /// Quantity, unit and item were recognised
    Checkbox {
        quantity: String,
        unit: String,
        item: String,
    },
    /// The line could not be split; print it as-is without a checkbox
    Raw(String),
}

impl ChecklistItem {
    /// Split a `"{qty} {unit} {item}"` line
    ///
    /// The first two spaces separate the parts. A quantity that is not a
    /// finite number, or a missing item, makes the line fall back to raw text.
    pub fn parse(line: &str, precision: QuantityPrecision) -> Self {
        let trimmed = line.trim();
        let mut parts = trimmed.splitn(3, ' ');

        let (Some(quantity), Some(unit), Some(item)) = (parts.next(), parts.next(), parts.next())
        else {
            return ChecklistItem::Raw(trimmed.to_string());
        };

        match quantity.parse::<f64>() {
            Ok(value) if value.is_finite() => ChecklistItem::Checkbox {
                quantity: format_quantity(value, precision),
                unit: unit.to_string(),
                item: item.to_string(),
            },
            _ => ChecklistItem::Raw(trimmed.to_string()),
        }
    }

    /// Text of the line without any checkbox decoration
    pub fn text(&self) -> String {
        match self {
            ChecklistItem::Checkbox { quantity, unit, item } => format!("{quantity} {unit} {item}"),
            ChecklistItem::Raw(text) => text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_line_formatting() {
        assert_eq!(quantity_line(500.0, "g", "Flour", QuantityPrecision::Raw), "500 g Flour");
        assert_eq!(quantity_line(2.5, "kg", "Beef", QuantityPrecision::Raw), "2.5 kg Beef");
    }

    #[test]
    fn test_parse_structured_line() {
        let item = ChecklistItem::parse("500 g Plain Flour", QuantityPrecision::Raw);
        assert_eq!(
            item,
            ChecklistItem::Checkbox {
                quantity: "500".to_string(),
                unit: "g".to_string(),
                item: "Plain Flour".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_normalizes_integer_quantities() {
        let item = ChecklistItem::parse("12.0 pcs Eggs", QuantityPrecision::Raw);
        assert_eq!(item.text(), "12 pcs Eggs");
    }

    #[test]
    fn test_unparseable_quantity_falls_back_to_raw() {
        let item = ChecklistItem::parse("some salt to taste", QuantityPrecision::Raw);
        assert_eq!(item, ChecklistItem::Raw("some salt to taste".to_string()));
    }

    #[test]
    fn test_short_line_falls_back_to_raw() {
        assert_eq!(
            ChecklistItem::parse("  3 lemons ", QuantityPrecision::Raw),
            ChecklistItem::Raw("3 lemons".to_string())
        );
        assert_eq!(
            ChecklistItem::parse("NaN g Mystery", QuantityPrecision::Raw),
            ChecklistItem::Raw("NaN g Mystery".to_string())
        );
    }
}
