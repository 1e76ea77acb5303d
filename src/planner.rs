//! # Catering Planner
//!
//! Runs a request through the whole pipeline: match recipes, scale each one,
//! consolidate the shopping list and prepare a guide per recipe.
//!
//! ```rust
//! use catering_companion::catalog::Catalog;
//! use catering_companion::planner::CateringPlanner;
//!
//! let csv = "RecipeName,Ingredient,Unit,Category,Quantity,BaseServings,Method\n\
//!            Meatballs,Beef,g,Meat,2000,50,Roll and bake\n";
//! let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();
//!
//! let plan = CateringPlanner::default()
//!     .plan(&catalog, "Meatballs for 300 people")
//!     .unwrap();
//! assert_eq!(plan.guest_count, 300);
//! assert_eq!(plan.shopping_list[0].lines[0].total_quantity, 12000.0);
//! ```

use crate::catalog::Catalog;
use crate::catering_errors::PlanError;
use crate::consolidation::{consolidate, ShoppingSection};
use crate::recipe_matcher::RecipeMatcher;
use crate::scaling::{scale_recipe, ScaledIngredientLine};
use crate::unit_consolidation::consolidate_unit;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// An ingredient as shown in a recipe guide, after unit consolidation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideIngredient {
    pub ingredient: String,
    pub quantity: f64,
    pub unit: String,
}

/// Scaled ingredients and method of one recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeGuide {
    pub recipe_name: String,
    pub base_servings: u32,
    pub guest_count: u32,
    /// Sorted by ingredient, ignoring case
    pub ingredients: Vec<GuideIngredient>,
    pub method: String,
}

/// Everything needed to print the shopping list and the recipe guides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CateringPlan {
    pub request: String,
    pub guest_count: u32,
    /// Matched recipes, in catalog order
    pub recipes: Vec<String>,
    pub shopping_list: Vec<ShoppingSection>,
    pub recipe_guides: Vec<RecipeGuide>,
    pub generated_at: DateTime<Utc>,
}

/// Builds plans from requests against a catalog
#[derive(Debug, Clone, Default)]
pub struct CateringPlanner {
    matcher: RecipeMatcher,
}

impl CateringPlanner {
    pub fn new(matcher: RecipeMatcher) -> Self {
        Self { matcher }
    }

    /// Turn a free-text request into a plan
    ///
    /// Fails with [`PlanError::NoMatch`] when the request names no catalog
    /// recipe; nothing else is computed in that case.
    pub fn plan(&self, catalog: &Catalog, request: &str) -> Result<CateringPlan, PlanError> {
        info!(request = %request, "Planning request");

        let known = catalog.recipe_names();
        let matched = self.matcher.match_request(request, &known)?;

        let mut combined: Vec<ScaledIngredientLine> = Vec::new();
        let mut recipe_guides = Vec::with_capacity(matched.recipes.len());

        for recipe_name in &matched.recipes {
            let rows = catalog.rows_for(recipe_name);
            let scaled = scale_recipe(&rows, matched.guest_count);
            debug!(recipe = %recipe_name, lines = scaled.len(), "Scaled recipe");

            let base_servings = rows.first().map(|row| row.base_servings).unwrap_or(1);
            let method = catalog.method_for(recipe_name).unwrap_or_default().to_string();
            recipe_guides.push(build_guide(
                recipe_name,
                base_servings,
                matched.guest_count,
                &scaled,
                method,
            ));

            combined.extend(scaled);
        }

        let shopping_list = consolidate(&combined);

        info!(
            recipes = matched.recipes.len(),
            guest_count = matched.guest_count,
            sections = shopping_list.len(),
            "Plan ready"
        );

        Ok(CateringPlan {
            request: request.to_string(),
            guest_count: matched.guest_count,
            recipes: matched.recipes,
            shopping_list,
            recipe_guides,
            generated_at: Utc::now(),
        })
    }
}

fn build_guide(
    recipe_name: &str,
    base_servings: u32,
    guest_count: u32,
    scaled: &[ScaledIngredientLine],
    method: String,
) -> RecipeGuide {
    let mut sorted: Vec<&ScaledIngredientLine> = scaled.iter().collect();
    sorted.sort_by(|a, b| {
        a.ingredient
            .to_lowercase()
            .cmp(&b.ingredient.to_lowercase())
            .then_with(|| a.ingredient.cmp(&b.ingredient))
    });

    let ingredients = sorted
        .into_iter()
        .map(|line| {
            let display = consolidate_unit(line.scaled_quantity, &line.unit);
            GuideIngredient {
                ingredient: line.ingredient.clone(),
                quantity: display.quantity,
                unit: display.unit,
            }
        })
        .collect();

    RecipeGuide {
        recipe_name: recipe_name.to_string(),
        base_servings,
        guest_count,
        ingredients,
        method,
    }
}
