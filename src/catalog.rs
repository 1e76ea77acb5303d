//! # Recipe Catalog Module
//!
//! Loads the master recipe table (one CSV row per ingredient per recipe) and
//! validates it up front so that the scaling stage never sees a zero or
//! negative serving count or a non-numeric quantity.
//!
//! ## Expected columns
//!
//! `RecipeName, Ingredient, Unit, Category, Quantity, BaseServings, Method`
//!
//! Extra columns are ignored. Column order does not matter.

use crate::catering_errors::CatalogError;
use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::{debug, info, warn};

/// Columns every catalog must provide
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "RecipeName",
    "Ingredient",
    "Unit",
    "Category",
    "Quantity",
    "BaseServings",
    "Method",
];

/// One validated catalog row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeCatalogEntry {
    /// Name of the recipe this row belongs to (e.g., "Meatballs")
    pub recipe_name: String,
    /// Ingredient name (e.g., "Flour")
    pub ingredient: String,
    /// Unit the quantity is expressed in (e.g., "g", "cups")
    pub unit: String,
    /// Shopping category (e.g., "Dry Goods", "Produce")
    pub category: String,
    /// Amount needed for one batch of `base_servings`
    pub quantity: f64,
    /// Number of guests one batch serves
    pub base_servings: u32,
    /// Preparation instructions, shared by every row of the recipe
    pub method: String,
}

/// Row shape as it appears in the file, before validation
#[derive(Debug, Deserialize)]
struct RawCatalogRow {
    #[serde(rename = "RecipeName")]
    recipe_name: String,
    #[serde(rename = "Ingredient")]
    ingredient: String,
    #[serde(rename = "Unit")]
    unit: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Quantity")]
    quantity: String,
    #[serde(rename = "BaseServings")]
    base_servings: String,
    #[serde(rename = "Method")]
    method: String,
}

/// The full recipe table, in file order
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    entries: Vec<RecipeCatalogEntry>,
}

impl Catalog {
    /// Load and validate a catalog from a CSV file
    ///
    /// A missing file is reported as [`CatalogError::NotFound`] so callers can
    /// show a dedicated message and let the user retry.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        info!(path = %path.display(), "Loading recipe catalog");

        let file = File::open(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                CatalogError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                CatalogError::Unreadable {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let catalog = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            rows = catalog.entries.len(),
            recipes = catalog.recipe_names().len(),
            "Recipe catalog loaded"
        );
        Ok(catalog)
    }

    /// Parse and validate a catalog from any CSV source
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|header| header == column) {
                return Err(CatalogError::MissingColumn(column.to_string()));
            }
        }

        let mut entries = Vec::new();
        for (index, record) in csv_reader.deserialize::<RawCatalogRow>().enumerate() {
            let row_number = index + 1;
            let raw = record?;
            entries.push(validate_row(raw, row_number)?);
        }

        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        check_recipe_consistency(&mut entries)?;

        Ok(Self { entries })
    }

    /// All rows, in file order
    pub fn entries(&self) -> &[RecipeCatalogEntry] {
        &self.entries
    }

    /// Distinct recipe names in order of first appearance
    pub fn recipe_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !names.contains(&entry.recipe_name.as_str()) {
                names.push(&entry.recipe_name);
            }
        }
        names
    }

    /// Rows of one recipe, in file order
    pub fn rows_for(&self, recipe_name: &str) -> Vec<&RecipeCatalogEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.recipe_name == recipe_name)
            .collect()
    }

    /// Method text of a recipe
    pub fn method_for(&self, recipe_name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.recipe_name == recipe_name)
            .map(|entry| entry.method.as_str())
    }
}

fn validate_row(raw: RawCatalogRow, row: usize) -> Result<RecipeCatalogEntry, CatalogError> {
    let invalid = |message: String| CatalogError::InvalidRow { row, message };

    if raw.recipe_name.is_empty() {
        return Err(invalid("RecipeName is empty".to_string()));
    }
    if raw.ingredient.is_empty() {
        return Err(invalid("Ingredient is empty".to_string()));
    }

    let quantity: f64 = raw
        .quantity
        .parse()
        .map_err(|_| invalid(format!("Quantity '{}' is not a number", raw.quantity)))?;
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(invalid(format!(
            "Quantity '{}' must be a finite, non-negative number",
            raw.quantity
        )));
    }

    let base_servings: i64 = raw.base_servings.parse().map_err(|_| {
        invalid(format!(
            "BaseServings '{}' is not a whole number",
            raw.base_servings
        ))
    })?;
    if base_servings <= 0 {
        return Err(invalid(format!(
            "BaseServings must be positive, got {base_servings}"
        )));
    }
    let base_servings = u32::try_from(base_servings)
        .map_err(|_| invalid(format!("BaseServings {base_servings} is too large")))?;

    debug!(row, recipe = %raw.recipe_name, ingredient = %raw.ingredient, "Validated catalog row");

    Ok(RecipeCatalogEntry {
        recipe_name: raw.recipe_name,
        ingredient: raw.ingredient,
        unit: raw.unit,
        category: raw.category,
        quantity,
        base_servings,
        method: raw.method,
    })
}

/// Every row of a recipe must scale from the same serving count.
/// Diverging method text only warrants a warning; the first row wins.
fn check_recipe_consistency(entries: &mut [RecipeCatalogEntry]) -> Result<(), CatalogError> {
    let mut firsts: Vec<(String, u32, String)> = Vec::new();

    for entry in entries.iter_mut() {
        match firsts.iter().find(|(name, _, _)| *name == entry.recipe_name) {
            Some((name, servings, method)) => {
                if *servings != entry.base_servings {
                    return Err(CatalogError::InconsistentServings {
                        recipe: name.clone(),
                        first: *servings,
                        other: entry.base_servings,
                    });
                }
                if *method != entry.method {
                    warn!(
                        recipe = %name,
                        ingredient = %entry.ingredient,
                        "Method text differs between rows, using the first one"
                    );
                    entry.method = method.clone();
                }
            }
            None => firsts.push((
                entry.recipe_name.clone(),
                entry.base_servings,
                entry.method.clone(),
            )),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "RecipeName,Ingredient,Unit,Category,Quantity,BaseServings,Method\n";

    fn parse(body: &str) -> Result<Catalog, CatalogError> {
        Catalog::from_reader(format!("{HEADER}{body}").as_bytes())
    }

    #[test]
    fn test_parses_rows_in_file_order() {
        let catalog = parse(
            "Meatballs,Beef,g,Meat,2000,50,Roll and bake\n\
             Meatballs,Breadcrumbs,g,Dry Goods,300,50,Roll and bake\n\
             Caesar Salad,Romaine,heads,Produce,4,20,Chop and toss\n",
        )
        .unwrap();

        assert_eq!(catalog.entries().len(), 3);
        assert_eq!(catalog.recipe_names(), vec!["Meatballs", "Caesar Salad"]);
        assert_eq!(catalog.rows_for("Meatballs").len(), 2);
        assert_eq!(catalog.entries()[1].quantity, 300.0);
        assert_eq!(catalog.method_for("Caesar Salad"), Some("Chop and toss"));
    }

    #[test]
    fn test_trims_cells_and_ignores_extra_columns() {
        let csv = "Notes,RecipeName,Ingredient,Unit,Category,Quantity,BaseServings,Method\n\
                   x, Soup , Leeks ,pcs, Produce , 3 , 8 , Simmer \n";
        let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();
        let entry = &catalog.entries()[0];
        assert_eq!(entry.recipe_name, "Soup");
        assert_eq!(entry.ingredient, "Leeks");
        assert_eq!(entry.category, "Produce");
        assert_eq!(entry.base_servings, 8);
        assert_eq!(entry.method, "Simmer");
    }

    #[test]
    fn test_missing_column_is_named() {
        let csv = "RecipeName,Ingredient,Unit,Category,Quantity,Method\n\
                   Soup,Leeks,pcs,Produce,3,Simmer\n";
        match Catalog::from_reader(csv.as_bytes()) {
            Err(CatalogError::MissingColumn(column)) => assert_eq!(column, "BaseServings"),
            other => panic!("expected missing column error, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_zero_and_negative_servings() {
        for servings in ["0", "-4"] {
            let result = parse(&format!("Soup,Leeks,pcs,Produce,3,{servings},Simmer\n"));
            assert!(matches!(result, Err(CatalogError::InvalidRow { row: 1, .. })));
        }
    }

    #[test]
    fn test_rejects_fractional_servings() {
        let result = parse("Soup,Leeks,pcs,Produce,3,2.5,Simmer\n");
        assert!(matches!(result, Err(CatalogError::InvalidRow { row: 1, .. })));
    }

    #[test]
    fn test_rejects_non_numeric_quantity_with_row_number() {
        let result = parse(
            "Soup,Leeks,pcs,Produce,3,8,Simmer\n\
             Soup,Stock,ml,Liquids,lots,8,Simmer\n",
        );
        match result {
            Err(CatalogError::InvalidRow { row, message }) => {
                assert_eq!(row, 2);
                assert!(message.contains("lots"));
            }
            other => panic!("expected invalid row, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_inconsistent_servings() {
        let result = parse(
            "Soup,Leeks,pcs,Produce,3,8,Simmer\n\
             Soup,Stock,ml,Liquids,500,10,Simmer\n",
        );
        assert!(matches!(
            result,
            Err(CatalogError::InconsistentServings { first: 8, other: 10, .. })
        ));
    }

    #[test]
    fn test_first_method_wins_on_mismatch() {
        let catalog = parse(
            "Soup,Leeks,pcs,Produce,3,8,Simmer gently\n\
             Soup,Stock,ml,Liquids,500,8,Boil\n",
        )
        .unwrap();
        assert!(catalog.entries().iter().all(|e| e.method == "Simmer gently"));
    }

    #[test]
    fn test_empty_catalog_is_rejected() {
        assert!(matches!(parse(""), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let result = Catalog::load(Path::new("/definitely/not/here/recipes.csv"));
        assert!(matches!(result, Err(CatalogError::NotFound { .. })));
    }
}
