//! # Catalog Loading Tests
//!
//! File-based loading of the recipe catalog, including the error paths the
//! command line reports to the user.

use catering_companion::catalog::Catalog;
use catering_companion::catering_errors::CatalogError;
use std::fs;
use std::path::Path;
use tempfile::NamedTempFile;

fn write_catalog(contents: &str) -> NamedTempFile {
    let file = NamedTempFile::new().expect("Failed to create temp file");
    fs::write(file.path(), contents).expect("Failed to write catalog");
    file
}

#[test]
fn test_load_from_file() {
    let file = write_catalog(
        "RecipeName,Ingredient,Unit,Category,Quantity,BaseServings,Method\n\
         Chili,Beans,cans,Pantry,4,12,\"Brown the onions, add beans, simmer.\"\n\
         Chili,Onions,pcs,Produce,2,12,\"Brown the onions, add beans, simmer.\"\n",
    );

    let catalog = Catalog::load(file.path()).unwrap();
    assert_eq!(catalog.recipe_names(), vec!["Chili"]);
    assert_eq!(
        catalog.method_for("Chili"),
        Some("Brown the onions, add beans, simmer.")
    );
    assert_eq!(catalog.rows_for("Chili")[1].ingredient, "Onions");
}

#[test]
fn test_sample_catalog_is_valid() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/master_recipe_template.csv");
    let catalog = Catalog::load(&path).unwrap();
    assert_eq!(
        catalog.recipe_names(),
        vec!["Meatballs", "Caesar Salad", "Lemon Tart"]
    );
    assert!(catalog.entries().iter().all(|e| e.base_servings > 0));
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("master_recipe_template.csv");

    let error = Catalog::load(&path).unwrap_err();
    match &error {
        CatalogError::NotFound { path: reported } => assert_eq!(reported, &path),
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert!(error.to_string().contains("master_recipe_template.csv"));
}

#[test]
fn test_directory_is_unreadable_not_missing() {
    let dir = tempfile::tempdir().unwrap();
    let result = Catalog::load(dir.path());
    assert!(!matches!(result, Err(CatalogError::NotFound { .. })));
    assert!(result.is_err());
}

#[test]
fn test_header_only_file_is_empty() {
    let file = write_catalog("RecipeName,Ingredient,Unit,Category,Quantity,BaseServings,Method\n");
    assert!(matches!(Catalog::load(file.path()), Err(CatalogError::Empty)));
}

#[test]
fn test_ragged_rows_are_csv_errors() {
    let file = write_catalog(
        "RecipeName,Ingredient,Unit,Category,Quantity,BaseServings,Method\n\
         Chili,Beans,cans,Pantry,4\n",
    );
    assert!(matches!(Catalog::load(file.path()), Err(CatalogError::Csv(_))));
}

#[test]
fn test_negative_quantity_is_rejected() {
    let file = write_catalog(
        "RecipeName,Ingredient,Unit,Category,Quantity,BaseServings,Method\n\
         Chili,Beans,cans,Pantry,-4,12,Simmer\n",
    );
    let error = Catalog::load(file.path()).unwrap_err();
    assert!(error.to_string().contains("row 1"));
}
