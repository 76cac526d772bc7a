//! # Catalog Loader Tests
//!
//! Tests for workbook parsing and left-join denormalization, using
//! workbooks written to temporary files.

use recipe_calculator::catalog_loader::{load_catalog, load_catalog_str};
use std::io::Write;

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_WORKBOOK: &str = r#"{
        "Ingredients": [
            {"ComponentID": "C1", "Ingredient": "Salt", "Amount": 2.0, "Unit": "g", "Optional": false},
            {"ComponentID": "C1", "Ingredient": "Pepper", "Amount": 1.0, "Unit": "g", "Optional": true},
            {"ComponentID": "C2", "Ingredient": "Cream", "Amount": 100.0, "Unit": "ml", "Optional": false}
        ],
        "Components": [
            {"ComponentID": "C1", "RecipeID": "R1", "ComponentName": "base", "ComponentName_zh": "湯底"},
            {"ComponentID": "C2", "RecipeID": "R1", "ComponentName": "topping", "ComponentName_zh": null}
        ],
        "Recipes": [
            {"RecipeID": "R1", "RecipeName": "Soup", "RecipeName_zh": "湯",
             "Category": "Mains", "SubCategory": "Soups", "Portion": "4 servings",
             "Method": "Simmer", "Temperature": "90C", "Time": "30",
             "ImageURL": "https://example.com/soup.jpg"}
        ],
        "IngredientDict": [
            {"Ingredient": "Salt", "Ingredient_zh": "鹽"}
        ],
        "Steps": [
            {"RecipeID": "R1", "StepOrder": 1, "Part": "base", "Instruction": "Chop", "CycleTime": 5.0, "Parallel": false}
        ],
        "Tools": [
            {"RecipeID": "R1", "Tool": "Pot", "Optional": false}
        ]
    }"#;

    #[test]
    fn test_full_workbook_joins() {
        let catalog = load_catalog_str(FULL_WORKBOOK).unwrap();

        assert_eq!(catalog.rows().len(), 3);
        assert_eq!(catalog.recipes().len(), 1);
        assert_eq!(catalog.steps_count(), 1);
        assert_eq!(catalog.tools_count(), 1);

        let salt = &catalog.rows()[0];
        assert_eq!(salt.recipe_id, "R1");
        assert_eq!(salt.component_name.en, "base");
        assert_eq!(salt.component_name.zh.as_deref(), Some("湯底"));
        assert_eq!(salt.ingredient.zh.as_deref(), Some("鹽"));
    }

    #[test]
    fn test_dictionary_miss_keeps_row_without_translation() {
        let catalog = load_catalog_str(FULL_WORKBOOK).unwrap();
        let pepper = &catalog.rows()[1];
        assert_eq!(pepper.ingredient.en, "Pepper");
        assert_eq!(pepper.ingredient.zh, None);
    }

    #[test]
    fn test_orphaned_rows_are_dropped() {
        let workbook = r#"{
            "Ingredients": [
                {"ComponentID": "C1", "Ingredient": "Salt", "Amount": 2.0, "Unit": "g"},
                {"ComponentID": "ghost", "Ingredient": "Lost", "Amount": 1.0, "Unit": "g"},
                {"ComponentID": "C9", "Ingredient": "Stray", "Amount": 1.0, "Unit": "g"}
            ],
            "Components": [
                {"ComponentID": "C1", "RecipeID": "R1", "ComponentName": "base", "ComponentName_zh": null},
                {"ComponentID": "C9", "RecipeID": "unknown-recipe", "ComponentName": "x", "ComponentName_zh": null}
            ],
            "Recipes": [
                {"RecipeID": "R1", "RecipeName": "Soup", "RecipeName_zh": null,
                 "Category": null, "SubCategory": null, "Portion": null,
                 "Method": null, "Temperature": null, "Time": null, "ImageURL": null}
            ]
        }"#;
        let catalog = load_catalog_str(workbook).unwrap();

        // "Lost" has no component, "Stray"'s component has no recipe.
        assert_eq!(catalog.rows().len(), 1);
        assert_eq!(catalog.rows()[0].ingredient.en, "Salt");
    }

    #[test]
    fn test_missing_optional_sheets_default_to_empty() {
        let workbook = r#"{
            "Ingredients": [],
            "Components": [],
            "Recipes": []
        }"#;
        let catalog = load_catalog_str(workbook).unwrap();
        assert_eq!(catalog.steps_count(), 0);
        assert_eq!(catalog.tools_count(), 0);
    }

    #[test]
    fn test_non_positive_amounts_are_dropped() {
        let workbook = r#"{
            "Ingredients": [
                {"ComponentID": "C1", "Ingredient": "Salt", "Amount": 0.0, "Unit": "g"},
                {"ComponentID": "C1", "Ingredient": "Sugar", "Amount": -2.0, "Unit": "g"},
                {"ComponentID": "C1", "Ingredient": "Flour", "Amount": 100.0, "Unit": "g"}
            ],
            "Components": [
                {"ComponentID": "C1", "RecipeID": "R1", "ComponentName": "base", "ComponentName_zh": null}
            ],
            "Recipes": [
                {"RecipeID": "R1", "RecipeName": "Bread", "RecipeName_zh": null,
                 "Category": null, "SubCategory": null, "Portion": null,
                 "Method": null, "Temperature": null, "Time": null, "ImageURL": null}
            ]
        }"#;
        let catalog = load_catalog_str(workbook).unwrap();
        assert_eq!(catalog.rows().len(), 1);
        assert_eq!(catalog.rows()[0].ingredient.en, "Flour");
    }

    #[test]
    fn test_load_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL_WORKBOOK.as_bytes()).unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.rows().len(), 3);
        assert_eq!(catalog.recipe("R1").unwrap().portion.as_deref(), Some("4 servings"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_catalog(std::path::Path::new("/no/such/workbook.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_workbook_is_an_error() {
        let result = load_catalog_str("{\"Ingredients\": [{}]}");
        assert!(result.is_err());
    }
}
