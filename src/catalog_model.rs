//! # Catalog Data Model
//!
//! This module defines the typed records produced by the catalog loader:
//! the denormalized ingredient-usage rows the aggregation engine consumes,
//! plus per-recipe info, production steps and tools.
//!
//! ## Core Concepts
//!
//! - **CatalogRow**: one (recipe, component, ingredient usage) triple
//! - **RecipeInfo**: display attributes of a recipe (portion, method, image)
//! - **Step**: a production step with a cycle time and a parallel flag
//! - **Catalog**: the immutable snapshot holding all of the above
//!
//! All entities are read-only after loading; the engine never mutates them.

use serde::{Deserialize, Serialize};

/// A name carried in both display languages.
///
/// The second-language name comes from the ingredient dictionary or the
/// bilingual workbook columns and may be absent; display code falls back
/// to the primary name when it is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BilingualName {
    /// Primary (English) name, always present
    pub en: String,
    /// Second-language (Traditional Chinese) name, if known
    pub zh: Option<String>,
}

impl BilingualName {
    /// Create a bilingual name from a primary name only
    pub fn primary(en: &str) -> Self {
        Self {
            en: en.to_string(),
            zh: None,
        }
    }

    /// Create a bilingual name with both languages present
    pub fn with_zh(en: &str, zh: &str) -> Self {
        Self {
            en: en.to_string(),
            zh: Some(zh.to_string()),
        }
    }

    /// The second-language name, falling back to the primary name
    pub fn zh_or_primary(&self) -> &str {
        self.zh.as_deref().unwrap_or(&self.en)
    }
}

/// One denormalized ingredient usage, joined with its component and recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRow {
    /// Recipe this usage transitively belongs to
    pub recipe_id: String,
    /// Component (sub-assembly) the ingredient is used in
    pub component_id: String,
    /// Component display name
    pub component_name: BilingualName,
    /// Ingredient name, with the dictionary translation when matched
    pub ingredient: BilingualName,
    /// Raw (unscaled) amount
    pub amount: f64,
    /// Measurement unit, verbatim from the source; never converted
    pub unit: String,
    /// Whether the usage is optional
    pub optional: bool,
}

/// Display attributes of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeInfo {
    pub id: String,
    pub name: BilingualName,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    /// Base portion description, e.g. "4 servings"
    pub portion: Option<String>,
    /// Free-text cooking method
    pub method: Option<String>,
    pub temperature: Option<String>,
    /// Cooking time as written in the source (minutes)
    pub time: Option<String>,
    /// Image reference: URL, local path, or absent
    pub image: Option<String>,
}

/// A production step belonging to a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub recipe_id: String,
    /// Ordering key, ascending
    pub order: i64,
    /// Named part of the production ("sauce", "assembly", ...)
    pub part: String,
    pub instruction: String,
    /// Duration in minutes, non-negative
    pub cycle_time: f64,
    /// Parallel steps overlap with others and are excluded from totals
    pub parallel: bool,
}

/// A tool required by a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub recipe_id: String,
    pub name: String,
    pub optional: bool,
}

/// Immutable catalog snapshot.
///
/// Built once per load by the catalog loader and shared by reference for
/// the lifetime of the process; every aggregation operation is a pure
/// function of this snapshot plus a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    rows: Vec<CatalogRow>,
    recipes: Vec<RecipeInfo>,
    steps: Vec<Step>,
    tools: Vec<Tool>,
}

impl Catalog {
    /// Assemble a catalog snapshot.
    ///
    /// Steps are sorted by (recipe, order) so that per-recipe iteration
    /// yields them in production order.
    pub fn new(
        rows: Vec<CatalogRow>,
        recipes: Vec<RecipeInfo>,
        mut steps: Vec<Step>,
        tools: Vec<Tool>,
    ) -> Self {
        steps.sort_by(|a, b| {
            a.recipe_id
                .cmp(&b.recipe_id)
                .then(a.order.cmp(&b.order))
        });
        Self {
            rows,
            recipes,
            steps,
            tools,
        }
    }

    /// All denormalized ingredient-usage rows
    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    /// All recipes, in source order
    pub fn recipes(&self) -> &[RecipeInfo] {
        &self.recipes
    }

    /// Look up a recipe by id
    pub fn recipe(&self, recipe_id: &str) -> Option<&RecipeInfo> {
        self.recipes.iter().find(|r| r.id == recipe_id)
    }

    /// Rows belonging to one recipe, in source order
    pub fn rows_for<'a>(&'a self, recipe_id: &str) -> impl Iterator<Item = &'a CatalogRow> + 'a {
        let id = recipe_id.to_string();
        self.rows.iter().filter(move |r| r.recipe_id == id)
    }

    /// Steps of one recipe, ordered by step order ascending
    pub fn steps_for<'a>(&'a self, recipe_id: &str) -> impl Iterator<Item = &'a Step> + 'a {
        let id = recipe_id.to_string();
        self.steps.iter().filter(move |s| s.recipe_id == id)
    }

    /// Tools of one recipe, in source order
    pub fn tools_for<'a>(&'a self, recipe_id: &str) -> impl Iterator<Item = &'a Tool> + 'a {
        let id = recipe_id.to_string();
        self.tools.iter().filter(move |t| t.recipe_id == id)
    }

    /// Number of steps across all recipes
    pub fn steps_count(&self) -> usize {
        self.steps.len()
    }

    /// Number of tool entries across all recipes
    pub fn tools_count(&self) -> usize {
        self.tools.len()
    }

    /// Recipes narrowed by category and/or subcategory.
    ///
    /// `None` means "no filter" for that axis.
    pub fn recipes_in(
        &self,
        category: Option<&str>,
        subcategory: Option<&str>,
    ) -> Vec<&RecipeInfo> {
        self.recipes
            .iter()
            .filter(|r| match category {
                Some(c) => r.category.as_deref() == Some(c),
                None => true,
            })
            .filter(|r| match subcategory {
                Some(s) => r.subcategory.as_deref() == Some(s),
                None => true,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        let rows = vec![CatalogRow {
            recipe_id: "R1".to_string(),
            component_id: "C1".to_string(),
            component_name: BilingualName::with_zh("sauce", "醬汁"),
            ingredient: BilingualName::with_zh("Salt", "鹽"),
            amount: 2.0,
            unit: "g".to_string(),
            optional: false,
        }];
        let recipes = vec![RecipeInfo {
            id: "R1".to_string(),
            name: BilingualName::with_zh("Soup", "湯"),
            category: Some("Mains".to_string()),
            subcategory: Some("Soups".to_string()),
            portion: Some("4 servings".to_string()),
            method: None,
            temperature: None,
            time: None,
            image: None,
        }];
        let steps = vec![
            Step {
                recipe_id: "R1".to_string(),
                order: 2,
                part: "base".to_string(),
                instruction: "Simmer".to_string(),
                cycle_time: 20.0,
                parallel: false,
            },
            Step {
                recipe_id: "R1".to_string(),
                order: 1,
                part: "base".to_string(),
                instruction: "Chop".to_string(),
                cycle_time: 5.0,
                parallel: false,
            },
        ];
        Catalog::new(rows, recipes, steps, vec![])
    }

    #[test]
    fn test_bilingual_fallback() {
        let name = BilingualName::primary("Salt");
        assert_eq!(name.zh_or_primary(), "Salt");

        let name = BilingualName::with_zh("Salt", "鹽");
        assert_eq!(name.zh_or_primary(), "鹽");
    }

    #[test]
    fn test_steps_sorted_by_order() {
        let catalog = sample_catalog();
        let orders: Vec<i64> = catalog.steps_for("R1").map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2]);
    }

    #[test]
    fn test_recipe_lookup() {
        let catalog = sample_catalog();
        assert!(catalog.recipe("R1").is_some());
        assert!(catalog.recipe("nope").is_none());
    }

    #[test]
    fn test_category_filter() {
        let catalog = sample_catalog();
        assert_eq!(catalog.recipes_in(Some("Mains"), None).len(), 1);
        assert_eq!(catalog.recipes_in(Some("Desserts"), None).len(), 0);
        assert_eq!(catalog.recipes_in(None, Some("Soups")).len(), 1);
        assert_eq!(catalog.recipes_in(None, None).len(), 1);
    }
}
