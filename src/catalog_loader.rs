//! # Catalog Loader Module
//!
//! Reads the recipe workbook (a JSON export of the spreadsheet, one array
//! per sheet) and denormalizes it into the immutable [`Catalog`] snapshot
//! the aggregation engine consumes.
//!
//! ## Join semantics
//!
//! - Ingredients → Components on `ComponentID`: usages with no matching
//!   component are dropped (there is no recipe to attach them to).
//! - Components → Recipes on `RecipeID`: same drop policy.
//! - Ingredient name → IngredientDict: a miss keeps the row and leaves the
//!   translated name empty.
//! - Missing `Steps` / `Tools` sheets default to empty collections.
//!
//! The workbook is immutable for the session; callers load once and share
//! the snapshot by reference.

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::catalog_model::{BilingualName, Catalog, CatalogRow, RecipeInfo, Step, Tool};

/// Raw workbook schema: one array per sheet, column names verbatim.
#[derive(Debug, Deserialize)]
struct Workbook {
    #[serde(rename = "Ingredients")]
    ingredients: Vec<IngredientSheetRow>,
    #[serde(rename = "Components")]
    components: Vec<ComponentSheetRow>,
    #[serde(rename = "Recipes")]
    recipes: Vec<RecipeSheetRow>,
    #[serde(rename = "IngredientDict", default)]
    ingredient_dict: Vec<DictSheetRow>,
    #[serde(rename = "Steps", default)]
    steps: Vec<StepSheetRow>,
    #[serde(rename = "Tools", default)]
    tools: Vec<ToolSheetRow>,
}

#[derive(Debug, Deserialize)]
struct IngredientSheetRow {
    #[serde(rename = "ComponentID")]
    component_id: String,
    #[serde(rename = "Ingredient")]
    ingredient: String,
    #[serde(rename = "Amount")]
    amount: f64,
    #[serde(rename = "Unit")]
    unit: String,
    #[serde(rename = "Optional", default)]
    optional: bool,
}

#[derive(Debug, Deserialize)]
struct ComponentSheetRow {
    #[serde(rename = "ComponentID")]
    component_id: String,
    #[serde(rename = "RecipeID")]
    recipe_id: String,
    #[serde(rename = "ComponentName")]
    name: String,
    #[serde(rename = "ComponentName_zh")]
    name_zh: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RecipeSheetRow {
    #[serde(rename = "RecipeID")]
    recipe_id: String,
    #[serde(rename = "RecipeName")]
    name: String,
    #[serde(rename = "RecipeName_zh")]
    name_zh: Option<String>,
    #[serde(rename = "Category")]
    category: Option<String>,
    #[serde(rename = "SubCategory")]
    subcategory: Option<String>,
    #[serde(rename = "Portion")]
    portion: Option<String>,
    #[serde(rename = "Method")]
    method: Option<String>,
    #[serde(rename = "Temperature")]
    temperature: Option<String>,
    #[serde(rename = "Time")]
    time: Option<String>,
    #[serde(rename = "ImageURL")]
    image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DictSheetRow {
    #[serde(rename = "Ingredient")]
    ingredient: String,
    #[serde(rename = "Ingredient_zh")]
    ingredient_zh: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StepSheetRow {
    #[serde(rename = "RecipeID")]
    recipe_id: String,
    #[serde(rename = "StepOrder")]
    order: i64,
    #[serde(rename = "Part", default)]
    part: String,
    #[serde(rename = "Instruction", default)]
    instruction: String,
    #[serde(rename = "CycleTime", default)]
    cycle_time: f64,
    #[serde(rename = "Parallel", default)]
    parallel: bool,
}

#[derive(Debug, Deserialize)]
struct ToolSheetRow {
    #[serde(rename = "RecipeID")]
    recipe_id: String,
    #[serde(rename = "Tool")]
    name: String,
    #[serde(rename = "Optional", default)]
    optional: bool,
}

/// Load the catalog from a workbook file on disk
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    info!("Loading recipe catalog from: {}", path.display());

    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
    let workbook: Workbook = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;

    let catalog = build_catalog(workbook);
    info!(
        "Catalog loaded: {} recipes, {} ingredient rows, {} steps, {} tools",
        catalog.recipes().len(),
        catalog.rows().len(),
        catalog.steps_count(),
        catalog.tools_count()
    );
    Ok(catalog)
}

/// Load the catalog from an in-memory workbook string
pub fn load_catalog_str(raw: &str) -> Result<Catalog> {
    let workbook: Workbook =
        serde_json::from_str(raw).context("Failed to parse catalog workbook")?;
    Ok(build_catalog(workbook))
}

/// Denormalize the raw sheets into catalog rows.
fn build_catalog(workbook: Workbook) -> Catalog {
    let components: HashMap<&str, &ComponentSheetRow> = workbook
        .components
        .iter()
        .map(|c| (c.component_id.as_str(), c))
        .collect();
    let recipe_ids: HashMap<&str, ()> = workbook
        .recipes
        .iter()
        .map(|r| (r.recipe_id.as_str(), ()))
        .collect();
    let dictionary: HashMap<&str, Option<&str>> = workbook
        .ingredient_dict
        .iter()
        .map(|d| (d.ingredient.as_str(), d.ingredient_zh.as_deref()))
        .collect();

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for usage in &workbook.ingredients {
        // Left-join-drop: no component or no recipe means no row.
        let component = match components.get(usage.component_id.as_str()) {
            Some(c) => *c,
            None => {
                dropped += 1;
                continue;
            }
        };
        if !recipe_ids.contains_key(component.recipe_id.as_str()) {
            dropped += 1;
            continue;
        }
        if !usage.amount.is_finite() || usage.amount <= 0.0 {
            warn!(
                "Dropping usage of '{}' in component '{}': non-positive amount {}",
                usage.ingredient, usage.component_id, usage.amount
            );
            dropped += 1;
            continue;
        }

        let ingredient_zh = dictionary
            .get(usage.ingredient.as_str())
            .copied()
            .flatten()
            .map(|s| s.to_string());

        rows.push(CatalogRow {
            recipe_id: component.recipe_id.clone(),
            component_id: component.component_id.clone(),
            component_name: BilingualName {
                en: component.name.clone(),
                zh: component.name_zh.clone(),
            },
            ingredient: BilingualName {
                en: usage.ingredient.clone(),
                zh: ingredient_zh,
            },
            amount: usage.amount,
            unit: usage.unit.clone(),
            optional: usage.optional,
        });
    }
    if dropped > 0 {
        warn!("Dropped {} orphaned or malformed ingredient rows", dropped);
    }

    let recipes = workbook
        .recipes
        .into_iter()
        .map(|r| RecipeInfo {
            id: r.recipe_id,
            name: BilingualName {
                en: r.name,
                zh: r.name_zh,
            },
            category: r.category,
            subcategory: r.subcategory,
            portion: r.portion,
            method: r.method,
            temperature: r.temperature,
            time: r.time,
            image: r.image,
        })
        .collect();

    let steps = workbook
        .steps
        .into_iter()
        .map(|s| Step {
            cycle_time: if s.cycle_time.is_finite() && s.cycle_time >= 0.0 {
                s.cycle_time
            } else {
                warn!(
                    "Step {} of recipe '{}' has invalid cycle time {}, treating as 0",
                    s.order, s.recipe_id, s.cycle_time
                );
                0.0
            },
            recipe_id: s.recipe_id,
            order: s.order,
            part: s.part,
            instruction: s.instruction,
            parallel: s.parallel,
        })
        .collect();

    let tools = workbook
        .tools
        .into_iter()
        .map(|t| Tool {
            recipe_id: t.recipe_id,
            name: t.name,
            optional: t.optional,
        })
        .collect();

    Catalog::new(rows, recipes, steps, tools)
}
