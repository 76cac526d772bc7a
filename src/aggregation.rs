//! # Aggregation Engine
//!
//! The core of the calculator: pure functions of (catalog, selection)
//! producing the scaled bill-of-materials, the cross-recipe procurement
//! summary, the aggregated tool list, the production plan and the total
//! time estimate.
//!
//! ## Grouping rules
//!
//! - BoM rows group by (ingredient, unit, optional) within a component;
//!   components iterate in first-seen order within the recipe.
//! - Procurement rows group by (ingredient, unit, optional) across all
//!   selected recipes. No unit conversion is ever performed: the same
//!   ingredient in "g" and "kg" stays two groups.
//! - Amount scaling is linear: group sum × multiplier.
//!
//! Unknown recipe ids yield empty results, never errors, mirroring the
//! loader's left-join-drop policy.

use log::debug;

use crate::catalog_model::{BilingualName, Catalog};
use crate::quantity::format_quantity;
use crate::selection::{Selection, SelectionError};

/// One grouped row of a recipe's scaled bill-of-materials
#[derive(Debug, Clone, PartialEq)]
pub struct BomRow {
    /// Component the row belongs to; rows of one component are contiguous
    pub component: BilingualName,
    pub ingredient: BilingualName,
    /// Scaled amount (group sum × multiplier)
    pub amount: f64,
    pub unit: String,
    pub optional: bool,
}

impl BomRow {
    /// Display form of the scaled amount
    pub fn quantity(&self) -> String {
        format_quantity(self.amount)
    }
}

/// One grouped row of the cross-recipe procurement summary
#[derive(Debug, Clone, PartialEq)]
pub struct ProcurementRow {
    pub ingredient: BilingualName,
    /// Total amount across all contributing recipes, already scaled
    pub amount: f64,
    pub unit: String,
    pub optional: bool,
    /// True when the same (ingredient, unit) also appears with the
    /// opposite optional flag in this summary. Flagged explicitly rather
    /// than merged, pending product clarification.
    pub mixed_optionality: bool,
}

impl ProcurementRow {
    /// Display form of the total amount
    pub fn quantity(&self) -> String {
        format_quantity(self.amount)
    }
}

/// One aggregated tool entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRow {
    pub name: String,
    pub optional: bool,
}

/// One step of a recipe's production plan, in execution order
#[derive(Debug, Clone, PartialEq)]
pub struct PlanStep {
    pub order: i64,
    pub part: String,
    /// True when this step's part equals the previous step's part; the
    /// presentation layer suppresses the repeated label
    pub part_repeats: bool,
    pub instruction: String,
    /// Minutes
    pub cycle_time: f64,
    pub parallel: bool,
}

/// Scale one recipe's bill-of-materials.
///
/// Filters the catalog to `recipe_id`, groups by (ingredient, unit,
/// optional) within each component, sums the raw amounts per group and
/// multiplies by `multiplier`. A recipe id not present in the catalog
/// yields an empty vec.
pub fn scale_bom(
    catalog: &Catalog,
    recipe_id: &str,
    multiplier: u32,
) -> Result<Vec<BomRow>, SelectionError> {
    if multiplier == 0 {
        return Err(SelectionError::ZeroMultiplier(recipe_id.to_string()));
    }

    // First level: components in first-seen order. Second level: grouped
    // rows in first-seen order within the component.
    let mut component_order: Vec<String> = Vec::new();
    let mut grouped: Vec<Vec<BomRow>> = Vec::new();

    for row in catalog.rows_for(recipe_id) {
        let slot = match component_order.iter().position(|c| *c == row.component_id) {
            Some(i) => i,
            None => {
                component_order.push(row.component_id.clone());
                grouped.push(Vec::new());
                component_order.len() - 1
            }
        };
        let bucket = &mut grouped[slot];
        match bucket.iter_mut().find(|g| {
            g.ingredient.en == row.ingredient.en
                && g.unit == row.unit
                && g.optional == row.optional
        }) {
            Some(group) => group.amount += row.amount,
            None => bucket.push(BomRow {
                component: row.component_name.clone(),
                ingredient: row.ingredient.clone(),
                amount: row.amount,
                unit: row.unit.clone(),
                optional: row.optional,
            }),
        }
    }

    let mut rows: Vec<BomRow> = grouped.into_iter().flatten().collect();
    for row in &mut rows {
        row.amount *= f64::from(multiplier);
    }
    debug!(
        "scale_bom: recipe '{}' x{} -> {} grouped rows",
        recipe_id,
        multiplier,
        rows.len()
    );
    Ok(rows)
}

/// Compute the cross-recipe procurement summary.
///
/// Every usage row of every selected recipe contributes amount ×
/// multiplier; contributions are grouped by (ingredient, unit, optional)
/// and summed. Groups sharing (ingredient, unit) but disagreeing on the
/// optional flag are kept separate and marked `mixed_optionality`.
pub fn summarize(catalog: &Catalog, selection: &Selection) -> Vec<ProcurementRow> {
    let mut rows: Vec<ProcurementRow> = Vec::new();

    for entry in selection.entries() {
        let factor = f64::from(entry.multiplier);
        for row in catalog.rows_for(&entry.recipe_id) {
            let total = row.amount * factor;
            match rows.iter_mut().find(|g| {
                g.ingredient.en == row.ingredient.en
                    && g.unit == row.unit
                    && g.optional == row.optional
            }) {
                Some(group) => group.amount += total,
                None => rows.push(ProcurementRow {
                    ingredient: row.ingredient.clone(),
                    amount: total,
                    unit: row.unit.clone(),
                    optional: row.optional,
                    mixed_optionality: false,
                }),
            }
        }
    }

    for i in 0..rows.len() {
        let mixed = rows.iter().enumerate().any(|(j, other)| {
            j != i
                && other.ingredient.en == rows[i].ingredient.en
                && other.unit == rows[i].unit
                && other.optional != rows[i].optional
        });
        rows[i].mixed_optionality = mixed;
    }

    debug!(
        "summarize: {} recipes -> {} procurement rows",
        selection.entries().len(),
        rows.len()
    );
    rows
}

/// Aggregate the tools of all selected recipes.
///
/// De-duplicated by exact (name, optional) pair; a tool that is optional
/// in one recipe and mandatory in another yields two rows. First-seen
/// order is preserved.
pub fn aggregate_tools(catalog: &Catalog, selection: &Selection) -> Vec<ToolRow> {
    let mut rows: Vec<ToolRow> = Vec::new();
    for entry in selection.entries() {
        for tool in catalog.tools_for(&entry.recipe_id) {
            let candidate = ToolRow {
                name: tool.name.clone(),
                optional: tool.optional,
            };
            if !rows.contains(&candidate) {
                rows.push(candidate);
            }
        }
    }
    rows
}

/// Total estimated production time in minutes for the whole selection.
///
/// Sums the cycle times of non-parallel steps per recipe, then across the
/// selection. Parallel steps contribute zero regardless of their cycle
/// time; recipes without step data contribute zero.
pub fn total_time(catalog: &Catalog, selection: &Selection) -> f64 {
    selection
        .entries()
        .iter()
        .map(|entry| {
            catalog
                .steps_for(&entry.recipe_id)
                .filter(|s| !s.parallel)
                .map(|s| s.cycle_time)
                .sum::<f64>()
        })
        .sum()
}

/// The production plan of one recipe, ordered by step order ascending.
///
/// Consecutive steps sharing a part stay separate rows (their times count
/// individually) but carry `part_repeats` so the label renders once.
pub fn step_plan(catalog: &Catalog, recipe_id: &str) -> Vec<PlanStep> {
    let mut plan: Vec<PlanStep> = Vec::new();
    for step in catalog.steps_for(recipe_id) {
        let part_repeats = plan
            .last()
            .map(|prev| prev.part == step.part)
            .unwrap_or(false);
        plan.push(PlanStep {
            order: step.order,
            part: step.part.clone(),
            part_repeats,
            instruction: step.instruction.clone(),
            cycle_time: step.cycle_time,
            parallel: step.parallel,
        });
    }
    plan
}
