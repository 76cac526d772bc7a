//! # Presentation Module
//!
//! Renders engine output as plain-text tables and lists in the chosen
//! display language. This layer only projects values the engine already
//! computed; it never aggregates, scales or branches on data.

use crate::aggregation::{BomRow, PlanStep, ProcurementRow, ToolRow};
use crate::catalog_model::{BilingualName, RecipeInfo};
use crate::localization::{Language, LocalizationManager};
use crate::quantity::format_quantity;

/// Pick the display form of a bilingual name for a language
pub fn display_name(name: &BilingualName, lang: Language) -> &str {
    match lang {
        Language::En => &name.en,
        Language::Zh => name.zh_or_primary(),
    }
}

/// Render the recipe header block: name, portion × multiplier, method,
/// temperature and time lines (the latter three only when present).
pub fn render_recipe_header(
    info: &RecipeInfo,
    multiplier: u32,
    lang: Language,
    loc: &LocalizationManager,
) -> String {
    let portion = format!(
        "{} x{}",
        info.portion.as_deref().unwrap_or("-"),
        multiplier
    );
    let mut out = loc.get_message_with_args(
        lang,
        "recipe-heading",
        &[
            ("recipe", display_name(&info.name, lang)),
            ("portion", &portion),
        ],
    );
    if let Some(method) = &info.method {
        out.push('\n');
        out.push_str(&loc.get_message_with_args(lang, "method-line", &[("method", method)]));
    }
    if let Some(temperature) = &info.temperature {
        out.push('\n');
        out.push_str(&loc.get_message_with_args(
            lang,
            "temperature-line",
            &[("temperature", temperature)],
        ));
    }
    if let Some(time) = &info.time {
        out.push('\n');
        out.push_str(&loc.get_message_with_args(lang, "time-line", &[("time", time)]));
    }
    out
}

/// Render a scaled bill-of-materials grouped under component subheaders.
///
/// Rows of one component arrive contiguously from the engine; a new
/// subheader is emitted whenever the component changes.
pub fn render_bom(rows: &[BomRow], lang: Language, loc: &LocalizationManager) -> String {
    let mut out = String::new();
    let mut current_component: Option<&BilingualName> = None;
    for row in rows {
        if current_component != Some(&row.component) {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("• {}\n", display_name(&row.component, lang)));
            current_component = Some(&row.component);
        }
        out.push_str(&format!(
            "  {}: {}{}",
            display_name(&row.ingredient, lang),
            row.quantity(),
            row.unit
        ));
        if row.optional {
            out.push(' ');
            out.push_str(&loc.t(lang, "optional-suffix"));
        }
        out.push('\n');
    }
    out
}

/// Render the cross-recipe shopping list as copyable lines.
pub fn render_shopping_list(
    rows: &[ProcurementRow],
    lang: Language,
    loc: &LocalizationManager,
) -> String {
    let mut out = loc.t(lang, "shopping-list-heading");
    out.push('\n');
    for row in rows {
        out.push_str(&format!(
            "{}: {}{}",
            display_name(&row.ingredient, lang),
            row.quantity(),
            row.unit
        ));
        if row.optional {
            out.push(' ');
            out.push_str(&loc.t(lang, "optional-suffix"));
        }
        if row.mixed_optionality {
            out.push(' ');
            out.push_str(&loc.t(lang, "mixed-optionality-note"));
        }
        out.push('\n');
    }
    out
}

/// Render the aggregated tool list.
pub fn render_tool_list(rows: &[ToolRow], lang: Language, loc: &LocalizationManager) -> String {
    let mut out = loc.t(lang, "tool-list-heading");
    out.push('\n');
    for row in rows {
        out.push_str(&format!("• {}", row.name));
        if row.optional {
            out.push(' ');
            out.push_str(&loc.t(lang, "optional-suffix"));
        }
        out.push('\n');
    }
    out
}

/// Render a production plan with part labels collapsed on repeats,
/// followed by the total-time line.
pub fn render_production_plan(
    plan: &[PlanStep],
    total_minutes: f64,
    lang: Language,
    loc: &LocalizationManager,
) -> String {
    let mut out = loc.t(lang, "production-plan-heading");
    out.push('\n');
    for step in plan {
        out.push_str(&format!("{:>3}. ", step.order));
        if !step.part_repeats {
            out.push_str(&format!("[{}] ", step.part));
        }
        let minutes = format_quantity(step.cycle_time);
        out.push_str(&format!(
            "{} | {}",
            step.instruction,
            loc.get_message_with_args(lang, "step-time", &[("minutes", &minutes)])
        ));
        if step.parallel {
            out.push(' ');
            out.push_str(&loc.t(lang, "parallel-marker"));
        }
        out.push('\n');
    }
    let total = format_quantity(total_minutes);
    out.push_str(&loc.get_message_with_args(lang, "total-time-line", &[("minutes", &total)]));
    out.push('\n');
    out
}
