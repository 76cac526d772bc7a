//! # Recipe Ingredient Calculator
//!
//! Scales recipes from a workbook-backed catalog by per-recipe portion
//! multipliers and aggregates the results: a bill-of-materials per
//! recipe, a cross-recipe shopping list, a tool list, and a production
//! plan with a total time estimate.

pub mod aggregation;
pub mod catalog_loader;
pub mod catalog_model;
pub mod image_resolver;
pub mod localization;
pub mod presentation;
pub mod quantity;
pub mod resolver_config;
pub mod selection;
