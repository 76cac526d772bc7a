//! # Selection Module
//!
//! A [`Selection`] is the validated parameter object passed into every
//! aggregation operation: an ordered list of (recipe id, multiplier)
//! pairs. Validation happens once, at construction, so the engine never
//! sees a malformed selection.

use std::collections::HashSet;

/// One chosen recipe with its portion multiplier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEntry {
    pub recipe_id: String,
    /// Positive integer scaling factor; the engine enforces no upper bound
    pub multiplier: u32,
}

/// Validated, ordered selection of recipes to scale
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    entries: Vec<SelectionEntry>,
}

/// Validation errors raised at the selection boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// No recipes were selected
    Empty,
    /// A multiplier was zero (multipliers must be positive integers)
    ZeroMultiplier(String),
    /// The same recipe id appeared more than once
    DuplicateRecipe(String),
}

impl std::fmt::Display for SelectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionError::Empty => write!(f, "Selection error: no recipes selected"),
            SelectionError::ZeroMultiplier(id) => {
                write!(f, "Selection error: multiplier for '{id}' must be positive")
            }
            SelectionError::DuplicateRecipe(id) => {
                write!(f, "Selection error: recipe '{id}' selected more than once")
            }
        }
    }
}

impl std::error::Error for SelectionError {}

impl Selection {
    /// Build a validated selection from (recipe id, multiplier) pairs.
    ///
    /// Rejects empty selections, zero multipliers and duplicate recipe
    /// ids. Unknown recipe ids are allowed here; they resolve to empty
    /// results downstream, consistent with left-join-drop semantics.
    pub fn new<I, S>(pairs: I) -> Result<Self, SelectionError>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut entries = Vec::new();
        let mut seen = HashSet::new();
        for (recipe_id, multiplier) in pairs {
            let recipe_id = recipe_id.into();
            if multiplier == 0 {
                return Err(SelectionError::ZeroMultiplier(recipe_id));
            }
            if !seen.insert(recipe_id.clone()) {
                return Err(SelectionError::DuplicateRecipe(recipe_id));
            }
            entries.push(SelectionEntry {
                recipe_id,
                multiplier,
            });
        }
        if entries.is_empty() {
            return Err(SelectionError::Empty);
        }
        Ok(Self { entries })
    }

    /// A selection of a single recipe
    pub fn single(recipe_id: &str, multiplier: u32) -> Result<Self, SelectionError> {
        Self::new([(recipe_id, multiplier)])
    }

    /// Entries in the order the user selected them
    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    /// The multiplier chosen for a recipe, if it is part of the selection
    pub fn multiplier_for(&self, recipe_id: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.recipe_id == recipe_id)
            .map(|e| e.multiplier)
    }
}
