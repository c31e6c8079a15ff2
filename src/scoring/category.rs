//! Category multiplier table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Error, Result};

/// Multiplier applied to categories missing from the table.
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

fn neutral() -> f64 {
    NEUTRAL_MULTIPLIER
}

/// One row of the category table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub id: String,
    /// Defaults to neutral when a row omits it.
    #[serde(default = "neutral")]
    pub multiplier: f64,
}

impl CategoryRule {
    pub fn new(id: impl Into<String>, multiplier: f64) -> Self {
        Self {
            id: id.into(),
            multiplier,
        }
    }
}

/// Immutable `category id -> multiplier` mapping.
///
/// Keeps declaration order for display; lookups are exact and case-sensitive.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    rules: Vec<CategoryRule>,
    index: HashMap<String, f64>,
}

impl CategoryTable {
    /// Build a table, rejecting negative or non-finite multipliers and
    /// duplicate ids.
    pub fn new(rules: Vec<CategoryRule>) -> Result<Self> {
        let mut index = HashMap::with_capacity(rules.len());
        for rule in &rules {
            if !rule.multiplier.is_finite() || rule.multiplier < 0.0 {
                return Err(Error::Config(format!(
                    "category {:?} has invalid multiplier {}",
                    rule.id, rule.multiplier
                )));
            }
            if index.insert(rule.id.clone(), rule.multiplier).is_some() {
                return Err(Error::Config(format!(
                    "duplicate category {:?}",
                    rule.id
                )));
            }
        }
        Ok(Self { rules, index })
    }

    /// Multiplier for a known category.
    pub fn get(&self, category: &str) -> Option<f64> {
        self.index.get(category).copied()
    }

    /// Multiplier for any category; unknown ones are neutral.
    pub fn multiplier(&self, category: &str) -> f64 {
        self.get(category).unwrap_or(NEUTRAL_MULTIPLIER)
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Built-in categories.
pub fn default_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new("Health", 1.2),
        CategoryRule::new("Career", 1.1),
        CategoryRule::new("Learning", 1.15),
        CategoryRule::new("Personal", 1.0),
        CategoryRule::new("Finance", 1.05),
    ]
}

impl Default for CategoryTable {
    fn default() -> Self {
        let rules = default_rules();
        let index = rules.iter().map(|r| (r.id.clone(), r.multiplier)).collect();
        Self { rules, index }
    }
}
