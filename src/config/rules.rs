//! Scoring and achievement rules, loadable from TOML.
//!
//! ```toml
//! [[category]]
//! id = "Health"
//! multiplier = 1.2
//!
//! [[category]]
//! id = "Hobby"            # multiplier defaults to 1.0
//!
//! [[pattern]]
//! name = "effort"
//! keywords = ["intense", "challenging"]
//! bonus = 10
//!
//! [[achievement]]
//! id = "consistency-champion"
//! title = "Consistency Champion"
//! rarity = "epic"
//! condition = { streak_days = 7 }
//! ```
//!
//! A section left out of the file keeps its built-in defaults; a section
//! that is present replaces them entirely.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::achievement::{self, Evaluator};
use crate::error::{Error, Result};
use crate::model::AchievementDef;
use crate::scoring::Scorer;
use crate::scoring::category::{self, CategoryRule, CategoryTable};
use crate::scoring::pattern::{self, PatternRule};

/// Top-level TOML layout.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RulesFile {
    category: Option<Vec<CategoryRule>>,
    pattern: Option<Vec<PatternEntry>>,
    achievement: Option<Vec<AchievementDef>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PatternEntry {
    name: String,
    keywords: Vec<String>,
    bonus: u32,
}

/// Validated, immutable rules. Build once, then hand to the engine.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub categories: CategoryTable,
    pub patterns: Vec<PatternRule>,
    pub achievements: Vec<AchievementDef>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            categories: CategoryTable::default(),
            patterns: pattern::default_rules(),
            achievements: achievement::default_catalog(),
        }
    }
}

impl RuleSet {
    /// Read and validate a rules file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read rules file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// Parse and validate rules from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: RulesFile =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;

        let categories = CategoryTable::new(file.category.unwrap_or_else(category::default_rules))?;

        let patterns = match file.pattern {
            Some(entries) => {
                let mut names = HashSet::new();
                let mut rules = Vec::with_capacity(entries.len());
                for entry in entries {
                    if !names.insert(entry.name.clone()) {
                        return Err(Error::Config(format!("duplicate pattern {:?}", entry.name)));
                    }
                    rules.push(PatternRule::new(entry.name, entry.keywords, entry.bonus)?);
                }
                rules
            }
            None => pattern::default_rules(),
        };

        let achievements = file.achievement.unwrap_or_else(achievement::default_catalog);
        // IDs must be unique.
        Evaluator::new(achievements.clone())?;

        Ok(Self {
            categories,
            patterns,
            achievements,
        })
    }

    pub fn scorer(&self) -> Scorer {
        Scorer::new(self.categories.clone(), self.patterns.clone())
    }

    pub fn evaluator(&self) -> Result<Evaluator> {
        Evaluator::new(self.achievements.clone())
    }
}
