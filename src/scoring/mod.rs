//! Activity scoring: turns one activity into an itemized XP breakdown.
//!
//! Every component is rounded on its own before the total is summed, so a
//! breakdown always adds up exactly. The category bonus is taken from the
//! unmultiplied base, which means `base + category_bonus` can differ from
//! `round(base * multiplier)`.

pub mod category;
pub mod content;
pub mod pattern;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::model::Activity;
use category::CategoryTable;
use pattern::PatternRule;

/// XP per hour of activity before any bonus.
pub const BASE_XP_PER_HOUR: f64 = 15.0;

/// Flat bonus for content laid out as a list.
pub const STRUCTURE_BONUS: i64 = 10;

/// Bonus per numbered step.
pub const STEP_BONUS: i64 = 2;

/// Round half up, the way the rest of the product rounds XP.
///
/// Differs from [`f64::round`] for negative halves: `-2.5` becomes `-2`.
pub fn round_xp(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

// ---------------------------------------------------------------------------
// Breakdown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternBonus {
    pub name: String,
    pub bonus: i64,
}

/// Itemized XP for one activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpBreakdown {
    pub base: i64,
    pub category_bonus: i64,
    pub structure_bonus: i64,
    pub step_bonus: i64,
    /// Matching pattern rules, in rule declaration order.
    pub pattern_bonuses: Vec<PatternBonus>,
    pub total: i64,
}

impl XpBreakdown {
    pub fn pattern_total(&self) -> i64 {
        self.pattern_bonuses.iter().map(|p| p.bonus).sum()
    }

    /// Sum of the components. Always equal to `total`.
    pub fn component_sum(&self) -> i64 {
        self.base
            + self.category_bonus
            + self.structure_bonus
            + self.step_bonus
            + self.pattern_total()
    }
}

/// Scores for a batch of activities, summed per activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchScore {
    pub breakdowns: Vec<XpBreakdown>,
    pub total: i64,
}

// ---------------------------------------------------------------------------
// Scorer
// ---------------------------------------------------------------------------

/// The single scoring implementation. Built once from configuration and
/// shared by every caller.
#[derive(Debug, Clone)]
pub struct Scorer {
    categories: CategoryTable,
    patterns: Vec<PatternRule>,
}

impl Default for Scorer {
    fn default() -> Self {
        Self {
            categories: CategoryTable::default(),
            patterns: pattern::default_rules(),
        }
    }
}

impl Scorer {
    pub fn new(categories: CategoryTable, patterns: Vec<PatternRule>) -> Self {
        Self {
            categories,
            patterns,
        }
    }

    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    pub fn patterns(&self) -> &[PatternRule] {
        &self.patterns
    }

    /// Compute the XP breakdown for one activity.
    ///
    /// # Errors
    ///
    /// [`crate::error::Error::InvalidInterval`] if the activity ends before it starts.
    pub fn score(&self, activity: &Activity) -> Result<XpBreakdown> {
        let hours = activity.duration_hours()?;
        let base = round_xp(hours * BASE_XP_PER_HOUR);

        let multiplier = match self.categories.get(&activity.category) {
            Some(m) => m,
            None => {
                debug!(category = %activity.category, "unknown category, using neutral multiplier");
                category::NEUTRAL_MULTIPLIER
            }
        };
        let category_bonus = round_xp(base as f64 * (multiplier - 1.0));

        let mut structure_bonus = 0;
        let mut step_bonus = 0;
        let mut pattern_bonuses = Vec::new();

        if let Some(text) = activity.text() {
            if content::has_structure(text) {
                structure_bonus = STRUCTURE_BONUS;
            }
            step_bonus = STEP_BONUS * content::count_steps(text) as i64;

            let lowered = text.to_lowercase();
            pattern_bonuses.extend(
                self.patterns
                    .iter()
                    .filter(|rule| rule.matches(&lowered))
                    .map(|rule| PatternBonus {
                        name: rule.name.clone(),
                        bonus: i64::from(rule.bonus),
                    }),
            );
        }

        let mut breakdown = XpBreakdown {
            base,
            category_bonus,
            structure_bonus,
            step_bonus,
            pattern_bonuses,
            total: 0,
        };
        breakdown.total = breakdown.component_sum();

        debug!(
            category = %activity.category,
            hours,
            base,
            category_bonus,
            structure_bonus,
            step_bonus,
            total = breakdown.total,
            "activity scored"
        );

        Ok(breakdown)
    }

    /// Score each activity independently and sum the integer totals.
    ///
    /// Never derives XP from aggregated duration. Fails on the first invalid
    /// activity without returning partial results.
    pub fn score_batch(&self, activities: &[Activity]) -> Result<BatchScore> {
        let breakdowns = activities
            .iter()
            .map(|a| self.score(a))
            .collect::<Result<Vec<_>>>()?;
        let total = breakdowns.iter().map(|b| b.total).sum();
        Ok(BatchScore { breakdowns, total })
    }
}
