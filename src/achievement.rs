//! Achievement evaluation.
//!
//! The evaluator is a pure function of a progression snapshot and the set of
//! achievement IDs already unlocked. It never re-emits an unlocked
//! achievement, and it never revokes one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::model::{Achievement, AchievementDef, Condition, Goal, Rarity};
use crate::progression::{level_of, total_xp};

/// Everything an unlock condition can look at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub total_xp: u64,
    pub level: u32,
    pub streak_days: u32,
    pub tasks_completed: u32,
    pub milestones_completed: u32,
    pub early_tasks_completed: u32,
}

impl ProgressSnapshot {
    /// Derive XP, level and task counts from a goal set. Streak and
    /// early-task counts come from persisted history the engine can't see.
    pub fn from_goals(goals: &[Goal], streak_days: u32, early_tasks_completed: u32) -> Self {
        let total_xp = total_xp(goals);
        let completed = goals.iter().flat_map(|g| g.completed_tasks());
        let (mut tasks_completed, mut milestones_completed) = (0u32, 0u32);
        for task in completed {
            tasks_completed += 1;
            if task.is_milestone() {
                milestones_completed += 1;
            }
        }
        Self {
            total_xp,
            level: level_of(total_xp),
            streak_days,
            tasks_completed,
            milestones_completed,
            early_tasks_completed,
        }
    }
}

impl Condition {
    /// Does the condition hold for this snapshot?
    pub fn holds(&self, s: &ProgressSnapshot) -> bool {
        match self {
            Condition::TotalXp(n) => s.total_xp >= *n,
            Condition::Level(n) => s.level >= *n,
            Condition::StreakDays(n) => s.streak_days >= *n,
            Condition::TasksCompleted(n) => s.tasks_completed >= *n,
            Condition::MilestonesCompleted(n) => s.milestones_completed >= *n,
            Condition::EarlyTasksCompleted(n) => s.early_tasks_completed >= *n,
            Condition::All(conds) => conds.iter().all(|c| c.holds(s)),
            Condition::Any(conds) => conds.iter().any(|c| c.holds(s)),
        }
    }
}

/// Checks achievement definitions against progression snapshots.
#[derive(Debug, Clone)]
pub struct Evaluator {
    catalog: Vec<AchievementDef>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
        }
    }
}

impl Evaluator {
    /// Build an evaluator over a catalog. Achievement IDs must be unique.
    pub fn new(catalog: Vec<AchievementDef>) -> Result<Self> {
        let mut seen = HashSet::new();
        for def in &catalog {
            if !seen.insert(def.id.as_str()) {
                return Err(Error::Config(format!("duplicate achievement {:?}", def.id)));
            }
        }
        Ok(Self { catalog })
    }

    pub fn catalog(&self) -> &[AchievementDef] {
        &self.catalog
    }

    /// Return the achievements newly unlocked by `snapshot`, in catalog
    /// order, stamped with `now`.
    ///
    /// Achievements whose IDs are in `unlocked` are skipped without checking
    /// their conditions.
    pub fn evaluate(
        &self,
        snapshot: &ProgressSnapshot,
        unlocked: &HashSet<String>,
        now: DateTime<Utc>,
    ) -> Vec<Achievement> {
        self.catalog
            .iter()
            .filter(|def| !unlocked.contains(&def.id))
            .filter(|def| def.condition.holds(snapshot))
            .map(|def| Achievement::unlock(def, now))
            .collect()
    }
}

/// Built-in achievements.
pub fn default_catalog() -> Vec<AchievementDef> {
    let def = |id: &str, title: &str, description: &str, rarity, condition| AchievementDef {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        rarity,
        condition,
    };
    vec![
        def(
            "first-steps",
            "First Steps",
            "Complete your first task",
            Rarity::Common,
            Condition::TasksCompleted(1),
        ),
        def(
            "early-bird",
            "Early Bird",
            "Complete 5 tasks before 9 AM",
            Rarity::Rare,
            Condition::EarlyTasksCompleted(5),
        ),
        def(
            "consistency-champion",
            "Consistency Champion",
            "Maintain a 7-day streak",
            Rarity::Epic,
            Condition::StreakDays(7),
        ),
        def(
            "goal-crusher",
            "Goal Crusher",
            "Complete your first major milestone",
            Rarity::Legendary,
            Condition::MilestonesCompleted(1),
        ),
    ]
}
