//! Achievement definitions and unlocked records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        };
        f.pad(s)
    }
}

/// Unlock predicate over a progression snapshot.
///
/// Every leaf is an "at least" threshold. In TOML a condition is written as
/// an inline table, e.g. `{ streak_days = 7 }` or
/// `{ all = [{ level = 5 }, { streak_days = 3 }] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    TotalXp(u64),
    Level(u32),
    StreakDays(u32),
    TasksCompleted(u32),
    MilestonesCompleted(u32),
    /// Tasks completed before 9 AM local time, as counted by the caller.
    EarlyTasksCompleted(u32),
    All(Vec<Condition>),
    Any(Vec<Condition>),
}

/// Static description of something a user can earn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementDef {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub rarity: Rarity,
    pub condition: Condition,
}

/// An achievement the user has earned. `unlocked_at` is set once, when the
/// evaluator first observes the condition holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub rarity: Rarity,
    pub unlocked_at: DateTime<Utc>,
}

impl Achievement {
    pub fn unlock(def: &AchievementDef, at: DateTime<Utc>) -> Self {
        Self {
            id: def.id.clone(),
            title: def.title.clone(),
            description: def.description.clone(),
            rarity: def.rarity,
            unlocked_at: at,
        }
    }
}
