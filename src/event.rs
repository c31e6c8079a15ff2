//! Structured events emitted by the engine on every progression change.
//!
//! Presentation layers consume these to animate level-ups, show unlock
//! toasts, or write an audit trail. The engine only returns them; it does
//! not deliver or store them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{GoalId, Rarity, TaskId};

/// A structured event emitted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// When this event occurred.
    pub timestamp: DateTime<Utc>,
    /// What happened.
    pub kind: EventKind,
}

impl Event {
    pub fn new(timestamp: DateTime<Utc>, kind: EventKind) -> Self {
        Self { timestamp, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    ActivityScored {
        category: String,
        total: i64,
    },
    XpAwarded {
        goal_id: GoalId,
        delta: u64,
        /// Goal XP after the award.
        xp: u64,
    },
    LevelUp {
        goal_id: GoalId,
        from: u32,
        to: u32,
    },
    TaskCompleted {
        goal_id: GoalId,
        task_id: TaskId,
        xp_reward: u64,
    },
    AchievementUnlocked {
        id: String,
        rarity: Rarity,
    },
}
