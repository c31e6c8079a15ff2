//! Progression tracking: XP accumulation and level derivation.
//!
//! Level is a pure function of XP. Nothing here increments a level on its
//! own, so the two can never disagree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::model::{Goal, TaskId, TaskStatus};

/// XP needed to advance one level.
pub const XP_PER_LEVEL: u64 = 1000;

/// Level for a cumulative XP amount. Levels start at 1.
pub fn level_of(xp: u64) -> u32 {
    u32::try_from(xp / XP_PER_LEVEL + 1).unwrap_or(u32::MAX)
}

/// Where an XP total sits within its level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: u32,
    /// XP earned since the current level began.
    pub current_level_xp: u64,
    pub xp_to_next_level: u64,
    /// `current_level_xp / xp_to_next_level`, in `[0, 1)`.
    pub progress_fraction: f64,
}

impl LevelProgress {
    pub fn from_xp(xp: u64) -> Self {
        let current_level_xp = xp % XP_PER_LEVEL;
        Self {
            level: level_of(xp),
            current_level_xp,
            xp_to_next_level: XP_PER_LEVEL,
            progress_fraction: current_level_xp as f64 / XP_PER_LEVEL as f64,
        }
    }
}

/// Award XP to a goal, returning the updated goal.
///
/// # Errors
///
/// [`Error::InvalidDelta`] if `delta` is negative. XP is a permanent record;
/// the input goal is never touched either way.
pub fn apply_xp(goal: &Goal, delta: i64) -> Result<Goal> {
    let delta = u64::try_from(delta).map_err(|_| Error::InvalidDelta(delta))?;
    Ok(add_xp(goal, delta))
}

/// XP saturates at `u64::MAX`.
fn add_xp(goal: &Goal, amount: u64) -> Goal {
    let mut updated = goal.clone();
    updated.xp = goal.xp.saturating_add(amount);
    updated
}

/// Mark a task complete and award its XP reward to the owning goal.
///
/// # Errors
///
/// [`Error::TaskNotFound`] if the goal has no such task,
/// [`Error::TaskAlreadyCompleted`] if it was completed before. Rewards are
/// paid once.
pub fn complete_task(goal: &Goal, task_id: TaskId, now: DateTime<Utc>) -> Result<Goal> {
    let task = goal.task(task_id).ok_or(Error::TaskNotFound(task_id))?;
    if task.is_completed() {
        return Err(Error::TaskAlreadyCompleted(task_id));
    }
    let mut updated = add_xp(goal, task.xp_reward);
    if let Some(task) = updated.tasks.iter_mut().find(|t| t.id == task_id) {
        task.status = TaskStatus::Completed;
        task.completed_at = Some(now);
    }
    Ok(updated)
}

// ---------------------------------------------------------------------------
// User aggregate
// ---------------------------------------------------------------------------

/// User-level progression, derived from the full goal set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    pub total_xp: u64,
    pub level: u32,
    /// Consecutive active days, as computed by the caller.
    pub streak_days: u32,
}

impl UserProgress {
    pub fn from_goals(goals: &[Goal], streak_days: u32) -> Self {
        let total_xp = total_xp(goals);
        Self {
            total_xp,
            level: level_of(total_xp),
            streak_days,
        }
    }

    pub fn progress(&self) -> LevelProgress {
        LevelProgress::from_xp(self.total_xp)
    }
}

pub fn total_xp(goals: &[Goal]) -> u64 {
    goals.iter().fold(0u64, |sum, g| sum.saturating_add(g.xp))
}

/// XP per category across all goals, ordered by category name.
pub fn xp_by_category(goals: &[Goal]) -> BTreeMap<String, u64> {
    let mut totals = BTreeMap::new();
    for goal in goals {
        let entry = totals.entry(goal.category.clone()).or_insert(0u64);
        *entry = entry.saturating_add(goal.xp);
    }
    totals
}
