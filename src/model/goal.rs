//! Goals and the tasks that break them down.
//!
//! A goal accumulates XP and derives its level from it. Tasks are either
//! milestones (high priority) or daily tasks (medium/low priority).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::progression::{LevelProgress, level_of};

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Newtype for goal IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GoalId(pub Uuid);

impl GoalId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GoalId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GoalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Short display: first 8 chars of UUID
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Newtype for task IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

// ---------------------------------------------------------------------------
// Goal
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Active,
    Paused,
}

/// A long-running objective in one category.
///
/// `xp` only ever grows, and only through [`crate::progression::apply_xp`].
/// Level is derived on demand so it cannot drift from `xp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub title: String,
    pub category: String,
    pub xp: u64,
    pub status: GoalStatus,
    /// Milestones and daily tasks, in the order the user arranged them.
    #[serde(default)]
    pub tasks: Vec<Task>,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: GoalId::new(),
            title: title.into(),
            category: category.into(),
            xp: 0,
            status: GoalStatus::Active,
            tasks: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_xp(mut self, xp: u64) -> Self {
        self.xp = xp;
        self
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn level(&self) -> u32 {
        level_of(self.xp)
    }

    pub fn progress(&self) -> LevelProgress {
        LevelProgress::from_xp(self.xp)
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn milestones(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.is_milestone())
    }

    pub fn daily_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.is_milestone())
    }

    pub fn completed_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.status == TaskStatus::Completed)
    }
}

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        };
        write!(f, "{s}")
    }
}

/// A unit of work under a goal. Completing it awards `xp_reward` to the goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub xp_reward: u64,
    /// Planned duration in minutes.
    pub duration_minutes: u32,
    pub priority: Priority,
    pub status: TaskStatus,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(title: impl Into<String>, xp_reward: u64, priority: Priority) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            description: None,
            xp_reward,
            duration_minutes: 0,
            priority,
            status: TaskStatus::Pending,
            completed_at: None,
        }
    }

    /// Shorthand for a high-priority task.
    pub fn milestone(title: impl Into<String>, xp_reward: u64) -> Self {
        Self::new(title, xp_reward, Priority::High)
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    pub fn is_milestone(&self) -> bool {
        self.priority == Priority::High
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}
