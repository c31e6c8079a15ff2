//! Core data model.
//!
//! Activities are what the user did, goals are what the user is working
//! toward, achievements are what the user has earned. None of these are
//! persisted here; callers hand them in and store what comes back.

pub mod achievement;
pub mod activity;
pub mod goal;

pub use achievement::{Achievement, AchievementDef, Condition, Rarity};
pub use activity::Activity;
pub use goal::{Goal, GoalId, GoalStatus, Priority, Task, TaskId, TaskStatus};
