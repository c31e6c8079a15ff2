//! Error types for levelup-rs.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::goal::TaskId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid interval: end {end} is before start {start}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("invalid xp delta: {0} (xp can only be awarded, not deducted)")]
    InvalidDelta(i64),

    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("task already completed: {0}")]
    TaskAlreadyCompleted(TaskId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
