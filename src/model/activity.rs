//! Activity records: the input to scoring.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A scheduled or completed block of time the user spent on something.
///
/// Duration is always derived from `start` and `end`; it is never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Category identifier (e.g., "Health", "Career"). Looked up in the
    /// category table; unknown categories score with a neutral multiplier.
    pub category: String,

    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,

    /// Free-text details (workout plan, checklist, notes). Opaque text.
    #[serde(default)]
    pub content: Option<String>,

    /// Display title. Not scored.
    #[serde(default)]
    pub title: Option<String>,
}

impl Activity {
    pub fn new(category: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            category: category.into(),
            start,
            end,
            content: None,
            title: None,
        }
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Elapsed time between start and end.
    ///
    /// Fails with [`Error::InvalidInterval`] if `end` is before `start`.
    /// A zero-length activity is valid.
    pub fn duration(&self) -> Result<Duration> {
        if self.end < self.start {
            return Err(Error::InvalidInterval {
                start: self.start,
                end: self.end,
            });
        }
        Ok(self.end - self.start)
    }

    /// Duration in fractional hours, millisecond precision.
    pub fn duration_hours(&self) -> Result<f64> {
        Ok(self.duration()?.num_milliseconds() as f64 / 3_600_000.0)
    }

    /// Content if present and non-empty.
    pub fn text(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }
}
