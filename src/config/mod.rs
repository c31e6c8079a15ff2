//! Typed configuration from environment variables.
//!
//! Loads once at startup. Scoring and achievement rules live in an optional
//! TOML file (see [`rules`]); without one the built-in rules apply.

pub mod rules;

use std::path::PathBuf;

use crate::error::{Error, Result};
use rules::RuleSet;

#[derive(Debug, Clone)]
pub struct Config {
    /// Path to a rules TOML file. `None` means built-in rules.
    pub rules_path: Option<PathBuf>,
    pub otel_endpoint: Option<String>,
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In local dev, call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self> {
        let rules_path = optional_var("LEVELUP_RULES").map(PathBuf::from);
        if let Some(ref path) = rules_path {
            if !path.is_file() {
                return Err(Error::Config(format!(
                    "LEVELUP_RULES points at {}, which is not a file",
                    path.display()
                )));
            }
        }
        Ok(Self {
            rules_path,
            otel_endpoint: optional_var("OTEL_ENDPOINT"),
            log_level: optional_var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Load the configured rule set, or the built-in one.
    pub fn load_rules(&self) -> Result<RuleSet> {
        match self.rules_path {
            Some(ref path) => RuleSet::load(path),
            None => Ok(RuleSet::default()),
        }
    }
}

/// Unset and blank are treated the same.
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
