//! Keyword-triggered bonus rules.

use serde::Serialize;

use crate::error::{Error, Result};

/// A named group of keywords worth a flat bonus when any of them appears
/// in the activity content. Keywords are stored lowercased.
///
/// Only [`PatternRule::new`] builds one, so the keyword invariants always hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternRule {
    pub name: String,
    pub keywords: Vec<String>,
    pub bonus: u32,
}

impl PatternRule {
    /// Build a rule. Keywords are trimmed and lowercased; blank keywords are
    /// rejected, since an empty substring would match everything.
    pub fn new<I, S>(name: impl Into<String>, keywords: I, bonus: u32) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        let mut normalized = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if keyword.is_empty() {
                return Err(Error::Config(format!("pattern {name:?} has a blank keyword")));
            }
            normalized.push(keyword);
        }
        if normalized.is_empty() {
            return Err(Error::Config(format!("pattern {name:?} has no keywords")));
        }
        Ok(Self {
            name,
            keywords: normalized,
            bonus,
        })
    }

    /// `lowered` must already be lowercased.
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

/// Built-in pattern rules, in evaluation order.
pub fn default_rules() -> Vec<PatternRule> {
    let rule = |name: &str, keywords: &[&str], bonus| PatternRule {
        name: name.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        bonus,
    };
    vec![
        rule(
            "effort",
            &["intense", "challenging", "advanced", "complex"],
            10,
        ),
        rule("planning", &["preparation", "plan", "steps", "checklist"], 5),
        rule(
            "measurement",
            &["sets", "reps", "minutes", "target", "goal"],
            8,
        ),
    ]
}
