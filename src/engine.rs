//! Core engine. The public API for scoring activities and advancing goals.
//!
//! The engine owns the immutable rules and nothing else. Every operation
//! takes the current state by reference and returns the new state plus the
//! events describing the change; callers persist both. On error nothing is
//! returned, so there is no partial update to undo.

use chrono::{DateTime, Utc};
use opentelemetry::KeyValue;
use std::collections::HashSet;
use tracing::info;

use crate::achievement::{Evaluator, ProgressSnapshot};
use crate::config::Config;
use crate::config::rules::RuleSet;
use crate::error::Result;
use crate::event::{Event, EventKind};
use crate::model::{Achievement, Activity, Goal, TaskId};
use crate::progression;
use crate::scoring::{BatchScore, Scorer, XpBreakdown};
use crate::telemetry::{metrics, progression as spans};

/// The progression engine. Cheap to share: wrap in `Arc` for many callers.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    scorer: Scorer,
    evaluator: Evaluator,
}

/// What happened when an activity was recorded against a goal.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub goal: Goal,
    pub breakdown: XpBreakdown,
    pub events: Vec<Event>,
}

/// What an achievement evaluation unlocked.
#[derive(Debug, Clone, Default)]
pub struct Unlocks {
    pub achievements: Vec<Achievement>,
    pub events: Vec<Event>,
}

impl Engine {
    pub fn new(rules: &RuleSet) -> Result<Self> {
        Ok(Self {
            scorer: rules.scorer(),
            evaluator: rules.evaluator()?,
        })
    }

    /// Build an engine from the configured rules file, or built-in rules.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.load_rules()?)
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Score one activity. Both live previews and final submissions go
    /// through here.
    pub fn score(&self, activity: &Activity) -> Result<XpBreakdown> {
        let span = spans::start_score_span(&activity.category);
        let breakdown = span.in_scope(|| self.scorer.score(activity))?;
        spans::record_total(&span, breakdown.total);

        let known = self.scorer.categories().get(&activity.category).is_some();
        metrics::activities_scored().add(
            1,
            &[
                KeyValue::new("category", activity.category.clone()),
                KeyValue::new("known", known.to_string()),
            ],
        );
        metrics::activity_xp().record(
            breakdown.total.max(0) as u64,
            &[KeyValue::new("category", activity.category.clone())],
        );

        Ok(breakdown)
    }

    /// Score each activity through [`Engine::score`] and sum the totals in
    /// order. Fails on the first invalid activity with no partial result.
    pub fn score_batch(&self, activities: &[Activity]) -> Result<BatchScore> {
        let breakdowns = activities
            .iter()
            .map(|a| self.score(a))
            .collect::<Result<Vec<_>>>()?;
        let total = breakdowns.iter().map(|b| b.total).sum();
        Ok(BatchScore { breakdowns, total })
    }

    /// Score an activity and award its XP to `goal`.
    pub fn record_activity(
        &self,
        goal: &Goal,
        activity: &Activity,
        now: DateTime<Utc>,
    ) -> Result<Recorded> {
        let breakdown = self.score(activity)?;
        let mut events = vec![Event::new(
            now,
            EventKind::ActivityScored {
                category: activity.category.clone(),
                total: breakdown.total,
            },
        )];

        let updated = progression::apply_xp(goal, breakdown.total)?;
        events.extend(award_events(goal, &updated, "activity", now));

        Ok(Recorded {
            goal: updated,
            breakdown,
            events,
        })
    }

    /// Award a raw XP amount (e.g. from an external source) to `goal`.
    pub fn apply_xp(
        &self,
        goal: &Goal,
        delta: i64,
        now: DateTime<Utc>,
    ) -> Result<(Goal, Vec<Event>)> {
        let updated = progression::apply_xp(goal, delta)?;
        let events = award_events(goal, &updated, "external", now);
        Ok((updated, events))
    }

    /// Complete a task and pay out its reward.
    pub fn complete_task(
        &self,
        goal: &Goal,
        task_id: TaskId,
        now: DateTime<Utc>,
    ) -> Result<(Goal, Vec<Event>)> {
        let updated = progression::complete_task(goal, task_id, now)?;
        let xp_reward = updated.xp - goal.xp;

        let mut events = vec![Event::new(
            now,
            EventKind::TaskCompleted {
                goal_id: goal.id,
                task_id,
                xp_reward,
            },
        )];
        events.extend(award_events(goal, &updated, "task", now));
        Ok((updated, events))
    }

    /// Unlock every achievement whose condition now holds.
    pub fn evaluate(
        &self,
        snapshot: &ProgressSnapshot,
        unlocked: &HashSet<String>,
        now: DateTime<Utc>,
    ) -> Unlocks {
        let achievements = self.evaluator.evaluate(snapshot, unlocked, now);
        let events = achievements
            .iter()
            .map(|a| {
                info!(achievement = %a.id, rarity = %a.rarity, "achievement unlocked");
                metrics::achievements_unlocked()
                    .add(1, &[KeyValue::new("rarity", a.rarity.to_string())]);
                Event::new(
                    now,
                    EventKind::AchievementUnlocked {
                        id: a.id.clone(),
                        rarity: a.rarity,
                    },
                )
            })
            .collect();
        Unlocks {
            achievements,
            events,
        }
    }
}

/// Events for an XP change between two versions of the same goal.
fn award_events(before: &Goal, after: &Goal, source: &str, now: DateTime<Utc>) -> Vec<Event> {
    let delta = after.xp - before.xp;
    if delta == 0 {
        return Vec::new();
    }

    metrics::xp_awarded().add(
        delta,
        &[
            KeyValue::new("category", after.category.clone()),
            KeyValue::new("source", source.to_string()),
        ],
    );

    let mut events = vec![Event::new(
        now,
        EventKind::XpAwarded {
            goal_id: after.id,
            delta,
            xp: after.xp,
        },
    )];

    let (from, to) = (before.level(), after.level());
    if to != from {
        let span = tracing::Span::current();
        spans::record_level_up(&span, after.id, from, to);
        metrics::level_ups().add(1, &[KeyValue::new("category", after.category.clone())]);
        events.push(Event::new(
            now,
            EventKind::LevelUp {
                goal_id: after.id,
                from,
                to,
            },
        ));
    }
    events
}
