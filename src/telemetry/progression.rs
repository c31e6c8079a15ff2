//! Progression span helpers.
//!
//! Provides span creation for scoring and level-change recording for goals
//! flowing through the engine.

use tracing::Span;

use crate::model::GoalId;

/// Start a span for scoring one activity.
///
/// The `xp.total` field is declared empty and filled via [`record_total`].
pub fn start_score_span(category: &str) -> Span {
    tracing::debug_span!(
        "activity.score",
        "activity.category" = category,
        "xp.total" = tracing::field::Empty,
    )
}

/// Record the scored total on a span made by [`start_score_span`].
pub fn record_total(span: &Span, total: i64) {
    span.record("xp.total", total);
}

/// Record a goal level change.
///
/// Emits a tracing `info` event scoped to the given span.
pub fn record_level_up(span: &Span, goal_id: GoalId, from: u32, to: u32) {
    span.in_scope(|| {
        tracing::info!(goal_id = %goal_id, from, to, "level_up");
    });
}
