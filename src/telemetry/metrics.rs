//! Metric instrument factories for levelup-rs.
//!
//! Uses the OTel Meter API with the globally-registered `MeterProvider`.
//! All instruments are created lazily from the `"levelup-rs"` meter. With no
//! provider registered they are no-ops.

use opentelemetry::metrics::{Counter, Histogram, Meter};

/// Returns the shared meter for levelup-rs instruments.
fn meter() -> Meter {
    opentelemetry::global::meter("levelup-rs")
}

/// Counter: activities scored.
/// Labels: `category`, `known` ("true" | "false").
pub fn activities_scored() -> Counter<u64> {
    meter()
        .u64_counter("levelup.activities.scored")
        .with_description("Number of activities scored")
        .build()
}

/// Histogram: total XP per scored activity.
/// Labels: `category`.
pub fn activity_xp() -> Histogram<u64> {
    meter()
        .u64_histogram("levelup.activity.xp")
        .with_description("Total XP awarded per activity")
        .with_unit("xp")
        .build()
}

/// Counter: XP awarded to goals.
/// Labels: `category`, `source` ("activity" | "task").
pub fn xp_awarded() -> Counter<u64> {
    meter()
        .u64_counter("levelup.xp.awarded")
        .with_description("XP awarded to goals")
        .build()
}

/// Counter: goal level-ups.
/// Labels: `category`.
pub fn level_ups() -> Counter<u64> {
    meter()
        .u64_counter("levelup.level_ups")
        .with_description("Number of goal level-ups")
        .build()
}

/// Counter: achievements unlocked.
/// Labels: `rarity`.
pub fn achievements_unlocked() -> Counter<u64> {
    meter()
        .u64_counter("levelup.achievements.unlocked")
        .with_description("Number of achievements unlocked")
        .build()
}
