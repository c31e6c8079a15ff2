//! # levelup-rs
//!
//! Scoring and progression engine for a gamified goal tracker.
//!
//! Turns activity records into itemized XP, accumulates XP on goals, derives
//! levels, and unlocks achievements. Pure and synchronous: storage, calendars
//! and streak computation belong to the caller.

pub mod achievement;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod model;
pub mod progression;
pub mod scoring;
pub mod telemetry;
