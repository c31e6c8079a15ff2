//! Integration tests for achievement evaluation.

use chrono::{TimeZone, Utc};
use levelup_rs::achievement::{Evaluator, ProgressSnapshot, default_catalog};
use levelup_rs::error::Error;
use levelup_rs::model::{AchievementDef, Condition, Goal, Priority, Rarity, Task, TaskStatus};
use std::collections::HashSet;

fn def(id: &str, condition: Condition) -> AchievementDef {
    AchievementDef {
        id: id.to_string(),
        title: id.to_string(),
        description: String::new(),
        rarity: Rarity::Common,
        condition,
    }
}

fn ids(achievements: &[levelup_rs::model::Achievement]) -> Vec<&str> {
    achievements.iter().map(|a| a.id.as_str()).collect()
}

#[test]
fn nothing_unlocks_from_a_fresh_start() {
    let evaluator = Evaluator::default();
    let unlocked = evaluator.evaluate(&ProgressSnapshot::default(), &HashSet::new(), Utc::now());
    assert!(unlocked.is_empty());
}

#[test]
fn seven_day_streak_unlocks_consistency_champion() {
    let evaluator = Evaluator::default();
    let now = Utc.with_ymd_and_hms(2024, 3, 14, 12, 0, 0).unwrap();
    let snapshot = ProgressSnapshot {
        streak_days: 7,
        ..Default::default()
    };

    let unlocked = evaluator.evaluate(&snapshot, &HashSet::new(), now);
    assert_eq!(ids(&unlocked), vec!["consistency-champion"]);
    assert_eq!(unlocked[0].rarity, Rarity::Epic);
    assert_eq!(unlocked[0].unlocked_at, now);
}

#[test]
fn unlocks_come_back_in_catalog_order() {
    let evaluator = Evaluator::default();
    let snapshot = ProgressSnapshot {
        streak_days: 30,
        tasks_completed: 12,
        milestones_completed: 1,
        early_tasks_completed: 5,
        ..Default::default()
    };

    let unlocked = evaluator.evaluate(&snapshot, &HashSet::new(), Utc::now());
    assert_eq!(
        ids(&unlocked),
        vec![
            "first-steps",
            "early-bird",
            "consistency-champion",
            "goal-crusher"
        ]
    );
}

#[test]
fn evaluation_is_idempotent() {
    let evaluator = Evaluator::default();
    let snapshot = ProgressSnapshot {
        streak_days: 7,
        tasks_completed: 1,
        ..Default::default()
    };

    let mut unlocked_ids = HashSet::new();
    let first = evaluator.evaluate(&snapshot, &unlocked_ids, Utc::now());
    assert_eq!(first.len(), 2);
    unlocked_ids.extend(first.into_iter().map(|a| a.id));

    let second = evaluator.evaluate(&snapshot, &unlocked_ids, Utc::now());
    assert!(second.is_empty());
}

#[test]
fn already_unlocked_is_never_reemitted_even_if_condition_no_longer_holds() {
    let evaluator = Evaluator::default();
    // Streak broke after the achievement was earned.
    let snapshot = ProgressSnapshot::default();
    let unlocked: HashSet<String> = ["consistency-champion".to_string()].into();

    assert!(evaluator.evaluate(&snapshot, &unlocked, Utc::now()).is_empty());
}

#[test]
fn composite_conditions() {
    let evaluator = Evaluator::new(vec![
        def(
            "both",
            Condition::All(vec![Condition::Level(3), Condition::StreakDays(3)]),
        ),
        def(
            "either",
            Condition::Any(vec![Condition::TotalXp(5000), Condition::TasksCompleted(2)]),
        ),
        def("vacuous", Condition::All(vec![])),
        def("impossible", Condition::Any(vec![])),
    ])
    .unwrap();

    let snapshot = ProgressSnapshot {
        total_xp: 2500,
        level: 3,
        streak_days: 2,
        tasks_completed: 2,
        ..Default::default()
    };

    let unlocked = evaluator.evaluate(&snapshot, &HashSet::new(), Utc::now());
    assert_eq!(ids(&unlocked), vec!["either", "vacuous"]);
}

#[test]
fn thresholds_are_inclusive() {
    let snapshot = ProgressSnapshot {
        total_xp: 1000,
        level: 2,
        ..Default::default()
    };
    assert!(Condition::TotalXp(1000).holds(&snapshot));
    assert!(!Condition::TotalXp(1001).holds(&snapshot));
    assert!(Condition::Level(2).holds(&snapshot));
}

#[test]
fn duplicate_ids_are_rejected() {
    let result = Evaluator::new(vec![
        def("dup", Condition::Level(2)),
        def("dup", Condition::Level(3)),
    ]);
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn snapshot_from_goals_counts_completed_tasks_and_milestones() {
    let mut milestone = Task::milestone("Lead initiative", 1000);
    milestone.status = TaskStatus::Completed;
    let mut daily = Task::new("1:1", 50, Priority::Medium);
    daily.status = TaskStatus::Completed;
    let pending = Task::new("Network", 100, Priority::Low);

    let goals = vec![
        Goal::new("Promotion", "Career")
            .with_xp(1050)
            .with_task(milestone)
            .with_task(daily)
            .with_task(pending),
        Goal::new("Fitness", "Health").with_xp(200),
    ];

    let snapshot = ProgressSnapshot::from_goals(&goals, 4, 1);
    assert_eq!(snapshot.total_xp, 1250);
    assert_eq!(snapshot.level, 2);
    assert_eq!(snapshot.streak_days, 4);
    assert_eq!(snapshot.tasks_completed, 2);
    assert_eq!(snapshot.milestones_completed, 1);
    assert_eq!(snapshot.early_tasks_completed, 1);

    let unlocked = Evaluator::default().evaluate(&snapshot, &HashSet::new(), Utc::now());
    assert_eq!(ids(&unlocked), vec!["first-steps", "goal-crusher"]);
}

#[test]
fn default_catalog_covers_every_rarity() {
    let rarities: HashSet<Rarity> = default_catalog().iter().map(|d| d.rarity).collect();
    assert_eq!(rarities.len(), 4);
}
