//! Integration tests for activity scoring.

use chrono::{DateTime, Duration, TimeZone, Utc};
use levelup_rs::error::Error;
use levelup_rs::model::Activity;
use levelup_rs::scoring::category::{CategoryRule, CategoryTable};
use levelup_rs::scoring::pattern::PatternRule;
use levelup_rs::scoring::{PatternBonus, Scorer, round_xp};

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 14, hour, min, 0).unwrap()
}

fn activity(category: &str, minutes: i64) -> Activity {
    let start = at(7, 0);
    Activity::new(category, start, start + Duration::minutes(minutes))
}

// ---------------------------------------------------------------------------
// Reference scenarios
// ---------------------------------------------------------------------------

#[test]
fn one_hour_health_with_numbered_steps() {
    let scorer = Scorer::default();
    let a = activity("Health", 60).content("1. Warm-up\n2. Main set\n");

    let b = scorer.score(&a).unwrap();
    assert_eq!(b.base, 15);
    assert_eq!(b.category_bonus, 3);
    assert_eq!(b.structure_bonus, 10);
    assert_eq!(b.step_bonus, 4);
    assert!(b.pattern_bonuses.is_empty());
    assert_eq!(b.total, 32);
}

#[test]
fn zero_hour_personal_without_content_scores_nothing() {
    let scorer = Scorer::default();
    let a = activity("Personal", 0);

    let b = scorer.score(&a).unwrap();
    assert_eq!(b.base, 0);
    assert_eq!(b.category_bonus, 0);
    assert_eq!(b.structure_bonus, 0);
    assert_eq!(b.step_bonus, 0);
    assert!(b.pattern_bonuses.is_empty());
    assert_eq!(b.total, 0);
}

#[test]
fn two_hour_career_with_keywords() {
    let scorer = Scorer::default();
    let a = activity("Career", 120).content("A challenging session to plan the roadmap");

    let b = scorer.score(&a).unwrap();
    assert_eq!(b.base, 30);
    assert_eq!(b.category_bonus, 3);
    assert_eq!(b.structure_bonus, 0);
    assert_eq!(b.step_bonus, 0);
    assert_eq!(
        b.pattern_bonuses,
        vec![
            PatternBonus {
                name: "effort".to_string(),
                bonus: 10
            },
            PatternBonus {
                name: "planning".to_string(),
                bonus: 5
            },
        ]
    );
    assert_eq!(b.total, 48);
}

// ---------------------------------------------------------------------------
// Base and category
// ---------------------------------------------------------------------------

#[test]
fn half_hours_round_up() {
    let scorer = Scorer::default();
    // 0.5h * 15 = 7.5
    assert_eq!(scorer.score(&activity("Personal", 30)).unwrap().base, 8);
    // 1.5h * 15 = 22.5
    assert_eq!(scorer.score(&activity("Personal", 90)).unwrap().base, 23);
}

#[test]
fn category_bonus_uses_unmultiplied_base() {
    let scorer = Scorer::default();
    // base 23, 23 * 0.2 = 4.6 -> 5
    let b = scorer.score(&activity("Health", 90)).unwrap();
    assert_eq!(b.base, 23);
    assert_eq!(b.category_bonus, 5);
    assert_eq!(b.total, 28);
}

#[test]
fn small_multiplier_rounds_each_component() {
    let scorer = Scorer::default();
    // Finance 1.05: 15 * 0.05 = 0.75 -> 1
    let b = scorer.score(&activity("Finance", 60)).unwrap();
    assert_eq!(b.base, 15);
    assert_eq!(b.category_bonus, 1);
}

#[test]
fn unknown_category_is_neutral() {
    let scorer = Scorer::default();
    let b = scorer.score(&activity("Underwater Basketry", 120)).unwrap();
    assert_eq!(b.base, 30);
    assert_eq!(b.category_bonus, 0);
    assert_eq!(b.total, 30);
}

#[test]
fn category_lookup_is_case_sensitive() {
    let scorer = Scorer::default();
    let b = scorer.score(&activity("health", 60)).unwrap();
    assert_eq!(b.category_bonus, 0);
}

#[test]
fn multiplier_below_one_gives_negative_bonus() {
    let table = CategoryTable::new(vec![CategoryRule::new("Chores", 0.5)]).unwrap();
    let scorer = Scorer::new(table, Vec::new());

    // 15 * -0.5 = -7.5, half up -> -7
    let b = scorer.score(&activity("Chores", 60)).unwrap();
    assert_eq!(b.category_bonus, -7);
    assert_eq!(b.total, 8);
}

#[test]
fn round_xp_is_half_up() {
    assert_eq!(round_xp(2.5), 3);
    assert_eq!(round_xp(-2.5), -2);
    assert_eq!(round_xp(2.4999), 2);
    assert_eq!(round_xp(0.0), 0);
}

#[test]
fn end_before_start_is_rejected() {
    let scorer = Scorer::default();
    let a = Activity::new("Health", at(9, 0), at(8, 0));

    match scorer.score(&a) {
        Err(Error::InvalidInterval { start, end }) => {
            assert_eq!(start, at(9, 0));
            assert_eq!(end, at(8, 0));
        }
        other => panic!("expected InvalidInterval, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

#[test]
fn bullets_earn_structure_but_not_steps() {
    let scorer = Scorer::default();
    let a = activity("Personal", 60).content("Errands\n- pharmacy\n• bank");

    let b = scorer.score(&a).unwrap();
    assert_eq!(b.structure_bonus, 10);
    assert_eq!(b.step_bonus, 0);
}

#[test]
fn indented_markers_earn_nothing() {
    let scorer = Scorer::default();
    let a = activity("Personal", 0).content("Notes\n   - indented bullet\n  3. indented step");

    let b = scorer.score(&a).unwrap();
    assert_eq!(b.structure_bonus, 0);
    assert_eq!(b.step_bonus, 0);
    assert_eq!(b.total, 0);
}

#[test]
fn structure_bonus_is_flat() {
    let scorer = Scorer::default();
    let content = "1. a\n2. b\n3. c\n4. d\n5. e";
    let b = scorer.score(&activity("Personal", 0).content(content)).unwrap();
    assert_eq!(b.structure_bonus, 10);
    assert_eq!(b.step_bonus, 10);
    assert_eq!(b.total, 20);
}

#[test]
fn zero_duration_still_earns_content_bonuses() {
    let scorer = Scorer::default();
    let a = activity("Health", 0).content("1. Intense intervals");

    let b = scorer.score(&a).unwrap();
    assert_eq!(b.base, 0);
    assert_eq!(b.category_bonus, 0);
    assert_eq!(b.structure_bonus, 10);
    assert_eq!(b.step_bonus, 2);
    assert_eq!(b.pattern_total(), 10);
    assert_eq!(b.total, 22);
}

#[test]
fn empty_content_counts_as_none() {
    let scorer = Scorer::default();
    let b = scorer.score(&activity("Career", 60).content("")).unwrap();
    assert_eq!(b.structure_bonus, 0);
    assert_eq!(b.step_bonus, 0);
    assert!(b.pattern_bonuses.is_empty());
}

#[test]
fn keywords_match_case_insensitively_and_inside_words() {
    let scorer = Scorer::default();
    let a = activity("Learning", 60).content("ADVANCED topics, then PLANNING");

    let names: Vec<_> = scorer
        .score(&a)
        .unwrap()
        .pattern_bonuses
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["effort", "planning"]);
}

#[test]
fn each_rule_counts_once_however_many_keywords_hit() {
    let scorer = Scorer::default();
    let a = activity("Health", 60).content("3 sets x 8 reps, 20 minutes, hit the target");

    let b = scorer.score(&a).unwrap();
    assert_eq!(b.pattern_bonuses.len(), 1);
    assert_eq!(b.pattern_bonuses[0].name, "measurement");
    assert_eq!(b.pattern_bonuses[0].bonus, 8);
}

#[test]
fn pattern_bonuses_follow_rule_order_not_text_order() {
    let patterns = vec![
        PatternRule::new("second-in-text", ["zebra"], 1).unwrap(),
        PatternRule::new("first-in-text", ["aardvark"], 2).unwrap(),
    ];
    let scorer = Scorer::new(CategoryTable::default(), patterns);
    let a = activity("Personal", 0).content("aardvark then zebra");

    let names: Vec<_> = scorer
        .score(&a)
        .unwrap()
        .pattern_bonuses
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["second-in-text", "first-in-text"]);
}

#[test]
fn workout_plan_from_the_dashboard() {
    let scorer = Scorer::default();
    let content = "\
1. Warm-up (15 mins)
   - Light cardio
2. Main workout (45 mins)
   - Deadlifts: 3 sets x 8 reps
3. Cool-down (10 mins)
   - Static stretches";
    let a = activity("Health", 90).content(content);

    let b = scorer.score(&a).unwrap();
    assert_eq!(b.base, 23);
    assert_eq!(b.category_bonus, 5);
    assert_eq!(b.structure_bonus, 10);
    assert_eq!(b.step_bonus, 6);
    // "sets" and "reps" both belong to measurement
    assert_eq!(b.pattern_total(), 8);
    assert_eq!(b.total, 52);
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

#[test]
fn batch_sums_per_activity_totals() {
    let scorer = Scorer::default();
    // Three half hours are 3 * round(7.5) = 24, not round(22.5) = 23.
    let activities = vec![
        activity("Personal", 30),
        activity("Personal", 30),
        activity("Personal", 30),
    ];

    let batch = scorer.score_batch(&activities).unwrap();
    assert_eq!(batch.breakdowns.len(), 3);
    assert!(batch.breakdowns.iter().all(|b| b.total == 8));
    assert_eq!(batch.total, 24);
}

#[test]
fn batch_fails_whole_on_one_bad_activity() {
    let scorer = Scorer::default();
    let activities = vec![
        activity("Health", 60),
        Activity::new("Health", at(10, 0), at(9, 0)),
    ];

    assert!(matches!(
        scorer.score_batch(&activities),
        Err(Error::InvalidInterval { .. })
    ));
}

#[test]
fn empty_batch_is_zero() {
    let batch = Scorer::default().score_batch(&[]).unwrap();
    assert!(batch.breakdowns.is_empty());
    assert_eq!(batch.total, 0);
}
