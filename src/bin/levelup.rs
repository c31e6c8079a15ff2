//! levelup CLI: score activities and inspect progression from the shell.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use levelup_rs::achievement::ProgressSnapshot;
use levelup_rs::config::Config;
use levelup_rs::engine::Engine;
use levelup_rs::model::Activity;
use levelup_rs::progression::LevelProgress;
use levelup_rs::scoring::XpBreakdown;
use levelup_rs::telemetry::{TelemetryConfig, init_telemetry};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "levelup", about = "XP scoring and progression engine")]
struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score a single activity
    Score {
        /// Activity category (e.g. Health, Career)
        #[arg(long)]
        category: String,
        /// Start time, RFC 3339
        #[arg(long)]
        start: DateTime<Utc>,
        /// End time, RFC 3339
        #[arg(long)]
        end: DateTime<Utc>,
        /// Free-text details
        #[arg(long, conflicts_with = "content_file")]
        content: Option<String>,
        /// Read details from a file
        #[arg(long)]
        content_file: Option<PathBuf>,
    },
    /// Score a JSON array of activities and sum the totals
    Batch {
        /// Path to a JSON file containing an array of activities
        file: PathBuf,
    },
    /// Show the level and progress for an XP total
    Level {
        xp: u64,
    },
    /// Print the loaded scoring and achievement rules
    Rules,
    /// Check which achievements a progression state unlocks
    Achievements {
        #[arg(long, default_value_t = 0)]
        total_xp: u64,
        #[arg(long, default_value_t = 0)]
        streak_days: u32,
        #[arg(long, default_value_t = 0)]
        tasks_completed: u32,
        #[arg(long, default_value_t = 0)]
        milestones_completed: u32,
        /// Tasks completed before 9 AM
        #[arg(long, default_value_t = 0)]
        early_tasks: u32,
        /// Already-unlocked achievement IDs
        #[arg(long, value_delimiter = ',')]
        unlocked: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env()?;

    let _guard = init_telemetry(TelemetryConfig {
        endpoint: config.otel_endpoint.clone(),
        service_name: "levelup".to_string(),
        log_level: config.log_level.clone(),
    })?;

    let engine = Engine::from_config(&config)?;

    match cli.command {
        Command::Score {
            category,
            start,
            end,
            content,
            content_file,
        } => {
            let content = match content_file {
                Some(path) => Some(std::fs::read_to_string(&path)?),
                None => content,
            };
            let mut activity = Activity::new(category, start, end);
            activity.content = content;
            cmd_score(&engine, &activity, cli.json)
        }
        Command::Batch { file } => cmd_batch(&engine, &file, cli.json),
        Command::Level { xp } => cmd_level(xp, cli.json),
        Command::Rules => cmd_rules(&engine, cli.json),
        Command::Achievements {
            total_xp,
            streak_days,
            tasks_completed,
            milestones_completed,
            early_tasks,
            unlocked,
        } => {
            let snapshot = ProgressSnapshot {
                total_xp,
                level: levelup_rs::progression::level_of(total_xp),
                streak_days,
                tasks_completed,
                milestones_completed,
                early_tasks_completed: early_tasks,
            };
            let unlocked: HashSet<String> = unlocked.into_iter().collect();
            cmd_achievements(&engine, &snapshot, &unlocked, cli.json)
        }
    }
}

fn cmd_score(engine: &Engine, activity: &Activity, json: bool) -> anyhow::Result<()> {
    let breakdown = engine.score(activity)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    } else {
        print_breakdown(&breakdown);
    }
    Ok(())
}

fn cmd_batch(engine: &Engine, file: &Path, json: bool) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)?;
    let activities: Vec<Activity> = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("bad activity file {}: {e}", file.display()))?;

    let batch = engine.score_batch(&activities)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&batch)?);
        return Ok(());
    }

    if activities.is_empty() {
        println!("No activities found.");
        return Ok(());
    }

    println!(
        "{:<4}  {:<10}  {:<24}  {:>6}  {:>6}  {:>6}",
        "#", "CATEGORY", "TITLE", "BASE", "BONUS", "TOTAL"
    );
    println!("{}", "-".repeat(68));

    for (i, (activity, breakdown)) in activities.iter().zip(&batch.breakdowns).enumerate() {
        let title = activity.title.as_deref().unwrap_or("-");
        let title_display = if title.chars().count() > 24 {
            title.chars().take(24).collect::<String>()
        } else {
            title.to_string()
        };
        println!(
            "{:<4}  {:<10}  {:<24}  {:>6}  {:>6}  {:>6}",
            i + 1,
            activity.category,
            title_display,
            breakdown.base,
            breakdown.total - breakdown.base,
            breakdown.total
        );
    }

    println!("\n{} activity(ies), {} XP total", activities.len(), batch.total);
    Ok(())
}

fn cmd_level(xp: u64, json: bool) -> anyhow::Result<()> {
    let progress = LevelProgress::from_xp(xp);
    if json {
        println!("{}", serde_json::to_string_pretty(&progress)?);
    } else {
        println!("Level:      {}", progress.level);
        println!(
            "Progress:   {} / {} XP ({:.0}%)",
            progress.current_level_xp,
            progress.xp_to_next_level,
            progress.progress_fraction * 100.0
        );
    }
    Ok(())
}

fn cmd_rules(engine: &Engine, json: bool) -> anyhow::Result<()> {
    let scorer = engine.scorer();
    let catalog = engine.evaluator().catalog();

    if json {
        let value = serde_json::json!({
            "categories": scorer.categories().rules(),
            "patterns": scorer.patterns(),
            "achievements": catalog,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Categories:");
    for rule in scorer.categories().rules() {
        println!("  {:<12}  x{}", rule.id, rule.multiplier);
    }
    println!("Patterns:");
    for rule in scorer.patterns() {
        println!("  {:<12}  +{:<3}  {}", rule.name, rule.bonus, rule.keywords.join(", "));
    }
    println!("Achievements:");
    for def in catalog {
        println!("  {:<22}  {:<9}  {}", def.id, def.rarity, def.description);
    }
    Ok(())
}

fn cmd_achievements(
    engine: &Engine,
    snapshot: &ProgressSnapshot,
    unlocked: &HashSet<String>,
    json: bool,
) -> anyhow::Result<()> {
    let unlocks = engine.evaluate(snapshot, unlocked, Utc::now());

    if json {
        println!("{}", serde_json::to_string_pretty(&unlocks.achievements)?);
        return Ok(());
    }

    if unlocks.achievements.is_empty() {
        println!("No new achievements.");
        return Ok(());
    }
    for a in &unlocks.achievements {
        println!("Unlocked: {} [{}] - {}", a.title, a.rarity, a.description);
    }
    Ok(())
}

fn print_breakdown(b: &XpBreakdown) {
    println!("Base:       {}", b.base);
    println!("Category:   {:+}", b.category_bonus);
    println!("Structure:  {:+}", b.structure_bonus);
    println!("Steps:      {:+}", b.step_bonus);
    for p in &b.pattern_bonuses {
        println!("Pattern:    {:+} ({})", p.bonus, p.name);
    }
    println!("---");
    println!("Total:      {} XP", b.total);
}
