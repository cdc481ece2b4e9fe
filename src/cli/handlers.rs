use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::data::ProgressProvider;
use crate::models::{Achievement, ProgressScreenData, Rarity};
use crate::utils::format::{format_amount, format_minutes, progress_bar};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const PURPLE: &str = "\x1b[38;2;138;43;226m";

fn rarity_ansi(rarity: Rarity) -> String {
    let c = rarity.accent();
    format!("\x1b[38;2;{};{};{}m", c.r, c.g, c.b)
}

fn fetch(provider: &dyn ProgressProvider) -> Result<ProgressScreenData> {
    provider
        .fetch_progress_snapshot()
        .context("Fetching progress snapshot")
}

// ─── Stats ───────────────────────────────────────────────────────────────────

pub fn handle_stats(provider: &dyn ProgressProvider) -> Result<()> {
    let data = fetch(provider)?;
    let stats = &data.stats;

    println!();
    println_colored!(PURPLE, "  Your Progress");
    println_colored!(DIM, "  Level {} • {} • {} pts", stats.level, stats.rank, stats.total_points);
    println!();
    println_colored!(
        BOLD,
        "  Problems: {}  |  Hours: {}  |  Streak: {} days",
        stats.problems_solved,
        stats.hours_learned,
        stats.day_streak
    );

    println!();
    println_colored!(PURPLE, "  This week");
    let total_minutes: u32 = data.activities.iter().map(|a| a.minutes).sum();
    for day in &data.activities {
        let mark = if day.completed {
            format!("{}●\x1b[0m", GREEN)
        } else {
            format!("{}○\x1b[0m", DIM)
        };
        println!(
            "  {} {}  {:>2} problems  {}",
            mark,
            day.day_label(),
            day.problems,
            format_minutes(day.minutes)
        );
    }
    println_colored!(DIM, "  Total time: {}", format_minutes(total_minutes));

    println!();
    println_colored!(PURPLE, "  Goals");
    for g in &data.goals {
        let pct = g.completion_percent();
        let color = if pct >= 100 { GREEN } else { AMBER };
        println!(
            "  {} {:<18} {} {}/{} {}{}%\x1b[0m",
            g.icon.glyph(),
            g.title,
            progress_bar(g.fill_ratio(), 20),
            format_amount(g.progress),
            format_amount(g.target),
            color,
            pct
        );
    }

    println!();
    println_colored!(PURPLE, "  Subjects");
    for s in &data.subjects {
        println!(
            "  {} {:<18} {} {:>3}%  {}/{}  {}",
            s.icon.glyph(),
            s.name,
            progress_bar(s.progress as f64 / 100.0, 20),
            s.progress,
            s.problems,
            s.total_problems,
            s.last_activity
        );
    }
    println!();
    Ok(())
}

// ─── Achievements ────────────────────────────────────────────────────────────

pub fn achievement_line(a: &Achievement) -> String {
    let mut line = format!(
        "{} {:<18} {:<9} {}",
        a.icon.glyph(),
        a.title,
        a.rarity.as_str(),
        a.description
    );
    if let (Some(ratio), Some(p), Some(max)) = (a.sub_progress(), a.progress, a.max_progress) {
        line.push_str(&format!("  {} {}/{}", progress_bar(ratio, 10), p, max));
    }
    line
}

pub fn handle_achievements(provider: &dyn ProgressProvider) -> Result<()> {
    let mut achievements = fetch(provider)?.achievements;
    achievements.sort_by(|a, b| b.rarity.cmp(&a.rarity));

    println!();
    println_colored!(PURPLE, "  Achievements ({})", achievements.len());
    println!();
    for a in &achievements {
        println!(
            "  {}{}\x1b[0m  {}",
            rarity_ansi(a.rarity),
            achievement_line(a),
            a.unlocked_at.format("%b %d, %Y")
        );
    }
    println!();
    Ok(())
}

// ─── Export ──────────────────────────────────────────────────────────────────

pub fn handle_export(provider: &dyn ProgressProvider) -> Result<()> {
    let data = fetch(provider)?;
    let json = serde_json::to_string_pretty(&data).context("Serialising snapshot")?;
    println!("{}", json);
    Ok(())
}

// ─── Config ──────────────────────────────────────────────────────────────────

pub fn handle_config(config: &AppConfig, init: bool) -> Result<()> {
    if init {
        let path = config.save()?;
        println_colored!(GREEN, "  ✓ Wrote config to {}", path.display());
    } else {
        let path = AppConfig::config_path()?;
        let state = if path.exists() { "" } else { " (not created, defaults in use)" };
        println!("  {}{}", path.display(), state);
    }
    Ok(())
}
