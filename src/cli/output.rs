//! CLI output formatting utilities
//!
//! This module provides consistent output formatting for the reviewscope CLI

use serde::Serialize;

use crate::analysis::AnalysisDocument;
use crate::analysis::ThemeDefinition;
use crate::analysis::ThemeType;
use crate::analysis::TrendPoint;
use crate::errors::ErrorBody;
use crate::AppConfig;
use crate::ReviewScopeError;

/// Safely truncate a string at character boundary (not byte boundary)
///
/// Review text is full of emoji, so byte slicing would panic.
#[must_use]
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

/// Print any serializable value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> crate::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print an analysis document as a human-readable summary
pub fn print_analysis(app_id: &str, document: &AnalysisDocument) {
    println!("📊 Review analysis for {app_id} ({} reviews)", document.total_reviews);
    println!("  Average rating: {:.2}", document.average_rating);

    let ratings: Vec<String> = document
        .rating_counts
        .iter()
        .rev()
        .map(|(rating, count)| format!("{rating}★ {count}"))
        .collect();
    println!("  Ratings: {}", ratings.join(" | "));

    let sentiments: Vec<String> = document
        .sentiment_counts
        .iter()
        .map(|(sentiment, count)| format!("{sentiment} {count}"))
        .collect();
    println!("  Sentiment: {}", sentiments.join(", "));

    if document.themes.is_empty() {
        println!("🏷️  No themes detected");
        return;
    }

    println!("🏷️  Themes:");
    for theme in &document.themes {
        let marker = match theme.theme_type {
            ThemeType::Pain => "🔻 pain",
            ThemeType::Wow => "✨ wow",
        };
        println!(
            "  - {} [{}] {} reviews, confidence {:.2}",
            theme.name, marker, theme.review_count, theme.confidence
        );
        println!("    {}", theme.summary);
        println!("    Reviews: {}", truncate_str(&theme.reviews.join(", "), 120));
    }
}

/// Print a daily rating trend
pub fn print_trend(app_id: &str, trend: &[TrendPoint]) {
    if trend.is_empty() {
        print_warning(&format!("No dated, rated reviews for {app_id}"));
        return;
    }

    println!("📈 Rating trend for {app_id} ({} days):", trend.len());
    for point in trend {
        println!(
            "  {}  {:.1}  ({} reviews)",
            point.date, point.average_rating, point.review_count
        );
    }
}

/// Print theme definitions
pub fn print_themes(themes: &[ThemeDefinition]) {
    println!("🏷️  {} theme definitions:", themes.len());
    for theme in themes {
        println!(
            "  - {} ({}), confidence {:.2}",
            theme.name, theme.id, theme.confidence
        );
        println!("    Keywords: {}", theme.keywords.join(", "));
    }
}

pub fn print_config(config: &AppConfig) {
    println!("📋 reviewscope Configuration:");
    println!();

    println!("📝 Logging:");
    println!("  Level: {}", config.logging.level);
    println!("  Backtrace: {}", config.logging.backtrace);
    println!("  File output: {}", config.logging.file_output);
    if config.logging.file_output {
        println!("  Directory: {}", config.logging.directory);
    }
    println!();

    println!("🔍 Analysis:");
    println!("  Default count: {}", config.default_count());
    println!("  Default country: {}", config.default_country());
    println!(
        "  Themes: {}",
        if config.themes.is_some() {
            "custom"
        } else {
            "built-in"
        }
    );
    println!();

    print_themes(&config.theme_definitions());
}

/// Report a failed command, as an error body when JSON output is on
pub fn print_failure(err: &ReviewScopeError, json: bool) {
    if json {
        match serde_json::to_string_pretty(&ErrorBody::from(err)) {
            Ok(body) => println!("{body}"),
            Err(_) => eprintln!("❌ {err}"),
        }
    } else {
        eprintln!("❌ {err}");
    }
}

pub fn print_success(msg: &str) {
    println!("✅ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("⚠️  {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("❌ {msg}");
}
