//! Drill reports with JSON persistence and markdown rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analyzer::WeaknessAnalyzer;
use crate::model::AnswerLog;
use crate::pattern::WeaknessAnalysis;
use crate::statistics::{compute_overview, Category, LearningOverview};
use crate::suggestion::{not_enough_data_message, pattern_title, suggestion_message, Locale};

/// A complete analysis of one learner's logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Number of logs analyzed.
    pub log_count: usize,
    /// Locale the messages were rendered in.
    pub locale: Locale,
    /// Ranked weakness patterns.
    pub analysis: WeaknessAnalysis,
    /// Unfiltered progress figures.
    pub overview: LearningOverview,
    /// Message for the suggested pattern, if there is one.
    pub suggestion: Option<String>,
}

impl DrillReport {
    /// Analyze `logs` and assemble a report.
    pub fn build(logs: &[AnswerLog], analyzer: &WeaknessAnalyzer, locale: Locale) -> Self {
        let analysis = analyzer.analyze(logs);
        let suggestion = analysis
            .suggested_practice
            .as_ref()
            .map(|pattern| suggestion_message(pattern, locale));

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            log_count: logs.len(),
            locale,
            analysis,
            overview: compute_overview(logs),
            suggestion,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: DrillReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Render as a Markdown summary.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str("# Drill Report\n\n");
        md.push_str(&format!(
            "{} answers analyzed on {}.\n\n",
            self.log_count,
            self.created_at.format("%Y-%m-%d %H:%M UTC")
        ));

        md.push_str("## Suggestion\n\n");
        match &self.suggestion {
            Some(message) => md.push_str(message),
            None => md.push_str(not_enough_data_message(self.locale)),
        }
        md.push_str("\n\n");

        if !self.analysis.patterns.is_empty() {
            md.push_str("## Weak Patterns\n\n");
            md.push_str("| Pattern | Correct | Avg Time | Questions |\n");
            md.push_str("|---------|---------|----------|-----------|\n");
            for pattern in &self.analysis.patterns {
                let stats = pattern.stats();
                md.push_str(&format!(
                    "| {} | {}% | {:.1}s | {} |\n",
                    pattern_title(pattern, self.locale),
                    pattern.correct_percent(),
                    stats.avg_response_time_ms / 1000.0,
                    stats.question_count
                ));
            }
            md.push('\n');
        }

        let overall = &self.overview.overall;
        md.push_str("## Overview\n\n");
        md.push_str(&format!(
            "- Questions: {}\n- Correct: {:.0}%\n- Avg time: {:.1}s\n\n",
            overall.total_questions,
            overall.correct_rate * 100.0,
            overall.avg_response_time_ms / 1000.0
        ));

        if !self.overview.categories.is_empty() {
            md.push_str("| Category | Correct | Avg Time | Questions |\n");
            md.push_str("|----------|---------|----------|-----------|\n");
            for c in &self.overview.categories {
                md.push_str(&format!(
                    "| {} | {:.0}% | {:.1}s | {} |\n",
                    category_label(c.category),
                    c.correct_rate * 100.0,
                    c.avg_response_time_ms / 1000.0,
                    c.question_count
                ));
            }
            md.push('\n');
        }

        if !self.overview.weakest_problems.is_empty() {
            md.push_str("## Weakest Problems\n\n");
            for p in &self.overview.weakest_problems {
                md.push_str(&format!(
                    "- {} {} {}: {:.0}% over {} attempts\n",
                    p.first_number,
                    p.operation.symbol(),
                    p.second_number,
                    p.correct_rate * 100.0,
                    p.attempt_count
                ));
            }
        }

        md
    }
}

fn category_label(category: Category) -> &'static str {
    match category {
        Category::Addition => "Addition",
        Category::Subtraction => "Subtraction",
        Category::Carry => "Carrying",
        Category::Borrow => "Borrowing",
    }
}
