//! The `sansu analyze` command.

use std::path::PathBuf;

use anyhow::Result;

use sansu_core::analyzer::WeaknessAnalyzer;
use sansu_core::config::load_config_from;
use sansu_core::parser::load_logs_from;
use sansu_core::report::DrillReport;
use sansu_core::suggestion::{not_enough_data_message, pattern_title};

use super::resolve_locale;

pub fn execute(
    logs_path: PathBuf,
    format: String,
    output: Option<PathBuf>,
    locale: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let locale = resolve_locale(locale.as_deref(), &config)?;
    let logs = load_logs_from(&logs_path)?;
    tracing::info!("Analyzing {} answer logs from {}", logs.len(), logs_path.display());

    let analyzer = WeaknessAnalyzer::new(config.thresholds);
    let report = DrillReport::build(&logs, &analyzer, locale);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report.analysis)?),
        "markdown" | "md" => println!("{}", report.to_markdown()),
        "text" => print_patterns(&report),
        other => anyhow::bail!("unknown format '{other}' (expected text, json or markdown)"),
    }

    if let Some(path) = output {
        report.save_json(&path)?;
        eprintln!("Report saved to {}", path.display());
    }

    Ok(())
}

fn print_patterns(report: &DrillReport) {
    use comfy_table::{Cell, Table};

    if report.analysis.is_empty() {
        println!("{}", not_enough_data_message(report.locale));
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Pattern", "Kind", "Correct", "Avg Time", "Questions"]);

    for (i, pattern) in report.analysis.patterns.iter().enumerate() {
        let stats = pattern.stats();
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(pattern_title(pattern, report.locale)),
            Cell::new(pattern.kind()),
            Cell::new(format!("{}%", pattern.correct_percent())),
            Cell::new(format!("{:.1}s", stats.avg_response_time_ms / 1000.0)),
            Cell::new(stats.question_count),
        ]);
    }

    println!("{table}");
    if let Some(message) = &report.suggestion {
        println!("\n{message}");
    }
}
