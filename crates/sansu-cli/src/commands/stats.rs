//! The `sansu stats` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use sansu_core::parser::load_logs_from;
use sansu_core::statistics::{compute_overview, Category, LearningOverview};

pub fn execute(logs_path: PathBuf, format: String) -> Result<()> {
    let logs = load_logs_from(&logs_path)?;
    let overview = compute_overview(&logs);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&overview)?),
        "text" => print_overview(&overview),
        other => anyhow::bail!("unknown format '{other}' (expected text or json)"),
    }

    Ok(())
}

fn print_overview(overview: &LearningOverview) {
    let overall = &overview.overall;
    println!(
        "{} questions, {:.1}% correct, {:.1}s average",
        overall.total_questions,
        overall.correct_rate * 100.0,
        overall.avg_response_time_ms / 1000.0
    );

    if !overview.categories.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Category", "Correct", "Avg Time", "Questions"]);
        for c in &overview.categories {
            table.add_row(vec![
                Cell::new(category_name(c.category)),
                Cell::new(format!("{:.1}%", c.correct_rate * 100.0)),
                Cell::new(format!("{:.1}s", c.avg_response_time_ms / 1000.0)),
                Cell::new(c.question_count),
            ]);
        }
        println!("\n{table}");
    }

    if overview.weakest_problems.is_empty() {
        println!("\nNo problem has been answered often enough to rank yet.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Problem", "Correct", "Attempts"]);
    for p in &overview.weakest_problems {
        table.add_row(vec![
            Cell::new(format!(
                "{} {} {}",
                p.first_number,
                p.operation.symbol(),
                p.second_number
            )),
            Cell::new(format!("{:.1}%", p.correct_rate * 100.0)),
            Cell::new(p.attempt_count),
        ]);
    }
    println!("\nWeakest problems:\n{table}");
}

fn category_name(category: Category) -> &'static str {
    match category {
        Category::Addition => "Addition",
        Category::Subtraction => "Subtraction",
        Category::Carry => "Carrying",
        Category::Borrow => "Borrowing",
    }
}
