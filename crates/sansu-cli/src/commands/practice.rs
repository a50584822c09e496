//! The `sansu practice` command.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use sansu_core::analyzer::WeaknessAnalyzer;
use sansu_core::config::load_config_from;
use sansu_core::generator::QuestionGenerator;
use sansu_core::model::Question;
use sansu_core::parser::load_logs_from;
use sansu_core::pattern::WeaknessPattern;
use sansu_core::practice::PracticePlan;
use sansu_core::suggestion::{not_enough_data_message, suggestion_message};

use super::{print_questions, resolve_locale};

#[derive(Serialize)]
struct PracticeOutput {
    message: String,
    pattern: Option<WeaknessPattern>,
    plan: Option<PracticePlan>,
    questions: Vec<Question>,
}

pub fn execute(
    logs_path: PathBuf,
    count: Option<usize>,
    seed: Option<u64>,
    locale: Option<String>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let locale = resolve_locale(locale.as_deref(), &config)?;
    let logs = load_logs_from(&logs_path)?;

    let analysis = WeaknessAnalyzer::new(config.thresholds).analyze(&logs);

    let output = match analysis.suggested_practice {
        Some(pattern) => {
            let plan = PracticePlan::from(&pattern);
            let mut generator = QuestionGenerator::from_seed_option(seed.or(config.seed));
            let questions = generator.practice_set(&plan, count.unwrap_or(config.batch_size));
            PracticeOutput {
                message: suggestion_message(&pattern, locale),
                pattern: Some(pattern),
                plan: Some(plan),
                questions,
            }
        }
        None => PracticeOutput {
            message: not_enough_data_message(locale).to_string(),
            pattern: None,
            plan: None,
            questions: Vec::new(),
        },
    };

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&output)?),
        "text" => {
            println!("{}", output.message);
            if !output.questions.is_empty() {
                println!();
                print_questions(&output.questions, false);
            }
        }
        other => anyhow::bail!("unknown format '{other}' (expected text or json)"),
    }

    Ok(())
}
