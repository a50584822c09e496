//! The `sansu generate` command.

use std::path::PathBuf;

use anyhow::Result;

use sansu_core::config::load_config_from;
use sansu_core::generator::QuestionGenerator;

use super::{print_questions, SettingsArgs};

pub fn execute(
    settings_args: SettingsArgs,
    count: Option<usize>,
    seed: Option<u64>,
    format: String,
    answers: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let settings = settings_args.resolve(config.generation)?;
    let count = count.unwrap_or(config.batch_size);

    let mut generator = QuestionGenerator::from_seed_option(seed.or(config.seed));
    let questions = generator.generate_batch(settings, count);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&questions)?),
        "text" => print_questions(&questions, answers),
        other => anyhow::bail!("unknown format '{other}' (expected text or json)"),
    }

    Ok(())
}
