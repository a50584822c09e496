pub mod analyze;
pub mod generate;
pub mod init;
pub mod practice;
pub mod quiz;
pub mod stats;
pub mod validate;

use anyhow::Result;
use clap::Args;

use sansu_core::config::SansuConfig;
use sansu_core::model::{GenerationSettings, Question};
use sansu_core::suggestion::Locale;

/// Free-practice flags shared by `generate` and `quiz`.
///
/// Anything left unset falls back to the `[generation]` table of the config.
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// Operation: add, subtract
    #[arg(long)]
    pub operation: Option<String>,

    /// Smallest first operand
    #[arg(long)]
    pub first_min: Option<u32>,

    /// Largest first operand
    #[arg(long)]
    pub first_max: Option<u32>,

    /// Smallest second operand
    #[arg(long)]
    pub second_min: Option<u32>,

    /// Largest second operand
    #[arg(long)]
    pub second_max: Option<u32>,

    /// Ask for additions that carry (true) or that don't (false)
    #[arg(long)]
    pub carry: Option<bool>,

    /// Ask for subtractions that borrow (true) or that don't (false)
    #[arg(long)]
    pub borrow: Option<bool>,
}

impl SettingsArgs {
    /// Overlay the flags onto `base` and validate the result.
    pub fn resolve(&self, base: GenerationSettings) -> Result<GenerationSettings> {
        let mut settings = base;
        if let Some(op) = &self.operation {
            settings.operation = op.parse()?;
        }
        if let Some(v) = self.first_min {
            settings.first_number_min = v;
        }
        if let Some(v) = self.first_max {
            settings.first_number_max = v;
        }
        if let Some(v) = self.second_min {
            settings.second_number_min = v;
        }
        if let Some(v) = self.second_max {
            settings.second_number_max = v;
        }
        if let Some(v) = self.carry {
            settings.allow_carry = v;
        }
        if let Some(v) = self.borrow {
            settings.allow_borrow = v;
        }
        settings.validate()?;
        Ok(settings)
    }
}

/// The `--locale` flag if given, else the configured locale.
pub fn resolve_locale(flag: Option<&str>, config: &SansuConfig) -> Result<Locale> {
    match flag {
        Some(s) => Ok(s.parse()?),
        None => Ok(config.locale),
    }
}

/// Print a numbered worksheet.
pub fn print_questions(questions: &[Question], show_answers: bool) {
    let width = questions.len().to_string().len();
    for (i, q) in questions.iter().enumerate() {
        if show_answers {
            println!("{:>width$}. {q} = {}", i + 1, q.correct_answer);
        } else {
            println!("{:>width$}. {q} =", i + 1);
        }
    }
}
