//! Learner-facing wording for weakness patterns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DrillError;
use crate::model::Operation;
use crate::pattern::WeaknessPattern;

/// Message catalogue to render with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ja,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::Ja => write!(f, "ja"),
        }
    }
}

impl FromStr for Locale {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "ja" | "jp" | "japanese" => Ok(Locale::Ja),
            other => Err(DrillError::UnknownLocale(other.to_string())),
        }
    }
}

/// Encourage practice on `pattern`, quoting its rounded correct rate.
pub fn suggestion_message(pattern: &WeaknessPattern, locale: Locale) -> String {
    let percent = pattern.correct_percent();
    match locale {
        Locale::En => match pattern {
            WeaknessPattern::Operation { operation, .. } => format!(
                "{} seems tricky right now ({percent}% correct). Let's practice!",
                operation_name_en(*operation)
            ),
            WeaknessPattern::Carry { .. } => format!(
                "Addition with carrying seems tricky right now ({percent}% correct). Let's practice!"
            ),
            WeaknessPattern::Borrow { .. } => format!(
                "Subtraction with borrowing seems tricky right now ({percent}% correct). Let's practice!"
            ),
            WeaknessPattern::SpecificNumber {
                operation, number, ..
            } => match operation {
                Operation::Add => format!(
                    "Adding {number} seems tricky right now ({percent}% correct). Let's practice!"
                ),
                Operation::Subtract => format!(
                    "Taking away {number} seems tricky right now ({percent}% correct). Let's practice!"
                ),
            },
        },
        Locale::Ja => match pattern {
            WeaknessPattern::Operation { operation, .. } => format!(
                "{}が苦手みたいだね（正答率{percent}%）。練習してみよう！",
                operation_name_ja(*operation)
            ),
            WeaknessPattern::Carry { .. } => format!(
                "繰り上がりのあるたし算が苦手みたいだね（正答率{percent}%）。練習してみよう！"
            ),
            WeaknessPattern::Borrow { .. } => format!(
                "繰り下がりのあるひき算が苦手みたいだね（正答率{percent}%）。練習してみよう！"
            ),
            WeaknessPattern::SpecificNumber {
                operation, number, ..
            } => match operation {
                Operation::Add => format!(
                    "{number}をたす問題が苦手みたいだね（正答率{percent}%）。練習してみよう！"
                ),
                Operation::Subtract => format!(
                    "{number}をひく問題が苦手みたいだね（正答率{percent}%）。練習してみよう！"
                ),
            },
        },
    }
}

/// Shown when there are not enough logs to find a weakness.
pub fn not_enough_data_message(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Not enough answers yet. Try some free practice first!",
        Locale::Ja => "まだデータがたりないよ。フリー練習でもんだいをといてね！",
    }
}

/// Short label for listing a pattern.
pub fn pattern_title(pattern: &WeaknessPattern, locale: Locale) -> String {
    match (locale, pattern) {
        (Locale::En, WeaknessPattern::Operation { operation, .. }) => {
            operation_name_en(*operation).to_string()
        }
        (Locale::En, WeaknessPattern::Carry { .. }) => "Addition with carrying".to_string(),
        (Locale::En, WeaknessPattern::Borrow { .. }) => "Subtraction with borrowing".to_string(),
        (
            Locale::En,
            WeaknessPattern::SpecificNumber {
                operation, number, ..
            },
        ) => match operation {
            Operation::Add => format!("Adding {number}"),
            Operation::Subtract => format!("Taking away {number}"),
        },
        (Locale::Ja, WeaknessPattern::Operation { operation, .. }) => {
            operation_name_ja(*operation).to_string()
        }
        (Locale::Ja, WeaknessPattern::Carry { .. }) => "くり上がりのあるたし算".to_string(),
        (Locale::Ja, WeaknessPattern::Borrow { .. }) => "くり下がりのあるひき算".to_string(),
        (
            Locale::Ja,
            WeaknessPattern::SpecificNumber {
                operation, number, ..
            },
        ) => match operation {
            Operation::Add => format!("{number}をたす"),
            Operation::Subtract => format!("{number}をひく"),
        },
    }
}

fn operation_name_en(operation: Operation) -> &'static str {
    match operation {
        Operation::Add => "Addition",
        Operation::Subtract => "Subtraction",
    }
}

fn operation_name_ja(operation: Operation) -> &'static str {
    match operation {
        Operation::Add => "たし算",
        Operation::Subtract => "ひき算",
    }
}
