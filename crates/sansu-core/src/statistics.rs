//! Descriptive statistics over answer logs.
//!
//! Unlike the analyzer these figures are unfiltered: every category with at
//! least one log is reported, whatever its correct rate.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::{AnswerLog, Operation};

/// Repetitions an exact problem needs before it can rank as weakest.
pub const WEAKEST_MIN_ATTEMPTS: usize = 5;

/// How many weakest problems an overview lists.
pub const WEAKEST_LIMIT: usize = 10;

/// Headline figures across all logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OverallStats {
    pub total_questions: usize,
    pub correct_rate: f64,
    pub avg_response_time_ms: f64,
}

/// The slices an overview breaks results into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Addition,
    Subtraction,
    Carry,
    Borrow,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Addition,
        Category::Subtraction,
        Category::Carry,
        Category::Borrow,
    ];

    pub fn contains(&self, log: &AnswerLog) -> bool {
        match self {
            Category::Addition => log.operation == Operation::Add,
            Category::Subtraction => log.operation == Operation::Subtract,
            Category::Carry => log.has_carry,
            Category::Borrow => log.has_borrow,
        }
    }
}

/// Results for one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: Category,
    pub correct_rate: f64,
    pub avg_response_time_ms: f64,
    pub question_count: usize,
}

/// Results for one exact problem, e.g. `8 + 7`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProblemStats {
    pub operation: Operation,
    pub first_number: u32,
    pub second_number: u32,
    pub correct_rate: f64,
    pub attempt_count: usize,
}

/// Everything a progress screen needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearningOverview {
    pub overall: OverallStats,
    pub categories: Vec<CategoryStats>,
    pub weakest_problems: Vec<ProblemStats>,
}

/// Compute headline figures. All zero for an empty slice.
pub fn overall_stats(logs: &[AnswerLog]) -> OverallStats {
    if logs.is_empty() {
        return OverallStats::default();
    }
    let n = logs.len() as f64;
    let correct = logs.iter().filter(|log| log.is_correct).count() as f64;
    let total_time: u64 = logs.iter().map(|log| log.response_time_ms).sum();
    OverallStats {
        total_questions: logs.len(),
        correct_rate: correct / n,
        avg_response_time_ms: total_time as f64 / n,
    }
}

/// Per-category results, skipping categories with no logs.
pub fn category_stats(logs: &[AnswerLog]) -> Vec<CategoryStats> {
    Category::ALL
        .into_iter()
        .filter_map(|category| {
            let members: Vec<&AnswerLog> =
                logs.iter().filter(|log| category.contains(log)).collect();
            if members.is_empty() {
                return None;
            }
            let n = members.len() as f64;
            let correct = members.iter().filter(|log| log.is_correct).count() as f64;
            let total_time: u64 = members.iter().map(|log| log.response_time_ms).sum();
            Some(CategoryStats {
                category,
                correct_rate: correct / n,
                avg_response_time_ms: total_time as f64 / n,
                question_count: members.len(),
            })
        })
        .collect()
}

/// Exact problems seen at least `min_attempts` times, worst first, at most
/// `limit` of them. Ties keep first-seen order.
pub fn weakest_problems(
    logs: &[AnswerLog],
    min_attempts: usize,
    limit: usize,
) -> Vec<ProblemStats> {
    let mut grouped: IndexMap<(Operation, u32, u32), (usize, usize)> = IndexMap::new();
    for log in logs {
        let (correct, total) = grouped
            .entry((log.operation, log.first_number, log.second_number))
            .or_default();
        *total += 1;
        if log.is_correct {
            *correct += 1;
        }
    }

    let mut problems: Vec<ProblemStats> = grouped
        .into_iter()
        .filter(|(_, (_, total))| *total >= min_attempts)
        .map(
            |((operation, first_number, second_number), (correct, total))| ProblemStats {
                operation,
                first_number,
                second_number,
                correct_rate: correct as f64 / total as f64,
                attempt_count: total,
            },
        )
        .collect();

    problems.sort_by(|a, b| a.correct_rate.total_cmp(&b.correct_rate));
    problems.truncate(limit);
    problems
}

/// Build a full overview with the default weakest-problem cut-offs.
pub fn compute_overview(logs: &[AnswerLog]) -> LearningOverview {
    LearningOverview {
        overall: overall_stats(logs),
        categories: category_stats(logs),
        weakest_problems: weakest_problems(logs, WEAKEST_MIN_ATTEMPTS, WEAKEST_LIMIT),
    }
}
