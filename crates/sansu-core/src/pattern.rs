//! Weakness patterns and the analysis result that ranks them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{OperandPosition, Operation};

/// Performance over the logs backing a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternStats {
    /// Fraction of correct answers, in `[0, 1]`.
    pub correct_rate: f64,
    /// Mean response time in milliseconds.
    pub avg_response_time_ms: f64,
    /// Number of logs behind the figures above.
    pub question_count: usize,
}

/// A slice of the learner's history that is performing below threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WeaknessPattern {
    /// A whole operation is weak.
    Operation {
        operation: Operation,
        #[serde(flatten)]
        stats: PatternStats,
    },
    /// Additions that carry.
    Carry {
        #[serde(flatten)]
        stats: PatternStats,
    },
    /// Subtractions that borrow.
    Borrow {
        #[serde(flatten)]
        stats: PatternStats,
    },
    /// Questions of one operation sharing a particular operand value.
    SpecificNumber {
        operation: Operation,
        number: u32,
        role: OperandPosition,
        #[serde(flatten)]
        stats: PatternStats,
    },
}

/// Discriminant of [`WeaknessPattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Operation,
    Carry,
    Borrow,
    SpecificNumber,
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternKind::Operation => write!(f, "operation"),
            PatternKind::Carry => write!(f, "carry"),
            PatternKind::Borrow => write!(f, "borrow"),
            PatternKind::SpecificNumber => write!(f, "specific_number"),
        }
    }
}

impl WeaknessPattern {
    pub fn kind(&self) -> PatternKind {
        match self {
            WeaknessPattern::Operation { .. } => PatternKind::Operation,
            WeaknessPattern::Carry { .. } => PatternKind::Carry,
            WeaknessPattern::Borrow { .. } => PatternKind::Borrow,
            WeaknessPattern::SpecificNumber { .. } => PatternKind::SpecificNumber,
        }
    }

    pub fn stats(&self) -> &PatternStats {
        match self {
            WeaknessPattern::Operation { stats, .. }
            | WeaknessPattern::Carry { stats }
            | WeaknessPattern::Borrow { stats }
            | WeaknessPattern::SpecificNumber { stats, .. } => stats,
        }
    }

    pub fn correct_rate(&self) -> f64 {
        self.stats().correct_rate
    }

    /// The operation this pattern is about. Carry implies addition and
    /// borrow implies subtraction.
    pub fn operation(&self) -> Operation {
        match self {
            WeaknessPattern::Operation { operation, .. }
            | WeaknessPattern::SpecificNumber { operation, .. } => *operation,
            WeaknessPattern::Carry { .. } => Operation::Add,
            WeaknessPattern::Borrow { .. } => Operation::Subtract,
        }
    }

    /// Correct rate as a whole percentage, rounded half up.
    pub fn correct_percent(&self) -> u32 {
        (self.correct_rate() * 100.0).round() as u32
    }
}

/// Ranked weakness patterns for one batch of logs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeaknessAnalysis {
    /// Patterns sorted by ascending correct rate.
    pub patterns: Vec<WeaknessPattern>,
    /// The worst pattern, if any.
    pub suggested_practice: Option<WeaknessPattern>,
}

impl WeaknessAnalysis {
    /// Rank `patterns` and pick the suggestion. Sorting is stable, so
    /// patterns with equal rates keep their relative order.
    pub fn from_patterns(mut patterns: Vec<WeaknessPattern>) -> Self {
        patterns.sort_by(|a, b| a.correct_rate().total_cmp(&b.correct_rate()));
        let suggested_practice = patterns.first().cloned();
        Self {
            patterns,
            suggested_practice,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(rate: f64) -> PatternStats {
        PatternStats {
            correct_rate: rate,
            avg_response_time_ms: 3000.0,
            question_count: 8,
        }
    }

    #[test]
    fn carry_and_borrow_imply_operation() {
        assert_eq!(
            WeaknessPattern::Carry { stats: stats(0.5) }.operation(),
            Operation::Add
        );
        assert_eq!(
            WeaknessPattern::Borrow { stats: stats(0.5) }.operation(),
            Operation::Subtract
        );
    }

    #[test]
    fn serializes_with_type_tag_and_flat_stats() {
        let pattern = WeaknessPattern::SpecificNumber {
            operation: Operation::Subtract,
            number: 7,
            role: OperandPosition::Second,
            stats: stats(0.4),
        };
        let value = serde_json::to_value(&pattern).unwrap();
        assert_eq!(value["type"], "specific_number");
        assert_eq!(value["operation"], "subtract");
        assert_eq!(value["number"], 7);
        assert_eq!(value["role"], "second");
        assert_eq!(value["question_count"], 8);

        let back: WeaknessPattern = serde_json::from_value(value).unwrap();
        assert_eq!(back, pattern);
    }

    #[test]
    fn from_patterns_sorts_stably() {
        let analysis = WeaknessAnalysis::from_patterns(vec![
            WeaknessPattern::Carry { stats: stats(0.6) },
            WeaknessPattern::Operation {
                operation: Operation::Add,
                stats: stats(0.2),
            },
            WeaknessPattern::Borrow { stats: stats(0.6) },
        ]);
        let kinds: Vec<_> = analysis.patterns.iter().map(|p| p.kind()).collect();
        assert_eq!(
            kinds,
            vec![PatternKind::Operation, PatternKind::Carry, PatternKind::Borrow]
        );
        assert_eq!(analysis.suggested_practice.as_ref(), analysis.patterns.first());
    }

    #[test]
    fn correct_percent_rounds() {
        assert_eq!(WeaknessPattern::Carry { stats: stats(0.666) }.correct_percent(), 67);
        assert_eq!(WeaknessPattern::Carry { stats: stats(0.125) }.correct_percent(), 13);
    }

    #[test]
    fn empty_analysis_has_no_suggestion() {
        let analysis = WeaknessAnalysis::from_patterns(vec![]);
        assert!(analysis.is_empty());
        assert!(analysis.suggested_practice.is_none());
    }
}
