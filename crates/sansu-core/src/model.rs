//! Core data model types for sansu.
//!
//! Questions, generation settings, and the answer logs handed back by the
//! external log store.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DrillError;

/// The two drill operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
}

impl Operation {
    /// Both operations, in the order the analyzer walks them.
    pub const ALL: [Operation; 2] = [Operation::Add, Operation::Subtract];

    /// The infix symbol used when rendering a question.
    pub fn symbol(&self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Subtract => '-',
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Add => write!(f, "add"),
            Operation::Subtract => write!(f, "subtract"),
        }
    }
}

impl FromStr for Operation {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "add" | "addition" | "plus" | "+" => Ok(Operation::Add),
            "subtract" | "sub" | "subtraction" | "minus" | "-" => Ok(Operation::Subtract),
            other => Err(DrillError::UnknownOperation(other.to_string())),
        }
    }
}

/// Whether adding `a` and `b` carries out of the ones column.
pub fn has_carry(a: u32, b: u32) -> bool {
    a % 10 + b % 10 >= 10
}

/// Whether subtracting `b` from `a` borrows into the ones column.
pub fn has_borrow(a: u32, b: u32) -> bool {
    a % 10 < b % 10
}

/// A single arithmetic question.
///
/// `has_carry` is only ever set for additions and `has_borrow` only for
/// subtractions. Subtractions never go below zero. Deserialization goes
/// through [`Question::new`] and rejects a stored answer that disagrees
/// with the operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionRecord")]
pub struct Question {
    pub operation: Operation,
    pub first_number: u32,
    pub second_number: u32,
    pub correct_answer: u32,
    pub has_carry: bool,
    pub has_borrow: bool,
}

impl Question {
    /// Build a question from its operands, deriving the answer and flags.
    pub fn new(
        operation: Operation,
        first_number: u32,
        second_number: u32,
    ) -> Result<Self, DrillError> {
        match operation {
            Operation::Add if first_number.checked_add(second_number).is_none() => {
                return Err(DrillError::Overflow {
                    first: first_number,
                    second: second_number,
                });
            }
            Operation::Subtract if second_number > first_number => {
                return Err(DrillError::NegativeResult {
                    first: first_number,
                    second: second_number,
                });
            }
            _ => {}
        }
        Ok(Self::assemble(operation, first_number, second_number))
    }

    /// Callers guarantee `second_number <= first_number` for subtraction
    /// and a sum within `u32` for addition.
    pub(crate) fn assemble(operation: Operation, first_number: u32, second_number: u32) -> Self {
        match operation {
            Operation::Add => Self {
                operation,
                first_number,
                second_number,
                correct_answer: first_number.saturating_add(second_number),
                has_carry: has_carry(first_number, second_number),
                has_borrow: false,
            },
            Operation::Subtract => Self {
                operation,
                first_number,
                second_number,
                correct_answer: first_number.saturating_sub(second_number),
                has_carry: false,
                has_borrow: has_borrow(first_number, second_number),
            },
        }
    }

    /// Check a learner's answer.
    pub fn is_correct(&self, answer: u32) -> bool {
        self.correct_answer == answer
    }
}

/// Wire form of a [`Question`]. The flags are derived again on load.
#[derive(Deserialize)]
struct QuestionRecord {
    operation: Operation,
    first_number: u32,
    second_number: u32,
    #[serde(default)]
    correct_answer: Option<u32>,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = DrillError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        let question = Question::new(record.operation, record.first_number, record.second_number)?;
        match record.correct_answer {
            Some(recorded) if recorded != question.correct_answer => {
                Err(DrillError::AnswerMismatch {
                    question: question.to_string(),
                    recorded,
                    expected: question.correct_answer,
                })
            }
            _ => Ok(question),
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.first_number,
            self.operation.symbol(),
            self.second_number
        )
    }
}

/// Constraints for free-practice question generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSettings {
    pub operation: Operation,
    pub first_number_min: u32,
    pub first_number_max: u32,
    pub second_number_min: u32,
    pub second_number_max: u32,
    /// Request additions that carry (or that don't, when false).
    #[serde(default = "default_true")]
    pub allow_carry: bool,
    /// Request subtractions that borrow (or that don't, when false).
    #[serde(default = "default_true")]
    pub allow_borrow: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            operation: Operation::Add,
            first_number_min: 1,
            first_number_max: 10,
            second_number_min: 1,
            second_number_max: 10,
            allow_carry: true,
            allow_borrow: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl GenerationSettings {
    /// Settings covering `[min, max]` for both operands.
    pub fn uniform(operation: Operation, min: u32, max: u32) -> Self {
        Self {
            operation,
            first_number_min: min,
            first_number_max: max,
            second_number_min: min,
            second_number_max: max,
            ..Self::default()
        }
    }

    /// Check that both ranges are well formed.
    pub fn validate(&self) -> Result<(), DrillError> {
        if self.first_number_min > self.first_number_max {
            return Err(DrillError::InvalidRange {
                field: "first_number",
                min: self.first_number_min,
                max: self.first_number_max,
            });
        }
        if self.second_number_min > self.second_number_max {
            return Err(DrillError::InvalidRange {
                field: "second_number",
                min: self.second_number_min,
                max: self.second_number_max,
            });
        }
        if self.operation == Operation::Add
            && self
                .first_number_max
                .checked_add(self.second_number_max)
                .is_none()
        {
            return Err(DrillError::Overflow {
                first: self.first_number_max,
                second: self.second_number_max,
            });
        }
        Ok(())
    }

    /// The flag the generator tries to honor for this operation.
    pub fn wants_carry_or_borrow(&self) -> bool {
        match self.operation {
            Operation::Add => self.allow_carry,
            Operation::Subtract => self.allow_borrow,
        }
    }
}

/// Which operand slot a value occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperandPosition {
    First,
    Second,
}

/// An operand pinned to one position in targeted generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedOperand {
    pub value: u32,
    pub position: OperandPosition,
}

impl FixedOperand {
    pub fn first(value: u32) -> Self {
        Self {
            value,
            position: OperandPosition::First,
        }
    }

    pub fn second(value: u32) -> Self {
        Self {
            value,
            position: OperandPosition::Second,
        }
    }
}

/// One answered question, as recorded by the external log store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerLog {
    pub operation: Operation,
    pub first_number: u32,
    pub second_number: u32,
    pub is_correct: bool,
    pub response_time_ms: u64,
    #[serde(default)]
    pub has_carry: bool,
    #[serde(default)]
    pub has_borrow: bool,
    /// Ordering key. Analysis itself trusts the order logs are supplied in.
    #[serde(default)]
    pub answered_at: Option<DateTime<Utc>>,
    /// What the learner typed, if anything.
    #[serde(default)]
    pub user_answer: Option<u32>,
}

impl AnswerLog {
    /// Record an answer to `question`. A missing answer counts as wrong.
    pub fn from_question(
        question: &Question,
        user_answer: Option<u32>,
        response_time_ms: u64,
    ) -> Self {
        Self {
            operation: question.operation,
            first_number: question.first_number,
            second_number: question.second_number,
            is_correct: user_answer.is_some_and(|a| question.is_correct(a)),
            response_time_ms,
            has_carry: question.has_carry,
            has_borrow: question.has_borrow,
            answered_at: None,
            user_answer,
        }
    }

    /// Stamp the log with the time it was answered.
    pub fn at(mut self, answered_at: DateTime<Utc>) -> Self {
        self.answered_at = Some(answered_at);
        self
    }
}
