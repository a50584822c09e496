//! Turning a weakness pattern back into generation constraints.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::generator::QuestionGenerator;
use crate::model::{FixedOperand, Operation, Question};
use crate::pattern::WeaknessPattern;

/// Arguments for targeted generation aimed at one weakness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticePlan {
    pub operation: Operation,
    pub want_carry_or_borrow: bool,
    #[serde(default)]
    pub fixed: Option<FixedOperand>,
}

impl From<&WeaknessPattern> for PracticePlan {
    fn from(pattern: &WeaknessPattern) -> Self {
        match pattern {
            WeaknessPattern::Operation { operation, .. } => Self {
                operation: *operation,
                want_carry_or_borrow: false,
                fixed: None,
            },
            WeaknessPattern::Carry { .. } => Self {
                operation: Operation::Add,
                want_carry_or_borrow: true,
                fixed: None,
            },
            WeaknessPattern::Borrow { .. } => Self {
                operation: Operation::Subtract,
                want_carry_or_borrow: true,
                fixed: None,
            },
            WeaknessPattern::SpecificNumber {
                operation, number, ..
            } => Self {
                operation: *operation,
                want_carry_or_borrow: false,
                fixed: Some(FixedOperand::second(*number)),
            },
        }
    }
}

impl<R: Rng> QuestionGenerator<R> {
    /// One question following `plan`.
    pub fn generate_for_plan(&mut self, plan: &PracticePlan) -> Question {
        self.generate_targeted(plan.operation, plan.want_carry_or_borrow, plan.fixed)
    }

    /// `count` questions following `plan`.
    pub fn practice_set(&mut self, plan: &PracticePlan, count: usize) -> Vec<Question> {
        (0..count).map(|_| self.generate_for_plan(plan)).collect()
    }
}
