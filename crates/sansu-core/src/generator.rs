//! Constrained random question generation.
//!
//! Operands are drawn uniformly and redrawn while the carry/borrow outcome
//! disagrees with the request. After [`MAX_ATTEMPTS`] draws the last one is
//! accepted as-is, so callers must read `has_carry`/`has_borrow` off the
//! returned question instead of assuming the request was honored.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::{
    has_borrow, has_carry, FixedOperand, GenerationSettings, OperandPosition, Operation, Question,
};

/// Draws per question before the carry/borrow constraint is dropped.
pub const MAX_ATTEMPTS: u32 = 100;

/// Lower bound for operands in targeted practice.
pub const TARGETED_MIN: u32 = 1;

/// Upper bound for operands in targeted practice.
pub const TARGETED_MAX: u32 = 20;

/// Question generator over a swappable random source.
#[derive(Debug, Clone)]
pub struct QuestionGenerator<R = StdRng> {
    rng: R,
}

impl QuestionGenerator<StdRng> {
    /// A generator seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// A reproducible generator.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Seeded when `seed` is given, entropy-backed otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new(),
        }
    }
}

impl Default for QuestionGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> QuestionGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generate one question from free-practice settings.
    pub fn generate(&mut self, settings: GenerationSettings) -> Question {
        let wanted = settings.wants_carry_or_borrow();
        let mut attempts = 0;

        loop {
            let (first, second) = self.draw_operands(&settings);
            attempts += 1;

            let realized = match settings.operation {
                Operation::Add => has_carry(first, second),
                Operation::Subtract => has_borrow(first, second),
            };
            if realized == wanted {
                return Question::assemble(settings.operation, first, second);
            }
            if attempts >= MAX_ATTEMPTS {
                tracing::debug!(
                    operation = %settings.operation,
                    wanted,
                    attempts,
                    "carry/borrow constraint unsatisfied, accepting last draw"
                );
                return Question::assemble(settings.operation, first, second);
            }
        }
    }

    /// Generate `count` independent questions.
    pub fn generate_batch(&mut self, settings: GenerationSettings, count: usize) -> Vec<Question> {
        (0..count).map(|_| self.generate(settings)).collect()
    }

    /// Generate a question aimed at a weakness.
    ///
    /// With a fixed operand the other one is drawn from
    /// `[TARGETED_MIN, TARGETED_MAX]` (narrowed for subtraction so the
    /// result stays non-negative) and `want_carry_or_borrow` is ignored.
    /// Without one, this is [`generate`](Self::generate) over the targeted
    /// range with only the given operation's flag requested.
    pub fn generate_targeted(
        &mut self,
        operation: Operation,
        want_carry_or_borrow: bool,
        fixed: Option<FixedOperand>,
    ) -> Question {
        let Some(fixed) = fixed else {
            let settings = GenerationSettings {
                operation,
                first_number_min: TARGETED_MIN,
                first_number_max: TARGETED_MAX,
                second_number_min: TARGETED_MIN,
                second_number_max: TARGETED_MAX,
                allow_carry: want_carry_or_borrow && operation == Operation::Add,
                allow_borrow: want_carry_or_borrow && operation == Operation::Subtract,
            };
            return self.generate(settings);
        };

        let (first, second) = match (operation, fixed.position) {
            (Operation::Add, OperandPosition::First) => {
                (fixed.value, self.draw(TARGETED_MIN, TARGETED_MAX))
            }
            (Operation::Add, OperandPosition::Second) => {
                (self.draw(TARGETED_MIN, TARGETED_MAX), fixed.value)
            }
            (Operation::Subtract, OperandPosition::First) => (
                fixed.value,
                self.draw(TARGETED_MIN, TARGETED_MAX.min(fixed.value)),
            ),
            (Operation::Subtract, OperandPosition::Second) => (
                self.draw(fixed.value, TARGETED_MAX.max(fixed.value)),
                fixed.value,
            ),
        };
        Question::assemble(operation, first, second)
    }

    fn draw_operands(&mut self, settings: &GenerationSettings) -> (u32, u32) {
        let first = self.draw(settings.first_number_min, settings.first_number_max);
        let second_max = match settings.operation {
            Operation::Add => settings.second_number_max,
            Operation::Subtract => settings.second_number_max.min(first),
        };
        let second = self.draw(settings.second_number_min, second_max);
        (first, second)
    }

    /// Uniform draw from `[lo, hi]`. An empty range collapses to `hi`.
    fn draw(&mut self, lo: u32, hi: u32) -> u32 {
        if lo >= hi {
            return hi;
        }
        self.rng.gen_range(lo..=hi)
    }
}
