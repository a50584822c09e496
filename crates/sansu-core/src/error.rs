//! Domain error types.
//!
//! Generation and analysis never fail; these errors only surface from
//! explicit validation (settings, hand-built questions) and from parsing
//! user-supplied names such as operations and locales.

use thiserror::Error;

/// Errors raised while validating drill inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrillError {
    /// A numeric range has its lower bound above its upper bound.
    #[error("invalid range for {field}: min {min} is greater than max {max}")]
    InvalidRange {
        field: &'static str,
        min: u32,
        max: u32,
    },

    /// A subtraction whose subtrahend exceeds its minuend.
    #[error("{first} - {second} would be negative")]
    NegativeResult { first: u32, second: u32 },

    /// An addition whose sum does not fit in a `u32`.
    #[error("{first} + {second} overflows")]
    Overflow { first: u32, second: u32 },

    /// A stored question whose answer disagrees with its operands.
    #[error("{question} has answer {recorded}, expected {expected}")]
    AnswerMismatch {
        question: String,
        recorded: u32,
        expected: u32,
    },

    /// An operation name that is neither addition nor subtraction.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// A locale that has no message catalogue.
    #[error("unknown locale: {0}")]
    UnknownLocale(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let err = DrillError::InvalidRange {
            field: "first_number",
            min: 9,
            max: 2,
        };
        assert_eq!(
            err.to_string(),
            "invalid range for first_number: min 9 is greater than max 2"
        );
        assert_eq!(
            DrillError::NegativeResult {
                first: 3,
                second: 8
            }
            .to_string(),
            "3 - 8 would be negative"
        );
    }

    #[test]
    fn overflow_and_mismatch_messages() {
        assert_eq!(
            DrillError::Overflow {
                first: u32::MAX,
                second: 1
            }
            .to_string(),
            format!("{} + 1 overflows", u32::MAX)
        );
        assert_eq!(
            DrillError::AnswerMismatch {
                question: "2 + 2".into(),
                recorded: 5,
                expected: 4
            }
            .to_string(),
            "2 + 2 has answer 5, expected 4"
        );
    }
}
