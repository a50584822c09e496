//! Points and combo streaks for a practice session.

use serde::{Deserialize, Serialize};

/// Points for any correct answer.
pub const BASE_POINTS: u32 = 100;

/// Extra points per streak step once a streak reaches two.
pub const COMBO_BONUS: u32 = 10;

/// Running score for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub score: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub correct_count: u32,
    pub total_count: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer and return the points it earned.
    pub fn record(&mut self, is_correct: bool) -> u32 {
        self.total_count += 1;
        if !is_correct {
            self.combo = 0;
            return 0;
        }

        self.correct_count += 1;
        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);

        let bonus = if self.combo > 1 {
            self.combo * COMBO_BONUS
        } else {
            0
        };
        let gained = BASE_POINTS + bonus;
        self.score += gained;
        gained
    }

    /// Fraction of answers that were correct; zero before any answer.
    pub fn accuracy(&self) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        self.correct_count as f64 / self.total_count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streak_earns_growing_bonus() {
        let mut board = ScoreBoard::new();
        assert_eq!(board.record(true), 100);
        assert_eq!(board.record(true), 120);
        assert_eq!(board.record(true), 130);
        assert_eq!(board.score, 350);
        assert_eq!(board.combo, 3);
    }

    #[test]
    fn mistake_resets_combo_but_keeps_max() {
        let mut board = ScoreBoard::new();
        board.record(true);
        board.record(true);
        assert_eq!(board.record(false), 0);
        assert_eq!(board.combo, 0);
        assert_eq!(board.max_combo, 2);
        assert_eq!(board.record(true), 100);
        assert_eq!(board.total_count, 4);
        assert_eq!(board.correct_count, 3);
        assert!((board.accuracy() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_board_has_zero_accuracy() {
        assert_eq!(ScoreBoard::new().accuracy(), 0.0);
    }
}
