//! Weakness analysis over answer logs.
//!
//! Four independent lenses look at the same log sequence:
//!
//! 1. per operation,
//! 2. carry and borrow questions,
//! 3. per second operand within each operation,
//! 4. the most recent window, to catch a slump before the larger
//!    partitions move.
//!
//! Their patterns are merged and ranked by ascending correct rate.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::{AnswerLog, OperandPosition, Operation};
use crate::pattern::{PatternStats, WeaknessAnalysis, WeaknessPattern};

/// Cut-offs that decide when a slice of history counts as weak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Slices answered correctly less often than this are weak.
    pub weak_correct_rate: f64,
    /// Smallest slice that may produce a pattern.
    pub min_question_count: usize,
    /// How many of the latest logs the recency lens inspects.
    pub recent_window: usize,
    /// Mistakes in the window needed to call it a slump.
    pub recent_mistake_threshold: usize,
    /// Carry (or borrow) mistakes in the window needed to blame carrying
    /// (or borrowing).
    pub recent_flag_min: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            weak_correct_rate: 0.7,
            min_question_count: 5,
            recent_window: 10,
            recent_mistake_threshold: 3,
            recent_flag_min: 2,
        }
    }
}

/// Running totals for one slice of logs.
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    correct: usize,
    total: usize,
    total_time_ms: u64,
}

impl Tally {
    fn of<'a>(logs: impl IntoIterator<Item = &'a AnswerLog>) -> Self {
        let mut tally = Self::default();
        for log in logs {
            tally.push(log);
        }
        tally
    }

    fn push(&mut self, log: &AnswerLog) {
        self.total += 1;
        self.total_time_ms += log.response_time_ms;
        if log.is_correct {
            self.correct += 1;
        }
    }

    /// `None` for an empty slice.
    fn stats(&self) -> Option<PatternStats> {
        if self.total == 0 {
            return None;
        }
        Some(PatternStats {
            correct_rate: self.correct as f64 / self.total as f64,
            avg_response_time_ms: self.total_time_ms as f64 / self.total as f64,
            question_count: self.total,
        })
    }
}

/// Analyze `logs` (oldest first) with the default thresholds.
pub fn analyze(logs: &[AnswerLog]) -> WeaknessAnalysis {
    WeaknessAnalyzer::default().analyze(logs)
}

/// Derives ranked weakness patterns from answer history.
#[derive(Debug, Clone, Default)]
pub struct WeaknessAnalyzer {
    thresholds: Thresholds,
}

impl WeaknessAnalyzer {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Run every lens over `logs`, which must be in chronological order.
    pub fn analyze(&self, logs: &[AnswerLog]) -> WeaknessAnalysis {
        if logs.is_empty() {
            return WeaknessAnalysis::default();
        }

        let mut patterns = self.by_recent_mistakes(logs);
        patterns.extend(self.by_operation(logs));
        patterns.extend(self.by_carry_borrow(logs));
        patterns.extend(self.by_specific_number(logs));

        let analysis = WeaknessAnalysis::from_patterns(patterns);
        tracing::debug!(
            logs = logs.len(),
            patterns = analysis.patterns.len(),
            "weakness analysis complete"
        );
        analysis
    }

    /// One pattern per weak operation, addition first.
    pub fn by_operation(&self, logs: &[AnswerLog]) -> Vec<WeaknessPattern> {
        Operation::ALL
            .into_iter()
            .filter_map(|operation| {
                let tally = Tally::of(logs.iter().filter(|log| log.operation == operation));
                self.weak(&tally)
                    .map(|stats| WeaknessPattern::Operation { operation, stats })
            })
            .collect()
    }

    /// Carry and borrow questions, each judged on its own. A log may count
    /// towards both.
    pub fn by_carry_borrow(&self, logs: &[AnswerLog]) -> Vec<WeaknessPattern> {
        let carry = Tally::of(logs.iter().filter(|log| log.has_carry));
        let borrow = Tally::of(logs.iter().filter(|log| log.has_borrow));

        let mut patterns = Vec::new();
        if let Some(stats) = self.weak(&carry) {
            patterns.push(WeaknessPattern::Carry { stats });
        }
        if let Some(stats) = self.weak(&borrow) {
            patterns.push(WeaknessPattern::Borrow { stats });
        }
        patterns
    }

    /// Weak second operands per operation, in first-seen order. The first
    /// operand is not inspected.
    pub fn by_specific_number(&self, logs: &[AnswerLog]) -> Vec<WeaknessPattern> {
        let mut patterns = Vec::new();
        for operation in Operation::ALL {
            let mut by_number: IndexMap<u32, Tally> = IndexMap::new();
            for log in logs.iter().filter(|log| log.operation == operation) {
                by_number.entry(log.second_number).or_default().push(log);
            }

            patterns.extend(by_number.iter().filter_map(|(&number, tally)| {
                self.weak(tally).map(|stats| WeaknessPattern::SpecificNumber {
                    operation,
                    number,
                    role: OperandPosition::Second,
                    stats,
                })
            }));
        }
        patterns
    }

    /// React to a slump in the latest window.
    ///
    /// Needs a full window of history. When enough of the window is wrong,
    /// the operation with the most mistakes is picked (ties go to the one
    /// whose mistake came first) and, if enough of those mistakes involved
    /// carrying or borrowing, a single pattern covering the whole window is
    /// emitted. Only the mistake threshold gates this lens.
    pub fn by_recent_mistakes(&self, logs: &[AnswerLog]) -> Vec<WeaknessPattern> {
        let window_len = self.thresholds.recent_window;
        if window_len == 0 || logs.len() < window_len {
            return Vec::new();
        }
        let window = &logs[logs.len() - window_len..];

        let mistakes: Vec<&AnswerLog> = window.iter().filter(|log| !log.is_correct).collect();
        if mistakes.is_empty() || mistakes.len() < self.thresholds.recent_mistake_threshold {
            return Vec::new();
        }

        let mut per_operation: IndexMap<Operation, usize> = IndexMap::new();
        for mistake in &mistakes {
            *per_operation.entry(mistake.operation).or_default() += 1;
        }
        let mut dominant = Operation::Add;
        let mut dominant_count = 0;
        for (&operation, &count) in &per_operation {
            if count > dominant_count {
                dominant = operation;
                dominant_count = count;
            }
        }

        let carries = mistakes.iter().filter(|log| log.has_carry).count();
        let borrows = mistakes.iter().filter(|log| log.has_borrow).count();

        let Some(stats) = Tally::of(window).stats() else {
            return Vec::new();
        };
        let min = self.thresholds.recent_flag_min;
        match dominant {
            Operation::Add if carries >= min => vec![WeaknessPattern::Carry { stats }],
            Operation::Subtract if borrows >= min => vec![WeaknessPattern::Borrow { stats }],
            _ => Vec::new(),
        }
    }

    /// Stats for a slice big enough and bad enough to report.
    fn weak(&self, tally: &Tally) -> Option<PatternStats> {
        if tally.total < self.thresholds.min_question_count {
            return None;
        }
        tally
            .stats()
            .filter(|stats| stats.correct_rate < self.thresholds.weak_correct_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::PatternKind;

    fn log(operation: Operation, first: u32, second: u32, is_correct: bool) -> AnswerLog {
        AnswerLog {
            operation,
            first_number: first,
            second_number: second,
            is_correct,
            response_time_ms: 2000,
            has_carry: operation == Operation::Add && crate::model::has_carry(first, second),
            has_borrow: operation == Operation::Subtract
                && crate::model::has_borrow(first, second),
            answered_at: None,
            user_answer: None,
        }
    }

    fn add(first: u32, second: u32, is_correct: bool) -> AnswerLog {
        log(Operation::Add, first, second, is_correct)
    }

    fn sub(first: u32, second: u32, is_correct: bool) -> AnswerLog {
        log(Operation::Subtract, first, second, is_correct)
    }

    #[test]
    fn empty_logs_give_empty_analysis() {
        let analysis = analyze(&[]);
        assert!(analysis.patterns.is_empty());
        assert!(analysis.suggested_practice.is_none());
    }

    #[test]
    fn small_samples_are_ignored() {
        let logs: Vec<_> = (0..4).map(|i| add(1 + i, 2, false)).collect();
        let analysis = analyze(&logs);
        assert!(!analysis
            .patterns
            .iter()
            .any(|p| p.kind() == PatternKind::Operation));
        assert!(analysis.is_empty());
    }

    #[test]
    fn weak_operation_is_reported() {
        // 2 of 6 subtractions right, no borrows, all different subtrahends.
        let logs = vec![
            sub(9, 1, false),
            sub(9, 2, true),
            sub(9, 3, false),
            sub(9, 4, false),
            sub(9, 5, true),
            sub(9, 6, false),
        ];
        let patterns = WeaknessAnalyzer::default().by_operation(&logs);
        assert_eq!(patterns.len(), 1);
        match &patterns[0] {
            WeaknessPattern::Operation { operation, stats } => {
                assert_eq!(*operation, Operation::Subtract);
                assert_eq!(stats.question_count, 6);
                assert!((stats.correct_rate - 2.0 / 6.0).abs() < 1e-9);
                assert!((stats.avg_response_time_ms - 2000.0).abs() < 1e-9);
            }
            other => panic!("unexpected pattern: {other:?}"),
        }
    }

    #[test]
    fn exactly_threshold_rate_is_not_weak() {
        // 7 of 10 correct is 0.7, which is not below the cut-off.
        let logs: Vec<_> = (0..10).map(|i| add(1, 1, i < 7)).collect();
        assert!(WeaknessAnalyzer::default().by_operation(&logs).is_empty());
    }

    #[test]
    fn carry_and_borrow_partitions_are_independent() {
        let mut logs: Vec<_> = (0..5).map(|_| add(8, 5, false)).collect();
        logs.extend((0..5).map(|_| sub(12, 4, true)));
        let patterns = WeaknessAnalyzer::default().by_carry_borrow(&logs);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].kind(), PatternKind::Carry);
        assert_eq!(patterns[0].stats().question_count, 5);
        assert_eq!(patterns[0].correct_rate(), 0.0);
    }

    #[test]
    fn specific_number_groups_by_second_operand() {
        let mut logs = Vec::new();
        for first in 1..=5 {
            logs.push(add(first, 7, first == 1));
            logs.push(add(first, 2, true));
        }
        for first in 10..=14 {
            logs.push(sub(first, 7, true));
        }
        let patterns = WeaknessAnalyzer::default().by_specific_number(&logs);
        assert_eq!(patterns.len(), 1);
        match &patterns[0] {
            WeaknessPattern::SpecificNumber {
                operation,
                number,
                role,
                stats,
            } => {
                assert_eq!(*operation, Operation::Add);
                assert_eq!(*number, 7);
                assert_eq!(*role, OperandPosition::Second);
                assert!((stats.correct_rate - 0.2).abs() < 1e-9);
            }
            other => panic!("unexpected pattern: {other:?}"),
        }
    }

    #[test]
    fn specific_numbers_keep_first_seen_order() {
        let mut logs = Vec::new();
        for _ in 0..5 {
            logs.push(add(1, 9, false));
            logs.push(add(1, 3, false));
        }
        let numbers: Vec<u32> = WeaknessAnalyzer::default()
            .by_specific_number(&logs)
            .iter()
            .filter_map(|p| match p {
                WeaknessPattern::SpecificNumber { number, .. } => Some(*number),
                _ => None,
            })
            .collect();
        assert_eq!(numbers, vec![9, 3]);
    }

    #[test]
    fn recent_carry_slump_is_reported() {
        // 10 carrying additions, 3 wrong: only the recency lens fires.
        let logs: Vec<_> = (0..10).map(|i| add(9, 1 + i % 9, i % 3 != 0 || i == 9)).collect();
        assert_eq!(logs.iter().filter(|l| !l.is_correct).count(), 3);
        assert!(logs.iter().all(|l| l.has_carry));

        let analysis = analyze(&logs);
        let carry: Vec<_> = analysis
            .patterns
            .iter()
            .filter(|p| p.kind() == PatternKind::Carry)
            .collect();
        assert_eq!(carry.len(), 1);
        assert!((carry[0].correct_rate() - 0.7).abs() < 1e-9);
        assert_eq!(carry[0].stats().question_count, 10);
    }

    #[test]
    fn recency_needs_a_full_window() {
        let logs: Vec<_> = (0..9).map(|_| add(9, 9, false)).collect();
        assert!(WeaknessAnalyzer::default().by_recent_mistakes(&logs).is_empty());
    }

    #[test]
    fn recency_looks_only_at_the_latest_window() {
        let mut logs: Vec<_> = (0..10).map(|_| add(9, 9, false)).collect();
        logs.extend((0..10).map(|_| add(9, 9, true)));
        assert!(WeaknessAnalyzer::default().by_recent_mistakes(&logs).is_empty());
    }

    #[test]
    fn recency_needs_enough_flagged_mistakes() {
        // 3 add mistakes but only one carried.
        let mut logs: Vec<_> = (0..7).map(|_| add(2, 3, true)).collect();
        logs.push(add(9, 9, false));
        logs.push(add(2, 3, false));
        logs.push(add(2, 4, false));
        assert!(WeaknessAnalyzer::default().by_recent_mistakes(&logs).is_empty());
    }

    #[test]
    fn recency_tie_goes_to_first_seen_operation() {
        // Two borrow mistakes come first, then two carry mistakes.
        let mut logs: Vec<_> = (0..6).map(|_| add(1, 1, true)).collect();
        logs.push(sub(12, 5, false));
        logs.push(sub(13, 6, false));
        logs.push(add(8, 8, false));
        logs.push(add(7, 7, false));

        let patterns = WeaknessAnalyzer::default().by_recent_mistakes(&logs);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].kind(), PatternKind::Borrow);
        assert!((patterns[0].correct_rate() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn patterns_are_ranked_and_worst_is_suggested() {
        let mut logs = Vec::new();
        // Additions: 3 of 6 right, carrying, second operand 8.
        for i in 0..6 {
            logs.push(add(5, 8, i % 2 == 0));
        }
        // Subtractions: 1 of 5 right, borrowing, second operand 9.
        for i in 0..5 {
            logs.push(sub(11, 9, i == 0));
        }

        let analysis = analyze(&logs);
        assert!(!analysis.is_empty());
        let rates: Vec<f64> = analysis.patterns.iter().map(|p| p.correct_rate()).collect();
        assert!(rates.windows(2).all(|w| w[0] <= w[1]), "unsorted: {rates:?}");
        assert_eq!(analysis.suggested_practice.as_ref(), analysis.patterns.first());
        assert_eq!(
            analysis.suggested_practice.as_ref().map(|p| p.operation()),
            Some(Operation::Subtract)
        );
    }

    #[test]
    fn recency_pattern_wins_ties_against_partitions() {
        // Every lens sees 3 of 10 correct; recency comes first in the merge.
        let logs: Vec<_> = (0..10).map(|i| add(9, 9, i < 3)).collect();
        let analysis = analyze(&logs);
        assert_eq!(analysis.patterns.len(), 4);
        assert_eq!(analysis.patterns[0].kind(), PatternKind::Carry);
        assert_eq!(analysis.patterns[1].kind(), PatternKind::Operation);
        assert_eq!(analysis.patterns[2].kind(), PatternKind::Carry);
        assert_eq!(analysis.patterns[3].kind(), PatternKind::SpecificNumber);
    }

    #[test]
    fn custom_thresholds_apply() {
        let strict = WeaknessAnalyzer::new(Thresholds {
            weak_correct_rate: 0.95,
            min_question_count: 2,
            ..Thresholds::default()
        });
        let logs = vec![add(1, 1, true), add(1, 2, true), add(1, 3, false)];
        let patterns = strict.by_operation(&logs);
        assert_eq!(patterns.len(), 1);
    }

    #[test]
    fn perfect_window_never_flags_a_slump() {
        let lax = WeaknessAnalyzer::new(Thresholds {
            recent_mistake_threshold: 0,
            recent_flag_min: 0,
            ..Thresholds::default()
        });
        let logs: Vec<AnswerLog> = (0..10).map(|_| add(1, 1, true)).collect();
        assert!(lax.by_recent_mistakes(&logs).is_empty());
        assert!(lax.analyze(&logs).is_empty());
    }

    #[test]
    fn thresholds_parse_from_partial_toml() {
        let thresholds: Thresholds = toml::from_str("min_question_count = 8").unwrap();
        assert_eq!(thresholds.min_question_count, 8);
        assert_eq!(thresholds.recent_window, 10);
        assert!((thresholds.weak_correct_rate - 0.7).abs() < f64::EPSILON);
    }
}
