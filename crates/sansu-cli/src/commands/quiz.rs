//! The `sansu quiz` command.

use std::fs::OpenOptions;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;

use sansu_core::analyzer::WeaknessAnalyzer;
use sansu_core::config::load_config_from;
use sansu_core::generator::QuestionGenerator;
use sansu_core::model::{AnswerLog, Question};
use sansu_core::parser::{load_logs_from, to_jsonl};
use sansu_core::practice::PracticePlan;
use sansu_core::scoring::ScoreBoard;
use sansu_core::suggestion::suggestion_message;

use super::SettingsArgs;

pub fn execute(
    settings_args: SettingsArgs,
    logs_path: Option<PathBuf>,
    count: Option<usize>,
    seed: Option<u64>,
    log_output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let count = count.unwrap_or(config.batch_size);
    let mut generator = QuestionGenerator::from_seed_option(seed.or(config.seed));

    let suggested = match &logs_path {
        Some(path) => {
            let logs = load_logs_from(path)?;
            WeaknessAnalyzer::new(config.thresholds)
                .analyze(&logs)
                .suggested_practice
        }
        None => None,
    };

    let questions = match suggested {
        Some(pattern) => {
            println!("{}\n", suggestion_message(&pattern, config.locale));
            generator.practice_set(&PracticePlan::from(&pattern), count)
        }
        None => {
            let settings = settings_args.resolve(config.generation)?;
            generator.generate_batch(settings, count)
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let (board, logs) = run_session(&questions, stdin.lock(), stdout.lock())?;

    println!(
        "\nScore: {}  Correct: {}/{} ({:.0}%)  Best combo: {}",
        board.score,
        board.correct_count,
        board.total_count,
        board.accuracy() * 100.0,
        board.max_combo
    );

    if let Some(path) = log_output {
        append_logs(&path, &logs)?;
        println!("Saved {} answers to {}", logs.len(), path.display());
    }

    Ok(())
}

/// Ask each question on `out` and read one answer per line from `input`.
///
/// A line that is not a number counts as a wrong answer. End of input stops
/// the session early; unanswered questions are not logged.
fn run_session<R: BufRead, W: Write>(
    questions: &[Question],
    mut input: R,
    mut out: W,
) -> Result<(ScoreBoard, Vec<AnswerLog>)> {
    let mut board = ScoreBoard::new();
    let mut logs = Vec::with_capacity(questions.len());
    let mut line = String::new();

    for (i, question) in questions.iter().enumerate() {
        write!(out, "Q{}: {question} = ", i + 1)?;
        out.flush()?;

        let started = Instant::now();
        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let answer = line.trim().parse::<u32>().ok();
        let log = AnswerLog::from_question(question, answer, elapsed_ms).at(Utc::now());
        let gained = board.record(log.is_correct);

        if log.is_correct {
            if board.combo > 1 {
                writeln!(out, "Correct! +{gained} ({} in a row)", board.combo)?;
            } else {
                writeln!(out, "Correct! +{gained}")?;
            }
        } else {
            writeln!(out, "Not quite: {question} = {}", question.correct_answer)?;
        }
        logs.push(log);
    }

    Ok((board, logs))
}

fn append_logs(path: &Path, logs: &[AnswerLog]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    file.write_all(to_jsonl(logs)?.as_bytes())
        .with_context(|| format!("failed to write answer logs to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sansu_core::model::Operation;

    fn questions() -> Vec<Question> {
        vec![
            Question::new(Operation::Add, 7, 5).unwrap(),
            Question::new(Operation::Add, 2, 3).unwrap(),
            Question::new(Operation::Subtract, 9, 4).unwrap(),
        ]
    }

    #[test]
    fn session_scores_and_logs_answers() {
        let mut out = Vec::new();
        let (board, logs) =
            run_session(&questions(), "12\n5\nfour\n".as_bytes(), &mut out).unwrap();

        assert_eq!(board.score, 220);
        assert_eq!(board.correct_count, 2);
        assert_eq!(board.max_combo, 2);
        assert_eq!(logs.len(), 3);
        assert!(logs[0].has_carry);
        assert!(!logs[2].is_correct);
        assert_eq!(logs[2].user_answer, None);
        assert!(logs.iter().all(|log| log.answered_at.is_some()));

        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("Q1: 7 + 5 = Correct! +100"));
        assert!(transcript.contains("+120 (2 in a row)"));
        assert!(transcript.contains("Not quite: 9 - 4 = 5"));
    }

    #[test]
    fn session_stops_at_end_of_input() {
        let mut out = Vec::new();
        let (board, logs) = run_session(&questions(), "12\n".as_bytes(), &mut out).unwrap();
        assert_eq!(board.total_count, 1);
        assert_eq!(logs.len(), 1);
    }

    #[test]
    fn append_keeps_earlier_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.jsonl");
        let q = Question::new(Operation::Add, 1, 1).unwrap();
        let log = AnswerLog::from_question(&q, Some(2), 800);

        append_logs(&path, std::slice::from_ref(&log)).unwrap();
        append_logs(&path, std::slice::from_ref(&log)).unwrap();

        let loaded = sansu_core::parser::load_answer_logs(&path).unwrap();
        assert_eq!(loaded.len(), 2);
    }
}
