//! Answer log loading and validation.
//!
//! Logs arrive as exports from the external log store, either a JSON array
//! (`.json`) or one object per line (`.jsonl` / `.ndjson`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::{has_borrow, has_carry, AnswerLog, Operation};

/// Read answer logs from a file, choosing the format by extension.
pub fn load_answer_logs(path: &Path) -> Result<Vec<AnswerLog>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answer logs: {}", path.display()))?;

    if is_json_lines(path) {
        parse_logs_jsonl(&content, path)
    } else {
        parse_logs_json(&content, path)
    }
}

/// Answer log files to read for `path`, in name order.
///
/// A directory yields its `.json`/`.jsonl`/`.ndjson` files; anything else is
/// returned as the only entry.
pub fn list_log_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(path)
        .with_context(|| format!("failed to read directory: {}", path.display()))?
    {
        let path = entry?.path();
        if path.is_file() && is_log_file(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Load every log file under `dir`, oldest first.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_log_directory(dir: &Path) -> Result<Vec<AnswerLog>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut logs = Vec::new();
    for path in list_log_files(dir)? {
        match load_answer_logs(&path) {
            Ok(mut batch) => logs.append(&mut batch),
            Err(e) => tracing::warn!("skipping {}: {e:#}", path.display()),
        }
    }
    Ok(into_chronological(logs))
}

/// Load a file or a directory of files.
pub fn load_logs_from(path: &Path) -> Result<Vec<AnswerLog>> {
    if path.is_dir() {
        load_log_directory(path)
    } else {
        Ok(into_chronological(load_answer_logs(path)?))
    }
}

/// Parse a JSON array of logs.
pub fn parse_logs_json(content: &str, source_path: &Path) -> Result<Vec<AnswerLog>> {
    serde_json::from_str(content)
        .with_context(|| format!("failed to parse answer logs: {}", source_path.display()))
}

/// Parse newline-delimited JSON logs. Blank lines are ignored.
pub fn parse_logs_jsonl(content: &str, source_path: &Path) -> Result<Vec<AnswerLog>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).with_context(|| {
                format!(
                    "failed to parse answer log at {}:{}",
                    source_path.display(),
                    i + 1
                )
            })
        })
        .collect()
}

/// Serialize logs as newline-delimited JSON.
pub fn to_jsonl(logs: &[AnswerLog]) -> Result<String> {
    let mut out = String::new();
    for log in logs {
        out.push_str(&serde_json::to_string(log).context("failed to serialize answer log")?);
        out.push('\n');
    }
    Ok(out)
}

/// Put logs in answer order.
///
/// Sorting only happens when every log carries `answered_at`; the sort is
/// stable. Otherwise the supplied order is trusted as-is.
pub fn into_chronological(mut logs: Vec<AnswerLog>) -> Vec<AnswerLog> {
    if logs.iter().all(|log| log.answered_at.is_some()) {
        logs.sort_by_key(|log| log.answered_at);
    } else if logs.iter().any(|log| log.answered_at.is_some()) {
        tracing::warn!("some answer logs have no answered_at; keeping supplied order");
    }
    logs
}

fn is_json_lines(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "jsonl" || ext == "ndjson")
}

/// Whether `path` has an answer log extension.
pub fn is_log_file(path: &Path) -> bool {
    is_json_lines(path) || path.extension().is_some_and(|ext| ext == "json")
}

/// A warning from log validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Position of the offending log, if the warning is about one log.
    pub index: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Check logs for records that could not have come from the generator.
pub fn validate_logs(logs: &[AnswerLog]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut warn = |index: usize, message: String| {
        warnings.push(ValidationWarning {
            index: Some(index),
            message,
        })
    };

    for (i, log) in logs.iter().enumerate() {
        let (a, b) = (log.first_number, log.second_number);
        match log.operation {
            Operation::Add => {
                if log.has_borrow {
                    warn(i, format!("{a} + {b} is marked as borrowing"));
                }
                if log.has_carry != has_carry(a, b) {
                    warn(i, format!("{a} + {b} has has_carry = {}", log.has_carry));
                }
            }
            Operation::Subtract => {
                if b > a {
                    warn(i, format!("{a} - {b} has a negative result"));
                }
                if log.has_carry {
                    warn(i, format!("{a} - {b} is marked as carrying"));
                }
                if log.has_borrow != has_borrow(a, b) {
                    warn(i, format!("{a} - {b} has has_borrow = {}", log.has_borrow));
                }
            }
        }
    }

    let timestamps: Vec<_> = logs.iter().filter_map(|log| log.answered_at).collect();
    if timestamps.windows(2).any(|w| w[0] > w[1]) {
        warnings.push(ValidationWarning {
            index: None,
            message: "answer logs are not in chronological order".into(),
        });
    }

    warnings
}
