//! The `sansu validate` command.

use std::path::PathBuf;

use anyhow::Result;

use sansu_core::parser::{list_log_files, load_answer_logs, validate_logs};

pub fn execute(logs_path: PathBuf) -> Result<()> {
    let files = list_log_files(&logs_path)?;
    let is_dir = logs_path.is_dir();

    let mut total_warnings = 0;

    for path in &files {
        let logs = match load_answer_logs(path) {
            Ok(logs) => logs,
            // Only files found by walking a directory are downgraded to warnings.
            Err(e) if !is_dir => return Err(e),
            Err(e) => {
                println!("{}", path.display());
                println!("   WARNING: {e:#}");
                total_warnings += 1;
                continue;
            }
        };
        println!("{} ({} answers)", path.display(), logs.len());

        let warnings = validate_logs(&logs);
        for w in &warnings {
            let prefix = w
                .index
                .map(|i| format!("  [#{}]", i + 1))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All answer logs valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
