//! The `sansu init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("sansu.toml").exists() {
        println!("sansu.toml already exists, skipping.");
    } else {
        std::fs::write("sansu.toml", SAMPLE_CONFIG)?;
        println!("Created sansu.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit sansu.toml to pick the number ranges");
    println!("  2. Run: sansu quiz --log-output answers.jsonl");
    println!("  3. Run: sansu practice --logs answers.jsonl");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# sansu configuration

batch_size = 10
locale = "en"
# seed = 42

[generation]
operation = "add"
first_number_min = 1
first_number_max = 10
second_number_min = 1
second_number_max = 10
allow_carry = true
allow_borrow = true

[thresholds]
weak_correct_rate = 0.7
min_question_count = 5
recent_window = 10
recent_mistake_threshold = 3
recent_flag_min = 2
"#;
