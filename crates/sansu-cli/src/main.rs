//! sansu CLI: arithmetic drills and weakness analysis from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

use commands::SettingsArgs;

#[derive(Parser)]
#[command(
    name = "sansu",
    version,
    about = "Arithmetic drill generator and weakness analyzer"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a free-practice worksheet
    Generate {
        #[command(flatten)]
        settings: SettingsArgs,

        /// Number of questions (default: batch_size from config)
        #[arg(long)]
        count: Option<usize>,

        /// RNG seed for a reproducible worksheet
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Print answers next to the questions
        #[arg(long)]
        answers: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Suggest practice for the weakest pattern in a log file
    Practice {
        /// Answer log file (.json / .jsonl) or directory
        #[arg(long)]
        logs: PathBuf,

        /// Number of practice questions (default: batch_size from config)
        #[arg(long)]
        count: Option<usize>,

        /// RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Message language: en, ja
        #[arg(long)]
        locale: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Find weakness patterns in answer logs
    Analyze {
        /// Answer log file (.json / .jsonl) or directory
        #[arg(long)]
        logs: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Save the full report as JSON
        #[arg(long)]
        output: Option<PathBuf>,

        /// Message language: en, ja
        #[arg(long)]
        locale: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show overall, per-category and per-problem statistics
    Stats {
        /// Answer log file (.json / .jsonl) or directory
        #[arg(long)]
        logs: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Check answer logs for inconsistent records
    Validate {
        /// Answer log file (.json / .jsonl) or directory
        #[arg(long)]
        logs: PathBuf,
    },

    /// Answer questions interactively on stdin
    Quiz {
        #[command(flatten)]
        settings: SettingsArgs,

        /// Target the weakest pattern found in these logs instead of the
        /// range flags. Falls back to the config's free practice when no
        /// pattern is found.
        #[arg(
            long,
            conflicts_with_all = [
                "operation",
                "first_min",
                "first_max",
                "second_min",
                "second_max",
                "carry",
                "borrow",
            ]
        )]
        logs: Option<PathBuf>,

        /// Number of questions (default: batch_size from config)
        #[arg(long)]
        count: Option<usize>,

        /// RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Append this session's answers as JSONL
        #[arg(long)]
        log_output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter sansu.toml
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sansu=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            settings,
            count,
            seed,
            format,
            answers,
            config,
        } => commands::generate::execute(settings, count, seed, format, answers, config),
        Commands::Practice {
            logs,
            count,
            seed,
            locale,
            format,
            config,
        } => commands::practice::execute(logs, count, seed, locale, format, config),
        Commands::Analyze {
            logs,
            format,
            output,
            locale,
            config,
        } => commands::analyze::execute(logs, format, output, locale, config),
        Commands::Stats { logs, format } => commands::stats::execute(logs, format),
        Commands::Validate { logs } => commands::validate::execute(logs),
        Commands::Quiz {
            settings,
            logs,
            count,
            seed,
            log_output,
            config,
        } => commands::quiz::execute(settings, logs, count, seed, log_output, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
