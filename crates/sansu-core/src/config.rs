//! Drill configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::analyzer::Thresholds;
use crate::model::GenerationSettings;
use crate::suggestion::Locale;

/// Top-level sansu configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SansuConfig {
    /// Default free-practice settings.
    #[serde(default)]
    pub generation: GenerationSettings,
    /// Weakness cut-offs.
    #[serde(default)]
    pub thresholds: Thresholds,
    /// Questions per generated batch or practice set.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Language for learner-facing messages.
    #[serde(default)]
    pub locale: Locale,
    /// Fixed RNG seed for reproducible worksheets.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_batch_size() -> usize {
    10
}

impl Default for SansuConfig {
    fn default() -> Self {
        Self {
            generation: GenerationSettings::default(),
            thresholds: Thresholds::default(),
            batch_size: default_batch_size(),
            locale: Locale::default(),
            seed: None,
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `sansu.toml` in the current directory
/// 2. `~/.config/sansu/config.toml`
///
/// Environment variable overrides: `SANSU_SEED`, `SANSU_LOCALE`.
pub fn load_config_from(path: Option<&Path>) -> Result<SansuConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("sansu.toml");
        if local.exists() {
            Some(local)
        } else {
            config_dir()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => SansuConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Parse and validate a TOML config string.
pub fn parse_config(content: &str) -> Result<SansuConfig> {
    let config: SansuConfig = toml::from_str(content)?;
    config.generation.validate()?;
    let t = &config.thresholds;
    anyhow::ensure!(
        (0.0..=1.0).contains(&t.weak_correct_rate),
        "thresholds.weak_correct_rate must be between 0.0 and 1.0"
    );
    anyhow::ensure!(
        t.recent_mistake_threshold >= 1,
        "thresholds.recent_mistake_threshold must be at least 1"
    );
    anyhow::ensure!(
        t.recent_flag_min >= 1,
        "thresholds.recent_flag_min must be at least 1"
    );
    anyhow::ensure!(
        t.recent_window >= t.recent_mistake_threshold,
        "thresholds.recent_window ({}) must not be smaller than recent_mistake_threshold ({})",
        t.recent_window,
        t.recent_mistake_threshold
    );
    Ok(config)
}

fn apply_env_overrides(config: &mut SansuConfig) -> Result<()> {
    if let Ok(seed) = std::env::var("SANSU_SEED") {
        let seed = seed
            .trim()
            .parse::<u64>()
            .with_context(|| format!("invalid SANSU_SEED: '{seed}'"))?;
        config.seed = Some(seed);
    }
    if let Ok(locale) = std::env::var("SANSU_LOCALE") {
        config.locale = locale.parse()?;
    }
    Ok(())
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("sansu"))
}
