//! Configuration file management for stride.
//!
//! Provides a TOML-based config file at `~/.config/stride/config.toml` and
//! a resolution chain for the plan directory: CLI flag > env var > config
//! file > default.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default plan directory when nothing else is configured.
pub const DEFAULT_PLAN_DIR: &str = "plan";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    pub plan: PlanSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlanSection {
    /// Directory holding the plan's step files.
    pub dir: String,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the stride config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/stride` or `~/.config/stride`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("stride");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("stride")
}

/// Return the path to the stride config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    Ok(())
}

// -----------------------------------------------------------------------
// Plan directory resolution
// -----------------------------------------------------------------------

/// Resolve the plan directory using the chain:
/// CLI flag > `STRIDE_PLAN_DIR` env > config file > [`DEFAULT_PLAN_DIR`].
pub fn resolve_plan_dir(cli_dir: Option<&PathBuf>) -> PathBuf {
    if let Some(dir) = cli_dir {
        return dir.clone();
    }
    if let Ok(dir) = std::env::var("STRIDE_PLAN_DIR") {
        return PathBuf::from(dir);
    }
    if let Ok(cfg) = load_config() {
        return PathBuf::from(cfg.plan.dir);
    }
    PathBuf::from(DEFAULT_PLAN_DIR)
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
