//! Configuration loading from unglow.toml and the command line

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;
use unglow_core::{BatchOptions, WriteMode};

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(
    name = "unglow",
    about = "Turn glow images baked onto black into images with real transparency"
)]
pub struct Cli {
    /// Directory containing the images (default: assets/images/cards)
    pub directory: Option<PathBuf>,
    /// File name pattern inside the directory (default: *.png)
    #[arg(long)]
    pub pattern: Option<String>,
    /// Write through a temporary file and rename it over the original
    #[arg(long, overrides_with = "no_atomic")]
    pub atomic: bool,
    /// Overwrite files directly, even if the config file enables atomic writes
    #[arg(long, overrides_with = "atomic")]
    pub no_atomic: bool,
    /// Convert files in parallel
    #[arg(long, overrides_with = "no_parallel")]
    pub parallel: bool,
    /// Convert files one after another, even if the config file enables parallel
    #[arg(long, overrides_with = "parallel")]
    pub no_parallel: bool,
    /// Read settings from a TOML file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Settings file; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub directory: Option<PathBuf>,
    pub pattern: Option<String>,
    #[serde(default)]
    pub atomic: bool,
    #[serde(default)]
    pub parallel: bool,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.as_ref().display(), e)))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Merge file settings with command-line flags; flags win, including
    /// `--no-atomic` / `--no-parallel` over a file that turns the mode on
    pub fn into_options(self, cli: &Cli) -> BatchOptions {
        let defaults = BatchOptions::default();
        let atomic = switch(cli.atomic, cli.no_atomic, self.atomic);

        BatchOptions {
            directory: cli
                .directory
                .clone()
                .or(self.directory)
                .unwrap_or(defaults.directory),
            pattern: cli
                .pattern
                .clone()
                .or(self.pattern)
                .unwrap_or(defaults.pattern),
            write_mode: if atomic {
                WriteMode::Atomic
            } else {
                WriteMode::Overwrite
            },
            parallel: switch(cli.parallel, cli.no_parallel, self.parallel),
        }
    }
}

fn switch(on: bool, off: bool, file: bool) -> bool {
    match (on, off) {
        (true, _) => true,
        (_, true) => false,
        _ => file,
    }
}

/// Resolve the batch options from the command line and optional config file
pub fn resolve(cli: &Cli) -> Result<BatchOptions, ConfigError> {
    let config = match &cli.config {
        Some(path) => {
            log::debug!("Loading config from {}", path.display());
            Config::load(path)?
        }
        None => Config::default(),
    };
    Ok(config.into_options(cli))
}

#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
