//! Configuration for the validator front-ends.
//!
//! Handles:
//! - Command-line argument parsing
//! - The optional TOML config file and its lookup order
//! - Merging the two, command line first

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::reason::Level;

/// File name looked up in the working directory.
pub const LOCAL_CONFIG: &str = ".cap-validator.toml";

/// Command-line arguments shared by `cap-validate` and `cap-ls`
#[derive(Debug, Parser)]
#[command(name = "cap-validator")]
#[command(about = "Validate CAP alerts and the Atom, RSS and EDXL-DE feeds that carry them")]
#[command(version)]
pub struct Args {
    /// Document to validate; standard input when absent
    pub input: Option<PathBuf>,

    /// Profile to check alerts against; may be repeated
    #[arg(long = "profile", value_name = "CODE")]
    pub profiles: Vec<String>,

    /// Config file to use instead of the default lookup
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Lowest level that makes the run fail
    #[arg(long, value_name = "LEVEL", help = "Failure level (info, recommendation, warning, error)")]
    pub fail_level: Option<Level>,

    /// Print the available profiles and exit
    #[arg(long)]
    pub list_profiles: bool,

    /// Accepted for LSP clients that pass it; stdio is the only transport
    #[arg(long, hide = true)]
    pub stdio: bool,

    /// Log level
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Contents of a config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub profiles: Option<Vec<String>>,
    pub fail_level: Option<Level>,
    pub format: Option<OutputFormat>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input: Option<PathBuf>,
    pub profiles: Vec<String>,
    pub format: OutputFormat,
    pub fail_level: Level,
    pub list_profiles: bool,
    pub log_level: String,
    /// Config file that was loaded, if any
    pub config_path: Option<PathBuf>,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments, looking for a local
    /// config file in the current directory
    pub fn from_args(args: Args) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read the current directory")?;
        Self::from_args_in(args, &cwd)
    }

    /// Create configuration from explicit arguments, looking for a local
    /// config file in `dir` (useful for testing)
    pub fn from_args_in(args: Args, dir: &Path) -> Result<Self> {
        let config_path = match &args.config {
            Some(path) => Some(path.clone()),
            None => find_config_file(dir),
        };
        let file = match &config_path {
            Some(path) => {
                log::debug!("loading config from {}", path.display());
                FileConfig::load(path)?
            }
            None => FileConfig::default(),
        };

        let profiles = if args.profiles.is_empty() {
            file.profiles.unwrap_or_default()
        } else {
            args.profiles
        };

        Ok(Config {
            input: args.input,
            profiles,
            format: args.format.or(file.format).unwrap_or_default(),
            fail_level: args.fail_level.or(file.fail_level).unwrap_or(Level::Error),
            list_profiles: args.list_profiles,
            log_level: args.log_level,
            config_path,
        })
    }
}

/// `dir/.cap-validator.toml`, then the user config directory.
fn find_config_file(dir: &Path) -> Option<PathBuf> {
    let local = dir.join(LOCAL_CONFIG);
    if local.is_file() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|d| d.join("cap-validator").join("config.toml"))
        .filter(|p| p.is_file())
}
