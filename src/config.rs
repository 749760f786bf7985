//! Runtime settings.
//!
//! Values come from the environment (a `.env` file is loaded first if one
//! exists); command-line flags override them.

use clap::ValueEnum;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Default log4rs configuration file.
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

pub const ENV_LOG_CONFIG: &str = "CIDR_MERGER_LOG_CONFIG";
pub const ENV_COLOR: &str = "CIDR_MERGER_COLOR";
pub const ENV_FORMAT: &str = "CIDR_MERGER_FORMAT";

/// How results are written.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Default, ValueEnum)]
pub enum OutputFormat {
    /// One block per line.
    #[default]
    Text,
    /// A JSON array of strings.
    Json,
}

/// When to colour text output.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Default, ValueEnum)]
pub enum ColorMode {
    /// Colour when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Set the global `colored` override for this mode.
    pub fn apply(self) {
        let enabled = match self {
            ColorMode::Auto => std::io::stdout().is_terminal(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        };
        colored::control::set_override(enabled);
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Config {
    pub log_config: PathBuf,
    pub color: ColorMode,
    pub format: OutputFormat,
    /// `KEY=value` settings that were rejected, reported by [`Config::log_ignored`].
    pub ignored: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_config: PathBuf::from(DEFAULT_LOG_CONFIG),
            color: ColorMode::default(),
            format: OutputFormat::default(),
            ignored: Vec::new(),
        }
    }
}

impl Config {
    /// Load `.env` if present, then read settings from the environment.
    pub fn from_env() -> Config {
        dotenv::dotenv().ok();
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Unknown values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        if let Some(path) = lookup(ENV_LOG_CONFIG) {
            config.log_config = PathBuf::from(path);
        }
        if let Some(color) = lookup(ENV_COLOR) {
            match ColorMode::from_str(&color, true) {
                Ok(c) => config.color = c,
                Err(_) => config.ignored.push(format!("{ENV_COLOR}={color}")),
            }
        }
        if let Some(format) = lookup(ENV_FORMAT) {
            match OutputFormat::from_str(&format, true) {
                Ok(f) => config.format = f,
                Err(_) => config.ignored.push(format!("{ENV_FORMAT}={format}")),
            }
        }
        config
    }

    /// Warn about rejected settings. Call once logging is initialised.
    pub fn log_ignored(&self) {
        for setting in &self.ignored {
            log::warn!("Ignoring {setting}");
        }
    }
}

/// Initialise log4rs from the configured YAML file, or log warnings to stderr
/// if the file can not be loaded.
pub fn init_logging(config: &Config) -> Result<(), Box<dyn Error>> {
    if config.log_config.exists() {
        log4rs::init_file(&config.log_config, Default::default())
            .map_err(|e| format!("Error initializing log4rs: {e}"))?;
        log::debug!("Logging configured from {}", config.log_config.display());
        return Ok(());
    }

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{h({l})} {t} - {m}{n}")))
        .build();
    let log_config = LogConfig::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))?;
    log4rs::init_config(log_config)?;
    Ok(())
}
