//! Configuration System
//!
//! Settings for the program boundary: how the CLI presents itself and how logging is set
//! up. Layered with the `config` crate: built-in defaults, then the user's global
//! `config.toml`, then an explicit file, then `TARG__`-prefixed environment variables.
//! The dispatcher itself never reads configuration; callers pass the loaded
//! [`CliSettings`] to [`crate::Cli::from_settings`].

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod merge;
mod sources;

pub use sources::environment::ENV_PREFIX;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargConfig {
    /// CLI presentation settings
    #[serde(default)]
    pub cli: CliSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// CLI presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliSettings {
    /// Heading of the command listing
    #[serde(default = "default_description")]
    pub description: String,

    /// Style help and failure output with ANSI colours
    #[serde(default = "default_true")]
    pub color: bool,

    /// Exit status when no command matches the given tokens
    #[serde(default = "default_unresolved_exit_code")]
    pub unresolved_exit_code: i32,
}

fn default_description() -> String {
    "Targ CLI".to_string()
}

fn default_true() -> bool {
    true
}

fn default_unresolved_exit_code() -> i32 {
    2
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            description: default_description(),
            color: default_true(),
            unresolved_exit_code: default_unresolved_exit_code(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Cli(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Cli(msg) => write!(f, "CLI: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl CliSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.description.trim().is_empty() {
            return Err("Description cannot be empty".to_string());
        }
        if !(0..=255).contains(&self.unresolved_exit_code) {
            return Err(format!(
                "Exit code {} is outside 0..=255",
                self.unresolved_exit_code
            ));
        }
        Ok(())
    }
}

impl TargConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        if let Err(e) = self.cli.validate() {
            errors.push(ValidationError::Cli(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Loads [`TargConfig`] from the layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, global file, environment.
    pub fn load() -> Result<TargConfig, ConfigError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::environment::add_to_builder(builder);
        Self::finish(builder)
    }

    /// Defaults, the given file (must exist), environment.
    pub fn load_from_file(path: &Path) -> Result<TargConfig, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::Invalid(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = builder.add_source(config::File::from(path).required(true));
        let builder = sources::environment::add_to_builder(builder);
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<TargConfig, ConfigError> {
        let config: TargConfig = builder.build()?.try_deserialize()?;
        config.validate().map_err(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ConfigError::Invalid(format!(
                "Configuration validation failed:\n{}",
                msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}

#[cfg(test)]
pub(crate) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
