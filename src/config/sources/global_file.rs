//! Global config file source: `$XDG_CONFIG_HOME/targ/config.toml` or the platform
//! equivalent reported by `directories`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::File;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

/// Path to the global config file, if the platform has a config directory.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "targ").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Add the global config file to the builder when it exists.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    match global_config_path() {
        Some(path) if path.exists() => {
            debug!(config_path = %path.display(), "Loading global configuration");
            builder = builder.add_source(File::from(path.as_path()).required(false));
        }
        Some(path) => {
            debug!(config_path = %path.display(), "No global configuration file");
        }
        None => {
            debug!("No config directory available on this platform");
        }
    }
    Ok(builder)
}
