//! Environment source: `TARG__CLI__COLOR=false` sets `cli.color`.

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment};

/// Prefix shared by every configuration variable.
pub const ENV_PREFIX: &str = "TARG";

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    )
}
