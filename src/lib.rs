//! Targ: turn plain functions into command-line commands
//!
//! Register functions with typed parameters and documentation, and `targ` builds the
//! command-line interface from them: command lookup (with groups and aliases),
//! tokenizing, binding with type coercion, help text, and failure reporting.
//!
//! ```no_run
//! use targ::{Cli, Command, TypeTag};
//!
//! let mut cli = Cli::new("Release tools");
//! cli.register(
//!     Command::sync("say_hello", |args| {
//!         let name: String = args.get("name")?;
//!         println!("hello {}", name);
//!         Ok(())
//!     })
//!     .doc("Greet someone.\n\n:param name:\n    The person to greet.")
//!     .param("name", TypeTag::String),
//! )?;
//! std::process::exit(cli.run());
//! # Ok::<(), targ::RegistrationError>(())
//! ```

pub mod args;
pub mod cli;
pub mod command;
pub mod config;
pub mod docs;
pub mod error;
pub mod logging;
pub mod types;

pub use args::{Arguments, BoundArgs, RawValue};
pub use cli::{Cli, Outcome, Styler};
pub use command::{Command, CommandDescriptor, CommandRegistry, ParameterDescriptor, Registration};
pub use config::{CliSettings, ConfigLoader, TargConfig};
pub use docs::{DocExtractor, Docs, RestDocExtractor};
pub use error::{ArgumentError, BindError, ConfigError, RegistrationError};
pub use logging::{init_logging, LoggingConfig};
pub use types::{FromValue, TypeTag, Value};
