//! Argument handling: tokenizing raw tokens, converting literals, binding to parameters.

pub mod bind;
pub mod convert;
pub mod tokenize;

pub use bind::{bind, Bound, BoundArgs};
pub use convert::{coerce, converter, Converter};
pub use tokenize::{normalize_literal, tokenize, Arguments, RawValue};

/// Named entry that short-circuits binding and shows the command's help.
pub const HELP: &str = "help";

/// Named entry that adds the full diagnostic trace to failure reports.
pub const TRACE: &str = "trace";

/// Named entries read by the dispatcher and never forwarded to a command.
pub const RESERVED_NAMES: &[&str] = &[HELP, TRACE];

pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}
