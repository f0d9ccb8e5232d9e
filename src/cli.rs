//! CLI domain: dispatch, help, failure output and styling.
//! The route module owns the invocation state machine; the rest only formats text.

mod help;
mod output;
mod presentation;
mod route;

pub use help::{arguments_description, command_help, listing, usage_line, LISTING_HINT};
pub use output::{failure_report, map_failure, Failure, FAILURE_BANNER};
pub use presentation::{Attr, Styler};
pub use route::{Cli, Outcome};
