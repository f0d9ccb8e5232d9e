//! CLI output: failure reporting for commands that did not complete.

use crate::cli::presentation::{Attr, Styler};
use crate::error::BindError;
use std::backtrace::{Backtrace, BacktraceStatus};

pub const FAILURE_BANNER: &str = "The command failed.";

/// Why an invocation failed after its command was resolved.
#[derive(Debug)]
pub enum Failure {
    /// Tokens could not be bound to the command's parameters.
    Bind(BindError),
    /// The command returned an error. `backtrace` is captured when a trace was requested.
    Runtime {
        error: anyhow::Error,
        backtrace: Option<Backtrace>,
    },
    /// The command panicked. `backtrace` is captured at the panic site when a trace was
    /// requested.
    Panic {
        message: String,
        backtrace: Option<Backtrace>,
    },
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Failure::Bind(e) => write!(f, "{}", e),
            Failure::Runtime { error, .. } => write!(f, "{}", error),
            Failure::Panic { message, .. } => write!(f, "{}", message),
        }
    }
}

impl From<BindError> for Failure {
    fn from(e: BindError) -> Self {
        Failure::Bind(e)
    }
}

impl From<anyhow::Error> for Failure {
    fn from(error: anyhow::Error) -> Self {
        Failure::Runtime {
            error,
            backtrace: None,
        }
    }
}

/// One-line message for a failure.
pub fn map_failure(failure: &Failure) -> String {
    failure.to_string()
}

/// Full diagnostic form: the cause chain followed by the stack frames.
///
/// A backtrace anyhow captured itself (`RUST_BACKTRACE`/`RUST_LIB_BACKTRACE`) is part of
/// its debug output; otherwise the one captured at dispatch is appended.
fn diagnostic_trace(failure: &Failure) -> String {
    match failure {
        Failure::Bind(e) => format!("{:?}", e),
        Failure::Runtime { error, backtrace } => {
            let chain = format!("{:?}", error);
            if error.backtrace().status() == BacktraceStatus::Captured {
                chain
            } else {
                with_frames(chain, backtrace.as_ref())
            }
        }
        Failure::Panic { message, backtrace } => {
            with_frames(format!("command panicked: {}", message), backtrace.as_ref())
        }
    }
}

fn with_frames(chain: String, backtrace: Option<&Backtrace>) -> String {
    match backtrace {
        Some(frames) if frames.status() == BacktraceStatus::Captured => {
            format!("{}\n\nStack backtrace:\n{}", chain, frames)
        }
        _ => chain,
    }
}

/// Banner, message and, when requested, the trace.
pub fn failure_report(failure: &Failure, trace: bool, styler: &Styler) -> String {
    let mut lines = vec![
        styler.style(FAILURE_BANNER, &[Attr::Red]),
        map_failure(failure),
    ];
    if trace {
        lines.push(String::new());
        lines.push(styler.style("Traceback:", &[Attr::Yellow]));
        lines.push(diagnostic_trace(failure));
    }
    lines.join("\n")
}
