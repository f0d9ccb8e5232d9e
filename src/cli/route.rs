//! CLI route: the command table and the per-invocation dispatch state machine.
//!
//! `Start -> Resolve -> {Help, Bind, Unresolved}`, `Bind -> {Invoke, Failed}`,
//! `Invoke -> {Success, Failed}`. Every failure after resolution is caught here, reported
//! once, and turned into a non-zero exit code.

use crate::args::{bind, tokenize, Bound, BoundArgs, TRACE};
use crate::cli::help::{command_help, listing};
use crate::cli::output::{failure_report, map_failure, Failure};
use crate::cli::presentation::Styler;
use crate::command::{Callable, Command, CommandDescriptor, CommandRegistry, Registration};
use crate::config::CliSettings;
use crate::docs::{DocExtractor, RestDocExtractor};
use crate::error::RegistrationError;
use anyhow::Context;
use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::RefCell;
use std::io::{IsTerminal, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use tracing::{debug, error, info};

/// How one invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No tokens: the command listing was shown.
    Listing,
    /// No command matched the tokens.
    Unresolved { token: String, exit_code: i32 },
    /// `--help` was given for a command.
    Help { command: String },
    /// The command ran to completion.
    Success { command: String },
    /// Binding failed, or the command returned an error or panicked.
    Failed { command: String },
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Listing | Outcome::Help { .. } | Outcome::Success { .. } => 0,
            Outcome::Unresolved { exit_code, .. } => *exit_code,
            Outcome::Failed { .. } => 1,
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code() == 0
    }
}

/// A command-line application built from registered functions.
pub struct Cli {
    description: String,
    registry: CommandRegistry,
    docs: Box<dyn DocExtractor>,
    styler: Styler,
    unresolved_exit_code: i32,
}

impl Cli {
    /// Colour follows whether stdout is a terminal.
    pub fn new(description: impl Into<String>) -> Self {
        let settings = CliSettings::default();
        Self {
            description: description.into(),
            registry: CommandRegistry::new(),
            docs: Box::new(RestDocExtractor),
            styler: Styler::new(terminal_color(settings.color)),
            unresolved_exit_code: settings.unresolved_exit_code,
        }
    }

    /// Build from loaded settings (description, colour, exit code for unknown commands).
    /// A `color` setting only takes effect when stdout is a terminal.
    pub fn from_settings(settings: &CliSettings) -> Self {
        Self::new(settings.description.clone())
            .with_color(terminal_color(settings.color))
            .with_unresolved_exit_code(settings.unresolved_exit_code)
    }

    /// Replace the documentation extractor. Affects commands registered afterwards.
    pub fn with_doc_extractor(mut self, docs: impl DocExtractor + 'static) -> Self {
        self.docs = Box::new(docs);
        self
    }

    /// Force colour on or off regardless of the output stream.
    pub fn with_color(mut self, color: bool) -> Self {
        self.styler = Styler::new(color);
        self
    }

    pub fn with_unresolved_exit_code(mut self, exit_code: i32) -> Self {
        self.unresolved_exit_code = exit_code;
        self
    }

    /// Register a command under its own name.
    pub fn register(&mut self, command: Command) -> Result<&CommandDescriptor, RegistrationError> {
        self.register_with(command, Registration::new())
    }

    /// Register a command with a group, explicit name or aliases.
    pub fn register_with(
        &mut self,
        command: Command,
        registration: Registration,
    ) -> Result<&CommandDescriptor, RegistrationError> {
        self.registry
            .register(command, registration, self.docs.as_ref())
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The listing shown for an empty or unrecognised invocation.
    pub fn help_text(&self) -> String {
        listing(&self.description, &self.registry, &self.styler)
    }

    /// Dispatch one invocation. `tokens` excludes the program name; dispatcher output
    /// goes to `out`, while the command's own output is left alone.
    pub fn execute<S, W>(&self, tokens: &[S], out: &mut W) -> std::io::Result<Outcome>
    where
        S: AsRef<str>,
        W: Write,
    {
        if tokens.is_empty() {
            writeln!(out, "{}", self.help_text())?;
            return Ok(Outcome::Listing);
        }

        let Some((descriptor, rest)) = self.registry.resolve(tokens) else {
            let token = tokens[0].as_ref().to_string();
            debug!(command = %token, "Unrecognised command");
            writeln!(out, "Unrecognised command - {}", token)?;
            writeln!(out, "{}", self.help_text())?;
            return Ok(Outcome::Unresolved {
                token,
                exit_code: self.unresolved_exit_code,
            });
        };

        self.dispatch(descriptor, rest, out)
    }

    /// Dispatch to the first registered command without naming it: every token is an
    /// argument. With nothing registered the listing is shown.
    pub fn execute_solo<S, W>(&self, tokens: &[S], out: &mut W) -> std::io::Result<Outcome>
    where
        S: AsRef<str>,
        W: Write,
    {
        match self.registry.iter().next() {
            Some(descriptor) => self.dispatch(descriptor, tokens, out),
            None => {
                writeln!(out, "{}", self.help_text())?;
                Ok(Outcome::Listing)
            }
        }
    }

    /// Dispatch the process arguments to stdout and return the exit code.
    pub fn run(&self) -> i32 {
        let tokens = process_tokens();
        exit_code(self.execute(&tokens, &mut std::io::stdout()))
    }

    /// [`Cli::run`] for a program with a single command.
    pub fn run_solo(&self) -> i32 {
        let tokens = process_tokens();
        exit_code(self.execute_solo(&tokens, &mut std::io::stdout()))
    }

    fn dispatch<S, W>(
        &self,
        descriptor: &CommandDescriptor,
        rest: &[S],
        out: &mut W,
    ) -> std::io::Result<Outcome>
    where
        S: AsRef<str>,
        W: Write,
    {
        let command = descriptor.qualified_name();
        let arguments = tokenize(rest);
        let trace = arguments.flag(TRACE);
        debug!(
            command = %command,
            positional = arguments.positional.len(),
            named = arguments.named.len(),
            "Resolved command"
        );

        let bound = match bind(descriptor, &arguments) {
            Ok(Bound::Help) => {
                writeln!(out, "{}", command_help(descriptor, &self.styler))?;
                return Ok(Outcome::Help { command });
            }
            Ok(Bound::Call(bound)) => bound,
            Err(e) => return self.report_failure(descriptor, Failure::Bind(e), trace, out),
        };

        out.flush()?;
        match invoke(descriptor, bound, trace) {
            Ok(()) => {
                info!(command = %command, "Command completed successfully");
                Ok(Outcome::Success { command })
            }
            Err(failure) => self.report_failure(descriptor, failure, trace, out),
        }
    }

    fn report_failure<W: Write>(
        &self,
        descriptor: &CommandDescriptor,
        failure: Failure,
        trace: bool,
        out: &mut W,
    ) -> std::io::Result<Outcome> {
        let command = descriptor.qualified_name();
        error!(command = %command, error = %map_failure(&failure), "Command failed");
        writeln!(out, "{}", failure_report(&failure, trace, &self.styler))?;
        writeln!(out, "{}", command_help(descriptor, &self.styler))?;
        Ok(Outcome::Failed { command })
    }
}

fn terminal_color(enabled: bool) -> bool {
    enabled && std::io::stdout().is_terminal()
}

fn process_tokens() -> Vec<String> {
    std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}

fn exit_code(result: std::io::Result<Outcome>) -> i32 {
    match result {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            error!("Failed to write CLI output: {}", e);
            1
        }
    }
}

/// Run the command to completion. Async commands get a single-use current-thread
/// runtime that lives only for this call. With `trace` set, a backtrace is captured for
/// returned errors and at the panic site for panics.
fn invoke(descriptor: &CommandDescriptor, args: BoundArgs, trace: bool) -> Result<(), Failure> {
    let result = match descriptor.callable() {
        Callable::Sync(f) => catch_panic(trace, || f(&args)),
        Callable::Async(f) => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("Failed to start the async runtime")?;
            catch_panic(trace, || runtime.block_on(f(args)))
        }
    };
    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(error)) => Err(Failure::Runtime {
            error,
            backtrace: trace.then(Backtrace::force_capture),
        }),
        Err(CaughtPanic { message, backtrace }) => Err(Failure::Panic { message, backtrace }),
    }
}

struct CaughtPanic {
    message: String,
    backtrace: Option<Backtrace>,
}

/// Per-thread panic capture state, present while a command runs.
struct PanicCapture {
    trace: bool,
    backtrace: Option<Backtrace>,
}

thread_local! {
    static PANIC_CAPTURE: RefCell<Option<PanicCapture>> = const { RefCell::new(None) };
}

static PANIC_HOOK: Once = Once::new();

/// Wrap the process panic hook once. Panics on a thread that is running a command are
/// recorded silently; every other panic goes to the previous hook.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let captured = PANIC_CAPTURE
                .try_with(|slot| match slot.borrow_mut().as_mut() {
                    Some(capture) => {
                        if capture.trace {
                            capture.backtrace = Some(Backtrace::force_capture());
                        }
                        true
                    }
                    None => false,
                })
                .unwrap_or(false);
            if !captured {
                previous(info);
            }
        }));
    });
}

fn catch_panic<T>(trace: bool, f: impl FnOnce() -> T) -> Result<T, CaughtPanic> {
    install_panic_hook();
    let outer = PANIC_CAPTURE.with(|slot| {
        slot.replace(Some(PanicCapture {
            trace,
            backtrace: None,
        }))
    });
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    let capture = PANIC_CAPTURE.with(|slot| slot.replace(outer));
    result.map_err(|payload| CaughtPanic {
        message: panic_message(payload.as_ref()),
        backtrace: capture.and_then(|c| c.backtrace),
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "command panicked".to_string()
    }
}
