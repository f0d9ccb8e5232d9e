//! Shared helpers for integration tests.

use std::sync::{Arc, Mutex};
use targ::{BoundArgs, Cli, Command, Outcome};

/// Serialises tests that touch process environment variables.
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Dispatch `tokens` and capture what the dispatcher printed.
pub fn execute(cli: &Cli, tokens: &[&str]) -> (Outcome, String) {
    let mut out = Vec::new();
    let outcome = cli.execute(tokens, &mut out).unwrap();
    (outcome, String::from_utf8(out).unwrap())
}

/// Records every set of bound arguments a command receives.
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<BoundArgs>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sync command that records its arguments and succeeds.
    pub fn command(&self, name: &str) -> Command {
        let calls = Arc::clone(&self.calls);
        Command::sync(name, move |args| {
            calls.lock().unwrap().push(args.clone());
            Ok(())
        })
    }

    pub fn calls(&self) -> Vec<BoundArgs> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last(&self) -> BoundArgs {
        self.calls().pop().expect("command was never called")
    }
}

/// A CLI with colour disabled so output can be compared as plain text.
pub fn plain_cli() -> Cli {
    Cli::new("Test CLI").with_color(false)
}
