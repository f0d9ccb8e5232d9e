//! Error types for command registration, argument binding and configuration.

use crate::types::TypeTag;
use thiserror::Error;

/// Registration errors. These are programming errors at the call site and are
/// returned straight from `register`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Invalid {kind} name {name:?}: names must be non-empty and contain no whitespace")]
    InvalidName { kind: NameKind, name: String },

    #[error("Parameter name {0:?} is reserved (help and trace are read by the dispatcher)")]
    ReservedParameter(String),

    #[error("Parameter {0:?} is declared more than once")]
    DuplicateParameter(String),
}

/// Which name failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Command,
    Group,
    Alias,
}

impl std::fmt::Display for NameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NameKind::Command => write!(f, "command"),
            NameKind::Group => write!(f, "group"),
            NameKind::Alias => write!(f, "alias"),
        }
    }
}

/// Failure to turn raw tokens into the arguments of a command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindError {
    #[error("Unable to convert {literal:?} to {expected} for parameter '{parameter}'")]
    TypeConversion {
        parameter: String,
        literal: String,
        expected: TypeTag,
    },

    #[error("Missing required argument '{0}'")]
    MissingArgument(String),

    #[error("Too many positional arguments: {given} given, at most {accepted} accepted")]
    TooManyPositionals { given: usize, accepted: usize },
}

/// A single-value conversion failure, before it is attributed to a parameter.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot parse {literal:?} as {expected}")]
pub struct ConversionError {
    pub literal: String,
    pub expected: TypeTag,
}

impl ConversionError {
    pub fn new(literal: impl Into<String>, expected: TypeTag) -> Self {
        Self {
            literal: literal.into(),
            expected,
        }
    }

    pub fn for_parameter(self, parameter: &str) -> BindError {
        BindError::TypeConversion {
            parameter: parameter.to_string(),
            literal: self.literal,
            expected: self.expected,
        }
    }
}

/// Errors raised by command bodies when reading their bound arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("Argument '{0}' was not supplied")]
    Missing(String),

    #[error("Argument '{name}' is {found}, expected {expected}")]
    WrongType {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Configuration and logging setup errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Invalid(String),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Configuration I/O error: {0}")]
    Io(#[from] std::io::Error),
}
