//! Tokenizer: splits a flat token list into positional and named values.

use std::collections::HashMap;

const FLAG_PREFIX: &str = "--";

/// A raw value as typed on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// `--name` with no `=value`.
    Switch,
    /// A recognised boolean literal; keeps the spelling it was typed with.
    Bool { value: bool, literal: String },
    /// Anything else, left for type coercion.
    Text(String),
}

impl RawValue {
    /// Boolean reading of the value, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RawValue::Switch => Some(true),
            RawValue::Bool { value, .. } => Some(*value),
            RawValue::Text(_) => None,
        }
    }

    /// The value as originally typed (`"true"` for a bare switch).
    pub fn text(&self) -> &str {
        match self {
            RawValue::Switch => "true",
            RawValue::Bool { literal, .. } => literal,
            RawValue::Text(text) => text,
        }
    }
}

/// Tokenizer output for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    pub positional: Vec<RawValue>,
    pub named: HashMap<String, RawValue>,
}

impl Arguments {
    /// True when `name` was given and reads as boolean true.
    pub fn flag(&self, name: &str) -> bool {
        self.named
            .get(name)
            .and_then(RawValue::as_bool)
            .unwrap_or(false)
    }

    pub fn named(&self, name: &str) -> Option<&RawValue> {
        self.named.get(name)
    }
}

/// Map boolean-looking literals (`true`, `t`, `false`, `f`, any casing) to booleans.
pub fn normalize_literal(token: &str) -> RawValue {
    if token.eq_ignore_ascii_case("true") || token.eq_ignore_ascii_case("t") {
        RawValue::Bool {
            value: true,
            literal: token.to_string(),
        }
    } else if token.eq_ignore_ascii_case("false") || token.eq_ignore_ascii_case("f") {
        RawValue::Bool {
            value: false,
            literal: token.to_string(),
        }
    } else {
        RawValue::Text(token.to_string())
    }
}

/// Split tokens into positional values and `--name[=value]` entries.
///
/// A repeated name keeps its last value.
pub fn tokenize<S: AsRef<str>>(tokens: &[S]) -> Arguments {
    let mut arguments = Arguments::default();
    for token in tokens {
        let token = token.as_ref();
        match token.strip_prefix(FLAG_PREFIX) {
            Some(entry) => match entry.split_once('=') {
                Some((name, value)) => {
                    arguments
                        .named
                        .insert(name.to_string(), normalize_literal(value));
                }
                None => {
                    arguments.named.insert(entry.to_string(), RawValue::Switch);
                }
            },
            None => arguments.positional.push(normalize_literal(token)),
        }
    }
    arguments
}
