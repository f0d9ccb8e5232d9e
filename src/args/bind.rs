//! Binder: turns tokenizer output into the keyword arguments of one command.

use crate::args::convert::coerce;
use crate::args::tokenize::Arguments;
use crate::args::{is_reserved, HELP};
use crate::command::CommandDescriptor;
use crate::error::{ArgumentError, BindError};
use crate::types::{FromValue, Value};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Result of binding.
#[derive(Debug, Clone, PartialEq)]
pub enum Bound {
    /// Arguments ready for the call.
    Call(BoundArgs),
    /// `--help` was given; the command must not run.
    Help,
}

/// Keyword arguments passed to a command body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundArgs {
    values: HashMap<String, Value>,
}

impl BoundArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Raw bound value, if any.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Required argument of type `T`. `None` counts as missing.
    pub fn get<T: FromValue>(&self, name: &str) -> Result<T, ArgumentError> {
        self.get_opt(name)?
            .ok_or_else(|| ArgumentError::Missing(name.to_string()))
    }

    /// Optional argument of type `T`; absent and `None` both read as `Ok(None)`.
    pub fn get_opt<T: FromValue>(&self, name: &str) -> Result<Option<T>, ArgumentError> {
        match self.values.get(name) {
            None | Some(Value::None) => Ok(None),
            Some(value) => T::from_value(value)
                .map(Some)
                .ok_or_else(|| ArgumentError::WrongType {
                    name: name.to_string(),
                    expected: T::EXPECTED,
                    found: value.kind(),
                }),
        }
    }

    /// Boolean argument, false when absent.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(Value::Bool(true)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }
}

/// Bind tokenizer output to a command's parameters.
///
/// Named entries are matched first, in declaration order. Positional values then fill the parameters not
/// already supplied by name, in declaration order. Parameters still unsupplied take
/// their default; a required parameter without one is an error. Never calls the command.
pub fn bind(descriptor: &CommandDescriptor, args: &Arguments) -> Result<Bound, BindError> {
    if args.flag(HELP) {
        return Ok(Bound::Help);
    }

    let mut bound = BoundArgs::new();
    let mut supplied: HashSet<&str> = HashSet::new();

    for param in descriptor.parameters() {
        let Some(raw) = args.named(&param.name) else {
            continue;
        };
        if let Some(value) =
            coerce(param.type_tag, raw).map_err(|e| e.for_parameter(&param.name))?
        {
            bound.insert(param.name.clone(), value);
        }
        supplied.insert(param.name.as_str());
    }

    for name in args.named.keys() {
        if descriptor.parameter(name).is_none() && !is_reserved(name) {
            debug!(
                command = %descriptor.qualified_name(),
                argument = %name,
                "Ignoring named argument with no matching parameter"
            );
        }
    }

    let free: Vec<_> = descriptor
        .parameters()
        .iter()
        .filter(|p| !supplied.contains(p.name.as_str()))
        .collect();
    if args.positional.len() > free.len() {
        return Err(BindError::TooManyPositionals {
            given: args.positional.len(),
            accepted: free.len(),
        });
    }
    for (param, raw) in free.iter().zip(&args.positional) {
        if let Some(value) =
            coerce(param.type_tag, raw).map_err(|e| e.for_parameter(&param.name))?
        {
            bound.insert(param.name.clone(), value);
        }
        supplied.insert(param.name.as_str());
    }

    for param in descriptor.parameters() {
        if supplied.contains(param.name.as_str()) {
            continue;
        }
        match &param.default {
            Some(default) => bound.insert(param.name.clone(), default.clone()),
            None if param.type_tag.is_optional() => {}
            None => return Err(BindError::MissingArgument(param.name.clone())),
        }
    }

    Ok(Bound::Call(bound))
}
