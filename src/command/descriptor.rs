//! Command and parameter descriptors.

use crate::args::{is_reserved, BoundArgs};
use crate::command::signature::{Command, Registration};
use crate::docs::DocExtractor;
use crate::error::{NameKind, RegistrationError};
use crate::types::{TypeTag, Value};
use futures::future::BoxFuture;
use std::collections::{HashMap, HashSet};

pub type SyncFn = Box<dyn Fn(&BoundArgs) -> anyhow::Result<()> + Send + Sync>;
pub type AsyncFn = Box<dyn Fn(BoundArgs) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// The function behind a command.
pub enum Callable {
    Sync(SyncFn),
    Async(AsyncFn),
}

impl Callable {
    pub fn is_async(&self) -> bool {
        matches!(self, Callable::Async(_))
    }
}

impl std::fmt::Debug for Callable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Callable::Sync(_) => f.write_str("Callable::Sync"),
            Callable::Async(_) => f.write_str("Callable::Async"),
        }
    }
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    pub name: String,
    pub type_tag: TypeTag,
    pub default: Option<Value>,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, type_tag: TypeTag) -> Self {
        Self {
            name: name.into(),
            type_tag,
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Required parameters have no default and a non-optional type.
    pub fn is_required(&self) -> bool {
        !self.has_default() && !self.type_tag.is_optional()
    }
}

/// A registered command. Built once by the registry and never mutated.
#[derive(Debug)]
pub struct CommandDescriptor {
    callable: Callable,
    name: String,
    group: Option<String>,
    aliases: Vec<String>,
    parameters: Vec<ParameterDescriptor>,
    short_description: String,
    long_description: String,
    parameter_descriptions: HashMap<String, String>,
}

impl CommandDescriptor {
    /// Validate names and signature, extract docs, and freeze the command.
    pub fn build(
        command: Command,
        registration: Registration,
        docs: &dyn DocExtractor,
    ) -> Result<Self, RegistrationError> {
        let Command {
            name: own_name,
            doc,
            parameters,
            callable,
        } = command;

        let name = registration.name.unwrap_or(own_name);
        validate_name(&name, NameKind::Command)?;
        if let Some(group) = &registration.group {
            validate_name(group, NameKind::Group)?;
        }
        let mut aliases: Vec<String> = Vec::with_capacity(registration.aliases.len());
        for alias in registration.aliases {
            validate_name(&alias, NameKind::Alias)?;
            if alias != name && !aliases.contains(&alias) {
                aliases.push(alias);
            }
        }

        let mut seen = HashSet::new();
        for param in &parameters {
            if is_reserved(&param.name) {
                return Err(RegistrationError::ReservedParameter(param.name.clone()));
            }
            if !seen.insert(param.name.as_str()) {
                return Err(RegistrationError::DuplicateParameter(param.name.clone()));
            }
        }

        let extracted = docs.extract(&doc);

        Ok(Self {
            callable,
            name,
            group: registration.group,
            aliases,
            parameters,
            short_description: extracted.short,
            long_description: extracted.long,
            parameter_descriptions: extracted.params,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// `group name` for grouped commands, otherwise the bare name.
    pub fn qualified_name(&self) -> String {
        match &self.group {
            Some(group) => format!("{} {}", group, self.name),
            None => self.name.clone(),
        }
    }

    /// Whether `token` is this command's name or one of its aliases.
    pub fn answers_to(&self, token: &str) -> bool {
        self.name == token || self.aliases.iter().any(|a| a == token)
    }

    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    pub fn long_description(&self) -> &str {
        &self.long_description
    }

    /// Documented description of a parameter, or an empty string.
    pub fn parameter_description(&self, name: &str) -> &str {
        self.parameter_descriptions
            .get(name)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn callable(&self) -> &Callable {
        &self.callable
    }
}

fn validate_name(name: &str, kind: NameKind) -> Result<(), RegistrationError> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(RegistrationError::InvalidName {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}
