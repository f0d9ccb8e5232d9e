//! Command registry: append-only store of descriptors with name, alias and group lookup.

use crate::command::descriptor::CommandDescriptor;
use crate::command::signature::{Command, Registration};
use crate::docs::DocExtractor;
use crate::error::RegistrationError;
use comfy_table::presets::NOTHING;
use comfy_table::Table;
use std::collections::HashMap;
use tracing::debug;

/// Lookup key: (group, name-or-alias).
type IndexKey = (Option<String>, String);

/// Registry of commands in registration order.
///
/// Names need not be unique. The index is rebuilt entry by entry, so on a clash the
/// last-registered command wins.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    entries: Vec<CommandDescriptor>,
    index: HashMap<IndexKey, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a descriptor for `command` and append it.
    pub fn register(
        &mut self,
        command: Command,
        registration: Registration,
        docs: &dyn DocExtractor,
    ) -> Result<&CommandDescriptor, RegistrationError> {
        let descriptor = CommandDescriptor::build(command, registration, docs)?;
        Ok(self.insert(descriptor))
    }

    /// Append an already built descriptor.
    pub fn insert(&mut self, descriptor: CommandDescriptor) -> &CommandDescriptor {
        let position = self.entries.len();
        let group = descriptor.group().map(str::to_string);
        self.index
            .insert((group.clone(), descriptor.name().to_string()), position);
        for alias in descriptor.aliases() {
            self.index.insert((group.clone(), alias.clone()), position);
        }
        debug!(
            command = %descriptor.qualified_name(),
            aliases = ?descriptor.aliases(),
            parameters = descriptor.parameters().len(),
            "Registered command"
        );
        self.entries.push(descriptor);
        &self.entries[position]
    }

    /// Ungrouped command by name or alias.
    pub fn get(&self, name: &str) -> Option<&CommandDescriptor> {
        self.lookup(None, name)
    }

    /// Grouped command by group and name or alias.
    pub fn get_grouped(&self, group: &str, name: &str) -> Option<&CommandDescriptor> {
        self.lookup(Some(group), name)
    }

    fn lookup(&self, group: Option<&str>, name: &str) -> Option<&CommandDescriptor> {
        let key = (group.map(str::to_string), name.to_string());
        self.index.get(&key).map(|&i| &self.entries[i])
    }

    /// Resolve the command a token sequence refers to.
    ///
    /// An ungrouped name or alias in the first token wins; otherwise the first two
    /// tokens are tried as `group command`. Returns the descriptor and the tokens left
    /// after the command name.
    pub fn resolve<'t, S: AsRef<str>>(
        &self,
        tokens: &'t [S],
    ) -> Option<(&CommandDescriptor, &'t [S])> {
        let first = tokens.first()?;
        if let Some(descriptor) = self.get(first.as_ref()) {
            return Some((descriptor, &tokens[1..]));
        }
        if let [group, name, rest @ ..] = tokens {
            if let Some(descriptor) = self.get_grouped(group.as_ref(), name.as_ref()) {
                return Some((descriptor, rest));
            }
        }
        None
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One row per command, in registration order: qualified name (with aliases) and
    /// short description.
    pub fn render_help_listing(&self) -> String {
        if self.entries.is_empty() {
            return "No commands registered.".to_string();
        }
        let mut table = Table::new();
        table.load_preset(NOTHING);
        for descriptor in &self.entries {
            let mut name = descriptor.qualified_name();
            if !descriptor.aliases().is_empty() {
                name = format!("{} ({})", name, descriptor.aliases().join(", "));
            }
            table.add_row(vec![name, descriptor.short_description().to_string()]);
        }
        table.to_string()
    }
}
