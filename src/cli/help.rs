//! CLI help: the command listing and per-command help pages.

use crate::cli::presentation::Styler;
use crate::command::{CommandDescriptor, CommandRegistry};
use crate::types::Value;

pub const LISTING_HINT: &str = "Enter the name of a command followed by --help to learn more.";

const ARG_NAME_WIDTH: usize = 10;

/// Application description, hint line, then one row per registered command.
pub fn listing(description: &str, registry: &CommandRegistry, styler: &Styler) -> String {
    [
        styler.bold(description),
        LISTING_HINT.to_string(),
        String::new(),
        registry.render_help_listing(),
    ]
    .join("\n")
}

/// Usage line, e.g. `say_hello name [--greeting=X] [--loud]`.
///
/// Required parameters are shown bare, boolean parameters defaulting to false as
/// `[--name]`, everything else as `[--name=X]`.
pub fn usage_line(descriptor: &CommandDescriptor) -> String {
    let mut parts = vec![descriptor.qualified_name()];
    for param in descriptor.parameters() {
        let is_switch = match &param.default {
            Some(Value::Bool(false)) => true,
            None => param.type_tag.is_boolean() && param.type_tag.is_optional(),
            Some(_) => false,
        };
        if param.is_required() {
            parts.push(param.name.clone());
        } else if is_switch {
            parts.push(format!("[--{}]", param.name));
        } else {
            parts.push(format!("[--{}=X]", param.name));
        }
    }
    parts.join(" ")
}

/// One line per parameter: padded name, description, and the default as JSON.
pub fn arguments_description(descriptor: &CommandDescriptor) -> String {
    descriptor
        .parameters()
        .iter()
        .map(|param| {
            let default = match &param.default {
                Some(value) if !value.is_none() => format!("(default={})", value.to_json()),
                _ => String::new(),
            };
            let line = format!(
                "{:<width$} {} {}",
                param.name,
                descriptor.parameter_description(&param.name),
                default,
                width = ARG_NAME_WIDTH
            );
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full help page for one command.
pub fn command_help(descriptor: &CommandDescriptor, styler: &Styler) -> String {
    let mut lines = vec![
        String::new(),
        styler.bold(&descriptor.qualified_name()),
        descriptor.short_description().to_string(),
    ];
    if !descriptor.aliases().is_empty() {
        lines.push(format!("Aliases: {}", descriptor.aliases().join(", ")));
    }
    if !descriptor.long_description().is_empty() {
        lines.push(String::new());
        lines.push(descriptor.long_description().to_string());
    }
    lines.push(String::new());
    lines.push(styler.bold("Usage:"));
    lines.push(usage_line(descriptor));
    lines.push(String::new());
    if !descriptor.parameters().is_empty() {
        lines.push(styler.bold("Args:"));
        lines.push(arguments_description(descriptor));
        lines.push(String::new());
    }
    lines.join("\n")
}
