//! Documentation extraction
//!
//! Commands carry a free-form documentation block. The registry hands that block to a
//! [`DocExtractor`] once, at registration time, and stores the resulting strings on the
//! command descriptor. Nothing downstream looks at the raw block again.
//!
//! The default extractor understands reStructuredText field lists:
//!
//! ```text
//! Add the two numbers.
//!
//! Longer explanation, possibly spanning
//! several paragraphs.
//!
//! :param a:
//!     The first number.
//! :param b: The second number.
//! ```

use std::collections::HashMap;

/// Descriptions extracted from a documentation block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Docs {
    /// First paragraph, collapsed to one line.
    pub short: String,
    /// Remaining paragraphs before the first field.
    pub long: String,
    /// `:param name:` descriptions, keyed by parameter name.
    pub params: HashMap<String, String>,
}

/// Turns a raw documentation block into [`Docs`].
pub trait DocExtractor: Send + Sync {
    fn extract(&self, raw: &str) -> Docs;
}

/// reStructuredText-style extractor (`:param name: description`).
#[derive(Debug, Default, Clone, Copy)]
pub struct RestDocExtractor;

const PARAM_KEYWORDS: &[&str] = &["param", "parameter", "arg", "argument", "key", "keyword"];

impl DocExtractor for RestDocExtractor {
    fn extract(&self, raw: &str) -> Docs {
        let lines: Vec<&str> = raw.lines().collect();
        let field_start = lines
            .iter()
            .position(|line| line.trim_start().starts_with(':'))
            .unwrap_or(lines.len());

        let paragraphs = split_paragraphs(&lines[..field_start]);
        let mut docs = Docs::default();
        if let Some((first, rest)) = paragraphs.split_first() {
            docs.short = first.join(" ");
            docs.long = rest
                .iter()
                .map(|p| p.join("\n"))
                .collect::<Vec<_>>()
                .join("\n\n");
        }

        let mut current: Option<(Option<String>, Vec<String>)> = None;
        for line in &lines[field_start..] {
            let trimmed = line.trim();
            if trimmed.starts_with(':') {
                if let Some((Some(name), text)) = current.take() {
                    docs.params.insert(name, text.join(" "));
                }
                current = Some(parse_field(trimmed));
            } else if !trimmed.is_empty() {
                if let Some((_, text)) = current.as_mut() {
                    text.push(trimmed.to_string());
                }
            }
        }
        if let Some((Some(name), text)) = current {
            docs.params.insert(name, text.join(" "));
        }

        docs
    }
}

/// Parse `:param [type] name: text` into (name, [text]). Non-parameter fields
/// (`:returns:`, `:raises X:`) yield no name and are dropped by the caller.
fn parse_field(line: &str) -> (Option<String>, Vec<String>) {
    let body = &line[1..];
    let Some((header, rest)) = body.split_once(':') else {
        return (None, Vec::new());
    };
    let words: Vec<&str> = header.split_whitespace().collect();
    let name = match words.as_slice() {
        [kind, .., name] if PARAM_KEYWORDS.contains(kind) => Some(name.to_string()),
        _ => None,
    };
    let rest = rest.trim();
    let text = if rest.is_empty() {
        Vec::new()
    } else {
        vec![rest.to_string()]
    };
    (name, text)
}

fn split_paragraphs(lines: &[&str]) -> Vec<Vec<String>> {
    let mut paragraphs = Vec::new();
    let mut current = Vec::new();
    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(trimmed.to_string());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }
    paragraphs
}
