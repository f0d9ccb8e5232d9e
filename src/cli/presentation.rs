//! CLI presentation: terminal styling as a pure text-to-text function.

use owo_colors::OwoColorize;

/// Text attributes understood by [`Styler::style`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attr {
    Bold,
    Underline,
    Red,
    Yellow,
}

/// Applies ANSI attributes, or nothing when colour is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Styler {
    color: bool,
}

impl Styler {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn is_color(&self) -> bool {
        self.color
    }

    pub fn style(&self, text: &str, attrs: &[Attr]) -> String {
        if !self.color {
            return text.to_string();
        }
        attrs.iter().fold(text.to_string(), |acc, attr| match attr {
            Attr::Bold => acc.bold().to_string(),
            Attr::Underline => acc.underline().to_string(),
            Attr::Red => acc.red().to_string(),
            Attr::Yellow => acc.yellow().to_string(),
        })
    }

    pub fn bold(&self, text: &str) -> String {
        self.style(text, &[Attr::Bold])
    }
}

impl Default for Styler {
    fn default() -> Self {
        Self::new(true)
    }
}
