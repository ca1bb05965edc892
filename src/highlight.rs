use inksac::prelude::*;

use crate::core::commands::{OsQuery, Verb};

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    pub fn highlight_command(&self, input: &str) -> String {
        if !self.is_enabled() {
            return input.to_string();
        }

        let mut seen_verb = false;
        let parts: Vec<String> = input
            .split(' ')
            .map(|part| {
                if part.is_empty() {
                    return String::new();
                }
                if !seen_verb {
                    seen_verb = true;
                    return self.highlight_verb(part);
                }
                if part.starts_with("--") {
                    let style = if OsQuery::from_flag(part).is_some() {
                        Style::builder().foreground(Color::Yellow).build()
                    } else {
                        Style::builder().foreground(Color::Red).build()
                    };
                    return part.to_string().style(style).to_string();
                }
                part.to_string()
            })
            .collect();

        parts.join(" ")
    }

    fn highlight_verb(&self, verb: &str) -> String {
        let style = if Verb::from_name(verb).is_some() {
            Style::builder().foreground(Color::Cyan).bold().build()
        } else {
            Style::builder().foreground(Color::Red).build()
        };
        verb.to_string().style(style).to_string()
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        if !self.is_enabled() {
            return hint.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();

        hint.style(hint_style).to_string()
    }
}
