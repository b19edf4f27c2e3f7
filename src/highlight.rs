use inksac::prelude::*;

use crate::parser;

/// Colors for the live prompt line: command name, redirect and background
/// operators, flag words, comment lines. Falls back to plain text when the
/// terminal offers no color support.
#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    #[cfg(test)]
    fn with_support(color_support: ColorSupport) -> Self {
        Self { color_support }
    }

    pub fn highlight_command(&self, input: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return input.to_string();
        }

        // A comment line is dimmed whole, nothing in it will run.
        if input.trim_start().starts_with('#') {
            let comment_style = Style::builder()
                .foreground(Color::RGB(128, 128, 128))
                .build();
            return input.style(comment_style).to_string();
        }

        let mut parts: Vec<String> = input.split_whitespace().map(String::from).collect();
        if parts.is_empty() {
            return input.to_string();
        }

        let command_style = Style::builder().foreground(Color::Cyan).bold().build();
        parts[0] = parts[0].clone().style(command_style).to_string();

        for part in parts.iter_mut().skip(1) {
            if parser::is_operator(part) {
                let operator_style = Style::builder().foreground(Color::Magenta).bold().build();
                *part = part.clone().style(operator_style).to_string();
            } else if part.starts_with('-') {
                let flag_style = Style::builder().foreground(Color::Yellow).build();
                *part = part.clone().style(flag_style).to_string();
            }
        }

        parts.join(" ")
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return error.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();
        error.style(error_style).to_string()
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return hint.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();
        hint.style(hint_style).to_string()
    }
}
