mod command;
mod path;

use std::borrow::Cow;

pub use command::CommandCompleter;
pub use path::PathCompleter;

use crate::highlight::SyntaxHighlighter;

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

/// rustyline helper wiring the completion sources and the highlighter into
/// the editor: the first word completes command names, every later word
/// completes filesystem paths, which covers redirect targets after `<` and
/// `>` as well.
#[derive(Clone)]
pub struct ShellCompleter {
    command_completer: CommandCompleter,
    path_completer: PathCompleter,
    highlighter: SyntaxHighlighter,
}

impl ShellCompleter {
    pub fn new() -> Self {
        ShellCompleter {
            command_completer: CommandCompleter::new(),
            path_completer: PathCompleter::new(),
            highlighter: SyntaxHighlighter::new(),
        }
    }
}

impl Default for ShellCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl Helper for ShellCompleter {}

impl Highlighter for ShellCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(self.highlighter.highlight_command(line))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(self.highlighter.highlight_hint(hint))
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;
}

impl Validator for ShellCompleter {}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_up_to_cursor = &line[..pos];
        let mut words: Vec<&str> = line_up_to_cursor.split_whitespace().collect();
        if line_up_to_cursor.ends_with(' ') {
            words.push("");
        }

        let (start, matches) = match words.len() {
            0 => (0, self.command_completer.complete("")),
            1 => {
                let word = words[0];
                let start = line_up_to_cursor.rfind(word).unwrap_or(0);
                (start, self.command_completer.complete(word))
            }
            _ => {
                let last_word = words.last().copied().unwrap_or("");
                if last_word.is_empty() {
                    (pos, self.path_completer.complete(""))
                } else {
                    let start = line_up_to_cursor.rfind(last_word).unwrap_or(pos);
                    (start, self.path_completer.complete(last_word))
                }
            }
        };

        Ok((start, matches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustyline::history::DefaultHistory;

    fn complete_at(line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let completer = ShellCompleter::new();
        let history = DefaultHistory::new();
        let ctx = Context::new(&history);
        completer.complete(line, pos, &ctx).expect("complete")
    }

    #[test]
    fn test_first_word_completes_builtins() {
        let (start, pairs) = complete_at("stat", 4);
        assert_eq!(start, 0);
        assert!(pairs.iter().any(|pair| pair.replacement == "status"));
    }

    #[test]
    fn test_later_words_complete_paths_not_commands() {
        let (_, pairs) = complete_at("cd statu", 8);
        // "statu" names no file in the working directory, and command
        // completion must not kick in past the first word.
        assert!(pairs.iter().all(|pair| pair.replacement != "status"));
    }

    #[test]
    fn test_completion_uses_text_left_of_cursor() {
        let (start, pairs) = complete_at("exi something", 3);
        assert_eq!(start, 0);
        assert!(pairs.iter().any(|pair| pair.replacement == "exit"));
    }
}
