use std::collections::BTreeSet;
use std::os::unix::fs::PermissionsExt;
use std::{env, fs};

use rustyline::completion::Pair;

use crate::core::commands::BuiltinRegistry;

/// Completion source for the first word of a line: every name the built-in
/// registry knows plus every executable found on `$PATH` at construction
/// time.
#[derive(Debug, Clone)]
pub struct CommandCompleter {
    commands: BTreeSet<String>,
}

impl CommandCompleter {
    pub fn new() -> Self {
        let mut completer = Self {
            commands: BTreeSet::new(),
        };
        completer.refresh();
        completer
    }

    /// Rescans the built-in registry and `$PATH`. Duplicate names across
    /// directories collapse to one.
    pub fn refresh(&mut self) {
        self.commands.clear();
        let builtins = BuiltinRegistry::new();
        for name in builtins.names() {
            self.commands.insert(name.to_string());
        }
        if let Some(path_var) = env::var_os("PATH") {
            for dir in env::split_paths(&path_var) {
                self.scan_dir(&dir);
            }
        }
    }

    fn scan_dir(&mut self, dir: &std::path::Path) {
        if let Ok(entries) = fs::read_dir(dir) {
            for entry in entries.filter_map(Result::ok) {
                if !is_executable(&entry) {
                    continue;
                }
                if let Some(name) = entry.file_name().to_str() {
                    self.commands.insert(name.to_string());
                }
            }
        }
    }

    pub fn complete(&self, prefix: &str) -> Vec<Pair> {
        let prefix = prefix.trim();
        self.commands
            .iter()
            .filter(|name| name.starts_with(prefix))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect()
    }
}

impl Default for CommandCompleter {
    fn default() -> Self {
        Self::new()
    }
}

fn is_executable(entry: &fs::DirEntry) -> bool {
    entry
        .metadata()
        .map(|meta| !meta.is_dir() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
