use std::fs;
use std::path::Path;

use rustyline::completion::Pair;

/// Filesystem completion for every word after the first, redirect targets
/// included. Directories complete with a trailing slash so completion can
/// keep descending; files complete with a trailing space.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathCompleter;

impl PathCompleter {
    pub fn new() -> Self {
        Self
    }

    pub fn complete(&self, incomplete: &str) -> Vec<Pair> {
        // Split at the last slash: the left side names the directory to
        // read, the right side is the name prefix to match.
        let prefix_start = incomplete.rfind('/').map(|i| i + 1).unwrap_or(0);
        let (dir_text, prefix) = incomplete.split_at(prefix_start);
        let search_in = if dir_text.is_empty() {
            Path::new(".")
        } else {
            Path::new(dir_text)
        };

        let mut matches = Vec::new();
        if let Ok(entries) = fs::read_dir(search_in) {
            for entry in entries.filter_map(Result::ok) {
                if let Some(name) = entry.file_name().to_str() {
                    if name.starts_with(prefix) {
                        matches.push(build_pair(dir_text, name, entry.path().is_dir()));
                    }
                }
            }
        }

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }
}

fn build_pair(dir_text: &str, name: &str, is_dir: bool) -> Pair {
    let full = format!("{}{}", dir_text, name);
    if is_dir {
        Pair {
            display: format!("{}/", full),
            replacement: format!("{}/", full),
        }
    } else {
        Pair {
            display: full.clone(),
            replacement: format!("{} ", full),
        }
    }
}
