use std::process;

/// Two-character token substituted with the shell's process id before
/// parsing. Matched as a literal, left to right, each match consuming both
/// characters; a lone `$` is never touched.
pub const EXPANSION_TOKEN: &str = "$$";

pub fn expand_input(line: &str) -> String {
    expand_with_pid(line, process::id())
}

fn expand_with_pid(line: &str, pid: u32) -> String {
    if !line.contains(EXPANSION_TOKEN) {
        return line.to_string();
    }
    line.replace(EXPANSION_TOKEN, &pid.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_token_unchanged() {
        assert_eq!(expand_with_pid("ls -la", 1234), "ls -la");
        assert_eq!(expand_with_pid("", 1234), "");
    }

    #[test]
    fn test_single_dollar_untouched() {
        assert_eq!(expand_with_pid("echo $HOME", 1234), "echo $HOME");
        assert_eq!(expand_with_pid("$", 1234), "$");
    }

    #[test]
    fn test_single_occurrence() {
        assert_eq!(expand_with_pid("echo $$", 1234), "echo 1234");
    }

    #[test]
    fn test_multiple_occurrences() {
        assert_eq!(expand_with_pid("echo $$ $$", 1234), "echo 1234 1234");
    }

    #[test]
    fn test_adjacent_occurrences() {
        assert_eq!(expand_with_pid("$$$$", 77), "7777");
    }

    #[test]
    fn test_odd_dollar_run_leaves_remainder() {
        // "$$$" is one match plus a literal dollar
        assert_eq!(expand_with_pid("$$$", 42), "42$");
    }

    #[test]
    fn test_expanded_length() {
        let pid = 31998u32;
        let pid_len = pid.to_string().len();
        for (line, occurrences) in [
            ("no token here", 0usize),
            ("mkdir dir$$", 1),
            ("echo $$ $$ $$", 3),
            ("$$$$", 2),
        ] {
            let expanded = expand_with_pid(line, pid);
            assert_eq!(
                expanded.len(),
                line.len() + occurrences * (pid_len - EXPANSION_TOKEN.len())
            );
        }
    }
}
