use std::path::PathBuf;

use rustyline::{config::Configurer, error::ReadlineError, history::FileHistory, Editor};

use crate::{
    core::{commands::BuiltinRegistry, state::ShellState},
    error::ShellError,
    flags::Flags,
    highlight::SyntaxHighlighter,
    input::{expand_input, ShellCompleter},
    parser,
    process::{signal, BackgroundRegistry, ProcessError, ProcessExecutor},
};

const PROMPT: &str = ": ";
const COMMENT_TOKEN: char = '#';
const HISTORY_FILE_NAME: &str = ".venule_history";

/// The interactive session: owns the line editor, the built-in registry,
/// the process executor and every piece of per-session state. One line is
/// read, expanded, parsed and dispatched per loop iteration, followed by a
/// single background reap.
pub struct Shell {
    editor: Editor<ShellCompleter, FileHistory>,
    builtins: BuiltinRegistry,
    executor: ProcessExecutor,
    registry: BackgroundRegistry,
    state: ShellState,
    flags: Flags,
    highlighter: SyntaxHighlighter,
    history_file: Option<PathBuf>,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        signal::install_shell_handlers()?;

        let mut editor = Editor::<ShellCompleter, FileHistory>::new()?;
        editor.set_helper(Some(ShellCompleter::new()));
        editor.set_auto_add_history(true);

        // Without a home directory the session still runs, only without
        // persistent history.
        let history_file = dirs::home_dir().map(|home| home.join(HISTORY_FILE_NAME));
        if let Some(path) = &history_file {
            // Missing on first run.
            let _ = editor.load_history(path);
        }

        Ok(Shell {
            editor,
            builtins: BuiltinRegistry::new(),
            executor: ProcessExecutor::new(),
            registry: BackgroundRegistry::new(),
            state: ShellState::new(),
            flags,
            highlighter: SyntaxHighlighter::new(),
            history_file,
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        let result = self.run_loop();
        self.save_history();
        result
    }

    fn run_loop(&mut self) -> Result<(), ShellError> {
        while self.state.is_running() {
            match self.editor.readline(PROMPT) {
                Ok(line) => self.dispatch(&line)?,
                // The shell itself shrugs off Ctrl-C; only children take it.
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }

    /// One full iteration for one input line: expand, screen, parse, run,
    /// then poll the background registry once. `exit` skips the poll, and
    /// only a failed fork propagates an error.
    fn dispatch(&mut self, line: &str) -> Result<(), ShellError> {
        self.handle_line(line)?;
        if self.state.is_running() {
            self.reap_finished();
        }
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Result<(), ShellError> {
        if line.len() > parser::MAX_LINE {
            self.report(&format!("input line longer than {} bytes", parser::MAX_LINE));
            return Ok(());
        }

        let expanded = expand_input(line);
        let trimmed = expanded.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_TOKEN) {
            return Ok(());
        }

        let command = match parser::parse(trimmed) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(()),
            Err(err) => {
                self.report(&err.to_string());
                return Ok(());
            }
        };

        for warning in &command.warnings {
            self.report(&warning.to_string());
        }
        if self.flags.is_set("debug") {
            eprintln!("{:?}", command);
        }

        if let Some(result) =
            self.builtins
                .execute(&command.name, &command.args[1..], &mut self.state)
        {
            if let Err(err) = result {
                self.report(&err.to_string());
            }
        } else if let Err(err) = self.executor.execute(&command, &mut self.state, &mut self.registry)
        {
            match err {
                // Losing fork means losing the ability to run anything.
                ProcessError::Fork(_) => return Err(err.into()),
                other => self.report(&other.to_string()),
            }
        }

        Ok(())
    }

    fn reap_finished(&mut self) {
        if let Some((pid, status)) = self.registry.try_reap_one() {
            println!("background pid {} is done: {}", pid, status);
        }
    }

    fn save_history(&mut self) {
        if let Some(path) = &self.history_file {
            if let Err(err) = self.editor.save_history(path) {
                let message = format!("could not save history: {}", err);
                self.report(&message);
            }
        }
    }

    fn report(&self, message: &str) {
        if self.flags.is_set("quiet") {
            return;
        }
        let line = format!("venule: {}", message);
        eprintln!("{}", self.highlighter.highlight_error(&line));
    }
}
