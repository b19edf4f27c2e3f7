mod completer;
pub mod expand;

pub use completer::ShellCompleter;
pub use expand::expand_input;
