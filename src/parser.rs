use std::fmt;

/// Longest input line accepted by the dispatch loop, in bytes, checked
/// before expansion. The historical limit for this grammar was about 2048
/// characters; this rounds up to a comfortable power of two.
pub const MAX_LINE: usize = 4096;

/// Upper bound on `args` entries per command, command name included. The
/// historical limit was a fixed array of 512 slots; here it is a validation
/// limit only, arguments live in a `Vec`.
pub const MAX_ARGS: usize = 512;

const INPUT_OPERATOR: &str = "<";
const OUTPUT_OPERATOR: &str = ">";
const BACKGROUND_OPERATOR: &str = "&";

/// One parsed command line: `name [arg...] [< path] [> path] [&]`.
///
/// `args[0]` always equals `name`, mirroring the argv convention the
/// executor hands to `execvp`. Non-fatal syntax findings ride along in
/// `warnings` so the caller can report them and still run the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub name: String,
    pub args: Vec<String>,
    pub input_redirect: Option<String>,
    pub output_redirect: Option<String>,
    pub background: bool,
    pub warnings: Vec<ParseWarning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseWarning {
    MissingInputPath,
    MissingOutputPath,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::MissingInputPath => {
                write!(f, "syntax error: expected a path after '{}'", INPUT_OPERATOR)
            }
            ParseWarning::MissingOutputPath => {
                write!(f, "syntax error: expected a path after '{}'", OUTPUT_OPERATOR)
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    TooManyArguments(usize),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::TooManyArguments(max) => {
                write!(f, "too many arguments (limit is {})", max)
            }
        }
    }
}

impl std::error::Error for ParseError {}

pub(crate) fn is_operator(token: &str) -> bool {
    matches!(token, INPUT_OPERATOR | OUTPUT_OPERATOR | BACKGROUND_OPERATOR)
}

/// Splits a line into a [`CommandLine`], or `Ok(None)` when it holds no
/// tokens at all.
///
/// Tokens are appended verbatim to `args` until the first reserved operator
/// appears; from there on only operators are interpreted. `<` and `>` each
/// consume the following token as a path (a missing path is reported as a
/// warning and parsing stops), `&` flips the background flag, and any other
/// token in the operator region is dropped on the floor. That last rule is
/// deliberate compatibility with the grammar this shell descends from, not
/// an accident to fix.
pub fn parse(line: &str) -> Result<Option<CommandLine>, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&name, rest)) = tokens.split_first() else {
        return Ok(None);
    };

    let mut command = CommandLine {
        name: name.to_string(),
        args: vec![name.to_string()],
        input_redirect: None,
        output_redirect: None,
        background: false,
        warnings: Vec::new(),
    };

    // Argument phase: everything up to the first operator.
    let mut index = 0;
    while index < rest.len() && !is_operator(rest[index]) {
        if command.args.len() == MAX_ARGS {
            return Err(ParseError::TooManyArguments(MAX_ARGS));
        }
        command.args.push(rest[index].to_string());
        index += 1;
    }

    // Operator phase: runs until tokens are exhausted.
    while index < rest.len() {
        match rest[index] {
            INPUT_OPERATOR => {
                index += 1;
                match rest.get(index) {
                    Some(path) => command.input_redirect = Some((*path).to_string()),
                    None => command.warnings.push(ParseWarning::MissingInputPath),
                }
            }
            OUTPUT_OPERATOR => {
                index += 1;
                match rest.get(index) {
                    Some(path) => command.output_redirect = Some((*path).to_string()),
                    None => command.warnings.push(ParseWarning::MissingOutputPath),
                }
            }
            BACKGROUND_OPERATOR => command.background = true,
            _ => {}
        }
        index += 1;
    }

    Ok(Some(command))
}
