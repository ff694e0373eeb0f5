//! Commands bound to a fixed argument set, and sequences of them.
//!
//! A [`BoundCommand`] skips tokenizing, resolution and validation: its
//! arguments are already in their final form and are handed to the handler
//! as they are. Use it to replay a known call or to script a series of calls.
//!
//! ```
//! use linecall::{BoundCommand, BufferOutput, Command, Dispatcher};
//!
//! let out = BufferOutput::new();
//! let mut dispatcher = Dispatcher::builder().output(out.clone()).build();
//! dispatcher.register(Command::new("say", "").handler(|inv| {
//!     inv.output().println(inv.text("what").unwrap_or_default());
//! }))?;
//!
//! let bound = BoundCommand::new(["say"]).arg("what", "hi there");
//! assert_eq!(bound.to_command_line()?, r#"say -what "hi there""#);
//! assert!(dispatcher.execute(&bound).is_ok());
//! assert_eq!(out.lines(), vec!["hi there"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::argument::Argument;
use crate::dispatch::{path_to_string, string_to_path, Dispatcher};
use crate::error::DispatchError;
use crate::literal::parse_token;
use crate::tokenize::{is_flag_token, split_segments, tokenize};
use crate::value::Value;
use serde::Serialize;
use tracing::{debug, warn};

/// A command path plus preset arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundCommand {
    path: Vec<String>,
    arguments: Vec<Argument>,
}

impl BoundCommand {
    /// Binds the command at `path` (names or aliases) with no arguments.
    pub fn new<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            arguments: Vec::new(),
        }
    }

    /// Binds the command at a dot-separated path such as `"do.action"`.
    pub fn from_dotted(path: &str) -> Self {
        Self::new(string_to_path(path))
    }

    /// Adds a single-valued argument.
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.push(Argument::with_value(name, value));
        self
    }

    /// Adds an argument with several values.
    pub fn arg_values<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.arguments.push(Argument {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Renders the equivalent input line, e.g. `calc -a 3.0 -op "+"`.
    ///
    /// The line tokenizes back to the same path and arguments. Quoting is not
    /// remembered by the tokenizer, so text that reads as something else
    /// (`"3"`, `"true"`, `"-x"`, `"[x"`), empty text and non-finite reals
    /// cannot be written this way and fail with
    /// [`DispatchError::NotReplayable`]. So do path elements and argument
    /// names that would not survive as a single bare token.
    pub fn to_command_line(&self) -> Result<String, DispatchError> {
        if self.path.is_empty() {
            return Err(DispatchError::NotReplayable("empty command path".into()));
        }
        let mut parts = Vec::with_capacity(self.path.len() + 2 * self.arguments.len());
        for element in &self.path {
            let part = reads_back(element.clone(), |t| t == element && !is_flag_token(t))
                .ok_or_else(|| DispatchError::NotReplayable(format!("command {}", element)))?;
            parts.push(part);
        }
        for argument in &self.arguments {
            let name = argument.name.as_str();
            let flag = reads_back(format!("-{}", name), |t| {
                is_flag_token(t) && t.strip_prefix('-') == Some(name)
            })
            .ok_or_else(|| DispatchError::NotReplayable(format!("argument name {:?}", name)))?;
            parts.push(flag);
            for value in &argument.values {
                let literal = reads_back(value.to_literal(), |t| {
                    !is_flag_token(t) && parse_token(t).ok().as_ref() == Some(value)
                })
                .ok_or_else(|| {
                    DispatchError::NotReplayable(format!("-{} {}", name, value.to_literal()))
                })?;
                parts.push(literal);
            }
        }
        Ok(parts.join(" "))
    }
}

/// An ordered series of bound commands.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommandSequence {
    commands: Vec<BoundCommand>,
}

impl CommandSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command.
    pub fn then(mut self, command: BoundCommand) -> Self {
        self.commands.push(command);
        self
    }

    pub fn push(&mut self, command: BoundCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[BoundCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Renders every command, joined by `; `.
    ///
    /// Fails on the first command that [`BoundCommand::to_command_line`]
    /// refuses.
    pub fn to_command_line(&self) -> Result<String, DispatchError> {
        let lines = self
            .commands
            .iter()
            .map(BoundCommand::to_command_line)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lines.join("; "))
    }
}

/// Returns `literal` if it is one segment of exactly one token that `check`
/// accepts.
fn reads_back(literal: String, check: impl Fn(&str) -> bool) -> Option<String> {
    if split_segments(&literal).len() != 1 {
        return None;
    }
    match tokenize(&literal) {
        Ok(tokens) if tokens.len() == 1 && check(&tokens[0]) => Some(literal),
        _ => None,
    }
}

impl FromIterator<BoundCommand> for CommandSequence {
    fn from_iter<T: IntoIterator<Item = BoundCommand>>(iter: T) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

impl Dispatcher {
    /// Runs a bound command with its preset arguments.
    pub fn execute(&self, bound: &BoundCommand) -> Result<(), DispatchError> {
        self.execute_with(bound, bound.arguments.clone())
    }

    /// Runs a bound command with `arguments` in place of its presets.
    pub fn execute_with(
        &self,
        bound: &BoundCommand,
        arguments: Vec<Argument>,
    ) -> Result<(), DispatchError> {
        let result = match self.walk(&bound.path) {
            Some((command, path)) => {
                debug!(path = %path_to_string(&path), "executing bound command");
                self.invoke(command, path, arguments)
            }
            None => Err(DispatchError::UnknownCommand(path_to_string(&bound.path))),
        };
        if let Err(e) = &result {
            warn!(path = %path_to_string(&bound.path), error = %e, "bound command failed");
            self.report(e, e.code());
        }
        result
    }

    /// Runs every command of the sequence, in order.
    ///
    /// A failure does not stop later commands. Returns `true` only if all
    /// succeeded.
    pub fn execute_sequence(&self, sequence: &CommandSequence) -> bool {
        sequence
            .commands
            .iter()
            .map(|bound| self.execute(bound))
            .fold(true, |ok, result| ok & result.is_ok())
    }
}
