//! Command handler types.
//!
//! A handler is the business logic bound to one command node. It runs only
//! after the whole argument set has been validated and merged, so it never
//! sees a partially valid invocation.
//!
//! # Pipeline Position
//!
//! ```text
//! raw line
//!   → split on ';'
//!   → tokenize
//!   → resolve command node
//!   → parse + validate + merge arguments
//!   → HANDLER ← receives &Invocation
//! ```
//!
//! # Core Types
//!
//! - [`Handler`]: the trait every handler implements (`&mut self`, so
//!   handlers may keep state)
//! - [`Invocation`]: what a handler receives: the resolved node, the path
//!   used to reach it, the merged arguments, and the output channel
//!
//! The invocation borrows the command tree instead of copying it; only the
//! merged argument list is owned and it is dropped when the handler returns.

use crate::argument::Argument;
use crate::command::Command;
use crate::dispatch::path_to_string;
use crate::help;
use crate::output::Output;
use crate::value::Value;
use std::fmt;

/// Trait for command handlers.
///
/// Implemented for every `FnMut(&Invocation)` closure. Implement it directly
/// for handlers that are easier to express as a struct.
///
/// A handler may dispatch other commands, but not its own: while it runs,
/// a nested call of the same command fails with
/// [`DispatchError::HandlerBusy`](crate::DispatchError::HandlerBusy).
///
/// # Example
///
/// ```rust
/// use linecall::{Command, Handler, Invocation};
///
/// struct Counter { count: u32 }
///
/// impl Handler for Counter {
///     fn handle(&mut self, inv: &Invocation<'_>) {
///         self.count += 1;
///         inv.output().println(&format!("called {} times", self.count));
///     }
/// }
///
/// let cmd = Command::new("tick", "Counts calls").with_handler(Counter { count: 0 });
/// assert!(cmd.has_handler());
/// ```
pub trait Handler {
    /// Runs the command. The dispatcher does not inspect the outcome.
    fn handle(&mut self, invocation: &Invocation<'_>);
}

impl<F> Handler for F
where
    F: FnMut(&Invocation<'_>),
{
    fn handle(&mut self, invocation: &Invocation<'_>) {
        self(invocation)
    }
}

/// One resolved, validated call of a command.
///
/// Holds a shared reference to the matched node plus the merged argument
/// list in spec declaration order.
pub struct Invocation<'a> {
    command: &'a Command,
    path: Vec<&'a str>,
    arguments: Vec<Argument>,
    commands: &'a [Command],
    output: &'a dyn Output,
}

impl<'a> Invocation<'a> {
    pub(crate) fn new(
        command: &'a Command,
        path: Vec<&'a str>,
        arguments: Vec<Argument>,
        commands: &'a [Command],
        output: &'a dyn Output,
    ) -> Self {
        Self {
            command,
            path,
            arguments,
            commands,
            output,
        }
    }

    /// The matched command node.
    pub fn command(&self) -> &'a Command {
        self.command
    }

    /// Shorthand for `command().name()`.
    pub fn name(&self) -> &'a str {
        self.command.name()
    }

    /// Canonical names from the top-level command down to this one.
    ///
    /// Aliases used in the input are replaced by the nodes' names.
    pub fn path(&self) -> &[&'a str] {
        &self.path
    }

    /// The path joined with `.`, e.g. `do.action`.
    pub fn path_string(&self) -> String {
        path_to_string(&self.path)
    }

    /// All merged arguments.
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Returns the argument with the given name.
    pub fn get(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|a| a.name == name)
    }

    /// Returns the first value of the named argument.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).and_then(Argument::first)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.value(name).and_then(Value::as_int)
    }

    pub fn real(&self, name: &str) -> Option<f64> {
        self.value(name).and_then(Value::as_real)
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.value(name).and_then(Value::as_bool)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.value(name).and_then(Value::as_text)
    }

    pub fn list(&self, name: &str) -> Option<&[Value]> {
        self.value(name).and_then(Value::as_list)
    }

    /// The dispatcher's output channel.
    pub fn output(&self) -> &'a dyn Output {
        self.output
    }

    /// Prints this command's usage, sub-commands included.
    pub fn print_usage(&self) {
        help::print_usage(self.command, "", self.output);
    }

    /// Prints usage for every registered top-level command.
    pub fn print_global_help(&self) {
        help::print_global_help(self.commands, self.output);
    }

    /// Renders the path and arguments as JSON.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "path": self.path,
            "arguments": self.arguments,
        })
    }
}

impl fmt::Debug for Invocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("path", &self.path)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{BufferOutput, NullOutput};
    use crate::value::ArgKind;
    use crate::ArgSpec;
    use serde_json::json;

    fn calc() -> Command {
        Command::new("calc", "Performs arithmetic")
            .arg(ArgSpec::required("a", ArgKind::Real))
            .unwrap()
            .arg(ArgSpec::optional("op", ArgKind::Text))
            .unwrap()
    }

    #[test]
    fn test_typed_accessors() {
        let cmd = calc();
        let forest: Vec<Command> = Vec::new();
        let args = vec![
            Argument::with_value("a", 3.0),
            Argument::with_value("op", "+"),
            Argument::with_value("items", Value::List(vec![Value::Int(1)])),
            Argument::with_value("flag", true),
            Argument::with_value("n", 4),
        ];
        let inv = Invocation::new(&cmd, vec!["calc"], args, &forest, &NullOutput);

        assert_eq!(inv.name(), "calc");
        assert_eq!(inv.real("a"), Some(3.0));
        assert_eq!(inv.text("op"), Some("+"));
        assert_eq!(inv.list("items"), Some(&[Value::Int(1)][..]));
        assert_eq!(inv.bool("flag"), Some(true));
        assert_eq!(inv.int("n"), Some(4));
        assert_eq!(inv.int("a"), None);
        assert!(inv.get("missing").is_none());
    }

    #[test]
    fn test_path_string() {
        let cmd = calc();
        let forest: Vec<Command> = Vec::new();
        let inv = Invocation::new(&cmd, vec!["do", "action"], vec![], &forest, &NullOutput);
        assert_eq!(inv.path_string(), "do.action");
    }

    #[test]
    fn test_to_json() {
        let cmd = calc();
        let forest: Vec<Command> = Vec::new();
        let args = vec![Argument::with_value("a", 3.0)];
        let inv = Invocation::new(&cmd, vec!["calc"], args, &forest, &NullOutput);
        assert_eq!(
            inv.to_json(),
            json!({
                "path": ["calc"],
                "arguments": [{"name": "a", "values": [3.0]}],
            })
        );
    }

    #[test]
    fn test_closure_handler_keeps_state() {
        let cmd = calc();
        let forest: Vec<Command> = Vec::new();
        let buffer = BufferOutput::new();
        let inv = Invocation::new(&cmd, vec!["calc"], vec![], &forest, &buffer);

        let mut calls = 0;
        let mut handler = |inv: &Invocation<'_>| {
            calls += 1;
            inv.output().println(inv.name());
        };
        handler.handle(&inv);
        handler.handle(&inv);

        assert_eq!(calls, 2);
        assert_eq!(buffer.lines(), vec!["calc", "calc"]);
    }
}
