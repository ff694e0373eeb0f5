//! The dispatcher: registration and the end-to-end `dispatch` entry point.
//!
//! ```text
//! line ─ split_segments ─┬─ segment ─ tokenize ─ resolve ─ parse ─ merge ─ handler
//!                        ├─ segment ─ ...
//!                        └─ segment ─ ...
//! ```
//!
//! Each segment succeeds or fails on its own; a failure is reported on the
//! output channel and the next segment still runs.

use crate::argument::Argument;
use crate::command::{check_siblings, Command};
use crate::config::{DispatcherConfig, ErrorStyle};
use crate::error::{DispatchError, RegistrationError};
use crate::handler::Invocation;
use crate::help;
use crate::output::{NullOutput, Output};
use crate::parse::{help_requested, merge, parse_arguments};
use crate::resolve::resolve;
use crate::tokenize::{split_segments, tokenize};
use std::fmt;
use tracing::{debug, warn};

const HELP_COMMAND: &str = "help";
const HELP_ALIAS: &str = "?";

/// The successful outcome of one dispatched segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// The handler at this path ran.
    Handled(Vec<String>),
    /// `-h` or `-help` printed usage for this path; no handler ran.
    HelpShown(Vec<String>),
}

impl Dispatched {
    /// Canonical path of the resolved command.
    pub fn path(&self) -> &[String] {
        match self {
            Dispatched::Handled(path) | Dispatched::HelpShown(path) => path,
        }
    }

    pub fn is_handled(&self) -> bool {
        matches!(self, Dispatched::Handled(_))
    }

    pub fn is_help_shown(&self) -> bool {
        matches!(self, Dispatched::HelpShown(_))
    }
}

/// Owns the registered command forest and routes input lines to handlers.
///
/// # Example
///
/// ```
/// use linecall::{ArgKind, ArgSpec, BufferOutput, Command, Dispatcher};
///
/// let out = BufferOutput::new();
/// let mut dispatcher = Dispatcher::builder().output(out.clone()).build();
///
/// dispatcher.register(
///     Command::new("greet", "Says hello")
///         .arg(ArgSpec::required("name", ArgKind::Text))?
///         .handler(|inv| {
///             let name = inv.text("name").unwrap_or_default();
///             inv.output().println(&format!("hello {}", name));
///         }),
/// )?;
///
/// assert!(dispatcher.dispatch(r#"greet -name "big world""#));
/// assert_eq!(out.lines(), vec!["hello big world"]);
/// # Ok::<(), linecall::RegistrationError>(())
/// ```
pub struct Dispatcher {
    commands: Vec<Command>,
    output: Box<dyn Output>,
    config: DispatcherConfig,
}

impl Dispatcher {
    /// A dispatcher with the default configuration and no output.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Registered top-level commands, in registration order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Registers a top-level command.
    ///
    /// Rejected if its name or an alias collides with a registered command.
    /// The rejection is also reported on the output channel.
    pub fn register(&mut self, command: Command) -> Result<(), RegistrationError> {
        if let Err(e) = check_siblings(&self.commands, &command) {
            warn!(command = command.name(), error = %e, "registration rejected");
            self.report(&e, e.code());
            return Err(e);
        }
        debug!(command = command.name(), "registered command");
        self.commands.push(command);
        Ok(())
    }

    /// Dispatches every `;`-separated segment of `line`.
    ///
    /// Returns `true` only if every segment succeeded. A blank line succeeds.
    pub fn dispatch(&self, line: &str) -> bool {
        self.dispatch_detailed(line).iter().all(Result::is_ok)
    }

    /// Like [`dispatch`](Self::dispatch), returning one result per segment.
    ///
    /// Segments that hold no tokens are skipped. Errors are reported on the
    /// output channel as well as returned.
    pub fn dispatch_detailed(&self, line: &str) -> Vec<Result<Dispatched, DispatchError>> {
        let segments = split_segments(line);
        debug!(count = segments.len(), "split input line");

        segments
            .into_iter()
            .filter_map(|segment| {
                let result = self.dispatch_segment(segment).transpose()?;
                if let Err(e) = &result {
                    warn!(segment, error = %e, "segment failed");
                    self.report(e, e.code());
                }
                Some(result)
            })
            .collect()
    }

    fn dispatch_segment(&self, segment: &str) -> Result<Option<Dispatched>, DispatchError> {
        let tokens = tokenize(segment)?;
        if tokens.is_empty() {
            return Ok(None);
        }

        let resolution = resolve(&self.commands, &tokens)?;
        let raw = parse_arguments(&tokens[resolution.next..])?;
        let path: Vec<String> = resolution.path.iter().map(|s| s.to_string()).collect();

        if help_requested(&raw)? {
            debug!(path = %path_to_string(&path), "printing usage");
            help::print_usage(resolution.command, "", self.output.as_ref());
            return Ok(Some(Dispatched::HelpShown(path)));
        }

        let arguments = merge(resolution.command, raw)?;
        debug!(path = %path_to_string(&path), count = arguments.len(), "merged arguments");
        self.invoke(resolution.command, resolution.path, arguments)?;
        Ok(Some(Dispatched::Handled(path)))
    }

    /// Runs the node's handler with an already final argument list.
    pub(crate) fn invoke<'a>(
        &'a self,
        command: &'a Command,
        path: Vec<&'a str>,
        arguments: Vec<Argument>,
    ) -> Result<(), DispatchError> {
        let invocation = Invocation::new(
            command,
            path,
            arguments,
            &self.commands,
            self.output.as_ref(),
        );
        command.run_handler(&invocation)
    }

    /// Prints usage for every registered top-level command.
    pub fn print_global_help(&self) {
        help::print_global_help(&self.commands, self.output.as_ref());
    }

    /// Finds the node at `path`. Each element may be a name or an alias.
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<&Command> {
        self.walk(path).map(|(command, _)| command)
    }

    /// Finds the node at `path` along with the canonical names leading to it.
    pub(crate) fn walk<S: AsRef<str>>(&self, path: &[S]) -> Option<(&Command, Vec<&str>)> {
        let (first, rest) = path.split_first()?;
        let mut current = self.commands.iter().find(|c| c.matches(first.as_ref()))?;
        let mut names = vec![current.name()];
        for segment in rest {
            current = current.find_subcommand(segment.as_ref())?;
            names.push(current.name());
        }
        Some((current, names))
    }

    /// Prints an error in the configured style.
    pub(crate) fn report(&self, error: &dyn fmt::Display, code: &'static str) {
        match self.config.error_style {
            ErrorStyle::Descriptive => self.output.println(&error.to_string()),
            ErrorStyle::Codes => self.output.println(code),
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("commands", &self.commands)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Dispatcher`].
#[derive(Default)]
pub struct DispatcherBuilder {
    output: Option<Box<dyn Output>>,
    config: DispatcherConfig,
}

impl DispatcherBuilder {
    /// Sets where usage and error reports are printed.
    ///
    /// Without this, nothing is printed.
    pub fn output(mut self, output: impl Output + 'static) -> Self {
        self.output = Some(Box::new(output));
        self
    }

    pub fn error_style(mut self, style: ErrorStyle) -> Self {
        self.config.error_style = style;
        self
    }

    /// Whether to register the built-in `help` / `?` command.
    pub fn help_command(mut self, enabled: bool) -> Self {
        self.config.help_command = enabled;
        self
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: DispatcherConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Dispatcher {
        let mut commands = Vec::new();
        if self.config.help_command {
            match builtin_help() {
                Ok(help) => commands.push(help),
                Err(e) => warn!(error = %e, "built-in help not registered"),
            }
        }
        Dispatcher {
            commands,
            output: self.output.unwrap_or_else(|| Box::new(NullOutput)),
            config: self.config,
        }
    }
}

fn builtin_help() -> Result<Command, RegistrationError> {
    Ok(Command::new(HELP_COMMAND, "Lists all commands")
        .alias(HELP_ALIAS)?
        .handler(|inv| inv.print_global_help()))
}

/// Converts a command path to a dot-separated string.
///
/// For example, `["db", "migrate"]` becomes `"db.migrate"`.
pub fn path_to_string<S: AsRef<str>>(path: &[S]) -> String {
    path.iter()
        .map(|s| s.as_ref())
        .collect::<Vec<&str>>()
        .join(".")
}

/// Parses a dot-separated command path string into a vector.
///
/// For example, `"db.migrate"` becomes `["db", "migrate"]`.
pub fn string_to_path(s: &str) -> Vec<String> {
    if s.is_empty() {
        Vec::new()
    } else {
        s.split('.').map(String::from).collect()
    }
}
