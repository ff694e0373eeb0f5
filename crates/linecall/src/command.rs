//! Command nodes and the builders that assemble them into a tree.
//!
//! A [`Command`] is built bottom-up and then handed to
//! [`Dispatcher::register`](crate::Dispatcher::register). Once attached to a
//! parent or registered, a node is only reachable through shared references,
//! so the sibling uniqueness checks below hold for the lifetime of the tree.
//!
//! ```
//! use linecall::{ArgKind, ArgSpec, Command};
//!
//! let action = Command::new("action", "Performs a detailed action")
//!     .alias("act")?
//!     .arg(ArgSpec::required("x", ArgKind::Text))?
//!     .handler(|inv| println!("x = {}", inv.text("x").unwrap_or_default()));
//!
//! let root = Command::new("do", "Performs a simple action")
//!     .arg(ArgSpec::required("v", ArgKind::Int))?
//!     .subcommand(action)?;
//!
//! assert_eq!(root.subcommands().len(), 1);
//! # Ok::<(), linecall::RegistrationError>(())
//! ```

use crate::argument::ArgSpec;
use crate::error::{DispatchError, RegistrationError};
use crate::handler::{Handler, Invocation};
use std::cell::RefCell;
use std::fmt;

/// One node of the command tree.
pub struct Command {
    name: String,
    description: String,
    aliases: Vec<String>,
    subcommands: Vec<Command>,
    specs: Vec<ArgSpec>,
    handler: Option<RefCell<Box<dyn Handler>>>,
}

impl Command {
    /// Creates a command with no aliases, arguments, children or handler.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            aliases: Vec::new(),
            subcommands: Vec::new(),
            specs: Vec::new(),
            handler: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn subcommands(&self) -> &[Command] {
        &self.subcommands
    }

    /// Declared argument specs, in declaration order.
    pub fn specs(&self) -> &[ArgSpec] {
        &self.specs
    }

    /// Looks up a declared spec by name.
    pub fn spec(&self, name: &str) -> Option<&ArgSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Returns `true` if `token` is this command's name or one of its aliases.
    pub fn matches(&self, token: &str) -> bool {
        self.name == token || self.aliases.iter().any(|a| a == token)
    }

    /// Finds the direct child matching `token` by name or alias.
    pub fn find_subcommand(&self, token: &str) -> Option<&Command> {
        self.subcommands.iter().find(|c| c.matches(token))
    }

    /// Adds an alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Result<Self, RegistrationError> {
        self.add_alias(alias)?;
        Ok(self)
    }

    /// Adds an alias in place.
    ///
    /// Fails if the alias equals the command's own name or one of its
    /// existing aliases.
    pub fn add_alias(&mut self, alias: impl Into<String>) -> Result<(), RegistrationError> {
        let alias = alias.into();
        if alias == self.name {
            return Err(RegistrationError::AliasIsName(alias));
        }
        if self.aliases.contains(&alias) {
            return Err(RegistrationError::DuplicateAlias(alias));
        }
        self.aliases.push(alias);
        Ok(())
    }

    /// Declares an argument.
    pub fn arg(mut self, spec: ArgSpec) -> Result<Self, RegistrationError> {
        self.add_arg(spec)?;
        Ok(self)
    }

    /// Declares an argument in place. Spec names are unique per command.
    pub fn add_arg(&mut self, spec: ArgSpec) -> Result<(), RegistrationError> {
        if self.spec(&spec.name).is_some() {
            return Err(RegistrationError::DuplicateArgSpec(spec.name));
        }
        self.specs.push(spec);
        Ok(())
    }

    /// Attaches a child command.
    pub fn subcommand(mut self, child: Command) -> Result<Self, RegistrationError> {
        self.add_subcommand(child)?;
        Ok(self)
    }

    /// Attaches a child command in place.
    ///
    /// Neither the child's name nor any of its aliases may collide with the
    /// name or an alias of an existing child.
    pub fn add_subcommand(&mut self, child: Command) -> Result<(), RegistrationError> {
        check_siblings(&self.subcommands, &child)?;
        self.subcommands.push(child);
        Ok(())
    }

    /// Sets the handler from a closure.
    pub fn handler<F>(self, f: F) -> Self
    where
        F: FnMut(&Invocation<'_>) + 'static,
    {
        self.with_handler(f)
    }

    /// Sets the handler from any [`Handler`] implementation.
    pub fn with_handler<H>(mut self, handler: H) -> Self
    where
        H: Handler + 'static,
    {
        self.handler = Some(RefCell::new(Box::new(handler)));
        self
    }

    /// Runs the handler, failing if there is none or it is already running.
    pub(crate) fn run_handler(&self, invocation: &Invocation<'_>) -> Result<(), DispatchError> {
        let handler = self
            .handler
            .as_ref()
            .ok_or_else(|| DispatchError::NoHandler(self.name.clone()))?;
        let mut handler = handler
            .try_borrow_mut()
            .map_err(|_| DispatchError::HandlerBusy(self.name.clone()))?;
        handler.handle(invocation);
        Ok(())
    }
}

/// Rejects `candidate` if its name or an alias is already used by a sibling.
pub(crate) fn check_siblings(
    siblings: &[Command],
    candidate: &Command,
) -> Result<(), RegistrationError> {
    for sibling in siblings {
        if sibling.matches(&candidate.name) {
            return Err(RegistrationError::DuplicateName(candidate.name.clone()));
        }
        if let Some(alias) = candidate.aliases.iter().find(|a| sibling.matches(a)) {
            return Err(RegistrationError::DuplicateAlias(alias.clone()));
        }
    }
    Ok(())
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("aliases", &self.aliases)
            .field("subcommands", &self.subcommands)
            .field("specs", &self.specs)
            .field("has_handler", &self.has_handler())
            .finish()
    }
}
