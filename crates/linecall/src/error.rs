//! Error types for registration and dispatch.
//!
//! Every error carries both a descriptive message (its `Display`) and a terse
//! fixed code (see [`DispatchError::code`]). Which one reaches the output
//! channel is decided by [`ErrorStyle`](crate::ErrorStyle).

use crate::value::ArgKind;
use thiserror::Error;

/// Errors raised while dispatching one command segment.
///
/// Each of these aborts only the segment that produced it.
/// [`NotReplayable`](DispatchError::NotReplayable) is the exception: it comes
/// from rendering a bound command, before anything is dispatched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// The first token names no registered top-level command.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// A token appeared where a flag (`-name`) was expected.
    #[error("Unexpected token: {0}")]
    UnexpectedToken(String),

    /// Both `-h` and `-help` were supplied.
    #[error("Duplicate help flag: both -h and -help provided.")]
    DuplicateHelpFlag,

    /// A required argument without a default was omitted.
    #[error("Required argument missing: {0}")]
    MissingRequiredArgument(String),

    /// A declared argument was supplied as a bare flag with no value.
    #[error("Argument {0} has no value.")]
    MissingValue(String),

    /// The supplied value's kind does not match the declared kind.
    #[error("Type mismatch for argument: {name} (expected {expected}, got {actual})")]
    TypeMismatch {
        name: String,
        expected: ArgKind,
        actual: &'static str,
    },

    /// The same flag was given twice in one invocation.
    #[error("Duplicate argument: {0}")]
    DuplicateArgument(String),

    /// A flag names no declared argument of the resolved command.
    #[error("Unknown argument: {0}")]
    UnknownArgument(String),

    /// The resolved command has no handler attached.
    #[error("No handler defined for command: {0}")]
    NoHandler(String),

    /// A quoted segment or list literal is not well formed.
    #[error("Malformed literal: {0}")]
    MalformedLiteral(String),

    /// A handler dispatched its own command while still running.
    #[error("Command is already running: {0}")]
    HandlerBusy(String),

    /// A bound command has a path element, argument name or value that would
    /// not read back the same from an input line.
    #[error("Cannot render as a command line: {0}")]
    NotReplayable(String),
}

impl DispatchError {
    /// Returns the terse fixed code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            DispatchError::UnknownCommand(_) => "error.cmd.unknown",
            DispatchError::UnexpectedToken(_) => "error.cmd.unexpected_token",
            DispatchError::DuplicateHelpFlag => "error.cmd.duplicate_help_flag",
            DispatchError::MissingRequiredArgument(_) | DispatchError::MissingValue(_) => {
                "error.cmd.missing_required_arg"
            }
            DispatchError::TypeMismatch { .. } => "error.cmd.type_mismatch",
            DispatchError::DuplicateArgument(_) => "error.cmd.duplicate_name",
            DispatchError::UnknownArgument(_) => "error.cmd.unknown_argument",
            DispatchError::NoHandler(_) => "error.cmd.no_callback",
            DispatchError::MalformedLiteral(_) => "error.cmd.malformed_literal",
            DispatchError::HandlerBusy(_) => "error.cmd.handler_busy",
            DispatchError::NotReplayable(_) => "error.cmd.not_replayable",
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        DispatchError::MalformedLiteral(message.into())
    }
}

/// Errors raised while building the command tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    /// A sibling already uses this name (as its name or one of its aliases).
    #[error("Duplicate command name: {0}")]
    DuplicateName(String),

    /// A sibling, or the command itself, already uses this alias.
    #[error("Duplicate command alias: {0}")]
    DuplicateAlias(String),

    /// An alias equal to the command's own name.
    #[error("Alias cannot be the same as the command name: {0}")]
    AliasIsName(String),

    /// Two argument specs with the same name on one command.
    #[error("Duplicate argument specification: {0}")]
    DuplicateArgSpec(String),

    /// A default value whose kind does not fit the declared kind.
    #[error("Default for argument {name} must be {expected}, got {actual}")]
    DefaultKindMismatch {
        name: String,
        expected: ArgKind,
        actual: &'static str,
    },
}

impl RegistrationError {
    /// Returns the terse fixed code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            RegistrationError::DuplicateName(_) | RegistrationError::DuplicateArgSpec(_) => {
                "error.cmd.duplicate_name"
            }
            RegistrationError::DuplicateAlias(_) | RegistrationError::AliasIsName(_) => {
                "error.cmd.duplicate_alias"
            }
            RegistrationError::DefaultKindMismatch { .. } => "error.cmd.invalid_default",
        }
    }
}
