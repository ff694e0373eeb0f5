//! Argument parsing and reconciliation against declared specs.
//!
//! Parsing turns the tokens left over after resolution into raw
//! [`Argument`]s. Merging then checks them against the command's
//! [`ArgSpec`]s and produces the final list a handler sees.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. every argument starts with a flag token
//! 2. no flag is repeated
//! 3. `-h` together with `-help` is rejected; either alone requests usage
//! 4. each declared spec is satisfied (value present, kind fits, required
//!    present or defaulted)
//! 5. no supplied flag is undeclared

use crate::argument::{ArgSpec, Argument};
use crate::command::Command;
use crate::error::DispatchError;
use crate::literal::parse_token;
use crate::tokenize::is_flag_token;
use tracing::trace;

const SHORT_HELP: &str = "h";
const LONG_HELP: &str = "help";

/// Groups tokens into raw arguments.
///
/// Values accumulate under the most recent flag; an argument may end up
/// with no values at all.
pub fn parse_arguments(tokens: &[String]) -> Result<Vec<Argument>, DispatchError> {
    let mut arguments: Vec<Argument> = Vec::new();

    for token in tokens {
        if is_flag_token(token) {
            let name = &token[1..];
            if arguments.iter().any(|a| a.name == name) {
                return Err(DispatchError::DuplicateArgument(name.to_string()));
            }
            arguments.push(Argument::new(name));
            continue;
        }

        match arguments.last_mut() {
            Some(current) => current.values.push(parse_token(token)?),
            None => return Err(DispatchError::UnexpectedToken(token.clone())),
        }
    }

    trace!(count = arguments.len(), "parsed raw arguments");
    Ok(arguments)
}

/// Returns `true` if exactly one of `-h` and `-help` is present.
pub fn help_requested(arguments: &[Argument]) -> Result<bool, DispatchError> {
    let short = arguments.iter().any(|a| a.name == SHORT_HELP);
    let long = arguments.iter().any(|a| a.name == LONG_HELP);
    if short && long {
        return Err(DispatchError::DuplicateHelpFlag);
    }
    Ok(short || long)
}

/// Reconciles raw arguments with the command's specs.
///
/// The result follows spec declaration order. Only the first value of each
/// argument is checked against the declared kind; trailing values are kept
/// as parsed.
pub fn merge(command: &Command, raw: Vec<Argument>) -> Result<Vec<Argument>, DispatchError> {
    let mut merged = Vec::with_capacity(command.specs().len());

    for spec in command.specs() {
        match raw.iter().find(|a| a.name == spec.name) {
            Some(provided) => merged.push(checked(spec, provided)?),
            None => {
                if let Some(default) = &spec.default {
                    merged.push(Argument::with_value(spec.name.clone(), default.clone()));
                } else if spec.required {
                    return Err(DispatchError::MissingRequiredArgument(spec.name.clone()));
                }
            }
        }
    }

    if let Some(unknown) = raw.iter().find(|a| command.spec(&a.name).is_none()) {
        return Err(DispatchError::UnknownArgument(unknown.name.clone()));
    }

    Ok(merged)
}

fn checked(spec: &ArgSpec, provided: &Argument) -> Result<Argument, DispatchError> {
    let (first, rest) = provided
        .values
        .split_first()
        .ok_or_else(|| DispatchError::MissingValue(spec.name.clone()))?;

    let coerced = first
        .coerce_to(spec.kind)
        .ok_or_else(|| DispatchError::TypeMismatch {
            name: spec.name.clone(),
            expected: spec.kind,
            actual: first.kind_name(),
        })?;

    let mut values = Vec::with_capacity(provided.values.len());
    values.push(coerced);
    values.extend(rest.iter().cloned());
    Ok(Argument {
        name: spec.name.clone(),
        values,
    })
}
