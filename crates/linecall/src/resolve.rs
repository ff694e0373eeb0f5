//! Resolution of tokens to a command node.
//!
//! ```text
//! tokens:  do   act   -x  hello
//!          │    │     └─ first argument token (next = 2)
//!          │    └─ child "action" matched by alias
//!          └─ top-level "do"
//! ```
//!
//! Descent is greedy and stops at the first flag token or the first token
//! that names no child. Whatever remains is the argument list of the deepest
//! node reached.

use crate::command::Command;
use crate::error::DispatchError;
use crate::tokenize::is_flag_token;
use tracing::debug;

/// The outcome of walking tokens down the command tree.
#[derive(Debug)]
pub struct Resolution<'a> {
    /// The deepest node reached.
    pub command: &'a Command,
    /// Canonical names of every node on the way down.
    pub path: Vec<&'a str>,
    /// Index of the first token not consumed by resolution.
    pub next: usize,
}

/// Resolves `tokens` against the top-level `commands`.
///
/// Siblings are tried in registration order.
pub fn resolve<'a>(
    commands: &'a [Command],
    tokens: &[String],
) -> Result<Resolution<'a>, DispatchError> {
    let first = tokens
        .first()
        .ok_or_else(|| DispatchError::UnknownCommand(String::new()))?;

    let mut current = commands
        .iter()
        .find(|c| c.matches(first))
        .ok_or_else(|| DispatchError::UnknownCommand(first.clone()))?;

    let mut path = vec![current.name()];
    let mut next = 1;

    while let Some(token) = tokens.get(next) {
        if is_flag_token(token) {
            break;
        }
        match current.find_subcommand(token) {
            Some(child) => {
                current = child;
                path.push(child.name());
                next += 1;
            }
            None => break,
        }
    }

    debug!(path = ?path, next, "resolved command");
    Ok(Resolution {
        command: current,
        path,
        next,
    })
}
