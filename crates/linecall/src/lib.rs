//! Line-oriented command dispatch.
//!
//! `linecall` turns a line of text such as
//!
//! ```text
//! calc -a 3 -b 4.5 -op "*" ; do act -x "hello world"
//! ```
//!
//! into calls of registered handlers. It is the engine behind a REPL, a
//! debug console or a scripted command file: the integrator declares a tree
//! of commands with typed arguments and the dispatcher does the rest.
//!
//! # Features
//!
//! - **Tokenizing**: whitespace splitting with `"quoted text"`, `\` escapes
//!   and `[list, literals]`; `;` separates independent commands
//! - **Nested commands**: commands with aliases and sub-commands, resolved
//!   greedily from the front of the line
//! - **Typed arguments**: int, real, bool, text and list values with
//!   defaults, required checks and int-to-real widening
//! - **Help**: `-h` / `-help` on any command prints its usage; a built-in
//!   `help` / `?` command lists everything
//! - **Error styles**: descriptive messages or terse codes, chosen once
//!
//! # Pipeline
//!
//! ```text
//! line → split_segments → tokenize → resolve → parse_arguments → merge → Handler
//! ```
//!
//! Validation finishes before the handler runs, so a handler never observes
//! a partially valid argument set. A failing segment is reported and the
//! next one still runs.
//!
//! # Usage
//!
//! ```rust
//! use linecall::{ArgKind, ArgSpec, BufferOutput, Command, Dispatcher};
//!
//! let out = BufferOutput::new();
//! let mut dispatcher = Dispatcher::builder().output(out.clone()).build();
//!
//! dispatcher.register(
//!     Command::new("calc", "Performs arithmetic")
//!         .alias("c")?
//!         .arg(ArgSpec::required("a", ArgKind::Real))?
//!         .arg(ArgSpec::required("b", ArgKind::Real))?
//!         .handler(|inv| {
//!             let sum = inv.real("a").unwrap_or(0.0) + inv.real("b").unwrap_or(0.0);
//!             inv.output().println(&sum.to_string());
//!         }),
//! )?;
//!
//! assert!(dispatcher.dispatch("c -a 3 -b 4.5"));
//! assert!(!dispatcher.dispatch("calc -a 3"));
//! assert_eq!(out.lines(), vec!["7.5", "Required argument missing: b"]);
//! # Ok::<(), linecall::RegistrationError>(())
//! ```

// Core modules
mod argument;
mod binding;
mod command;
mod config;
mod dispatch;
mod error;
mod handler;
mod output;
mod value;

// Pipeline stages
pub mod help;
pub mod literal;
pub mod parse;
pub mod resolve;
pub mod tokenize;

// Re-export core types
pub use argument::{ArgSpec, Argument};
pub use binding::{BoundCommand, CommandSequence};
pub use command::Command;
pub use config::{DispatcherConfig, ErrorStyle};
pub use dispatch::{path_to_string, string_to_path, Dispatched, Dispatcher, DispatcherBuilder};
pub use error::{DispatchError, RegistrationError};
pub use handler::{Handler, Invocation};
pub use output::{BufferOutput, FileOutput, NullOutput, Output, StdoutOutput};
pub use value::{ArgKind, Value};

pub use literal::{coerce, parse_token};
pub use tokenize::{is_flag_token, split_segments, tokenize};
