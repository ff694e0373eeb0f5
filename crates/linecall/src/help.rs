//! Usage text for commands.
//!
//! ```text
//! do - Performs a simple action
//!   Arguments:
//!     -v (int) required -- An integer value
//!   Subcommands:
//!     action (aliases: act) - Performs a detailed action
//!       Arguments:
//!         -x (text) required -- Action description
//! ```

use crate::argument::ArgSpec;
use crate::command::Command;
use crate::output::Output;

const INDENT: &str = "  ";

/// Renders usage lines for `command` and, recursively, its sub-commands.
///
/// Every line starts with `prefix`.
pub fn render_usage(command: &Command, prefix: &str) -> Vec<String> {
    let mut lines = Vec::new();
    push_usage(command, prefix, &mut lines);
    lines
}

fn push_usage(command: &Command, prefix: &str, lines: &mut Vec<String>) {
    let mut header = format!("{}{}", prefix, command.name());
    if !command.aliases().is_empty() {
        header.push_str(&format!(" (aliases: {})", command.aliases().join(", ")));
    }
    if !command.description().is_empty() {
        header.push_str(&format!(" - {}", command.description()));
    }
    lines.push(header);

    if !command.specs().is_empty() {
        lines.push(format!("{}{}Arguments:", prefix, INDENT));
        for spec in command.specs() {
            lines.push(format!("{}{}{}{}", prefix, INDENT, INDENT, spec_line(spec)));
        }
    }

    if !command.subcommands().is_empty() {
        lines.push(format!("{}{}Subcommands:", prefix, INDENT));
        let child_prefix = format!("{}{}{}", prefix, INDENT, INDENT);
        for child in command.subcommands() {
            push_usage(child, &child_prefix, lines);
        }
    }
}

fn spec_line(spec: &ArgSpec) -> String {
    let mut line = format!(
        "-{} ({}) {}",
        spec.name,
        spec.kind,
        if spec.required { "required" } else { "optional" }
    );
    if let Some(default) = &spec.default {
        line.push_str(&format!(", default = {}", default));
    }
    if !spec.help.is_empty() {
        line.push_str(&format!(" -- {}", spec.help));
    }
    line
}

/// Renders usage for every top-level command under a `Commands:` header.
pub fn render_global_help(commands: &[Command]) -> Vec<String> {
    let mut lines = vec!["Commands:".to_string()];
    for command in commands {
        push_usage(command, INDENT, &mut lines);
    }
    lines
}

/// Prints usage for one command.
pub fn print_usage(command: &Command, prefix: &str, output: &dyn Output) {
    for line in render_usage(command, prefix) {
        output.println(&line);
    }
}

/// Prints usage for every top-level command.
pub fn print_global_help(commands: &[Command], output: &dyn Output) {
    for line in render_global_help(commands) {
        output.println(&line);
    }
}
