//! Interactive shell over the demo command set.
//!
//! ```text
//! $ linecall
//! > calc -a 3 -b 4 -op "*"
//! 3 * 4 = 12
//! > do act -x "hello" ; pl -items [1, 2]
//! Performing action: hello
//! 0: 1 (int)
//! 1: 2 (int)
//! > exit
//! ```

mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use linecall::{Dispatcher, DispatcherConfig, ErrorStyle, StdoutOutput};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

const PROMPT: &str = "> ";
const EXIT: &str = "exit";

#[derive(Parser, Debug)]
#[command(name = "linecall", version, about = "Dispatch command lines to demo handlers")]
struct Cli {
    /// Print error codes instead of messages
    #[arg(long)]
    codes: bool,

    /// Do not register the built-in help command
    #[arg(long)]
    no_help_command: bool,

    /// Run a line and exit (repeatable)
    #[arg(short = 'c', long = "command", value_name = "LINE")]
    commands: Vec<String>,

    /// Run every line of a file and exit; blank lines and `#` comments are skipped
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Turn debugging information on (-d, -dd, -ddd)
    #[arg(short = 'd', long = "debug", action = clap::ArgAction::Count)]
    debug: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    let config = DispatcherConfig {
        error_style: if cli.codes {
            ErrorStyle::Codes
        } else {
            ErrorStyle::Descriptive
        },
        help_command: !cli.no_help_command,
    };
    let mut dispatcher = Dispatcher::builder()
        .output(StdoutOutput)
        .config(config)
        .build();
    commands::register_all(&mut dispatcher).context("registering demo commands")?;

    if cli.commands.is_empty() && cli.script.is_none() {
        return repl(&dispatcher);
    }

    let mut ok = run_lines(&dispatcher, cli.commands.iter().map(String::as_str));
    if let Some(path) = &cli.script {
        ok &= run_script(&dispatcher, path)?;
    }
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

fn repl(dispatcher: &Dispatcher) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}", PROMPT);
        io::stdout().flush().context("flushing prompt")?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.context("reading stdin")?;
        let line = line.trim();
        if line == EXIT {
            break;
        }
        dispatcher.dispatch(line);
    }
    Ok(())
}

/// Dispatches every line; returns `true` if all succeeded.
fn run_lines<'a>(dispatcher: &Dispatcher, lines: impl IntoIterator<Item = &'a str>) -> bool {
    lines
        .into_iter()
        .fold(true, |ok, line| dispatcher.dispatch(line) & ok)
}

fn run_script(dispatcher: &Dispatcher, path: &Path) -> Result<bool> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    tracing::info!(path = %path.display(), "running script");
    Ok(run_lines(dispatcher, script_lines(&text)))
}

fn script_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    // RUST_LOG wins over -d when set.
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(fmt_layer).init();
    tracing::debug!(?level, "logging initialized");
}
