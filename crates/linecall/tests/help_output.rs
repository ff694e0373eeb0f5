//! Snapshot tests for usage and global help text.

use insta::assert_snapshot;
use linecall::help::{render_global_help, render_usage};
use linecall::{ArgKind, ArgSpec, BufferOutput, Command, Dispatcher, Value};

fn do_command() -> Command {
    let action = Command::new("action", "Performs a detailed action")
        .alias("act")
        .unwrap()
        .arg(ArgSpec::required("x", ArgKind::Text).help("Action description"))
        .unwrap()
        .handler(|_inv| {});

    Command::new("do", "Performs a simple action")
        .arg(ArgSpec::required("v", ArgKind::Int).help("An integer value"))
        .unwrap()
        .subcommand(action)
        .unwrap()
        .handler(|_inv| {})
}

fn echo_command() -> Command {
    Command::new("echo", "Prints its invocation")
        .arg(
            ArgSpec::optional("json", ArgKind::Bool)
                .with_default(false)
                .unwrap()
                .help("Print as JSON"),
        )
        .unwrap()
        .arg(ArgSpec::optional("text", ArgKind::Text))
        .unwrap()
        .arg(
            ArgSpec::required("scale", ArgKind::Real)
                .with_default(2)
                .unwrap(),
        )
        .unwrap()
        .arg(
            ArgSpec::optional("tags", ArgKind::List)
                .with_default(Value::List(vec![Value::Text("a".into()), Value::Int(1)]))
                .unwrap(),
        )
        .unwrap()
        .handler(|_inv| {})
}

#[test]
fn nested_usage() {
    assert_snapshot!(render_usage(&do_command(), "").join("\n"), @r"
do - Performs a simple action
  Arguments:
    -v (int) required -- An integer value
  Subcommands:
    action (aliases: act) - Performs a detailed action
      Arguments:
        -x (text) required -- Action description
");
}

#[test]
fn defaults_in_usage() {
    assert_snapshot!(render_usage(&echo_command(), "").join("\n"), @r"
echo - Prints its invocation
  Arguments:
    -json (bool) optional, default = false -- Print as JSON
    -text (text) optional
    -scale (real) required, default = 2.0
    -tags (list) optional, default = [a, 1]
");
}

#[test]
fn global_help_lists_every_command() {
    let mut commands = vec![do_command()];
    commands.push(Command::new("ping", ""));
    assert_snapshot!(render_global_help(&commands).join("\n"), @r"
Commands:
  do - Performs a simple action
    Arguments:
      -v (int) required -- An integer value
    Subcommands:
      action (aliases: act) - Performs a detailed action
        Arguments:
          -x (text) required -- Action description
  ping
");
}

#[test]
fn help_flag_on_subcommand_prints_only_that_subtree() {
    let out = BufferOutput::new();
    let mut dispatcher = Dispatcher::builder().output(out.clone()).build();
    dispatcher.register(do_command()).unwrap();

    assert!(dispatcher.dispatch("do act -help"));
    assert_snapshot!(out.lines().join("\n"), @r"
action (aliases: act) - Performs a detailed action
  Arguments:
    -x (text) required -- Action description
");
}

#[test]
fn builtin_help_command_prints_global_help() {
    let out = BufferOutput::new();
    let mut dispatcher = Dispatcher::builder().output(out.clone()).build();
    dispatcher.register(Command::new("ping", "Checks liveness")).unwrap();

    assert!(dispatcher.dispatch("help"));
    let by_name = out.contents();
    out.clear();
    assert!(dispatcher.dispatch("?"));

    assert_eq!(by_name, out.contents());
    assert_snapshot!(out.lines().join("\n"), @r"
Commands:
  help (aliases: ?) - Lists all commands
  ping - Checks liveness
");
}
