//! Demo command set.

use linecall::{ArgKind, ArgSpec, Command, Dispatcher, Invocation, RegistrationError};

/// Registers every demo command.
pub fn register_all(dispatcher: &mut Dispatcher) -> Result<(), RegistrationError> {
    dispatcher.register(calc()?)?;
    dispatcher.register(do_command()?)?;
    dispatcher.register(printlist()?)?;
    dispatcher.register(echo()?)?;
    Ok(())
}

fn calc() -> Result<Command, RegistrationError> {
    Ok(Command::new("calc", "Performs arithmetic on two numbers")
        .alias("c")?
        .arg(ArgSpec::required("a", ArgKind::Real).help("First operand"))?
        .arg(ArgSpec::required("b", ArgKind::Real).help("Second operand"))?
        .arg(
            ArgSpec::optional("op", ArgKind::Text)
                .with_default("+")?
                .help("One of + - * /"),
        )?
        .handler(run_calc))
}

fn run_calc(inv: &Invocation<'_>) {
    let (a, b) = (inv.real("a").unwrap_or(0.0), inv.real("b").unwrap_or(0.0));
    let op = inv.text("op").unwrap_or("+");
    let result = match op {
        "+" => a + b,
        "-" => a - b,
        "*" | "x" => a * b,
        "/" if b == 0.0 => {
            inv.output().println("Division by zero");
            return;
        }
        "/" => a / b,
        other => {
            inv.output().println(&format!("Unknown operator: {}", other));
            return;
        }
    };
    inv.output().println(&format!("{} {} {} = {}", a, op, b, result));
}

fn do_command() -> Result<Command, RegistrationError> {
    let action = Command::new("action", "Performs a detailed action")
        .alias("act")?
        .arg(ArgSpec::required("x", ArgKind::Text).help("Action description"))?
        .handler(|inv| {
            let x = inv.text("x").unwrap_or_default();
            inv.output().println(&format!("Performing action: {}", x));
        });

    Ok(Command::new("do", "Performs a simple action")
        .arg(ArgSpec::required("v", ArgKind::Int).help("An integer value"))?
        .subcommand(action)?
        .handler(|inv| {
            let v = inv.int("v").unwrap_or_default();
            inv.output().println(&format!("Doing it with v = {}", v));
        }))
}

fn printlist() -> Result<Command, RegistrationError> {
    Ok(Command::new("printlist", "Prints each item of a list")
        .alias("pl")?
        .arg(ArgSpec::required("items", ArgKind::List).help("Items to print"))?
        .handler(|inv| {
            for (i, item) in inv.list("items").unwrap_or_default().iter().enumerate() {
                inv.output()
                    .println(&format!("{}: {} ({})", i, item, item.kind_name()));
            }
        }))
}

fn echo() -> Result<Command, RegistrationError> {
    Ok(Command::new("echo", "Prints its own invocation")
        .arg(
            ArgSpec::optional("json", ArgKind::Bool)
                .with_default(false)?
                .help("Print as JSON"),
        )?
        .arg(ArgSpec::optional("text", ArgKind::Text).help("Text to echo"))?
        .handler(|inv| {
            if inv.bool("json").unwrap_or(false) {
                inv.output().println(&inv.to_json().to_string());
                return;
            }
            inv.output().println(&inv.path_string());
            for arg in inv.arguments() {
                let values: Vec<String> = arg.values.iter().map(ToString::to_string).collect();
                inv.output()
                    .println(&format!("  {} = {}", arg.name, values.join(" ")));
            }
        }))
}
