//! Bound commands replayed through the dispatcher.

use linecall::{
    ArgKind, ArgSpec, Argument, BoundCommand, Command, CommandSequence, DispatchError, Dispatcher,
    Invocation, Value,
};
use std::cell::RefCell;
use std::rc::Rc;

fn calc_dispatcher() -> (Dispatcher, Rc<RefCell<Vec<Vec<Argument>>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let mut dispatcher = Dispatcher::new();
    dispatcher
        .register(
            Command::new("calc", "")
                .alias("c")
                .unwrap()
                .arg(ArgSpec::required("a", ArgKind::Real))
                .unwrap()
                .arg(ArgSpec::required("op", ArgKind::Text))
                .unwrap()
                .arg(ArgSpec::optional("items", ArgKind::List))
                .unwrap()
                .handler(move |inv: &Invocation<'_>| {
                    sink.borrow_mut().push(inv.arguments().to_vec())
                }),
        )
        .unwrap();
    (dispatcher, seen)
}

#[test]
fn command_line_replays_to_same_arguments() {
    let (dispatcher, seen) = calc_dispatcher();
    let bound = BoundCommand::new(["calc"])
        .arg("a", 2.5)
        .arg("op", r#"a "quoted" \ op"#)
        .arg(
            "items",
            vec![Value::Int(1), Value::Text("two, three".into()), Value::Bool(false)],
        );

    dispatcher.execute(&bound).unwrap();
    assert!(dispatcher.dispatch(&bound.to_command_line().unwrap()));

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], seen[1]);
}

#[test]
fn sequence_replays_as_one_line() {
    let (dispatcher, seen) = calc_dispatcher();
    let sequence = CommandSequence::new()
        .then(BoundCommand::new(["c"]).arg("a", 1.0).arg("op", "+"))
        .then(BoundCommand::new(["calc"]).arg("a", 2.0).arg("op", "x"));

    assert!(dispatcher.execute_sequence(&sequence));
    assert!(dispatcher.dispatch(&sequence.to_command_line().unwrap()));

    let seen = seen.borrow();
    assert_eq!(seen.len(), 4);
    assert_eq!(seen[0], seen[2]);
    assert_eq!(seen[1], seen[3]);
}

#[test]
fn text_that_reads_as_another_kind_is_not_rendered() {
    let (dispatcher, seen) = calc_dispatcher();
    for op in ["3", "true", "-x", "", "[x"] {
        let bound = BoundCommand::new(["calc"]).arg("a", 1.0).arg("op", op);
        assert!(dispatcher.execute(&bound).is_ok());
        assert!(
            matches!(bound.to_command_line(), Err(DispatchError::NotReplayable(_))),
            "op {:?}",
            op
        );
    }
    assert_eq!(seen.borrow().len(), 5);
}

#[test]
fn text_near_other_kinds_still_replays() {
    let (dispatcher, seen) = calc_dispatcher();
    for op in ["3x", "True", "x-1", " ", "a[b]", "nan"] {
        let bound = BoundCommand::new(["calc"]).arg("a", 1.0).arg("op", op);
        let line = bound.to_command_line().unwrap();
        dispatcher.execute(&bound).unwrap();
        assert!(dispatcher.dispatch(&line), "line {}", line);
    }

    let seen = seen.borrow();
    assert_eq!(seen.len(), 12);
    for pair in seen.chunks(2) {
        assert_eq!(pair[0], pair[1]);
    }
}
