use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use lanada::{execute, output_sink, run_with_config, Config, ErrorKind, Interpreter, Value};

fn capture(src: &str, config: Config) -> Vec<String> {
    let lines = Rc::new(RefCell::new(Vec::new()));
    let sink = lines.clone();
    run_with_config(src, config, move |line| sink.borrow_mut().push(line.to_string()));
    let out = lines.borrow().clone();
    out
}

const SPIN: &str = r#"
function spin(n)
  if n > 0 then spin(n - 1) end
end
spin(40)
print("done")
"#;

#[test]
fn step_limit_stops_runaway_scripts() {
    let config = Config {
        step_limit: Some(25),
        ..Config::default()
    };
    assert_eq!(capture(SPIN, config), vec!["Error: step limit exceeded (25 statements)"]);
}

#[test]
fn generous_step_limits_do_not_interfere() {
    let config = Config {
        step_limit: Some(10_000),
        ..Config::default()
    };
    assert_eq!(capture(SPIN, config), vec!["done"]);
}

#[test]
fn call_depth_is_bounded() {
    let config = Config {
        max_call_depth: 30,
        ..Config::default()
    };
    assert_eq!(
        capture(SPIN, config),
        vec!["Error: stack overflow (more than 30 nested calls)"]
    );

    let config = Config {
        max_call_depth: 50,
        ..Config::default()
    };
    assert_eq!(capture(SPIN, config), vec!["done"]);
}

#[test]
fn cancellation_flag_is_checked_at_statement_boundaries() {
    let mut interpreter = Interpreter::with_output(|_| {});
    let flag = Arc::new(AtomicBool::new(false));
    interpreter.set_cancel_flag(flag.clone());

    assert!(execute("local a = 1", &mut interpreter).is_ok());

    flag.store(true, Ordering::Relaxed);
    let err = execute("local b = 2", &mut interpreter).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Limit);
    assert_eq!(err.message, "execution cancelled");
    assert!(interpreter.get_global("b").is_none());
}

#[test]
fn execute_returns_the_top_level_value() {
    let mut interpreter = Interpreter::with_output(|_| {});
    let value = execute("local x = 20\nreturn x + 1", &mut interpreter).unwrap();
    assert_eq!(value, Some(Value::Number(21.0)));

    let value = execute("local y = 1", &mut interpreter).unwrap();
    assert_eq!(value, None);
}

#[test]
fn globals_persist_across_executions_in_one_interpreter() {
    let lines = Rc::new(RefCell::new(Vec::new()));
    let sink = lines.clone();
    let mut interpreter = Interpreter::new(
        Config::default(),
        output_sink(move |line: &str| sink.borrow_mut().push(line.to_string())),
    );

    execute("counter = 1\nfunction bump() counter = counter + 1 end", &mut interpreter).unwrap();
    execute("bump()\nbump()\nprint(counter)", &mut interpreter).unwrap();

    assert_eq!(*lines.borrow(), vec!["3"]);
    assert_eq!(interpreter.get_global("counter"), Some(Value::Number(3.0)));
}

#[test]
fn errors_carry_kind_and_location() {
    let mut interpreter = Interpreter::with_output(|_| {});

    let err = execute("local a = 1\nprint(a + {})", &mut interpreter).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Type);
    assert_eq!(err.code, "E_TYPE");
    assert_eq!(err.span.line, 2);

    let err = execute("error(\"bad\")", &mut interpreter).unwrap_err();
    assert_eq!(err.kind, ErrorKind::User);
    assert_eq!(err.span.line, 1);

    let err = execute("if 1 print(2) end", &mut interpreter).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
    assert_eq!(err.message, "Expected 'then' but got 'print'");
}

#[test]
fn step_count_is_reported() {
    let mut interpreter = Interpreter::with_output(|_| {});
    execute("local a = 1\nlocal b = 2\nif a then local c = 3 end", &mut interpreter).unwrap();
    assert_eq!(interpreter.steps(), 4);
}

/// Runs `src` on a freshly spawned thread with the platform's default stack
/// size, the way most hosts embed the interpreter.
fn capture_on_spawned_thread(src: String) -> Vec<String> {
    std::thread::spawn(move || lanada::run_captured(&src))
        .join()
        .expect("interpreter thread panicked")
}

#[test]
fn default_call_depth_is_reachable_on_a_spawned_thread() {
    let deepest = Config::default().max_call_depth - 1;

    let src = format!(
        "function spin(n)\n if n > 0 then spin(n - 1) end\nend\nspin({})\nprint(\"done\")",
        deepest
    );
    assert_eq!(capture_on_spawned_thread(src), vec!["done"]);

    let src = format!(
        "function sum(n)\n if n == 0 then return 0 end\n return n + sum(n - 1)\nend\nprint(sum({}))",
        deepest
    );
    let expected = (deepest * (deepest + 1) / 2).to_string();
    assert_eq!(capture_on_spawned_thread(src), vec![expected]);

    let src = format!(
        "function spin(n)\n if n > 0 then spin(n - 1) end\nend\nspin({})",
        deepest + 1
    );
    assert_eq!(
        capture_on_spawned_thread(src),
        vec![format!(
            "Error: stack overflow (more than {} nested calls)",
            deepest + 1
        )]
    );
}

#[test]
fn deeply_nested_source_is_a_syntax_error() {
    let parens = format!("print({}1{})", "(".repeat(20_000), ")".repeat(20_000));
    assert_eq!(
        capture_on_spawned_thread(parens),
        vec!["Error: expression nested too deeply (limit 200)"]
    );

    let ifs = format!("{}print(1){}", "if true then ".repeat(1_000), " end".repeat(1_000));
    let lines = capture_on_spawned_thread(ifs);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("Error: ") && lines[0].contains("nested too deeply"));

    let shallow = format!("print({}1{})", "(".repeat(150), ")".repeat(150));
    assert_eq!(capture_on_spawned_thread(shallow), vec!["1"]);
}

#[test]
fn oversized_strings_are_reported_not_allocated() {
    assert_eq!(
        capture("print(string.rep(\"x\", 10^18))\nprint(\"after\")", Config::default()),
        vec!["Error: resulting string too large"]
    );
    assert_eq!(
        capture("print(string.len(string.rep(\"\", 10^18)))", Config::default()),
        vec!["0"]
    );
}
