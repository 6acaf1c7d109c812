use lanada::{run_captured, run_with_config, Config};
use std::cell::RefCell;
use std::rc::Rc;

fn assert_output(src: &str, expected: &[&str]) {
    let lines = run_captured(src);
    assert_eq!(lines, expected, "unexpected output for:\n{src}");
}

fn run_seeded(src: &str, seed: u64) -> Vec<String> {
    let lines = Rc::new(RefCell::new(Vec::new()));
    let sink = lines.clone();
    let config = Config {
        random_seed: Some(seed),
        ..Config::default()
    };

    run_with_config(src, config, move |line| sink.borrow_mut().push(line.to_string()));

    let out = lines.borrow().clone();
    out
}

#[test]
fn print_joins_arguments_with_spaces() {
    assert_output("print(1, \"two\", true, nil)", &["1 two true nil"]);
    assert_output("print()", &[""]);
    assert_output("print(0.1 + 0.2 == 0.3, 1 / 0, 10 / 4)", &["false inf 2.5"]);
}

#[test]
fn assert_and_error_abort_the_run() {
    assert_output("assert(1 == 1)\nprint(\"ok\")", &["ok"]);
    assert_output("assert(false)\nprint(\"unreached\")", &["Error: assertion failed!"]);
    assert_output("assert(nil, \"need a value\")", &["Error: need a value"]);
    assert_output(
        "print(\"start\")\nerror(\"custom failure\")\nprint(\"unreached\")",
        &["start", "Error: custom failure"],
    );
}

#[test]
fn conversions_and_type() {
    assert_output(
        r#"
        print(tostring(12) .. "!", tonumber("3.5") + 1, tonumber("abc"))
        print(type(1), type("s"), type(nil), type({}), type(print), type(true))
        "#,
        &["12! 4.5 nil", "number string nil table function boolean"],
    );
}

#[test]
fn math_functions() {
    assert_output(
        r#"
        print(math.abs(-4), math.floor(3.7), math.ceil(3.2))
        print(math.min(4, 2, 8), math.max(4, 2, 8))
        print(math.pow(2, 10), math.sqrt(49))
        print(math.floor(math.pi * 100), math.huge)
        "#,
        &["4 3 4", "2 8", "1024 7", "314 inf"],
    );
}

#[test]
fn math_random_ranges() {
    let lines = run_seeded(
        r#"
        local ok = true
        function check(i)
          if i > 0 then
            local a = math.random()
            local b = math.random(6)
            local c = math.random(10, 12)
            if a < 0 then ok = false end
            if a >= 1 then ok = false end
            if b < 1 then ok = false end
            if b > 6 then ok = false end
            if c < 10 then ok = false end
            if c > 12 then ok = false end
            if math.floor(b) == b then else ok = false end
            check(i - 1)
          end
        end
        check(50)
        print(ok)
        "#,
        1,
    );
    assert_eq!(lines, vec!["true"]);
}

#[test]
fn math_random_is_reproducible_with_a_seed() {
    let src = "print(math.random(1000), math.random(1000), math.random())";
    assert_eq!(run_seeded(src, 99), run_seeded(src, 99));
}

#[test]
fn string_functions() {
    assert_output(
        r#"
        local s = "Lanada"
        print(string.upper(s), string.lower(s), string.reverse(s), string.len(s))
        print(string.sub(s, 2, 4), string.sub(s, -3), string.sub(s, 4, 2) == "")
        print(string.rep("ab", 3), string.rep("x", 3, "-"))
        "#,
        &["LANADA lanada adanaL 6", "ana ada true", "ababab x-x-x"],
    );
}

#[test]
fn table_functions() {
    assert_output(
        r#"
        local t = {3, 1, 2}
        table.insert(t, 5)
        table.insert(t, 1, 9)
        print(table.concat(t, ","))
        print(table.remove(t), table.remove(t, 1))
        table.sort(t)
        print(table.concat(t, " "))
        local words = {"pear", "fig", "apple"}
        table.sort(words)
        print(table.concat(words))
        "#,
        &["9,3,1,2,5", "5 9", "1 2 3", "applefigpear"],
    );
}

#[test]
fn os_functions() {
    assert_output(
        r#"
        print(type(os.time()), os.time() > 0)
        print(os.clock() >= 0)
        print(string.len(os.date()), string.len(os.date("%Y")))
        "#,
        &["number true", "true", "19 4"],
    );
}

#[test]
fn builtin_argument_errors() {
    assert_output(
        "print(math.floor(\"x\"))",
        &["Error: bad argument #1 to 'floor' (number expected, got string)"],
    );
    assert_output(
        "table.insert(nil, 1)",
        &["Error: bad argument #1 to 'insert' (table expected, got nil)"],
    );
    assert_output(
        "print(string.upper())",
        &["Error: bad argument #1 to 'upper' (string expected, got no value)"],
    );
    assert_output("table.sort({1, \"a\"})", &["Error: attempt to compare number with string"]);
}

#[test]
fn builtins_are_ordinary_values() {
    assert_output(
        r#"
        local say = print
        say("hi")
        local m = math
        print(m.abs(-1))
        print = nil
        say(print)
        "#,
        &["hi", "1", "nil"],
    );
}

#[test]
fn table_helpers_keep_iteration_order() {
    assert_output(
        r#"
        local t = {1, 2, name = "a"}
        table.insert(t, 3)
        print(t)
        table.insert(t, 1, 0)
        print(t)

        local u = {3, 1, k = 0, 2}
        table.sort(u)
        print(u)
        table.remove(u, 1)
        print(u)
        "#,
        &[
            "{ 1: 1, 2: 2, name: a, 3: 3 }",
            "{ 1: 0, 2: 1, name: a, 3: 2, 4: 3 }",
            "{ 1: 1, 2: 2, k: 0, 3: 3 }",
            "{ 1: 2, 2: 3, k: 0 }",
        ],
    );
}

#[test]
fn string_rep_rejects_results_past_the_size_cap() {
    assert_output(
        "print(\"start\")\nprint(string.rep(\"ab\", 10^15, \",\"))\nprint(\"unreached\")",
        &["start", "Error: resulting string too large"],
    );
}
