/*
 * ==========================================================================
 * LANADA - Lua-Flavored Scripting, Straight From Source
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the Lanada scripting language project.
 *
 * Lanada is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

//! Top-level builtins: `print`, `assert`, `error`, `tostring`, `tonumber`
//! and `type`.

use crate::error::LanadaError;
use crate::interpreter::display::value_to_string;
use crate::interpreter::helpers::bad_argument;
use crate::interpreter::OutputSink;
use crate::value::{NativeResult, Value};

/// Builds the global builtin functions. `print` writes to `output`.
pub fn create_global_functions(output: OutputSink) -> Vec<(&'static str, Value)> {
    let print = Value::native("print", move |args| {
        let line = args
            .iter()
            .map(value_to_string)
            .collect::<Vec<_>>()
            .join(" ");
        let mut sink = output.borrow_mut();
        (*sink)(&line);
        Ok(Value::Nil)
    });

    vec![
        ("print", print),
        ("assert", Value::native("assert", global_assert)),
        ("error", Value::native("error", global_error)),
        ("tostring", Value::native("tostring", global_tostring)),
        ("tonumber", Value::native("tonumber", global_tonumber)),
        ("type", Value::native("type", global_type)),
    ]
}

/// `assert(v [, message])`
///
/// Returns `v` when it is truthy; otherwise raises an `AssertionError`
/// carrying `message` (default "assertion failed!").
pub fn global_assert(args: Vec<Value>) -> NativeResult {
    let value = args.first().cloned().unwrap_or(Value::Nil);
    if value.is_truthy() {
        return Ok(value);
    }

    let message = match args.get(1) {
        Some(Value::Nil) | None => "assertion failed!".to_string(),
        Some(other) => value_to_string(other),
    };
    Err(LanadaError::assertion_error(message))
}

/// `error(message)` aborts the run with a `UserError`.
pub fn global_error(args: Vec<Value>) -> NativeResult {
    let message = args.first().map(value_to_string).unwrap_or_else(|| "nil".to_string());
    Err(LanadaError::user_error(message))
}

pub fn global_tostring(args: Vec<Value>) -> NativeResult {
    match args.first() {
        Some(value) => Ok(Value::String(value_to_string(value))),
        None => Err(bad_argument(1, "tostring", "value", None)),
    }
}

/// `tonumber(v)`: numbers pass through, numeric strings parse, anything else
/// is nil.
pub fn global_tonumber(args: Vec<Value>) -> NativeResult {
    match args.first() {
        Some(Value::Number(n)) => Ok(Value::Number(*n)),
        Some(Value::String(s)) => Ok(s
            .trim()
            .parse::<f64>()
            .map(Value::Number)
            .unwrap_or(Value::Nil)),
        Some(_) => Ok(Value::Nil),
        None => Err(bad_argument(1, "tonumber", "value", None)),
    }
}

pub fn global_type(args: Vec<Value>) -> NativeResult {
    match args.first() {
        Some(value) => Ok(Value::from(value.type_name())),
        None => Err(bad_argument(1, "type", "value", None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn assert_passes_truthy_values_through() {
        assert_eq!(global_assert(vec![Value::from(0.0)]).unwrap(), Value::from(0.0));

        let err = global_assert(vec![Value::Bool(false)]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Assertion);
        assert_eq!(err.message, "assertion failed!");

        let err = global_assert(vec![Value::Nil, Value::from("boom")]).unwrap_err();
        assert_eq!(err.message, "boom");
    }

    #[test]
    fn error_raises_user_errors() {
        let err = global_error(vec![Value::from("bad input")]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::User);
        assert_eq!(err.message, "bad input");
    }

    #[test]
    fn tonumber_parses_numeric_strings_only() {
        assert_eq!(global_tonumber(vec![Value::from(" 42 ")]).unwrap(), Value::from(42.0));
        assert_eq!(global_tonumber(vec![Value::from("4x")]).unwrap(), Value::Nil);
        assert_eq!(global_tonumber(vec![Value::Bool(true)]).unwrap(), Value::Nil);
    }

    #[test]
    fn type_names() {
        assert_eq!(global_type(vec![Value::Nil]).unwrap(), Value::from("nil"));
        assert_eq!(global_type(vec![Value::sequence(vec![])]).unwrap(), Value::from("table"));
        assert_eq!(
            global_type(vec![Value::native("f", |_| Ok(Value::Nil))]).unwrap(),
            Value::from("function")
        );
    }
}
