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

//! Argument checking shared by every builtin.
//!
//! Positions are 1-based to match what the script author wrote. Errors carry
//! no span; the call site attaches one.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{LanadaError, LanadaResult};
use crate::interpreter::display::format_number;
use crate::value::{LuaTable, Value};

/// Longest string, in bytes, that `..` or a builtin may build.
pub const MAX_STRING_LEN: usize = 256 * 1024 * 1024;

/// Passes a computed result length through; `None` means the computation
/// overflowed.
pub fn check_string_len(len: Option<usize>) -> LanadaResult<usize> {
    match len {
        Some(len) if len <= MAX_STRING_LEN => Ok(len),
        _ => Err(LanadaError::type_error(
            "resulting string too large",
            Default::default(),
        )),
    }
}

/// Builds the standard "bad argument" error.
pub fn bad_argument(position: usize, function: &str, expected: &str, got: Option<&Value>) -> LanadaError {
    let got = got.map(Value::type_name).unwrap_or("no value");
    LanadaError::type_error(
        format!(
            "bad argument #{} to '{}' ({} expected, got {})",
            position, function, expected, got
        ),
        Default::default(),
    )
}

pub fn expect_number(args: &[Value], index: usize, function: &str) -> LanadaResult<f64> {
    match args.get(index) {
        Some(Value::Number(n)) => Ok(*n),
        other => Err(bad_argument(index + 1, function, "number", other)),
    }
}

/// Like `expect_number`, but absent or nil arguments yield `None`.
pub fn optional_number(args: &[Value], index: usize, function: &str) -> LanadaResult<Option<f64>> {
    match args.get(index) {
        None | Some(Value::Nil) => Ok(None),
        Some(Value::Number(n)) => Ok(Some(*n)),
        other => Err(bad_argument(index + 1, function, "number", other)),
    }
}

/// Strings pass through, numbers are rendered as they would print.
pub fn expect_string(args: &[Value], index: usize, function: &str) -> LanadaResult<String> {
    match args.get(index) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(format_number(*n)),
        other => Err(bad_argument(index + 1, function, "string", other)),
    }
}

pub fn expect_table(
    args: &[Value],
    index: usize,
    function: &str,
) -> LanadaResult<Rc<RefCell<LuaTable>>> {
    match args.get(index) {
        Some(Value::Table(t)) => Ok(t.clone()),
        other => Err(bad_argument(index + 1, function, "table", other)),
    }
}

/// Integral argument (string positions, repeat counts, insert positions).
pub fn expect_integer(args: &[Value], index: usize, function: &str) -> LanadaResult<i64> {
    let n = expect_number(args, index, function)?;
    if n.fract() != 0.0 || !n.is_finite() {
        return Err(LanadaError::type_error(
            format!(
                "bad argument #{} to '{}' (number has no integer representation)",
                index + 1,
                function
            ),
            Default::default(),
        ));
    }
    Ok(n as i64)
}
