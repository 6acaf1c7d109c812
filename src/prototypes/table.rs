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

//! The `table` table: sequence helpers over `t[1] .. t[#t]`.

use crate::error::LanadaError;
use crate::interpreter::display::format_number;
use crate::interpreter::helpers::{expect_integer, expect_string, expect_table};
use crate::value::{NativeResult, Value};

pub fn create_global_table_value() -> Value {
    Value::table_from([
        ("insert", Value::native("insert", table_insert)),
        ("remove", Value::native("remove", table_remove)),
        ("concat", Value::native("concat", table_concat)),
        ("sort", Value::native("sort", table_sort)),
    ])
}

fn position_error(position: usize, function: &str) -> LanadaError {
    LanadaError::type_error(
        format!("bad argument #{} to '{}' (position out of bounds)", position, function),
        Default::default(),
    )
}

/// `table.insert(t, v)` appends; `table.insert(t, pos, v)` shifts
/// `t[pos..]` up by one first.
pub fn table_insert(args: Vec<Value>) -> NativeResult {
    let table = expect_table(&args, 0, "insert")?;

    let (pos, value) = match args.len() {
        2 => (None, args[1].clone()),
        3 => (Some(expect_integer(&args, 1, "insert")?), args[2].clone()),
        _ => {
            return Err(LanadaError::type_error(
                "wrong number of arguments to 'insert'",
                Default::default(),
            ))
        }
    };

    let mut table = table.borrow_mut();
    let mut values = table.sequence_values();

    match pos {
        None => values.push(value),
        Some(pos) => {
            if pos < 1 || pos as usize > values.len() + 1 {
                return Err(position_error(2, "insert"));
            }
            values.insert(pos as usize - 1, value);
        }
    }

    table.replace_sequence(values);
    Ok(Value::Nil)
}

/// `table.remove(t [, pos])` removes and returns `t[pos]` (default the last
/// element), shifting later elements down. Removing from an empty sequence
/// returns nil.
pub fn table_remove(args: Vec<Value>) -> NativeResult {
    let table = expect_table(&args, 0, "remove")?;
    let mut table = table.borrow_mut();
    let mut values = table.sequence_values();

    let pos = match args.get(1) {
        None | Some(Value::Nil) => values.len() as i64,
        Some(_) => expect_integer(&args, 1, "remove")?,
    };

    if values.is_empty() && pos == 0 {
        return Ok(Value::Nil);
    }
    if pos < 1 || pos as usize > values.len() {
        return Err(position_error(2, "remove"));
    }

    let removed = values.remove(pos as usize - 1);
    table.replace_sequence(values);
    Ok(removed)
}

/// `table.concat(t [, sep])` joins the sequence; every element must be a
/// string or a number.
pub fn table_concat(args: Vec<Value>) -> NativeResult {
    let table = expect_table(&args, 0, "concat")?;
    let sep = match args.get(1) {
        None | Some(Value::Nil) => String::new(),
        Some(_) => expect_string(&args, 1, "concat")?,
    };

    let table = table.borrow();
    let mut parts = Vec::new();
    for (i, value) in table.sequence_values().iter().enumerate() {
        match value {
            Value::String(s) => parts.push(s.clone()),
            Value::Number(n) => parts.push(format_number(*n)),
            other => {
                return Err(LanadaError::type_error(
                    format!(
                        "invalid value (at index {}) in table for 'concat' ({})",
                        i + 1,
                        other.type_name()
                    ),
                    Default::default(),
                ))
            }
        }
    }

    Ok(Value::String(parts.join(&sep)))
}

/// `table.sort(t)` sorts a sequence of numbers or a sequence of strings in
/// ascending order, in place.
pub fn table_sort(args: Vec<Value>) -> NativeResult {
    let table = expect_table(&args, 0, "sort")?;

    if matches!(args.get(1), Some(v) if !v.is_nil()) {
        return Err(LanadaError::type_error(
            "bad argument #2 to 'sort' (custom comparators are not supported)",
            Default::default(),
        ));
    }

    let mut table = table.borrow_mut();
    let mut values = table.sequence_values();

    if values.iter().all(|v| matches!(v, Value::Number(_))) {
        values.sort_by(|a, b| {
            let (a, b) = (a.as_number().unwrap_or_default(), b.as_number().unwrap_or_default());
            a.total_cmp(&b)
        });
    } else if values.iter().all(|v| matches!(v, Value::String(_))) {
        values.sort_by(|a, b| a.as_str().cmp(&b.as_str()));
    } else {
        let first = values.first().map(Value::type_name).unwrap_or("nil");
        let other = values
            .iter()
            .map(Value::type_name)
            .find(|name| *name != first)
            .unwrap_or(first);
        return Err(LanadaError::type_error(
            format!("attempt to compare {} with {}", first, other),
            Default::default(),
        ));
    }

    table.replace_sequence(values);
    Ok(Value::Nil)
}
