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

//! The `string` table. Positions and lengths count characters, not bytes.

use crate::interpreter::helpers::{check_string_len, expect_integer, expect_string};
use crate::value::{NativeResult, Value};

/// Creates the global `string` table.
///
/// # Installed Functions
/// - `string.len(s)`
/// - `string.upper(s)` / `string.lower(s)`
/// - `string.reverse(s)`
/// - `string.sub(s, i [, j])`
/// - `string.rep(s, n [, sep])`
pub fn create_global_string_value() -> Value {
    Value::table_from([
        ("len", Value::native("len", string_len)),
        ("upper", Value::native("upper", string_upper)),
        ("lower", Value::native("lower", string_lower)),
        ("reverse", Value::native("reverse", string_reverse)),
        ("sub", Value::native("sub", string_sub)),
        ("rep", Value::native("rep", string_rep)),
    ])
}

pub fn string_len(args: Vec<Value>) -> NativeResult {
    let s = expect_string(&args, 0, "len")?;
    Ok(Value::Number(s.chars().count() as f64))
}

pub fn string_upper(args: Vec<Value>) -> NativeResult {
    Ok(Value::String(expect_string(&args, 0, "upper")?.to_uppercase()))
}

pub fn string_lower(args: Vec<Value>) -> NativeResult {
    Ok(Value::String(expect_string(&args, 0, "lower")?.to_lowercase()))
}

pub fn string_reverse(args: Vec<Value>) -> NativeResult {
    Ok(Value::String(expect_string(&args, 0, "reverse")?.chars().rev().collect()))
}

/// Returns the substring from `i` to `j`, both 1-based and inclusive.
///
/// Negative positions count from the end (`-1` is the last character);
/// `j` defaults to `-1`. Out-of-range positions are clamped, and an empty
/// range yields `""`.
///
/// ```text
/// string.sub("lanada", 2, 4)   -- "ana"
/// string.sub("lanada", -3)     -- "ada"
/// ```
pub fn string_sub(args: Vec<Value>) -> NativeResult {
    let s = expect_string(&args, 0, "sub")?;
    let chars: Vec<char> = s.chars().collect();
    let len = chars.len() as i64;

    let i = expect_integer(&args, 1, "sub")?;
    let j = match args.get(2) {
        None | Some(Value::Nil) => -1,
        Some(_) => expect_integer(&args, 2, "sub")?,
    };

    let resolve = |pos: i64| if pos < 0 { len + pos + 1 } else { pos };
    let start = resolve(i).max(1);
    let end = resolve(j).min(len);

    if start > end {
        return Ok(Value::String(String::new()));
    }

    Ok(Value::String(
        chars[(start - 1) as usize..end as usize].iter().collect(),
    ))
}

/// `string.rep(s, n [, sep])`: `n` copies of `s` joined by `sep`.
pub fn string_rep(args: Vec<Value>) -> NativeResult {
    let s = expect_string(&args, 0, "rep")?;
    let n = expect_integer(&args, 1, "rep")?;
    let sep = match args.get(2) {
        None | Some(Value::Nil) => String::new(),
        Some(_) => expect_string(&args, 2, "rep")?,
    };

    if n <= 0 {
        return Ok(Value::String(String::new()));
    }

    let count = usize::try_from(n).unwrap_or(usize::MAX);
    let total = s
        .len()
        .checked_mul(count)
        .and_then(|body| sep.len().checked_mul(count - 1)?.checked_add(body));
    let total = check_string_len(total)?;
    if total == 0 {
        return Ok(Value::String(String::new()));
    }

    let mut out = String::with_capacity(total);
    for i in 0..count {
        if i > 0 {
            out.push_str(&sep);
        }
        out.push_str(&s);
    }
    Ok(Value::String(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> Value {
        Value::from(text)
    }

    fn n(x: f64) -> Value {
        Value::from(x)
    }

    #[test]
    fn case_and_reversal() {
        assert_eq!(string_upper(vec![s("lanada")]).unwrap(), s("LANADA"));
        assert_eq!(string_lower(vec![s("LaNaDa")]).unwrap(), s("lanada"));
        assert_eq!(string_reverse(vec![s("abc")]).unwrap(), s("cba"));
        assert_eq!(string_len(vec![s("héllo")]).unwrap(), n(5.0));
    }

    #[test]
    fn sub_handles_negative_and_clamped_positions() {
        assert_eq!(string_sub(vec![s("lanada"), n(2.0), n(4.0)]).unwrap(), s("ana"));
        assert_eq!(string_sub(vec![s("lanada"), n(-3.0)]).unwrap(), s("ada"));
        assert_eq!(string_sub(vec![s("lanada"), n(0.0), n(100.0)]).unwrap(), s("lanada"));
        assert_eq!(string_sub(vec![s("lanada"), n(5.0), n(2.0)]).unwrap(), s(""));
    }

    #[test]
    fn rep_joins_with_separator() {
        assert_eq!(string_rep(vec![s("ab"), n(3.0)]).unwrap(), s("ababab"));
        assert_eq!(string_rep(vec![s("x"), n(3.0), s(",")]).unwrap(), s("x,x,x"));
        assert_eq!(string_rep(vec![s("x"), n(0.0)]).unwrap(), s(""));
    }

    #[test]
    fn rep_refuses_oversized_results() {
        let err = string_rep(vec![s("x"), n(1e18)]).unwrap_err();
        assert_eq!(err.message, "resulting string too large");
        assert!(string_rep(vec![s("ab"), n(2e8), s(",")]).is_err());

        // Nothing to repeat: the count never turns into work.
        assert_eq!(string_rep(vec![s(""), n(1e18)]).unwrap(), s(""));
    }

    #[test]
    fn rejects_non_strings() {
        let err = string_upper(vec![Value::Nil]).unwrap_err();
        assert_eq!(err.message, "bad argument #1 to 'upper' (string expected, got nil)");
    }
}
