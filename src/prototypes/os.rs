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

//! The `os` table: wall-clock and process time.

use std::fmt::Write;
use std::time::Instant;

use chrono::{Local, Utc};

use crate::error::LanadaError;
use crate::interpreter::helpers::expect_string;
use crate::value::{NativeResult, Value};

const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Creates the global `os` table.
///
/// # Installed Functions
/// - `os.time()`  → seconds since the Unix epoch
/// - `os.clock()` → seconds since the interpreter was created
/// - `os.date([fmt])` → formatted local time
pub fn create_global_os_value() -> Value {
    let started = Instant::now();

    Value::table_from([
        ("time", Value::native("time", os_time)),
        (
            "clock",
            Value::native("clock", move |_| {
                Ok(Value::Number(started.elapsed().as_secs_f64()))
            }),
        ),
        ("date", Value::native("date", os_date)),
    ])
}

pub fn os_time(_args: Vec<Value>) -> NativeResult {
    Ok(Value::Number(Utc::now().timestamp() as f64))
}

/// `os.date([fmt])` formats the current local time with strftime-style
/// specifiers (default `%Y-%m-%d %H:%M:%S`).
pub fn os_date(args: Vec<Value>) -> NativeResult {
    let format = match args.first() {
        None | Some(Value::Nil) => DEFAULT_DATE_FORMAT.to_string(),
        Some(_) => expect_string(&args, 0, "date")?,
    };

    // chrono reports unknown specifiers through fmt::Error rather than
    // silently dropping them.
    let mut out = String::new();
    write!(out, "{}", Local::now().format(&format)).map_err(|_| {
        LanadaError::type_error(
            format!("bad argument #1 to 'date' (invalid conversion specifier in '{}')", format),
            Default::default(),
        )
    })?;

    Ok(Value::String(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_is_whole_seconds() {
        let Value::Number(t) = os_time(vec![]).unwrap() else {
            panic!("os.time() returned a non-number");
        };
        assert_eq!(t.fract(), 0.0);
        assert!(t > 1_600_000_000.0);
    }

    #[test]
    fn date_uses_the_default_format() {
        let Value::String(date) = os_date(vec![]).unwrap() else {
            panic!("os.date() returned a non-string");
        };
        // 2026-10-18 12:34:56
        assert_eq!(date.len(), 19);
        assert_eq!(&date[4..5], "-");

        let Value::String(year) = os_date(vec![Value::from("%Y")]).unwrap() else {
            panic!("os.date(fmt) returned a non-string");
        };
        assert_eq!(year.len(), 4);
    }

    #[test]
    fn date_rejects_bad_specifiers() {
        assert!(os_date(vec![Value::from("%Y-%")]).is_err());
    }
}
