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

use std::cell::RefCell;
use std::rc::Rc;

use crate::stack;
use crate::value::{LuaTable, TableKey, Value};

/// ============================================================================
/// value_to_string
/// ============================================================================
/// Converts a runtime `Value` into the text `print`, `tostring` and `..`
/// produce.
///
/// Examples:
///   - Number(7.0)        → "7"
///   - Number(3.5)        → "3.5"
///   - String("cat")      → "cat"
///   - Nil                → "nil"
///   - Table {10, x = 1}  → "{ 1: 10, x: 1 }"
///   - Function           → "function: name"
/// ============================================================================
pub fn value_to_string(val: &Value) -> String {
    let mut seen = Vec::new();
    render(val, &mut seen)
}

/// Integral numbers print without a fraction; NaN prints as `nan`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "nan".to_string()
    } else {
        n.to_string()
    }
}

fn render(val: &Value, seen: &mut Vec<*const RefCell<LuaTable>>) -> String {
    match val {
        Value::String(s) => s.clone(),
        Value::Number(n) => format_number(*n),
        Value::Bool(b) => b.to_string(),
        Value::Nil => "nil".to_string(),
        Value::Function(closure) => format!("function: {}", closure.name),
        Value::NativeFunction(native) => format!("function: builtin {}", native.name),

        Value::Table(table) => {
            let ptr = Rc::as_ptr(table);
            if seen.contains(&ptr) {
                return "{...}".to_string();
            }
            seen.push(ptr);

            let table = table.borrow();
            let out = if table.is_empty() {
                "{}".to_string()
            } else {
                let parts: Vec<String> = table
                    .entries()
                    .map(|(key, value)| {
                        let value = stack::guarded(|| render(value, seen));
                        format!("{}: {}", render_key(key), value)
                    })
                    .collect();
                format!("{{ {} }}", parts.join(", "))
            };

            seen.pop();
            out
        }
    }
}

fn render_key(key: &TableKey) -> String {
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_drop_integral_fractions() {
        assert_eq!(format_number(7.0), "7");
        assert_eq!(format_number(-2.5), "-2.5");
        assert_eq!(format_number(f64::INFINITY), "inf");
        assert_eq!(format_number(f64::NAN), "nan");
    }

    #[test]
    fn tables_render_in_insertion_order() {
        let t = Value::sequence(vec![Value::from(10.0), Value::from("x")]);
        assert_eq!(value_to_string(&t), "{ 1: 10, 2: x }");
        assert_eq!(value_to_string(&Value::sequence(vec![])), "{}");
    }

    #[test]
    fn self_referencing_tables_terminate() {
        let t = Value::sequence(vec![]);
        if let Value::Table(inner) = &t {
            inner
                .borrow_mut()
                .set(TableKey::Str("me".into()), t.clone());
        }
        assert_eq!(value_to_string(&t), "{ me: {...} }");
    }
}
