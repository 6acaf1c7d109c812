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
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::ast::Stmt;
use crate::error::{LanadaError, LanadaResult};
use crate::interpreter::environment::Environment;

/// Result type every native (host) function returns.
pub type NativeResult = LanadaResult<Value>;

/// Signature of a host callable.
pub type NativeFn = dyn Fn(Vec<Value>) -> NativeResult;

/// Runtime value representation.
///
/// This is the core type that flows through the interpreter.
/// Every expression ultimately evaluates to one of these.
#[derive(Clone)]
pub enum Value {
    Number(f64),
    String(String),
    Bool(bool),
    Nil,

    /// Shared, mutable table. Copies of the value alias the same table.
    Table(Rc<RefCell<LuaTable>>),

    /// User-defined closure.
    Function(Rc<Closure>),

    /// Host callable from the standard library surface.
    NativeFunction(NativeFunction),
}

/// A function value paired with the environment chain active at its
/// definition site.
///
/// `env` is the live chain, not a snapshot: later writes to captured
/// bindings are visible to the closure, and its writes are visible outside.
pub struct Closure {
    pub name: String,
    pub params: Vec<String>,
    pub body: Rc<[Stmt]>,
    pub env: Rc<RefCell<Environment>>,
}

#[derive(Clone)]
pub struct NativeFunction {
    pub name: &'static str,
    pub func: Rc<NativeFn>,
}

impl NativeFunction {
    pub fn call(&self, args: Vec<Value>) -> NativeResult {
        (self.func)(args)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "Number({})", n),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Nil => write!(f, "Nil"),
            Value::Table(t) => write!(f, "[Table len={}]", t.borrow().len()),
            Value::Function(c) => write!(f, "[Function {}]", c.name),
            Value::NativeFunction(n) => write!(f, "[NativeFunction {}]", n.name),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl Value {
    /// Wraps a Rust function as a callable value.
    pub fn native<F>(name: &'static str, func: F) -> Self
    where
        F: Fn(Vec<Value>) -> NativeResult + 'static,
    {
        Value::NativeFunction(NativeFunction {
            name,
            func: Rc::new(func),
        })
    }

    /// Builds a table value from a named set of entries (used for `math`,
    /// `string`, ...).
    pub fn table_from<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, Value)>,
    {
        let mut table = LuaTable::new();
        for (name, value) in entries {
            table.set(TableKey::Str(name.to_string()), value);
        }
        Value::Table(Rc::new(RefCell::new(table)))
    }

    /// Builds a sequence table `{v1, v2, ...}`.
    pub fn sequence(values: Vec<Value>) -> Self {
        Value::Table(Rc::new(RefCell::new(LuaTable::from_sequence(values))))
    }

    /// Returns a stable type name string (useful for errors and `type()`).
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Nil => "nil",
            Value::Table(_) => "table",
            Value::Function(_) | Value::NativeFunction(_) => "function",
        }
    }

    /// Truthiness: everything except `false` and `nil`.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Bool(false) | Value::Nil)
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_) | Value::NativeFunction(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Rc<RefCell<LuaTable>>> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    /// `==` semantics: primitives by value, tables and functions by identity,
    /// different kinds never equal.
    pub fn equals(a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Number(x), Value::Number(y)) => x == y,
            (Value::String(x), Value::String(y)) => x == y,
            (Value::Bool(x), Value::Bool(y)) => x == y,
            (Value::Nil, Value::Nil) => true,
            (Value::Table(x), Value::Table(y)) => Rc::ptr_eq(x, y),
            (Value::Function(x), Value::Function(y)) => Rc::ptr_eq(x, y),
            (Value::NativeFunction(x), Value::NativeFunction(y)) => Rc::ptr_eq(&x.func, &y.func),
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        Value::equals(self, other)
    }
}

/* ============================================================================
 * Tables
 * ============================================================================
 */

/// Table key: integral number or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableKey {
    Int(i64),
    Str(String),
}

impl TableKey {
    /// Converts a runtime value into a key. Only integral numbers and strings
    /// are valid keys.
    pub fn from_value(value: &Value) -> LanadaResult<TableKey> {
        match value {
            Value::Number(n) if n.fract() == 0.0 && in_key_range(*n) => Ok(TableKey::Int(*n as i64)),
            Value::String(s) => Ok(TableKey::Str(s.clone())),
            other => Err(LanadaError::type_error(
                format!("invalid table key ({})", describe_key(other)),
                Default::default(),
            )),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            TableKey::Int(i) => Value::Number(*i as f64),
            TableKey::Str(s) => Value::String(s.clone()),
        }
    }
}

/// Integral floats `i64` holds exactly; larger magnitudes would saturate and
/// alias each other. `i64::MAX as f64` rounds up to 2^63, hence the `<`.
fn in_key_range(n: f64) -> bool {
    n >= i64::MIN as f64 && n < i64::MAX as f64
}

fn describe_key(value: &Value) -> String {
    match value {
        Value::Number(n) if n.is_nan() => "NaN".to_string(),
        Value::Number(n) if n.fract() == 0.0 => format!("number {} out of range", n),
        Value::Number(n) => format!("non-integer number {}", n),
        other => other.type_name().to_string(),
    }
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKey::Int(i) => write!(f, "{}", i),
            TableKey::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Insertion-ordered mapping from key to value.
///
/// Assigning `nil` removes the key.
#[derive(Debug, Clone, Default)]
pub struct LuaTable {
    order: Vec<TableKey>,
    values: HashMap<TableKey, Value>,
}

impl LuaTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sequence(values: Vec<Value>) -> Self {
        let mut table = Self::new();
        for (i, value) in values.into_iter().enumerate() {
            table.set(TableKey::Int(i as i64 + 1), value);
        }
        table
    }

    pub fn get(&self, key: &TableKey) -> Value {
        self.values.get(key).cloned().unwrap_or(Value::Nil)
    }

    pub fn get_str(&self, key: &str) -> Value {
        self.get(&TableKey::Str(key.to_string()))
    }

    pub fn set(&mut self, key: TableKey, value: Value) {
        if value.is_nil() {
            if self.values.remove(&key).is_some() {
                self.order.retain(|k| k != &key);
            }
            return;
        }

        if self.values.insert(key.clone(), value).is_none() {
            self.order.push(key);
        }
    }

    /// Length of the sequence part: the largest `n` such that keys `1..=n`
    /// are all present.
    pub fn len(&self) -> usize {
        let mut n = 0;
        while self.values.contains_key(&TableKey::Int(n as i64 + 1)) {
            n += 1;
        }
        n
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&TableKey, &Value)> {
        self.order
            .iter()
            .filter_map(move |k| self.values.get(k).map(|v| (k, v)))
    }

    /// Values `t[1] .. t[len]`.
    pub fn sequence_values(&self) -> Vec<Value> {
        (1..=self.len())
            .map(|i| self.get(&TableKey::Int(i as i64)))
            .collect()
    }

    /// Replaces `t[1] .. t[old len]` with `values`.
    ///
    /// Positions that survive keep their place in the iteration order; only
    /// positions past the old length are appended, and only positions past
    /// the new length are removed.
    pub fn replace_sequence(&mut self, values: Vec<Value>) {
        let old_len = self.len();
        let new_len = values.len();

        for (i, value) in values.into_iter().enumerate() {
            let key = TableKey::Int(i as i64 + 1);
            match self.values.get_mut(&key) {
                Some(slot) => *slot = value,
                None => {
                    self.values.insert(key.clone(), value);
                    self.order.push(key);
                }
            }
        }

        if old_len > new_len {
            for i in new_len + 1..=old_len {
                self.values.remove(&TableKey::Int(i as i64));
            }
            self.order.retain(|key| match key {
                TableKey::Int(i) => !(*i > new_len as i64 && *i <= old_len as i64),
                TableKey::Str(_) => true,
            });
        }
    }

    /// Drops every entry. Used to break closure reference cycles on teardown.
    pub fn clear(&mut self) {
        self.order.clear();
        self.values.clear();
    }
}
