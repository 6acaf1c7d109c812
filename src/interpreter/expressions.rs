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

use crate::ast::{BinaryOp, Expr, TableKey as KeyExpr};
use crate::error::{LanadaError, LanadaResult};
use crate::interpreter::display::value_to_string;
use crate::interpreter::environment::Environment;
use crate::interpreter::helpers::check_string_len;
use crate::interpreter::Interpreter;
use crate::span::Span;
use crate::stack;
use crate::value::{LuaTable, TableKey, Value};

impl Interpreter {
    /// Evaluates a single expression and returns its runtime value.
    ///
    /// This is the **core expression dispatcher**; every expression passes
    /// through here depth-first, left operand before right.
    pub fn eval_expr(
        &mut self,
        expr: &Expr,
        env: &Rc<RefCell<Environment>>,
    ) -> LanadaResult<Value> {
        stack::guarded(|| self.eval_expr_unguarded(expr, env))
    }

    fn eval_expr_unguarded(
        &mut self,
        expr: &Expr,
        env: &Rc<RefCell<Environment>>,
    ) -> LanadaResult<Value> {
        match expr {
            // ---------------------------------------------------------------------
            // Literal Values
            // ---------------------------------------------------------------------
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::String(s) => Ok(Value::String(s.clone())),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Nil => Ok(Value::Nil),

            // ---------------------------------------------------------------------
            // Identifier Lookup
            // ---------------------------------------------------------------------
            Expr::Var { name, span } => env.borrow().get(name).ok_or_else(|| {
                LanadaError::name_error(format!("Undefined variable: {}", name), *span)
            }),

            // ---------------------------------------------------------------------
            // Binary Operators (both operands evaluated eagerly)
            // ---------------------------------------------------------------------
            Expr::Binary {
                op,
                left,
                right,
                span,
            } => {
                let l = self.eval_expr(left, env)?;
                let r = self.eval_expr(right, env)?;
                binary(*op, l, r, *span)
            }

            Expr::Call { callee, args, span } => self.eval_call(callee, args, *span, env),

            // ---------------------------------------------------------------------
            // Table Access
            // ---------------------------------------------------------------------
            Expr::Field { object, name, span } => {
                let target = self.eval_expr(object, env)?;
                index(&target, &TableKey::Str(name.clone()), *span)
            }

            Expr::Index { object, key, span } => {
                let target = self.eval_expr(object, env)?;
                let key = self.eval_expr(key, env)?;
                let key = TableKey::from_value(&key).map_err(|e| e.or_at(*span))?;
                index(&target, &key, *span)
            }

            // ---------------------------------------------------------------------
            // Table Constructor
            // ---------------------------------------------------------------------
            Expr::Table { entries } => {
                let mut table = LuaTable::new();

                for entry in entries {
                    let key = match &entry.key {
                        KeyExpr::Positional(i) => TableKey::Int(*i as i64),
                        KeyExpr::Named(name) => TableKey::Str(name.clone()),
                        KeyExpr::Computed(expr) => {
                            let key = self.eval_expr(expr, env)?;
                            TableKey::from_value(&key)?
                        }
                    };
                    let value = self.eval_expr(&entry.value, env)?;

                    // Later entries win on key collisions.
                    table.set(key, value);
                }

                Ok(Value::Table(Rc::new(RefCell::new(table))))
            }
        }
    }
}

/// Reads `target[key]`; absent keys read as nil.
fn index(target: &Value, key: &TableKey, span: Span) -> LanadaResult<Value> {
    match target {
        Value::Table(table) => Ok(table.borrow().get(key)),
        other => Err(LanadaError::type_error(
            format!("attempt to index a {} value (key '{}')", other.type_name(), key),
            span,
        )),
    }
}

/// Applies a binary operator to two evaluated operands.
pub fn binary(op: BinaryOp, l: Value, r: Value, span: Span) -> LanadaResult<Value> {
    if op.is_arithmetic() {
        return arithmetic(op, &l, &r, span);
    }

    match op {
        BinaryOp::Concat => {
            let mut out = value_to_string(&l);
            let right = value_to_string(&r);
            check_string_len(out.len().checked_add(right.len())).map_err(|e| e.or_at(span))?;
            out.push_str(&right);
            Ok(Value::String(out))
        }

        BinaryOp::Eq => Ok(Value::Bool(Value::equals(&l, &r))),

        BinaryOp::Gt | BinaryOp::Lt | BinaryOp::Ge | BinaryOp::Le => {
            let ordering = match (&l, &r) {
                (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
                (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
                _ => {
                    return Err(LanadaError::type_error(
                        format!("attempt to compare {} with {}", l.type_name(), r.type_name()),
                        span,
                    ))
                }
            };

            // NaN compares false against everything.
            let Some(ordering) = ordering else {
                return Ok(Value::Bool(false));
            };

            let result = match op {
                BinaryOp::Gt => ordering.is_gt(),
                BinaryOp::Lt => ordering.is_lt(),
                BinaryOp::Ge => ordering.is_ge(),
                _ => ordering.is_le(),
            };
            Ok(Value::Bool(result))
        }

        _ => unreachable!("arithmetic operators handled above"),
    }
}

fn arithmetic(op: BinaryOp, l: &Value, r: &Value, span: Span) -> LanadaResult<Value> {
    let (a, b) = match (l, r) {
        (Value::Number(a), Value::Number(b)) => (*a, *b),
        (Value::Number(_), other) | (other, _) => {
            return Err(LanadaError::type_error(
                format!(
                    "attempt to perform arithmetic ({}) on a {} value",
                    op,
                    other.type_name()
                ),
                span,
            ))
        }
    };

    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::Pow => a.powf(b),
        _ => unreachable!("non-arithmetic operator {}", op),
    };

    Ok(Value::Number(result))
}
