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

/*!
 * Statement Executor
 * ------------------
 *
 * Executes statements and statement sequences. Expressions are evaluated by
 * `expressions.rs`; function invocation lives in `calls.rs`.
 *
 * Every sequence (program, function body, if branch) checks the signal of
 * each statement and stops at the first `Return`, handing it upward until a
 * call boundary consumes it.
 */

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::Stmt;
use crate::error::{LanadaError, LanadaResult};
use crate::interpreter::environment::Environment;
use crate::interpreter::Interpreter;
use crate::stack;
use crate::value::{Closure, TableKey, Value};

/* ============================================================================
 * Execution Control Signals
 * ============================================================================
 */

/// Internal control flow signal used by the interpreter.
#[derive(Debug)]
pub enum ExecSignal {
    /// Normal fall-through execution.
    Continue,

    /// `return` in flight, carrying its value.
    Return(Value),
}

impl Interpreter {
    /// Executes a statement sequence, short-circuiting on `Return`.
    pub fn exec_block(
        &mut self,
        stmts: &[Stmt],
        env: &Rc<RefCell<Environment>>,
    ) -> LanadaResult<ExecSignal> {
        for stmt in stmts {
            match self.exec_stmt(stmt, env)? {
                ExecSignal::Continue => {}
                signal @ ExecSignal::Return(_) => return Ok(signal),
            }
        }

        Ok(ExecSignal::Continue)
    }

    /// Executes a single statement inside the given environment.
    pub fn exec_stmt(
        &mut self,
        stmt: &Stmt,
        env: &Rc<RefCell<Environment>>,
    ) -> LanadaResult<ExecSignal> {
        stack::guarded(|| self.exec_stmt_unguarded(stmt, env))
    }

    fn exec_stmt_unguarded(
        &mut self,
        stmt: &Stmt,
        env: &Rc<RefCell<Environment>>,
    ) -> LanadaResult<ExecSignal> {
        self.tick(stmt.span())?;

        match stmt {
            /* ------------------------------------------------------------------
             * Bindings
             * ---------------------------------------------------------------- */
            Stmt::Local { name, value, .. } => {
                let value = self.eval_expr(value, env)?;
                env.borrow_mut().define(name.clone(), value);
                Ok(ExecSignal::Continue)
            }

            Stmt::Assign { name, value, span } => {
                let value = self.eval_expr(value, env)?;

                let updated = env.borrow_mut().assign(name, value.clone());
                if !updated {
                    // Implicit globals are only created by top-level code,
                    // never from inside a function body.
                    if self.call_depth > 0 {
                        return Err(LanadaError::name_error(
                            format!("Cannot assign to undeclared variable: {}", name),
                            *span,
                        )
                        .with_help(format!("declare it first with 'local {} = ...'", name)));
                    }
                    self.globals.borrow_mut().define(name.clone(), value);
                }

                Ok(ExecSignal::Continue)
            }

            Stmt::SetIndex {
                object,
                key,
                value,
                span,
            } => {
                let target = self.eval_expr(object, env)?;
                let key = self.eval_expr(key, env)?;
                let value = self.eval_expr(value, env)?;

                let table = match target {
                    Value::Table(table) => table,
                    other => {
                        return Err(LanadaError::type_error(
                            format!("attempt to index a {} value", other.type_name()),
                            *span,
                        ))
                    }
                };

                let key = TableKey::from_value(&key).map_err(|e| e.or_at(*span))?;
                table.borrow_mut().set(key, value);
                Ok(ExecSignal::Continue)
            }

            /* ------------------------------------------------------------------
             * Functions
             * ---------------------------------------------------------------- */
            Stmt::Function {
                name, params, body, ..
            } => {
                let closure = Closure {
                    name: name.clone(),
                    params: params.clone(),
                    body: body.clone(),
                    env: env.clone(),
                };

                self.remember_captured_frame(env);
                env.borrow_mut()
                    .define(name.clone(), Value::Function(Rc::new(closure)));
                Ok(ExecSignal::Continue)
            }

            Stmt::Return { value, .. } => {
                let value = self.eval_expr(value, env)?;
                Ok(ExecSignal::Return(value))
            }

            Stmt::Call(call) => {
                self.eval_expr(call, env)?;
                Ok(ExecSignal::Continue)
            }

            /* ------------------------------------------------------------------
             * If / Else
             * ---------------------------------------------------------------- */
            Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                let branch = if self.eval_expr(condition, env)?.is_truthy() {
                    then_branch
                } else {
                    else_branch
                };

                // The branch frame is dropped on every exit path, including
                // an in-flight return or an error.
                let frame = Environment::child(env);
                self.exec_block(branch, &frame)
            }
        }
    }
}
