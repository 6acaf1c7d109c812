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

use crate::ast::Expr;
use crate::error::{LanadaError, LanadaResult};
use crate::interpreter::environment::Environment;
use crate::interpreter::{ExecSignal, Interpreter};
use crate::span::Span;
use crate::value::{Closure, Value};

impl Interpreter {
    /// Evaluates a call expression.
    ///
    /// The callee is resolved first and must be callable; the arguments are
    /// then evaluated left to right and the call dispatched.
    pub fn eval_call(
        &mut self,
        callee: &Expr,
        args: &[Expr],
        span: Span,
        env: &Rc<RefCell<Environment>>,
    ) -> LanadaResult<Value> {
        let function = self.eval_expr(callee, env)?;

        if !function.is_callable() {
            return Err(LanadaError::name_error(
                format!(
                    "attempt to call a {} value ({})",
                    function.type_name(),
                    callee.describe()
                ),
                span,
            ));
        }

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_expr(arg, env)?);
        }

        self.call_value(function, values, span)
    }

    /// Invokes a callable value with already-evaluated arguments.
    pub fn call_value(&mut self, function: Value, args: Vec<Value>, span: Span) -> LanadaResult<Value> {
        match function {
            Value::Function(closure) => self.call_closure(&closure, args, span),

            // Host callables run directly, without a script-visible frame.
            Value::NativeFunction(native) => native.call(args).map_err(|e| e.or_at(span)),

            other => Err(LanadaError::name_error(
                format!("attempt to call a {} value", other.type_name()),
                span,
            )),
        }
    }

    /// Executes a user-defined function.
    ///
    /// Pushes exactly one frame whose parent is the closure's captured chain,
    /// binds parameters positionally (missing ones are nil, extra arguments
    /// are dropped) and consumes the body's `Return` signal.
    pub fn call_closure(
        &mut self,
        closure: &Rc<Closure>,
        args: Vec<Value>,
        span: Span,
    ) -> LanadaResult<Value> {
        if self.call_depth >= self.config.max_call_depth {
            return Err(LanadaError::limit_error(
                format!(
                    "stack overflow (more than {} nested calls)",
                    self.config.max_call_depth
                ),
                span,
            )
            .with_help("raise `max_call_depth` in the configuration"));
        }

        log::trace!("call {}({} arg(s))", closure.name, args.len());

        let frame = Environment::child(&closure.env);
        {
            let mut frame = frame.borrow_mut();
            let mut args = args.into_iter();
            for param in &closure.params {
                frame.define(param.clone(), args.next().unwrap_or(Value::Nil));
            }
        }

        self.call_depth += 1;
        let result = self.exec_block(&closure.body, &frame);
        self.call_depth -= 1;

        match result? {
            ExecSignal::Return(value) => Ok(value),
            ExecSignal::Continue => Ok(Value::Nil),
        }
    }
}
