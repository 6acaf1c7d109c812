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

pub mod calls;
mod collector;
pub mod display;
pub mod environment;
pub mod expressions;
pub mod helpers;
pub mod statements;

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::ast::Program;
use crate::config::Config;
use crate::error::{LanadaError, LanadaResult};
use crate::interpreter::environment::Environment;
use crate::span::Span;
use crate::value::Value;

pub use statements::ExecSignal;

/// Host output callback. `print` is the only thing that writes to it while a
/// script runs.
pub type OutputSink = Rc<RefCell<dyn FnMut(&str)>>;

/// Wraps a closure as an `OutputSink`.
pub fn output_sink<F>(output: F) -> OutputSink
where
    F: FnMut(&str) + 'static,
{
    Rc::new(RefCell::new(output))
}

/// Tree-walking evaluator.
///
/// Owns the global frame (seeded with the standard library on construction)
/// and the per-run bookkeeping: step counter, call depth and the optional
/// host cancellation flag. Strictly single-threaded; hosts that need
/// parallel runs create one interpreter per run.
pub struct Interpreter {
    globals: Rc<RefCell<Environment>>,
    config: Config,
    steps: u64,
    call_depth: usize,
    cancel_flag: Option<Arc<AtomicBool>>,

    /// Non-global frames captured by closures. Swept by the collector once
    /// `next_collection` of them accumulate and after every `execute`;
    /// cleared on drop.
    captured_frames: Vec<Weak<RefCell<Environment>>>,
    next_collection: usize,
}

impl Interpreter {
    pub fn new(config: Config, output: OutputSink) -> Self {
        let globals = Rc::new(RefCell::new(Environment::new(None)));
        crate::prototypes::install(&globals, output, &config);

        Self {
            globals,
            config,
            steps: 0,
            call_depth: 0,
            cancel_flag: None,
            captured_frames: Vec::new(),
            next_collection: collector::COLLECTION_THRESHOLD,
        }
    }

    /// Interpreter with default limits writing `print` output to `output`.
    pub fn with_output<F>(output: F) -> Self
    where
        F: FnMut(&str) + 'static,
    {
        Self::new(Config::default(), output_sink(output))
    }

    /// Installs a flag the host may set from any thread to stop the script
    /// at the next statement boundary.
    pub fn set_cancel_flag(&mut self, flag: Arc<AtomicBool>) {
        self.cancel_flag = Some(flag);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn globals(&self) -> Rc<RefCell<Environment>> {
        self.globals.clone()
    }

    pub fn get_global(&self, name: &str) -> Option<Value> {
        self.globals.borrow().get_local(name)
    }

    /// Number of statements executed by the most recent `execute`.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Runs a parsed program in the global frame.
    ///
    /// Returns the value of a top-level `return`, which halts the program.
    pub fn execute(&mut self, program: &Program) -> LanadaResult<Option<Value>> {
        self.steps = 0;
        self.call_depth = 0;

        let globals = self.globals.clone();
        let signal = self.exec_block(&program.body, &globals);
        self.collect_frames();

        log::debug!("executed {} statement(s)", self.steps);
        if let Err(err) = &signal {
            if err.kind == crate::error::ErrorKind::Limit {
                log::warn!("run aborted: {}", err.message);
            }
        }

        match signal? {
            ExecSignal::Continue => Ok(None),
            ExecSignal::Return(value) => Ok(Some(value)),
        }
    }

    /// Statement-boundary guard: host cancellation and the step budget.
    pub(crate) fn tick(&mut self, span: Span) -> LanadaResult<()> {
        self.steps += 1;

        if let Some(flag) = &self.cancel_flag {
            if flag.load(Ordering::Relaxed) {
                return Err(LanadaError::limit_error("execution cancelled", span));
            }
        }

        if let Some(limit) = self.config.step_limit {
            if self.steps > limit {
                return Err(LanadaError::limit_error(
                    format!("step limit exceeded ({} statements)", limit),
                    span,
                )
                .with_help("raise `step_limit` in the configuration"));
            }
        }

        Ok(())
    }

    pub(crate) fn remember_captured_frame(&mut self, frame: &Rc<RefCell<Environment>>) {
        if Rc::ptr_eq(frame, &self.globals) {
            return;
        }
        if self.captured_frames.len() >= self.next_collection {
            self.collect_frames();
        }
        self.captured_frames.push(Rc::downgrade(frame));
    }
}

impl Drop for Interpreter {
    fn drop(&mut self) {
        for weak in self.captured_frames.drain(..) {
            if let Some(frame) = weak.upgrade() {
                frame.borrow_mut().clear();
            }
        }
        self.globals.borrow_mut().clear();
    }
}
