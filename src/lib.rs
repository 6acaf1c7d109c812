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

//! Lanada: a small Lua-flavored scripting language, interpreted straight
//! from source.
//!
//! The pipeline is `lexer` → `parser` → `interpreter`, with the builtin
//! library in `prototypes`. [`run`] wires the stages together and reports
//! any failure as a single `Error: <message>` line on the output sink.
//!
//! ```
//! let lines = lanada::run_captured("local n = 1\nfunction f() return n end\nn = 2\nprint(f())");
//! assert_eq!(lines, vec!["2"]);
//! ```

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod prototypes;
pub mod span;
pub mod stack;
pub mod value;

use std::cell::RefCell;
use std::rc::Rc;

pub use config::Config;
pub use error::{ErrorKind, LanadaError, LanadaResult};
pub use interpreter::{output_sink, Interpreter, OutputSink};
pub use value::Value;

/// Runs `source` with default limits, sending `print` output and any
/// diagnostic to `output`. Never fails past this boundary.
pub fn run<F>(source: &str, output: F)
where
    F: FnMut(&str) + 'static,
{
    run_with_config(source, Config::default(), output)
}

/// [`run`] with explicit runtime limits.
pub fn run_with_config<F>(source: &str, config: Config, output: F)
where
    F: FnMut(&str) + 'static,
{
    let sink = output_sink(output);
    let mut interpreter = Interpreter::new(config, sink.clone());

    if let Err(err) = execute(source, &mut interpreter) {
        let line = format!("Error: {}", err.message);
        let mut sink = sink.borrow_mut();
        (*sink)(&line);
    }
}

/// Runs `source` and collects every line delivered to the output sink.
pub fn run_captured(source: &str) -> Vec<String> {
    let lines = Rc::new(RefCell::new(Vec::new()));
    let collector = lines.clone();

    run(source, move |line| collector.borrow_mut().push(line.to_string()));

    let captured = lines.borrow().clone();
    captured
}

/// Tokenizes, parses and evaluates `source` in an existing interpreter.
///
/// Returns the value of a top-level `return`, if one ran. Errors are
/// returned rather than printed so hosts can render them as they like.
pub fn execute(source: &str, interpreter: &mut Interpreter) -> LanadaResult<Option<Value>> {
    let tokens = lexer::tokenize(source)?;
    log::debug!("lexed {} token(s)", tokens.len());

    let program = parser::parse(tokens)?;

    interpreter.execute(&program)
}
