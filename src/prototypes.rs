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

//! Standard library surface.
//!
//! Every builtin is an ordinary `Value` bound in the global frame before any
//! user code runs; the evaluator has no special dispatch for them.

pub mod globals;
pub mod math;
pub mod os;
pub mod string;
pub mod table;

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::Config;
use crate::interpreter::environment::Environment;
use crate::interpreter::OutputSink;

/// Seeds `env` (the global frame) with the builtin functions and the
/// `math`, `string`, `table` and `os` tables.
pub fn install(env: &Rc<RefCell<Environment>>, output: OutputSink, config: &Config) {
    let mut env = env.borrow_mut();

    for (name, value) in globals::create_global_functions(output) {
        env.define(name.to_string(), value);
    }

    env.define("math".to_string(), math::create_global_math_value(config.random_seed));
    env.define("string".to_string(), string::create_global_string_value());
    env.define("table".to_string(), table::create_global_table_value());
    env.define("os".to_string(), os::create_global_os_value());

    log::debug!("standard library installed");
}
