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

use std::fmt::Write;

use serde::Serialize;

use crate::error::LanadaError;
use crate::span::Span;

/// Renders compiler-style diagnostics for Lanada errors.
///
/// This printer:
/// - Formats errors with file/line/column information
/// - Displays the offending source line
/// - Highlights the error position using a caret (`^`)
/// - Optionally shows a follow-up hint
///
/// The layout follows `rustc` diagnostics and stays readable without color.
pub struct DiagnosticPrinter {
    /// Full source text of the script being interpreted.
    source: String,

    /// Display name of the script (e.g. `main.lua`).
    file_name: String,
}

/// Machine-readable form used by `--error-format json`.
#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    file: &'a str,
    name: &'static str,
    #[serde(flatten)]
    error: &'a LanadaError,
}

impl DiagnosticPrinter {
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
        }
    }

    /// Renders the diagnostic as text.
    ///
    /// # Output Example
    /// ```text
    /// error[E_TYPE]: attempt to perform arithmetic (+) on a string value
    ///   --> example.lua:3:10
    ///    |
    ///  3 | local x = "a" + 1
    ///    |               ^
    /// ```
    ///
    /// Errors without a known location (line 0) print only the header.
    pub fn render(&self, error: &LanadaError) -> String {
        let mut out = String::new();
        let Span { line, column } = error.span;

        let _ = writeln!(out, "error[{}]: {}", error.code, error.message);

        if error.span.is_unknown() {
            let _ = writeln!(out, "  --> {}", self.file_name);
        } else {
            let src_line = self
                .source
                .lines()
                .nth(line.saturating_sub(1))
                .unwrap_or("");

            let _ = writeln!(out, "  --> {}:{}:{}", self.file_name, line, column + 1);
            let _ = writeln!(out, "   |");
            let _ = writeln!(out, "{:>3} | {}", line, src_line);
            let _ = writeln!(out, "   | {}^", " ".repeat(column));
        }

        if let Some(help) = &error.help {
            let _ = writeln!(out, "\nhelp: {}", help);
        }

        out
    }

    /// Prints the rendered diagnostic to stderr.
    pub fn print(&self, error: &LanadaError) {
        eprint!("{}", self.render(error));
    }

    /// Serializes the error as a single JSON object.
    pub fn render_json(&self, error: &LanadaError) -> String {
        let diagnostic = JsonDiagnostic {
            file: &self.file_name,
            name: error.kind.name(),
            error,
        };
        serde_json::to_string(&diagnostic).unwrap_or_else(|e| {
            format!("{{\"code\":\"{}\",\"message\":\"unserializable error: {}\"}}", error.code, e)
        })
    }
}
