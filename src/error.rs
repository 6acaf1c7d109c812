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

use serde::Serialize;
use thiserror::Error;

use crate::span::Span;

/// Error taxonomy shared by the lexer, parser, evaluator and standard library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// The lexer or parser could not match the grammar.
    Syntax,

    /// Read of an unbound variable, or call of something that is not callable.
    Name,

    /// Operator or builtin applied to operands of the wrong kind.
    Type,

    /// `assert(false, ...)`
    Assertion,

    /// `error(...)`
    User,

    /// Step budget, call depth or host cancellation.
    Limit,
}

impl ErrorKind {
    /// Stable error code used by diagnostics.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Syntax => "E_SYNTAX",
            ErrorKind::Name => "E_NAME",
            ErrorKind::Type => "E_TYPE",
            ErrorKind::Assertion => "E_ASSERT",
            ErrorKind::User => "E_USER",
            ErrorKind::Limit => "E_LIMIT",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::Name => "NameError",
            ErrorKind::Type => "TypeError",
            ErrorKind::Assertion => "AssertionError",
            ErrorKind::User => "UserError",
            ErrorKind::Limit => "LimitError",
        }
    }
}

#[derive(Debug, Clone, Error, Serialize)]
#[error("{message}")]
pub struct LanadaError {
    pub kind: ErrorKind,

    /// Stable error code (E_SYNTAX, E_NAME, …)
    pub code: &'static str,

    /// Human-readable error message
    pub message: String,

    /// Primary source location
    pub span: Span,

    /// Optional note / help text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

pub type LanadaResult<T> = Result<T, LanadaError>;

impl LanadaError {
    /// Generic constructor
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            code: kind.code(),
            message: message.into(),
            span,
            help: None,
        }
    }

    pub fn syntax_error(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Syntax, message, span)
    }

    pub fn name_error(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Name, message, span)
    }

    pub fn type_error(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Type, message, span)
    }

    pub fn assertion_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Assertion, message, Span::default())
    }

    pub fn user_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::User, message, Span::default())
    }

    pub fn limit_error(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Limit, message, span)
    }

    /// Attach a help message to the error (builder-style).
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Native functions raise errors without a location; the call site
    /// fills it in.
    pub fn or_at(mut self, span: Span) -> Self {
        if self.span.is_unknown() {
            self.span = span;
        }
        self
    }
}
