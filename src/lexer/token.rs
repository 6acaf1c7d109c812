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

use crate::span::Span;
use std::fmt;

/// Represents the **category of a lexical token** in LANADA.
///
/// `TokenKind` identifies how a sequence of characters from the source
/// code should be interpreted by the parser.
///
/// # Pipeline Role
/// ```text
/// Source Code → Lexer → TokenKind → Parser → AST
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A numeric literal: `42`, `3.14`
    Number,

    /// A double-quoted string literal. The lexeme holds the text between the
    /// quotes.
    String,

    /// A user-defined name.
    Identifier,

    /// A reserved word (`local`, `function`, `if`, ...).
    ///
    /// Keyword detection is handled by `keywords.rs`.
    Keyword,

    /// An operator or punctuation character: `+`, `==`, `..`, `{`, ...
    Symbol,

    /// End of input. Always the last token in the stream.
    Eof,
}

/// Represents a **single lexical token** produced by the lexer.
///
/// # Example Tokens
/// ```text
/// local  →  { kind: Keyword,    lexeme: "local", span: 1:0 }
/// age    →  { kind: Identifier, lexeme: "age",   span: 1:6 }
/// 42     →  { kind: Number,     lexeme: "42",    span: 1:12 }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,

    /// The source text that produced this token (string tokens drop their
    /// quotes).
    pub lexeme: String,

    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    pub fn is_symbol(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Symbol && self.lexeme == symbol
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.lexeme == keyword
    }
}

impl fmt::Display for Token {
    /// Formats a token for **user-facing output**.
    ///
    /// Prints only what the user wrote, so parse errors read
    /// `Unexpected token: )` rather than a struct dump. End of input renders
    /// as `<eof>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "<eof>"),
            TokenKind::String => write!(f, "\"{}\"", self.lexeme),
            _ => write!(f, "{}", self.lexeme),
        }
    }
}
