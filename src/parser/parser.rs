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

use crate::ast::{Program, Stmt};
use crate::error::LanadaResult;
use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

/// The recursive-descent parser.
///
/// This structure maintains:
/// - The full token stream produced by the lexer
/// - The current cursor position into that stream
///
/// The grammar itself lives in extension modules (`statements`,
/// `expressions`, `helpers`) via additional `impl Parser` blocks.
pub struct Parser {
    /// Complete list of tokens to be parsed, terminated by `Eof`.
    pub tokens: Vec<Token>,

    /// Current cursor position within the token stream.
    pub current: usize,

    /// Open nesting levels (parenthesized/call/table expressions, blocks).
    pub depth: usize,
}

/// Deepest nesting the parser accepts. Bounds every later recursion over
/// the tree (evaluation, rendering, drop).
pub const MAX_NESTING: usize = 200;

/// Public entry point for the parsing phase.
///
/// # Pipeline
/// ```text
/// Source → Lexer → Tokens → Parser → Program → Interpreter
/// ```
///
/// # Example
/// ```rust
/// let tokens = lanada::lexer::tokenize("local x = 1 + 2").unwrap();
/// let program = lanada::parser::parse(tokens).unwrap();
/// assert_eq!(program.body.len(), 1);
/// ```
pub fn parse(tokens: Vec<Token>) -> LanadaResult<Program> {
    let mut parser = Parser::new(tokens);
    parser.parse()
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        // Hand-built streams may omit the terminator; the helpers rely on it.
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let span = tokens.last().map(|t| t.span).unwrap_or_else(|| Span::new(1, 0));
            tokens.push(Token::new(TokenKind::Eof, "", span));
        }

        Self {
            tokens,
            current: 0,
            depth: 0,
        }
    }

    /// Parses the entire token stream into a `Program`.
    ///
    /// Guarantees full token consumption: anything that does not start a
    /// statement aborts with a syntax error.
    pub fn parse(&mut self) -> LanadaResult<Program> {
        let mut body: Vec<Stmt> = Vec::new();

        while !self.is_at_end() {
            body.push(self.statement()?);
        }

        log::debug!("parsed {} top-level statement(s)", body.len());
        Ok(Program { body })
    }
}
