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

use crate::error::{LanadaError, LanadaResult};
use crate::lexer::token::{Token, TokenKind};
use crate::parser::parser::{Parser, MAX_NESTING};
use crate::span::Span;
use crate::stack;

impl Parser {
    /// Returns the current token without consuming it.
    pub fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    /// Returns the token after the current one (`Eof` past the end).
    pub fn peek_next(&self) -> &Token {
        let index = (self.current + 1).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    /// Advances one token forward, returning the consumed token.
    ///
    /// Never moves past `Eof`.
    pub fn advance(&mut self) -> Token {
        let token = self.tokens[self.current].clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    /// Returns true if the parser is at EOF.
    pub fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    pub fn current_span(&self) -> Span {
        self.peek().span
    }

    /// Checks if the current token is the given symbol.
    pub fn check_symbol(&self, symbol: &str) -> bool {
        self.peek().is_symbol(symbol)
    }

    /// Matches a symbol and consumes it if present.
    pub fn match_symbol(&mut self, symbol: &str) -> bool {
        if self.check_symbol(symbol) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a required symbol or fails with a syntax error.
    pub fn consume_symbol(&mut self, symbol: &str) -> LanadaResult<Token> {
        if self.check_symbol(symbol) {
            Ok(self.advance())
        } else {
            Err(self.expected(symbol))
        }
    }

    /// Checks for a keyword without consuming it.
    pub fn check_keyword(&self, keyword: &str) -> bool {
        self.peek().is_keyword(keyword)
    }

    /// Matches a keyword and consumes it if present.
    pub fn match_keyword(&mut self, keyword: &str) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a required keyword or fails with a syntax error.
    pub fn consume_keyword(&mut self, keyword: &str) -> LanadaResult<Token> {
        if self.check_keyword(keyword) {
            Ok(self.advance())
        } else {
            Err(self.expected(keyword))
        }
    }

    /// Consumes and returns an identifier.
    pub fn consume_identifier(&mut self) -> LanadaResult<(String, Span)> {
        if self.peek().kind == TokenKind::Identifier {
            let token = self.advance();
            Ok((token.lexeme, token.span))
        } else {
            Err(self.expected("identifier"))
        }
    }

    /// True when the current token closes a block.
    pub fn at_block_end(&self) -> bool {
        self.is_at_end()
            || self.check_keyword("end")
            || self.check_keyword("else")
            || self.check_keyword("elseif")
    }

    /// Runs one nested production, failing once more than `MAX_NESTING`
    /// levels are open. `what` names the construct in the error.
    pub fn nested<T>(
        &mut self,
        what: &str,
        production: impl FnOnce(&mut Self) -> LanadaResult<T>,
    ) -> LanadaResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(LanadaError::syntax_error(
                format!("{} nested too deeply (limit {})", what, MAX_NESTING),
                self.current_span(),
            ));
        }

        self.depth += 1;
        let result = stack::guarded(|| production(self));
        self.depth -= 1;
        result
    }

    /// `Expected '<what>' but got '<token>'` at the current token.
    pub fn expected(&self, what: &str) -> LanadaError {
        let token = self.peek();
        LanadaError::syntax_error(
            format!("Expected '{}' but got '{}'", what, token),
            token.span,
        )
    }
}
