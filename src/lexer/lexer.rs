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
use crate::lexer::keywords::is_keyword;
use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

/// Converts raw source text into an ordered token stream.
///
/// Line comments (`--` to end of line) and whitespace are dropped.
/// Characters outside the token grammar are skipped. The only failure is an
/// unterminated string literal.
pub fn tokenize(source: &str) -> LanadaResult<Vec<Token>> {
    let mut lexer = Lexer::new(source);
    lexer.scan_tokens()?;
    Ok(lexer.tokens)
}

pub struct Lexer {
    chars: Vec<char>,
    start: usize,
    current: usize,
    line: usize,
    line_start: usize,
    pub tokens: Vec<Token>,
}

impl Lexer {
    /// Creates a new lexer positioned at the first character of `source`.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            start: 0,
            current: 0,
            line: 1,
            line_start: 0,
            tokens: Vec::new(),
        }
    }

    /// Performs complete lexical analysis over the entire source input.
    ///
    /// Results are written into `self.tokens`, always terminated by a single
    /// `TokenKind::Eof` marker.
    pub fn scan_tokens(&mut self) -> LanadaResult<()> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token()?;
        }

        self.start = self.current;
        let span = self.span();
        self.tokens.push(Token::new(TokenKind::Eof, "", span));
        Ok(())
    }

    /// Scans and emits a single token from the source stream.
    ///
    /// Two-character operators (`==`, `>=`, `<=`, `..`) are tried before
    /// their one-character prefixes.
    fn scan_token(&mut self) -> LanadaResult<()> {
        let ch = self.advance();

        match ch {
            ' ' | '\r' | '\t' => {}
            '\n' => self.newline(),

            '-' => {
                if self.match_char('-') {
                    self.line_comment();
                } else {
                    self.symbol("-");
                }
            }

            '=' => {
                if self.match_char('=') {
                    self.symbol("==");
                } else {
                    self.symbol("=");
                }
            }

            '>' => {
                if self.match_char('=') {
                    self.symbol(">=");
                } else {
                    self.symbol(">");
                }
            }

            '<' => {
                if self.match_char('=') {
                    self.symbol("<=");
                } else {
                    self.symbol("<");
                }
            }

            '.' => {
                if self.match_char('.') {
                    self.symbol("..");
                } else {
                    self.symbol(".");
                }
            }

            '{' | '}' | '(' | ')' | '[' | ']' | ',' | '+' | '*' | '/' | '^' => {
                self.symbol(&ch.to_string());
            }

            '"' => self.string()?,

            '0'..='9' => self.number(),

            'a'..='z' | 'A'..='Z' | '_' => self.identifier(),

            // Anything else is outside the grammar and dropped.
            _ => {}
        }

        Ok(())
    }

    fn line_comment(&mut self) {
        while self.peek() != '\n' && !self.is_at_end() {
            self.advance();
        }
    }

    fn string(&mut self) -> LanadaResult<()> {
        let span = self.span();

        while self.peek() != '"' && !self.is_at_end() {
            if self.advance() == '\n' {
                self.newline();
            }
        }

        if self.is_at_end() {
            return Err(LanadaError::syntax_error("Unterminated string", span)
                .with_help("close the literal with a matching '\"'"));
        }

        // closing quote
        self.advance();

        let value: String = self.chars[self.start + 1..self.current - 1].iter().collect();
        self.tokens.push(Token::new(TokenKind::String, value, span));
        Ok(())
    }

    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance();
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        self.push(TokenKind::Number);
    }

    fn identifier(&mut self) {
        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let text: String = self.chars[self.start..self.current].iter().collect();
        let kind = if is_keyword(&text) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };

        let span = self.span();
        self.tokens.push(Token::new(kind, text, span));
    }

    fn symbol(&mut self, lexeme: &str) {
        let span = self.span();
        self.tokens.push(Token::new(TokenKind::Symbol, lexeme, span));
    }

    fn push(&mut self, kind: TokenKind) {
        let text: String = self.chars[self.start..self.current].iter().collect();
        let span = self.span();
        self.tokens.push(Token::new(kind, text, span));
    }

    /// Span of the token currently being scanned.
    fn span(&self) -> Span {
        Span::new(self.line, self.start.saturating_sub(self.line_start))
    }

    fn newline(&mut self) {
        self.line += 1;
        self.line_start = self.current;
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.chars[self.current] != expected {
            return false;
        }
        self.current += 1;
        true
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.current];
        self.current += 1;
        ch
    }

    fn peek(&self) -> char {
        self.chars.get(self.current).copied().unwrap_or('\0')
    }

    fn peek_next(&self) -> char {
        self.chars.get(self.current + 1).copied().unwrap_or('\0')
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }
}
