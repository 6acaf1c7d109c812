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

/*!
 * Expression grammar.
 *
 * Precedence, lowest binding first; every binary level is left-associative:
 *
 *   comparison  → additive ( ( "==" | ">" | "<" | ">=" | "<=" | ".." ) additive )*
 *   additive    → multiplicative ( ( "+" | "-" ) multiplicative )*
 *   multiplicative → power ( ( "*" | "/" ) power )*
 *   power       → postfix ( "^" postfix )*
 *   postfix     → primary ( "(" args ")" | "." name | "[" expr "]" )*
 *   primary     → number | string | true | false | nil | table | name | "(" expr ")"
 */

use crate::ast::{BinaryOp, Expr, TableEntry, TableKey};
use crate::error::{LanadaError, LanadaResult};
use crate::lexer::token::TokenKind;
use crate::parser::parser::Parser;

const COMPARISON_OPS: &[&str] = &["==", ">", "<", ">=", "<=", ".."];
const ADDITIVE_OPS: &[&str] = &["+", "-"];
const MULTIPLICATIVE_OPS: &[&str] = &["*", "/"];
const POWER_OPS: &[&str] = &["^"];

impl Parser {
    /// expression → comparison
    pub fn expression(&mut self) -> LanadaResult<Expr> {
        self.nested("expression", Self::comparison)
    }

    fn comparison(&mut self) -> LanadaResult<Expr> {
        self.binary_level(COMPARISON_OPS, Self::additive)
    }

    fn additive(&mut self) -> LanadaResult<Expr> {
        self.binary_level(ADDITIVE_OPS, Self::multiplicative)
    }

    fn multiplicative(&mut self) -> LanadaResult<Expr> {
        self.binary_level(MULTIPLICATIVE_OPS, Self::power)
    }

    fn power(&mut self) -> LanadaResult<Expr> {
        self.binary_level(POWER_OPS, Self::postfix)
    }

    /// One left-associative precedence level: `next ( op next )*`.
    fn binary_level(
        &mut self,
        operators: &[&str],
        next: fn(&mut Self) -> LanadaResult<Expr>,
    ) -> LanadaResult<Expr> {
        let mut expr = next(self)?;

        loop {
            let token = self.peek();
            if token.kind != TokenKind::Symbol || !operators.contains(&token.lexeme.as_str()) {
                break;
            }

            let token = self.advance();
            let op = BinaryOp::from_symbol(&token.lexeme).ok_or_else(|| {
                LanadaError::syntax_error(format!("Unknown operator: {}", token), token.span)
            })?;
            let right = next(self)?;

            expr = Expr::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
                span: token.span,
            };
        }

        Ok(expr)
    }

    /// postfix → primary ( call | field | index )*
    pub fn postfix(&mut self) -> LanadaResult<Expr> {
        let mut expr = self.primary()?;

        loop {
            if self.check_symbol("(") {
                let span = self.advance().span;
                let args = self.arguments()?;
                expr = Expr::Call {
                    callee: Box::new(expr),
                    args,
                    span,
                };
            } else if self.check_symbol(".") {
                self.advance();
                let (name, span) = self.consume_identifier()?;
                expr = Expr::Field {
                    object: Box::new(expr),
                    name,
                    span,
                };
            } else if self.check_symbol("[") {
                let span = self.advance().span;
                let key = self.expression()?;
                self.consume_symbol("]")?;
                expr = Expr::Index {
                    object: Box::new(expr),
                    key: Box::new(key),
                    span,
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Comma-separated call arguments after the opening `(`.
    fn arguments(&mut self) -> LanadaResult<Vec<Expr>> {
        let mut args = Vec::new();

        if !self.check_symbol(")") {
            loop {
                args.push(self.expression()?);
                if !self.match_symbol(",") {
                    break;
                }
            }
        }

        self.consume_symbol(")")?;
        Ok(args)
    }

    fn primary(&mut self) -> LanadaResult<Expr> {
        let token = self.peek().clone();

        match token.kind {
            TokenKind::Number => {
                self.advance();
                let value = token.lexeme.parse::<f64>().map_err(|_| {
                    LanadaError::syntax_error(format!("Invalid number: {}", token.lexeme), token.span)
                })?;
                Ok(Expr::Number(value))
            }

            TokenKind::String => {
                self.advance();
                Ok(Expr::String(token.lexeme))
            }

            TokenKind::Identifier => {
                self.advance();
                Ok(Expr::Var {
                    name: token.lexeme,
                    span: token.span,
                })
            }

            TokenKind::Keyword if token.lexeme == "true" => {
                self.advance();
                Ok(Expr::Bool(true))
            }

            TokenKind::Keyword if token.lexeme == "false" => {
                self.advance();
                Ok(Expr::Bool(false))
            }

            TokenKind::Keyword if token.lexeme == "nil" => {
                self.advance();
                Ok(Expr::Nil)
            }

            TokenKind::Symbol if token.lexeme == "{" => self.table_constructor(),

            TokenKind::Symbol if token.lexeme == "(" => {
                self.advance();
                let expr = self.expression()?;
                self.consume_symbol(")")?;
                Ok(expr)
            }

            _ => Err(LanadaError::syntax_error(
                format!("Invalid expression: {}", token),
                token.span,
            )),
        }
    }

    /// `{ entry, entry, ... }`
    ///
    /// Bare entries get implicit keys 1, 2, 3, ...; the counter advances for
    /// bare entries only, so named entries never shift the positions.
    fn table_constructor(&mut self) -> LanadaResult<Expr> {
        self.consume_symbol("{")?;

        let mut entries = Vec::new();
        let mut index = 1;

        while !self.check_symbol("}") {
            if self.is_at_end() {
                return Err(self.expected("}"));
            }

            let key = if self.peek().kind == TokenKind::Identifier && self.peek_next().is_symbol("=") {
                let (name, _) = self.consume_identifier()?;
                self.consume_symbol("=")?;
                TableKey::Named(name)
            } else if self.match_symbol("[") {
                let key = self.expression()?;
                self.consume_symbol("]")?;
                self.consume_symbol("=")?;
                TableKey::Computed(key)
            } else {
                let key = TableKey::Positional(index);
                index += 1;
                key
            };

            let value = self.expression()?;
            entries.push(TableEntry { key, value });

            if !self.match_symbol(",") {
                break;
            }
        }

        self.consume_symbol("}")?;
        Ok(Expr::Table { entries })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{BinaryOp, Expr, Stmt, TableKey};
    use crate::lexer::tokenize;
    use crate::parser::parse;

    fn local_value(source: &str) -> Expr {
        let program = parse(tokenize(source).unwrap()).unwrap();
        match program.body.into_iter().next() {
            Some(Stmt::Local { value, .. }) => value,
            other => panic!("expected local, got {:?}", other),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let expr = local_value("local x = 1 + 2 * 3");
        let Expr::Binary { op: BinaryOp::Add, left, right, .. } = expr else {
            panic!("expected '+' at the root");
        };
        assert_eq!(*left, Expr::Number(1.0));
        assert!(matches!(*right, Expr::Binary { op: BinaryOp::Mul, .. }));
    }

    #[test]
    fn binary_operators_are_left_associative() {
        let expr = local_value("local x = 10 - 4 - 3");
        let Expr::Binary { op: BinaryOp::Sub, left, right, .. } = expr else {
            panic!("expected '-' at the root");
        };
        assert!(matches!(*left, Expr::Binary { op: BinaryOp::Sub, .. }));
        assert_eq!(*right, Expr::Number(3.0));
    }

    #[test]
    fn concatenation_shares_the_comparison_level() {
        let expr = local_value("local s = \"a\" .. 1 + 2");
        let Expr::Binary { op: BinaryOp::Concat, right, .. } = expr else {
            panic!("expected '..' at the root");
        };
        assert!(matches!(*right, Expr::Binary { op: BinaryOp::Add, .. }));
    }

    #[test]
    fn power_binds_tighter_than_multiplication() {
        let expr = local_value("local x = 2 * 3 ^ 2");
        let Expr::Binary { op: BinaryOp::Mul, right, .. } = expr else {
            panic!("expected '*' at the root");
        };
        assert!(matches!(*right, Expr::Binary { op: BinaryOp::Pow, .. }));
    }

    #[test]
    fn parentheses_override_precedence() {
        let expr = local_value("local x = (1 + 2) * 3");
        let Expr::Binary { op: BinaryOp::Mul, left, .. } = expr else {
            panic!("expected '*' at the root");
        };
        assert!(matches!(*left, Expr::Binary { op: BinaryOp::Add, .. }));
    }

    #[test]
    fn table_keys_count_bare_entries_only() {
        let expr = local_value("local t = {10, 20, name = \"a\", 30}");
        let Expr::Table { entries } = expr else {
            panic!("expected table");
        };
        let keys: Vec<TableKey> = entries.into_iter().map(|e| e.key).collect();
        assert_eq!(
            keys,
            vec![
                TableKey::Positional(1),
                TableKey::Positional(2),
                TableKey::Named("name".to_string()),
                TableKey::Positional(3),
            ]
        );
    }

    #[test]
    fn postfix_chains_calls_fields_and_indexes() {
        let expr = local_value("local v = a.b[1](2)");
        let Expr::Call { callee, args, .. } = expr else {
            panic!("expected call");
        };
        assert_eq!(args, vec![Expr::Number(2.0)]);
        let Expr::Index { object, .. } = *callee else {
            panic!("expected index");
        };
        assert!(matches!(*object, Expr::Field { ref name, .. } if name == "b"));
    }

    #[test]
    fn literal_keywords() {
        assert_eq!(local_value("local a = true"), Expr::Bool(true));
        assert_eq!(local_value("local a = false"), Expr::Bool(false));
        assert_eq!(local_value("local a = nil"), Expr::Nil);
    }

    #[test]
    fn nesting_is_bounded() {
        let deep = format!("local x = {}1{}", "(".repeat(500), ")".repeat(500));
        let err = parse(tokenize(&deep).unwrap()).unwrap_err();
        assert_eq!(err.message, "expression nested too deeply (limit 200)");

        let tables = format!("local t = {}{}", "{".repeat(300), "}".repeat(300));
        assert!(parse(tokenize(&tables).unwrap()).is_err());

        let fine = format!("local x = {}1{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(local_value(&fine), Expr::Number(1.0));
    }

    #[test]
    fn invalid_expression_reports_the_token() {
        let err = parse(tokenize("local x = )").unwrap()).unwrap_err();
        assert_eq!(err.message, "Invalid expression: )");
    }
}
