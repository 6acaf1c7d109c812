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

use std::rc::Rc;

use crate::ast::{Expr, Stmt};
use crate::error::{LanadaError, LanadaResult};
use crate::lexer::token::TokenKind;
use crate::parser::parser::Parser;

impl Parser {
    /// Parses a single statement.
    ///
    /// This is the **main dispatcher** for all statement grammar forms. It
    /// inspects the leading token (and, for identifiers, the one after it)
    /// and routes to the matching production:
    ///
    /// ```text
    /// local <name> [= <expr>]
    /// function <name> ( <params> ) <stmt>* end
    /// return [<expr>]
    /// if <expr> then <stmt>* {elseif <expr> then <stmt>*} [else <stmt>*] end
    /// <name> = <expr>
    /// <postfix>.<field> = <expr> | <postfix>[<expr>] = <expr>
    /// <postfix>( <args> )
    /// ```
    pub fn statement(&mut self) -> LanadaResult<Stmt> {
        if self.check_keyword("local") {
            return self.local_declaration();
        }

        if self.check_keyword("function") {
            return self.function_declaration();
        }

        if self.check_keyword("return") {
            return self.return_statement();
        }

        if self.check_keyword("if") {
            return self.if_statement();
        }

        if self.peek().kind == TokenKind::Identifier {
            if self.peek_next().is_symbol("=") {
                let (name, span) = self.consume_identifier()?;
                self.consume_symbol("=")?;
                let value = self.expression()?;
                return Ok(Stmt::Assign { name, value, span });
            }

            return self.call_or_field_assignment();
        }

        let token = self.peek();
        Err(LanadaError::syntax_error(
            format!("Unexpected token: {}", token),
            token.span,
        ))
    }

    /// local name [= expr]
    fn local_declaration(&mut self) -> LanadaResult<Stmt> {
        let span = self.consume_keyword("local")?.span;
        let (name, _) = self.consume_identifier()?;

        let value = if self.match_symbol("=") {
            self.expression()?
        } else {
            Expr::Nil
        };

        Ok(Stmt::Local { name, value, span })
    }

    /// function name ( a, b, ... ) body end
    fn function_declaration(&mut self) -> LanadaResult<Stmt> {
        let span = self.consume_keyword("function")?.span;
        let (name, _) = self.consume_identifier()?;

        self.consume_symbol("(")?;
        let mut params = Vec::new();
        if !self.check_symbol(")") {
            loop {
                let (param, _) = self.consume_identifier()?;
                params.push(param);
                if !self.match_symbol(",") {
                    break;
                }
            }
        }
        self.consume_symbol(")")?;

        let body = self.block()?;
        self.consume_keyword("end")?;

        Ok(Stmt::Function {
            name,
            params,
            body: Rc::from(body),
            span,
        })
    }

    /// return [expr]
    ///
    /// A bare `return` right before a block terminator returns nil.
    fn return_statement(&mut self) -> LanadaResult<Stmt> {
        let span = self.consume_keyword("return")?.span;

        let value = if self.at_block_end() {
            Expr::Nil
        } else {
            self.expression()?
        };

        Ok(Stmt::Return { value, span })
    }

    /// if cond then ... [elseif cond then ...]* [else ...] end
    fn if_statement(&mut self) -> LanadaResult<Stmt> {
        let span = self.consume_keyword("if")?.span;
        let stmt = self.conditional_tail(span)?;
        self.consume_keyword("end")?;
        Ok(stmt)
    }

    /// Everything after `if` / `elseif` up to (not including) the shared
    /// `end`. An `elseif` becomes a nested `If` inside the else branch.
    fn conditional_tail(&mut self, span: crate::span::Span) -> LanadaResult<Stmt> {
        let condition = self.expression()?;
        self.consume_keyword("then")?;
        let then_branch = self.block()?;

        let else_branch = if self.check_keyword("elseif") {
            let nested_span = self.advance().span;
            vec![self.nested("block", |p| p.conditional_tail(nested_span))?]
        } else if self.match_keyword("else") {
            self.block()?
        } else {
            Vec::new()
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
            span,
        })
    }

    /// Statements up to the next `end` / `else` / `elseif`.
    ///
    /// Running out of input here is reported by the caller's
    /// `consume_keyword("end")`.
    fn block(&mut self) -> LanadaResult<Vec<Stmt>> {
        self.nested("block", |p| {
            let mut body = Vec::new();
            while !p.at_block_end() {
                body.push(p.statement()?);
            }
            Ok(body)
        })
    }

    /// A statement that starts with a postfix expression: either a call, or
    /// a field/index assignment target.
    fn call_or_field_assignment(&mut self) -> LanadaResult<Stmt> {
        let start = self.peek().clone();
        let target = self.postfix()?;

        if self.check_symbol("=") {
            let span = self.advance().span;
            let value = self.expression()?;

            return match target {
                Expr::Field { object, name, .. } => Ok(Stmt::SetIndex {
                    object: *object,
                    key: Expr::String(name),
                    value,
                    span,
                }),
                Expr::Index { object, key, .. } => Ok(Stmt::SetIndex {
                    object: *object,
                    key: *key,
                    value,
                    span,
                }),
                _ => Err(LanadaError::syntax_error(
                    "Invalid assignment target",
                    span,
                )),
            };
        }

        match target {
            call @ Expr::Call { .. } => Ok(Stmt::Call(call)),
            _ => Err(LanadaError::syntax_error(
                format!("Unexpected token: {}", start),
                start.span,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Expr, Stmt};
    use crate::error::ErrorKind;
    use crate::lexer::tokenize;
    use crate::parser::parse;

    fn parse_source(source: &str) -> Vec<Stmt> {
        parse(tokenize(source).unwrap()).unwrap().body
    }

    fn parse_error(source: &str) -> String {
        let err = parse(tokenize(source).unwrap()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
        err.message
    }

    #[test]
    fn function_declaration_collects_params_and_body() {
        let body = parse_source("function add(a, b) return a + b end");
        match &body[0] {
            Stmt::Function { name, params, body, .. } => {
                assert_eq!(name, "add");
                assert_eq!(params, &vec!["a".to_string(), "b".to_string()]);
                assert_eq!(body.len(), 1);
                assert!(matches!(body[0], Stmt::Return { .. }));
            }
            other => panic!("expected function, got {:?}", other),
        }
    }

    #[test]
    fn elseif_nests_into_else_branch() {
        let body = parse_source("if a then x = 1 elseif b then x = 2 else x = 3 end");
        let Stmt::If { else_branch, .. } = &body[0] else {
            panic!("expected if");
        };
        assert_eq!(else_branch.len(), 1);
        let Stmt::If { then_branch, else_branch, .. } = &else_branch[0] else {
            panic!("expected nested if");
        };
        assert_eq!(then_branch.len(), 1);
        assert_eq!(else_branch.len(), 1);
    }

    #[test]
    fn bare_return_yields_nil() {
        let body = parse_source("function f() return end");
        let Stmt::Function { body, .. } = &body[0] else {
            panic!("expected function");
        };
        assert!(matches!(body[0], Stmt::Return { value: Expr::Nil, .. }));
    }

    #[test]
    fn local_without_initializer_is_nil() {
        let body = parse_source("local x");
        assert!(matches!(&body[0], Stmt::Local { name, value: Expr::Nil, .. } if name == "x"));
    }

    #[test]
    fn field_assignment_and_call_statements() {
        let body = parse_source("t.name = 1 t[2] = 3 table.insert(t, 4)");
        assert!(matches!(&body[0], Stmt::SetIndex { key: Expr::String(k), .. } if k == "name"));
        assert!(matches!(&body[1], Stmt::SetIndex { key: Expr::Number(n), .. } if *n == 2.0));
        assert!(matches!(&body[2], Stmt::Call(Expr::Call { .. })));
    }

    #[test]
    fn rejects_unknown_statement_starts() {
        assert_eq!(parse_error("+ 1"), "Unexpected token: +");
        assert_eq!(parse_error("x"), "Unexpected token: x");
        assert_eq!(parse_error("t.x"), "Unexpected token: t");
    }

    #[test]
    fn reports_missing_end() {
        assert_eq!(parse_error("if x then print(1)"), "Expected 'end' but got '<eof>'");
        assert_eq!(parse_error("local = 3"), "Expected 'identifier' but got '='");
    }

    #[test]
    fn deeply_nested_blocks_are_rejected() {
        let src = format!("{}x = 1{}", "if a then ".repeat(400), " end".repeat(400));
        assert!(parse_error(&src).contains("nested too deeply"));

        let src = format!("{}x = 1{}", "if a then ".repeat(50), " end".repeat(50));
        assert_eq!(parse_source(&src).len(), 1);
    }

    #[test]
    fn stray_end_is_rejected_at_top_level() {
        assert_eq!(parse_error("print(1) end"), "Unexpected token: end");
    }
}
