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

use std::fmt;

use crate::span::Span;

/// Binary operators, lowest-binding level first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // comparison / concatenation
    Eq,
    Gt,
    Lt,
    Ge,
    Le,
    Concat,

    // additive
    Add,
    Sub,

    // multiplicative
    Mul,
    Div,

    // power
    Pow,
}

impl BinaryOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "==" => BinaryOp::Eq,
            ">" => BinaryOp::Gt,
            "<" => BinaryOp::Lt,
            ">=" => BinaryOp::Ge,
            "<=" => BinaryOp::Le,
            ".." => BinaryOp::Concat,
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "^" => BinaryOp::Pow,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Eq => "==",
            BinaryOp::Gt => ">",
            BinaryOp::Lt => "<",
            BinaryOp::Ge => ">=",
            BinaryOp::Le => "<=",
            BinaryOp::Concat => "..",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        }
    }

    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Pow
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Key of a table constructor entry.
#[derive(Debug, Clone, PartialEq)]
pub enum TableKey {
    /// Bare entry; the parser assigns 1, 2, 3, ... counting bare entries only.
    Positional(usize),

    /// `name = value`
    Named(String),

    /// `[expr] = value`
    Computed(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableEntry {
    pub key: TableKey,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    String(String),
    Bool(bool),
    Nil,

    Var {
        name: String,
        span: Span,
    },

    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
        span: Span,
    },

    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        span: Span,
    },

    /// `object.name`
    Field {
        object: Box<Expr>,
        name: String,
        span: Span,
    },

    /// `object[key]`
    Index {
        object: Box<Expr>,
        key: Box<Expr>,
        span: Span,
    },

    Table {
        entries: Vec<TableEntry>,
    },
}

impl Expr {
    /// Short description used in "attempt to call" style messages.
    pub fn describe(&self) -> String {
        match self {
            Expr::Var { name, .. } => format!("'{}'", name),
            Expr::Field { name, .. } => format!("field '{}'", name),
            Expr::Index { .. } => "indexed value".to_string(),
            Expr::Call { .. } => "call result".to_string(),
            _ => "value".to_string(),
        }
    }
}
