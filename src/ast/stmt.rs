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

use crate::ast::Expr;
use crate::span::Span;

/// Root node: the whole token stream parsed as a statement sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
}

/// All executable statements.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /* ----------------------------- */
    /* BINDINGS                      */
    /* ----------------------------- */

    /// `local name = value`: binds in the current frame.
    Local {
        name: String,
        value: Expr,
        span: Span,
    },

    /// `name = value`: updates the nearest frame holding `name`.
    Assign {
        name: String,
        value: Expr,
        span: Span,
    },

    /// `object.field = value` / `object[key] = value`
    SetIndex {
        object: Expr,
        key: Expr,
        value: Expr,
        span: Span,
    },

    /* ----------------------------- */
    /* FUNCTIONS                     */
    /* ----------------------------- */

    /// The body is shared with every closure created from this declaration.
    Function {
        name: String,
        params: Vec<String>,
        body: Rc<[Stmt]>,
        span: Span,
    },

    Return {
        value: Expr,
        span: Span,
    },

    /// A call evaluated for its side effects; always holds `Expr::Call`.
    Call(Expr),

    /* ----------------------------- */
    /* CONTROL FLOW                  */
    /* ----------------------------- */

    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Vec<Stmt>,
        span: Span,
    },
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Local { span, .. }
            | Stmt::Assign { span, .. }
            | Stmt::SetIndex { span, .. }
            | Stmt::Function { span, .. }
            | Stmt::Return { span, .. }
            | Stmt::If { span, .. } => *span,
            Stmt::Call(Expr::Call { span, .. }) => *span,
            Stmt::Call(_) => Span::default(),
        }
    }
}
