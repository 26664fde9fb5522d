/*
 *
 *  *
 *  *      Copyright (c) 2018-2025, SnackCloud All rights reserved.
 *  *
 *  *   Redistribution and use in source and binary forms, with or without
 *  *   modification, are permitted provided that the following conditions are met:
 *  *
 *  *   Redistributions of source code must retain the above copyright notice,
 *  *   this list of conditions and the following disclaimer.
 *  *   Redistributions in binary form must reproduce the above copyright
 *  *   notice, this list of conditions and the following disclaimer in the
 *  *   documentation and/or other materials provided with the distribution.
 *  *   Neither the name of the www.snackcloud.cn developer nor the names of its
 *  *   contributors may be used to endorse or promote products derived from
 *  *   this software without specific prior written permission.
 *  *   Author: SnackCloud
 *  *
 *
 */

//!
//! Expression tree.
//!
//! [`Expr`] is the untyped node every query is built from. The typed layer
//! ([`Expression`], [`Predicate`], case builders, templates) only ever wraps
//! an `Expr`, so the SQL renderer has a single shape to walk.
//!

mod typed;
mod predicate;
mod case;
mod template;
mod order;
mod path;

pub use typed::*;
pub use predicate::*;
pub use case::*;
pub use template::*;
pub use order::*;
pub use path::*;

use std::fmt;
use std::fmt::{Display, Formatter};
use crate::{QueryMetadata, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Column {
        alias: String,
        column: &'static str,
        property: &'static str,
    },
    Value(Value),
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        negated: bool,
    },
    InList {
        expr: Box<Expr>,
        list: Vec<Expr>,
        negated: bool,
    },
    InSubQuery {
        expr: Box<Expr>,
        query: Box<QueryMetadata>,
        negated: bool,
    },
    Function {
        name: &'static str,
        args: Vec<Expr>,
        distinct: bool,
    },
    Case {
        operand: Option<Box<Expr>>,
        whens: Vec<(Expr, Expr)>,
        otherwise: Option<Box<Expr>>,
    },
    Cast {
        expr: Box<Expr>,
        target: &'static str,
    },
    Template {
        template: String,
        args: Vec<Expr>,
    },
    SubQuery(Box<QueryMetadata>),
    Alias {
        expr: Box<Expr>,
        alias: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    IsNull,
    IsNotNull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq, Ne, Lt, Le, Gt, Ge,
    Like,
    And, Or,
    Add, Sub, Mul, Div,
    Concat,
}

impl BinaryOp {
    /// Binding strength as SQLite applies it; higher binds tighter.
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le
            | BinaryOp::Gt | BinaryOp::Ge | BinaryOp::Like => 4,
            BinaryOp::Add | BinaryOp::Sub => 6,
            BinaryOp::Mul | BinaryOp::Div => 7,
            BinaryOp::Concat => 8,
        }
    }

    pub fn is_associative(&self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or | BinaryOp::Add | BinaryOp::Mul | BinaryOp::Concat)
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            BinaryOp::Eq => write!(f, "="),
            BinaryOp::Ne => write!(f, "<>"),
            BinaryOp::Lt => write!(f, "<"),
            BinaryOp::Le => write!(f, "<="),
            BinaryOp::Gt => write!(f, ">"),
            BinaryOp::Ge => write!(f, ">="),
            BinaryOp::Like => write!(f, "LIKE"),
            BinaryOp::And => write!(f, "AND"),
            BinaryOp::Or => write!(f, "OR"),
            BinaryOp::Add => write!(f, "+"),
            BinaryOp::Sub => write!(f, "-"),
            BinaryOp::Mul => write!(f, "*"),
            BinaryOp::Div => write!(f, "/"),
            BinaryOp::Concat => write!(f, "||"),
        }
    }
}

/// Precedence of atoms (columns, values, calls, parenthesised forms).
pub const ATOM_PRECEDENCE: u8 = 10;

impl Expr {
    pub fn column<S: Into<String>>(alias: S, column: &'static str, property: &'static str) -> Self {
        Expr::Column { alias: alias.into(), column, property }
    }

    pub fn value<V: Into<Value>>(value: V) -> Self {
        Expr::Value(value.into())
    }

    pub fn unary(op: UnaryOp, expr: Expr) -> Self {
        Expr::Unary { op, expr: Box::new(expr) }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary { op, left: Box::new(left), right: Box::new(right) }
    }

    pub fn function(name: &'static str, args: Vec<Expr>) -> Self {
        Expr::Function { name, args, distinct: false }
    }

    pub fn alias<S: Into<String>>(self, alias: S) -> Self {
        Expr::Alias { expr: Box::new(self.unaliased().clone()), alias: alias.into() }
    }

    /// The expression without a select-list alias.
    pub fn unaliased(&self) -> &Expr {
        match self {
            Expr::Alias { expr, .. } => expr.unaliased(),
            other => other,
        }
    }

    /// Name a by-name projection binds this expression to: the alias when
    /// one was given, the property name for a column.
    pub fn label(&self) -> Option<&str> {
        match self {
            Expr::Alias { alias, .. } => Some(alias.as_str()),
            Expr::Column { property, .. } => Some(property),
            _ => None,
        }
    }

    pub fn column_name(&self) -> Option<&'static str> {
        match self.unaliased() {
            Expr::Column { column, .. } => Some(column),
            _ => None,
        }
    }

    pub fn precedence(&self) -> u8 {
        match self {
            Expr::Binary { op, .. } => op.precedence(),
            Expr::Unary { op: UnaryOp::Not, .. } => 3,
            Expr::Unary { .. } | Expr::Between { .. } | Expr::InList { .. } | Expr::InSubQuery { .. } => 4,
            Expr::Alias { expr, .. } => expr.precedence(),
            _ => ATOM_PRECEDENCE,
        }
    }
}

impl From<Value> for Expr {
    fn from(v: Value) -> Self {
        Expr::Value(v)
    }
}

impl From<&str> for Expr {
    fn from(v: &str) -> Self {
        Expr::Value(v.into())
    }
}

impl From<String> for Expr {
    fn from(v: String) -> Self {
        Expr::Value(v.into())
    }
}

impl From<i32> for Expr {
    fn from(v: i32) -> Self {
        Expr::Value(v.into())
    }
}

impl From<i64> for Expr {
    fn from(v: i64) -> Self {
        Expr::Value(v.into())
    }
}

impl From<f64> for Expr {
    fn from(v: f64) -> Self {
        Expr::Value(v.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_replaces_previous_alias() {
        let col = Expr::column("member1", "username", "username");
        let aliased = col.clone().alias("name").alias("nick");
        assert_eq!(aliased.label(), Some("nick"));
        assert_eq!(aliased.unaliased(), &col);
        assert_eq!(col.label(), Some("username"));
        assert_eq!(aliased.column_name(), Some("username"));
    }
}
