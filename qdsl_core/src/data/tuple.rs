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

use std::fmt;
use std::fmt::{Display, Formatter};

use crate::{DataError, DataResult, Expr, Expression, FromValue, SqlType, Value};

/// A row projected into several expressions, addressed by the expression
/// that produced each value.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuple {
    exprs: Vec<Expr>,
    values: Vec<Value>,
}

impl Tuple {
    pub fn new(exprs: Vec<Expr>, values: Vec<Value>) -> Self {
        Self { exprs, values }
    }

    /// Value of `expr`; matches aliased and unaliased forms of the same
    /// expression.
    pub fn get<T: SqlType>(&self, expr: &Expression<T>) -> DataResult<T> {
        let wanted = expr.as_expr();
        let index = self.exprs.iter()
            .position(|e| e == wanted)
            .or_else(|| self.exprs.iter().position(|e| e.unaliased() == wanted.unaliased()))
            .ok_or_else(|| DataError::NoSuchValueError(format!("{:?}", wanted)))?;
        self.get_at(index)
    }

    pub fn get_at<T: FromValue>(&self, index: usize) -> DataResult<T> {
        let value = self.values.get(index)
            .ok_or(DataError::IndexOutOfBounds(index, self.values.len()))?;
        T::from_value(value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl Display for Tuple {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_by_expression() {
        let username = Expression::<String>::new(Expr::column("member1", "username", "username"));
        let age = Expression::<i32>::new(Expr::column("member1", "age", "age"));
        let tuple = Tuple::new(
            vec![username.expr(), age.as_("years").expr()],
            vec![Value::Text("member1".into()), Value::Bigint(10)],
        );
        assert_eq!(tuple.get(&username).unwrap(), "member1");
        assert_eq!(tuple.get(&age).unwrap(), 10);
        assert_eq!(tuple.get_at::<i64>(1).unwrap(), 10);
        assert!(tuple.get(&age.sum()).is_err());
        assert_eq!(tuple.to_string(), "[member1, 10]");
    }
}
