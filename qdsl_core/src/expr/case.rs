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

use std::marker::PhantomData;

use super::{Expr, Expression, Literal, Predicate, SqlType};

/// Entry point of a searched case: `CASE WHEN <predicate> THEN .. END`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseBuilder;

impl CaseBuilder {
    pub fn new() -> Self {
        CaseBuilder
    }

    pub fn when(self, predicate: Predicate) -> CaseWhen {
        CaseWhen { operand: None, whens: Vec::new(), condition: predicate.into_expr() }
    }
}

/// First `when` of a case, before the result type is known.
#[derive(Debug, Clone)]
pub struct CaseWhen {
    operand: Option<Expr>,
    whens: Vec<(Expr, Expr)>,
    condition: Expr,
}

impl CaseWhen {
    pub(crate) fn simple(operand: Expr, value: Expr) -> Self {
        CaseWhen { operand: Some(operand), whens: Vec::new(), condition: value }
    }

    pub fn then<L: Literal>(self, result: L) -> Cases<L::Sql> {
        let mut whens = self.whens;
        whens.push((self.condition, Expr::Value(result.into_literal())));
        Cases { operand: self.operand, whens, _marker: PhantomData }
    }
}

/// Entry point of a simple case, created by `Expression::when`.
pub type SimpleCaseWhen = CaseWhen;

/// A case with at least one branch; every result shares type `T`.
#[derive(Debug, Clone)]
pub struct Cases<T> {
    operand: Option<Expr>,
    whens: Vec<(Expr, Expr)>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: SqlType> Cases<T> {
    /// Adds a branch. Searched cases take a predicate, simple cases a value
    /// compared against the operand.
    pub fn when<C: CaseCondition>(self, condition: C) -> CasesWhen<T> {
        CasesWhen { cases: self, condition: condition.into_condition() }
    }

    pub fn otherwise<L: Literal<Sql = T>>(self, result: L) -> Expression<T> {
        Expression::new(Expr::Case {
            operand: self.operand.map(Box::new),
            whens: self.whens,
            otherwise: Some(Box::new(Expr::Value(result.into_literal()))),
        })
    }

    /// Ends the case without a default; unmatched rows yield null.
    pub fn end(self) -> Expression<Option<T::NonNull>> {
        Expression::new(Expr::Case {
            operand: self.operand.map(Box::new),
            whens: self.whens,
            otherwise: None,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CasesWhen<T> {
    cases: Cases<T>,
    condition: Expr,
}

impl<T: SqlType> CasesWhen<T> {
    pub fn then<L: Literal<Sql = T>>(self, result: L) -> Cases<T> {
        let mut cases = self.cases;
        cases.whens.push((self.condition, Expr::Value(result.into_literal())));
        cases
    }
}

/// Condition of a case branch.
pub trait CaseCondition {
    fn into_condition(self) -> Expr;
}

impl CaseCondition for Predicate {
    fn into_condition(self) -> Expr {
        self.into_expr()
    }
}

macro_rules! impl_case_condition {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CaseCondition for $ty {
                fn into_condition(self) -> Expr {
                    Expr::Value(self.into())
                }
            }
        )*
    };
}

impl_case_condition!(i32, i64, f64, &str, String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn searched_case_keeps_branch_order() {
        let age = Expression::<i32>::new(Expr::column("member1", "age", "age"));
        let case = CaseBuilder::new()
            .when(age.between(0, 20)).then("0~20살")
            .when(age.between(21, 30)).then("21~30살")
            .otherwise("기타");
        match case.into_expr() {
            Expr::Case { operand, whens, otherwise } => {
                assert!(operand.is_none());
                assert_eq!(whens.len(), 2);
                assert_eq!(whens[0].1, Expr::value("0~20살"));
                assert_eq!(otherwise.map(|e| *e), Some(Expr::value("기타")));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn simple_case_compares_operand() {
        let age = Expression::<i32>::new(Expr::column("member1", "age", "age"));
        let case = age.when(10).then("열살").when(20).then("스무살").otherwise("기타");
        match case.into_expr() {
            Expr::Case { operand, whens, .. } => {
                assert_eq!(operand.map(|e| *e), Some(Expr::column("member1", "age", "age")));
                assert_eq!(whens[1].0, Expr::value(20));
            }
            other => panic!("unexpected {:?}", other),
        }
        let rank = CaseBuilder::new().when(age.eq(10)).then(2).otherwise(1);
        assert!(matches!(rank.as_expr(), Expr::Case { .. }));
    }
}
