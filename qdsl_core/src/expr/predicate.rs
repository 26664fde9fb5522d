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

use super::{BinaryOp, Expr, UnaryOp};

/// A boolean condition usable in `where`, `having` and `on` clauses.
///
/// `and` / `or` take anything convertible into `Option<Predicate>`, and an
/// absent operand leaves the predicate unchanged. Optional search criteria
/// compose without branching on that rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    expr: Expr,
}

impl Predicate {
    pub fn new(expr: Expr) -> Self {
        Self { expr }
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn into_expr(self) -> Expr {
        self.expr
    }

    pub fn and<P: Into<Option<Predicate>>>(self, other: P) -> Predicate {
        match other.into() {
            Some(other) => Predicate::new(Expr::binary(BinaryOp::And, self.expr, other.expr)),
            None => self,
        }
    }

    pub fn or<P: Into<Option<Predicate>>>(self, other: P) -> Predicate {
        match other.into() {
            Some(other) => Predicate::new(Expr::binary(BinaryOp::Or, self.expr, other.expr)),
            None => self,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Predicate {
        Predicate::new(Expr::unary(UnaryOp::Not, self.expr))
    }

    /// Conjunction of the present predicates, `None` when there are none.
    pub fn all<I>(predicates: I) -> Option<Predicate>
    where
        I: IntoIterator<Item = Option<Predicate>>,
    {
        predicates.into_iter().flatten().reduce(|acc, p| acc.and(p))
    }

    /// Disjunction of the present predicates, `None` when there are none.
    pub fn any<I>(predicates: I) -> Option<Predicate>
    where
        I: IntoIterator<Item = Option<Predicate>>,
    {
        predicates.into_iter().flatten().reduce(|acc, p| acc.or(p))
    }
}

impl From<Predicate> for Expr {
    fn from(p: Predicate) -> Self {
        p.expr
    }
}

/// Mutable accumulator for predicates assembled step by step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BooleanBuilder {
    predicate: Option<Predicate>,
}

impl BooleanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<P: Into<Option<Predicate>>>(initial: P) -> Self {
        Self { predicate: initial.into() }
    }

    pub fn and<P: Into<Option<Predicate>>>(&mut self, other: P) -> &mut Self {
        self.predicate = match (self.predicate.take(), other.into()) {
            (Some(current), other) => Some(current.and(other)),
            (None, other) => other,
        };
        self
    }

    pub fn or<P: Into<Option<Predicate>>>(&mut self, other: P) -> &mut Self {
        self.predicate = match (self.predicate.take(), other.into()) {
            (Some(current), other) => Some(current.or(other)),
            (None, other) => other,
        };
        self
    }

    pub fn and_not<P: Into<Option<Predicate>>>(&mut self, other: P) -> &mut Self {
        let negated = other.into().map(Predicate::not);
        self.and(negated)
    }

    pub fn has_value(&self) -> bool {
        self.predicate.is_some()
    }

    pub fn value(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    pub fn build(self) -> Option<Predicate> {
        self.predicate
    }
}

impl From<BooleanBuilder> for Option<Predicate> {
    fn from(builder: BooleanBuilder) -> Self {
        builder.predicate
    }
}

impl From<&BooleanBuilder> for Option<Predicate> {
    fn from(builder: &BooleanBuilder) -> Self {
        builder.predicate.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eq(column: &'static str, value: i32) -> Predicate {
        Predicate::new(Expr::binary(
            BinaryOp::Eq,
            Expr::column("member1", column, column),
            Expr::value(value),
        ))
    }

    #[test]
    fn absent_operands_are_ignored() {
        let p = eq("age", 10);
        assert_eq!(p.clone().and(None), p);
        assert_eq!(p.clone().or(None), p);
        assert_eq!(Predicate::all(vec![None, None]), None);
        assert_eq!(Predicate::all(vec![None, Some(p.clone()), None]), Some(p));
    }

    #[test]
    fn builder_folds_with_and() {
        let mut builder = BooleanBuilder::new();
        assert!(!builder.has_value());
        builder.and(None).and(eq("age", 10)).and(None).and(eq("team_id", 1));
        let expected = eq("age", 10).and(eq("team_id", 1));
        assert_eq!(Option::<Predicate>::from(builder), Some(expected));
    }

    #[test]
    fn and_not_negates() {
        let mut builder = BooleanBuilder::with(eq("age", 10));
        builder.and_not(eq("age", 20));
        let expected = eq("age", 10).and(eq("age", 20).not());
        assert_eq!(builder.build(), Some(expected));
    }
}
