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
use std::marker::PhantomData;

use crate::{FromValue, SubQuery, Value};
use super::{BinaryOp, Expr, OrderSpecifier, Predicate, SimpleCaseWhen, UnaryOp};

/// Kind of numeric expressions.
#[derive(Debug, Clone, Copy)]
pub struct Numeric;

/// Kind of string expressions.
#[derive(Debug, Clone, Copy)]
pub struct Text;

#[derive(Debug, Clone, Copy)]
pub struct Boolean;

/// A Rust type an expression can yield.
///
/// `Kind` decides which operators are available, `NonNull` is the type with
/// any `Option` layer removed (aggregates re-wrap it since they yield null
/// over an empty input).
pub trait SqlType: FromValue + 'static {
    type Kind;
    type NonNull: SqlType<Kind = Self::Kind>;
}

macro_rules! impl_sql_type {
    ($($ty:ty => $kind:ty),* $(,)?) => {
        $(
            impl SqlType for $ty {
                type Kind = $kind;
                type NonNull = $ty;
            }

            impl SqlType for Option<$ty> {
                type Kind = $kind;
                type NonNull = $ty;
            }
        )*
    };
}

impl_sql_type! {
    i32 => Numeric,
    i64 => Numeric,
    f64 => Numeric,
    String => Text,
    bool => Boolean,
}

/// A right-hand side accepted where an expression of kind `K` is compared.
pub trait Operand<K> {
    fn into_operand(self) -> Expr;
}

macro_rules! impl_literal_operand {
    ($($ty:ty => $kind:ty),* $(,)?) => {
        $(
            impl Operand<$kind> for $ty {
                fn into_operand(self) -> Expr {
                    Expr::Value(self.into())
                }
            }
        )*
    };
}

impl_literal_operand! {
    i32 => Numeric,
    i64 => Numeric,
    f64 => Numeric,
    &str => Text,
    String => Text,
    bool => Boolean,
}

impl Operand<Text> for &String {
    fn into_operand(self) -> Expr {
        Expr::Value(self.as_str().into())
    }
}

impl<T: SqlType> Operand<T::Kind> for Expression<T> {
    fn into_operand(self) -> Expr {
        self.expr
    }
}

impl<T: SqlType> Operand<T::Kind> for &Expression<T> {
    fn into_operand(self) -> Expr {
        self.expr.clone()
    }
}

impl<T: SqlType> Operand<T::Kind> for SubQuery<Expression<T>> {
    fn into_operand(self) -> Expr {
        self.into_expr()
    }
}

/// Right-hand side of `IN`: a list of operands or a single-column subquery.
pub trait InOperand<K> {
    fn into_in(self, target: Expr, negated: bool) -> Expr;
}

impl<K, V: Operand<K>> InOperand<K> for Vec<V> {
    fn into_in(self, target: Expr, negated: bool) -> Expr {
        Expr::InList {
            expr: Box::new(target),
            list: self.into_iter().map(Operand::into_operand).collect(),
            negated,
        }
    }
}

impl<K, V: Operand<K>, const N: usize> InOperand<K> for [V; N] {
    fn into_in(self, target: Expr, negated: bool) -> Expr {
        Vec::from(self).into_in(target, negated)
    }
}

impl<T: SqlType> InOperand<T::Kind> for SubQuery<Expression<T>> {
    fn into_in(self, target: Expr, negated: bool) -> Expr {
        Expr::InSubQuery {
            expr: Box::new(target),
            query: Box::new(self.into_metadata()),
            negated,
        }
    }
}

/// Literals that may appear as case results and constants.
pub trait Literal {
    type Sql: SqlType;

    fn into_literal(self) -> Value;
}

macro_rules! impl_literal {
    ($($ty:ty => $sql:ty),* $(,)?) => {
        $(
            impl Literal for $ty {
                type Sql = $sql;

                fn into_literal(self) -> Value {
                    self.into()
                }
            }
        )*
    };
}

impl_literal! {
    i32 => i32,
    i64 => i64,
    f64 => f64,
    &str => String,
    String => String,
    bool => bool,
}

/// An expression yielding values of type `T`.
pub struct Expression<T> {
    expr: Expr,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Expression<T> {
    fn clone(&self) -> Self {
        Self::new(self.expr.clone())
    }
}

impl<T> fmt::Debug for Expression<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Expression").field(&self.expr).finish()
    }
}

impl<T> From<Expression<T>> for Expr {
    fn from(e: Expression<T>) -> Self {
        e.expr
    }
}

impl<T> From<&Expression<T>> for Expr {
    fn from(e: &Expression<T>) -> Self {
        e.expr.clone()
    }
}

impl<T> Expression<T> {
    pub fn new(expr: Expr) -> Self {
        Self { expr, _marker: PhantomData }
    }

    pub fn expr(&self) -> Expr {
        self.expr.clone()
    }

    pub fn as_expr(&self) -> &Expr {
        &self.expr
    }

    pub fn into_expr(self) -> Expr {
        self.expr
    }

    pub fn label(&self) -> Option<&str> {
        self.expr.label()
    }

    fn compare<K, O: Operand<K>>(&self, op: BinaryOp, right: O) -> Predicate {
        Predicate::new(Expr::binary(op, self.expr.unaliased().clone(), right.into_operand()))
    }

    fn map<R>(&self, f: impl FnOnce(Expr) -> Expr) -> Expression<R> {
        Expression::new(f(self.expr.unaliased().clone()))
    }
}

impl<T: SqlType> Expression<T> {
    pub fn eq<O: Operand<T::Kind>>(&self, right: O) -> Predicate {
        self.compare(BinaryOp::Eq, right)
    }

    pub fn ne<O: Operand<T::Kind>>(&self, right: O) -> Predicate {
        self.compare(BinaryOp::Ne, right)
    }

    pub fn is_null(&self) -> Predicate {
        Predicate::new(Expr::unary(UnaryOp::IsNull, self.expr.unaliased().clone()))
    }

    pub fn is_not_null(&self) -> Predicate {
        Predicate::new(Expr::unary(UnaryOp::IsNotNull, self.expr.unaliased().clone()))
    }

    pub fn in_<I: InOperand<T::Kind>>(&self, values: I) -> Predicate {
        Predicate::new(values.into_in(self.expr.unaliased().clone(), false))
    }

    pub fn not_in<I: InOperand<T::Kind>>(&self, values: I) -> Predicate {
        Predicate::new(values.into_in(self.expr.unaliased().clone(), true))
    }

    pub fn asc(&self) -> OrderSpecifier {
        OrderSpecifier::asc(self.expr.unaliased().clone())
    }

    pub fn desc(&self) -> OrderSpecifier {
        OrderSpecifier::desc(self.expr.unaliased().clone())
    }

    /// Names the expression in the select list; by-name projections bind to it.
    pub fn as_<S: Into<String>>(&self, alias: S) -> Expression<T> {
        Expression::new(self.expr.clone().alias(alias))
    }

    pub fn count(&self) -> Expression<i64> {
        self.map(|e| Expr::function("COUNT", vec![e]))
    }

    pub fn count_distinct(&self) -> Expression<i64> {
        self.map(|e| Expr::Function { name: "COUNT", args: vec![e], distinct: true })
    }
}

impl<T: SqlType<Kind = Numeric>> Expression<T> {
    pub fn gt<O: Operand<Numeric>>(&self, right: O) -> Predicate {
        self.compare(BinaryOp::Gt, right)
    }

    /// Greater or equal.
    pub fn goe<O: Operand<Numeric>>(&self, right: O) -> Predicate {
        self.compare(BinaryOp::Ge, right)
    }

    pub fn lt<O: Operand<Numeric>>(&self, right: O) -> Predicate {
        self.compare(BinaryOp::Lt, right)
    }

    /// Less or equal.
    pub fn loe<O: Operand<Numeric>>(&self, right: O) -> Predicate {
        self.compare(BinaryOp::Le, right)
    }

    pub fn between<L: Operand<Numeric>, H: Operand<Numeric>>(&self, low: L, high: H) -> Predicate {
        Predicate::new(Expr::Between {
            expr: Box::new(self.expr.unaliased().clone()),
            low: Box::new(low.into_operand()),
            high: Box::new(high.into_operand()),
            negated: false,
        })
    }

    pub fn add<O: Operand<Numeric>>(&self, right: O) -> Expression<T> {
        self.map(|e| Expr::binary(BinaryOp::Add, e, right.into_operand()))
    }

    pub fn subtract<O: Operand<Numeric>>(&self, right: O) -> Expression<T> {
        self.map(|e| Expr::binary(BinaryOp::Sub, e, right.into_operand()))
    }

    pub fn multiply<O: Operand<Numeric>>(&self, right: O) -> Expression<T> {
        self.map(|e| Expr::binary(BinaryOp::Mul, e, right.into_operand()))
    }

    pub fn divide<O: Operand<Numeric>>(&self, right: O) -> Expression<T> {
        self.map(|e| Expr::binary(BinaryOp::Div, e, right.into_operand()))
    }

    pub fn sum(&self) -> Expression<Option<T::NonNull>> {
        self.map(|e| Expr::function("SUM", vec![e]))
    }

    pub fn avg(&self) -> Expression<Option<f64>> {
        self.map(|e| Expr::function("AVG", vec![e]))
    }

    pub fn max(&self) -> Expression<Option<T::NonNull>> {
        self.map(|e| Expr::function("MAX", vec![e]))
    }

    pub fn min(&self) -> Expression<Option<T::NonNull>> {
        self.map(|e| Expr::function("MIN", vec![e]))
    }

    pub fn string_value(&self) -> Expression<String> {
        self.map(|e| Expr::Cast { expr: Box::new(e), target: "TEXT" })
    }

    /// Starts a simple case on this expression: `CASE age WHEN 10 THEN ..`.
    pub fn when<O: Operand<Numeric>>(&self, value: O) -> SimpleCaseWhen {
        SimpleCaseWhen::simple(self.expr.unaliased().clone(), value.into_operand())
    }
}

impl<T: SqlType<Kind = Text>> Expression<T> {
    pub fn concat<O: Operand<Text>>(&self, right: O) -> Expression<T> {
        self.map(|e| Expr::binary(BinaryOp::Concat, e, right.into_operand()))
    }

    pub fn like(&self, pattern: &str) -> Predicate {
        self.compare::<Text, _>(BinaryOp::Like, pattern)
    }

    pub fn contains(&self, part: &str) -> Predicate {
        self.like(&format!("%{}%", part))
    }

    pub fn starts_with(&self, prefix: &str) -> Predicate {
        self.like(&format!("{}%", prefix))
    }

    pub fn ends_with(&self, suffix: &str) -> Predicate {
        self.like(&format!("%{}", suffix))
    }

    pub fn upper(&self) -> Expression<T> {
        self.map(|e| Expr::function("UPPER", vec![e]))
    }

    pub fn lower(&self) -> Expression<T> {
        self.map(|e| Expr::function("LOWER", vec![e]))
    }

    pub fn max_text(&self) -> Expression<Option<T::NonNull>> {
        self.map(|e| Expr::function("MAX", vec![e]))
    }

    pub fn min_text(&self) -> Expression<Option<T::NonNull>> {
        self.map(|e| Expr::function("MIN", vec![e]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn age() -> Expression<i32> {
        Expression::new(Expr::column("member1", "age", "age"))
    }

    fn username() -> Expression<Option<String>> {
        Expression::new(Expr::column("member1", "username", "username"))
    }

    #[test]
    fn aggregates_drop_the_alias() {
        let aliased = age().as_("years");
        assert_eq!(aliased.label(), Some("years"));
        assert_eq!(
            aliased.sum().into_expr(),
            Expr::function("SUM", vec![Expr::column("member1", "age", "age")])
        );
    }

    #[test]
    fn in_list_collects_operands() {
        let predicate = age().in_([10, 20]);
        match predicate.into_expr() {
            Expr::InList { list, negated, .. } => {
                assert!(!negated);
                assert_eq!(list, vec![Expr::value(10), Expr::value(20)]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn text_operators() {
        let concat = username().concat("_").concat(age().string_value());
        assert!(matches!(concat.as_expr(), Expr::Binary { op: BinaryOp::Concat, .. }));
        match username().contains("ber").into_expr() {
            Expr::Binary { op, right, .. } => {
                assert_eq!(op, BinaryOp::Like);
                assert_eq!(*right, Expr::value("%ber%"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
