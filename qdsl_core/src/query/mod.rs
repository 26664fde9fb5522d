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
//! Query metadata and the builder methods shared by every query shape.
//!

mod subquery;

pub use subquery::*;

use std::fmt;
use std::fmt::{Display, Formatter};

use crate::{EntityPath, Expr, OrderSpecifier, Predicate, RelationPath};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
}

impl Display for JoinType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            JoinType::Inner => write!(f, "INNER JOIN"),
            JoinType::Left => write!(f, "LEFT JOIN"),
            JoinType::Right => write!(f, "RIGHT JOIN"),
        }
    }
}

/// A table and the alias it is visible under.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub table: &'static str,
    pub alias: String,
}

impl Source {
    pub fn of<Q: EntityPath>(path: &Q) -> Self {
        Self { table: path.table(), alias: path.alias().to_string() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    pub join_type: JoinType,
    pub target: Source,
    pub condition: Option<Expr>,
    pub fetch: bool,
    /// Property the joined entity is attached to on a fetch join.
    pub relation: Option<&'static str>,
    pub target_columns: Vec<Expr>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryMetadata {
    pub distinct: bool,
    pub projection: Vec<Expr>,
    pub sources: Vec<Source>,
    pub joins: Vec<JoinClause>,
    pub where_: Option<Expr>,
    pub group_by: Vec<Expr>,
    pub having: Option<Expr>,
    pub order_by: Vec<OrderSpecifier>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl QueryMetadata {
    pub fn add_source(&mut self, source: Source) {
        if !self.sources.contains(&source) {
            self.sources.push(source);
        }
    }

    pub fn add_join(&mut self, join: JoinClause) {
        self.joins.push(join);
    }

    /// AND-s `predicate` into the `ON` of the most recent join.
    pub fn add_join_condition(&mut self, predicate: Predicate) {
        if let Some(join) = self.joins.last_mut() {
            join.condition = Some(match join.condition.take() {
                Some(current) => Predicate::new(current).and(predicate).into_expr(),
                None => predicate.into_expr(),
            });
        }
    }

    pub fn add_where(&mut self, predicate: Option<Predicate>) {
        self.where_ = Self::conjoin(self.where_.take(), predicate);
    }

    pub fn add_having(&mut self, predicate: Option<Predicate>) {
        self.having = Self::conjoin(self.having.take(), predicate);
    }

    fn conjoin(current: Option<Expr>, predicate: Option<Predicate>) -> Option<Expr> {
        match (current, predicate) {
            (Some(current), p) => Some(Predicate::new(current).and(p).into_expr()),
            (None, p) => p.map(Predicate::into_expr),
        }
    }

    pub fn fetch_joins(&self) -> impl Iterator<Item = &JoinClause> {
        self.joins.iter().filter(|j| j.fetch)
    }

    /// Projection followed by the columns of every fetch-joined relation.
    pub fn select_list(&self) -> Vec<Expr> {
        let mut list = self.projection.clone();
        for join in self.fetch_joins() {
            list.extend(join.target_columns.iter().cloned());
        }
        list
    }

    /// Copy without ordering and paging, the shape a count query needs.
    pub fn without_paging(&self) -> QueryMetadata {
        QueryMetadata {
            order_by: Vec::new(),
            limit: None,
            offset: None,
            ..self.clone()
        }
    }

    pub fn is_grouped(&self) -> bool {
        !self.group_by.is_empty()
    }
}

/// Builder methods shared by executable queries and subqueries.
pub trait QueryBase: Sized {
    fn metadata(&self) -> &QueryMetadata;

    fn metadata_mut(&mut self) -> &mut QueryMetadata;

    fn from<Q: EntityPath>(mut self, path: &Q) -> Self {
        self.metadata_mut().add_source(Source::of(path));
        self
    }

    fn join<Q: EntityPath>(self, relation: &RelationPath, target: &Q) -> Self {
        self.relation_join(JoinType::Inner, relation, target)
    }

    fn inner_join<Q: EntityPath>(self, relation: &RelationPath, target: &Q) -> Self {
        self.relation_join(JoinType::Inner, relation, target)
    }

    fn left_join<Q: EntityPath>(self, relation: &RelationPath, target: &Q) -> Self {
        self.relation_join(JoinType::Left, relation, target)
    }

    fn right_join<Q: EntityPath>(self, relation: &RelationPath, target: &Q) -> Self {
        self.relation_join(JoinType::Right, relation, target)
    }

    /// Joins an unrelated entity; the condition comes from `on`.
    fn join_entity<Q: EntityPath>(self, target: &Q) -> Self {
        self.entity_join(JoinType::Inner, target)
    }

    fn left_join_entity<Q: EntityPath>(self, target: &Q) -> Self {
        self.entity_join(JoinType::Left, target)
    }

    fn relation_join<Q: EntityPath>(mut self, join_type: JoinType, relation: &RelationPath, target: &Q) -> Self {
        self.metadata_mut().add_join(JoinClause {
            join_type,
            target: Source::of(target),
            condition: Some(relation.join_condition(target.alias())),
            fetch: false,
            relation: Some(relation.property),
            target_columns: target.columns(),
        });
        self
    }

    fn entity_join<Q: EntityPath>(mut self, join_type: JoinType, target: &Q) -> Self {
        self.metadata_mut().add_join(JoinClause {
            join_type,
            target: Source::of(target),
            condition: None,
            fetch: false,
            relation: None,
            target_columns: target.columns(),
        });
        self
    }

    /// Adds a condition to the most recent join.
    fn on(mut self, predicate: Predicate) -> Self {
        self.metadata_mut().add_join_condition(predicate);
        self
    }

    /// Loads the most recent relation join into the root entity.
    fn fetch_join(mut self) -> Self {
        if let Some(join) = self.metadata_mut().joins.last_mut() {
            join.fetch = join.relation.is_some();
        }
        self
    }

    /// AND-ed with earlier conditions; `None` is ignored.
    fn where_<P: Into<Option<Predicate>>>(mut self, predicate: P) -> Self {
        self.metadata_mut().add_where(predicate.into());
        self
    }

    fn where_all<I>(mut self, predicates: I) -> Self
    where
        I: IntoIterator<Item = Option<Predicate>>,
    {
        self.metadata_mut().add_where(Predicate::all(predicates));
        self
    }

    fn group_by<E: Into<Expr>>(mut self, expr: E) -> Self {
        let expr = expr.into().unaliased().clone();
        self.metadata_mut().group_by.push(expr);
        self
    }

    fn having<P: Into<Option<Predicate>>>(mut self, predicate: P) -> Self {
        self.metadata_mut().add_having(predicate.into());
        self
    }

    fn order_by(mut self, order: OrderSpecifier) -> Self {
        self.metadata_mut().order_by.push(order);
        self
    }

    fn offset(mut self, offset: u64) -> Self {
        self.metadata_mut().offset = Some(offset);
        self
    }

    fn limit(mut self, limit: u64) -> Self {
        self.metadata_mut().limit = Some(limit);
        self
    }

    fn distinct(mut self) -> Self {
        self.metadata_mut().distinct = true;
        self
    }
}

/// Target of a bulk statement.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateMetadata {
    pub target: Source,
    pub sets: Vec<(Expr, Expr)>,
    pub where_: Option<Expr>,
}

impl UpdateMetadata {
    pub fn new<Q: EntityPath>(path: &Q) -> Self {
        Self { target: Source::of(path), sets: Vec::new(), where_: None }
    }

    pub fn add_where(&mut self, predicate: Option<Predicate>) {
        self.where_ = QueryMetadata::conjoin(self.where_.take(), predicate);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteMetadata {
    pub target: Source,
    pub where_: Option<Expr>,
}

impl DeleteMetadata {
    pub fn new<Q: EntityPath>(path: &Q) -> Self {
        Self { target: Source::of(path), where_: None }
    }

    pub fn add_where(&mut self, predicate: Option<Predicate>) {
        self.where_ = QueryMetadata::conjoin(self.where_.take(), predicate);
    }
}
