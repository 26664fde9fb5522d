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

use crate::{Entity, Nullable};
use super::{Expr, Expression};

/// A typed handle to one alias of an entity table, e.g. `member1` for
/// `member`. Generated-path structs implement this and expose one
/// [`Expression`] field per column.
pub trait EntityPath: Clone {
    type Entity: Entity;

    fn alias(&self) -> &str;

    fn table(&self) -> &'static str {
        <Self::Entity as Entity>::TABLE
    }

    fn column(&self, column: &'static str) -> Expr {
        Expr::column(self.alias(), column, column)
    }

    /// Every column of the entity, id first, in declaration order.
    fn columns(&self) -> Vec<Expr> {
        <Self::Entity as Entity>::COLUMNS
            .iter()
            .map(|c| self.column(c))
            .collect()
    }

    /// `count(alias.id)`.
    fn count(&self) -> Expression<i64> {
        Expression::new(Expr::function("COUNT", vec![self.column(<Self::Entity as Entity>::ID_COLUMN)]))
    }

    /// Projects the entity as `Option`, for the optional side of outer joins.
    fn nullable(&self) -> Nullable<Self> {
        Nullable(self.clone())
    }
}

/// Typed column path.
pub fn path<T>(alias: &str, column: &'static str, property: &'static str) -> Expression<T> {
    Expression::new(Expr::column(alias, column, property))
}

/// An association between two tables, seen from its owner alias.
///
/// Joining over a relation renders
/// `owner.local_column = target.target_column` as the `ON` condition.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationPath {
    pub owner_alias: String,
    pub property: &'static str,
    pub local_column: &'static str,
    pub target_column: &'static str,
}

impl RelationPath {
    /// Owner holds the foreign key.
    pub fn many_to_one(owner_alias: &str, property: &'static str, foreign_key: &'static str, target_id: &'static str) -> Self {
        Self { owner_alias: owner_alias.to_string(), property, local_column: foreign_key, target_column: target_id }
    }

    /// Target holds the foreign key back to the owner.
    pub fn one_to_many(owner_alias: &str, property: &'static str, owner_id: &'static str, mapped_by: &'static str) -> Self {
        Self { owner_alias: owner_alias.to_string(), property, local_column: owner_id, target_column: mapped_by }
    }

    pub fn join_condition(&self, target_alias: &str) -> Expr {
        Expr::binary(
            super::BinaryOp::Eq,
            Expr::column(self.owner_alias.as_str(), self.local_column, self.local_column),
            Expr::column(target_alias, self.target_column, self.target_column),
        )
    }
}
