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
//! Executable queries bound to a session.
//!

use qdsl_core::sql::SqlBuilder;
use qdsl_core::{
    DeleteMetadata, EntityPath, Expr, Expression, Operand, Predicate, Projection, QueryBase, QueryMetadata,
    SqlType, UpdateMetadata, Value,
};
use crate::errors::{QdslError, Result};
use crate::session::Session;

/// Entry point for building queries and bulk clauses.
#[derive(Clone, Copy)]
pub struct QueryFactory<'s> {
    session: &'s Session,
}

impl<'s> QueryFactory<'s> {
    pub fn new(session: &'s Session) -> Self {
        QueryFactory { session }
    }

    pub fn select<P: Projection>(&self, projection: P) -> SelectQuery<'s, P> {
        SelectQuery {
            session: self.session,
            metadata: QueryMetadata::default(),
            projection,
        }
    }

    pub fn select_distinct<P: Projection>(&self, projection: P) -> SelectQuery<'s, P> {
        self.select(projection).distinct()
    }

    /// `select(path).from(path)`.
    pub fn select_from<Q>(&self, path: &Q) -> SelectQuery<'s, Q>
    where
        Q: EntityPath + Projection,
    {
        self.select(path.clone()).from(path)
    }

    pub fn update<Q: EntityPath>(&self, path: &Q) -> UpdateClause<'s> {
        UpdateClause {
            session: self.session,
            metadata: UpdateMetadata::new(path),
        }
    }

    pub fn delete<Q: EntityPath>(&self, path: &Q) -> DeleteClause<'s> {
        DeleteClause {
            session: self.session,
            metadata: DeleteMetadata::new(path),
        }
    }
}

/// Content and total of a paged query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResults<T> {
    pub results: Vec<T>,
    pub total: u64,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl<T> QueryResults<T> {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

pub struct SelectQuery<'s, P> {
    session: &'s Session,
    metadata: QueryMetadata,
    projection: P,
}

impl<P> QueryBase for SelectQuery<'_, P> {
    fn metadata(&self) -> &QueryMetadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut QueryMetadata {
        &mut self.metadata
    }
}

impl<'s, P: Projection> SelectQuery<'s, P> {
    fn rendered_metadata(&self) -> QueryMetadata {
        let mut metadata = self.metadata.clone();
        metadata.projection = self.projection.expressions();
        metadata
    }

    /// The SQL this query executes, with its bound values.
    pub fn to_sql(&self) -> Result<(String, Vec<Value>)> {
        Ok(self.session.builder().build_query_sql(&self.rendered_metadata())?)
    }

    pub fn fetch(&self) -> Result<Vec<P::Output>> {
        self.fetch_with(&self.rendered_metadata())
    }

    fn fetch_with(&self, metadata: &QueryMetadata) -> Result<Vec<P::Output>> {
        let (sql, params) = self.session.builder().build_query_sql(metadata)?;
        let rows = self.session.query(&sql, params)?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows.iter() {
            let mut reader = row.reader();
            let mut output = self.projection.read(&mut reader)?;
            for join in metadata.fetch_joins() {
                let values = reader.take(join.target_columns.len())?;
                if let Some(relation) = join.relation {
                    self.projection.attach(&mut output, relation, values)?;
                }
            }
            results.push(output);
        }
        Ok(results)
    }

    /// The single result, `None` when nothing matches.
    pub fn fetch_one(&self) -> Result<Option<P::Output>> {
        let mut results = self.fetch()?;
        match results.len() {
            0 => Ok(None),
            1 => Ok(results.pop()),
            count => Err(QdslError::NonUniqueResult { count }),
        }
    }

    /// `limit 1` and the first result.
    pub fn fetch_first(&self) -> Result<Option<P::Output>> {
        let mut metadata = self.rendered_metadata();
        metadata.limit = Some(1);
        Ok(self.fetch_with(&metadata)?.into_iter().next())
    }

    /// Row count of this query, ignoring order, offset and limit.
    pub fn fetch_count(&self) -> Result<u64> {
        let (sql, params) = self.session.builder().build_count_sql(&self.rendered_metadata())?;
        let rows = self.session.query(&sql, params)?;
        match rows.first() {
            Some(row) => Ok(row.get::<i64>(0)?.max(0) as u64),
            None => Ok(0),
        }
    }

    /// Count first, then content unless the count is zero.
    pub fn fetch_results(&self) -> Result<QueryResults<P::Output>> {
        let total = self.fetch_count()?;
        let results = if total > 0 { self.fetch()? } else { Vec::new() };
        Ok(QueryResults {
            results,
            total,
            offset: self.metadata.offset,
            limit: self.metadata.limit,
        })
    }
}

/// Bulk `UPDATE`. Rows are changed in the store only; entity values held
/// by the caller keep their old state.
pub struct UpdateClause<'s> {
    session: &'s Session,
    metadata: UpdateMetadata,
}

impl UpdateClause<'_> {
    pub fn set<T: SqlType, O: Operand<T::Kind>>(mut self, path: &Expression<T>, value: O) -> Self {
        self.metadata.sets.push((path.expr(), value.into_operand()));
        self
    }

    pub fn set_null<T: SqlType>(mut self, path: &Expression<T>) -> Self {
        self.metadata.sets.push((path.expr(), Expr::Value(Value::Null)));
        self
    }

    pub fn where_<P: Into<Option<Predicate>>>(mut self, predicate: P) -> Self {
        self.metadata.add_where(predicate.into());
        self
    }

    pub fn to_sql(&self) -> Result<(String, Vec<Value>)> {
        Ok(self.session.builder().build_update_sql(&self.metadata)?)
    }

    /// Number of rows changed.
    pub fn execute(&self) -> Result<u64> {
        let (sql, params) = self.to_sql()?;
        self.session.execute(&sql, params)
    }
}

pub struct DeleteClause<'s> {
    session: &'s Session,
    metadata: DeleteMetadata,
}

impl DeleteClause<'_> {
    pub fn where_<P: Into<Option<Predicate>>>(mut self, predicate: P) -> Self {
        self.metadata.add_where(predicate.into());
        self
    }

    pub fn to_sql(&self) -> Result<(String, Vec<Value>)> {
        Ok(self.session.builder().build_delete_sql(&self.metadata)?)
    }

    pub fn execute(&self) -> Result<u64> {
        let (sql, params) = self.to_sql()?;
        self.session.execute(&sql, params)
    }
}
