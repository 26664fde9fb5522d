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

use crate::{DataResult, Expr, Expression, Projection, QueryBase, QueryMetadata, RowReader, SqlType};

/// A query that is never executed on its own: it renders inside another
/// query as a scalar operand, an `IN` source or a select item.
#[derive(Debug, Clone)]
pub struct SubQuery<P> {
    metadata: QueryMetadata,
    projection: P,
}

/// Starts a subquery selecting `projection`.
pub fn sub_select<P: Projection>(projection: P) -> SubQuery<P> {
    SubQuery { metadata: QueryMetadata::default(), projection }
}

impl<P> QueryBase for SubQuery<P> {
    fn metadata(&self) -> &QueryMetadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut QueryMetadata {
        &mut self.metadata
    }
}

impl<P: Projection> SubQuery<P> {
    pub fn projection(&self) -> &P {
        &self.projection
    }

    /// Metadata with the select list filled in.
    pub fn into_metadata(self) -> QueryMetadata {
        let mut metadata = self.metadata;
        metadata.projection = self.projection.expressions();
        metadata
    }

    pub fn into_expr(self) -> Expr {
        Expr::SubQuery(Box::new(self.into_metadata()))
    }
}

impl<T: SqlType> SubQuery<Expression<T>> {
    /// Uses the subquery as a named select item.
    pub fn as_<S: Into<String>>(self, alias: S) -> Expression<T> {
        Expression::new(self.into_expr().alias(alias))
    }
}

impl<T: SqlType> Projection for SubQuery<Expression<T>> {
    type Output = T;

    fn expressions(&self) -> Vec<Expr> {
        vec![self.clone().into_expr()]
    }

    fn read(&self, reader: &mut RowReader<'_>) -> DataResult<T> {
        T::from_value(reader.next_value()?)
    }
}
