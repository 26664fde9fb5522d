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
//! Projections turn select-list values back into Rust values.
//!

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};

use crate::{DataError, DataResult, Entity, EntityPath, Expr, Expression, RowReader, SqlType, Tuple, Value};

/// Something that can be selected.
///
/// `expressions` is the select-list contribution; `read` consumes exactly
/// that many values from the row, in the same order.
pub trait Projection {
    type Output;

    fn expressions(&self) -> Vec<Expr>;

    fn read(&self, reader: &mut RowReader<'_>) -> DataResult<Self::Output>;

    /// Hands the values of a fetch-joined relation to the root entity.
    fn attach(&self, _output: &mut Self::Output, _relation: &str, _values: &[Value]) -> DataResult<()> {
        Ok(())
    }
}

impl<T: SqlType> Projection for Expression<T> {
    type Output = T;

    fn expressions(&self) -> Vec<Expr> {
        vec![self.expr()]
    }

    fn read(&self, reader: &mut RowReader<'_>) -> DataResult<T> {
        T::from_value(reader.next_value()?)
    }
}

impl<P: Projection> Projection for &P {
    type Output = P::Output;

    fn expressions(&self) -> Vec<Expr> {
        (**self).expressions()
    }

    fn read(&self, reader: &mut RowReader<'_>) -> DataResult<Self::Output> {
        (**self).read(reader)
    }

    fn attach(&self, output: &mut Self::Output, relation: &str, values: &[Value]) -> DataResult<()> {
        (**self).attach(output, relation, values)
    }
}

macro_rules! impl_tuple_projection {
    ($first:ident $(, $rest:ident)*) => {
        #[allow(non_snake_case)]
        impl<$first: Projection $(, $rest: Projection)*> Projection for ($first, $($rest,)*) {
            type Output = ($first::Output, $($rest::Output,)*);

            fn expressions(&self) -> Vec<Expr> {
                let ($first, $($rest,)*) = self;
                let mut exprs = $first.expressions();
                $(exprs.extend($rest.expressions());)*
                exprs
            }

            fn read(&self, reader: &mut RowReader<'_>) -> DataResult<Self::Output> {
                let ($first, $($rest,)*) = self;
                Ok(($first.read(reader)?, $($rest.read(reader)?,)*))
            }

            /// Fetch-joined values belong to the first element.
            fn attach(&self, output: &mut Self::Output, relation: &str, values: &[Value]) -> DataResult<()> {
                self.0.attach(&mut output.0, relation, values)
            }
        }
    };
}

impl_tuple_projection!(A, B);
impl_tuple_projection!(A, B, C);
impl_tuple_projection!(A, B, C, D);
impl_tuple_projection!(A, B, C, D, E);
impl_tuple_projection!(A, B, C, D, E, F);

/// Reads the columns of `E` from the row.
pub fn read_entity<E: Entity>(reader: &mut RowReader<'_>) -> DataResult<E> {
    E::from_values(reader.take(E::COLUMNS.len())?)
}

/// Entity that may be absent, e.g. the optional side of an outer join.
/// A null id reads as `None`.
#[derive(Debug, Clone)]
pub struct Nullable<Q>(pub Q);

impl<Q: EntityPath> Projection for Nullable<Q> {
    type Output = Option<Q::Entity>;

    fn expressions(&self) -> Vec<Expr> {
        self.0.columns()
    }

    fn read(&self, reader: &mut RowReader<'_>) -> DataResult<Self::Output> {
        let values = reader.take(<Q::Entity as Entity>::COLUMNS.len())?;
        match values.first() {
            Some(id) if !id.is_null() => Ok(Some(<Q::Entity as Entity>::from_values(values)?)),
            _ => Ok(None),
        }
    }

    fn attach(&self, output: &mut Self::Output, relation: &str, values: &[Value]) -> DataResult<()> {
        match output {
            Some(entity) => entity.attach(relation, values),
            None => Ok(()),
        }
    }
}

/// Projection into a [`Tuple`].
#[derive(Debug, Clone)]
pub struct TupleProjection {
    exprs: Vec<Expr>,
}

impl Projection for TupleProjection {
    type Output = Tuple;

    fn expressions(&self) -> Vec<Expr> {
        self.exprs.clone()
    }

    fn read(&self, reader: &mut RowReader<'_>) -> DataResult<Tuple> {
        let values = reader.take(self.exprs.len())?;
        Ok(Tuple::new(self.exprs.clone(), values.to_vec()))
    }
}

/// By-name projection into any deserializable type. Each value is bound to
/// the field named by the expression label (alias, else property name).
pub struct FieldsProjection<T> {
    exprs: Vec<Expr>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for FieldsProjection<T> {
    fn clone(&self) -> Self {
        Self { exprs: self.exprs.clone(), _marker: PhantomData }
    }
}

impl<T: DeserializeOwned> Projection for FieldsProjection<T> {
    type Output = T;

    fn expressions(&self) -> Vec<Expr> {
        self.exprs.clone()
    }

    fn read(&self, reader: &mut RowReader<'_>) -> DataResult<T> {
        let mut object = Map::new();
        for expr in &self.exprs {
            let label = expr.label()
                .ok_or_else(|| DataError::invalid_query(format!("by-name projection needs an alias for {:?}", expr)))?;
            object.insert(label.to_string(), reader.next_value()?.to_json());
        }
        Ok(serde_json::from_value(JsonValue::Object(object))?)
    }
}

/// Positional projection handed to a constructor function.
pub struct ConstructorProjection<P, F> {
    projection: P,
    constructor: F,
}

impl<P, F, T> Projection for ConstructorProjection<P, F>
where
    P: Projection,
    F: Fn(P::Output) -> T,
{
    type Output = T;

    fn expressions(&self) -> Vec<Expr> {
        self.projection.expressions()
    }

    fn read(&self, reader: &mut RowReader<'_>) -> DataResult<T> {
        Ok((self.constructor)(self.projection.read(reader)?))
    }
}

/// Factory for the composite projections.
pub struct Projections;

impl Projections {
    pub fn tuple<I: IntoIterator<Item = Expr>>(exprs: I) -> TupleProjection {
        TupleProjection { exprs: exprs.into_iter().collect() }
    }

    /// Property-style binding. Labels must match the target's field names.
    pub fn bean<T: DeserializeOwned, I: IntoIterator<Item = Expr>>(exprs: I) -> FieldsProjection<T> {
        FieldsProjection { exprs: exprs.into_iter().collect(), _marker: PhantomData }
    }

    /// Field-style binding; identical to `bean` for plain Rust structs.
    pub fn fields<T: DeserializeOwned, I: IntoIterator<Item = Expr>>(exprs: I) -> FieldsProjection<T> {
        Self::bean(exprs)
    }

    pub fn constructor<P, F, T>(projection: P, constructor: F) -> ConstructorProjection<P, F>
    where
        P: Projection,
        F: Fn(P::Output) -> T,
    {
        ConstructorProjection { projection, constructor }
    }
}

/// Implements [`Projection`] for an [`EntityPath`] so the path itself can be
/// selected.
#[macro_export]
macro_rules! entity_projection {
    ($path:ty) => {
        impl $crate::Projection for $path {
            type Output = <$path as $crate::EntityPath>::Entity;

            fn expressions(&self) -> Vec<$crate::Expr> {
                $crate::EntityPath::columns(self)
            }

            fn read(&self, reader: &mut $crate::RowReader<'_>) -> $crate::DataResult<Self::Output> {
                $crate::read_entity(reader)
            }

            fn attach(
                &self,
                output: &mut Self::Output,
                relation: &str,
                values: &[$crate::Value],
            ) -> $crate::DataResult<()> {
                $crate::Entity::attach(output, relation, values)
            }
        }
    };
}
