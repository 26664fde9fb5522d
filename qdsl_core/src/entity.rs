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
//! Entity mapping.
//!

use crate::{DataResult, Value};

/// A struct persisted as one table row.
///
/// `COLUMNS` lists the table columns with the id column first; `from_values`
/// and `to_values` use that order.
pub trait Entity: Sized {
    const TABLE: &'static str;
    const ID_COLUMN: &'static str;
    const COLUMNS: &'static [&'static str];

    fn from_values(values: &[Value]) -> DataResult<Self>;

    /// Values for every column in `COLUMNS` order; the id is `Null` while
    /// the entity is transient.
    fn to_values(&self) -> Vec<Value>;

    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: i64);

    /// Receives the columns of a fetch-joined relation.
    fn attach(&mut self, _relation: &str, _values: &[Value]) -> DataResult<()> {
        Ok(())
    }
}

/// A to-one association that is either only known by id or fully loaded.
#[derive(Debug, Clone)]
pub enum LazyRef<T> {
    Unloaded(i64),
    Loaded(T),
}

impl<T: Entity> LazyRef<T> {
    pub fn id(&self) -> Option<i64> {
        match self {
            LazyRef::Unloaded(id) => Some(*id),
            LazyRef::Loaded(entity) => entity.id(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LazyRef::Loaded(_))
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            LazyRef::Loaded(entity) => Some(entity),
            LazyRef::Unloaded(_) => None,
        }
    }
}

impl<T: Entity> PartialEq for LazyRef<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl<T> From<T> for LazyRef<T> {
    fn from(entity: T) -> Self {
        LazyRef::Loaded(entity)
    }
}
