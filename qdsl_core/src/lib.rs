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
//! Typed query building: expressions, predicates, query metadata,
//! projections and SQL rendering. Nothing here touches a database.
//!

#![deny(clippy::all)]

mod error;
mod value;
mod data;
mod expr;
mod entity;
mod query;
mod projection;
pub mod sql;

#[doc(inline)]
pub use error::*;
#[doc(inline)]
pub use value::*;
#[doc(inline)]
pub use data::*;
#[doc(inline)]
pub use expr::*;
#[doc(inline)]
pub use entity::*;
#[doc(inline)]
pub use query::*;
#[doc(inline)]
pub use projection::*;
pub use serde;
pub use serde_json;
