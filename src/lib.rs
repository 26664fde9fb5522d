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

//! Typed queries over a small Member/Team schema on SQLite.
//!
//! The query layer lives in `qdsl_core` and is re-exported here; this crate
//! adds the pooled connections, the session that executes queries and
//! persists entities, and the repositories built on top.
//!
//! ## Example
//!
//! ```rust,no_run
//! use qdsl::*;
//!
//! fn main() -> qdsl::Result<()> {
//!     let pool = Pool::new(QdslConfig::new("sqlite::memory:")?)?;
//!     pool.create_schema()?;
//!     let session = pool.session()?;
//!
//!     let mut team = Team::new("teamA");
//!     session.persist(&mut team)?;
//!     let mut member = Member::with_team("member1", 10, &team);
//!     session.persist(&mut member)?;
//!
//!     let member = QMember::member();
//!     let found = session.query_factory()
//!         .select_from(&member)
//!         .where_(member.username.eq("member1").and(member.age.eq(10)))
//!         .fetch_one()?;
//!     assert!(found.is_some());
//!     Ok(())
//! }
//! ```

mod config;
mod errors;
mod logging;
mod pool;
mod session;
mod query;
mod page;
pub mod interceptor;
pub mod domain;
pub mod dto;
pub mod repository;

#[doc(inline)]
pub use qdsl_core::*;
#[doc(inline)]
pub use config::{DatabaseSource, DdlAuto, QdslConfig, DEFAULT_URL};
#[doc(inline)]
pub use errors::{QdslError, Result};
#[doc(inline)]
pub use logging::{init_logging, init_test_logging};
#[doc(inline)]
pub use pool::{Pool, SqliteConnection, SqliteConnectionManager, SqlitePool};
#[doc(inline)]
pub use session::Session;
#[doc(inline)]
pub use query::{DeleteClause, QueryFactory, QueryResults, SelectQuery, UpdateClause};
#[doc(inline)]
pub use page::{Page, PageRequest, PageableExecution};
#[doc(inline)]
pub use interceptor::{LogLevel, LoggingInterceptor, SqlInterceptor};
pub use domain::{Member, QMember, QTeam, Team};
