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
//! Pooled SQLite connections.
//!

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use rusqlite::Connection;
use qdsl_core::sql::SqliteBuilder;
use crate::config::{DatabaseSource, QdslConfig};
use crate::domain;
use crate::errors::Result;
use crate::interceptor::{InterceptorChain, LoggingInterceptor, SqlInterceptor};
use crate::session::Session;

pub type SqlitePool = r2d2::Pool<SqliteConnectionManager>;
pub type SqliteConnection = r2d2::PooledConnection<SqliteConnectionManager>;

#[derive(Debug)]
enum Source {
    File(PathBuf),
    Memory,
}

type InitFn = dyn Fn(&mut Connection) -> std::result::Result<(), rusqlite::Error> + Send + Sync + 'static;

pub struct SqliteConnectionManager {
    source: Source,
    init: Option<Box<InitFn>>,
}

impl fmt::Debug for SqliteConnectionManager {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut builder = f.debug_struct("SqliteConnectionManager");
        let _ = builder.field("source", &self.source);
        let _ = builder.field("init", &self.init.as_ref().map(|_| "InitFn"));
        builder.finish()
    }
}

impl SqliteConnectionManager {

    pub fn new(cfg: &QdslConfig) -> Self {
        match cfg.source() {
            DatabaseSource::Memory => Self::memory(),
            DatabaseSource::File(path) => Self::file(path),
        }
    }

    /// Creates a new `SqliteConnectionManager` from file.
    ///
    /// See `rusqlite::Connection::open`
    pub fn file<P: AsRef<Path>>(path: P) -> Self {
        Self {
            source: Source::File(path.as_ref().to_path_buf()),
            init: None,
        }
    }

    /// Creates a new `SqliteConnectionManager` from memory.
    pub fn memory() -> Self {
        Self {
            source: Source::Memory,
            init: None,
        }
    }

    /// Runs `init` on every new connection, e.g. to set PRAGMAs.
    pub fn with_init<F>(self, init: F) -> Self
    where
        F: Fn(&mut Connection) -> std::result::Result<(), rusqlite::Error> + Send + Sync + 'static,
    {
        let init: Option<Box<InitFn>> = Some(Box::new(init));
        Self { init, ..self }
    }
}

impl r2d2::ManageConnection for SqliteConnectionManager {
    type Connection = Connection;
    type Error = rusqlite::Error;

    fn connect(&self) -> std::result::Result<Connection, rusqlite::Error> {
        match self.source {
            Source::File(ref path) => Connection::open(path),
            Source::Memory => Connection::open_in_memory(),
        }
            .and_then(|mut c| match self.init {
                None => Ok(c),
                Some(ref init) => init(&mut c).map(|_| c),
            })
    }

    fn is_valid(&self, conn: &mut Connection) -> std::result::Result<(), rusqlite::Error> {
        conn.execute_batch("")
    }

    fn has_broken(&self, conn: &mut Connection) -> bool {
        self.is_valid(conn).is_err()
    }
}

/// Connection pool plus what every session shares: the interceptor chain
/// and the SQL dialect.
#[derive(Clone)]
pub struct Pool {
    inner: SqlitePool,
    cfg: QdslConfig,
    interceptor_chain: Arc<InterceptorChain>,
    builder: Arc<SqliteBuilder>,
}

impl fmt::Debug for Pool {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Pool")
            .field("url", &self.cfg.url())
            .field("state", &self.inner.state())
            .field("interceptor_chain", &self.interceptor_chain)
            .finish()
    }
}

impl Pool {
    /// Builds the pool and checks one connection out to prove it works.
    pub fn new(cfg: QdslConfig) -> Result<Self> {
        let manager = SqliteConnectionManager::new(&cfg)
            .with_init(|c| c.execute_batch("PRAGMA foreign_keys = ON;"));

        let inner = r2d2::Pool::builder()
            .connection_timeout(cfg.connection_timeout())
            .min_idle(cfg.min_idle())
            .max_size(cfg.effective_max_size())
            .build(manager)?;

        // Testing connections
        let conn = inner.get()?;
        conn.execute_batch("SELECT 1")?;
        drop(conn);

        let mut chain = InterceptorChain::new();
        if cfg.show_sql() {
            chain.add_interceptor(Arc::new(
                LoggingInterceptor::new()
                    .with_log_level(cfg.log_level())
                    .with_slow_query_threshold(cfg.slow_query_threshold()),
            ));
        }

        tracing::debug!(url = %cfg.url(), max_size = cfg.effective_max_size(), "connection pool ready");
        Ok(Self {
            inner,
            cfg,
            interceptor_chain: Arc::new(chain),
            builder: Arc::new(SqliteBuilder::default()),
        })
    }

    /// Adds an interceptor for sessions opened from now on.
    pub fn with_interceptor<I: SqlInterceptor + 'static>(mut self, interceptor: I) -> Self {
        Arc::make_mut(&mut self.interceptor_chain).add_interceptor(Arc::new(interceptor));
        self
    }

    pub fn session(&self) -> Result<Session> {
        let conn = self.inner.get()?;
        Ok(Session::new(conn, self.interceptor_chain.clone(), self.builder.clone()))
    }

    /// Drops and recreates the schema.
    pub fn create_schema(&self) -> Result<()> {
        self.session()?.execute_batch(domain::SCHEMA_DDL)?;
        tracing::info!("schema created");
        Ok(())
    }

    pub fn config(&self) -> &QdslConfig {
        &self.cfg
    }

    pub fn interceptor_chain(&self) -> &InterceptorChain {
        &self.interceptor_chain
    }
}
