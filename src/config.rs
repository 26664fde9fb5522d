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

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;
use crate::errors::{QdslError, Result};
use crate::interceptor::LogLevel;

pub const DEFAULT_URL: &str = "sqlite::memory:";

/// Where the SQLite database lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatabaseSource {
    Memory,
    File(PathBuf),
}

/// What to do with the schema at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DdlAuto {
    /// Drop and recreate the tables.
    #[default]
    Create,
    None,
}

impl FromStr for DdlAuto {
    type Err = QdslError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            // Nothing outlives the process, so create-drop behaves like create.
            "create" | "create-drop" => Ok(DdlAuto::Create),
            "none" => Ok(DdlAuto::None),
            other => Err(QdslError::config(format!("unsupported ddl_auto value: {}", other))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct QdslConfig {
    url: String,
    source: DatabaseSource,
    connection_timeout: Duration,
    min_idle: Option<u32>,
    max_size: u32,
    log_level: LogLevel,
    slow_query_threshold_ms: u64,
    ddl_auto: DdlAuto,
    show_sql: bool,
}

impl Default for QdslConfig {
    fn default() -> Self {
        QdslConfig {
            url: DEFAULT_URL.to_string(),
            source: DatabaseSource::Memory,
            connection_timeout: Duration::from_secs(6),
            min_idle: None,
            max_size: 16,
            log_level: LogLevel::Info,
            slow_query_threshold_ms: 1000,
            ddl_auto: DdlAuto::Create,
            show_sql: true,
        }
    }
}

impl QdslConfig {

    pub fn new(url: &str) -> Result<Self> {
        QdslConfig::default().set_url(url)
    }

    /// Reads `QDSL_DATABASE_URL`, `QDSL_MAX_SIZE`, `QDSL_LOG_LEVEL`,
    /// `QDSL_DDL_AUTO` and `QDSL_SHOW_SQL`; unset variables keep defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = QdslConfig::new(&lookup("QDSL_DATABASE_URL").unwrap_or_else(|| DEFAULT_URL.to_string()))?;
        if let Some(max_size) = lookup("QDSL_MAX_SIZE") {
            let max_size = max_size.trim().parse::<u32>()
                .map_err(|_| QdslError::config(format!("QDSL_MAX_SIZE is not a number: {}", max_size)))?;
            cfg = cfg.set_max_size(max_size);
        }
        if let Some(level) = lookup("QDSL_LOG_LEVEL") {
            let level = LogLevel::from_str(&level)
                .ok_or_else(|| QdslError::config(format!("unknown log level: {}", level)))?;
            cfg = cfg.set_log_level(level);
        }
        if let Some(ddl_auto) = lookup("QDSL_DDL_AUTO") {
            cfg = cfg.set_ddl_auto(ddl_auto.parse()?);
        }
        if let Some(show_sql) = lookup("QDSL_SHOW_SQL") {
            let show_sql = match show_sql.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                other => return Err(QdslError::config(format!("QDSL_SHOW_SQL is not a boolean: {}", other))),
            };
            cfg = cfg.set_show_sql(show_sql);
        }
        Ok(cfg)
    }

    /// parse the url into a database source
    fn parse_url(url: &str) -> Result<DatabaseSource> {
        let parsed = Url::parse(url).map_err(|e| QdslError::config(format!("invalid database url {}: {}", url, e)))?;
        match parsed.scheme() {
            "sqlite" => {
                let host = parsed.host_str().unwrap_or_default();
                let path = parsed.path();
                let path = if path == "/" { "" } else { path };
                let db_file = format!("{}{}", host, path);
                if db_file.is_empty() || db_file == ":memory:" {
                    Ok(DatabaseSource::Memory)
                } else {
                    Ok(DatabaseSource::File(PathBuf::from(db_file)))
                }
            }
            scheme => Err(QdslError::config(format!("unsupported database scheme: {}", scheme))),
        }
    }

    pub fn set_url(mut self, url: &str) -> Result<Self> {
        self.source = Self::parse_url(url)?;
        self.url = url.to_string();
        Ok(self)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn source(&self) -> &DatabaseSource {
        &self.source
    }

    pub fn is_memory(&self) -> bool {
        self.source == DatabaseSource::Memory
    }

    pub fn set_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Pool size as requested; see [`QdslConfig::effective_max_size`].
    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    /// An in-memory database is private to its connection, so a pool over
    /// it holds exactly one.
    pub fn effective_max_size(&self) -> u32 {
        if self.is_memory() { 1 } else { self.max_size.max(1) }
    }

    pub fn set_connection_timeout(mut self, connection_timeout: Duration) -> Self {
        self.connection_timeout = connection_timeout;
        self
    }

    pub fn connection_timeout(&self) -> Duration {
        self.connection_timeout
    }

    pub fn set_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    pub fn min_idle(&self) -> Option<u32> {
        self.min_idle
    }

    pub fn set_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn set_slow_query_threshold(mut self, threshold_ms: u64) -> Self {
        self.slow_query_threshold_ms = threshold_ms;
        self
    }

    pub fn slow_query_threshold(&self) -> u64 {
        self.slow_query_threshold_ms
    }

    pub fn set_ddl_auto(mut self, ddl_auto: DdlAuto) -> Self {
        self.ddl_auto = ddl_auto;
        self
    }

    pub fn ddl_auto(&self) -> DdlAuto {
        self.ddl_auto
    }

    pub fn set_show_sql(mut self, show_sql: bool) -> Self {
        self.show_sql = show_sql;
        self
    }

    pub fn show_sql(&self) -> bool {
        self.show_sql
    }
}
