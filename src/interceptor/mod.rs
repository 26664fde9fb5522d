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
//! SQL interceptors. Every statement a [`Session`](crate::Session) runs
//! passes through the chain before and after execution.
//!

mod logging;

pub use logging::LoggingInterceptor;

use std::sync::Arc;
use std::time::Instant;
use qdsl_core::{Rows, Value};
use crate::errors::Result;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Tracking level (lowest priority)
    Trace = 1,
    /// Debug level
    Debug = 2,
    /// Information level
    #[default]
    Info = 3,
    /// Warning level
    Warn = 4,
    /// Error Level (Highest Priority)
    Error = 5,
}

impl LogLevel {
    /// Parsing logs from the string level
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "ERROR" | "ERR" => Some(LogLevel::Error),
            "WARN" | "WARNING" => Some(LogLevel::Warn),
            "INFO" => Some(LogLevel::Info),
            "DEBUG" => Some(LogLevel::Debug),
            "TRACE" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    /// Whether a message at `other` passes this threshold.
    pub fn should_log(&self, other: LogLevel) -> bool {
        *self <= other
    }

    /// Directive for `tracing_subscriber::EnvFilter`.
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    Select,
    Insert,
    Update,
    Delete,
    Ddl,
    Transaction,
    Other,
}

impl OperationType {
    /// Classifies a statement by its leading keyword.
    pub fn detect(sql: &str) -> Self {
        let keyword = sql.split_whitespace().next().unwrap_or_default().to_ascii_uppercase();
        match keyword.as_str() {
            "SELECT" | "WITH" => OperationType::Select,
            "INSERT" => OperationType::Insert,
            "UPDATE" => OperationType::Update,
            "DELETE" => OperationType::Delete,
            "CREATE" | "DROP" | "ALTER" => OperationType::Ddl,
            "BEGIN" | "COMMIT" | "ROLLBACK" | "SAVEPOINT" | "RELEASE" => OperationType::Transaction,
            _ => OperationType::Other,
        }
    }
}

/// Outcome of one statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecuteResult {
    Rows(Rows),
    AffectedRows(u64),
}

impl ExecuteResult {
    /// Rows returned or rows affected.
    pub fn len(&self) -> u64 {
        match self {
            ExecuteResult::Rows(rows) => rows.len() as u64,
            ExecuteResult::AffectedRows(n) => *n,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The statement being executed, as seen by interceptors.
#[derive(Debug, Clone)]
pub struct ExecuteContext {
    sql: String,
    params: Vec<Value>,
    operation_type: OperationType,
    start_time: Instant,
    executed_interceptors: Vec<&'static str>,
}

impl ExecuteContext {
    pub fn new(sql: String, params: Vec<Value>) -> Self {
        let operation_type = OperationType::detect(&sql);
        Self { sql, params, operation_type, start_time: Instant::now(), executed_interceptors: Vec::new() }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn operation_type(&self) -> OperationType {
        self.operation_type
    }

    pub fn start_time(&self) -> Instant {
        self.start_time
    }

    pub fn executed_interceptors(&self) -> &[&'static str] {
        &self.executed_interceptors
    }
}

pub trait SqlInterceptor: Send + Sync {
    /// Interceptor name
    fn name(&self) -> &'static str;

    /// Execution order (the smaller the value, the first execution)
    fn order(&self) -> i32 { 0 }

    /// Whether the action type is supported
    fn supports_operation(&self, _operation: &OperationType) -> bool {
        true
    }

    /// Call before executing the statement
    fn before_execute(&self, ctx: &mut ExecuteContext) -> Result<()>;

    /// Call after executing the statement, failed or not
    fn after_execute(&self, _ctx: &mut ExecuteContext, _result: &mut Result<ExecuteResult>) -> Result<()> {
        Ok(())
    }
}

/// Interceptors sorted by order; `after` hooks run in reverse.
#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn SqlInterceptor>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_interceptor(&mut self, interceptor: Arc<dyn SqlInterceptor>) -> &mut Self {
        self.interceptors.push(interceptor);
        self.interceptors.sort_by_key(|i| i.order());
        self
    }

    pub fn with_interceptor<I: SqlInterceptor + 'static>(mut self, interceptor: I) -> Self {
        self.add_interceptor(Arc::new(interceptor));
        self
    }

    /// Perform a pre-interception
    pub fn before_query(&self, ctx: &mut ExecuteContext) -> Result<()> {
        for interceptor in &self.interceptors {
            if !interceptor.supports_operation(&ctx.operation_type()) {
                continue;
            }
            interceptor.before_execute(ctx)?;
            ctx.executed_interceptors.push(interceptor.name());
        }
        Ok(())
    }

    /// Perform post-interception
    pub fn after_query(&self, ctx: &mut ExecuteContext, result: &mut Result<ExecuteResult>) -> Result<()> {
        for interceptor in self.interceptors.iter().rev() {
            if !interceptor.supports_operation(&ctx.operation_type()) {
                continue;
            }
            interceptor.after_execute(ctx, result)?;
        }
        Ok(())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.interceptors.iter().map(|i| i.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }
}

impl std::fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptorChain").field("interceptors", &self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use crate::errors::QdslError;

    struct Recording {
        name: &'static str,
        order: i32,
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl SqlInterceptor for Recording {
        fn name(&self) -> &'static str {
            self.name
        }

        fn order(&self) -> i32 {
            self.order
        }

        fn before_execute(&self, ctx: &mut ExecuteContext) -> Result<()> {
            self.seen.lock().unwrap().push(format!("before {} {:?}", self.name, ctx.operation_type()));
            Ok(())
        }

        fn after_execute(&self, _ctx: &mut ExecuteContext, result: &mut Result<ExecuteResult>) -> Result<()> {
            let outcome = match result {
                Ok(r) => r.len().to_string(),
                Err(_) => "err".to_string(),
            };
            self.seen.lock().unwrap().push(format!("after {} {}", self.name, outcome));
            Ok(())
        }
    }

    #[test]
    fn chain_runs_in_order_and_unwinds() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let chain = InterceptorChain::new()
            .with_interceptor(Recording { name: "second", order: 20, seen: seen.clone() })
            .with_interceptor(Recording { name: "first", order: 10, seen: seen.clone() });
        let mut ctx = ExecuteContext::new("update member set age = ?".to_string(), vec![Value::Int(1)]);
        chain.before_query(&mut ctx).unwrap();
        let mut result: Result<ExecuteResult> = Err(QdslError::Interceptor("boom".to_string()));
        chain.after_query(&mut ctx, &mut result).unwrap();
        assert_eq!(ctx.executed_interceptors(), &["first", "second"]);
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["before first Update", "before second Update", "after second err", "after first err"]
        );
    }

    #[test]
    fn detects_operation_types() {
        assert_eq!(OperationType::detect("  select 1"), OperationType::Select);
        assert_eq!(OperationType::detect("INSERT INTO team (name) VALUES (?)"), OperationType::Insert);
        assert_eq!(OperationType::detect("CREATE TABLE team (team_id INTEGER)"), OperationType::Ddl);
        assert_eq!(OperationType::detect("COMMIT"), OperationType::Transaction);
        assert_eq!(OperationType::detect("PRAGMA foreign_keys = ON"), OperationType::Other);
    }

    #[test]
    fn context_is_classified_once_at_creation() {
        let ctx = ExecuteContext::new("ROLLBACK TRANSACTION".to_string(), Vec::new());
        assert_eq!(ctx.operation_type(), OperationType::Transaction);
        assert_eq!(ctx.sql(), "ROLLBACK TRANSACTION");
        assert!(ctx.executed_interceptors().is_empty());
    }

    #[test]
    fn log_level_threshold() {
        assert!(LogLevel::Debug.should_log(LogLevel::Info));
        assert!(!LogLevel::Warn.should_log(LogLevel::Info));
        assert_eq!(LogLevel::from_str("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_str("verbose"), None);
    }
}
