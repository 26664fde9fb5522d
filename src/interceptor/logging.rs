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

use tracing::{debug, error, info, trace, warn};
use qdsl_core::Value;
use crate::errors::Result;
use crate::interceptor::{ExecuteContext, ExecuteResult, LogLevel, SqlInterceptor};

/// SQL execution log: statement, bound parameters, row count and cost.
#[derive(Debug, Clone)]
pub struct LoggingInterceptor {
    pub log_level: LogLevel,
    pub slow_query_threshold_ms: u64,
}

impl LoggingInterceptor {
    pub fn new() -> Self {
        Self {
            log_level: LogLevel::Debug,
            slow_query_threshold_ms: 1000,
        }
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn with_slow_query_threshold(mut self, threshold_ms: u64) -> Self {
        self.slow_query_threshold_ms = threshold_ms;
        self
    }
}

impl Default for LoggingInterceptor {
    fn default() -> Self {
        Self::new()
    }
}

/// `member1(Text), 10(Int)`
pub(crate) fn format_params(params: &[Value]) -> String {
    if params.is_empty() {
        return "None".to_string();
    }
    params.iter()
        .map(|p| format!("{}({})", p, p.type_name()))
        .collect::<Vec<_>>()
        .join(", ")
}

impl SqlInterceptor for LoggingInterceptor {
    fn name(&self) -> &'static str {
        "logging"
    }

    fn order(&self) -> i32 {
        90
    }

    fn before_execute(&self, ctx: &mut ExecuteContext) -> Result<()> {
        if self.log_level.should_log(LogLevel::Debug) {
            debug!("==>  Preparing: {}", ctx.sql());
            debug!("==> Parameters: {}", format_params(ctx.params()));
        }
        if self.log_level.should_log(LogLevel::Trace) {
            trace!("==> Start execution at: {:?}", ctx.start_time());
        }
        Ok(())
    }

    fn after_execute(&self, ctx: &mut ExecuteContext, result: &mut Result<ExecuteResult>) -> Result<()> {
        let duration_ms = ctx.start_time().elapsed().as_millis();

        let rows = match result {
            Err(err) => {
                if self.log_level.should_log(LogLevel::Error) {
                    error!("<==      ERROR: {}", err);
                    error!("<== Failed SQL: {}", ctx.sql());
                }
                if self.log_level.should_log(LogLevel::Debug) && !ctx.params().is_empty() {
                    debug!("<== Failed with params: {}", format_params(ctx.params()));
                }
                return Ok(());
            }
            Ok(result) => result.len(),
        };

        if duration_ms > u128::from(self.slow_query_threshold_ms) && self.log_level.should_log(LogLevel::Warn) {
            warn!("<== Slow Query! Cost: {} ms, Rows: {}, SQL: {}", duration_ms, rows, ctx.sql());
        }
        if self.log_level.should_log(LogLevel::Info) {
            info!("<==      Total: {}, Cost: {} ms", rows, duration_ms);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_parameters_with_types() {
        assert_eq!(format_params(&[]), "None");
        assert_eq!(
            format_params(&[Value::Text("member1".into()), Value::Int(10), Value::Null]),
            "member1(Text), 10(Int), null(Null)"
        );
    }

    #[test]
    fn failures_are_logged_not_raised() {
        let interceptor = LoggingInterceptor::new().with_log_level(LogLevel::Trace);
        let mut ctx = ExecuteContext::new("SELECT 1".to_string(), vec![]);
        interceptor.before_execute(&mut ctx).unwrap();
        let mut result: Result<ExecuteResult> = Err(crate::errors::QdslError::config("x"));
        assert!(interceptor.after_execute(&mut ctx, &mut result).is_ok());
        let mut ok: Result<ExecuteResult> = Ok(ExecuteResult::AffectedRows(2));
        assert!(interceptor.after_execute(&mut ctx, &mut ok).is_ok());
    }
}
