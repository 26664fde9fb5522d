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
//! Console logging setup.
//!

use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use crate::interceptor::LogLevel;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Installs a fmt subscriber on stdout filtered at `level`, or by `RUST_LOG`
/// when set. Later calls are no-ops.
pub fn init_logging(level: LogLevel) {
    install(level, std::io::stdout);
}

/// Same as [`init_logging`], but writes through libtest's capture so output
/// only shows for failing tests.
pub fn init_test_logging(level: LogLevel) {
    install(level, fmt::TestWriter::new());
}

fn install<W>(level: LogLevel, writer: W)
where
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_level(true)
                .with_filter(filter),
        );

        // Another subscriber may already be installed (tests, embedding apps).
        if subscriber.try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_initialisation_is_a_no_op() {
        init_test_logging(LogLevel::Debug);
        init_test_logging(LogLevel::Trace);
        init_logging(LogLevel::Info);
        assert!(LOGGER_INITIALIZED.get().is_some());
    }
}
