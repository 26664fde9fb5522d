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

use qdsl_core::DataError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QdslError {
    #[error("Database Error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Pool Error: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("Data Error: {0}")]
    Data(#[from] DataError),
    #[error("Non Unique Result: query returned {count} rows")]
    NonUniqueResult { count: usize },
    #[error("Config Error: {0}")]
    Config(String),
    #[error("Transaction Error: {0}")]
    Transaction(String),
    #[error("Interceptor Error: {0}")]
    Interceptor(String),
}

impl QdslError {
    pub fn config<T: Into<String>>(message: T) -> Self {
        Self::Config(message.into())
    }

    pub fn transaction<T: Into<String>>(message: T) -> Self {
        Self::Transaction(message.into())
    }
}

pub type Result<T> = std::result::Result<T, QdslError>;
