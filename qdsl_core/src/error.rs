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

use thiserror::Error;

/// Failures while turning a stored [`Value`](crate::Value) into a Rust value.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: String,
        found: String,
    },
    #[error("Cannot convert null value to {target_type}")]
    NullValue {
        target_type: String,
    },
    #[error("Numeric overflow when converting to {target_type}")]
    NumericOverflow {
        target_type: String,
    },
    #[error("Missing Field: field {field}, expected_type {expected_type}")]
    MissingField {
        field: String,
        expected_type: String,
    },
    #[error("Conversion failed: {message}")]
    ConversionError {
        message: String,
    },
}

impl ConversionError {
    pub fn conversion_error<T: Into<String>>(err: T) -> Self {
        Self::ConversionError { message: err.into() }
    }

    pub fn type_mismatch_error<T: Into<String>, E: Into<String>>(expected: T, found: E) -> Self {
        Self::TypeMismatch { expected: expected.into(), found: found.into() }
    }

    pub fn null_value_error<T: Into<String>>(target_type: T) -> Self {
        Self::NullValue { target_type: target_type.into() }
    }

    pub fn numeric_overflow_error<T: Into<String>>(target_type: T) -> Self {
        Self::NumericOverflow { target_type: target_type.into() }
    }

    pub fn missing_field_error<T: Into<String>, E: Into<String>>(field: T, expected_type: E) -> Self {
        Self::MissingField { field: field.into(), expected_type: expected_type.into() }
    }
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("Conversion Data Error: {0}")]
    ConversionError(#[from] ConversionError),
    #[error("IndexOutOfBoundsException: Index: {0}, Size: {1}")]
    IndexOutOfBounds(usize, usize),
    #[error("No Such Value Error: {0}")]
    NoSuchValueError(String),
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    #[error("Serde Error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl DataError {
    pub fn conversion_error<T: Into<String>>(err: T) -> Self {
        Self::ConversionError(ConversionError::conversion_error(err))
    }

    pub fn type_mismatch_error<T: Into<String>, E: Into<String>>(expected: T, found: E) -> Self {
        Self::ConversionError(ConversionError::type_mismatch_error(expected, found))
    }

    pub fn null_value_error<T: Into<String>>(target_type: T) -> Self {
        Self::ConversionError(ConversionError::null_value_error(target_type))
    }

    pub fn numeric_overflow_error<T: Into<String>>(target_type: T) -> Self {
        Self::ConversionError(ConversionError::numeric_overflow_error(target_type))
    }

    pub fn invalid_query<T: Into<String>>(message: T) -> Self {
        Self::InvalidQuery(message.into())
    }
}

pub type DataResult<T> = Result<T, DataError>;
