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
//! Values exchanged with the store.
//!

use std::fmt;
use std::fmt::{Display, Formatter};
use serde_json::Value as JsonValue;
use crate::{DataError, DataResult};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i32),
    Bigint(i64),
    Double(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Bigint(_) => "Bigint",
            Value::Double(_) => "Double",
            Value::Text(_) => "Text",
            Value::Blob(_) => "Blob",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(i64::from(*v)),
            Value::Bigint(v) => Some(*v),
            Value::Bool(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    /// Json form used by by-name projections.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Bool(v) => JsonValue::Bool(*v),
            Value::Int(v) => JsonValue::from(*v),
            Value::Bigint(v) => JsonValue::from(*v),
            Value::Double(v) => {
                // Whole doubles come back from aggregates; keep them usable as integers.
                if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
                    JsonValue::from(*v as i64)
                } else {
                    JsonValue::from(*v)
                }
            }
            Value::Text(v) => JsonValue::String(v.clone()),
            Value::Blob(v) => JsonValue::from(v.clone()),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Bigint(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "{}", v),
            Value::Blob(v) => write!(f, "<{} bytes>", v.len()),
        }
    }
}

pub trait IntoValue {
    fn into_value(self) -> Value;
}

pub trait FromValue: Sized {
    fn from_value(value: &Value) -> DataResult<Self>;
}

macro_rules! impl_into_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl IntoValue for $ty {
                fn into_value(self) -> Value {
                    Value::$variant(self.into())
                }
            }

            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    v.into_value()
                }
            }
        )*
    };
}

impl_into_value! {
    bool => Bool,
    i32 => Int,
    i64 => Bigint,
    f64 => Double,
    String => Text,
    Vec<u8> => Blob,
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::Text(self.to_string())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        v.into_value()
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => Value::Null,
        }
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> DataResult<Self> {
        Ok(value.clone())
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> DataResult<Self> {
        match value {
            Value::Int(v) => Ok(i64::from(*v)),
            Value::Bigint(v) => Ok(*v),
            Value::Bool(v) => Ok(i64::from(*v)),
            Value::Double(v) if v.fract() == 0.0 => Ok(*v as i64),
            Value::Text(v) => v.parse::<i64>().map_err(|_| DataError::type_mismatch_error("i64", "Text")),
            Value::Null => Err(DataError::null_value_error("i64")),
            other => Err(DataError::type_mismatch_error("i64", other.type_name())),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> DataResult<Self> {
        match value {
            Value::Int(v) => Ok(*v),
            Value::Null => Err(DataError::null_value_error("i32")),
            other => {
                let wide = i64::from_value(other)
                    .map_err(|_| DataError::type_mismatch_error("i32", other.type_name()))?;
                i32::try_from(wide).map_err(|_| DataError::numeric_overflow_error("i32"))
            }
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> DataResult<Self> {
        match value {
            Value::Double(v) => Ok(*v),
            Value::Int(v) => Ok(f64::from(*v)),
            Value::Bigint(v) => Ok(*v as f64),
            Value::Text(v) => v.parse::<f64>().map_err(|_| DataError::type_mismatch_error("f64", "Text")),
            Value::Null => Err(DataError::null_value_error("f64")),
            other => Err(DataError::type_mismatch_error("f64", other.type_name())),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> DataResult<Self> {
        match value {
            Value::Bool(v) => Ok(*v),
            Value::Int(v) => Ok(*v != 0),
            Value::Bigint(v) => Ok(*v != 0),
            Value::Null => Err(DataError::null_value_error("bool")),
            other => Err(DataError::type_mismatch_error("bool", other.type_name())),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> DataResult<Self> {
        match value {
            Value::Text(v) => Ok(v.clone()),
            Value::Int(v) => Ok(v.to_string()),
            Value::Bigint(v) => Ok(v.to_string()),
            Value::Double(v) => Ok(v.to_string()),
            Value::Bool(v) => Ok(v.to_string()),
            Value::Null => Err(DataError::null_value_error("String")),
            Value::Blob(v) => String::from_utf8(v.clone())
                .map_err(|e| DataError::conversion_error(e.to_string())),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> DataResult<Self> {
        match value {
            Value::Null => Ok(None),
            v => T::from_value(v).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrows_integers() {
        assert_eq!(i32::from_value(&Value::Bigint(40)).unwrap(), 40);
        assert!(matches!(
            i32::from_value(&Value::Bigint(i64::MAX)),
            Err(DataError::ConversionError(crate::ConversionError::NumericOverflow { .. }))
        ));
    }

    #[test]
    fn null_needs_option() {
        assert!(String::from_value(&Value::Null).is_err());
        assert_eq!(Option::<String>::from_value(&Value::Null).unwrap(), None);
        assert_eq!(
            Option::<String>::from_value(&Value::Text("member1".into())).unwrap(),
            Some("member1".to_string())
        );
    }

    #[test]
    fn whole_doubles_become_json_integers() {
        assert_eq!(Value::Double(25.0).to_json(), serde_json::json!(25));
        assert_eq!(Value::Double(2.5).to_json(), serde_json::json!(2.5));
        assert_eq!(Value::Null.to_json(), serde_json::Value::Null);
    }
}
