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

use crate::{DataError, DataResult, FromValue, Value};

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Row {
    pub columns: Vec<String>,
    pub data: Vec<Value>,
}

impl Row {

    pub fn new(columns: Vec<String>, data: Vec<Value>) -> Self {
        Self { columns, data }
    }

    /// Returns length of a row.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns columns of this row.
    pub fn columns_ref(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.data
    }

    /// Non panicking version of `row[index]`.
    pub fn as_ref(&self, index: usize) -> Option<&Value> {
        self.data.get(index)
    }

    /// Converts the value at `index` into `T`.
    pub fn get<T: FromValue>(&self, index: usize) -> DataResult<T> {
        let value = self.data.get(index)
            .ok_or(DataError::IndexOutOfBounds(index, self.data.len()))?;
        T::from_value(value)
    }

    pub fn get_by_column<T: FromValue>(&self, column: &str) -> DataResult<T> {
        let idx = self.columns.iter().position(|c| c == column)
            .ok_or_else(|| DataError::NoSuchValueError(column.to_string()))?;
        self.get(idx)
    }

    /// Sequential cursor over the values, in select-list order.
    pub fn reader(&self) -> RowReader<'_> {
        RowReader::new(&self.data)
    }
}

/// A list of rows as returned by the driver.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Rows {
    pub data: Vec<Row>,
}

impl Rows {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn push(&mut self, row: Row) {
        self.data.push(row)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.data.iter()
    }

    pub fn first(&self) -> Option<&Row> {
        self.data.first()
    }
}

impl IntoIterator for Rows {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a> IntoIterator for &'a Rows {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Hands out the values of one row to the projections that consume them.
#[derive(Debug, Clone)]
pub struct RowReader<'a> {
    values: &'a [Value],
    pos: usize,
}

impl<'a> RowReader<'a> {
    pub fn new(values: &'a [Value]) -> Self {
        Self { values, pos: 0 }
    }

    pub fn next_value(&mut self) -> DataResult<&'a Value> {
        let value = self.values.get(self.pos)
            .ok_or(DataError::IndexOutOfBounds(self.pos, self.values.len()))?;
        self.pos += 1;
        Ok(value)
    }

    pub fn take(&mut self, n: usize) -> DataResult<&'a [Value]> {
        let end = self.pos + n;
        if end > self.values.len() {
            return Err(DataError::IndexOutOfBounds(end - 1, self.values.len()));
        }
        let slice = &self.values[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.values.len().saturating_sub(self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_walks_values_in_order() {
        let row = Row::new(vec![], vec![Value::Text("member1".into()), Value::Bigint(10), Value::Null]);
        let mut reader = row.reader();
        assert_eq!(reader.next_value().unwrap(), &Value::Text("member1".into()));
        assert_eq!(reader.take(2).unwrap().len(), 2);
        assert_eq!(reader.remaining(), 0);
        assert!(reader.next_value().is_err());
    }

    #[test]
    fn get_by_column() {
        let row = Row::new(vec!["age".into()], vec![Value::Bigint(20)]);
        assert_eq!(row.get_by_column::<i32>("age").unwrap(), 20);
        assert!(row.get_by_column::<i32>("username").is_err());
    }
}
