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
//! A unit of work over one pooled connection.
//!
//! Entities are plain values: nothing is cached, so every read goes to the
//! store and bulk statements are visible to the next read right away.
//!

use std::cell::Cell;
use std::sync::Arc;
use rusqlite::params_from_iter;
use qdsl_core::sql::{SqlBuilder, SqliteBuilder};
use qdsl_core::{Entity, Row, Rows, Value};
use crate::errors::{QdslError, Result};
use crate::interceptor::{ExecuteContext, ExecuteResult, InterceptorChain};
use crate::pool::SqliteConnection;
use crate::query::QueryFactory;

pub struct Session {
    conn: SqliteConnection,
    interceptor_chain: Arc<InterceptorChain>,
    builder: Arc<SqliteBuilder>,
    in_transaction: Cell<bool>,
}

impl Session {
    pub fn new(conn: SqliteConnection, interceptor_chain: Arc<InterceptorChain>, builder: Arc<SqliteBuilder>) -> Self {
        Session {
            conn,
            interceptor_chain,
            builder,
            in_transaction: Cell::new(false),
        }
    }

    pub fn builder(&self) -> &SqliteBuilder {
        &self.builder
    }

    pub fn query_factory(&self) -> QueryFactory<'_> {
        QueryFactory::new(self)
    }

    // ========== Raw statements ==========

    /// Runs a statement returning rows.
    pub fn query(&self, sql: &str, params: Vec<Value>) -> Result<Rows> {
        match self.intercepted(sql, params, true)? {
            ExecuteResult::Rows(rows) => Ok(rows),
            ExecuteResult::AffectedRows(_) => Ok(Rows::new()),
        }
    }

    /// Runs a statement and returns the number of affected rows.
    pub fn execute(&self, sql: &str, params: Vec<Value>) -> Result<u64> {
        Ok(self.intercepted(sql, params, false)?.len())
    }

    /// Runs several `;`-separated statements without parameters.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        let mut ctx = ExecuteContext::new(sql.to_string(), Vec::new());
        self.interceptor_chain.before_query(&mut ctx)?;
        let mut result = self.conn.execute_batch(ctx.sql())
            .map(|_| ExecuteResult::AffectedRows(0))
            .map_err(QdslError::from);
        self.interceptor_chain.after_query(&mut ctx, &mut result)?;
        result.map(|_| ())
    }

    /// Execute with interceptors
    fn intercepted(&self, sql: &str, params: Vec<Value>, returns_rows: bool) -> Result<ExecuteResult> {
        let mut ctx = ExecuteContext::new(sql.to_string(), params);
        self.interceptor_chain.before_query(&mut ctx)?;

        let mut result = if returns_rows {
            self.inner_query(ctx.sql(), ctx.params()).map(ExecuteResult::Rows)
        } else {
            self.inner_execute(ctx.sql(), ctx.params()).map(ExecuteResult::AffectedRows)
        };

        self.interceptor_chain.after_query(&mut ctx, &mut result)?;
        result
    }

    fn inner_execute(&self, sql: &str, params: &[Value]) -> Result<u64> {
        let mut stmt = self.conn.prepare(sql)?;
        let affected_rows = stmt.execute(params_from_iter(params.iter().map(to_sqlite_value)))?;
        Ok(affected_rows as u64)
    }

    fn inner_query(&self, sql: &str, params: &[Value]) -> Result<Rows> {
        let mut stmt = self.conn.prepare(sql)?;
        let column_names: Vec<String> = stmt.column_names().iter().map(ToString::to_string).collect();
        let column_count = stmt.column_count();
        let mut records = Rows::new();
        let mut rows = stmt.query(params_from_iter(params.iter().map(to_sqlite_value)))?;
        while let Some(row) = rows.next()? {
            let mut record: Vec<Value> = Vec::with_capacity(column_count);
            for i in 0..column_count {
                let raw: rusqlite::types::Value = row.get(i)?;
                record.push(from_sqlite_value(raw));
            }
            records.push(Row::new(column_names.clone(), record));
        }
        Ok(records)
    }

    pub fn last_insert_id(&self) -> i64 {
        self.conn.last_insert_rowid()
    }

    // ========== Transactions ==========

    pub fn begin(&self) -> Result<()> {
        if self.in_transaction.get() {
            return Err(QdslError::transaction("transaction already active"));
        }
        self.execute_batch("BEGIN TRANSACTION")?;
        self.in_transaction.set(true);
        Ok(())
    }

    pub fn commit(&self) -> Result<()> {
        if !self.in_transaction.get() {
            return Err(QdslError::transaction("no active transaction to commit"));
        }
        let result = self.execute_batch("COMMIT TRANSACTION");
        // A failed COMMIT (deferred constraint, busy) leaves the transaction open.
        self.in_transaction.set(!self.conn.is_autocommit());
        result
    }

    pub fn rollback(&self) -> Result<()> {
        if !self.in_transaction.get() {
            return Err(QdslError::transaction("no active transaction to roll back"));
        }
        let result = self.execute_batch("ROLLBACK TRANSACTION");
        self.in_transaction.set(!self.conn.is_autocommit());
        result
    }

    pub fn in_transaction(&self) -> bool {
        self.in_transaction.get()
    }

    /// Runs `f` in a transaction: committed on `Ok`, rolled back on `Err`.
    pub fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Session) -> Result<T>,
    {
        self.begin()?;
        match f(self) {
            Ok(value) => match self.commit() {
                Ok(()) => Ok(value),
                Err(e) => {
                    if self.in_transaction() {
                        if let Err(rollback_err) = self.rollback() {
                            tracing::error!("rollback failed after {}: {}", e, rollback_err);
                        }
                    }
                    Err(e)
                }
            },
            Err(e) => {
                if let Err(rollback_err) = self.rollback() {
                    tracing::error!("rollback failed after {}: {}", e, rollback_err);
                }
                Err(e)
            }
        }
    }

    // ========== Entities ==========

    /// Inserts a transient entity and assigns the generated id. An entity
    /// that already carries an id is inserted with it.
    pub fn persist<E: Entity>(&self, entity: &mut E) -> Result<()> {
        let values = entity.to_values();
        let (columns, values) = match entity.id() {
            Some(_) => (E::COLUMNS.to_vec(), values),
            None => (E::COLUMNS[1..].to_vec(), values.into_iter().skip(1).collect()),
        };
        let (sql, params) = self.builder.build_insert_sql(E::TABLE, &columns, values)?;
        self.execute(&sql, params)?;
        if entity.id().is_none() {
            entity.set_id(self.last_insert_id());
        }
        Ok(())
    }

    /// Writes the entity's state: update by id, insert when it has no id or
    /// its row is gone.
    pub fn merge<E: Entity>(&self, entity: &mut E) -> Result<()> {
        let id = match entity.id() {
            Some(id) => id,
            None => return self.persist(entity),
        };
        let values = entity.to_values().into_iter().skip(1).collect();
        let (sql, params) = self.builder.build_update_by_id_sql(E::TABLE, E::ID_COLUMN, &E::COLUMNS[1..], values, id)?;
        if self.execute(&sql, params)? == 0 {
            self.persist(entity)?;
        }
        Ok(())
    }

    pub fn find<E: Entity>(&self, id: i64) -> Result<Option<E>> {
        let (sql, params) = self.builder.build_select_by_id_sql(E::TABLE, E::COLUMNS, E::ID_COLUMN, id);
        let rows = self.query(&sql, params)?;
        match rows.first() {
            Some(row) => Ok(Some(E::from_values(row.values())?)),
            None => Ok(None),
        }
    }

    pub fn find_all<E: Entity>(&self) -> Result<Vec<E>> {
        let sql = self.builder.build_select_all_sql(E::TABLE, E::COLUMNS, E::ID_COLUMN);
        self.query(&sql, Vec::new())?
            .iter()
            .map(|row| E::from_values(row.values()).map_err(QdslError::from))
            .collect()
    }

    pub fn count<E: Entity>(&self) -> Result<i64> {
        let sql = self.builder.build_count_all_sql(E::TABLE);
        let rows = self.query(&sql, Vec::new())?;
        match rows.first() {
            Some(row) => Ok(row.get::<i64>(0)?),
            None => Ok(0),
        }
    }

    /// Deletes the entity's row; `false` when it had none.
    pub fn remove<E: Entity>(&self, entity: &E) -> Result<bool> {
        match entity.id() {
            Some(id) => self.remove_by_id::<E>(id),
            None => Ok(false),
        }
    }

    pub fn remove_by_id<E: Entity>(&self, id: i64) -> Result<bool> {
        let (sql, params) = self.builder.build_delete_by_id_sql(E::TABLE, E::ID_COLUMN, id);
        Ok(self.execute(&sql, params)? > 0)
    }

    pub fn remove_all<E: Entity>(&self) -> Result<u64> {
        let sql = format!("DELETE FROM {}", self.builder.quote_identifier(E::TABLE));
        self.execute(&sql, Vec::new())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.in_transaction.get() {
            tracing::warn!("session dropped inside a transaction, rolling back");
            if let Err(e) = self.conn.execute_batch("ROLLBACK TRANSACTION") {
                tracing::error!("rollback on drop failed: {}", e);
            }
        }
    }
}

fn to_sqlite_value(value: &Value) -> rusqlite::types::Value {
    use rusqlite::types::Value as SqliteValue;
    match value {
        Value::Null => SqliteValue::Null,
        Value::Bool(v) => SqliteValue::Integer(i64::from(*v)),
        Value::Int(v) => SqliteValue::Integer(i64::from(*v)),
        Value::Bigint(v) => SqliteValue::Integer(*v),
        Value::Double(v) => SqliteValue::Real(*v),
        Value::Text(v) => SqliteValue::Text(v.clone()),
        Value::Blob(v) => SqliteValue::Blob(v.clone()),
    }
}

fn from_sqlite_value(value: rusqlite::types::Value) -> Value {
    match value {
        rusqlite::types::Value::Null => Value::Null,
        rusqlite::types::Value::Integer(i) => Value::Bigint(i),
        rusqlite::types::Value::Real(f) => Value::Double(f),
        rusqlite::types::Value::Text(text) => Value::Text(text),
        rusqlite::types::Value::Blob(bytes) => Value::Blob(bytes),
    }
}
