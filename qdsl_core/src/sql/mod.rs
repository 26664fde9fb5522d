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
//! SQL rendering.
//!
//! [`SqlBuilder`] carries the whole rendering as default methods; a dialect
//! only supplies identifier quoting and the clauses that differ.
//!

mod sqlite;

pub use sqlite::SqliteBuilder;

use crate::{
    parse_template, DataError, DataResult, DeleteMetadata, Expr, NullHandling, Order, OrderSpecifier,
    QueryMetadata, Source, TemplateElement, UnaryOp, UpdateMetadata, Value, ATOM_PRECEDENCE,
};

/// SQL text plus the values bound to its `?` placeholders, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlWriter {
    sql: String,
    params: Vec<Value>,
}

impl SqlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: &str) {
        self.sql.push_str(fragment);
    }

    pub fn bind(&mut self, value: Value) {
        self.sql.push('?');
        self.params.push(value);
    }

    pub fn finish(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }
}

pub trait SqlBuilder: Send + Sync {
    // ========== Dialect methods (must be implemented) ==========
    fn quote_identifier(&self, identifier: &str) -> String;

    // ========== Statement builders (with default implementation) ==========

    /// Build query SQL.
    fn build_query_sql(&self, metadata: &QueryMetadata) -> DataResult<(String, Vec<Value>)> {
        let mut w = SqlWriter::new();
        self.write_select(&mut w, metadata)?;
        Ok(w.finish())
    }

    /// Build COUNT SQL. Grouped and distinct queries are counted through a
    /// derived table so the count matches the rows the query returns.
    fn build_count_sql(&self, metadata: &QueryMetadata) -> DataResult<(String, Vec<Value>)> {
        let inner = metadata.without_paging();
        let mut w = SqlWriter::new();
        if inner.is_grouped() || inner.distinct {
            w.push("SELECT COUNT(*) FROM (");
            self.write_select(&mut w, &inner)?;
            w.push(")");
        } else {
            self.check_sources(&inner)?;
            w.push("SELECT COUNT(*)");
            self.write_from(&mut w, &inner)?;
            self.write_where(&mut w, &inner)?;
        }
        Ok(w.finish())
    }

    fn build_update_sql(&self, update: &UpdateMetadata) -> DataResult<(String, Vec<Value>)> {
        if update.sets.is_empty() {
            return Err(DataError::invalid_query("update without any set clause"));
        }
        let mut w = SqlWriter::new();
        w.push("UPDATE ");
        self.write_source(&mut w, &update.target);
        w.push(" SET ");
        for (i, (target, value)) in update.sets.iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            let column = target.column_name()
                .ok_or_else(|| DataError::invalid_query(format!("update target is not a column: {:?}", target)))?;
            w.push(&self.quote_identifier(column));
            w.push(" = ");
            self.write_expr(&mut w, value)?;
        }
        if let Some(predicate) = &update.where_ {
            w.push(" WHERE ");
            self.write_expr(&mut w, predicate)?;
        }
        Ok(w.finish())
    }

    fn build_delete_sql(&self, delete: &DeleteMetadata) -> DataResult<(String, Vec<Value>)> {
        let mut w = SqlWriter::new();
        w.push("DELETE FROM ");
        self.write_source(&mut w, &delete.target);
        if let Some(predicate) = &delete.where_ {
            w.push(" WHERE ");
            self.write_expr(&mut w, predicate)?;
        }
        Ok(w.finish())
    }

    /// Building INSERT SQL
    fn build_insert_sql(&self, table: &str, columns: &[&str], values: Vec<Value>) -> DataResult<(String, Vec<Value>)> {
        if columns.is_empty() || columns.len() != values.len() {
            return Err(DataError::invalid_query(format!(
                "insert into {} with {} columns and {} values", table, columns.len(), values.len()
            )));
        }
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.quote_identifier(table),
            self.build_column_list(columns),
            placeholders
        );
        Ok((sql, values))
    }

    fn build_update_by_id_sql(
        &self,
        table: &str,
        id_column: &str,
        columns: &[&str],
        values: Vec<Value>,
        id: i64,
    ) -> DataResult<(String, Vec<Value>)> {
        if columns.is_empty() || columns.len() != values.len() {
            return Err(DataError::invalid_query(format!("update of {} without matching values", table)));
        }
        let assignments = columns.iter()
            .map(|c| format!("{} = ?", self.quote_identifier(c)))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?",
            self.quote_identifier(table),
            assignments,
            self.quote_identifier(id_column)
        );
        let mut params = values;
        params.push(Value::Bigint(id));
        Ok((sql, params))
    }

    fn build_select_by_id_sql(&self, table: &str, columns: &[&str], id_column: &str, id: i64) -> (String, Vec<Value>) {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?",
            self.build_column_list(columns),
            self.quote_identifier(table),
            self.quote_identifier(id_column)
        );
        (sql, vec![Value::Bigint(id)])
    }

    fn build_select_all_sql(&self, table: &str, columns: &[&str], id_column: &str) -> String {
        format!(
            "SELECT {} FROM {} ORDER BY {}",
            self.build_column_list(columns),
            self.quote_identifier(table),
            self.quote_identifier(id_column)
        )
    }

    fn build_delete_by_id_sql(&self, table: &str, id_column: &str, id: i64) -> (String, Vec<Value>) {
        let sql = format!(
            "DELETE FROM {} WHERE {} = ?",
            self.quote_identifier(table),
            self.quote_identifier(id_column)
        );
        (sql, vec![Value::Bigint(id)])
    }

    fn build_count_all_sql(&self, table: &str) -> String {
        format!("SELECT COUNT(*) FROM {}", self.quote_identifier(table))
    }

    // ========== SQL fragment construction (with default implementation) ==========

    fn write_select(&self, w: &mut SqlWriter, metadata: &QueryMetadata) -> DataResult<()> {
        self.check_sources(metadata)?;
        let select_list = metadata.select_list();
        if select_list.is_empty() {
            return Err(DataError::invalid_query("query has no projection"));
        }
        w.push(if metadata.distinct { "SELECT DISTINCT " } else { "SELECT " });
        for (i, item) in select_list.iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            self.write_select_item(w, item)?;
        }
        self.write_from(w, metadata)?;
        self.write_where(w, metadata)?;
        if !metadata.group_by.is_empty() {
            w.push(" GROUP BY ");
            self.write_list(w, &metadata.group_by)?;
        }
        if let Some(having) = &metadata.having {
            w.push(" HAVING ");
            self.write_expr(w, having)?;
        }
        if !metadata.order_by.is_empty() {
            w.push(" ORDER BY ");
            for (i, order) in metadata.order_by.iter().enumerate() {
                if i > 0 {
                    w.push(", ");
                }
                self.write_order(w, order)?;
            }
        }
        let pagination = self.build_pagination_clause(metadata.limit, metadata.offset);
        if !pagination.is_empty() {
            w.push(" ");
            w.push(&pagination);
        }
        Ok(())
    }

    fn check_sources(&self, metadata: &QueryMetadata) -> DataResult<()> {
        if metadata.sources.is_empty() {
            return Err(DataError::invalid_query("query has no source, call from(..) first"));
        }
        Ok(())
    }

    /// ` FROM` list and joins.
    fn write_from(&self, w: &mut SqlWriter, metadata: &QueryMetadata) -> DataResult<()> {
        w.push(" FROM ");
        for (i, source) in metadata.sources.iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            self.write_source(w, source);
        }
        for join in &metadata.joins {
            w.push(" ");
            w.push(&join.join_type.to_string());
            w.push(" ");
            self.write_source(w, &join.target);
            if let Some(condition) = &join.condition {
                w.push(" ON ");
                self.write_expr(w, condition)?;
            }
        }
        Ok(())
    }

    fn write_where(&self, w: &mut SqlWriter, metadata: &QueryMetadata) -> DataResult<()> {
        if let Some(predicate) = &metadata.where_ {
            w.push(" WHERE ");
            self.write_expr(w, predicate)?;
        }
        Ok(())
    }

    fn write_source(&self, w: &mut SqlWriter, source: &Source) {
        w.push(&self.quote_identifier(source.table));
        w.push(" AS ");
        w.push(&self.quote_identifier(&source.alias));
    }

    fn write_select_item(&self, w: &mut SqlWriter, item: &Expr) -> DataResult<()> {
        match item {
            Expr::Alias { expr, alias } => {
                self.write_expr(w, expr)?;
                w.push(" AS ");
                w.push(&self.quote_identifier(alias));
                Ok(())
            }
            other => self.write_expr(w, other),
        }
    }

    fn write_order(&self, w: &mut SqlWriter, order: &OrderSpecifier) -> DataResult<()> {
        self.write_expr(w, &order.target)?;
        w.push(match order.order {
            Order::Asc => " ASC",
            Order::Desc => " DESC",
        });
        w.push(self.build_null_ordering(order.null_handling));
        Ok(())
    }

    fn write_list(&self, w: &mut SqlWriter, exprs: &[Expr]) -> DataResult<()> {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            self.write_expr(w, expr)?;
        }
        Ok(())
    }

    /// Writes `expr`, parenthesised when it binds looser than `min_precedence`.
    fn write_operand(&self, w: &mut SqlWriter, expr: &Expr, min_precedence: u8) -> DataResult<()> {
        if expr.precedence() < min_precedence {
            w.push("(");
            self.write_expr(w, expr)?;
            w.push(")");
            Ok(())
        } else {
            self.write_expr(w, expr)
        }
    }

    fn write_expr(&self, w: &mut SqlWriter, expr: &Expr) -> DataResult<()> {
        match expr {
            Expr::Column { alias, column, .. } => {
                w.push(&self.quote_identifier(alias));
                w.push(".");
                w.push(&self.quote_identifier(column));
            }
            Expr::Value(value) => w.bind(value.clone()),
            Expr::Unary { op: UnaryOp::Not, expr } => {
                w.push("NOT ");
                self.write_operand(w, expr, ATOM_PRECEDENCE)?;
            }
            Expr::Unary { op, expr } => {
                self.write_operand(w, expr, 5)?;
                w.push(if *op == UnaryOp::IsNull { " IS NULL" } else { " IS NOT NULL" });
            }
            Expr::Binary { op, left, right } => {
                let precedence = op.precedence();
                self.write_operand(w, left, precedence)?;
                w.push(" ");
                w.push(&op.to_string());
                w.push(" ");
                // Equal precedence on the right only regroups under the same associative operator.
                let right_min = match &**right {
                    Expr::Binary { op: right_op, .. } if right_op == op && op.is_associative() => precedence,
                    _ => precedence + 1,
                };
                self.write_operand(w, right, right_min)?;
            }
            Expr::Between { expr, low, high, negated } => {
                self.write_operand(w, expr, 5)?;
                w.push(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
                self.write_operand(w, low, 5)?;
                w.push(" AND ");
                self.write_operand(w, high, 5)?;
            }
            Expr::InList { expr, list, negated } => {
                self.write_operand(w, expr, 5)?;
                w.push(if *negated { " NOT IN (" } else { " IN (" });
                self.write_list(w, list)?;
                w.push(")");
            }
            Expr::InSubQuery { expr, query, negated } => {
                self.write_operand(w, expr, 5)?;
                w.push(if *negated { " NOT IN (" } else { " IN (" });
                self.write_select(w, query)?;
                w.push(")");
            }
            Expr::Function { name, args, distinct } => {
                w.push(name);
                w.push("(");
                if *distinct {
                    w.push("DISTINCT ");
                }
                self.write_list(w, args)?;
                w.push(")");
            }
            Expr::Case { operand, whens, otherwise } => {
                w.push("CASE");
                if let Some(operand) = operand {
                    w.push(" ");
                    self.write_expr(w, operand)?;
                }
                for (condition, result) in whens {
                    w.push(" WHEN ");
                    self.write_expr(w, condition)?;
                    w.push(" THEN ");
                    self.write_expr(w, result)?;
                }
                if let Some(otherwise) = otherwise {
                    w.push(" ELSE ");
                    self.write_expr(w, otherwise)?;
                }
                w.push(" END");
            }
            Expr::Cast { expr, target } => {
                w.push("CAST(");
                self.write_expr(w, expr)?;
                w.push(" AS ");
                w.push(target);
                w.push(")");
            }
            Expr::Template { template, args } => {
                for element in parse_template(template) {
                    match element {
                        TemplateElement::Text(text) => w.push(text),
                        TemplateElement::Arg(index) => {
                            let arg = args.get(index)
                                .ok_or(DataError::IndexOutOfBounds(index, args.len()))?;
                            self.write_operand(w, arg, ATOM_PRECEDENCE)?;
                        }
                    }
                }
            }
            Expr::SubQuery(query) => {
                w.push("(");
                self.write_select(w, query)?;
                w.push(")");
            }
            Expr::Alias { expr, .. } => self.write_expr(w, expr)?,
        }
        Ok(())
    }

    /// Build paging clauses.
    fn build_pagination_clause(&self, limit: Option<u64>, offset: Option<u64>) -> String {
        match (limit, offset) {
            (Some(limit), Some(offset)) => format!("LIMIT {} OFFSET {}", limit, offset),
            (Some(limit), None) => format!("LIMIT {}", limit),
            (None, Some(offset)) => format!("LIMIT 18446744073709551615 OFFSET {}", offset),
            (None, None) => String::new(),
        }
    }

    fn build_null_ordering(&self, null_handling: NullHandling) -> &'static str {
        match null_handling {
            NullHandling::Default => "",
            NullHandling::NullsFirst => " NULLS FIRST",
            NullHandling::NullsLast => " NULLS LAST",
        }
    }

    /// Building a list of columns
    fn build_column_list(&self, columns: &[&str]) -> String {
        columns.iter()
            .map(|c| self.quote_identifier(c))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
