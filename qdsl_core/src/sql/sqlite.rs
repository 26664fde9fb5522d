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

use crate::sql::SqlBuilder;

/// Words that must be quoted when used as identifiers.
const RESERVED_KEYWORDS: &[&str] = &[
    "all", "and", "as", "asc", "between", "by", "case", "check", "collate", "column", "default",
    "delete", "desc", "distinct", "else", "end", "escape", "exists", "from", "group", "having",
    "in", "index", "insert", "into", "is", "join", "key", "like", "limit", "not", "null", "offset",
    "on", "or", "order", "primary", "references", "select", "set", "table", "then", "to",
    "union", "update", "values", "when", "where",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteBuilder;

impl SqliteBuilder {
    fn is_reserved_keyword(&self, identifier: &str) -> bool {
        RESERVED_KEYWORDS.contains(&identifier.to_ascii_lowercase().as_str())
    }

    fn is_plain(identifier: &str) -> bool {
        let mut chars = identifier.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}

impl SqlBuilder for SqliteBuilder {
    fn quote_identifier(&self, identifier: &str) -> String {
        if Self::is_plain(identifier) && !self.is_reserved_keyword(identifier) {
            identifier.to_string()
        } else {
            format!("\"{}\"", identifier.replace('"', "\"\""))
        }
    }

    // SQLite uses MySQL-style paging, -1 meaning no limit
    fn build_pagination_clause(&self, limit: Option<u64>, offset: Option<u64>) -> String {
        match (limit, offset) {
            (Some(limit), Some(offset)) => format!("LIMIT {} OFFSET {}", limit, offset),
            (Some(limit), None) => format!("LIMIT {}", limit),
            (None, Some(offset)) => format!("LIMIT -1 OFFSET {}", offset),
            (None, None) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        sub_select, BooleanBuilder, CaseBuilder, DataError, DeleteMetadata, Expr, Expression, Expressions,
        QueryBase, QueryMetadata, Source, UpdateMetadata, Value,
    };

    fn age(alias: &str) -> Expression<i32> {
        Expression::new(Expr::column(alias, "age", "age"))
    }

    fn username(alias: &str) -> Expression<Option<String>> {
        Expression::new(Expr::column(alias, "username", "username"))
    }

    fn member_query(projection: Vec<Expr>) -> QueryMetadata {
        QueryMetadata {
            projection,
            sources: vec![Source { table: "member", alias: "member1".to_string() }],
            ..Default::default()
        }
    }

    #[test]
    fn quotes_only_when_needed() {
        let builder = SqliteBuilder::default();
        assert_eq!(builder.quote_identifier("member1"), "member1");
        assert_eq!(builder.quote_identifier("order"), "\"order\"");
        assert_eq!(builder.quote_identifier("user name"), "\"user name\"");
        assert_eq!(builder.quote_identifier("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn renders_select_with_params_in_order() {
        let mut query = member_query(vec![username("member1").expr(), age("member1").expr()]);
        query.add_where(Some(username("member1").eq("member1").and(age("member1").between(10, 30))));
        query.order_by.push(age("member1").desc());
        query.order_by.push(username("member1").asc().nulls_last());
        query.offset = Some(1);
        query.limit = Some(2);
        let (sql, params) = SqliteBuilder::default().build_query_sql(&query).unwrap();
        assert_eq!(
            sql,
            "SELECT member1.username, member1.age FROM member AS member1 \
             WHERE member1.username = ? AND member1.age BETWEEN ? AND ? \
             ORDER BY member1.age DESC, member1.username ASC NULLS LAST LIMIT 2 OFFSET 1"
        );
        assert_eq!(params, vec![Value::from("member1"), Value::Int(10), Value::Int(30)]);
    }

    #[test]
    fn parenthesises_by_precedence() {
        let predicate = age("m").eq(10).or(age("m").eq(20)).and(username("m").is_not_null());
        let mut query = member_query(vec![age("m").expr()]);
        query.sources[0].alias = "m".to_string();
        query.add_where(Some(predicate));
        let (sql, _) = SqliteBuilder::default().build_query_sql(&query).unwrap();
        assert!(sql.ends_with("WHERE (m.age = ? OR m.age = ?) AND m.username IS NOT NULL"), "{}", sql);

        let arithmetic = age("m").add(1).multiply(2);
        let (sql, _) = SqliteBuilder::default()
            .build_query_sql(&member_query(vec![arithmetic.expr()]))
            .unwrap();
        assert!(sql.starts_with("SELECT (m.age + ?) * ?"), "{}", sql);
    }

    #[test]
    fn keeps_parentheses_for_mixed_operators_of_equal_precedence() {
        let render = |expr: Expr| {
            let (sql, _) = SqliteBuilder::default().build_query_sql(&member_query(vec![expr])).unwrap();
            sql
        };
        let sql = render(age("m").multiply(age("m").divide(40)).expr());
        assert!(sql.starts_with("SELECT m.age * (m.age / ?) FROM"), "{}", sql);
        let sql = render(age("m").add(age("m").subtract(1)).expr());
        assert!(sql.starts_with("SELECT m.age + (m.age - ?) FROM"), "{}", sql);
        let sql = render(age("m").multiply(age("m").multiply(2)).expr());
        assert!(sql.starts_with("SELECT m.age * m.age * ? FROM"), "{}", sql);
        let sql = render(age("m").divide(2).multiply(3).expr());
        assert!(sql.starts_with("SELECT m.age / ? * ? FROM"), "{}", sql);
    }

    #[test]
    fn only_offset_uses_unbounded_limit() {
        let mut query = member_query(vec![age("member1").expr()]);
        query.offset = Some(3);
        let (sql, _) = SqliteBuilder::default().build_query_sql(&query).unwrap();
        assert!(sql.ends_with("LIMIT -1 OFFSET 3"));
    }

    #[test]
    fn missing_source_is_an_error() {
        let query = QueryMetadata { projection: vec![age("member1").expr()], ..Default::default() };
        assert!(matches!(
            SqliteBuilder::default().build_query_sql(&query),
            Err(DataError::InvalidQuery(_))
        ));
    }

    #[test]
    fn renders_subqueries_case_and_templates() {
        let mut sub = sub_select(age("memberSub").max());
        sub.metadata_mut().add_source(Source { table: "member", alias: "memberSub".to_string() });
        let mut query = member_query(vec![
            CaseBuilder::new().when(age("member1").between(0, 20)).then("0~20살").otherwise("기타").expr(),
            Expressions::string_template("replace({0}, {1}, {2})", vec![username("member1").expr(), "member".into(), "M".into()]).expr(),
        ]);
        query.add_where(Some(age("member1").eq(sub)));
        let (sql, params) = SqliteBuilder::default().build_query_sql(&query).unwrap();
        assert_eq!(
            sql,
            "SELECT CASE WHEN member1.age BETWEEN ? AND ? THEN ? ELSE ? END, replace(member1.username, ?, ?) \
             FROM member AS member1 \
             WHERE member1.age = (SELECT MAX(memberSub.age) FROM member AS memberSub)"
        );
        assert_eq!(params.len(), 6);
    }

    #[test]
    fn count_wraps_grouped_queries() {
        let mut query = member_query(vec![age("member1").expr()]);
        query.group_by.push(age("member1").expr());
        query.order_by.push(age("member1").asc());
        let (sql, _) = SqliteBuilder::default().build_count_sql(&query).unwrap();
        assert_eq!(
            sql,
            "SELECT COUNT(*) FROM (SELECT member1.age FROM member AS member1 GROUP BY member1.age)"
        );

        let mut plain = member_query(vec![age("member1").expr()]);
        plain.add_where(Some(age("member1").goe(20)));
        plain.limit = Some(2);
        let (sql, params) = SqliteBuilder::default().build_count_sql(&plain).unwrap();
        assert_eq!(sql, "SELECT COUNT(*) FROM member AS member1 WHERE member1.age >= ?");
        assert_eq!(params, vec![Value::Int(20)]);
    }

    #[test]
    fn renders_bulk_statements() {
        let source = Source { table: "member", alias: "member1".to_string() };
        let mut update = UpdateMetadata { target: source.clone(), sets: Vec::new(), where_: None };
        update.sets.push((username("member1").expr(), Expr::value("비회원")));
        update.add_where(Some(age("member1").lt(28)));
        let (sql, params) = SqliteBuilder::default().build_update_sql(&update).unwrap();
        assert_eq!(sql, "UPDATE member AS member1 SET username = ? WHERE member1.age < ?");
        assert_eq!(params.len(), 2);

        let mut delete = DeleteMetadata { target: source, where_: None };
        let mut builder = BooleanBuilder::new();
        builder.and(age("member1").gt(18));
        delete.add_where(builder.build());
        let (sql, _) = SqliteBuilder::default().build_delete_sql(&delete).unwrap();
        assert_eq!(sql, "DELETE FROM member AS member1 WHERE member1.age > ?");
    }

    #[test]
    fn renders_entity_statements() {
        let builder = SqliteBuilder::default();
        let (sql, params) = builder
            .build_insert_sql("member", &["username", "age", "team_id"], vec!["member1".into(), 10.into(), Value::Null])
            .unwrap();
        assert_eq!(sql, "INSERT INTO member (username, age, team_id) VALUES (?, ?, ?)");
        assert_eq!(params.len(), 3);
        assert!(builder.build_insert_sql("member", &["age"], vec![]).is_err());

        let (sql, params) = builder
            .build_update_by_id_sql("team", "team_id", &["name"], vec!["teamA".into()], 1)
            .unwrap();
        assert_eq!(sql, "UPDATE team SET name = ? WHERE team_id = ?");
        assert_eq!(params, vec![Value::from("teamA"), Value::Bigint(1)]);
    }
}
