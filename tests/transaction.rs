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
//! Explicit transactions on a session.
//!

use std::sync::{Arc, Mutex};
use qdsl::interceptor::{ExecuteContext, ExecuteResult, OperationType};
use qdsl::*;
mod common;
use common::*;

/// Records the row count reported for each transaction-control statement.
#[derive(Clone, Default)]
struct TransactionResults {
    seen: Arc<Mutex<Vec<(String, u64)>>>,
}

impl SqlInterceptor for TransactionResults {
    fn name(&self) -> &'static str {
        "transaction_results"
    }

    fn supports_operation(&self, operation: &OperationType) -> bool {
        *operation == OperationType::Transaction
    }

    fn before_execute(&self, _ctx: &mut ExecuteContext) -> qdsl::Result<()> {
        Ok(())
    }

    fn after_execute(&self, ctx: &mut ExecuteContext, result: &mut qdsl::Result<ExecuteResult>) -> qdsl::Result<()> {
        if let Ok(result) = result {
            self.seen.lock().unwrap().push((ctx.sql().to_string(), result.len()));
        }
        Ok(())
    }
}

fn insert_orphan_member(session: &Session) -> qdsl::Result<u64> {
    session.execute(
        "INSERT INTO member (username, age, team_id) VALUES (?, ?, ?)",
        vec![Value::from("orphan"), Value::Int(1), Value::Bigint(999)],
    )
}

#[test]
fn commit_keeps_changes() {
    let (_pool, session) = create_empty();
    session.transaction(|s| s.persist(&mut Team::new("teamA"))).unwrap();
    assert_eq!(session.count::<Team>().unwrap(), 1);
    assert!(!session.in_transaction());
}

#[test]
fn error_rolls_back() {
    let (_pool, session) = create_empty();
    let result: Result<()> = session.transaction(|s| {
        s.persist(&mut Team::new("teamA"))?;
        Err(QdslError::transaction("abort"))
    });
    assert!(result.is_err());
    assert_eq!(session.count::<Team>().unwrap(), 0);
    assert!(!session.in_transaction());
}

#[test]
fn manual_rollback_discards_bulk_update() {
    let f = create_fixture();
    let member = QMember::member();
    let session = &f.session;

    session.begin().unwrap();
    assert!(matches!(session.begin(), Err(QdslError::Transaction(_))));
    session.query_factory().update(&member).set(&member.age, 0).execute().unwrap();
    session.rollback().unwrap();

    let ages = session.query_factory().select(member.age.clone()).from(&member).order_by(member.age.asc()).fetch().unwrap();
    assert_eq!(ages, vec![10, 20, 30, 40]);
    assert!(matches!(session.commit(), Err(QdslError::Transaction(_))));
}

#[test]
fn failed_commit_is_rolled_back() {
    let (_pool, session) = create_empty();
    let result = session.transaction(|s| {
        s.execute_batch("PRAGMA defer_foreign_keys = ON")?;
        insert_orphan_member(s)
    });
    assert!(matches!(result, Err(QdslError::Database(_))), "{:?}", result);
    assert!(!session.in_transaction());
    assert_eq!(session.count::<Member>().unwrap(), 0);

    session.begin().unwrap();
    session.persist(&mut Team::new("teamA")).unwrap();
    session.commit().unwrap();
    assert_eq!(session.count::<Team>().unwrap(), 1);
}

#[test]
fn failed_manual_commit_keeps_transaction_open() {
    let (_pool, session) = create_empty();
    session.begin().unwrap();
    session.execute_batch("PRAGMA defer_foreign_keys = ON").unwrap();
    insert_orphan_member(&session).unwrap();

    assert!(matches!(session.commit(), Err(QdslError::Database(_))));
    assert!(session.in_transaction());
    session.rollback().unwrap();
    assert!(!session.in_transaction());
    assert_eq!(session.count::<Member>().unwrap(), 0);
}

#[test]
fn transaction_statements_report_no_rows() {
    let recorder = TransactionResults::default();
    let pool = Pool::new(create_test_cfg()).unwrap().with_interceptor(recorder.clone());
    let f = create_fixture_with(pool);
    let member = QMember::member();

    f.session.begin().unwrap();
    let updated = f.session.query_factory().update(&member).set(&member.age, 0).execute().unwrap();
    assert_eq!(updated, 4);
    f.session.rollback().unwrap();

    let seen = recorder.seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![("BEGIN TRANSACTION".to_string(), 0), ("ROLLBACK TRANSACTION".to_string(), 0)]
    );
}
