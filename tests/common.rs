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
//! Shared fixture: an in-memory database with two teams and four members.
//!
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use qdsl::interceptor::ExecuteContext;
use qdsl::*;

pub struct Fixture {
    pub pool: Pool,
    pub session: Session,
    pub team_a: Team,
    pub team_b: Team,
    pub members: Vec<Member>,
}

pub fn create_test_cfg() -> QdslConfig {
    QdslConfig::new("sqlite::memory:")
        .expect("memory url")
        .set_log_level(LogLevel::Debug)
        .set_show_sql(true)
}

/// Counts the `SELECT COUNT(..)` statements that reach the database.
#[derive(Clone, Default)]
pub struct CountQueryCounter {
    pub seen: Arc<AtomicUsize>,
}

impl CountQueryCounter {
    pub fn get(&self) -> usize {
        self.seen.load(Ordering::SeqCst)
    }
}

impl SqlInterceptor for CountQueryCounter {
    fn name(&self) -> &'static str {
        "count_query_counter"
    }

    fn before_execute(&self, ctx: &mut ExecuteContext) -> qdsl::Result<()> {
        if ctx.sql().starts_with("SELECT COUNT(") {
            self.seen.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

/// Empty schema, nothing persisted.
pub fn create_empty() -> (Pool, Session) {
    create_empty_with(Pool::new(create_test_cfg()).expect("pool"))
}

pub fn create_empty_with(pool: Pool) -> (Pool, Session) {
    init_test_logging(LogLevel::Debug);
    pool.create_schema().expect("schema");
    let session = pool.session().expect("session");
    (pool, session)
}

/// teamA: member1 (10), member2 (20); teamB: member3 (30), member4 (40).
pub fn create_fixture() -> Fixture {
    create_fixture_with(Pool::new(create_test_cfg()).expect("pool"))
}

pub fn create_fixture_with(pool: Pool) -> Fixture {
    let (pool, session) = create_empty_with(pool);

    let mut team_a = Team::new("teamA");
    let mut team_b = Team::new("teamB");
    session.persist(&mut team_a).expect("persist teamA");
    session.persist(&mut team_b).expect("persist teamB");

    let mut members = vec![
        Member::with_team("member1", 10, &team_a),
        Member::with_team("member2", 20, &team_a),
        Member::with_team("member3", 30, &team_b),
        Member::with_team("member4", 40, &team_b),
    ];
    for member in members.iter_mut() {
        session.persist(member).expect("persist member");
    }

    Fixture { pool, session, team_a, team_b, members }
}
