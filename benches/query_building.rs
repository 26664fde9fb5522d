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

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::time::Duration;
use qdsl::dto::MemberSearchCondition;
use qdsl::repository::{MemberRepository, MemberRepositoryCustom};
use qdsl::sql::{SqlBuilder, SqliteBuilder};
use qdsl::*;

fn search_query(member: &QMember, team: &QTeam) -> QueryMetadata {
    sub_select((member.username.clone(), member.age.clone(), team.name.clone()))
        .from(member)
        .left_join(&member.team, team)
        .where_all([
            Some(member.username.eq("member1")),
            Some(team.name.eq("teamA")),
            Some(member.age.goe(10)),
            None,
        ])
        .order_by(member.age.desc())
        .offset(10)
        .limit(20)
        .into_metadata()
}

pub fn bench_query_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_building");
    group.measurement_time(Duration::from_secs(3));
    let builder = SqliteBuilder::default();
    let member = QMember::member();
    let team = QTeam::team();

    group.bench_function("render_search", |b| {
        b.iter(|| {
            let metadata = search_query(&member, &team);
            black_box(builder.build_query_sql(&metadata))
        });
    });

    group.bench_function("render_count", |b| {
        let metadata = search_query(&member, &team);
        b.iter(|| black_box(builder.build_count_sql(&metadata)));
    });

    group.bench_function("render_case_and_subquery", |b| {
        let sub = QMember::new("memberSub");
        b.iter(|| {
            let rank = CaseBuilder::new()
                .when(member.age.between(0, 20)).then(2)
                .when(member.age.between(21, 30)).then(1)
                .otherwise(3);
            let metadata = sub_select((member.username.clone(), rank.clone()))
                .from(&member)
                .where_(member.age.goe(sub_select(sub.age.avg()).from(&sub)))
                .order_by(rank.desc())
                .into_metadata();
            black_box(builder.build_query_sql(&metadata))
        });
    });

    group.finish();
}

pub fn bench_search_execution(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_execution");
    group.measurement_time(Duration::from_secs(3));

    let cfg = QdslConfig::new("sqlite::memory:").expect("memory url").set_show_sql(false);
    let pool = Pool::new(cfg).expect("pool");
    pool.create_schema().expect("schema");
    let session = pool.session().expect("session");
    let mut team = Team::new("teamA");
    session.persist(&mut team).expect("team");
    for i in 0..100 {
        session.persist(&mut Member::with_team(format!("member{}", i), i, &team)).expect("member");
    }
    let repository = MemberRepository::new(&session);
    let condition = MemberSearchCondition::new().set_team_name("teamA").set_age_goe(20).set_age_loe(60);

    group.bench_function("search_page_complex", |b| {
        b.iter(|| black_box(repository.search_page_complex(&condition, PageRequest::of(1, 10))));
    });

    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_secs(1))
        .sample_size(20);
    targets = bench_query_building, bench_search_execution
);

criterion_main!(benches);
