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
//! Repository with generic operations and custom searches.
//!

use qdsl::dto::MemberSearchCondition;
use qdsl::repository::{CrudRepository, MemberRepository, MemberRepositoryCustom, TeamRepository};
use qdsl::*;
mod common;
use common::*;

fn save_fixture(session: &Session) {
    let team_repository = TeamRepository::new(session);
    let member_repository = MemberRepository::new(session);

    let mut teams = vec![Team::new("teamA"), Team::new("teamB")];
    team_repository.save_all(&mut teams).unwrap();

    let mut members = vec![
        Member::with_team("member1", 10, &teams[0]),
        Member::with_team("member2", 20, &teams[0]),
        Member::with_team("member3", 30, &teams[1]),
        Member::with_team("member4", 40, &teams[1]),
    ];
    member_repository.save_all(&mut members).unwrap();
}

#[test]
fn basic_test() {
    let (_pool, session) = create_empty();
    let repository = MemberRepository::new(&session);

    let mut member1 = Member::with_age("member1", 10);
    repository.save(&mut member1).unwrap();
    let id = member1.id.expect("generated id");

    assert_eq!(repository.find_by_id(id).unwrap(), Some(member1.clone()));
    assert_eq!(repository.find_all().unwrap(), vec![member1.clone()]);
    assert_eq!(repository.find_by_username("member1").unwrap(), vec![member1.clone()]);
    assert!(repository.exists_by_id(id).unwrap());
    assert_eq!(repository.count().unwrap(), 1);

    member1.age = 11;
    repository.save(&mut member1).unwrap();
    assert_eq!(repository.find_by_id(id).unwrap().map(|m| m.age), Some(11));

    repository.delete(&member1).unwrap();
    assert!(!repository.exists_by_id(id).unwrap());
}

#[test]
fn delete_all_empties_the_table() {
    let (_pool, session) = create_empty();
    save_fixture(&session);
    let members = MemberRepository::new(&session);
    assert_eq!(members.count().unwrap(), 4);
    members.delete_all().unwrap();
    assert_eq!(members.count().unwrap(), 0);
    assert_eq!(TeamRepository::new(&session).count().unwrap(), 2);
}

#[test]
fn where_test() {
    let (_pool, session) = create_empty();
    save_fixture(&session);
    let repository = MemberRepository::new(&session);

    let condition = MemberSearchCondition::new().set_team_name("teamA").set_age_goe(11).set_age_loe(22);
    let result = repository.search(&condition).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].username.as_deref(), Some("member2"));

    let condition = MemberSearchCondition::new().set_team_name("teamB").set_age_goe(35).set_age_loe(40);
    let result = repository.search(&condition).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].username.as_deref(), Some("member4"));
}

#[test]
fn search_page_simple() {
    let (_pool, session) = create_empty();
    save_fixture(&session);
    let repository = MemberRepository::new(&session);

    let page = repository.search_page_simple(&MemberSearchCondition::new(), PageRequest::of(0, 3)).unwrap();
    assert_eq!(page.size(), 3);
    assert_eq!(page.number_of_elements(), 3);
    assert_eq!(page.total_elements(), 4);
    assert_eq!(page.total_pages(), 2);
    assert!(page.has_next());

    let usernames: Vec<Option<&str>> = page.content().iter().map(|dto| dto.username.as_deref()).collect();
    assert_eq!(usernames, vec![Some("member1"), Some("member2"), Some("member3")]);
}

#[test]
fn search_page_complex() {
    let (_pool, session) = create_empty();
    save_fixture(&session);
    let repository = MemberRepository::new(&session);

    let page = repository.search_page_complex(&MemberSearchCondition::new(), PageRequest::of(0, 3)).unwrap();
    assert_eq!(page.size(), 3);
    assert_eq!(page.total_elements(), 4);

    let last = repository.search_page_complex(&MemberSearchCondition::new(), PageRequest::of(1, 3)).unwrap();
    assert_eq!(last.number_of_elements(), 1);
    assert_eq!(last.total_elements(), 4);
    assert!(last.is_last());
}

/// A short first page does not need the count query.
#[test]
fn search_page_count_optimisation() {
    let counter = CountQueryCounter::default();
    let pool = Pool::new(create_test_cfg()).unwrap().with_interceptor(counter.clone());
    let (_pool, session) = create_empty_with(pool);
    save_fixture(&session);
    let repository = MemberRepository::new(&session);

    let condition = MemberSearchCondition::new().set_team_name("teamA");
    let page = repository.search_page_complex(&condition, PageRequest::of(0, 10)).unwrap();
    assert_eq!(page.total_elements(), 2);
    assert_eq!(page.total_pages(), 1);
    assert!(page.is_first() && page.is_last());
    assert_eq!(counter.get(), 0);

    repository.search_page_complex(&MemberSearchCondition::new(), PageRequest::of(0, 2)).unwrap();
    assert_eq!(counter.get(), 1);

    repository.search_page_simple(&condition, PageRequest::of(0, 10)).unwrap();
    assert_eq!(counter.get(), 2);
}
