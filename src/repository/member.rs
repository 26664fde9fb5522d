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

use qdsl_core::{Predicate, QueryBase};
use crate::domain::{Member, QMember, QTeam};
use crate::dto::{MemberSearchCondition, MemberTeamDto, QMemberTeamDto};
use crate::errors::Result;
use crate::page::{Page, PageRequest, PageableExecution};
use crate::query::SelectQuery;
use crate::session::Session;
use super::{age_goe, age_loe, team_name_eq, username_eq, CrudRepository};

/// Searches that go beyond the generic operations.
pub trait MemberRepositoryCustom {
    fn search(&self, condition: &MemberSearchCondition) -> Result<Vec<MemberTeamDto>>;

    /// Content and total from one `fetch_results`.
    fn search_page_simple(&self, condition: &MemberSearchCondition, pageable: PageRequest) -> Result<Page<MemberTeamDto>>;

    /// Content query plus a count query that only runs when the total can
    /// not be derived from the content.
    fn search_page_complex(&self, condition: &MemberSearchCondition, pageable: PageRequest) -> Result<Page<MemberTeamDto>>;
}

pub struct MemberRepository<'s> {
    session: &'s Session,
}

impl<'s> MemberRepository<'s> {
    pub fn new(session: &'s Session) -> Self {
        MemberRepository { session }
    }

    pub fn find_by_username(&self, username: &str) -> Result<Vec<Member>> {
        let member = QMember::member();
        self.session.query_factory()
            .select_from(&member)
            .where_(member.username.eq(username))
            .fetch()
    }

    fn search_query(&self, condition: &MemberSearchCondition) -> SelectQuery<'s, QMemberTeamDto> {
        let member = QMember::member();
        let team = QTeam::team();
        self.session.query_factory()
            .select(QMemberTeamDto::new(&member.id, &member.username, &member.age, &team.id, &team.name))
            .from(&member)
            .left_join(&member.team, &team)
            .where_all(search_predicates(condition))
    }
}

/// The present search criteria, in `username`, `team name`, `age >=`,
/// `age <=` order.
pub(crate) fn search_predicates(condition: &MemberSearchCondition) -> Vec<Option<Predicate>> {
    vec![
        username_eq(condition.username.as_deref()),
        team_name_eq(condition.team_name.as_deref()),
        age_goe(condition.age_goe),
        age_loe(condition.age_loe),
    ]
}

impl CrudRepository<Member> for MemberRepository<'_> {
    fn session(&self) -> &Session {
        self.session
    }
}

impl MemberRepositoryCustom for MemberRepository<'_> {
    fn search(&self, condition: &MemberSearchCondition) -> Result<Vec<MemberTeamDto>> {
        self.search_query(condition).fetch()
    }

    fn search_page_simple(&self, condition: &MemberSearchCondition, pageable: PageRequest) -> Result<Page<MemberTeamDto>> {
        let results = self.search_query(condition)
            .offset(pageable.offset())
            .limit(pageable.page_size())
            .fetch_results()?;
        Ok(Page::new(results.results, pageable, results.total))
    }

    fn search_page_complex(&self, condition: &MemberSearchCondition, pageable: PageRequest) -> Result<Page<MemberTeamDto>> {
        let content = self.search_query(condition)
            .offset(pageable.offset())
            .limit(pageable.page_size())
            .fetch()?;

        let member = QMember::member();
        let team = QTeam::team();
        let count_query = self.session.query_factory()
            .select(member.id.clone())
            .from(&member)
            .left_join(&member.team, &team)
            .where_all(search_predicates(condition));

        PageableExecution::get_page(content, pageable, || count_query.fetch_count())
    }
}
