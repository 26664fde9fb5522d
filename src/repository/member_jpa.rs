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

use qdsl_core::{BooleanBuilder, Entity, QueryBase, Value};
use crate::domain::{Member, QMember, QTeam};
use crate::dto::{MemberSearchCondition, MemberTeamDto, QMemberTeamDto};
use crate::errors::Result;
use crate::session::Session;
use super::predicates::has_text;
use super::search_predicates;

/// Data access written directly against the session, with each lookup in
/// a raw-SQL and a typed-query flavour.
pub struct MemberJpaRepository<'s> {
    session: &'s Session,
}

impl<'s> MemberJpaRepository<'s> {
    pub fn new(session: &'s Session) -> Self {
        MemberJpaRepository { session }
    }

    pub fn save(&self, member: &mut Member) -> Result<()> {
        self.session.persist(member)
    }

    pub fn find_by_id(&self, id: i64) -> Result<Option<Member>> {
        self.session.find(id)
    }

    pub fn find_all(&self) -> Result<Vec<Member>> {
        let sql = "SELECT member_id, username, age, team_id FROM member";
        self.read_members(sql, Vec::new())
    }

    pub fn find_all_querydsl(&self) -> Result<Vec<Member>> {
        self.session.query_factory().select_from(&QMember::member()).fetch()
    }

    pub fn find_by_username(&self, username: &str) -> Result<Vec<Member>> {
        let sql = "SELECT member_id, username, age, team_id FROM member WHERE username = ?";
        self.read_members(sql, vec![Value::from(username)])
    }

    pub fn find_by_username_querydsl(&self, username: &str) -> Result<Vec<Member>> {
        let member = QMember::member();
        self.session.query_factory()
            .select_from(&member)
            .where_(member.username.eq(username))
            .fetch()
    }

    fn read_members(&self, sql: &str, params: Vec<Value>) -> Result<Vec<Member>> {
        let rows = self.session.query(sql, params)?;
        let mut members = Vec::with_capacity(rows.len());
        for row in rows.iter() {
            members.push(Member::from_values(row.values())?);
        }
        Ok(members)
    }

    /// Search with the criteria folded into a [`BooleanBuilder`].
    pub fn search_by_builder(&self, condition: &MemberSearchCondition) -> Result<Vec<MemberTeamDto>> {
        let member = QMember::member();
        let team = QTeam::team();

        let mut builder = BooleanBuilder::new();
        if let Some(username) = has_text(condition.username.as_deref()) {
            builder.and(member.username.eq(username));
        }
        if let Some(team_name) = has_text(condition.team_name.as_deref()) {
            builder.and(team.name.eq(team_name));
        }
        if let Some(age_goe) = condition.age_goe {
            builder.and(member.age.goe(age_goe));
        }
        if let Some(age_loe) = condition.age_loe {
            builder.and(member.age.loe(age_loe));
        }

        self.session.query_factory()
            .select(QMemberTeamDto::new(&member.id, &member.username, &member.age, &team.id, &team.name))
            .from(&member)
            .left_join(&member.team, &team)
            .where_(builder)
            .fetch()
    }

    /// Search with one optional predicate per criterion.
    pub fn search(&self, condition: &MemberSearchCondition) -> Result<Vec<MemberTeamDto>> {
        let member = QMember::member();
        let team = QTeam::team();
        self.session.query_factory()
            .select(QMemberTeamDto::new(&member.id, &member.username, &member.age, &team.id, &team.name))
            .from(&member)
            .left_join(&member.team, &team)
            .where_all(search_predicates(condition))
            .fetch()
    }
}
