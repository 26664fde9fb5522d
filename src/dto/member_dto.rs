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

use qdsl_core::{DataResult, Expr, Expression, Projection, RowReader};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemberDto {
    pub username: Option<String>,
    pub age: i32,
}

impl MemberDto {
    pub fn new(username: Option<String>, age: i32) -> Self {
        MemberDto { username, age }
    }
}

/// Same shape as [`MemberDto`] with differently named fields, filled by
/// aliasing the selected expressions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserDto {
    pub name: Option<String>,
    pub age: i32,
}

impl UserDto {
    pub fn new(name: Option<String>, age: i32) -> Self {
        UserDto { name, age }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemberQueryProjectionDto {
    pub username: Option<String>,
    pub age: i32,
}

/// Typed constructor projection of [`MemberQueryProjectionDto`]: argument
/// types are checked when the query is built.
#[derive(Debug, Clone)]
pub struct QMemberQueryProjectionDto {
    username: Expression<Option<String>>,
    age: Expression<i32>,
}

impl QMemberQueryProjectionDto {
    pub fn new(username: &Expression<Option<String>>, age: &Expression<i32>) -> Self {
        QMemberQueryProjectionDto { username: username.clone(), age: age.clone() }
    }
}

impl Projection for QMemberQueryProjectionDto {
    type Output = MemberQueryProjectionDto;

    fn expressions(&self) -> Vec<Expr> {
        vec![self.username.expr(), self.age.expr()]
    }

    fn read(&self, reader: &mut RowReader<'_>) -> DataResult<MemberQueryProjectionDto> {
        Ok(MemberQueryProjectionDto {
            username: self.username.read(reader)?,
            age: self.age.read(reader)?,
        })
    }
}

/// A member with the team it belongs to, if any.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemberTeamDto {
    pub member_id: i64,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
}

/// Constructor projection of [`MemberTeamDto`]. The team columns come from
/// the optional side of a left join, so they are read as `Option`.
#[derive(Debug, Clone)]
pub struct QMemberTeamDto {
    member_id: Expression<i64>,
    username: Expression<Option<String>>,
    age: Expression<i32>,
    team_id: Expression<Option<i64>>,
    team_name: Expression<Option<String>>,
}

impl QMemberTeamDto {
    pub fn new(
        member_id: &Expression<i64>,
        username: &Expression<Option<String>>,
        age: &Expression<i32>,
        team_id: &Expression<i64>,
        team_name: &Expression<String>,
    ) -> Self {
        QMemberTeamDto {
            member_id: member_id.clone(),
            username: username.clone(),
            age: age.clone(),
            team_id: Expression::new(team_id.expr()),
            team_name: Expression::new(team_name.expr()),
        }
    }
}

impl Projection for QMemberTeamDto {
    type Output = MemberTeamDto;

    fn expressions(&self) -> Vec<Expr> {
        vec![
            self.member_id.expr(),
            self.username.expr(),
            self.age.expr(),
            self.team_id.expr(),
            self.team_name.expr(),
        ]
    }

    fn read(&self, reader: &mut RowReader<'_>) -> DataResult<MemberTeamDto> {
        Ok(MemberTeamDto {
            member_id: self.member_id.read(reader)?,
            username: self.username.read(reader)?,
            age: self.age.read(reader)?,
            team_id: self.team_id.read(reader)?,
            team_name: self.team_name.read(reader)?,
        })
    }
}
