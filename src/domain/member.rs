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

use std::fmt;
use std::fmt::{Display, Formatter};
use qdsl_core::{
    entity_projection, path, DataResult, Entity, EntityPath, Expression, FromValue, IntoValue, LazyRef, RelationPath,
    Value,
};
use super::team::{value_at, Team};

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: Option<i64>,
    pub username: Option<String>,
    pub age: i32,
    pub team: Option<LazyRef<Team>>,
}

impl Member {
    pub fn new<S: Into<String>>(username: S) -> Self {
        Member::with_age(username, 0)
    }

    pub fn with_age<S: Into<String>>(username: S, age: i32) -> Self {
        Member { id: None, username: Some(username.into()), age, team: None }
    }

    pub fn with_team<S: Into<String>>(username: S, age: i32, team: &Team) -> Self {
        let mut member = Member::with_age(username, age);
        member.change_team(team);
        member
    }

    /// A member whose username is null.
    pub fn unnamed(age: i32) -> Self {
        Member { id: None, username: None, age, team: None }
    }

    pub fn change_team(&mut self, team: &Team) {
        self.team = Some(LazyRef::Loaded(team.clone()));
    }

    /// The team when it was loaded with the member.
    pub fn team(&self) -> Option<&Team> {
        self.team.as_ref().and_then(LazyRef::get)
    }

    pub fn team_id(&self) -> Option<i64> {
        self.team.as_ref().and_then(LazyRef::id)
    }
}

impl Display for Member {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Member(id={}, username={}, age={})",
            self.id.map_or_else(|| "null".to_string(), |id| id.to_string()),
            self.username.as_deref().unwrap_or("null"),
            self.age
        )
    }
}

impl Entity for Member {
    const TABLE: &'static str = "member";
    const ID_COLUMN: &'static str = "member_id";
    const COLUMNS: &'static [&'static str] = &["member_id", "username", "age", "team_id"];

    fn from_values(values: &[Value]) -> DataResult<Self> {
        let team_id: Option<i64> = FromValue::from_value(value_at(values, 3))?;
        Ok(Member {
            id: FromValue::from_value(value_at(values, 0))?,
            username: FromValue::from_value(value_at(values, 1))?,
            age: FromValue::from_value(value_at(values, 2))?,
            team: team_id.map(LazyRef::Unloaded),
        })
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            self.id.into_value(),
            self.username.clone().into_value(),
            self.age.into_value(),
            self.team_id().into_value(),
        ]
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn attach(&mut self, relation: &str, values: &[Value]) -> DataResult<()> {
        if relation == "team" && !value_at(values, 0).is_null() {
            self.team = Some(LazyRef::Loaded(Team::from_values(values)?));
        }
        Ok(())
    }
}

/// Query path of [`Member`].
#[derive(Debug, Clone)]
pub struct QMember {
    alias: String,
    pub id: Expression<i64>,
    pub username: Expression<Option<String>>,
    pub age: Expression<i32>,
    pub team_id: Expression<Option<i64>>,
    pub team: RelationPath,
}

impl QMember {
    pub fn new<S: Into<String>>(alias: S) -> Self {
        let alias = alias.into();
        QMember {
            id: path(&alias, "member_id", "id"),
            username: path(&alias, "username", "username"),
            age: path(&alias, "age", "age"),
            team_id: path(&alias, "team_id", "team_id"),
            team: RelationPath::many_to_one(&alias, "team", "team_id", "team_id"),
            alias,
        }
    }

    /// The default variable, `member1`.
    pub fn member() -> Self {
        QMember::new("member1")
    }
}

impl EntityPath for QMember {
    type Entity = Member;

    fn alias(&self) -> &str {
        &self.alias
    }
}

entity_projection!(QMember);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unloaded_team_keeps_its_id() {
        let values = vec![Value::Bigint(1), Value::Text("member1".into()), Value::Bigint(10), Value::Bigint(7)];
        let member = Member::from_values(&values).unwrap();
        assert_eq!(member.team_id(), Some(7));
        assert!(member.team().is_none());
        assert_eq!(member.to_string(), "Member(id=1, username=member1, age=10)");
    }

    #[test]
    fn fetch_join_values_load_the_team() {
        let mut member = Member::unnamed(20);
        member.attach("team", &[Value::Bigint(3), Value::Text("teamA".into())]).unwrap();
        assert_eq!(member.team().map(|t| t.name.as_str()), Some("teamA"));
        member.attach("team", &[Value::Null, Value::Null]).unwrap();
        assert_eq!(member.team_id(), Some(3));
    }
}
