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
use qdsl_core::{entity_projection, path, DataResult, Entity, EntityPath, Expression, FromValue, IntoValue, RelationPath, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub id: Option<i64>,
    pub name: String,
}

impl Team {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Team { id: None, name: name.into() }
    }
}

impl Display for Team {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "Team(id={}, name={})", id, self.name),
            None => write!(f, "Team(id=null, name={})", self.name),
        }
    }
}

impl Entity for Team {
    const TABLE: &'static str = "team";
    const ID_COLUMN: &'static str = "team_id";
    const COLUMNS: &'static [&'static str] = &["team_id", "name"];

    fn from_values(values: &[Value]) -> DataResult<Self> {
        Ok(Team {
            id: FromValue::from_value(value_at(values, 0))?,
            name: FromValue::from_value(value_at(values, 1))?,
        })
    }

    fn to_values(&self) -> Vec<Value> {
        vec![self.id.into_value(), self.name.clone().into_value()]
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

pub(crate) fn value_at(values: &[Value], index: usize) -> &Value {
    values.get(index).unwrap_or(&Value::Null)
}

/// Query path of [`Team`].
#[derive(Debug, Clone)]
pub struct QTeam {
    alias: String,
    pub id: Expression<i64>,
    pub name: Expression<String>,
    /// Inverse side of `Member.team`.
    pub members: RelationPath,
}

impl QTeam {
    pub fn new<S: Into<String>>(alias: S) -> Self {
        let alias = alias.into();
        QTeam {
            id: path(&alias, "team_id", "id"),
            name: path(&alias, "name", "name"),
            members: RelationPath::one_to_many(&alias, "members", "team_id", "team_id"),
            alias,
        }
    }

    /// The default variable, `team`.
    pub fn team() -> Self {
        QTeam::new("team")
    }
}

impl EntityPath for QTeam {
    type Entity = Team;

    fn alias(&self) -> &str {
        &self.alias
    }
}

entity_projection!(QTeam);
