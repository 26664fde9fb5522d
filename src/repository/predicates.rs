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

use qdsl_core::Predicate;
use crate::domain::{QMember, QTeam};

/// A string criterion counts only when it has non-whitespace content.
pub(crate) fn has_text(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn username_eq(username: Option<&str>) -> Option<Predicate> {
    has_text(username).map(|username| QMember::member().username.eq(username))
}

pub fn team_name_eq(team_name: Option<&str>) -> Option<Predicate> {
    has_text(team_name).map(|team_name| QTeam::team().name.eq(team_name))
}

pub fn age_goe(age_goe: Option<i32>) -> Option<Predicate> {
    age_goe.map(|age| QMember::member().age.goe(age))
}

pub fn age_loe(age_loe: Option<i32>) -> Option<Predicate> {
    age_loe.map(|age| QMember::member().age.loe(age))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_absent() {
        assert!(username_eq(None).is_none());
        assert!(username_eq(Some("  ")).is_none());
        assert!(team_name_eq(Some("")).is_none());
        assert!(team_name_eq(Some("teamA")).is_some());
        assert!(age_goe(Some(10)).is_some());
        assert!(age_loe(None).is_none());
    }

    #[test]
    fn has_text_keeps_untrimmed_value() {
        assert_eq!(has_text(Some(" member1 ")), Some(" member1 "));
        assert_eq!(has_text(Some("\t\n")), None);
        assert_eq!(has_text(None), None);
    }
}
