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
//! The two mapped entities and their query paths.
//!

mod member;
mod team;

pub use member::*;
pub use team::*;

/// Drops and recreates both tables.
pub const SCHEMA_DDL: &str = "\
DROP TABLE IF EXISTS member;
DROP TABLE IF EXISTS team;
CREATE TABLE team (
    team_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(255) NOT NULL
);
CREATE TABLE member (
    member_id INTEGER PRIMARY KEY AUTOINCREMENT,
    username VARCHAR(255),
    age INTEGER NOT NULL,
    team_id BIGINT REFERENCES team(team_id)
);";
