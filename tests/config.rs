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
//! Configuration parsing and pool setup.
//!

use std::collections::HashMap;
use qdsl::*;
mod common;
use common::*;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_to_memory() {
    let cfg = QdslConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.url(), DEFAULT_URL);
    assert!(cfg.is_memory());
    assert_eq!(cfg.effective_max_size(), 1);
    assert_eq!(cfg.ddl_auto(), DdlAuto::Create);
    assert!(cfg.show_sql());
}

#[test]
fn reads_file_urls() {
    let relative = QdslConfig::new("sqlite://data/app.db").unwrap();
    assert_eq!(relative.source(), &DatabaseSource::File("data/app.db".into()));

    let absolute = QdslConfig::new("sqlite:///tmp/app.db").unwrap();
    assert_eq!(absolute.source(), &DatabaseSource::File("/tmp/app.db".into()));
    assert_eq!(absolute.set_max_size(4).effective_max_size(), 4);
}

#[test]
fn reads_environment_overrides() {
    let cfg = QdslConfig::from_lookup(lookup(&[
        ("QDSL_MAX_SIZE", "8"),
        ("QDSL_LOG_LEVEL", "warn"),
        ("QDSL_DDL_AUTO", "create-drop"),
        ("QDSL_SHOW_SQL", "false"),
    ]))
    .unwrap();
    assert_eq!(cfg.max_size(), 8);
    assert_eq!(cfg.log_level(), LogLevel::Warn);
    assert_eq!(cfg.ddl_auto(), DdlAuto::Create);
    assert!(!cfg.show_sql());

    let none: DdlAuto = "none".parse().unwrap();
    assert_eq!(none, DdlAuto::None);
}

#[test]
fn rejects_bad_values() {
    assert!(matches!(QdslConfig::new("mysql://localhost/db"), Err(QdslError::Config(_))));
    assert!(matches!("update".parse::<DdlAuto>(), Err(QdslError::Config(_))));
    assert!(QdslConfig::from_lookup(lookup(&[("QDSL_MAX_SIZE", "many")])).is_err());
    assert!(QdslConfig::from_lookup(lookup(&[("QDSL_LOG_LEVEL", "loud")])).is_err());
    assert!(QdslConfig::from_lookup(lookup(&[("QDSL_SHOW_SQL", "maybe")])).is_err());
}

#[test]
fn file_database_is_shared_between_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.db");
    let cfg = QdslConfig::new(&format!("sqlite://{}", path.display())).unwrap().set_max_size(2);
    let pool = Pool::new(cfg).unwrap();
    pool.create_schema().unwrap();

    let writer = pool.session().unwrap();
    writer.persist(&mut Team::new("teamA")).unwrap();

    let reader = pool.session().unwrap();
    assert_eq!(reader.count::<Team>().unwrap(), 1);
}

#[test]
fn foreign_keys_are_enforced() {
    let (_pool, session) = create_empty();
    let mut orphan = Member::with_age("orphan", 1);
    orphan.team = Some(LazyRef::Unloaded(999));
    let result = session.persist(&mut orphan);
    assert!(matches!(result, Err(QdslError::Database(_))), "{:?}", result);
}
