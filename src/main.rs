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

use anyhow::Context;
use qdsl::{init_logging, DdlAuto, Pool, QdslConfig};

fn main() -> anyhow::Result<()> {
    let cfg = QdslConfig::from_env().context("reading configuration")?;
    init_logging(cfg.log_level());

    let pool = Pool::new(cfg.clone()).context("opening connection pool")?;
    if cfg.ddl_auto() == DdlAuto::Create {
        pool.create_schema().context("creating schema")?;
    }

    tracing::info!("querydsl application started on {}", cfg.url());
    Ok(())
}
