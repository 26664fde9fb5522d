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

use std::marker::PhantomData;
use qdsl_core::Entity;
use crate::domain::Team;
use crate::errors::Result;
use crate::session::Session;

/// Generic entity operations, keyed by the entity id.
pub trait CrudRepository<E: Entity> {
    fn session(&self) -> &Session;

    /// Inserts a new entity or writes an existing one.
    fn save(&self, entity: &mut E) -> Result<()> {
        self.session().merge(entity)
    }

    fn save_all(&self, entities: &mut [E]) -> Result<()> {
        for entity in entities.iter_mut() {
            self.session().merge(entity)?;
        }
        Ok(())
    }

    fn find_by_id(&self, id: i64) -> Result<Option<E>> {
        self.session().find(id)
    }

    fn find_all(&self) -> Result<Vec<E>> {
        self.session().find_all()
    }

    fn count(&self) -> Result<i64> {
        self.session().count::<E>()
    }

    fn exists_by_id(&self, id: i64) -> Result<bool> {
        Ok(self.find_by_id(id)?.is_some())
    }

    fn delete(&self, entity: &E) -> Result<()> {
        self.session().remove(entity).map(|_| ())
    }

    fn delete_all(&self) -> Result<()> {
        self.session().remove_all::<E>().map(|_| ())
    }
}

/// A repository with only the generic operations.
pub struct EntityRepository<'s, E> {
    session: &'s Session,
    _marker: PhantomData<fn() -> E>,
}

impl<'s, E: Entity> EntityRepository<'s, E> {
    pub fn new(session: &'s Session) -> Self {
        EntityRepository { session, _marker: PhantomData }
    }
}

impl<E: Entity> CrudRepository<E> for EntityRepository<'_, E> {
    fn session(&self) -> &Session {
        self.session
    }
}

pub type TeamRepository<'s> = EntityRepository<'s, Team>;

/// Plain data access for teams.
pub struct TeamJpaRepository<'s> {
    session: &'s Session,
}

impl<'s> TeamJpaRepository<'s> {
    pub fn new(session: &'s Session) -> Self {
        TeamJpaRepository { session }
    }

    pub fn save(&self, team: &mut Team) -> Result<()> {
        self.session.persist(team)
    }
}
