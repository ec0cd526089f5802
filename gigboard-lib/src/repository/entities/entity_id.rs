use agdb::DbId;
use derive_more::PartialEq;

use crate::repository::{
    db::{Db, Uid},
    entities::{Error, Result},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EntityId {
    #[partial_eq(ignore)]
    db_id: DbId,
    /// A unique identifier that specifies a particular entity
    pub(crate) uid: Uid,
}

impl EntityId {
    /// Load an [`EntityId`] from an existing element.
    pub fn load(db: &Db, db_id: DbId) -> Result<Self> {
        Ok(Self {
            db_id,
            uid: Uid::load(db, db_id)?,
        })
    }

    /// Get the underlying [`DbId`]. This will check to make sure it isn't stale before returning.
    pub fn db_id(&self, db: &Db) -> Result<DbId> {
        let uid = Uid::load(db, self.db_id).map_err(|err| match err {
            Error::StorageUnavailable(e) if e.description.contains("not found") => {
                Error::RemovedEntity
            }
            other => other,
        })?;

        // A different UID means this DbId has been reused by another element
        if uid != self.uid {
            return Err(Error::RemovedEntity);
        }

        Ok(self.db_id)
    }
}
