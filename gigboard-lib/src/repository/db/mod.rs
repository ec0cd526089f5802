use std::{path::Path, sync::Arc};

use agdb::{DbAny, DbId, QueryBuilder, QueryResult};
use derive_more::{Deref, Display, From};
use parking_lot::RwLock;
use tracing::debug;

use crate::repository::entities::{Error, Result};

pub(crate) mod models;

/// Version of the element layout written by this build.
pub(crate) const CURRENT_MODEL_VERSION: u64 = 1;

#[derive(Debug, Clone, Deref)]
pub(crate) struct Db {
    #[deref]
    db: Arc<RwLock<DbAny>>,
}

/// A unique identifier handed out to every gig and singer. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Display)]
pub(crate) struct Uid(pub(crate) u64);

impl Uid {
    /// Allocate the next UID. It gets incremented with every new element.
    pub fn new(db: &Db) -> Result<Self> {
        let uid = db.write().transaction_mut(|t| -> Result<u64> {
            let uid = first_value(
                t.exec(
                    QueryBuilder::select()
                        .values("next_uid")
                        .ids("next_uid")
                        .query(),
                )?,
                "next_uid",
            )?
            .to_u64()?;
            t.exec_mut(
                QueryBuilder::insert()
                    .values([[("next_uid", uid + 1).into()]])
                    .ids("next_uid")
                    .query(),
            )?;

            Ok(uid)
        })?;

        Ok(Self(uid))
    }

    /// Read the UID stored on an existing element.
    pub fn load(db: &Db, db_id: DbId) -> Result<Self> {
        let result = db
            .read()
            .exec(QueryBuilder::select().values("uid").ids(db_id).query())?;

        Ok(Self(first_value(result, "uid")?.to_u64()?))
    }
}

impl Db {
    /// Open (or create) the file backed database at `path`.
    pub fn open(path: &Path) -> crate::Result<Self> {
        let path_str = path
            .to_str()
            .ok_or_else(|| crate::Error::InvalidPath(path.to_path_buf()))?;

        let mut db = Self {
            db: Arc::new(RwLock::new(
                DbAny::new_file(path_str).map_err(Error::from)?,
            )),
        };

        db.init()?;

        debug!("Opened database at {path_str}");

        Ok(db)
    }

    /// Create a memory backed database.
    #[cfg(test)]
    pub fn in_memory(name: &str) -> Result<Self> {
        let mut db = Self {
            db: Arc::new(RwLock::new(DbAny::new_memory(name)?)),
        };

        db.init()?;

        Ok(db)
    }

    fn init(&mut self) -> Result<()> {
        let alias_count = self
            .db
            .read()
            .exec(QueryBuilder::select().aliases().query())?
            .result;

        if alias_count == 0 {
            self.db.write().transaction_mut(|t| -> Result<()> {
                t.exec_mut(
                    QueryBuilder::insert()
                        .nodes()
                        .aliases([
                            // Root element nodes
                            "gigs",
                            "singers",
                            "assignments",
                            // State nodes
                            "model_version",
                            "next_uid",
                        ])
                        .query(),
                )?;

                t.exec_mut(
                    QueryBuilder::insert()
                        .values([[("next_uid", 0_u64).into()]])
                        .ids("next_uid")
                        .query(),
                )?;

                t.exec_mut(
                    QueryBuilder::insert()
                        .values([[("model_version", CURRENT_MODEL_VERSION).into()]])
                        .ids("model_version")
                        .query(),
                )?;

                Ok(())
            })?;

            debug!("Initialised a fresh database");
        }

        let found = first_value(
            self.db.read().exec(
                QueryBuilder::select()
                    .values("model_version")
                    .ids("model_version")
                    .query(),
            )?,
            "model_version",
        )?
        .to_u64()?;

        if found > CURRENT_MODEL_VERSION {
            return Err(Error::UnsupportedModelVersion {
                found,
                supported: CURRENT_MODEL_VERSION,
            });
        }

        Ok(())
    }

    /// Copy the database to `path`.
    pub fn backup(&self, path: &Path) -> crate::Result<()> {
        let path_str = path
            .to_str()
            .ok_or_else(|| crate::Error::InvalidPath(path.to_path_buf()))?;

        self.db.write().backup(path_str).map_err(Error::from)?;

        debug!("Backed up database to {path_str}");

        Ok(())
    }
}

/// Pull the first value out of a single element query.
pub(crate) fn first_value(result: QueryResult, field: &str) -> Result<agdb::DbValue> {
    result
        .elements
        .into_iter()
        .next()
        .and_then(|e| e.values.into_iter().next())
        .map(|kv| kv.value)
        .ok_or_else(|| Error::Corrupt {
            field: field.to_string(),
            reason: "value is missing".into(),
        })
}
