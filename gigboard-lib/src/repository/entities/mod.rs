//! Core domain entities for Gigboard.
//!
//! [`Gig`] and [`Singer`] are handles onto elements in the database and always reflect the
//! current database state. An [`Assignment`] is a plain snapshot of one singer's status for a
//! gig, read through [`Gig::assignments`].

use std::fmt::Debug;

use agdb::{DbValue, QueryBuilder};
use derive_more::{Display, From};
use thiserror::Error;

use crate::repository::db::{Db, first_value};

mod assignment;
mod entity_id;
mod gig;
mod singer;
mod status;
pub(crate) mod validate;

pub use assignment::{Assignment, Assignments};
pub(crate) use entity_id::EntityId;
pub use gig::Gig;
pub use singer::Singer;
pub use status::Status;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] agdb::DbError),
    #[error(
        "'{0}' is not a valid status, expected one of: Inquired, Available, Not Available, Booked, Possible"
    )]
    InvalidStatus(String),
    #[error("No gig with id {0}")]
    UnknownGig(GigId),
    #[error("No singer with id {0}")]
    UnknownSinger(SingerId),
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("'{0}' is not a valid date, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("This handle refers to an entity that has been removed")]
    RemovedEntity,
    #[error("Stored field '{field}' is corrupt: {reason}")]
    Corrupt { field: String, reason: String },
    #[error("Database model version {found} is newer than the supported version {supported}")]
    UnsupportedModelVersion { found: u64, supported: u64 },
}

/// Identifies a [`Gig`]. Assigned by the store when the gig is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Display)]
pub struct GigId(pub u64);

/// Identifies a [`Singer`]. Assigned by the store when the singer is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Display)]
pub struct SingerId(pub u64);

pub(crate) fn get_field<T>(db: &Db, id: EntityId, field: &str) -> Result<T>
where
    T: TryFrom<DbValue>,
    T::Error: Debug,
{
    let db_id = id.db_id(db)?;
    let value = first_value(
        db.read()
            .exec(QueryBuilder::select().values(field).ids(db_id).query())?,
        field,
    )?;

    T::try_from(value).map_err(|err| Error::Corrupt {
        field: field.to_string(),
        reason: format!("{err:?}"),
    })
}
