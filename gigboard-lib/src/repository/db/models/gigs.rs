use agdb::{DbElement, DbId};

use crate::repository::db::Uid;

#[derive(Debug, Clone, DbElement, PartialEq, PartialOrd)]
pub(crate) struct GigModel {
    pub(crate) db_id: Option<DbId>,
    pub(crate) uid: u64,
    pub(crate) client_name: String,
    pub(crate) gig_name: String,
    /// ISO-8601 calendar date, e.g. `2025-06-01`
    pub(crate) date: String,
    pub(crate) venue: String,
}

impl GigModel {
    pub fn new(uid: Uid, client_name: &str, gig_name: &str, date: &str, venue: &str) -> Self {
        Self {
            db_id: None,
            uid: uid.0,
            client_name: client_name.into(),
            gig_name: gig_name.into(),
            date: date.into(),
            venue: venue.into(),
        }
    }
}
