use agdb::{DbElement, DbId};

use crate::repository::db::Uid;

#[derive(Debug, Clone, DbElement, PartialEq, PartialOrd)]
pub(crate) struct SingerModel {
    pub(crate) db_id: Option<DbId>,
    pub(crate) uid: u64,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) email: String,
}

impl SingerModel {
    pub fn new(uid: Uid, first_name: &str, last_name: &str, email: &str) -> Self {
        Self {
            db_id: None,
            uid: uid.0,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }
}
