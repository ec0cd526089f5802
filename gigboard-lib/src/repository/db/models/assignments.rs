use agdb::{DbElement, DbId};

use crate::repository::entities::{GigId, SingerId, Status};

/// The status of one singer for one gig. Linked by edges from both the gig node and the
/// singer node, and unique per `(gig_id, singer_id)`.
#[derive(Debug, Clone, DbElement, PartialEq, PartialOrd)]
pub(crate) struct AssignmentModel {
    pub(crate) db_id: Option<DbId>,
    pub(crate) gig_id: u64,
    pub(crate) singer_id: u64,
    /// Display label of a [`Status`]
    pub(crate) status: String,
}

impl AssignmentModel {
    pub fn new(gig: GigId, singer: SingerId, status: Status) -> Self {
        Self {
            db_id: None,
            gig_id: gig.0,
            singer_id: singer.0,
            status: status.to_string(),
        }
    }
}
