//! The per-singer status sheet for a gig.

use crate::repository::{Assignments, SingerId, Status};

/// One line of the sheet: a singer and the status to show (and later store) for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub singer: SingerId,
    pub name: String,
    pub status: Status,
    /// Whether the status came from a stored assignment rather than the default
    pub stored: bool,
}

impl SheetRow {
    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }
}

/// Build one row per singer, in the order given. Singers without an assignment for the gig
/// default to [`Status::Inquired`].
pub fn status_sheet<I>(singers: I, assignments: &Assignments) -> Vec<SheetRow>
where
    I: IntoIterator<Item = (SingerId, String)>,
{
    singers
        .into_iter()
        .map(|(singer, name)| match assignments.get(&singer) {
            Some(assignment) => SheetRow {
                singer,
                name,
                status: assignment.status,
                stored: true,
            },
            None => SheetRow {
                singer,
                name,
                status: Status::default(),
                stored: false,
            },
        })
        .collect()
}

/// Change the status of `singer`'s row. Returns `false` if the sheet has no such row.
pub fn set(rows: &mut [SheetRow], singer: SingerId, status: Status) -> bool {
    match rows.iter_mut().find(|r| r.singer == singer) {
        Some(row) => {
            row.set_status(status);
            true
        }
        None => false,
    }
}
