use std::str::FromStr;

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::repository::entities::{Error, Result};

/// Booking status of a singer for a gig.
///
/// Variant order is significant: it is the column order of the status board.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter,
)]
pub enum Status {
    #[default]
    Inquired,
    Available,
    #[strum(to_string = "Not Available")]
    NotAvailable,
    Booked,
    Possible,
}

impl Status {
    /// Parse a status from its display label. Anything outside the five labels is rejected.
    pub fn from_label(label: &str) -> Result<Self> {
        Status::from_str(label).map_err(|_| Error::InvalidStatus(label.to_string()))
    }

    /// All statuses, in board order.
    pub fn all() -> impl Iterator<Item = Status> {
        Status::iter()
    }
}
