//! The status board: every assigned singer sorted into one column per [`Status`].
//!
//! Rearranging the board is pure data manipulation. [`reassignments`] turns the rearranged
//! board into the status writes to perform, and [`Repository::apply_board`] performs them.
//!
//! [`Repository::apply_board`]: crate::Repository::apply_board

use std::collections::BTreeMap;

use crate::repository::{Assignments, SingerId, Status};

/// Which singers to write back when a board is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoardWrites {
    /// Only singers that ended up in a different column
    #[default]
    Changed,
    /// Every singer on the board, moved or not
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    status: Status,
    singers: Vec<SingerId>,
}

impl Column {
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn singers(&self) -> &[SingerId] {
        &self.singers
    }
}

/// A partition of singers over the five status columns, always in [`Status`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: Vec<Column>,
}

impl Board {
    /// An empty board with one column per status.
    pub fn new() -> Self {
        Self {
            columns: Status::all()
                .map(|status| Column {
                    status,
                    singers: Vec::new(),
                })
                .collect(),
        }
    }

    /// Seed the board from stored assignments. Singers within a column keep id order.
    pub fn from_assignments(assignments: &Assignments) -> Self {
        Self::from_columns(Status::all().map(|status| {
            let singers = assignments
                .iter()
                .filter(|(_, a)| a.status == status)
                .map(|(&id, _)| id)
                .collect();
            (status, singers)
        }))
    }

    /// Build a board from explicit column contents, as handed back by a board widget.
    ///
    /// Columns may be given in any order; entries for the same status are concatenated.
    pub fn from_columns<I>(columns: I) -> Self
    where
        I: IntoIterator<Item = (Status, Vec<SingerId>)>,
    {
        let mut board = Self::new();
        for (status, singers) in columns {
            if let Some(column) = board.column_mut(status) {
                column.singers.extend(singers);
            }
        }

        board
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Singers in the column for `status`.
    pub fn singers(&self, status: Status) -> &[SingerId] {
        self.columns
            .iter()
            .find(|c| c.status == status)
            .map(|c| c.singers.as_slice())
            .unwrap_or_default()
    }

    /// The column `singer` sits in. If listed in several, the last column wins.
    pub fn status_of(&self, singer: SingerId) -> Option<Status> {
        self.columns
            .iter()
            .rev()
            .find(|c| c.singers.contains(&singer))
            .map(|c| c.status)
    }

    pub fn len(&self) -> usize {
        self.columns.iter().map(|c| c.singers.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(|c| c.singers.is_empty())
    }

    /// Move `singer` to the end of the `to` column. Only column membership is stored, so the
    /// order within a column does not survive [`Board::from_assignments`].
    ///
    /// Returns `false` and leaves the board untouched if the singer isn't on it.
    pub fn move_singer(&mut self, singer: SingerId, to: Status) -> bool {
        if self.status_of(singer).is_none() {
            return false;
        }

        for column in &mut self.columns {
            column.singers.retain(|&s| s != singer);
        }

        if let Some(column) = self.column_mut(to) {
            column.singers.push(singer);
        }

        true
    }

    fn column_mut(&mut self, status: Status) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.status == status)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Flatten the board into each singer's status. Columns are read in order, so a singer listed
/// twice takes the status of the later column.
pub fn derive_statuses(board: &Board) -> BTreeMap<SingerId, Status> {
    board
        .columns
        .iter()
        .flat_map(|c| c.singers.iter().map(move |&s| (s, c.status)))
        .collect()
}

/// The `(singer, status)` writes that turn `before` into `after`.
///
/// Only singers present on `before` are considered; a singer that was dropped from `after`
/// keeps its stored status.
pub fn reassignments(
    before: &Board,
    after: &Board,
    writes: BoardWrites,
) -> Vec<(SingerId, Status)> {
    let old = derive_statuses(before);
    let new = derive_statuses(after);

    old.iter()
        .filter_map(|(singer, &old_status)| {
            let &new_status = new.get(singer)?;
            match writes {
                BoardWrites::All => Some((*singer, new_status)),
                BoardWrites::Changed if new_status != old_status => Some((*singer, new_status)),
                BoardWrites::Changed => None,
            }
        })
        .collect()
}
