use std::{path::Path, sync::Arc};

use chrono::NaiveDate;
use parking_lot::RwLock;
use tracing::debug;

use crate::{
    Result,
    board::{self, Board, BoardWrites},
    repository::{
        config::{Cfg, CoreConfig},
        db::Db,
        entities::Error,
    },
    sheet::{self, SheetRow},
};

mod db;

pub mod config;
pub mod entities;

pub use entities::{
    Assignment, Assignments, Gig, GigId, Singer, SingerId, Status, validate::parse_date,
};

/// Central access point for all persistent data.
///
/// The [`Repository`] owns the gigs, singers and assignments, and the configuration that
/// shapes how they are written. Construct one at start-up and pass it to whatever needs it.
#[derive(Clone, Debug)]
pub struct Repository {
    db: Db,
    cfg: Cfg,
}

impl Repository {
    /// Open the repository using the configuration file. `database` replaces the database path
    /// it points at for this session only; the file on disk is left alone.
    pub fn open(database: Option<&Path>) -> Result<Self> {
        let mut cfg = CoreConfig::load()?;
        if let Some(path) = database {
            cfg.set_database_path(path.to_path_buf());
        }

        Self::with_config(cfg)
    }

    /// Open the repository with an explicit configuration.
    pub fn with_config(cfg: CoreConfig) -> Result<Self> {
        let path = cfg.database_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self {
            db: Db::open(&path)?,
            cfg: Arc::new(RwLock::new(cfg)),
        })
    }

    pub fn config(&self) -> Cfg {
        self.cfg.clone()
    }

    pub fn create_gig(
        &self,
        client_name: &str,
        name: &str,
        date: NaiveDate,
        venue: &str,
    ) -> Result<Gig> {
        Ok(Gig::add(&self.db, client_name, name, date, venue)?)
    }

    pub fn add_singer(&self, first_name: &str, last_name: &str, email: &str) -> Result<Singer> {
        Ok(Singer::add(&self.db, first_name, last_name, email)?)
    }

    /// All gigs in creation order.
    pub fn gigs(&self) -> Result<Vec<Gig>> {
        Ok(Gig::list(&self.db)?)
    }

    /// All singers in creation order.
    pub fn singers(&self) -> Result<Vec<Singer>> {
        Ok(Singer::list(&self.db)?)
    }

    pub fn gig(&self, id: GigId) -> Result<Gig> {
        Ok(Gig::find(&self.db, id)?.ok_or(Error::UnknownGig(id))?)
    }

    pub fn singer(&self, id: SingerId) -> Result<Singer> {
        Ok(Singer::find(&self.db, id)?.ok_or(Error::UnknownSinger(id))?)
    }

    /// The current status of every singer that has ever been given one for this gig.
    pub fn assignments(&self, gig: GigId) -> Result<Assignments> {
        Ok(self.gig(gig)?.assignments()?)
    }

    /// Insert or replace the status of a `(gig, singer)` pair.
    pub fn set_status(&self, gig: GigId, singer: SingerId, status: Status) -> Result<()> {
        let gig = self.gig(gig)?;
        let singer = self.singer(singer)?;

        Ok(gig.set_status(&singer, status)?)
    }

    /// Like [`Repository::set_status`], taking the status by its label. Labels outside the
    /// five statuses are rejected before anything is looked up or written.
    pub fn set_status_label(&self, gig: GigId, singer: SingerId, label: &str) -> Result<()> {
        let status = Status::from_label(label)?;
        self.set_status(gig, singer, status)
    }

    /// One row per known singer with the status to show for this gig.
    pub fn status_sheet(&self, gig: GigId) -> Result<Vec<SheetRow>> {
        let assignments = self.assignments(gig)?;
        let singers = self
            .singers()?
            .iter()
            .map(|s| Ok((s.id(), s.full_name()?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(sheet::status_sheet(singers, &assignments))
    }

    /// Store the status of every row. Rows are written one by one; a failure part way leaves
    /// the earlier rows written.
    pub fn apply_sheet(&self, gig: GigId, rows: &[SheetRow]) -> Result<()> {
        for row in rows {
            self.set_status(gig, row.singer, row.status)?;
        }

        debug!("Applied {} sheet rows to gig {gig}", rows.len());

        Ok(())
    }

    /// The status board for this gig as currently stored.
    pub fn board(&self, gig: GigId) -> Result<Board> {
        Ok(Board::from_assignments(&self.assignments(gig)?))
    }

    /// Write back a rearranged board and return the `(singer, status)` pairs that were stored.
    pub fn apply_board(&self, gig: GigId, board: &Board) -> Result<Vec<(SingerId, Status)>> {
        let before = self.board(gig)?;
        let writes = if self.cfg.read().board().rewrite_unchanged {
            BoardWrites::All
        } else {
            BoardWrites::Changed
        };

        let changes = board::reassignments(&before, board, writes);
        for &(singer, status) in &changes {
            self.set_status(gig, singer, status)?;
        }

        debug!("Applied {} board changes to gig {gig}", changes.len());

        Ok(changes)
    }

    /// Copy the database to `path`.
    pub fn backup(&self, path: &Path) -> Result<()> {
        self.db.backup(path)
    }

    #[cfg(test)]
    /// Return a mock version of a [`Repository`] with an in-memory database and configuration.
    pub(crate) fn mock() -> Self {
        Self {
            db: Db::in_memory("test").expect("in-memory database should open"),
            cfg: Arc::new(RwLock::new(CoreConfig::mock())),
        }
    }
}
