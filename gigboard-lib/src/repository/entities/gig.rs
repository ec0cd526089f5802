use std::fmt::{self, Debug, Display, Formatter};

use agdb::{Comparison, DbId, DbValue, QueryBuilder};
use chrono::NaiveDate;
use tracing::debug;

use crate::repository::{
    db::{Db, Uid, models::GigModel},
    entities::{
        Assignments, EntityId, Error, GigId, Result, Singer, Status, assignment, get_field,
        validate::{self, DATE_FORMAT},
    },
};

/// Represents a gig entity in the Gigboard system.
///
/// Provides methods to inspect this gig's data and the status of every singer assigned to it.
/// Always reflects the current database state.
#[derive(Debug, Clone)]
pub struct Gig {
    pub(crate) id: EntityId,
    pub(crate) db: Db,
}

impl Gig {
    /// Load some existing [`Gig`] from the database
    pub(crate) fn load(db_id: DbId, db: Db) -> Result<Self> {
        let id = EntityId::load(&db, db_id)?;
        Ok(Self { id, db })
    }

    pub fn id(&self) -> GigId {
        GigId(self.id.uid.0)
    }

    pub fn client_name(&self) -> Result<String> {
        self.get_field("client_name")
    }

    pub fn name(&self) -> Result<String> {
        self.get_field("gig_name")
    }

    pub fn date(&self) -> Result<NaiveDate> {
        let raw: String = self.get_field("date")?;
        NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|err| Error::Corrupt {
            field: "date".into(),
            reason: err.to_string(),
        })
    }

    pub fn venue(&self) -> Result<String> {
        self.get_field("venue")
    }

    /// Every singer that has been given a status for this gig, keyed by singer.
    pub fn assignments(&self) -> Result<Assignments> {
        assignment::list(&self.db, self)
    }

    /// Set the status of `singer` for this gig, replacing any previous status.
    pub fn set_status(&self, singer: &Singer, status: Status) -> Result<()> {
        assignment::upsert(&self.db, self, singer, status)
    }

    /// Insert a new [`Gig`] into the database.
    pub(crate) fn add(
        db: &Db,
        client_name: &str,
        name: &str,
        date: NaiveDate,
        venue: &str,
    ) -> Result<Self> {
        let client_name = validate::required("client name", client_name)?;
        let name = validate::required("gig name", name)?;
        let venue = validate::required("venue", venue)?;
        let date = date.format(DATE_FORMAT).to_string();

        let model = GigModel::new(Uid::new(db)?, client_name, name, &date, venue);
        let db_id = db.write().transaction_mut(|t| -> Result<DbId> {
            let gig_id = t
                .exec_mut(QueryBuilder::insert().element(model).query())?
                .elements
                .first()
                .map(|e| e.id)
                .ok_or_else(|| Error::Corrupt {
                    field: "gigs".into(),
                    reason: "insert returned no element".into(),
                })?;

            t.exec_mut(
                QueryBuilder::insert()
                    .edges()
                    .from("gigs")
                    .to(gig_id)
                    .query(),
            )?;

            Ok(gig_id)
        })?;

        let gig = Gig::load(db_id, db.clone())?;

        debug!("Created new gig {}: {name}", gig.id());

        Ok(gig)
    }

    /// All gigs, oldest first.
    pub(crate) fn list(db: &Db) -> Result<Vec<Self>> {
        let mut gigs = db
            .read()
            .exec(
                QueryBuilder::select()
                    .elements::<GigModel>()
                    .search()
                    .from("gigs")
                    .where_()
                    .node()
                    .and()
                    .neighbor()
                    .query(),
            )?
            .elements
            .iter()
            .map(|e| Gig::load(e.id, db.clone()))
            .collect::<Result<Vec<_>>>()?;

        gigs.sort_by_key(|g| g.id.uid);

        Ok(gigs)
    }

    /// Look up a gig by its [`GigId`].
    pub(crate) fn find(db: &Db, id: GigId) -> Result<Option<Self>> {
        db.read()
            .exec(
                QueryBuilder::select()
                    .elements::<GigModel>()
                    .search()
                    .from("gigs")
                    .where_()
                    .neighbor()
                    .and()
                    .key("uid")
                    .value(Comparison::Equal(id.0.into()))
                    .query(),
            )?
            .elements
            .first()
            .map(|e| Gig::load(e.id, db.clone()))
            .transpose()
    }

    fn get_field<T>(&self, field: &str) -> Result<T>
    where
        T: TryFrom<DbValue>,
        T::Error: Debug,
    {
        get_field(&self.db, self.id, field)
    }
}

impl Display for Gig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.name().unwrap_or_else(|_| "<invalid gig name>".into())
        )
    }
}

impl PartialEq for Gig {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
