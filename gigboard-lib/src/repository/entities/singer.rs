use std::fmt::{self, Debug, Display, Formatter};

use agdb::{Comparison, DbId, DbValue, QueryBuilder};
use tracing::debug;

use crate::repository::{
    db::{Db, Uid, models::SingerModel},
    entities::{EntityId, Error, Result, SingerId, get_field, validate},
};

/// Represents a singer entity in the Gigboard system.
///
/// Always reflects the current database state.
#[derive(Debug, Clone)]
pub struct Singer {
    pub(crate) id: EntityId,
    pub(crate) db: Db,
}

impl Singer {
    pub(crate) fn load(db_id: DbId, db: Db) -> Result<Self> {
        let id = EntityId::load(&db, db_id)?;
        Ok(Self { id, db })
    }

    pub fn id(&self) -> SingerId {
        SingerId(self.id.uid.0)
    }

    pub fn first_name(&self) -> Result<String> {
        self.get_field("first_name")
    }

    pub fn last_name(&self) -> Result<String> {
        self.get_field("last_name")
    }

    pub fn email(&self) -> Result<String> {
        self.get_field("email")
    }

    /// First and last name joined by a space, as shown on boards and sheets.
    pub fn full_name(&self) -> Result<String> {
        Ok(format!("{} {}", self.first_name()?, self.last_name()?))
    }

    pub(crate) fn add(db: &Db, first_name: &str, last_name: &str, email: &str) -> Result<Self> {
        let first_name = validate::required("first name", first_name)?;
        let last_name = validate::required("last name", last_name)?;
        let email = validate::email(email)?;

        let model = SingerModel::new(Uid::new(db)?, first_name, last_name, email);
        let db_id = db.write().transaction_mut(|t| -> Result<DbId> {
            let singer_id = t
                .exec_mut(QueryBuilder::insert().element(model).query())?
                .elements
                .first()
                .map(|e| e.id)
                .ok_or_else(|| Error::Corrupt {
                    field: "singers".into(),
                    reason: "insert returned no element".into(),
                })?;

            t.exec_mut(
                QueryBuilder::insert()
                    .edges()
                    .from("singers")
                    .to(singer_id)
                    .query(),
            )?;

            Ok(singer_id)
        })?;

        let singer = Singer::load(db_id, db.clone())?;

        debug!("Added singer {}: {first_name} {last_name}", singer.id());

        Ok(singer)
    }

    /// All singers, oldest first.
    pub(crate) fn list(db: &Db) -> Result<Vec<Self>> {
        let mut singers = db
            .read()
            .exec(
                QueryBuilder::select()
                    .elements::<SingerModel>()
                    .search()
                    .from("singers")
                    .where_()
                    .node()
                    .and()
                    .neighbor()
                    .query(),
            )?
            .elements
            .iter()
            .map(|e| Singer::load(e.id, db.clone()))
            .collect::<Result<Vec<_>>>()?;

        singers.sort_by_key(|s| s.id.uid);

        Ok(singers)
    }

    pub(crate) fn find(db: &Db, id: SingerId) -> Result<Option<Self>> {
        db.read()
            .exec(
                QueryBuilder::select()
                    .elements::<SingerModel>()
                    .search()
                    .from("singers")
                    .where_()
                    .neighbor()
                    .and()
                    .key("uid")
                    .value(Comparison::Equal(id.0.into()))
                    .query(),
            )?
            .elements
            .first()
            .map(|e| Singer::load(e.id, db.clone()))
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

impl Display for Singer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.full_name()
                .unwrap_or_else(|_| "<invalid singer name>".into())
        )
    }
}

impl PartialEq for Singer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
