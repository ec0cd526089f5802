use std::collections::BTreeMap;

use agdb::{Comparison, DbId, QueryBuilder, QueryId};
use tracing::{debug, warn};

use crate::repository::{
    db::{Db, models::AssignmentModel},
    entities::{Error, Gig, Result, Singer, SingerId, Status},
};

/// A snapshot of one singer's status for a gig.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Full name of the singer at the time of reading
    pub name: String,
    pub status: Status,
}

/// Current status of every singer assigned to a gig, ordered by [`SingerId`].
pub type Assignments = BTreeMap<SingerId, Assignment>;

/// Read every assignment hanging off `gig`.
pub(crate) fn list(db: &Db, gig: &Gig) -> Result<Assignments> {
    let gig_id = gig.id.db_id(db)?;
    let models: Vec<AssignmentModel> = db
        .read()
        .exec(
            QueryBuilder::select()
                .elements::<AssignmentModel>()
                .search()
                .from(gig_id)
                .where_()
                .neighbor()
                .query(),
        )?
        .try_into()?;

    let mut assignments = Assignments::new();
    for model in models {
        let singer_id = SingerId(model.singer_id);
        let singer = Singer::find(db, singer_id)?.ok_or_else(|| Error::Corrupt {
            field: "singer_id".into(),
            reason: format!("assignment points at missing singer {singer_id}"),
        })?;
        let status = Status::from_label(&model.status).map_err(|_| Error::Corrupt {
            field: "status".into(),
            reason: format!("unknown status '{}'", model.status),
        })?;

        assignments.insert(
            singer_id,
            Assignment {
                name: singer.full_name()?,
                status,
            },
        );
    }

    Ok(assignments)
}

/// Write `status` for the `(gig, singer)` pair.
///
/// The lookup and the write run in one transaction under the write lock, so a pair never ends
/// up with two assignment nodes. Any extra nodes already stored for the pair are removed.
pub(crate) fn upsert(db: &Db, gig: &Gig, singer: &Singer, status: Status) -> Result<()> {
    let gig_db_id = gig.id.db_id(db)?;
    let singer_db_id = singer.id.db_id(db)?;
    let gig_id = gig.id();
    let singer_id = singer.id();

    let inserted = db.write().transaction_mut(|t| -> Result<bool> {
        let existing: Vec<AssignmentModel> = t
            .exec(
                QueryBuilder::select()
                    .elements::<AssignmentModel>()
                    .search()
                    .from(gig_db_id)
                    .where_()
                    .neighbor()
                    .and()
                    .key("singer_id")
                    .value(Comparison::Equal(singer_id.0.into()))
                    .query(),
            )?
            .try_into()?;

        let existing_ids: Vec<DbId> = existing.iter().filter_map(|a| a.db_id).collect();

        if let Some((&assignment_id, duplicates)) = existing_ids.split_first() {
            if !duplicates.is_empty() {
                warn!(
                    "Removing {} duplicate assignments for gig {gig_id} and singer {singer_id}",
                    duplicates.len()
                );
            }
            for &duplicate in duplicates {
                t.exec_mut(QueryBuilder::remove().ids(duplicate).query())?;
            }

            t.exec_mut(
                QueryBuilder::insert()
                    .values([[("status", status.to_string()).into()]])
                    .ids(assignment_id)
                    .query(),
            )?;

            return Ok(false);
        }

        let model = AssignmentModel::new(gig_id, singer_id, status);
        let assignment_id = t
            .exec_mut(QueryBuilder::insert().element(model).query())?
            .elements
            .first()
            .map(|e| e.id)
            .ok_or_else(|| Error::Corrupt {
                field: "assignments".into(),
                reason: "insert returned no element".into(),
            })?;

        // Link the assignment to the root node and to both ends of the pair
        t.exec_mut(
            QueryBuilder::insert()
                .edges()
                .from([
                    QueryId::from("assignments"),
                    QueryId::from(gig_db_id),
                    QueryId::from(singer_db_id),
                ])
                .to(assignment_id)
                .query(),
        )?;

        Ok(true)
    })?;

    if inserted {
        debug!("Assigned singer {singer_id} to gig {gig_id} as {status}");
    } else {
        debug!("Set singer {singer_id} on gig {gig_id} to {status}");
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use agdb::{Comparison, QueryBuilder, QueryId};
    use chrono::NaiveDate;

    use crate::{
        Repository,
        repository::{
            GigId, SingerId,
            db::models::AssignmentModel,
            entities::{Assignment, Error, Gig, Status},
        },
    };

    fn summer_fest(repo: &Repository) -> Gig {
        repo.create_gig(
            "Acme",
            "Summer Fest",
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            "Park",
        )
        .unwrap()
    }

    /// Number of assignment nodes stored for the pair, duplicates included.
    fn stored_count(repo: &Repository, gig: &Gig, singer: SingerId) -> usize {
        let gig_id = gig.id.db_id(&repo.db).unwrap();
        let models: Vec<AssignmentModel> = repo
            .db
            .read()
            .exec(
                QueryBuilder::select()
                    .elements::<AssignmentModel>()
                    .search()
                    .from(gig_id)
                    .where_()
                    .neighbor()
                    .and()
                    .key("singer_id")
                    .value(Comparison::Equal(singer.0.into()))
                    .query(),
            )
            .unwrap()
            .try_into()
            .unwrap();

        models.len()
    }

    #[test]
    fn test_booked_scenario() {
        let repo = Repository::mock();
        let gig = summer_fest(&repo);
        let jane = repo.add_singer("Jane", "Doe", "jane@example.com").unwrap();

        repo.set_status(gig.id(), jane.id(), Status::Booked).unwrap();

        let assignments = repo.assignments(gig.id()).unwrap();

        assert_eq!(assignments.len(), 1);
        assert_eq!(
            assignments.get(&jane.id()),
            Some(&Assignment {
                name: "Jane Doe".into(),
                status: Status::Booked,
            })
        );
    }

    #[test]
    fn test_upsert_replaces_status() {
        let repo = Repository::mock();
        let gig = summer_fest(&repo);
        let jane = repo.add_singer("Jane", "Doe", "jane@example.com").unwrap();

        repo.set_status(gig.id(), jane.id(), Status::Booked).unwrap();
        repo.set_status(gig.id(), jane.id(), Status::Available)
            .unwrap();

        let assignments = repo.assignments(gig.id()).unwrap();

        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[&jane.id()].status, Status::Available);
        assert_eq!(stored_count(&repo, &gig, jane.id()), 1);
    }

    #[test]
    fn test_last_write_wins() {
        let repo = Repository::mock();
        let gig = summer_fest(&repo);
        let jane = repo.add_singer("Jane", "Doe", "jane@example.com").unwrap();
        let john = repo.add_singer("John", "Roe", "john@example.com").unwrap();

        let writes = [
            (jane.id(), Status::Inquired),
            (john.id(), Status::Possible),
            (jane.id(), Status::NotAvailable),
            (john.id(), Status::Booked),
            (jane.id(), Status::Available),
        ];
        for (singer, status) in writes {
            repo.set_status(gig.id(), singer, status).unwrap();
        }

        let assignments = repo.assignments(gig.id()).unwrap();

        assert_eq!(assignments[&jane.id()].status, Status::Available);
        assert_eq!(assignments[&john.id()].status, Status::Booked);
        assert_eq!(stored_count(&repo, &gig, jane.id()), 1);
        assert_eq!(stored_count(&repo, &gig, john.id()), 1);
    }

    #[test]
    fn test_upsert_removes_duplicates() {
        let repo = Repository::mock();
        let gig = summer_fest(&repo);
        let jane = repo.add_singer("Jane", "Doe", "jane@example.com").unwrap();
        let gig_db_id = gig.id.db_id(&repo.db).unwrap();
        let jane_db_id = jane.id.db_id(&repo.db).unwrap();

        repo.set_status(gig.id(), jane.id(), Status::Possible)
            .unwrap();

        // Store a second node for the same pair behind the upsert's back
        repo.db
            .write()
            .transaction_mut(|t| -> Result<(), agdb::DbError> {
                let model = AssignmentModel::new(gig.id(), jane.id(), Status::NotAvailable);
                let id = t
                    .exec_mut(QueryBuilder::insert().element(model).query())?
                    .elements
                    .first()
                    .unwrap()
                    .id;
                t.exec_mut(
                    QueryBuilder::insert()
                        .edges()
                        .from([QueryId::from(gig_db_id), QueryId::from(jane_db_id)])
                        .to(id)
                        .query(),
                )?;
                Ok(())
            })
            .unwrap();
        assert_eq!(stored_count(&repo, &gig, jane.id()), 2);

        repo.set_status(gig.id(), jane.id(), Status::Booked).unwrap();

        assert_eq!(stored_count(&repo, &gig, jane.id()), 1);
        assert_eq!(
            repo.assignments(gig.id()).unwrap()[&jane.id()].status,
            Status::Booked
        );
    }

    #[test]
    fn test_idempotent() {
        let repo = Repository::mock();
        let gig = summer_fest(&repo);
        let jane = repo.add_singer("Jane", "Doe", "jane@example.com").unwrap();

        repo.set_status(gig.id(), jane.id(), Status::Possible)
            .unwrap();
        let once = repo.assignments(gig.id()).unwrap();

        repo.set_status(gig.id(), jane.id(), Status::Possible)
            .unwrap();
        let twice = repo.assignments(gig.id()).unwrap();

        assert_eq!(once, twice);
        assert_eq!(stored_count(&repo, &gig, jane.id()), 1);
    }

    #[test]
    fn test_unassigned_singers_are_absent() {
        let repo = Repository::mock();
        let gig = summer_fest(&repo);
        let jane = repo.add_singer("Jane", "Doe", "jane@example.com").unwrap();
        let john = repo.add_singer("John", "Roe", "john@example.com").unwrap();

        repo.set_status(gig.id(), jane.id(), Status::Booked).unwrap();

        let assignments = repo.assignments(gig.id()).unwrap();

        assert!(assignments.contains_key(&jane.id()));
        assert!(!assignments.contains_key(&john.id()));
    }

    #[test]
    fn test_assignments_are_per_gig() {
        let repo = Repository::mock();
        let summer = summer_fest(&repo);
        let winter = repo
            .create_gig(
                "Acme",
                "Winter Gala",
                NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
                "Hall",
            )
            .unwrap();
        let jane = repo.add_singer("Jane", "Doe", "jane@example.com").unwrap();

        repo.set_status(summer.id(), jane.id(), Status::Booked)
            .unwrap();
        repo.set_status(winter.id(), jane.id(), Status::NotAvailable)
            .unwrap();

        assert_eq!(
            repo.assignments(summer.id()).unwrap()[&jane.id()].status,
            Status::Booked
        );
        assert_eq!(
            repo.assignments(winter.id()).unwrap()[&jane.id()].status,
            Status::NotAvailable
        );
    }

    #[test]
    fn test_invalid_label_leaves_state_alone() {
        let repo = Repository::mock();
        let gig = summer_fest(&repo);
        let jane = repo.add_singer("Jane", "Doe", "jane@example.com").unwrap();

        repo.set_status(gig.id(), jane.id(), Status::Booked).unwrap();
        let before = repo.assignments(gig.id()).unwrap();

        assert!(matches!(
            repo.set_status_label(gig.id(), jane.id(), "Tentative"),
            Err(crate::Error::Entity(Error::InvalidStatus(_)))
        ));
        assert_eq!(repo.assignments(gig.id()).unwrap(), before);
    }

    #[test]
    fn test_set_status_label() {
        let repo = Repository::mock();
        let gig = summer_fest(&repo);
        let jane = repo.add_singer("Jane", "Doe", "jane@example.com").unwrap();

        repo.set_status_label(gig.id(), jane.id(), "Not Available")
            .unwrap();

        assert_eq!(
            repo.assignments(gig.id()).unwrap()[&jane.id()].status,
            Status::NotAvailable
        );
    }

    #[test]
    fn test_unknown_references() {
        let repo = Repository::mock();
        let gig = summer_fest(&repo);
        let jane = repo.add_singer("Jane", "Doe", "jane@example.com").unwrap();

        assert!(matches!(
            repo.set_status(GigId(404), jane.id(), Status::Booked),
            Err(crate::Error::Entity(Error::UnknownGig(GigId(404))))
        ));
        assert!(matches!(
            repo.set_status(gig.id(), SingerId(404), Status::Booked),
            Err(crate::Error::Entity(Error::UnknownSinger(SingerId(404))))
        ));
        assert!(matches!(
            repo.assignments(GigId(404)),
            Err(crate::Error::Entity(Error::UnknownGig(_)))
        ));
        assert!(repo.assignments(gig.id()).unwrap().is_empty());
    }

    #[test]
    fn test_gig_id_is_not_a_singer_id() {
        let repo = Repository::mock();
        let gig = summer_fest(&repo);
        repo.add_singer("Jane", "Doe", "jane@example.com").unwrap();

        // Gigs and singers share one id counter, so a gig id never resolves to a singer
        assert!(matches!(
            repo.set_status(gig.id(), SingerId(gig.id().0), Status::Booked),
            Err(crate::Error::Entity(Error::UnknownSinger(_)))
        ));
    }
}
