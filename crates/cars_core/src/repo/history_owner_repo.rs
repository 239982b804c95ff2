//! Ownership history repository contract and SQLite implementation.
//!
//! # Invariants
//! - Every row references an existing car and owner.
//! - `end_at`, when present, is not earlier than `start_at` (store CHECK).
//! - Rows disappear with their car.

use crate::model::car::CarId;
use crate::model::owner::{HistoryOwner, HistoryOwnerId};
use crate::repo::crud::CrudRepository;
use crate::repo::{parse_timestamp, require_id, timestamp_to_db, FromRow, RepoResult};
use rusqlite::{named_params, Row};

const HISTORY_OWNER_SELECT_SQL: &str = "SELECT
    id,
    car_id,
    owner_id,
    start_at,
    end_at
FROM history_owners";

impl FromRow for HistoryOwner {
    const ENTITY: &'static str = "history_owner";

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        let end_at = match row.get::<_, Option<i64>>("end_at")? {
            Some(value) => Some(parse_timestamp(value, "history_owners.end_at")?),
            None => None,
        };

        Ok(Self {
            id: Some(row.get("id")?),
            car_id: row.get("car_id")?,
            owner_id: row.get("owner_id")?,
            start_at: parse_timestamp(row.get("start_at")?, "history_owners.start_at")?,
            end_at,
        })
    }
}

/// Repository interface for car ownership intervals.
pub trait HistoryOwnerRepository {
    fn get_all_history_owner(&self) -> RepoResult<Vec<HistoryOwner>>;
    fn save_history_owner(&self, history: &mut HistoryOwner) -> RepoResult<HistoryOwnerId>;
    fn get_history_owner_by_id(&self, id: HistoryOwnerId) -> RepoResult<Option<HistoryOwner>>;
    /// Ownership intervals of one car, oldest first.
    fn get_history_by_car(&self, car_id: CarId) -> RepoResult<Vec<HistoryOwner>>;
    fn update_history_owner(&self, history: &HistoryOwner) -> RepoResult<()>;
    fn delete_history_owner_by_id(&self, id: HistoryOwnerId) -> RepoResult<()>;
}

#[derive(Clone)]
pub struct SqliteHistoryOwnerRepository {
    crud: CrudRepository,
}

impl SqliteHistoryOwnerRepository {
    pub fn new(crud: CrudRepository) -> Self {
        Self { crud }
    }
}

impl HistoryOwnerRepository for SqliteHistoryOwnerRepository {
    fn get_all_history_owner(&self) -> RepoResult<Vec<HistoryOwner>> {
        self.crud.query(
            "history_owner.get_all",
            &format!("{HISTORY_OWNER_SELECT_SQL} ORDER BY id ASC;"),
            named_params! {},
        )
    }

    fn save_history_owner(&self, history: &mut HistoryOwner) -> RepoResult<HistoryOwnerId> {
        let id = self.crud.insert(
            "history_owner.save",
            "INSERT INTO history_owners (car_id, owner_id, start_at, end_at)
             VALUES (:car_id, :owner_id, :start_at, :end_at);",
            named_params! {
                ":car_id": history.car_id,
                ":owner_id": history.owner_id,
                ":start_at": timestamp_to_db(history.start_at),
                ":end_at": history.end_at.map(timestamp_to_db),
            },
        )?;
        history.id = Some(id);
        Ok(id)
    }

    fn get_history_owner_by_id(&self, id: HistoryOwnerId) -> RepoResult<Option<HistoryOwner>> {
        self.crud.optional(
            "history_owner.get_by_id",
            &format!("{HISTORY_OWNER_SELECT_SQL} WHERE id = :id;"),
            named_params! { ":id": id },
        )
    }

    fn get_history_by_car(&self, car_id: CarId) -> RepoResult<Vec<HistoryOwner>> {
        self.crud.query(
            "history_owner.get_by_car",
            &format!("{HISTORY_OWNER_SELECT_SQL} WHERE car_id = :car_id ORDER BY start_at ASC, id ASC;"),
            named_params! { ":car_id": car_id },
        )
    }

    fn update_history_owner(&self, history: &HistoryOwner) -> RepoResult<()> {
        let id = require_id(history.id, HistoryOwner::ENTITY)?;
        self.crud.execute_one(
            "history_owner.update",
            "UPDATE history_owners
             SET
                car_id = :car_id,
                owner_id = :owner_id,
                start_at = :start_at,
                end_at = :end_at
             WHERE id = :id;",
            named_params! {
                ":car_id": history.car_id,
                ":owner_id": history.owner_id,
                ":start_at": timestamp_to_db(history.start_at),
                ":end_at": history.end_at.map(timestamp_to_db),
                ":id": id,
            },
            HistoryOwner::ENTITY,
            id,
        )
    }

    fn delete_history_owner_by_id(&self, id: HistoryOwnerId) -> RepoResult<()> {
        self.crud.execute_one(
            "history_owner.delete",
            "DELETE FROM history_owners WHERE id = :id;",
            named_params! { ":id": id },
            HistoryOwner::ENTITY,
            id,
        )
    }
}
