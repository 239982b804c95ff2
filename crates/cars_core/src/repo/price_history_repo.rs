//! Price history repository.
//!
//! Rows are append-only: the contract offers no update; rows go away only
//! with their post.

use crate::model::post::{PostId, PriceHistory, PriceHistoryId};
use crate::repo::crud::CrudRepository;
use crate::repo::{parse_timestamp, timestamp_to_db, FromRow, RepoResult};
use rusqlite::{named_params, Row};

const PRICE_HISTORY_SELECT_SQL: &str = "SELECT
    id,
    \"before\" AS price_before,
    \"after\" AS price_after,
    created,
    auto_post_id
FROM price_history";

impl FromRow for PriceHistory {
    const ENTITY: &'static str = "price_history";

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: Some(row.get("id")?),
            before: row.get("price_before")?,
            after: row.get("price_after")?,
            created: parse_timestamp(row.get("created")?, "price_history.created")?,
            post_id: row.get("auto_post_id")?,
        })
    }
}

/// Repository interface for post price changes.
pub trait PriceHistoryRepository {
    fn get_all_price_history(&self) -> RepoResult<Vec<PriceHistory>>;
    fn save_price_history(&self, price_history: &mut PriceHistory) -> RepoResult<PriceHistoryId>;
    fn get_price_history_by_id(&self, id: PriceHistoryId) -> RepoResult<Option<PriceHistory>>;
    /// Price changes of one post in the order they were recorded.
    fn get_price_history_by_post(&self, post_id: PostId) -> RepoResult<Vec<PriceHistory>>;
}

#[derive(Clone)]
pub struct SqlitePriceHistoryRepository {
    crud: CrudRepository,
}

impl SqlitePriceHistoryRepository {
    pub fn new(crud: CrudRepository) -> Self {
        Self { crud }
    }
}

impl PriceHistoryRepository for SqlitePriceHistoryRepository {
    fn get_all_price_history(&self) -> RepoResult<Vec<PriceHistory>> {
        self.crud.query(
            "price_history.get_all",
            &format!("{PRICE_HISTORY_SELECT_SQL} ORDER BY id ASC;"),
            named_params! {},
        )
    }

    fn save_price_history(&self, price_history: &mut PriceHistory) -> RepoResult<PriceHistoryId> {
        let id = self.crud.insert(
            "price_history.save",
            "INSERT INTO price_history (\"before\", \"after\", created, auto_post_id)
             VALUES (:before, :after, :created, :post_id);",
            named_params! {
                ":before": price_history.before,
                ":after": price_history.after,
                ":created": timestamp_to_db(price_history.created),
                ":post_id": price_history.post_id,
            },
        )?;
        price_history.id = Some(id);
        Ok(id)
    }

    fn get_price_history_by_id(&self, id: PriceHistoryId) -> RepoResult<Option<PriceHistory>> {
        self.crud.optional(
            "price_history.get_by_id",
            &format!("{PRICE_HISTORY_SELECT_SQL} WHERE id = :id;"),
            named_params! { ":id": id },
        )
    }

    fn get_price_history_by_post(&self, post_id: PostId) -> RepoResult<Vec<PriceHistory>> {
        self.crud.query(
            "price_history.get_by_post",
            &format!(
                "{PRICE_HISTORY_SELECT_SQL} WHERE auto_post_id = :post_id ORDER BY created ASC, id ASC;"
            ),
            named_params! { ":post_id": post_id },
        )
    }
}
