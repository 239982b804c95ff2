//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define one narrow data access contract per marketplace entity.
//! - Route every call through [`crud::CrudRepository`] so each call is exactly
//!   one transaction.
//!
//! # Invariants
//! - Not-found reads return `Ok(None)` / empty vectors, never errors.
//! - Updates and deletes addressing a missing row return `RepoError::NotFound`
//!   and leave the store unchanged.
//! - Uniqueness and foreign-key failures surface as
//!   `RepoError::ConstraintViolation` after rollback.

use crate::db::{Database, DbError};
use chrono::{DateTime, Utc};
use rusqlite::{ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub mod brand_repo;
pub mod car_repo;
pub mod crud;
pub mod engine_repo;
pub mod history_owner_repo;
pub mod owner_repo;
pub mod participates_repo;
pub mod photo_repo;
pub mod post_repo;
pub mod price_history_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by all entity repositories.
#[derive(Debug)]
pub enum RepoError {
    /// Connection, transaction or statement failure.
    Db(DbError),
    /// A write broke a unique, foreign-key, not-null or check constraint.
    ConstraintViolation(String),
    /// Update/delete addressed a key with no matching row.
    NotFound { entity: &'static str, id: i64 },
    /// A single-row read matched more than one row.
    NonUniqueResult { entity: &'static str },
    /// Update called with an entity that was never saved.
    Unsaved { entity: &'static str },
    /// A persisted row could not be mapped back to its entity.
    InvalidData(String),
}

impl RepoError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::ConstraintViolation(message) => write!(f, "constraint violation: {message}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::NonUniqueResult { entity } => {
                write!(f, "expected at most one {entity} row, query matched several")
            }
            Self::Unsaved { entity } => write!(f, "{entity} has no id; save it first"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Sqlite(err) => classify_sqlite_error(err),
            other => Self::Db(other),
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        classify_sqlite_error(value)
    }
}

fn classify_sqlite_error(err: rusqlite::Error) -> RepoError {
    if let rusqlite::Error::SqliteFailure(failure, message) = &err {
        if failure.code == ErrorCode::ConstraintViolation {
            let message = message.clone().unwrap_or_else(|| failure.to_string());
            return RepoError::ConstraintViolation(message);
        }
    }
    RepoError::Db(DbError::Sqlite(err))
}

/// Maps one result row to an entity.
///
/// Implemented next to each entity repository; selects the entity type for
/// the generic `query`/`optional` reads.
pub trait FromRow: Sized {
    /// Entity name used in error messages.
    const ENTITY: &'static str;

    fn from_row(row: &Row<'_>) -> RepoResult<Self>;
}

/// Every SQLite repository wired to one shared database handle.
#[derive(Clone)]
pub struct Repositories {
    pub brands: brand_repo::SqliteBrandRepository,
    pub engines: engine_repo::SqliteEngineRepository,
    pub cars: car_repo::SqliteCarRepository,
    pub owners: owner_repo::SqliteOwnerRepository,
    pub history_owners: history_owner_repo::SqliteHistoryOwnerRepository,
    pub users: user_repo::SqliteUserRepository,
    pub posts: post_repo::SqlitePostRepository,
    pub photos: photo_repo::SqlitePhotoRepository,
    pub price_history: price_history_repo::SqlitePriceHistoryRepository,
    pub participates: participates_repo::SqliteParticipatesRepository,
}

impl Repositories {
    pub fn new(db: Arc<Database>) -> Self {
        let crud = crud::CrudRepository::new(db);
        Self {
            brands: brand_repo::SqliteBrandRepository::new(crud.clone()),
            engines: engine_repo::SqliteEngineRepository::new(crud.clone()),
            cars: car_repo::SqliteCarRepository::new(crud.clone()),
            owners: owner_repo::SqliteOwnerRepository::new(crud.clone()),
            history_owners: history_owner_repo::SqliteHistoryOwnerRepository::new(crud.clone()),
            users: user_repo::SqliteUserRepository::new(crud.clone()),
            posts: post_repo::SqlitePostRepository::new(crud.clone()),
            photos: photo_repo::SqlitePhotoRepository::new(crud.clone()),
            price_history: price_history_repo::SqlitePriceHistoryRepository::new(crud.clone()),
            participates: participates_repo::SqliteParticipatesRepository::new(crud),
        }
    }
}

/// Returns the id of a saved entity or `RepoError::Unsaved`.
pub(crate) fn require_id(id: Option<i64>, entity: &'static str) -> RepoResult<i64> {
    id.ok_or(RepoError::Unsaved { entity })
}

pub(crate) fn timestamp_to_db(value: DateTime<Utc>) -> i64 {
    value.timestamp_millis()
}

pub(crate) fn parse_timestamp(value: i64, column: &'static str) -> RepoResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(value)
        .ok_or_else(|| RepoError::InvalidData(format!("timestamp `{value}` out of range in {column}")))
}

#[cfg(test)]
mod tests {
    use super::{parse_timestamp, timestamp_to_db, RepoError};
    use crate::db::DbError;
    use chrono::{TimeZone, Utc};

    #[test]
    fn timestamps_round_trip_through_epoch_millis() {
        let value = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let stored = timestamp_to_db(value);
        assert_eq!(stored, 1_700_000_000_123);
        assert_eq!(parse_timestamp(stored, "auto_post.created").unwrap(), value);
    }

    #[test]
    fn out_of_range_timestamp_is_invalid_data() {
        let err = parse_timestamp(i64::MAX, "auto_post.created").unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(message) if message.contains("auto_post.created")));
    }

    #[test]
    fn schema_errors_stay_db_errors() {
        let err = RepoError::from(DbError::UnsupportedSchemaVersion {
            db_version: 9,
            latest_supported: 2,
        });
        assert!(matches!(err, RepoError::Db(DbError::UnsupportedSchemaVersion { .. })));
        assert!(!err.is_constraint_violation());
    }
}
