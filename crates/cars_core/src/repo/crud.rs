//! Generic CRUD executor shared by all entity repositories.
//!
//! # Responsibility
//! - Offer entity-agnostic `run` / `execute` / `query` / `optional` primitives.
//! - Delegate the unit-of-work lifecycle of every call to [`Database`].
//!
//! # Invariants
//! - One public call is one transaction.
//! - Parameters are bound by name (`:name`), never spliced into SQL text.

use crate::db::Database;
use crate::repo::{FromRow, RepoError, RepoResult};
use rusqlite::{Connection, ToSql, Transaction};
use std::sync::Arc;

/// Named bind parameters, as produced by `rusqlite::named_params!`.
pub type NamedParams<'a> = &'a [(&'a str, &'a dyn ToSql)];

/// Cheaply cloneable executor over the shared database handle.
#[derive(Clone)]
pub struct CrudRepository {
    db: Arc<Database>,
}

impl CrudRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Runs an arbitrary closure inside one transaction.
    pub fn run<T, F>(&self, op: &'static str, action: F) -> RepoResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> RepoResult<T>,
    {
        self.db.transact(op, action)
    }

    /// Executes a parameterized write and returns the affected row count.
    pub fn execute(&self, op: &'static str, sql: &str, params: NamedParams<'_>) -> RepoResult<usize> {
        self.run(op, |tx| Ok(tx.execute(sql, params)?))
    }

    /// Executes an insert and returns the generated surrogate key.
    pub fn insert(&self, op: &'static str, sql: &str, params: NamedParams<'_>) -> RepoResult<i64> {
        self.run(op, |tx| {
            tx.execute(sql, params)?;
            Ok(tx.last_insert_rowid())
        })
    }

    /// Executes a write that must touch the row identified by `id`.
    ///
    /// Returns `RepoError::NotFound` (and rolls back) when no row changed.
    pub fn execute_one(
        &self,
        op: &'static str,
        sql: &str,
        params: NamedParams<'_>,
        entity: &'static str,
        id: i64,
    ) -> RepoResult<()> {
        self.run(op, |tx| {
            if tx.execute(sql, params)? == 0 {
                return Err(RepoError::NotFound { entity, id });
            }
            Ok(())
        })
    }

    /// Reads every matching row in query order; no match yields an empty vector.
    pub fn query<T: FromRow>(
        &self,
        op: &'static str,
        sql: &str,
        params: NamedParams<'_>,
    ) -> RepoResult<Vec<T>> {
        self.run(op, |tx| query_rows(tx, sql, params))
    }

    /// Reads zero or one row.
    ///
    /// More than one matching row is `RepoError::NonUniqueResult`.
    pub fn optional<T: FromRow>(
        &self,
        op: &'static str,
        sql: &str,
        params: NamedParams<'_>,
    ) -> RepoResult<Option<T>> {
        self.run(op, |tx| optional_row(tx, sql, params))
    }
}

/// Reads all rows on an open connection or transaction.
pub fn query_rows<T: FromRow>(conn: &Connection, sql: &str, params: NamedParams<'_>) -> RepoResult<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(T::from_row(row)?);
    }
    Ok(items)
}

/// Reads at most one row on an open connection or transaction.
pub fn optional_row<T: FromRow>(
    conn: &Connection,
    sql: &str,
    params: NamedParams<'_>,
) -> RepoResult<Option<T>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let Some(first) = rows.next()? else {
        return Ok(None);
    };
    let item = T::from_row(first)?;
    if rows.next()?.is_some() {
        return Err(RepoError::NonUniqueResult { entity: T::ENTITY });
    }
    Ok(Some(item))
}
