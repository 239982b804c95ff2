//! User repository contract and SQLite implementation.
//!
//! # Invariants
//! - `auto_user.login` is unique.
//! - Login substring search folds case with Unicode rules on both sides and
//!   matches the key literally (no wildcards).

use crate::db::UNICODE_LOWER_FN;
use crate::model::user::{User, UserId};
use crate::repo::crud::CrudRepository;
use crate::repo::{require_id, FromRow, RepoResult};
use rusqlite::{named_params, Row};

const USER_SELECT_SQL: &str = "SELECT id, login, password FROM auto_user";

impl FromRow for User {
    const ENTITY: &'static str = "user";

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: Some(row.get("id")?),
            login: row.get("login")?,
            password: row.get("password")?,
        })
    }
}

/// Repository interface for marketplace accounts.
pub trait UserRepository {
    /// Persists a new user and returns it with the assigned id.
    fn create(&self, user: &mut User) -> RepoResult<UserId>;
    /// Rewrites login and password of an existing user.
    fn update(&self, user: &User) -> RepoResult<()>;
    fn delete(&self, id: UserId) -> RepoResult<()>;
    fn find_all_order_by_id(&self) -> RepoResult<Vec<User>>;
    fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;
    /// Users whose login contains `key`, ignoring case.
    fn find_by_like_login(&self, key: &str) -> RepoResult<Vec<User>>;
    fn find_by_login(&self, login: &str) -> RepoResult<Option<User>>;
}

#[derive(Clone)]
pub struct SqliteUserRepository {
    crud: CrudRepository,
}

impl SqliteUserRepository {
    pub fn new(crud: CrudRepository) -> Self {
        Self { crud }
    }
}

impl UserRepository for SqliteUserRepository {
    fn create(&self, user: &mut User) -> RepoResult<UserId> {
        let id = self.crud.insert(
            "user.create",
            "INSERT INTO auto_user (login, password) VALUES (:login, :password);",
            named_params! { ":login": user.login, ":password": user.password },
        )?;
        user.id = Some(id);
        Ok(id)
    }

    fn update(&self, user: &User) -> RepoResult<()> {
        let id = require_id(user.id, User::ENTITY)?;
        self.crud.execute_one(
            "user.update",
            "UPDATE auto_user SET login = :login, password = :password WHERE id = :id;",
            named_params! { ":login": user.login, ":password": user.password, ":id": id },
            User::ENTITY,
            id,
        )
    }

    fn delete(&self, id: UserId) -> RepoResult<()> {
        self.crud.execute_one(
            "user.delete",
            "DELETE FROM auto_user WHERE id = :id;",
            named_params! { ":id": id },
            User::ENTITY,
            id,
        )
    }

    fn find_all_order_by_id(&self) -> RepoResult<Vec<User>> {
        self.crud.query(
            "user.find_all",
            &format!("{USER_SELECT_SQL} ORDER BY id ASC;"),
            named_params! {},
        )
    }

    fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        self.crud.optional(
            "user.find_by_id",
            &format!("{USER_SELECT_SQL} WHERE id = :id;"),
            named_params! { ":id": id },
        )
    }

    fn find_by_like_login(&self, key: &str) -> RepoResult<Vec<User>> {
        self.crud.query(
            "user.find_by_like_login",
            &format!(
                "{USER_SELECT_SQL}
                 WHERE instr({UNICODE_LOWER_FN}(login), :key) > 0
                 ORDER BY id ASC;"
            ),
            named_params! { ":key": key.to_lowercase() },
        )
    }

    fn find_by_login(&self, login: &str) -> RepoResult<Option<User>> {
        self.crud.optional(
            "user.find_by_login",
            &format!("{USER_SELECT_SQL} WHERE login = :login;"),
            named_params! { ":login": login },
        )
    }
}
