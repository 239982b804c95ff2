//! Engine repository contract and SQLite implementation.

use crate::model::car::{Engine, EngineId};
use crate::repo::crud::CrudRepository;
use crate::repo::{require_id, FromRow, RepoResult};
use rusqlite::{named_params, Row};

impl FromRow for Engine {
    const ENTITY: &'static str = "engine";

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: Some(row.get("id")?),
            name: row.get("name")?,
        })
    }
}

/// Repository interface for engine CRUD operations.
pub trait EngineRepository {
    fn get_engine_by_id(&self, id: EngineId) -> RepoResult<Option<Engine>>;
    fn get_all_engines(&self) -> RepoResult<Vec<Engine>>;
    fn save_engine(&self, engine: &mut Engine) -> RepoResult<EngineId>;
    fn update_engine(&self, engine: &Engine) -> RepoResult<()>;
    /// Fails with `ConstraintViolation` while a car still uses the engine.
    fn delete_engine_by_id(&self, id: EngineId) -> RepoResult<()>;
}

#[derive(Clone)]
pub struct SqliteEngineRepository {
    crud: CrudRepository,
}

impl SqliteEngineRepository {
    pub fn new(crud: CrudRepository) -> Self {
        Self { crud }
    }
}

impl EngineRepository for SqliteEngineRepository {
    fn get_engine_by_id(&self, id: EngineId) -> RepoResult<Option<Engine>> {
        self.crud.optional(
            "engine.get_by_id",
            "SELECT id, name FROM engine WHERE id = :id;",
            named_params! { ":id": id },
        )
    }

    fn get_all_engines(&self) -> RepoResult<Vec<Engine>> {
        self.crud.query(
            "engine.get_all",
            "SELECT id, name FROM engine ORDER BY id ASC;",
            named_params! {},
        )
    }

    fn save_engine(&self, engine: &mut Engine) -> RepoResult<EngineId> {
        let id = self.crud.insert(
            "engine.save",
            "INSERT INTO engine (name) VALUES (:name);",
            named_params! { ":name": engine.name },
        )?;
        engine.id = Some(id);
        Ok(id)
    }

    fn update_engine(&self, engine: &Engine) -> RepoResult<()> {
        let id = require_id(engine.id, Engine::ENTITY)?;
        self.crud.execute_one(
            "engine.update",
            "UPDATE engine SET name = :name WHERE id = :id;",
            named_params! { ":name": engine.name, ":id": id },
            Engine::ENTITY,
            id,
        )
    }

    fn delete_engine_by_id(&self, id: EngineId) -> RepoResult<()> {
        self.crud.execute_one(
            "engine.delete",
            "DELETE FROM engine WHERE id = :id;",
            named_params! { ":id": id },
            Engine::ENTITY,
            id,
        )
    }
}
