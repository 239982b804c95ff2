//! Car repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist cars with their brand and engine references.
//! - Remove a car together with the engine it owns.
//!
//! # Invariants
//! - `brand_id` must reference an existing brand.
//! - An engine belongs to at most one car (`car.engine_id` is unique).
//! - Deleting a car removes its history rows (FK cascade) and its engine in
//!   the same transaction; if anything fails nothing is removed.

use crate::model::car::{Car, CarId, EngineId};
use crate::repo::crud::CrudRepository;
use crate::repo::{require_id, FromRow, RepoError, RepoResult};
use rusqlite::{named_params, OptionalExtension, Row};

const CAR_SELECT_SQL: &str = "SELECT id, name, brand_id, engine_id FROM car";

impl FromRow for Car {
    const ENTITY: &'static str = "car";

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: Some(row.get("id")?),
            name: row.get("name")?,
            brand_id: row.get("brand_id")?,
            engine_id: row.get("engine_id")?,
        })
    }
}

/// Repository interface for car CRUD operations.
pub trait CarRepository {
    fn get_car_by_id(&self, id: CarId) -> RepoResult<Option<Car>>;
    fn get_all_cars(&self) -> RepoResult<Vec<Car>>;
    fn save_car(&self, car: &mut Car) -> RepoResult<CarId>;
    fn update_car(&self, car: &Car) -> RepoResult<()>;
    fn delete_car_by_id(&self, id: CarId) -> RepoResult<()>;
}

#[derive(Clone)]
pub struct SqliteCarRepository {
    crud: CrudRepository,
}

impl SqliteCarRepository {
    pub fn new(crud: CrudRepository) -> Self {
        Self { crud }
    }
}

impl CarRepository for SqliteCarRepository {
    fn get_car_by_id(&self, id: CarId) -> RepoResult<Option<Car>> {
        self.crud.optional(
            "car.get_by_id",
            &format!("{CAR_SELECT_SQL} WHERE id = :id;"),
            named_params! { ":id": id },
        )
    }

    fn get_all_cars(&self) -> RepoResult<Vec<Car>> {
        self.crud.query(
            "car.get_all",
            &format!("{CAR_SELECT_SQL} ORDER BY id ASC;"),
            named_params! {},
        )
    }

    fn save_car(&self, car: &mut Car) -> RepoResult<CarId> {
        let id = self.crud.insert(
            "car.save",
            "INSERT INTO car (name, brand_id, engine_id) VALUES (:name, :brand_id, :engine_id);",
            named_params! {
                ":name": car.name,
                ":brand_id": car.brand_id,
                ":engine_id": car.engine_id,
            },
        )?;
        car.id = Some(id);
        Ok(id)
    }

    fn update_car(&self, car: &Car) -> RepoResult<()> {
        let id = require_id(car.id, Car::ENTITY)?;
        self.crud.execute_one(
            "car.update",
            "UPDATE car
             SET
                name = :name,
                brand_id = :brand_id,
                engine_id = :engine_id
             WHERE id = :id;",
            named_params! {
                ":name": car.name,
                ":brand_id": car.brand_id,
                ":engine_id": car.engine_id,
                ":id": id,
            },
            Car::ENTITY,
            id,
        )
    }

    fn delete_car_by_id(&self, id: CarId) -> RepoResult<()> {
        self.crud.run("car.delete", |tx| {
            let engine_id: Option<Option<EngineId>> = tx
                .query_row(
                    "SELECT engine_id FROM car WHERE id = :id;",
                    named_params! { ":id": id },
                    |row| row.get(0),
                )
                .optional()?;
            let Some(engine_id) = engine_id else {
                return Err(RepoError::NotFound {
                    entity: Car::ENTITY,
                    id,
                });
            };

            tx.execute("DELETE FROM car WHERE id = :id;", named_params! { ":id": id })?;
            if let Some(engine_id) = engine_id {
                tx.execute(
                    "DELETE FROM engine WHERE id = :id;",
                    named_params! { ":id": engine_id },
                )?;
            }
            Ok(())
        })
    }
}
