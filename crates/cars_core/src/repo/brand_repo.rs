//! Brand repository contract and SQLite implementation.
//!
//! # Invariants
//! - `brands.name` is unique; duplicates fail with `ConstraintViolation`.
//! - Brands referenced by cars cannot be deleted.

use crate::model::car::{Brand, BrandId};
use crate::repo::crud::CrudRepository;
use crate::repo::{require_id, FromRow, RepoResult};
use rusqlite::{named_params, Row};

const BRAND_SELECT_SQL: &str = "SELECT id, name FROM brands";

impl FromRow for Brand {
    const ENTITY: &'static str = "brand";

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: Some(row.get("id")?),
            name: row.get("name")?,
        })
    }
}

/// Repository interface for brand CRUD operations.
pub trait BrandRepository {
    fn get_all_brands(&self) -> RepoResult<Vec<Brand>>;
    /// Persists a new brand and writes the assigned id back into `brand`.
    fn save_brand(&self, brand: &mut Brand) -> RepoResult<BrandId>;
    fn get_brand_by_id(&self, id: BrandId) -> RepoResult<Option<Brand>>;
    /// Exact, case-sensitive name lookup.
    fn get_brand_by_name(&self, name: &str) -> RepoResult<Option<Brand>>;
    fn update_brand(&self, brand: &Brand) -> RepoResult<()>;
    fn delete_brand_by_id(&self, id: BrandId) -> RepoResult<()>;
}

/// SQLite-backed brand repository.
#[derive(Clone)]
pub struct SqliteBrandRepository {
    crud: CrudRepository,
}

impl SqliteBrandRepository {
    pub fn new(crud: CrudRepository) -> Self {
        Self { crud }
    }
}

impl BrandRepository for SqliteBrandRepository {
    fn get_all_brands(&self) -> RepoResult<Vec<Brand>> {
        self.crud.query(
            "brand.get_all",
            &format!("{BRAND_SELECT_SQL} ORDER BY id ASC;"),
            named_params! {},
        )
    }

    fn save_brand(&self, brand: &mut Brand) -> RepoResult<BrandId> {
        let id = self.crud.insert(
            "brand.save",
            "INSERT INTO brands (name) VALUES (:name);",
            named_params! { ":name": brand.name },
        )?;
        brand.id = Some(id);
        Ok(id)
    }

    fn get_brand_by_id(&self, id: BrandId) -> RepoResult<Option<Brand>> {
        self.crud.optional(
            "brand.get_by_id",
            &format!("{BRAND_SELECT_SQL} WHERE id = :id;"),
            named_params! { ":id": id },
        )
    }

    fn get_brand_by_name(&self, name: &str) -> RepoResult<Option<Brand>> {
        self.crud.optional(
            "brand.get_by_name",
            &format!("{BRAND_SELECT_SQL} WHERE name = :name;"),
            named_params! { ":name": name },
        )
    }

    fn update_brand(&self, brand: &Brand) -> RepoResult<()> {
        let id = require_id(brand.id, Brand::ENTITY)?;
        self.crud.execute_one(
            "brand.update",
            "UPDATE brands SET name = :name WHERE id = :id;",
            named_params! { ":name": brand.name, ":id": id },
            Brand::ENTITY,
            id,
        )
    }

    fn delete_brand_by_id(&self, id: BrandId) -> RepoResult<()> {
        self.crud.execute_one(
            "brand.delete",
            "DELETE FROM brands WHERE id = :id;",
            named_params! { ":id": id },
            Brand::ENTITY,
            id,
        )
    }
}
