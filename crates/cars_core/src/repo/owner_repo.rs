//! Owner repository contract and SQLite implementation.

use crate::model::owner::{Owner, OwnerId};
use crate::repo::crud::CrudRepository;
use crate::repo::{require_id, FromRow, RepoResult};
use rusqlite::{named_params, Row};

impl FromRow for Owner {
    const ENTITY: &'static str = "owner";

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: Some(row.get("id")?),
            name: row.get("name")?,
            user_id: row.get("user_id")?,
        })
    }
}

/// Repository interface for car owner records.
pub trait OwnerRepository {
    fn get_owner_by_id(&self, id: OwnerId) -> RepoResult<Option<Owner>>;
    fn get_all_owners(&self) -> RepoResult<Vec<Owner>>;
    fn save_owner(&self, owner: &mut Owner) -> RepoResult<OwnerId>;
    fn update_owner(&self, owner: &Owner) -> RepoResult<()>;
    fn delete_owner_by_id(&self, id: OwnerId) -> RepoResult<()>;
}

#[derive(Clone)]
pub struct SqliteOwnerRepository {
    crud: CrudRepository,
}

impl SqliteOwnerRepository {
    pub fn new(crud: CrudRepository) -> Self {
        Self { crud }
    }
}

impl OwnerRepository for SqliteOwnerRepository {
    fn get_owner_by_id(&self, id: OwnerId) -> RepoResult<Option<Owner>> {
        self.crud.optional(
            "owner.get_by_id",
            "SELECT id, name, user_id FROM owners WHERE id = :id;",
            named_params! { ":id": id },
        )
    }

    fn get_all_owners(&self) -> RepoResult<Vec<Owner>> {
        self.crud.query(
            "owner.get_all",
            "SELECT id, name, user_id FROM owners ORDER BY id ASC;",
            named_params! {},
        )
    }

    fn save_owner(&self, owner: &mut Owner) -> RepoResult<OwnerId> {
        let id = self.crud.insert(
            "owner.save",
            "INSERT INTO owners (name, user_id) VALUES (:name, :user_id);",
            named_params! { ":name": owner.name, ":user_id": owner.user_id },
        )?;
        owner.id = Some(id);
        Ok(id)
    }

    fn update_owner(&self, owner: &Owner) -> RepoResult<()> {
        let id = require_id(owner.id, Owner::ENTITY)?;
        self.crud.execute_one(
            "owner.update",
            "UPDATE owners SET name = :name, user_id = :user_id WHERE id = :id;",
            named_params! { ":name": owner.name, ":user_id": owner.user_id, ":id": id },
            Owner::ENTITY,
            id,
        )
    }

    fn delete_owner_by_id(&self, id: OwnerId) -> RepoResult<()> {
        self.crud.execute_one(
            "owner.delete",
            "DELETE FROM owners WHERE id = :id;",
            named_params! { ":id": id },
            Owner::ENTITY,
            id,
        )
    }
}
