//! Photo repository contract and SQLite implementation.

use crate::model::post::{Photo, PhotoId, PostId};
use crate::repo::crud::CrudRepository;
use crate::repo::{require_id, FromRow, RepoResult};
use rusqlite::{named_params, Row};

impl FromRow for Photo {
    const ENTITY: &'static str = "photo";

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: Some(row.get("id")?),
            path: row.get("path")?,
            post_id: row.get("post_id")?,
        })
    }
}

/// Repository interface for post photos.
pub trait PhotoRepository {
    fn get_all_photos(&self) -> RepoResult<Vec<Photo>>;
    fn save_photo(&self, photo: &mut Photo) -> RepoResult<PhotoId>;
    fn get_photo_by_id(&self, id: PhotoId) -> RepoResult<Option<Photo>>;
    fn get_photos_by_post(&self, post_id: PostId) -> RepoResult<Vec<Photo>>;
    fn update_photo(&self, photo: &Photo) -> RepoResult<()>;
    fn delete_photo_by_id(&self, id: PhotoId) -> RepoResult<()>;
}

#[derive(Clone)]
pub struct SqlitePhotoRepository {
    crud: CrudRepository,
}

impl SqlitePhotoRepository {
    pub fn new(crud: CrudRepository) -> Self {
        Self { crud }
    }
}

impl PhotoRepository for SqlitePhotoRepository {
    fn get_all_photos(&self) -> RepoResult<Vec<Photo>> {
        self.crud.query(
            "photo.get_all",
            "SELECT id, path, post_id FROM photos ORDER BY id ASC;",
            named_params! {},
        )
    }

    fn save_photo(&self, photo: &mut Photo) -> RepoResult<PhotoId> {
        let id = self.crud.insert(
            "photo.save",
            "INSERT INTO photos (path, post_id) VALUES (:path, :post_id);",
            named_params! { ":path": photo.path, ":post_id": photo.post_id },
        )?;
        photo.id = Some(id);
        Ok(id)
    }

    fn get_photo_by_id(&self, id: PhotoId) -> RepoResult<Option<Photo>> {
        self.crud.optional(
            "photo.get_by_id",
            "SELECT id, path, post_id FROM photos WHERE id = :id;",
            named_params! { ":id": id },
        )
    }

    fn get_photos_by_post(&self, post_id: PostId) -> RepoResult<Vec<Photo>> {
        self.crud.query(
            "photo.get_by_post",
            "SELECT id, path, post_id FROM photos WHERE post_id = :post_id ORDER BY id ASC;",
            named_params! { ":post_id": post_id },
        )
    }

    fn update_photo(&self, photo: &Photo) -> RepoResult<()> {
        let id = require_id(photo.id, Photo::ENTITY)?;
        self.crud.execute_one(
            "photo.update",
            "UPDATE photos SET path = :path, post_id = :post_id WHERE id = :id;",
            named_params! { ":path": photo.path, ":post_id": photo.post_id, ":id": id },
            Photo::ENTITY,
            id,
        )
    }

    fn delete_photo_by_id(&self, id: PhotoId) -> RepoResult<()> {
        self.crud.execute_one(
            "photo.delete",
            "DELETE FROM photos WHERE id = :id;",
            named_params! { ":id": id },
            Photo::ENTITY,
            id,
        )
    }
}
