//! Post repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist advertisements and serve the marketplace list queries.
//!
//! # Invariants
//! - `created` is written once on save and never by `update_post`.
//! - Filtered lists (`last day`, `with photo`, `by brand`) are ordered by id
//!   descending so the newest post comes first.
//! - Deleting a post removes its photos, price history and participations.

use crate::model::post::{Post, PostId};
use crate::model::user::UserId;
use crate::repo::crud::CrudRepository;
use crate::repo::{parse_timestamp, require_id, timestamp_to_db, FromRow, RepoResult};
use chrono::{DateTime, Duration, Utc};
use rusqlite::{named_params, Row};

/// Window used by [`PostRepository::get_all_posts_for_last_day`].
pub const LAST_DAY_WINDOW_HOURS: i64 = 24;

const POST_SELECT_SQL: &str = "SELECT
    p.id AS id,
    p.description AS description,
    p.created AS created,
    p.auto_user_id AS auto_user_id,
    p.car_id AS car_id
FROM auto_post p";

impl FromRow for Post {
    const ENTITY: &'static str = "post";

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: Some(row.get("id")?),
            description: row.get("description")?,
            created: parse_timestamp(row.get("created")?, "auto_post.created")?,
            user_id: row.get("auto_user_id")?,
            car_id: row.get("car_id")?,
        })
    }
}

/// Repository interface for marketplace posts.
pub trait PostRepository {
    fn save_post(&self, post: &mut Post) -> RepoResult<PostId>;
    fn get_post_by_id(&self, id: PostId) -> RepoResult<Option<Post>>;
    /// All posts, oldest first.
    fn get_all_posts(&self) -> RepoResult<Vec<Post>>;
    /// Rewrites description and car; author and creation time stay fixed.
    fn update_post(&self, post: &Post) -> RepoResult<()>;
    fn delete_post_by_id(&self, id: PostId) -> RepoResult<()>;
    /// Posts created within the last 24 hours, newest first.
    fn get_all_posts_for_last_day(&self) -> RepoResult<Vec<Post>> {
        self.get_all_posts_since(Utc::now() - Duration::hours(LAST_DAY_WINDOW_HOURS))
    }
    /// Posts with `created >= since`, newest first.
    fn get_all_posts_since(&self, since: DateTime<Utc>) -> RepoResult<Vec<Post>>;
    /// Posts with at least one photo, newest first.
    fn get_all_posts_with_photo(&self) -> RepoResult<Vec<Post>>;
    /// Posts whose car brand name equals `brand_name` exactly, newest first.
    fn get_all_posts_with_specific_car_brand(&self, brand_name: &str) -> RepoResult<Vec<Post>>;
    /// Posts authored by one user, newest first.
    fn get_posts_by_user(&self, user_id: UserId) -> RepoResult<Vec<Post>>;
}

#[derive(Clone)]
pub struct SqlitePostRepository {
    crud: CrudRepository,
}

impl SqlitePostRepository {
    pub fn new(crud: CrudRepository) -> Self {
        Self { crud }
    }
}

impl PostRepository for SqlitePostRepository {
    fn save_post(&self, post: &mut Post) -> RepoResult<PostId> {
        let id = self.crud.insert(
            "post.save",
            "INSERT INTO auto_post (description, created, auto_user_id, car_id)
             VALUES (:description, :created, :user_id, :car_id);",
            named_params! {
                ":description": post.description,
                ":created": timestamp_to_db(post.created),
                ":user_id": post.user_id,
                ":car_id": post.car_id,
            },
        )?;
        post.id = Some(id);
        Ok(id)
    }

    fn get_post_by_id(&self, id: PostId) -> RepoResult<Option<Post>> {
        self.crud.optional(
            "post.get_by_id",
            &format!("{POST_SELECT_SQL} WHERE p.id = :id;"),
            named_params! { ":id": id },
        )
    }

    fn get_all_posts(&self) -> RepoResult<Vec<Post>> {
        self.crud.query(
            "post.get_all",
            &format!("{POST_SELECT_SQL} ORDER BY p.id ASC;"),
            named_params! {},
        )
    }

    fn update_post(&self, post: &Post) -> RepoResult<()> {
        let id = require_id(post.id, Post::ENTITY)?;
        self.crud.execute_one(
            "post.update",
            "UPDATE auto_post SET description = :description, car_id = :car_id WHERE id = :id;",
            named_params! {
                ":description": post.description,
                ":car_id": post.car_id,
                ":id": id,
            },
            Post::ENTITY,
            id,
        )
    }

    fn delete_post_by_id(&self, id: PostId) -> RepoResult<()> {
        self.crud.execute_one(
            "post.delete",
            "DELETE FROM auto_post WHERE id = :id;",
            named_params! { ":id": id },
            Post::ENTITY,
            id,
        )
    }

    fn get_all_posts_since(&self, since: DateTime<Utc>) -> RepoResult<Vec<Post>> {
        self.crud.query(
            "post.get_since",
            &format!("{POST_SELECT_SQL} WHERE p.created >= :since ORDER BY p.id DESC;"),
            named_params! { ":since": timestamp_to_db(since) },
        )
    }

    fn get_all_posts_with_photo(&self) -> RepoResult<Vec<Post>> {
        self.crud.query(
            "post.get_with_photo",
            &format!(
                "{POST_SELECT_SQL}
                 WHERE EXISTS (SELECT 1 FROM photos ph WHERE ph.post_id = p.id)
                 ORDER BY p.id DESC;"
            ),
            named_params! {},
        )
    }

    fn get_all_posts_with_specific_car_brand(&self, brand_name: &str) -> RepoResult<Vec<Post>> {
        self.crud.query(
            "post.get_by_brand",
            &format!(
                "{POST_SELECT_SQL}
                 INNER JOIN car c ON c.id = p.car_id
                 INNER JOIN brands b ON b.id = c.brand_id
                 WHERE b.name = :brand_name
                 ORDER BY p.id DESC;"
            ),
            named_params! { ":brand_name": brand_name },
        )
    }

    fn get_posts_by_user(&self, user_id: UserId) -> RepoResult<Vec<Post>> {
        self.crud.query(
            "post.get_by_user",
            &format!("{POST_SELECT_SQL} WHERE p.auto_user_id = :user_id ORDER BY p.id DESC;"),
            named_params! { ":user_id": user_id },
        )
    }
}
