//! Subscription (user ↔ post) repository.
//!
//! # Invariants
//! - A user subscribes to a given post at most once.
//! - Subscriptions disappear with either side.

use crate::model::post::{Participates, ParticipatesId, Post, PostId};
use crate::model::user::{User, UserId};
use crate::repo::crud::CrudRepository;
use crate::repo::{FromRow, RepoResult};
use rusqlite::{named_params, Row};

impl FromRow for Participates {
    const ENTITY: &'static str = "participates";

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: Some(row.get("id")?),
            user_id: row.get("auto_user_id")?,
            post_id: row.get("auto_post_id")?,
        })
    }
}

/// Repository interface for post subscriptions.
pub trait ParticipatesRepository {
    fn get_all_participates(&self) -> RepoResult<Vec<Participates>>;
    /// Fails with `ConstraintViolation` when the pair already exists.
    fn save_participates(&self, participates: &mut Participates) -> RepoResult<ParticipatesId>;
    fn get_participates_by_id(&self, id: ParticipatesId) -> RepoResult<Option<Participates>>;
    fn delete_participates_by_id(&self, id: ParticipatesId) -> RepoResult<()>;
    /// Users subscribed to `post_id`, in subscription order.
    fn get_subscribers_of_post(&self, post_id: PostId) -> RepoResult<Vec<User>>;
    /// Posts `user_id` is subscribed to, in subscription order.
    fn get_posts_subscribed_by_user(&self, user_id: UserId) -> RepoResult<Vec<Post>>;
}

#[derive(Clone)]
pub struct SqliteParticipatesRepository {
    crud: CrudRepository,
}

impl SqliteParticipatesRepository {
    pub fn new(crud: CrudRepository) -> Self {
        Self { crud }
    }
}

impl ParticipatesRepository for SqliteParticipatesRepository {
    fn get_all_participates(&self) -> RepoResult<Vec<Participates>> {
        self.crud.query(
            "participates.get_all",
            "SELECT id, auto_user_id, auto_post_id FROM participates ORDER BY id ASC;",
            named_params! {},
        )
    }

    fn save_participates(&self, participates: &mut Participates) -> RepoResult<ParticipatesId> {
        let id = self.crud.insert(
            "participates.save",
            "INSERT INTO participates (auto_user_id, auto_post_id) VALUES (:user_id, :post_id);",
            named_params! {
                ":user_id": participates.user_id,
                ":post_id": participates.post_id,
            },
        )?;
        participates.id = Some(id);
        Ok(id)
    }

    fn get_participates_by_id(&self, id: ParticipatesId) -> RepoResult<Option<Participates>> {
        self.crud.optional(
            "participates.get_by_id",
            "SELECT id, auto_user_id, auto_post_id FROM participates WHERE id = :id;",
            named_params! { ":id": id },
        )
    }

    fn delete_participates_by_id(&self, id: ParticipatesId) -> RepoResult<()> {
        self.crud.execute_one(
            "participates.delete",
            "DELETE FROM participates WHERE id = :id;",
            named_params! { ":id": id },
            Participates::ENTITY,
            id,
        )
    }

    fn get_subscribers_of_post(&self, post_id: PostId) -> RepoResult<Vec<User>> {
        self.crud.query(
            "participates.subscribers_of_post",
            "SELECT u.id AS id, u.login AS login, u.password AS password
             FROM participates s
             INNER JOIN auto_user u ON u.id = s.auto_user_id
             WHERE s.auto_post_id = :post_id
             ORDER BY s.id ASC;",
            named_params! { ":post_id": post_id },
        )
    }

    fn get_posts_subscribed_by_user(&self, user_id: UserId) -> RepoResult<Vec<Post>> {
        self.crud.query(
            "participates.posts_of_user",
            "SELECT
                p.id AS id,
                p.description AS description,
                p.created AS created,
                p.auto_user_id AS auto_user_id,
                p.car_id AS car_id
             FROM participates s
             INNER JOIN auto_post p ON p.id = s.auto_post_id
             WHERE s.auto_user_id = :user_id
             ORDER BY s.id ASC;",
            named_params! { ":user_id": user_id },
        )
    }
}
