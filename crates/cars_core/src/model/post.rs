//! Advertisement entities and the rows owned by a post.
//!
//! # Invariants
//! - `created` is fixed at construction and never rewritten by updates.
//! - Photos, price history and participations live and die with their post.

use super::car::CarId;
use super::identity_eq;
use super::now_millis;
use super::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type PostId = i64;
pub type PhotoId = i64;
pub type PriceHistoryId = i64;
pub type ParticipatesId = i64;

/// Sale advertisement for one car, authored by one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Option<PostId>,
    pub description: String,
    pub created: DateTime<Utc>,
    pub user_id: UserId,
    pub car_id: CarId,
}

impl Post {
    /// Creates an unsaved post stamped with the current time.
    pub fn new(description: impl Into<String>, user_id: UserId, car_id: CarId) -> Self {
        Self {
            id: None,
            description: description.into(),
            created: now_millis(),
            user_id,
            car_id,
        }
    }

    /// Overrides the creation time, e.g. for imported posts.
    pub fn created_at(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }
}

/// One price change of a post. Rows are append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceHistory {
    pub id: Option<PriceHistoryId>,
    pub before: i64,
    pub after: i64,
    pub created: DateTime<Utc>,
    pub post_id: PostId,
}

impl PriceHistory {
    pub fn new(post_id: PostId, before: i64, after: i64) -> Self {
        Self {
            id: None,
            before,
            after,
            created: now_millis(),
            post_id,
        }
    }

    /// Signed price change; negative means the price dropped.
    ///
    /// `None` when the difference does not fit in `i64`.
    pub fn delta(&self) -> Option<i64> {
        self.after.checked_sub(self.before)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub id: Option<PhotoId>,
    pub path: String,
    pub post_id: PostId,
}

impl Photo {
    pub fn new(path: impl Into<String>, post_id: PostId) -> Self {
        Self {
            id: None,
            path: path.into(),
            post_id,
        }
    }
}

/// Subscription of a user to a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participates {
    pub id: Option<ParticipatesId>,
    pub user_id: UserId,
    pub post_id: PostId,
}

impl Participates {
    pub fn new(user_id: UserId, post_id: PostId) -> Self {
        Self {
            id: None,
            user_id,
            post_id,
        }
    }
}

identity_eq!(Post, PriceHistory, Photo, Participates);
