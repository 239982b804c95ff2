//! Ownership records: who owned which car, and when.

use super::car::CarId;
use super::identity_eq;
use super::now_millis;
use super::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type OwnerId = i64;
pub type HistoryOwnerId = i64;

/// A car owner record, linked to the user account behind it.
///
/// Distinct from the user who authors a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    pub id: Option<OwnerId>,
    pub name: String,
    pub user_id: UserId,
}

impl Owner {
    pub fn new(name: impl Into<String>, user_id: UserId) -> Self {
        Self {
            id: None,
            name: name.into(),
            user_id,
        }
    }
}

/// Ownership interval of one owner over one car.
///
/// `end_at == None` marks the current owner. When set, `end_at` must not be
/// earlier than `start_at`; the store rejects such rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryOwner {
    pub id: Option<HistoryOwnerId>,
    pub car_id: CarId,
    pub owner_id: OwnerId,
    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,
}

impl HistoryOwner {
    /// Opens an ownership interval starting now.
    pub fn new(car_id: CarId, owner_id: OwnerId) -> Self {
        Self {
            id: None,
            car_id,
            owner_id,
            start_at: now_millis(),
            end_at: None,
        }
    }

    pub fn is_current(&self) -> bool {
        self.end_at.is_none()
    }
}

identity_eq!(Owner, HistoryOwner);
