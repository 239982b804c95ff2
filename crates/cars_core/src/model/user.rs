//! Marketplace account.

use super::identity_eq;
use serde::{Deserialize, Serialize};

pub type UserId = i64;

/// Account that authors and subscribes to posts.
///
/// `login` is unique. The password is stored as given; it is never written
/// out when the user is serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Option<UserId>,
    pub login: String,
    #[serde(skip_serializing, default)]
    pub password: String,
}

impl User {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: None,
            login: login.into(),
            password: password.into(),
        }
    }
}

identity_eq!(User);
