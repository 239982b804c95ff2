//! Marketplace domain model.
//!
//! # Responsibility
//! - Define the entities persisted by the repository layer.
//! - Keep relationships as foreign-key ids; object graphs are composed by callers.
//!
//! # Invariants
//! - Every entity is identified by a surrogate integer key assigned on save.
//! - Entity equality and hashing consider the key only, never attribute values.
//! - Timestamps carry millisecond precision, matching their stored form.

use chrono::{DateTime, SubsecRound, Utc};

/// Implements identity-only `PartialEq`, `Eq` and `Hash` over the `id` field.
macro_rules! identity_eq {
    ($($entity:ty),+ $(,)?) => {
        $(
            impl PartialEq for $entity {
                fn eq(&self, other: &Self) -> bool {
                    self.id == other.id
                }
            }

            impl Eq for $entity {}

            impl std::hash::Hash for $entity {
                fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                    std::hash::Hash::hash(&self.id, state);
                }
            }
        )+
    };
}

pub(crate) use identity_eq;

pub mod car;
pub mod owner;
pub mod post;
pub mod user;

/// Current UTC time truncated to the precision the store keeps.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

#[cfg(test)]
mod tests {
    use super::now_millis;

    #[test]
    fn now_millis_has_no_sub_millisecond_part() {
        let now = now_millis();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
