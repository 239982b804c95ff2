//! Ownership history use-case service.
//!
//! # Responsibility
//! - Expose ownership history reads to callers outside the core.
//! - Delegate persistence to a `HistoryOwnerRepository` implementation.

use crate::model::car::CarId;
use crate::model::owner::HistoryOwner;
use crate::repo::history_owner_repo::HistoryOwnerRepository;
use crate::repo::RepoResult;

/// Service wrapper for ownership history queries.
pub struct HistoryOwnerService<R: HistoryOwnerRepository> {
    repo: R,
}

impl<R: HistoryOwnerRepository> HistoryOwnerService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn get_all_history_owner(&self) -> RepoResult<Vec<HistoryOwner>> {
        self.repo.get_all_history_owner()
    }

    /// Ownership intervals of one car, oldest first.
    pub fn get_history_for_car(&self, car_id: CarId) -> RepoResult<Vec<HistoryOwner>> {
        self.repo.get_history_by_car(car_id)
    }

    /// The open interval of `car_id`, if the car currently has an owner.
    ///
    /// When several intervals are open the most recently started wins.
    pub fn current_owner(&self, car_id: CarId) -> RepoResult<Option<HistoryOwner>> {
        let history = self.repo.get_history_by_car(car_id)?;
        Ok(history.into_iter().rev().find(HistoryOwner::is_current))
    }
}
