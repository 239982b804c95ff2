//! Persistence core for the cars marketplace.
//! Entities, per-entity repositories and the transaction gateway they share.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{CarsConfig, ConfigError, DatabaseConfig, LoggingConfig};
pub use db::{Database, DbError, DbResult};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status, LogTarget};
pub use model::car::{Brand, BrandId, Car, CarId, Engine, EngineId};
pub use model::owner::{HistoryOwner, HistoryOwnerId, Owner, OwnerId};
pub use model::post::{
    Participates, ParticipatesId, Photo, PhotoId, Post, PostId, PriceHistory, PriceHistoryId,
};
pub use model::user::{User, UserId};
pub use repo::brand_repo::{BrandRepository, SqliteBrandRepository};
pub use repo::car_repo::{CarRepository, SqliteCarRepository};
pub use repo::crud::CrudRepository;
pub use repo::engine_repo::{EngineRepository, SqliteEngineRepository};
pub use repo::history_owner_repo::{HistoryOwnerRepository, SqliteHistoryOwnerRepository};
pub use repo::owner_repo::{OwnerRepository, SqliteOwnerRepository};
pub use repo::participates_repo::{ParticipatesRepository, SqliteParticipatesRepository};
pub use repo::photo_repo::{PhotoRepository, SqlitePhotoRepository};
pub use repo::post_repo::{PostRepository, SqlitePostRepository};
pub use repo::price_history_repo::{PriceHistoryRepository, SqlitePriceHistoryRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{FromRow, RepoError, RepoResult, Repositories};
pub use service::history_owner_service::HistoryOwnerService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
