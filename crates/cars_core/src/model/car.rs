//! Vehicle catalogue entities: brands, engines and cars.

use super::identity_eq;
use serde::{Deserialize, Serialize};

pub type BrandId = i64;
pub type EngineId = i64;
pub type CarId = i64;

/// Manufacturer lookup row. `name` is unique across all brands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
    /// `None` until the brand is saved.
    pub id: Option<BrandId>,
    pub name: String,
}

impl Brand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Engine {
    pub id: Option<EngineId>,
    pub name: String,
}

impl Engine {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

/// A concrete vehicle offered in posts.
///
/// A car always belongs to one brand and owns at most one engine; the engine
/// row is removed together with the car.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    pub id: Option<CarId>,
    pub name: String,
    pub brand_id: BrandId,
    pub engine_id: Option<EngineId>,
}

impl Car {
    pub fn new(name: impl Into<String>, brand_id: BrandId) -> Self {
        Self {
            id: None,
            name: name.into(),
            brand_id,
            engine_id: None,
        }
    }

    /// Attaches an already saved engine.
    pub fn with_engine(mut self, engine_id: EngineId) -> Self {
        self.engine_id = Some(engine_id);
        self
    }
}

identity_eq!(Brand, Engine, Car);
