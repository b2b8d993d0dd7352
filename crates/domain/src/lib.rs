//! Domain layer for the station catalog
//!
//! Contains the station entity, its value objects, the pagination policy and
//! proximity ranking. Nothing here performs I/O.

pub mod entities;
pub mod errors;
pub mod pagination;
pub mod proximity;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use pagination::{ListParams, MAX_LIMIT, MIN_LIMIT, Window};
pub use proximity::{OriginPoint, RankedStation, nearest, rank_by_distance};
pub use value_objects::*;
