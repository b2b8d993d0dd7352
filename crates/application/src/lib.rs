//! Application layer - Use cases and orchestration
//!
//! Defines the ports storage adapters implement, the station use cases and
//! the ad-hoc query facade.

pub mod error;
pub mod ports;
pub mod services;

pub use error::{ApplicationError, ErrorKind, QueryError, SourceLocation};
pub use ports::*;
pub use services::*;
