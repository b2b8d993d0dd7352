//! Offset/limit pagination policy
//!
//! Plain listings push the window down to storage; proximity listings apply
//! the same window to an in-memory ranking. Both go through [`Window`] so the
//! bounds are checked in one place.

use serde::Deserialize;

use crate::errors::DomainError;

/// Smallest accepted page size
pub const MIN_LIMIT: u32 = 1;

/// Largest accepted page size
pub const MAX_LIMIT: u32 = 20;

/// Raw listing parameters as received from a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ListParams {
    /// Number of records to skip
    #[serde(default)]
    pub offset: u64,
    /// Maximum number of records to return
    pub limit: u32,
}

impl ListParams {
    #[must_use]
    pub const fn new(offset: u64, limit: u32) -> Self {
        Self { offset, limit }
    }

    /// Validate into a [`Window`]
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPagination` if `limit` is outside
    /// [`MIN_LIMIT`, `MAX_LIMIT`]
    pub fn window(&self) -> Result<Window, DomainError> {
        Window::new(self.offset, self.limit)
    }
}

/// A validated offset/limit pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    offset: u64,
    limit: u32,
}

impl Window {
    /// Create a window, enforcing the limit bounds
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPagination` if `limit` is outside
    /// [`MIN_LIMIT`, `MAX_LIMIT`]
    pub fn new(offset: u64, limit: u32) -> Result<Self, DomainError> {
        if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
            return Err(DomainError::pagination(format!(
                "limit must be between {MIN_LIMIT} and {MAX_LIMIT}, got {limit}"
            )));
        }
        Ok(Self { offset, limit })
    }

    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Slice a sequence the way SQL `LIMIT/OFFSET` would
    ///
    /// An offset past the end yields an empty result.
    pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(usize::try_from(self.offset).unwrap_or(usize::MAX))
            .take(self.limit as usize)
            .collect()
    }
}
