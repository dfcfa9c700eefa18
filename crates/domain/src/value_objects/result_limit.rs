//! Result limit value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Maximum number of departures a single query may ask for (1 to 20)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct ResultLimit(u8);

impl ResultLimit {
    /// Smallest accepted limit
    pub const MIN: u8 = 1;
    /// Largest accepted limit
    pub const MAX: u8 = 20;
    /// Limit used when none is chosen
    pub const DEFAULT: Self = Self(10);

    /// Create a limit, rejecting values outside [1, 20]
    ///
    /// # Errors
    ///
    /// Returns `InvalidLimit` for out-of-range values.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(DomainError::InvalidLimit(value))
    }

    /// Get the raw value
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for ResultLimit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for ResultLimit {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ResultLimit> for u8 {
    fn from(limit: ResultLimit) -> Self {
        limit.0
    }
}

impl fmt::Display for ResultLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
