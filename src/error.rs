//! The two ways a request to the registry can be turned down.

use std::fmt;

/// A car could not be parked because every space is taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Full {
    car_number: String,
}

impl Full {
    pub(crate) fn new(car_number: impl Into<String>) -> Self {
        Self {
            car_number: car_number.into(),
        }
    }

    /// The car that was turned away.
    pub fn car_number(&self) -> &str {
        &self.car_number
    }
}

impl fmt::Display for Full {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parking lot is full, cannot park {}", self.car_number)
    }
}

impl std::error::Error for Full {}

/// No parked car has the requested number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFound {
    car_number: String,
}

impl NotFound {
    pub(crate) fn new(car_number: impl Into<String>) -> Self {
        Self {
            car_number: car_number.into(),
        }
    }

    /// The number that was searched for.
    pub fn car_number(&self) -> &str {
        &self.car_number
    }
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "car {} not found", self.car_number)
    }
}

impl std::error::Error for NotFound {}
