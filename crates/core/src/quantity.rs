//! Non-negative material quantity.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A non-negative, finite amount of material.
///
/// Fractional values are allowed. Every constructor either rejects or clamps
/// input so a `Quantity` below zero cannot exist; deserialization clamps, which
/// keeps hand-edited or legacy storage from breaking the invariant.
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Quantity(f64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0.0);

    /// Strict constructor for user-entered values.
    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::validation(format!(
                "quantity must be a finite number (got {value})"
            )));
        }
        if value < 0.0 {
            return Err(DomainError::validation(format!(
                "quantity cannot be negative (got {value})"
            )));
        }
        // Normalize -0.0 so equality and display stay predictable.
        Ok(Self(value + 0.0))
    }

    /// Lenient constructor: negatives and non-finite values become zero.
    pub fn clamped(value: f64) -> Self {
        if value.is_finite() && value > 0.0 {
            Self(value)
        } else {
            Self::ZERO
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    /// `self - other`, floored at zero.
    pub fn saturating_sub(self, other: Quantity) -> Quantity {
        Self::clamped(self.0 - other.0)
    }

    pub fn min(self, other: Quantity) -> Quantity {
        if other.0 < self.0 { other } else { self }
    }
}

impl core::ops::Add for Quantity {
    type Output = Quantity;

    /// Saturates at `f64::MAX`; a sum of two quantities never shrinks.
    fn add(self, rhs: Quantity) -> Quantity {
        Self((self.0 + rhs.0).min(f64::MAX))
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Self::clamped(value)
    }
}

impl From<Quantity> for f64 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self(f64::from(value))
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
