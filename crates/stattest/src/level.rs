use crate::Error;

/// Confidence level used when callers have no preference.
pub const DEFAULT_LEVEL: f64 = 0.95;

/// A confidence level in the open interval `(0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Level(f64);

impl Level {
    /// Creates a validated confidence level.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLevel`] unless `0 < value < 1`.
    pub fn new(value: f64) -> Result<Self, Error> {
        if value > 0.0 && value < 1.0 {
            Ok(Self(value))
        } else {
            Err(Error::InvalidLevel { value })
        }
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Significance threshold a p-value is compared against, `1 - level`.
    #[must_use]
    pub fn threshold(self) -> f64 {
        1.0 - self.0
    }
}

impl Default for Level {
    fn default() -> Self {
        Self(DEFAULT_LEVEL)
    }
}

impl TryFrom<f64> for Level {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
