use crate::{BoundingBox, DomainError, LevelSet};

/// The supported kinds of domain, behind a single containment interface.
#[derive(Debug, Clone, PartialEq)]
pub enum Domain {
    /// An axis-aligned box in a space of known dimension.
    Interval {
        dimension: usize,
        bounds: BoundingBox,
    },

    /// A level set, see [`LevelSet`].
    LevelSet(LevelSet),
}

impl Domain {
    /// Creates an interval domain.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DimensionMismatch`] if a non-empty corner of
    /// `bounds` does not have length `dimension`.
    pub fn interval(dimension: usize, bounds: BoundingBox) -> Result<Self, DomainError> {
        bounds.check_dimension(dimension)?;
        Ok(Self::Interval { dimension, bounds })
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        match self {
            Self::Interval { dimension, .. } => *dimension,
            Self::LevelSet(level_set) => level_set.dimension(),
        }
    }

    /// Returns true if `point` belongs to the domain.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DimensionMismatch`] if `point` has the wrong
    /// length, or a function error for level sets.
    pub fn contains(&self, point: &[f64]) -> Result<bool, DomainError> {
        match self {
            Self::Interval { dimension, bounds } => {
                check_length(*dimension, point.len())?;
                Ok(bounds.contains(point))
            }
            Self::LevelSet(level_set) => level_set.contains(point),
        }
    }

    /// Returns the membership of every row, preserving order.
    ///
    /// # Errors
    ///
    /// Fails as a whole if any row has the wrong length, or on the first
    /// function error for level sets.
    pub fn contains_sample<R: AsRef<[f64]>>(&self, rows: &[R]) -> Result<Vec<bool>, DomainError> {
        match self {
            Self::Interval { dimension, bounds } => {
                for row in rows {
                    check_length(*dimension, row.as_ref().len())?;
                }
                Ok(rows.iter().map(|row| bounds.contains(row.as_ref())).collect())
            }
            Self::LevelSet(level_set) => level_set.contains_sample(rows),
        }
    }
}

impl From<LevelSet> for Domain {
    fn from(level_set: LevelSet) -> Self {
        Self::LevelSet(level_set)
    }
}

fn check_length(expected: usize, actual: usize) -> Result<(), DomainError> {
    if expected == actual {
        Ok(())
    } else {
        Err(DomainError::DimensionMismatch { expected, actual })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use strata_core::{ClosureFunction, Function};

    fn domains() -> [Domain; 2] {
        let square = Domain::interval(
            2,
            BoundingBox::new(vec![-1.0, -1.0], vec![1.0, 1.0]),
        )
        .unwrap();

        let f = Function::new(ClosureFunction::new("l1", 2, 1, |x| {
            vec![x[0].abs() + x[1].abs()]
        }));
        let diamond = LevelSet::new(f, 1.0).unwrap().into();

        [square, diamond]
    }

    #[test]
    fn shared_containment_interface() {
        let [square, diamond] = domains();
        let rows = [[0.0, 0.0], [0.9, 0.9], [1.5, 0.0]];

        assert_eq!(square.dimension(), 2);
        assert_eq!(diamond.dimension(), 2);
        assert_eq!(square.contains_sample(&rows).unwrap(), vec![true, true, false]);
        assert_eq!(diamond.contains_sample(&rows).unwrap(), vec![true, false, false]);
    }

    #[test]
    fn dimension_checks_apply_to_every_kind() {
        for domain in domains() {
            assert!(matches!(
                domain.contains(&[0.0]),
                Err(DomainError::DimensionMismatch { .. })
            ));
            assert!(matches!(
                domain.contains_sample(&[vec![0.0, 0.0], vec![0.0]]),
                Err(DomainError::DimensionMismatch { .. })
            ));
        }
    }

    #[test]
    fn interval_checks_corners() {
        assert!(matches!(
            Domain::interval(3, BoundingBox::new(vec![0.0], vec![])),
            Err(DomainError::DimensionMismatch { .. })
        ));
    }
}
