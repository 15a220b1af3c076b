use crate::DomainError;

/// An axis-aligned box given by optional lower and upper corners.
///
/// An empty corner means the box is unbounded on that side. A box whose lower
/// corner exceeds its upper corner in some coordinate is accepted as is and
/// contains no point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundingBox {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl BoundingBox {
    /// Creates a box from its corners. Either corner may be empty.
    #[must_use]
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Self {
        Self { lower, upper }
    }

    /// Creates a box with no bound on either side.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    #[must_use]
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Returns true if neither side is bounded.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.lower.is_empty() && self.upper.is_empty()
    }

    pub(crate) fn set_lower(&mut self, lower: Vec<f64>) {
        self.lower = lower;
    }

    pub(crate) fn set_upper(&mut self, upper: Vec<f64>) {
        self.upper = upper;
    }

    /// Returns true if `point` lies inside the closed box.
    ///
    /// The caller is responsible for `point` having the box dimension.
    #[must_use]
    pub fn contains(&self, point: &[f64]) -> bool {
        let above_lower = self.lower.iter().zip(point).all(|(lo, x)| x >= lo);
        let below_upper = self.upper.iter().zip(point).all(|(hi, x)| x <= hi);
        above_lower && below_upper
    }

    /// Returns the tightest box contained in both boxes.
    ///
    /// A missing corner acts as an infinite one, so the other box's corner wins.
    #[must_use]
    pub fn intersect(&self, other: &BoundingBox) -> BoundingBox {
        Self {
            lower: tightest(&self.lower, &other.lower, f64::max),
            upper: tightest(&self.upper, &other.upper, f64::min),
        }
    }

    /// Returns the smallest box containing both boxes.
    ///
    /// A missing corner on either side leaves that side unbounded.
    #[must_use]
    pub fn join(&self, other: &BoundingBox) -> BoundingBox {
        Self {
            lower: loosest(&self.lower, &other.lower, f64::min),
            upper: loosest(&self.upper, &other.upper, f64::max),
        }
    }

    /// Checks that every non-empty corner has length `dimension`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DimensionMismatch`] for the first offending corner.
    pub fn check_dimension(&self, dimension: usize) -> Result<(), DomainError> {
        for corner in [&self.lower, &self.upper] {
            if !corner.is_empty() && corner.len() != dimension {
                return Err(DomainError::DimensionMismatch {
                    expected: dimension,
                    actual: corner.len(),
                });
            }
        }
        Ok(())
    }
}

fn tightest(a: &[f64], b: &[f64], pick: fn(f64, f64) -> f64) -> Vec<f64> {
    match (a.is_empty(), b.is_empty()) {
        (true, _) => b.to_vec(),
        (_, true) => a.to_vec(),
        _ => a.iter().zip(b).map(|(&x, &y)| pick(x, y)).collect(),
    }
}

fn loosest(a: &[f64], b: &[f64], pick: fn(f64, f64) -> f64) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        Vec::new()
    } else {
        a.iter().zip(b).map(|(&x, &y)| pick(x, y)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_contains_everything() {
        let bounds = BoundingBox::unbounded();
        assert!(bounds.contains(&[1e300, -1e300]));
    }

    #[test]
    fn closed_on_both_sides() {
        let bounds = BoundingBox::new(vec![0.0, 0.0], vec![1.0, 2.0]);

        assert!(bounds.contains(&[0.0, 0.0]));
        assert!(bounds.contains(&[1.0, 2.0]));
        assert!(bounds.contains(&[0.5, 1.5]));
        assert!(!bounds.contains(&[1.1, 1.0]));
        assert!(!bounds.contains(&[0.5, -0.1]));
    }

    #[test]
    fn one_sided_bounds() {
        let lower_only = BoundingBox::new(vec![0.0], vec![]);
        assert!(lower_only.contains(&[1e9]));
        assert!(!lower_only.contains(&[-1.0]));

        let upper_only = BoundingBox::new(vec![], vec![0.0]);
        assert!(upper_only.contains(&[-1e9]));
        assert!(!upper_only.contains(&[1.0]));
    }

    #[test]
    fn inverted_box_is_empty() {
        let bounds = BoundingBox::new(vec![1.0], vec![0.0]);
        assert!(!bounds.contains(&[0.0]));
        assert!(!bounds.contains(&[0.5]));
        assert!(!bounds.contains(&[1.0]));
    }

    #[test]
    fn intersect_takes_tightest_corners() {
        let a = BoundingBox::new(vec![0.0, -1.0], vec![2.0, 5.0]);
        let b = BoundingBox::new(vec![1.0, -3.0], vec![]);

        let both = a.intersect(&b);

        assert_eq!(both.lower(), &[1.0, -1.0]);
        assert_eq!(both.upper(), &[2.0, 5.0]);
        assert_eq!(both, b.intersect(&a));
    }

    #[test]
    fn join_takes_loosest_corners() {
        let a = BoundingBox::new(vec![0.0, -1.0], vec![2.0, 5.0]);
        let b = BoundingBox::new(vec![1.0, -3.0], vec![]);

        let either = a.join(&b);

        assert_eq!(either.lower(), &[0.0, -3.0]);
        assert!(either.upper().is_empty());
        assert_eq!(either, b.join(&a));
    }

    #[test]
    fn checks_corner_dimensions() {
        let bounds = BoundingBox::new(vec![0.0, 0.0], vec![]);
        assert!(bounds.check_dimension(2).is_ok());
        assert!(matches!(
            bounds.check_dimension(3),
            Err(DomainError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }
}
