use strata_core::{Function, FunctionError, NumericFunction};
use tracing::debug;

use super::{LevelSet, check_dimension};
use crate::DomainError;

impl LevelSet {
    /// Returns the level set of points that belong to both `self` and `other`.
    ///
    /// When both share the same function handle the result keeps that
    /// function with the smaller level. Otherwise the result is the zero
    /// level set of `max(margin_self, margin_other)`, where each margin is
    /// `f(x) - level` inside the operand's bounding box and `+inf` outside.
    /// Either way the result carries the tightest common bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DimensionMismatch`] if the dimensions differ.
    pub fn intersect(&self, other: &LevelSet) -> Result<LevelSet, DomainError> {
        check_dimension(self.dimension(), other.dimension())?;
        let bounds = self.bounds.intersect(&other.bounds);

        if self.function.same_as(&other.function) {
            return Ok(LevelSet {
                function: self.function.clone(),
                level: self.level.min(other.level),
                bounds,
            });
        }

        debug!(
            left = self.function.name(),
            right = other.function.name(),
            "intersecting level sets of distinct functions through a max combination"
        );
        Ok(LevelSet {
            function: Function::new(Combination::new(Operator::Max, self, other)),
            level: 0.0,
            bounds,
        })
    }

    /// Returns the level set of points that belong to `self` or `other`.
    ///
    /// When both share the same function handle and bounding box the result
    /// keeps that function with the larger level. Otherwise the result is the
    /// zero level set of `min(margin_self, margin_other)`, which stays exact
    /// even when the operands have different boxes. The result carries the
    /// loosest common bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DimensionMismatch`] if the dimensions differ.
    pub fn join(&self, other: &LevelSet) -> Result<LevelSet, DomainError> {
        check_dimension(self.dimension(), other.dimension())?;
        let bounds = self.bounds.join(&other.bounds);

        if self.function.same_as(&other.function) && self.bounds == other.bounds {
            return Ok(LevelSet {
                function: self.function.clone(),
                level: self.level.max(other.level),
                bounds,
            });
        }

        debug!(
            left = self.function.name(),
            right = other.function.name(),
            "joining level sets through a min combination"
        );
        Ok(LevelSet {
            function: Function::new(Combination::new(Operator::Min, self, other)),
            level: 0.0,
            bounds,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Max,
    Min,
}

/// Scalar function combining the margins of two level sets.
///
/// Its zero level set is the intersection (`Max`) or union (`Min`) of the
/// operands. It has no gradient: the margins jump to `+inf` at box faces.
struct Combination {
    name: String,
    operator: Operator,
    left: LevelSet,
    right: LevelSet,
}

impl Combination {
    fn new(operator: Operator, left: &LevelSet, right: &LevelSet) -> Self {
        let op = match operator {
            Operator::Max => "max",
            Operator::Min => "min",
        };
        let name = format!(
            "{op}({} - {}, {} - {})",
            left.function.name(),
            left.level,
            right.function.name(),
            right.level
        );

        Self {
            name,
            operator,
            left: left.clone(),
            right: right.clone(),
        }
    }
}

impl NumericFunction for Combination {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_dimension(&self) -> usize {
        self.left.dimension()
    }

    fn output_dimension(&self) -> usize {
        1
    }

    fn evaluate(&self, x: &[f64]) -> Result<Vec<f64>, FunctionError> {
        let left = self.left.margin(x)?;
        let right = self.right.margin(x)?;
        let value = match self.operator {
            Operator::Max => left.max(right),
            Operator::Min => left.min(right),
        };
        Ok(vec![value])
    }

    fn output_description(&self) -> Vec<String> {
        vec!["margin".to_owned()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use strata_core::ClosureFunction;

    fn disk(cx: f64, cy: f64, radius: f64) -> LevelSet {
        let f = Function::new(ClosureFunction::new(
            format!("disk({cx}, {cy})"),
            2,
            1,
            move |x| vec![(x[0] - cx).powi(2) + (x[1] - cy).powi(2)],
        ));
        LevelSet::new(f, radius * radius).expect("scalar function")
    }

    fn grid() -> Vec<[f64; 2]> {
        let mut points = Vec::new();
        for i in -12..=12 {
            for j in -12..=12 {
                points.push([f64::from(i) * 0.25, f64::from(j) * 0.25]);
            }
        }
        points
    }

    #[test]
    fn intersection_is_conjunction() {
        let a = disk(0.0, 0.0, 1.0);
        let b = disk(1.0, 0.0, 1.0);
        let both = a.intersect(&b).unwrap();

        for p in grid() {
            let expected = a.contains(&p).unwrap() && b.contains(&p).unwrap();
            assert_eq!(both.contains(&p).unwrap(), expected, "at {p:?}");
        }
    }

    #[test]
    fn union_is_disjunction() {
        let a = disk(0.0, 0.0, 1.0);
        let b = disk(1.0, 0.0, 1.0);
        let either = a.join(&b).unwrap();

        for p in grid() {
            let expected = a.contains(&p).unwrap() || b.contains(&p).unwrap();
            assert_eq!(either.contains(&p).unwrap(), expected, "at {p:?}");
        }
    }

    #[test]
    fn intersect_and_join_commute() {
        let mut a = disk(0.0, 0.0, 1.5);
        a.set_lower_bound(vec![-1.0, -2.0]).unwrap();
        let mut b = disk(0.5, 0.5, 1.0);
        b.set_upper_bound(vec![1.0, 1.0]).unwrap();

        let ab = a.intersect(&b).unwrap();
        let ba = b.intersect(&a).unwrap();
        let a_or_b = a.join(&b).unwrap();
        let b_or_a = b.join(&a).unwrap();

        for p in grid() {
            assert_eq!(ab.contains(&p).unwrap(), ba.contains(&p).unwrap());
            assert_eq!(a_or_b.contains(&p).unwrap(), b_or_a.contains(&p).unwrap());
        }
    }

    #[test]
    fn union_respects_each_operand_box() {
        // Same function, disjoint boxes: the gap between boxes stays outside.
        let mut left = disk(0.0, 0.0, 2.0);
        left.set_upper_bound(vec![-1.0, 2.0]).unwrap();
        let mut right = left.clone();
        right.set_upper_bound(Vec::new()).unwrap();
        right.set_lower_bound(vec![1.0, -2.0]).unwrap();

        let either = left.join(&right).unwrap();

        assert!(either.contains(&[-1.5, 0.0]).unwrap());
        assert!(either.contains(&[1.5, 0.0]).unwrap());
        assert!(!either.contains(&[0.0, 0.0]).unwrap());
        assert!(either.lower_bound().is_empty());
        assert!(either.upper_bound().is_empty());
    }

    #[test]
    fn same_function_intersection_tightens() {
        let mut a = disk(0.0, 0.0, 2.0);
        a.set_lower_bound(vec![-1.0, -1.0]).unwrap();
        let mut b = a.clone();
        b.set_level(1.0);
        b.set_lower_bound(vec![0.0, -3.0]).unwrap();
        b.set_upper_bound(vec![3.0, 3.0]).unwrap();

        let both = a.intersect(&b).unwrap();

        assert!(both.function().same_as(a.function()));
        assert_eq!(both.level(), 1.0);
        assert_eq!(both.lower_bound(), &[0.0, -1.0]);
        assert_eq!(both.upper_bound(), &[3.0, 3.0]);
    }

    #[test]
    fn join_is_idempotent() {
        let mut a = disk(0.0, 0.0, 1.0);
        a.set_lower_bound(vec![-0.5, -0.5]).unwrap();
        a.set_upper_bound(vec![0.5, 0.5]).unwrap();

        assert_eq!(a.join(&a).unwrap(), a);
        assert_eq!(a.intersect(&a).unwrap(), a);
    }

    #[test]
    fn combined_box_uses_tightest_and_loosest_corners() {
        let mut a = disk(0.0, 0.0, 1.0);
        a.set_lower_bound(vec![-1.0, -2.0]).unwrap();
        a.set_upper_bound(vec![1.0, 0.5]).unwrap();
        let mut b = disk(1.0, 1.0, 1.0);
        b.set_lower_bound(vec![-3.0, 0.0]).unwrap();

        let both = a.intersect(&b).unwrap();
        assert_eq!(both.lower_bound(), &[-1.0, 0.0]);
        assert_eq!(both.upper_bound(), &[1.0, 0.5]);
        assert_eq!(both.level(), 0.0);

        let either = a.join(&b).unwrap();
        assert_eq!(either.lower_bound(), &[-3.0, -2.0]);
        assert!(either.upper_bound().is_empty());
    }

    #[test]
    fn combination_is_named_after_operands() {
        let a = disk(0.0, 0.0, 1.0);
        let b = disk(1.0, 0.0, 2.0);

        let both = a.intersect(&b).unwrap();

        assert_eq!(both.function().name(), "max(disk(0, 0) - 1, disk(1, 0) - 4)");
        assert!(matches!(
            both.function().gradient(&[0.0, 0.0]),
            Err(FunctionError::GradientUnavailable { .. })
        ));
    }

    #[test]
    fn rejects_mismatched_dimensions() {
        let a = disk(0.0, 0.0, 1.0);
        let b = LevelSet::with_dimension(3);

        assert!(matches!(
            a.intersect(&b),
            Err(DomainError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
        assert!(matches!(
            a.join(&b),
            Err(DomainError::DimensionMismatch { .. })
        ));
    }
}
