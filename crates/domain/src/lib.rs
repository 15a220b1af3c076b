//! Geometric domains for Strata.
//!
//! The central type is [`LevelSet`], the set `{x : f(x) <= level}` of a
//! scalar [`Function`](strata_core::Function), optionally restricted to a
//! [`BoundingBox`]. Level sets answer containment queries for single points
//! and whole samples, and combine with each other through
//! [`LevelSet::intersect`] and [`LevelSet::join`].
//!
//! [`Domain`] gathers the supported domain kinds behind one containment
//! interface, and [`LevelSetRecord`] / [`FunctionRegistry`] provide a
//! versioned persistence format.

mod bounding_box;
mod domain;
mod error;
mod level_set;

pub use bounding_box::BoundingBox;
pub use domain::Domain;
pub use error::DomainError;
pub use level_set::{FunctionRegistry, LevelSet, LevelSetRecord, RECORD_VERSION};
