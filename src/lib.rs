/*!
graze3d
========

**graze3d** is a narrow phase for ball vs. convex polyhedron pairs.

Candidate pairs coming from a broad phase are gathered into a
[`narrow_phase::NarrowPhaseBatch`]. A single GJK pass classifies all of them;
balls touching their polyhedron are marked as colliding right away, while
balls whose center went inside of the polyhedron are resolved one by one with
a separating-axis search able to measure their penetration depth.

The `f64` flavor of this crate is published as **graze3d-f64**.
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
#[cfg(test)]
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod narrow_phase;
pub mod query;
pub mod shape;
pub mod utils;

mod real {
    /// The scalar type used throughout this crate.
    #[cfg(feature = "f64")]
    pub use f64 as Real;

    /// The scalar type used throughout this crate.
    #[cfg(feature = "f32")]
    pub use f32 as Real;
}

/// Aliases of the nalgebra types used throughout this crate, with `Real` scalars.
pub mod math {
    pub use super::real::*;

    /// The tolerance used by geometric predicates.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// A point.
    pub type Point<N> = na::Point3<N>;

    /// A vector.
    pub type Vector<N> = na::Vector3<N>;

    /// A vector with a unit length.
    pub type UnitVector<N> = na::UnitVector3<N>;

    /// A rigid-body pose: a rotation followed by a translation.
    pub type Isometry<N> = na::Isometry3<N>;
}
