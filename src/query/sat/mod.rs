//! Application of the Separating Axis Theorem (SAT) for collision detection.
//!
//! Two convex shapes do **not** intersect if and only if there exists an axis
//! onto which their projections do not overlap. For a ball against a convex
//! polyhedron whose center lies inside of the polyhedron, the candidate axes
//! reduce to the face normals of the polyhedron: the face with the largest
//! separation gives both the contact normal and the penetration depth.
//!
//! This is the fallback used when GJK reports a deep penetration, i.e., when the
//! core shapes themselves overlap and no distance-based contact exists.

pub use self::sat_convex_polyhedron_ball::*;

mod sat_convex_polyhedron_ball;
