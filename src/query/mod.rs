//! Non-persistent geometric queries used by the narrow phase.
//!
//! # General cases
//! The [`gjk`] module computes the distance between two support-mapped shapes, or
//! detects that they intersect. The [`sat`] module searches the face normals of a
//! convex polyhedron for the axis of minimum penetration of a ball.
//!
//! Both are exposed so they can be reused outside of the batched narrow phase.

pub use self::contact::Contact;

mod contact;
pub mod gjk;
pub mod sat;
