//! Support mappings, the only description of a convex shape GJK relies on.

use crate::math::{Isometry, Point, Real, Vector};
use na::Unit;

/// A convex shape described by its support function.
///
/// The support point in the direction `dir` is a point of the shape maximizing
/// its dot product with `dir`. Only `local_support_point` must be provided: the
/// other methods derive from it.
pub trait SupportMap {
    /// The support point in the direction `dir`, both expressed in the local-space of the shape.
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real>;

    /// The support point in the unit direction `dir`, in the local-space of the shape.
    fn local_support_point_toward(&self, dir: &Unit<Vector<Real>>) -> Point<Real> {
        self.local_support_point(dir)
    }

    /// The support point of this shape moved by `pos`, with `dir` expressed in the same
    /// frame as `pos`.
    fn support_point_toward(&self, pos: &Isometry<Real>, dir: &Unit<Vector<Real>>) -> Point<Real> {
        let local_dir = pos.inverse_transform_unit_vector(dir);
        pos * self.local_support_point_toward(&local_dir)
    }
}
