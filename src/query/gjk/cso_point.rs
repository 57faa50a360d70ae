use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::SupportMap;
use na::Unit;

/// A vertex of the Minkowski difference of two shapes, i.e., of their
/// Configuration-Space Obstacle (CSO).
///
/// The supporting points of both shapes are kept next to their difference:
/// once GJK converges they give the closest points through the barycentric
/// coordinates of the final simplex.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CSOPoint {
    /// `orig1 - orig2`, expressed in the local-space of the first shape.
    pub point: Point<Real>,
    /// The supporting point of the first shape.
    pub orig1: Point<Real>,
    /// The supporting point of the second shape, in the local-space of the first shape.
    pub orig2: Point<Real>,
}

impl CSOPoint {
    /// The CSO point made of `orig1` and `orig2`.
    #[inline]
    pub fn new(orig1: Point<Real>, orig2: Point<Real>) -> Self {
        CSOPoint {
            point: orig1 - orig2.coords,
            orig1,
            orig2,
        }
    }

    /// The CSO point made of two points at the origin.
    #[inline]
    pub fn origin() -> Self {
        Self::new(Point::origin(), Point::origin())
    }

    /// The support point of the CSO of `g1` and `g2` in the direction `dir`.
    ///
    /// `dir` is expressed in the local-space of `g1` and `pos12` is the pose of `g2`
    /// relative to `g1`.
    pub fn support_toward<G1, G2>(
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
        dir: &Unit<Vector<Real>>,
    ) -> Self
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        Self::new(
            g1.local_support_point_toward(dir),
            g2.support_point_toward(pos12, &-*dir),
        )
    }
}
