use crate::math::{Point, Real, Vector};
use na::Unit;

/// A ball, described by its radius.
///
/// The narrow phase never samples the surface of a ball during proximity tests:
/// they run against its center and the radius acts as a margin. The surface is
/// only needed to place contact points.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
#[repr(C)]
pub struct Ball {
    /// The radius of the ball.
    pub radius: Real,
}

impl Ball {
    /// Creates a new ball from its radius.
    #[inline]
    pub fn new(radius: Real) -> Ball {
        Ball { radius }
    }

    /// The point of the surface of this ball in the unit direction `dir`, in its local-space.
    #[inline]
    pub fn local_surface_point(&self, dir: &Unit<Vector<Real>>) -> Point<Real> {
        Point::from(**dir * self.radius)
    }
}
