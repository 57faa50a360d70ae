use crate::math::{Point, Real, Vector};
use crate::shape::SupportMap;

/// A shape reduced to a single point.
///
/// GJK runs between a polyhedron and the center of a ball, the radius being
/// accounted for afterwards as a margin.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ConstantPoint(pub Point<Real>);

impl SupportMap for ConstantPoint {
    #[inline]
    fn local_support_point(&self, _: &Vector<Real>) -> Point<Real> {
        self.0
    }
}
