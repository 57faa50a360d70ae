//! The Gilbert-Johnson-Keerthi distance algorithm.
//!
//! GJK operates on the Minkowski difference (the Configuration-Space Obstacle,
//! CSO) of two convex shapes. It iteratively builds a simplex inside of the CSO
//! that gets closer and closer to the origin:
//!
//! - if the origin ends up inside of the CSO, the shapes intersect;
//! - otherwise the closest point of the CSO to the origin gives the distance
//!   between the shapes and, through the simplex barycentric coordinates, the
//!   closest points on each shape.
//!
//! GJK converges quickly when the shapes are disjoint but cannot compute a
//! penetration depth once they overlap. Callers needing contact data for deep
//! penetrations must fall back to another algorithm (see [`crate::query::sat`]).

use na::{ComplexField, Unit};

use crate::math::{Isometry, Point, Real, Vector, DIM};
use crate::query::gjk::{CSOPoint, VoronoiSimplex};
use crate::shape::SupportMap;

use num::Bounded;

/// Default maximum number of iterations of [`closest_points`].
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Results of the GJK algorithm.
#[derive(Clone, Debug, PartialEq)]
pub enum GJKResult {
    /// Result of the GJK algorithm when the origin is inside of the polytope.
    Intersection,
    /// Result of the GJK algorithm when a projection of the origin on the polytope is found.
    ///
    /// Both points and vector are expressed in the local-space of the first geometry involved
    /// in the GJK execution.
    ClosestPoints(Point<Real>, Point<Real>, Unit<Vector<Real>>),
    /// Result of the GJK algorithm when the origin is too close to the polytope but not inside of it.
    ///
    /// The returned vector is expressed in the local-space of the first geometry involved in the
    /// GJK execution.
    Proximity(Unit<Vector<Real>>),
    /// Result of the GJK algorithm when the origin is too far away from the polytope.
    ///
    /// The returned vector is expressed in the local-space of the first geometry involved in the
    /// GJK execution.
    NoIntersection(Unit<Vector<Real>>),
}

/// The absolute tolerance used by the GJK algorithm.
pub fn eps_tol() -> Real {
    let _eps = crate::math::DEFAULT_EPSILON;
    _eps * 10.0
}

/// Projects the origin on a shape using the Separating Axis GJK algorithm.
///
/// The return value is the closest points of the CSO of `g1` and `g2` to the origin, or
/// `GJKResult::Intersection` if the origin is inside of the CSO. The simplex must already
/// contain at least one CSO point.
///
/// # Parameters
/// - `pos12`: the pose of `g2` relative to `g1`.
/// - `max_dist`: the distance beyond which the shapes are considered disjoint.
/// - `exact_dist`: if `false`, the algorithm stops as soon as the shapes are known to be
///   closer than `max_dist`, returning `GJKResult::Proximity`.
/// - `max_iterations`: the iteration budget. Once it is exhausted, the shapes are reported
///   as not intersecting.
pub fn closest_points<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    max_dist: Real,
    exact_dist: bool,
    max_iterations: usize,
    simplex: &mut VoronoiSimplex,
) -> GJKResult
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let _eps_tol: Real = eps_tol();
    let _eps_rel: Real = ComplexField::sqrt(_eps_tol);

    let mut proj = simplex.project_origin_and_reduce();

    let mut old_dir;

    if let Some(proj_dir) = Unit::try_new(proj.coords, 0.0) {
        old_dir = -proj_dir;
    } else {
        return GJKResult::Intersection;
    }

    let mut max_bound = Real::max_value();
    let mut dir;
    let mut niter = 0;

    loop {
        if niter >= max_iterations {
            log::debug!(
                "GJK did not converge after {} iterations: reporting no intersection.",
                max_iterations
            );
            return GJKResult::NoIntersection(Vector::x_axis());
        }

        let old_max_bound = max_bound;

        if let Some((new_dir, dist)) = Unit::try_new_and_get(-proj.coords, _eps_tol) {
            dir = new_dir;
            max_bound = dist;
        } else {
            // The origin is on the simplex.
            return GJKResult::Intersection;
        }

        if max_bound >= old_max_bound {
            // Upper bound inconsistencies: keep the previous simplex.
            return if exact_dist {
                let (p1, p2) = result(simplex, true);
                GJKResult::ClosestPoints(p1, p2, old_dir)
            } else {
                GJKResult::Proximity(old_dir)
            };
        }

        let cso_point = CSOPoint::support_toward(pos12, g1, g2, &dir);
        let min_bound = -dir.dot(&cso_point.point.coords);

        assert!(min_bound.is_finite());

        if min_bound > max_dist {
            return GJKResult::NoIntersection(dir);
        } else if !exact_dist && min_bound > 0.0 && max_bound <= max_dist {
            return GJKResult::Proximity(old_dir);
        } else if max_bound - min_bound <= _eps_rel * max_bound {
            // The distance found has a good enough precision.
            return if exact_dist {
                let (p1, p2) = result(simplex, false);
                GJKResult::ClosestPoints(p1, p2, dir)
            } else {
                GJKResult::Proximity(dir)
            };
        }

        if !simplex.add_point(cso_point) {
            return if exact_dist {
                let (p1, p2) = result(simplex, false);
                GJKResult::ClosestPoints(p1, p2, dir)
            } else {
                GJKResult::Proximity(dir)
            };
        }

        old_dir = dir;
        proj = simplex.project_origin_and_reduce();

        if simplex.dimension() == DIM {
            if min_bound >= _eps_tol {
                return if exact_dist {
                    let (p1, p2) = result(simplex, true);
                    GJKResult::ClosestPoints(p1, p2, old_dir)
                } else {
                    GJKResult::Proximity(old_dir)
                };
            } else {
                // Point inside of the cso.
                return GJKResult::Intersection;
            }
        }

        niter += 1;
    }
}

fn result(simplex: &VoronoiSimplex, prev: bool) -> (Point<Real>, Point<Real>) {
    let mut res = (Point::origin(), Point::origin());
    if prev {
        for i in 0..simplex.prev_dimension() + 1 {
            let coord = simplex.prev_proj_coord(i);
            let point = simplex.prev_point(i);
            res.0 += point.orig1.coords * coord;
            res.1 += point.orig2.coords * coord;
        }
    } else {
        for i in 0..simplex.dimension() + 1 {
            let coord = simplex.proj_coord(i);
            let point = simplex.point(i);
            res.0 += point.orig1.coords * coord;
            res.1 += point.orig2.coords * coord;
        }
    }

    res
}
