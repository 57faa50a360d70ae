use crate::math::{Isometry, Point, Real};
use crate::query::Contact;
use crate::shape::{Ball, ConvexPolyhedron};

/// Computes the separation between a ball and the `face_id`-th face plane of a convex polyhedron.
///
/// `center1` is the ball center expressed in the local-space of the polyhedron. The result is
/// positive if the face plane separates the two shapes.
#[inline]
pub fn convex_polyhedron_ball_compute_separation(
    poly1: &ConvexPolyhedron,
    face_id: u32,
    center1: &Point<Real>,
    radius: Real,
) -> Real {
    poly1.faces()[face_id as usize].signed_distance(center1) - radius
}

/// Finds the face of `poly1` along which the ball has the largest separation.
///
/// Returns the separation and the face index, or `None` if the polyhedron has no face.
/// A negative separation is the opposite of the penetration depth along that face normal.
/// Faces with a separation within `tie_tolerance` of the best one are considered equivalent
/// and `preferred_face` wins among them, if any.
pub fn convex_polyhedron_ball_find_local_separating_face(
    poly1: &ConvexPolyhedron,
    center1: &Point<Real>,
    radius: Real,
    preferred_face: Option<u32>,
    tie_tolerance: Real,
) -> Option<(Real, u32)> {
    let mut best: Option<(Real, u32)> = None;

    for (face_id, face) in poly1.faces().iter().enumerate() {
        let separation = face.signed_distance(center1) - radius;

        if best.map_or(true, |(best_sep, _)| separation > best_sep) {
            best = Some((separation, face_id as u32));
        }
    }

    let (best_sep, best_face) = best?;

    if let Some(preferred) = preferred_face.filter(|f| (*f as usize) < poly1.faces().len()) {
        let sep = convex_polyhedron_ball_compute_separation(poly1, preferred, center1, radius);

        if best_sep - sep <= tie_tolerance {
            return Some((sep, preferred));
        }
    }

    Some((best_sep, best_face))
}

/// Builds the contact between a convex polyhedron and a ball from the face found by
/// [`convex_polyhedron_ball_find_local_separating_face`].
///
/// `pos12` is the pose of the ball relative to the polyhedron. The contact normal is the
/// face normal and the contact point on the polyhedron is the projection of the ball center
/// on the face plane.
pub fn convex_polyhedron_ball_contact(
    pos12: &Isometry<Real>,
    poly1: &ConvexPolyhedron,
    ball2: &Ball,
    face_id: u32,
    separation: Real,
) -> Contact {
    let center2_1 = Point::from(pos12.translation.vector);
    let normal1 = poly1.faces()[face_id as usize].normal;
    let point1 = center2_1 - *normal1 * (separation + ball2.radius);
    let normal2 = pos12.inverse_transform_unit_vector(&-normal1);
    let point2 = ball2.local_surface_point(&normal2);

    Contact::new(point1, point2, normal1, normal2, separation)
}
