use crate::math::{Point, Real, DEFAULT_EPSILON};
use crate::narrow_phase::{NarrowPhaseBatch, PenetrationAlgorithm, TemporalHintStore};
use crate::query::sat;
use na::ComplexField;

/// Parameters of the [`SatPenetration`] algorithm.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SatConfig {
    /// Faces with penetrations closer than this to the minimal one are considered equivalent.
    ///
    /// The face found at the previous step wins among equivalent faces, which keeps the
    /// contact normal stable when the ball sits near an edge or a corner.
    ///
    /// Default value: the square root of the machine epsilon
    pub tie_tolerance: Real,
}

impl Default for SatConfig {
    fn default() -> Self {
        SatConfig {
            tie_tolerance: ComplexField::sqrt(DEFAULT_EPSILON),
        }
    }
}

/// Separating-axis penetration test between a ball and a convex polyhedron.
///
/// Every face normal of the polyhedron is a candidate axis. The axis along which the
/// ball penetrates the least gives the contact normal and the penetration depth.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SatPenetration {
    /// The parameters of this algorithm.
    pub config: SatConfig,
}

impl SatPenetration {
    /// Creates a new SAT penetration test with the given parameters.
    pub fn new(config: SatConfig) -> Self {
        SatPenetration { config }
    }
}

impl PenetrationAlgorithm for SatPenetration {
    fn test_collision(
        &self,
        batch: &mut NarrowPhaseBatch<'_>,
        index: usize,
        report_contacts: bool,
        hints: &mut dyn TemporalHintStore,
    ) {
        let item = batch.item(index);
        let key = item.key;
        let Some(pair) = item.as_ball_convex_polyhedron() else {
            panic!("SAT penetration only supports ball vs. convex polyhedron pairs.");
        };

        let center1 = Point::from(pair.pos12.translation.vector);
        let radius = pair.ball.radius;
        let cached_face = hints
            .hint(key)
            .and_then(|hint| hint.sat_min_face)
            .filter(|face_id| (*face_id as usize) < pair.polyhedron.faces().len());

        if let Some(face_id) = cached_face {
            let separation = sat::convex_polyhedron_ball_compute_separation(
                pair.polyhedron,
                face_id,
                &center1,
                radius,
            );

            if separation > 0.0 {
                // The previous face still separates the shapes.
                return;
            }
        }

        let Some((separation, face_id)) = sat::convex_polyhedron_ball_find_local_separating_face(
            pair.polyhedron,
            &center1,
            radius,
            cached_face,
            self.config.tie_tolerance,
        ) else {
            return;
        };

        hints.hint_mut(key).sat_min_face = Some(face_id);

        if separation > 0.0 {
            return;
        }

        let item = batch.item_mut(index);
        item.set_colliding(true);

        if report_contacts {
            let contact = sat::convex_polyhedron_ball_contact(
                &pair.pos12,
                pair.polyhedron,
                pair.ball,
                face_id,
                separation,
            );
            item.contact = Some(pair.to_pair_order(contact));
        }
    }
}
