use crate::math::{Isometry, Point, Real, Vector, DEFAULT_EPSILON};
use crate::narrow_phase::{
    NarrowPhaseBatch, ProximityAlgorithm, ProximityOutcome, TemporalHintStore,
};
use crate::query::gjk::{self, CSOPoint, ConstantPoint, GJKResult, VoronoiSimplex};
use crate::query::Contact;
use na::Unit;

/// Parameters of the [`GjkProximity`] algorithm.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct GjkConfig {
    /// Extra distance beyond the ball radius within which a pair is still considered colliding.
    ///
    /// Default value: `0.0`
    pub prediction: Real,
    /// The maximum number of GJK iterations per pair.
    ///
    /// A pair that doesn't converge within this budget is reported as separated.
    ///
    /// Default value: [`gjk::DEFAULT_MAX_ITERATIONS`]
    pub max_iterations: usize,
}

impl Default for GjkConfig {
    fn default() -> Self {
        GjkConfig {
            prediction: 0.0,
            max_iterations: gjk::DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Batched proximity test between balls and convex polyhedra based on GJK.
///
/// The ball is reduced to its center and GJK computes the distance between that
/// point and the polyhedron. The pair is within margin if that distance doesn't
/// exceed the ball radius plus the prediction distance. If the center lies inside
/// the polyhedron, the pair is reported as interpenetrating.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct GjkProximity {
    /// The parameters of this algorithm.
    pub config: GjkConfig,
}

impl GjkProximity {
    /// Creates a new GJK proximity test with the given parameters.
    pub fn new(config: GjkConfig) -> Self {
        GjkProximity { config }
    }
}

impl ProximityAlgorithm for GjkProximity {
    fn test_collision(
        &self,
        batch: &mut NarrowPhaseBatch<'_>,
        start: usize,
        count: usize,
        report_contacts: bool,
        hints: &mut dyn TemporalHintStore,
        outcomes: &mut Vec<ProximityOutcome>,
    ) {
        let mut simplex = VoronoiSimplex::new();

        for i in start..start + count {
            let item = batch.item(i);
            let key = item.key;
            let Some(pair) = item.as_ball_convex_polyhedron() else {
                panic!("GJK proximity only supports ball vs. convex polyhedron pairs.");
            };

            let identity = Isometry::identity();
            let center = ConstantPoint(Point::from(pair.pos12.translation.vector));
            let margin = pair.ball.radius + self.config.prediction;

            // Warm-start with the axis of the previous step, if any.
            let init_dir = hints
                .hint(key)
                .and_then(|hint| hint.gjk_separating_axis)
                .or_else(|| Unit::try_new(center.0.coords, DEFAULT_EPSILON))
                .unwrap_or_else(Vector::x_axis);

            simplex.reset(CSOPoint::support_toward(
                &identity,
                pair.polyhedron,
                &center,
                &init_dir,
            ));

            let result = gjk::closest_points(
                &identity,
                pair.polyhedron,
                &center,
                margin,
                true,
                self.config.max_iterations,
                &mut simplex,
            );

            let outcome = match result {
                GJKResult::Intersection => ProximityOutcome::Interpenetrating,
                GJKResult::NoIntersection(separating_axis) => {
                    hints.hint_mut(key).gjk_separating_axis = Some(separating_axis);
                    ProximityOutcome::Separated { separating_axis }
                }
                GJKResult::ClosestPoints(point1, center1, normal1) => {
                    let distance = (center1 - point1).dot(&normal1);
                    hints.hint_mut(key).gjk_separating_axis = Some(normal1);

                    if distance > margin {
                        ProximityOutcome::Separated {
                            separating_axis: normal1,
                        }
                    } else {
                        if report_contacts {
                            let normal2 = pair.pos12.inverse_transform_unit_vector(&-normal1);
                            let point2 = pair.ball.local_surface_point(&normal2);
                            let contact = Contact::new(
                                point1,
                                point2,
                                normal1,
                                normal2,
                                distance - pair.ball.radius,
                            );
                            batch.item_mut(i).contact = Some(pair.to_pair_order(contact));
                        }

                        ProximityOutcome::WithinMargin { distance }
                    }
                }
                GJKResult::Proximity(_) => {
                    unreachable!("GJK only reports proximities when exact distances aren't needed.")
                }
            };

            outcomes.push(outcome);
        }
    }
}
