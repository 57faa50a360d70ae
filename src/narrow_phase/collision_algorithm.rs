use crate::math::{Real, UnitVector};
use crate::narrow_phase::{NarrowPhaseBatch, TemporalHintStore};

/// The result of a proximity test on one pair.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum ProximityOutcome {
    /// The shapes are farther apart than the contact margin.
    Separated {
        /// A direction along which the shapes are separated, in the local-space of the polyhedron.
        separating_axis: UnitVector<Real>,
    },
    /// The shapes are disjoint or barely overlapping, but within the contact margin.
    WithinMargin {
        /// The distance between the core shapes, i.e., ignoring the ball radius.
        distance: Real,
    },
    /// The core shapes overlap: no reliable contact can be derived from the proximity test.
    Interpenetrating,
}

/// What the narrow phase does with a pair after its proximity test.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NarrowPhaseAction {
    /// The pair is marked as colliding.
    MarkColliding,
    /// Nothing: the pair stays non-colliding.
    Skip,
    /// The pair is handed to the penetration algorithm.
    Escalate,
}

impl ProximityOutcome {
    /// The action the narrow phase takes for a pair with this outcome.
    #[inline]
    pub fn action(&self) -> NarrowPhaseAction {
        match self {
            ProximityOutcome::Separated { .. } => NarrowPhaseAction::Skip,
            ProximityOutcome::WithinMargin { .. } => NarrowPhaseAction::MarkColliding,
            ProximityOutcome::Interpenetrating => NarrowPhaseAction::Escalate,
        }
    }
}

/// An algorithm classifying the proximity of a contiguous range of pairs at once.
pub trait ProximityAlgorithm {
    /// Tests the `count` pairs of `batch` starting at index `start`.
    ///
    /// Exactly one outcome must be pushed to `outcomes` per pair, in batch order.
    /// If `report_contacts` is `true`, the contact of each pair within margin is written
    /// into the batch. The colliding flag of the pairs is left untouched.
    fn test_collision(
        &self,
        batch: &mut NarrowPhaseBatch<'_>,
        start: usize,
        count: usize,
        report_contacts: bool,
        hints: &mut dyn TemporalHintStore,
        outcomes: &mut Vec<ProximityOutcome>,
    );
}

/// An algorithm resolving a single pair whose shapes interpenetrate.
pub trait PenetrationAlgorithm {
    /// Tests the pair at `index` in `batch`.
    ///
    /// Sets its colliding flag if the shapes intersect and, when `report_contacts`
    /// is `true`, writes their contact into the batch.
    fn test_collision(
        &self,
        batch: &mut NarrowPhaseBatch<'_>,
        index: usize,
        report_contacts: bool,
        hints: &mut dyn TemporalHintStore,
    );
}
