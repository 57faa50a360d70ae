use crate::narrow_phase::{
    GjkProximity, NarrowPhaseAction, NarrowPhaseBatch, NarrowPhaseItemFlags, NarrowPhaseWorkspace,
    PenetrationAlgorithm, ProximityAlgorithm, SatPenetration, TemporalHintStore,
};

#[cfg(feature = "parallel")]
use crate::narrow_phase::TemporalHintCache;

/// Narrow phase between balls and convex polyhedra.
///
/// The proximity algorithm `A` runs once over a whole range of pairs. Pairs it finds
/// within margin are marked as colliding, separated pairs are left untouched, and
/// interpenetrating pairs are resolved one by one by the penetration algorithm `B`.
#[derive(Copy, Clone, Debug, Default)]
pub struct SphereConvexPolyhedronAlgorithm<A = GjkProximity, B = SatPenetration> {
    proximity: A,
    penetration: B,
}

impl<A, B> SphereConvexPolyhedronAlgorithm<A, B> {
    /// Creates a narrow phase from its proximity and penetration algorithms.
    pub fn new(proximity: A, penetration: B) -> Self {
        SphereConvexPolyhedronAlgorithm {
            proximity,
            penetration,
        }
    }

    /// The algorithm classifying the proximity of all the pairs.
    pub fn proximity(&self) -> &A {
        &self.proximity
    }

    /// The algorithm resolving interpenetrating pairs.
    pub fn penetration(&self) -> &B {
        &self.penetration
    }
}

impl<A: ProximityAlgorithm, B: PenetrationAlgorithm> SphereConvexPolyhedronAlgorithm<A, B> {
    /// Tests the `count` pairs of `batch` starting at index `start`.
    ///
    /// On return, every pair of the range has its final colliding flag and, if
    /// `report_contacts` is `true`, the contact of every colliding pair is written
    /// into the batch. The hint of every pair records which algorithm resolved it.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the batch, if a pair isn't made of exactly one
    /// ball and one convex polyhedron, if a pair is already marked as colliding, or if
    /// the proximity algorithm doesn't report exactly one outcome per pair.
    pub fn test_collision(
        &self,
        batch: &mut NarrowPhaseBatch<'_>,
        start: usize,
        count: usize,
        report_contacts: bool,
        workspace: &mut NarrowPhaseWorkspace,
        hints: &mut dyn TemporalHintStore,
    ) {
        let end = start
            .checked_add(count)
            .filter(|end| *end <= batch.len())
            .unwrap_or_else(|| {
                panic!(
                    "The {} pairs starting at index {} exceed the batch length {}.",
                    count,
                    start,
                    batch.len()
                )
            });

        for i in start..end {
            let item = batch.item_mut(i);
            assert!(
                item.is_ball_convex_polyhedron(),
                "Expected a ball and a convex polyhedron, found: {:?} and {:?}.",
                item.shape1.shape_type(),
                item.shape2.shape_type()
            );
            assert!(
                !item.is_colliding(),
                "The pair {:?} is already marked as colliding.",
                item.key
            );
            item.flags.remove(NarrowPhaseItemFlags::ESCALATED);
        }

        let mut scope = workspace.scope();
        let outcomes = scope.outcomes();

        self.proximity
            .test_collision(batch, start, count, report_contacts, hints, outcomes);

        assert_eq!(
            outcomes.len(),
            count,
            "The proximity algorithm must report exactly one outcome per pair."
        );

        for (i, outcome) in (start..end).zip(outcomes.iter()) {
            let key = batch.item(i).key;

            match outcome.action() {
                NarrowPhaseAction::MarkColliding => {
                    batch.item_mut(i).set_colliding(true);
                    hints.hint_mut(key).record_gjk();
                }
                NarrowPhaseAction::Skip => {
                    hints.hint_mut(key).record_gjk();
                }
                NarrowPhaseAction::Escalate => {
                    log::trace!("Pair {:?} interpenetrates: falling back to SAT.", key);
                    batch.item_mut(i).flags.insert(NarrowPhaseItemFlags::ESCALATED);
                    self.penetration
                        .test_collision(batch, i, report_contacts, hints);
                    hints.hint_mut(key).record_sat();
                }
            }
        }
    }
}

/// A batch of pairs tested independently of other batches, together with its own
/// hints and scratch memory.
#[cfg(feature = "parallel")]
#[derive(Clone, Debug, Default)]
pub struct NarrowPhaseShard<'a> {
    /// The pairs of this shard.
    pub batch: NarrowPhaseBatch<'a>,
    /// The temporal hints of the pairs of this shard.
    pub hints: TemporalHintCache,
    /// The scratch memory of this shard.
    pub workspace: NarrowPhaseWorkspace,
}

#[cfg(feature = "parallel")]
impl<A, B> SphereConvexPolyhedronAlgorithm<A, B>
where
    A: ProximityAlgorithm + Sync,
    B: PenetrationAlgorithm + Sync,
{
    /// Tests all the pairs of every shard, shards being processed in parallel.
    ///
    /// Each shard is tested exactly like a single call to [`Self::test_collision`]
    /// covering its whole batch.
    pub fn test_collision_shards(&self, shards: &mut [NarrowPhaseShard<'_>], report_contacts: bool) {
        use rayon::prelude::*;

        shards.par_iter_mut().for_each(|shard| {
            let count = shard.batch.len();
            self.test_collision(
                &mut shard.batch,
                0,
                count,
                report_contacts,
                &mut shard.workspace,
                &mut shard.hints,
            )
        });
    }
}
