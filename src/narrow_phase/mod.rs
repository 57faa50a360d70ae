//! Narrow phase between balls and convex polyhedra.
//!
//! The narrow phase receives a batch of candidate pairs from a broad phase and decides,
//! for each of them, whether its shapes are colliding:
//!
//! - a [`ProximityAlgorithm`] (GJK by default) classifies every pair of a range in a
//!   single pass as separated, within the contact margin, or interpenetrating;
//! - pairs within margin are marked as colliding;
//! - interpenetrating pairs are handed one by one to a [`PenetrationAlgorithm`] (SAT by
//!   default) able to compute the penetration depth GJK can't provide.
//!
//! A [`TemporalHintStore`] keeps, for each pair, which algorithm resolved it along with
//! warm-start data reused at the next step.

pub use self::batch::{
    BallConvexPolyhedronPair, NarrowPhaseBatch, NarrowPhaseItem, NarrowPhaseItemFlags,
};
pub use self::collision_algorithm::{
    NarrowPhaseAction, PenetrationAlgorithm, ProximityAlgorithm, ProximityOutcome,
};
pub use self::gjk_proximity::{GjkConfig, GjkProximity};
pub use self::sat_penetration::{SatConfig, SatPenetration};
pub use self::sphere_convex_polyhedron::SphereConvexPolyhedronAlgorithm;
#[cfg(feature = "parallel")]
pub use self::sphere_convex_polyhedron::NarrowPhaseShard;
pub use self::temporal_hint::{PairKey, TemporalHint, TemporalHintCache, TemporalHintStore};
pub use self::workspace::{NarrowPhaseWorkspace, WorkspaceScope};

mod batch;
mod collision_algorithm;
mod gjk_proximity;
mod sat_penetration;
mod sphere_convex_polyhedron;
mod temporal_hint;
mod workspace;
