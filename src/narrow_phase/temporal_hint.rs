use crate::math::{Real, UnitVector};
use crate::utils::hashmap::HashMap;
use crate::utils::SortedPair;

/// A stable identifier of a pair of colliders, independent of the order of its colliders.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PairKey(SortedPair<u32>);

impl PairKey {
    /// Creates the key of the pair made of the colliders with the given handles.
    #[inline]
    pub fn new(collider1: u32, collider2: u32) -> Self {
        PairKey(SortedPair::new(collider1, collider2))
    }

    /// The smallest collider handle of this pair.
    #[inline]
    pub fn collider1(&self) -> u32 {
        self.0.first()
    }

    /// The largest collider handle of this pair.
    #[inline]
    pub fn collider2(&self) -> u32 {
        self.0.second()
    }
}

/// Per-pair information kept from one simulation step to the next.
///
/// The flags tell which algorithm resolved the pair during its last test. The
/// warm-start data is written by the algorithms themselves and read back at the
/// next step to speed up convergence.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct TemporalHint {
    /// Was the pair resolved by the proximity (GJK) algorithm during its last test?
    pub was_using_gjk: bool,
    /// Was the pair resolved by the penetration (SAT) algorithm during its last test?
    pub was_using_sat: bool,
    /// Last separating direction found by GJK, in the local-space of the polyhedron.
    pub gjk_separating_axis: Option<UnitVector<Real>>,
    /// Last polyhedron face of minimum penetration found by SAT.
    pub sat_min_face: Option<u32>,
    is_obsolete: bool,
}

impl TemporalHint {
    /// Has this pair been resolved at least once?
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.was_using_gjk || self.was_using_sat
    }

    /// Records that the proximity algorithm resolved this pair.
    #[inline]
    pub fn record_gjk(&mut self) {
        self.was_using_gjk = true;
        self.was_using_sat = false;
    }

    /// Records that the penetration algorithm resolved this pair.
    #[inline]
    pub fn record_sat(&mut self) {
        self.was_using_gjk = false;
        self.was_using_sat = true;
    }
}

/// A storage of temporal hints, addressed by pair.
pub trait TemporalHintStore {
    /// The hint of the given pair, if any exists.
    fn hint(&self, key: PairKey) -> Option<&TemporalHint>;

    /// The hint of the given pair, created with default values if it doesn't exist.
    fn hint_mut(&mut self, key: PairKey) -> &mut TemporalHint;
}

/// A hash-map based [`TemporalHintStore`].
///
/// Hints of pairs that are no longer tested are purged with [`Self::begin_frame`]
/// followed by [`Self::remove_obsolete`] once every batch of the frame has been tested.
#[derive(Clone, Debug, Default)]
pub struct TemporalHintCache {
    hints: HashMap<PairKey, TemporalHint>,
}

impl TemporalHintCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of pairs with a hint.
    pub fn len(&self) -> usize {
        self.hints.len()
    }

    /// Is this cache empty?
    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }

    /// Iterates through all the hints of this cache.
    pub fn iter(&self) -> impl Iterator<Item = (&PairKey, &TemporalHint)> {
        self.hints.iter()
    }

    /// Marks every hint as obsolete.
    ///
    /// A hint stops being obsolete as soon as it is accessed mutably.
    pub fn begin_frame(&mut self) {
        for hint in self.hints.values_mut() {
            hint.is_obsolete = true;
        }
    }

    /// Removes every hint that wasn't accessed since the last call to [`Self::begin_frame`].
    ///
    /// Returns the number of hints removed.
    pub fn remove_obsolete(&mut self) -> usize {
        let len = self.hints.len();
        self.hints.retain(|_, hint| !hint.is_obsolete);
        len - self.hints.len()
    }

    /// Removes the hint of the given pair.
    pub fn remove(&mut self, key: PairKey) -> Option<TemporalHint> {
        #[cfg(feature = "enhanced-determinism")]
        return self.hints.shift_remove(&key);
        #[cfg(not(feature = "enhanced-determinism"))]
        return self.hints.remove(&key);
    }
}

impl TemporalHintStore for TemporalHintCache {
    fn hint(&self, key: PairKey) -> Option<&TemporalHint> {
        self.hints.get(&key)
    }

    fn hint_mut(&mut self, key: PairKey) -> &mut TemporalHint {
        let hint = self.hints.entry(key).or_default();
        hint.is_obsolete = false;
        hint
    }
}
