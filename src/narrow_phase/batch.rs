use crate::math::{Isometry, Real};
use crate::narrow_phase::PairKey;
use crate::query::Contact;
use crate::shape::{Ball, ConvexPolyhedron, Shape, ShapeType};

bitflags::bitflags! {
    /// Flags describing the state of a pair after a narrow-phase test.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
    pub struct NarrowPhaseItemFlags: u8 {
        /// The shapes of the pair are colliding.
        const COLLIDING = 1;
        /// The pair was handed to the penetration algorithm.
        const ESCALATED = 1 << 1;
    }
}

/// A candidate pair of the narrow phase, with its result slots.
#[derive(Copy, Clone, Debug)]
pub struct NarrowPhaseItem<'a> {
    /// The key of this pair.
    pub key: PairKey,
    /// The first shape of the pair.
    pub shape1: &'a dyn Shape,
    /// The second shape of the pair.
    pub shape2: &'a dyn Shape,
    /// The world-space pose of `shape1`.
    pub pos1: Isometry<Real>,
    /// The world-space pose of `shape2`.
    pub pos2: Isometry<Real>,
    /// The result flags of this pair.
    pub flags: NarrowPhaseItemFlags,
    /// The contact between both shapes, if requested and found.
    ///
    /// Its first point and normal are relative to `shape1`.
    pub contact: Option<Contact>,
}

/// The ball and the polyhedron of a pair, seen from the polyhedron.
#[derive(Copy, Clone, Debug)]
pub struct BallConvexPolyhedronPair<'a> {
    /// The ball of the pair.
    pub ball: &'a Ball,
    /// The convex polyhedron of the pair.
    pub polyhedron: &'a ConvexPolyhedron,
    /// The pose of the ball relative to the polyhedron.
    pub pos12: Isometry<Real>,
    /// Is the ball the first shape of the pair?
    ///
    /// If so, contacts computed from the point of view of the polyhedron must be flipped.
    pub flipped: bool,
}

impl<'a> NarrowPhaseItem<'a> {
    /// Creates a new non-colliding pair.
    pub fn new(
        key: PairKey,
        shape1: &'a dyn Shape,
        pos1: Isometry<Real>,
        shape2: &'a dyn Shape,
        pos2: Isometry<Real>,
    ) -> Self {
        NarrowPhaseItem {
            key,
            shape1,
            shape2,
            pos1,
            pos2,
            flags: NarrowPhaseItemFlags::empty(),
            contact: None,
        }
    }

    /// Are the shapes of this pair colliding?
    #[inline]
    pub fn is_colliding(&self) -> bool {
        self.flags.contains(NarrowPhaseItemFlags::COLLIDING)
    }

    /// Sets the colliding flag of this pair.
    #[inline]
    pub fn set_colliding(&mut self, colliding: bool) {
        self.flags.set(NarrowPhaseItemFlags::COLLIDING, colliding)
    }

    /// Was this pair handed to the penetration algorithm during its last test?
    #[inline]
    pub fn is_escalated(&self) -> bool {
        self.flags.contains(NarrowPhaseItemFlags::ESCALATED)
    }

    /// Is this pair made of exactly one ball and one convex polyhedron, in any order?
    pub fn is_ball_convex_polyhedron(&self) -> bool {
        matches!(
            (self.shape1.shape_type(), self.shape2.shape_type()),
            (ShapeType::Ball, ShapeType::ConvexPolyhedron)
                | (ShapeType::ConvexPolyhedron, ShapeType::Ball)
        )
    }

    /// Splits this pair into its ball and its polyhedron, if it is made of one of each.
    pub fn as_ball_convex_polyhedron(&self) -> Option<BallConvexPolyhedronPair<'a>> {
        let shape1: &'a dyn Shape = self.shape1;
        let shape2: &'a dyn Shape = self.shape2;

        if let (Some(polyhedron), Some(ball)) = (shape1.as_convex_polyhedron(), shape2.as_ball()) {
            Some(BallConvexPolyhedronPair {
                ball,
                polyhedron,
                pos12: self.pos1.inv_mul(&self.pos2),
                flipped: false,
            })
        } else if let (Some(ball), Some(polyhedron)) =
            (shape1.as_ball(), shape2.as_convex_polyhedron())
        {
            Some(BallConvexPolyhedronPair {
                ball,
                polyhedron,
                pos12: self.pos2.inv_mul(&self.pos1),
                flipped: true,
            })
        } else {
            None
        }
    }
}

impl BallConvexPolyhedronPair<'_> {
    /// Converts a contact computed from the point of view of the polyhedron to the
    /// shape order of the pair.
    #[inline]
    pub fn to_pair_order(&self, contact: Contact) -> Contact {
        if self.flipped {
            contact.flipped()
        } else {
            contact
        }
    }
}

/// A set of candidate pairs tested by the narrow phase.
#[derive(Clone, Debug, Default)]
pub struct NarrowPhaseBatch<'a> {
    items: Vec<NarrowPhaseItem<'a>>,
}

impl<'a> NarrowPhaseBatch<'a> {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty batch able to hold `capacity` pairs without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        NarrowPhaseBatch {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Adds a pair to this batch and returns its index.
    pub fn push(
        &mut self,
        key: PairKey,
        shape1: &'a dyn Shape,
        pos1: Isometry<Real>,
        shape2: &'a dyn Shape,
        pos2: Isometry<Real>,
    ) -> usize {
        self.items
            .push(NarrowPhaseItem::new(key, shape1, pos1, shape2, pos2));
        self.items.len() - 1
    }

    /// The number of pairs in this batch.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Is this batch empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The pair at index `i`.
    #[inline]
    pub fn item(&self, i: usize) -> &NarrowPhaseItem<'a> {
        &self.items[i]
    }

    /// The pair at index `i`, mutably.
    #[inline]
    pub fn item_mut(&mut self, i: usize) -> &mut NarrowPhaseItem<'a> {
        &mut self.items[i]
    }

    /// All the pairs of this batch.
    #[inline]
    pub fn items(&self) -> &[NarrowPhaseItem<'a>] {
        &self.items[..]
    }

    /// Are the shapes of the pair at index `i` colliding?
    #[inline]
    pub fn is_colliding(&self, i: usize) -> bool {
        self.items[i].is_colliding()
    }

    /// The contact of the pair at index `i`, if any was reported.
    #[inline]
    pub fn contact(&self, i: usize) -> Option<&Contact> {
        self.items[i].contact.as_ref()
    }

    /// Clears the result slots of every pair so the batch can be tested again.
    pub fn reset_results(&mut self) {
        for item in &mut self.items {
            item.flags = NarrowPhaseItemFlags::empty();
            item.contact = None;
        }
    }

    /// Removes all the pairs of this batch.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
