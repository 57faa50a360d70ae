use core::cmp::PartialOrd;

/// A pair of elements sorted in increasing order.
///
/// Two pairs built from the same elements compare equal regardless of the
/// order in which the elements were given.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SortedPair<T: PartialOrd>([T; 2]);

impl<T: PartialOrd + Copy> SortedPair<T> {
    /// Sorts two elements in increasing order into a new pair.
    pub fn new(element1: T, element2: T) -> Self {
        if element1 > element2 {
            SortedPair([element2, element1])
        } else {
            SortedPair([element1, element2])
        }
    }

    /// The smallest element of this pair.
    #[inline]
    pub fn first(&self) -> T {
        self.0[0]
    }

    /// The largest element of this pair.
    #[inline]
    pub fn second(&self) -> T {
        self.0[1]
    }
}
