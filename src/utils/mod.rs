//! Small containers shared by the narrow phase.

pub use self::sorted_pair::SortedPair;

pub mod hashmap;
mod sorted_pair;
