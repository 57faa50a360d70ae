//! Shapes supported by graze.

pub use self::ball::Ball;
pub use self::convex_polyhedron::{ConvexPolyhedron, ConvexPolyhedronError, Face};
#[doc(inline)]
pub use self::shape::{Shape, ShapeType};
#[doc(inline)]
pub use self::support_map::SupportMap;

mod ball;
mod convex_polyhedron;
mod shape;
mod support_map;
