use crate::shape::{Ball, ConvexPolyhedron};
use core::fmt::Debug;
use downcast_rs::{impl_downcast, DowncastSync};

/// The type tag of a shape.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum ShapeType {
    /// A ball shape.
    Ball = 0,
    /// A convex polyhedron.
    ConvexPolyhedron,
}

/// A shape handed to the narrow phase behind a trait object.
///
/// The type tag is checked before downcasting to the concrete shape.
pub trait Shape: DowncastSync + Debug {
    /// Gets the type tag of this shape.
    fn shape_type(&self) -> ShapeType;
}

impl_downcast!(sync Shape);

impl dyn Shape {
    /// Converts this abstract shape to a ball, if it is one.
    pub fn as_ball(&self) -> Option<&Ball> {
        self.downcast_ref()
    }

    /// Converts this abstract shape to a convex polyhedron, if it is one.
    pub fn as_convex_polyhedron(&self) -> Option<&ConvexPolyhedron> {
        self.downcast_ref()
    }
}

impl Shape for Ball {
    fn shape_type(&self) -> ShapeType {
        ShapeType::Ball
    }
}

impl Shape for ConvexPolyhedron {
    fn shape_type(&self) -> ShapeType {
        ShapeType::ConvexPolyhedron
    }
}
