//! The GJK algorithm for distance computation.

pub use self::cso_point::CSOPoint;
pub use self::voronoi_simplex3::VoronoiSimplex;
pub use gjk::*;
pub use special_support_maps::*;

mod cso_point;
mod gjk;
mod special_support_maps;
mod voronoi_simplex3;
