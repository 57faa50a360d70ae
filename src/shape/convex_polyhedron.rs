use crate::math::{Point, Real, UnitVector, Vector, DEFAULT_EPSILON};
use crate::shape::SupportMap;
use crate::utils::hashmap::{Entry, HashMap};
use crate::utils::SortedPair;
use na::{ComplexField, Unit};

/// Indicates an inconsistency while building a convex polyhedron.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConvexPolyhedronError {
    /// A convex polyhedron needs at least four vertices and one triangle.
    #[error("a convex polyhedron must have at least 4 vertices and 1 triangle.")]
    NotEnoughPoints,
    /// A triangle references a vertex that does not exist.
    #[error("the triangle {0} references a vertex out of bounds.")]
    IndexOutOfBounds(u32),
    /// Found a triangle with two identical vertices or a zero area.
    #[error("the triangle {0} is degenerate.")]
    DegenerateTriangle(u32),
    /// An edge of this triangle is shared by more than two triangles.
    #[error("the triangle {0} has an edge already shared by two other triangles.")]
    TJunction(u32),
    /// An edge of this triangle isn't shared with any other triangle.
    #[error("the triangle {0} has an edge with no adjacent triangle: the input mesh is not closed.")]
    NotClosed(u32),
    /// Some vertex lies strictly above the plane of a face.
    #[error("the face {0} has vertices in front of it: the input mesh is not convex.")]
    NotConvex(u32),
}

/// A face of a convex polyhedron.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Face {
    /// The outward normal of this face.
    pub normal: Unit<Vector<Real>>,
    /// The distance of the face plane from the local origin, along `normal`.
    pub offset: Real,
}

impl Face {
    /// The signed distance between `pt` and the plane of this face.
    ///
    /// This is negative if `pt` is behind the face, i.e., on the side of the polyhedron.
    #[inline]
    pub fn signed_distance(&self, pt: &Point<Real>) -> Real {
        self.normal.dot(&pt.coords) - self.offset
    }
}

/// A 3D convex polyhedron described by its vertices and face planes.
///
/// Coplanar triangles of the input mesh are merged into a single face so each
/// face normal appears only once in separating-axis searches.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Clone)]
pub struct ConvexPolyhedron {
    points: Vec<Point<Real>>,
    faces: Vec<Face>,
}

impl ConvexPolyhedron {
    /// Creates a new convex polyhedron from a convex triangle mesh.
    ///
    /// The triangles must be oriented counter-clockwise when seen from the outside, and
    /// every edge must be shared by exactly two triangles.
    pub fn from_convex_mesh(
        points: Vec<Point<Real>>,
        indices: &[[u32; 3]],
    ) -> Result<ConvexPolyhedron, ConvexPolyhedronError> {
        if points.len() < 4 || indices.is_empty() {
            return Err(ConvexPolyhedronError::NotEnoughPoints);
        }

        let scale = 1.0
            + points
                .iter()
                .map(|pt| pt.coords.amax())
                .fold(0.0, |a: Real, b| a.max(b));
        let eps = ComplexField::sqrt(DEFAULT_EPSILON);
        let mut faces: Vec<Face> = Vec::new();
        // Maps an edge to its two adjacent triangles.
        let mut edge_map: HashMap<SortedPair<u32>, (u32, u32)> = HashMap::default();

        for (tri_id, idx) in indices.iter().enumerate() {
            let tri_id = tri_id as u32;

            if idx.iter().any(|i| *i as usize >= points.len()) {
                return Err(ConvexPolyhedronError::IndexOutOfBounds(tri_id));
            }

            if idx[0] == idx[1] || idx[0] == idx[2] || idx[1] == idx[2] {
                return Err(ConvexPolyhedronError::DegenerateTriangle(tri_id));
            }

            for i1 in 0..3 {
                let i2 = (i1 + 1) % 3;
                let key = SortedPair::new(idx[i1], idx[i2]);

                match edge_map.entry(key) {
                    Entry::Occupied(mut e) => {
                        let adj = e.get_mut();

                        if adj.1 != u32::MAX {
                            return Err(ConvexPolyhedronError::TJunction(tri_id));
                        }

                        adj.1 = tri_id;
                    }
                    Entry::Vacant(e) => {
                        let _ = e.insert((tri_id, u32::MAX));
                    }
                }
            }

            let normal = ccw_triangle_normal(&points, idx)
                .ok_or(ConvexPolyhedronError::DegenerateTriangle(tri_id))?;
            let offset = normal.dot(&points[idx[0] as usize].coords);

            let coplanar = faces.iter().any(|face| {
                face.normal.dot(normal.as_ref()) > 1.0 - eps
                    && (face.offset - offset).abs() <= eps * scale
            });

            if !coplanar {
                faces.push(Face { normal, offset });
            }
        }

        // The smallest id makes the reported triangle independent of the map's iteration order.
        if let Some(tri_id) = edge_map
            .values()
            .filter(|adj| adj.1 == u32::MAX)
            .map(|adj| adj.0)
            .min()
        {
            return Err(ConvexPolyhedronError::NotClosed(tri_id));
        }

        for (face_id, face) in faces.iter().enumerate() {
            if points
                .iter()
                .any(|pt| face.signed_distance(pt) > eps * scale)
            {
                return Err(ConvexPolyhedronError::NotConvex(face_id as u32));
            }
        }

        Ok(ConvexPolyhedron { points, faces })
    }

    /// Creates the convex polyhedron of an axis-aligned box centered at the origin.
    pub fn cuboid(half_extents: Vector<Real>) -> ConvexPolyhedron {
        let he = half_extents.abs();
        let points = (0..8)
            .map(|i| {
                Point::new(
                    if i & 1 != 0 { he.x } else { -he.x },
                    if i & 2 != 0 { he.y } else { -he.y },
                    if i & 4 != 0 { he.z } else { -he.z },
                )
            })
            .collect();

        let mut faces = Vec::with_capacity(6);

        for axis in 0..3 {
            for sign in [1.0, -1.0] {
                let mut normal = Vector::zeros();
                normal[axis] = sign;

                faces.push(Face {
                    normal: Unit::new_unchecked(normal),
                    offset: he[axis],
                });
            }
        }

        ConvexPolyhedron { points, faces }
    }

    /// The vertices of this convex polyhedron.
    #[inline]
    pub fn points(&self) -> &[Point<Real>] {
        &self.points[..]
    }

    /// The faces of this convex polyhedron.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces[..]
    }

    /// Tests if the given point, expressed in the local-space of this polyhedron, is inside of it.
    pub fn contains_local_point(&self, pt: &Point<Real>) -> bool {
        self.faces.iter().all(|face| face.signed_distance(pt) <= 0.0)
    }
}

impl SupportMap for ConvexPolyhedron {
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        let mut best = self.points[0];
        let mut best_dot = best.coords.dot(dir);

        for pt in &self.points[1..] {
            let dot = pt.coords.dot(dir);

            if dot > best_dot {
                best = *pt;
                best_dot = dot;
            }
        }

        best
    }
}

// The normal of a triangle oriented counter-clockwise, or `None` if it is degenerate.
fn ccw_triangle_normal(points: &[Point<Real>], idx: &[u32; 3]) -> Option<UnitVector<Real>> {
    let a = points[idx[0] as usize];
    let ab = points[idx[1] as usize] - a;
    let ac = points[idx[2] as usize] - a;
    UnitVector::try_new(ab.cross(&ac), DEFAULT_EPSILON)
}
