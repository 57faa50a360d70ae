use crate::math::{Point, Real};
use crate::query::gjk::{self, CSOPoint};
use arrayvec::ArrayVec;

/// The smallest sub-simplex supporting the projection of the origin, with the
/// barycentric coordinates of that projection.
#[derive(Clone, Debug)]
struct SubSimplex {
    vertices: ArrayVec<usize, 4>,
    coords: ArrayVec<Real, 4>,
}

impl SubSimplex {
    fn vertex(i: usize) -> Self {
        Self::from_parts(&[i], &[1.0])
    }

    fn edge(i: usize, j: usize, coords: [Real; 2]) -> Self {
        Self::from_parts(&[i, j], &coords)
    }

    fn face(i: usize, j: usize, k: usize, coords: [Real; 3]) -> Self {
        Self::from_parts(&[i, j, k], &coords)
    }

    fn from_parts(vertices: &[usize], coords: &[Real]) -> Self {
        SubSimplex {
            vertices: vertices.iter().copied().collect(),
            coords: coords.iter().copied().collect(),
        }
    }

    fn point(&self, pts: &[Point<Real>; 4]) -> Point<Real> {
        let mut res = Point::origin();
        for (vid, coord) in self.vertices.iter().zip(self.coords.iter()) {
            res.coords += pts[*vid].coords * *coord;
        }
        res
    }
}

fn project_origin_on_segment(pts: &[Point<Real>; 4], i: usize, j: usize) -> SubSimplex {
    let ab = pts[j] - pts[i];
    let sqlen = ab.norm_squared();

    if sqlen == 0.0 {
        return SubSimplex::vertex(i);
    }

    let t = -pts[i].coords.dot(&ab) / sqlen;

    if t <= 0.0 {
        SubSimplex::vertex(i)
    } else if t >= 1.0 {
        SubSimplex::vertex(j)
    } else {
        SubSimplex::edge(i, j, [1.0 - t, t])
    }
}

// Voronoï regions of a triangle, see "Real-Time Collision Detection", Ericson, §5.1.5.
fn project_origin_on_triangle(pts: &[Point<Real>; 4], i: usize, j: usize, k: usize) -> SubSimplex {
    let (a, b, c) = (pts[i], pts[j], pts[k]);
    let ab = b - a;
    let ac = c - a;

    let ap = -a.coords;
    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return SubSimplex::vertex(i);
    }

    let bp = -b.coords;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);
    if d3 >= 0.0 && d4 <= d3 {
        return SubSimplex::vertex(j);
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        return if d1 - d3 > 0.0 {
            let v = d1 / (d1 - d3);
            SubSimplex::edge(i, j, [1.0 - v, v])
        } else {
            SubSimplex::vertex(i)
        };
    }

    let cp = -c.coords;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);
    if d6 >= 0.0 && d5 <= d6 {
        return SubSimplex::vertex(k);
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        return if d2 - d6 > 0.0 {
            let w = d2 / (d2 - d6);
            SubSimplex::edge(i, k, [1.0 - w, w])
        } else {
            SubSimplex::vertex(i)
        };
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && d4 - d3 >= 0.0 && d5 - d6 >= 0.0 {
        let denom = (d4 - d3) + (d5 - d6);
        return if denom > 0.0 {
            let w = (d4 - d3) / denom;
            SubSimplex::edge(j, k, [1.0 - w, w])
        } else {
            SubSimplex::vertex(j)
        };
    }

    let sum = va + vb + vc;
    if sum <= 0.0 {
        // Flat triangle: the closest point lies on one of its edges.
        return [(i, j), (j, k), (k, i)]
            .iter()
            .map(|(e1, e2)| project_origin_on_segment(pts, *e1, *e2))
            .min_by(|s1, s2| {
                let d1 = s1.point(pts).coords.norm_squared();
                let d2 = s2.point(pts).coords.norm_squared();
                d1.partial_cmp(&d2).unwrap_or(core::cmp::Ordering::Equal)
            })
            .unwrap_or_else(|| SubSimplex::vertex(i));
    }

    let v = vb / sum;
    let w = vc / sum;
    SubSimplex::face(i, j, k, [1.0 - v - w, v, w])
}

// Returns `None` if the origin lies inside of the tetrahedron.
fn project_origin_on_tetrahedron(pts: &[Point<Real>; 4]) -> Option<SubSimplex> {
    const FACES: [(usize, usize, usize, usize); 4] =
        [(0, 1, 2, 3), (0, 3, 1, 2), (0, 2, 3, 1), (1, 3, 2, 0)];

    let mut best: Option<(Real, SubSimplex)> = None;

    for (i, j, k, l) in FACES {
        let a = pts[i];
        let ad = pts[l] - a;
        let n = (pts[j] - a).cross(&(pts[k] - a));
        let sign_origin = -a.coords.dot(&n);
        let sign_opposite = ad.dot(&n);
        let is_flat = sign_opposite.abs() <= gjk::eps_tol() * n.norm() * ad.norm();

        if is_flat || sign_origin * sign_opposite < 0.0 {
            let sub = project_origin_on_triangle(pts, i, j, k);
            let dist = sub.point(pts).coords.norm_squared();

            if best.as_ref().map_or(true, |(best_dist, _)| dist < *best_dist) {
                best = Some((dist, sub));
            }
        }
    }

    best.map(|(_, sub)| sub)
}

fn tetrahedron_barycentric_coordinates(pts: &[Point<Real>; 4]) -> [Real; 4] {
    let volume = |a: &Point<Real>, b: &Point<Real>, c: &Point<Real>, d: &Point<Real>| {
        (b - a).dot(&(c - a).cross(&(d - a)))
    };
    let o = Point::origin();
    let total = volume(&pts[0], &pts[1], &pts[2], &pts[3]);

    if total == 0.0 {
        return [0.25; 4];
    }

    [
        volume(&o, &pts[1], &pts[2], &pts[3]) / total,
        volume(&pts[0], &o, &pts[2], &pts[3]) / total,
        volume(&pts[0], &pts[1], &o, &pts[3]) / total,
        volume(&pts[0], &pts[1], &pts[2], &o) / total,
    ]
}

/// A simplex of dimension up to 3 using Voronoï regions for computing point projections.
#[derive(Clone, Debug)]
pub struct VoronoiSimplex {
    // prev_vertices[i] is the slot currently holding the i-th vertex of the previous simplex.
    prev_vertices: [usize; 4],
    prev_dim: usize,
    prev_proj: [Real; 4],

    vertices: [CSOPoint; 4],
    proj: [Real; 4],
    dim: usize,
}

impl Default for VoronoiSimplex {
    fn default() -> Self {
        Self::new()
    }
}

impl VoronoiSimplex {
    /// Creates a new empty simplex.
    pub fn new() -> VoronoiSimplex {
        VoronoiSimplex {
            prev_vertices: [0, 1, 2, 3],
            prev_dim: 0,
            prev_proj: [0.0; 4],
            vertices: [CSOPoint::origin(); 4],
            proj: [0.0; 4],
            dim: 0,
        }
    }

    /// Swap two vertices of this simplex.
    pub fn swap(&mut self, i1: usize, i2: usize) {
        self.vertices.swap(i1, i2);

        for slot in &mut self.prev_vertices {
            if *slot == i1 {
                *slot = i2;
            } else if *slot == i2 {
                *slot = i1;
            }
        }
    }

    /// Resets this simplex to a single point.
    pub fn reset(&mut self, pt: CSOPoint) {
        self.prev_dim = 0;
        self.dim = 0;
        self.prev_vertices = [0, 1, 2, 3];
        self.vertices[0] = pt;
        self.proj[0] = 1.0;
    }

    /// Add a point to this simplex.
    ///
    /// Returns `false` if the point is too close to a vertex already part of this simplex.
    pub fn add_point(&mut self, pt: CSOPoint) -> bool {
        self.prev_dim = self.dim;
        self.prev_proj = self.proj;
        self.prev_vertices = [0, 1, 2, 3];

        for i in 0..self.dim + 1 {
            if (self.vertices[i].point - pt.point).norm_squared() < gjk::eps_tol() {
                return false;
            }
        }

        self.dim += 1;
        self.vertices[self.dim] = pt;
        true
    }

    /// Retrieves the barycentric coordinate associated to the `i`-th by the last call to `project_origin_and_reduce`.
    pub fn proj_coord(&self, i: usize) -> Real {
        assert!(i <= self.dim, "Index out of bounds.");
        self.proj[i]
    }

    /// The i-th point of this simplex.
    pub fn point(&self, i: usize) -> &CSOPoint {
        assert!(i <= self.dim, "Index out of bounds.");
        &self.vertices[i]
    }

    /// Retrieves the barycentric coordinate associated to the `i`-th before the last call to `project_origin_and_reduce`.
    pub fn prev_proj_coord(&self, i: usize) -> Real {
        assert!(i <= self.prev_dim, "Index out of bounds.");
        self.prev_proj[i]
    }

    /// The i-th point of the simplex before the last call to `project_origin_and_reduce`.
    pub fn prev_point(&self, i: usize) -> &CSOPoint {
        assert!(i <= self.prev_dim, "Index out of bounds.");
        &self.vertices[self.prev_vertices[i]]
    }

    /// Projects the origin on the boundary of this simplex and reduces `self` the smallest subsimplex containing the origin.
    ///
    /// Returns the result of the projection or `Point::origin()` if the origin lies inside of the simplex.
    /// The state of the simplex before projection is saved, and can be retrieved using the methods prefixed
    /// by `prev_`.
    pub fn project_origin_and_reduce(&mut self) -> Point<Real> {
        let pts = [
            self.vertices[0].point,
            self.vertices[1].point,
            self.vertices[2].point,
            self.vertices[3].point,
        ];

        let sub = match self.dim {
            0 => {
                self.proj[0] = 1.0;
                return pts[0];
            }
            1 => project_origin_on_segment(&pts, 0, 1),
            2 => project_origin_on_triangle(&pts, 0, 1, 2),
            _ => match project_origin_on_tetrahedron(&pts) {
                Some(sub) => sub,
                None => {
                    self.proj = tetrahedron_barycentric_coordinates(&pts);
                    return Point::origin();
                }
            },
        };

        let proj = sub.point(&pts);
        self.reduce(&sub);
        proj
    }

    // Moves the vertices of `sub` to the first slots and drops the others.
    fn reduce(&mut self, sub: &SubSimplex) {
        // slots[s] is the pre-reduction index of the vertex at slot s.
        let mut slots = [0usize, 1, 2, 3];

        for (k, (vid, coord)) in sub.vertices.iter().zip(sub.coords.iter()).enumerate() {
            let s = slots.iter().position(|v| v == vid).unwrap_or(k);
            self.swap(k, s);
            slots.swap(k, s);
            self.proj[k] = *coord;
        }

        self.dim = sub.vertices.len() - 1;
    }

    /// The dimension of the smallest subspace that can contain this simplex.
    pub fn dimension(&self) -> usize {
        self.dim
    }

    /// The dimension of the simplex before the last call to `project_origin_and_reduce`.
    pub fn prev_dimension(&self) -> usize {
        self.prev_dim
    }
}
