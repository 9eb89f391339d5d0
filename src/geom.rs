//! Planar geometry primitives shared by the solver and the synthesizer.
use nalgebra as na;

/// Cross products below this magnitude are treated as collinear.
///
/// Solved coupler positions sit exactly on crossing boundaries, so the
/// orientation test must absorb floating-point noise.
pub const ORIENT_EPS: f64 = 1e-10;

/// Half-chord tolerance deciding circle tangency.
const TANGENT_EPS: f64 = 1e-9;

pub(crate) fn pt([x, y]: [f64; 2]) -> na::Point2<f64> {
    na::Point2::new(x, y)
}

pub(crate) fn coord(p: na::Point2<f64>) -> [f64; 2] {
    [p.x, p.y]
}

/// Euclidean distance between two points.
pub fn distance([x1, y1]: [f64; 2], [x2, y2]: [f64; 2]) -> f64 {
    (x2 - x1).hypot(y2 - y1)
}

/// Turn direction of an ordered point triple.
///
/// Used as a discrete invariant: a sign change between two poses means a
/// link crossed over a pivot.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Orient {
    /// The triple lies on one line.
    Collinear,
    /// Clockwise turn.
    Cw,
    /// Counterclockwise turn.
    Ccw,
}

impl Orient {
    /// Classify `(p, q, r)` by the sign of `(q - p) × (r - q)`.
    pub fn of(p: [f64; 2], q: [f64; 2], r: [f64; 2]) -> Self {
        let cross = (q[0] - p[0]) * (r[1] - q[1]) - (q[1] - p[1]) * (r[0] - q[0]);
        if cross.abs() < ORIENT_EPS {
            Self::Collinear
        } else if cross > 0. {
            Self::Ccw
        } else {
            Self::Cw
        }
    }

    /// Return true if both sides carry a sign and the signs disagree.
    pub fn flipped(self, rhs: Self) -> bool {
        self != Self::Collinear && rhs != Self::Collinear && self != rhs
    }
}

fn on_segment(p: [f64; 2], q: [f64; 2], r: [f64; 2]) -> bool {
    q[0] <= p[0].max(r[0])
        && q[0] >= p[0].min(r[0])
        && q[1] <= p[1].max(r[1])
        && q[1] >= p[1].min(r[1])
}

/// Test whether segment `p1q1` intersects segment `p2q2`.
///
/// Orientation test plus the collinear-overlap special cases.
pub fn segments_intersect(p1: [f64; 2], q1: [f64; 2], p2: [f64; 2], q2: [f64; 2]) -> bool {
    let o1 = Orient::of(p1, q1, p2);
    let o2 = Orient::of(p1, q1, q2);
    let o3 = Orient::of(p2, q2, p1);
    let o4 = Orient::of(p2, q2, q1);
    if o1 != o2 && o3 != o4 {
        return true;
    }
    o1 == Orient::Collinear && on_segment(p1, p2, q1)
        || o2 == Orient::Collinear && on_segment(p1, q2, q1)
        || o3 == Orient::Collinear && on_segment(p2, p1, q2)
        || o4 == Orient::Collinear && on_segment(p2, q1, q2)
}

/// Intersection points of two circles.
///
/// Empty when the circles are disjoint, one contains the other, or they
/// are concentric; one point at tangency; two points otherwise. An empty
/// result is the geometric encoding of an unreachable rigid pose.
pub fn circle_circle(c1: [f64; 2], r1: f64, c2: [f64; 2], r2: f64) -> Vec<[f64; 2]> {
    let v = pt(c2) - pt(c1);
    let d = v.norm();
    if d < ORIENT_EPS || d > r1 + r2 + TANGENT_EPS || d < (r1 - r2).abs() - TANGENT_EPS {
        return Vec::new();
    }
    let a = (r1 * r1 - r2 * r2 + d * d) / (2. * d);
    let h2 = r1 * r1 - a * a;
    let u = v / d;
    let m = pt(c1) + a * u;
    if h2.abs() <= TANGENT_EPS {
        return vec![coord(m)];
    }
    let h = h2.sqrt();
    let perp = na::Vector2::new(-u.y, u.x);
    vec![coord(m + h * perp), coord(m - h * perp)]
}

/// Rotation plus translation mapping one reference point pair onto
/// another.
///
/// Derived by comparing the bearing of each pair's connecting segment and
/// the displacement of the midpoints. Lets callers carry any body-fixed
/// point, such as the lid outline, along with the solved coupler joints.
#[derive(Debug, Clone)]
pub struct RigidMotion {
    rot: na::UnitComplex<f64>,
    from_mid: na::Point2<f64>,
    to_mid: na::Point2<f64>,
}

impl RigidMotion {
    /// Derive the motion taking the segment `from` onto the segment `to`.
    pub fn between(from: [[f64; 2]; 2], to: [[f64; 2]; 2]) -> Self {
        let [f1, f2] = from.map(pt);
        let [t1, t2] = to.map(pt);
        let bearing = |p: na::Point2<f64>, q: na::Point2<f64>| (q.y - p.y).atan2(q.x - p.x);
        Self {
            rot: na::UnitComplex::new(bearing(t1, t2) - bearing(f1, f2)),
            from_mid: na::center(&f1, &f2),
            to_mid: na::center(&t1, &t2),
        }
    }

    /// Rotation angle in radians.
    pub fn angle(&self) -> f64 {
        self.rot.angle()
    }

    /// Apply the motion to a point.
    pub fn apply(&self, p: [f64; 2]) -> [f64; 2] {
        coord(self.to_mid + self.rot * (pt(p) - self.from_mid))
    }
}
