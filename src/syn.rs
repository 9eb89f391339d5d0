//! Three-position synthesis of the hinge pivots.
//!
//! Rigid-body guided design: a coupler point transformed through three
//! lid poses traces a circular arc about its fixed pivot, so the pivot is
//! where the perpendicular bisectors of the chords converge.
use crate::geom::{coord, distance, pt, ORIENT_EPS};
use crate::hinge::{Joints, LinkLen};
use nalgebra as na;

/// How far a perpendicular bisector is extended to guarantee an
/// intersection within floating-point range.
const BISECTOR_REACH: f64 = 1000.;

/// Pivot-to-position residual reported as a warning past this, in
/// design-space units.
const RESIDUAL_TOL: f64 = 0.1;

/// One desired lid pose.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct LidPose {
    /// Lid center in world space.
    pub center: [f64; 2],
    /// Lid rotation in degrees.
    pub rotation: f64,
}

impl LidPose {
    /// Place a point given in the lid's local frame into world space.
    pub fn place(&self, local: [f64; 2]) -> [f64; 2] {
        let rot = na::UnitComplex::new(self.rotation.to_radians());
        coord(pt(self.center) + rot * na::Vector2::new(local[0], local[1]))
    }
}

/// Synthesis failure.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Copy, Clone)]
pub enum SynError {
    /// The transformed coupler positions are collinear, so the
    /// perpendicular bisectors never meet. No partial pivot is produced.
    #[error("the three poses leave a coupler point collinear, no pivot exists")]
    Degenerate,
}

/// Residual mismatch between a derived pivot and one coupler position.
///
/// The construction is exact in theory. A residual past tolerance means
/// the input poses are near-degenerate, not that synthesis failed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynWarning {
    /// 0 for the `B` track, 1 for the `C` track.
    pub track: usize,
    /// Pose index of the mismatch.
    pub pose: usize,
    /// Distance error in design-space units.
    pub residual: f64,
}

impl std::fmt::Display for SynWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "coupler track {} misses its pivot radius at pose {} by {:.3}",
            self.track, self.pose, self.residual
        )
    }
}

/// Derived hinge geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesis {
    /// Mechanism pose at the first, closed position: the fixed pivots
    /// plus the coupler points where they start. Ready to seed a
    /// [`Hinge`](crate::Hinge).
    pub closed: Joints,
    /// Pivot-to-position distance error per track and pose.
    pub residuals: [[f64; 3]; 2],
    /// Non-fatal consistency findings.
    pub warnings: Vec<SynWarning>,
}

impl Synthesis {
    /// Link lengths of the synthesized hinge.
    pub fn lengths(&self) -> LinkLen {
        self.closed.lengths()
    }

    /// Whether every coupler position sits on its pivot radius within
    /// tolerance.
    pub fn is_consistent(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Derive the fixed pivots from three lid poses and two coupler points
/// given in the local frame of the closed pose.
pub fn synthesize(poses: &[LidPose; 3], coupler: &[[f64; 2]; 2]) -> Result<Synthesis, SynError> {
    let place = |local: [f64; 2]| poses.each_ref().map(|pose| pose.place(local));
    synthesize_tracks(place(coupler[0]), place(coupler[1]))
}

/// Derive the fixed pivots from the world tracks of the two coupler
/// points across the three poses.
///
/// ```
/// use lid_bar::synthesize_tracks;
///
/// let b_track = [[5., 0.], [0., 5.], [-5., 0.]];
/// let c_track = [[15., 0.], [10., 5.], [5., 0.]];
/// let syn = synthesize_tracks(b_track, c_track)?;
/// assert!(syn.closed.a[0].hypot(syn.closed.a[1]) < 1e-9);
/// assert!((syn.closed.d[0] - 10.).abs() < 1e-9);
/// assert!(syn.is_consistent());
/// # Ok::<(), lid_bar::SynError>(())
/// ```
pub fn synthesize_tracks(
    b_track: [[f64; 2]; 3],
    c_track: [[f64; 2]; 3],
) -> Result<Synthesis, SynError> {
    let pivot_a = converge(&b_track)?;
    let pivot_d = converge(&c_track)?;
    let closed = Joints::new(pivot_a, b_track[0], c_track[0], pivot_d);
    let mut residuals = [[0.; 3]; 2];
    let mut warnings = Vec::new();
    for (track, (pivot, positions)) in [(pivot_a, &b_track), (pivot_d, &c_track)]
        .into_iter()
        .enumerate()
    {
        let radius = distance(pivot, positions[0]);
        for (pose, &p) in positions.iter().enumerate() {
            let residual = (distance(pivot, p) - radius).abs();
            residuals[track][pose] = residual;
            if residual > RESIDUAL_TOL {
                tracing::debug!(track, pose, residual, "pivot radius mismatch");
                warnings.push(SynWarning { track, pose, residual });
            }
        }
    }
    Ok(Synthesis { closed, residuals, warnings })
}

// Intersection of the perpendicular bisectors of the two consecutive
// chords, by the two-line determinant formula.
fn converge(track: &[[f64; 2]; 3]) -> Result<[f64; 2], SynError> {
    let [p1, p2, p3] = track.map(pt);
    let (m12, u) = bisector(p1, p2)?;
    let (m23, v) = bisector(p2, p3)?;
    let det = u.perp(&v);
    if det.abs() < ORIENT_EPS {
        return Err(SynError::Degenerate);
    }
    let t = (m23 - m12).perp(&v) / det;
    Ok(coord(m12 + t * u))
}

fn bisector(
    p: na::Point2<f64>,
    q: na::Point2<f64>,
) -> Result<(na::Point2<f64>, na::Vector2<f64>), SynError> {
    let chord = q - p;
    if chord.norm() < ORIENT_EPS {
        return Err(SynError::Degenerate);
    }
    let dir = na::Vector2::new(-chord.y, chord.x).normalize() * BISECTOR_REACH;
    Ok((na::center(&p, &q), dir))
}
