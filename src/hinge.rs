//! Hinge mechanism types and the four-bar position solver.
use crate::bound::{find_bound, AngleBound};
use crate::geom::{circle_circle, distance, segments_intersect, Orient, RigidMotion};
use std::f64::consts::TAU;

/// Shortest link length the solver accepts.
///
/// A link below this has no defined rotation.
pub const MIN_LINK: f64 = 1.;

/// Named pivots of one full mechanism pose.
///
/// `a` and `d` are fixed on the base, `b` and `c` float on the lid. The
/// pose captured at the last user interaction is the *reference* pose: it
/// anchors the link lengths and the orientation signs every later solve
/// must preserve.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Joints {
    /// Fixed input pivot on the base.
    pub a: [f64; 2],
    /// Floating pivot joining the input link to the coupler.
    pub b: [f64; 2],
    /// Floating pivot joining the coupler to the output link.
    pub c: [f64; 2],
    /// Fixed output pivot on the base.
    pub d: [f64; 2],
}

impl Joints {
    /// Create a pose from the four pivot coordinates.
    pub const fn new(a: [f64; 2], b: [f64; 2], c: [f64; 2], d: [f64; 2]) -> Self {
        Self { a, b, c, d }
    }

    /// Link lengths of this pose.
    pub fn lengths(&self) -> LinkLen {
        LinkLen {
            ground: distance(self.a, self.d),
            input: distance(self.a, self.b),
            coupler: distance(self.b, self.c),
            output: distance(self.c, self.d),
        }
    }

    /// Bearing of the input link, the driven angle.
    pub fn input_angle(&self) -> f64 {
        (self.b[1] - self.a[1]).atan2(self.b[0] - self.a[0])
    }

    /// Whether the input and output links cross in the "X" configuration.
    pub fn is_crossed(&self) -> bool {
        segments_intersect(self.a, self.b, self.c, self.d)
    }

    /// Rigid motion carrying the lid from the reference pose to this pose.
    pub fn lid_motion(&self, rf: &Self) -> RigidMotion {
        RigidMotion::between([rf.b, rf.c], [self.b, self.c])
    }

    /// Carry body-fixed points, such as the lid outline, from the
    /// reference pose to this pose.
    pub fn carry(&self, rf: &Self, points: &[[f64; 2]]) -> Vec<[f64; 2]> {
        let motion = self.lid_motion(rf);
        points.iter().map(|&p| motion.apply(p)).collect()
    }
}

/// Rigid link lengths of the four-bar loop.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LinkLen {
    /// Fixed link `A-D` on the base.
    pub ground: f64,
    /// Driven link `A-B`.
    pub input: f64,
    /// Floating link `B-C`, carries the lid.
    pub coupler: f64,
    /// Link `C-D` closing the loop.
    pub output: f64,
}

impl LinkLen {
    /// Lengths as the planar loop `[ground, input, coupler, output]`.
    pub const fn planar_loop(&self) -> [f64; 4] {
        [self.ground, self.input, self.coupler, self.output]
    }

    /// Shortest link of the loop.
    pub fn min(&self) -> f64 {
        self.planar_loop().into_iter().fold(f64::INFINITY, f64::min)
    }
}

/// Validity policy for solved poses.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum LockMode {
    /// Keep the crossed configuration and the reference orientation signs.
    #[default]
    Locked,
    /// Accept any reachable solution, continuity only.
    Unlocked,
}

impl LockMode {
    /// Check if the crossed configuration is required.
    pub const fn is_locked(&self) -> bool {
        matches!(self, Self::Locked)
    }

    /// One-sided search limit for the motion range.
    ///
    /// Unlocked hinges may travel past a half-turn toward the straight
    /// configuration, so the search doubles its horizon.
    pub const fn search_limit(&self) -> f64 {
        match self {
            Self::Locked => TAU,
            Self::Unlocked => 2. * TAU,
        }
    }
}

/// Failure modes of the position solver.
///
/// Every variant means "no valid pose for this request". Callers treat
/// them as outside the mechanism's travel and keep the last shown pose.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Copy, Clone)]
pub enum SolveError {
    /// A link length fell below [`MIN_LINK`]. The reference pose must be
    /// re-anchored.
    #[error("degenerate linkage: a link is shorter than {MIN_LINK} unit")]
    DegenerateLinkage,
    /// The requested angle has no circle-intersection solution.
    #[error("input angle is outside the reachable travel")]
    Unreachable,
    /// The candidate pose broke the crossed configuration or flipped a
    /// link over a pivot.
    #[error("pose rejected by the locked-hinge configuration rules")]
    ConfigurationInvalid,
}

/// Solve the pose at `offset` radians from the reference input angle.
///
/// `last_c` is the continuity anchor owned by the caller: of two
/// intersection branches the one nearer to it wins, which keeps adjacent
/// steps from popping to the mirror solution. Without an anchor the
/// branch whose turn sign around `(D, B')` matches the reference
/// configuration is preferred; this first-frame choice is a heuristic,
/// not a law, and is covered by scenario fixtures only.
pub fn try_solve_angle(
    rf: &Joints,
    mode: LockMode,
    last_c: Option<[f64; 2]>,
    offset: f64,
) -> Result<Joints, SolveError> {
    let len = rf.lengths();
    if len.min() < MIN_LINK {
        return Err(SolveError::DegenerateLinkage);
    }
    let theta = rf.input_angle() + offset;
    let b = [
        rf.a[0] + len.input * theta.cos(),
        rf.a[1] + len.input * theta.sin(),
    ];
    let hits = circle_circle(b, len.coupler, rf.d, len.output);
    let c = match (hits.as_slice(), last_c) {
        (&[], _) => return Err(SolveError::Unreachable),
        (&[c], _) => c,
        (&[p, q, ..], Some(anchor)) => {
            if distance(p, anchor) <= distance(q, anchor) {
                p
            } else {
                q
            }
        }
        (&[p, q, ..], None) => {
            if Orient::of(rf.d, b, q) == Orient::of(rf.d, rf.b, rf.c) {
                q
            } else {
                p
            }
        }
    };
    let pose = Joints { a: rf.a, b, c, d: rf.d };
    if mode.is_locked() && !(pose.is_crossed() && keeps_orient(rf, &pose)) {
        return Err(SolveError::ConfigurationInvalid);
    }
    Ok(pose)
}

// Link AB must not cross over pivot D, nor link CD over pivot A. Triples
// that start collinear carry no sign to preserve.
fn keeps_orient(rf: &Joints, pose: &Joints) -> bool {
    !Orient::of(pose.a, pose.d, pose.b).flipped(Orient::of(rf.a, rf.d, rf.b))
        && !Orient::of(pose.c, pose.a, pose.d).flipped(Orient::of(rf.c, rf.a, rf.d))
}

/// [`try_solve_angle`] with failures collapsed to `None`.
///
/// Invalid angles are expected and frequent, every range-finder probe
/// passes through here, so the uniform no-pose signal is the primary
/// interface.
pub fn solve_angle(
    rf: &Joints,
    mode: LockMode,
    last_c: Option<[f64; 2]>,
    offset: f64,
) -> Option<Joints> {
    try_solve_angle(rf, mode, last_c, offset).ok()
}

/// A hinge anchored at a reference pose, threading the continuity state.
///
/// Owns the single piece of mutable solver state, the last valid coupler
/// joint. Speculative evaluations go through [`Hinge::peek`], which
/// leaves that state untouched.
#[derive(Clone, Debug)]
pub struct Hinge {
    rf: Joints,
    mode: LockMode,
    last_c: Option<[f64; 2]>,
}

impl Hinge {
    /// Anchor a hinge at a reference pose.
    pub fn new(rf: Joints, mode: LockMode) -> Result<Self, SolveError> {
        if rf.lengths().min() < MIN_LINK {
            return Err(SolveError::DegenerateLinkage);
        }
        Ok(Self { rf, mode, last_c: None })
    }

    /// The reference pose.
    pub const fn reference(&self) -> &Joints {
        &self.rf
    }

    /// The validity policy.
    pub const fn mode(&self) -> LockMode {
        self.mode
    }

    /// Switch the validity policy, keeping the anchor.
    pub fn set_mode(&mut self, mode: LockMode) {
        self.mode = mode;
    }

    /// Re-anchor at a new reference pose after a pivot edit.
    pub fn rebase(&mut self, rf: Joints) -> Result<(), SolveError> {
        if rf.lengths().min() < MIN_LINK {
            return Err(SolveError::DegenerateLinkage);
        }
        self.rf = rf;
        self.last_c = None;
        Ok(())
    }

    /// Solve and advance the continuity state on success.
    ///
    /// A failed solve leaves the state as it was, so the caller's shown
    /// pose never follows an invalid angle.
    pub fn drive(&mut self, offset: f64) -> Option<Joints> {
        let pose = self.peek(offset)?;
        self.last_c = Some(pose.c);
        Some(pose)
    }

    /// Solve without touching the continuity state.
    pub fn peek(&self, offset: f64) -> Option<Joints> {
        solve_angle(&self.rf, self.mode, self.last_c, offset)
    }

    /// Reachable input-angle interval around the reference pose.
    pub fn angle_bound(&self) -> AngleBound {
        find_bound(&self.rf, self.mode)
    }

    /// Drive to a 0 to 100 percent position of the reachable travel.
    pub fn at_percent(&mut self, pct: f64) -> Option<Joints> {
        let offset = self.angle_bound().at_percent(pct);
        self.drive(offset)
    }

    /// Trajectory over the reachable travel with `res` samples.
    ///
    /// Threads a private continuity snapshot, so the interactive state of
    /// the hinge is preserved.
    pub fn sweep(&self, res: usize) -> Vec<Joints> {
        let bound = self.angle_bound();
        let mut last_c = self.last_c;
        linspace(bound.min, bound.max, res)
            .filter_map(|t| {
                let pose = solve_angle(&self.rf, self.mode, last_c, t)?;
                last_c = Some(pose.c);
                Some(pose)
            })
            .collect()
    }
}

fn linspace(start: f64, end: f64, res: usize) -> impl Iterator<Item = f64> {
    let step = (end - start) / res.saturating_sub(1).max(1) as f64;
    (0..res).map(move |n| start + n as f64 * step)
}
