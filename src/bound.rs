//! Range-of-motion discovery for an anchored hinge.
use crate::hinge::{solve_angle, Joints, LockMode};

/// Iteration cap of the directional binary search.
const MAX_ITER: usize = 100;

/// Bracket width below which the search stops, in radians.
const PRECISION: f64 = 1e-4;

/// Reachable input-angle interval relative to the reference pose.
///
/// Zero is always inside: it reproduces the reference pose.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Copy, Clone, PartialEq, Default, Debug)]
pub struct AngleBound {
    /// Most negative reachable offset.
    pub min: f64,
    /// Most positive reachable offset.
    pub max: f64,
}

impl AngleBound {
    /// Width of the interval.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check an offset against the interval.
    pub fn contains(&self, offset: f64) -> bool {
        (self.min..=self.max).contains(&offset)
    }

    /// Map a 0 to 100 percent slider value linearly into the interval.
    pub fn at_percent(&self, pct: f64) -> f64 {
        self.min + pct.clamp(0., 100.) / 100. * self.span()
    }

    /// Inverse of [`AngleBound::at_percent`], for syncing a slider after
    /// a drag interaction.
    pub fn percent_of(&self, offset: f64) -> f64 {
        if self.span() < f64::EPSILON {
            return 0.;
        }
        ((offset - self.min) / self.span() * 100.).clamp(0., 100.)
    }
}

/// Find the contiguous interval of valid input-angle offsets around zero.
///
/// One binary search per direction: a solvable midpoint moves the valid
/// boundary outward, anything else moves the invalid boundary inward.
/// Assumes the solver is valid on a single interval around zero, which
/// holds for the physical mechanism whenever the reference pose itself is
/// valid. Callers recompute on every pivot edit, box-dimension change or
/// lock toggle.
///
/// Probes pass the reference coupler joint as their continuity anchor, so
/// no interactively-threaded state is touched by the search.
pub fn find_bound(rf: &Joints, mode: LockMode) -> AngleBound {
    let limit = mode.search_limit();
    let probe = |offset: f64| solve_angle(rf, mode, Some(rf.c), offset).is_some();
    let search = |dir: f64| {
        let mut best = 0.;
        let mut low = 0.;
        let mut high = dir * limit;
        for _ in 0..MAX_ITER {
            if (high - low).abs() < PRECISION {
                break;
            }
            let mid = 0.5 * (low + high);
            if probe(mid) {
                best = mid;
                low = mid;
            } else {
                high = mid;
            }
        }
        best
    };
    let bound = AngleBound { min: search(-1.), max: search(1.) };
    tracing::debug!(min = bound.min, max = bound.max, "angle bound");
    bound
}
