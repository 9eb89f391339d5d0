//! Box-dimension configuration and the import/export record.
use crate::hinge::Joints;

/// Outer dimensions of the box the hinge is mounted in.
///
/// Only drives default and reset pivot placement. The solver math never
/// reads it.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxDim {
    /// Outer width.
    pub width: f64,
    /// Height of the base body.
    pub base_height: f64,
    /// Height of the lid body.
    pub lid_height: f64,
    /// Clearance between lid and base in the closed position.
    pub lid_gap: f64,
}

impl Default for BoxDim {
    fn default() -> Self {
        Self {
            width: 600.,
            base_height: 150.,
            lid_height: 450.,
            lid_gap: 50.,
        }
    }
}

impl BoxDim {
    /// Vertical position of the base's top edge, where the fixed pivots
    /// sit.
    pub fn base_top(&self) -> f64 {
        self.lid_height + self.lid_gap
    }

    /// Canonical pivot placement for these dimensions.
    ///
    /// Fixed pivots on the base top edge, floating pivots on the lid
    /// bottom edge, spread so the input and output links cross.
    pub fn default_joints(&self) -> Joints {
        let w = self.width;
        let base = self.base_top();
        let lid = self.lid_height;
        Joints::new(
            [w * 5. / 12., base],
            [w * 5. / 6., lid],
            [w / 2., lid],
            [w * 11. / 12., base],
        )
    }
}

/// Round-trippable snapshot of a hinge setup: the box dimensions plus the
/// four pivot coordinates.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HingeConf {
    /// Box dimensions.
    pub dim: BoxDim,
    /// Current pivot positions.
    pub joints: Joints,
}

impl Default for HingeConf {
    fn default() -> Self {
        Self::from_dim(BoxDim::default())
    }
}

impl HingeConf {
    /// Build a configuration with the canonical placement for `dim`.
    pub fn from_dim(dim: BoxDim) -> Self {
        Self { joints: dim.default_joints(), dim }
    }
}
