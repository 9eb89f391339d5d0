//! Lid🔗bar is a kinematic solver and a synthesizing tool for
//! antiparallelogram (crossed four-bar) box-lid hinges.
//!
//! The crate is the pure core behind a lid-hinge designer. Rendering,
//! slider wiring and drag handling are collaborators that feed pivot
//! coordinates in and receive plain geometric results back.
//!
//! + Position solving with branch continuity ([`solve_angle`], [`Hinge`])
//! + Range-of-motion discovery ([`find_bound`])
//! + Three-position pivot synthesis ([`synthesize`])
//!
//! ```
//! use lid_bar::{BoxDim, Hinge, LockMode};
//!
//! let joints = BoxDim::default().default_joints();
//! let mut hinge = Hinge::new(joints, LockMode::Locked)?;
//! let bound = hinge.angle_bound();
//! assert!(bound.min <= 0. && bound.max >= 0.);
//! // Animate by mapping a slider percentage into the reachable travel.
//! let pose = hinge.at_percent(50.).expect("mid travel is reachable");
//! assert!(pose.is_crossed());
//! # Ok::<(), lid_bar::SolveError>(())
//! ```
#![warn(missing_docs)]
pub use crate::bound::*;
pub use crate::conf::*;
pub use crate::geom::*;
pub use crate::hinge::*;
pub use crate::syn::*;

mod bound;
mod conf;
mod geom;
mod hinge;
mod syn;
