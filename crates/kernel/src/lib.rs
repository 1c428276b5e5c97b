//! Host-independent construction of helical gear descriptions and gear trains.
//!
//! [`GearSpecBuilder`] turns gear parameters into a [`GearSpec`]: the base pipe
//! dimensions, the band of facets to extrude into teeth, the two extrusion
//! stages and the final scale/rotation. [`layout`] places a sequence of specs
//! along an axis so neighbours sit tangent plus a gap, and attaches the
//! per-gear rotation parameters. Nothing here talks to a 3D engine; the
//! `gear-host` crate replays the results against one.

pub mod animation;
pub mod builder;
pub mod chain;
pub mod error;
pub mod layout;
pub mod transform;

pub use animation::{AnimationSettings, RotationDriver, SettingsError, TrainSample};
pub use builder::{ExtrusionFace, FaceBand, GearSpec, GearSpecBuilder};
pub use chain::{alternating_chain, four_gear_chain, GearChain};
pub use error::GearError;
pub use layout::{layout, layout_with, GearTrain, LayoutConfig, TrainEntry};

/// Tolerance used for floating-point comparisons of lengths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Lengths closer than this are considered equal.
    pub coincidence: f64,
    /// Relative difference below which two lengths are considered equal.
    pub relative: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            coincidence: 1e-9,
            relative: 1e-12,
        }
    }
}

impl Tolerance {
    pub fn lengths_equal(&self, a: f64, b: f64) -> bool {
        approx::relative_eq!(a, b, epsilon = self.coincidence, max_relative = self.relative)
    }
}
