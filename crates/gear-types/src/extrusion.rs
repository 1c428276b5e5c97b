use serde::{Deserialize, Serialize};

/// One step of the tooth extrusion.
///
/// Stages apply cumulatively: each one pushes the face set produced by the
/// previous stage, never the base facets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtrusionStage {
    /// Distance moved along the face normal.
    pub offset: f64,
    /// Scale applied to the extruded faces across the normal (1.0 keeps size).
    pub lateral_scale: f64,
}

impl ExtrusionStage {
    pub fn new(offset: f64, lateral_scale: f64) -> Self {
        Self {
            offset,
            lateral_scale,
        }
    }
}
