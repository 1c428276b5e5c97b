use gear_kernel::{GearError, GearSpec};
use serde::{Deserialize, Serialize};

/// Opaque handle to a mesh living in the host scene.
/// Valid only for the host session that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshHandle(pub u64);

/// Parameters of the host's piped-cylinder primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeParams {
    /// Circumferential subdivisions.
    pub subdivisions: u32,
    pub height: f64,
    pub radius: f64,
    pub thickness: f64,
}

impl From<&GearSpec> for PipeParams {
    fn from(spec: &GearSpec) -> Self {
        Self {
            subdivisions: spec.facet_count(),
            height: spec.height(),
            radius: spec.radius(),
            thickness: spec.thickness(),
        }
    }
}

/// A gear that now exists in the host scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealizedGear {
    pub name: String,
    pub mesh: MeshHandle,
}

/// Errors raised while driving a host.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    #[error("mesh not found: {handle:?}")]
    UnknownMesh { handle: MeshHandle },

    #[error("face {index} out of range (mesh has {face_count} faces)")]
    FaceOutOfRange { index: u32, face_count: u32 },

    #[error("extrusion requested with no faces selected")]
    EmptySelection,

    #[error(transparent)]
    Gear(#[from] GearError),

    #[error("host error: {message}")]
    Other { message: String },
}
