use gear_kernel::RotationDriver;
use gear_types::{ExtrusionStage, GearTag, Rgb};

use crate::types::{HostError, MeshHandle, PipeParams};

/// Mesh construction side of a 3D application.
pub trait MeshHost {
    /// Create a piped cylinder named `name`.
    fn create_pipe(&mut self, name: &str, params: PipeParams) -> Result<MeshHandle, HostError>;

    /// Number of faces the mesh currently has.
    fn face_count(&self, mesh: MeshHandle) -> Result<u32, HostError>;

    /// Replace the current selection with the given faces.
    fn select_faces(&mut self, mesh: MeshHandle, faces: &[u32]) -> Result<(), HostError>;

    /// Extrude the selected faces. The selection follows the extruded faces,
    /// so a second call continues from where the first stopped.
    fn extrude_selected(&mut self, mesh: MeshHandle, stage: ExtrusionStage)
        -> Result<(), HostError>;

    /// Attach queryable gear metadata to the mesh.
    fn tag(&mut self, mesh: MeshHandle, tag: GearTag) -> Result<(), HostError>;

    fn set_scale(&mut self, mesh: MeshHandle, scale: f64) -> Result<(), HostError>;

    /// Set the rotation about the vertical axis, in degrees.
    fn set_rotation(&mut self, mesh: MeshHandle, degrees: f64) -> Result<(), HostError>;
}

/// Placement and animation side of a 3D application.
pub trait AnimationHost {
    fn translate(&mut self, mesh: MeshHandle, offset: [f64; 3]) -> Result<(), HostError>;

    /// Bind a persistent, every-frame rotation rule to the mesh.
    fn bind_rotation(&mut self, mesh: MeshHandle, driver: RotationDriver)
        -> Result<(), HostError>;

    fn set_color(&mut self, mesh: MeshHandle, color: Rgb) -> Result<(), HostError>;
}

/// Both halves on one object, for drivers that need the whole pipeline.
pub trait GearHost: MeshHost + AnimationHost {
    fn as_mesh_host(&mut self) -> &mut dyn MeshHost;
}

impl<T: MeshHost + AnimationHost> GearHost for T {
    fn as_mesh_host(&mut self) -> &mut dyn MeshHost {
        self
    }
}
