//! RecordingHost — deterministic test double implementing MeshHost + AnimationHost.
//!
//! Models the piped cylinder's facet layout closely enough to check face
//! selections: four bands of `subdivisions` facets each, and every extruded
//! face adding four side faces. Every call is appended to an operation log.

use std::collections::HashMap;

use gear_kernel::RotationDriver;
use gear_types::{ExtrusionStage, GearTag, Rgb};

use crate::traits::{AnimationHost, MeshHost};
use crate::types::{HostError, MeshHandle, PipeParams};

/// Circumferential bands of the piped cylinder: outer wall, top, inner wall, bottom.
const PIPE_BANDS: u32 = 4;
/// Side faces created around each extruded quad.
const SIDES_PER_EXTRUDED_FACE: u32 = 4;

/// One call received by the host, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum HostOp {
    CreatePipe { name: String, params: PipeParams },
    SelectFaces { mesh: MeshHandle, count: usize },
    Extrude { mesh: MeshHandle, stage: ExtrusionStage },
    Tag { mesh: MeshHandle, tag: GearTag },
    SetScale { mesh: MeshHandle, scale: f64 },
    SetRotation { mesh: MeshHandle, degrees: f64 },
    Translate { mesh: MeshHandle, offset: [f64; 3] },
    BindRotation { mesh: MeshHandle, expression: String },
    SetColor { mesh: MeshHandle, color: Rgb },
}

/// Everything the host knows about one mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedMesh {
    pub name: String,
    pub pipe: PipeParams,
    pub face_count: u32,
    pub selection: Vec<u32>,
    pub extrusions: Vec<ExtrusionStage>,
    pub tag: Option<GearTag>,
    pub scale: f64,
    pub rotation: f64,
    pub translation: [f64; 3],
    pub rotation_driver: Option<RotationDriver>,
    pub expression: Option<String>,
    pub color: Option<Rgb>,
}

impl RecordedMesh {
    /// Total distance the selected faces have moved out from the base.
    pub fn extruded_depth(&self) -> f64 {
        self.extrusions.iter().map(|s| s.offset).sum()
    }
}

/// In-memory host that records every call.
#[derive(Debug, Default)]
pub struct RecordingHost {
    next_handle: u64,
    meshes: HashMap<u64, RecordedMesh>,
    log: Vec<HostOp>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mesh(&self, handle: MeshHandle) -> Option<&RecordedMesh> {
        self.meshes.get(&handle.0)
    }

    /// First mesh with the given name.
    pub fn find(&self, name: &str) -> Option<&RecordedMesh> {
        let mut handles: Vec<&u64> = self.meshes.keys().collect();
        handles.sort();
        handles
            .into_iter()
            .filter_map(|h| self.meshes.get(h))
            .find(|m| m.name == name)
    }

    /// Meshes whose tag matches, like a host-side attribute query.
    pub fn query_tagged(&self, teeth: u32) -> Vec<&RecordedMesh> {
        let mut found: Vec<(&u64, &RecordedMesh)> = self
            .meshes
            .iter()
            .filter(|(_, m)| m.tag.is_some_and(|t| t.teeth == teeth))
            .collect();
        found.sort_by_key(|(h, _)| **h);
        found.into_iter().map(|(_, m)| m).collect()
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn log(&self) -> &[HostOp] {
        &self.log
    }

    fn alloc_handle(&mut self) -> MeshHandle {
        self.next_handle += 1;
        MeshHandle(self.next_handle)
    }

    fn mesh_mut(&mut self, handle: MeshHandle) -> Result<&mut RecordedMesh, HostError> {
        self.meshes
            .get_mut(&handle.0)
            .ok_or(HostError::UnknownMesh { handle })
    }
}

impl MeshHost for RecordingHost {
    fn create_pipe(&mut self, name: &str, params: PipeParams) -> Result<MeshHandle, HostError> {
        if params.subdivisions < 3 {
            return Err(HostError::Other {
                message: format!("pipe needs at least 3 subdivisions, got {}", params.subdivisions),
            });
        }
        let handle = self.alloc_handle();
        self.meshes.insert(
            handle.0,
            RecordedMesh {
                name: name.to_string(),
                pipe: params,
                face_count: params.subdivisions * PIPE_BANDS,
                selection: Vec::new(),
                extrusions: Vec::new(),
                tag: None,
                scale: 1.0,
                rotation: 0.0,
                translation: [0.0; 3],
                rotation_driver: None,
                expression: None,
                color: None,
            },
        );
        self.log.push(HostOp::CreatePipe {
            name: name.to_string(),
            params,
        });
        Ok(handle)
    }

    fn face_count(&self, mesh: MeshHandle) -> Result<u32, HostError> {
        self.mesh(mesh)
            .map(|m| m.face_count)
            .ok_or(HostError::UnknownMesh { handle: mesh })
    }

    fn select_faces(&mut self, mesh: MeshHandle, faces: &[u32]) -> Result<(), HostError> {
        let recorded = self.mesh_mut(mesh)?;
        if let Some(&index) = faces.iter().find(|&&i| i >= recorded.face_count) {
            return Err(HostError::FaceOutOfRange {
                index,
                face_count: recorded.face_count,
            });
        }
        recorded.selection = faces.to_vec();
        self.log.push(HostOp::SelectFaces {
            mesh,
            count: faces.len(),
        });
        Ok(())
    }

    fn extrude_selected(
        &mut self,
        mesh: MeshHandle,
        stage: ExtrusionStage,
    ) -> Result<(), HostError> {
        let recorded = self.mesh_mut(mesh)?;
        if recorded.selection.is_empty() {
            return Err(HostError::EmptySelection);
        }
        recorded.face_count += recorded.selection.len() as u32 * SIDES_PER_EXTRUDED_FACE;
        recorded.extrusions.push(stage);
        self.log.push(HostOp::Extrude { mesh, stage });
        Ok(())
    }

    fn tag(&mut self, mesh: MeshHandle, tag: GearTag) -> Result<(), HostError> {
        self.mesh_mut(mesh)?.tag = Some(tag);
        self.log.push(HostOp::Tag { mesh, tag });
        Ok(())
    }

    fn set_scale(&mut self, mesh: MeshHandle, scale: f64) -> Result<(), HostError> {
        self.mesh_mut(mesh)?.scale = scale;
        self.log.push(HostOp::SetScale { mesh, scale });
        Ok(())
    }

    fn set_rotation(&mut self, mesh: MeshHandle, degrees: f64) -> Result<(), HostError> {
        self.mesh_mut(mesh)?.rotation = degrees;
        self.log.push(HostOp::SetRotation { mesh, degrees });
        Ok(())
    }
}

impl AnimationHost for RecordingHost {
    fn translate(&mut self, mesh: MeshHandle, offset: [f64; 3]) -> Result<(), HostError> {
        self.mesh_mut(mesh)?.translation = offset;
        self.log.push(HostOp::Translate { mesh, offset });
        Ok(())
    }

    fn bind_rotation(
        &mut self,
        mesh: MeshHandle,
        driver: RotationDriver,
    ) -> Result<(), HostError> {
        let recorded = self.mesh_mut(mesh)?;
        let expression = driver.expression(&recorded.name);
        recorded.rotation_driver = Some(driver);
        recorded.expression = Some(expression.clone());
        self.log.push(HostOp::BindRotation { mesh, expression });
        Ok(())
    }

    fn set_color(&mut self, mesh: MeshHandle, color: Rgb) -> Result<(), HostError> {
        self.mesh_mut(mesh)?.color = Some(color);
        self.log.push(HostOp::SetColor { mesh, color });
        Ok(())
    }
}
