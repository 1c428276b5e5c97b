//! Replays gear specs and trains against a host.
//!
//! The host call order is fixed: pipe, face selection, both extrusion
//! stages, tag, scale, rotation. Trains then translate each gear, bind its
//! rotation rule and apply the optional colour.

use gear_kernel::{four_gear_chain, AnimationSettings, GearChain, GearSpec, GearTrain};
use gear_types::Rgb;
use tracing::{debug, info, instrument};

use crate::traits::{GearHost, MeshHost};
use crate::types::{HostError, MeshHandle, PipeParams, RealizedGear};

/// Build one gear mesh named `name` from `spec`.
#[instrument(skip(host, spec), fields(teeth = spec.tooth_count()))]
pub fn realize_gear(
    host: &mut dyn MeshHost,
    name: &str,
    spec: &GearSpec,
) -> Result<MeshHandle, HostError> {
    let mesh = host.create_pipe(name, PipeParams::from(spec))?;

    let band = spec.tooth_faces();
    let face_count = host.face_count(mesh)?;
    if band.end >= face_count {
        return Err(HostError::FaceOutOfRange {
            index: band.end,
            face_count,
        });
    }
    let faces: Vec<u32> = band.iter().collect();
    host.select_faces(mesh, &faces)?;

    for stage in spec.stages() {
        host.extrude_selected(mesh, *stage)?;
    }

    host.tag(mesh, spec.tag())?;
    host.set_scale(mesh, spec.scale())?;
    host.set_rotation(mesh, spec.initial_rotation_degrees())?;

    debug!(?mesh, faces = faces.len(), "realized gear");
    Ok(mesh)
}

/// Build, place and animate every gear of `train`. Gears are named
/// `gear1`, `gear2`, ... in train order.
#[instrument(skip(host, train), fields(gears = train.len()))]
pub fn realize_train(
    host: &mut dyn GearHost,
    train: &GearTrain,
    color: Option<Rgb>,
) -> Result<Vec<RealizedGear>, HostError> {
    let mut realized = Vec::with_capacity(train.len());
    for (i, entry) in train.entries().iter().enumerate() {
        let name = format!("gear{}", i + 1);
        let mesh = realize_gear(host.as_mesh_host(), &name, &entry.spec)?;
        host.translate(mesh, entry.translation())?;
        host.bind_rotation(mesh, entry.driver())?;
        if let Some(color) = color {
            host.set_color(mesh, color)?;
        }
        realized.push(RealizedGear { name, mesh });
    }
    info!(gears = realized.len(), "realized gear train");
    Ok(realized)
}

/// Realize a chain with its colour applied to every gear.
pub fn realize_chain(
    host: &mut dyn GearHost,
    chain: &GearChain,
) -> Result<Vec<RealizedGear>, HostError> {
    realize_train(host, &chain.train, Some(chain.color))
}

/// Build the four-gear chain from user settings and realize it.
///
/// Settings that fail validation surface as [`HostError::Gear`] before any
/// host call is made.
#[instrument(skip(host))]
pub fn realize_settings(
    host: &mut dyn GearHost,
    settings: &AnimationSettings,
) -> Result<Vec<RealizedGear>, HostError> {
    let chain = four_gear_chain(settings)?;
    realize_chain(host, &chain)
}
