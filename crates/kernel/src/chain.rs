//! Chains of meshing gears built from one template.

use gear_types::Rgb;
use tracing::instrument;

use crate::animation::AnimationSettings;
use crate::builder::{GearSpec, GearSpecBuilder};
use crate::error::GearError;
use crate::layout::{layout, GearTrain, DEFAULT_GAP};

/// Phase given to every other gear so teeth interleave at rest.
pub const INTERLEAVE_PHASE: f64 = 180.0;

/// Scales of the four-gear reference chain, largest first.
pub const REFERENCE_SCALES: [f64; 4] = [1.0, 0.8, 0.6, 0.4];

/// A laid-out train together with how it should be shown.
#[derive(Debug, Clone, PartialEq)]
pub struct GearChain {
    pub train: GearTrain,
    pub color: Rgb,
    pub duration: f64,
}

/// Build one gear per scale from `template`, alternating direction and phase.
///
/// Even positions spin at `speed` with a zero phase; odd positions get the
/// negated speed and [`INTERLEAVE_PHASE`].
pub fn alternating_chain(
    template: &GearSpecBuilder,
    scales: &[f64],
    speed: f64,
    gap: f64,
) -> Result<GearTrain, GearError> {
    let specs = scales
        .iter()
        .enumerate()
        .map(|(i, &scale)| {
            let (speed, phase) = if i % 2 == 0 {
                (speed, 0.0)
            } else {
                (-speed, INTERLEAVE_PHASE)
            };
            template
                .clone()
                .scale(scale)
                .rotation_speed(speed)
                .initial_rotation(phase)
                .build()
        })
        .collect::<Result<Vec<GearSpec>, GearError>>()?;
    layout(specs, gap)
}

/// The four-gear chain: 20 teeth, height 1, radius 10, thickness 3, tooth
/// height 0.5, scales 1.0 to 0.4, gap 0.2.
#[instrument]
pub fn four_gear_chain(settings: &AnimationSettings) -> Result<GearChain, GearError> {
    settings.validate()?;
    let template = GearSpecBuilder::new(20, 1.0, 10.0, 3.0, 0.5, settings.rotation_speed);
    let train = alternating_chain(
        &template,
        &REFERENCE_SCALES,
        settings.rotation_speed,
        DEFAULT_GAP,
    )?;
    Ok(GearChain {
        train,
        color: settings.color,
        duration: settings.duration,
    })
}
