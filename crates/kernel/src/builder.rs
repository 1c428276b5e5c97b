//! Gear spec construction.
//!
//! A gear starts life as a piped cylinder whose circumferential subdivision is
//! twice the tooth count. Every other facet of one band is pushed outward in
//! two stages (a short straight root, then a tapered tip); the facets skipped
//! in between stay behind as the valleys between teeth.

use gear_types::{ExtrusionStage, GearTag};
use nalgebra::Similarity3;
use serde::Serialize;
use tracing::{info, instrument};

use crate::error::{require_finite, require_positive, GearError};
use crate::transform;

/// Fewest teeth that still close into a gear.
pub const MIN_TEETH: u32 = 3;

/// Share of the tooth height taken by the root stage; the tip takes the rest.
const ROOT_SHARE: f64 = 0.2;
const TIP_SHARE: f64 = 0.8;
/// Lateral scale of the root stage (straight) and tip stage (tapered).
const ROOT_LATERAL_SCALE: f64 = 1.0;
const TIP_LATERAL_SCALE: f64 = 0.5;

/// Circumferential bands on the base pipe: outer wall, top cap, inner wall, bottom cap.
const PIPE_BANDS: u32 = 4;

/// The facet indices selected for tooth extrusion.
///
/// Indices run from `start` to `end` inclusive in steps of `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FaceBand {
    pub start: u32,
    pub end: u32,
    pub step: u32,
}

impl FaceBand {
    /// Band for a gear with `tooth_count` teeth: `[4n, 6n - 1]`, every other facet.
    ///
    /// The offset into the pipe's facet list follows the host primitive's
    /// default facet ordering. A different mesh representation needs its own band.
    fn for_teeth(tooth_count: u32) -> Self {
        Self {
            start: tooth_count * 4,
            end: tooth_count * 6 - 1,
            step: 2,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + use<> {
        (self.start..=self.end).step_by(self.step as usize)
    }

    pub fn len(&self) -> usize {
        ((self.end - self.start) / self.step + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn contains(&self, index: u32) -> bool {
        index >= self.start && index <= self.end && (index - self.start) % self.step == 0
    }
}

/// One facet to extrude, with the stages it goes through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExtrusionFace {
    pub index: u32,
    pub stages: [ExtrusionStage; 2],
}

/// Immutable, validated description of one gear.
///
/// Only [`GearSpecBuilder::build`] creates these, so every instance satisfies
/// `tooth_count >= 3` and positive dimensions and scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GearSpec {
    tooth_count: u32,
    height: f64,
    radius: f64,
    thickness: f64,
    tooth_height: f64,
    scale: f64,
    initial_rotation_degrees: f64,
    rotation_speed: f64,
    tooth_faces: FaceBand,
    stages: [ExtrusionStage; 2],
    tag: GearTag,
}

impl GearSpec {
    pub fn tooth_count(&self) -> u32 {
        self.tooth_count
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn tooth_height(&self) -> f64 {
        self.tooth_height
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn initial_rotation_degrees(&self) -> f64 {
        self.initial_rotation_degrees
    }

    pub fn rotation_speed(&self) -> f64 {
        self.rotation_speed
    }

    /// Circumferential subdivision of the base pipe.
    pub fn facet_count(&self) -> u32 {
        self.tooth_count * 2
    }

    /// Total facets on the base pipe before extrusion.
    pub fn base_face_count(&self) -> u32 {
        self.facet_count() * PIPE_BANDS
    }

    pub fn tooth_faces(&self) -> FaceBand {
        self.tooth_faces
    }

    /// Extrusion stages in the order they must be applied.
    pub fn stages(&self) -> &[ExtrusionStage; 2] {
        &self.stages
    }

    pub fn extrusion_faces(&self) -> impl Iterator<Item = ExtrusionFace> + '_ {
        self.tooth_faces.iter().map(move |index| ExtrusionFace {
            index,
            stages: self.stages,
        })
    }

    pub fn tag(&self) -> GearTag {
        self.tag
    }

    /// Base radius after scaling.
    pub fn effective_radius(&self) -> f64 {
        self.radius * self.scale
    }

    /// Scale and initial rotation of the realized mesh, before placement.
    pub fn local_transform(&self) -> Similarity3<f64> {
        transform::placement(self.scale, self.initial_rotation_degrees, [0.0; 3])
    }
}

/// Collects gear parameters and validates them into a [`GearSpec`].
///
/// `scale` defaults to 1 and the initial rotation to 0 degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct GearSpecBuilder {
    tooth_count: u32,
    height: f64,
    radius: f64,
    thickness: f64,
    tooth_height: f64,
    rotation_speed: f64,
    scale: f64,
    initial_rotation_degrees: f64,
}

impl GearSpecBuilder {
    pub fn new(
        tooth_count: u32,
        height: f64,
        radius: f64,
        thickness: f64,
        tooth_height: f64,
        rotation_speed: f64,
    ) -> Self {
        Self {
            tooth_count,
            height,
            radius,
            thickness,
            tooth_height,
            rotation_speed,
            scale: 1.0,
            initial_rotation_degrees: 0.0,
        }
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn initial_rotation(mut self, degrees: f64) -> Self {
        self.initial_rotation_degrees = degrees;
        self
    }

    pub fn rotation_speed(mut self, speed: f64) -> Self {
        self.rotation_speed = speed;
        self
    }

    #[instrument(skip(self), fields(teeth = self.tooth_count, radius = self.radius, scale = self.scale))]
    pub fn build(&self) -> Result<GearSpec, GearError> {
        let tooth_count = self.tooth_count;
        if tooth_count < MIN_TEETH {
            return Err(GearError::invalid("tooth_count", f64::from(tooth_count)));
        }
        // The pipe carries 8n facets; the band arithmetic must not wrap.
        if tooth_count.checked_mul(2 * PIPE_BANDS).is_none() {
            return Err(GearError::invalid("tooth_count", f64::from(tooth_count)));
        }
        let height = require_positive("height", self.height)?;
        let radius = require_positive("radius", self.radius)?;
        let thickness = require_positive("thickness", self.thickness)?;
        let tooth_height = require_positive("tooth_height", self.tooth_height)?;
        let scale = require_positive("scale", self.scale)?;
        if !(radius * scale).is_finite() {
            return Err(GearError::invalid("scale", scale));
        }
        let rotation_speed = require_finite("rotation_speed", self.rotation_speed)?;
        let initial_rotation_degrees =
            require_finite("initial_rotation_degrees", self.initial_rotation_degrees)?;

        let stages = [
            ExtrusionStage::new(tooth_height * ROOT_SHARE, ROOT_LATERAL_SCALE),
            ExtrusionStage::new(tooth_height * TIP_SHARE, TIP_LATERAL_SCALE),
        ];
        let tooth_faces = FaceBand::for_teeth(tooth_count);

        info!(
            facets = tooth_count * 2,
            band_start = tooth_faces.start,
            band_end = tooth_faces.end,
            "built gear spec"
        );

        Ok(GearSpec {
            tooth_count,
            height,
            radius,
            thickness,
            tooth_height,
            scale,
            initial_rotation_degrees,
            rotation_speed,
            tooth_faces,
            stages,
            tag: GearTag::new(radius, tooth_count),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference() -> GearSpecBuilder {
        GearSpecBuilder::new(20, 1.0, 10.0, 3.0, 0.5, 10.0)
    }

    #[test]
    fn test_reference_gear_geometry() {
        let spec = reference().build().unwrap();
        assert_eq!(spec.facet_count(), 40);
        assert_eq!(spec.base_face_count(), 160);
        assert_eq!(spec.tooth_faces(), FaceBand { start: 80, end: 119, step: 2 });
        let indices: Vec<u32> = spec.tooth_faces().iter().collect();
        assert_eq!(indices.len(), 20);
        assert_eq!(indices.first(), Some(&80));
        assert_eq!(indices.last(), Some(&118));
        assert!(indices.iter().all(|i| i % 2 == 0));
    }

    #[test]
    fn test_stages_split_tooth_height() {
        let spec = reference().build().unwrap();
        let [root, tip] = *spec.stages();
        assert_relative_eq!(root.offset, 0.1, epsilon = 1e-12);
        assert_relative_eq!(tip.offset, 0.4, epsilon = 1e-12);
        assert_eq!(root.lateral_scale, 1.0);
        assert_eq!(tip.lateral_scale, 0.5);
        assert_relative_eq!(root.offset + tip.offset, spec.tooth_height(), epsilon = 1e-12);
    }

    #[test]
    fn test_defaults_and_tag() {
        let spec = reference().build().unwrap();
        assert_eq!(spec.scale(), 1.0);
        assert_eq!(spec.initial_rotation_degrees(), 0.0);
        assert_eq!(spec.tag(), GearTag::new(10.0, 20));
    }

    #[test]
    fn test_tag_keeps_unscaled_radius() {
        let spec = reference().scale(0.4).build().unwrap();
        assert_eq!(spec.tag().gear_radius, 10.0);
        assert_relative_eq!(spec.effective_radius(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_extrusion_faces_carry_both_stages() {
        let spec = GearSpecBuilder::new(3, 1.0, 2.0, 0.5, 1.0, 1.0).build().unwrap();
        let faces: Vec<ExtrusionFace> = spec.extrusion_faces().collect();
        assert_eq!(faces.iter().map(|f| f.index).collect::<Vec<_>>(), vec![12, 14, 16]);
        assert!(faces.iter().all(|f| f.stages == *spec.stages()));
    }

    #[test]
    fn test_rejects_too_few_teeth() {
        let err = GearSpecBuilder::new(2, 1.0, 10.0, 3.0, 0.5, 10.0).build().unwrap_err();
        assert_eq!(err, GearError::InvalidParameter { field: "tooth_count", value: 2.0 });
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        let cases = [
            (GearSpecBuilder::new(20, 0.0, 10.0, 3.0, 0.5, 1.0), "height"),
            (GearSpecBuilder::new(20, 1.0, 0.0, 3.0, 0.5, 1.0), "radius"),
            (GearSpecBuilder::new(20, 1.0, 10.0, -3.0, 0.5, 1.0), "thickness"),
            (GearSpecBuilder::new(20, 1.0, 10.0, 3.0, 0.0, 1.0), "tooth_height"),
            (reference().scale(-1.0), "scale"),
            (reference().scale(0.0), "scale"),
            (reference().rotation_speed(f64::NAN), "rotation_speed"),
        ];
        for (builder, field) in cases {
            let err = builder.build().unwrap_err();
            assert_eq!(err.field(), field, "{builder:?}");
        }
    }

    #[test]
    fn test_rejects_tooth_count_that_overflows_band() {
        let err = GearSpecBuilder::new(u32::MAX / 4, 1.0, 10.0, 3.0, 0.5, 1.0)
            .build()
            .unwrap_err();
        assert_eq!(err.field(), "tooth_count");
    }

    #[test]
    fn test_rejects_scale_that_overflows_effective_radius() {
        let err = GearSpecBuilder::new(20, 1.0, 1e308, 1.0, 0.5, 1.0)
            .scale(10.0)
            .build()
            .unwrap_err();
        assert_eq!(err, GearError::InvalidParameter { field: "scale", value: 10.0 });
        assert!(GearSpecBuilder::new(20, 1.0, 1e308, 1.0, 0.5, 1.0).build().is_ok());
    }

    #[test]
    fn test_build_is_idempotent() {
        let builder = reference().scale(0.8).initial_rotation(180.0).rotation_speed(-10.0);
        assert_eq!(builder.build().unwrap(), builder.build().unwrap());
    }

    #[test]
    fn test_band_contains() {
        let band = FaceBand::for_teeth(20);
        assert!(band.contains(80));
        assert!(band.contains(118));
        assert!(!band.contains(81));
        assert!(!band.contains(120));
        assert!(!band.contains(78));
        assert!(!band.is_empty());
    }

    #[test]
    fn test_local_transform_scales_and_rotates() {
        let spec = reference().scale(0.5).initial_rotation(180.0).build().unwrap();
        let p = transform::apply(&spec.local_transform(), [10.0, 0.0, 0.0]);
        assert_relative_eq!(p[0], -5.0, epsilon = 1e-9);
        assert_relative_eq!(p[2], 0.0, epsilon = 1e-9);
    }
}
