//! Gear train layout.
//!
//! Gears are chained along one axis so that each pair of neighbours is
//! exactly tangent plus a fixed gap, whatever their individual scales.

use gear_types::LayoutAxis;
use nalgebra::Similarity3;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::animation::RotationDriver;
use crate::builder::GearSpec;
use crate::error::{require_non_negative, GearError};
use crate::{transform, Tolerance};

/// Default clearance between neighbouring gears.
pub const DEFAULT_GAP: f64 = 0.2;

/// Parameters for [`layout_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Clearance left between the rims of neighbouring gears.
    pub gap: f64,
    /// Axis the gears are strung along.
    pub axis: LayoutAxis,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP,
            axis: LayoutAxis::X,
        }
    }
}

/// One gear of a train, with its placement and animation parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainEntry {
    pub spec: GearSpec,
    /// Distance from the first gear's centre along the layout axis.
    pub position: f64,
    /// Degrees per unit time; the sign gives the direction.
    pub angular_velocity: f64,
    /// Angle at time zero, in degrees.
    pub phase: f64,
    axis: LayoutAxis,
}

impl TrainEntry {
    pub fn effective_radius(&self) -> f64 {
        self.spec.effective_radius()
    }

    pub fn driver(&self) -> RotationDriver {
        RotationDriver::new(self.phase, self.angular_velocity)
    }

    /// World offset of this gear's centre.
    pub fn translation(&self) -> [f64; 3] {
        self.axis.offset(self.position)
    }

    /// Full placement at time `t`: scale, rotation at `t`, then translation.
    pub fn transform_at(&self, t: f64) -> Similarity3<f64> {
        transform::placement(
            self.spec.scale(),
            self.driver().angle_at(t),
            self.translation(),
        )
    }
}

/// An immutable, laid-out sequence of gears.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GearTrain {
    entries: Vec<TrainEntry>,
    gap: f64,
    axis: LayoutAxis,
}

impl GearTrain {
    pub fn entries(&self) -> &[TrainEntry] {
        &self.entries
    }

    pub fn gap(&self) -> f64 {
        self.gap
    }

    pub fn axis(&self) -> LayoutAxis {
        self.axis
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn positions(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.position).collect()
    }

    /// Whether every neighbouring pair spins in opposite directions.
    ///
    /// A stationary gear (zero velocity) never counts as counter-rotating.
    pub fn counter_rotates(&self) -> bool {
        self.entries
            .windows(2)
            .all(|pair| pair[0].angular_velocity * pair[1].angular_velocity < 0.0)
    }

    /// Re-verify that neighbours sit tangent plus `gap`.
    ///
    /// Returns the index of the first entry whose distance to its predecessor is off.
    pub fn check_spacing(&self, tol: &Tolerance) -> Result<(), usize> {
        for (i, pair) in self.entries.windows(2).enumerate() {
            let step = pair[0].effective_radius() + pair[1].effective_radius() + self.gap;
            // Compare absolute positions so the tolerance scales with distance from the origin.
            if !tol.lengths_equal(pair[1].position, pair[0].position + step) {
                return Err(i + 1);
            }
        }
        Ok(())
    }
}

/// Lay out `specs` along the X axis with `gap` between neighbouring rims.
pub fn layout(
    specs: impl IntoIterator<Item = GearSpec>,
    gap: f64,
) -> Result<GearTrain, GearError> {
    layout_with(
        specs,
        &LayoutConfig {
            gap,
            ..LayoutConfig::default()
        },
    )
}

/// Lay out `specs` in order: the first gear at 0, each following gear one
/// radius-plus-radius-plus-gap further along the axis.
#[instrument(skip(specs))]
pub fn layout_with(
    specs: impl IntoIterator<Item = GearSpec>,
    config: &LayoutConfig,
) -> Result<GearTrain, GearError> {
    let gap = require_non_negative("gap", config.gap)?;
    let specs: Vec<GearSpec> = specs.into_iter().collect();
    if specs.is_empty() {
        return Err(GearError::invalid("specs", 0.0));
    }

    let mut entries = Vec::with_capacity(specs.len());
    let mut position = 0.0;
    let mut previous_radius: Option<f64> = None;
    for spec in specs {
        let radius = spec.effective_radius();
        if let Some(prev) = previous_radius {
            position += prev + radius + gap;
            if !position.is_finite() {
                return Err(GearError::invalid("position", position));
            }
        }
        previous_radius = Some(radius);

        debug!(
            index = entries.len(),
            position,
            radius,
            velocity = spec.rotation_speed(),
            "placed gear"
        );
        entries.push(TrainEntry {
            angular_velocity: spec.rotation_speed(),
            phase: spec.initial_rotation_degrees(),
            position,
            axis: config.axis,
            spec,
        });
    }

    let train = GearTrain {
        entries,
        gap,
        axis: config.axis,
    };
    if !train.counter_rotates() {
        warn!("neighbouring gears do not counter-rotate; meshing teeth would bind");
    }
    info!(gears = train.len(), span = position, "laid out gear train");
    Ok(train)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GearSpecBuilder;
    use approx::assert_relative_eq;

    fn gear(scale: f64, speed: f64) -> GearSpec {
        GearSpecBuilder::new(20, 1.0, 10.0, 3.0, 0.5, speed)
            .scale(scale)
            .build()
            .unwrap()
    }

    #[test]
    fn test_single_gear_at_origin() {
        let train = layout([gear(1.0, 10.0)], DEFAULT_GAP).unwrap();
        assert_eq!(train.positions(), vec![0.0]);
        assert!(train.counter_rotates());
    }

    #[test]
    fn test_four_gear_positions() {
        let specs = [(1.0, 10.0), (0.8, -10.0), (0.6, 10.0), (0.4, -10.0)]
            .map(|(s, v)| gear(s, v));
        let train = layout(specs, 0.2).unwrap();
        let expected = [0.0, 18.2, 32.4, 42.6];
        for (actual, expected) in train.positions().iter().zip(expected) {
            assert_relative_eq!(*actual, expected, epsilon = 1e-9);
        }
        assert!(train.check_spacing(&Tolerance::default()).is_ok());
        assert!(train.counter_rotates());
    }

    #[test]
    fn test_entries_carry_animation_parameters() {
        let spec = GearSpecBuilder::new(12, 1.0, 5.0, 1.0, 0.5, -7.5)
            .initial_rotation(180.0)
            .build()
            .unwrap();
        let train = layout([spec], 0.0).unwrap();
        let entry = &train.entries()[0];
        assert_eq!(entry.angular_velocity, -7.5);
        assert_eq!(entry.phase, 180.0);
    }

    #[test]
    fn test_zero_gap_is_tangent() {
        let train = layout([gear(1.0, 1.0), gear(1.0, -1.0)], 0.0).unwrap();
        assert_relative_eq!(train.positions()[1], 20.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_empty_and_negative_gap() {
        let err = layout(Vec::<GearSpec>::new(), 0.2).unwrap_err();
        assert_eq!(err.field(), "specs");
        let err = layout([gear(1.0, 1.0)], -1.0).unwrap_err();
        assert_eq!(err, GearError::InvalidParameter { field: "gap", value: -1.0 });
    }

    #[test]
    fn test_spacing_holds_far_from_origin() {
        let big = GearSpecBuilder::new(20, 1.0, 1e9, 3.0, 0.5, 1.0).build().unwrap();
        let small = |speed: f64| {
            GearSpecBuilder::new(20, 1.0, 0.01, 3.0, 0.5, speed).build().unwrap()
        };
        let specs = vec![big, small(-1.0), small(1.0), small(-1.0), small(1.0), small(-1.0)];
        let train = layout(specs, 0.0).unwrap();
        assert_relative_eq!(train.positions()[1], 1_000_000_000.01, max_relative = 1e-15);
        assert_eq!(train.check_spacing(&Tolerance::default()), Ok(()));
    }

    #[test]
    fn test_check_spacing_reports_misplaced_gear() {
        let good = layout([gear(1.0, 1.0), gear(1.0, -1.0), gear(1.0, 1.0)], 0.2).unwrap();
        let mut entries = good.entries().to_vec();
        entries[2].position += 0.5;
        let train = GearTrain {
            entries,
            gap: good.gap(),
            axis: good.axis(),
        };
        assert_eq!(train.check_spacing(&Tolerance::default()), Err(2));
    }

    #[test]
    fn test_rejects_overflowing_positions() {
        let huge = GearSpecBuilder::new(20, 1.0, 1e308, 3.0, 0.5, 1.0).build().unwrap();
        let err = layout([huge.clone(), huge], 0.2).unwrap_err();
        assert_eq!(err.field(), "position");
    }

    #[test]
    fn test_same_direction_is_not_counter_rotating() {
        let train = layout([gear(1.0, 10.0), gear(0.5, 10.0)], 0.2).unwrap();
        assert!(!train.counter_rotates());
        assert!(train.check_spacing(&Tolerance::default()).is_ok());
    }

    #[test]
    fn test_axis_controls_translation() {
        let config = LayoutConfig {
            gap: 1.0,
            axis: LayoutAxis::Z,
        };
        let train = layout_with([gear(1.0, 1.0), gear(1.0, -1.0)], &config).unwrap();
        assert_eq!(train.axis(), LayoutAxis::Z);
        assert_eq!(train.entries()[1].translation(), [0.0, 0.0, 21.0]);
    }

    #[test]
    fn test_transform_at_moves_rim_point() {
        let train = layout([gear(1.0, 90.0), gear(0.5, -90.0)], 0.0).unwrap();
        let second = &train.entries()[1];
        // After one time unit the second gear has turned -90 degrees about Y.
        let p = transform::apply(&second.transform_at(1.0), [10.0, 0.0, 0.0]);
        assert_relative_eq!(p[0], 15.0, epsilon = 1e-9);
        assert_relative_eq!(p[2], 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: LayoutConfig = serde_json::from_str(r#"{"axis":"Y"}"#).unwrap();
        assert_eq!(config.gap, DEFAULT_GAP);
        assert_eq!(config.axis, LayoutAxis::Y);
    }
}
