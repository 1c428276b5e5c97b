//! Placement of a realized gear in world space.
//!
//! Gears spin about the world Y axis, matching the host's `rotateY`
//! attribute. Angles at this boundary are in degrees.

use nalgebra::{Point3, Similarity3, Translation3, UnitQuaternion, Vector3};

/// Uniform scale, then rotation about Y by `rotation_degrees`, then translation.
pub fn placement(scale: f64, rotation_degrees: f64, translation: [f64; 3]) -> Similarity3<f64> {
    let rotation =
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), rotation_degrees.to_radians());
    let [x, y, z] = translation;
    Similarity3::from_parts(Translation3::new(x, y, z), rotation, scale)
}

/// Apply a placement to a point given as an array.
pub fn apply(transform: &Similarity3<f64>, point: [f64; 3]) -> [f64; 3] {
    let p = transform.transform_point(&Point3::new(point[0], point[1], point[2]));
    [p.x, p.y, p.z]
}
