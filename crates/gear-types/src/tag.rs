use serde::{Deserialize, Serialize};

/// Metadata attached to a realized gear mesh so a host can find it again.
///
/// `gear_radius` is the unscaled base radius; `teeth` is the tooth count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GearTag {
    pub gear_radius: f64,
    pub teeth: u32,
}

impl GearTag {
    /// Attribute name under which hosts store the radius.
    pub const RADIUS_ATTR: &'static str = "gearRadius";
    /// Attribute name under which hosts store the tooth count.
    pub const TEETH_ATTR: &'static str = "teeth";

    pub fn new(gear_radius: f64, teeth: u32) -> Self {
        Self { gear_radius, teeth }
    }
}
