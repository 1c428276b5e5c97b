use serde::{Deserialize, Serialize};

/// World axis along which a gear train is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutAxis {
    #[default]
    X,
    Y,
    Z,
}

impl LayoutAxis {
    /// Unit direction of the axis.
    pub fn unit(self) -> [f64; 3] {
        match self {
            LayoutAxis::X => [1.0, 0.0, 0.0],
            LayoutAxis::Y => [0.0, 1.0, 0.0],
            LayoutAxis::Z => [0.0, 0.0, 1.0],
        }
    }

    /// `[x, y, z]` offset of `distance` along this axis.
    pub fn offset(self, distance: f64) -> [f64; 3] {
        let [x, y, z] = self.unit();
        [x * distance, y * distance, z * distance]
    }
}
