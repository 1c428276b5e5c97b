use serde::{Deserialize, Serialize};

/// Linear RGB colour with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// First channel outside `[0, 1]` (or non-finite), as `(name, value)`.
    pub fn out_of_range_channel(&self) -> Option<(&'static str, f64)> {
        [("r", self.r), ("g", self.g), ("b", self.b)]
            .into_iter()
            .find(|(_, v)| !(0.0..=1.0).contains(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_range_check() {
        assert_eq!(Rgb::new(0.2, 0.4, 1.0).out_of_range_channel(), None);
        assert_eq!(Rgb::new(0.2, 1.5, 1.0).out_of_range_channel(), Some(("g", 1.5)));
        assert!(Rgb::new(f64::NAN, 0.0, 0.0).out_of_range_channel().is_some());
    }
}
