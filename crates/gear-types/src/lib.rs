pub mod axis;
pub mod color;
pub mod extrusion;
pub mod tag;

pub use axis::*;
pub use color::*;
pub use extrusion::*;
pub use tag::*;
