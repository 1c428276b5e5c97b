//! Contracts for the 3D application that turns gear descriptions into
//! animated meshes, and the driver that replays a build against it.

pub mod realize;
pub mod recording_host;
pub mod traits;
pub mod types;

pub use realize::{realize_chain, realize_gear, realize_settings, realize_train};
pub use recording_host::{HostOp, RecordedMesh, RecordingHost};
pub use traits::*;
pub use types::*;
