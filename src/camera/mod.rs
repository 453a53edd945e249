//! Camera system for free-look scene viewing.
//!
//! Provides a yaw/pitch perspective camera with scroll zoom and
//! WASD-style movement, plus the discrete movement vocabulary it consumes.

/// Free-look camera state, derived basis vectors and view matrix.
pub mod core;
/// Movement directions and speed modifiers applied per held key.
pub mod movement;

pub use self::core::{CameraLimits, FlyCamera};
pub use movement::Movement;
