use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A keyboard-driven camera motion.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.movement]
/// forward = "w"
/// speed_up = "e"
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
    /// Along the camera front vector.
    Forward,
    /// Against the camera front vector.
    Backward,
    /// Against the camera right vector.
    Left,
    /// Along the camera right vector.
    Right,
    /// Along world up (+Y), independent of pitch.
    Up,
    /// Along world down (-Y), independent of pitch.
    Down,
    /// Multiply movement speed up while held.
    SpeedUp,
    /// Divide movement speed down while held.
    SpeedDown,
}

impl Movement {
    /// Every movement in the order the frame loop polls them.
    ///
    /// Speed modifiers sit between the horizontal and vertical moves, so
    /// within one frame Forward/Backward/Left/Right use the speed from
    /// before the change and Up/Down use the changed speed.
    pub const ALL: [Self; 8] = [
        Self::Forward,
        Self::Backward,
        Self::Left,
        Self::Right,
        Self::SpeedUp,
        Self::SpeedDown,
        Self::Up,
        Self::Down,
    ];

    /// Whether this entry changes speed rather than position.
    #[must_use]
    pub fn is_speed_modifier(self) -> bool {
        matches!(self, Self::SpeedUp | Self::SpeedDown)
    }
}
