use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Initial camera pose plus the clamp ranges and tuning constants applied
/// to pointer, scroll and keyboard input.
pub struct CameraOptions {
    /// Starting world-space position.
    #[schemars(skip)]
    pub position: [f32; 3],
    /// Starting yaw in degrees (−90 looks down −Z).
    #[schemars(skip)]
    pub yaw: f32,
    /// Starting pitch in degrees.
    #[schemars(skip)]
    pub pitch: f32,
    /// Starting vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 1.0, max = 90.0), extend("step" = 1.0))]
    pub fov: f32,
    /// Narrowest field of view scroll can reach.
    #[schemars(skip)]
    pub min_fov: f32,
    /// Widest field of view scroll can reach.
    #[schemars(skip)]
    pub max_fov: f32,
    /// Largest absolute pitch in degrees; capped below 90.
    #[schemars(skip)]
    pub pitch_limit: f32,
    /// World units per second for movement keys.
    #[schemars(title = "Movement Speed", range(min = 0.1, max = 100.0), extend("step" = 0.1))]
    pub movement_speed: f32,
    /// Degrees of rotation per pixel of pointer motion.
    #[schemars(title = "Mouse Sensitivity", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub mouse_sensitivity: f32,
    /// Speed multiplier per second of holding a speed modifier.
    #[schemars(title = "Speed Change Rate", range(min = 1.0, max = 8.0), extend("step" = 0.1))]
    pub speed_change_rate: f32,
    /// Floor for movement speed.
    #[schemars(skip)]
    pub min_speed: f32,
    /// Ceiling for movement speed.
    #[schemars(skip)]
    pub max_speed: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            position: [3.0, 0.0, 0.0],
            yaw: -90.0,
            pitch: 0.0,
            fov: 45.0,
            min_fov: 1.0,
            max_fov: 90.0,
            pitch_limit: 89.0,
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
            speed_change_rate: 2.0,
            min_speed: 0.1,
            max_speed: 100.0,
        }
    }
}
