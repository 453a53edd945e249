use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A display flag that a key press flips.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Toggle {
    /// Ground-plane grid lines.
    Grid,
    /// World X/Z axis lines on the ground plane.
    Axes,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Overlay flags handed to the renderer every frame. The values here are
/// the initial state; key presses flip them at runtime.
pub struct DisplayOptions {
    /// Draw the ground grid.
    #[schemars(title = "Show Grid")]
    pub show_grid: bool,
    /// Draw the axis lines.
    #[schemars(title = "Show Axes")]
    pub show_axes: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_axes: true,
        }
    }
}

impl DisplayOptions {
    /// Flip one flag.
    pub fn toggle(&mut self, toggle: Toggle) {
        match toggle {
            Toggle::Grid => self.show_grid = !self.show_grid,
            Toggle::Axes => self.show_axes = !self.show_axes,
        }
    }
}
