use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Window", inline)]
#[serde(default)]
/// Window and presentation settings.
pub struct WindowOptions {
    /// Window title.
    #[schemars(skip)]
    pub title: String,
    /// Initial inner width in logical pixels.
    #[schemars(title = "Width", range(min = 64, max = 7680))]
    pub width: u32,
    /// Initial inner height in logical pixels.
    #[schemars(title = "Height", range(min = 64, max = 4320))]
    pub height: u32,
    /// Wait for vertical sync on present.
    #[schemars(title = "VSync")]
    pub vsync: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "shaderlab".into(),
            width: 800,
            height: 600,
            vsync: true,
        }
    }
}

impl WindowOptions {
    /// Initial aspect ratio (width / height).
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }
}
