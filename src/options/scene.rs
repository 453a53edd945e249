use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Most spheres the GPU uniform has room for. Extra entries are dropped
/// by every renderer so the GPU and CPU paths show the same scene.
pub const MAX_SPHERES: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
/// Scene content shared by the `scene` kernel and the CPU ray tracer.
pub struct SceneOptions {
    /// Spheres as `[x, y, z, radius]`.
    #[schemars(skip)]
    pub spheres: Vec<[f32; 4]>,
    /// Height of the ground plane carrying the grid and axes.
    #[schemars(title = "Ground Height", range(min = -10.0, max = 10.0), extend("step" = 0.1))]
    pub ground_height: f32,
    /// Direction towards the key light (normalized on use).
    #[schemars(skip)]
    pub light_dir: [f32; 3],
    /// Radius in pixels of the pointer-following light.
    #[schemars(title = "Spotlight Radius", range(min = 10.0, max = 1000.0), extend("step" = 5.0))]
    pub spotlight_radius: f32,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            spheres: vec![
                [-2.0, 1.0, 0.0, 1.1],
                [3.0, 1.5, 1.0, 1.2],
                [1.0, -1.0, 1.0, 1.3],
            ],
            ground_height: -2.5,
            light_dir: [2.0, 1.4, -1.0],
            spotlight_radius: 200.0,
        }
    }
}

impl SceneOptions {
    /// The spheres renderers actually draw (at most [`MAX_SPHERES`]).
    #[must_use]
    pub fn visible_spheres(&self) -> &[[f32; 4]] {
        &self.spheres[..self.spheres.len().min(MAX_SPHERES)]
    }
}
