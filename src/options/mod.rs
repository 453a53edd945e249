//! Centralized demo options with TOML preset support.
//!
//! Every tweakable setting (window, camera, display toggles, renderer
//! selection, scene content, keybindings) is consolidated here. Options
//! serialize to/from TOML so a demo can be launched from a preset file.

mod camera;
mod display;
mod keybindings;
mod renderer;
mod scene;
mod window;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::{DisplayOptions, Toggle};
pub use keybindings::KeybindingOptions;
pub use renderer::{Kernel, RendererKind, RendererOptions};
pub use scene::{SceneOptions, MAX_SPHERES};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use window::WindowOptions;

use crate::error::DemoError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Window and presentation settings.
    pub window: WindowOptions,
    /// Camera pose, clamp ranges and tuning.
    pub camera: CameraOptions,
    /// Initial overlay flags.
    pub display: DisplayOptions,
    /// Renderer and kernel selection.
    pub renderer: RendererOptions,
    /// Scene content for the ray-traced views.
    pub scene: SceneOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the tunable options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::Io`] if the file cannot be read and
    /// [`DemoError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, DemoError> {
        let content = std::fs::read_to_string(path).map_err(DemoError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::OptionsParse`] on malformed TOML or unknown
    /// enum values.
    pub fn from_toml(content: &str) -> Result<Self, DemoError> {
        toml::from_str(content)
            .map_err(|e| DemoError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::OptionsParse`] if serialization fails and
    /// [`DemoError::Io`] if the file or its parent directory cannot be
    /// written.
    pub fn save(&self, path: &Path) -> Result<(), DemoError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| DemoError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(DemoError::Io)?;
        }
        std::fs::write(path, content).map_err(DemoError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Movement;
    use crate::input::Key;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[camera]
movement_speed = 7.5

[renderer]
kind = "cpu"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.camera.movement_speed, 7.5);
        assert_eq!(opts.renderer.kind, RendererKind::Cpu);
        // Everything else should be default
        assert_eq!(opts.camera.fov, 45.0);
        assert_eq!(opts.renderer.kernel, Kernel::Scene);
        assert_eq!(opts.window.width, 800);
        assert_eq!(opts.scene.spheres.len(), 3);
    }

    #[test]
    fn unknown_kernel_is_a_parse_error() {
        let err = Options::from_toml("[renderer]\nkernel = \"mandelbrot\"\n")
            .unwrap_err();
        assert!(matches!(err, DemoError::OptionsParse(_)));
    }

    #[test]
    fn movement_table_follows_fixed_order() {
        let opts = Options::default();
        let table = opts.keybindings.movement_table();
        let order: Vec<Movement> = table.iter().map(|(_, m)| *m).collect();
        assert_eq!(order, Movement::ALL.to_vec());
        assert_eq!(table[0], (Key::W, Movement::Forward));
        assert!(table.contains(&(Key::ShiftLeft, Movement::Down)));
    }

    #[test]
    fn keybinding_tables_parse_from_toml() {
        let toml_str = r#"
[keybindings.movement]
forward = "arrow_up"
backward = "arrow_down"

[keybindings.toggles]
grid = "f"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        let table = opts.keybindings.movement_table();
        assert_eq!(
            table,
            vec![
                (Key::ArrowUp, Movement::Forward),
                (Key::ArrowDown, Movement::Backward)
            ]
        );
        assert_eq!(opts.keybindings.toggle_for(Key::F), Some(Toggle::Grid));
        assert_eq!(opts.keybindings.toggle_for(Key::G), None);
    }

    #[test]
    fn toggle_lookup() {
        let opts = Options::default();
        assert_eq!(opts.keybindings.toggle_for(Key::G), Some(Toggle::Grid));
        assert_eq!(opts.keybindings.toggle_for(Key::H), Some(Toggle::Axes));
        assert_eq!(opts.keybindings.toggle_for(Key::Z), None);
    }

    #[test]
    fn display_toggle_flips_one_flag() {
        let mut display = DisplayOptions::default();
        display.toggle(Toggle::Grid);
        assert!(!display.show_grid);
        assert!(display.show_axes);
        display.toggle(Toggle::Grid);
        assert!(display.show_grid);
    }

    #[test]
    fn renderer_names_parse() {
        assert_eq!("CPU".parse::<RendererKind>(), Ok(RendererKind::Cpu));
        assert_eq!("compute".parse::<RendererKind>(), Ok(RendererKind::Compute));
        assert_eq!("plasma".parse::<Kernel>(), Ok(Kernel::Plasma));
        assert!("vulkan".parse::<RendererKind>().is_err());
    }

    #[test]
    fn sphere_list_is_capped() {
        let scene = SceneOptions {
            spheres: vec![[0.0, 0.0, 0.0, 1.0]; MAX_SPHERES + 3],
            ..SceneOptions::default()
        };
        assert_eq!(scene.visible_spheres().len(), MAX_SPHERES);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("window"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("display"));
        assert!(props.contains_key("renderer"));
        assert!(props.contains_key("scene"));
        assert!(!props.contains_key("keybindings"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("movement_speed").is_some());
        assert!(camera.get("position").is_none());
    }

    #[test]
    fn shipped_presets_parse() {
        let spotlight =
            Options::from_toml(include_str!("../../presets/spotlight.toml"))
                .unwrap();
        assert_eq!(spotlight.renderer.kernel, Kernel::Spotlight);

        let cpu =
            Options::from_toml(include_str!("../../presets/cpu_raytrace.toml"))
                .unwrap();
        assert_eq!(cpu.renderer.kind, RendererKind::Cpu);
        assert_eq!(cpu.window.width, 640);
        assert!(!cpu.display.show_grid);
    }

    #[test]
    fn save_then_load_preserves_options() {
        let dir = std::env::temp_dir()
            .join(format!("shaderlab-options-{}", std::process::id()));
        let path = dir.join("preset.toml");
        let mut opts = Options::default();
        opts.renderer.kernel = Kernel::Spotlight;
        opts.display.show_axes = false;

        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(Options::list_presets(&dir), vec!["preset".to_owned()]);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
