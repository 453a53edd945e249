use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which frame renderer the host builds at startup.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RendererKind {
    /// GPU compute kernel writes the image, then a blit presents it.
    #[default]
    Compute,
    /// Pixel-by-pixel ray tracer on the CPU, uploaded and blitted.
    Cpu,
}

/// Compute kernel run by the GPU renderer.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Kernel {
    /// Ray-traced spheres over a ground grid with axis lines.
    #[default]
    Scene,
    /// Warm light disc following the pointer.
    Spotlight,
    /// Time-animated colour field.
    Plasma,
}

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[schemars(title = "Renderer", inline)]
#[serde(default)]
/// Renderer selection.
pub struct RendererOptions {
    /// Renderer implementation.
    #[schemars(title = "Renderer")]
    pub kind: RendererKind,
    /// Kernel for the compute renderer; ignored by the CPU renderer.
    #[schemars(title = "Kernel")]
    pub kernel: Kernel,
}

impl RendererKind {
    /// Lower-case name as used in TOML and on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Compute => "compute",
            Self::Cpu => "cpu",
        }
    }
}

impl Kernel {
    /// Lower-case name as used in TOML and on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Scene => "scene",
            Self::Spotlight => "spotlight",
            Self::Plasma => "plasma",
        }
    }
}

impl fmt::Display for RendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RendererKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compute" | "gpu" => Ok(Self::Compute),
            "cpu" | "raytrace" => Ok(Self::Cpu),
            other => Err(format!(
                "unknown renderer '{other}' (expected compute or cpu)"
            )),
        }
    }
}

impl FromStr for Kernel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "scene" => Ok(Self::Scene),
            "spotlight" => Ok(Self::Spotlight),
            "plasma" => Ok(Self::Plasma),
            other => Err(format!(
                "unknown kernel '{other}' (expected scene, spotlight or plasma)"
            )),
        }
    }
}
