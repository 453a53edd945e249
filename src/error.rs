//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the shaderlab crate.
///
/// None of these are recovered from inside the frame loop: they propagate
/// to the host, which terminates the demo.
#[derive(Debug)]
pub enum DemoError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Presentation surface failed in a way that reconfiguring cannot fix.
    Surface(wgpu::SurfaceError),
    /// A compute kernel or shared shader module failed to compose.
    Shader(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Window or event-loop failure.
    Viewer(String),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Surface(e) => write!(f, "surface error: {e}"),
            Self::Shader(msg) => write!(f, "shader error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Surface(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for DemoError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for DemoError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<wgpu::SurfaceError> for DemoError {
    fn from(e: wgpu::SurfaceError) -> Self {
        Self::Surface(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn display_prefixes_category() {
        let err = DemoError::Shader("missing entry point".into());
        assert_eq!(err.to_string(), "shader error: missing entry point");

        let err = DemoError::from(wgpu::SurfaceError::OutOfMemory);
        assert!(err.to_string().starts_with("surface error: "));
    }

    #[test]
    fn io_error_keeps_source() {
        let err = DemoError::from(std::io::Error::other("disk gone"));
        assert!(err.source().is_some());
        assert!(DemoError::Viewer("closed".into()).source().is_none());
    }
}
