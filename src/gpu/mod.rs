//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, the storage image renderers
//! draw into, pipeline boilerplate, and shader composition.

/// Shared wgpu boilerplate for compute and full-screen pipelines.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// The RGBA8 storage image kernels write and the blit samples.
pub mod texture;

pub use render_context::{RenderContext, RenderContextError};
pub use shader_composer::ShaderComposer;
pub use texture::StorageTarget;
