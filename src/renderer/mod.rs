//! Frame renderers for the demo host.
//!
//! [`ComputeRenderer`] runs one of the built-in WGSL kernels on the GPU;
//! [`CpuRenderer`] ray traces the sphere scene on the host. Both write an
//! RGBA8 [`StorageTarget`](crate::gpu::StorageTarget) that [`Blitter`]
//! copies to the swapchain.

pub mod blit;
pub mod compute;
pub mod cpu;
pub mod raytrace;
/// The per-frame uniform block shared with the WGSL kernels.
pub mod uniforms;

pub use blit::Blitter;
pub use compute::ComputeRenderer;
pub use cpu::CpuRenderer;
pub use uniforms::FrameUniform;

use crate::error::DemoError;
use crate::frame::FrameRenderer;
use crate::gpu::render_context::RenderContext;
pub use crate::options::{Kernel, RendererKind};
use crate::options::Options;

/// Edge length of the square compute workgroup every kernel declares.
pub const WORKGROUP_SIZE: u32 = 16;

/// WGSL source and file path of a built-in kernel.
#[must_use]
pub fn kernel_source(kernel: Kernel) -> (&'static str, &'static str) {
    match kernel {
        Kernel::Scene => (
            include_str!("../../assets/shaders/compute/scene.wgsl"),
            "compute/scene.wgsl",
        ),
        Kernel::Spotlight => (
            include_str!("../../assets/shaders/compute/spotlight.wgsl"),
            "compute/spotlight.wgsl",
        ),
        Kernel::Plasma => (
            include_str!("../../assets/shaders/compute/plasma.wgsl"),
            "compute/plasma.wgsl",
        ),
    }
}

/// Build the renderer selected in `options`, taking ownership of the GPU
/// context.
///
/// # Errors
///
/// Returns [`DemoError::Shader`] if a shader fails to compose.
pub fn build_renderer(
    context: RenderContext,
    options: &Options,
) -> Result<Box<dyn FrameRenderer>, DemoError> {
    let renderer: Box<dyn FrameRenderer> = match options.renderer.kind {
        RendererKind::Compute => Box::new(ComputeRenderer::new(
            context,
            options.renderer.kernel,
            &options.scene,
        )?),
        RendererKind::Cpu => {
            Box::new(CpuRenderer::new(context, &options.scene)?)
        }
    };
    Ok(renderer)
}
