//! CPU renderer: traces every pixel on the host and uploads the image.

use super::blit::{self, Blitter};
use super::raytrace::{self, RayCamera, TraceScene};
use crate::error::DemoError;
use crate::frame::{FrameParams, FrameRenderer};
use crate::gpu::{
    render_context::RenderContext, shader_composer::ShaderComposer,
    texture::StorageTarget,
};
use crate::options::SceneOptions;

/// Sequential ray tracer. Draws the same scene as the `scene` kernel, one
/// pixel at a time, then blits the uploaded image.
pub struct CpuRenderer {
    context: RenderContext,
    target: StorageTarget,
    blitter: Blitter,
    scene: TraceScene,
    pixels: Vec<u8>,
}

impl CpuRenderer {
    /// Size the image to the surface and build the blit pass.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::Shader`] if the blit shader fails to compose.
    pub fn new(
        context: RenderContext,
        scene: &SceneOptions,
    ) -> Result<Self, DemoError> {
        let mut shader_composer = ShaderComposer::new()?;
        let (width, height) = context.size();
        let target = StorageTarget::new(&context.device, width, height);
        let blitter = Blitter::new(&context, &mut shader_composer, &target)?;
        let pixels = vec![0; pixel_bytes(&target)];

        log::info!("cpu renderer ready: {width}x{height}");

        Ok(Self {
            context,
            target,
            blitter,
            scene: TraceScene::from_options(scene),
            pixels,
        })
    }
}

fn pixel_bytes(target: &StorageTarget) -> usize {
    target.width() as usize * target.height() as usize * 4
}

impl FrameRenderer for CpuRenderer {
    fn render(&mut self, params: &FrameParams) -> Result<(), DemoError> {
        let camera = RayCamera::from_params(params);
        let (width, height) = (self.target.width(), self.target.height());
        let Self {
            context,
            target,
            blitter,
            scene,
            pixels,
        } = self;

        let presented = blit::present(context, blitter, |_| {
            raytrace::trace_image(
                &camera,
                scene,
                params.display,
                width,
                height,
                pixels,
            );
            target.upload(&context.queue, pixels);
        })?;
        if !presented {
            log::debug!("frame {} skipped", params.frame_index);
        }
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || self.target.matches(width, height) {
            return;
        }
        self.context.resize(width, height);
        self.target = StorageTarget::new(&self.context.device, width, height);
        self.pixels.resize(pixel_bytes(&self.target), 0);
        self.blitter.set_source(&self.context, &self.target);
    }
}
