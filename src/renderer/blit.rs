//! Full-screen copy of the storage image onto the swapchain.

use crate::error::DemoError;
use crate::gpu::{
    pipeline_helpers, render_context::RenderContext,
    shader_composer::ShaderComposer, texture::StorageTarget,
};

/// Draws a [`StorageTarget`] over the whole surface with a single
/// full-screen triangle.
pub struct Blitter {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,
}

impl Blitter {
    /// Build the blit pipeline for the context's surface format, sampling
    /// `source`.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::Shader`] if the blit shader fails to compose.
    pub fn new(
        context: &RenderContext,
        shader_composer: &mut ShaderComposer,
        source: &StorageTarget,
    ) -> Result<Self, DemoError> {
        let bind_group_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Blit Bind Group Layout"),
                entries: &[
                    pipeline_helpers::texture_2d(0),
                    pipeline_helpers::filtering_sampler(1),
                ],
            },
        );

        let shader = shader_composer.compose(
            &context.device,
            "Blit Shader",
            include_str!("../../assets/shaders/screen/blit.wgsl"),
            "screen/blit.wgsl",
        )?;

        let pipeline = pipeline_helpers::create_screen_space_pipeline(
            &context.device,
            "Blit",
            &shader,
            context.format(),
            None,
            &[&bind_group_layout],
        );

        let sampler =
            pipeline_helpers::nearest_sampler(&context.device, "Blit Sampler");
        let bind_group = Self::create_bind_group(
            context,
            &bind_group_layout,
            source,
            &sampler,
        );

        Ok(Self {
            pipeline,
            bind_group_layout,
            bind_group,
            sampler,
        })
    }

    fn create_bind_group(
        context: &RenderContext,
        layout: &wgpu::BindGroupLayout,
        source: &StorageTarget,
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Blit Bind Group"),
                layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(
                            &source.view,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                ],
            })
    }

    /// Point the blit at a new source image (after a resize).
    pub fn set_source(&mut self, context: &RenderContext, source: &StorageTarget) {
        self.bind_group = Self::create_bind_group(
            context,
            &self.bind_group_layout,
            source,
            &self.sampler,
        );
    }

    /// Record the blit into `output_view`.
    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        output_view: &wgpu::TextureView,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Blit Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            ..Default::default()
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}

/// Acquire the next swapchain texture, recovering from transient surface
/// failures.
///
/// Returns `Ok(None)` when the frame should be skipped: the surface was
/// outdated or lost (it is reconfigured for the next frame) or acquisition
/// timed out.
///
/// # Errors
///
/// Returns [`DemoError::Surface`] for out-of-memory and unknown failures.
pub fn acquire_frame(
    context: &RenderContext,
) -> Result<Option<wgpu::SurfaceTexture>, DemoError> {
    match context.get_next_frame() {
        Ok(frame) => Ok(Some(frame)),
        Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
            log::debug!("surface outdated, reconfiguring");
            context.reconfigure();
            Ok(None)
        }
        Err(wgpu::SurfaceError::Timeout) => {
            log::warn!("surface acquire timed out, skipping frame");
            Ok(None)
        }
        Err(e) => Err(DemoError::Surface(e)),
    }
}

/// Blit `source` to a freshly acquired swapchain texture and present it.
/// `record` runs first on the same encoder, so a compute pass recorded
/// there is ordered before the blit. Returns `false` if the frame was
/// skipped.
///
/// # Errors
///
/// Propagates [`acquire_frame`] failures.
pub fn present(
    context: &RenderContext,
    blitter: &Blitter,
    record: impl FnOnce(&mut wgpu::CommandEncoder),
) -> Result<bool, DemoError> {
    let Some(frame) = acquire_frame(context)? else {
        return Ok(false);
    };
    let view = frame
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = context.create_encoder();
    record(&mut encoder);
    blitter.draw(&mut encoder, &view);
    context.submit(encoder);
    frame.present();
    Ok(true)
}
