//! GPU renderer: a compute kernel fills the storage image every frame.

use bytemuck::Zeroable;
use wgpu::util::DeviceExt;

use super::blit::{self, Blitter};
use super::raytrace::TraceScene;
use super::uniforms::FrameUniform;
use super::{kernel_source, WORKGROUP_SIZE};
use crate::error::DemoError;
use crate::frame::{FrameParams, FrameRenderer};
use crate::gpu::{
    pipeline_helpers, render_context::RenderContext,
    shader_composer::ShaderComposer, texture::StorageTarget,
};
use crate::options::{Kernel, SceneOptions};

/// Dispatches one of the built-in kernels over the whole image, then blits
/// and presents it.
pub struct ComputeRenderer {
    context: RenderContext,
    kernel: Kernel,
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    target: StorageTarget,
    blitter: Blitter,
    scene: TraceScene,
    spotlight_radius: f32,
}

impl ComputeRenderer {
    /// Compile `kernel` and size the storage image to the surface.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::Shader`] if the kernel or blit shader fails to
    /// compose.
    pub fn new(
        context: RenderContext,
        kernel: Kernel,
        scene: &SceneOptions,
    ) -> Result<Self, DemoError> {
        let mut shader_composer = ShaderComposer::new()?;
        let (width, height) = context.size();
        let target = StorageTarget::new(&context.device, width, height);

        let bind_group_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Kernel Bind Group Layout"),
                entries: &[
                    pipeline_helpers::compute_uniform_buffer(0),
                    pipeline_helpers::storage_texture_2d(1),
                ],
            },
        );

        let (source, file_path) = kernel_source(kernel);
        let shader = shader_composer.compose(
            &context.device,
            &format!("{kernel} Kernel"),
            source,
            file_path,
        )?;
        let pipeline = pipeline_helpers::create_compute_pipeline(
            &context.device,
            &format!("{kernel} Kernel"),
            &shader,
            &[&bind_group_layout],
        );

        let uniform_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Frame Uniform Buffer"),
                contents: bytemuck::bytes_of(&FrameUniform::zeroed()),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let bind_group = Self::create_bind_group(
            &context,
            &bind_group_layout,
            &uniform_buffer,
            &target,
        );
        let blitter = Blitter::new(&context, &mut shader_composer, &target)?;

        log::info!("compute renderer ready: kernel {kernel}, {width}x{height}");

        Ok(Self {
            context,
            kernel,
            pipeline,
            bind_group_layout,
            bind_group,
            uniform_buffer,
            target,
            blitter,
            scene: TraceScene::from_options(scene),
            spotlight_radius: scene.spotlight_radius,
        })
    }

    fn create_bind_group(
        context: &RenderContext,
        layout: &wgpu::BindGroupLayout,
        uniform_buffer: &wgpu::Buffer,
        target: &StorageTarget,
    ) -> wgpu::BindGroup {
        context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Kernel Bind Group"),
                layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniform_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(
                            &target.view,
                        ),
                    },
                ],
            })
    }

    /// The kernel this renderer dispatches.
    pub fn kernel(&self) -> Kernel {
        self.kernel
    }
}

impl FrameRenderer for ComputeRenderer {
    fn render(&mut self, params: &FrameParams) -> Result<(), DemoError> {
        let uniform = FrameUniform::new(
            params,
            &self.scene,
            self.spotlight_radius,
            self.target.width(),
            self.target.height(),
        );
        self.context.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&uniform),
        );

        let (groups_x, groups_y) = self.target.workgroups(WORKGROUP_SIZE);
        let presented =
            blit::present(&self.context, &self.blitter, |encoder| {
                let mut pass =
                    encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                        label: Some("Kernel Pass"),
                        timestamp_writes: None,
                    });
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &self.bind_group, &[]);
                pass.dispatch_workgroups(groups_x, groups_y, 1);
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
        self.bind_group = Self::create_bind_group(
            &self.context,
            &self.bind_group_layout,
            &self.uniform_buffer,
            &self.target,
        );
        self.blitter.set_source(&self.context, &self.target);
    }
}
