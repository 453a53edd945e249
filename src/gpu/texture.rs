//! The image a frame renderer draws into before it is blitted to the
//! swapchain.

/// Pixel format of every [`StorageTarget`]. Compute kernels declare
/// `texture_storage_2d<rgba8unorm, write>` to match.
pub const STORAGE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// An RGBA8 image written by a compute kernel or uploaded from the CPU,
/// then sampled by the blit pass.
///
/// Created with `STORAGE_BINDING | TEXTURE_BINDING | COPY_DST` usage so
/// either renderer can fill it.
pub struct StorageTarget {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl StorageTarget {
    /// Create a target of the given size. Zero dimensions are bumped to 1.
    #[must_use]
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Storage Target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: STORAGE_FORMAT,
            usage: wgpu::TextureUsages::STORAGE_BINDING
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            width,
            height,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// True if the target already has the given (clamped) size.
    pub fn matches(&self, width: u32, height: u32) -> bool {
        self.width == width.max(1) && self.height == height.max(1)
    }

    /// Replace the full image with tightly packed RGBA8 rows.
    pub fn upload(&self, queue: &wgpu::Queue, pixels: &[u8]) {
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(self.width * 4),
                rows_per_image: Some(self.height),
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
    }

    /// Compute workgroups needed to cover the image with `tile × tile`
    /// groups.
    pub fn workgroups(&self, tile: u32) -> (u32, u32) {
        workgroup_count(self.width, self.height, tile)
    }
}

/// Number of `tile × tile` workgroups covering a `width × height` image.
#[must_use]
pub fn workgroup_count(width: u32, height: u32, tile: u32) -> (u32, u32) {
    let tile = tile.max(1);
    (width.div_ceil(tile), height.div_ceil(tile))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workgroups_round_up() {
        assert_eq!(workgroup_count(800, 600, 16), (50, 38));
        assert_eq!(workgroup_count(16, 16, 16), (1, 1));
        assert_eq!(workgroup_count(17, 1, 16), (2, 1));
        assert_eq!(workgroup_count(1920, 1080, 16), (120, 68));
    }
}
