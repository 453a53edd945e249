use bytemuck::{Pod, Zeroable};

use super::raytrace::TraceScene;
use crate::frame::FrameParams;
use crate::options::MAX_SPHERES;

/// Per-frame uniform read by every compute kernel.
///
/// Layout matches `FrameUniform` in `modules/frame.wgsl`: every field is a
/// 16-byte vector so std140 and `repr(C)` agree without padding fields.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameUniform {
    /// Column-major world-to-camera matrix.
    pub view: [[f32; 4]; 4],
    /// xyz = camera position, w = focal length.
    pub position: [f32; 4],
    /// xyz = unit front, w = fov in degrees.
    pub front: [f32; 4],
    /// xyz = unit right, w = aspect.
    pub right: [f32; 4],
    /// xyz = unit up, w = elapsed seconds.
    pub up: [f32; 4],
    /// xy = pointer in pixels, z = 1 when known, w = spotlight radius.
    pub pointer: [f32; 4],
    /// xy = image size in pixels, z = delta seconds, w = ground height.
    pub resolution: [f32; 4],
    /// xyz = unit direction towards the light.
    pub light_dir: [f32; 4],
    /// x = show grid, y = show axes, z = sphere count, w = frame index
    /// (wrapping).
    pub flags: [u32; 4],
    /// xyz = centre, w = radius. Entries past `flags[2]` are zero.
    pub spheres: [[f32; 4]; MAX_SPHERES],
}

impl FrameUniform {
    /// Pack a frame snapshot for an image of `width × height` pixels.
    #[must_use]
    pub fn new(
        params: &FrameParams,
        scene: &TraceScene,
        spotlight_radius: f32,
        width: u32,
        height: u32,
    ) -> Self {
        let mut spheres = [[0.0; 4]; MAX_SPHERES];
        let count = scene.spheres.len().min(MAX_SPHERES);
        for (slot, sphere) in spheres.iter_mut().zip(&scene.spheres) {
            *slot = sphere.to_array();
        }

        let (pointer, has_pointer) = params
            .pointer
            .map_or(([0.0, 0.0], 0.0), |p| (p.to_array(), 1.0));

        Self {
            view: params.view.to_cols_array_2d(),
            position: params.position.extend(params.focal_length()).to_array(),
            front: params.front.extend(params.fov).to_array(),
            right: params.right.extend(params.aspect).to_array(),
            up: params.up.extend(params.elapsed).to_array(),
            pointer: [pointer[0], pointer[1], has_pointer, spotlight_radius],
            resolution: [
                width as f32,
                height as f32,
                params.delta,
                scene.ground_height,
            ],
            light_dir: scene.light_dir.extend(0.0).to_array(),
            flags: [
                u32::from(params.display.show_grid),
                u32::from(params.display.show_axes),
                count as u32,
                params.frame_index as u32,
            ],
            spheres,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec4};

    use super::*;
    use crate::camera::FlyCamera;
    use crate::options::DisplayOptions;

    fn params(pointer: Option<Vec2>) -> FrameParams {
        FrameParams::capture(
            &FlyCamera::default(),
            1.5,
            0.25,
            u64::from(u32::MAX) + 3,
            pointer,
            DisplayOptions {
                show_grid: false,
                show_axes: true,
            },
        )
    }

    #[test]
    #[allow(unused_qualifications)]
    fn layout_matches_wgsl() {
        assert_eq!(std::mem::size_of::<FrameUniform>(), 64 + 8 * 16 + 8 * 16);
        assert_eq!(std::mem::size_of::<FrameUniform>() % 16, 0);
        assert_eq!(std::mem::offset_of!(FrameUniform, flags), 176);
        assert_eq!(std::mem::offset_of!(FrameUniform, spheres), 192);
    }

    #[test]
    fn packs_camera_time_and_flags() {
        let p = params(Some(Vec2::new(10.0, 20.0)));
        let u = FrameUniform::new(&p, &TraceScene::default(), 200.0, 800, 600);

        assert_eq!(u.position, [3.0, 0.0, 0.0, p.focal_length()]);
        assert_eq!(u.front[3], 45.0);
        assert_eq!(u.up[3], 1.5);
        assert_eq!(u.pointer, [10.0, 20.0, 1.0, 200.0]);
        assert_eq!(u.resolution, [800.0, 600.0, 0.25, -2.5]);
        assert_eq!(u.flags, [0, 1, 3, 2]);
        assert_eq!(u.spheres[2], [1.0, -1.0, 1.0, 1.3]);
        assert_eq!(u.spheres[3], [0.0; 4]);
    }

    #[test]
    fn missing_pointer_is_flagged() {
        let u = FrameUniform::new(
            &params(None),
            &TraceScene::default(),
            200.0,
            800,
            600,
        );
        assert_eq!(u.pointer[2], 0.0);
    }

    #[test]
    fn extra_spheres_are_dropped() {
        let scene = TraceScene {
            spheres: vec![Vec4::ONE; 12],
            ..TraceScene::default()
        };
        let u = FrameUniform::new(&params(None), &scene, 200.0, 1, 1);
        assert_eq!(u.flags[2], MAX_SPHERES as u32);
        assert!(u.spheres.iter().all(|s| *s == [1.0; 4]));
    }
}
