use glam::{Mat4, Vec2, Vec3};

use crate::camera::FlyCamera;
use crate::options::DisplayOptions;

/// Everything a renderer needs to produce one frame.
///
/// Captured from the camera after all of the frame's input has been
/// applied, so the basis vectors, view matrix and fov always agree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    /// World-to-camera look-at matrix.
    pub view: Mat4,
    /// Perspective projection for the current fov and aspect.
    pub projection: Mat4,
    /// Unit view direction.
    pub front: Vec3,
    /// Unit camera up.
    pub up: Vec3,
    /// Unit camera right.
    pub right: Vec3,
    /// Camera world-space position.
    pub position: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Seconds since the loop started.
    pub elapsed: f32,
    /// Seconds since the previous frame.
    pub delta: f32,
    /// Zero-based index of this frame.
    pub frame_index: u64,
    /// Last known pointer position in physical pixels, if any.
    pub pointer: Option<Vec2>,
    /// Overlay flags.
    pub display: DisplayOptions,
}

impl FrameParams {
    /// Snapshot the camera together with the loop's timing and flags.
    #[must_use]
    pub fn capture(
        camera: &FlyCamera,
        elapsed: f32,
        delta: f32,
        frame_index: u64,
        pointer: Option<Vec2>,
        display: DisplayOptions,
    ) -> Self {
        Self {
            view: camera.view(),
            projection: camera.projection(),
            front: camera.front(),
            up: camera.up(),
            right: camera.right(),
            position: camera.position(),
            fov: camera.fov(),
            aspect: camera.aspect(),
            elapsed,
            delta,
            frame_index,
            pointer,
            display,
        }
    }

    /// Focal length for a primary-ray generator whose screen plane spans
    /// `[-1, 1]` vertically.
    #[must_use]
    pub fn focal_length(&self) -> f32 {
        1.0 / (self.fov.to_radians() * 0.5).tan()
    }
}
