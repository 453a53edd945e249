//! CPU ray tracer for the sphere scene.
//!
//! Pure functions shared by [`CpuRenderer`](super::CpuRenderer) and the
//! benchmarks. The shading matches the `scene` compute kernel so both
//! renderers draw the same picture.

use glam::{Vec3, Vec4};

use crate::frame::FrameParams;
use crate::options::{DisplayOptions, SceneOptions};

/// Hits closer than this are treated as self-intersections.
const MIN_HIT_DISTANCE: f32 = 1e-4;
/// Grid/axis lines fade out past this distance.
const GRID_FADE_DISTANCE: f32 = 60.0;
/// Half-width of grid lines in world units.
const GRID_LINE_WIDTH: f32 = 0.02;
/// Half-width of axis lines in world units.
const AXIS_LINE_WIDTH: f32 = 0.05;

const LIGHT_COLOR: Vec3 = Vec3::new(1.0, 0.9, 0.8);
const AMBIENT: f32 = 0.08;
const GROUND_COLOR: Vec3 = Vec3::new(0.12, 0.12, 0.14);
const GRID_COLOR: Vec3 = Vec3::new(0.45, 0.45, 0.5);
const X_AXIS_COLOR: Vec3 = Vec3::new(0.9, 0.2, 0.2);
const Z_AXIS_COLOR: Vec3 = Vec3::new(0.2, 0.4, 0.9);

/// Scene geometry in the form the tracer consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceScene {
    /// Spheres as `(center, radius)` packed into `xyz, w`.
    pub spheres: Vec<Vec4>,
    /// Height of the ground plane.
    pub ground_height: f32,
    /// Unit direction towards the light.
    pub light_dir: Vec3,
}

impl TraceScene {
    /// Build from scene options, dropping spheres past the GPU limit and
    /// normalizing the light direction (falls back to straight up).
    #[must_use]
    pub fn from_options(options: &SceneOptions) -> Self {
        Self {
            spheres: options
                .visible_spheres()
                .iter()
                .map(|s| Vec4::from_array(*s))
                .collect(),
            ground_height: options.ground_height,
            light_dir: Vec3::from_array(options.light_dir)
                .try_normalize()
                .unwrap_or(Vec3::Y),
        }
    }
}

impl Default for TraceScene {
    fn default() -> Self {
        Self::from_options(&SceneOptions::default())
    }
}

/// Camera basis for primary-ray generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayCamera {
    /// Ray origin.
    pub origin: Vec3,
    /// Unit view direction.
    pub front: Vec3,
    /// Unit camera right.
    pub right: Vec3,
    /// Unit camera up.
    pub up: Vec3,
    /// Distance from the eye to a screen plane spanning `[-1, 1]`
    /// vertically.
    pub focal_length: f32,
}

impl RayCamera {
    /// Extract the basis from a frame snapshot.
    #[must_use]
    pub fn from_params(params: &FrameParams) -> Self {
        Self {
            origin: params.position,
            front: params.front,
            right: params.right,
            up: params.up,
            focal_length: params.focal_length(),
        }
    }

    /// Unit direction through the centre of pixel `(x, y)` of a
    /// `width × height` image. Row 0 is the top of the image.
    #[must_use]
    pub fn primary_ray(&self, x: u32, y: u32, width: u32, height: u32) -> Vec3 {
        let w = width.max(1) as f32;
        let h = height.max(1) as f32;
        let u = ((x as f32 + 0.5) / w * 2.0 - 1.0) * (w / h);
        let v = 1.0 - (y as f32 + 0.5) / h * 2.0;
        (self.front * self.focal_length + self.right * u + self.up * v)
            .normalize()
    }
}

/// Distance along a unit ray to the nearest intersection in front of the
/// origin, or `None` on a miss.
#[must_use]
pub fn intersect_sphere(origin: Vec3, dir: Vec3, sphere: Vec4) -> Option<f32> {
    let oc = origin - sphere.truncate();
    let b = oc.dot(dir);
    let c = oc.length_squared() - sphere.w * sphere.w;
    let h = b * b - c;
    if h < 0.0 {
        return None;
    }
    let h = h.sqrt();
    let near = -b - h;
    if near > MIN_HIT_DISTANCE {
        return Some(near);
    }
    // Origin inside the sphere.
    let far = -b + h;
    (far > MIN_HIT_DISTANCE).then_some(far)
}

/// Distance along a ray to the horizontal plane `y = height`.
#[must_use]
pub fn intersect_ground(origin: Vec3, dir: Vec3, height: f32) -> Option<f32> {
    if dir.y.abs() < 1e-6 {
        return None;
    }
    let t = (height - origin.y) / dir.y;
    (t > MIN_HIT_DISTANCE).then_some(t)
}

/// Background colour for rays that escape the scene.
#[must_use]
pub fn sky(dir: Vec3) -> Vec3 {
    let t = 0.5 * (dir.y + 1.0);
    Vec3::new(0.02, 0.02, 0.05).lerp(Vec3::new(0.10, 0.14, 0.22), t)
}

/// Colour seen along one ray.
#[must_use]
pub fn shade(
    scene: &TraceScene,
    display: DisplayOptions,
    origin: Vec3,
    dir: Vec3,
) -> Vec3 {
    let nearest = scene
        .spheres
        .iter()
        .filter_map(|&s| intersect_sphere(origin, dir, s).map(|t| (t, s)))
        .min_by(|a, b| a.0.total_cmp(&b.0));

    let ground = intersect_ground(origin, dir, scene.ground_height);

    match (nearest, ground) {
        (Some((t, sphere)), g) if g.is_none_or(|g| t <= g) => {
            let normal = (origin + dir * t - sphere.truncate()).normalize();
            let ndl = normal.dot(scene.light_dir).max(0.0);
            LIGHT_COLOR * (AMBIENT + (1.0 - AMBIENT) * ndl)
        }
        (_, Some(t)) => shade_ground(origin + dir * t, t, display),
        _ => sky(dir),
    }
}

fn shade_ground(point: Vec3, distance: f32, display: DisplayOptions) -> Vec3 {
    let fade = (1.0 - distance / GRID_FADE_DISTANCE).clamp(0.0, 1.0);
    let mut color = GROUND_COLOR;

    if display.show_grid {
        let gx = (point.x - point.x.round()).abs();
        let gz = (point.z - point.z.round()).abs();
        if gx < GRID_LINE_WIDTH || gz < GRID_LINE_WIDTH {
            color = color.lerp(GRID_COLOR, fade);
        }
    }

    if display.show_axes {
        // X axis runs along z = 0, Z axis along x = 0.
        if point.z.abs() < AXIS_LINE_WIDTH {
            color = color.lerp(X_AXIS_COLOR, fade);
        } else if point.x.abs() < AXIS_LINE_WIDTH {
            color = color.lerp(Z_AXIS_COLOR, fade);
        }
    }
    color
}

/// Quantize a linear colour to RGBA8 bytes in `r, g, b, a` order.
#[must_use]
pub fn pack_rgba8(color: Vec4) -> [u8; 4] {
    let c = color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0;
    [c.x as u8, c.y as u8, c.z as u8, c.w as u8]
}

/// Trace a full `width × height` image into `out` as tightly packed RGBA8
/// rows, top row first.
///
/// # Panics
///
/// In debug builds, panics if `out` is shorter than `width * height * 4`
/// bytes. Release builds fill only the rows that fit.
pub fn trace_image(
    camera: &RayCamera,
    scene: &TraceScene,
    display: DisplayOptions,
    width: u32,
    height: u32,
    out: &mut [u8],
) {
    if width == 0 || height == 0 {
        return;
    }
    let row_bytes = width as usize * 4;
    debug_assert!(
        out.len() >= row_bytes * height as usize,
        "image buffer holds {} bytes, {width}x{height} needs {}",
        out.len(),
        row_bytes * height as usize
    );
    for (y, row) in out
        .chunks_exact_mut(row_bytes)
        .take(height as usize)
        .enumerate()
    {
        for (x, pixel) in row.chunks_exact_mut(4).enumerate() {
            let dir = camera.primary_ray(x as u32, y as u32, width, height);
            let color = shade(scene, display, camera.origin, dir);
            pixel.copy_from_slice(&pack_rgba8(color.extend(1.0)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::FlyCamera;

    fn camera_looking_at(origin: Vec3, target: Vec3) -> RayCamera {
        let front = (target - origin).normalize();
        let right = front.cross(Vec3::Y).normalize();
        let up = right.cross(front);
        RayCamera {
            origin,
            front,
            right,
            up,
            focal_length: 1.0 / 22.5f32.to_radians().tan(),
        }
    }

    #[test]
    fn sphere_hit_from_outside() {
        let t = intersect_sphere(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::NEG_Z,
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        );
        assert_eq!(t, Some(4.0));
    }

    #[test]
    fn sphere_behind_origin_is_missed() {
        let t = intersect_sphere(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::Z,
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        );
        assert_eq!(t, None);
    }

    #[test]
    fn sphere_miss_off_axis() {
        let t = intersect_sphere(
            Vec3::new(2.0, 0.0, 5.0),
            Vec3::NEG_Z,
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        );
        assert_eq!(t, None);
    }

    #[test]
    fn origin_inside_sphere_hits_far_side() {
        let t = intersect_sphere(Vec3::ZERO, Vec3::X, Vec4::new(0.0, 0.0, 0.0, 2.0));
        assert_eq!(t, Some(2.0));
    }

    #[test]
    fn ground_parallel_ray_misses() {
        assert_eq!(intersect_ground(Vec3::ZERO, Vec3::X, -1.0), None);
        assert_eq!(intersect_ground(Vec3::ZERO, Vec3::NEG_Y, -1.0), Some(1.0));
        assert_eq!(intersect_ground(Vec3::ZERO, Vec3::Y, -1.0), None);
    }

    #[test]
    fn centre_ray_is_front() {
        let camera = camera_looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        // Odd dimensions put a pixel centre exactly on the axis.
        let dir = camera.primary_ray(50, 50, 101, 101);
        assert!((dir - camera.front).length() < 1e-5);
    }

    #[test]
    fn top_left_ray_points_up_and_left() {
        let camera = camera_looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let dir = camera.primary_ray(0, 0, 800, 600);
        assert!(dir.dot(camera.up) > 0.0);
        assert!(dir.dot(camera.right) < 0.0);
        assert!((dir.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn vertical_edge_matches_fov() {
        let camera = camera_looking_at(Vec3::ZERO, Vec3::NEG_Z);
        // Top edge of a tall image is half the fov above the axis.
        let dir = camera.primary_ray(0, 0, 1, 100_000);
        let angle = dir.dot(camera.front).acos().to_degrees();
        assert!((angle - 22.5).abs() < 0.01, "angle {angle}");
    }

    #[test]
    fn centre_pixel_sees_lit_sphere() {
        let scene = TraceScene {
            spheres: vec![Vec4::new(0.0, 0.0, 0.0, 1.0)],
            ground_height: -10.0,
            light_dir: Vec3::Z,
        };
        let camera = camera_looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let dir = camera.primary_ray(50, 50, 101, 101);
        let color = shade(&scene, DisplayOptions::default(), camera.origin, dir);
        assert!((color - LIGHT_COLOR).length() < 1e-3);
    }

    #[test]
    fn nearest_sphere_wins() {
        let scene = TraceScene {
            spheres: vec![
                Vec4::new(0.0, 0.0, -10.0, 1.0),
                Vec4::new(0.0, 0.0, 0.0, 1.0),
            ],
            ground_height: -10.0,
            light_dir: Vec3::Z,
        };
        // Lit from behind, the near sphere shows only ambient even though
        // the far one faces the light.
        let lit_far = TraceScene {
            light_dir: Vec3::NEG_Z,
            ..scene.clone()
        };
        let color = shade(
            &lit_far,
            DisplayOptions::default(),
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::NEG_Z,
        );
        assert!((color - LIGHT_COLOR * AMBIENT).length() < 1e-3);
        let color = shade(
            &scene,
            DisplayOptions::default(),
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::NEG_Z,
        );
        assert!((color - LIGHT_COLOR).length() < 1e-3);
    }

    #[test]
    fn grid_and_axes_follow_toggles() {
        let scene = TraceScene {
            spheres: Vec::new(),
            ground_height: 0.0,
            light_dir: Vec3::Y,
        };
        let origin = Vec3::new(0.0, 3.0, 0.0);
        let on_both = DisplayOptions {
            show_grid: true,
            show_axes: true,
        };
        let off = DisplayOptions {
            show_grid: false,
            show_axes: false,
        };
        let grid_only = DisplayOptions {
            show_grid: true,
            show_axes: false,
        };

        // Straight down onto the origin: both axes cross there.
        let axis = shade(&scene, on_both, origin, Vec3::NEG_Y);
        assert!(axis.x > axis.z, "x axis is red: {axis}");
        assert_eq!(shade(&scene, off, origin, Vec3::NEG_Y), GROUND_COLOR);

        // (0, 0, 0) is also a grid line crossing.
        let grid = shade(&scene, grid_only, origin, Vec3::NEG_Y);
        assert!(grid.x > GROUND_COLOR.x);

        // Between grid lines nothing is drawn.
        let cell = Vec3::new(0.5, -3.0, 0.5).normalize();
        assert_eq!(shade(&scene, on_both, origin, cell), GROUND_COLOR);
    }

    #[test]
    fn escaping_ray_gets_sky() {
        let scene = TraceScene::default();
        let color = shade(&scene, DisplayOptions::default(), Vec3::ZERO, Vec3::Y);
        assert_eq!(color, sky(Vec3::Y));
    }

    #[test]
    fn packing_clamps_and_orders_channels() {
        assert_eq!(pack_rgba8(Vec4::new(1.0, 0.0, 0.5, 1.0)), [255, 0, 127, 255]);
        assert_eq!(pack_rgba8(Vec4::new(2.0, -1.0, 0.0, 0.0)), [255, 0, 0, 0]);
    }

    #[test]
    fn default_scene_from_default_camera_hits_a_sphere() {
        let mut fly = FlyCamera::new(1.0);
        fly.set_position(0.0, 1.0, 6.0);
        let params = FrameParams::capture(
            &fly,
            0.0,
            0.0,
            0,
            None,
            DisplayOptions::default(),
        );
        let camera = RayCamera::from_params(&params);
        let scene = TraceScene::default();

        let mut image = vec![0u8; 32 * 32 * 4];
        trace_image(&camera, &scene, DisplayOptions::default(), 32, 32, &mut image);

        let lit = image
            .chunks_exact(4)
            .filter(|p| p[0] > 128 && p[1] > 100)
            .count();
        assert!(lit > 0);
        assert!(image.chunks_exact(4).all(|p| p[3] == 255));
    }

    #[test]
    fn empty_image_traces_nothing() {
        let camera = RayCamera::from_params(&FrameParams::capture(
            &FlyCamera::new(1.0),
            0.0,
            0.0,
            0,
            None,
            DisplayOptions::default(),
        ));
        let mut image = Vec::new();
        let scene = TraceScene::default();
        trace_image(&camera, &scene, DisplayOptions::default(), 0, 8, &mut image);
        trace_image(&camera, &scene, DisplayOptions::default(), 8, 0, &mut image);
        assert!(image.is_empty());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "image buffer holds")]
    fn short_buffer_is_caught_in_debug_builds() {
        let camera = RayCamera::from_params(&FrameParams::capture(
            &FlyCamera::new(1.0),
            0.0,
            0.0,
            0,
            None,
            DisplayOptions::default(),
        ));
        let mut image = vec![0u8; 4 * 4 * 4 - 1];
        trace_image(
            &camera,
            &TraceScene::default(),
            DisplayOptions::default(),
            4,
            4,
            &mut image,
        );
    }

    #[test]
    fn scene_from_options_caps_spheres_and_normalizes_light() {
        let options = SceneOptions {
            spheres: vec![[0.0, 0.0, 0.0, 1.0]; 12],
            light_dir: [0.0, 0.0, 0.0],
            ..SceneOptions::default()
        };
        let scene = TraceScene::from_options(&options);
        assert_eq!(scene.spheres.len(), crate::options::MAX_SPHERES);
        assert_eq!(scene.light_dir, Vec3::Y);

        let scene = TraceScene::default();
        assert!((scene.light_dir.length() - 1.0).abs() < 1e-6);
        assert_eq!(scene.spheres[0], Vec4::new(-2.0, 1.0, 0.0, 1.1));
    }
}
