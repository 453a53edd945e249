use glam::{Mat4, Vec2, Vec3};

use super::movement::Movement;
use crate::options::CameraOptions;

/// Upper bound for the configurable pitch limit. Looking exactly along
/// world up would collapse the right vector to zero.
const MAX_PITCH_LIMIT: f32 = 89.9;

/// Near clipping plane used by [`FlyCamera::projection`].
const ZNEAR: f32 = 0.1;
/// Far clipping plane used by [`FlyCamera::projection`].
const ZFAR: f32 = 1000.0;

/// Clamp ranges and rates applied to every camera mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraLimits {
    /// Pitch stays within `[-pitch_limit, pitch_limit]`, strictly below 90.
    pub pitch_limit: f32,
    /// Narrowest field of view in degrees.
    pub min_fov: f32,
    /// Widest field of view in degrees.
    pub max_fov: f32,
    /// Speed multiplier per second while a speed modifier is held.
    pub speed_change_rate: f32,
    /// Slowest movement speed.
    pub min_speed: f32,
    /// Fastest movement speed.
    pub max_speed: f32,
}

impl CameraLimits {
    /// Pull limits from options, repairing inverted or out-of-range values
    /// so that later `clamp` calls are always well-formed.
    fn from_options(options: &CameraOptions) -> Self {
        let finite_or = |v: f32, fallback: f32| if v.is_finite() { v } else { fallback };

        let pitch_limit =
            finite_or(options.pitch_limit.abs(), 89.0).min(MAX_PITCH_LIMIT);
        let (a, b) = (finite_or(options.min_fov, 1.0), finite_or(options.max_fov, 90.0));
        let (min_fov, max_fov) = if a <= b { (a, b) } else { (b, a) };
        let (a, b) = (
            finite_or(options.min_speed, 0.1),
            finite_or(options.max_speed, 100.0),
        );
        let (min_speed, max_speed) = if a <= b { (a, b) } else { (b, a) };

        Self {
            pitch_limit,
            min_fov,
            max_fov,
            speed_change_rate: finite_or(options.speed_change_rate, 2.0).max(1.0),
            min_speed,
            max_speed,
        }
    }
}

impl Default for CameraLimits {
    fn default() -> Self {
        Self::from_options(&CameraOptions::default())
    }
}

/// Free-look perspective camera.
///
/// Orientation is stored as yaw/pitch in degrees; the `front`, `right` and
/// `up` basis and the view matrix are recomputed on every read so they can
/// never disagree with the angles.
///
/// Conventions:
/// - yaw −90° looks down −Z; increasing yaw turns right.
/// - pointer Y grows downward on screen, so moving the pointer up raises
///   pitch (looks up).
/// - positive scroll (wheel up) narrows the field of view (zoom in).
/// - each held movement key displaces independently; diagonal movement is
///   therefore √2 faster than axis-aligned movement.
#[derive(Debug, Clone, PartialEq)]
pub struct FlyCamera {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    fov: f32,
    aspect: f32,
    movement_speed: f32,
    mouse_sensitivity: f32,
    limits: CameraLimits,
    /// Last pointer position; `None` until the first move after creation
    /// or [`reset_pointer`](Self::reset_pointer).
    last_pointer: Option<Vec2>,
}

impl FlyCamera {
    /// Create a camera with default options for the given aspect ratio.
    #[must_use]
    pub fn new(aspect: f32) -> Self {
        Self::from_options(&CameraOptions::default(), aspect)
    }

    /// Create a camera from options for the given aspect ratio
    /// (width / height).
    #[must_use]
    pub fn from_options(options: &CameraOptions, aspect: f32) -> Self {
        let defaults = CameraOptions::default();
        let limits = CameraLimits::from_options(options);
        let position = Vec3::from_array(options.position);
        let mut camera = Self {
            position: if position.is_finite() {
                position
            } else {
                Vec3::from_array(defaults.position)
            },
            yaw: if options.yaw.is_finite() {
                options.yaw
            } else {
                defaults.yaw
            },
            pitch: 0.0,
            fov: 45.0f32.clamp(limits.min_fov, limits.max_fov),
            aspect: 1.0,
            movement_speed: 0.0,
            mouse_sensitivity: if options.mouse_sensitivity.is_finite() {
                options.mouse_sensitivity
            } else {
                defaults.mouse_sensitivity
            },
            limits,
            last_pointer: None,
        };
        camera.set_aspect(aspect);
        camera.set_pitch(options.pitch);
        camera.set_fov(options.fov);
        let speed = if options.movement_speed.is_finite() {
            options.movement_speed
        } else {
            defaults.movement_speed
        };
        camera.movement_speed = speed.clamp(limits.min_speed, limits.max_speed);
        camera
    }

    // ── Mutations ────────────────────────────────────────────────────────

    /// Set the absolute world position. Non-finite coordinates are
    /// ignored.
    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        let position = Vec3::new(x, y, z);
        if position.is_finite() {
            self.position = position;
        }
    }

    /// Set pitch in degrees, clamped to the pitch limit.
    pub fn set_pitch(&mut self, pitch: f32) {
        if pitch.is_finite() {
            self.pitch =
                pitch.clamp(-self.limits.pitch_limit, self.limits.pitch_limit);
        }
    }

    /// Set the field of view in degrees, clamped to the fov range.
    pub fn set_fov(&mut self, fov: f32) {
        if fov.is_finite() {
            self.fov = fov.clamp(self.limits.min_fov, self.limits.max_fov);
        }
    }

    /// Update the aspect ratio after a resize. Degenerate ratios are
    /// ignored.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Forget the last pointer position so the next move only re-seeds it.
    ///
    /// Call when the pointer re-enters or the window regains focus;
    /// otherwise the jump across the gap would spin the camera.
    pub fn reset_pointer(&mut self) {
        self.last_pointer = None;
    }

    /// Apply an absolute pointer position.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        let current = Vec2::new(x, y);
        let Some(last) = self.last_pointer.replace(current) else {
            return;
        };

        let delta = (current - last) * self.mouse_sensitivity;
        self.yaw += delta.x;
        self.set_pitch(self.pitch - delta.y);
    }

    /// Apply a vertical scroll amount. Positive zooms in.
    pub fn on_scroll(&mut self, delta_y: f32) {
        if delta_y.is_finite() {
            self.set_fov(self.fov - delta_y);
        }
    }

    /// Apply one held movement key for `delta_time` seconds.
    pub fn on_keyboard(&mut self, movement: Movement, delta_time: f32) {
        if !delta_time.is_finite() {
            return;
        }
        let velocity = self.movement_speed * delta_time;
        match movement {
            Movement::Forward => self.position += self.front() * velocity,
            Movement::Backward => self.position -= self.front() * velocity,
            Movement::Left => self.position -= self.right() * velocity,
            Movement::Right => self.position += self.right() * velocity,
            Movement::Up => self.position += Vec3::Y * velocity,
            Movement::Down => self.position -= Vec3::Y * velocity,
            Movement::SpeedUp => self.scale_speed(delta_time),
            Movement::SpeedDown => self.scale_speed(-delta_time),
        }
    }

    /// Per-frame hook. Keeps yaw within (-180, 180] so long sessions of
    /// turning in one direction do not lose precision.
    pub fn on_render(&mut self, _delta_time: f32) {
        if self.yaw > 180.0 || self.yaw <= -180.0 {
            self.yaw = (self.yaw + 180.0).rem_euclid(360.0) - 180.0;
            if self.yaw <= -180.0 {
                self.yaw = 180.0;
            }
        }
    }

    fn scale_speed(&mut self, exponent: f32) {
        let scaled =
            self.movement_speed * self.limits.speed_change_rate.powf(exponent);
        self.movement_speed =
            scaled.clamp(self.limits.min_speed, self.limits.max_speed);
    }

    // ── Derived state ────────────────────────────────────────────────────

    /// Unit view direction from yaw/pitch.
    #[must_use]
    pub fn front(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize()
    }

    /// Unit camera right vector (horizontal, never tilted).
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.front().cross(Vec3::Y).normalize()
    }

    /// Unit camera up vector, orthogonal to front and right.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        let front = self.front();
        front.cross(Vec3::Y).normalize().cross(front).normalize()
    }

    /// World-to-camera look-at matrix.
    #[must_use]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front(), self.up())
    }

    /// Perspective projection using the current fov and aspect.
    #[must_use]
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, ZNEAR, ZFAR)
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// World-space position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Vertical field of view in degrees.
    #[must_use]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Yaw in degrees.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Viewport aspect ratio (width / height).
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Current movement speed in world units per second.
    #[must_use]
    pub fn movement_speed(&self) -> f32 {
        self.movement_speed
    }

    /// Active clamp ranges.
    #[must_use]
    pub fn limits(&self) -> CameraLimits {
        self.limits
    }
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(800.0 / 600.0)
    }
}
