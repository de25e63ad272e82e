/// Pitch/yaw camera and perspective projection into pixel space
use std::f32::consts::FRAC_PI_2;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::CameraError;
use crate::input::MovementKeys;
use crate::math::{Vec2, Vec3};

/// World up axis
pub const WORLD_UP: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Pitch stays this far inside +-90 degrees so `right` never degenerates
pub const PITCH_MARGIN: f32 = 0.01;

const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 600;

/// Camera settings as read from configuration. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub sensitivity: f32,
    pub speed: f32,
    pub position: [f32; 3],
    pub pitch_degrees: f32,
    pub yaw_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 90.0,
            sensitivity: 1.0 / 4096.0,
            speed: 100.0,
            position: [0.0, -200.0, 0.0],
            pitch_degrees: 0.0,
            yaw_degrees: 0.0,
        }
    }
}

/// A pinhole camera looking along `forward`.
///
/// `forward`, `right` and `up` are recomputed from pitch and yaw on every
/// orientation change and always form a right-handed orthonormal basis
/// (`right x forward = up`).
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pitch: f32,
    yaw: f32,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    width: u32,
    height: u32,
    /// Vertical field of view (radians)
    pub fov: f32,
    pub sensitivity: f32,
    pub speed: f32,
}

impl Camera {
    pub fn new(fov: f32, sensitivity: f32, speed: f32) -> Self {
        let mut camera = Self {
            position: Vec3::zeros(),
            pitch: 0.0,
            yaw: 0.0,
            forward: Vec3::y(),
            right: Vec3::x(),
            up: WORLD_UP,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fov,
            sensitivity,
            speed,
        };
        camera.update_basis();
        camera
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self::new(config.fov_degrees.to_radians(), config.sensitivity, config.speed);
        camera.position = Vec3::from(config.position);
        camera.set_orientation(config.pitch_degrees.to_radians(), config.yaw_degrees.to_radians());
        camera
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Number of pixels a render target for this camera must hold
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Apply a pointer delta. Positive `dx` turns right; negative `dy`
    /// (pointer moving up the screen) tilts up.
    pub fn update_orientation(&mut self, dx: f32, dy: f32) {
        self.set_orientation(
            self.pitch - dy * self.sensitivity,
            self.yaw + dx * self.sensitivity,
        );
    }

    /// Set absolute angles (radians); pitch is clamped short of the poles
    pub fn set_orientation(&mut self, pitch: f32, yaw: f32) {
        let limit = FRAC_PI_2 - PITCH_MARGIN;
        self.pitch = pitch.clamp(-limit, limit);
        self.yaw = yaw;
        self.update_basis();
    }

    /// Move along the camera basis for every held key
    pub fn update_position(&mut self, keys: &MovementKeys, dt: f32) {
        let step = self.speed * dt;

        if keys.forward {
            self.position += self.forward * step;
        }
        if keys.back {
            self.position -= self.forward * step;
        }
        if keys.right {
            self.position += self.right * step;
        }
        if keys.left {
            self.position -= self.right * step;
        }
    }

    pub fn update_viewport(&mut self, width: u32, height: u32) -> Result<(), CameraError> {
        if width == 0 || height == 0 {
            warn!("ignoring viewport {}x{}", width, height);
            return Err(CameraError::InvalidViewport { width, height });
        }

        debug!("viewport {}x{}", width, height);
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Distance of `point` in front of the camera along `forward`
    pub fn depth(&self, point: &Vec3) -> f32 {
        (point - self.position).dot(&self.forward)
    }

    /// Project a world point to pixel coordinates (origin top-left, y down).
    ///
    /// Returns `None` for points on or behind the camera plane.
    pub fn project_point(&self, point: &Vec3) -> Option<Vec2> {
        let relative = point - self.position;
        let depth = relative.dot(&self.forward);
        if depth <= 0.0 {
            return None;
        }

        let focal = 1.0 / (self.fov / 2.0).tan();
        let ndc_x = relative.dot(&self.right) / depth * focal / self.aspect();
        let ndc_y = relative.dot(&self.up) / depth * focal;

        Some(Vec2::new(
            (ndc_x + 1.0) * 0.5 * self.width as f32,
            (1.0 - ndc_y) * 0.5 * self.height as f32,
        ))
    }

    fn update_basis(&mut self) {
        let (sp, cp) = self.pitch.sin_cos();
        let (sy, cy) = self.yaw.sin_cos();

        self.forward = Vec3::new(cp * sy, cp * cy, sp).normalize();
        self.right = self.forward.cross(&WORLD_UP).normalize();
        self.up = self.right.cross(&self.forward);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}
