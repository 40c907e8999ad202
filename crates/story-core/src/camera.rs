//! Camera description and the per-frame camera rig.
//!
//! Each chapter carries a nominal camera position. The rig pulls the camera
//! back and up depending on the viewport shape so side-by-side characters
//! survive narrow screens, then chases the adjusted target with an
//! exponential blend. The look-at point is re-applied directly every frame;
//! it only reads as a snap if the position teleports, which the blend
//! prevents.

use glam::{Mat4, Vec3};

use crate::constants::{CAMERA_FOV_Y, CAMERA_LERP_RATE, CAMERA_ZFAR, CAMERA_ZNEAR, MOBILE_WIDTH_PX};

/// Simple right-handed camera with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(eye: Vec3, target: Vec3, aspect: f32) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_Y,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> [[f32; 4]; 4] {
        (self.projection_matrix() * self.view_matrix()).to_cols_array_2d()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportClass {
    Portrait,
    MobileLandscape,
    Desktop,
}

/// Additive camera adjustments for one viewport class.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraOffsets {
    pub z_add: f32,
    pub y_add: f32,
    pub look_y: f32,
}

impl ViewportClass {
    pub fn classify(width: f32, height: f32) -> Self {
        let aspect = width / height.max(1.0);
        if aspect < 1.0 {
            ViewportClass::Portrait
        } else if width < MOBILE_WIDTH_PX {
            ViewportClass::MobileLandscape
        } else {
            ViewportClass::Desktop
        }
    }

    /// Portrait phones pull far back and push content to the top half so
    /// the text overlay at the bottom never covers the characters.
    pub fn offsets(self) -> CameraOffsets {
        match self {
            ViewportClass::Portrait => CameraOffsets {
                z_add: 7.5,
                y_add: 1.2,
                look_y: 2.0,
            },
            ViewportClass::MobileLandscape => CameraOffsets {
                z_add: 2.5,
                y_add: 0.5,
                look_y: 1.0,
            },
            ViewportClass::Desktop => CameraOffsets {
                z_add: 0.0,
                y_add: 0.0,
                look_y: 0.8,
            },
        }
    }

    pub fn look_target(self) -> Vec3 {
        Vec3::new(0.0, self.offsets().look_y, 0.0)
    }
}

/// Smoothed camera position chasing the active chapter's adjusted target.
#[derive(Clone, Debug)]
pub struct CameraRig {
    pub position: Vec3,
}

impl CameraRig {
    pub fn new(initial: Vec3) -> Self {
        Self { position: initial }
    }

    /// Blend toward `nominal` adjusted for the viewport class. The blend
    /// factor is `CAMERA_LERP_RATE * dt`, clamped so a long frame cannot
    /// overshoot the target.
    pub fn step(&mut self, nominal: Vec3, class: ViewportClass, dt_sec: f32) {
        let off = class.offsets();
        let adjusted = Vec3::new(nominal.x, nominal.y + off.y_add, nominal.z + off.z_add);
        let k = (CAMERA_LERP_RATE * dt_sec).min(1.0);
        self.position += (adjusted - self.position) * k;
    }
}
