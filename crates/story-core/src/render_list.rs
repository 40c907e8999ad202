//! The flat draw list handed to the platform renderers.
//!
//! Everything on screen is a soft-masked billboard: one instance is a
//! position, a diameter, a premultipliable RGBA color and an emissive glow
//! boost. The simulation composes scenes into this list; the renderers know
//! nothing about skeletons, props or chapters.

use glam::Vec3;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Instance {
    pub pos: [f32; 3],
    pub scale: f32,
    pub color: [f32; 4],
    pub glow: f32,
}

impl Instance {
    pub fn new(pos: Vec3, scale: f32, color: [f32; 3]) -> Self {
        Self {
            pos: pos.to_array(),
            scale,
            color: [color[0], color[1], color[2], 1.0],
            glow: 0.0,
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.color[3] = alpha;
        self
    }

    pub fn with_glow(mut self, glow: f32) -> Self {
        self.glow = glow;
        self
    }
}

/// Order instances far-to-near along the view direction.
///
/// The renderers draw alpha-blended without a depth buffer, so submission
/// order is paint order.
pub fn sort_back_to_front(instances: &mut [Instance], eye: Vec3, target: Vec3) {
    let forward = (target - eye).normalize_or_zero();
    instances.sort_by(|a, b| {
        let da = (Vec3::from(a.pos) - eye).dot(forward);
        let db = (Vec3::from(b.pos) - eye).dot(forward);
        db.partial_cmp(&da).unwrap_or(std::cmp::Ordering::Equal)
    });
}
