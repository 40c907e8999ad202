//! Ambient particle fields: sakura petals, fireflies, sparkles, confetti.
//!
//! Each field scatters its particles once from a seeded RNG so every mount
//! of a chapter looks identical, then drifts and twinkles them purely as a
//! function of elapsed time.

use glam::Vec3;
use rand::prelude::*;

use crate::render_list::Instance;

#[derive(Clone, Debug)]
pub struct ParticleField {
    center: Vec3,
    color: [f32; 3],
    size: f32,
    speed: f32,
    opacity: f32,
    // per-particle scatter position and phase offset
    seeds: Vec<(Vec3, f32)>,
}

impl ParticleField {
    pub fn new(
        count: usize,
        center: Vec3,
        extent: Vec3,
        color: [f32; 3],
        size: f32,
        speed: f32,
        opacity: f32,
        seed: u64,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let seeds = (0..count)
            .map(|_| {
                let p = Vec3::new(
                    (rng.gen::<f32>() - 0.5) * extent.x,
                    (rng.gen::<f32>() - 0.5) * extent.y,
                    (rng.gen::<f32>() - 0.5) * extent.z,
                );
                (p, rng.gen::<f32>() * std::f32::consts::TAU)
            })
            .collect();
        Self {
            center,
            color,
            size,
            speed,
            opacity,
            seeds,
        }
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    pub fn emit(&self, t: f32, out: &mut Vec<Instance>) {
        for &(base, phase) in &self.seeds {
            let drift = Vec3::new(
                (t * self.speed + phase).sin() * 0.3,
                (t * self.speed * 0.7 + phase).cos() * 0.3,
                0.0,
            );
            // Twinkle between 40% and 100% of the authored opacity.
            let twinkle = 0.7 + 0.3 * (t * self.speed * 2.0 + phase * 3.0).sin();
            out.push(
                Instance::new(self.center + base + drift, self.size, self.color)
                    .with_alpha(self.opacity * twinkle)
                    .with_glow(0.4),
            );
        }
    }
}
