//! Hand-authored scene props.
//!
//! Props are pure emitters: a variant plus its authored parameters, turned
//! into billboard instances as a function of elapsed time. Floating props
//! (hearts, balloons, clouds, the ring) carry their motion here so no prop
//! holds mutable state between frames.

use glam::Vec3;
use rand::prelude::*;

use crate::render_list::Instance;

const TRUNK: [f32; 3] = [0.29, 0.23, 0.20];
const LAMP_GLOW: [f32; 3] = [1.0, 0.74, 0.35];
const FLAME: [f32; 3] = [1.0, 0.67, 0.0];
const GOLD: [f32; 3] = [1.0, 0.84, 0.0];
const HEART_RED: [f32; 3] = [1.0, 0.0, 0.27];

#[derive(Clone, Debug)]
pub enum Prop {
    /// Large flat wash behind or below a scene (walls, floors, paths).
    Backdrop {
        position: Vec3,
        size: f32,
        color: [f32; 3],
        alpha: f32,
    },
    Moon {
        position: Vec3,
    },
    Hill {
        position: Vec3,
        radius: f32,
        color: [f32; 3],
    },
    SakuraTree {
        position: Vec3,
        scale: f32,
    },
    Tree {
        position: Vec3,
        scale: f32,
    },
    LampPost {
        position: Vec3,
    },
    Stage {
        position: Vec3,
    },
    Speaker {
        position: Vec3,
    },
    Bed {
        position: Vec3,
    },
    Cake {
        position: Vec3,
    },
    Ring {
        position: Vec3,
    },
    FloatingHeart {
        position: Vec3,
        scale: f32,
        delay: f32,
    },
    Balloon {
        position: Vec3,
        color: [f32; 3],
        speed: f32,
    },
    Cloud {
        position: Vec3,
        opacity: f32,
        scale: f32,
        drift: f32,
    },
}

impl Prop {
    pub fn emit(&self, t: f32, out: &mut Vec<Instance>) {
        match *self {
            Prop::Backdrop {
                position,
                size,
                color,
                alpha,
            } => {
                out.push(Instance::new(position, size, color).with_alpha(alpha));
            }
            Prop::Moon { position } => {
                // Halo first so the disc paints over it.
                out.push(
                    Instance::new(position + Vec3::new(0.0, 0.0, -1.0), 20.0, [1.0, 0.98, 0.90])
                        .with_alpha(0.15)
                        .with_glow(0.5),
                );
                out.push(
                    Instance::new(position, 14.0, [1.0, 0.98, 0.90]).with_glow(1.0),
                );
            }
            Prop::Hill {
                position,
                radius,
                color,
            } => {
                out.push(Instance::new(position, radius * 2.0, color));
            }
            Prop::SakuraTree { position, scale } => {
                emit_tree(
                    position,
                    scale,
                    &[
                        (Vec3::new(0.0, 2.7, 0.0), 2.6, [1.0, 0.78, 0.87]),
                        (Vec3::new(0.8, 3.0, 0.4), 2.0, [1.0, 0.72, 0.70]),
                        (Vec3::new(-0.8, 2.9, -0.4), 2.2, [1.0, 0.69, 0.80]),
                        (Vec3::new(0.0, 3.8, 0.0), 1.8, [1.0, 0.62, 0.73]),
                    ],
                    out,
                );
            }
            Prop::Tree { position, scale } => {
                emit_tree(
                    position,
                    scale,
                    &[
                        (Vec3::new(0.0, 2.5, 0.0), 2.4, [0.18, 0.42, 0.31]),
                        (Vec3::new(0.6, 3.1, 0.3), 1.8, [0.25, 0.57, 0.42]),
                        (Vec3::new(-0.6, 3.0, -0.3), 2.0, [0.11, 0.26, 0.20]),
                        (Vec3::new(0.0, 3.7, 0.0), 1.6, [0.32, 0.72, 0.53]),
                    ],
                    out,
                );
            }
            Prop::LampPost { position } => {
                for i in 0..4 {
                    out.push(Instance::new(
                        position + Vec3::new(0.0, 0.7 + 1.2 * i as f32, 0.0),
                        0.16,
                        [0.1, 0.1, 0.1],
                    ));
                }
                out.push(
                    Instance::new(position + Vec3::new(0.0, 5.0, 0.0), 0.7, LAMP_GLOW)
                        .with_glow(1.2),
                );
                // Light cone suggestion below the head.
                out.push(
                    Instance::new(position + Vec3::new(0.0, 2.5, 0.2), 3.0, LAMP_GLOW)
                        .with_alpha(0.05),
                );
            }
            Prop::Stage { position } => {
                // Platform slab.
                for x in [-3.0_f32, 0.0, 3.0] {
                    out.push(Instance::new(
                        position + Vec3::new(x, 0.5, 0.0),
                        4.0,
                        [0.07, 0.07, 0.07],
                    ));
                }
                // Backdrop wall and light truss.
                out.push(Instance::new(
                    position + Vec3::new(0.0, 3.5, -2.8),
                    14.0,
                    [0.04, 0.04, 0.04],
                ));
                out.push(Instance::new(
                    position + Vec3::new(0.0, 6.5, 0.0),
                    0.4,
                    [0.2, 0.2, 0.2],
                ));
            }
            Prop::Speaker { position } => {
                out.push(Instance::new(position, 1.2, [0.1, 0.1, 0.1]));
                out.push(Instance::new(
                    position + Vec3::new(0.0, 0.3, 0.32),
                    0.5,
                    [0.02, 0.02, 0.02],
                ));
                out.push(Instance::new(
                    position + Vec3::new(0.0, -0.3, 0.32),
                    0.7,
                    [0.02, 0.02, 0.02],
                ));
                // Woofer flicker in time with the beat.
                let throb = 0.3 + 0.1 * (t * 15.0).sin().abs();
                out.push(
                    Instance::new(position + Vec3::new(0.0, -0.3, 0.34), 0.3, [0.0, 1.0, 1.0])
                        .with_alpha(throb)
                        .with_glow(0.6),
                );
            }
            Prop::Bed { position } => {
                out.push(Instance::new(
                    position + Vec3::new(0.0, 0.3, 0.0),
                    2.2,
                    [0.94, 0.94, 0.94],
                ));
                out.push(Instance::new(
                    position + Vec3::new(0.0, 0.6, -0.9),
                    0.9,
                    [0.88, 0.98, 0.99],
                ));
                out.push(Instance::new(
                    position + Vec3::new(0.0, 0.62, 0.3),
                    1.8,
                    [0.56, 0.88, 0.94],
                ));
            }
            Prop::Cake { position } => {
                out.push(Instance::new(
                    position + Vec3::new(0.0, 0.05, 0.0),
                    1.5,
                    [1.0, 1.0, 1.0],
                ));
                out.push(Instance::new(
                    position + Vec3::new(0.0, 0.4, 0.0),
                    1.2,
                    [1.0, 0.94, 0.95],
                ));
                out.push(Instance::new(
                    position + Vec3::new(0.0, 0.7, 0.0),
                    1.24,
                    [1.0, 0.60, 0.73],
                ));
                out.push(Instance::new(
                    position + Vec3::new(0.0, 0.9, 0.0),
                    0.1,
                    [0.53, 0.8, 1.0],
                ));
                // Candle flame flickers.
                let flicker = 0.12 + 0.03 * (t * 11.0).sin();
                out.push(
                    Instance::new(position + Vec3::new(0.0, 1.15, 0.0), flicker, FLAME)
                        .with_glow(1.5),
                );
            }
            Prop::Ring { position } => {
                let bob = (t * 2.0).sin() * 0.1;
                let p = position + Vec3::new(0.0, bob, 0.0);
                out.push(Instance::new(p, 0.5, GOLD).with_glow(0.5));
                out.push(Instance::new(p + Vec3::new(0.0, 0.05, 0.05), 0.28, [0.0, 0.0, 0.0]).with_alpha(0.9));
                out.push(
                    Instance::new(p + Vec3::new(0.0, 0.26, 0.0), 0.16, [1.0, 1.0, 1.0])
                        .with_glow(1.5),
                );
            }
            Prop::FloatingHeart {
                position,
                scale,
                delay,
            } => {
                let tt = t + delay;
                let bob = (tt * 1.5).sin() * 0.2;
                let pulse = scale + (tt * 3.0).sin() * 0.1;
                let p = position + Vec3::new(0.0, bob, 0.0);
                // Two lobes and a point, pulsing together.
                out.push(
                    Instance::new(p + Vec3::new(-0.18 * pulse, 0.1 * pulse, 0.0), 0.5 * pulse, HEART_RED)
                        .with_glow(0.8),
                );
                out.push(
                    Instance::new(p + Vec3::new(0.18 * pulse, 0.1 * pulse, 0.0), 0.5 * pulse, HEART_RED)
                        .with_glow(0.8),
                );
                out.push(
                    Instance::new(p + Vec3::new(0.0, -0.2 * pulse, 0.0), 0.45 * pulse, HEART_RED)
                        .with_glow(0.8),
                );
            }
            Prop::Balloon {
                position,
                color,
                speed,
            } => {
                let bob = (t * speed).sin() * 0.15;
                let p = position + Vec3::new(0.0, bob, 0.0);
                out.push(Instance::new(p + Vec3::new(0.0, 0.5, 0.0), 0.6, color).with_alpha(0.9));
                out.push(Instance::new(p + Vec3::new(0.0, 0.15, 0.0), 0.1, color));
                out.push(
                    Instance::new(p + Vec3::new(0.0, -0.3, 0.0), 0.03, [0.93, 0.93, 0.93]),
                );
            }
            Prop::Cloud {
                position,
                opacity,
                scale,
                drift,
            } => {
                let sway = (t * drift * 2.0).sin() * 0.4;
                let p = position + Vec3::new(sway, 0.0, 0.0);
                let white = [1.0, 1.0, 1.0];
                out.push(Instance::new(p, 3.0 * scale, white).with_alpha(opacity));
                out.push(
                    Instance::new(p + Vec3::new(-1.2 * scale, -0.3 * scale, 0.0), 2.0 * scale, white)
                        .with_alpha(opacity),
                );
                out.push(
                    Instance::new(p + Vec3::new(1.2 * scale, -0.2 * scale, 0.0), 2.2 * scale, white)
                        .with_alpha(opacity),
                );
            }
        }
    }
}

fn emit_tree(
    position: Vec3,
    scale: f32,
    foliage: &[(Vec3, f32, [f32; 3])],
    out: &mut Vec<Instance>,
) {
    out.push(Instance::new(
        position + Vec3::new(0.0, 1.0 * scale, 0.0),
        0.5 * scale,
        TRUNK,
    ));
    out.push(Instance::new(
        position + Vec3::new(0.0, 1.8 * scale, 0.0),
        0.45 * scale,
        TRUNK,
    ));
    for &(off, size, color) in foliage {
        out.push(Instance::new(position + off * scale, size * scale, color));
    }
}

/// One member of the dance-chapter audience.
#[derive(Clone, Copy, Debug)]
pub struct CrowdMember {
    pub x: f32,
    pub z: f32,
    pub scale: f32,
    pub color: [f32; 3],
    pub speed: f32,
    pub phase: f32,
    pub glow_stick: bool,
    pub female: bool,
    hair: [f32; 3],
}

impl CrowdMember {
    /// Scatter the audience from a seeded RNG, keeping the area around the
    /// seated main character clear so she stays visible from the camera.
    pub fn scatter(candidates: usize, seed: u64, clear_center: [f32; 2], clear_radius: f32) -> Vec<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut members = Vec::new();
        for _ in 0..candidates {
            let x = (rng.gen::<f32>() - 0.5) * 14.0;
            let z = 2.5 + rng.gen::<f32>() * 6.0;
            let scale = 0.8 + rng.gen::<f32>() * 0.4;
            let color = if rng.gen::<f32>() > 0.5 {
                [0.19, 0.12, 0.20]
            } else {
                [0.10, 0.04, 0.10]
            };
            let speed = 8.0 + rng.gen::<f32>() * 4.0;
            let phase = rng.gen::<f32>() * 10.0;
            let glow_stick = rng.gen::<f32>() > 0.7;
            let female = rng.gen::<f32>() > 0.5;
            let hair = match rng.gen_range(0..3) {
                0 => [0.13, 0.13, 0.13],
                1 => [0.37, 0.26, 0.16],
                _ => [0.85, 0.55, 0.60],
            };

            let dx = x - clear_center[0];
            let dz = z - clear_center[1];
            if (dx * dx + dz * dz).sqrt() < clear_radius {
                continue;
            }
            if x > 0.5 && x < 2.5 && z > 2.5 {
                continue;
            }

            members.push(CrowdMember {
                x,
                z,
                scale,
                color,
                speed,
                phase,
                glow_stick,
                female,
                hair,
            });
        }
        members
    }

    pub fn emit(&self, t: f32, out: &mut Vec<Instance>) {
        // Bobbing and jumping to the music, each member on its own beat.
        let jump = (t * self.speed + self.phase).sin().abs() * 0.2;
        let sway = (t * self.speed * 0.5 + self.phase).sin() * 0.05;
        let base = Vec3::new(self.x + sway * 0.5, jump, self.z);
        let s = self.scale;

        let body_y = if self.female { 0.25 } else { 0.3 };
        out.push(Instance::new(base + Vec3::new(0.0, body_y * s, 0.0), 0.45 * s, self.color));
        out.push(Instance::new(base + Vec3::new(0.0, (body_y + 0.18) * s, 0.0), 0.40 * s, self.color));
        out.push(Instance::new(
            base + Vec3::new(0.0, 0.65 * s, 0.0),
            0.44 * s,
            [1.0, 0.91, 0.84],
        ));
        out.push(Instance::new(base + Vec3::new(0.0, 0.72 * s, -0.05), 0.46 * s, self.hair));

        if self.glow_stick {
            // Arms thrown up, stick waving overhead.
            let wave = (t * 10.0 + self.phase).sin() * 0.15;
            for side in [-1.0, 1.0] {
                out.push(Instance::new(
                    base + Vec3::new(side * 0.22 * s, 0.8 * s, 0.0),
                    0.12 * s,
                    self.color,
                ));
            }
            out.push(
                Instance::new(base + Vec3::new(0.22 * s + wave, 1.05 * s, 0.1), 0.12 * s, [0.0, 1.0, 1.0])
                    .with_glow(1.2),
            );
        } else {
            for side in [-1.0, 1.0] {
                out.push(Instance::new(
                    base + Vec3::new(side * 0.24 * s, 0.38 * s, 0.0),
                    0.12 * s,
                    self.color,
                ));
            }
        }
    }
}
