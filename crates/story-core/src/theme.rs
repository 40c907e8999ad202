//! Ambient color theming.
//!
//! The scene background and the fog share one color, blended toward the
//! active chapter's theme every frame with the same exponential law as the
//! camera but a slightly faster rate.

use glam::Vec3;

use crate::constants::THEME_LERP_RATE;

/// Parse a `#rrggbb` hex color into linear-ish [0,1] RGB.
///
/// Authoring colors are hand-picked against the final image, so no gamma
/// correction is applied. Malformed input yields black rather than an
/// error; the chapter table is the only caller.
pub fn hex_color(hex: &str) -> [f32; 3] {
    let s = hex.strip_prefix('#').unwrap_or(hex);
    if s.len() != 6 || !s.is_ascii() {
        return [0.0; 3];
    }
    let channel = |i: usize| -> f32 {
        u8::from_str_radix(&s[i..i + 2], 16)
            .map(|v| v as f32 / 255.0)
            .unwrap_or(0.0)
    };
    [channel(0), channel(2), channel(4)]
}

#[derive(Clone, Debug)]
pub struct ThemeBlender {
    pub color: Vec3,
}

impl ThemeBlender {
    pub fn new(initial: [f32; 3]) -> Self {
        Self {
            color: Vec3::from(initial),
        }
    }

    pub fn step(&mut self, target: [f32; 3], dt_sec: f32) {
        let k = (THEME_LERP_RATE * dt_sec).min(1.0);
        self.color += (Vec3::from(target) - self.color) * k;
    }

    pub fn rgb(&self) -> [f32; 3] {
        self.color.to_array()
    }
}
