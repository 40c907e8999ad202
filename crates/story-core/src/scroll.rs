//! Scroll input and the scroll-to-chapter mapping.
//!
//! Wheel, touch and keyboard input move a clamped *target* offset; the
//! published offset chases it with an exponential time constant so the
//! camera never jumps. Everything downstream (scene mounting, overlay
//! fading, camera blending) reads the damped offset once per frame.

use crate::constants::{OVERLAY_FADE_BAND, OVERLAY_FINAL_HOLD, SCROLL_DAMPING_SEC};

/// Map a normalized scroll offset to the chapter occupying it.
///
/// Monotonically non-decreasing in `offset`, always a valid index.
#[inline]
pub fn chapter_index(offset: f32, chapter_count: usize) -> usize {
    let total = chapter_count.saturating_sub(1) as f32;
    let idx = (offset.clamp(0.0, 1.0) * total).round();
    (idx as usize).min(chapter_count - 1)
}

/// Continuous chapter-space position, 0.0 ..= chapter_count - 1.
#[inline]
pub fn chapter_position(offset: f32, chapter_count: usize) -> f32 {
    offset.clamp(0.0, 1.0) * chapter_count.saturating_sub(1) as f32
}

/// Fraction of the way through the current chapter's occupancy window.
#[inline]
pub fn chapter_fraction(offset: f32, chapter_count: usize) -> f32 {
    chapter_position(offset, chapter_count).fract()
}

/// Opacity of the chapter text overlay.
///
/// Fades in over the first fifth of the window, holds at 1, fades out over
/// the last fifth. The tail of the scroll always shows text: the final
/// chapter has no "next" to fade toward.
pub fn overlay_opacity(offset: f32, chapter_count: usize) -> f32 {
    let pos = chapter_position(offset, chapter_count);
    let total = chapter_count.saturating_sub(1) as f32;
    if pos > total - OVERLAY_FINAL_HOLD {
        return 1.0;
    }
    let f = pos.fract();
    if f < OVERLAY_FADE_BAND {
        f / OVERLAY_FADE_BAND
    } else if f > 1.0 - OVERLAY_FADE_BAND {
        (1.0 - f) / OVERLAY_FADE_BAND
    } else {
        1.0
    }
}

/// Edge-triggered chapter change detection.
///
/// `observe` is called every frame with the rounded index and returns
/// `Some(index)` only when it differs from the last seen value, so scene
/// remounts and overlay text swaps happen exactly once per transition.
#[derive(Debug, Default)]
pub struct ChapterTracker {
    last: Option<usize>,
}

impl ChapterTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, index: usize) -> Option<usize> {
        if self.last == Some(index) {
            None
        } else {
            self.last = Some(index);
            Some(index)
        }
    }

    pub fn current(&self) -> Option<usize> {
        self.last
    }
}

/// Damped scroll position over `pages` stacked viewport heights.
#[derive(Debug, Clone)]
pub struct ScrollState {
    target: f32,
    offset: f32,
    pages: usize,
    damping_sec: f32,
}

impl ScrollState {
    pub fn new(pages: usize) -> Self {
        Self {
            target: 0.0,
            offset: 0.0,
            pages: pages.max(2),
            damping_sec: SCROLL_DAMPING_SEC,
        }
    }

    /// Damped offset in [0, 1], sampled once per rendered frame.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Wheel input: pixels of vertical delta over the scrollable span
    /// (`pages - 1` viewport heights, mirroring a stacked-sections page).
    pub fn apply_wheel(&mut self, delta_px: f32, viewport_h: f32) {
        let span = viewport_h.max(1.0) * (self.pages - 1) as f32;
        self.target = (self.target + delta_px / span).clamp(0.0, 1.0);
    }

    /// Touch drag input. A downward drag (negative delta) scrolls forward,
    /// so the sign is flipped relative to wheel deltas.
    pub fn apply_drag(&mut self, delta_px: f32, viewport_h: f32) {
        self.apply_wheel(-delta_px, viewport_h);
    }

    /// Keyboard paging: snap the target to the previous or next chapter.
    pub fn jump_chapters(&mut self, direction: i32) {
        let total = (self.pages - 1) as i32;
        let here = chapter_index(self.target, self.pages) as i32;
        let next = (here + direction).clamp(0, total);
        self.target = next as f32 / total as f32;
    }

    /// Advance the damped offset toward the target. Never overshoots and
    /// stays inside [0, 1].
    pub fn step(&mut self, dt_sec: f32) {
        let alpha = 1.0 - (-dt_sec / self.damping_sec).exp();
        self.offset += (self.target - self.offset) * alpha;
        self.offset = self.offset.clamp(0.0, 1.0);
    }
}
