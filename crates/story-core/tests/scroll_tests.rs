// Scroll mapping and damping properties.

use story_core::{
    chapter_index, chapter_position, overlay_opacity, ChapterTracker, ScrollState, CHAPTER_COUNT,
};

const N: usize = CHAPTER_COUNT;

#[test]
fn chapter_index_covers_endpoints() {
    assert_eq!(chapter_index(0.0, N), 0);
    assert_eq!(chapter_index(1.0, N), N - 1);
}

#[test]
fn chapter_index_is_monotonic_and_in_range() {
    let mut prev = 0usize;
    for i in 0..=1000 {
        let offset = i as f32 / 1000.0;
        let idx = chapter_index(offset, N);
        assert!(idx < N, "index {idx} out of range at offset {offset}");
        assert!(
            idx >= prev,
            "index decreased from {prev} to {idx} at offset {offset}"
        );
        prev = idx;
    }
}

#[test]
fn chapter_index_clamps_out_of_range_offsets() {
    assert_eq!(chapter_index(-0.5, N), 0);
    assert_eq!(chapter_index(1.5, N), N - 1);
}

fn offset_for_position(pos: f32) -> f32 {
    pos / (N - 1) as f32
}

#[test]
fn overlay_opacity_is_continuous_at_fade_boundaries() {
    // Inside chapter 2's window, well away from the final-hold tail.
    for (just_inside, boundary) in [(2.1999, 2.2), (2.8001, 2.8)] {
        let near = overlay_opacity(offset_for_position(just_inside), N);
        let at = overlay_opacity(offset_for_position(boundary), N);
        assert!(
            (near - at).abs() < 2e-3,
            "opacity jumps at fraction boundary: {near} vs {at}"
        );
        assert!((at - 1.0).abs() < 1e-3);
    }
}

#[test]
fn overlay_opacity_fades_at_window_edges() {
    let early = overlay_opacity(offset_for_position(2.05), N);
    assert!((early - 0.25).abs() < 1e-2, "fade-in at f=0.05: {early}");
    let late = overlay_opacity(offset_for_position(2.95), N);
    assert!((late - 0.25).abs() < 1e-2, "fade-out at f=0.95: {late}");
}

#[test]
fn overlay_opacity_is_forced_on_past_the_final_hold() {
    // position 5.9 would be deep in fade-out territory, but the final
    // chapter's text never fades.
    for pos in [5.51, 5.9, 5.99, 6.0] {
        let op = overlay_opacity(offset_for_position(pos), N);
        assert_eq!(op, 1.0, "text must stay visible at position {pos}");
    }
}

#[test]
fn damped_offset_converges_without_overshoot() {
    let mut scroll = ScrollState::new(N);
    scroll.apply_wheel(1e9, 800.0); // slam the target to 1.0
    assert_eq!(scroll.target(), 1.0);

    let mut prev = scroll.offset();
    for _ in 0..600 {
        scroll.step(1.0 / 60.0);
        let cur = scroll.offset();
        assert!(cur >= prev, "offset moved away from the target");
        assert!(cur <= 1.0, "offset overshot the target: {cur}");
        prev = cur;
    }
    assert!(
        (scroll.offset() - 1.0).abs() < 1e-3,
        "offset failed to converge: {}",
        scroll.offset()
    );
}

#[test]
fn wheel_input_clamps_target_to_unit_range() {
    let mut scroll = ScrollState::new(N);
    scroll.apply_wheel(-1e9, 800.0);
    assert_eq!(scroll.target(), 0.0);
    scroll.apply_wheel(1e9, 800.0);
    assert_eq!(scroll.target(), 1.0);
}

#[test]
fn drag_input_is_inverted_relative_to_wheel() {
    let mut a = ScrollState::new(N);
    let mut b = ScrollState::new(N);
    a.apply_wheel(300.0, 800.0);
    b.apply_drag(-300.0, 800.0);
    assert!((a.target() - b.target()).abs() < 1e-6);
}

#[test]
fn keyboard_paging_snaps_between_chapters() {
    let mut scroll = ScrollState::new(N);
    scroll.jump_chapters(1);
    assert!((scroll.target() - 1.0 / (N - 1) as f32).abs() < 1e-6);
    scroll.jump_chapters(-1);
    scroll.jump_chapters(-1); // clamped at the first chapter
    assert_eq!(scroll.target(), 0.0);
    for _ in 0..20 {
        scroll.jump_chapters(1);
    }
    assert_eq!(scroll.target(), 1.0, "paging must clamp at the last chapter");
}

#[test]
fn tracker_fires_once_per_index_change() {
    let mut tracker = ChapterTracker::new();
    assert_eq!(tracker.observe(0), Some(0));
    assert_eq!(tracker.observe(0), None);
    assert_eq!(tracker.observe(0), None);
    assert_eq!(tracker.observe(1), Some(1));
    assert_eq!(tracker.observe(1), None);
    assert_eq!(tracker.observe(0), Some(0));
    assert_eq!(tracker.current(), Some(0));
}

#[test]
fn position_and_index_agree() {
    for i in 0..=100 {
        let offset = i as f32 / 100.0;
        let pos = chapter_position(offset, N);
        assert_eq!(chapter_index(offset, N), (pos.round() as usize).min(N - 1));
    }
}
