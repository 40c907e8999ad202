// Presentation-shell state transitions.

use story_core::{AppState, AudioFailure};

#[test]
fn start_leaves_the_start_screen_once() {
    let state = AppState::default();
    assert!(!state.started);
    let state = state.start();
    assert!(state.started);
    // Idempotent; a second click is harmless.
    assert!(state.start().started);
}

#[test]
fn mute_toggles_back_and_forth() {
    let state = AppState::default();
    let state = state.toggle_mute();
    assert!(state.muted);
    let state = state.toggle_mute();
    assert!(!state.muted);
}

#[test]
fn load_failure_raises_the_banner_until_a_file_arrives() {
    let state = AppState::default().audio_failed(AudioFailure::Load);
    assert!(state.show_music_banner());

    let state = state.select_file("blob:abc123".to_string());
    assert!(!state.show_music_banner(), "user file must clear the banner");
    assert_eq!(state.failure, None);
    assert_eq!(state.user_source.as_deref(), Some("blob:abc123"));
}

#[test]
fn autoplay_block_is_silent() {
    let state = AppState::default()
        .start()
        .audio_failed(AudioFailure::AutoplayBlocked);
    assert!(
        !state.show_music_banner(),
        "an expected autoplay rejection must not alarm the user"
    );
    assert_eq!(state.failure, Some(AudioFailure::AutoplayBlocked));
}

#[test]
fn recovery_clears_a_pending_failure() {
    let state = AppState::default()
        .audio_failed(AudioFailure::Load)
        .audio_recovered();
    assert_eq!(state.failure, None);
    assert!(!state.show_music_banner());
}

#[test]
fn chapter_changes_flow_through_state() {
    let state = AppState::default().chapter_changed(3);
    assert_eq!(state.chapter_index, 3);
}

#[test]
fn failures_render_human_messages() {
    assert!(!AudioFailure::Load.to_string().is_empty());
    assert!(!AudioFailure::AutoplayBlocked.to_string().is_empty());
}
