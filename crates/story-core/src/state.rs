//! Presentation-shell state.
//!
//! One explicit value with pure transition functions instead of scattered
//! mutable flags, so the shell's behavior is testable without a DOM or a
//! rendering context. The web front-end keeps the current value in a cell
//! and replaces it wholesale on every user action.

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AudioFailure {
    /// The configured source did not load; recoverable by a user file.
    #[error("music source failed to load")]
    Load,
    /// Playback was rejected before a user gesture. Expected and harmless;
    /// the manual controls still work.
    #[error("autoplay blocked until user interaction")]
    AutoplayBlocked,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub started: bool,
    pub muted: bool,
    pub failure: Option<AudioFailure>,
    pub user_source: Option<String>,
    pub chapter_index: usize,
}

impl AppState {
    /// The gift is opened: leave the start screen.
    pub fn start(mut self) -> Self {
        self.started = true;
        self
    }

    pub fn toggle_mute(mut self) -> Self {
        self.muted = !self.muted;
        self
    }

    /// A user-picked track replaces the configured source and clears any
    /// load failure; the user is the retry mechanism.
    pub fn select_file(mut self, object_url: String) -> Self {
        self.user_source = Some(object_url);
        self.failure = None;
        self
    }

    pub fn audio_failed(mut self, failure: AudioFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn audio_recovered(mut self) -> Self {
        self.failure = None;
        self
    }

    pub fn chapter_changed(mut self, index: usize) -> Self {
        self.chapter_index = index;
        self
    }

    /// The persistent banner only covers a real load failure, and only
    /// until the user supplies a file of their own.
    pub fn show_music_banner(&self) -> bool {
        self.failure == Some(AudioFailure::Load) && self.user_source.is_none()
    }
}
