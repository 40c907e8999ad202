//! Background music wiring around a single `HtmlAudioElement`.
//!
//! Playback is fire-and-forget: a rejected play promise flags
//! `AutoplayBlocked` and nothing else happens, because the mute button and
//! the next user gesture are always available. A real load failure raises
//! the persistent banner until the user supplies a file of their own.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

use story_core::{AppState, AudioFailure};

use crate::{dom, overlay};

pub const DEFAULT_TRACK_URL: &str =
    "https://cdn.pixabay.com/audio/2022/10/18/audio_31c2730e64.mp3";

pub struct MusicPlayer {
    element: web::HtmlAudioElement,
}

impl MusicPlayer {
    pub fn attach(document: &web::Document) -> anyhow::Result<Self> {
        let element = document
            .get_element_by_id("bg-music")
            .ok_or_else(|| anyhow::anyhow!("missing #bg-music"))?
            .dyn_into::<web::HtmlAudioElement>()
            .map_err(|e| anyhow::anyhow!(format!("{e:?}")))?;
        element.set_src(DEFAULT_TRACK_URL);
        Ok(Self { element })
    }

    /// Try to start playback, resolving the promise off-frame. Rejection is
    /// the expected autoplay policy case and is swallowed into state.
    pub fn request_play(&self, state: &Rc<RefCell<AppState>>) {
        match self.element.play() {
            Ok(promise) => {
                let state = state.clone();
                spawn_local(async move {
                    match JsFuture::from(promise).await {
                        Ok(_) => {
                            let mut st = state.borrow_mut();
                            if st.failure == Some(AudioFailure::AutoplayBlocked) {
                                *st = st.clone().audio_recovered();
                            }
                        }
                        Err(_) => {
                            log::info!("[audio] autoplay blocked; waiting for a user gesture");
                            let mut st = state.borrow_mut();
                            *st = st.clone().audio_failed(AudioFailure::AutoplayBlocked);
                        }
                    }
                });
            }
            Err(e) => log::warn!("[audio] play() call failed: {e:?}"),
        }
    }

    pub fn set_muted(&self, muted: bool) {
        self.element.set_muted(muted);
    }

    pub fn swap_source(&self, url: &str, state: &Rc<RefCell<AppState>>) {
        self.element.set_src(url);
        self.element.load();
        self.request_play(state);
    }
}

/// Surface load failures on the element as the recoverable banner case.
pub fn wire_error_handler(
    player: &Rc<MusicPlayer>,
    document: &web::Document,
    state: Rc<RefCell<AppState>>,
) {
    let doc = document.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        log::warn!("[audio] music source failed to load");
        let mut st = state.borrow_mut();
        *st = st.clone().audio_failed(AudioFailure::Load);
        if st.show_music_banner() {
            overlay::show_music_banner(&doc);
        }
    }) as Box<dyn FnMut()>);
    let _ = player
        .element
        .add_event_listener_with_callback("error", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// The "change music" file picker: any user-chosen audio file becomes an
/// object URL and replaces the configured source.
pub fn wire_file_input(
    document: &web::Document,
    player: Rc<MusicPlayer>,
    state: Rc<RefCell<AppState>>,
) {
    let doc = document.clone();
    dom::add_change_listener(document, "music-file", move || {
        let Some(input) = doc
            .get_element_by_id("music-file")
            .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        match web::Url::create_object_url_with_blob(&file) {
            Ok(url) => {
                log::info!("[audio] user selected a local track");
                {
                    let mut st = state.borrow_mut();
                    *st = st.clone().select_file(url.clone());
                }
                overlay::hide_music_banner(&doc);
                player.swap_source(&url, &state);
            }
            Err(e) => log::warn!("[audio] object url failed: {e:?}"),
        }
    });
}
