#![cfg(target_arch = "wasm32")]
//! Web front-end: DOM wiring, audio element control and the RAF loop.

use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

use story_core::{
    hex_color, AppState, ChapterTracker, Scene, ScrollState, ThemeBlender, CHAPTER_COUNT,
    STORY_CHAPTERS,
};

mod audio;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("story-web starting");

    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("story-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #story-canvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{e:?}")))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let state = Rc::new(RefCell::new(AppState::default()));
    let scroll = Rc::new(RefCell::new(ScrollState::new(CHAPTER_COUNT)));

    let player = Rc::new(audio::MusicPlayer::attach(&document)?);
    audio::wire_error_handler(&player, &document, state.clone());
    audio::wire_file_input(&document, player.clone(), state.clone());

    // "Open the Gift": leave the start screen and try to start the music.
    // A rejected play is swallowed; the mute button keeps working.
    {
        let state_start = state.clone();
        let player_start = player.clone();
        let doc_start = document.clone();
        dom::add_click_listener(&document, "start-btn", move || {
            {
                let mut st = state_start.borrow_mut();
                *st = st.clone().start();
            }
            overlay::hide_start(&doc_start);
            player_start.request_play(&state_start);
        });
    }

    {
        let state_mute = state.clone();
        let player_mute = player.clone();
        let doc_mute = document.clone();
        dom::add_click_listener(&document, "mute-btn", move || {
            let muted = {
                let mut st = state_mute.borrow_mut();
                *st = st.clone().toggle_mute();
                st.muted
            };
            player_mute.set_muted(muted);
            overlay::set_mute_icon(&doc_mute, muted);
            log::info!("[audio] muted={muted}");
        });
    }

    events::wire_wheel(scroll.clone());
    events::wire_touch(scroll.clone());
    events::wire_keyboard(scroll.clone());

    let gpu = frame::init_gpu(&canvas).await;
    overlay::hide_boot_status(&document);

    let opening = &STORY_CHAPTERS[0];
    overlay::update_chapter(&document, opening.title, opening.text);
    overlay::set_mute_icon(&document, false);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        document: document.clone(),
        canvas: canvas.clone(),
        scroll: scroll.clone(),
        state: state.clone(),
        gpu,
        scene: Scene::for_chapter(0),
        tracker: ChapterTracker::new(),
        rig: frame::initial_rig(),
        theme: ThemeBlender::new(hex_color(opening.color_theme)),
        started_at: Instant::now(),
        last_instant: Instant::now(),
        instances: Vec::new(),
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
