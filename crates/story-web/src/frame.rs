//! The per-frame driver, invoked once per display refresh.
//!
//! Order matters and mirrors the data flow: damped scroll first, then the
//! chapter mapping (with edge-triggered scene remounts), then camera and
//! theme blending, then pose animation, and finally composition and the
//! draw call.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use story_core::{
    chapter_index, hex_color, overlay_opacity, sort_back_to_front, AppState, CameraRig,
    ChapterTracker, Instance, Scene, ScrollState, ThemeBlender, ViewportClass, CHAPTER_COUNT,
    MAX_INSTANCES, STORY_CHAPTERS,
};

use crate::{dom, overlay, render};

pub struct FrameContext<'a> {
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub scroll: Rc<RefCell<ScrollState>>,
    pub state: Rc<RefCell<AppState>>,

    pub gpu: Option<render::GpuState<'a>>,
    pub scene: Scene,
    pub tracker: ChapterTracker,
    pub rig: CameraRig,
    pub theme: ThemeBlender,

    pub started_at: Instant,
    pub last_instant: Instant,
    pub instances: Vec<Instance>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;
        let t = (now - self.started_at).as_secs_f32();

        if !self.state.borrow().started {
            return;
        }

        self.scroll.borrow_mut().step(dt_sec);
        let offset = self.scroll.borrow().offset();
        let index = chapter_index(offset, CHAPTER_COUNT);

        if let Some(new_index) = self.tracker.observe(index) {
            self.scene = Scene::for_chapter(new_index);
            {
                let mut st = self.state.borrow_mut();
                *st = st.clone().chapter_changed(new_index);
            }
            let chapter = &STORY_CHAPTERS[new_index];
            overlay::update_chapter(&self.document, chapter.title, chapter.text);
            log::info!("[scroll] chapter {new_index}: {}", chapter.title);
        }
        overlay::set_chapter_opacity(&self.document, overlay_opacity(offset, CHAPTER_COUNT));

        let chapter = &STORY_CHAPTERS[index];
        let (css_w, css_h) = dom::canvas_css_size(&self.canvas);
        let class = ViewportClass::classify(css_w, css_h);
        self.rig.step(chapter.camera_vec3(), class, dt_sec);
        let eye = self.rig.position;
        let look = class.look_target();

        self.theme.step(hex_color(chapter.color_theme), dt_sec);

        self.scene.animate(t);
        self.instances.clear();
        self.scene.emit(t, &mut self.instances);
        self.instances.truncate(MAX_INSTANCES);
        sort_back_to_front(&mut self.instances, eye, look);

        if let Some(g) = &mut self.gpu {
            g.set_camera(eye, look);
            g.set_fog(self.theme.rgb());
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            if let Err(e) = g.render(&self.instances, t) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

/// Initial camera: the first chapter's nominal position, so the opening
/// frame needs no settle time.
pub fn initial_rig() -> CameraRig {
    CameraRig::new(Vec3::from(STORY_CHAPTERS[0].camera_position))
}
