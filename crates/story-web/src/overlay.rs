//! DOM overlay control: the start screen, the chapter text card, the mute
//! icon and the music failure banner.

use web_sys as web;

#[inline]
pub fn hide_start(document: &web::Document) {
    if let Some(el) = document.get_element_by_id("start-overlay") {
        let cl = el.class_list();
        _ = cl.add_1("hidden");
        // fallback for environments without the CSS class
        _ = el.set_attribute("style", "display:none");
    }
}

/// Clear the boot status line once the renderer is ready.
pub fn hide_boot_status(document: &web::Document) {
    if let Some(el) = document.get_element_by_id("boot-status") {
        _ = el.set_attribute("style", "display:none");
    }
}

/// Swap the chapter card to a new title and body. Called once per chapter
/// transition, not per frame.
pub fn update_chapter(document: &web::Document, title: &str, text: &str) {
    if let Some(el) = document.get_element_by_id("chapter-overlay") {
        let html = format!("<h2>{title}</h2><p>{text}</p>");
        el.set_inner_html(&html);
    }
}

/// Per-frame opacity from the scroll mapper.
pub fn set_chapter_opacity(document: &web::Document, opacity: f32) {
    if let Some(el) = document.get_element_by_id("chapter-overlay") {
        _ = el.set_attribute("style", &format!("opacity:{opacity:.3}"));
    }
}

pub fn show_music_banner(document: &web::Document) {
    if let Some(el) = document.get_element_by_id("music-error") {
        _ = el.set_attribute("style", "");
    }
}

pub fn hide_music_banner(document: &web::Document) {
    if let Some(el) = document.get_element_by_id("music-error") {
        _ = el.set_attribute("style", "display:none");
    }
}

pub fn set_mute_icon(document: &web::Document, muted: bool) {
    if let Some(el) = document.get_element_by_id("mute-btn") {
        el.set_inner_html(if muted { "&#128263;" } else { "&#128266;" });
    }
}
