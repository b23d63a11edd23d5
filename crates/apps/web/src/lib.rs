use console_error_panic_hook::set_once;
use serde::Serialize;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

use runtime::Event;
use scene::content;
use scene::focus::{CloseOutcome, SelectOutcome};
use scene::{Portfolio, SceneConfig, SectionKind, WheelRoute};

thread_local! {
    static STATE: RefCell<Portfolio> = RefCell::new(Portfolio::default());
}

fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

fn section_at(index: usize) -> Result<SectionKind, JsValue> {
    SectionKind::from_index(index)
        .ok_or_else(|| JsValue::from_str(&format!("no section at index {index}")))
}

#[derive(Debug, Serialize)]
struct EventRecord<'a> {
    frame: u64,
    channel: &'static str,
    message: &'a str,
}

impl<'a> From<&'a Event> for EventRecord<'a> {
    fn from(e: &'a Event) -> Self {
        Self {
            frame: e.frame_index,
            channel: e.channel.as_str(),
            message: &e.message,
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Replaces the scene with one built from a JSON config override.
///
/// Missing fields keep their defaults.
#[wasm_bindgen]
pub fn load_config(json: &str) -> Result<(), JsValue> {
    let config = SceneConfig::from_json_str(json).map_err(|err| {
        log(&format!("config error: {err}"));
        JsValue::from_str(&err.to_string())
    })?;
    STATE.with(|state| {
        *state.borrow_mut() = Portfolio::new(config);
    });
    Ok(())
}

/// Page scroll progress in `[0, 1]`.
#[wasm_bindgen]
pub fn set_scroll_offset(offset: f64) {
    STATE.with(|state| state.borrow_mut().set_scroll_offset(offset));
}

#[wasm_bindgen]
pub fn set_viewport(width: f64, height: f64) {
    STATE.with(|state| state.borrow_mut().set_viewport(width, height));
}

/// Returns true when the click started a focus transition.
#[wasm_bindgen]
pub fn click_section(index: usize) -> Result<bool, JsValue> {
    let kind = section_at(index)?;
    Ok(STATE.with(|state| state.borrow_mut().click_section(kind)) == SelectOutcome::Started)
}

#[wasm_bindgen]
pub fn hover_section(index: usize, hovered: bool) -> Result<(), JsValue> {
    let kind = section_at(index)?;
    STATE.with(|state| state.borrow_mut().hover_section(kind, hovered));
    Ok(())
}

#[wasm_bindgen]
pub fn close_card() -> bool {
    STATE.with(|state| state.borrow_mut().close()) != CloseOutcome::Ignored
}

/// Routes a wheel `deltaY`.
///
/// Returns true when the expanded card consumed it; the caller should then
/// `preventDefault` so the page does not scroll.
#[wasm_bindgen]
pub fn wheel(delta_y: f64) -> bool {
    STATE.with(|state| state.borrow_mut().wheel(delta_y)) == WheelRoute::ExpandedView
}

/// Intended usage: pass `KeyboardEvent.key`.
#[wasm_bindgen]
pub fn key_down(key: &str) {
    STATE.with(|state| state.borrow_mut().key_down(key));
}

#[wasm_bindgen]
pub fn key_up(key: &str) {
    STATE.with(|state| state.borrow_mut().key_up(key));
}

#[wasm_bindgen]
pub fn toggle_free_roam() -> bool {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.toggle_free_roam();
        s.is_free_roam()
    })
}

#[wasm_bindgen]
pub fn pointer_down(x_px: f64, y_px: f64) {
    STATE.with(|state| state.borrow_mut().pointer_down([x_px, y_px]));
}

#[wasm_bindgen]
pub fn pointer_move(x_px: f64, y_px: f64) {
    STATE.with(|state| state.borrow_mut().pointer_move([x_px, y_px]));
}

#[wasm_bindgen]
pub fn pointer_up() {
    STATE.with(|state| state.borrow_mut().pointer_up());
}

/// Expanded-card text for a section title; unknown titles get a placeholder.
#[wasm_bindgen]
pub fn section_content(title: &str) -> String {
    content::lookup(title).to_string()
}

#[wasm_bindgen]
pub fn replay_reveal() {
    STATE.with(|state| state.borrow_mut().replay_reveal());
}

#[wasm_bindgen]
pub fn skip_terminal_intro() {
    STATE.with(|state| state.borrow_mut().skip_terminal_intro());
}

/// Advances one frame and returns the frame snapshot as JSON.
#[wasm_bindgen]
pub fn tick(dt_s: f64) -> Result<String, JsValue> {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.tick(dt_s);
        serde_json::to_string(&s.snapshot()).map_err(|err| {
            log(&format!("snapshot error: {err}"));
            JsValue::from_str(&err.to_string())
        })
    })
}

/// Drains scene events recorded since the last call, one JSON string each.
#[wasm_bindgen]
pub fn drain_events() -> js_sys::Array {
    let events = STATE.with(|state| state.borrow_mut().drain_events());
    events
        .iter()
        .filter_map(|e| serde_json::to_string(&EventRecord::from(e)).ok())
        .map(|json| JsValue::from_str(&json))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{click_section, close_card, section_content, tick, wheel};

    #[test]
    fn click_then_tick_reports_focus() {
        assert_eq!(click_section(0).ok(), Some(true));
        let json = tick(1.0 / 60.0).expect("snapshot");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["focus"]["section"], "projects");
        assert!(wheel(10.0));
        assert!(close_card());
        assert!(!wheel(10.0));
    }

    #[test]
    fn unknown_title_gets_placeholder() {
        assert_eq!(section_content("SECRETS"), "System data corrupted.");
        assert!(section_content("skills").contains("TECHNICAL ARSENAL"));
    }
}
