//! JavaScript bridge (wasm32 only)
//!
//! The page runs the pose estimator and the canvas. Each animation frame it
//! pushes the newest landmarks, calls `tick`, and renders from the returned
//! JSON.

use wasm_bindgen::prelude::*;

use crate::driver::{PresentationSink, TickDriver};
use crate::pose::LandmarkFrame;
use crate::settings::SessionConfig;
use crate::sim::{GameEvent, SessionState};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Keeps the last snapshot for `snapshot()`
#[derive(Default)]
struct LastState {
    state: Option<SessionState>,
}

impl PresentationSink for LastState {
    fn present(&mut self, state: &SessionState, _events: &[GameEvent]) {
        self.state = Some(state.clone());
    }
}

#[wasm_bindgen]
pub struct Game {
    driver: TickDriver<Option<LandmarkFrame>, LastState>,
}

#[wasm_bindgen]
impl Game {
    /// `difficulty` is one of `easy`, `medium`, `hard`
    #[wasm_bindgen(constructor)]
    pub fn new(difficulty: &str, width: f32, height: f32) -> Result<Game, JsValue> {
        let config = SessionConfig::new(difficulty, width, height)
            .map_err(|e| JsValue::from_str(&e.to_string()))?
            .with_seed(js_sys::Date::now() as u64);
        let driver = TickDriver::new(&config, None, LastState::default())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Game created: {} {}x{}", config.difficulty, width, height);
        Ok(Game { driver })
    }

    /// Store the newest pose: 33 landmarks as flat `(x, y, visibility)`
    pub fn push_landmarks(&mut self, data: &[f32]) {
        match LandmarkFrame::from_flat(data) {
            Some(frame) => *self.driver.source_mut() = Some(frame),
            None => log::warn!("Invalid landmark data length: {} (expected 99)", data.len()),
        }
    }

    /// Pose lost (nobody in frame)
    pub fn clear_landmarks(&mut self) {
        *self.driver.source_mut() = None;
    }

    /// Advance one tick at `now_secs`; returns the events as a JSON array
    pub fn tick(&mut self, now_secs: f64) -> String {
        let events = self.driver.advance(now_secs);
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }

    /// Latest session snapshot as JSON
    pub fn snapshot(&self) -> String {
        let state = self
            .driver
            .sink()
            .state
            .clone()
            .unwrap_or_else(|| self.driver.session().snapshot());
        serde_json::to_string(&state).unwrap_or_default()
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        self.driver
            .session_mut()
            .resize(width, height)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn restart(&mut self) {
        self.driver.restart();
    }
}
