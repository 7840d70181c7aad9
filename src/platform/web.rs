//! Browser bindings
//!
//! The page owns the animation loop and key/touch handling; it calls
//! `tick` once per frame and renders the returned JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::highscores::LocalStorageHighScores;
use crate::sim::{RunController, TickInput};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
    log::info!("Ocean Run core loaded");
}

/// JS handle around a run controller
#[wasm_bindgen]
pub struct OceanRun {
    controller: RunController,
}

#[wasm_bindgen]
impl OceanRun {
    /// Default tuning, high score in LocalStorage
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> OceanRun {
        OceanRun {
            controller: RunController::new(seed).with_store(Box::new(LocalStorageHighScores)),
        }
    }

    /// Custom tuning from a JSON override
    #[wasm_bindgen(js_name = withTuning)]
    pub fn with_tuning(seed: u64, tuning_json: &str) -> Result<OceanRun, JsValue> {
        let tuning = Tuning::from_json(tuning_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let controller = RunController::with_tuning(seed, tuning)
            .map_err(|e| JsValue::from_str(&e.to_string()))?
            .with_store(Box::new(LocalStorageHighScores));
        Ok(OceanRun { controller })
    }

    pub fn start(&mut self) {
        self.controller.start();
    }

    pub fn reset(&mut self) {
        self.controller.reset();
    }

    /// Advance one frame; returns the snapshot as JSON
    pub fn tick(&mut self, jump: bool, duck_start: bool, duck_end: bool, idle_mode: bool) -> String {
        let input = TickInput {
            jump,
            duck_start,
            duck_end,
            idle_mode,
        };
        self.controller.tick(&input).to_json()
    }

    /// Current snapshot without advancing
    pub fn snapshot(&self) -> String {
        self.controller.snapshot().to_json()
    }

    #[wasm_bindgen(js_name = highScore)]
    pub fn high_score(&self) -> Option<i64> {
        self.controller.high_score()
    }
}
