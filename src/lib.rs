//! Aim Trainer core crate.
//!
//! A dot appears at a random spot on a canvas; the player clicks it directly
//! (`"click"` mode) or steers a pointer-locked crosshair onto it and clicks
//! (`"crosshair"` mode). Hits, clicks, accuracy and elapsed time are tracked
//! over a fixed number of dots.
//!
//! The game logic (`session`, `controller`, `spawner`, `sensitivity`,
//! `crosshair`, `stats`) is plain Rust and runs natively; `web` and the canvas
//! side of `render` are the browser adapter.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod controller;
pub mod crosshair;
pub mod error;
mod logger;
pub mod render;
pub mod sensitivity;
pub mod session;
pub mod spawner;
pub mod stats;
mod web;

pub use config::GameConfig;
pub use controller::{Controller, Effect, InputMode};
pub use error::{Error, Result};
pub use sensitivity::{GameProfile, SensitivityProfile, compute_sensitivity};
pub use session::{Phase, Session, Shot};
pub use spawner::{Bounds, Dot, spawn_dot};
pub use stats::StatsText;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

/// Mount the game on the current page. `mode` is `"click"` or `"crosshair"`.
#[wasm_bindgen]
pub fn start_game(mode: &str) -> Result<(), JsValue> {
    let mode: InputMode = mode.parse()?;
    web::mount(mode, GameConfig::default())
}

/// Like [`start_game`] with a JSON [`GameConfig`]; missing fields use defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(mode: &str, config_json: &str) -> Result<(), JsValue> {
    let mode: InputMode = mode.parse()?;
    let config = GameConfig::from_json(config_json)?;
    web::mount(mode, config)
}

/// Sensitivity multiplier for a settings preview in JS.
#[wasm_bindgen]
pub fn sensitivity_for(game: &str, dpi: f64, in_game_sensitivity: f64) -> f64 {
    compute_sensitivity(GameProfile::from(game), dpi, in_game_sensitivity)
}
