//! wasm-bindgen facade for a JS/canvas host
//!
//! Exposes the engine's boundary to the browser: one inbound cell-activation
//! intent, scalar queries, and JSON snapshots of the grid, selection, swap
//! outcomes, and queued change notifications. The host owns rendering,
//! animation, and input mapping.

use wasm_bindgen::prelude::*;

use crate::engine::GameSession;

#[wasm_bindgen(start)]
pub fn start() {
    crate::platform::init_logging();
    log::info!("Carnival Crashers engine loaded");
}

/// A game session owned by the JS host
#[wasm_bindgen]
pub struct BrowserGame {
    session: GameSession,
}

#[wasm_bindgen]
impl BrowserGame {
    /// Start a fresh session from a run seed
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> BrowserGame {
        BrowserGame {
            session: GameSession::new(seed),
        }
    }

    /// Forward a pointer/tap on a rendered cell. Returns the swap outcome as
    /// JSON when the activation committed a swap attempt, `null` JSON
    /// otherwise; the outcome carries the cascade step log to animate.
    pub fn on_cell_activated(&mut self, row: u32, col: u32) -> String {
        let result = self.session.on_cell_activated(row as usize, col as usize);
        to_json(&result)
    }

    /// Throw away the current session and start over
    pub fn restart(&mut self, seed: u64) {
        self.session.restart(seed);
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    pub fn moves_remaining(&self) -> u32 {
        self.session.moves_remaining()
    }

    pub fn is_game_over(&self) -> bool {
        self.session.is_game_over()
    }

    /// Current grid snapshot as JSON
    pub fn grid_json(&self) -> String {
        to_json(self.session.grid())
    }

    /// Currently selected cell as JSON (`null` when nothing is selected)
    pub fn selection_json(&self) -> String {
        to_json(&self.session.selection())
    }

    /// Drain queued change notifications as a JSON array, oldest first
    pub fn drain_events_json(&mut self) -> String {
        to_json(&self.session.drain_events())
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(json) => json,
        Err(err) => {
            log::error!("failed to serialize engine state: {err}");
            "null".to_string()
        }
    }
}
