//! Carnival Crashers - a browser match-3 puzzle game engine
//!
//! Core modules:
//! - `engine`: Deterministic game-state engine (grid, match detection, cascades, session)
//! - `rules`: Data-driven game balance
//! - `platform`: Browser/native platform abstraction
//! - `bindings`: wasm-bindgen facade for a JS/canvas host (wasm32 only)
//!
//! Rendering, animation, and input dispatch live in the host application.
//! The engine resolves every swap eagerly and hands the host an ordered log
//! of cascade steps to animate at its own pace; animation timing can never
//! affect match outcomes.

#[cfg(target_arch = "wasm32")]
pub mod bindings;
pub mod engine;
pub mod platform;
pub mod rules;

pub use engine::{
    CascadeOutcome, CascadeStep, CellChange, GameEvent, GameSession, Grid, GridError, Match,
    MatchSet, Orientation, Phase, Pos, RejectReason, SwapResult, TokenKind, TokenRng,
    attempt_swap, find_matches, resolve_cascade,
};
pub use rules::Rules;

/// Game configuration constants
pub mod consts {
    /// Grid dimensions (columns x rows)
    pub const GRID_WIDTH: usize = 7;
    pub const GRID_HEIGHT: usize = 7;

    /// Number of distinct token kinds on the board
    pub const TOKEN_KINDS: usize = 6;

    /// Move budget for a fresh session
    pub const STARTING_MOVES: u32 = 30;

    /// Points awarded per cleared token
    pub const POINTS_PER_TOKEN: u32 = 10;

    /// Upper bound on clear/drop/refill iterations for one cascade.
    /// Refills are random, so termination is probabilistic; the cap bounds
    /// pathological draw sequences. Never reached in practice.
    pub const MAX_CASCADE_STEPS: u32 = 100;
}
