//! Deterministic game-state engine
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (row-major, top-left origin)
//! - No rendering, timing, or platform dependencies

pub mod cascade;
pub mod events;
pub mod grid;
pub mod matches;
pub mod moves;
pub mod rng;
pub mod session;

pub use cascade::{CascadeOutcome, CascadeStep, TokenDrop, TokenSpawn, resolve_cascade};
pub use events::{CellChange, GameEvent};
pub use grid::{Cell, Grid, GridError, Pos, TokenKind};
pub use matches::{Match, MatchSet, Orientation, find_matches};
pub use moves::{RejectReason, SwapResult, attempt_swap};
pub use rng::TokenRng;
pub use session::{GameSession, Phase};
