//! Change notifications for the presentation layer
//!
//! The engine resolves everything synchronously and queues these events for
//! the host to drain and render. They describe what changed, never when to
//! animate it.

use serde::{Deserialize, Serialize};

use super::grid::{Pos, TokenKind};

/// One cell whose contents changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
    pub pos: Pos,
    /// The cell's new token, or `None` for a removed token
    pub token: Option<TokenKind>,
}

/// A state change the presentation layer should reflect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    /// Cells changed; `changes` lists each affected position with its new
    /// token
    GridChanged { changes: Vec<CellChange> },
    ScoreChanged { score: u32, delta: u32 },
    MovesChanged { remaining: u32 },
    SelectionChanged { selection: Option<Pos> },
    /// The move budget ran out; the session only accepts a restart now
    GameOver { final_score: u32 },
}
