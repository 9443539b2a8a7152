//! Swap validation and move accounting
//!
//! A move is charged the instant a legal swap commits, before the match check.
//! A swap that produces nothing is swapped back but the move stays spent;
//! matching the game's original behavior, a wasted swap is the player's loss.

use serde::{Deserialize, Serialize};

use super::cascade::{CascadeOutcome, resolve_cascade};
use super::grid::Pos;
use super::matches::find_matches;
use super::session::GameSession;

/// Why a swap attempt was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// A position lies outside the grid (host contract violation)
    OutOfBounds,
    /// The cells are not orthogonally adjacent
    NotAdjacent,
    /// A swap/cascade is already in flight
    Processing,
    /// The move budget is exhausted
    NoMovesLeft,
}

/// Outcome of [`attempt_swap`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SwapResult {
    /// Precondition failure; nothing changed and no move was spent
    Rejected(RejectReason),
    /// The swap matched and the cascade ran to completion
    Swapped {
        cascade: CascadeOutcome,
        score_delta: u32,
        moves_remaining: u32,
    },
    /// The swap matched nothing and was reverted; the move is still spent
    SwappedBack { moves_remaining: u32 },
}

/// Validate and perform one player swap.
///
/// Preconditions: both positions in bounds, orthogonally adjacent, session not
/// processing, moves remaining. Failure rejects with no mutation and no move
/// cost. Success charges exactly one move whether or not the swap matches.
pub fn attempt_swap(session: &mut GameSession, a: Pos, b: Pos) -> SwapResult {
    if !session.grid().in_bounds(a) || !session.grid().in_bounds(b) {
        return SwapResult::Rejected(RejectReason::OutOfBounds);
    }
    if session.processing {
        return SwapResult::Rejected(RejectReason::Processing);
    }
    if session.moves_remaining == 0 {
        return SwapResult::Rejected(RejectReason::NoMovesLeft);
    }
    if !a.is_adjacent(b) {
        return SwapResult::Rejected(RejectReason::NotAdjacent);
    }

    session.processing = true;
    session
        .grid
        .swap(a, b)
        .expect("swap positions checked in bounds");

    // Move cost precedes the match check and is kept on revert
    session.moves_remaining -= 1;

    let result = if find_matches(&session.grid).is_empty() {
        session
            .grid
            .swap(a, b)
            .expect("revert of an in-bounds swap");
        log::debug!("swap {a:?}<->{b:?} matched nothing, reverted");
        SwapResult::SwappedBack {
            moves_remaining: session.moves_remaining,
        }
    } else {
        let cascade = resolve_cascade(&mut session.grid, &mut session.rng, &session.rules);
        session.score += cascade.points;
        log::debug!(
            "swap {a:?}<->{b:?} cleared {} tokens across {} steps for {} points",
            cascade.cleared_tokens,
            cascade.steps.len(),
            cascade.points
        );
        SwapResult::Swapped {
            score_delta: cascade.points,
            moves_remaining: session.moves_remaining,
            cascade,
        }
    };

    session.processing = false;
    result
}
