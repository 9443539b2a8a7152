//! Cascade resolution
//!
//! One resolution step clears the union of all matched cells, compacts each
//! column downward, refills the vacated top cells with fresh draws, and
//! re-scans. Steps repeat until a scan finds nothing. The resolver records
//! every step so the host can animate the sequence after the fact; the final
//! grid is already decided before any animation plays.

use serde::{Deserialize, Serialize};

use super::grid::{Grid, Pos, TokenKind};
use super::matches::find_matches;
use super::rng::TokenRng;
use crate::rules::Rules;

/// A token falling within its column during compaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDrop {
    pub from: Pos,
    pub to: Pos,
}

/// A fresh token drawn into a vacated cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSpawn {
    pub pos: Pos,
    pub kind: TokenKind,
}

/// One clear/compact/refill iteration, in presentation order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CascadeStep {
    /// Cleared positions, distinct and sorted row-major. Cells covered by
    /// overlapping matches appear once.
    pub cleared: Vec<Pos>,
    pub drops: Vec<TokenDrop>,
    pub refills: Vec<TokenSpawn>,
    /// Points awarded for this step
    pub points: u32,
}

/// The full record of one cascade
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CascadeOutcome {
    pub steps: Vec<CascadeStep>,
    /// Total points across all steps
    pub points: u32,
    /// Total tokens cleared across all steps
    pub cleared_tokens: u32,
}

impl CascadeOutcome {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Run the clear/compact/refill loop until the grid is stable. Mutates the
/// grid in place and returns the step log. On a stable grid this is a no-op
/// returning an empty outcome.
pub fn resolve_cascade(grid: &mut Grid, rng: &mut TokenRng, rules: &Rules) -> CascadeOutcome {
    let mut outcome = CascadeOutcome::default();

    loop {
        let matches = find_matches(grid);
        if matches.is_empty() {
            break;
        }
        if outcome.steps.len() as u32 >= rules.max_cascade_steps {
            // Refills are random, so an endless chain is theoretically
            // possible. Leave the grid stable-enough and bail.
            log::warn!(
                "cascade exceeded {} steps, stopping early",
                rules.max_cascade_steps
            );
            break;
        }

        let cleared: Vec<Pos> = matches.covered().into_iter().collect();
        let points = cleared.len() as u32 * rules.points_per_token;
        for &pos in &cleared {
            // Covered positions come from a scan of this grid
            grid.set(pos, None).expect("matched position in bounds");
        }

        let drops = compact_columns(grid);
        let refills = refill(grid, rng);

        log::debug!(
            "cascade step {}: cleared {} tokens for {} points ({} drops, {} refills)",
            outcome.steps.len(),
            cleared.len(),
            points,
            drops.len(),
            refills.len()
        );

        outcome.points += points;
        outcome.cleared_tokens += cleared.len() as u32;
        outcome.steps.push(CascadeStep {
            cleared,
            drops,
            refills,
            points,
        });
    }

    outcome
}

/// Shift the surviving tokens of every column to the bottom, preserving their
/// relative order, leaving the vacated count as empties at the top.
fn compact_columns(grid: &mut Grid) -> Vec<TokenDrop> {
    let mut drops = Vec::new();

    for col in 0..grid.width() {
        // Surviving tokens bottom-to-top
        let survivors: Vec<(usize, TokenKind)> = (0..grid.height())
            .rev()
            .filter_map(|row| {
                grid.get(Pos::new(row, col))
                    .expect("column scan in bounds")
                    .map(|kind| (row, kind))
            })
            .collect();

        let mut dest_row = grid.height();
        for (src_row, kind) in survivors {
            dest_row -= 1;
            if dest_row != src_row {
                let from = Pos::new(src_row, col);
                let to = Pos::new(dest_row, col);
                grid.set(from, None).expect("drop source in bounds");
                grid.set(to, Some(kind)).expect("drop target in bounds");
                drops.push(TokenDrop { from, to });
            }
        }
    }

    drops
}

/// Draw fresh tokens into every empty cell, column by column, top down
fn refill(grid: &mut Grid, rng: &mut TokenRng) -> Vec<TokenSpawn> {
    let mut refills = Vec::new();

    for col in 0..grid.width() {
        for row in 0..grid.height() {
            let pos = Pos::new(row, col);
            if grid.get(pos).expect("refill scan in bounds").is_none() {
                let kind = rng.draw();
                grid.set(pos, Some(kind)).expect("refill target in bounds");
                refills.push(TokenSpawn { pos, kind });
            }
        }
    }

    refills
}
