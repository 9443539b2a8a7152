//! Run detection
//!
//! Scans the grid for maximal runs of three or more equal tokens. Horizontal
//! and vertical passes are independent, so an L or T shaped overlap yields two
//! matches sharing a cell; the cascade resolver de-duplicates shared cells
//! when clearing and scoring.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::grid::{Grid, Pos, TokenKind};

/// Minimum run length that counts as a match
pub const MIN_RUN: usize = 3;

/// Direction a run extends in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A maximal run of equal tokens in one row or column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub kind: TokenKind,
    pub orientation: Orientation,
    /// Covered positions, ordered left-to-right or top-to-bottom
    pub cells: Vec<Pos>,
}

impl Match {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// All matches found in one scan of the grid
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchSet {
    pub matches: Vec<Match>,
}

impl MatchSet {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Union of all covered positions. Cells shared by overlapping matches
    /// appear once; this set is what gets cleared and scored.
    pub fn covered(&self) -> BTreeSet<Pos> {
        self.matches
            .iter()
            .flat_map(|m| m.cells.iter().copied())
            .collect()
    }
}

/// Find every maximal run of `MIN_RUN`+ equal tokens. Pure: no mutation, no
/// randomness. Empty cells never participate in a run.
pub fn find_matches(grid: &Grid) -> MatchSet {
    let mut matches = Vec::new();

    // Horizontal runs, row by row
    for row in 0..grid.height() {
        let mut col = 0;
        while col < grid.width() {
            let run = run_length(grid, Pos::new(row, col), Orientation::Horizontal);
            if let Some((kind, len)) = run {
                if len >= MIN_RUN {
                    matches.push(Match {
                        kind,
                        orientation: Orientation::Horizontal,
                        cells: (col..col + len).map(|c| Pos::new(row, c)).collect(),
                    });
                }
                // Resume after the run; same-orientation overlaps are not
                // re-detected
                col += len;
            } else {
                col += 1;
            }
        }
    }

    // Vertical runs, column by column. Deliberately blind to the horizontal
    // pass so cross-shaped overlaps are both reported.
    for col in 0..grid.width() {
        let mut row = 0;
        while row < grid.height() {
            let run = run_length(grid, Pos::new(row, col), Orientation::Vertical);
            if let Some((kind, len)) = run {
                if len >= MIN_RUN {
                    matches.push(Match {
                        kind,
                        orientation: Orientation::Vertical,
                        cells: (row..row + len).map(|r| Pos::new(r, col)).collect(),
                    });
                }
                row += len;
            } else {
                row += 1;
            }
        }
    }

    MatchSet { matches }
}

/// Length of the run of tokens equal to the one at `start`, extending right or
/// down. `None` if `start` is empty.
fn run_length(grid: &Grid, start: Pos, orientation: Orientation) -> Option<(TokenKind, usize)> {
    let kind = grid.get(start).ok().flatten()?;
    let mut len = 1;
    loop {
        let next = match orientation {
            Orientation::Horizontal => Pos::new(start.row, start.col + len),
            Orientation::Vertical => Pos::new(start.row + len, start.col),
        };
        match grid.get(next) {
            Ok(Some(k)) if k == kind => len += 1,
            _ => break,
        }
    }
    Some((kind, len))
}
