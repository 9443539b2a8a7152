//! Token grid
//!
//! A fixed rectangular board of token cells, row-major with the origin at the
//! top-left. Empty cells exist only while a cascade step is in flight; between
//! player-visible states every cell holds a token.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::rng::TokenRng;

/// The six token kinds, named after the shapes the host draws them as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Circle,
    Square,
    Triangle,
    Star,
    Hexagon,
    Diamond,
}

impl TokenKind {
    /// Number of distinct kinds
    pub const COUNT: usize = 6;

    /// All kinds, in index order
    pub const ALL: [TokenKind; TokenKind::COUNT] = [
        TokenKind::Circle,
        TokenKind::Square,
        TokenKind::Triangle,
        TokenKind::Star,
        TokenKind::Hexagon,
        TokenKind::Diamond,
    ];

    /// Stable numeric identifier in `[0, COUNT)`
    pub fn index(self) -> usize {
        self as usize
    }

    /// Kind for a numeric identifier, if in range
    pub fn from_index(idx: usize) -> Option<TokenKind> {
        TokenKind::ALL.get(idx).copied()
    }
}

/// A grid position (row, col), origin top-left
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Orthogonal adjacency (Manhattan distance exactly 1)
    pub fn is_adjacent(self, other: Pos) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr + dc == 1
    }
}

/// One grid cell: a token, or empty mid-cascade
pub type Cell = Option<TokenKind>;

/// Grid access errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("position ({row}, {col}) is outside the {width}x{height} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },
}

/// The token board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell empty
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Create a grid filled with independent uniform draws
    pub fn filled_random(width: usize, height: usize, rng: &mut TokenRng) -> Self {
        let cells = (0..width * height).map(|_| Some(rng.draw())).collect();
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    fn index(&self, pos: Pos) -> Result<usize, GridError> {
        if self.in_bounds(pos) {
            Ok(pos.row * self.width + pos.col)
        } else {
            Err(GridError::OutOfBounds {
                row: pos.row,
                col: pos.col,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn get(&self, pos: Pos) -> Result<Cell, GridError> {
        Ok(self.cells[self.index(pos)?])
    }

    pub fn set(&mut self, pos: Pos, cell: Cell) -> Result<(), GridError> {
        let idx = self.index(pos)?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Exchange the contents of two positions. No adjacency validation; that
    /// is the move controller's concern.
    pub fn swap(&mut self, a: Pos, b: Pos) -> Result<(), GridError> {
        let ia = self.index(a)?;
        let ib = self.index(b)?;
        self.cells.swap(ia, ib);
        Ok(())
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let width = self.width;
        let height = self.height;
        (0..height).flat_map(move |row| (0..width).map(move |col| Pos::new(row, col)))
    }

    /// True if no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacency() {
        let p = Pos::new(3, 3);
        assert!(p.is_adjacent(Pos::new(2, 3)));
        assert!(p.is_adjacent(Pos::new(4, 3)));
        assert!(p.is_adjacent(Pos::new(3, 2)));
        assert!(p.is_adjacent(Pos::new(3, 4)));
        // Diagonal, self, and distance-2 are not adjacent
        assert!(!p.is_adjacent(Pos::new(2, 2)));
        assert!(!p.is_adjacent(p));
        assert!(!p.is_adjacent(Pos::new(3, 5)));
    }

    #[test]
    fn test_get_set_round_trip() {
        let mut grid = Grid::empty(7, 7);
        let pos = Pos::new(2, 5);
        assert_eq!(grid.get(pos).unwrap(), None);
        grid.set(pos, Some(TokenKind::Star)).unwrap();
        assert_eq!(grid.get(pos).unwrap(), Some(TokenKind::Star));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid = Grid::empty(7, 7);
        assert!(!grid.in_bounds(Pos::new(7, 0)));
        assert!(!grid.in_bounds(Pos::new(0, 7)));
        assert!(matches!(
            grid.get(Pos::new(7, 0)),
            Err(GridError::OutOfBounds { row: 7, col: 0, .. })
        ));
        assert!(grid.set(Pos::new(0, 9), Some(TokenKind::Circle)).is_err());
        assert!(grid.swap(Pos::new(0, 0), Pos::new(9, 9)).is_err());
    }

    #[test]
    fn test_swap_exchanges_cells() {
        let mut grid = Grid::empty(7, 7);
        let a = Pos::new(0, 0);
        let b = Pos::new(6, 6);
        grid.set(a, Some(TokenKind::Circle)).unwrap();
        grid.set(b, Some(TokenKind::Diamond)).unwrap();
        grid.swap(a, b).unwrap();
        assert_eq!(grid.get(a).unwrap(), Some(TokenKind::Diamond));
        assert_eq!(grid.get(b).unwrap(), Some(TokenKind::Circle));
    }

    #[test]
    fn test_filled_random_is_full_and_deterministic() {
        let mut rng1 = TokenRng::new(42);
        let mut rng2 = TokenRng::new(42);
        let g1 = Grid::filled_random(7, 7, &mut rng1);
        let g2 = Grid::filled_random(7, 7, &mut rng2);
        assert!(g1.is_full());
        assert_eq!(g1, g2);
    }

    #[test]
    fn test_token_kind_index_round_trip() {
        for kind in TokenKind::ALL {
            assert_eq!(TokenKind::from_index(kind.index()), Some(kind));
        }
        assert_eq!(TokenKind::from_index(TokenKind::COUNT), None);
    }
}
