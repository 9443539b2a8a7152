//! Data-driven game balance
//!
//! Everything tunable about a session lives here so hosts can run variant
//! boards without touching engine code. Defaults match the shipped game.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance knobs for one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    /// Grid width in columns
    pub width: usize,
    /// Grid height in rows
    pub height: usize,
    /// Move budget at session start
    pub starting_moves: u32,
    /// Points per cleared token
    pub points_per_token: u32,
    /// Safety cap on clear/drop/refill iterations per cascade
    pub max_cascade_steps: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            starting_moves: STARTING_MOVES,
            points_per_token: POINTS_PER_TOKEN,
            max_cascade_steps: MAX_CASCADE_STEPS,
        }
    }
}

impl Rules {
    /// Total cell count of the configured board
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_shipped_game() {
        let rules = Rules::default();
        assert_eq!((rules.width, rules.height), (7, 7));
        assert_eq!(rules.starting_moves, 30);
        assert_eq!(rules.points_per_token, 10);
        assert_eq!(rules.cell_count(), 49);
    }

    #[test]
    fn test_rules_json_round_trip() {
        let rules = Rules::default();
        let json = serde_json::to_string(&rules).unwrap();
        let back: Rules = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rules);
    }
}
