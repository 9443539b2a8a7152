//! Player-facing game session
//!
//! Owns the grid, score, move budget, and the selection state machine. The
//! presentation layer forwards cell activations here, drains the event queue
//! to know what to redraw, and reads the returned [`SwapResult`] for the
//! step-by-step cascade log to animate.

use serde::{Deserialize, Serialize};

use super::cascade::resolve_cascade;
use super::events::{CellChange, GameEvent};
use super::grid::{Grid, Pos};
use super::moves::{self, SwapResult};
use super::rng::TokenRng;
use crate::rules::Rules;

/// Where the session is in its input cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Awaiting a first selection
    Idle,
    /// One cell is tentatively chosen
    OneSelected,
    /// A swap/cascade is in flight; input is ignored
    Processing,
    /// Move budget exhausted; terminal until an explicit restart
    GameOver,
}

/// One complete game: grid, score, moves, selection, and input guard
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(crate) rules: Rules,
    pub(crate) grid: Grid,
    pub(crate) rng: TokenRng,
    pub(crate) score: u32,
    pub(crate) moves_remaining: u32,
    pub(crate) selection: Option<Pos>,
    pub(crate) phase: Phase,
    /// Guards player input against an in-flight swap/cascade
    pub(crate) processing: bool,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Create a session with default rules
    pub fn new(seed: u64) -> Self {
        Self::with_rules(Rules::default(), seed)
    }

    /// Create a session: fill the grid with uniform draws, then resolve any
    /// pre-existing matches as a free cascade. The warmup awards points but
    /// costs no moves, and the session becomes interactive on a stable grid.
    pub fn with_rules(rules: Rules, seed: u64) -> Self {
        let mut rng = TokenRng::new(seed);
        let mut grid = Grid::filled_random(rules.width, rules.height, &mut rng);
        let warmup = resolve_cascade(&mut grid, &mut rng, &rules);
        log::info!(
            "session started with seed {seed}: warmup cleared {} tokens for {} points",
            warmup.cleared_tokens,
            warmup.points
        );

        Self {
            moves_remaining: rules.starting_moves,
            rules,
            grid,
            rng,
            score: warmup.points,
            selection: None,
            phase: Phase::Idle,
            processing: false,
            events: Vec::new(),
        }
    }

    /// Test constructor: adopt a prepared grid as-is, no warmup
    #[cfg(test)]
    pub(crate) fn from_parts(rules: Rules, grid: Grid, seed: u64) -> Self {
        Self {
            moves_remaining: rules.starting_moves,
            rules,
            grid,
            rng: TokenRng::new(seed),
            score: 0,
            selection: None,
            phase: Phase::Idle,
            processing: false,
            events: Vec::new(),
        }
    }

    /// The sole inbound intent: the player activated a rendered cell.
    ///
    /// Returns the swap outcome when the activation committed a swap attempt,
    /// `None` when it only changed the selection or was ignored. The
    /// `Swapped` outcome carries the full cascade step log; the grid, score,
    /// and move budget are already final when this returns.
    pub fn on_cell_activated(&mut self, row: usize, col: usize) -> Option<SwapResult> {
        let pos = Pos::new(row, col);
        if !self.grid.in_bounds(pos) {
            // Host contract violation: the presentation layer only renders
            // in-bounds cells
            debug_assert!(false, "cell activation out of bounds: ({row}, {col})");
            log::warn!("ignoring out-of-bounds cell activation at ({row}, {col})");
            return None;
        }
        if self.processing || self.phase == Phase::GameOver {
            return None;
        }

        match self.selection {
            None => {
                self.select(pos);
                None
            }
            Some(sel) if sel == pos => {
                self.deselect();
                None
            }
            Some(sel) if sel.is_adjacent(pos) => Some(self.commit_swap(sel, pos)),
            Some(_) => {
                // Not adjacent: the new cell becomes the selection instead
                self.select(pos);
                None
            }
        }
    }

    /// Discard this session and start a fresh one with the same rules
    pub fn restart(&mut self, seed: u64) {
        log::info!("restarting session with seed {seed}");
        *self = Self::with_rules(self.rules.clone(), seed);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn selection(&self) -> Option<Pos> {
        self.selection
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// The seed this session was created with
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Take all queued change notifications, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn select(&mut self, pos: Pos) {
        self.selection = Some(pos);
        self.phase = Phase::OneSelected;
        self.push(GameEvent::SelectionChanged {
            selection: Some(pos),
        });
    }

    fn deselect(&mut self) {
        self.selection = None;
        self.phase = Phase::Idle;
        self.push(GameEvent::SelectionChanged { selection: None });
    }

    fn commit_swap(&mut self, sel: Pos, pos: Pos) -> SwapResult {
        self.selection = None;
        self.push(GameEvent::SelectionChanged { selection: None });
        self.phase = Phase::Processing;

        let before = self.grid.clone();
        let result = moves::attempt_swap(self, sel, pos);
        match &result {
            SwapResult::Rejected(reason) => {
                // Adjacency, bounds, and budget were all pre-checked, so this
                // path should not be reachable from the click handler
                log::warn!("swap {sel:?}<->{pos:?} unexpectedly rejected: {reason:?}");
            }
            SwapResult::SwappedBack { moves_remaining } => {
                self.push(GameEvent::MovesChanged {
                    remaining: *moves_remaining,
                });
            }
            SwapResult::Swapped {
                score_delta,
                moves_remaining,
                ..
            } => {
                let changes = grid_diff(&before, &self.grid);
                let (score, delta) = (self.score, *score_delta);
                if !changes.is_empty() {
                    self.push(GameEvent::GridChanged { changes });
                }
                self.push(GameEvent::MovesChanged {
                    remaining: *moves_remaining,
                });
                if delta > 0 {
                    self.push(GameEvent::ScoreChanged { score, delta });
                }
            }
        }

        // The game-over check fires only after the cascade fully resolves
        if self.moves_remaining == 0 {
            self.phase = Phase::GameOver;
            log::info!("game over, final score {}", self.score);
            self.push(GameEvent::GameOver {
                final_score: self.score,
            });
        } else {
            self.phase = Phase::Idle;
        }

        result
    }
}

/// Positions whose contents differ between two same-sized grids
fn grid_diff(before: &Grid, after: &Grid) -> Vec<CellChange> {
    after
        .positions()
        .filter_map(|pos| {
            let old = before.get(pos).expect("grids share dimensions");
            let new = after.get(pos).expect("position from this grid");
            (old != new).then_some(CellChange { pos, token: new })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::matches::find_matches;
    use crate::engine::moves::SwapResult;
    use crate::engine::test_util::grid_from;

    // Same stable fixture as the move controller tests: (0,2)<->(1,2)
    // matches, (0,1)<->(0,2) does not.
    const BOARD: [&str; 7] = [
        "AABCDEF", "BCADEFA", "CDEFABC", "DEFABCD", "EFABCDE", "FABCDEF", "ABCDEFA",
    ];

    fn session() -> GameSession {
        GameSession::from_parts(Rules::default(), grid_from(&BOARD), 42)
    }

    #[test]
    fn test_new_session_is_stable_and_interactive() {
        let session = GameSession::new(20260805);
        assert!(session.grid().is_full());
        assert!(find_matches(session.grid()).is_empty());
        assert_eq!(session.moves_remaining(), Rules::default().starting_moves);
        assert_eq!(session.phase(), Phase::Idle);
        assert!(!session.is_game_over());
        // Warmup points are whole tokens' worth
        assert_eq!(session.score() % Rules::default().points_per_token, 0);
    }

    #[test]
    fn test_same_seed_same_session() {
        let a = GameSession::new(99);
        let b = GameSession::new(99);
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.score(), b.score());
    }

    #[test]
    fn test_selection_cycle() {
        let mut session = session();

        // First click selects
        assert_eq!(session.on_cell_activated(3, 3), None);
        assert_eq!(session.selection(), Some(Pos::new(3, 3)));
        assert_eq!(session.phase(), Phase::OneSelected);

        // Clicking the selection again deselects
        assert_eq!(session.on_cell_activated(3, 3), None);
        assert_eq!(session.selection(), None);
        assert_eq!(session.phase(), Phase::Idle);

        // A non-adjacent click replaces the selection, no swap attempted
        session.on_cell_activated(0, 0);
        assert_eq!(session.on_cell_activated(5, 5), None);
        assert_eq!(session.selection(), Some(Pos::new(5, 5)));
        assert_eq!(session.moves_remaining(), Rules::default().starting_moves);

        let events = session.drain_events();
        assert!(
            events
                .iter()
                .all(|e| matches!(e, GameEvent::SelectionChanged { .. }))
        );
    }

    #[test]
    fn test_adjacent_click_commits_swap() {
        let mut session = session();

        session.on_cell_activated(0, 1);
        let result = session.on_cell_activated(0, 2);
        assert_eq!(
            result,
            Some(SwapResult::SwappedBack {
                moves_remaining: Rules::default().starting_moves - 1
            })
        );
        assert_eq!(session.selection(), None);
        assert_eq!(session.phase(), Phase::Idle);
        assert!(!session.processing);

        let events = session.drain_events();
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::MovesChanged { remaining } if *remaining == 29))
        );
        // The board reverted, so nothing grid-shaped to redraw
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, GameEvent::GridChanged { .. }))
        );
    }

    #[test]
    fn test_matching_swap_emits_grid_score_and_moves() {
        let mut session = session();

        session.on_cell_activated(1, 2);
        let result = session.on_cell_activated(0, 2);
        assert!(matches!(result, Some(SwapResult::Swapped { .. })));

        let events = session.drain_events();
        let grid_changed = events.iter().find_map(|e| match e {
            GameEvent::GridChanged { changes } => Some(changes),
            _ => None,
        });
        let changes = grid_changed.expect("a matching swap changes the grid");
        // Every visible cell ends the turn holding a token
        assert!(changes.iter().all(|c| c.token.is_some()));
        // The swapped-down B at (1,2) is among the changes
        assert!(changes.iter().any(|c| c.pos == Pos::new(1, 2)));

        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::ScoreChanged { delta, .. } if *delta >= 30))
        );
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::MovesChanged { remaining } if *remaining == 29))
        );
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver { .. }))
        );
    }

    #[test]
    fn test_game_over_on_last_move() {
        let mut session = session();
        session.moves_remaining = 1;

        session.on_cell_activated(0, 1);
        session.on_cell_activated(0, 2);

        assert!(session.is_game_over());
        assert_eq!(session.phase(), Phase::GameOver);
        let events = session.drain_events();
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver { final_score: 0 }))
        );

        // Terminal: further clicks are ignored
        assert_eq!(session.on_cell_activated(0, 0), None);
        assert_eq!(session.selection(), None);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_game_over_waits_for_cascade_to_finish() {
        let mut session = session();
        session.moves_remaining = 1;

        // Matching swap on the final move: the cascade runs to completion,
        // the score lands, and only then does the session end
        session.on_cell_activated(1, 2);
        let result = session.on_cell_activated(0, 2);
        let cascade = match result {
            Some(SwapResult::Swapped { cascade, .. }) => cascade,
            other => panic!("expected a matching swap, got {other:?}"),
        };
        assert!(!cascade.is_empty());
        assert!(session.is_game_over());
        assert!(session.score() >= 30);
        assert!(session.grid().is_full());
        assert!(find_matches(session.grid()).is_empty());
    }

    #[test]
    fn test_restart_discards_everything() {
        let mut session = session();
        session.moves_remaining = 1;
        session.on_cell_activated(0, 1);
        session.on_cell_activated(0, 2);
        assert!(session.is_game_over());

        session.restart(1234);
        assert!(!session.is_game_over());
        assert_eq!(session.moves_remaining(), Rules::default().starting_moves);
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.selection(), None);
        assert!(session.grid().is_full());
        assert!(find_matches(session.grid()).is_empty());
        assert_eq!(session.seed(), 1234);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_out_of_bounds_activation_is_fatal_in_debug() {
        let mut session = session();
        session.on_cell_activated(7, 0);
    }
}
