//! Breadth-first solvability search
//!
//! Explores the action graph level by level, so the first cleared state
//! taken off the frontier carries a minimum-move solution. Nodes live in
//! an arena with parent links; the frontier is the arena tail behind an
//! advancing head cursor, which keeps every explored state available for
//! path reconstruction.
//!
//! ## Architecture
//! - Level 2: search loop (dequeue, goal test, expand)
//! - Level 3: child generation and duplicate rejection
//! - Level 4: path reconstruction, report assembly

use std::time::{Duration, Instant};

use hexclear_core::{Action, Cell, GameState, Piece};
use rustc_hash::FxHashSet;

use crate::fingerprint::fingerprint;
use crate::SolverConfig;

// ============================================================================
// OUTCOME & REPORT
// ============================================================================

/// Three-way search verdict
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
    /// Action list reaching the cleared board
    Solved(Vec<Action>),
    /// The whole reachable space was exhausted without a win
    ProvenUnsolvable,
    /// A state, depth, or time budget cut the search short
    BudgetExceeded,
}

impl SolveOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved(_))
    }
}

/// Verdict plus search statistics
#[derive(Clone, Debug)]
pub struct SolveReport {
    pub outcome: SolveOutcome,
    /// States taken off the frontier and examined
    pub states_explored: usize,
    /// States admitted to the frontier, root included
    pub states_enqueued: usize,
    pub elapsed: Duration,
}

impl SolveReport {
    pub fn solution(&self) -> Option<&[Action]> {
        match &self.outcome {
            SolveOutcome::Solved(actions) => Some(actions),
            _ => None,
        }
    }
}

// ============================================================================
// SEARCH NODES
// ============================================================================

/// Node identifier (index into the arena)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct NodeId(usize);

/// One admitted state with its incoming edge
struct SearchNode {
    state: GameState,
    parent: Option<(NodeId, Action)>,
}

// ============================================================================
// SEARCH LOOP (Level 2)
// ============================================================================

/// Run breadth-first search from `state`. Children that would bust the
/// move limit are never admitted, so a `Solved` verdict always fits it.
pub fn breadth_first(
    state: GameState,
    move_limit: Option<u32>,
    config: &SolverConfig,
) -> SolveReport {
    let start = Instant::now();
    let deadline = config.time_budget.map(|budget| start + budget);
    let cells = state.board().existing_cells();

    let mut visited = FxHashSet::default();
    visited.insert(fingerprint(&state));
    let mut arena = vec![SearchNode { state, parent: None }];
    let mut head = 0;
    let mut explored = 0;

    while head < arena.len() {
        if explored >= config.max_states || deadline.map_or(false, |d| Instant::now() >= d) {
            return report(SolveOutcome::BudgetExceeded, explored, arena.len(), start);
        }

        let id = NodeId(head);
        head += 1;
        explored += 1;

        if goal_reached(&arena[id.0].state, move_limit) {
            let actions = path_to(&arena, id);
            return report(SolveOutcome::Solved(actions), explored, arena.len(), start);
        }

        for (action, child) in expand(&arena[id.0].state, &cells, move_limit, &mut visited) {
            arena.push(SearchNode {
                state: child,
                parent: Some((id, action)),
            });
        }
    }

    report(SolveOutcome::ProvenUnsolvable, explored, arena.len(), start)
}

// ============================================================================
// CHILD GENERATION (Level 3)
// ============================================================================

/// Admissible children in canonical order: removals by board order, then
/// one placement per distinct hand kind and open cell
fn expand(
    state: &GameState,
    cells: &[Cell],
    move_limit: Option<u32>,
    visited: &mut FxHashSet<String>,
) -> Vec<(Action, GameState)> {
    let mut children = Vec::new();

    for &cell in cells {
        if !state.can_remove(cell) {
            continue;
        }
        let action = Action::Remove { cell };
        if let Ok(child) = state.successor(action) {
            consider(action, child, move_limit, visited, &mut children);
        }
    }

    if state.hand().is_empty() {
        return children;
    }
    for piece in hand_kinds(state.hand()) {
        for &cell in cells {
            if !state.board().is_open(cell) {
                continue;
            }
            let action = Action::Place { cell, piece };
            if let Ok(child) = state.successor(action) {
                consider(action, child, move_limit, visited, &mut children);
            }
        }
    }

    children
}

/// Admit a child unless it busts the move limit or repeats a seen state
fn consider(
    action: Action,
    child: GameState,
    move_limit: Option<u32>,
    visited: &mut FxHashSet<String>,
    out: &mut Vec<(Action, GameState)>,
) {
    if let Some(limit) = move_limit {
        if child.moves() > limit {
            return;
        }
    }
    if visited.insert(fingerprint(&child)) {
        out.push((action, child));
    }
}

/// First hand piece of each distinct kind, in hand order. Equal pieces
/// place identically, so one representative per kind is enough.
pub(crate) fn hand_kinds(hand: &[Piece]) -> Vec<Piece> {
    let mut kinds: Vec<Piece> = Vec::new();
    for &piece in hand {
        if !kinds.contains(&piece) {
            kinds.push(piece);
        }
    }
    kinds
}

/// Cleared board within the move limit
pub(crate) fn goal_reached(state: &GameState, move_limit: Option<u32>) -> bool {
    state.is_cleared() && move_limit.map_or(true, |limit| state.moves() <= limit)
}

// ============================================================================
// REPORT ASSEMBLY (Level 4)
// ============================================================================

/// Rebuild the root-to-node action list by walking parent links
fn path_to(arena: &[SearchNode], id: NodeId) -> Vec<Action> {
    let mut actions = Vec::new();
    let mut current = id;
    while let Some((parent, action)) = arena[current.0].parent {
        actions.push(action);
        current = parent;
    }
    actions.reverse();
    actions
}

pub(crate) fn report(
    outcome: SolveOutcome,
    explored: usize,
    enqueued: usize,
    start: Instant,
) -> SolveReport {
    SolveReport {
        outcome,
        states_explored: explored,
        states_enqueued: enqueued,
        elapsed: start.elapsed(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hexclear_core::{Board, Color};

    /// 3x1 strip: red between an edge and a blue; the red must go first
    fn forced_line() -> GameState {
        let mut board = Board::new(3, 1, vec![true; 3]);
        board.set_piece(Cell::new(1, 0), Piece::new(Color::Red));
        board.set_piece(Cell::new(2, 0), Piece::new(Color::Blue));
        GameState::new(board)
    }

    #[test]
    fn test_solves_forced_line() {
        let report = breadth_first(forced_line(), None, &SolverConfig::default());

        assert_eq!(
            report.solution().unwrap(),
            &[
                Action::Remove { cell: Cell::new(1, 0) },
                Action::Remove { cell: Cell::new(2, 0) },
            ]
        );
        assert!(report.states_explored >= 2);
    }

    #[test]
    fn test_solution_is_minimal() {
        // two isolated blues: placements open longer paths, but the
        // two-removal solution must win
        let mut board = Board::new(2, 2, vec![true; 4]);
        board.set_piece(Cell::new(0, 0), Piece::new(Color::Blue));
        board.set_piece(Cell::new(1, 1), Piece::new(Color::Blue));
        let report = breadth_first(GameState::new(board), None, &SolverConfig::default());

        assert_eq!(report.solution().unwrap().len(), 2);
    }

    #[test]
    fn test_placement_is_found_when_required() {
        // orange at (1,1) needs its only slot (1,0) filled; the lone blue
        // must be removed, placed beside it, and removed again
        let mut mask = vec![false; 16];
        mask[1] = true; // (1,0)
        mask[5] = true; // (1,1)
        mask[15] = true; // (3,3)
        let mut board = Board::new(4, 4, mask);
        board.set_piece(Cell::new(1, 1), Piece::new(Color::Orange));
        board.set_piece(Cell::new(3, 3), Piece::new(Color::Blue));
        let report = breadth_first(GameState::new(board), None, &SolverConfig::default());

        assert_eq!(
            report.solution().unwrap(),
            &[
                Action::Remove { cell: Cell::new(3, 3) },
                Action::Place { cell: Cell::new(1, 0), piece: Piece::new(Color::Blue) },
                Action::Remove { cell: Cell::new(1, 1) },
                Action::Remove { cell: Cell::new(1, 0) },
            ]
        );
    }

    #[test]
    fn test_proves_stuck_root_unsolvable() {
        // two black+black pieces block each other and nothing else moves
        let mut board = Board::new(2, 2, vec![true; 4]);
        board.set_piece(Cell::new(0, 0), Piece::with_modifier(Color::Black, Color::Black));
        board.set_piece(Cell::new(1, 1), Piece::with_modifier(Color::Black, Color::Black));
        let report = breadth_first(GameState::new(board), None, &SolverConfig::default());

        assert_eq!(report.outcome, SolveOutcome::ProvenUnsolvable);
        assert_eq!(report.states_explored, 1);
    }

    #[test]
    fn test_proves_hand_deadlock_unsolvable() {
        // either white+white can come off, but the one in hand then blocks
        // the other forever; the search must exhaust, not loop
        let mut board = Board::new(2, 2, vec![true; 4]);
        board.set_piece(Cell::new(0, 0), Piece::with_modifier(Color::White, Color::White));
        board.set_piece(Cell::new(1, 1), Piece::with_modifier(Color::White, Color::White));
        let report = breadth_first(GameState::new(board), None, &SolverConfig::default());

        assert_eq!(report.outcome, SolveOutcome::ProvenUnsolvable);
        assert!(report.states_explored > 1);
    }

    #[test]
    fn test_state_budget_cuts_search() {
        let report = breadth_first(forced_line(), None, &SolverConfig::breadth_first(1));
        assert_eq!(report.outcome, SolveOutcome::BudgetExceeded);
    }

    #[test]
    fn test_time_budget_cuts_search() {
        let config = SolverConfig {
            time_budget: Some(Duration::ZERO),
            ..SolverConfig::default()
        };
        let report = breadth_first(forced_line(), None, &config);
        assert_eq!(report.outcome, SolveOutcome::BudgetExceeded);
    }

    #[test]
    fn test_move_limit_blocks_detours() {
        // limit 2 leaves room for the straight solution only
        let report = breadth_first(forced_line(), Some(2), &SolverConfig::default());
        assert_eq!(report.solution().unwrap().len(), 2);

        // limit 1 rules the level out entirely
        let report = breadth_first(forced_line(), Some(1), &SolverConfig::default());
        assert_eq!(report.outcome, SolveOutcome::ProvenUnsolvable);
    }

    #[test]
    fn test_hand_kinds_dedup() {
        let hand = [
            Piece::new(Color::Blue),
            Piece::with_modifier(Color::Blue, Color::Red),
            Piece::new(Color::Blue),
            Piece::new(Color::Red),
        ];
        assert_eq!(
            hand_kinds(&hand),
            vec![
                Piece::new(Color::Blue),
                Piece::with_modifier(Color::Blue, Color::Red),
                Piece::new(Color::Red),
            ]
        );
    }
}
