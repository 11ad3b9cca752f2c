//! Depth-first solvability search
//!
//! Walks the action graph by mutating one state and reverting move
//! records on backtrack, so memory stays flat regardless of depth.
//! Repeats are only blocked along the current path. The verdict stays
//! honest: exhaustion proves unsolvability only when neither the depth
//! cutoff nor the placement cap clipped a branch along the way.
//!
//! ## Architecture
//! - Level 2: recursive walk (goal test, budgets, backtracking)
//! - Level 3: candidate generation with the placement cap

use std::time::Instant;

use hexclear_core::{Action, Cell, GameState};
use rustc_hash::FxHashSet;

use crate::fingerprint::fingerprint;
use crate::search::{goal_reached, hand_kinds, report, SolveOutcome, SolveReport};
use crate::SolverConfig;

// ============================================================================
// SEARCH DRIVER (Level 2)
// ============================================================================

struct DfsRun<'a> {
    config: &'a SolverConfig,
    move_limit: Option<u32>,
    cells: Vec<Cell>,
    deadline: Option<Instant>,
    /// Fingerprints of states on the current path, root included
    on_path: FxHashSet<String>,
    path: Vec<Action>,
    explored: usize,
    pushed: usize,
    pruned: bool,
    out_of_budget: bool,
}

/// Run depth-first search from `state`. The solution is a valid action
/// list but carries no minimality promise.
pub fn depth_first(
    mut state: GameState,
    move_limit: Option<u32>,
    config: &SolverConfig,
) -> SolveReport {
    let start = Instant::now();
    let mut run = DfsRun {
        config,
        move_limit,
        cells: state.board().existing_cells(),
        deadline: config.time_budget.map(|budget| start + budget),
        on_path: FxHashSet::default(),
        path: Vec::new(),
        explored: 0,
        pushed: 1,
        pruned: false,
        out_of_budget: false,
    };
    run.on_path.insert(fingerprint(&state));

    let solved = run.walk(&mut state, 0);
    let outcome = if solved {
        SolveOutcome::Solved(run.path)
    } else if run.out_of_budget || run.pruned {
        SolveOutcome::BudgetExceeded
    } else {
        SolveOutcome::ProvenUnsolvable
    };
    report(outcome, run.explored, run.pushed, start)
}

impl DfsRun<'_> {
    fn walk(&mut self, state: &mut GameState, depth: u32) -> bool {
        self.explored += 1;
        if goal_reached(state, self.move_limit) {
            return true;
        }
        if self.explored >= self.config.max_states
            || self.deadline.map_or(false, |d| Instant::now() >= d)
        {
            self.out_of_budget = true;
            return false;
        }
        if depth >= self.config.max_depth {
            self.pruned = true;
            return false;
        }

        for action in self.candidate_actions(state) {
            let record = match state.apply(action) {
                Ok(record) => record,
                Err(_) => continue,
            };
            if self.over_limit(state) {
                state.revert(record);
                continue;
            }
            let fp = fingerprint(state);
            if self.on_path.contains(&fp) {
                state.revert(record);
                continue;
            }

            self.on_path.insert(fp.clone());
            self.path.push(action);
            self.pushed += 1;
            if self.walk(state, depth + 1) {
                return true;
            }
            self.path.pop();
            self.on_path.remove(&fp);
            state.revert(record);

            if self.out_of_budget {
                return false;
            }
        }
        false
    }

    fn over_limit(&self, state: &GameState) -> bool {
        self.move_limit
            .map_or(false, |limit| state.moves() > limit)
    }

    // ========================================================================
    // CANDIDATES (Level 3)
    // ========================================================================

    /// Same canonical order as the breadth-first expander. Placement
    /// candidates stop at the cap; clipping marks the walk as pruned.
    fn candidate_actions(&mut self, state: &GameState) -> Vec<Action> {
        let mut actions = Vec::new();
        for &cell in &self.cells {
            if state.can_remove(cell) {
                actions.push(Action::Remove { cell });
            }
        }

        if state.hand().is_empty() {
            return actions;
        }
        let mut places = 0;
        for piece in hand_kinds(state.hand()) {
            for &cell in &self.cells {
                if !state.board().is_open(cell) {
                    continue;
                }
                if places >= self.config.place_cap {
                    self.pruned = true;
                    return actions;
                }
                actions.push(Action::Place { cell, piece });
                places += 1;
            }
        }
        actions
    }
}

// ============================================================================
// TESTS
// ============================================================================
