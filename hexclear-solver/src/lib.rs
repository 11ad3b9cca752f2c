//! HexClear Solver - Solvability search
//!
//! This crate decides whether a level can be cleared:
//! - Breadth-first search with minimum-move solutions
//! - Depth-first search on one mutable state for low memory
//! - Canonical fingerprints for duplicate detection
//! - Three-way verdicts: solved, proven unsolvable, budget exceeded

use std::time::Duration;

use hexclear_core::{Level, LevelError};

pub mod dfs;
pub mod fingerprint;
pub mod search;

pub use fingerprint::fingerprint;
pub use search::{SolveOutcome, SolveReport};

// ============================================================================
// CONFIGURATION
// ============================================================================

pub const DEFAULT_MAX_STATES: usize = 500_000;
pub const DEFAULT_MAX_DEPTH: u32 = 48;
pub const DEFAULT_PLACE_CAP: usize = 6;

/// Search strategy
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Level-order search; solutions are minimum-move
    BreadthFirst,
    /// Backtracking walk; flat memory, no minimality promise
    DepthFirst,
}

/// Solver configuration
#[derive(Clone, Copy, Debug)]
pub struct SolverConfig {
    pub strategy: Strategy,
    /// States examined before giving up
    pub max_states: usize,
    /// Wall-clock budget; `None` searches until exhaustion
    pub time_budget: Option<Duration>,
    /// Depth-first recursion cutoff
    pub max_depth: u32,
    /// Depth-first cap on placement candidates per node
    pub place_cap: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::BreadthFirst,
            max_states: DEFAULT_MAX_STATES,
            time_budget: None,
            max_depth: DEFAULT_MAX_DEPTH,
            place_cap: DEFAULT_PLACE_CAP,
        }
    }
}

impl SolverConfig {
    /// Breadth-first with a state budget
    pub fn breadth_first(max_states: usize) -> Self {
        Self {
            strategy: Strategy::BreadthFirst,
            max_states,
            ..Self::default()
        }
    }

    /// Depth-first with explicit cutoffs
    pub fn depth_first(max_depth: u32, place_cap: usize) -> Self {
        Self {
            strategy: Strategy::DepthFirst,
            max_depth,
            place_cap,
            ..Self::default()
        }
    }
}

// ============================================================================
// FACADE
// ============================================================================

/// Validate a level and search it with the configured strategy
pub fn solve(level: &Level, config: &SolverConfig) -> Result<SolveReport, LevelError> {
    let state = level.initial_state()?;
    let report = match config.strategy {
        Strategy::BreadthFirst => search::breadth_first(state, level.move_limit, config),
        Strategy::DepthFirst => dfs::depth_first(state, level.move_limit, config),
    };
    Ok(report)
}

// ============================================================================
// TESTS
// ============================================================================
