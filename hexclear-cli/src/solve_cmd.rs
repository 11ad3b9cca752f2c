//! Solve command - search a level for a clearing sequence
//!
//! ## Architecture (3-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), report_outcome()
//! - Level 3: formatting utilities

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use hexclear_core::{Action, Level};
use hexclear_solver::{solve, SolveOutcome, SolveReport, SolverConfig};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct SolveArgs {
    /// Level JSON file
    #[arg(value_name = "FILE")]
    pub level: PathBuf,

    /// Use depth-first search instead of breadth-first
    #[arg(long)]
    pub dfs: bool,

    /// Maximum states to explore before giving up
    #[arg(long, default_value = "500000")]
    pub max_states: usize,

    /// Time budget in milliseconds (unlimited if omitted)
    #[arg(long)]
    pub time_budget_ms: Option<u64>,

    /// Depth cutoff for depth-first search
    #[arg(long, default_value = "48")]
    pub max_depth: u32,

    /// Placement candidates considered per node in depth-first search
    #[arg(long, default_value = "6")]
    pub place_cap: usize,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run solve command
///
/// 1. Load the level
/// 2. Run the configured search
/// 3. Report the outcome
pub fn run(args: SolveArgs) -> Result<()> {
    let level = Level::load(&args.level)
        .with_context(|| format!("Failed to load level: {}", args.level.display()))?;

    tracing::info!(
        "Solving '{}' ({}x{} grid, {} pieces, par {})",
        level.name,
        level.grid_size.cols,
        level.grid_size.rows,
        level.pieces.len(),
        level.par
    );

    let config = build_config(&args);
    let report = solve(&level, &config)
        .with_context(|| format!("Invalid level: {}", args.level.display()))?;

    report_outcome(&level, &report, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Translate command-line flags into a solver configuration
fn build_config(args: &SolveArgs) -> SolverConfig {
    let mut config = if args.dfs {
        SolverConfig::depth_first(args.max_depth, args.place_cap)
    } else {
        SolverConfig::breadth_first(args.max_states)
    };
    config.max_states = args.max_states;
    config.time_budget = args.time_budget_ms.map(Duration::from_millis);
    config
}

/// Report the search outcome
fn report_outcome(level: &Level, report: &SolveReport, args: &SolveArgs) {
    if args.json {
        print_json_report(level, report);
    } else {
        print_text_report(level, report);
    }
}

// ============================================================================
// LEVEL 3 - UTILITIES
// ============================================================================

/// One-line description of a solver action
fn describe_action(action: &Action) -> String {
    match action {
        Action::Remove { cell } => format!("remove {}", cell),
        Action::Place { cell, piece } => format!("place {} at {}", piece, cell),
    }
}

/// Print the report as JSON
fn print_json_report(level: &Level, report: &SolveReport) {
    #[derive(serde::Serialize)]
    struct JsonOutput {
        level: String,
        par: u32,
        outcome: String,
        moves: Option<usize>,
        stars: Option<u8>,
        solution: Option<Vec<Action>>,
        states_explored: usize,
        states_enqueued: usize,
        elapsed_ms: f64,
    }

    let (outcome, solution) = match &report.outcome {
        SolveOutcome::Solved(actions) => ("solved", Some(actions.clone())),
        SolveOutcome::ProvenUnsolvable => ("unsolvable", None),
        SolveOutcome::BudgetExceeded => ("budget_exceeded", None),
    };

    let moves = solution.as_ref().map(|actions| actions.len());
    let output = JsonOutput {
        level: level.name.clone(),
        par: level.par,
        outcome: outcome.to_string(),
        moves,
        stars: moves.map(|m| level.stars(m as u32)),
        solution,
        states_explored: report.states_explored,
        states_enqueued: report.states_enqueued,
        elapsed_ms: report.elapsed.as_secs_f64() * 1000.0,
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print the report as text
fn print_text_report(level: &Level, report: &SolveReport) {
    println!("\n=== Solve Report: {} ===", level.name);

    match &report.outcome {
        SolveOutcome::Solved(actions) => {
            let moves = actions.len() as u32;
            println!("Result:    solved in {} moves", moves);
            println!("Par:       {}", level.par);
            println!(
                "Stars:     {} ({}/3)",
                "*".repeat(level.stars(moves) as usize),
                level.stars(moves)
            );
            println!("\nSolution:");
            for (i, action) in actions.iter().enumerate() {
                println!("  {:>2}. {}", i + 1, describe_action(action));
            }
        }
        SolveOutcome::ProvenUnsolvable => {
            println!("Result:    unsolvable (search space exhausted)");
        }
        SolveOutcome::BudgetExceeded => {
            println!("Result:    inconclusive (budget exceeded)");
        }
    }

    println!("\nExplored:  {} states", report.states_explored);
    println!("Enqueued:  {} states", report.states_enqueued);
    println!("Elapsed:   {:.1}ms", report.elapsed.as_secs_f64() * 1000.0);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hexclear_core::{Cell, Color, Piece};
    use hexclear_solver::Strategy;

    fn base_args() -> SolveArgs {
        SolveArgs {
            level: PathBuf::from("level.json"),
            dfs: false,
            max_states: 1000,
            time_budget_ms: None,
            max_depth: 48,
            place_cap: 6,
            json: false,
        }
    }

    #[test]
    fn test_build_config_breadth_first() {
        let config = build_config(&base_args());
        assert_eq!(config.strategy, Strategy::BreadthFirst);
        assert_eq!(config.max_states, 1000);
        assert_eq!(config.time_budget, None);
    }

    #[test]
    fn test_build_config_depth_first() {
        let mut args = base_args();
        args.dfs = true;
        args.max_depth = 12;
        args.place_cap = 3;
        args.time_budget_ms = Some(250);

        let config = build_config(&args);
        assert_eq!(config.strategy, Strategy::DepthFirst);
        assert_eq!(config.max_depth, 12);
        assert_eq!(config.place_cap, 3);
        assert_eq!(config.max_states, 1000);
        assert_eq!(config.time_budget, Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_describe_action() {
        let remove = Action::Remove { cell: Cell::new(2, 1) };
        assert_eq!(describe_action(&remove), "remove (2,1)");

        let place = Action::Place {
            cell: Cell::new(0, 3),
            piece: Piece::with_modifier(Color::White, Color::Red),
        };
        assert_eq!(describe_action(&place), "place white+red at (0,3)");
    }
}
