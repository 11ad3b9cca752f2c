//! Show command - render a level board as text
//!
//! Flat-top hexes in odd-q offset layout: odd columns print half a row
//! lower than even columns, matching the board geometry.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hexclear_core::{Board, Cell, GameState, Level, Piece, ALL_COLORS};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct ShowArgs {
    /// Level JSON file
    #[arg(value_name = "FILE")]
    pub level: PathBuf,

    /// Print the removal rule legend
    #[arg(long)]
    pub legend: bool,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// Run show command
pub fn run(args: ShowArgs) -> Result<()> {
    let level = Level::load(&args.level)
        .with_context(|| format!("Failed to load level: {}", args.level.display()))?;
    let state = level
        .initial_state()
        .with_context(|| format!("Invalid level: {}", args.level.display()))?;

    print_header(&level);
    for line in board_lines(state.board()) {
        println!("  {}", line);
    }
    print_modified_pieces(&state);
    print_removable(&state);
    if args.legend {
        print_legend();
    }

    Ok(())
}

// ============================================================================
// RENDERING
// ============================================================================

fn print_header(level: &Level) {
    println!("\n=== {} ===", level.name);
    if let Some(category) = &level.category {
        println!("Category: {}", category);
    }
    if let Some(description) = &level.description {
        println!("{}", description);
    }

    let limit = match level.move_limit {
        Some(limit) => limit.to_string(),
        None => "none".to_string(),
    };
    println!(
        "Grid: {}x{}  Par: {}  Move limit: {}\n",
        level.grid_size.cols, level.grid_size.rows, level.par, limit
    );
}

/// Render the board as staggered text rows, two lines per grid row
fn board_lines(board: &Board) -> Vec<String> {
    let mut lines = Vec::new();

    for r in 0..board.rows() as i8 {
        let mut even_line = String::new();
        let mut odd_line = String::new();

        for q in 0..board.cols() as i8 {
            let token = cell_token(board, Cell::new(q, r));
            if q % 2 == 0 {
                even_line.push_str(&token);
                odd_line.push_str("    ");
            } else {
                even_line.push_str("    ");
                odd_line.push_str(&token);
            }
        }

        lines.push(even_line.trim_end().to_string());
        lines.push(odd_line.trim_end().to_string());
    }

    while lines.last().map_or(false, |line| line.is_empty()) {
        lines.pop();
    }
    lines
}

/// Three-character cell token plus a column gap
fn cell_token(board: &Board, cell: Cell) -> String {
    if !board.exists(cell) {
        return "    ".to_string();
    }
    match board.piece_at(cell) {
        Some(piece) => format!("[{}] ", piece.color.code()),
        None => "[ ] ".to_string(),
    }
}

/// Board tokens only show the base color, so list modifiers separately
fn print_modified_pieces(state: &GameState) {
    let mut modified: Vec<(Cell, &Piece)> = state
        .board()
        .pieces()
        .filter(|(_, piece)| piece.modifier.is_some())
        .collect();
    modified.sort_by_key(|(cell, _)| (cell.r, cell.q));

    if !modified.is_empty() {
        println!("\nModified pieces:");
        for (cell, piece) in modified {
            println!("  {} {}", cell, piece);
        }
    }
}

fn print_removable(state: &GameState) {
    let removable: Vec<Cell> = state
        .board()
        .existing_cells()
        .into_iter()
        .filter(|&cell| state.can_remove(cell))
        .collect();

    if removable.is_empty() {
        println!("\nRemovable now: none");
        return;
    }

    let listed: Vec<String> = removable.iter().map(|cell| cell.to_string()).collect();
    println!("\nRemovable now: {}", listed.join(" "));
}

fn print_legend() {
    println!("\nLegend:");
    for color in ALL_COLORS {
        println!("  {} {:<7} {}", color.code(), color.name(), color.rule_summary());
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hexclear_core::Color;

    fn sample_board() -> Board {
        let mut mask = vec![true; 4];
        mask[2] = false; // (0,1) is a hole
        let mut board = Board::new(2, 2, mask);
        board.set_piece(Cell::new(0, 0), Piece::new(Color::Red));
        board
    }

    #[test]
    fn test_cell_token() {
        let board = sample_board();
        assert_eq!(cell_token(&board, Cell::new(0, 0)), "[R] ");
        assert_eq!(cell_token(&board, Cell::new(1, 0)), "[ ] ");
        assert_eq!(cell_token(&board, Cell::new(0, 1)), "    ");
    }

    #[test]
    fn test_board_lines_stagger() {
        let board = sample_board();
        let lines = board_lines(&board);

        // Row 0: red at even column, open cell on the odd half-row below
        assert_eq!(lines[0], "[R]");
        assert_eq!(lines[1], "    [ ]");
        // Row 1: (0,1) is a hole, (1,1) is open
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "    [ ]");
    }

    #[test]
    fn test_board_lines_drop_trailing_blanks() {
        let board = Board::new(2, 2, vec![true, false, true, false]);
        let lines = board_lines(&board);

        // No odd-column cells exist, so odd half-rows vanish entirely
        assert_eq!(lines.last(), Some(&"[ ]".to_string()));
    }
}
