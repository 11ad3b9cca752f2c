//! HexClear Core - Puzzle engine
//!
//! This crate provides the core rules for HexClear:
//! - Board geometry (odd-q offset hex grid, flat-top cells)
//! - Pieces, colors, and color modifiers
//! - The per-color removal rule engine
//! - Game state with removals, placements, and exact undo
//! - Level schema, validation, and board construction

pub mod board;
pub mod hex;
pub mod piece;
pub mod game;
pub mod rules;
pub mod level;

// Re-exports for convenient access
pub use board::Board;
pub use hex::{Cell, Direction, ALL_DIRECTIONS};
pub use piece::{Color, Piece, ALL_COLORS};
pub use game::{Action, Game, GameState, MoveError, MoveOutcome, MoveRecord};
pub use rules::can_remove;
pub use level::{GridSize, Level, LevelError, Placement};
