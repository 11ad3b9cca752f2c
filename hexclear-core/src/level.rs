//! Level model - JSON schema, validation, and board construction
//!
//! Levels travel as camelCase JSON: grid size, a row-major cell mask,
//! piece placements, an optional move limit, and a par. `validate`
//! enforces the bounds the level editor promises, so a validated level
//! always yields a well-formed starting state.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::board::Board;
use crate::game::GameState;
use crate::hex::Cell;
use crate::piece::{Color, Piece};

// ============================================================================
// BOUNDS
// ============================================================================

pub const MIN_COLS: u8 = 2;
pub const MAX_COLS: u8 = 12;
pub const MIN_ROWS: u8 = 2;
pub const MAX_ROWS: u8 = 10;
pub const MAX_PIECES: usize = 50;
pub const MAX_MOVE_LIMIT: u32 = 99;
pub const MAX_PAR: u32 = 99;

// ============================================================================
// SCHEMA
// ============================================================================

/// Grid dimensions in columns and rows
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub cols: u8,
    pub rows: u8,
}

/// One starting piece at an offset coordinate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub q: i8,
    pub r: i8,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<Color>,
}

impl Placement {
    pub fn cell(&self) -> Cell {
        Cell::new(self.q, self.r)
    }

    pub fn piece(&self) -> Piece {
        Piece {
            color: self.color,
            modifier: self.modifier,
        }
    }
}

/// A puzzle definition. `id`, `category`, and `description` are editor
/// metadata carried through untouched; the engine never reads them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub grid_size: GridSize,
    /// `null` means unlimited moves
    #[serde(default)]
    pub move_limit: Option<u32>,
    pub par: u32,
    /// Row-major cell mask, `mask[r][q]`
    pub mask: Vec<Vec<bool>>,
    pub pieces: Vec<Placement>,
}

/// Why a level definition was rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    #[error("grid {cols}x{rows} is outside 2-12 columns by 2-10 rows")]
    GridSize { cols: u8, rows: u8 },
    #[error("mask shape does not match the {cols}x{rows} grid")]
    MaskShape { cols: u8, rows: u8 },
    #[error("level must hold 1 to 50 pieces, found {0}")]
    PieceCount(usize),
    #[error("piece at {0} is outside the grid")]
    PieceOffGrid(Cell),
    #[error("piece at {0} sits on a masked-out cell")]
    PieceOffMask(Cell),
    #[error("two pieces share cell {0}")]
    DuplicatePiece(Cell),
    #[error("move limit {0} is outside 1-99")]
    MoveLimitRange(u32),
    #[error("par {0} is outside 1-99")]
    ParRange(u32),
}

// ============================================================================
// IMPL
// ============================================================================

impl Level {
    /// Parse from a JSON string without validating
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Load and validate a level file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let level = Self::from_json(&content)?;
        level.validate()?;
        Ok(level)
    }

    /// Save as pretty-printed JSON
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check the definition against the editor bounds
    pub fn validate(&self) -> Result<(), LevelError> {
        let GridSize { cols, rows } = self.grid_size;
        if !(MIN_COLS..=MAX_COLS).contains(&cols) || !(MIN_ROWS..=MAX_ROWS).contains(&rows) {
            return Err(LevelError::GridSize { cols, rows });
        }
        if self.mask.len() != rows as usize
            || self.mask.iter().any(|row| row.len() != cols as usize)
        {
            return Err(LevelError::MaskShape { cols, rows });
        }
        if self.pieces.is_empty() || self.pieces.len() > MAX_PIECES {
            return Err(LevelError::PieceCount(self.pieces.len()));
        }

        let mut seen = FxHashSet::default();
        for placement in &self.pieces {
            let cell = placement.cell();
            if placement.q < 0
                || placement.q >= cols as i8
                || placement.r < 0
                || placement.r >= rows as i8
            {
                return Err(LevelError::PieceOffGrid(cell));
            }
            if !self.mask[placement.r as usize][placement.q as usize] {
                return Err(LevelError::PieceOffMask(cell));
            }
            if !seen.insert(cell) {
                return Err(LevelError::DuplicatePiece(cell));
            }
        }

        if let Some(limit) = self.move_limit {
            if !(1..=MAX_MOVE_LIMIT).contains(&limit) {
                return Err(LevelError::MoveLimitRange(limit));
            }
        }
        if !(1..=MAX_PAR).contains(&self.par) {
            return Err(LevelError::ParRange(self.par));
        }
        Ok(())
    }

    /// Build the starting state; validates first so the board constructor
    /// only ever sees in-bounds placements
    pub fn initial_state(&self) -> Result<GameState, LevelError> {
        self.validate()?;
        let mask = self.mask.iter().flatten().copied().collect();
        let mut board = Board::new(self.grid_size.cols, self.grid_size.rows, mask);
        for placement in &self.pieces {
            board.set_piece(placement.cell(), placement.piece());
        }
        Ok(GameState::new(board))
    }

    /// Star rating for a clear in `moves` against this level's par
    pub fn stars(&self, moves: u32) -> u8 {
        if moves <= self.par {
            3
        } else if moves <= self.par + 2 {
            2
        } else {
            1
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x3 grid with one hole and two pieces
    fn sample_level() -> Level {
        Level {
            id: None,
            name: "sample".to_string(),
            category: None,
            description: None,
            grid_size: GridSize { cols: 3, rows: 3 },
            move_limit: Some(4),
            par: 2,
            mask: vec![
                vec![true, true, true],
                vec![true, true, true],
                vec![true, false, true],
            ],
            pieces: vec![
                Placement { q: 0, r: 0, color: Color::Blue, modifier: None },
                Placement { q: 2, r: 2, color: Color::Red, modifier: Some(Color::Blue) },
            ],
        }
    }

    #[test]
    fn test_parses_original_format() {
        let text = r#"{
            "id": 7,
            "name": "Teste",
            "category": "Fundamentos",
            "description": "desc",
            "gridSize": { "cols": 5, "rows": 4 },
            "moveLimit": null,
            "par": 3,
            "mask": [
                [true, true, true, true, true],
                [true, true, true, true, true],
                [true, true, true, true, true],
                [true, true, true, true, true]
            ],
            "pieces": [
                { "q": 2, "r": 1, "color": "red" },
                { "q": 3, "r": 1, "color": "blue", "modifier": "red" }
            ]
        }"#;
        let level = Level::from_json(text).unwrap();

        assert_eq!(level.id, Some(7));
        assert_eq!(level.grid_size, GridSize { cols: 5, rows: 4 });
        assert_eq!(level.move_limit, None);
        assert_eq!(level.pieces[1].modifier, Some(Color::Red));
        assert!(level.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let level = sample_level();
        let text = serde_json::to_string(&level).unwrap();
        assert_eq!(Level::from_json(&text).unwrap(), level);
        // metadata stays out of the output when absent
        assert!(!text.contains("category"));
    }

    #[test]
    fn test_validate_grid_bounds() {
        let mut level = sample_level();
        level.grid_size.cols = 1;
        assert_eq!(
            level.validate(),
            Err(LevelError::GridSize { cols: 1, rows: 3 })
        );

        let mut level = sample_level();
        level.grid_size.rows = 11;
        assert!(matches!(level.validate(), Err(LevelError::GridSize { .. })));
    }

    #[test]
    fn test_validate_mask_shape() {
        let mut level = sample_level();
        level.mask.pop();
        assert_eq!(
            level.validate(),
            Err(LevelError::MaskShape { cols: 3, rows: 3 })
        );

        let mut level = sample_level();
        level.mask[1].push(true); // ragged row
        assert!(matches!(level.validate(), Err(LevelError::MaskShape { .. })));
    }

    #[test]
    fn test_validate_piece_placement() {
        let mut level = sample_level();
        level.pieces[0].q = 3;
        assert_eq!(
            level.validate(),
            Err(LevelError::PieceOffGrid(Cell::new(3, 0)))
        );

        let mut level = sample_level();
        level.pieces[0] = Placement { q: 1, r: 2, color: Color::Blue, modifier: None };
        assert_eq!(
            level.validate(),
            Err(LevelError::PieceOffMask(Cell::new(1, 2)))
        );

        let mut level = sample_level();
        level.pieces.push(level.pieces[0]);
        assert_eq!(
            level.validate(),
            Err(LevelError::DuplicatePiece(Cell::new(0, 0)))
        );
    }

    #[test]
    fn test_validate_counts_and_ranges() {
        let mut level = sample_level();
        level.pieces.clear();
        assert_eq!(level.validate(), Err(LevelError::PieceCount(0)));

        let mut level = sample_level();
        level.move_limit = Some(0);
        assert_eq!(level.validate(), Err(LevelError::MoveLimitRange(0)));

        let mut level = sample_level();
        level.par = 100;
        assert_eq!(level.validate(), Err(LevelError::ParRange(100)));
    }

    #[test]
    fn test_initial_state_builds_board() {
        let state = sample_level().initial_state().unwrap();

        assert_eq!(state.board().occupied_count(), 2);
        assert_eq!(
            state.board().piece_at(Cell::new(2, 2)),
            Some(&Piece::with_modifier(Color::Red, Color::Blue))
        );
        assert!(!state.board().exists(Cell::new(1, 2))); // the hole
        assert!(state.hand().is_empty());
        assert_eq!(state.moves(), 0);
    }

    #[test]
    fn test_stars_thresholds() {
        let level = sample_level(); // par 2
        assert_eq!(level.stars(2), 3);
        assert_eq!(level.stars(3), 2);
        assert_eq!(level.stars(4), 2);
        assert_eq!(level.stars(5), 1);
    }
}
