//! Masked board: a dense existence grid plus sparse piece occupancy

use crate::hex::{Cell, Direction, ALL_DIRECTIONS};
use crate::piece::Piece;
use rustc_hash::FxHashMap;

/// Board over a masked odd-q grid (clone to mutate)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cols: u8,
    rows: u8,
    /// Row-major existence mask; holes are permanent
    mask: Vec<bool>,
    /// Cell -> piece (sparse occupancy)
    pieces: FxHashMap<Cell, Piece>,
}

impl Board {
    /// Build an empty board from dimensions and a row-major mask
    pub fn new(cols: u8, rows: u8, mask: Vec<bool>) -> Self {
        debug_assert_eq!(mask.len(), cols as usize * rows as usize);
        Self {
            cols,
            rows,
            mask,
            pieces: FxHashMap::default(),
        }
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Whether the cell exists on this board
    pub fn exists(&self, cell: Cell) -> bool {
        cell.q >= 0
            && cell.r >= 0
            && (cell.q as u8) < self.cols
            && (cell.r as u8) < self.rows
            && self.mask[cell.r as usize * self.cols as usize + cell.q as usize]
    }

    pub fn piece_at(&self, cell: Cell) -> Option<&Piece> {
        self.pieces.get(&cell)
    }

    /// An existing, unoccupied cell (a legal placement target)
    pub fn is_open(&self, cell: Cell) -> bool {
        self.exists(cell) && !self.pieces.contains_key(&cell)
    }

    /// Put a piece on an existing cell; any previous occupant is replaced,
    /// so callers gate on emptiness first
    pub fn set_piece(&mut self, cell: Cell, piece: Piece) {
        debug_assert!(self.exists(cell));
        self.pieces.insert(cell, piece);
    }

    /// Take the piece off a cell, if any
    pub fn take_piece(&mut self, cell: Cell) -> Option<Piece> {
        self.pieces.remove(&cell)
    }

    pub fn occupied_count(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_cleared(&self) -> bool {
        self.pieces.is_empty()
    }

    /// All occupied cells with their pieces (iteration order is arbitrary)
    pub fn pieces(&self) -> impl Iterator<Item = (Cell, &Piece)> {
        self.pieces.iter().map(|(&cell, piece)| (cell, piece))
    }

    /// Every existing cell in row-major order
    pub fn existing_cells(&self) -> Vec<Cell> {
        let mut cells = Vec::new();
        for r in 0..self.rows {
            for q in 0..self.cols {
                let cell = Cell::new(q as i8, r as i8);
                if self.mask[r as usize * self.cols as usize + q as usize] {
                    cells.push(cell);
                }
            }
        }
        cells
    }

    /// Existing neighbors of a cell with their direction labels; neighbors
    /// outside the grid or masked out are simply absent
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = (Direction, Cell)> + '_ {
        ALL_DIRECTIONS.iter().filter_map(move |&dir| {
            let neighbor = cell.neighbor(dir);
            if self.exists(neighbor) {
                Some((dir, neighbor))
            } else {
                None
            }
        })
    }
}
