//! Game state, actions, and the live game wrapper
//!
//! `GameState` is the solver-facing value type: board plus hand plus the
//! removal memory that gray pieces read. Every mutation returns a
//! `MoveRecord` that `revert` can undo exactly, which is what lets the
//! depth-first solver walk one state instead of cloning per node.
//! `Game` layers a history and a move limit on top for interactive play.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::hex::Cell;
use crate::piece::Piece;
use crate::rules;

// ============================================================================
// ACTIONS & RECORDS
// ============================================================================

/// A player-visible move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Remove { cell: Cell },
    Place { cell: Cell, piece: Piece },
}

/// Undo record for one applied action. Captures the counters the action
/// overwrote so `revert` restores them without recomputation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveRecord {
    Remove {
        cell: Cell,
        piece: Piece,
        moves_before: u32,
        last_removed_before: Option<Piece>,
    },
    Place {
        cell: Cell,
        piece: Piece,
        hand_index: usize,
        moves_before: u32,
        last_removed_before: Option<Piece>,
    },
}

impl MoveRecord {
    /// The action this record undoes
    pub fn action(&self) -> Action {
        match *self {
            MoveRecord::Remove { cell, .. } => Action::Remove { cell },
            MoveRecord::Place { cell, piece, .. } => Action::Place { cell, piece },
        }
    }
}

/// Why a move was refused
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("cell {0} is not part of the board")]
    MissingCell(Cell),
    #[error("cell {0} is empty")]
    EmptyCell(Cell),
    #[error("piece at {0} does not satisfy its removal rule")]
    NotRemovable(Cell),
    #[error("cell {0} is already occupied")]
    Occupied(Cell),
    #[error("hand index {index} out of range for hand of {len}")]
    BadHandIndex { index: usize, len: usize },
    #[error("no {0} piece in hand")]
    NotInHand(Piece),
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Full game position: board, hand, move counter, removal memory
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    /// Removed pieces in removal order; placements consume from here
    hand: Vec<Piece>,
    moves: u32,
    /// Most recently removed piece, gray included
    last_removed: Option<Piece>,
}

impl GameState {
    // ========================================================================
    // CONSTRUCTORS & ACCESSORS
    // ========================================================================

    /// Fresh state over a board: empty hand, zero moves, no removal yet
    pub fn new(board: Board) -> Self {
        Self {
            board,
            hand: Vec::new(),
            moves: 0,
            last_removed: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Pieces available to place, oldest removal first
    pub fn hand(&self) -> &[Piece] {
        &self.hand
    }

    /// Actions taken so far (removals and placements both count)
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn last_removed(&self) -> Option<Piece> {
        self.last_removed
    }

    /// Won position: no piece left on the board
    pub fn is_cleared(&self) -> bool {
        self.board.is_cleared()
    }

    /// Whether the piece at `cell` may be removed right now
    pub fn can_remove(&self, cell: Cell) -> bool {
        rules::can_remove(self, cell)
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    /// Remove the piece at `cell` into the hand
    pub fn remove(&mut self, cell: Cell) -> Result<MoveRecord, MoveError> {
        if !self.board.exists(cell) {
            return Err(MoveError::MissingCell(cell));
        }
        let piece = match self.board.piece_at(cell) {
            Some(&piece) => piece,
            None => return Err(MoveError::EmptyCell(cell)),
        };
        if !rules::can_remove(self, cell) {
            return Err(MoveError::NotRemovable(cell));
        }

        let record = MoveRecord::Remove {
            cell,
            piece,
            moves_before: self.moves,
            last_removed_before: self.last_removed,
        };
        self.board.take_piece(cell);
        self.hand.push(piece);
        self.moves += 1;
        self.last_removed = Some(piece);
        Ok(record)
    }

    /// Place the hand piece at `hand_index` onto an open cell. Placement is
    /// unconditional for the piece itself; only the cell is checked.
    pub fn place(&mut self, cell: Cell, hand_index: usize) -> Result<MoveRecord, MoveError> {
        if !self.board.exists(cell) {
            return Err(MoveError::MissingCell(cell));
        }
        if self.board.piece_at(cell).is_some() {
            return Err(MoveError::Occupied(cell));
        }
        if hand_index >= self.hand.len() {
            return Err(MoveError::BadHandIndex {
                index: hand_index,
                len: self.hand.len(),
            });
        }

        let piece = self.hand.remove(hand_index);
        let record = MoveRecord::Place {
            cell,
            piece,
            hand_index,
            moves_before: self.moves,
            last_removed_before: self.last_removed,
        };
        self.board.set_piece(cell, piece);
        self.moves += 1;
        Ok(record)
    }

    /// Apply an action; placements pick the first matching hand piece
    pub fn apply(&mut self, action: Action) -> Result<MoveRecord, MoveError> {
        match action {
            Action::Remove { cell } => self.remove(cell),
            Action::Place { cell, piece } => {
                let index = self
                    .hand
                    .iter()
                    .position(|&held| held == piece)
                    .ok_or(MoveError::NotInHand(piece))?;
                self.place(cell, index)
            }
        }
    }

    /// Undo the most recent action. Records must come back in reverse
    /// order of application; the hand tail is the last removal.
    pub fn revert(&mut self, record: MoveRecord) {
        match record {
            MoveRecord::Remove {
                cell,
                piece,
                moves_before,
                last_removed_before,
            } => {
                let returned = self.hand.pop();
                debug_assert_eq!(returned, Some(piece));
                self.board.set_piece(cell, piece);
                self.moves = moves_before;
                self.last_removed = last_removed_before;
            }
            MoveRecord::Place {
                cell,
                piece,
                hand_index,
                moves_before,
                last_removed_before,
            } => {
                let placed = self.board.take_piece(cell);
                debug_assert_eq!(placed, Some(piece));
                self.hand.insert(hand_index, piece);
                self.moves = moves_before;
                self.last_removed = last_removed_before;
            }
        }
    }

    /// Apply onto a clone, leaving `self` untouched
    pub fn successor(&self, action: Action) -> Result<GameState, MoveError> {
        let mut next = self.clone();
        next.apply(action)?;
        Ok(next)
    }
}

// ============================================================================
// LIVE GAME
// ============================================================================

/// Win/limit snapshot after a move or undo
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub won: bool,
    pub limit_exceeded: bool,
}

/// Interactive session: a state plus undo history and an optional move
/// limit. The limit never blocks moves; `limit_exceeded` is recomputed
/// from the counter on every query, so undoing back under the limit
/// clears it.
#[derive(Clone, Debug)]
pub struct Game {
    state: GameState,
    history: Vec<MoveRecord>,
    move_limit: Option<u32>,
}

impl Game {
    pub fn new(state: GameState, move_limit: Option<u32>) -> Self {
        Self {
            state,
            history: Vec::new(),
            move_limit,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn move_limit(&self) -> Option<u32> {
        self.move_limit
    }

    pub fn won(&self) -> bool {
        self.state.is_cleared()
    }

    pub fn limit_exceeded(&self) -> bool {
        self.move_limit
            .map_or(false, |limit| self.state.moves() > limit)
    }

    pub fn outcome(&self) -> MoveOutcome {
        MoveOutcome {
            won: self.won(),
            limit_exceeded: self.limit_exceeded(),
        }
    }

    pub fn remove(&mut self, cell: Cell) -> Result<MoveOutcome, MoveError> {
        let record = self.state.remove(cell)?;
        self.history.push(record);
        Ok(self.outcome())
    }

    pub fn place(&mut self, cell: Cell, hand_index: usize) -> Result<MoveOutcome, MoveError> {
        let record = self.state.place(cell, hand_index)?;
        self.history.push(record);
        Ok(self.outcome())
    }

    pub fn apply(&mut self, action: Action) -> Result<MoveOutcome, MoveError> {
        let record = self.state.apply(action)?;
        self.history.push(record);
        Ok(self.outcome())
    }

    /// Undo the last move; `None` when there is nothing to undo
    pub fn undo(&mut self) -> Option<MoveOutcome> {
        let record = self.history.pop()?;
        self.state.revert(record);
        Some(self.outcome())
    }
}

// ============================================================================
// TESTS
// ============================================================================
