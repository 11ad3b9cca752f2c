//! Removal rule engine
//!
//! `can_remove` is the one public predicate: pure, side-effect free, and
//! false for empty or nonexistent cells. Six colors read a neighbor census
//! (slot count plus matched directions); white checks the hand, black checks
//! the rest of the board, and gray borrows the rule of the last removed
//! piece.

use crate::game::GameState;
use crate::hex::{Cell, Direction};
use crate::piece::{Color, Piece};

// ============================================================================
// DIRECTION SET
// ============================================================================

/// Set of directions as a 6-bit mask, one bit per cycle index
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct DirSet(u8);

impl DirSet {
    const FULL: u8 = 0b11_1111;

    fn insert(&mut self, dir: Direction) {
        self.0 |= 1 << dir.index();
    }

    fn len(self) -> u8 {
        self.0.count_ones() as u8
    }

    /// Any two members three apart on the cycle
    fn has_opposite_pair(self) -> bool {
        self.0 & (self.0 >> 3) & 0b111 != 0
    }

    /// True when the members form one unbroken run on the 6-cycle
    fn is_contiguous_arc(self) -> bool {
        if self.0 == 0 {
            return false;
        }
        if self.0 == Self::FULL {
            return true;
        }
        // a single run has exactly one set->unset edge walking the cycle
        let mut falling_edges = 0;
        for i in 0..6 {
            let here = self.0 & (1 << i) != 0;
            let next = self.0 & (1 << ((i + 1) % 6)) != 0;
            if here && !next {
                falling_edges += 1;
            }
        }
        falling_edges == 1
    }
}

// ============================================================================
// NEIGHBOR CONTEXT
// ============================================================================

/// Neighbor census for one evaluated piece. Every existing neighbor is a
/// slot regardless of contents; a slot is filled only by an occupant that
/// matches (the modifier color when one is set, any non-black color
/// otherwise — black occupants hold a slot without ever matching).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct NeighborContext {
    total_slots: u8,
    filled: DirSet,
}

impl NeighborContext {
    fn filled_count(self) -> u8 {
        self.filled.len()
    }
}

fn neighbor_context(state: &GameState, cell: Cell, modifier: Option<Color>) -> NeighborContext {
    let mut total_slots = 0;
    let mut filled = DirSet::default();

    for (dir, neighbor) in state.board().neighbors(cell) {
        total_slots += 1;
        if let Some(occupant) = state.board().piece_at(neighbor) {
            let matches = match modifier {
                Some(m) => occupant.color == m,
                None => occupant.color != Color::Black,
            };
            if matches {
                filled.insert(dir);
            }
        }
    }

    NeighborContext {
        total_slots,
        filled,
    }
}

// ============================================================================
// PREDICATE
// ============================================================================

/// Decide whether the piece at `cell` may currently be removed
pub fn can_remove(state: &GameState, cell: Cell) -> bool {
    match state.board().piece_at(cell) {
        Some(&piece) => can_remove_as(state, cell, piece, true),
        None => false,
    }
}

/// Rule evaluation with an explicit proxy permission. Gray delegates to the
/// last removed piece's color and modifier exactly once; the delegated call
/// runs with proxying disabled so a gray never proxies a gray.
fn can_remove_as(state: &GameState, cell: Cell, piece: Piece, allow_proxy: bool) -> bool {
    match piece.color {
        Color::Red => {
            let ctx = neighbor_context(state, cell, piece.modifier);
            let filled = ctx.filled_count();
            filled >= 1 && filled < ctx.total_slots
        }
        Color::Blue => neighbor_context(state, cell, piece.modifier).filled_count() == 0,
        Color::Green => {
            let ctx = neighbor_context(state, cell, piece.modifier);
            ctx.filled_count() >= 2 && ctx.filled.is_contiguous_arc()
        }
        Color::Orange => {
            let ctx = neighbor_context(state, cell, piece.modifier);
            ctx.total_slots > 0 && ctx.filled_count() == ctx.total_slots
        }
        Color::Yellow => {
            let ctx = neighbor_context(state, cell, piece.modifier);
            ctx.filled_count() == 3 && !ctx.filled.has_opposite_pair()
        }
        Color::Purple => {
            let ctx = neighbor_context(state, cell, piece.modifier);
            ctx.filled_count() == 2 && ctx.filled.has_opposite_pair()
        }
        Color::White => match piece.modifier {
            Some(m) => state.hand().iter().all(|held| held.color != m),
            None => state.hand().iter().all(|held| held.color == Color::White),
        },
        Color::Black => match piece.modifier {
            Some(m) => state
                .board()
                .pieces()
                .all(|(other, p)| other == cell || p.color != m),
            None => state
                .board()
                .pieces()
                .all(|(other, p)| other == cell || p.color == Color::Black),
        },
        Color::Gray => {
            if !allow_proxy {
                return false;
            }
            match state.last_removed() {
                Some(proxy) if proxy.color != Color::Gray => {
                    can_remove_as(state, cell, proxy, false)
                }
                _ => false,
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
