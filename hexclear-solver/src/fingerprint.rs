//! Canonical state keys for duplicate detection
//!
//! Two states that offer identical futures must map to the same key:
//! board contents, hand multiset, and the last-removed kind all feed the
//! removal rules, while the move counter does not and stays out.

use hexclear_core::GameState;

/// Canonical key: sorted `q,r:kind` cells, sorted hand kinds, last removal
pub fn fingerprint(state: &GameState) -> String {
    let mut cells: Vec<String> = state
        .board()
        .pieces()
        .map(|(cell, piece)| format!("{},{}:{}", cell.q, cell.r, piece.kind_token()))
        .collect();
    cells.sort_unstable();

    let mut hand: Vec<String> = state.hand().iter().map(|p| p.kind_token()).collect();
    hand.sort_unstable();

    let last = state
        .last_removed()
        .map_or_else(|| "-".to_string(), |piece| piece.kind_token());

    format!("{}##{}##{}", cells.join("|"), hand.join(";"), last)
}

// ============================================================================
// TESTS
// ============================================================================
