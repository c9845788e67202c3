//! Read-only views of the game state for front-ends.

pub mod ascii;

pub use ascii::render_ascii;

use crate::game::{Coord, GameState, SquadId};

/// Number printed on a member's token: their place in the deal, 1-based.
#[must_use]
pub fn member_number(id: SquadId) -> u8 {
    id.0 + 1
}

/// Four-character label for a cell: member number and posture (`^` up,
/// `v` down), then up to two threat glyphs. Empty playable cells show `.`.
#[must_use]
pub fn cell_label(state: &GameState, coord: Coord) -> String {
    let mut label = String::with_capacity(4);
    if let Some(id) = state.grid.squad_at(coord) {
        let member = state.member(id);
        label.push(char::from(b'0' + member_number(id)));
        label.push(if member.up { '^' } else { 'v' });
    }
    for &threat in state.grid.threats_at(coord).iter().take(2) {
        label.push(state.threat(threat).kind.glyph());
    }
    if label.is_empty() && !coord.is_reserved() {
        label.push('.');
    }
    format!("{label:<4}")
}
