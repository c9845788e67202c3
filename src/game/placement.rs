//! Threat placement and overlap resolution.
//!
//! When an encountered threat lands on an occupied cell and cannot share it,
//! [`resolve_overlap`] decides where it goes instead. The decision is
//! returned rather than applied so it can be inspected and tested without a
//! full game.

use crate::game::{Coord, GameState, Grid, SquadId, ThreatId, FIRST_PLAYABLE_COLUMN};

/// Column used to break ties: threats at or right of it look left first.
pub const CENTER_COLUMN: u8 = 3;

/// Where a blocked threat ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Place the threat on this empty cell.
    Shift(Coord),
    /// Discard `member` and place the threat on its cell.
    Displace {
        /// Cell to take.
        coord: Coord,
        /// Squad member standing there.
        member: SquadId,
    },
    /// No room in the row; the threat is discarded.
    Discard,
}

/// Decide where a non-overlapping threat goes when `(column, row)` is taken.
///
/// Only playable columns are considered. In priority order:
/// 1. every column already holds a threat: discard the threat;
/// 2. squad members present but no empty cell: displace the last member
///    seen scanning left to right;
/// 3. the nearest empty cell, stepping outward one column at a time and
///    looking toward the center first;
/// 4. displace the last member seen;
/// 5. discard the threat.
#[must_use]
pub fn resolve_overlap(grid: &Grid, column: u8, row: u8) -> Placement {
    let mut members = 0usize;
    let mut threat_columns = 0usize;
    let mut empty = 0usize;
    let mut last_member = None;

    for coord in grid.playable_row(row) {
        let Some(cell) = grid.get(coord) else {
            continue;
        };
        if cell.is_empty() {
            empty += 1;
            continue;
        }
        if let Some(member) = cell.squad {
            members += 1;
            last_member = Some((coord, member));
        }
        if cell.has_threat() {
            threat_columns += 1;
        }
    }

    // Counts columns holding threats, not threats: stacked threats and a
    // tank in the reserved column do not fill the row.
    let playable_columns = usize::from(grid.columns() - FIRST_PLAYABLE_COLUMN);
    if threat_columns >= playable_columns {
        return Placement::Discard;
    }
    if members > 0
        && empty == 0
        && let Some((coord, member)) = last_member
    {
        return Placement::Displace { coord, member };
    }

    if let Some(coord) = nearest_empty(grid, column, row) {
        return Placement::Shift(coord);
    }

    match last_member {
        Some((coord, member)) => Placement::Displace { coord, member },
        None => Placement::Discard,
    }
}

/// Scan outward from `column`, alternating sides, for an empty cell.
fn nearest_empty(grid: &Grid, column: u8, row: u8) -> Option<Coord> {
    let first = i16::from(FIRST_PLAYABLE_COLUMN);
    let last = i16::from(grid.last_column());
    let origin = i16::from(column);
    let left_first = column >= CENTER_COLUMN;

    for step in 1..=i16::from(grid.columns()) {
        let left = (origin - step).clamp(first, last);
        let right = (origin + step).clamp(first, last);
        let order = if left_first {
            [left, right]
        } else {
            [right, left]
        };
        for x in order {
            #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
            let coord = Coord::new(x as u8, row);
            if grid.is_empty(coord) {
                return Some(coord);
            }
        }
    }
    None
}

impl GameState {
    /// Whether threat `id` may be moved to column `x` of its row.
    ///
    /// Fixed-column threats never move. Otherwise the destination must not
    /// hold a squad member the threat cannot share with, nor a threat where
    /// neither side can overlap.
    #[must_use]
    pub fn can_threat_move_to_column(&self, id: ThreatId, x: u8) -> bool {
        let threat = self.threat(id);
        if threat.is_fixed_column() {
            tracing::debug!(kind = %threat.kind, "fixed-column threat cannot change column");
            return false;
        }
        let dest = Coord::new(x, threat.position.y);
        if !self.grid.is_playable(dest) {
            return false;
        }
        let Some(cell) = self.grid.get(dest) else {
            return false;
        };
        if cell.squad.is_some() && !threat.can_overlap_with_squad {
            return false;
        }
        let blocked = cell.threats.iter().any(|&other| {
            other != id
                && !threat.can_overlap_with_squad
                && !self.threat(other).can_overlap_with_squad
        });
        if blocked {
            tracing::debug!(kind = %threat.kind, %dest, "threat cannot share cell");
        }
        !blocked
    }

    /// Recompute the cells pending threats may move to (their own cell
    /// included, so a move can be taken back).
    pub fn refresh_pending_columns(&mut self) {
        let mut cells = Vec::new();
        for &id in &self.pending {
            let threat = self.threat(id);
            for coord in self.grid.playable_row(threat.position.y) {
                let own = !threat.is_fixed_column() && coord.x == threat.position.x;
                if own || self.can_threat_move_to_column(id, coord.x) {
                    cells.push(coord);
                }
            }
        }
        self.pending_columns = cells;
    }
}
