//! Board cells, coordinates and adjacency.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{SquadId, ThreatId};

/// Board width including the reserved column.
pub const GRID_COLUMNS: u8 = 7;

/// Board height including the reserved row.
pub const GRID_ROWS: u8 = 5;

/// First column that squad members and regular threats may occupy.
pub const FIRST_PLAYABLE_COLUMN: u8 = 1;

/// First row that may hold entities.
pub const FIRST_PLAYABLE_ROW: u8 = 1;

/// Orthogonal offsets in clockwise order starting north.
const ORTHOGONAL: [(i8, i8); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Diagonal offsets in clockwise order starting north-east.
const DIAGONAL: [(i8, i8); 4] = [(1, -1), (1, 1), (-1, 1), (-1, -1)];

/// A cell coordinate. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Column.
    pub x: u8,
    /// Row.
    pub y: u8,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Offset by `(dx, dy)`, or `None` if that leaves the unsigned range.
    #[must_use]
    pub fn offset(self, dx: i8, dy: i8) -> Option<Coord> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Some(Coord::new(x, y))
    }

    /// Whether `other` touches this cell only at a corner.
    #[must_use]
    pub fn is_diagonal_to(self, other: Coord) -> bool {
        self.x.abs_diff(other.x) == 1 && self.y.abs_diff(other.y) == 1
    }

    /// Inside the reserved first column or first row.
    #[must_use]
    pub const fn is_reserved(self) -> bool {
        self.x < FIRST_PLAYABLE_COLUMN || self.y < FIRST_PLAYABLE_ROW
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Contents of one board cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    /// The squad member here, if any. At most one per cell.
    pub squad: Option<SquadId>,
    /// Threats here, in arrival order.
    pub threats: Vec<ThreatId>,
}

impl Cell {
    /// Holds nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.squad.is_none() && self.threats.is_empty()
    }

    /// Holds at least one threat.
    #[must_use]
    pub fn has_threat(&self) -> bool {
        !self.threats.is_empty()
    }

    /// First threat to arrive here.
    #[must_use]
    pub fn first_threat(&self) -> Option<ThreatId> {
        self.threats.first().copied()
    }
}

/// The board: a fixed rectangle of cells holding entity ids.
///
/// The grid stores identifiers only; entity state lives in the arenas of
/// [`crate::game::GameState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    columns: u8,
    rows: u8,
    /// Cells stored in row-major order.
    cells: Vec<Cell>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GRID_COLUMNS, GRID_ROWS)
    }
}

impl Grid {
    /// Create an empty grid.
    #[must_use]
    pub fn new(columns: u8, rows: u8) -> Self {
        let size = usize::from(columns) * usize::from(rows);
        Self {
            columns,
            rows,
            cells: vec![Cell::default(); size],
        }
    }

    /// Number of columns, reserved column included.
    #[must_use]
    pub const fn columns(&self) -> u8 {
        self.columns
    }

    /// Number of rows, reserved row included.
    #[must_use]
    pub const fn rows(&self) -> u8 {
        self.rows
    }

    /// Last column index.
    #[must_use]
    pub const fn last_column(&self) -> u8 {
        self.columns.saturating_sub(1)
    }

    /// Within the board rectangle (reserved cells included).
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.columns && coord.y < self.rows
    }

    /// Within the board and outside the reserved column/row.
    #[must_use]
    pub const fn is_playable(&self, coord: Coord) -> bool {
        self.in_bounds(coord) && !coord.is_reserved()
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(usize::from(coord.y) * usize::from(self.columns) + usize::from(coord.x))
        } else {
            None
        }
    }

    /// Cell at `coord`.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<&Cell> {
        self.index(coord).map(|idx| &self.cells[idx])
    }

    fn get_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        self.index(coord).map(|idx| &mut self.cells[idx])
    }

    /// Squad member at `coord`.
    #[must_use]
    pub fn squad_at(&self, coord: Coord) -> Option<SquadId> {
        self.get(coord).and_then(|cell| cell.squad)
    }

    /// Threats at `coord` (empty slice when out of bounds).
    #[must_use]
    pub fn threats_at(&self, coord: Coord) -> &[ThreatId] {
        self.get(coord).map_or(&[], |cell| cell.threats.as_slice())
    }

    /// Whether `coord` holds a threat.
    #[must_use]
    pub fn has_threat(&self, coord: Coord) -> bool {
        self.get(coord).is_some_and(Cell::has_threat)
    }

    /// Whether `coord` holds nothing.
    #[must_use]
    pub fn is_empty(&self, coord: Coord) -> bool {
        self.get(coord).is_some_and(Cell::is_empty)
    }

    /// Put a squad member on an unoccupied friendly slot.
    ///
    /// Returns `false` if the slot is taken or out of bounds.
    pub fn place_squad(&mut self, id: SquadId, coord: Coord) -> bool {
        match self.get_mut(coord) {
            Some(cell) if cell.squad.is_none() => {
                cell.squad = Some(id);
                true
            }
            _ => false,
        }
    }

    /// Take the squad member off `coord`.
    pub fn remove_squad(&mut self, coord: Coord) -> Option<SquadId> {
        self.get_mut(coord).and_then(|cell| cell.squad.take())
    }

    /// Move the squad member at `from` to the empty friendly slot at `to`.
    ///
    /// The member leaves `from` before arriving at `to`, so it is never in
    /// two cells. Returns `false` (and changes nothing) if `from` is empty,
    /// `to` already holds a member, or either is out of bounds.
    pub fn relocate_squad(&mut self, from: Coord, to: Coord) -> bool {
        if from == to || !self.in_bounds(to) || self.squad_at(to).is_some() {
            return false;
        }
        let Some(id) = self.remove_squad(from) else {
            return false;
        };
        self.place_squad(id, to)
    }

    /// Exchange the squad members of two cells.
    ///
    /// Returns `false` unless both cells hold a member.
    pub fn swap_squad(&mut self, a: Coord, b: Coord) -> bool {
        if a == b || self.squad_at(a).is_none() || self.squad_at(b).is_none() {
            return false;
        }
        let first = self.remove_squad(a);
        let second = self.remove_squad(b);
        if let (Some(first), Some(second)) = (first, second) {
            self.place_squad(second, a);
            self.place_squad(first, b);
            true
        } else {
            false
        }
    }

    /// Add a threat to `coord`. Overlap legality is the caller's concern.
    pub fn place_threat(&mut self, id: ThreatId, coord: Coord) -> bool {
        match self.get_mut(coord) {
            Some(cell) => {
                cell.threats.push(id);
                true
            }
            None => false,
        }
    }

    /// Remove a specific threat from `coord`.
    pub fn remove_threat(&mut self, id: ThreatId, coord: Coord) -> bool {
        let Some(cell) = self.get_mut(coord) else {
            return false;
        };
        match cell.threats.iter().position(|&t| t == id) {
            Some(idx) => {
                cell.threats.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Move a threat between cells.
    pub fn relocate_threat(&mut self, id: ThreatId, from: Coord, to: Coord) -> bool {
        if from == to || !self.in_bounds(to) {
            return false;
        }
        self.remove_threat(id, from) && self.place_threat(id, to)
    }

    /// Neighbouring cells that are on the board and not reserved.
    ///
    /// Orthogonal neighbours come first (N, E, S, W), then `start` itself if
    /// `include_self`, then diagonals (NE, SE, SW, NW) if `include_diagonals`.
    #[must_use]
    pub fn adjacent(&self, start: Coord, include_self: bool, include_diagonals: bool) -> Vec<Coord> {
        let mut offsets: Vec<(i8, i8)> = ORTHOGONAL.to_vec();
        if include_self {
            offsets.push((0, 0));
        }
        if include_diagonals {
            offsets.extend_from_slice(&DIAGONAL);
        }
        offsets
            .into_iter()
            .filter_map(|(dx, dy)| start.offset(dx, dy))
            .filter(|&c| self.is_playable(c))
            .collect()
    }

    /// Playable cells of a row, left to right.
    pub fn playable_row(&self, row: u8) -> impl Iterator<Item = Coord> + use<> {
        (FIRST_PLAYABLE_COLUMN..self.columns).map(move |x| Coord::new(x, row))
    }

    /// Iterate over all coordinates and cells.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Cell)> {
        let columns = usize::from(self.columns);
        self.cells.iter().enumerate().map(move |(idx, cell)| {
            #[allow(clippy::cast_possible_truncation)]
            let coord = Coord::new((idx % columns) as u8, (idx / columns) as u8);
            (coord, cell)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_interior() {
        let grid = Grid::default();
        let adj = grid.adjacent(Coord::new(3, 2), false, false);
        assert_eq!(
            adj,
            vec![
                Coord::new(3, 1),
                Coord::new(4, 2),
                Coord::new(3, 3),
                Coord::new(2, 2)
            ]
        );
        let all = grid.adjacent(Coord::new(3, 2), true, true);
        assert_eq!(all.len(), 9);
        assert!(all.contains(&Coord::new(3, 2)));
    }

    #[test]
    fn test_adjacent_skips_reserved() {
        let grid = Grid::default();
        let adj = grid.adjacent(Coord::new(1, 1), false, true);
        assert_eq!(adj.len(), 3);
        assert!(adj.iter().all(|c| !c.is_reserved()));
    }

    #[test]
    fn test_adjacent_from_reserved_column() {
        let grid = Grid::default();
        let adj = grid.adjacent(Coord::new(0, 2), false, false);
        assert_eq!(adj, vec![Coord::new(1, 2)]);
    }

    #[test]
    fn test_adjacent_far_corner() {
        let grid = Grid::default();
        let adj = grid.adjacent(Coord::new(6, 4), false, true);
        assert_eq!(adj.len(), 3);
        assert!(adj.contains(&Coord::new(5, 3)));
    }

    #[test]
    fn test_relocate_squad() {
        let mut grid = Grid::default();
        assert!(grid.place_squad(SquadId(0), Coord::new(2, 2)));
        assert!(!grid.place_squad(SquadId(1), Coord::new(2, 2)));
        assert!(grid.relocate_squad(Coord::new(2, 2), Coord::new(3, 2)));
        assert_eq!(grid.squad_at(Coord::new(2, 2)), None);
        assert_eq!(grid.squad_at(Coord::new(3, 2)), Some(SquadId(0)));
    }

    #[test]
    fn test_relocate_squad_refuses_occupied() {
        let mut grid = Grid::default();
        grid.place_squad(SquadId(0), Coord::new(2, 2));
        grid.place_squad(SquadId(1), Coord::new(3, 2));
        assert!(!grid.relocate_squad(Coord::new(2, 2), Coord::new(3, 2)));
        assert_eq!(grid.squad_at(Coord::new(2, 2)), Some(SquadId(0)));
        assert_eq!(grid.squad_at(Coord::new(3, 2)), Some(SquadId(1)));
    }

    #[test]
    fn test_swap_squad() {
        let mut grid = Grid::default();
        grid.place_squad(SquadId(0), Coord::new(2, 2));
        grid.place_squad(SquadId(1), Coord::new(3, 3));
        assert!(grid.swap_squad(Coord::new(2, 2), Coord::new(3, 3)));
        assert_eq!(grid.squad_at(Coord::new(2, 2)), Some(SquadId(1)));
        assert_eq!(grid.squad_at(Coord::new(3, 3)), Some(SquadId(0)));
    }

    #[test]
    fn test_threat_stacking_and_removal() {
        let mut grid = Grid::default();
        let coord = Coord::new(4, 1);
        grid.place_threat(ThreatId(3), coord);
        grid.place_threat(ThreatId(7), coord);
        assert_eq!(grid.threats_at(coord), &[ThreatId(3), ThreatId(7)]);
        assert!(grid.remove_threat(ThreatId(3), coord));
        assert!(!grid.remove_threat(ThreatId(3), coord));
        assert_eq!(grid.get(coord).unwrap().first_threat(), Some(ThreatId(7)));
    }

    #[test]
    fn test_iter_coords() {
        let grid = Grid::default();
        let coords: Vec<_> = grid.iter().map(|(c, _)| c).collect();
        assert_eq!(coords.len(), 35);
        assert_eq!(coords[0], Coord::new(0, 0));
        assert_eq!(coords[7], Coord::new(0, 1));
        assert_eq!(coords[34], Coord::new(6, 4));
    }
}
