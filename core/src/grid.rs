use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular store of cells addressed by `(col, row)`.
///
/// Pure data: all rule logic lives in the layout, reveal, and game layers.
/// The checked entry points go through [`Grid::validate_coords`]; indexing
/// with out-of-bounds coordinates is a caller bug and panics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    pub fn new(size: Coord2) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }
        Ok(Self {
            cells: Array2::default(size.to_nd_index()),
        })
    }

    pub fn size(&self) -> Coord2 {
        let (cols, rows) = self.cells.dim();
        (cols as Coord, rows as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn get(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub fn set(&mut self, coords: Coord2, cell: Cell) {
        self.cells[coords.to_nd_index()] = cell;
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    pub fn for_each_cell(&self, mut f: impl FnMut(Coord2, Cell)) {
        for ((col, row), cell) in self.cells.indexed_iter() {
            f((col as Coord, row as Coord), *cell);
        }
    }

    /// Number of mined cells among the (clamped) neighbors.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.neighbors(coords).filter(|&pos| self[pos].mined).count() as u8
    }

    pub(crate) fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.neighbors(coords)
            .filter(|&pos| self[pos].state == CellState::Flagged)
            .count() as u8
    }

    /// Recount of mined cells, used to check the mine-count invariant.
    pub fn mine_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.mined).count() as CellCount
    }
}

impl std::ops::Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl std::ops::IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(Grid::new((0, 4)).unwrap_err(), GameError::EmptyBoard);
        assert_eq!(Grid::new((4, 0)).unwrap_err(), GameError::EmptyBoard);
    }

    #[test]
    fn starts_hidden_and_unmined() {
        let grid = Grid::new((3, 2)).unwrap();

        assert_eq!(grid.size(), (3, 2));
        assert_eq!(grid.total_cells(), 6);
        assert_eq!(grid.mine_count(), 0);
        grid.for_each_cell(|_, cell| assert_eq!(cell, Cell::default()));
    }

    #[test]
    fn validate_coords_checks_both_axes() {
        let grid = Grid::new((3, 2)).unwrap();

        assert_eq!(grid.validate_coords((2, 1)), Ok((2, 1)));
        assert_eq!(grid.validate_coords((3, 0)), Err(GameError::InvalidCoords));
        assert_eq!(grid.validate_coords((0, 2)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn get_set_round_trip() {
        let mut grid = Grid::new((2, 2)).unwrap();
        let cell = Cell {
            mined: true,
            state: CellState::Flagged,
        };

        grid.set((1, 0), cell);

        assert_eq!(grid.get((1, 0)), cell);
        assert_eq!(grid[(1, 0)], cell);
        assert_eq!(grid.get((0, 1)), Cell::default());
    }

    #[test]
    fn adjacent_mine_count_uses_clamped_neighbors() {
        let mut grid = Grid::new((3, 3)).unwrap();
        grid[(0, 0)].mined = true;
        grid[(2, 2)].mined = true;

        assert_eq!(grid.adjacent_mine_count((1, 1)), 2);
        assert_eq!(grid.adjacent_mine_count((0, 1)), 1);
        assert_eq!(grid.adjacent_mine_count((2, 0)), 0);
        // the cell's own mine does not count
        assert_eq!(grid.adjacent_mine_count((0, 0)), 0);
    }

    #[test]
    fn for_each_cell_visits_every_position_once() {
        let grid = Grid::new((4, 3)).unwrap();
        let mut seen = std::collections::HashSet::new();

        grid.for_each_cell(|coords, _| {
            assert!(seen.insert(coords));
        });

        assert_eq!(seen.len(), 12);
    }
}
