use std::collections::HashSet;

use crate::*;

pub use random::{RandomMineLayout, relocate_if_mined};

mod random;

/// Strategy that deals mines into a fresh grid at the start of a round.
pub trait MineLayout {
    /// Places `mines` mines on distinct unmined cells outside `excluded`.
    ///
    /// A request that cannot be satisfied is a configuration error and must
    /// leave the grid untouched.
    fn place(&mut self, grid: &mut Grid, mines: CellCount, excluded: &[Coord2]) -> Result<()>;
}

/// Deterministic layout that places mines at fixed coordinates.
///
/// Meant for replays and tests; the mine count handed to [`MineLayout::place`]
/// must match the number of coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedMineLayout {
    coords: Vec<Coord2>,
}

impl FixedMineLayout {
    pub fn new(coords: impl Into<Vec<Coord2>>) -> Self {
        Self {
            coords: coords.into(),
        }
    }
}

impl MineLayout for FixedMineLayout {
    fn place(&mut self, grid: &mut Grid, mines: CellCount, excluded: &[Coord2]) -> Result<()> {
        if self.coords.len() != mines as usize {
            return Err(GameError::TooManyMines);
        }

        // validate everything up front so a bad request leaves the grid untouched
        let mut seen = HashSet::with_capacity(self.coords.len());
        for &coords in &self.coords {
            let coords = grid.validate_coords(coords)?;
            if grid[coords].mined || excluded.contains(&coords) || !seen.insert(coords) {
                return Err(GameError::TooManyMines);
            }
        }

        for &coords in &self.coords {
            grid[coords].mined = true;
        }
        Ok(())
    }
}
