use rand::prelude::*;

use super::*;

/// Uniform random layout driven by a caller-supplied seed.
///
/// The embedding shell owns the entropy source; the engine only ever sees
/// seeds, which keeps every round replayable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomMineLayout {
    seed: u64,
}

impl RandomMineLayout {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineLayout for RandomMineLayout {
    fn place(&mut self, grid: &mut Grid, mines: CellCount, excluded: &[Coord2]) -> Result<()> {
        let mut candidates: Vec<Coord2> = Vec::with_capacity(grid.total_cells() as usize);
        grid.for_each_cell(|coords, cell| {
            if !cell.mined && !excluded.contains(&coords) {
                candidates.push(coords);
            }
        });

        if (mines as usize) > candidates.len() {
            return Err(GameError::TooManyMines);
        }

        // partial Fisher-Yates over the candidate list
        let mut rng = SmallRng::seed_from_u64(self.seed);
        for _ in 0..mines {
            let pick = rng.random_range(0..candidates.len());
            grid[candidates.swap_remove(pick)].mined = true;
        }

        log::debug!("laid {} mines on a {:?} board", mines, grid.size());
        Ok(())
    }
}

/// Moves the mine at `coords`, if there is one, to a uniformly random
/// unmined cell, and returns the replacement location.
///
/// The total mine count is unchanged. Backs the first-click safety rule: the
/// first reveal of a round must never hit a mine.
pub fn relocate_if_mined<R: Rng>(grid: &mut Grid, rng: &mut R, coords: Coord2) -> Option<Coord2> {
    if !grid[coords].mined {
        return None;
    }

    let mut candidates = Vec::new();
    grid.for_each_cell(|pos, cell| {
        if !cell.mined {
            candidates.push(pos);
        }
    });
    // a full board has nowhere left to move the mine to
    if candidates.is_empty() {
        return None;
    }

    let replacement = candidates[rng.random_range(0..candidates.len())];
    grid[coords].mined = false;
    grid[replacement].mined = true;
    log::debug!("relocated first-reveal mine from {:?} to {:?}", coords, replacement);
    Some(replacement)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exactly_the_requested_count() {
        let mut grid = Grid::new((8, 8)).unwrap();

        RandomMineLayout::new(42).place(&mut grid, 10, &[]).unwrap();

        assert_eq!(grid.mine_count(), 10);
    }

    #[test]
    fn respects_exclusions() {
        let excluded = [(0, 0), (1, 0), (0, 1), (1, 1)];
        for seed in 0..16 {
            let mut grid = Grid::new((3, 3)).unwrap();
            RandomMineLayout::new(seed)
                .place(&mut grid, 5, &excluded)
                .unwrap();

            assert_eq!(grid.mine_count(), 5);
            for &coords in &excluded {
                assert!(!grid[coords].mined);
            }
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let mut first = Grid::new((16, 16)).unwrap();
        let mut second = Grid::new((16, 16)).unwrap();

        RandomMineLayout::new(7).place(&mut first, 40, &[]).unwrap();
        RandomMineLayout::new(7).place(&mut second, 40, &[]).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn rejects_unsatisfiable_requests() {
        let mut grid = Grid::new((2, 2)).unwrap();

        let over_capacity = RandomMineLayout::new(0).place(&mut grid, 5, &[]);
        assert_eq!(over_capacity, Err(GameError::TooManyMines));

        let over_after_exclusions = RandomMineLayout::new(0).place(&mut grid, 3, &[(0, 0), (1, 1)]);
        assert_eq!(over_after_exclusions, Err(GameError::TooManyMines));

        assert_eq!(grid.mine_count(), 0);
    }

    #[test]
    fn can_fill_every_non_excluded_cell() {
        let mut grid = Grid::new((2, 2)).unwrap();

        RandomMineLayout::new(3)
            .place(&mut grid, 2, &[(0, 0), (1, 1)])
            .unwrap();

        assert!(grid[(1, 0)].mined);
        assert!(grid[(0, 1)].mined);
        assert_eq!(grid.mine_count(), 2);
    }

    #[test]
    fn relocates_a_mined_cell_and_keeps_the_count() {
        let mut grid = Grid::new((3, 3)).unwrap();
        grid[(1, 1)].mined = true;
        let mut rng = SmallRng::seed_from_u64(5);

        let moved = relocate_if_mined(&mut grid, &mut rng, (1, 1)).unwrap();

        assert_ne!(moved, (1, 1));
        assert!(!grid[(1, 1)].mined);
        assert!(grid[moved].mined);
        assert_eq!(grid.mine_count(), 1);
    }

    #[test]
    fn leaves_unmined_cells_alone() {
        let mut grid = Grid::new((3, 3)).unwrap();
        grid[(2, 2)].mined = true;
        let mut rng = SmallRng::seed_from_u64(5);

        assert_eq!(relocate_if_mined(&mut grid, &mut rng, (0, 0)), None);
        assert!(grid[(2, 2)].mined);
        assert_eq!(grid.mine_count(), 1);
    }
}
