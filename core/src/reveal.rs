//! Safe-reveal flood fill and chorded reveal, as plain functions over a
//! [`Grid`]. Phase checks and counter bookkeeping stay in the game layer.

use std::collections::{HashSet, VecDeque};

use crate::*;

/// What a chord attempt did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ChordOutcome {
    /// Target is not a positive number, or its flag count does not match.
    NotApplicable,
    Resolved { revealed: CellCount, detonated: bool },
}

/// Reveals a safe cell, cascading through connected zero-count cells.
///
/// Idempotent: an already revealed target contributes nothing. The cascade
/// runs over an explicit frontier queue, never recursion, so a full-board
/// cascade costs bounded auxiliary memory and always terminates. Only cells
/// still [`CellState::Hidden`] are entered; flags and question marks stay
/// put. Precondition: the target cell is not mined.
pub(crate) fn flood_reveal(grid: &mut Grid, coords: Coord2) -> CellCount {
    debug_assert!(!grid[coords].mined);

    if grid[coords].state.is_revealed() {
        return 0;
    }

    let count = grid.adjacent_mine_count(coords);
    grid[coords].state = CellState::Revealed(count);
    let mut revealed = 1;
    log::debug!("revealed {:?}, adjacent mines: {}", coords, count);

    if count > 0 {
        return revealed;
    }

    let mut visited = HashSet::from([coords]);
    let mut frontier: VecDeque<Coord2> = grid
        .neighbors(coords)
        .filter(|&pos| grid[pos].state == CellState::Hidden)
        .collect();

    while let Some(pos) = frontier.pop_front() {
        if !visited.insert(pos) {
            continue;
        }

        // only hidden, unmined cells may cascade open
        let cell = grid[pos];
        if cell.state != CellState::Hidden || cell.mined {
            continue;
        }

        let pos_count = grid.adjacent_mine_count(pos);
        grid[pos].state = CellState::Revealed(pos_count);
        revealed += 1;
        log::trace!("cascade revealed {:?}, adjacent mines: {}", pos, pos_count);

        if pos_count == 0 {
            frontier.extend(
                grid.neighbors(pos)
                    .filter(|&next| grid[next].state == CellState::Hidden)
                    .filter(|next| !visited.contains(next)),
            );
        }
    }

    revealed
}

/// Resolves every non-flagged neighbor of a revealed numbered cell, provided
/// exactly that many neighbors are flagged: safe neighbors open through
/// [`flood_reveal`], mined ones detonate.
///
/// A mismatched flag count is deliberately inert, not an error.
pub(crate) fn chord_reveal(grid: &mut Grid, coords: Coord2) -> ChordOutcome {
    let CellState::Revealed(count) = grid[coords].state else {
        return ChordOutcome::NotApplicable;
    };
    if count == 0 || grid.count_flagged_neighbors(coords) != count {
        return ChordOutcome::NotApplicable;
    }

    let mut revealed = 0;
    let mut detonated = false;
    for pos in grid.neighbors(coords) {
        let cell = grid[pos];
        if cell.state == CellState::Flagged {
            continue;
        }
        if cell.mined {
            grid[pos].state = CellState::Detonated;
            detonated = true;
        } else {
            revealed += flood_reveal(grid, pos);
        }
    }

    ChordOutcome::Resolved {
        revealed,
        detonated,
    }
}
