/// Single coordinate axis used for board columns, rows, and positions.
pub type Coord = u16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional board position `(col, row)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn area((cols, rows): Coord2) -> CellCount {
    cols as CellCount * rows as CellCount
}

/// Iterator over the up-to-8 in-bounds neighbors of a cell.
///
/// Walks the 3x3 box around the center clamped to the board edges (corner and
/// edge cells simply yield fewer positions; coordinates never wrap) and skips
/// the center itself.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    col: Coord,
    row: Coord,
    first_col: Coord,
    last_col: Coord,
    last_row: Coord,
    exhausted: bool,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        let (col, row) = center;
        let (cols, rows) = bounds;
        debug_assert!(cols > 0 && rows > 0 && col < cols && row < rows);

        let first_col = col.saturating_sub(1);
        let first_row = row.saturating_sub(1);
        Self {
            center,
            col: first_col,
            row: first_row,
            first_col,
            last_col: col.saturating_add(1).min(cols - 1),
            last_row: row.saturating_add(1).min(rows - 1),
            exhausted: false,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.exhausted {
            let item = (self.col, self.row);

            if self.col < self.last_col {
                self.col += 1;
            } else if self.row < self.last_row {
                self.col = self.first_col;
                self.row += 1;
            } else {
                self.exhausted = true;
            }

            if item != self.center {
                return Some(item);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbors_of(center: Coord2, bounds: Coord2) -> Vec<Coord2> {
        NeighborIter::new(center, bounds).collect()
    }

    #[test]
    fn center_cell_has_eight_neighbors() {
        assert_eq!(
            neighbors_of((1, 1), (3, 3)),
            vec![
                (0, 0),
                (1, 0),
                (2, 0),
                (0, 1),
                (2, 1),
                (0, 2),
                (1, 2),
                (2, 2)
            ]
        );
    }

    #[test]
    fn corners_clamp_to_three_neighbors() {
        assert_eq!(neighbors_of((0, 0), (3, 3)), vec![(1, 0), (0, 1), (1, 1)]);
        assert_eq!(neighbors_of((2, 2), (3, 3)), vec![(1, 1), (2, 1), (1, 2)]);
    }

    #[test]
    fn edges_clamp_to_five_neighbors() {
        assert_eq!(
            neighbors_of((1, 0), (3, 3)),
            vec![(0, 0), (2, 0), (0, 1), (1, 1), (2, 1)]
        );
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert!(neighbors_of((0, 0), (1, 1)).is_empty());
    }

    #[test]
    fn strip_board_does_not_wrap() {
        assert_eq!(neighbors_of((0, 0), (1, 3)), vec![(0, 1)]);
        assert_eq!(neighbors_of((0, 2), (1, 3)), vec![(0, 1)]);
    }

    #[test]
    fn area_multiplies_axes() {
        assert_eq!(area((16, 16)), 256);
        assert_eq!(area((30, 16)), 480);
    }
}
