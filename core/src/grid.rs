use core::ops::Index;
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Positions of the currently selected tiles, in row-major order.
pub type Selection = SmallVec<[Coord2; 8]>;

/// Fixed-size board of tile cells.
///
/// Every transform borrows the grid and returns a new one, so a grid handed to
/// a renderer or kept for replay is never modified behind its back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    size: Coord2,
    cells: Array2<Cell>,
}

impl Grid {
    pub fn empty(size: Coord2) -> Self {
        Self {
            size,
            cells: Array2::default(size.to_nd_index()),
        }
    }

    /// Empty board with the bottom `initial_rows` rows filled, spawning from
    /// the bottom row upwards.
    pub fn create_initial(size: Coord2, initial_rows: Coord, mut spawn: impl FnMut() -> Tile) -> Self {
        let mut grid = Self::empty(size);
        let (rows, cols) = size;
        let first_row = rows - initial_rows.min(rows);

        for row in (first_row..rows).rev() {
            for col in 0..cols {
                grid.cells[(row, col).to_nd_index()] = Cell::occupied(spawn());
            }
        }
        grid
    }

    /// Builds a grid from face values, `0` meaning an empty cell.
    ///
    /// Tiles get ids in row-major order starting at 0.
    pub fn from_values(rows: &[&[TileValue]]) -> Result<Self> {
        let row_count: Coord = rows.len().try_into().map_err(|_| GameError::InvalidBoardShape)?;
        let col_count: Coord = rows
            .first()
            .map_or(0, |row| row.len())
            .try_into()
            .map_err(|_| GameError::InvalidBoardShape)?;
        if row_count == 0 || col_count == 0 {
            return Err(GameError::InvalidBoardShape);
        }

        let mut ids = TileIds::default();
        let mut grid = Self::empty((row_count, col_count));
        for (row, values) in rows.iter().enumerate() {
            if values.len() != usize::from(col_count) {
                return Err(GameError::InvalidBoardShape);
            }
            for (col, &value) in values.iter().enumerate() {
                if value > 0 {
                    grid.cells[[row, col]] = Cell::occupied(Tile::new(ids.next_id(), value));
                }
            }
        }
        Ok(grid)
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size.0 && coords.1 < self.size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Cell at `coords`, `None` when out of bounds.
    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn tile_at(&self, coords: Coord2) -> Option<Tile> {
        self.cell_at(coords).and_then(Cell::tile)
    }

    pub fn tiles(&self) -> impl Iterator<Item = (Coord2, Tile)> + '_ {
        self.cells
            .indexed_iter()
            .filter_map(|(index, cell)| cell.tile().map(|tile| (from_nd_index(index), tile)))
    }

    pub fn tile_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_occupied()).count() as CellCount
    }

    /// Highest tile id on the board.
    pub fn max_tile_id(&self) -> Option<TileId> {
        self.tiles().map(|(_, tile)| tile.id()).max()
    }

    /// Flips the selection flag of the tile at `coords`.
    ///
    /// Empty or out-of-bounds coordinates give back an identical grid.
    pub fn toggle_select(&self, coords: Coord2) -> Grid {
        let mut next = self.clone();
        if let Some(cell) = next.cells.get_mut(coords.to_nd_index()) {
            *cell = cell.toggled();
        }
        next
    }

    pub fn deselect_all(&self) -> Grid {
        Self {
            size: self.size,
            cells: self.cells.map(|cell| cell.deselected()),
        }
    }

    pub fn selection(&self) -> Selection {
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| cell.is_selected())
            .map(|(index, _)| from_nd_index(index))
            .collect()
    }

    pub fn selected_sum(&self) -> Sum {
        self.cells
            .iter()
            .filter(|cell| cell.is_selected())
            .filter_map(|cell| cell.tile())
            .map(|tile| Sum::from(tile.value()))
            .sum()
    }

    /// Empties every position in `positions`.
    ///
    /// Each position must hold a tile, a repeated position counts as empty
    /// the second time.
    pub fn clear_cells(&self, positions: &[Coord2]) -> Result<Grid> {
        let mut next = self.clone();
        for &coords in positions {
            let coords = self.validate_coords(coords)?;
            let cell = &mut next.cells[coords.to_nd_index()];
            if !cell.is_occupied() {
                return Err(GameError::EmptyCell);
            }
            *cell = Cell::Empty;
        }
        Ok(next)
    }

    /// Drops tiles down each column, keeping their vertical order.
    ///
    /// Tiles that move lose their selection flag.
    pub fn apply_gravity(&self) -> Grid {
        let mut next = Self::empty(self.size);
        let rows = usize::from(self.size.0);

        for (col, column) in self.cells.axis_iter(Axis(1)).enumerate() {
            let mut landing = rows;
            for (row, cell) in column.iter().enumerate().rev() {
                if let Cell::Occupied { tile, selected } = *cell {
                    landing -= 1;
                    next.cells[[landing, col]] = Cell::Occupied {
                        tile,
                        selected: selected && landing == row,
                    };
                }
            }
            if landing != 0 {
                log::trace!("Column {} compacted, {} empty cells on top", col, landing);
            }
        }
        next
    }

    /// Discards row 0, moves every other row up by one and places `new_row` at
    /// the bottom.
    pub fn shift_up_and_spawn_row(&self, new_row: &[Tile]) -> Result<Grid> {
        if new_row.len() != usize::from(self.size.1) {
            return Err(GameError::RowLengthMismatch);
        }

        let mut next = Self::empty(self.size);
        let rows = usize::from(self.size.0);
        if rows == 0 {
            return Ok(next);
        }

        for row in 1..rows {
            for col in 0..usize::from(self.size.1) {
                next.cells[[row - 1, col]] = self.cells[[row, col]].deselected();
            }
        }
        for (col, &tile) in new_row.iter().enumerate() {
            next.cells[[rows - 1, col]] = Cell::occupied(tile);
        }
        Ok(next)
    }

    /// Whether any tile sits in the top row, which is the loss condition.
    pub fn top_row_occupied(&self) -> bool {
        self.size.0 > 0
            && self
                .cells
                .index_axis(Axis(0), 0)
                .iter()
                .any(|cell| cell.is_occupied())
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn values(grid: &Grid) -> Vec<Vec<TileValue>> {
        let (rows, cols) = grid.size();
        (0..rows)
            .map(|row| {
                (0..cols)
                    .map(|col| grid.tile_at((row, col)).map_or(0, Tile::value))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn create_initial_fills_bottom_rows_from_the_bottom_up() {
        let mut next = 0;
        let mut ids = TileIds::default();
        let grid = Grid::create_initial((4, 2), 2, || {
            next += 1;
            Tile::new(ids.next_id(), next)
        });

        assert_eq!(values(&grid), [[0, 0], [0, 0], [3, 4], [1, 2]]);
        assert_eq!(grid.tile_count(), 4);
        assert!(grid.tiles().all(|(coords, _)| !grid[coords].is_selected()));
    }

    #[test]
    fn from_values_rejects_ragged_rows() {
        let rows: [&[TileValue]; 2] = [&[1, 2], &[3]];
        assert_eq!(Grid::from_values(&rows), Err(GameError::InvalidBoardShape));
        assert_eq!(Grid::from_values(&[]), Err(GameError::InvalidBoardShape));
    }

    #[test]
    fn toggle_select_returns_new_snapshot() {
        let grid = Grid::from_values(&[&[0, 5], &[7, 8]]).unwrap();

        let toggled = grid.toggle_select((1, 0));

        assert!(toggled[(1, 0)].is_selected());
        assert!(!grid[(1, 0)].is_selected());
        assert_eq!(toggled.selection().as_slice(), &[(1, 0)]);
        assert_eq!(toggled.selected_sum(), 7);
        assert_eq!(toggled.toggle_select((1, 0)), grid);
    }

    #[test]
    fn toggle_select_on_empty_or_outside_is_noop() {
        let grid = Grid::from_values(&[&[0, 5], &[7, 8]]).unwrap();

        assert_eq!(grid.toggle_select((0, 0)), grid);
        assert_eq!(grid.toggle_select((9, 9)), grid);
    }

    #[test]
    fn clear_cells_requires_tiles() {
        let grid = Grid::from_values(&[&[0, 5], &[7, 8]]).unwrap();

        let cleared = grid.clear_cells(&[(1, 0), (0, 1)]).unwrap();
        assert_eq!(values(&cleared), [[0, 0], [0, 8]]);

        assert_eq!(grid.clear_cells(&[(0, 0)]), Err(GameError::EmptyCell));
        assert_eq!(grid.clear_cells(&[(1, 1), (1, 1)]), Err(GameError::EmptyCell));
        assert_eq!(grid.clear_cells(&[(2, 0)]), Err(GameError::InvalidCoords));
    }

    #[test]
    fn gravity_compacts_columns_in_order() {
        let grid = Grid::from_values(&[&[1, 0], &[0, 4], &[2, 0], &[0, 0]]).unwrap();
        let top_id = grid.tile_at((0, 0)).unwrap().id();
        let lower_id = grid.tile_at((2, 0)).unwrap().id();

        let settled = grid.apply_gravity();

        assert_eq!(values(&settled), [[0, 0], [0, 0], [1, 0], [2, 4]]);
        assert_eq!(settled.tile_at((2, 0)).unwrap().id(), top_id);
        assert_eq!(settled.tile_at((3, 0)).unwrap().id(), lower_id);
        assert_eq!(settled.apply_gravity(), settled);
    }

    #[test]
    fn gravity_drops_selection_of_moved_tiles_only() {
        let grid = Grid::from_values(&[&[3, 0], &[0, 0], &[0, 6]]).unwrap();
        let grid = grid.toggle_select((0, 0)).toggle_select((2, 1));

        let settled = grid.apply_gravity();

        assert!(!settled[(2, 0)].is_selected());
        assert!(settled[(2, 1)].is_selected());
    }

    #[test]
    fn shift_up_discards_top_row_and_spawns_at_bottom() {
        let grid = Grid::from_values(&[&[0, 0], &[1, 0], &[2, 3]]).unwrap();
        let grid = grid.toggle_select((2, 0));
        let mut ids = TileIds::after(grid.max_tile_id());
        let row = [Tile::new(ids.next_id(), 8), Tile::new(ids.next_id(), 9)];

        let shifted = grid.shift_up_and_spawn_row(&row).unwrap();

        assert_eq!(values(&shifted), [[1, 0], [2, 3], [8, 9]]);
        assert!(shifted.selection().is_empty());
        assert!(shifted.top_row_occupied());
        assert!(!grid.top_row_occupied());
    }

    #[test]
    fn shift_up_rejects_wrong_row_length() {
        let grid = Grid::empty((3, 2));
        let row = [Tile::new(TileIds::default().next_id(), 1)];

        assert_eq!(grid.shift_up_and_spawn_row(&row), Err(GameError::RowLengthMismatch));
    }

    #[test]
    fn deselect_all_keeps_tiles() {
        let grid = Grid::from_values(&[&[4, 5], &[7, 8]]).unwrap();
        let selected = grid.toggle_select((0, 0)).toggle_select((1, 1));

        let reset = selected.deselect_all();

        assert_eq!(reset, grid);
        assert_eq!(reset.selected_sum(), 0);
    }
}
