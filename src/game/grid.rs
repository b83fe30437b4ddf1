//! The N×N grid of cells.

use crate::error::GridError;
use crate::game::{Cell, Coord, Direction, Tile, TileId, is_tile_value};

/// Smallest supported board size.
pub const MIN_SIZE: u16 = 2;

/// Largest supported board size.
pub const MAX_SIZE: u16 = 16;

/// Default board size.
pub const DEFAULT_SIZE: u16 = 4;

/// The game grid.
///
/// Cells are stored in row-major order and never change identity; only
/// their contents move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Edge length in cells.
    size: u16,
    /// Cells stored in row-major order.
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidSize`] if `size` is outside
    /// `MIN_SIZE..=MAX_SIZE`.
    pub fn new(size: u16) -> Result<Self, GridError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(GridError::InvalidSize(size));
        }

        let cells = (0..size)
            .flat_map(|y| (0..size).map(move |x| Cell::new(Coord::new(x, y))))
            .collect();

        Ok(Self { size, cells })
    }

    /// Build a grid from a square matrix of values, row by row.
    ///
    /// `0` marks an empty cell. Tiles get ids `1..` in row-major order.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is not square, has an unsupported
    /// size, or holds a value that is not a power of two ≥ 2.
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self, GridError> {
        let size = u16::try_from(rows.len()).map_err(|_| GridError::InvalidSize(u16::MAX))?;
        let mut grid = Self::new(size)?;
        let mut next_id = 1u32;

        for (y, row) in (0..size).zip(rows) {
            let row = row.as_ref();
            if row.len() != rows.len() {
                return Err(GridError::Ragged {
                    row: usize::from(y),
                    len: row.len(),
                    expected: rows.len(),
                });
            }
            for (x, &value) in (0..size).zip(row) {
                if value == 0 {
                    continue;
                }
                if !is_tile_value(value) {
                    return Err(GridError::InvalidValue {
                        coord: Coord::new(x, y),
                        value,
                    });
                }
                grid.place(Coord::new(x, y), Tile::new(TileId(next_id), value));
                next_id += 1;
            }
        }

        Ok(grid)
    }

    /// Edge length of the grid.
    #[must_use]
    pub const fn size(&self) -> u16 {
        self.size
    }

    /// All cells in row-major order.
    #[must_use]
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Check if a coordinate is on the grid.
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.size && coord.y < self.size
    }

    fn coord_to_index(&self, coord: Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(usize::from(coord.y) * usize::from(self.size) + usize::from(coord.x))
        } else {
            None
        }
    }

    /// Get the cell at `coord`.
    #[must_use]
    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.coord_to_index(coord).map(|idx| &self.cells[idx])
    }

    /// Get a mutable reference to the cell at `coord`.
    #[must_use]
    pub fn cell_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        self.coord_to_index(coord).map(|idx| &mut self.cells[idx])
    }

    pub(crate) fn cell_at(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    pub(crate) fn cell_at_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index]
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Put `tile` into the cell at `coord`.
    ///
    /// Returns `false` if the coordinate is off the grid.
    pub(crate) fn place(&mut self, coord: Coord, tile: Tile) -> bool {
        if let Some(cell) = self.cell_mut(coord) {
            cell.set_tile(Some(tile));
            true
        } else {
            false
        }
    }

    /// Value at `coord`, or 0 for an empty or off-grid cell.
    #[must_use]
    pub fn value_at(&self, coord: Coord) -> u32 {
        self.cell(coord).map_or(0, Cell::value)
    }

    /// All cells without a tile.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<&Cell> {
        self.cells.iter().filter(|cell| cell.is_empty()).collect()
    }

    /// Pick an empty cell uniformly at random.
    ///
    /// Returns `None` only when the grid is full; callers check fullness
    /// before spawning.
    #[must_use]
    pub fn random_empty_cell(&self, rng: &mut fastrand::Rng) -> Option<Coord> {
        let empty = self.empty_cells();
        if empty.is_empty() {
            return None;
        }
        Some(empty[rng.usize(..empty.len())].coord())
    }

    /// Whether every cell holds a tile.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Number of tiles on the grid.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Iterate over all placed tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().filter_map(Cell::tile)
    }

    /// Largest tile value, or 0 on an empty grid.
    #[must_use]
    pub fn max_value(&self) -> u32 {
        self.tiles().map(Tile::value).max().unwrap_or(0)
    }

    /// Highest tile id present, or 0 on an empty grid.
    #[must_use]
    pub fn max_tile_id(&self) -> u32 {
        self.tiles().map(|tile| tile.id().0).max().unwrap_or(0)
    }

    /// The value matrix, row by row, with 0 for empty cells.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<u32>> {
        self.cells
            .chunks(usize::from(self.size))
            .map(|row| row.iter().map(Cell::value).collect())
            .collect()
    }

    /// Cells grouped by column, each ordered by increasing y.
    #[must_use]
    pub fn cells_by_column(&self) -> Vec<Vec<&Cell>> {
        self.line_indices(true)
            .into_iter()
            .map(|line| line.into_iter().map(|idx| &self.cells[idx]).collect())
            .collect()
    }

    /// Cells grouped by row, each ordered by increasing x.
    #[must_use]
    pub fn cells_by_row(&self) -> Vec<Vec<&Cell>> {
        self.line_indices(false)
            .into_iter()
            .map(|line| line.into_iter().map(|idx| &self.cells[idx]).collect())
            .collect()
    }

    /// Cell indices of every line for `direction`.
    ///
    /// Each line starts at the edge tiles slide toward, so index 0 is the
    /// final resting place for the first tile in the line.
    #[must_use]
    pub(crate) fn lines(&self, direction: Direction) -> Vec<Vec<usize>> {
        let mut lines = self.line_indices(direction.is_vertical());
        if direction.is_reversed() {
            for line in &mut lines {
                line.reverse();
            }
        }
        lines
    }

    fn line_indices(&self, by_column: bool) -> Vec<Vec<usize>> {
        let size = usize::from(self.size);
        (0..size)
            .map(|outer| {
                (0..size)
                    .map(|inner| {
                        if by_column {
                            inner * size + outer
                        } else {
                            outer * size + inner
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(4).unwrap();
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.cells().len(), 16);
        assert_eq!(grid.empty_cells().len(), 16);
        assert!(!grid.is_full());
    }

    #[test]
    fn test_grid_invalid_size() {
        assert!(matches!(Grid::new(1), Err(GridError::InvalidSize(1))));
        assert!(matches!(Grid::new(17), Err(GridError::InvalidSize(17))));
        assert!(Grid::new(2).is_ok());
        assert!(Grid::new(16).is_ok());
    }

    #[test]
    fn test_one_cell_per_coord() {
        let grid = Grid::new(5).unwrap();
        for y in 0..5 {
            for x in 0..5 {
                let coord = Coord::new(x, y);
                assert_eq!(grid.cell(coord).unwrap().coord(), coord);
            }
        }
        assert!(grid.cell(Coord::new(5, 0)).is_none());
    }

    #[test]
    fn test_from_rows() {
        let grid = Grid::from_rows(&[[2u32, 0], [0, 4]]).unwrap();
        assert_eq!(grid.value_at(Coord::new(0, 0)), 2);
        assert_eq!(grid.value_at(Coord::new(1, 1)), 4);
        assert_eq!(grid.tile_count(), 2);
        assert_eq!(grid.max_tile_id(), 2);
        assert_eq!(grid.rows(), vec![vec![2, 0], vec![0, 4]]);
        let tile = grid.cell(Coord::new(1, 1)).unwrap().tile().unwrap();
        assert_eq!(tile.position(), Coord::new(1, 1));
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        assert!(matches!(
            Grid::from_rows(&[vec![2u32, 0], vec![0]]),
            Err(GridError::Ragged { row: 1, .. })
        ));
        assert!(matches!(
            Grid::from_rows(&[[2u32, 3], [0, 0]]),
            Err(GridError::InvalidValue { value: 3, .. })
        ));
        assert!(matches!(
            Grid::from_rows(&[[1u32, 0], [0, 0]]),
            Err(GridError::InvalidValue { value: 1, .. })
        ));
    }

    #[test]
    fn test_cells_by_column_and_row() {
        let grid = Grid::new(3).unwrap();
        let columns = grid.cells_by_column();
        assert_eq!(columns.len(), 3);
        for (x, column) in columns.iter().enumerate() {
            for (y, cell) in column.iter().enumerate() {
                assert_eq!(cell.coord(), Coord::new(x as u16, y as u16));
            }
        }

        let rows = grid.cells_by_row();
        for (y, row) in rows.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                assert_eq!(cell.coord(), Coord::new(x as u16, y as u16));
            }
        }
    }

    #[test]
    fn test_lines_start_at_destination_edge() {
        let grid = Grid::new(3).unwrap();
        let first = |dir| {
            let lines = grid.lines(dir);
            grid.cell_at(lines[1][0]).coord()
        };
        assert_eq!(first(Direction::Up), Coord::new(1, 0));
        assert_eq!(first(Direction::Down), Coord::new(1, 2));
        assert_eq!(first(Direction::Left), Coord::new(0, 1));
        assert_eq!(first(Direction::Right), Coord::new(2, 1));
    }

    #[test]
    fn test_random_empty_cell() {
        let mut rng = fastrand::Rng::with_seed(7);
        let grid = Grid::from_rows(&[[2u32, 4], [8, 0]]).unwrap();
        for _ in 0..20 {
            assert_eq!(grid.random_empty_cell(&mut rng), Some(Coord::new(1, 1)));
        }

        let full = Grid::from_rows(&[[2u32, 4], [8, 16]]).unwrap();
        assert!(full.is_full());
        assert_eq!(full.random_empty_cell(&mut rng), None);
    }

    #[test]
    fn test_random_empty_cell_is_uniform() {
        let grid = Grid::from_rows(&[[2u32, 0, 4], [0, 8, 0], [16, 0, 32]]).unwrap();
        let empty: Vec<Coord> = grid.empty_cells().iter().map(|cell| cell.coord()).collect();
        assert_eq!(empty.len(), 4);

        let mut rng = fastrand::Rng::with_seed(2024);
        let mut counts = [0u32; 4];
        for _ in 0..10_000 {
            let picked = grid.random_empty_cell(&mut rng).unwrap();
            let idx = empty.iter().position(|&coord| coord == picked).unwrap();
            counts[idx] += 1;
        }
        for (coord, &count) in empty.iter().zip(&counts) {
            assert!((2250..=2750).contains(&count), "{coord:?} picked {count} times");
        }
    }
}
