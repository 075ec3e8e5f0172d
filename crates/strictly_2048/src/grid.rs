//! The square board of optional tiles.

use super::position::Position;
use super::tile::{Tile, TileId};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Fixed-size square grid. Each cell owns at most one [`Tile`].
///
/// Cells are stored row-major: the tile at `(x, y)` lives at
/// `y * size + x`. The grid also hands out tile ids so that ids stay
/// unique for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Tile>>,
    next_id: u64,
}

impl Grid {
    /// Creates an empty `size × size` grid.
    #[instrument]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
            next_id: 0,
        }
    }

    /// Builds a grid from row-major values, where `0` marks an empty cell.
    ///
    /// Values past `size * size` are ignored; missing values leave the
    /// cell empty. Values are taken as given, so callers building puzzles
    /// should stick to powers of two.
    #[instrument(skip(values))]
    pub fn from_values(size: usize, values: &[u32]) -> Self {
        let mut grid = Self::new(size);
        for (index, &value) in values.iter().take(size * size).enumerate() {
            if value == 0 {
                continue;
            }
            let position = Position::new(index % size, index / size);
            grid.spawn_tile(position, value);
        }
        grid
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.within_bounds(position)
            .then(|| position.y * self.size + position.x)
    }

    /// True if `position` lies on the grid.
    pub fn within_bounds(&self, position: Position) -> bool {
        position.x < self.size && position.y < self.size
    }

    /// Returns the tile at `position`, if any.
    pub fn cell_content(&self, position: Position) -> Option<&Tile> {
        self.index(position)
            .and_then(|index| self.cells[index].as_ref())
    }

    /// True if a tile occupies `position`.
    pub fn cell_occupied(&self, position: Position) -> bool {
        self.cell_content(position).is_some()
    }

    /// True if `position` is on the grid and empty.
    pub fn cell_available(&self, position: Position) -> bool {
        self.within_bounds(position) && !self.cell_occupied(position)
    }

    /// True if at least one cell is empty.
    pub fn cells_available(&self) -> bool {
        self.cells.iter().any(Option::is_none)
    }

    /// All empty positions in row-major order.
    pub fn available_cells(&self) -> Vec<Position> {
        let mut available = Vec::new();
        self.each_cell(|position, tile| {
            if tile.is_none() {
                available.push(position);
            }
        });
        available
    }

    /// Picks an empty cell uniformly at random.
    ///
    /// Returns `None` when the grid is full; check
    /// [`cells_available`](Self::cells_available) first.
    #[instrument(skip(self, rng))]
    pub fn random_available_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Position> {
        self.available_cells().choose(rng).copied()
    }

    /// Places `tile` at its own coordinates, returning whatever it displaced.
    pub fn insert_tile(&mut self, tile: Tile) -> Option<Tile> {
        match self.index(tile.position()) {
            Some(index) => self.cells[index].replace(tile),
            None => {
                warn!(id = %tile.id(), position = %tile.position(), "Tile outside grid dropped");
                None
            }
        }
    }

    /// Removes and returns the tile at `position`.
    pub fn remove_tile(&mut self, position: Position) -> Option<Tile> {
        self.index(position)
            .and_then(|index| self.cells[index].take())
    }

    /// Allocates a fresh tile id.
    pub fn allocate_id(&mut self) -> TileId {
        let id = TileId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Creates a tile with a fresh id at `position` and inserts it.
    ///
    /// Returns `None`, allocating no id, if `position` is off the grid.
    pub fn spawn_tile(&mut self, position: Position, value: u32) -> Option<TileId> {
        if !self.within_bounds(position) {
            warn!(%position, "Spawn outside grid ignored");
            return None;
        }
        let id = self.allocate_id();
        self.insert_tile(Tile::new(id, position, Some(value)));
        Some(id)
    }

    /// Visits every cell in row-major order.
    pub fn each_cell(&self, mut visitor: impl FnMut(Position, Option<&Tile>)) {
        for (index, cell) in self.cells.iter().enumerate() {
            visitor(Position::new(index % self.size, index / self.size), cell.as_ref());
        }
    }

    /// Iterates over the tiles on the grid in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten()
    }

    pub(crate) fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.cells.iter_mut().flatten()
    }

    /// Looks up a tile by id.
    pub fn find(&self, id: TileId) -> Option<&Tile> {
        self.tiles().find(|tile| tile.id() == id)
    }

    /// Number of tiles on the grid.
    pub fn tile_count(&self) -> usize {
        self.tiles().count()
    }

    /// Sum of every tile value.
    pub fn tile_sum(&self) -> u64 {
        self.tiles().map(|tile| u64::from(tile.value())).sum()
    }

    /// Highest tile value, or `0` on an empty grid.
    pub fn highest_tile(&self) -> u32 {
        self.tiles().map(Tile::value).max().unwrap_or(0)
    }

    /// Tile values by row, with `0` for empty cells.
    pub fn rows(&self) -> Vec<Vec<u32>> {
        self.cells
            .chunks(self.size.max(1))
            .map(|row| {
                row.iter()
                    .map(|cell| cell.as_ref().map_or(0, Tile::value))
                    .collect()
            })
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn force_cell(&mut self, position: Position, tile: Option<Tile>) {
        if let Some(index) = self.index(position) {
            self.cells[index] = tile;
        }
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows = self.rows();
        for (y, row) in rows.iter().enumerate() {
            let line = row
                .iter()
                .map(|value| match value {
                    0 => format!("{:>5}", "."),
                    v => format!("{:>5}", v),
                })
                .collect::<Vec<_>>()
                .join("|");
            write!(f, "{}", line)?;
            if y + 1 < rows.len() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(4);
        assert!(grid.cells_available());
        assert_eq!(grid.available_cells().len(), 16);
        assert_eq!(grid.tile_count(), 0);
        assert_eq!(grid.highest_tile(), 0);
    }

    #[test]
    fn test_from_values_layout() {
        let grid = Grid::from_values(4, &[0, 2, 0, 4, 8]);
        assert_eq!(grid.cell_content(Position::new(1, 0)).map(Tile::value), Some(2));
        assert_eq!(grid.cell_content(Position::new(3, 0)).map(Tile::value), Some(4));
        assert_eq!(grid.cell_content(Position::new(0, 1)).map(Tile::value), Some(8));
        assert!(!grid.cell_occupied(Position::new(0, 0)));
        assert_eq!(grid.tile_count(), 3);
        assert_eq!(grid.tile_sum(), 14);
    }

    #[test]
    fn test_bounds() {
        let grid = Grid::new(4);
        assert!(grid.within_bounds(Position::new(3, 3)));
        assert!(!grid.within_bounds(Position::new(4, 0)));
        assert!(!grid.within_bounds(Position::new(0, 4)));
        assert!(!grid.cell_available(Position::new(4, 4)));
        assert!(grid.cell_content(Position::new(9, 9)).is_none());
    }

    #[test]
    fn test_insert_and_remove() {
        let mut grid = Grid::new(4);
        let id = grid.spawn_tile(Position::new(2, 1), 8).expect("in bounds");
        assert!(grid.cell_occupied(Position::new(2, 1)));
        assert_eq!(grid.find(id).map(Tile::position), Some(Position::new(2, 1)));

        let removed = grid.remove_tile(Position::new(2, 1)).expect("tile present");
        assert_eq!(removed.id(), id);
        assert!(!grid.cell_occupied(Position::new(2, 1)));
        assert!(grid.remove_tile(Position::new(2, 1)).is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut grid = Grid::new(2);
        let a = grid.spawn_tile(Position::new(0, 0), 2);
        let b = grid.spawn_tile(Position::new(1, 0), 2);
        assert!(a.is_some() && b.is_some());
        assert_ne!(a, b);
    }

    #[test]
    fn test_spawn_outside_grid_returns_none() {
        let mut grid = Grid::new(2);
        assert_eq!(grid.spawn_tile(Position::new(2, 0), 2), None);
        assert_eq!(grid.tile_count(), 0);
        assert_eq!(grid.spawn_tile(Position::new(0, 0), 2), Some(TileId(0)));
    }

    #[test]
    fn test_random_cell_on_full_grid() {
        let grid = Grid::from_values(2, &[2, 4, 8, 16]);
        let mut rng = StdRng::seed_from_u64(3);
        assert!(!grid.cells_available());
        assert_eq!(grid.random_available_cell(&mut rng), None);
    }

    #[test]
    fn test_random_cell_only_choice() {
        let grid = Grid::from_values(2, &[2, 4, 0, 16]);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10 {
            assert_eq!(grid.random_available_cell(&mut rng), Some(Position::new(0, 1)));
        }
    }

    #[test]
    fn test_each_cell_row_major() {
        let grid = Grid::new(2);
        let mut visited = Vec::new();
        grid.each_cell(|position, _| visited.push(position));
        assert_eq!(
            visited,
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(0, 1),
                Position::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_rows_and_display() {
        let grid = Grid::from_values(2, &[2, 0, 0, 2048]);
        assert_eq!(grid.rows(), vec![vec![2, 0], vec![0, 2048]]);
        assert_eq!(grid.to_string(), "    2|    .\n    .| 2048");
    }
}
