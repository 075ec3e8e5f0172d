//! Move resolution: slide and merge every tile in one direction.
//!
//! [`resolve`] is the heart of the engine. It mutates the grid in place
//! and reports what changed; spawning and scoring are left to the
//! [`Game`](crate::Game).

use super::action::Direction;
use super::grid::Grid;
use super::position::{Position, Vector};
use super::tile::{Tile, TileId};
use super::traversal::Traversal;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A tile that slid without merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Slide {
    /// The tile that moved.
    pub id: TileId,
    /// Where it started.
    pub from: Position,
    /// Where it stopped.
    pub to: Position,
}

/// Structural changes produced by one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// True if any tile changed position or merged.
    pub moved: bool,
    /// Sum of the values of every tile created by a merge.
    pub score_delta: u64,
    /// Tiles that slid without merging.
    pub slides: Vec<Slide>,
    /// Tiles created by a merge this pass, in creation order.
    pub merged: Vec<TileId>,
    /// True if a merge produced the winning value.
    pub reached_target: bool,
}

/// Returns true if sliding toward `direction` would change the grid.
///
/// Does not touch the grid. A move changes something exactly when some
/// tile has a neighbour in that direction that is empty or holds a tile it
/// can merge with.
#[instrument(skip(grid))]
pub fn can_move(grid: &Grid, direction: Direction) -> bool {
    let vector = direction.vector();
    grid.tiles().any(|tile| {
        tile.position()
            .step(vector)
            .filter(|next| grid.within_bounds(*next))
            .is_some_and(|next| {
                grid.cell_content(next)
                    .is_none_or(|other| other.can_merge_with(tile))
            })
    })
}

/// Slides and merges every tile toward `direction`.
///
/// When nothing can move the grid is left exactly as it was and the
/// outcome reports `moved == false`. Otherwise every tile first records
/// its position and drops last turn's merge lineage, then tiles are
/// visited from the leading edge backward. A tile that is itself the
/// product of a merge this pass never merges again, so `[2, 2, 2]`
/// pushed left becomes `[4, 2, _]`.
#[instrument(skip(grid), fields(size = grid.size()))]
pub fn resolve(grid: &mut Grid, direction: Direction, winning_value: u32) -> MoveOutcome {
    let mut outcome = MoveOutcome::default();
    if !can_move(grid, direction) {
        debug!("Nothing can move");
        return outcome;
    }

    prepare_tiles(grid);
    let traversal = Traversal::new(direction, grid.size());

    for cell in traversal.cells() {
        let Some(mut tile) = grid.remove_tile(cell) else {
            continue;
        };
        let (farthest, next) = find_farthest_position(grid, cell, traversal.vector);

        let target = next
            .filter(|next| {
                grid.cell_content(*next)
                    .is_some_and(|other| other.can_merge_with(&tile) && !other.has_merged())
            })
            .and_then(|next| grid.remove_tile(next));

        match target {
            Some(target) => {
                let id = grid.allocate_id();
                tile.update_position(target.position());
                let merged = Tile::merged(id, target.position(), &tile, &target);
                debug!(
                    from = %cell,
                    into = %merged.position(),
                    value = merged.value(),
                    "Merged tiles"
                );

                outcome.score_delta += u64::from(merged.value());
                if merged.value() == winning_value {
                    outcome.reached_target = true;
                }
                outcome.merged.push(id);
                outcome.moved = true;
                grid.insert_tile(merged);
            }
            None => {
                if farthest != cell {
                    outcome.slides.push(Slide::new(tile.id(), cell, farthest));
                    outcome.moved = true;
                }
                tile.update_position(farthest);
                grid.insert_tile(tile);
            }
        }
    }

    debug_assert!(outcome.moved, "probe and resolver disagree");
    debug!(
        score_delta = outcome.score_delta,
        slides = outcome.slides.len(),
        merges = outcome.merged.len(),
        "Resolved move"
    );
    outcome
}

/// Saves every tile's position and clears last turn's merge lineage.
fn prepare_tiles(grid: &mut Grid) {
    for tile in grid.tiles_mut() {
        tile.clear_merged_from();
        tile.save_position();
    }
}

/// Walks from `cell` along `vector` while the next cell is free.
///
/// Returns the last free cell reached and the blocking cell beyond it, if
/// that cell is on the grid.
fn find_farthest_position(
    grid: &Grid,
    cell: Position,
    vector: Vector,
) -> (Position, Option<Position>) {
    let mut farthest = cell;
    loop {
        match farthest.step(vector) {
            Some(next) if grid.cell_available(next) => farthest = next,
            Some(next) if grid.within_bounds(next) => return (farthest, Some(next)),
            _ => return (farthest, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(grid: &Grid, y: usize) -> Vec<u32> {
        grid.rows()[y].clone()
    }

    #[test]
    fn test_farthest_stops_at_edge() {
        let grid = Grid::from_values(4, &[0, 0, 0, 2]);
        let (farthest, next) =
            find_farthest_position(&grid, Position::new(3, 0), Direction::Left.vector());
        assert_eq!(farthest, Position::new(0, 0));
        assert_eq!(next, None);
    }

    #[test]
    fn test_farthest_stops_before_tile() {
        let grid = Grid::from_values(4, &[4, 0, 0, 2]);
        let (farthest, next) =
            find_farthest_position(&grid, Position::new(3, 0), Direction::Left.vector());
        assert_eq!(farthest, Position::new(1, 0));
        assert_eq!(next, Some(Position::new(0, 0)));
    }

    #[test]
    fn test_slide_and_merge_left() {
        let mut grid = Grid::from_values(4, &[0, 2, 0, 2]);
        let outcome = resolve(&mut grid, Direction::Left, 2048);

        assert!(outcome.moved);
        assert_eq!(outcome.score_delta, 4);
        assert_eq!(row(&grid, 0), vec![4, 0, 0, 0]);
        assert_eq!(outcome.merged.len(), 1);
    }

    #[test]
    fn test_three_equal_merge_nearest_wall() {
        let mut grid = Grid::from_values(4, &[2, 2, 2, 0]);
        let outcome = resolve(&mut grid, Direction::Left, 2048);
        assert_eq!(row(&grid, 0), vec![4, 2, 0, 0]);
        assert_eq!(outcome.score_delta, 4);

        let mut grid = Grid::from_values(4, &[0, 2, 2, 2]);
        resolve(&mut grid, Direction::Right, 2048);
        assert_eq!(row(&grid, 0), vec![0, 0, 2, 4]);
    }

    #[test]
    fn test_merge_product_does_not_merge_again() {
        let mut grid = Grid::from_values(4, &[4, 4, 8, 0]);
        let outcome = resolve(&mut grid, Direction::Left, 2048);
        assert_eq!(row(&grid, 0), vec![8, 8, 0, 0]);
        assert_eq!(outcome.score_delta, 8);
    }

    #[test]
    fn test_two_pairs_merge_separately() {
        let mut grid = Grid::from_values(4, &[2, 2, 2, 2]);
        let outcome = resolve(&mut grid, Direction::Left, 2048);
        assert_eq!(row(&grid, 0), vec![4, 4, 0, 0]);
        assert_eq!(outcome.score_delta, 8);
        assert_eq!(outcome.merged.len(), 2);
    }

    #[test]
    fn test_vertical_moves() {
        #[rustfmt::skip]
        let values = [
            2, 0, 0, 0,
            0, 0, 0, 0,
            2, 0, 0, 0,
            4, 0, 0, 0,
        ];
        let mut grid = Grid::from_values(4, &values);
        resolve(&mut grid, Direction::Up, 2048);
        let column: Vec<u32> = grid.rows().iter().map(|r| r[0]).collect();
        assert_eq!(column, vec![4, 4, 0, 0]);

        let mut grid = Grid::from_values(4, &values);
        resolve(&mut grid, Direction::Down, 2048);
        let column: Vec<u32> = grid.rows().iter().map(|r| r[0]).collect();
        assert_eq!(column, vec![0, 0, 4, 4]);
    }

    #[test]
    fn test_noop_leaves_grid_untouched() {
        let mut grid = Grid::from_values(4, &[0, 2, 0, 4]);
        assert!(resolve(&mut grid, Direction::Right, 2048).moved);
        let before = grid.clone();

        let outcome = resolve(&mut grid, Direction::Right, 2048);
        assert!(!outcome.moved);
        assert_eq!(outcome.score_delta, 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_positions_saved_and_lineage_cleared() {
        let mut grid = Grid::from_values(4, &[2, 2, 0, 0]);
        let outcome = resolve(&mut grid, Direction::Right, 2048);
        let merged_id = outcome.merged[0];
        let merged = grid.find(merged_id).expect("merged tile");
        assert_eq!(merged.position(), Position::new(3, 0));
        let sources = merged.merged_from().expect("lineage");
        assert_eq!(sources[0].from, Position::new(0, 0));
        assert_eq!(sources[1].from, Position::new(1, 0));

        resolve(&mut grid, Direction::Left, 2048);
        let tile = grid.find(merged_id).expect("same tile slid");
        assert!(!tile.has_merged());
        assert_eq!(tile.previous_position(), Some(Position::new(3, 0)));
        assert_eq!(tile.position(), Position::new(0, 0));
    }

    #[test]
    fn test_reached_target_flag() {
        let mut grid = Grid::from_values(4, &[1024, 1024]);
        let outcome = resolve(&mut grid, Direction::Left, 2048);
        assert!(outcome.reached_target);

        let mut grid = Grid::from_values(4, &[512, 512]);
        let outcome = resolve(&mut grid, Direction::Left, 2048);
        assert!(!outcome.reached_target);
    }

    #[test]
    fn test_largest_tiles_do_not_merge() {
        let top = 1u32 << 31;
        let mut grid = Grid::from_values(4, &[top, top]);
        assert!(!can_move(&grid, Direction::Left));
        let before = grid.clone();
        let outcome = resolve(&mut grid, Direction::Left, 2048);
        assert!(!outcome.moved);
        assert_eq!(grid, before);

        let outcome = resolve(&mut grid, Direction::Right, 2048);
        assert!(outcome.moved);
        assert!(outcome.merged.is_empty());
        assert_eq!(row(&grid, 0), vec![0, 0, top, top]);
    }

    #[test]
    fn test_probe_matches_empty_and_equal_neighbours() {
        let grid = Grid::from_values(4, &[2, 4, 8, 16]);
        assert!(!can_move(&grid, Direction::Left));
        assert!(!can_move(&grid, Direction::Right));
        assert!(!can_move(&grid, Direction::Up));
        assert!(can_move(&grid, Direction::Down));

        let grid = Grid::from_values(2, &[2, 2, 4, 8]);
        assert!(can_move(&grid, Direction::Left));
        assert!(!can_move(&grid, Direction::Up));
    }
}
