//! Merge lineage invariant: merge records describe a real merge.

use super::super::Grid;
use super::Invariant;

/// Invariant: every merge record is consistent with the tile it produced.
///
/// For each tile carrying `merged_from`:
/// - both sources held equal values summing to the tile's value
/// - the source ids differ from each other and from the product
/// - neither source is still on the grid
pub struct MergeLineageInvariant;

impl Invariant<Grid> for MergeLineageInvariant {
    fn holds(grid: &Grid) -> bool {
        grid.tiles().all(|tile| {
            let Some([a, b]) = tile.merged_from() else {
                return true;
            };
            a.value == b.value
                && u64::from(a.value) + u64::from(b.value) == u64::from(tile.value())
                && a.id != b.id
                && a.id != tile.id()
                && b.id != tile.id()
                && grid.find(a.id).is_none()
                && grid.find(b.id).is_none()
        })
    }

    fn description() -> &'static str {
        "Merged tiles record two consumed equal sources summing to their value"
    }
}
