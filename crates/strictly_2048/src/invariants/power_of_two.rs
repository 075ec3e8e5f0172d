//! Power-of-two invariant: tile values are 2, 4, 8, ...

use super::super::Grid;
use super::Invariant;

/// Invariant: every tile value is a power of two no smaller than 2.
///
/// Spawns only produce 2 or 4, and merges only add equal values, so no
/// other value can appear in normal play.
pub struct PowerOfTwoInvariant;

impl Invariant<Grid> for PowerOfTwoInvariant {
    fn holds(grid: &Grid) -> bool {
        grid.tiles()
            .all(|tile| tile.value() >= 2 && tile.value().is_power_of_two())
    }

    fn description() -> &'static str {
        "Every tile value is a power of two of at least 2"
    }
}
