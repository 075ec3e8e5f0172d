//! Tiles: the numbered pieces that occupy grid cells.

use super::position::Position;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Value given to a tile created without one.
pub const DEFAULT_TILE_VALUE: u32 = 2;

/// Session-unique tile identifier, allocated by the [`Grid`](crate::Grid).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("#{}", _0)]
pub struct TileId(pub u64);

/// One of the two tiles consumed by a merge.
///
/// This is a plain copy of the source's identity, not a reference to it.
/// The source itself is gone from the grid once the merge happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct MergeSource {
    /// Id of the consumed tile.
    pub id: TileId,
    /// Value of the consumed tile.
    pub value: u32,
    /// Cell the consumed tile occupied when the turn started.
    pub from: Position,
}

/// A numbered tile on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    x: usize,
    y: usize,
    value: u32,
    previous_position: Option<Position>,
    merged_from: Option<[MergeSource; 2]>,
}

impl Tile {
    /// Creates a tile at `position`.
    ///
    /// A missing value and a value of `0` both become [`DEFAULT_TILE_VALUE`].
    pub fn new(id: TileId, position: Position, value: Option<u32>) -> Self {
        let value = value
            .filter(|v| *v != 0)
            .unwrap_or(DEFAULT_TILE_VALUE);
        Self {
            id,
            x: position.x,
            y: position.y,
            value,
            previous_position: None,
            merged_from: None,
        }
    }

    /// Creates the product of merging `a` into `b` at `position`.
    ///
    /// Callers check [`can_merge_with`](Self::can_merge_with) first.
    pub(crate) fn merged(id: TileId, position: Position, a: &Tile, b: &Tile) -> Self {
        let mut tile = Tile::new(id, position, Some(a.value.saturating_add(b.value)));
        tile.merged_from = Some([a.as_merge_source(), b.as_merge_source()]);
        tile
    }

    fn as_merge_source(&self) -> MergeSource {
        MergeSource::new(
            self.id,
            self.value,
            self.previous_position.unwrap_or_else(|| self.position()),
        )
    }

    /// True if this tile and `other` hold equal values whose sum fits a tile.
    ///
    /// Two `2^31` tiles are equal but their sum does not fit in a `u32`,
    /// so they stay apart.
    pub fn can_merge_with(&self, other: &Tile) -> bool {
        self.value == other.value && self.value.checked_add(other.value).is_some()
    }

    /// Snapshots the current position into `previous_position`.
    pub fn save_position(&mut self) {
        self.previous_position = Some(self.position());
    }

    /// Moves the tile. `previous_position` is left alone.
    pub fn update_position(&mut self, position: Position) {
        self.x = position.x;
        self.y = position.y;
    }

    pub(crate) fn clear_merged_from(&mut self) {
        self.merged_from = None;
    }

    /// Returns the tile id.
    pub fn id(&self) -> TileId {
        self.id
    }

    /// Returns the current position.
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Column index.
    pub fn x(&self) -> usize {
        self.x
    }

    /// Row index.
    pub fn y(&self) -> usize {
        self.y
    }

    /// Returns the tile value.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Position before the most recent turn, if one has been saved.
    pub fn previous_position(&self) -> Option<Position> {
        self.previous_position
    }

    /// The two tiles merged into this one during the current turn.
    pub fn merged_from(&self) -> Option<&[MergeSource; 2]> {
        self.merged_from.as_ref()
    }

    /// True if this tile is the product of a merge this turn.
    pub fn has_merged(&self) -> bool {
        self.merged_from.is_some()
    }

    #[cfg(test)]
    pub(crate) fn with_merged_from(mut self, sources: [MergeSource; 2]) -> Self {
        self.merged_from = Some(sources);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_value_defaults_to_two() {
        let tile = Tile::new(TileId(0), Position::new(0, 0), None);
        assert_eq!(tile.value(), 2);
    }

    #[test]
    fn test_zero_value_coerced_to_two() {
        let tile = Tile::new(TileId(0), Position::new(0, 0), Some(0));
        assert_eq!(tile.value(), 2);
    }

    #[test]
    fn test_explicit_value_kept() {
        let tile = Tile::new(TileId(0), Position::new(2, 3), Some(4));
        assert_eq!(tile.value(), 4);
        assert_eq!(tile.position(), Position::new(2, 3));
        assert!(tile.previous_position().is_none());
        assert!(!tile.has_merged());
    }

    #[test]
    fn test_update_position_keeps_snapshot() {
        let mut tile = Tile::new(TileId(7), Position::new(1, 1), Some(8));
        tile.save_position();
        tile.update_position(Position::new(3, 1));

        assert_eq!(tile.position(), Position::new(3, 1));
        assert_eq!(tile.previous_position(), Some(Position::new(1, 1)));
    }

    #[test]
    fn test_can_merge_with() {
        let tile = |value| Tile::new(TileId(0), Position::new(0, 0), Some(value));
        assert!(tile(8).can_merge_with(&tile(8)));
        assert!(!tile(8).can_merge_with(&tile(4)));
        assert!(tile(1 << 30).can_merge_with(&tile(1 << 30)));
        assert!(!tile(1 << 31).can_merge_with(&tile(1 << 31)));
    }

    #[test]
    fn test_merged_records_both_sources() {
        let mut a = Tile::new(TileId(1), Position::new(2, 0), Some(4));
        let mut b = Tile::new(TileId(2), Position::new(0, 0), Some(4));
        a.save_position();
        b.save_position();
        a.update_position(Position::new(0, 0));

        let merged = Tile::merged(TileId(3), Position::new(0, 0), &a, &b);

        assert_eq!(merged.value(), 8);
        assert!(merged.previous_position().is_none());
        let sources = merged.merged_from().expect("merge lineage");
        assert_eq!(sources[0], MergeSource::new(TileId(1), 4, Position::new(2, 0)));
        assert_eq!(sources[1], MergeSource::new(TileId(2), 4, Position::new(0, 0)));
    }
}
