//! Contract-based validation for 2048 turns.
//!
//! Contracts define correctness through preconditions and postconditions:
//! `{P} move {Q}`. Preconditions are always enforced; postconditions run
//! in debug builds only.

use super::action::{Direction, MoveError};
use super::game::Phase;
use super::grid::Grid;
use super::invariants::{GridInvariants, Invariant, InvariantSet, InvariantViolation};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: `{P(state, action)}` must hold before applying the action
/// - Postcondition: `{Q(before, after)}` must hold after applying it
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the session must be accepting moves.
pub struct AcceptsMoves;

impl AcceptsMoves {
    /// Maps every non-playing phase to the error a caller should see.
    #[instrument]
    pub fn check(phase: Phase) -> Result<(), MoveError> {
        match phase {
            Phase::Playing => Ok(()),
            Phase::Ready => Err(MoveError::NotStarted),
            Phase::Over => Err(MoveError::GameOver),
            Phase::Won => Err(MoveError::AwaitingContinue),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Slide Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Invariant over a before/after pair: sliding and merging conserve value.
///
/// Merges replace two tiles of value `v` with one of `2v`, so the total
/// is unchanged until the spawn step.
pub struct TileSumConserved;

impl Invariant<(Grid, Grid)> for TileSumConserved {
    fn holds((before, after): &(Grid, Grid)) -> bool {
        before.tile_sum() == after.tile_sum()
    }

    fn description() -> &'static str {
        "Sliding and merging conserve the sum of tile values"
    }
}

/// Contract for the slide and merge phase of a turn.
///
/// Preconditions:
/// - Grid invariants hold
///
/// Postconditions:
/// - Grid invariants still hold
/// - Tile sum is conserved
pub struct SlideContract;

impl Contract<Grid, Direction> for SlideContract {
    fn pre(grid: &Grid, _direction: &Direction) -> Result<(), MoveError> {
        GridInvariants::check_all(grid).map_err(|violations| violation("Precondition", &violations))
    }

    fn post(before: &Grid, after: &Grid) -> Result<(), MoveError> {
        GridInvariants::check_all(after)
            .map_err(|violations| violation("Postcondition", &violations))?;

        let pair = (before.clone(), after.clone());
        if !TileSumConserved::holds(&pair) {
            return Err(violation(
                "Postcondition",
                &[InvariantViolation::new(TileSumConserved::description())],
            ));
        }
        Ok(())
    }
}

/// Postcondition: the score never decreases within a session.
pub struct ScoreMonotonic;

impl ScoreMonotonic {
    /// Fails if `after` is lower than `before`.
    #[instrument]
    pub fn check(before: u64, after: u64) -> Result<(), MoveError> {
        if after < before {
            Err(violation(
                "Postcondition",
                &[InvariantViolation::new("Score never decreases")],
            ))
        } else {
            Ok(())
        }
    }
}

fn violation(stage: &str, violations: &[InvariantViolation]) -> MoveError {
    let descriptions = violations
        .iter()
        .map(|v| v.description.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    warn!(stage, %descriptions, "Contract violated");
    MoveError::InvariantViolation(format!("{} failed: {}", stage, descriptions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Position, Tile, TileId, resolve};

    #[test]
    fn test_accepts_moves_only_while_playing() {
        assert_eq!(AcceptsMoves::check(Phase::Playing), Ok(()));
        assert_eq!(AcceptsMoves::check(Phase::Ready), Err(MoveError::NotStarted));
        assert_eq!(AcceptsMoves::check(Phase::Over), Err(MoveError::GameOver));
        assert_eq!(
            AcceptsMoves::check(Phase::Won),
            Err(MoveError::AwaitingContinue)
        );
    }

    #[test]
    fn test_slide_contract_holds_for_resolver() {
        let mut grid = Grid::from_values(4, &[2, 2, 2, 0, 4, 0, 4, 8]);
        for direction in Direction::ALL {
            SlideContract::pre(&grid, &direction).expect("pre");
            let before = grid.clone();
            resolve(&mut grid, direction, 2048);
            SlideContract::post(&before, &grid).expect("post");
        }
    }

    #[test]
    fn test_sum_change_fails_post() {
        let before = Grid::from_values(4, &[2, 2]);
        let after = Grid::from_values(4, &[8]);
        let err = SlideContract::post(&before, &after).unwrap_err();
        assert!(matches!(err, MoveError::InvariantViolation(msg) if msg.contains("sum")));
    }

    #[test]
    fn test_corrupt_grid_fails_pre() {
        let mut grid = Grid::new(4);
        grid.force_cell(
            Position::new(0, 0),
            Some(Tile::new(TileId(0), Position::new(0, 0), Some(3))),
        );
        assert!(SlideContract::pre(&grid, &Direction::Left).is_err());
    }

    #[test]
    fn test_score_monotonic() {
        assert!(ScoreMonotonic::check(4, 4).is_ok());
        assert!(ScoreMonotonic::check(4, 12).is_ok());
        assert!(ScoreMonotonic::check(12, 4).is_err());
    }
}
