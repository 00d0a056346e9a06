//! One-call ownership estimation.
//!
//! Validates the request, runs the playouts, reduces them into a score grid
//! and classifies it. Aggregation only starts once every trial has finished;
//! any failure aborts the whole request.

use crate::board::{Board, Player};
use crate::error::EstimateError;
use crate::ownership::{validate_tolerance, OwnershipMap, ScoreGrid};
use crate::playout::{run_trials, PlayoutConfig};

/// Default number of playouts per request.
pub const DEFAULT_TRIALS: usize = 1000;

/// Default classification tolerance.
pub const DEFAULT_TOLERANCE: f32 = 0.4;

/// Parameters of one estimation request.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateConfig {
    /// Number of independent playouts (at least 1).
    pub trials: usize,
    /// Fraction of unanimity that may be missing before a point is still
    /// called for a side, in (0, 1].
    pub tolerance: f32,
    pub playout: PlayoutConfig,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        EstimateConfig {
            trials: DEFAULT_TRIALS,
            tolerance: DEFAULT_TOLERANCE,
            playout: PlayoutConfig::default(),
        }
    }
}

impl EstimateConfig {
    /// Checks the request parameters without running anything.
    pub fn validate(&self) -> Result<(), EstimateError> {
        if self.trials == 0 {
            return Err(EstimateError::InvalidParameter(
                "trials must be at least 1".to_string(),
            ));
        }
        validate_tolerance(self.tolerance)
    }
}

/// Runs the playouts for `board` and returns the accumulated scores.
pub fn estimate_scores(
    board: &Board,
    to_move: Player,
    config: &EstimateConfig,
) -> Result<ScoreGrid, EstimateError> {
    config.validate()?;
    log::debug!(
        "estimating {}x{} board, {:?} to move, {} trials",
        board.width(),
        board.height(),
        to_move,
        config.trials
    );
    let outcomes = run_trials(board, to_move, config.trials, &config.playout)?;
    ScoreGrid::from_outcomes(board, &outcomes)
}

/// Estimates the final owner of every point of `board`.
pub fn estimate(
    board: &Board,
    to_move: Player,
    config: &EstimateConfig,
) -> Result<OwnershipMap, EstimateError> {
    let scores = estimate_scores(board, to_move, config)?;
    let map = scores.classify(config.tolerance)?;
    let counts = map.counts();
    log::debug!(
        "estimate done: first {}, second {}, neutral {}, undetermined {}",
        counts.first,
        counts.second,
        counts.neutral,
        counts.undetermined
    );
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PointState;
    use crate::ownership::Ownership;

    fn config(trials: usize) -> EstimateConfig {
        EstimateConfig {
            trials,
            playout: PlayoutConfig {
                seed: 1,
                ..PlayoutConfig::default()
            },
            ..EstimateConfig::default()
        }
    }

    #[test]
    fn default_config_is_valid() {
        let config = EstimateConfig::default();
        assert_eq!(config.trials, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn invalid_parameters_fail_before_trials() {
        let board = Board::new(3, 3).unwrap();
        let mut bad = config(0);
        assert!(matches!(
            estimate(&board, Player::First, &bad),
            Err(EstimateError::InvalidParameter(_))
        ));
        bad.trials = 10;
        bad.tolerance = 0.0;
        assert!(matches!(
            estimate(&board, Player::First, &bad),
            Err(EstimateError::InvalidParameter(_))
        ));
    }

    #[test]
    fn single_stone_board_belongs_to_its_owner() {
        let mut board = Board::new(1, 1).unwrap();
        board.set(0, 0, PointState::First).unwrap();
        let map = estimate(&board, Player::Second, &config(50)).unwrap();
        assert_eq!(map.get(0, 0), Ok(Ownership::FirstPlayer));
    }

    #[test]
    fn empty_single_point_is_neutral() {
        let board = Board::new(1, 1).unwrap();
        let map = estimate(&board, Player::First, &config(20)).unwrap();
        assert_eq!(map.get(0, 0), Ok(Ownership::Neutral));
    }

    #[test]
    fn scores_cover_every_trial() {
        let board = Board::new(4, 4).unwrap();
        let scores = estimate_scores(&board, Player::First, &config(30)).unwrap();
        assert_eq!(scores.trials(), 30);
        assert!(scores.scores().iter().all(|s| (-1.0..=1.0).contains(s)));
    }
}
