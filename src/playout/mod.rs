//! Playout engine.
//!
//! Runs independent randomized continuations of a position and returns the
//! ownership snapshot each one settles into. Trials share nothing but
//! read-only access to the input board: each works on its own clone with its
//! own random stream, so they run in parallel on rayon without locking.

pub mod trial;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::board::{Board, Player};
use crate::error::EstimateError;

pub use trial::{play_out, TrialSummary};

/// Tuning knobs for the playout engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayoutConfig {
    /// Step bound per trial, as stones placed per board point.
    pub max_moves_per_point: usize,
    /// Worker threads: 0 uses the global rayon pool, 1 runs sequentially.
    pub threads: usize,
    /// Base random seed (0 = use entropy). Trial `i` is seeded with
    /// `seed + i`, so results do not depend on scheduling.
    pub seed: u64,
}

impl Default for PlayoutConfig {
    fn default() -> Self {
        PlayoutConfig {
            max_moves_per_point: 3,
            threads: 0,
            seed: 0,
        }
    }
}

impl PlayoutConfig {
    /// Returns the per-trial step bound for a board with `points` points.
    pub fn max_moves(&self, points: usize) -> usize {
        self.max_moves_per_point.saturating_mul(points).max(1)
    }
}

/// Runs `trials` playouts of `board` with `to_move` starting each one.
///
/// Returns exactly `trials` ownership snapshots in trial order. Fails before
/// any trial starts if `trials` is zero, the step bound is zero, or the board
/// is structurally inconsistent.
pub fn run_trials(
    board: &Board,
    to_move: Player,
    trials: usize,
    config: &PlayoutConfig,
) -> Result<Vec<Board>, EstimateError> {
    if trials == 0 {
        return Err(EstimateError::InvalidParameter(
            "trials must be at least 1".to_string(),
        ));
    }
    if config.max_moves_per_point == 0 {
        return Err(EstimateError::InvalidParameter(
            "max_moves_per_point must be at least 1".to_string(),
        ));
    }
    board.validate()?;

    let max_moves = config.max_moves(board.len());
    let run = |i: usize| run_one(board, to_move, max_moves, config.seed, i);

    let outcomes = match config.threads {
        1 => (0..trials).map(run).collect(),
        0 => (0..trials).into_par_iter().map(run).collect(),
        n => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| EstimateError::ThreadPool(e.to_string()))?;
            pool.install(|| (0..trials).into_par_iter().map(run).collect())
        }
    };
    Ok(outcomes)
}

/// Creates the random stream for trial `index`.
pub fn trial_rng(seed: u64, index: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(index as u64))
    } else {
        SmallRng::from_entropy()
    }
}

fn run_one(board: &Board, to_move: Player, max_moves: usize, seed: u64, index: usize) -> Board {
    let mut rng = trial_rng(seed, index);
    let (outcome, summary) = play_out(board, to_move, max_moves, &mut rng);
    log::trace!(
        "trial {}: {} moves, {} captures{}",
        index,
        summary.moves,
        summary.captures,
        if summary.hit_step_bound {
            ", stopped at step bound"
        } else {
            ""
        }
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PointState;

    fn seeded(threads: usize) -> PlayoutConfig {
        PlayoutConfig {
            seed: 42,
            threads,
            ..PlayoutConfig::default()
        }
    }

    #[test]
    fn returns_one_outcome_per_trial() {
        let board = Board::new(5, 5).unwrap();
        let outcomes = run_trials(&board, Player::First, 17, &seeded(1)).unwrap();
        assert_eq!(outcomes.len(), 17);
        for outcome in &outcomes {
            assert_eq!(outcome.width(), 5);
            assert_eq!(outcome.height(), 5);
        }
    }

    #[test]
    fn zero_trials_rejected() {
        let board = Board::new(3, 3).unwrap();
        assert!(matches!(
            run_trials(&board, Player::First, 0, &seeded(1)),
            Err(EstimateError::InvalidParameter(_))
        ));
    }

    #[test]
    fn zero_step_bound_rejected() {
        let board = Board::new(3, 3).unwrap();
        let config = PlayoutConfig {
            max_moves_per_point: 0,
            ..seeded(1)
        };
        assert!(run_trials(&board, Player::First, 1, &config).is_err());
    }

    #[test]
    fn seeded_runs_match_across_thread_counts() {
        let mut board = Board::new(7, 7).unwrap();
        board.set(2, 2, PointState::First).unwrap();
        board.set(4, 4, PointState::Second).unwrap();
        let sequential = run_trials(&board, Player::Second, 24, &seeded(1)).unwrap();
        let global = run_trials(&board, Player::Second, 24, &seeded(0)).unwrap();
        let pooled = run_trials(&board, Player::Second, 24, &seeded(3)).unwrap();
        assert_eq!(sequential, global);
        assert_eq!(sequential, pooled);
    }

    #[test]
    fn step_bound_scales_with_board() {
        let config = PlayoutConfig::default();
        assert_eq!(config.max_moves(81), 243);
        assert_eq!(config.max_moves(1), 3);
        let config = PlayoutConfig {
            max_moves_per_point: usize::MAX,
            ..config
        };
        assert_eq!(config.max_moves(4), usize::MAX);
    }
}
