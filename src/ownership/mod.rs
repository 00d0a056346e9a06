//! Ownership aggregation and classification.
//!
//! Reduces trial snapshots to a per-point score in [-1, +1] (+1 means every
//! trial gave the point to the first player, -1 to the second), then applies
//! the tolerance threshold to label each point.

use std::fmt;

use serde::Serialize;

use crate::board::{Board, Player};
use crate::error::EstimateError;

/// Final label of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ownership {
    FirstPlayer,
    SecondPlayer,
    /// Never claimed by either side in any trial.
    Neutral,
    /// Claimed in some trials, but not consistently enough to call.
    Undetermined,
}

impl Ownership {
    /// Returns the owning player for decided labels.
    pub const fn player(self) -> Option<Player> {
        match self {
            Ownership::FirstPlayer => Some(Player::First),
            Ownership::SecondPlayer => Some(Player::Second),
            Ownership::Neutral | Ownership::Undetermined => None,
        }
    }

    /// Returns true for `FirstPlayer` and `SecondPlayer`.
    pub const fn is_decided(self) -> bool {
        self.player().is_some()
    }

    /// Returns the label with the two sides exchanged.
    pub const fn swapped(self) -> Ownership {
        match self {
            Ownership::FirstPlayer => Ownership::SecondPlayer,
            Ownership::SecondPlayer => Ownership::FirstPlayer,
            other => other,
        }
    }

    /// Single-character diagram symbol.
    pub const fn symbol(self) -> char {
        match self {
            Ownership::FirstPlayer => 'X',
            Ownership::SecondPlayer => 'O',
            Ownership::Neutral => '.',
            Ownership::Undetermined => '?',
        }
    }
}

impl From<Player> for Ownership {
    fn from(player: Player) -> Self {
        match player {
            Player::First => Ownership::FirstPlayer,
            Player::Second => Ownership::SecondPlayer,
        }
    }
}

/// Checks that `tolerance` lies in (0, 1].
pub fn validate_tolerance(tolerance: f32) -> Result<(), EstimateError> {
    if tolerance > 0.0 && tolerance <= 1.0 {
        Ok(())
    } else {
        Err(EstimateError::InvalidParameter(format!(
            "tolerance must be in (0, 1], got {}",
            tolerance
        )))
    }
}

/// Per-point accumulator over trial outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreGrid {
    width: usize,
    height: usize,
    /// +1 per first-player claim, -1 per second-player claim.
    sums: Vec<i64>,
    /// Whether any trial claimed the point for either side.
    claimed: Vec<bool>,
    trials: usize,
}

impl ScoreGrid {
    /// Creates an empty accumulator shaped like `board`.
    pub fn for_board(board: &Board) -> Self {
        ScoreGrid {
            width: board.width(),
            height: board.height(),
            sums: vec![0; board.len()],
            claimed: vec![false; board.len()],
            trials: 0,
        }
    }

    /// Builds an accumulator from a full set of trial outcomes.
    pub fn from_outcomes(board: &Board, outcomes: &[Board]) -> Result<Self, EstimateError> {
        let mut grid = ScoreGrid::for_board(board);
        for outcome in outcomes {
            grid.accumulate(outcome)?;
        }
        Ok(grid)
    }

    /// Adds one trial outcome.
    pub fn accumulate(&mut self, outcome: &Board) -> Result<(), EstimateError> {
        if outcome.width() != self.width || outcome.height() != self.height {
            return Err(EstimateError::InvalidBoard(format!(
                "trial outcome is {}x{}, expected {}x{}",
                outcome.width(),
                outcome.height(),
                self.width,
                self.height
            )));
        }
        for (idx, state) in outcome.cells().iter().enumerate() {
            if let Some(player) = state.player() {
                self.sums[idx] += i64::from(player.sign());
                self.claimed[idx] = true;
            }
        }
        self.trials += 1;
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of outcomes accumulated so far.
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Normalized score of `(x, y)` in [-1, +1]; 0 before any trial.
    pub fn score(&self, x: usize, y: usize) -> Result<f64, EstimateError> {
        if x >= self.width || y >= self.height {
            return Err(EstimateError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.normalized(y * self.width + x))
    }

    /// Row-major normalized scores.
    pub fn scores(&self) -> Vec<f64> {
        (0..self.sums.len()).map(|idx| self.normalized(idx)).collect()
    }

    fn normalized(&self, idx: usize) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.sums[idx] as f64 / self.trials as f64
        }
    }

    /// Labels every point against `tolerance`.
    ///
    /// A point scoring at least `1 - tolerance` goes to the first player, at
    /// most `-(1 - tolerance)` to the second. A zero score never counts as
    /// decided, even at `tolerance = 1`.
    pub fn classify(&self, tolerance: f32) -> Result<OwnershipMap, EstimateError> {
        validate_tolerance(tolerance)?;
        if self.trials == 0 {
            return Err(EstimateError::InvalidParameter(
                "cannot classify before any trial has been accumulated".to_string(),
            ));
        }

        let threshold = 1.0 - f64::from(tolerance);
        let labels = (0..self.sums.len())
            .map(|idx| {
                let score = self.normalized(idx);
                if !self.claimed[idx] {
                    Ownership::Neutral
                } else if score > 0.0 && score >= threshold {
                    Ownership::FirstPlayer
                } else if score < 0.0 && score <= -threshold {
                    Ownership::SecondPlayer
                } else {
                    Ownership::Undetermined
                }
            })
            .collect();

        Ok(OwnershipMap {
            width: self.width,
            height: self.height,
            labels,
        })
    }
}

/// Per-label point totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OwnershipCounts {
    pub first: usize,
    pub second: usize,
    pub neutral: usize,
    pub undetermined: usize,
}

/// The classified result grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnershipMap {
    width: usize,
    height: usize,
    labels: Vec<Ownership>,
}

impl OwnershipMap {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major labels.
    pub fn labels(&self) -> &[Ownership] {
        &self.labels
    }

    /// Returns the label at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Result<Ownership, EstimateError> {
        if x >= self.width || y >= self.height {
            return Err(EstimateError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.labels[y * self.width + x])
    }

    /// Counts points per label.
    pub fn counts(&self) -> OwnershipCounts {
        let mut counts = OwnershipCounts::default();
        for label in &self.labels {
            match label {
                Ownership::FirstPlayer => counts.first += 1,
                Ownership::SecondPlayer => counts.second += 1,
                Ownership::Neutral => counts.neutral += 1,
                Ownership::Undetermined => counts.undetermined += 1,
            }
        }
        counts
    }

    /// Returns the stones of `board` that the estimate gives to the other
    /// side, as `(x, y)` pairs in row-major order.
    pub fn dead_stones(&self, board: &Board) -> Result<Vec<(usize, usize)>, EstimateError> {
        if board.width() != self.width || board.height() != self.height {
            return Err(EstimateError::InvalidBoard(format!(
                "board is {}x{}, estimate is {}x{}",
                board.width(),
                board.height(),
                self.width,
                self.height
            )));
        }
        Ok(board
            .cells()
            .iter()
            .zip(&self.labels)
            .enumerate()
            .filter_map(|(idx, (state, label))| {
                let stone = state.player()?;
                (label.player() == Some(stone.opponent()))
                    .then_some((idx % self.width, idx / self.width))
            })
            .collect())
    }

    /// Returns the map with the two sides exchanged.
    pub fn swapped(&self) -> OwnershipMap {
        OwnershipMap {
            width: self.width,
            height: self.height,
            labels: self.labels.iter().map(|l| l.swapped()).collect(),
        }
    }
}

impl fmt::Display for OwnershipMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.labels.chunks(self.width) {
            for label in row {
                write!(f, "{}", label.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
