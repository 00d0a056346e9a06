//! Moyo: Monte Carlo territory estimation for Go positions.
//!
//! Given a position and the side to move, plays many randomized
//! continuations to a settled state and reports, for every point, which side
//! ends up owning it, whether it is neutral, or whether the playouts disagree
//! too much to tell.
//!
//! Exposes the board representation, the playout engine, the ownership
//! aggregator and the external formats for use by the binary and by
//! integration tests.

pub mod board;
pub mod error;
pub mod estimate;
pub mod ownership;
pub mod playout;
pub mod protocol;

pub use board::{Board, Player, PointState};
pub use error::EstimateError;
pub use estimate::{estimate, estimate_scores, EstimateConfig};
pub use ownership::{Ownership, OwnershipCounts, OwnershipMap, ScoreGrid};
pub use playout::{run_trials, PlayoutConfig};
