//! Flat integer buffer adapter.
//!
//! Callers that hold a position as a row-major `width * height` buffer of
//! cell codes go through this module:
//!
//! - input codes: `0` empty, `1` first player, `2` second player;
//! - output codes: `0` neutral, `1` first player, `2` second player,
//!   [`UNDETERMINED_CODE`] undetermined.
//!
//! The buffer length must match the declared dimensions exactly.

use crate::board::{Board, Player, PointState};
use crate::error::EstimateError;
use crate::estimate::{estimate, EstimateConfig};
use crate::ownership::{Ownership, OwnershipMap};
use crate::playout::PlayoutConfig;

/// Output code of a point the estimate could not call.
pub const UNDETERMINED_CODE: i32 = -1;

/// Returns the output code of a label.
pub const fn ownership_code(label: Ownership) -> i32 {
    match label {
        Ownership::Neutral => 0,
        Ownership::FirstPlayer => 1,
        Ownership::SecondPlayer => 2,
        Ownership::Undetermined => UNDETERMINED_CODE,
    }
}

/// Parses an output code back into a label.
pub fn ownership_from_code(code: i32) -> Option<Ownership> {
    match code {
        0 => Some(Ownership::Neutral),
        1 => Some(Ownership::FirstPlayer),
        2 => Some(Ownership::SecondPlayer),
        UNDETERMINED_CODE => Some(Ownership::Undetermined),
        _ => None,
    }
}

fn dimension(width: i32, height: i32) -> Result<(usize, usize), EstimateError> {
    if width <= 0 || height <= 0 {
        return Err(EstimateError::InvalidDimensions {
            width: i64::from(width),
            height: i64::from(height),
        });
    }
    Ok((width as usize, height as usize))
}

/// Builds a board from a flat buffer of input codes.
pub fn board_from_flat(width: i32, height: i32, cells: &[i32]) -> Result<Board, EstimateError> {
    let (width, height) = dimension(width, height)?;
    let expected = width.checked_mul(height).ok_or_else(|| {
        EstimateError::InvalidBoard(format!("{}x{} board is too large", width, height))
    })?;
    if cells.len() != expected {
        return Err(EstimateError::InvalidBoard(format!(
            "buffer holds {} cells, a {}x{} board needs {}",
            cells.len(),
            width,
            height,
            expected
        )));
    }
    let states = cells
        .iter()
        .enumerate()
        .map(|(i, &code)| {
            PointState::from_code(code).ok_or_else(|| {
                EstimateError::InvalidBoard(format!(
                    "unknown cell code {} at ({}, {})",
                    code,
                    i % width,
                    i / width
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Board::from_cells(width, height, states)
}

/// Encodes a classified grid as a flat buffer of output codes.
pub fn ownership_to_flat(map: &OwnershipMap) -> Vec<i32> {
    map.labels().iter().map(|&l| ownership_code(l)).collect()
}

/// A complete estimation request in flat-buffer form.
#[derive(Debug, Clone)]
pub struct FlatRequest<'a> {
    pub width: i32,
    pub height: i32,
    pub cells: &'a [i32],
    pub player_to_move: i32,
    pub trials: i32,
    pub tolerance: f32,
    /// Reserved for future behavior variants; currently ignored.
    pub reserved: bool,
}

impl FlatRequest<'_> {
    /// Runs the request and returns the classified grid as output codes.
    pub fn estimate(&self, playout: &PlayoutConfig) -> Result<Vec<i32>, EstimateError> {
        let board = board_from_flat(self.width, self.height, self.cells)?;
        let to_move = Player::from_code(self.player_to_move)?;
        if self.trials <= 0 {
            return Err(EstimateError::InvalidParameter(format!(
                "trials must be at least 1, got {}",
                self.trials
            )));
        }
        if self.reserved {
            log::debug!("reserved variant flag set; no variant is defined, ignoring");
        }
        let config = EstimateConfig {
            trials: self.trials as usize,
            tolerance: self.tolerance,
            playout: playout.clone(),
        };
        let map = estimate(&board, to_move, &config)?;
        Ok(ownership_to_flat(&map))
    }
}

/// Estimates the position held in `data` and overwrites it with the result.
///
/// On error `data` is left untouched.
pub fn estimate_in_place(
    width: i32,
    height: i32,
    data: &mut [i32],
    player_to_move: i32,
    trials: i32,
    tolerance: f32,
    reserved: bool,
) -> Result<(), EstimateError> {
    let result = FlatRequest {
        width,
        height,
        cells: data,
        player_to_move,
        trials,
        tolerance,
        reserved,
    }
    .estimate(&PlayoutConfig::default())?;
    data.copy_from_slice(&result);
    Ok(())
}
