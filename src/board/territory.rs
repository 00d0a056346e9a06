//! Area ownership of a settled position.
//!
//! Once a playout has gone quiet, every stone still on the board is treated
//! as alive. An empty region (maximal orthogonally connected set of empty
//! points) belongs to a side when that side's stones are the only ones
//! bordering it; a region touching both colors, or none, is neutral.

use super::grid::Board;
use super::point::{Player, PointState};
use crate::error::EstimateError;

const BORDERS_FIRST: u8 = 0b01;
const BORDERS_SECOND: u8 = 0b10;

/// Returns the side whose living stones enclose `(x, y)`.
///
/// A stone is enclosed by its own group. An empty point is owned by the only
/// color bordering its empty region; `None` means dame or an open region.
pub fn enclosing_owner(board: &Board, x: usize, y: usize) -> Result<Option<Player>, EstimateError> {
    let state = board.get(x, y)?;
    if let Some(player) = state.player() {
        return Ok(Some(player));
    }
    let mut seen = vec![false; board.len()];
    let (_, borders) = flood_region(board, board.index(x, y), &mut seen);
    Ok(owner_from_borders(borders))
}

/// Builds the ownership grid of a settled position: stones keep their color,
/// enclosed empty regions take their encloser's color, and everything else
/// stays empty.
pub fn ownership_snapshot(board: &Board) -> Board {
    let mut out = board.clone();
    let mut seen = vec![false; board.len()];

    for idx in 0..board.len() {
        if seen[idx] || !board.at(idx).is_empty() {
            continue;
        }
        let (region, borders) = flood_region(board, idx, &mut seen);
        if let Some(owner) = owner_from_borders(borders) {
            let stone = owner.stone();
            for pt in region {
                out.put(pt, stone);
            }
        }
    }
    out
}

/// Flood-fills the empty region containing `start`, marking it in `seen`.
/// Returns the region and a bitmask of bordering colors.
fn flood_region(board: &Board, start: usize, seen: &mut [bool]) -> (Vec<usize>, u8) {
    let mut region = Vec::new();
    let mut borders = 0u8;
    let mut stack = vec![start];
    seen[start] = true;

    while let Some(pt) = stack.pop() {
        region.push(pt);
        for n in board.neighbor_indices(pt) {
            match board.at(n) {
                PointState::Empty => {
                    if !seen[n] {
                        seen[n] = true;
                        stack.push(n);
                    }
                }
                PointState::First => borders |= BORDERS_FIRST,
                PointState::Second => borders |= BORDERS_SECOND,
            }
        }
    }
    (region, borders)
}

fn owner_from_borders(borders: u8) -> Option<Player> {
    match borders {
        BORDERS_FIRST => Some(Player::First),
        BORDERS_SECOND => Some(Player::Second),
        _ => None,
    }
}
