//! Groups and liberties.
//!
//! A group is a maximal set of same-colored stones connected through
//! orthogonal adjacency; its liberties are the distinct empty points touching
//! it. Both are found with an explicit-stack flood fill.

use super::grid::Board;
use super::point::Player;
use crate::error::EstimateError;

/// A connected group of stones and its liberties, as flat indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub color: Player,
    pub stones: Vec<usize>,
    pub liberties: Vec<usize>,
}

impl Group {
    /// Returns true if the group has no liberties left.
    pub fn is_captured(&self) -> bool {
        self.liberties.is_empty()
    }

    /// Returns true if the group has exactly one liberty.
    pub fn in_atari(&self) -> bool {
        self.liberties.len() == 1
    }
}

/// Returns the group containing the stone at `(x, y)`, or `None` for an
/// empty point.
pub fn group_at(board: &Board, x: usize, y: usize) -> Result<Option<Group>, EstimateError> {
    board.get(x, y)?;
    Ok(collect_group(board, board.index(x, y)))
}

/// Flood-fills the group containing `start`.
pub(crate) fn collect_group(board: &Board, start: usize) -> Option<Group> {
    let color = board.at(start).player()?;
    let stone = color.stone();

    let mut seen = vec![false; board.len()];
    let mut stack = vec![start];
    let mut stones = Vec::new();
    let mut liberties = Vec::new();
    seen[start] = true;

    while let Some(pt) = stack.pop() {
        stones.push(pt);
        for n in board.neighbor_indices(pt) {
            if seen[n] {
                continue;
            }
            let state = board.at(n);
            if state == stone {
                seen[n] = true;
                stack.push(n);
            } else if state.is_empty() {
                seen[n] = true;
                liberties.push(n);
            }
        }
    }

    Some(Group {
        color,
        stones,
        liberties,
    })
}

/// Counts the liberties of the group containing `start`, stopping early once
/// `limit` distinct liberties have been seen. Returns 0 for an empty point.
pub(crate) fn liberties_up_to(board: &Board, start: usize, limit: usize) -> usize {
    let stone = board.at(start);
    if stone.is_empty() {
        return 0;
    }

    let mut seen = vec![false; board.len()];
    let mut stack = vec![start];
    let mut libs = 0;
    seen[start] = true;

    while let Some(pt) = stack.pop() {
        for n in board.neighbor_indices(pt) {
            if seen[n] {
                continue;
            }
            let state = board.at(n);
            if state == stone {
                seen[n] = true;
                stack.push(n);
            } else if state.is_empty() {
                seen[n] = true;
                libs += 1;
                if libs >= limit {
                    return libs;
                }
            }
        }
    }
    libs
}
