//! SGF-style coordinate lists.
//!
//! A list is a run of two-letter pairs, column first then row, with `a` as
//! 0: `"aabbcc"` is `(0,0) (1,1) (2,2)`. Game servers send stone and
//! removal lists in this form. Values 26 to 51 use `A` to `Z`, so boards up
//! to 52 points wide can be written.

use crate::board::{Board, Player};
use crate::error::EstimateError;

/// Errors that can occur while parsing a coordinate list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordError {
    #[error("coordinate list has odd length {0}")]
    OddLength(usize),

    #[error("invalid coordinate letter '{0}'")]
    InvalidLetter(char),

    #[error("coordinate {0} has no letter (at most {max})", max = MAX_COORD)]
    OutOfRange(usize),
}

/// Largest coordinate a single letter can hold.
pub const MAX_COORD: usize = 51;

impl From<CoordError> for EstimateError {
    fn from(e: CoordError) -> Self {
        EstimateError::InvalidBoard(e.to_string())
    }
}

fn letter_value(c: char) -> Result<usize, CoordError> {
    match c {
        'a'..='z' => Ok((c as u8 - b'a') as usize),
        'A'..='Z' => Ok((c as u8 - b'A') as usize + 26),
        _ => Err(CoordError::InvalidLetter(c)),
    }
}

fn value_letter(v: usize) -> Result<char, CoordError> {
    match v {
        0..=25 => Ok((b'a' + v as u8) as char),
        26..=MAX_COORD => Ok((b'A' + (v - 26) as u8) as char),
        _ => Err(CoordError::OutOfRange(v)),
    }
}

/// Parses a coordinate list into `(x, y)` pairs.
pub fn parse_coords(list: &str) -> Result<Vec<(usize, usize)>, CoordError> {
    let chars: Vec<char> = list.trim().chars().collect();
    if chars.len() % 2 != 0 {
        return Err(CoordError::OddLength(chars.len()));
    }
    chars
        .chunks(2)
        .map(|pair| Ok((letter_value(pair[0])?, letter_value(pair[1])?)))
        .collect()
}

/// Formats `(x, y)` pairs as a coordinate list.
pub fn format_coords(points: &[(usize, usize)]) -> Result<String, CoordError> {
    let mut out = String::with_capacity(points.len() * 2);
    for &(x, y) in points {
        out.push(value_letter(x)?);
        out.push(value_letter(y)?);
    }
    Ok(out)
}

/// Places a stone of `player` at every point of `list`.
pub fn place_stones(board: &mut Board, list: &str, player: Player) -> Result<(), EstimateError> {
    for (x, y) in parse_coords(list)? {
        board.set(x, y, player.stone())?;
    }
    Ok(())
}
