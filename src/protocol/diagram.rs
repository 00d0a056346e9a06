//! Text diagrams of positions and estimates.
//!
//! One board row per line, one character per point:
//!
//! | char | meaning |
//! |------|---------|
//! | `.` `+` | empty |
//! | `X` `x` `B` `#` | first player |
//! | `O` `o` `W` | second player |
//!
//! Whitespace inside a row and blank lines are ignored. Every row must have
//! the same length. Estimates are written back with `X`, `O`, `.` (neutral)
//! and `?` (undetermined).

use crate::board::{Board, PointState};
use crate::error::EstimateError;
use crate::ownership::OwnershipMap;

/// Errors that can occur while parsing a diagram.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiagramError {
    #[error("diagram has no rows")]
    Empty,

    #[error("row {row} has {got} points, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("invalid point character '{ch}' at row {row}, column {col}")]
    InvalidChar { ch: char, row: usize, col: usize },

    #[error(transparent)]
    Board(#[from] EstimateError),
}

impl From<DiagramError> for EstimateError {
    fn from(e: DiagramError) -> Self {
        match e {
            DiagramError::Board(inner) => inner,
            other => EstimateError::InvalidBoard(other.to_string()),
        }
    }
}

/// Parses a single point character.
fn parse_point(c: char) -> Option<PointState> {
    match c {
        '.' | '+' => Some(PointState::Empty),
        'X' | 'x' | 'B' | '#' => Some(PointState::First),
        'O' | 'o' | 'W' => Some(PointState::Second),
        _ => None,
    }
}

/// Parses a diagram into a board.
pub fn parse_diagram(text: &str) -> Result<Board, DiagramError> {
    let mut cells = Vec::new();
    let mut width = 0;
    let mut height = 0;

    for line in text.lines() {
        let row: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
        if row.is_empty() {
            continue;
        }
        if height == 0 {
            width = row.len();
        } else if row.len() != width {
            return Err(DiagramError::RaggedRow {
                row: height,
                expected: width,
                got: row.len(),
            });
        }
        for (col, &ch) in row.iter().enumerate() {
            let state = parse_point(ch).ok_or(DiagramError::InvalidChar {
                ch,
                row: height,
                col,
            })?;
            cells.push(state);
        }
        height += 1;
    }

    if height == 0 {
        return Err(DiagramError::Empty);
    }
    Ok(Board::from_cells(width, height, cells)?)
}

/// Formats a position as a diagram.
pub fn format_board(board: &Board) -> String {
    board.to_string()
}

/// Formats an estimate as a diagram.
pub fn format_ownership(map: &OwnershipMap) -> String {
    map.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_symbols() {
        let board = parse_diagram("X.O\nx+o\nB#W").unwrap();
        assert_eq!(board.width(), 3);
        assert_eq!(board.height(), 3);
        assert_eq!(board.get(0, 0), Ok(PointState::First));
        assert_eq!(board.get(1, 1), Ok(PointState::Empty));
        assert_eq!(board.get(2, 2), Ok(PointState::Second));
        assert_eq!(board.get(1, 2), Ok(PointState::First));
    }

    #[test]
    fn ignores_blank_lines_and_spacing() {
        let board = parse_diagram("\n X . O \n\n . . . \n").unwrap();
        assert_eq!(board.width(), 3);
        assert_eq!(board.height(), 2);
    }

    #[test]
    fn rejects_ragged_rows() {
        assert_eq!(
            parse_diagram("...\n.."),
            Err(DiagramError::RaggedRow {
                row: 1,
                expected: 3,
                got: 2,
            })
        );
    }

    #[test]
    fn rejects_unknown_characters() {
        assert_eq!(
            parse_diagram("..\n.Z"),
            Err(DiagramError::InvalidChar {
                ch: 'Z',
                row: 1,
                col: 1,
            })
        );
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(parse_diagram(""), Err(DiagramError::Empty));
        assert_eq!(parse_diagram("\n  \n"), Err(DiagramError::Empty));
    }

    #[test]
    fn format_roundtrips_canonical_diagram() {
        let text = "X.O\n...\nOOX\n";
        let board = parse_diagram(text).unwrap();
        assert_eq!(format_board(&board), text);
    }

    #[test]
    fn diagram_error_maps_to_invalid_board() {
        let e: EstimateError = DiagramError::Empty.into();
        assert!(matches!(e, EstimateError::InvalidBoard(_)));
    }

    #[test]
    fn board_errors_pass_through_unchanged() {
        let inner = EstimateError::InvalidDimensions {
            width: 0,
            height: 3,
        };
        let e = DiagramError::from(inner.clone());
        assert_eq!(e.to_string(), inner.to_string());
        assert_eq!(EstimateError::from(e), inner);
    }
}
