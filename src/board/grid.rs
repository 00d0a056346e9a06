//! The board grid.
//!
//! A fixed-size, row-major grid of point states. Dimensions are set at
//! construction and never change; every point always holds a defined state.
//! Hot paths address points by flat index (`y * width + x`), public callers
//! by `(x, y)` with bounds checks.

use std::fmt;

use super::point::PointState;
use crate::error::EstimateError;

/// Up to four in-bounds neighbor indices of a point.
#[derive(Debug, Clone, Copy)]
pub struct Neighbors {
    points: [usize; 4],
    len: usize,
    next: usize,
}

impl Neighbors {
    fn new() -> Self {
        Neighbors {
            points: [0; 4],
            len: 0,
            next: 0,
        }
    }

    fn push(&mut self, idx: usize) {
        self.points[self.len] = idx;
        self.len += 1;
    }
}

impl Iterator for Neighbors {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.next < self.len {
            let idx = self.points[self.next];
            self.next += 1;
            Some(idx)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Neighbors {}

/// A width x height grid of point states.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<PointState>,
}

impl Board {
    /// Creates a board with every point empty.
    pub fn new(width: usize, height: usize) -> Result<Self, EstimateError> {
        let points = width
            .checked_mul(height)
            .filter(|&n| n > 0)
            .ok_or(EstimateError::InvalidDimensions {
                width: clamp_dimension(width),
                height: clamp_dimension(height),
            })?;
        Ok(Board {
            width,
            height,
            cells: vec![PointState::Empty; points],
        })
    }

    /// Creates a board from row-major cells.
    ///
    /// Fails with `InvalidBoard` when the cell count does not match the
    /// declared dimensions.
    pub fn from_cells(
        width: usize,
        height: usize,
        cells: Vec<PointState>,
    ) -> Result<Self, EstimateError> {
        let board = Board::new(width, height)?;
        if cells.len() != board.cells.len() {
            return Err(EstimateError::InvalidBoard(format!(
                "expected {} cells for a {}x{} board, got {}",
                board.cells.len(),
                width,
                height,
                cells.len()
            )));
        }
        Ok(Board {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of points.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a board has at least one point.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the state at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Result<PointState, EstimateError> {
        let idx = self.checked_index(x, y)?;
        Ok(self.cells[idx])
    }

    /// Sets the state at `(x, y)`.
    pub fn set(&mut self, x: usize, y: usize, state: PointState) -> Result<(), EstimateError> {
        let idx = self.checked_index(x, y)?;
        self.cells[idx] = state;
        Ok(())
    }

    /// Returns the 2 to 4 in-bounds orthogonal neighbors of `(x, y)`.
    pub fn neighbors(&self, x: usize, y: usize) -> Result<Vec<(usize, usize)>, EstimateError> {
        let idx = self.checked_index(x, y)?;
        Ok(self
            .neighbor_indices(idx)
            .map(|n| self.coords(n))
            .collect())
    }

    /// Row-major view of every point.
    pub fn cells(&self) -> &[PointState] {
        &self.cells
    }

    /// Returns a copy of the board with the two colors exchanged.
    pub fn swapped_colors(&self) -> Board {
        Board {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(|c| c.swapped()).collect(),
        }
    }

    /// Checks that the grid matches its declared dimensions.
    pub fn validate(&self) -> Result<(), EstimateError> {
        if self.width == 0 || self.height == 0 {
            return Err(EstimateError::InvalidBoard(format!(
                "degenerate dimensions {}x{}",
                self.width, self.height
            )));
        }
        if self.width.checked_mul(self.height) != Some(self.cells.len()) {
            return Err(EstimateError::InvalidBoard(format!(
                "{} cells stored for a {}x{} board",
                self.cells.len(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }

    fn checked_index(&self, x: usize, y: usize) -> Result<usize, EstimateError> {
        if x >= self.width || y >= self.height {
            return Err(EstimateError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.index(x, y))
    }

    /// Flat index of an in-bounds point.
    #[inline]
    pub(crate) fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// `(x, y)` of a flat index.
    #[inline]
    pub(crate) fn coords(&self, idx: usize) -> (usize, usize) {
        (idx % self.width, idx / self.width)
    }

    #[inline]
    pub(crate) fn at(&self, idx: usize) -> PointState {
        self.cells[idx]
    }

    #[inline]
    pub(crate) fn put(&mut self, idx: usize, state: PointState) {
        self.cells[idx] = state;
    }

    /// Orthogonal neighbors of a flat index, clipped at the edges.
    pub(crate) fn neighbor_indices(&self, idx: usize) -> Neighbors {
        let (x, y) = self.coords(idx);
        let mut out = Neighbors::new();
        if y > 0 {
            out.push(idx - self.width);
        }
        if x + 1 < self.width {
            out.push(idx + 1);
        }
        if y + 1 < self.height {
            out.push(idx + self.width);
        }
        if x > 0 {
            out.push(idx - 1);
        }
        out
    }

    /// Diagonal neighbors of a flat index, clipped at the edges.
    pub(crate) fn diagonal_indices(&self, idx: usize) -> Neighbors {
        let (x, y) = self.coords(idx);
        let mut out = Neighbors::new();
        let left = x > 0;
        let right = x + 1 < self.width;
        if y > 0 {
            if left {
                out.push(idx - self.width - 1);
            }
            if right {
                out.push(idx - self.width + 1);
            }
        }
        if y + 1 < self.height {
            if left {
                out.push(idx + self.width - 1);
            }
            if right {
                out.push(idx + self.width + 1);
            }
        }
        out
    }

    /// Returns true if the point touches the board edge.
    pub(crate) fn on_edge(&self, idx: usize) -> bool {
        let (x, y) = self.coords(idx);
        x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
    }
}

/// Widens a dimension for error reporting, saturating at `i64::MAX`.
fn clamp_dimension(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for cell in row {
                let c = match cell {
                    PointState::Empty => '.',
                    PointState::First => 'X',
                    PointState::Second => 'O',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
