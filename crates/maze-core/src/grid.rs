//! The [`MazeGrid`] type: an immutable rectangular grid of cell codes.
//!
//! A [`Cell`] is a newtype over `u32` naming a cell's wall configuration.
//! What each code permits is decided by a passability table, not here.

use std::fmt;

use crate::geom::{Bounds, BoundsIter, Position};

/// A maze cell code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Cell(pub u32);

impl Cell {
    /// Create a new cell with the given code.
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// Get the underlying code.
    pub const fn code(self) -> u32 {
        self.0
    }
}

impl From<u32> for Cell {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl From<Cell> for u32 {
    fn from(c: Cell) -> Self {
        c.0
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur when building a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A row's length differs from the first row's.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// The grid does not fit in `i32` coordinates.
    TooLarge { rows: usize, cols: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid: row {row} has {found} cells, expected {expected}"
            ),
            Self::TooLarge { rows, cols } => {
                write!(f, "grid: {rows}x{cols} exceeds the addressable size")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// A rectangular, read-only grid of [`Cell`] codes.
///
/// The grid never changes after construction, so it can be shared freely
/// between threads and searched concurrently.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")
)]
pub struct MazeGrid {
    cells: Vec<Cell>,
    bounds: Bounds,
}

impl MazeGrid {
    /// Build a grid from rows of codes. All rows must have the same length.
    ///
    /// Zero rows, or rows of zero length, give an empty grid.
    pub fn from_rows<R, C>(rows: R) -> Result<Self, GridError>
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        let mut cells = Vec::new();
        let mut width: Option<usize> = None;
        let mut nrows = 0usize;
        for (i, row) in rows.into_iter().enumerate() {
            let before = cells.len();
            cells.extend(row.into_iter().map(Into::into));
            let found = cells.len() - before;
            match width {
                None => width = Some(found),
                Some(expected) if expected != found => {
                    return Err(GridError::Ragged {
                        row: i,
                        expected,
                        found,
                    });
                }
                Some(_) => {}
            }
            nrows += 1;
        }
        let ncols = width.unwrap_or(0);
        let (Ok(r), Ok(c)) = (i32::try_from(nrows), i32::try_from(ncols)) else {
            return Err(GridError::TooLarge {
                rows: nrows,
                cols: ncols,
            });
        };
        if ncols == 0 {
            cells.clear();
        }
        Ok(Self {
            cells,
            bounds: Bounds::new(r, c),
        })
    }

    /// Create a `rows x cols` grid where every cell holds `cell`.
    pub fn filled(rows: i32, cols: i32, cell: Cell) -> Self {
        let bounds = Bounds::new(rows, cols);
        Self {
            cells: vec![cell; bounds.len()],
            bounds,
        }
    }

    /// The grid extent.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols
    }

    /// Whether the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Position) -> bool {
        self.bounds.contains(p)
    }

    /// Get the cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Position) -> Option<Cell> {
        self.bounds.index(p).map(|i| self.cells[i])
    }

    /// Return a copy of this grid with the cell at `p` replaced. Out-of-bounds
    /// positions leave the copy unchanged.
    pub fn with_cell(&self, p: Position, cell: Cell) -> Self {
        let mut g = self.clone();
        if let Some(i) = g.bounds.index(p) {
            g.cells[i] = cell;
        }
        g
    }

    /// Row-major iterator over `(Position, Cell)` pairs.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter {
            grid: self,
            inner: self.bounds.iter(),
        }
    }

    /// The grid as nested rows of cells.
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        if self.bounds.cols == 0 {
            return vec![Vec::new(); self.bounds.rows as usize];
        }
        self.cells
            .chunks(self.bounds.cols as usize)
            .map(<[Cell]>::to_vec)
            .collect()
    }
}

impl TryFrom<Vec<Vec<Cell>>> for MazeGrid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        Self::from_rows(rows)
    }
}

impl From<MazeGrid> for Vec<Vec<Cell>> {
    fn from(g: MazeGrid) -> Self {
        g.to_rows()
    }
}

/// Iterator over `(Position, Cell)` pairs in a [`MazeGrid`].
pub struct GridIter<'a> {
    grid: &'a MazeGrid,
    inner: BoundsIter,
}

impl Iterator for GridIter<'_> {
    type Item = (Position, Cell);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let p = self.inner.next()?;
        Some((p, self.grid.at(p)?))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a MazeGrid {
    type Item = (Position, Cell);
    type IntoIter = GridIter<'a>;

    fn into_iter(self) -> GridIter<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_and_at() {
        let g = MazeGrid::from_rows([[0u32, 1, 2], [3, 4, 5]]).unwrap();
        assert_eq!(g.bounds(), Bounds::new(2, 3));
        assert_eq!(g.at(Position::new(0, 0)), Some(Cell(0)));
        assert_eq!(g.at(Position::new(1, 2)), Some(Cell(5)));
        assert_eq!(g.at(Position::new(2, 0)), None);
        assert_eq!(g.at(Position::new(0, -1)), None);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = MazeGrid::from_rows(vec![vec![0u32, 0], vec![0]]).unwrap_err();
        assert_eq!(
            err,
            GridError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            }
        );
        assert_eq!(err.to_string(), "grid: row 1 has 1 cells, expected 2");
    }

    #[test]
    fn empty_grids() {
        let none = MazeGrid::from_rows(Vec::<Vec<u32>>::new()).unwrap();
        assert!(none.is_empty());
        assert_eq!(none.iter().count(), 0);

        let zero_width = MazeGrid::from_rows(vec![Vec::<u32>::new(), Vec::new()]).unwrap();
        assert!(zero_width.is_empty());
        assert_eq!(zero_width.rows(), 2);
        assert_eq!(zero_width.at(Position::ZERO), None);
        assert_eq!(zero_width.to_rows().len(), 2);
    }

    #[test]
    fn filled_and_with_cell() {
        let g = MazeGrid::filled(2, 2, Cell(7));
        assert!(g.iter().all(|(_, c)| c == Cell(7)));
        let h = g.with_cell(Position::new(1, 0), Cell(0));
        assert_eq!(h.at(Position::new(1, 0)), Some(Cell(0)));
        // original untouched
        assert_eq!(g.at(Position::new(1, 0)), Some(Cell(7)));
        assert_eq!(g.with_cell(Position::new(9, 9), Cell(0)), g);
    }

    #[test]
    fn to_rows_preserves_layout() {
        let rows = vec![vec![Cell(1), Cell(2)], vec![Cell(3), Cell(4)]];
        let g = MazeGrid::try_from(rows.clone()).unwrap();
        assert_eq!(g.to_rows(), rows);
    }

    #[test]
    fn grid_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MazeGrid>();
    }
}
