//! Geometry primitives: [`Position`], [`Direction`], [`DirectionSet`] and
//! [`Bounds`].
//!
//! Positions are `(row, col)` pairs. Rows grow downward and columns grow to
//! the right, so [`Direction::Up`] decrements the row.

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A `(row, col)` cell coordinate.
///
/// Components are signed so that out-of-range coordinates can be expressed
/// and rejected by a bounds check instead of wrapping.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return the position shifted by `(drow, dcol)`.
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The adjacent position one unit step in direction `d`.
    #[inline]
    pub const fn step(self, d: Direction) -> Self {
        let (drow, dcol) = d.delta();
        self.shift(drow, dcol)
    }

    /// Whether the position lies inside `b`.
    #[inline]
    pub fn in_bounds(self, b: &Bounds) -> bool {
        b.contains(self)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the four cardinal moves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in search order. The order fixes the tie-break between
    /// equal-length paths.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit `(drow, dcol)` delta.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// The direction pointing back the way this one came.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Lowercase name, as used on the wire.
    pub const fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    #[inline]
    const fn bit(self) -> u8 {
        match self {
            Direction::Up => 1 << 0,
            Direction::Down => 1 << 1,
            Direction::Right => 1 << 2,
            Direction::Left => 1 << 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown direction name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError(String);

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown direction \u{201c}{}\u{201d} (expected up, down, left or right)",
            self.0
        )
    }
}

impl std::error::Error for ParseDirectionError {}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// DirectionSet
// ---------------------------------------------------------------------------

/// Bitmask of directions through which a cell allows passage.
///
/// The bit layout matches the wall mask of the standard cell codes: bit 0 is
/// up, bit 1 down, bit 2 right and bit 3 left.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectionSet(pub u8);

impl DirectionSet {
    pub const NONE: Self = Self(0);
    pub const UP: Self = Self(Direction::Up.bit());
    pub const DOWN: Self = Self(Direction::Down.bit());
    pub const RIGHT: Self = Self(Direction::Right.bit());
    pub const LEFT: Self = Self(Direction::Left.bit());
    pub const ALL: Self = Self(0b1111);

    /// Set containing a single direction.
    #[inline]
    pub const fn only(d: Direction) -> Self {
        Self(d.bit())
    }

    /// Whether direction `d` is in the set.
    #[inline]
    pub const fn allows(self, d: Direction) -> bool {
        self.0 & d.bit() != 0
    }

    /// Whether this set contains all the bits from `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether the set is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 & Self::ALL.0 == 0
    }

    /// Return the set with `d` added.
    #[inline]
    pub const fn with(self, d: Direction) -> Self {
        Self(self.0 | d.bit())
    }

    /// Iterate the member directions in search order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |&d| self.allows(d))
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

impl BitOr for DirectionSet {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for DirectionSet {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for DirectionSet {
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        Self(!self.0 & Self::ALL.0)
    }
}

impl fmt::Display for DirectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, d) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(d.name())?;
        }
        f.write_str("}")
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// The extent of a grid: positions with `0 <= row < rows` and
/// `0 <= col < cols`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub rows: i32,
    pub cols: i32,
}

impl Bounds {
    /// Create bounds of the given size. Negative extents clamp to zero.
    #[inline]
    pub const fn new(rows: i32, cols: i32) -> Self {
        Self {
            rows: if rows < 0 { 0 } else { rows },
            cols: if cols < 0 { 0 } else { cols },
        }
    }

    /// Total number of cells.
    #[inline]
    pub const fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.rows as usize) * (self.cols as usize)
    }

    /// Whether the bounds contain no cells.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.rows <= 0 || self.cols <= 0
    }

    /// Whether `p` is inside the bounds.
    #[inline]
    pub const fn contains(self, p: Position) -> bool {
        0 <= p.row && p.row < self.rows && 0 <= p.col && p.col < self.cols
    }

    /// Row-major flat index of `p`, or `None` when out of bounds.
    #[inline]
    pub const fn index(self, p: Position) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.row as usize) * (self.cols as usize) + (p.col as usize))
    }

    /// Inverse of [`index`](Self::index). `i` must be below [`len`](Self::len).
    #[inline]
    pub const fn position(self, i: usize) -> Position {
        let cols = self.cols as usize;
        Position::new((i / cols) as i32, (i % cols) as i32)
    }

    /// Row-major iterator over every position.
    #[inline]
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            next: 0,
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Position;
    type IntoIter = BoundsIter;
    #[inline]
    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Row-major iterator over the positions in a [`Bounds`].
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds,
    next: usize,
}

impl Iterator for BoundsIter {
    type Item = Position;

    #[inline]
    fn next(&mut self) -> Option<Position> {
        if self.next >= self.bounds.len() {
            return None;
        }
        let p = self.bounds.position(self.next);
        self.next += 1;
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bounds.len().saturating_sub(self.next);
        (n, Some(n))
    }
}

impl ExactSizeIterator for BoundsIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn step_applies_unit_delta() {
        let p = Position::new(2, 3);
        assert_eq!(p.step(Direction::Up), Position::new(1, 3));
        assert_eq!(p.step(Direction::Down), Position::new(3, 3));
        assert_eq!(p.step(Direction::Left), Position::new(2, 2));
        assert_eq!(p.step(Direction::Right), Position::new(2, 4));
    }

    #[test]
    fn opposite_is_an_involution_and_undoes_step() {
        for d in Direction::ALL {
            assert_ne!(d, d.opposite());
            assert_eq!(d.opposite().opposite(), d);
            let p = Position::new(5, 5);
            assert_eq!(p.step(d).step(d.opposite()), p);
        }
    }

    #[test]
    fn direction_names_parse_back() {
        for d in Direction::ALL {
            assert_eq!(d.to_string().parse::<Direction>(), Ok(d));
        }
        assert_eq!(" Left ".parse::<Direction>(), Ok(Direction::Left));
        assert!("north".parse::<Direction>().is_err());
    }

    #[test]
    fn direction_set_membership() {
        let s = DirectionSet::UP | DirectionSet::LEFT;
        assert!(s.allows(Direction::Up));
        assert!(s.allows(Direction::Left));
        assert!(!s.allows(Direction::Down));
        assert!(!s.allows(Direction::Right));
        assert!(s.contains(DirectionSet::UP));
        assert!(!s.contains(DirectionSet::ALL));
        assert_eq!(s.iter().collect::<Vec<_>>(), [Direction::Up, Direction::Left]);
    }

    #[test]
    fn direction_set_complement_stays_in_four_bits() {
        assert_eq!(!DirectionSet::ALL, DirectionSet::NONE);
        assert_eq!(!DirectionSet::NONE, DirectionSet::ALL);
        let s: DirectionSet = [Direction::Down, Direction::Right].into_iter().collect();
        assert_eq!(!s, DirectionSet::UP | DirectionSet::LEFT);
        assert!(DirectionSet(0b1_0000).is_empty());
    }

    #[test]
    fn direction_set_display() {
        assert_eq!(DirectionSet::ALL.to_string(), "{up, down, left, right}");
        assert_eq!(DirectionSet::NONE.to_string(), "{}");
    }

    #[test]
    fn bounds_contains_half_open() {
        let b = Bounds::new(2, 3);
        assert!(b.contains(Position::new(0, 0)));
        assert!(b.contains(Position::new(1, 2)));
        assert!(!b.contains(Position::new(2, 0)));
        assert!(!b.contains(Position::new(0, 3)));
        assert!(!b.contains(Position::new(-1, 0)));
        assert!(!b.contains(Position::new(0, -1)));
    }

    #[test]
    fn bounds_index_round_trips() {
        let b = Bounds::new(3, 4);
        for (i, p) in b.iter().enumerate() {
            assert_eq!(b.index(p), Some(i));
            assert_eq!(b.position(i), p);
        }
        assert_eq!(b.index(Position::new(3, 0)), None);
    }

    #[test]
    fn bounds_iter_is_row_major() {
        let pts: Vec<_> = Bounds::new(2, 3).iter().collect();
        assert_eq!(pts.len(), 6);
        assert_eq!(pts[0], Position::new(0, 0));
        assert_eq!(pts[3], Position::new(1, 0));
        assert_eq!(pts[5], Position::new(1, 2));
        let unique: HashSet<_> = pts.into_iter().collect();
        assert_eq!(unique.len(), 6);
    }

    #[test]
    fn empty_bounds() {
        let b = Bounds::new(0, 5);
        assert!(b.is_empty());
        assert_eq!(b.len(), 0);
        assert_eq!(b.iter().count(), 0);
        assert!(!b.contains(Position::ZERO));
        assert_eq!(Bounds::new(-2, 4), Bounds::new(0, 4));
    }
}
