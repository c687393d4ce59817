//! Cell code to direction-set lookup, and the two-sided move check.

use std::borrow::Cow;
use std::fmt;

use maze_core::{Cell, Direction, DirectionSet, MazeGrid, Position};

/// A cell code with no entry in the passability table was found.
///
/// This means the maze data is malformed; it is never a plain wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigurationError {
    pub code: Cell,
    pub pos: Position,
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "undefined cell code {} at {}: no passability entry",
            self.code, self.pos
        )
    }
}

impl std::error::Error for ConfigurationError {}

/// Number of codes defined by [`STANDARD`].
pub const STANDARD_CODES: u32 = 16;

const fn wall_mask_entries() -> [(Cell, DirectionSet); STANDARD_CODES as usize] {
    let mut t = [(Cell(0), DirectionSet::NONE); STANDARD_CODES as usize];
    let mut code = 0;
    while code < STANDARD_CODES {
        // Set bits are walls; passage is the complement.
        t[code as usize] = (Cell(code), DirectionSet(!(code as u8) & DirectionSet::ALL.0));
        code += 1;
    }
    t
}

static WALL_MASKS: [(Cell, DirectionSet); STANDARD_CODES as usize] = wall_mask_entries();

/// The standard table: codes `0..16` are 4-bit wall masks.
///
/// Bit 1 closes up, 2 closes down, 4 closes right and 8 closes left. Code `0`
/// is fully open, code `7` only opens to the left and code `15` is sealed.
pub static STANDARD: PassabilityTable = PassabilityTable {
    entries: Cow::Borrowed(&WALL_MASKS),
};

/// Mapping from cell code to the directions through which such a cell may be
/// crossed.
///
/// Entries are kept sorted by code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassabilityTable {
    entries: Cow<'static, [(Cell, DirectionSet)]>,
}

impl Default for PassabilityTable {
    fn default() -> Self {
        STANDARD.clone()
    }
}

impl PassabilityTable {
    /// Build a custom table. Codes not listed are undefined; a repeated code
    /// keeps its last entry.
    pub fn from_entries<C: Into<Cell>>(entries: impl IntoIterator<Item = (C, DirectionSet)>) -> Self {
        let mut v: Vec<(Cell, DirectionSet)> =
            entries.into_iter().map(|(c, s)| (c.into(), s)).collect();
        // Stable sort, then keep the last of each run of equal codes.
        v.sort_by_key(|&(c, _)| c);
        let mut out: Vec<(Cell, DirectionSet)> = Vec::with_capacity(v.len());
        for e in v {
            match out.last_mut() {
                Some(last) if last.0 == e.0 => *last = e,
                _ => out.push(e),
            }
        }
        Self {
            entries: Cow::Owned(out),
        }
    }

    /// Directions permitted by `cell`, or `None` if the code is undefined.
    #[inline]
    pub fn get(&self, cell: Cell) -> Option<DirectionSet> {
        self.entries
            .binary_search_by_key(&cell, |&(c, _)| c)
            .ok()
            .map(|i| self.entries[i].1)
    }

    /// Whether `cell` has an entry.
    #[inline]
    pub fn defines(&self, cell: Cell) -> bool {
        self.get(cell).is_some()
    }

    /// Number of defined codes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no code is defined.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(code, permitted)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, DirectionSet)> + '_ {
        self.entries.iter().copied()
    }

    /// Permitted set of the cell at `pos`. `Ok(None)` when `pos` is off the
    /// grid.
    fn permitted_at(
        &self,
        grid: &MazeGrid,
        pos: Position,
    ) -> Result<Option<DirectionSet>, ConfigurationError> {
        let Some(code) = grid.at(pos) else {
            return Ok(None);
        };
        match self.get(code) {
            Some(set) => Ok(Some(set)),
            None => Err(ConfigurationError { code, pos }),
        }
    }

    /// Whether moving from `pos` one step in direction `d` is legal.
    ///
    /// The source cell must permit leaving through `d` and the destination
    /// must permit entering from `d.opposite()`. A destination outside the
    /// grid is never legal. An undefined code at either endpoint is an error.
    pub fn is_valid_move(
        &self,
        grid: &MazeGrid,
        pos: Position,
        d: Direction,
    ) -> Result<bool, ConfigurationError> {
        let Some(from) = self.permitted_at(grid, pos)? else {
            return Ok(false);
        };
        if !from.allows(d) {
            return Ok(false);
        }
        let Some(to) = self.permitted_at(grid, pos.step(d))? else {
            return Ok(false);
        };
        Ok(to.allows(d.opposite()))
    }

    /// Check that every cell in `grid` has an entry, reporting the first
    /// undefined one in row-major order.
    pub fn validate(&self, grid: &MazeGrid) -> Result<(), ConfigurationError> {
        match grid.iter().find(|&(_, c)| !self.defines(c)) {
            Some((pos, code)) => Err(ConfigurationError { code, pos }),
            None => Ok(()),
        }
    }
}

/// Check a move against the [`STANDARD`] table.
pub fn is_valid_move(
    grid: &MazeGrid,
    pos: Position,
    d: Direction,
) -> Result<bool, ConfigurationError> {
    STANDARD.is_valid_move(grid, pos, d)
}
