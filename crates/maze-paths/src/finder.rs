use std::collections::VecDeque;
use std::fmt;

use maze_core::{Bounds, Direction, Position};

use crate::passability::ConfigurationError;

/// A position with its move count from the nearest source, returned by
/// distance map queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Position,
    pub cost: i32,
}

/// Sentinel value meaning "unreachable" in distance maps.
pub const UNREACHABLE: i32 = i32::MAX;

/// Errors from a cancellable search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The grid holds a code the table does not define.
    Configuration(ConfigurationError),
    /// The cancel flag was raised before the search finished.
    Cancelled,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(e) => e.fmt(f),
            Self::Cancelled => f.write_str("search cancelled"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Configuration(e) => Some(e),
            Self::Cancelled => None,
        }
    }
}

impl From<ConfigurationError> for SearchError {
    fn from(e: ConfigurationError) -> Self {
        Self::Configuration(e)
    }
}

// ---------------------------------------------------------------------------
// Internal predecessor record for BFS searches
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) parent: usize,
    pub(crate) via: Direction,
    pub(crate) generation: u32,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            parent: usize::MAX,
            via: Direction::Up,
            generation: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// PathFinder
// ---------------------------------------------------------------------------

/// Reusable search state for one grid extent.
///
/// `PathFinder` owns the frontier queue, the predecessor records and the
/// distance map, so repeated queries incur no allocations after the first
/// use. A search only ever visits positions inside the finder's bounds.
pub struct PathFinder {
    pub(crate) bounds: Bounds,
    // BFS path caches
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) queue: VecDeque<usize>,
    pub(crate) expanded: usize,
    // distance map caches
    pub(crate) dist_map: Vec<i32>,
    pub(crate) dist_results: Vec<PathNode>,
    // shared scratch buffer for move queries
    pub(crate) mbuf: Vec<(Direction, Position)>,
}

impl PathFinder {
    /// Create a new `PathFinder` for the given extent.
    pub fn new(bounds: Bounds) -> Self {
        let len = bounds.len();
        Self {
            bounds,
            nodes: vec![Node::default(); len],
            generation: 0,
            queue: VecDeque::new(),
            expanded: 0,
            dist_map: vec![UNREACHABLE; len],
            dist_results: Vec::new(),
            mbuf: Vec::with_capacity(4),
        }
    }

    /// Replace the extent, reallocating caches only when it grows past
    /// their capacity.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        let new_len = bounds.len();
        self.bounds = bounds;
        self.dist_results.clear();
        self.queue.clear();

        if new_len <= self.nodes.len() {
            // Stale records are ignored once the generation moves on.
            self.next_generation();
            for v in self.dist_map.iter_mut() {
                *v = UNREACHABLE;
            }
            return;
        }

        self.nodes.clear();
        self.nodes.resize(new_len, Node::default());
        self.generation = 0;
        self.dist_map.clear();
        self.dist_map.resize(new_len, UNREACHABLE);
    }

    /// The extent being searched.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of positions expanded by the last path search.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Advance the generation stamp, clearing all records on wrap-around so
    /// that generation 0 always means "never visited".
    pub(crate) fn next_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            for n in self.nodes.iter_mut() {
                *n = Node::default();
            }
            self.generation = 1;
        }
        self.generation
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a position to a flat index. Returns `None` if out of bounds.
    #[inline]
    pub(crate) fn idx(&self, p: Position) -> Option<usize> {
        self.bounds.index(p)
    }

    /// Convert a flat index back to a position.
    #[inline]
    pub(crate) fn pos(&self, idx: usize) -> Position {
        self.bounds.position(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_bounds_smaller_preserves_capacity() {
        let mut pf = PathFinder::new(Bounds::new(20, 20));
        let original_cap = pf.nodes.len();

        let small = Bounds::new(5, 5);
        pf.set_bounds(small);
        assert_eq!(pf.bounds(), small);
        assert_eq!(pf.nodes.len(), original_cap);
        assert!(pf.generation > 0);
    }

    #[test]
    fn set_bounds_larger_reallocates() {
        let mut pf = PathFinder::new(Bounds::new(5, 5));
        let old_cap = pf.nodes.len();

        let big = Bounds::new(20, 20);
        pf.set_bounds(big);
        assert_eq!(pf.bounds(), big);
        assert!(pf.nodes.len() > old_cap);
        assert_eq!(pf.nodes.len(), 400);
        assert_eq!(pf.dist_map.len(), 400);
    }

    #[test]
    fn generation_wrap_clears_records() {
        let mut pf = PathFinder::new(Bounds::new(2, 2));
        pf.generation = u32::MAX;
        pf.nodes[3].generation = u32::MAX;
        pf.nodes[3].parent = 0;
        assert_eq!(pf.next_generation(), 1);
        assert_eq!(pf.nodes[3].generation, 0);
        assert_eq!(pf.nodes[3].parent, usize::MAX);
    }

    #[test]
    fn index_helpers() {
        let pf = PathFinder::new(Bounds::new(3, 4));
        assert_eq!(pf.idx(Position::new(1, 2)), Some(6));
        assert_eq!(pf.pos(6), Position::new(1, 2));
        assert_eq!(pf.idx(Position::new(3, 0)), None);
    }

    #[test]
    fn search_error_wraps_configuration_error() {
        use maze_core::Cell;
        let e = ConfigurationError {
            code: Cell(40),
            pos: Position::new(2, 1),
        };
        let s: SearchError = e.into();
        assert_eq!(s, SearchError::Configuration(e));
        assert_eq!(s.to_string(), e.to_string());
        assert_eq!(SearchError::Cancelled.to_string(), "search cancelled");
    }
}
