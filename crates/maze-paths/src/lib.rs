//! Shortest paths through directional mazes.
//!
//! Each maze cell carries a code, and a [`PassabilityTable`] maps codes to
//! the directions through which the cell may be crossed. A move between two
//! adjacent cells is legal only when both sides agree: the source permits
//! leaving in that direction and the destination permits entering from the
//! opposite one.
//!
//! - **Move check** ([`is_valid_move`], [`PassabilityTable::is_valid_move`])
//! - **Shortest path** by breadth-first search ([`find_path`],
//!   [`PathFinder::find_path`], [`PathFinder::find_path_cancellable`])
//! - **Distance maps** from one or more sources ([`PathFinder::distance_map`])
//! - **Replay** of a move sequence ([`replay`], [`destination`])
//!
//! [`PathFinder`] owns and reuses its internal caches so that repeated
//! queries incur no allocations after warm-up. The free [`find_path`] builds
//! a throwaway finder, which makes it safe to call from many threads on the
//! same grid.
//!
//! An undefined cell code is reported as a [`ConfigurationError`]; an
//! unreachable goal is `Ok(None)`.

mod bfs;
mod finder;
mod maze;
mod passability;
mod path;
mod traits;

pub use finder::{PathFinder, PathNode, SearchError, UNREACHABLE};
pub use maze::{Maze, find_path};
pub use passability::{
    ConfigurationError, PassabilityTable, STANDARD, STANDARD_CODES, is_valid_move,
};
pub use path::{destination, replay};
pub use traits::Pather;
