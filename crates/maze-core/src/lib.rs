//! **maze-core** — core types for directional mazes.
//!
//! This crate provides the foundational types shared by the maze solver:
//! cell coordinates, the four move directions and their opposite pairs,
//! direction sets, and an immutable grid of cell codes.

pub mod geom;
pub mod grid;

pub use geom::{Bounds, Direction, DirectionSet, ParseDirectionError, Position};
pub use grid::{Cell, GridError, MazeGrid};
