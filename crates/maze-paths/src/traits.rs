use maze_core::{Direction, Position};

use crate::passability::ConfigurationError;

/// Minimal pathfinding interface: enumerates legal moves.
pub trait Pather {
    /// Append every legal `(direction, destination)` out of `p` into `buf`,
    /// in the order of [`Direction::ALL`]. The caller clears `buf` before
    /// calling.
    fn moves(
        &self,
        p: Position,
        buf: &mut Vec<(Direction, Position)>,
    ) -> Result<(), ConfigurationError>;
}
