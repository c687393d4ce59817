//! A grid paired with the table that interprets its codes.

use maze_core::{Direction, MazeGrid, Position};

use crate::finder::PathFinder;
use crate::passability::{ConfigurationError, PassabilityTable, STANDARD};
use crate::traits::Pather;

/// A [`MazeGrid`] read through a [`PassabilityTable`].
///
/// Both are borrowed immutably, so a `Maze` is `Copy` and can be shared
/// across threads.
#[derive(Debug, Clone, Copy)]
pub struct Maze<'a> {
    grid: &'a MazeGrid,
    table: &'a PassabilityTable,
}

impl<'a> Maze<'a> {
    /// Pair `grid` with a custom table.
    pub fn new(grid: &'a MazeGrid, table: &'a PassabilityTable) -> Self {
        Self { grid, table }
    }

    /// Pair `grid` with the [`STANDARD`] table.
    pub fn standard(grid: &'a MazeGrid) -> Self {
        Self::new(grid, &STANDARD)
    }

    /// The underlying grid.
    pub fn grid(&self) -> &'a MazeGrid {
        self.grid
    }

    /// The table used to interpret codes.
    pub fn table(&self) -> &'a PassabilityTable {
        self.table
    }

    /// Whether moving from `pos` in direction `d` is legal.
    pub fn is_valid_move(&self, pos: Position, d: Direction) -> Result<bool, ConfigurationError> {
        self.table.is_valid_move(self.grid, pos, d)
    }

    /// Shortest move sequence from `start` to `goal`, or `None` when the goal
    /// cannot be reached. Allocates a fresh [`PathFinder`].
    pub fn find_path(
        &self,
        start: Position,
        goal: Position,
    ) -> Result<Option<Vec<Direction>>, ConfigurationError> {
        PathFinder::new(self.grid.bounds()).find_path(self, start, goal)
    }
}

impl Pather for Maze<'_> {
    fn moves(
        &self,
        p: Position,
        buf: &mut Vec<(Direction, Position)>,
    ) -> Result<(), ConfigurationError> {
        for d in Direction::ALL {
            if self.is_valid_move(p, d)? {
                buf.push((d, p.step(d)));
            }
        }
        Ok(())
    }
}

/// Shortest move sequence from `start` to `goal` under the [`STANDARD`]
/// table.
///
/// Returns `Ok(None)` when either endpoint lies outside the grid or no
/// sequence of legal moves connects them, and `Ok(Some(vec![]))` when
/// `start == goal`. Among equally short paths the one found first when
/// trying up, down, left, right in that order wins.
pub fn find_path(
    grid: &MazeGrid,
    start: Position,
    goal: Position,
) -> Result<Option<Vec<Direction>>, ConfigurationError> {
    Maze::standard(grid).find_path(start, goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::{Cell, DirectionSet};

    #[test]
    fn moves_follow_search_order() {
        let g = MazeGrid::filled(3, 3, Cell(0));
        let maze = Maze::standard(&g);
        let mut buf = Vec::new();
        maze.moves(Position::new(1, 1), &mut buf).unwrap();
        assert_eq!(
            buf,
            [
                (Direction::Up, Position::new(0, 1)),
                (Direction::Down, Position::new(2, 1)),
                (Direction::Left, Position::new(1, 0)),
                (Direction::Right, Position::new(1, 2)),
            ]
        );
    }

    #[test]
    fn moves_from_a_corner_stay_in_bounds() {
        let g = MazeGrid::filled(2, 2, Cell(0));
        let mut buf = Vec::new();
        Maze::standard(&g).moves(Position::ZERO, &mut buf).unwrap();
        assert_eq!(
            buf,
            [
                (Direction::Down, Position::new(1, 0)),
                (Direction::Right, Position::new(0, 1)),
            ]
        );
    }

    #[test]
    fn custom_table_changes_the_answer() {
        // Under the standard table 7 only opens left, so nothing connects.
        let g = MazeGrid::filled(1, 3, Cell(7));
        assert_eq!(find_path(&g, Position::ZERO, Position::new(0, 2)), Ok(None));

        let corridor = PassabilityTable::from_entries([(7u32, DirectionSet::LEFT | DirectionSet::RIGHT)]);
        let maze = Maze::new(&g, &corridor);
        assert_eq!(
            maze.find_path(Position::ZERO, Position::new(0, 2)),
            Ok(Some(vec![Direction::Right, Direction::Right]))
        );
    }

    #[test]
    fn maze_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Maze<'static>>();
    }
}
