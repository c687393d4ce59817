//! Replaying move sequences.

use maze_core::{Direction, Position};

/// Every position visited when playing `moves` from `start`, start first.
///
/// No legality or bounds checks are made; this only applies deltas.
pub fn replay(start: Position, moves: &[Direction]) -> Vec<Position> {
    let mut out = Vec::with_capacity(moves.len() + 1);
    out.push(start);
    let mut p = start;
    for &d in moves {
        p = p.step(d);
        out.push(p);
    }
    out
}

/// The position reached after playing `moves` from `start`.
pub fn destination(start: Position, moves: &[Direction]) -> Position {
    moves.iter().fold(start, |p, &d| p.step(d))
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::{Down, Left, Right, Up};

    #[test]
    fn replay_lists_each_step() {
        let trail = replay(Position::new(1, 1), &[Right, Down, Left]);
        assert_eq!(
            trail,
            [
                Position::new(1, 1),
                Position::new(1, 2),
                Position::new(2, 2),
                Position::new(2, 1),
            ]
        );
    }

    #[test]
    fn empty_sequence_stays_put() {
        let p = Position::new(4, 2);
        assert_eq!(replay(p, &[]), [p]);
        assert_eq!(destination(p, &[]), p);
    }

    #[test]
    fn destination_matches_last_replayed_position() {
        let moves = [Up, Up, Left, Down, Right, Right];
        let start = Position::new(5, 5);
        assert_eq!(destination(start, &moves), Position::new(4, 6));
        assert_eq!(replay(start, &moves).last(), Some(&destination(start, &moves)));
    }
}
