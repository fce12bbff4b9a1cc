mod dfs;

pub(crate) use dfs::solve_dfs;

use crate::maze::Coord;

/// Whether a move advanced the search or retracted an earlier step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Forward,
    Undo,
}

/// One step drawn by the solver, between two adjacent cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
    pub kind: MoveKind,
}

/// Outcome of a solve: whether the exit was reached and every move made on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub start: Coord,
    pub reached: bool,
    pub moves: Vec<Move>,
}

impl Solution {
    /// Forward moves as `(from, to)` pairs, in the order they were made.
    pub fn forward_moves(&self) -> impl Iterator<Item = (Coord, Coord)> + '_ {
        self.moves
            .iter()
            .filter(|m| m.kind == MoveKind::Forward)
            .map(|m| (m.from, m.to))
    }

    /// Cells of the trail left after replaying every move, starting with `start`.
    ///
    /// When the exit was reached this is the path from the entrance to the exit.
    pub fn path(&self) -> Vec<Coord> {
        let mut trail = vec![self.start];
        for m in &self.moves {
            match m.kind {
                MoveKind::Forward => trail.push(m.to),
                MoveKind::Undo => {
                    trail.pop();
                }
            }
        }
        trail
    }
}
