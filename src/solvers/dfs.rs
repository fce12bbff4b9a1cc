use super::{Move, MoveKind, Solution};
use crate::{
    maze::{Coord, Direction, Maze},
    surface::DrawingSurface,
};

/// A cell on the search path and the index of the next direction to try from it.
struct Frame {
    coord: Coord,
    next_direction: usize,
}

impl Frame {
    fn new(coord: Coord) -> Self {
        Frame {
            coord,
            next_direction: 0,
        }
    }
}

/// Waits one frame, marks `coord` visited and tells whether it is the goal.
fn enter<S: DrawingSurface>(maze: &mut Maze<S>, coord: Coord, goal: Coord) -> bool {
    maze.animate();
    maze.set_visited(coord, true);
    coord == goal
}

/// The neighbor in `direction` if it is unvisited and the wall towards it is open.
fn open_unvisited<S: DrawingSurface>(
    maze: &Maze<S>,
    coord: Coord,
    direction: Direction,
) -> Option<Coord> {
    maze.neighbor(coord, direction).filter(|&next| {
        // Checked from the neighbor's side of the wall
        !maze[next].is_visited() && !maze[next].has_wall(direction.opposite())
    })
}

/// Depth-first search from the entrance to the exit.
///
/// Directions are tried left, right, up, down. Each step forward is drawn as a route line, and
/// a step whose branch fails to reach the exit is drawn again as a backtrack line. The search
/// stops as soon as the exit is entered. Uses an explicit stack, so deep mazes do not overflow
/// the call stack.
pub(crate) fn solve_dfs<S: DrawingSurface>(maze: &mut Maze<S>) -> Solution {
    let start = (0, 0);
    let mut solution = Solution {
        start,
        reached: false,
        moves: Vec::new(),
    };
    if maze.is_empty() {
        return solution;
    }
    let goal = maze.goal();

    if enter(maze, start, goal) {
        solution.reached = true;
        tracing::debug!("[solve] Entrance is the goal");
        return solution;
    }

    let mut stack = vec![Frame::new(start)];
    while let Some(frame) = stack.last_mut() {
        let current = frame.coord;

        let mut step = None;
        while frame.next_direction < Direction::ALL.len() {
            let direction = Direction::ALL[frame.next_direction];
            frame.next_direction += 1;
            if let Some(next) = open_unvisited(maze, current, direction) {
                step = Some(next);
                break;
            }
        }

        match step {
            Some(next) => {
                maze.draw_move(current, next, false);
                solution.moves.push(Move {
                    from: current,
                    to: next,
                    kind: MoveKind::Forward,
                });
                if enter(maze, next, goal) {
                    solution.reached = true;
                    break;
                }
                stack.push(Frame::new(next));
            }
            None => {
                // Every direction failed, retract the step that led here
                stack.pop();
                if let Some(parent) = stack.last() {
                    let parent = parent.coord;
                    maze.draw_move(parent, current, true);
                    solution.moves.push(Move {
                        from: parent,
                        to: current,
                        kind: MoveKind::Undo,
                    });
                }
            }
        }
    }

    tracing::debug!(
        "[solve] Goal {} after {} moves",
        if solution.reached {
            "reached"
        } else {
            "not reached"
        },
        solution.moves.len()
    );
    solution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        maze::MazeConfig,
        surface::{LineColor, RecordingSurface, SurfaceEvent},
    };

    /// Checks that the moves only cross open walls and that the trail ends at the goal.
    fn assert_valid_solution<S: DrawingSurface>(maze: &Maze<S>, solution: &Solution) {
        let mut trail = vec![solution.start];
        for m in &solution.moves {
            let direction = Direction::ALL
                .into_iter()
                .find(|&d| maze.neighbor(m.from, d) == Some(m.to))
                .expect("moves connect adjacent cells");
            assert!(
                maze.has_passage(m.from, direction),
                "Move {:?} crosses a closed wall",
                m
            );
            match m.kind {
                MoveKind::Forward => {
                    assert_eq!(trail.last(), Some(&m.from), "Forward move is not contiguous");
                    trail.push(m.to);
                }
                MoveKind::Undo => {
                    assert_eq!(trail.pop(), Some(m.to));
                    assert_eq!(trail.last(), Some(&m.from));
                }
            }
        }
        assert_eq!(trail, solution.path());
        assert_eq!(trail.first(), Some(&(0, 0)));
        assert_eq!(trail.last(), Some(&maze.goal()));
    }

    #[test]
    fn test_solve_generated_mazes() {
        for (rows, cols, seed) in [(2, 2, 0), (5, 5, 1), (10, 12, 2), (1, 20, 3), (20, 1, 4), (30, 30, 5)] {
            let mut maze = Maze::new(MazeConfig::new(rows, cols).with_seed(seed)).unwrap();
            let solution = maze.solve_path();
            assert!(solution.reached);
            assert_valid_solution(&maze, &solution);
        }
    }

    #[test]
    fn test_solve_returns_true() {
        let mut maze = Maze::new(MazeConfig::new(12, 16)).unwrap();
        assert!(maze.solve());
    }

    #[test]
    fn test_solve_path_is_simple() {
        let mut maze = Maze::new(MazeConfig::new(9, 9).with_seed(17)).unwrap();
        let path = maze.solve_path().path();
        let mut sorted = path.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), path.len());
    }

    #[test]
    fn test_closed_wall_blocks_solution() {
        let mut maze = Maze::new(MazeConfig::new(1, 3).with_seed(6)).unwrap();
        maze.close_wall((1, 0), Direction::Right);

        let solution = maze.solve_path();
        assert!(!solution.reached);
        assert_eq!(
            solution.moves,
            vec![
                Move {
                    from: (0, 0),
                    to: (1, 0),
                    kind: MoveKind::Forward
                },
                Move {
                    from: (0, 0),
                    to: (1, 0),
                    kind: MoveKind::Undo
                },
            ]
        );
        assert_eq!(solution.path(), vec![(0, 0)]);
    }

    #[test]
    fn test_isolated_goal_is_not_found() {
        let mut maze = Maze::new(MazeConfig::new(4, 4).with_seed(2)).unwrap();
        let goal = maze.goal();
        for direction in Direction::ALL {
            maze.close_wall(goal, direction);
        }
        let solution = maze.solve_path();
        assert!(!solution.reached);
        assert!(!maze[goal].is_visited());
        // Full backtrack: every forward move is retracted
        let undos = solution
            .moves
            .iter()
            .filter(|m| m.kind == MoveKind::Undo)
            .count();
        assert_eq!(undos, solution.forward_moves().count());
        assert_eq!(solution.path(), vec![(0, 0)]);
    }

    #[test]
    fn test_cycles_follow_direction_priority() {
        let mut maze = Maze::new(MazeConfig::new(2, 2).with_seed(0)).unwrap();
        // Open every internal wall, giving a cycle
        maze.open_wall((0, 0), Direction::Right);
        maze.open_wall((0, 0), Direction::Down);
        maze.open_wall((1, 0), Direction::Down);
        maze.open_wall((0, 1), Direction::Right);

        let solution = maze.solve_path();
        assert!(solution.reached);
        // Right is tried before down
        assert_eq!(solution.path(), vec![(0, 0), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_solve_again_after_reset() {
        let mut maze = Maze::new(MazeConfig::new(6, 6).with_seed(12)).unwrap();
        let first = maze.solve_path();
        assert!(!maze.solve());
        maze.reset_visited();
        let second = maze.solve_path();
        assert_eq!(first, second);
    }

    #[test]
    fn test_solve_draws_moves() {
        let mut maze = Maze::with_surface(
            MazeConfig::new(7, 7).with_seed(31),
            RecordingSurface::new(),
        )
        .unwrap();
        maze.surface_mut().clear();

        let solution = maze.solve_path();
        let surface = maze.surface();
        let lines = surface.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), solution.moves.len());
        for ((line, color), m) in lines.iter().zip(&solution.moves) {
            let expected = match m.kind {
                MoveKind::Forward => LineColor::Route,
                MoveKind::Undo => LineColor::Backtrack,
            };
            assert_eq!(*color, expected);
            assert_eq!(Some(line.start), maze[m.from].center());
            assert_eq!(Some(line.end), maze[m.to].center());
        }

        // One frame per entered cell: the entrance plus each forward move
        assert_eq!(
            surface.redraw_count(),
            1 + solution.forward_moves().count()
        );
        // Each move line follows the frame of the cell it leaves
        assert_eq!(surface.events().first(), Some(&SurfaceEvent::Redraw));
    }
}
