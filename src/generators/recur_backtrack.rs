use rand::Rng;

use crate::{
    maze::{Coord, Direction, Maze},
    surface::DrawingSurface,
};

/// Carves a perfect maze with the randomized recursive backtracker, starting at `start`.
///
/// Every cell reachable from `start` is left visited. The recursion is run on an explicit stack:
/// the top of the stack is the cell being carved, and a cell is popped (and rendered as final)
/// once none of its neighbors is left unvisited.
pub(crate) fn recursive_backtrack<S: DrawingSurface>(maze: &mut Maze<S>, start: Coord) {
    if !maze.is_in_bounds(start) {
        return;
    }

    maze.set_visited(start, true);
    let mut stack = vec![start];
    let mut carved = 0usize;

    while let Some(&cell) = stack.last() {
        let candidates = Direction::ALL
            .into_iter()
            .filter_map(|direction| {
                maze.neighbor(cell, direction)
                    .map(|neighbor| (direction, neighbor))
            })
            .filter(|&(_, neighbor)| !maze[neighbor].is_visited())
            .collect::<Vec<_>>();

        if candidates.is_empty() {
            // Dead end, show the cell as finished and backtrack
            maze.draw_cell(cell);
            stack.pop();
            continue;
        }

        let idx = maze.rng_mut().random_range(0..candidates.len());
        let (direction, neighbor) = candidates[idx];
        maze.open_wall(cell, direction);
        carved += 1;
        tracing::trace!("[carve] {:?} -> {:?} ({:?})", cell, neighbor, direction);

        maze.set_visited(neighbor, true);
        stack.push(neighbor);
    }

    tracing::debug!("[carve] Opened {} walls from {:?}", carved, start);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::MazeConfig;

    #[test]
    fn test_recursive_backtrack_from_any_start() {
        let mut maze = Maze::new(MazeConfig::new(6, 7).with_seed(21)).unwrap();
        // Close every internal wall again
        for x in 0..maze.num_cols() {
            for y in 0..maze.num_rows() {
                maze.close_wall((x, y), Direction::Right);
                maze.close_wall((x, y), Direction::Down);
            }
        }

        recursive_backtrack(&mut maze, (3, 3));
        assert!(
            maze.columns()
                .flat_map(|column| column.iter())
                .all(|cell| cell.is_visited())
        );
        let open = (0..maze.num_cols())
            .flat_map(|x| (0..maze.num_rows()).map(move |y| (x, y)))
            .map(|coord| {
                [Direction::Right, Direction::Down]
                    .into_iter()
                    .filter(|&d| maze.has_passage(coord, d))
                    .count()
            })
            .sum::<usize>();
        assert_eq!(open, 6 * 7 - 1);
    }

    #[test]
    fn test_recursive_backtrack_out_of_bounds_start() {
        let mut maze = Maze::new(MazeConfig::new(2, 2).with_seed(0)).unwrap();
        recursive_backtrack(&mut maze, (5, 5));
        assert!(
            maze.columns()
                .flat_map(|column| column.iter())
                .all(|cell| !cell.is_visited())
        );
    }

    #[test]
    fn test_get_rng_is_deterministic_when_seeded() {
        use crate::generators::get_rng;

        let mut first = get_rng(Some(77));
        let mut second = get_rng(Some(77));
        let a = (0..8).map(|_| first.random_range(0..100)).collect::<Vec<u32>>();
        let b = (0..8).map(|_| second.random_range(0..100)).collect::<Vec<u32>>();
        assert_eq!(a, b);
    }
}
