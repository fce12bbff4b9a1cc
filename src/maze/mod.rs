pub mod cell;
mod grid;

use std::fmt;

use rand::rngs::StdRng;

pub use cell::Cell;
use grid::Grid;

use crate::{
    error::{MazeError, Result},
    generators::{get_rng, recursive_backtrack},
    solvers::{Solution, solve_dfs},
    surface::{DrawingSurface, NoSurface, Point, Rect},
};

/// Cell coordinate as `(column, row)`, with `(0, 0)` at the top-left.
pub type Coord = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All directions, in the order neighbors are examined.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// Geometry and randomness of a maze.
///
/// Dimensions are signed so that bad input can be reported instead of silently wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeConfig {
    pub origin_x: i32,
    pub origin_y: i32,
    pub num_rows: i32,
    pub num_cols: i32,
    pub cell_width: i32,
    pub cell_height: i32,
    /// Seed for reproducible mazes, or `None` for an OS-seeded one.
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            origin_x: 0,
            origin_y: 0,
            num_rows: 10,
            num_cols: 10,
            cell_width: 2,
            cell_height: 2,
            seed: None,
        }
    }
}

impl MazeConfig {
    pub fn new(num_rows: i32, num_cols: i32) -> Self {
        Self {
            num_rows,
            num_cols,
            ..Self::default()
        }
    }

    pub fn with_origin(self, origin_x: i32, origin_y: i32) -> Self {
        Self {
            origin_x,
            origin_y,
            ..self
        }
    }

    pub fn with_cell_size(self, cell_width: i32, cell_height: i32) -> Self {
        Self {
            cell_width,
            cell_height,
            ..self
        }
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    /// Checks the geometry and returns the grid size as `(columns, rows)`.
    fn validate(&self) -> Result<(usize, usize)> {
        for (name, value) in [
            ("num_rows", self.num_rows),
            ("num_cols", self.num_cols),
            ("cell_width", self.cell_width),
            ("cell_height", self.cell_height),
        ] {
            if value < 0 {
                return Err(MazeError::NegativeDimension { name, value });
            }
        }

        // The far corner of the last cell must be addressable
        let far_x = self
            .num_cols
            .checked_mul(self.cell_width)
            .and_then(|w| w.checked_add(self.origin_x));
        let far_y = self
            .num_rows
            .checked_mul(self.cell_height)
            .and_then(|h| h.checked_add(self.origin_y));
        if far_x.is_none() || far_y.is_none() {
            return Err(MazeError::GeometryOverflow);
        }

        // Non-negative after the checks above
        Ok((self.num_cols as usize, self.num_rows as usize))
    }
}

/// A perfect maze over a rectangular grid of cells, drawn on a [`DrawingSurface`].
///
/// The entrance is the top wall of `(0, 0)` and the exit the bottom wall of the bottom-right
/// cell. Mazes built without a surface use [`NoSurface`] and never pause.
pub struct Maze<S: DrawingSurface = NoSurface> {
    cells: Grid<Cell>,
    origin: Point,
    cell_width: i32,
    cell_height: i32,
    surface: S,
    rng: StdRng,
}

impl Maze<NoSurface> {
    /// Builds and carves a maze with nothing attached to draw on.
    pub fn new(config: MazeConfig) -> Result<Self> {
        Maze::with_surface(config, NoSurface)
    }
}

impl<S: DrawingSurface> Maze<S> {
    /// Builds a maze, animating every step on `surface`.
    ///
    /// The cells are created and rendered, the entrance and exit are opened, the maze is carved
    /// from the top-left cell and finally every traversal mark is cleared.
    ///
    /// # Errors
    /// [`MazeError::NegativeDimension`] for negative sizes and [`MazeError::GeometryOverflow`]
    /// when the maze does not fit in pixel coordinates. Zero rows or columns are valid and give
    /// an empty maze.
    pub fn with_surface(config: MazeConfig, surface: S) -> Result<Self> {
        let (width, height) = config.validate()?;
        tracing::debug!(
            "[maze] Building {}x{} maze (seed: {:?})",
            width,
            height,
            config.seed
        );

        let mut maze = Maze {
            cells: Grid::new(width, height, Cell::default()),
            origin: Point::new(config.origin_x, config.origin_y),
            cell_width: config.cell_width,
            cell_height: config.cell_height,
            surface,
            rng: get_rng(config.seed),
        };
        maze.create_cells();
        maze.carve();
        Ok(maze)
    }

    /// Closes every wall and carves a fresh maze, continuing the maze's random sequence.
    pub fn regenerate(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = Cell::default());
        self.create_cells();
        self.carve();
    }

    fn create_cells(&mut self) {
        (0..self.num_cols()).for_each(|x| {
            (0..self.num_rows()).for_each(|y| {
                self.draw_cell((x, y));
            })
        });
    }

    fn carve(&mut self) {
        if self.is_empty() {
            return;
        }
        self.break_entrance_and_exit();
        recursive_backtrack(self, (0, 0));
        self.reset_visited();
    }

    fn break_entrance_and_exit(&mut self) {
        let entrance = (0, 0);
        self.cells[entrance].set_wall(Direction::Up, false);
        self.draw_cell(entrance);

        let exit = self.goal();
        self.cells[exit].set_wall(Direction::Down, false);
        self.draw_cell(exit);
    }

    /// Number of rows of cells.
    pub fn num_rows(&self) -> usize {
        self.cells.height()
    }

    /// Number of columns of cells.
    pub fn num_cols(&self) -> usize {
        self.cells.width()
    }

    /// Whether the maze has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0 || self.num_cols() == 0
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Pixel size of a cell as `(width, height)`.
    pub fn cell_size(&self) -> (i32, i32) {
        (self.cell_width, self.cell_height)
    }

    /// The exit cell, bottom-right.
    ///
    /// # Panics
    /// If the maze is empty.
    pub fn goal(&self) -> Coord {
        assert!(!self.is_empty(), "An empty maze has no goal cell");
        (self.num_cols() - 1, self.num_rows() - 1)
    }

    /// Cells of each column, top to bottom, from the leftmost column.
    pub fn columns(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.columns()
    }

    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        self.cells.is_in_bounds(coord)
    }

    /// The cell one step from `coord` in `direction`, if it is inside the maze.
    pub fn neighbor(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        if !self.is_in_bounds(coord) {
            return None;
        }
        let (x, y) = coord;
        let next = match direction {
            Direction::Left => (x.checked_sub(1)?, y),
            Direction::Right => (x + 1, y),
            Direction::Up => (x, y.checked_sub(1)?),
            Direction::Down => (x, y + 1),
        };
        self.is_in_bounds(next).then_some(next)
    }

    /// Whether one can step from `coord` to its neighbor in `direction`.
    pub fn has_passage(&self, coord: Coord, direction: Direction) -> bool {
        self.neighbor(coord, direction)
            .is_some_and(|_| !self.cells[coord].has_wall(direction))
    }

    /// Removes the wall on the `direction` side of `coord`, and the matching wall of the neighbor.
    ///
    /// # Panics
    /// If `coord` is out of bounds.
    pub fn open_wall(&mut self, coord: Coord, direction: Direction) {
        self.set_wall_pair(coord, direction, false);
    }

    /// Puts back the wall on the `direction` side of `coord`, and the matching wall of the neighbor.
    ///
    /// # Panics
    /// If `coord` is out of bounds.
    pub fn close_wall(&mut self, coord: Coord, direction: Direction) {
        self.set_wall_pair(coord, direction, true);
    }

    fn set_wall_pair(&mut self, coord: Coord, direction: Direction, present: bool) {
        self.cells[coord].set_wall(direction, present);
        // Boundary sides have no partner
        if let Some(next) = self.neighbor(coord, direction) {
            self.cells[next].set_wall(direction.opposite(), present);
        }
    }

    /// Clears the traversal mark of every cell.
    pub fn reset_visited(&mut self) {
        self.cells.iter_mut().for_each(|cell| cell.set_visited(false));
    }

    pub(crate) fn set_visited(&mut self, coord: Coord, visited: bool) {
        self.cells[coord].set_visited(visited);
    }

    pub(crate) fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Pixel box of the cell at `coord`.
    pub fn cell_bounds(&self, coord: Coord) -> Rect {
        // Cannot overflow: the far corner was checked when the maze was built
        let x1 = self.origin.x + coord.0 as i32 * self.cell_width;
        let y1 = self.origin.y + coord.1 as i32 * self.cell_height;
        Rect::new(x1, y1, x1 + self.cell_width, y1 + self.cell_height)
    }

    /// Renders the cell at `coord` and waits one frame.
    pub(crate) fn draw_cell(&mut self, coord: Coord) {
        let bounds = self.cell_bounds(coord);
        self.cells[coord].render(bounds, &mut self.surface);
        self.animate();
    }

    pub(crate) fn draw_move(&mut self, from: Coord, to: Coord, undo: bool) {
        let cells = &self.cells;
        cells[from].draw_move(&cells[to], undo, &mut self.surface);
    }

    pub(crate) fn animate(&mut self) {
        self.surface.redraw();
    }

    /// Searches a path from the entrance to the exit, drawing every step.
    ///
    /// Traversal marks are left set afterwards; call [`Maze::reset_visited`] before solving again.
    pub fn solve(&mut self) -> bool {
        self.solve_path().reached
    }

    /// Like [`Maze::solve`], returning every move the search made.
    pub fn solve_path(&mut self) -> Solution {
        solve_dfs(self)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

impl<S: DrawingSurface> std::ops::Index<Coord> for Maze<S> {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.cells[index]
    }
}

impl<S: DrawingSurface> fmt::Display for Maze<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        // Top boundary
        for x in 0..self.num_cols() {
            let side = if self.cells[(x, 0)].has_wall(Direction::Up) {
                "--"
            } else {
                "  "
            };
            write!(f, "+{}", side)?;
        }
        writeln!(f, "+")?;

        for y in 0..self.num_rows() {
            let left = if self.cells[(0, y)].has_wall(Direction::Left) {
                "|"
            } else {
                " "
            };
            write!(f, "{}", left)?;
            for x in 0..self.num_cols() {
                let right = if self.cells[(x, y)].has_wall(Direction::Right) {
                    "|"
                } else {
                    " "
                };
                write!(f, "  {}", right)?;
            }
            writeln!(f)?;

            for x in 0..self.num_cols() {
                let bottom = if self.cells[(x, y)].has_wall(Direction::Down) {
                    "--"
                } else {
                    "  "
                };
                write!(f, "+{}", bottom)?;
            }
            writeln!(f, "+")?;
        }
        Ok(())
    }
}
