use crate::surface::{DrawingSurface, Line, LineColor, Point, Rect};

use super::Direction;

/// One maze cell: four wall flags, a traversal mark and the pixel box it was last rendered at.
///
/// Wall flags are only changed through [`crate::maze::Maze`], which keeps the flag on each side
/// of a shared wall in agreement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    has_left_wall: bool,
    has_right_wall: bool,
    has_top_wall: bool,
    has_bottom_wall: bool,
    visited: bool,
    bounds: Option<Rect>,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            has_left_wall: true,
            has_right_wall: true,
            has_top_wall: true,
            has_bottom_wall: true,
            visited: false,
            bounds: None,
        }
    }
}

impl Cell {
    pub fn has_wall(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.has_left_wall,
            Direction::Right => self.has_right_wall,
            Direction::Up => self.has_top_wall,
            Direction::Down => self.has_bottom_wall,
        }
    }

    pub(crate) fn set_wall(&mut self, direction: Direction, present: bool) {
        let wall = match direction {
            Direction::Left => &mut self.has_left_wall,
            Direction::Right => &mut self.has_right_wall,
            Direction::Up => &mut self.has_top_wall,
            Direction::Down => &mut self.has_bottom_wall,
        };
        *wall = present;
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub(crate) fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    /// Pixel box of the last render, `None` until the cell is rendered.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn center(&self) -> Option<Point> {
        self.bounds.map(|b| b.center())
    }

    /// Draws the four sides of the cell inside `bounds` and remembers the box.
    ///
    /// Absent walls are drawn in the background color so an earlier wall at the same place is
    /// painted over.
    pub fn render<S: DrawingSurface>(&mut self, bounds: Rect, surface: &mut S) {
        self.bounds = Some(bounds);

        let sides = [
            (
                Direction::Left,
                Line::new(bounds.top_left(), bounds.bottom_left()),
            ),
            (
                Direction::Up,
                Line::new(bounds.top_left(), bounds.top_right()),
            ),
            (
                Direction::Right,
                Line::new(bounds.top_right(), bounds.bottom_right()),
            ),
            (
                Direction::Down,
                Line::new(bounds.bottom_left(), bounds.bottom_right()),
            ),
        ];
        for (direction, line) in sides {
            let color = if self.has_wall(direction) {
                LineColor::Wall
            } else {
                LineColor::Background
            };
            surface.draw_line(line, color);
        }
    }

    /// Draws a line from this cell's center to the center of `to`.
    ///
    /// # Panics
    /// If either cell has never been rendered.
    pub fn draw_move<S: DrawingSurface>(&self, to: &Cell, undo: bool, surface: &mut S) {
        let (Some(from_center), Some(to_center)) = (self.center(), to.center()) else {
            panic!("Cannot draw a move between cells that have not been rendered");
        };
        let color = if undo {
            LineColor::Backtrack
        } else {
            LineColor::Route
        };
        surface.draw_line(Line::new(from_center, to_center), color);
    }
}
