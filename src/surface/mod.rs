pub mod terminal;

pub use terminal::TerminalSurface;

/// A point in surface (pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// A straight segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub const fn new(start: Point, end: Point) -> Self {
        Line { start, end }
    }

    /// Rasterizes the segment with Bresenham's algorithm, from `start` to `end` inclusive.
    pub fn points(&self) -> Vec<Point> {
        let (mut x, mut y) = (self.start.x, self.start.y);
        let dx = (self.end.x - x).abs();
        let dy = -(self.end.y - y).abs();
        let sx = if x < self.end.x { 1 } else { -1 };
        let sy = if y < self.end.y { 1 } else { -1 };
        let mut err = dx + dy;

        let mut points = Vec::with_capacity(dx.max(-dy) as usize + 1);
        loop {
            points.push(Point::new(x, y));
            if x == self.end.x && y == self.end.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
        points
    }
}

/// Pixel rectangle occupied by a cell, `(x1, y1)` top-left and `(x2, y2)` bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Rect { x1, y1, x2, y2 }
    }

    pub const fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub const fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    /// Center of the rectangle, rounded down so paths line up on odd and even sizes alike.
    pub const fn center(&self) -> Point {
        Point::new(self.x1 + self.width() / 2, self.y1 + self.height() / 2)
    }

    pub const fn top_left(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub const fn top_right(&self) -> Point {
        Point::new(self.x2, self.y1)
    }

    pub const fn bottom_left(&self) -> Point {
        Point::new(self.x1, self.y2)
    }

    pub const fn bottom_right(&self) -> Point {
        Point::new(self.x2, self.y2)
    }
}

/// Role of a line, mapped to a concrete color by each surface.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineColor {
    /// A wall that is present.
    #[default]
    Wall,
    /// An absent wall, painted over in the background color.
    Background,
    /// A forward step of the solver.
    Route,
    /// A solver step that was retracted.
    Backtrack,
}

/// Write-only sink for the maze's visual output.
///
/// Implementations are best-effort: the maze never reads from a surface and never
/// observes a failure. Any pacing of the animation happens in [`DrawingSurface::redraw`].
pub trait DrawingSurface {
    /// Queues a line in the given color.
    fn draw_line(&mut self, line: Line, color: LineColor);

    /// Flushes queued lines to the visible surface and waits one animation frame.
    fn redraw(&mut self);
}

impl<S: DrawingSurface + ?Sized> DrawingSurface for &mut S {
    fn draw_line(&mut self, line: Line, color: LineColor) {
        (**self).draw_line(line, color);
    }

    fn redraw(&mut self) {
        (**self).redraw();
    }
}

/// Surface used when nothing is attached. Every call is a no-op, so headless runs never sleep.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoSurface;

impl DrawingSurface for NoSurface {
    fn draw_line(&mut self, _line: Line, _color: LineColor) {}

    fn redraw(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    Line { line: Line, color: LineColor },
    Redraw,
}

/// Surface that keeps every call it receives, oldest first.
#[derive(Default, Debug, Clone)]
pub struct RecordingSurface {
    events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    /// Lines drawn so far, in order, skipping redraw ticks.
    pub fn lines(&self) -> impl Iterator<Item = (Line, LineColor)> + '_ {
        self.events.iter().filter_map(|event| match event {
            SurfaceEvent::Line { line, color } => Some((*line, *color)),
            SurfaceEvent::Redraw => None,
        })
    }

    pub fn redraw_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SurfaceEvent::Redraw))
            .count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl DrawingSurface for RecordingSurface {
    fn draw_line(&mut self, line: Line, color: LineColor) {
        self.events.push(SurfaceEvent::Line { line, color });
    }

    fn redraw(&mut self) {
        self.events.push(SurfaceEvent::Redraw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_center_rounds_down() {
        assert_eq!(Rect::new(0, 0, 10, 10).center(), Point::new(5, 5));
        assert_eq!(Rect::new(3, 4, 6, 9).center(), Point::new(4, 6));
        assert_eq!(Rect::new(-4, -4, -2, -2).center(), Point::new(-3, -3));
    }

    #[test]
    fn test_line_points_axis_aligned() {
        let line = Line::new(Point::new(2, 1), Point::new(2, 4));
        assert_eq!(
            line.points(),
            vec![
                Point::new(2, 1),
                Point::new(2, 2),
                Point::new(2, 3),
                Point::new(2, 4)
            ]
        );
        let reversed = Line::new(Point::new(3, 0), Point::new(0, 0));
        assert_eq!(reversed.points().len(), 4);
        assert_eq!(reversed.points()[0], Point::new(3, 0));
    }

    #[test]
    fn test_line_points_diagonal_and_single() {
        let diagonal = Line::new(Point::new(0, 0), Point::new(3, 3));
        assert_eq!(diagonal.points().len(), 4);
        assert_eq!(diagonal.points()[3], Point::new(3, 3));

        let single = Line::new(Point::new(7, 7), Point::new(7, 7));
        assert_eq!(single.points(), vec![Point::new(7, 7)]);
    }

    #[test]
    fn test_recording_surface_through_reference() {
        fn paint<S: DrawingSurface>(mut surface: S) {
            let line = Line::new(Point::new(0, 0), Point::new(1, 0));
            surface.draw_line(line, LineColor::Route);
            surface.redraw();
        }

        let mut recorder = RecordingSurface::new();
        paint(&mut recorder);
        assert_eq!(recorder.events().len(), 2);
        assert_eq!(recorder.redraw_count(), 1);
        assert_eq!(recorder.lines().next().map(|(_, c)| c), Some(LineColor::Route));
    }
}
