use std::{
    io::{Stdout, Write},
    time::Duration,
};

use crossterm::{
    cursor, queue,
    style::{self, Color, StyledContent, Stylize},
};

use super::{DrawingSurface, Line, LineColor, Point};

/// Character canvas drawn with crossterm.
///
/// Each surface point is one terminal row high and [`TerminalSurface::PIXEL_WIDTH`] columns wide.
/// Lines are rasterized into an in-memory canvas; [`DrawingSurface::redraw`] prints only the
/// points that changed since the previous redraw and then sleeps for the frame delay.
pub struct TerminalSurface<W: Write = Stdout> {
    out: W,
    width: u16,
    height: u16,
    pixels: Box<[Option<LineColor>]>,
    /// Indices of pixels changed since the last redraw
    dirty: Vec<usize>,
    frame_delay: Duration,
}

impl TerminalSurface<Stdout> {
    /// Canvas of `width` x `height` points printed to standard output.
    pub fn stdout(width: u16, height: u16, frame_delay: Duration) -> Self {
        TerminalSurface::new(std::io::stdout(), width, height, frame_delay)
    }
}

impl<W: Write> TerminalSurface<W> {
    /// The width of each canvas point when printed, in character widths.
    pub const PIXEL_WIDTH: u16 = 2;

    pub fn new(out: W, width: u16, height: u16, frame_delay: Duration) -> Self {
        let pixels = vec![None; width as usize * height as usize].into_boxed_slice();
        TerminalSurface {
            out,
            width,
            height,
            pixels,
            dirty: Vec::new(),
            frame_delay,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Color last painted at `point`, if the point is on the canvas and was painted.
    pub fn pixel(&self, point: Point) -> Option<LineColor> {
        self.ravel_index(point).and_then(|idx| self.pixels[idx])
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn ravel_index(&self, point: Point) -> Option<usize> {
        let x = u16::try_from(point.x).ok().filter(|&x| x < self.width)?;
        let y = u16::try_from(point.y).ok().filter(|&y| y < self.height)?;
        Some(y as usize * self.width as usize + x as usize)
    }

    fn plot(&mut self, point: Point, color: LineColor) {
        // Points off the canvas are dropped
        if let Some(idx) = self.ravel_index(point) {
            if self.pixels[idx] != Some(color) {
                self.pixels[idx] = Some(color);
                self.dirty.push(idx);
            }
        }
    }

    fn glyph(color: LineColor) -> StyledContent<&'static str> {
        let glyph = match color {
            LineColor::Wall => "██".with(Color::White),
            LineColor::Background => "  ".with(Color::Reset),
            LineColor::Route => "██".with(Color::Red),
            LineColor::Backtrack => "░░".with(Color::DarkGrey),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                glyph.content().width(),
                Self::PIXEL_WIDTH as usize,
                "Each canvas point must occupy exactly two character widths."
            );
        }

        glyph
    }

    fn flush_dirty(&mut self) -> std::io::Result<()> {
        let mut dirty = std::mem::take(&mut self.dirty);
        dirty.sort_unstable();
        dirty.dedup();
        for idx in dirty {
            let Some(color) = self.pixels[idx] else {
                continue;
            };
            // Overflow-safe: idx < width * height and both are u16
            let x = (idx % self.width as usize) as u16;
            let y = (idx / self.width as usize) as u16;
            queue!(
                self.out,
                cursor::MoveTo(x * Self::PIXEL_WIDTH, y),
                style::PrintStyledContent(Self::glyph(color))
            )?;
        }
        self.out.flush()
    }
}

impl<W: Write> DrawingSurface for TerminalSurface<W> {
    fn draw_line(&mut self, line: Line, color: LineColor) {
        let points = line.points();
        let points = match color {
            // Erasing keeps the endpoints, which are corners shared with neighboring walls
            LineColor::Background if points.len() > 2 => &points[1..points.len() - 1],
            _ => &points[..],
        };
        for &point in points {
            self.plot(point, color);
        }
    }

    fn redraw(&mut self) {
        if let Err(e) = self.flush_dirty() {
            tracing::warn!("[terminal] Failed to redraw canvas: {}", e);
        }
        if !self.frame_delay.is_zero() {
            std::thread::sleep(self.frame_delay);
        }
    }
}
