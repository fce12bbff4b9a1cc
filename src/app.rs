use std::{
    io::{Stdout, Write},
    time::Duration,
};

use crossterm::{
    cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use tracing_appender::non_blocking::WorkerGuard;

use crate::{
    maze::{Maze, MazeConfig},
    surface::TerminalSurface,
};

/// Maze size and seed entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeRequest {
    pub rows: u8,
    pub cols: u8,
    pub seed: Option<u64>,
}

pub struct App {
    /// Time to wait after each redraw of the terminal canvas
    frame_delay: Duration,
    /// Size of a maze cell in canvas points
    cell_size: (i32, i32),
    /// File the log is written to, in the working directory
    log_file: &'static str,
}

impl Default for App {
    fn default() -> Self {
        Self {
            frame_delay: Duration::from_millis(50),
            cell_size: (2, 2),
            log_file: "mazewalk.log",
        }
    }
}

impl App {
    /// Environment variable overriding the frame delay, in milliseconds
    const FRAME_DELAY_ENV: &'static str = "MAZEWALK_FRAME_MS";

    /// Default settings, with overrides taken from the environment.
    pub fn from_env() -> Self {
        let mut app = App::default();
        if let Some(ms) = std::env::var(Self::FRAME_DELAY_ENV)
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
        {
            app.frame_delay = Duration::from_millis(ms);
        }
        app
    }

    pub fn frame_delay(&self) -> Duration {
        self.frame_delay
    }

    /// Sends `tracing` output to the log file. Stdout belongs to the maze canvas.
    /// The returned guard must be kept alive until the program exits.
    pub fn init_logging(&self) -> WorkerGuard {
        let file_appender = tracing_appender::rolling::never(".", self.log_file);
        let (writer, guard) = tracing_appender::non_blocking(file_appender);
        let level = match std::env::var("DEBUG") {
            Ok(val) if val == "1" => tracing::Level::DEBUG,
            _ => tracing::Level::INFO,
        };
        tracing_subscriber::fmt()
            .with_writer(writer)
            .with_ansi(false)
            .with_max_level(level)
            .init();
        guard
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Parses `rows cols [seed]`.
    pub fn parse_request(input: &str) -> Result<MazeRequest, String> {
        let mut parts = input.split_whitespace();
        let mut dimension = |name: &str| -> Result<u8, String> {
            let value = parts
                .next()
                .ok_or_else(|| format!("Missing {}", name))?
                .parse::<u8>()
                .map_err(|_| format!("{} must be a number between 1 and 255", name))?;
            if value == 0 {
                return Err(format!("{} must be at least 1", name));
            }
            Ok(value)
        };
        let rows = dimension("rows")?;
        let cols = dimension("cols")?;
        let seed = parts
            .next()
            .map(|s| {
                s.parse::<u64>()
                    .map_err(|_| "seed must be a non-negative integer".to_string())
            })
            .transpose()?;
        if parts.next().is_some() {
            return Err("Expected at most three values: rows cols [seed]".to_string());
        }
        Ok(MazeRequest { rows, cols, seed })
    }

    /// Ask the user for the maze size on standard input.
    /// Returns None if the input is empty or invalid.
    fn ask_maze_request() -> std::io::Result<Option<MazeRequest>> {
        println!("Enter maze size and an optional seed (rows cols [seed]). Maximum size is 255x255:");
        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        match App::parse_request(&input) {
            Ok(request) => Ok(Some(request)),
            Err(msg) => {
                eprintln!("{}", msg);
                Ok(None)
            }
        }
    }

    /// Canvas size in points needed to draw a maze for `request`.
    fn canvas_size(&self, request: &MazeRequest) -> (u16, u16) {
        // Cells share their borders, so one extra point closes the far side
        let width = request.cols as i32 * self.cell_size.0 + 1;
        let height = request.rows as i32 * self.cell_size.1 + 1;
        (
            u16::try_from(width).unwrap_or(u16::MAX),
            u16::try_from(height).unwrap_or(u16::MAX),
        )
    }

    /// Wait for the user to press the Esc key
    /// This function blocks until Esc is pressed
    fn wait_for_esc() -> std::io::Result<()> {
        loop {
            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if code == KeyCode::Esc && kind == event::KeyEventKind::Press {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Main application flow: ask for a size, then generate and solve the maze on screen.
    pub fn run(&self) -> std::io::Result<()> {
        let request = match App::ask_maze_request()? {
            Some(request) => request,
            None => return Ok(()),
        };
        tracing::info!("[app] Requested maze: {:?}", request);

        let (canvas_width, canvas_height) = self.canvas_size(&request);
        // One extra line for the status message
        let (term_width, term_height) = terminal::size()?;
        if term_width < canvas_width.saturating_mul(TerminalSurface::<Stdout>::PIXEL_WIDTH)
            || term_height <= canvas_height
        {
            eprintln!(
                "Terminal size is too small ({}x{}) for the maze ({}x{}). Please resize the terminal.",
                term_width, term_height, request.cols, request.rows
            );
            return Ok(());
        }

        let mut config = MazeConfig::new(request.rows as i32, request.cols as i32)
            .with_cell_size(self.cell_size.0, self.cell_size.1);
        config.seed = request.seed;

        let mut stdout = std::io::stdout();
        App::setup_terminal(&mut stdout)?;

        let surface = TerminalSurface::stdout(canvas_width, canvas_height, self.frame_delay);
        let result = Maze::with_surface(config, surface).map(|mut maze| {
            let reached = maze.solve();
            tracing::debug!("[app] Solved maze:\n{}", maze);
            reached
        });
        let reached = match result {
            Ok(reached) => reached,
            Err(e) => {
                App::restore_terminal(&mut stdout)?;
                return Err(std::io::Error::other(e));
            }
        };
        tracing::info!("[app] Goal reached: {}", reached);

        let msg = if reached {
            "Path found!"
        } else {
            "No path found."
        };
        queue!(
            stdout,
            cursor::MoveTo(0, canvas_height),
            style::PrintStyledContent(msg.with(Color::Green).attribute(Attribute::Bold)),
            style::PrintStyledContent(
                " Press Esc to exit..."
                    .with(Color::Blue)
                    .attribute(Attribute::Bold)
            )
        )?;
        stdout.flush()?;
        App::wait_for_esc()?;

        App::restore_terminal(&mut stdout)?;
        println!("{}", msg);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request() {
        assert_eq!(
            App::parse_request("10 12"),
            Ok(MazeRequest {
                rows: 10,
                cols: 12,
                seed: None
            })
        );
        assert_eq!(
            App::parse_request("  3 4 99\n"),
            Ok(MazeRequest {
                rows: 3,
                cols: 4,
                seed: Some(99)
            })
        );
    }

    #[test]
    fn test_parse_request_rejects_bad_input() {
        assert!(App::parse_request("").is_err());
        assert!(App::parse_request("5").is_err());
        assert!(App::parse_request("0 5").is_err());
        assert!(App::parse_request("5 256").is_err());
        assert!(App::parse_request("-1 5").is_err());
        assert!(App::parse_request("5 5 x").is_err());
        assert!(App::parse_request("5 5 1 2").is_err());
    }

    #[test]
    fn test_canvas_size() {
        let app = App::default();
        let request = MazeRequest {
            rows: 3,
            cols: 5,
            seed: None,
        };
        assert_eq!(app.canvas_size(&request), (11, 7));
    }

    #[test]
    fn test_default_frame_delay() {
        assert_eq!(App::default().frame_delay(), Duration::from_millis(50));
    }
}
