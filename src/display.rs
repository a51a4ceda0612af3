use std::io;
use tui::backend::CrosstermBackend;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::symbols::Marker;
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{Block, Borders};
use tui::Terminal;

use crate::machine::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Display is used by the host to put the framebuffer on the screen. It
/// abstracts the implementation details, so a variety of kinds of screen
/// would work.
pub trait Display {
    /// render one whole frame of on/off cells, row-major
    fn draw(&mut self, framebuffer: &[bool]) -> Result<(), io::Error>;
}

// canvas coordinate space for a given resolution; TUI wants the y axis
// pointing up, the framebuffer counts rows downwards
struct Resolution(usize, usize);

impl Resolution {
    fn cell_count(&self) -> usize {
        self.0 * self.1
    }

    fn x_bounds(&self) -> [f64; 2] {
        [0.0, (self.0 - 1) as f64]
    }

    fn y_bounds(&self) -> [f64; 2] {
        [-1.0 * (self.1 - 1) as f64, 0.0]
    }

    /// cells in one state, as canvas points
    fn points(&self, framebuffer: &[bool], lit: bool) -> Vec<(f64, f64)> {
        let w = self.0;
        framebuffer
            .iter()
            .enumerate()
            .filter(|(_, &cell)| cell == lit)
            .map(|(i, _)| ((i % w) as f64, -1.0 * (i / w) as f64))
            .collect()
    }
}

/// monochrome display in a terminal, rendered using TUI over crossterm
pub struct MonoTermDisplay {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    resolution: Resolution,
}

impl MonoTermDisplay {
    pub fn new() -> Result<MonoTermDisplay, io::Error> {
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        terminal.hide_cursor()?;
        Ok(MonoTermDisplay {
            terminal,
            resolution: Resolution(DISPLAY_WIDTH, DISPLAY_HEIGHT),
        })
    }
}

impl Drop for MonoTermDisplay {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
    }
}

impl Display for MonoTermDisplay {
    fn draw(&mut self, framebuffer: &[bool]) -> Result<(), io::Error> {
        // make sure we're given exactly the right amount of data to draw
        assert_eq!(
            framebuffer.len(),
            self.resolution.cell_count(),
            "MonoTermDisplay must have correct-sized data to draw"
        );

        // a 1:1 ratio between terminal cells and machine pixels
        self.terminal.draw(|f| {
            let size = Rect::new(
                0,
                0,
                2 + self.resolution.0 as u16,
                2 + self.resolution.1 as u16,
            );

            let canvas = Canvas::default()
                .block(
                    Block::default()
                        .title("CHIP-8")
                        .borders(Borders::ALL)
                        .style(Style::default().bg(Color::Black)),
                )
                .x_bounds(self.resolution.x_bounds())
                .y_bounds(self.resolution.y_bounds())
                .marker(Marker::Block)
                .paint(|ctx| {
                    // paint both planes so stale pixels get blanked
                    ctx.draw(&Points {
                        coords: &self.resolution.points(framebuffer, false),
                        color: Color::Black,
                    });
                    ctx.draw(&Points {
                        coords: &self.resolution.points(framebuffer, true),
                        color: Color::White,
                    });
                });
            f.render_widget(canvas, size);
        })?;
        Ok(())
    }
}

/// useful for testing non-display routines
pub struct DummyDisplay {
    pub frames_drawn: usize,
}

impl DummyDisplay {
    pub fn new() -> Result<DummyDisplay, io::Error> {
        Ok(DummyDisplay { frames_drawn: 0 })
    }
}

impl Display for DummyDisplay {
    fn draw(&mut self, _framebuffer: &[bool]) -> Result<(), io::Error> {
        self.frames_drawn += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_count() {
        let r = Resolution(64, 32);
        assert_eq!(r.cell_count(), 2048)
    }

    #[test]
    fn test_x_bounds() {
        let r = Resolution(64, 32);
        assert_eq!(r.x_bounds(), [0.0, 63.0]);
    }

    #[test]
    fn test_y_bounds() {
        let r = Resolution(64, 32);
        assert_eq!(r.y_bounds(), [-31.0, 0.0]);
    }

    #[test]
    fn test_points_all_dark() {
        let r = Resolution(64, 32);
        let fb = [false; 64 * 32];
        assert!(r.points(&fb, true).is_empty());
        assert_eq!(r.points(&fb, false).len(), 2048);
    }

    #[test]
    fn test_points_map_row_major() {
        let r = Resolution(64, 32);
        let mut fb = [false; 64 * 32];
        fb[64 + 2] = true; // row 1, column 2
        assert_eq!(r.points(&fb, true), vec![(2.0, -1.0)]);
    }

    #[test]
    fn test_dummy_display_counts_frames() -> Result<(), io::Error> {
        let mut d = DummyDisplay::new()?;
        d.draw(&[false; 64 * 32])?;
        d.draw(&[false; 64 * 32])?;
        assert_eq!(d.frames_drawn, 2);
        Ok(())
    }
}
