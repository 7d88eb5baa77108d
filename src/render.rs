//! Composes the braille canvas, row colors and border onto a terminal grid.
//!
//! The renderer only needs [`TerminalGrid::size`] and
//! [`TerminalGrid::set_cell`]; it never clears, flushes or tears down the
//! terminal. Writes outside the reported size are dropped, so a redraw after
//! the terminal shrinks cannot go out of range.

use ratatui::buffer::Buffer;
use ratatui::layout::Position;
use ratatui::style::Style;

use crate::canvas::BrailleCanvas;
use crate::config::PlotConfig;
use crate::gradient::Gradient;
use crate::window::SlidingWindow;

const BOX_TOP_LEFT: char = '╭';
const BOX_TOP_RIGHT: char = '╮';
const BOX_BOTTOM_LEFT: char = '╰';
const BOX_BOTTOM_RIGHT: char = '╯';
const BOX_HORIZONTAL: char = '─';
const BOX_VERTICAL: char = '│';

/// A character grid the plot can be written onto.
pub trait TerminalGrid {
    /// Current `(width, height)` in character cells.
    fn size(&self) -> (u16, u16);

    /// Writes one glyph with the given style.
    fn set_cell(&mut self, x: u16, y: u16, glyph: char, style: Style);
}

impl TerminalGrid for Buffer {
    fn size(&self) -> (u16, u16) {
        (self.area.width, self.area.height)
    }

    fn set_cell(&mut self, x: u16, y: u16, glyph: char, style: Style) {
        let position = Position::new(self.area.x.saturating_add(x), self.area.y.saturating_add(y));
        if let Some(cell) = self.cell_mut(position) {
            cell.set_char(glyph).set_style(style);
        }
    }
}

/// Rectangle in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Area {
    x: u16,
    y: u16,
    width: u16,
    height: u16,
}

/// One full redraw of the chart.
#[derive(Debug)]
pub struct Renderer<'a> {
    window: &'a SlidingWindow,
    config: &'a PlotConfig,
    gradient: &'a Gradient,
}

impl<'a> Renderer<'a> {
    /// Creates a renderer over a snapshot of the window.
    #[must_use]
    pub fn new(window: &'a SlidingWindow, config: &'a PlotConfig, gradient: &'a Gradient) -> Self {
        Self {
            window,
            config,
            gradient,
        }
    }

    /// Draws the chart, and the border if enabled, sized to the grid.
    pub fn draw<G: TerminalGrid + ?Sized>(&self, grid: &mut G) {
        let (width, height) = grid.size();

        if self.config.border {
            self.plot(
                grid,
                Area {
                    x: 1,
                    y: 1,
                    width: width.saturating_sub(2),
                    height: height.saturating_sub(2),
                },
            );
            if width > 0 && height > 0 {
                self.draw_box(grid, width - 1, height - 1);
            }
        } else {
            self.plot(
                grid,
                Area {
                    x: 0,
                    y: 0,
                    width,
                    height,
                },
            );
        }
    }

    fn plot<G: TerminalGrid + ?Sized>(&self, grid: &mut G, area: Area) {
        let canvas = BrailleCanvas::plot(
            self.window.iter(),
            self.config.bounds,
            usize::from(area.width),
            usize::from(area.height),
        );

        for (oy, row) in canvas.rows().enumerate() {
            let percent = oy as f64 / f64::from(area.height);
            let style = Style::default().fg(self.gradient.at(percent));

            for (ox, glyph) in row.chars().enumerate() {
                put(grid, area.x + ox as u16, area.y + oy as u16, glyph, style);
            }
        }
    }

    /// Box with corners at `(0, 0)` and `(right, bottom)`.
    fn draw_box<G: TerminalGrid + ?Sized>(&self, grid: &mut G, right: u16, bottom: u16) {
        let style = Style::default().fg(self.config.border_color);

        for x in 1..right {
            put(grid, x, 0, BOX_HORIZONTAL, style);
            put(grid, x, bottom, BOX_HORIZONTAL, style);
        }
        for y in 1..bottom {
            put(grid, 0, y, BOX_VERTICAL, style);
            put(grid, right, y, BOX_VERTICAL, style);
        }

        put(grid, 0, 0, BOX_TOP_LEFT, style);
        put(grid, right, 0, BOX_TOP_RIGHT, style);
        put(grid, right, bottom, BOX_BOTTOM_RIGHT, style);
        put(grid, 0, bottom, BOX_BOTTOM_LEFT, style);
    }
}

/// Writes a glyph if `(x, y)` lies inside the grid.
fn put<G: TerminalGrid + ?Sized>(grid: &mut G, x: u16, y: u16, glyph: char, style: Style) {
    let (width, height) = grid.size();
    if x < width && y < height {
        grid.set_cell(x, y, glyph, style);
    }
}

// ============================================================================
// Tests
// ============================================================================
