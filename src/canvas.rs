//! Braille sub-pixel canvas.
//!
//! Each character cell packs a 2×4 dot matrix into one glyph from the
//! Unicode braille block (U+2800-28FF), so a `w × h` cell area exposes
//! `2w × 4h` addressable dots:
//!
//! ```text
//! ,-----.
//! | 1 4 |   bit 0x01 0x08
//! | 2 5 |   bit 0x02 0x10
//! | 3 6 |   bit 0x04 0x20
//! | 7 8 |   bit 0x40 0x80
//! `-----'
//! ```
//!
//! Sub-pixel row 0 is the top of the canvas.

use std::fmt;

use crate::mapping::Bounds;

/// Dots per character cell horizontally.
pub const DOTS_PER_CELL_X: usize = 2;
/// Dots per character cell vertically.
pub const DOTS_PER_CELL_Y: usize = 4;

/// Codepoint of the empty braille pattern.
const BRAILLE_BASE: u32 = 0x2800;

/// Bit for dot `(x % 2, y % 4)`, indexed `[y][x]`.
const DOT_BITS: [[u8; DOTS_PER_CELL_X]; DOTS_PER_CELL_Y] =
    [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

/// A grid of braille cells addressed at dot resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrailleCanvas {
    /// Width in character cells.
    width: usize,
    /// Height in character cells.
    height: usize,
    /// Dot patterns, row-major, one byte per cell.
    cells: Vec<u8>,
}

impl BrailleCanvas {
    /// Creates a blank canvas of `width × height` character cells.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Rasterizes samples (newest first) as vertical bars, right to left.
    ///
    /// The newest sample occupies the rightmost dot column. Each bar rises
    /// from the bottom dot row to the height `bounds` maps the sample to, so
    /// even a sample at the lower bound lights one dot. Samples that do not
    /// fit to the left of column 0 are ignored.
    #[must_use]
    pub fn plot<I>(samples: I, bounds: Bounds, width: usize, height: usize) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        let mut canvas = Self::new(width, height);
        let bottom = canvas.bottom();

        for (x, value) in (0..=canvas.right()).rev().zip(samples) {
            let mapped = bounds.map(value, bottom);
            canvas.draw_vline(x, bottom, bottom - mapped);
        }

        canvas
    }

    /// Width in character cells.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in character cells.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Index of the rightmost dot column, `-1` for an empty canvas.
    #[must_use]
    pub fn right(&self) -> i64 {
        (self.width * DOTS_PER_CELL_X) as i64 - 1
    }

    /// Index of the bottom dot row, `-1` for an empty canvas.
    #[must_use]
    pub fn bottom(&self) -> i64 {
        (self.height * DOTS_PER_CELL_Y) as i64 - 1
    }

    /// Lights the dot at `(x, y)`. Out-of-range dots are ignored.
    pub fn set(&mut self, x: i64, y: i64) {
        if x < 0 || y < 0 || x > self.right() || y > self.bottom() {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let index = (y / DOTS_PER_CELL_Y) * self.width + x / DOTS_PER_CELL_X;
        self.cells[index] |= DOT_BITS[y % DOTS_PER_CELL_Y][x % DOTS_PER_CELL_X];
    }

    /// Returns whether the dot at `(x, y)` is lit.
    #[must_use]
    pub fn is_set(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x > self.right() || y > self.bottom() {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        let index = (y / DOTS_PER_CELL_Y) * self.width + x / DOTS_PER_CELL_X;
        self.cells[index] & DOT_BITS[y % DOTS_PER_CELL_Y][x % DOTS_PER_CELL_X] != 0
    }

    /// Lights every dot in column `x` between rows `y0` and `y1` inclusive.
    pub fn draw_vline(&mut self, x: i64, y0: i64, y1: i64) {
        let (top, bottom) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        for y in top..=bottom {
            self.set(x, y);
        }
    }

    /// Returns true if no dot is lit.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|&cell| cell == 0)
    }

    /// Returns the glyph for the cell at `(col, row)`.
    #[must_use]
    pub fn glyph(&self, col: usize, row: usize) -> char {
        let pattern = self
            .cells
            .get(row * self.width + col)
            .copied()
            .unwrap_or_default();
        char::from_u32(BRAILLE_BASE + u32::from(pattern)).unwrap_or(' ')
    }

    /// Iterates the glyph rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.height).map(move |row| (0..self.width).map(|col| self.glyph(col, row)).collect())
    }
}

impl fmt::Display for BrailleCanvas {
    /// Writes `height` newline-separated lines of `width` glyphs each.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&row)?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
