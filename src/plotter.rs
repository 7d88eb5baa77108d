//! The plotter: sample window, render configuration and error queue.
//!
//! A [`Plotter`] is owned by exactly one task. Pushes, resizes and renders
//! take `&mut self` or `&self`, so the borrow checker rules out any
//! interleaving of a draw with a mutation of the window.

use crate::canvas::DOTS_PER_CELL_X;
use crate::config::PlotConfig;
use crate::error::{PlotError, Result};
use crate::gradient::Gradient;
use crate::render::{Renderer, TerminalGrid};
use crate::window::SlidingWindow;

/// Number of samples that fit across a terminal `width` cells wide.
#[must_use]
pub fn capacity_for(width: u16) -> usize {
    usize::from(width) * DOTS_PER_CELL_X
}

/// Owns the render state for one plotting session.
#[derive(Debug)]
pub struct Plotter {
    config: PlotConfig,
    gradient: Gradient,
    window: SlidingWindow,
    /// Non-fatal errors awaiting [`Plotter::drain_errors`].
    errors: Vec<PlotError>,
    /// Set once the reading loop has finished; later errors are dropped.
    errors_closed: bool,
    /// Lines consumed so far, for error messages.
    lines_read: usize,
}

impl Plotter {
    /// Creates a plotter for a terminal `width` cells wide.
    ///
    /// Fails with [`PlotError::Config`] if the gradient stops are invalid.
    pub fn new(config: PlotConfig, width: u16) -> Result<Self> {
        let gradient = Gradient::new(config.colors.clone())?;
        let capacity = capacity_for(width);
        tracing::debug!(width, capacity, "plotter created");

        Ok(Self {
            config,
            gradient,
            window: SlidingWindow::new(capacity),
            errors: Vec::new(),
            errors_closed: false,
            lines_read: 0,
        })
    }

    /// Appends a sample, evicting the oldest if the window is full.
    pub fn push(&mut self, value: i64) {
        self.window.push(value);
    }

    /// Parses one input line and pushes it.
    ///
    /// Surrounding whitespace is ignored. Blank or non-numeric lines are
    /// queued as [`PlotError::Parse`] and leave the window untouched.
    /// Returns whether a sample was pushed.
    pub fn ingest(&mut self, line: &str) -> bool {
        self.lines_read += 1;
        match line.trim().parse::<i64>() {
            Ok(value) => {
                self.push(value);
                true
            }
            Err(source) => {
                let err = PlotError::Parse {
                    line: self.lines_read,
                    input: line.to_string(),
                    source,
                };
                tracing::warn!(%err, "skipping input line");
                self.record_error(err);
                false
            }
        }
    }

    /// Re-derives the window capacity from a new terminal size.
    pub fn resize(&mut self, width: u16, height: u16) {
        let capacity = capacity_for(width);
        tracing::debug!(
            width,
            height,
            capacity,
            buffered = self.window.len(),
            "resize"
        );
        self.window.resize(capacity);
    }

    /// Performs a full redraw onto `grid`.
    pub fn render<G: TerminalGrid + ?Sized>(&self, grid: &mut G) {
        Renderer::new(&self.window, &self.config, &self.gradient).draw(grid);
    }

    /// Queues a runtime error for reporting at shutdown.
    pub fn record_error(&mut self, err: PlotError) {
        if self.errors_closed {
            tracing::debug!(%err, "error queue closed, dropping");
            return;
        }
        self.errors.push(err);
    }

    /// Stops accepting errors.
    pub fn close_errors(&mut self) {
        self.errors_closed = true;
    }

    /// Takes every queued error, oldest first.
    pub fn drain_errors(&mut self) -> Vec<PlotError> {
        std::mem::take(&mut self.errors)
    }

    /// Number of queued errors.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// The current sample window.
    #[must_use]
    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }

    /// The render configuration.
    #[must_use]
    pub fn config(&self) -> &PlotConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::Bounds;
    use ratatui::style::Color;

    fn plotter(width: u16) -> Plotter {
        Plotter::new(PlotConfig::new(Bounds::new(0, 10).unwrap()), width).unwrap()
    }

    fn contents(p: &Plotter) -> Vec<i64> {
        p.window().iter().collect()
    }

    #[test]
    fn test_capacity_from_width() {
        assert_eq!(capacity_for(0), 0);
        assert_eq!(capacity_for(80), 160);
        assert_eq!(plotter(40).window().capacity(), 80);
    }

    #[test]
    fn test_invalid_gradient_fails_construction() {
        let config = PlotConfig::new(Bounds::new(0, 1).unwrap())
            .colors(vec![Color::Red, Color::Blue]);

        assert!(matches!(Plotter::new(config, 10), Err(PlotError::Config(_))));
    }

    #[test]
    fn test_ingest_trims_whitespace() {
        let mut p = plotter(10);

        assert!(p.ingest("  42\t"));
        assert!(p.ingest("-3"));
        assert_eq!(contents(&p), vec![-3, 42]);
    }

    #[test]
    fn test_ingest_rejects_blank_and_text() {
        let mut p = plotter(10);

        assert!(!p.ingest(""));
        assert!(!p.ingest("   "));
        assert!(!p.ingest("1.5"));
        assert!(!p.ingest("abc"));

        assert!(p.window().is_empty());
        assert_eq!(p.error_count(), 4);
    }

    #[test]
    fn test_parse_errors_carry_line_numbers() {
        let mut p = plotter(10);
        p.ingest("1");
        p.ingest("x");

        let errors = p.drain_errors();
        assert!(matches!(errors.as_slice(), [PlotError::Parse { line: 2, .. }]));
        assert_eq!(p.error_count(), 0);
    }

    #[test]
    fn test_resize_shrinks_window() {
        let mut p = plotter(3);
        for v in 0..6 {
            p.push(v);
        }

        p.resize(1, 10);

        assert_eq!(p.window().capacity(), 2);
        assert_eq!(contents(&p), vec![5, 4]);
    }

    #[test]
    fn test_closed_queue_drops_errors() {
        let mut p = plotter(3);
        p.ingest("bad");
        p.close_errors();
        p.ingest("worse");

        assert_eq!(p.drain_errors().len(), 1);
    }
}
