//! # realplot
//!
//! Continuously scrolling bar graph of integer samples, drawn in the
//! terminal at braille sub-character resolution.
//!
//! A producer writes one integer per line to standard input; realplot keeps
//! the most recent samples that fit across the screen (two per character
//! column) and redraws after every sample and every terminal resize.
//!
//! ## Pipeline
//!
//! ```text
//! stdin line ─► Plotter::ingest ─► SlidingWindow ─► BrailleCanvas
//!                                                      │
//!                       Gradient (per screen row) ─────┤
//!                                                      ▼
//!                                      Renderer ─► TerminalGrid
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use ratatui::buffer::Buffer;
//! use ratatui::layout::Rect;
//! use realplot::prelude::*;
//!
//! let config = PlotConfig::new(Bounds::new(0, 10)?).border(false);
//! let mut plotter = Plotter::new(config, 20)?;
//! plotter.ingest("7");
//!
//! let mut grid = Buffer::empty(Rect::new(0, 0, 20, 5));
//! plotter.render(&mut grid);
//! # Ok::<(), realplot::PlotError>(())
//! ```

// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Value-to-row coordinate mapping.
pub mod mapping;

/// Bounded newest-first sample window.
pub mod window;

/// Braille sub-pixel rasterizer.
pub mod canvas;

/// Row-based color gradient.
pub mod gradient;

/// Color name and hex resolution.
pub mod color;

// ============================================================================
// Rendering and Session
// ============================================================================

/// Terminal grid abstraction and chart composition.
pub mod render;

/// Sample window, configuration and error queue owner.
pub mod plotter;

/// Message-driven reader state machine.
pub mod driver;

/// Key handling.
pub mod input;

/// Terminal application (crossterm + ratatui).
pub mod app;

// ============================================================================
// Configuration and Errors
// ============================================================================

/// Config file and resolved plot configuration.
pub mod config;

/// Error types for realplot operations.
pub mod error;

pub use error::{PlotError, Result};

/// Re-export ratatui so grid implementors share its types.
pub use ratatui;

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types for convenient imports.
pub mod prelude {
    pub use crate::app::App;
    pub use crate::canvas::BrailleCanvas;
    pub use crate::config::{Config, Overrides, PlotConfig};
    pub use crate::driver::{Driver, Message, ReaderState, Step};
    pub use crate::error::{PlotError, Result};
    pub use crate::gradient::Gradient;
    pub use crate::mapping::{map_range, Bounds};
    pub use crate::plotter::Plotter;
    pub use crate::render::{Renderer, TerminalGrid};
    pub use crate::window::SlidingWindow;
}
