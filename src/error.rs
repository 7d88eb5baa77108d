//! Error types for realplot operations.
//!
//! Construction-time failures (`Config`, `ColorFormat`) are returned
//! synchronously. Runtime failures (`Parse`, `Read`) are queued by the
//! plotter and drained once the terminal has been restored.

use std::io;
use std::num::ParseIntError;
use thiserror::Error;

/// Result type alias using [`PlotError`].
pub type Result<T> = std::result::Result<T, PlotError>;

/// Errors that can occur while configuring or running the plotter.
#[derive(Debug, Error)]
pub enum PlotError {
    /// Invalid plot or gradient configuration. Fatal at construction.
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration file could not be parsed.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed, 0 if unknown).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// A color string could not be resolved.
    #[error("color {0:?} is not a valid terminal or hex color")]
    ColorFormat(String),

    /// An input line is not a base-10 integer. Non-fatal.
    #[error("line {line}: {input:?} is not an integer: {source}")]
    Parse {
        /// Input line number (1-indexed).
        line: usize,
        /// The offending text, untrimmed.
        input: String,
        /// Underlying integer parse failure.
        #[source]
        source: ParseIntError,
    },

    /// The input source failed. Ends the reading loop.
    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),

    /// Terminal initialization or rendering error.
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

impl PlotError {
    /// Returns true for errors that leave the reading loop running.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error(input: &str) -> PlotError {
        let source = input.trim().parse::<i64>().unwrap_err();
        PlotError::Parse {
            line: 3,
            input: input.to_string(),
            source,
        }
    }

    #[test]
    fn test_parse_error_includes_line_and_input() {
        let display = parse_error("abc").to_string();

        assert!(display.contains("line 3"), "missing line number: {display}");
        assert!(display.contains("\"abc\""), "missing input: {display}");
    }

    #[test]
    fn test_config_parse_error_includes_line_number() {
        let err = PlotError::ConfigParse {
            line: 42,
            message: "invalid type".to_string(),
        };
        let display = err.to_string();

        assert!(display.contains("42"));
        assert!(display.contains("invalid type"));
    }

    #[test]
    fn test_color_format_includes_value() {
        let err = PlotError::ColorFormat("#12".to_string());
        assert!(err.to_string().contains("#12"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::Other, "no tty");
        let err: PlotError = io_err.into();

        assert!(matches!(err, PlotError::Terminal(_)));
        assert!(err.to_string().contains("no tty"));
    }

    #[test]
    fn test_only_parse_errors_are_recoverable() {
        assert!(parse_error("").is_recoverable());
        assert!(!PlotError::Read(io::Error::new(io::ErrorKind::Other, "x")).is_recoverable());
        assert!(!PlotError::Config("empty".to_string()).is_recoverable());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PlotError>();
    }
}
