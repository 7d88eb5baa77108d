//! Vertical color gradient.
//!
//! Stops are spread evenly over `[0, 1]` and sampled by screen row, so a
//! gradient encodes position on screen rather than sample magnitude.

use ratatui::style::Color;

use crate::error::{PlotError, Result};

/// An ordered list of color stops sampled continuously over `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gradient {
    stops: Vec<Color>,
}

impl Gradient {
    /// Builds a gradient from ordered stops, first stop at `t = 0`.
    ///
    /// A single stop yields a constant color and may be any terminal color.
    /// Two or more stops are interpolated channel by channel, so each must
    /// be [`Color::Rgb`].
    pub fn new(stops: Vec<Color>) -> Result<Self> {
        if stops.is_empty() {
            return Err(PlotError::Config("gradient needs at least one color".to_string()));
        }
        if stops.len() > 1 {
            if let Some(stop) = stops.iter().find(|c| !matches!(c, Color::Rgb(..))) {
                return Err(PlotError::Config(format!(
                    "cannot interpolate non-hex color {stop:?}; use #rrggbb stops for a gradient"
                )));
            }
        }
        Ok(Self { stops })
    }

    /// Creates a constant single-color gradient.
    #[must_use]
    pub fn solid(color: Color) -> Self {
        Self { stops: vec![color] }
    }

    /// Returns the stops in order.
    #[must_use]
    pub fn stops(&self) -> &[Color] {
        &self.stops
    }

    /// Samples the gradient at `t`, clamped into `[0, 1]`.
    #[must_use]
    pub fn at(&self, t: f64) -> Color {
        let first = self.stops[0];
        let segments = self.stops.len() - 1;
        if segments == 0 {
            return first;
        }

        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let scaled = t * segments as f64;
        let segment = (scaled.floor() as usize).min(segments - 1);
        let local_t = scaled - segment as f64;

        lerp(self.stops[segment], self.stops[segment + 1], local_t)
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Self::solid(Color::White)
    }
}

/// Interpolates two RGB colors, rounding each channel.
fn lerp(start: Color, end: Color, t: f64) -> Color {
    let (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) = (start, end) else {
        return start;
    };
    let channel = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;

    Color::Rgb(channel(r1, r2), channel(g1, g2), channel(b1, b2))
}
