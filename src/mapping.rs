//! Value-to-screen coordinate mapping.

use crate::error::{PlotError, Result};

/// Inclusive value range fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Lowest plotted value; anything below pins to the bottom row.
    pub min: i64,
    /// Highest plotted value; anything above pins to the top row.
    pub max: i64,
}

impl Bounds {
    /// Creates bounds, rejecting `min > max`.
    pub fn new(min: i64, max: i64) -> Result<Self> {
        if min > max {
            return Err(PlotError::Config(format!(
                "lower bound {min} is greater than upper bound {max}"
            )));
        }
        Ok(Self { min, max })
    }

    /// Maps a sample onto a sub-pixel height in `[0, top]`.
    #[must_use]
    pub fn map(&self, value: i64, top: i64) -> i64 {
        map_range(value, self.min, self.max, 0, top)
    }
}

/// Maps `value` from the inclusive range `[in_min, in_max]` onto the
/// inclusive range `[out_min, out_max]`, rounding to the nearest integer.
///
/// The input is clamped before scaling and the result is clamped after, so
/// out-of-bounds samples pin to the edges of the output range. A degenerate
/// input range (`in_min == in_max`) maps every value to `out_min`.
///
/// # Example
///
/// ```
/// use realplot::mapping::map_range;
///
/// assert_eq!(map_range(5, 0, 10, 0, 20), 10);
/// assert_eq!(map_range(-3, 0, 10, 0, 20), 0);
/// assert_eq!(map_range(7, 5, 5, 0, 20), 0);
/// ```
#[must_use]
pub fn map_range(value: i64, in_min: i64, in_max: i64, out_min: i64, out_max: i64) -> i64 {
    if in_min == in_max {
        return out_min;
    }

    let value = value.clamp(in_min.min(in_max), in_min.max(in_max));
    let fraction = (value as f64 - in_min as f64) / (in_max as f64 - in_min as f64);
    let scaled = (fraction * (out_max as f64 - out_min as f64)).round() as i64;

    scaled
        .saturating_add(out_min)
        .clamp(out_min.min(out_max), out_min.max(out_max))
}
