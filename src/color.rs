//! Color resolution from user-supplied strings.
//!
//! Accepts the 16 named terminal colors (plus `default`) or a `#rrggbb` hex
//! string, case-insensitively. Named colors resolve through a table built
//! once per process.

use std::collections::HashMap;
use std::sync::OnceLock;

use ratatui::style::Color;

use crate::error::{PlotError, Result};

/// Named terminal colors in ANSI palette order.
pub const TERMINAL_COLORS: [(&str, Color); 16] = [
    ("black", Color::Black),
    ("red", Color::Red),
    ("green", Color::Green),
    ("yellow", Color::Yellow),
    ("blue", Color::Blue),
    ("magenta", Color::Magenta),
    ("cyan", Color::Cyan),
    ("lightgray", Color::Gray),
    ("gray", Color::DarkGray),
    ("lightred", Color::LightRed),
    ("lightgreen", Color::LightGreen),
    ("lightyellow", Color::LightYellow),
    ("lightblue", Color::LightBlue),
    ("lightmagenta", Color::LightMagenta),
    ("lightcyan", Color::LightCyan),
    ("white", Color::White),
];

fn named_colors() -> &'static HashMap<&'static str, Color> {
    static TABLE: OnceLock<HashMap<&'static str, Color>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table: HashMap<_, _> = TERMINAL_COLORS.into_iter().collect();
        table.insert("default", Color::Reset);
        table
    })
}

/// Resolves a color name or `#rrggbb` string into a render-ready color.
///
/// # Example
///
/// ```
/// use ratatui::style::Color;
/// use realplot::color::resolve_color;
///
/// assert_eq!(resolve_color("Red").unwrap(), Color::Red);
/// assert_eq!(resolve_color("#FF8000").unwrap(), Color::Rgb(255, 128, 0));
/// assert!(resolve_color("#ff80").is_err());
/// ```
pub fn resolve_color(input: &str) -> Result<Color> {
    let name = input.trim().to_ascii_lowercase();

    if let Some(&color) = named_colors().get(name.as_str()) {
        return Ok(color);
    }

    if let Some(hex) = name.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| PlotError::ColorFormat(input.to_string()));
    }

    Err(PlotError::ColorFormat(input.to_string()))
}

/// Resolves every entry of `inputs`, stopping at the first failure.
pub fn resolve_all<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<Color>> {
    inputs.iter().map(|s| resolve_color(s.as_ref())).collect()
}

/// Comma-separated list of accepted color names, for help text.
#[must_use]
pub fn color_names() -> String {
    TERMINAL_COLORS
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    Some(Color::from_u32(value))
}
