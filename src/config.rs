//! Configuration for the plotter.
//!
//! Two layers: [`Config`] is the optional YAML file with string colors,
//! [`PlotConfig`] is the immutable, fully resolved render configuration.
//! Precedence when assembling a [`PlotConfig`] is CLI > file > defaults.

use crate::color::{resolve_all, resolve_color};
use crate::error::{PlotError, Result};
use crate::mapping::Bounds;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Relative location of the config file under the user config directory.
const CONFIG_FILE: &str = "realplot/config.yaml";

/// The only config file version this build understands.
pub const CONFIG_VERSION: u32 = 1;

/// Settings read from the YAML config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Draw a border around the chart.
    #[serde(default = "default_border")]
    pub border: bool,

    /// Border color name or `#rrggbb`.
    #[serde(default = "default_border_color")]
    pub border_color: String,

    /// Gradient stops from top to bottom of the screen.
    #[serde(default = "default_colors")]
    pub colors: Vec<String>,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}
fn default_border() -> bool {
    true
}
fn default_border_color() -> String {
    "black".to_string()
}
fn default_colors() -> Vec<String> {
    vec!["white".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            border: default_border(),
            border_color: default_border_color(),
            colors: default_colors(),
        }
    }
}

impl Config {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file path, if the platform has a config directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_FILE))
    }

    /// Loads configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PlotError::Config(format!("cannot read {}: {e}", path.display()))
        })?;

        Self::parse(&content)
    }

    /// Loads configuration, falling back to defaults only when the file is
    /// absent. A file that exists but does not parse is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parses configuration from a YAML string.
    ///
    /// Files declaring a version other than [`CONFIG_VERSION`] are rejected.
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            PlotError::ConfigParse {
                line,
                message: e.to_string(),
            }
        })?;

        if config.version != CONFIG_VERSION {
            return Err(PlotError::Config(format!(
                "unsupported config version {} (expected {CONFIG_VERSION})",
                config.version
            )));
        }
        Ok(config)
    }
}

/// Command-line overrides; `None`/empty means "use the file value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Force the border off.
    pub no_border: bool,
    /// Border color override.
    pub border_color: Option<String>,
    /// Gradient stop overrides.
    pub colors: Vec<String>,
}

/// Immutable, fully resolved render configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotConfig {
    /// Inclusive value range.
    pub bounds: Bounds,
    /// Draw a one-cell border around the chart.
    pub border: bool,
    /// Border glyph color.
    pub border_color: Color,
    /// Gradient stops, top of screen first. Never empty.
    pub colors: Vec<Color>,
}

impl PlotConfig {
    /// Builds a plot configuration with a white graph and black border.
    #[must_use]
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            border: true,
            border_color: Color::Black,
            colors: vec![Color::White],
        }
    }

    /// Enables or disables the border.
    #[must_use]
    pub fn border(mut self, border: bool) -> Self {
        self.border = border;
        self
    }

    /// Sets the border color.
    #[must_use]
    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    /// Sets the gradient stops. An empty list keeps the current stops.
    #[must_use]
    pub fn colors(mut self, colors: Vec<Color>) -> Self {
        if !colors.is_empty() {
            self.colors = colors;
        }
        self
    }

    /// Resolves file settings and CLI overrides into a plot configuration.
    pub fn resolve(bounds: Bounds, file: &Config, overrides: &Overrides) -> Result<Self> {
        let border_color = overrides
            .border_color
            .as_deref()
            .unwrap_or(&file.border_color);
        let colors = if overrides.colors.is_empty() {
            &file.colors
        } else {
            &overrides.colors
        };

        Ok(Self::new(bounds)
            .border(file.border && !overrides.no_border)
            .border_color(resolve_color(border_color)?)
            .colors(resolve_all(colors)?))
    }
}
