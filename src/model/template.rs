use std::{fmt, str::FromStr};

use crate::foundation::{
    core::Canvas,
    error::{PhotoboothError, PhotoboothResult},
};

/// Width shared by every template's output canvas.
pub const CANVAS_WIDTH: u32 = 1600;
/// Height of the square templates' output canvas.
pub const SQUARE_CANVAS_HEIGHT: u32 = 1600;
/// Height of the strip template's output canvas.
pub const STRIP_CANVAS_HEIGHT: u32 = 2400;

/// Fixed layout rule: how many photos a session captures and where each one lands.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    /// Three photos stacked vertically on a tall canvas.
    Strip,
    /// Four photos in a 2x2 arrangement.
    Grid,
    /// One large photo on the left, the rest stacked on the right.
    Collage,
    /// One photo filling the canvas.
    Single,
}

impl Template {
    /// Every template, in selection-screen order.
    pub const ALL: [Template; 4] = [
        Template::Strip,
        Template::Grid,
        Template::Collage,
        Template::Single,
    ];

    /// Number of photos a session with this template captures.
    pub fn required_count(self) -> usize {
        match self {
            Template::Strip => 3,
            Template::Grid => 4,
            Template::Collage => 3,
            Template::Single => 1,
        }
    }

    /// Output canvas for the composite.
    pub fn canvas(self) -> Canvas {
        match self {
            Template::Strip => Canvas::new(CANVAS_WIDTH, STRIP_CANVAS_HEIGHT),
            Template::Grid | Template::Collage | Template::Single => {
                Canvas::new(CANVAS_WIDTH, SQUARE_CANVAS_HEIGHT)
            }
        }
    }

    /// Lowercase name used in configuration and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Template::Strip => "strip",
            Template::Grid => "grid",
            Template::Collage => "collage",
            Template::Single => "single",
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Template {
    type Err = PhotoboothError;

    fn from_str(s: &str) -> PhotoboothResult<Self> {
        Template::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PhotoboothError::validation(format!("unknown template '{s}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/template.rs"]
mod tests;
