use std::{fmt, str::FromStr};

use crate::foundation::error::{PhotoboothError, PhotoboothResult};

/// Largest accepted border width.
pub const MAX_BORDER_WIDTH: u8 = 10;
/// Largest accepted spacing.
pub const MAX_SPACING: u8 = 20;

/// User-tunable geometry knobs for the compositor.
///
/// Setters clamp into range; the fields stay private so a value outside
/// `[0, MAX_BORDER_WIDTH]` / `[0, MAX_SPACING]` cannot be constructed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub struct StyleParameters {
    border_width: u8,
    spacing: u8,
}

impl StyleParameters {
    /// Build clamped style parameters.
    pub fn new(border_width: u32, spacing: u32) -> Self {
        Self::default()
            .with_border_width(border_width)
            .with_spacing(spacing)
    }

    /// Border width in `[0, 10]`.
    pub fn border_width(self) -> u8 {
        self.border_width
    }

    /// Spacing in `[0, 20]`.
    pub fn spacing(self) -> u8 {
        self.spacing
    }

    /// Copy with a new border width, clamped to `[0, 10]`.
    pub fn with_border_width(self, border_width: u32) -> Self {
        Self {
            border_width: border_width.min(u32::from(MAX_BORDER_WIDTH)) as u8,
            ..self
        }
    }

    /// Copy with a new spacing, clamped to `[0, 20]`.
    pub fn with_spacing(self, spacing: u32) -> Self {
        Self {
            spacing: spacing.min(u32::from(MAX_SPACING)) as u8,
            ..self
        }
    }
}

impl<'de> serde::Deserialize<'de> for StyleParameters {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Repr {
            #[serde(default)]
            border_width: u32,
            #[serde(default)]
            spacing: u32,
        }

        let r = Repr::deserialize(deserializer)?;
        Ok(Self::new(r.border_width, r.spacing))
    }
}

/// Canvas background behind the photos.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundChoice {
    /// Solid white.
    #[default]
    White,
    /// Solid black.
    Black,
    /// Solid gray.
    Gray,
    /// Repeating black/white checkerboard tile.
    Pattern,
}

impl BackgroundChoice {
    /// Every background, in picker order.
    pub const ALL: [BackgroundChoice; 4] = [
        BackgroundChoice::White,
        BackgroundChoice::Black,
        BackgroundChoice::Gray,
        BackgroundChoice::Pattern,
    ];

    /// Lowercase name used in configuration and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            BackgroundChoice::White => "white",
            BackgroundChoice::Black => "black",
            BackgroundChoice::Gray => "gray",
            BackgroundChoice::Pattern => "pattern",
        }
    }
}

impl fmt::Display for BackgroundChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BackgroundChoice {
    type Err = PhotoboothError;

    fn from_str(s: &str) -> PhotoboothResult<Self> {
        BackgroundChoice::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PhotoboothError::validation(format!("unknown background '{s}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/style.rs"]
mod tests;
