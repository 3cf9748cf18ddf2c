use std::sync::Arc;

use image::RgbaImage;
use tracing::warn;

use crate::{
    foundation::{
        core::Rgba8,
        error::{PhotoboothError, PhotoboothResult},
    },
    model::style::BackgroundChoice,
};

/// Edge length of the checkerboard tile used by [`BackgroundChoice::Pattern`].
pub const PATTERN_TILE_PX: u32 = 20;

/// Something a rectangle can be filled with.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    /// Uniform color.
    Solid(Rgba8),
    /// Tile repeated from the surface origin.
    Pattern(Arc<RgbaImage>),
}

impl Paint {
    /// Color this paint produces at surface coordinate `(x, y)`.
    pub fn color_at(&self, x: u32, y: u32) -> Rgba8 {
        match self {
            Paint::Solid(c) => *c,
            Paint::Pattern(tile) => {
                Rgba8::from_pixel(*tile.get_pixel(x % tile.width(), y % tile.height()))
            }
        }
    }
}

/// Checkerboard tile of `size x size`: black top-left and bottom-right quadrants, white
/// elsewhere. `size` must be a positive even number.
pub fn checkerboard_tile(size: u32) -> PhotoboothResult<RgbaImage> {
    if size == 0 || !size.is_multiple_of(2) {
        return Err(PhotoboothError::validation(format!(
            "pattern tile size must be a positive even number, got {size}"
        )));
    }
    let half = size / 2;
    Ok(RgbaImage::from_fn(size, size, |x, y| {
        if (x < half) == (y < half) {
            Rgba8::BLACK.to_pixel()
        } else {
            Rgba8::WHITE.to_pixel()
        }
    }))
}

/// Resolve a background choice to a paint.
///
/// The pattern tile is generated here, once per call; if that fails the background falls
/// back to white.
pub fn background_paint(choice: BackgroundChoice, tile_px: u32) -> Paint {
    match choice {
        BackgroundChoice::White => Paint::Solid(Rgba8::WHITE),
        BackgroundChoice::Black => Paint::Solid(Rgba8::BLACK),
        BackgroundChoice::Gray => Paint::Solid(Rgba8::GRAY),
        BackgroundChoice::Pattern => match checkerboard_tile(tile_px) {
            Ok(tile) => Paint::Pattern(Arc::new(tile)),
            Err(err) => {
                warn!(%err, "pattern background unavailable, falling back to white");
                Paint::Solid(Rgba8::WHITE)
            }
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/background.rs"]
mod tests;
