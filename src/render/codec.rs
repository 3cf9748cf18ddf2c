use std::io::Cursor;

use anyhow::Context;
use image::{RgbImage, RgbaImage, codecs::jpeg::JpegEncoder};

use crate::foundation::error::{PhotoboothError, PhotoboothResult};

/// JPEG quality used for captures and composites ("maximum quality").
pub const MAX_JPEG_QUALITY: u8 = 100;

/// Decode encoded bytes (any format `image` recognizes) into straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> PhotoboothResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Encode an RGB8 raster as JPEG at `quality` (1..=100).
pub fn encode_jpeg(rgb: &RgbImage, quality: u8) -> PhotoboothResult<Vec<u8>> {
    if !(1..=100).contains(&quality) {
        return Err(PhotoboothError::validation(format!(
            "jpeg quality must be in 1..=100, got {quality}"
        )));
    }
    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(PhotoboothError::codec("cannot encode an empty raster"));
    }
    let mut buf = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(Cursor::new(&mut buf), quality);
        encoder
            .encode_image(rgb)
            .map_err(|e| PhotoboothError::codec(format!("jpeg encode failed: {e}")))?;
    }
    Ok(buf)
}

/// Drop the alpha channel. Rasters encoded here are opaque.
pub fn rgba_to_rgb(rgba: &RgbaImage) -> RgbImage {
    image::DynamicImage::ImageRgba8(rgba.clone()).to_rgb8()
}

#[cfg(test)]
#[path = "../../tests/unit/render/codec.rs"]
mod tests;
