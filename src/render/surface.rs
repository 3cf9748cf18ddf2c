use image::{RgbaImage, imageops};

use crate::{
    foundation::{
        core::{Canvas, Rect, Rgba8, snap_to_pixels},
        error::PhotoboothResult,
    },
    model::photo::EncodedImage,
    render::{
        background::Paint,
        codec::{encode_jpeg, rgba_to_rgb},
    },
};

/// Offscreen drawable surface.
///
/// Geometry is in canvas pixels with fractional coordinates; implementations decide how to
/// rasterize edges.
pub trait RasterSurface: Send {
    /// Surface dimensions.
    fn canvas(&self) -> Canvas;

    /// Fill `rect` with `paint`.
    fn fill_rect(&mut self, rect: Rect, paint: &Paint);

    /// Draw `image` stretched into `rect`, smoothed.
    fn draw_image(&mut self, image: &RgbaImage, rect: Rect);

    /// Encode the current contents as JPEG.
    fn encode_jpeg(&self, quality: u8) -> PhotoboothResult<EncodedImage>;
}

/// Produces surfaces for captures and composites.
///
/// `None` means no drawing context is available; callers treat that as "produce nothing".
pub trait SurfaceFactory: Send + Sync {
    /// Create a surface of `canvas` size, cleared to transparent black.
    fn create(&self, canvas: Canvas) -> Option<Box<dyn RasterSurface>>;
}

/// CPU surface backed by an `image::RgbaImage`.
#[derive(Clone, Debug)]
pub struct CpuSurface {
    pixels: RgbaImage,
}

impl CpuSurface {
    /// Allocate a transparent surface.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            pixels: RgbaImage::new(canvas.width, canvas.height),
        }
    }

    /// Borrow the pixel buffer.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Color at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        self.pixels.get_pixel_checked(x, y).copied().map(Rgba8::from_pixel)
    }
}

impl RasterSurface for CpuSurface {
    fn canvas(&self) -> Canvas {
        Canvas::new(self.pixels.width(), self.pixels.height())
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        let Some(px) = snap_to_pixels(rect, self.canvas()) else {
            return;
        };
        for y in px.y..px.y + px.height {
            for x in px.x..px.x + px.width {
                self.pixels.put_pixel(x, y, paint.color_at(x, y).to_pixel());
            }
        }
    }

    fn draw_image(&mut self, image: &RgbaImage, rect: Rect) {
        if image.width() == 0 || image.height() == 0 {
            return;
        }
        let Some(px) = snap_to_pixels(rect, self.canvas()) else {
            return;
        };
        if image.dimensions() == (px.width, px.height) {
            imageops::overlay(&mut self.pixels, image, i64::from(px.x), i64::from(px.y));
        } else {
            let scaled =
                imageops::resize(image, px.width, px.height, imageops::FilterType::Triangle);
            imageops::overlay(&mut self.pixels, &scaled, i64::from(px.x), i64::from(px.y));
        }
    }

    fn encode_jpeg(&self, quality: u8) -> PhotoboothResult<EncodedImage> {
        let bytes = encode_jpeg(&rgba_to_rgb(&self.pixels), quality)?;
        Ok(EncodedImage::new(
            self.pixels.width(),
            self.pixels.height(),
            bytes,
        ))
    }
}

/// Factory for [`CpuSurface`]s with an upper bound on pixel count.
#[derive(Clone, Copy, Debug)]
pub struct CpuSurfaceFactory {
    /// Largest surface (in pixels) this factory will allocate.
    pub max_pixels: u64,
}

impl Default for CpuSurfaceFactory {
    fn default() -> Self {
        Self {
            // Comfortably above a 4K camera frame and the 1600x2400 strip canvas.
            max_pixels: 64 * 1024 * 1024,
        }
    }
}

impl SurfaceFactory for CpuSurfaceFactory {
    fn create(&self, canvas: Canvas) -> Option<Box<dyn RasterSurface>> {
        let pixels = u64::from(canvas.width) * u64::from(canvas.height);
        if pixels == 0 || pixels > self.max_pixels {
            return None;
        }
        Some(Box::new(CpuSurface::new(canvas)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
