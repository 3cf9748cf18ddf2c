use std::sync::{Arc, mpsc};

use image::RgbaImage;
use tracing::{debug, info, warn};

use crate::{
    compose::join::DecodeJoin,
    foundation::{
        core::Rgba8,
        error::{PhotoboothError, PhotoboothResult},
    },
    layout::placement::{border_rect, placement},
    model::{
        photo::{CapturedPhoto, EncodedImage},
        style::{BackgroundChoice, StyleParameters},
        template::Template,
    },
    render::{
        background::{PATTERN_TILE_PX, Paint, background_paint},
        codec::{MAX_JPEG_QUALITY, decode_image},
        surface::{CpuSurfaceFactory, SurfaceFactory},
    },
};

/// Compositor tuning.
#[derive(Clone, Debug)]
pub struct CompositorOpts {
    /// JPEG quality of the composite (1..=100).
    pub jpeg_quality: u8,
    /// Edge length of the pattern background tile.
    pub pattern_tile_px: u32,
    /// Decode worker threads. `None` uses rayon defaults.
    pub decode_threads: Option<usize>,
}

impl Default for CompositorOpts {
    fn default() -> Self {
        Self {
            jpeg_quality: MAX_JPEG_QUALITY,
            pattern_tile_px: PATTERN_TILE_PX,
            decode_threads: None,
        }
    }
}

/// Merges captured photos, background, and borders into one encoded image.
///
/// Every call recomposes from scratch; nothing is memoized between calls.
pub struct Compositor {
    opts: CompositorOpts,
    surfaces: Arc<dyn SurfaceFactory>,
    pool: rayon::ThreadPool,
}

impl Compositor {
    /// Compositor drawing onto CPU surfaces.
    pub fn new(opts: CompositorOpts) -> PhotoboothResult<Self> {
        Self::with_surfaces(opts, Arc::new(CpuSurfaceFactory::default()))
    }

    /// Compositor drawing onto surfaces from `surfaces`.
    pub fn with_surfaces(
        opts: CompositorOpts,
        surfaces: Arc<dyn SurfaceFactory>,
    ) -> PhotoboothResult<Self> {
        if !(1..=100).contains(&opts.jpeg_quality) {
            return Err(PhotoboothError::validation(format!(
                "jpeg quality must be in 1..=100, got {}",
                opts.jpeg_quality
            )));
        }
        let pool = build_thread_pool(opts.decode_threads)?;
        Ok(Self {
            opts,
            surfaces,
            pool,
        })
    }

    /// Options this compositor was built with.
    pub fn opts(&self) -> &CompositorOpts {
        &self.opts
    }

    /// Compose `photos` into `template`.
    ///
    /// Returns `None` without drawing when there is no template or no photo, and when any
    /// step fails (the failure is logged). Decodes run concurrently; drawing starts once every
    /// decode has reported back.
    pub fn generate_final_image(
        &self,
        photos: &[CapturedPhoto],
        template: Option<Template>,
        background: BackgroundChoice,
        style: StyleParameters,
    ) -> Option<EncodedImage> {
        match self.try_generate(photos, template, background, style) {
            Ok(out) => out,
            Err(err) => {
                warn!(%err, "composite failed");
                None
            }
        }
    }

    /// Fallible form of [`Compositor::generate_final_image`].
    #[tracing::instrument(
        skip(self, photos, style),
        fields(photos = photos.len(), border = style.border_width(), spacing = style.spacing())
    )]
    pub fn try_generate(
        &self,
        photos: &[CapturedPhoto],
        template: Option<Template>,
        background: BackgroundChoice,
        style: StyleParameters,
    ) -> PhotoboothResult<Option<EncodedImage>> {
        let Some(template) = template else {
            debug!("no template selected, nothing to compose");
            return Ok(None);
        };
        if photos.is_empty() {
            debug!("no photos captured, nothing to compose");
            return Ok(None);
        }

        let canvas = template.canvas();
        let Some(mut surface) = self.surfaces.create(canvas) else {
            warn!(
                width = canvas.width,
                height = canvas.height,
                "no drawing surface available"
            );
            return Ok(None);
        };

        let paint = background_paint(background, self.opts.pattern_tile_px);
        surface.fill_rect(canvas.bounds(), &paint);

        let decoded = self.decode_all(photos)?;
        let border = Paint::Solid(Rgba8::BLACK);
        for (index, image) in decoded.iter().enumerate() {
            let Some(image) = image else {
                continue;
            };
            let rect = placement(template, index, canvas, style.spacing());
            if let Some(frame) = border_rect(rect, style.border_width()) {
                surface.fill_rect(frame, &border);
            }
            surface.draw_image(image, rect);
        }

        let out = surface.encode_jpeg(self.opts.jpeg_quality)?;
        info!(
            width = out.width,
            height = out.height,
            bytes = out.len(),
            "composite ready"
        );
        Ok(Some(out))
    }

    fn decode_all(&self, photos: &[CapturedPhoto]) -> PhotoboothResult<Vec<Option<RgbaImage>>> {
        let (tx, rx) = mpsc::channel();
        for (index, photo) in photos.iter().enumerate() {
            let tx = tx.clone();
            let bytes = Arc::clone(&photo.image.bytes);
            self.pool.spawn(move || {
                let _ = tx.send((index, decode_image(&bytes)));
            });
        }
        drop(tx);

        let mut join = DecodeJoin::new(photos.len());
        while !join.is_ready() {
            let (index, decoded) = rx.recv().map_err(|_| {
                PhotoboothError::codec(format!(
                    "decode workers stopped with {} photos outstanding",
                    join.remaining()
                ))
            })?;
            let decoded = match decoded {
                Ok(img) => Some(img),
                Err(err) => {
                    warn!(index, %err, "photo failed to decode, leaving its slot empty");
                    None
                }
            };
            join.complete(index, decoded)?;
        }
        join.into_results()
    }
}

fn build_thread_pool(threads: Option<usize>) -> PhotoboothResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(PhotoboothError::validation(
            "decode threads must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("decode-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| PhotoboothError::Other(anyhow::anyhow!("failed to build decode pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
