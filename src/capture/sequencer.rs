use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    capture::camera::FrameSource,
    foundation::{clock::Clock, core::Canvas},
    model::photo::{CapturedPhoto, PhotoId},
    render::{
        codec::MAX_JPEG_QUALITY,
        surface::{CpuSurfaceFactory, SurfaceFactory},
    },
};

/// Turns the current frame of a live feed into a [`CapturedPhoto`].
pub struct FrameGrabber {
    surfaces: Arc<dyn SurfaceFactory>,
    clock: Arc<dyn Clock>,
    jpeg_quality: u8,
}

impl FrameGrabber {
    /// Grabber drawing onto CPU surfaces and encoding at maximum quality.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_surfaces(clock, Arc::new(CpuSurfaceFactory::default()), MAX_JPEG_QUALITY)
    }

    /// Grabber with explicit surfaces and JPEG quality.
    pub fn with_surfaces(
        clock: Arc<dyn Clock>,
        surfaces: Arc<dyn SurfaceFactory>,
        jpeg_quality: u8,
    ) -> Self {
        Self {
            surfaces,
            clock,
            jpeg_quality,
        }
    }

    /// Clock used to stamp captures.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Grab one frame at native resolution and encode it.
    ///
    /// Returns `None` (and logs at debug level) when there is no feed, no frame, no surface,
    /// or encoding fails. `last` is the most recent photo id, used to keep ids unique.
    pub fn capture(
        &self,
        source: Option<&mut (dyn FrameSource + 'static)>,
        last: Option<PhotoId>,
    ) -> Option<CapturedPhoto> {
        let Some(source) = source else {
            debug!("capture skipped: no live feed");
            return None;
        };
        let Some(frame) = source.current_frame() else {
            debug!("capture skipped: feed has no frame");
            return None;
        };

        let canvas = Canvas::new(frame.width(), frame.height());
        let Some(mut surface) = self.surfaces.create(canvas) else {
            debug!(
                width = canvas.width,
                height = canvas.height,
                "capture skipped: no drawing surface"
            );
            return None;
        };
        surface.draw_image(&frame, canvas.bounds());
        let image = match surface.encode_jpeg(self.jpeg_quality) {
            Ok(image) => image,
            Err(err) => {
                debug!(%err, "capture skipped: encode failed");
                return None;
            }
        };

        let now = self.clock.now_millis();
        let photo = CapturedPhoto {
            id: PhotoId::next(last, now),
            image,
            captured_at_ms: now,
        };
        info!(
            id = photo.id.0,
            width = photo.image.width,
            height = photo.image.height,
            "photo captured"
        );
        Some(photo)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/sequencer.rs"]
mod tests;
