use std::sync::Arc;

use image::RgbaImage;
use tracing::{info, warn};

use crate::foundation::error::PhotoboothResult;

/// Requested camera resolution. Cameras treat it as a hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CameraConstraints {
    /// Ideal width in pixels.
    pub width: u32,
    /// Ideal height in pixels.
    pub height: u32,
}

impl Default for CameraConstraints {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// A live video feed.
pub trait FrameSource: Send {
    /// The current frame at the source's native resolution, or `None` when no frame is
    /// available (not started yet, device hiccup).
    fn current_frame(&mut self) -> Option<RgbaImage>;
}

/// Camera capability: hands out an exclusive live feed and takes it back.
pub trait Camera: Send + Sync {
    /// Acquire the feed.
    fn acquire(&self, constraints: CameraConstraints) -> PhotoboothResult<Box<dyn FrameSource>>;

    /// Stop the feed and release the device.
    fn release(&self, source: Box<dyn FrameSource>);
}

/// Exclusive hold on a camera feed for the duration of the capture screen.
///
/// The feed is released exactly once, on [`CameraSession::close`] or on drop, whichever comes
/// first. A session whose acquisition failed holds no feed; captures through it no-op.
pub struct CameraSession {
    camera: Arc<dyn Camera>,
    source: Option<Box<dyn FrameSource>>,
}

impl CameraSession {
    /// Acquire the feed. Failure is logged and yields a session without a feed.
    pub fn open(camera: Arc<dyn Camera>, constraints: CameraConstraints) -> Self {
        let source = match camera.acquire(constraints) {
            Ok(source) => {
                info!(
                    width = constraints.width,
                    height = constraints.height,
                    "camera acquired"
                );
                Some(source)
            }
            Err(err) => {
                warn!(%err, "camera unavailable, capture disabled");
                None
            }
        };
        Self { camera, source }
    }

    /// Return `true` when a live feed is held.
    pub fn is_live(&self) -> bool {
        self.source.is_some()
    }

    /// Borrow the live feed, if any.
    pub fn source_mut(&mut self) -> Option<&mut (dyn FrameSource + 'static)> {
        self.source.as_deref_mut()
    }

    /// Release the feed now.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(source) = self.source.take() {
            self.camera.release(source);
            info!("camera released");
        }
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for CameraSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraSession")
            .field("live", &self.is_live())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/camera.rs"]
mod tests;
