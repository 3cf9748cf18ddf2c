use std::sync::Arc;

/// An encoded raster image (JPEG) with its pixel dimensions.
///
/// Bytes are shared, so cloning a photo or a composite never copies pixel data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Encoded bytes.
    pub bytes: Arc<Vec<u8>>,
}

impl EncodedImage {
    /// Wrap already-encoded bytes.
    pub fn new(width: u32, height: u32, bytes: Vec<u8>) -> Self {
        Self {
            width,
            height,
            bytes: Arc::new(bytes),
        }
    }

    /// Encoded size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Return `true` when there are no encoded bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Unique, time-derived photo identifier (Unix milliseconds, bumped on collision).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PhotoId(pub i64);

impl PhotoId {
    /// Identifier for a capture at `now_ms`, strictly greater than `last`.
    pub fn next(last: Option<PhotoId>, now_ms: i64) -> Self {
        match last {
            Some(PhotoId(prev)) if now_ms <= prev => PhotoId(prev + 1),
            _ => PhotoId(now_ms),
        }
    }
}

/// One still frame grabbed by the capture sequencer. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedPhoto {
    /// Unique identifier.
    pub id: PhotoId,
    /// Maximum-quality JPEG of the frame at native resolution.
    pub image: EncodedImage,
    /// Capture time, Unix milliseconds.
    pub captured_at_ms: i64,
}

#[cfg(test)]
#[path = "../../tests/unit/model/photo.rs"]
mod tests;
