//! Concrete cameras that do not need a capture device.
//!
//! - [`MemoryCamera`] serves frames held in memory; it counts acquire/release calls.
//! - [`DirectoryCamera`] streams still images from a directory, one file per frame, looping.

use std::{
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use image::RgbaImage;
use tracing::{debug, warn};

use crate::{
    capture::camera::{Camera, CameraConstraints, FrameSource},
    foundation::error::{PhotoboothError, PhotoboothResult},
};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "tif", "tiff", "webp"];

/// Frame source cycling through a fixed list of frames.
#[derive(Clone, Debug)]
pub struct LoopingFrames {
    frames: Arc<Vec<RgbaImage>>,
    next: usize,
}

impl LoopingFrames {
    /// Loop over `frames`. An empty list never yields a frame.
    pub fn new(frames: Vec<RgbaImage>) -> Self {
        Self {
            frames: Arc::new(frames),
            next: 0,
        }
    }
}

impl FrameSource for LoopingFrames {
    fn current_frame(&mut self) -> Option<RgbaImage> {
        if self.frames.is_empty() {
            return None;
        }
        let frame = self.frames[self.next % self.frames.len()].clone();
        self.next = self.next.wrapping_add(1);
        Some(frame)
    }
}

/// In-memory camera.
#[derive(Debug, Default)]
pub struct MemoryCamera {
    frames: Vec<RgbaImage>,
    unavailable: bool,
    acquired: AtomicUsize,
    released: AtomicUsize,
}

impl MemoryCamera {
    /// Camera whose feed loops over `frames`.
    pub fn new(frames: Vec<RgbaImage>) -> Self {
        Self {
            frames,
            ..Default::default()
        }
    }

    /// Camera whose acquisition always fails (no device, permission denied).
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }

    /// Successful acquisitions so far.
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    /// Releases so far.
    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    /// Feeds currently held by someone.
    pub fn live_feeds(&self) -> usize {
        self.acquired().saturating_sub(self.released())
    }
}

impl Camera for MemoryCamera {
    fn acquire(&self, _constraints: CameraConstraints) -> PhotoboothResult<Box<dyn FrameSource>> {
        if self.unavailable {
            return Err(PhotoboothError::camera("no camera device available"));
        }
        self.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(LoopingFrames::new(self.frames.clone())))
    }

    fn release(&self, _source: Box<dyn FrameSource>) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Camera backed by a directory of still images.
#[derive(Clone, Debug)]
pub struct DirectoryCamera {
    dir: PathBuf,
}

impl DirectoryCamera {
    /// Camera reading frames from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Image files in the directory, sorted by name.
    pub fn frame_files(&self) -> PhotoboothResult<Vec<PathBuf>> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| {
            PhotoboothError::camera(format!("open frame dir '{}': {e}", self.dir.display()))
        })?;
        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && is_image_path(p))
            .collect();
        files.sort();
        Ok(files)
    }
}

impl Camera for DirectoryCamera {
    fn acquire(&self, constraints: CameraConstraints) -> PhotoboothResult<Box<dyn FrameSource>> {
        let files = self.frame_files()?;
        if files.is_empty() {
            return Err(PhotoboothError::camera(format!(
                "no image files in '{}'",
                self.dir.display()
            )));
        }
        debug!(
            dir = %self.dir.display(),
            frames = files.len(),
            ideal_width = constraints.width,
            ideal_height = constraints.height,
            "directory camera opened"
        );
        Ok(Box::new(DirectoryFrames { files, next: 0 }))
    }

    fn release(&self, _source: Box<dyn FrameSource>) {
        debug!(dir = %self.dir.display(), "directory camera closed");
    }
}

struct DirectoryFrames {
    files: Vec<PathBuf>,
    next: usize,
}

impl FrameSource for DirectoryFrames {
    fn current_frame(&mut self) -> Option<RgbaImage> {
        let path = self.files.get(self.next % self.files.len().max(1))?;
        self.next = self.next.wrapping_add(1);
        match image::open(path) {
            Ok(img) => Some(img.to_rgba8()),
            Err(err) => {
                warn!(path = %path.display(), %err, "frame file unreadable");
                None
            }
        }
    }
}

fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.as_str()))
}

#[cfg(test)]
#[path = "../../tests/unit/capture/sources.rs"]
mod tests;
