use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::Context;
use tracing::{info, warn};

use crate::{foundation::error::PhotoboothResult, model::photo::EncodedImage};

/// Filename for an exported composite.
pub fn composite_filename(timestamp_ms: i64) -> String {
    format!("photobooth-{timestamp_ms}.jpg")
}

/// Filename for an exported photo; `index` is the 0-based capture index.
pub fn photo_filename(index: usize, timestamp_ms: i64) -> String {
    format!("photo-{}-{timestamp_ms}.jpg", index + 1)
}

/// Download capability: persists an encoded image under a filename.
///
/// There is no failure signal; implementations log what goes wrong.
pub trait Download: Send + Sync {
    fn persist(&self, image: &EncodedImage, filename: &str);
}

/// Writes exports into a directory, creating it on first use.
#[derive(Clone, Debug)]
pub struct DirectoryDownload {
    dir: PathBuf,
}

impl DirectoryDownload {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write(&self, image: &EncodedImage, filename: &str) -> PhotoboothResult<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create export dir '{}'", self.dir.display()))?;
        let path = self.dir.join(filename);
        fs::write(&path, image.bytes.as_slice())
            .with_context(|| format!("write export '{}'", path.display()))?;
        Ok(path)
    }
}

impl Download for DirectoryDownload {
    fn persist(&self, image: &EncodedImage, filename: &str) {
        match self.write(image, filename) {
            Ok(path) => info!(path = %path.display(), bytes = image.len(), "exported"),
            Err(err) => warn!(filename, %err, "export failed"),
        }
    }
}

/// Keeps exports in memory.
#[derive(Debug, Default)]
pub struct MemoryDownload {
    saved: Mutex<Vec<(String, EncodedImage)>>,
}

impl MemoryDownload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything persisted so far, in order.
    pub fn saved(&self) -> Vec<(String, EncodedImage)> {
        match self.saved.lock() {
            Ok(saved) => saved.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Download for MemoryDownload {
    fn persist(&self, image: &EncodedImage, filename: &str) {
        let mut saved = match self.saved.lock() {
            Ok(saved) => saved,
            Err(poisoned) => poisoned.into_inner(),
        };
        saved.push((filename.to_owned(), image.clone()));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/download.rs"]
mod tests;
