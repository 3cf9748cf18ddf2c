//! Booth configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config file. Environment
//! variables override file values:
//!
//! - `PHOTOBOOTH_EXPORT_DIR`
//! - `PHOTOBOOTH_DECODE_THREADS`
//! - `PHOTOBOOTH_JPEG_QUALITY`

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    capture::{camera::CameraConstraints, countdown::DEFAULT_COUNTDOWN_SECS},
    compose::compositor::CompositorOpts,
    foundation::error::{PhotoboothError, PhotoboothResult},
    render::{background::PATTERN_TILE_PX, codec::MAX_JPEG_QUALITY},
};

/// Overrides [`BoothConfig::export_dir`].
pub const ENV_EXPORT_DIR: &str = "PHOTOBOOTH_EXPORT_DIR";
/// Overrides [`BoothConfig::decode_threads`].
pub const ENV_DECODE_THREADS: &str = "PHOTOBOOTH_DECODE_THREADS";
/// Overrides [`BoothConfig::jpeg_quality`].
pub const ENV_JPEG_QUALITY: &str = "PHOTOBOOTH_JPEG_QUALITY";

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoothConfig {
    /// Resolution hint passed to the camera.
    pub camera: CameraConstraints,
    /// Countdown length in seconds.
    pub countdown_secs: u32,
    /// JPEG quality for captures and composites (1..=100).
    pub jpeg_quality: u8,
    /// Edge length of the pattern background tile.
    pub pattern_tile_px: u32,
    /// Decode worker threads; `None` lets rayon decide.
    pub decode_threads: Option<usize>,
    /// Where exports are written.
    pub export_dir: PathBuf,
    pub logging: LoggingConfig,
}

impl Default for BoothConfig {
    fn default() -> Self {
        Self {
            camera: CameraConstraints::default(),
            countdown_secs: DEFAULT_COUNTDOWN_SECS,
            jpeg_quality: MAX_JPEG_QUALITY,
            pattern_tile_px: PATTERN_TILE_PX,
            decode_threads: None,
            export_dir: PathBuf::from("./photobooth-export"),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directive (e.g. `"info"`, `"photobooth=debug,warn"`). `RUST_LOG` wins when set.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

impl BoothConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> PhotoboothResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json(&text)
    }

    /// Parse a JSON config document.
    pub fn from_json(text: &str) -> PhotoboothResult<Self> {
        serde_json::from_str(text).map_err(|e| PhotoboothError::config(format!("parse: {e}")))
    }

    /// Apply `PHOTOBOOTH_*` environment overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup. Unparsable values are ignored with a
    /// warning.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(ENV_EXPORT_DIR).filter(|v| !v.trim().is_empty()) {
            self.export_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(ENV_DECODE_THREADS) {
            match raw.trim().parse::<usize>() {
                Ok(n) => self.decode_threads = Some(n),
                Err(_) => warn!(var = ENV_DECODE_THREADS, value = %raw, "ignoring override"),
            }
        }
        if let Some(raw) = lookup(ENV_JPEG_QUALITY) {
            match raw.trim().parse::<u8>() {
                Ok(q) => self.jpeg_quality = q,
                Err(_) => warn!(var = ENV_JPEG_QUALITY, value = %raw, "ignoring override"),
            }
        }
    }

    pub fn validate(&self) -> PhotoboothResult<()> {
        if !(1..=MAX_JPEG_QUALITY).contains(&self.jpeg_quality) {
            return Err(PhotoboothError::config(format!(
                "jpeg_quality must be in 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        if self.countdown_secs == 0 {
            return Err(PhotoboothError::config("countdown_secs must be >= 1"));
        }
        if self.decode_threads == Some(0) {
            return Err(PhotoboothError::config(
                "decode_threads must be >= 1 when set",
            ));
        }
        if self.camera.width == 0 || self.camera.height == 0 {
            return Err(PhotoboothError::config(
                "camera width and height must be non-zero",
            ));
        }
        Ok(())
    }

    /// Compositor options derived from this config.
    pub fn compositor_opts(&self) -> CompositorOpts {
        CompositorOpts {
            jpeg_quality: self.jpeg_quality,
            pattern_tile_px: self.pattern_tile_px,
            decode_threads: self.decode_threads,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
