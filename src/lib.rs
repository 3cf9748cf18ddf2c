//! Photobooth engine: a capture sequencer and a layout compositor.
//!
//! The booth walks through four screens (start, template picker, capture, preview):
//!
//! - Pick a [`Template`] (strip, grid, collage, single)
//! - Capture photos from a [`Camera`] through a countdown
//! - Compose them with a [`Compositor`] into one JPEG, restyle, and export through a
//!   [`Download`]
//!
//! [`BoothController`] owns the state and performs side effects; [`reduce`] is the pure state
//! transition it is built on.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod capture;
pub(crate) mod compose;
pub mod config;
pub(crate) mod export;
pub(crate) mod layout;
pub mod logging;
pub(crate) mod model;
pub(crate) mod render;
pub(crate) mod session;

pub use crate::foundation::clock::{Clock, ManualClock, SystemClock};
pub use crate::foundation::core::{Canvas, PixelRect, Point, Rect, Rgba8, Size, snap_to_pixels};
pub use crate::foundation::error::{PhotoboothError, PhotoboothResult};

pub use crate::capture::camera::{Camera, CameraConstraints, CameraSession, FrameSource};
pub use crate::capture::countdown::{Countdown, CountdownTick, DEFAULT_COUNTDOWN_SECS};
pub use crate::capture::sequencer::FrameGrabber;
pub use crate::capture::sources::{DirectoryCamera, LoopingFrames, MemoryCamera};
pub use crate::compose::compositor::{Compositor, CompositorOpts};
pub use crate::compose::join::DecodeJoin;
pub use crate::config::{BoothConfig, LoggingConfig};
pub use crate::export::download::{
    DirectoryDownload, Download, MemoryDownload, composite_filename, photo_filename,
};
pub use crate::layout::placement::{border_rect, placement, placements};
pub use crate::model::photo::{CapturedPhoto, EncodedImage, PhotoId};
pub use crate::model::style::{BackgroundChoice, MAX_BORDER_WIDTH, MAX_SPACING, StyleParameters};
pub use crate::model::template::{
    CANVAS_WIDTH, SQUARE_CANVAS_HEIGHT, STRIP_CANVAS_HEIGHT, Template,
};
pub use crate::render::background::{PATTERN_TILE_PX, Paint, background_paint, checkerboard_tile};
pub use crate::render::codec::{MAX_JPEG_QUALITY, decode_image, encode_jpeg, rgba_to_rgb};
pub use crate::render::surface::{CpuSurface, CpuSurfaceFactory, RasterSurface, SurfaceFactory};
pub use crate::session::action::{Action, Effect, Transition, reduce};
pub use crate::session::controller::{BoothController, CompositeJob, ControllerOpts};
pub use crate::session::preview::{CompositeTicket, PreviewSlot, TicketIssuer};
pub use crate::session::state::{BoothState, Screen};
