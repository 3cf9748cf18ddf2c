use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    capture::{
        camera::{Camera, CameraConstraints, CameraSession},
        countdown::{CountdownTick, DEFAULT_COUNTDOWN_SECS},
        sequencer::FrameGrabber,
    },
    compose::compositor::Compositor,
    config::BoothConfig,
    export::download::{Download, composite_filename, photo_filename},
    foundation::{clock::Clock, error::PhotoboothResult},
    model::{
        photo::{CapturedPhoto, EncodedImage},
        style::{BackgroundChoice, StyleParameters},
        template::Template,
    },
    render::surface::CpuSurfaceFactory,
    session::{
        action::{Action, Effect, reduce},
        preview::{CompositeTicket, TicketIssuer},
        state::{BoothState, Screen},
    },
};

/// Options controlling a [`BoothController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControllerOpts {
    /// Resolution hint used when acquiring the camera.
    pub camera: CameraConstraints,
    /// Countdown length used by [`BoothController::start_countdown`].
    pub countdown_secs: u32,
}

impl Default for ControllerOpts {
    fn default() -> Self {
        Self {
            camera: CameraConstraints::default(),
            countdown_secs: DEFAULT_COUNTDOWN_SECS,
        }
    }
}

/// A composite request detached from the controller.
///
/// Holds everything the compositor needs, so it can run on another thread. Hand the result
/// back through [`BoothController::complete_composite`].
#[derive(Clone, Debug)]
pub struct CompositeJob {
    /// Ticket identifying this request.
    pub ticket: CompositeTicket,
    photos: Vec<CapturedPhoto>,
    template: Option<Template>,
    background: BackgroundChoice,
    style: StyleParameters,
}

impl CompositeJob {
    /// Compose the snapshot this job was taken from.
    pub fn run(&self, compositor: &Compositor) -> Option<EncodedImage> {
        compositor.generate_final_image(&self.photos, self.template, self.background, self.style)
    }
}

/// Owns the booth state and carries out the side effects of each transition.
///
/// All transitions go through [`BoothController::dispatch`] on one thread. State is published
/// as immutable [`Arc`] snapshots, so readers never observe a half-applied update.
pub struct BoothController {
    state: Arc<BoothState>,
    opts: ControllerOpts,
    camera: Arc<dyn Camera>,
    session: Option<CameraSession>,
    grabber: FrameGrabber,
    compositor: Arc<Compositor>,
    tickets: TicketIssuer,
}

impl BoothController {
    /// Controller configured from `config`, drawing on CPU surfaces.
    pub fn new(
        config: &BoothConfig,
        camera: Arc<dyn Camera>,
        clock: Arc<dyn Clock>,
    ) -> PhotoboothResult<Self> {
        config.validate()?;
        let compositor = Compositor::new(config.compositor_opts())?;
        let grabber = FrameGrabber::with_surfaces(
            clock,
            Arc::new(CpuSurfaceFactory::default()),
            config.jpeg_quality,
        );
        let opts = ControllerOpts {
            camera: config.camera,
            countdown_secs: config.countdown_secs,
        };
        Ok(Self::from_parts(opts, camera, grabber, Arc::new(compositor)))
    }

    /// Controller assembled from explicit parts.
    pub fn from_parts(
        opts: ControllerOpts,
        camera: Arc<dyn Camera>,
        grabber: FrameGrabber,
        compositor: Arc<Compositor>,
    ) -> Self {
        Self {
            state: Arc::new(BoothState::default()),
            opts,
            camera,
            session: None,
            grabber,
            compositor,
            tickets: TicketIssuer::default(),
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> Arc<BoothState> {
        Arc::clone(&self.state)
    }

    /// Compositor shared with detached composite jobs.
    pub fn compositor(&self) -> Arc<Compositor> {
        Arc::clone(&self.compositor)
    }

    /// Return `true` while a live camera feed is held.
    pub fn camera_live(&self) -> bool {
        self.session.as_ref().is_some_and(CameraSession::is_live)
    }

    /// Apply `action` and run the effects it produces.
    pub fn dispatch(&mut self, action: Action) {
        let transition = reduce(&self.state, action);
        if transition.state.screen != self.state.screen {
            info!(
                from = ?self.state.screen,
                to = ?transition.state.screen,
                "screen changed"
            );
        }
        self.state = Arc::new(transition.state);
        for effect in transition.effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::AcquireCamera => {
                if let Some(old) = self.session.take() {
                    old.close();
                }
                self.session = Some(CameraSession::open(
                    Arc::clone(&self.camera),
                    self.opts.camera,
                ));
            }
            Effect::ReleaseCamera => {
                if let Some(session) = self.session.take() {
                    session.close();
                }
            }
            Effect::CapturePhoto => {
                self.capture_photo();
            }
            Effect::Recomposite => self.recomposite(),
        }
    }

    /// Start the capture countdown. Returns `false` (and changes nothing) while a countdown is
    /// already running, the sequence is full, or the booth is not on the capture screen.
    pub fn start_countdown(&mut self) -> bool {
        let accepted = self.state.can_start_countdown();
        self.dispatch(Action::StartCountdown {
            seconds: self.opts.countdown_secs,
        });
        accepted
    }

    /// Advance the countdown by one tick; the tick that reaches zero captures a photo.
    pub fn tick(&mut self) -> CountdownTick {
        let (_, tick) = self.state.countdown.tick();
        self.dispatch(Action::CountdownTick);
        tick
    }

    /// Grab the current frame and append it to the sequence.
    ///
    /// Returns `false` when nothing was appended: no feed, no frame, a failed encode, or a
    /// full sequence.
    pub fn capture_photo(&mut self) -> bool {
        if self.state.screen != Screen::Capture || self.state.is_full() {
            debug!(
                screen = ?self.state.screen,
                photos = self.state.photos.len(),
                "capture skipped: not accepting photos"
            );
            return false;
        }
        let source = self.session.as_mut().and_then(CameraSession::source_mut);
        let Some(photo) = self.grabber.capture(source, self.state.last_photo_id()) else {
            return false;
        };
        let before = self.state.photos.len();
        self.dispatch(Action::PhotoCaptured(photo));
        self.state.photos.len() > before
    }

    /// Clear the sequence; the next capture lands at index 0. The camera keeps running.
    pub fn reset_photos(&mut self) {
        self.dispatch(Action::ResetPhotos);
    }

    /// Detach a composite request for the current snapshot.
    ///
    /// Returns `None` when there is nothing to compose. Results of older jobs that complete
    /// after newer ones are discarded.
    pub fn begin_composite(&mut self) -> Option<CompositeJob> {
        if !self.state.has_composite_input() {
            return None;
        }
        let ticket = self.tickets.issue();
        self.dispatch(Action::CompositeRequested(ticket));
        debug!(ticket = ticket.0, "composite requested");
        Some(CompositeJob {
            ticket,
            photos: self.state.photos.clone(),
            template: self.state.template,
            background: self.state.background,
            style: self.state.style,
        })
    }

    /// Hand a finished composite back. Returns whether the preview now shows it.
    pub fn complete_composite(
        &mut self,
        ticket: CompositeTicket,
        image: Option<EncodedImage>,
    ) -> bool {
        let Some(image) = image else {
            debug!(ticket = ticket.0, "composite produced nothing");
            return false;
        };
        let accepted = self.state.preview.accepts(ticket);
        self.dispatch(Action::CompositeReady { ticket, image });
        accepted
    }

    fn recomposite(&mut self) {
        if let Some(job) = self.begin_composite() {
            let image = job.run(&self.compositor);
            self.complete_composite(job.ticket, image);
        }
    }

    /// Persist the displayed composite. Returns `false` when there is none.
    pub fn export_composite(&self, download: &dyn Download) -> bool {
        let Some(image) = self.state.preview.image() else {
            debug!("export skipped: no composite");
            return false;
        };
        let now = self.grabber.clock().now_millis();
        download.persist(image, &composite_filename(now));
        true
    }

    /// Persist the photo at 0-based `index`. Returns `false` when there is no such photo.
    pub fn export_photo(&self, index: usize, download: &dyn Download) -> bool {
        let Some(photo) = self.state.photos.get(index) else {
            debug!(index, "export skipped: no such photo");
            return false;
        };
        let now = self.grabber.clock().now_millis();
        download.persist(&photo.image, &photo_filename(index, now));
        true
    }

    /// Persist every captured photo, one file each. Returns how many were handed over.
    pub fn export_all_photos(&self, download: &dyn Download) -> usize {
        let now = self.grabber.clock().now_millis();
        for (index, photo) in self.state.photos.iter().enumerate() {
            download.persist(&photo.image, &photo_filename(index, now));
        }
        info!(count = self.state.photos.len(), "photos exported");
        self.state.photos.len()
    }
}

impl std::fmt::Debug for BoothController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoothController")
            .field("screen", &self.state.screen)
            .field("photos", &self.state.photos.len())
            .field("camera_live", &self.camera_live())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/controller.rs"]
mod tests;
