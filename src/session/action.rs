use tracing::{debug, warn};

use crate::{
    capture::countdown::{Countdown, CountdownTick},
    model::{
        photo::{CapturedPhoto, EncodedImage},
        style::BackgroundChoice,
        template::Template,
    },
    session::{
        preview::CompositeTicket,
        state::{BoothState, Screen},
    },
};

/// A discrete state update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Leave the start screen for the template picker. Discards any previous photos.
    Begin,
    /// Pick a template and go to the capture screen. Discards captured photos.
    SelectTemplate(Template),
    /// Return to the template picker.
    BackToTemplates,
    /// Start the capture countdown, unless one is running or the sequence is full.
    StartCountdown {
        /// Countdown length in ticks.
        seconds: u32,
    },
    /// One countdown tick elapsed.
    CountdownTick,
    /// A frame was captured; appended unless the sequence is full.
    PhotoCaptured(CapturedPhoto),
    /// Drop every captured photo. From the preview this goes back to capture (retake).
    ResetPhotos,
    /// Move from capture to the preview.
    Finish,
    /// Change the border width (clamped to `[0, 10]`).
    SetBorderWidth(u32),
    /// Change the spacing (clamped to `[0, 20]`).
    SetSpacing(u32),
    /// Change the background.
    SetBackground(BackgroundChoice),
    /// A composite request was issued.
    CompositeRequested(CompositeTicket),
    /// A composite request finished.
    CompositeReady {
        /// Ticket of the request that produced `image`.
        ticket: CompositeTicket,
        /// The composite.
        image: EncodedImage,
    },
    /// Back to the start screen with a fresh session.
    Restart,
}

/// Side effect the controller must perform after a state update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Acquire the camera feed.
    AcquireCamera,
    /// Release the camera feed.
    ReleaseCamera,
    /// Grab one frame now.
    CapturePhoto,
    /// Compose the current photos again.
    Recomposite,
}

/// Result of [`reduce`]: the next snapshot and the effects it asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Next snapshot.
    pub state: BoothState,
    /// Effects, in the order they should run.
    pub effects: Vec<Effect>,
}

/// Pure state update: `state` is left untouched.
pub fn reduce(state: &BoothState, action: Action) -> Transition {
    let mut next = state.clone();
    let mut effects = Vec::new();

    match action {
        Action::Begin => {
            next = fresh_session(state);
            next.screen = Screen::TemplateSelect;
        }
        Action::SelectTemplate(template) => {
            discard_photos(&mut next);
            next.template = Some(template);
            next.screen = Screen::Capture;
        }
        Action::BackToTemplates => {
            discard_photos(&mut next);
            next.screen = Screen::TemplateSelect;
        }
        Action::StartCountdown { seconds } => {
            if state.can_start_countdown() {
                next.countdown = Countdown::started(seconds);
            } else {
                debug!(
                    running = state.countdown.is_running(),
                    photos = state.photos.len(),
                    "countdown request ignored"
                );
            }
        }
        Action::CountdownTick => {
            let (countdown, tick) = state.countdown.tick();
            next.countdown = countdown;
            match tick {
                CountdownTick::Fire => effects.push(Effect::CapturePhoto),
                CountdownTick::Remaining(n) => debug!(remaining = n, "countdown tick"),
                CountdownTick::Idle => {}
            }
        }
        Action::PhotoCaptured(photo) => {
            if state.screen != Screen::Capture || state.is_full() {
                warn!(
                    id = photo.id.0,
                    photos = state.photos.len(),
                    required = state.required_count(),
                    "captured photo dropped"
                );
            } else {
                next.photos.push(photo);
            }
        }
        Action::ResetPhotos => {
            discard_photos(&mut next);
            if state.screen == Screen::Preview {
                next.screen = Screen::Capture;
            }
        }
        Action::Finish => {
            if state.can_finish() {
                next.screen = Screen::Preview;
            }
        }
        Action::SetBorderWidth(width) => next.style = state.style.with_border_width(width),
        Action::SetSpacing(spacing) => next.style = state.style.with_spacing(spacing),
        Action::SetBackground(background) => next.background = background,
        Action::CompositeRequested(ticket) => {
            next.last_requested = state.last_requested.max(ticket);
        }
        Action::CompositeReady { ticket, image } => {
            if !next.preview.offer(ticket, image) {
                debug!(
                    ticket = ticket.0,
                    shown = next.preview.floor().0,
                    "stale composite discarded"
                );
            }
        }
        Action::Restart => next = fresh_session(state),
    }

    if state.screen != Screen::Capture && next.screen == Screen::Capture {
        effects.push(Effect::AcquireCamera);
    }
    if state.screen == Screen::Capture && next.screen != Screen::Capture {
        effects.push(Effect::ReleaseCamera);
    }
    if next.screen == Screen::Preview
        && next.has_composite_input()
        && (state.screen != Screen::Preview || state.layout_key() != next.layout_key())
    {
        effects.push(Effect::Recomposite);
    }

    Transition {
        state: next,
        effects,
    }
}

fn discard_photos(state: &mut BoothState) {
    state.photos.clear();
    state.countdown = Countdown::idle();
    state.preview.clear_through(state.last_requested);
}

fn fresh_session(state: &BoothState) -> BoothState {
    let mut next = BoothState {
        last_requested: state.last_requested,
        preview: state.preview.clone(),
        ..BoothState::default()
    };
    next.preview.clear_through(state.last_requested);
    next
}

#[cfg(test)]
#[path = "../../tests/unit/session/action.rs"]
mod tests;
