use crate::{
    capture::countdown::Countdown,
    model::{
        photo::{CapturedPhoto, PhotoId},
        style::{BackgroundChoice, StyleParameters},
        template::Template,
    },
    session::preview::{CompositeTicket, PreviewSlot},
};

/// Which screen the booth is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Welcome screen.
    #[default]
    Start,
    /// Template picker.
    TemplateSelect,
    /// Live camera with countdown and capture.
    Capture,
    /// Composite preview with style controls and export.
    Preview,
}

/// Immutable snapshot of everything the booth knows.
///
/// Snapshots are produced by [`crate::reduce`]; nothing mutates one in place after it is
/// published.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoothState {
    /// Current screen.
    pub screen: Screen,
    /// Selected template, if any.
    pub template: Option<Template>,
    /// Captured photos in capture order; position is the placement index.
    pub photos: Vec<CapturedPhoto>,
    /// Capture countdown.
    pub countdown: Countdown,
    /// Border width and spacing.
    pub style: StyleParameters,
    /// Background behind the photos.
    pub background: BackgroundChoice,
    /// Composite on display.
    pub preview: PreviewSlot,
    /// Newest composite request issued.
    pub last_requested: CompositeTicket,
}

impl BoothState {
    /// Photos the selected template needs (0 without a template).
    pub fn required_count(&self) -> usize {
        self.template.map_or(0, Template::required_count)
    }

    /// Return `true` when the sequence has every photo the template needs.
    pub fn is_full(&self) -> bool {
        self.template.is_some() && self.photos.len() >= self.required_count()
    }

    /// Return `true` when a new countdown may start.
    pub fn can_start_countdown(&self) -> bool {
        self.screen == Screen::Capture
            && self.template.is_some()
            && !self.countdown.is_running()
            && !self.is_full()
    }

    /// Return `true` when the session may move on to the preview.
    pub fn can_finish(&self) -> bool {
        self.screen == Screen::Capture && !self.photos.is_empty() && !self.countdown.is_running()
    }

    /// Id of the most recent capture.
    pub fn last_photo_id(&self) -> Option<PhotoId> {
        self.photos.last().map(|p| p.id)
    }

    /// Return `true` when a composite can be produced from this snapshot.
    pub fn has_composite_input(&self) -> bool {
        self.template.is_some() && !self.photos.is_empty()
    }

    pub(crate) fn layout_key(&self) -> LayoutKey {
        LayoutKey {
            template: self.template,
            photos: self.photos.iter().map(|p| p.id).collect(),
            style: self.style,
            background: self.background,
        }
    }
}

/// Everything a composite depends on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LayoutKey {
    template: Option<Template>,
    photos: Vec<PhotoId>,
    style: StyleParameters,
    background: BackgroundChoice,
}
