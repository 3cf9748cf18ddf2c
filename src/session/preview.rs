use crate::model::photo::EncodedImage;

/// Monotonically increasing id attached to each composite request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompositeTicket(pub u64);

/// Issues composite tickets in request order.
#[derive(Debug, Default)]
pub struct TicketIssuer {
    last: u64,
}

impl TicketIssuer {
    /// Next ticket, strictly greater than every ticket issued before.
    pub fn issue(&mut self) -> CompositeTicket {
        self.last += 1;
        CompositeTicket(self.last)
    }

    /// Most recently issued ticket (`CompositeTicket(0)` before the first).
    pub fn last(&self) -> CompositeTicket {
        CompositeTicket(self.last)
    }
}

/// The composite currently shown to the user.
///
/// Results are accepted only when their ticket is newer than everything shown or cleared so
/// far, so a slow, stale composite never overwrites a newer one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreviewSlot {
    shown: Option<EncodedImage>,
    floor: CompositeTicket,
}

impl PreviewSlot {
    /// The displayed composite, if any.
    pub fn image(&self) -> Option<&EncodedImage> {
        self.shown.as_ref()
    }

    /// Newest ticket shown or cleared through.
    pub fn floor(&self) -> CompositeTicket {
        self.floor
    }

    /// Return `true` when a result for `ticket` would replace what is shown.
    pub fn accepts(&self, ticket: CompositeTicket) -> bool {
        ticket > self.floor
    }

    /// Show `image` unless it is stale. Returns whether the slot changed.
    pub fn offer(&mut self, ticket: CompositeTicket, image: EncodedImage) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.shown = Some(image);
        self.floor = ticket;
        true
    }

    /// Drop what is shown and reject every result for tickets up to `through`.
    pub fn clear_through(&mut self, through: CompositeTicket) {
        self.shown = None;
        self.floor = self.floor.max(through);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/preview.rs"]
mod tests;
