use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::foundation::error::{ScrollweaveError, ScrollweaveResult};
use crate::source::progress::PinnedRegion;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PinId(pub u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame#{}", self.0)
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pin#{}", self.0)
    }
}

/// Resources a hosting view hands out to a mounted choreography.
///
/// Everything acquired here must be released on every exit path: a leaked frame subscription
/// keeps calling into a dead instance and a leaked pin keeps the page scroll-locked.
pub trait ScrollHost {
    /// Register for one callback per animation frame.
    fn subscribe_frames(&mut self) -> ScrollweaveResult<SubscriptionId>;
    fn unsubscribe_frames(&mut self, id: SubscriptionId);
    /// Pin the scroll region the choreography plays over.
    fn pin_region(&mut self, region: PinnedRegion) -> ScrollweaveResult<PinId>;
    fn release_region(&mut self, id: PinId);
}

impl<H: ScrollHost + ?Sized> ScrollHost for &mut H {
    fn subscribe_frames(&mut self) -> ScrollweaveResult<SubscriptionId> {
        (**self).subscribe_frames()
    }

    fn unsubscribe_frames(&mut self, id: SubscriptionId) {
        (**self).unsubscribe_frames(id);
    }

    fn pin_region(&mut self, region: PinnedRegion) -> ScrollweaveResult<PinId> {
        (**self).pin_region(region)
    }

    fn release_region(&mut self, id: PinId) {
        (**self).release_region(id);
    }
}

/// Host driven by hand from tests and tools. Tracks live subscriptions and pins.
#[derive(Debug, Default)]
pub struct ManualHost {
    next_id: u64,
    subscriptions: BTreeSet<SubscriptionId>,
    pins: BTreeMap<PinId, PinnedRegion>,
    fail_subscribe: bool,
    fail_pin: bool,
    released: usize,
}

impl ManualHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host that refuses frame subscriptions.
    pub fn failing_subscribe() -> Self {
        Self {
            fail_subscribe: true,
            ..Self::default()
        }
    }

    /// A host that refuses to pin.
    pub fn failing_pin() -> Self {
        Self {
            fail_pin: true,
            ..Self::default()
        }
    }

    /// Frame callbacks that would still fire.
    pub fn pending_callbacks(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.subscriptions.contains(&id)
    }

    pub fn pinned(&self) -> impl Iterator<Item = (&PinId, &PinnedRegion)> {
        self.pins.iter()
    }

    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    /// Pins released so far.
    pub fn released(&self) -> usize {
        self.released
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl ScrollHost for ManualHost {
    fn subscribe_frames(&mut self) -> ScrollweaveResult<SubscriptionId> {
        if self.fail_subscribe {
            return Err(ScrollweaveError::lifecycle("host refused frame subscription"));
        }
        let id = SubscriptionId(self.next());
        self.subscriptions.insert(id);
        Ok(id)
    }

    fn unsubscribe_frames(&mut self, id: SubscriptionId) {
        if !self.subscriptions.remove(&id) {
            tracing::warn!(%id, "unsubscribe of unknown frame subscription");
        }
    }

    fn pin_region(&mut self, region: PinnedRegion) -> ScrollweaveResult<PinId> {
        if self.fail_pin {
            return Err(ScrollweaveError::lifecycle("host refused to pin region"));
        }
        let id = PinId(self.next());
        self.pins.insert(id, region);
        Ok(id)
    }

    fn release_region(&mut self, id: PinId) {
        if self.pins.remove(&id).is_some() {
            self.released += 1;
        } else {
            tracing::warn!(%id, "release of unknown pin");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/host.rs"]
mod tests;
