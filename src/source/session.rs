use crate::binding::layer::BindingLayer;
use crate::choreo::choreographer::Choreographer;
use crate::foundation::error::ScrollweaveResult;
use crate::source::host::{PinId, ScrollHost, SubscriptionId};
use crate::source::progress::{PinnedRegion, ProgressSource};

/// A mounted choreography wired to its host and progress source.
///
/// Mounting acquires a pin and a frame subscription before the choreographer mounts; dropping or
/// unmounting the session gives all of it back, in reverse order. A session that failed to
/// mount has already released whatever it acquired.
pub struct ScrollSession<B, H, S>
where
    B: BindingLayer,
    H: ScrollHost,
    S: ProgressSource,
{
    choreographer: Choreographer<B>,
    host: H,
    source: S,
    pin: Option<PinId>,
    subscription: Option<SubscriptionId>,
    frames: u64,
}

impl<B, H, S> ScrollSession<B, H, S>
where
    B: BindingLayer,
    H: ScrollHost,
    S: ProgressSource,
{
    #[tracing::instrument(skip(choreographer, host, source))]
    pub fn mount(
        choreographer: Choreographer<B>,
        host: H,
        source: S,
        region: PinnedRegion,
        now: f64,
    ) -> ScrollweaveResult<Self> {
        let mut session = Self {
            choreographer,
            host,
            source,
            pin: None,
            subscription: None,
            frames: 0,
        };
        // on any error below, dropping `session` releases what was acquired
        session.pin = Some(session.host.pin_region(region)?);
        session.subscription = Some(session.host.subscribe_frames()?);
        session.choreographer.mount(now)?;
        tracing::debug!(pin = ?session.pin, subscription = ?session.subscription, "session mounted");
        Ok(session)
    }

    pub fn choreographer(&self) -> &Choreographer<B> {
        &self.choreographer
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the source, for feeding input.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn pin(&self) -> Option<PinId> {
        self.pin
    }

    pub fn subscription(&self) -> Option<SubscriptionId> {
        self.subscription
    }

    /// Frames processed since mount.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Handle one animation frame at wall-clock `now`.
    ///
    /// Entry animations advance first and the scroll tick runs last, so scroll writes win within
    /// a frame. Returns `false` without touching anything once the session is unmounted.
    pub fn on_frame(&mut self, now: f64) -> ScrollweaveResult<bool> {
        if self.subscription.is_none() {
            tracing::debug!("frame after unmount ignored");
            return Ok(false);
        }
        let progress = self.source.progress(now);
        self.choreographer.advance(now);
        self.choreographer.tick_normalized(progress)?;
        self.frames += 1;
        Ok(true)
    }

    /// Stop frame delivery, cancel entry animations, release the binding and the pin.
    ///
    /// Safe to call repeatedly.
    #[tracing::instrument(skip(self))]
    pub fn unmount(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.host.unsubscribe_frames(id);
        }
        self.choreographer.unmount();
        if let Some(pin) = self.pin.take() {
            self.host.release_region(pin);
        }
    }
}

impl<B, H, S> Drop for ScrollSession<B, H, S>
where
    B: BindingLayer,
    H: ScrollHost,
    S: ProgressSource,
{
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/session.rs"]
mod tests;
