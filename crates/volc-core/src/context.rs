//! Mixer context lifecycle.

use tracing::{debug, info, warn};

use crate::channel::{ChannelSelection, SwitchRequest};
use crate::controller::{self, ChannelOutcome};
use crate::element::{ControlElement, MixerBackend, Selector};
use crate::error::{Error, Result};
use crate::volume::VolumeRequest;

/// An open mixer session with one resolved control element.
///
/// The context owns the session from [`MixerContext::init`] until
/// [`MixerContext::deinit`] or drop, whichever comes first. It is meant for a
/// single owner; share it across threads only behind a lock.
pub struct MixerContext<E: ControlElement> {
    element: Option<E>,
    card: String,
    selector: Selector,
    last_error: Option<String>,
}

impl<E: ControlElement> MixerContext<E> {
    /// Open `card` through `backend` and resolve the control
    /// `selector_name`,`selector_index` on it.
    ///
    /// # Errors
    /// Returns the init error of the first step that failed. Nothing stays
    /// open in that case.
    pub fn init<B>(backend: &B, selector_name: &str, selector_index: u32, card: &str) -> Result<Self>
    where
        B: MixerBackend<Element = E>,
    {
        let selector = Selector::new(selector_name, selector_index);

        match backend.open_element(card, &selector) {
            Ok(element) => {
                info!(card, selector = %selector.name, index = selector.index, "Mixer context opened");
                Ok(Self {
                    element: Some(element),
                    card: card.to_string(),
                    selector,
                    last_error: None,
                })
            }
            Err(e) => {
                warn!(
                    card,
                    selector = %selector.name,
                    index = selector.index,
                    error = %e,
                    "Failed to open mixer context"
                );
                Err(e)
            }
        }
    }

    /// Release the session. Safe to call more than once.
    pub fn deinit(&mut self) {
        if self.element.take().is_some() {
            info!(card = %self.card, selector = %self.selector.name, "Mixer context closed");
        } else {
            debug!(card = %self.card, "Mixer context already closed");
        }
    }

    /// Whether the session is still open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.element.is_some()
    }

    /// Apply a volume and switch request to the selected channels.
    ///
    /// On failure the message is also kept for [`Self::last_error_message`].
    ///
    /// # Errors
    /// Returns [`Error::Closed`] after [`Self::deinit`], and
    /// [`Error::NoChannelSet`] if no selected channel could be applied.
    pub fn volume_ctl(
        &mut self,
        selection: ChannelSelection,
        volume: VolumeRequest,
        switch: SwitchRequest,
    ) -> Result<ChannelOutcome> {
        let result = match &self.element {
            Some(element) => controller::apply(element, selection, volume, switch),
            None => Err(Error::Closed),
        };

        if let Err(e) = &result {
            warn!(
                card = %self.card,
                selector = %self.selector.name,
                ?selection,
                error = %e,
                "Volume control failed"
            );
            self.last_error = Some(e.to_string());
        }
        result
    }

    /// Read the current volume and switch state without changing anything.
    ///
    /// # Errors
    /// See [`Self::volume_ctl`].
    pub fn get_volume(&mut self) -> Result<ChannelOutcome> {
        self.volume_ctl(ChannelSelection::All, VolumeRequest::unchanged(), SwitchRequest::Unchanged)
    }

    /// Message of the most recent failed [`Self::volume_ctl`] call.
    #[must_use]
    pub fn last_error_message(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Card this context was opened on.
    #[must_use]
    pub fn card(&self) -> &str {
        &self.card
    }

    /// Control element this context operates on.
    #[must_use]
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// The resolved element, while the context is open.
    #[must_use]
    pub fn element(&self) -> Option<&E> {
        self.element.as_ref()
    }
}
