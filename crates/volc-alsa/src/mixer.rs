//! ALSA simple mixer elements.

use std::ffi::CString;

use alsa::mixer::{Mixer, Selem, SelemChannelId, SelemId};
use tracing::debug;
use volc_core::{
    Channel, ControlElement, Error, MixerBackend, RawVolumeRange, Result, Selector, SwitchState,
};

/// Opens ALSA mixer sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlsaBackend;

impl MixerBackend for AlsaBackend {
    type Element = AlsaElement;

    fn open_element(&self, card: &str, selector: &Selector) -> Result<AlsaElement> {
        let reason = |e: alsa::Error| e.to_string();

        let mut mixer = Mixer::open(false)
            .map_err(|e| Error::Open { card: card.to_string(), reason: reason(e) })?;

        // From here on `mixer` closes itself on every early return
        let name = CString::new(card).map_err(|e| Error::Attach {
            card: card.to_string(),
            reason: e.to_string(),
        })?;
        mixer
            .attach(&name)
            .map_err(|e| Error::Attach { card: card.to_string(), reason: reason(e) })?;
        Selem::register(&mut mixer)
            .map_err(|e| Error::Register { card: card.to_string(), reason: reason(e) })?;
        mixer.load().map_err(|e| Error::Load { card: card.to_string(), reason: reason(e) })?;

        let id = SelemId::new(&selector.name, selector.index);
        if mixer.find_selem(&id).is_none() {
            return Err(Error::ElementNotFound {
                name: selector.name.clone(),
                index: selector.index,
            });
        }

        debug!(
            card,
            selector = %selector.name,
            index = selector.index,
            "ALSA simple element resolved"
        );
        Ok(AlsaElement { mixer, id, card: card.to_string() })
    }
}

/// A simple mixer element together with the session it lives on.
///
/// The element is looked up again on every call, since `Selem` borrows the
/// mixer it came from.
pub struct AlsaElement {
    mixer: Mixer,
    id: SelemId,
    card: String,
}

impl AlsaElement {
    /// Card the session is attached to.
    #[must_use]
    pub fn card(&self) -> &str {
        &self.card
    }

    fn selem(&self) -> Result<Selem<'_>> {
        self.mixer.find_selem(&self.id).ok_or_else(|| {
            Error::Driver(format!("simple control vanished from mixer {}", self.card))
        })
    }

    fn has(&self, capability: impl FnOnce(&Selem<'_>) -> bool) -> bool {
        self.mixer.find_selem(&self.id).is_some_and(|selem| capability(&selem))
    }
}

/// Map a logical channel onto its ALSA simple mixer channel id.
#[must_use]
pub fn channel_id(channel: Channel) -> SelemChannelId {
    match channel {
        Channel::FrontLeft => SelemChannelId::FrontLeft,
        Channel::FrontRight => SelemChannelId::FrontRight,
        Channel::RearLeft => SelemChannelId::RearLeft,
        Channel::RearRight => SelemChannelId::RearRight,
        Channel::FrontCenter => SelemChannelId::FrontCenter,
        Channel::Woofer => SelemChannelId::Woofer,
        Channel::SideLeft => SelemChannelId::SideLeft,
        Channel::SideRight => SelemChannelId::SideRight,
        Channel::RearCenter => SelemChannelId::RearCenter,
    }
}

fn driver_error(operation: &str, channel: Channel, e: &alsa::Error) -> Error {
    Error::Driver(format!("{operation} on {channel}: {e}"))
}

impl ControlElement for AlsaElement {
    fn has_playback_volume(&self) -> bool {
        self.has(|selem| selem.has_playback_volume())
    }

    fn has_playback_switch(&self) -> bool {
        self.has(|selem| selem.has_playback_switch())
    }

    fn has_playback_switch_joined(&self) -> bool {
        self.has(|selem| selem.has_playback_switch_joined())
    }

    fn has_playback_channel(&self, channel: Channel) -> bool {
        self.has(|selem| selem.has_playback_channel(channel_id(channel)))
    }

    fn playback_volume_range(&self) -> Result<RawVolumeRange> {
        let (min, max) = self.selem()?.get_playback_volume_range();
        Ok(RawVolumeRange::new(min, max))
    }

    fn playback_volume(&self, channel: Channel) -> Result<i64> {
        self.selem()?
            .get_playback_volume(channel_id(channel))
            .map_err(|e| driver_error("get playback volume", channel, &e))
    }

    fn set_playback_volume(&self, channel: Channel, value: i64) -> Result<()> {
        self.selem()?
            .set_playback_volume(channel_id(channel), value)
            .map_err(|e| driver_error("set playback volume", channel, &e))
    }

    fn playback_switch(&self, channel: Channel) -> Result<SwitchState> {
        self.selem()?
            .get_playback_switch(channel_id(channel))
            .map(|value| SwitchState::from(value != 0))
            .map_err(|e| driver_error("get playback switch", channel, &e))
    }

    fn set_playback_switch(&self, channel: Channel, state: SwitchState) -> Result<()> {
        self.selem()?
            .set_playback_switch(channel_id(channel), i32::from(state.is_on()))
            .map_err(|e| driver_error("set playback switch", channel, &e))
    }
}
