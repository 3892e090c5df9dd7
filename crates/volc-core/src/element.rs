//! Interface to the driver's mixer layer.
//!
//! The driver owns the actual session and control element. Volc only needs the
//! capability queries and raw get/set calls below, so any mixer API (or a fake
//! one in tests) can sit behind these traits.

use serde::{Deserialize, Serialize};

use crate::channel::{Channel, SwitchState};
use crate::error::Result;
use crate::volume::RawVolumeRange;

/// Name and index identifying a simple mixer control.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selector {
    /// Control name (e.g., "Master", "PCM", "Headphone")
    pub name: String,
    /// Index among controls sharing the same name
    pub index: u32,
}

impl Selector {
    /// Selector name used when the caller does not name one.
    pub const DEFAULT_NAME: &'static str = "Master";

    #[must_use]
    pub fn new(name: impl Into<String>, index: u32) -> Self {
        Self { name: name.into(), index }
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NAME, 0)
    }
}

/// A resolved control element on an open mixer session.
///
/// Implementations own the session: dropping the element releases it.
#[cfg_attr(test, mockall::automock)]
pub trait ControlElement {
    /// Whether the element has a playback volume at all.
    fn has_playback_volume(&self) -> bool;

    /// Whether the element has a playback (mute) switch at all.
    fn has_playback_switch(&self) -> bool;

    /// Whether one switch is shared by every channel of the element.
    fn has_playback_switch_joined(&self) -> bool;

    /// Whether `channel` exists for playback on this element.
    fn has_playback_channel(&self, channel: Channel) -> bool;

    /// Raw volume bounds.
    ///
    /// # Errors
    /// Returns an error if the driver rejects the query.
    fn playback_volume_range(&self) -> Result<RawVolumeRange>;

    /// Current raw volume of `channel`.
    ///
    /// # Errors
    /// Returns an error if the driver rejects the query.
    fn playback_volume(&self, channel: Channel) -> Result<i64>;

    /// Write a raw volume to `channel`.
    ///
    /// # Errors
    /// Returns an error if the driver rejects the value.
    fn set_playback_volume(&self, channel: Channel, value: i64) -> Result<()>;

    /// Current switch position of `channel`.
    ///
    /// # Errors
    /// Returns an error if the element has no switch or the query fails.
    fn playback_switch(&self, channel: Channel) -> Result<SwitchState>;

    /// Move the switch of `channel`.
    ///
    /// # Errors
    /// Returns an error if the element has no switch or the write fails.
    fn set_playback_switch(&self, channel: Channel, state: SwitchState) -> Result<()>;
}

/// Opens sessions against a sound card and resolves control elements.
pub trait MixerBackend {
    type Element: ControlElement;

    /// Open, attach, register and load a session on `card`, then resolve
    /// `selector` on it.
    ///
    /// Anything acquired before a failing step must be released before the
    /// error is returned.
    ///
    /// # Errors
    /// Returns the init error for the first step that failed.
    fn open_element(&self, card: &str, selector: &Selector) -> Result<Self::Element>;
}
