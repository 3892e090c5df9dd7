//! Logical channels, channel selection, and playback switch state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Logical channel role within a control element.
///
/// The order of variants is the order in which channels are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Channel {
    FrontLeft,
    FrontRight,
    RearLeft,
    RearRight,
    FrontCenter,
    Woofer,
    SideLeft,
    SideRight,
    RearCenter,
}

impl Channel {
    /// Every defined channel, in ascending enumeration order.
    pub const ALL: [Self; 9] = [
        Self::FrontLeft,
        Self::FrontRight,
        Self::RearLeft,
        Self::RearRight,
        Self::FrontCenter,
        Self::Woofer,
        Self::SideLeft,
        Self::SideRight,
        Self::RearCenter,
    ];

    /// Mono elements expose their single channel as front-left.
    pub const MONO: Self = Self::FrontLeft;

    /// Position of this channel in the driver enumeration.
    #[must_use]
    pub fn index(self) -> u32 {
        self as u32
    }

    /// Look up a channel by its driver enumeration index.
    #[must_use]
    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(usize::try_from(index).ok()?).copied()
    }

    /// Kebab-case name, as accepted by [`FromStr`].
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::FrontLeft => "front-left",
            Self::FrontRight => "front-right",
            Self::RearLeft => "rear-left",
            Self::RearRight => "rear-right",
            Self::FrontCenter => "front-center",
            Self::Woofer => "woofer",
            Self::SideLeft => "side-left",
            Self::SideRight => "side-right",
            Self::RearCenter => "rear-center",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = ParseChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|channel| channel.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseChannelError(s.to_string()))
    }
}

/// Returned when a channel name or index is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown channel: {0}")]
pub struct ParseChannelError(String);

/// Which channels a request applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelSelection {
    /// Every channel the element exposes
    #[default]
    All,
    /// Exactly one channel
    Single(Channel),
}

impl ChannelSelection {
    /// Index value that selects every channel.
    pub const ALL_CHANNELS: u32 = u32::MAX;

    /// Build a selection from a driver channel index, or [`Self::ALL_CHANNELS`].
    ///
    /// Returns `None` for an index that names no defined channel.
    #[must_use]
    pub fn from_index(index: u32) -> Option<Self> {
        if index == Self::ALL_CHANNELS {
            return Some(Self::All);
        }
        Channel::from_index(index).map(Self::Single)
    }

    /// Whether `channel` is part of this selection.
    #[must_use]
    pub fn contains(self, channel: Channel) -> bool {
        match self {
            Self::All => true,
            Self::Single(selected) => selected == channel,
        }
    }

    /// Selected channels in processing order.
    pub fn channels(self) -> impl Iterator<Item = Channel> {
        Channel::ALL.into_iter().filter(move |channel| self.contains(*channel))
    }
}

impl FromStr for ChannelSelection {
    type Err = ParseChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        if let Ok(index) = s.parse::<u32>() {
            return Self::from_index(index).ok_or_else(|| ParseChannelError(s.to_string()));
        }
        s.parse().map(Self::Single)
    }
}

/// Requested change to the playback (mute) switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchRequest {
    Off,
    On,
    Toggle,
    #[default]
    Unchanged,
}

/// Position of a playback switch. `Off` means muted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchState {
    Off,
    On,
}

impl SwitchState {
    #[must_use]
    pub fn is_on(self) -> bool {
        self == Self::On
    }

    /// The opposite position.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Off => Self::On,
            Self::On => Self::Off,
        }
    }
}

impl From<bool> for SwitchState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl From<SwitchState> for bool {
    fn from(state: SwitchState) -> Self {
        state.is_on()
    }
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_on() { "on" } else { "off" })
    }
}
