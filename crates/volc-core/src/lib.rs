//! Volc Core - Volume conversion and multi-channel mixer control.
//!
//! This crate maps a percentage volume domain onto a driver's raw integer
//! range and applies volume and mute requests across the channels of a single
//! mixer control element. The driver itself is consumed through the traits in
//! [`element`], so the logic here never touches hardware directly.

pub mod channel;
pub mod context;
pub mod controller;
pub mod element;
pub mod error;
pub mod volume;

#[cfg(test)]
pub(crate) mod testing;

pub use channel::{Channel, ChannelSelection, SwitchRequest, SwitchState};
pub use context::MixerContext;
pub use controller::ChannelOutcome;
pub use element::{ControlElement, MixerBackend, Selector};
pub use error::{Error, Result};
pub use volume::{RawVolumeRange, VolumeAction, VolumeRequest, from_raw, to_raw};

/// Card name used when the caller does not name one.
pub const DEFAULT_CARD: &str = "default";
