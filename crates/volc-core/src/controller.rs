//! Applying volume and switch requests across the channels of one element.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::channel::{Channel, ChannelSelection, SwitchRequest, SwitchState};
use crate::element::ControlElement;
use crate::error::{Error, Result};
use crate::volume::{VolumeAction, VolumeRequest, from_raw, to_raw};

/// State of a channel after a request was applied to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelOutcome {
    /// Channel this outcome was read from
    pub channel: Channel,
    /// Switch position read back after the change
    pub switch_state: SwitchState,
    /// Volume as a percentage of the raw range
    pub volume_percent: f32,
}

/// Why a channel was left out of a request.
#[derive(Debug)]
enum Skip {
    NoPlaybackChannel,
    NoPlaybackSwitch,
    NoPlaybackVolume,
    Driver(Error),
}

impl From<Error> for Skip {
    fn from(err: Error) -> Self {
        Self::Driver(err)
    }
}

/// Apply `volume` and `switch` to every selected channel of `element`.
///
/// Channels are visited in enumeration order. A channel that cannot be
/// switched or written is skipped without undoing what was already applied
/// to it, and the remaining channels are still processed. Only the outcome
/// of the last channel that succeeded is returned; query one channel at a
/// time to see each of them.
///
/// # Errors
/// Returns [`Error::NoChannelSet`] if no selected channel could be applied.
pub fn apply<E>(
    element: &E,
    selection: ChannelSelection,
    volume: VolumeRequest,
    switch: SwitchRequest,
) -> Result<ChannelOutcome>
where
    E: ControlElement + ?Sized,
{
    let mut last = None;
    let mut toggled = false;

    for channel in selection.channels() {
        match apply_channel(element, channel, volume, switch, &mut toggled) {
            Ok(outcome) => {
                debug!(
                    %channel,
                    volume_percent = outcome.volume_percent,
                    switch = %outcome.switch_state,
                    "Channel applied"
                );
                last = Some(outcome);
            }
            Err(Skip::NoPlaybackChannel) => {
                trace!(%channel, "No playback on channel");
            }
            Err(skip) => {
                debug!(%channel, reason = ?skip, "Skipping channel");
            }
        }
    }

    last.ok_or(Error::NoChannelSet)
}

fn apply_channel<E>(
    element: &E,
    channel: Channel,
    volume: VolumeRequest,
    switch: SwitchRequest,
    toggled: &mut bool,
) -> std::result::Result<ChannelOutcome, Skip>
where
    E: ControlElement + ?Sized,
{
    if !element.has_playback_channel(channel) {
        return Err(Skip::NoPlaybackChannel);
    }

    apply_switch(element, channel, switch, toggled)?;

    if !element.has_playback_volume() {
        return Err(Skip::NoPlaybackVolume);
    }
    let volume_percent = apply_volume(element, channel, volume)?;

    Ok(ChannelOutcome { channel, switch_state: read_switch(element, channel), volume_percent })
}

fn apply_switch<E>(
    element: &E,
    channel: Channel,
    request: SwitchRequest,
    toggled: &mut bool,
) -> std::result::Result<(), Skip>
where
    E: ControlElement + ?Sized,
{
    let target = match request {
        SwitchRequest::Unchanged => return Ok(()),
        SwitchRequest::Off => SwitchState::Off,
        SwitchRequest::On => SwitchState::On,
        SwitchRequest::Toggle => {
            if !element.has_playback_switch() {
                return Err(Skip::NoPlaybackSwitch);
            }
            // A joined switch was already flipped for every channel
            if *toggled && element.has_playback_switch_joined() {
                return Ok(());
            }
            let current = element.playback_switch(channel)?;
            element.set_playback_switch(channel, current.toggled())?;
            *toggled = true;
            return Ok(());
        }
    };

    if !element.has_playback_switch() {
        return Err(Skip::NoPlaybackSwitch);
    }
    if let Ok(previous) = element.playback_switch(channel) {
        trace!(%channel, %previous, %target, "Setting playback switch");
    }
    element.set_playback_switch(channel, target)?;
    Ok(())
}

/// Compute, clamp and write the new raw volume. Returns the applied percentage.
fn apply_volume<E>(element: &E, channel: Channel, request: VolumeRequest) -> Result<f32>
where
    E: ControlElement + ?Sized,
{
    let range = element.playback_volume_range()?;

    let target = match request.action {
        VolumeAction::Unchanged => {
            let current = element.playback_volume(channel)?;
            return Ok(from_raw(current, range));
        }
        VolumeAction::SetAbsolute => to_raw(request.magnitude, range),
        VolumeAction::Increase => {
            let current = element.playback_volume(channel)?;
            to_raw(request.magnitude, range).saturating_add(current)
        }
    };

    let value = range.clamp(target);
    trace!(%channel, target, value, min = range.min, max = range.max, "Writing raw volume");
    element.set_playback_volume(channel, value)?;
    Ok(from_raw(value, range))
}

/// Elements without a switch are always audible.
fn read_switch<E>(element: &E, channel: Channel) -> SwitchState
where
    E: ControlElement + ?Sized,
{
    if !element.has_playback_switch() {
        return SwitchState::On;
    }
    element.playback_switch(channel).unwrap_or_else(|e| {
        debug!(%channel, error = %e, "Could not read back playback switch");
        SwitchState::On
    })
}
