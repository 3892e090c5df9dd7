//! In-memory mixer used by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::channel::{Channel, SwitchState};
use crate::element::{ControlElement, MixerBackend, Selector};
use crate::error::{Error, Result};
use crate::volume::RawVolumeRange;

/// A control element whose state lives in memory.
pub(crate) struct FakeElement {
    channels: Vec<Channel>,
    range: RawVolumeRange,
    has_volume: bool,
    has_switch: bool,
    joined: bool,
    failing_writes: HashSet<Channel>,
    volumes: RefCell<HashMap<Channel, i64>>,
    switches: RefCell<HashMap<Channel, SwitchState>>,
    volume_writes: RefCell<Vec<(Channel, i64)>>,
    switch_writes: Cell<usize>,
    releases: Option<Rc<Cell<usize>>>,
}

impl FakeElement {
    pub(crate) fn new(channels: &[Channel], range: RawVolumeRange) -> Self {
        let midpoint = range.min + (range.max - range.min) / 2;
        Self {
            channels: channels.to_vec(),
            range,
            has_volume: true,
            has_switch: true,
            joined: false,
            failing_writes: HashSet::new(),
            volumes: RefCell::new(channels.iter().map(|c| (*c, midpoint)).collect()),
            switches: RefCell::new(channels.iter().map(|c| (*c, SwitchState::On)).collect()),
            volume_writes: RefCell::new(Vec::new()),
            switch_writes: Cell::new(0),
            releases: None,
        }
    }

    pub(crate) fn mono(range: RawVolumeRange) -> Self {
        Self::new(&[Channel::MONO], range)
    }

    pub(crate) fn stereo(range: RawVolumeRange) -> Self {
        Self::new(&[Channel::FrontLeft, Channel::FrontRight], range)
    }

    pub(crate) fn with_volume(self, channel: Channel, raw: i64) -> Self {
        self.volumes.borrow_mut().insert(channel, raw);
        self
    }

    pub(crate) fn with_switch(self, channel: Channel, state: SwitchState) -> Self {
        self.switches.borrow_mut().insert(channel, state);
        self
    }

    pub(crate) fn with_joined_switch(mut self) -> Self {
        self.joined = true;
        self
    }

    pub(crate) fn with_failing_write(mut self, channel: Channel) -> Self {
        self.failing_writes.insert(channel);
        self
    }

    pub(crate) fn without_volume(mut self) -> Self {
        self.has_volume = false;
        self
    }

    pub(crate) fn without_switch(mut self) -> Self {
        self.has_switch = false;
        self
    }

    /// Count drops of this element in `releases`.
    pub(crate) fn with_release_counter(mut self, releases: Rc<Cell<usize>>) -> Self {
        self.releases = Some(releases);
        self
    }

    pub(crate) fn volume(&self, channel: Channel) -> i64 {
        self.volumes.borrow()[&channel]
    }

    pub(crate) fn switch(&self, channel: Channel) -> SwitchState {
        self.switches.borrow()[&channel]
    }

    pub(crate) fn volume_writes(&self) -> Vec<(Channel, i64)> {
        self.volume_writes.borrow().clone()
    }

    pub(crate) fn switch_writes(&self) -> usize {
        self.switch_writes.get()
    }

    fn check_channel(&self, channel: Channel) -> Result<()> {
        if self.channels.contains(&channel) {
            Ok(())
        } else {
            Err(Error::Driver(format!("no channel {channel}")))
        }
    }
}

impl Drop for FakeElement {
    fn drop(&mut self) {
        if let Some(releases) = &self.releases {
            releases.set(releases.get() + 1);
        }
    }
}

impl ControlElement for FakeElement {
    fn has_playback_volume(&self) -> bool {
        self.has_volume
    }

    fn has_playback_switch(&self) -> bool {
        self.has_switch
    }

    fn has_playback_switch_joined(&self) -> bool {
        self.joined
    }

    fn has_playback_channel(&self, channel: Channel) -> bool {
        self.channels.contains(&channel)
    }

    fn playback_volume_range(&self) -> Result<RawVolumeRange> {
        if self.has_volume { Ok(self.range) } else { Err(Error::Driver("no volume".into())) }
    }

    fn playback_volume(&self, channel: Channel) -> Result<i64> {
        self.check_channel(channel)?;
        Ok(self.volume(channel))
    }

    fn set_playback_volume(&self, channel: Channel, value: i64) -> Result<()> {
        self.check_channel(channel)?;
        if self.failing_writes.contains(&channel) {
            return Err(Error::Driver("write rejected".into()));
        }
        self.volumes.borrow_mut().insert(channel, value);
        self.volume_writes.borrow_mut().push((channel, value));
        Ok(())
    }

    fn playback_switch(&self, channel: Channel) -> Result<SwitchState> {
        self.check_channel(channel)?;
        if !self.has_switch {
            return Err(Error::Driver("no switch".into()));
        }
        Ok(self.switch(channel))
    }

    fn set_playback_switch(&self, channel: Channel, state: SwitchState) -> Result<()> {
        self.check_channel(channel)?;
        if !self.has_switch {
            return Err(Error::Driver("no switch".into()));
        }
        let mut switches = self.switches.borrow_mut();
        if self.joined {
            for position in switches.values_mut() {
                *position = state;
            }
        } else {
            switches.insert(channel, state);
        }
        self.switch_writes.set(self.switch_writes.get() + 1);
        Ok(())
    }
}

/// Step at which [`FakeBackend`] fails to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailAt {
    Open,
    Attach,
    Register,
    Load,
}

/// Hands out stereo [`FakeElement`]s for a single known card and selector.
pub(crate) struct FakeBackend {
    pub(crate) card: String,
    pub(crate) selector: Selector,
    pub(crate) fail_at: Option<FailAt>,
    pub(crate) opened: Cell<usize>,
    pub(crate) releases: Rc<Cell<usize>>,
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        Self {
            card: "default".to_string(),
            selector: Selector::default(),
            fail_at: None,
            opened: Cell::new(0),
            releases: Rc::new(Cell::new(0)),
        }
    }

    pub(crate) fn failing_at(fail_at: FailAt) -> Self {
        Self { fail_at: Some(fail_at), ..Self::new() }
    }

    fn stage(&self, stage: FailAt, card: &str) -> Result<()> {
        if self.fail_at != Some(stage) {
            return Ok(());
        }
        let card = card.to_string();
        let reason = "No such device".to_string();
        Err(match stage {
            FailAt::Open => Error::Open { card, reason },
            FailAt::Attach => Error::Attach { card, reason },
            FailAt::Register => Error::Register { card, reason },
            FailAt::Load => Error::Load { card, reason },
        })
    }
}

impl MixerBackend for FakeBackend {
    type Element = FakeElement;

    fn open_element(&self, card: &str, selector: &Selector) -> Result<FakeElement> {
        self.stage(FailAt::Open, card)?;
        self.opened.set(self.opened.get() + 1);
        let session = FakeElement::stereo(RawVolumeRange::new(0, 100))
            .with_release_counter(Rc::clone(&self.releases));

        self.stage(FailAt::Attach, card)?;
        if card != self.card {
            return Err(Error::Attach { card: card.to_string(), reason: "No such file".into() });
        }
        self.stage(FailAt::Register, card)?;
        self.stage(FailAt::Load, card)?;

        if *selector != self.selector {
            return Err(Error::ElementNotFound {
                name: selector.name.clone(),
                index: selector.index,
            });
        }
        Ok(session)
    }
}
