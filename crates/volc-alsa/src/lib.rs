//! Volc ALSA - alsa-lib simple mixer backend.
//!
//! This crate implements the `volc-core` mixer traits on top of the ALSA
//! simple mixer interface, so a [`volc_core::MixerContext`] can drive real
//! sound cards.

pub mod mixer;

pub use mixer::{AlsaBackend, AlsaElement};

/// Mixer context bound to an ALSA simple element.
pub type AlsaContext = volc_core::MixerContext<AlsaElement>;

/// Open `card` and resolve the control `selector`,`index` on it.
///
/// # Errors
/// Returns the init error of the first ALSA step that failed.
pub fn open(selector: &str, index: u32, card: &str) -> volc_core::Result<AlsaContext> {
    AlsaContext::init(&AlsaBackend, selector, index, card)
}
