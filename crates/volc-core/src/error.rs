//! Error types for Volc core.

use thiserror::Error;

/// Core error type for mixer operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Mixer {card} open error: {reason}")]
    Open { card: String, reason: String },

    #[error("Mixer attach {card} error: {reason}")]
    Attach { card: String, reason: String },

    #[error("Mixer register error: {reason}")]
    Register { card: String, reason: String },

    #[error("Mixer {card} load error: {reason}")]
    Load { card: String, reason: String },

    #[error("Unable to find simple control '{name}',{index}")]
    ElementNotFound { name: String, index: u32 },

    #[error("failed to set any channels")]
    NoChannelSet,

    #[error("mixer context is closed")]
    Closed,

    #[error("Driver error: {0}")]
    Driver(String),
}

impl Error {
    /// Whether this error was raised while opening a mixer context.
    #[must_use]
    pub fn is_init_failure(&self) -> bool {
        matches!(
            self,
            Self::Open { .. }
                | Self::Attach { .. }
                | Self::Register { .. }
                | Self::Load { .. }
                | Self::ElementNotFound { .. }
        )
    }
}

/// Result type alias for Volc core operations.
pub type Result<T> = std::result::Result<T, Error>;
