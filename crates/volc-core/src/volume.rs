//! Volume requests and percentage/raw range conversion.
//!
//! Percentages use `100.0` for the full raw range. The raw side is whatever
//! integer range the driver reports for an element, so every conversion is
//! done against one [`RawVolumeRange`] at a time.

use serde::{Deserialize, Serialize};

/// How a [`VolumeRequest`] changes the current volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeAction {
    /// Add the magnitude to the current volume
    Increase,
    /// Replace the current volume with the magnitude
    SetAbsolute,
    /// Leave the volume alone and only report it
    #[default]
    Unchanged,
}

/// A desired volume change, in percentage units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VolumeRequest {
    /// Percentage amount; unbounded, the applied raw value is clamped
    pub magnitude: f32,
    /// What to do with the magnitude
    pub action: VolumeAction,
}

impl VolumeRequest {
    /// Raise the volume by `percent`.
    #[must_use]
    pub fn increase(percent: f32) -> Self {
        Self { magnitude: percent, action: VolumeAction::Increase }
    }

    /// Lower the volume by `percent`.
    #[must_use]
    pub fn decrease(percent: f32) -> Self {
        Self::increase(-percent)
    }

    /// Set the volume to `percent`.
    #[must_use]
    pub fn set(percent: f32) -> Self {
        Self { magnitude: percent, action: VolumeAction::SetAbsolute }
    }

    /// Query only.
    #[must_use]
    pub fn unchanged() -> Self {
        Self { magnitude: 0.0, action: VolumeAction::Unchanged }
    }
}

/// Raw playback volume bounds reported by the driver for one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawVolumeRange {
    pub min: i64,
    pub max: i64,
}

impl RawVolumeRange {
    #[must_use]
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Whether the range spans no values, so percentages are meaningless.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.min >= self.max
    }

    /// Pull `raw` onto the nearest bound.
    ///
    /// Never panics, even for an inverted range; `min` is checked first.
    #[must_use]
    pub fn clamp(self, raw: i64) -> i64 {
        if raw < self.min {
            self.min
        } else if raw > self.max {
            self.max
        } else {
            raw
        }
    }
}

/// Convert a percentage to a raw value: `ceil(percent * (max - min) * 0.01 + min)`.
///
/// Rounding up keeps any positive increment at least one raw step. The offset
/// is added unscaled, which is what existing volume levels were written with;
/// [`from_raw`] is therefore only an approximate inverse when `min != 0`.
///
/// A degenerate range yields `ceil(min)`. Results outside `i64` saturate, and
/// a NaN percentage maps to `0`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn to_raw(percent: f32, range: RawVolumeRange) -> i64 {
    let min = range.min as f64;
    let max = range.max as f64;
    (f64::from(percent) * (max - min) * 0.01 + min).ceil() as i64
}

/// Convert a raw value back to a percentage: `(100 * raw - min) / (max - min)`.
///
/// For a degenerate range the division follows IEEE-754: the result is
/// `NaN` when the numerator is zero and an infinity otherwise.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn from_raw(raw: i64, range: RawVolumeRange) -> f32 {
    let min = range.min as f64;
    let max = range.max as f64;
    ((100.0 * raw as f64 - min) / (max - min)) as f32
}
