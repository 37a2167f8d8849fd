//! Conversions between bars, milliseconds and on-screen distance.
//!
//! Every conversion is driven by a tempo in beats per minute. A value of
//! `f64::NAN` stands for an argument the caller never received (for example
//! a song loaded without tempo metadata) and is reported as
//! [`TimingError::MissingArgument`] rather than producing a silent NaN.

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TimingError {
    #[error("missing value for `{0}`")]
    MissingArgument(&'static str),

    #[error("tempo must be a positive finite BPM, got {0}")]
    InvalidBpm(f64),

    #[error("`{argument}` must be finite, got {value}")]
    NonFinite { argument: &'static str, value: f64 },

    #[error("tempo setting `{setting}` is out of range, got {value}")]
    InvalidSetting { setting: &'static str, value: f64 },
}

/// How a converted value is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Round to the nearest integer, halves toward positive infinity.
    Nearest,
    /// Return the raw floating point result.
    Exact,
}

impl Rounding {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Rounding::Nearest => {
                // Adding 0.5 first loses precision near 0.5 and above 2^52.
                let floor = value.floor();
                if value - floor >= 0.5 {
                    floor + 1.0
                } else {
                    floor
                }
            }
            Rounding::Exact => value,
        }
    }
}

/// Tempo-related layout constants.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(default))]
pub struct TempoSettings {
    /// Pixels between two bar lines at `base_bpm`.
    pub distance_between_bars: f64,
    pub base_bpm: f64,
    /// Share of the bar distance that scales with tempo. The rest is fixed,
    /// so fast songs are not squeezed into unreadable spacing.
    pub dynamic_distance_ratio: f64,
    /// Bars played as a countdown before the song starts.
    pub countdown_bars: u32,
}

impl Default for TempoSettings {
    fn default() -> Self {
        Self {
            distance_between_bars: 100.0,
            base_bpm: 80.0,
            dynamic_distance_ratio: 0.25,
            countdown_bars: 1,
        }
    }
}

fn require(argument: &'static str, value: f64) -> Result<f64, TimingError> {
    if value.is_nan() {
        Err(TimingError::MissingArgument(argument))
    } else if value.is_infinite() {
        Err(TimingError::NonFinite { argument, value })
    } else {
        Ok(value)
    }
}

fn require_bpm(bpm: f64) -> Result<f64, TimingError> {
    if bpm.is_nan() {
        return Err(TimingError::MissingArgument("bpm"));
    }
    if !bpm.is_finite() || bpm <= 0.0 {
        return Err(TimingError::InvalidBpm(bpm));
    }
    Ok(bpm)
}

fn ms_per_beat(bpm: f64) -> f64 {
    60.0 / bpm * 1000.0
}

impl TempoSettings {
    /// Check values that may come from a settings file. Distances and the base
    /// tempo must be positive and the ratio must lie in `0.0..=1.0`, otherwise
    /// bar spacing can collapse to zero or turn negative.
    pub fn validate(&self) -> Result<(), TimingError> {
        let positive = [
            ("distance_between_bars", self.distance_between_bars),
            ("base_bpm", self.base_bpm),
        ];
        for (setting, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TimingError::InvalidSetting { setting, value });
            }
        }
        if !(0.0..=1.0).contains(&self.dynamic_distance_ratio) {
            return Err(TimingError::InvalidSetting {
                setting: "dynamic_distance_ratio",
                value: self.dynamic_distance_ratio,
            });
        }
        Ok(())
    }

    /// Distance in pixels covered by one bar at `bpm`.
    pub fn distance_per_bar(&self, bpm: f64) -> Result<f64, TimingError> {
        self.validate()?;
        let bpm = require_bpm(bpm)?;
        let ratio = self.dynamic_distance_ratio;
        Ok(self.distance_between_bars * ((1.0 - ratio) + ratio * (self.base_bpm / bpm)))
    }

    pub fn distance_from_bars(
        &self,
        bar_count: f64,
        bpm: f64,
        rounding: Rounding,
    ) -> Result<f64, TimingError> {
        let bar_count = require("bar_count", bar_count)?;
        let per_bar = self.distance_per_bar(bpm)?;
        Ok(rounding.apply(bar_count * per_bar))
    }

    pub fn time_from_bars(
        &self,
        bar_count: f64,
        bpm: f64,
        rounding: Rounding,
    ) -> Result<f64, TimingError> {
        let bar_count = require("bar_count", bar_count)?;
        let bpm = require_bpm(bpm)?;
        Ok(rounding.apply(bar_count * ms_per_beat(bpm)))
    }

    pub fn bars_from_time(
        &self,
        time_in_ms: f64,
        bpm: f64,
        rounding: Rounding,
    ) -> Result<f64, TimingError> {
        let time_in_ms = require("time_in_ms", time_in_ms)?;
        let bpm = require_bpm(bpm)?;
        Ok(rounding.apply(time_in_ms / ms_per_beat(bpm)))
    }

    /// Length of the countdown in milliseconds, unrounded.
    pub fn countdown_duration_ms(&self, bpm: f64) -> Result<f64, TimingError> {
        self.time_from_bars(self.countdown_bars as f64, bpm, Rounding::Exact)
    }
}

pub fn distance_per_bar(bpm: f64) -> Result<f64, TimingError> {
    TempoSettings::default().distance_per_bar(bpm)
}

/// X distance in pixels for `bar_count` bars. Rounded unless told otherwise.
pub fn distance_from_bars(bar_count: f64, bpm: f64, rounding: Rounding) -> Result<f64, TimingError> {
    TempoSettings::default().distance_from_bars(bar_count, bpm, rounding)
}

/// Milliseconds spanned by `bar_count` bars.
pub fn time_from_bars(bar_count: f64, bpm: f64, rounding: Rounding) -> Result<f64, TimingError> {
    TempoSettings::default().time_from_bars(bar_count, bpm, rounding)
}

/// Bars elapsed after `time_in_ms`. Callers usually want [`Rounding::Exact`].
pub fn bars_from_time(time_in_ms: f64, bpm: f64, rounding: Rounding) -> Result<f64, TimingError> {
    TempoSettings::default().bars_from_time(time_in_ms, bpm, rounding)
}

pub fn countdown_duration_ms(bpm: f64) -> Result<f64, TimingError> {
    TempoSettings::default().countdown_duration_ms(bpm)
}
