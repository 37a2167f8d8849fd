#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use crate::timing::{Rounding, TempoSettings, TimingError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PlayMode {
    #[default]
    Stopped,
    /// Counting in before the first bar.
    Countdown,
    /// The player is performing.
    Playing,
    /// A recorded take is being played back.
    Playback,
    Paused,
}

impl PlayMode {
    /// Whether the game clock is running and notes should scroll.
    pub fn is_game_playing(self) -> bool {
        matches!(self, PlayMode::Playing | PlayMode::Playback)
    }

    pub fn name(self) -> &'static str {
        match self {
            PlayMode::Stopped => "Stopped",
            PlayMode::Countdown => "Countdown",
            PlayMode::Playing => "Playing",
            PlayMode::Playback => "Playback",
            PlayMode::Paused => "Paused",
        }
    }
}

/// Song clock. Time is in milliseconds relative to the first bar, so it is
/// negative while counting in.
#[derive(Debug, Clone, Default)]
pub struct Transport {
    mode: PlayMode,
    elapsed_ms: f64,
    resume_mode: Option<PlayMode>,
}

impl Transport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Start counting in from the beginning of the song.
    pub fn start(&mut self, tempo: &TempoSettings, bpm: f64) -> Result<(), TimingError> {
        let countdown = tempo.countdown_duration_ms(bpm)?;
        self.elapsed_ms = -countdown;
        self.mode = if countdown > 0.0 {
            PlayMode::Countdown
        } else {
            PlayMode::Playing
        };
        self.resume_mode = None;
        log::debug!("transport started, {} ms countdown", countdown);
        Ok(())
    }

    /// Replay from the first bar without a countdown.
    pub fn start_playback(&mut self) {
        self.elapsed_ms = 0.0;
        self.mode = PlayMode::Playback;
        self.resume_mode = None;
    }

    pub fn pause(&mut self) {
        if matches!(
            self.mode,
            PlayMode::Countdown | PlayMode::Playing | PlayMode::Playback
        ) {
            self.resume_mode = Some(self.mode);
            self.mode = PlayMode::Paused;
        }
    }

    pub fn resume(&mut self) {
        if let Some(mode) = self.resume_mode.take() {
            self.mode = mode;
        }
    }

    pub fn stop(&mut self) {
        *self = Self::default();
    }

    /// Move the clock forward. Does nothing unless running.
    pub fn advance(&mut self, dt_ms: f64) {
        match self.mode {
            PlayMode::Countdown => {
                self.elapsed_ms += dt_ms;
                if self.elapsed_ms >= 0.0 {
                    self.mode = PlayMode::Playing;
                }
            }
            PlayMode::Playing | PlayMode::Playback => self.elapsed_ms += dt_ms,
            PlayMode::Stopped | PlayMode::Paused => {}
        }
    }

    /// Position of the clock in bars. Negative during the countdown.
    pub fn current_bars(&self, tempo: &TempoSettings, bpm: f64) -> Result<f64, TimingError> {
        tempo.bars_from_time(self.elapsed_ms, bpm, Rounding::Exact)
    }
}
