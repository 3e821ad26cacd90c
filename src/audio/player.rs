//! Effect scheduling and the process-wide player.
//!
//! `EffectPlayer` turns an `ExplosionSound` into timed bursts on a
//! `TimerSet` and hands each one to the `AudioOutput` when the host ticks
//! past its start. An absent or failing output never reaches the caller:
//! it is logged and playback degrades to silence.

use std::sync::OnceLock;

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::sound::{Burst, ExplosionSound, RELEASE_MARGIN_MS};
use crate::core::Millis;
use crate::error::AudioError;
use crate::widgets::TimerSet;

/// A sound device.
pub trait AudioOutput: Send {
    /// Wake a suspended device. Called before each effect.
    fn resume(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    /// Start one burst now. The device stops it after `burst.duration_ms`.
    fn play(&mut self, burst: &Burst) -> Result<(), AudioError>;

    /// Release the resources of a finished burst.
    fn release(&mut self, _burst_index: u32) {}
}

/// Output that accepts every burst and produces nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullOutput;

impl AudioOutput for NullOutput {
    fn play(&mut self, _burst: &Burst) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Result of triggering an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Playback {
    /// Bursts are scheduled; the last one is released at `finishes_at`.
    Scheduled { finishes_at: Millis },
    /// No device; nothing was scheduled.
    Unavailable,
}

#[derive(Clone, Debug, PartialEq)]
enum Pending {
    Start(Burst),
    Release(u32),
}

/// Schedules effect bursts against the virtual clock.
pub struct EffectPlayer {
    output: Option<Box<dyn AudioOutput>>,
    pending: TimerSet<Pending>,
}

impl EffectPlayer {
    /// Player with no device. Every effect reports `Unavailable`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: None,
            pending: TimerSet::new(),
        }
    }

    /// Player bound to a device.
    pub fn with_output(output: impl AudioOutput + 'static) -> Self {
        Self {
            output: Some(Box::new(output)),
            pending: TimerSet::new(),
        }
    }

    /// Replace the device. Pending bursts are dropped.
    pub fn set_output(&mut self, output: Option<Box<dyn AudioOutput>>) {
        self.pending.clear();
        self.output = output;
    }

    /// True when a device is attached.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.output.is_some()
    }

    /// Schedule the three bursts of `sound` starting at `now`.
    pub fn play_explosion(&mut self, sound: &ExplosionSound, now: Millis) -> Playback {
        let Some(output) = self.output.as_mut() else {
            warn!("audio output unavailable; skipping explosion");
            return Playback::Unavailable;
        };
        if let Err(e) = output.resume() {
            warn!(error = %e, "could not resume audio output");
        }

        for burst in sound.bursts() {
            let start = now + burst.offset_ms;
            self.pending.schedule(
                start + burst.duration_ms + RELEASE_MARGIN_MS,
                Pending::Release(burst.index),
            );
            self.pending.schedule(start, Pending::Start(burst));
        }
        let finishes_at = now + sound.total_ms();
        debug!(%finishes_at, "explosion scheduled");
        Playback::Scheduled { finishes_at }
    }

    /// Start and release every burst due at `now`.
    pub fn tick(&mut self, now: Millis) {
        while let Some((_, pending)) = self.pending.pop_due(now) {
            let Some(output) = self.output.as_mut() else {
                return;
            };
            match pending {
                Pending::Start(burst) => {
                    if let Err(e) = output.play(&burst) {
                        warn!(burst = burst.index, error = %e, "burst playback failed");
                    }
                }
                Pending::Release(index) => output.release(index),
            }
        }
    }

    /// Drop every pending burst and release. Returns how many were dropped.
    pub fn clear_all_pending(&mut self) -> usize {
        let dropped = self.pending.clear();
        if dropped > 0 {
            debug!(dropped, "cleared pending audio timers");
        }
        dropped
    }

    /// Number of bursts and releases not yet fired.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl Default for EffectPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EffectPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectPlayer")
            .field("available", &self.is_available())
            .field("pending", &self.pending.len())
            .finish()
    }
}

static PLAYER: OnceLock<Mutex<EffectPlayer>> = OnceLock::new();

/// The process-wide player, created without a device on first use.
///
/// Hosts attach a device with `global().lock().set_output(..)`.
pub fn global() -> &'static Mutex<EffectPlayer> {
    PLAYER.get_or_init(|| Mutex::new(EffectPlayer::new()))
}
