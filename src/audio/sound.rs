//! Explosion effect parameters and burst envelopes.

use serde::{Deserialize, Serialize};

/// Bursts per explosion.
pub const BURST_COUNT: u32 = 3;

/// Milliseconds between burst starts.
pub const BURST_SPACING_MS: u64 = 200;

/// Each burst starts this many Hz below the previous one.
pub const BURST_STEP_HZ: f32 = 60.0;

/// Frequency every burst sweeps down to.
pub const END_FREQUENCY: f32 = 20.0;

/// Gain every burst decays to.
pub const END_GAIN: f32 = 0.01;

/// Extra time a burst's nodes are held after it stops.
pub const RELEASE_MARGIN_MS: u64 = 100;

/// Oscillator shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Waveform {
    #[default]
    Square,
    Sine,
}

/// Parameters of the explosion effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionSound {
    /// Start frequency of the first burst, in Hz.
    pub base_frequency: f32,
    /// Length of each burst, in seconds.
    pub duration: f32,
    /// Start gain of each burst.
    pub gain: f32,
}

impl Default for ExplosionSound {
    fn default() -> Self {
        Self {
            base_frequency: 220.0,
            duration: 0.4,
            gain: 0.3,
        }
    }
}

impl ExplosionSound {
    /// Length of one burst in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        (self.duration.max(0.0) * 1000.0).round() as u64
    }

    /// The bursts, in play order.
    #[must_use]
    pub fn bursts(&self) -> Vec<Burst> {
        (0..BURST_COUNT)
            .map(|index| Burst {
                index,
                offset_ms: u64::from(index) * BURST_SPACING_MS,
                waveform: Waveform::Square,
                start_frequency: (self.base_frequency - index as f32 * BURST_STEP_HZ)
                    .max(END_FREQUENCY),
                end_frequency: END_FREQUENCY,
                start_gain: self.gain,
                end_gain: END_GAIN,
                duration_ms: self.duration_ms(),
            })
            .collect()
    }

    /// Milliseconds from trigger until the last burst is released.
    #[must_use]
    pub fn total_ms(&self) -> u64 {
        u64::from(BURST_COUNT - 1) * BURST_SPACING_MS + self.duration_ms() + RELEASE_MARGIN_MS
    }
}

/// One tone of the effect.
///
/// Frequency and gain both follow an exponential ramp from their start
/// value to their end value over `duration_ms`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Burst {
    pub index: u32,
    /// Start time relative to the trigger.
    pub offset_ms: u64,
    pub waveform: Waveform,
    pub start_frequency: f32,
    pub end_frequency: f32,
    pub start_gain: f32,
    pub end_gain: f32,
    pub duration_ms: u64,
}

impl Burst {
    /// Frequency `elapsed_ms` into the burst.
    #[must_use]
    pub fn frequency_at(&self, elapsed_ms: u64) -> f32 {
        exponential_ramp(self.start_frequency, self.end_frequency, self.progress(elapsed_ms))
    }

    /// Gain `elapsed_ms` into the burst. Silent once the burst has stopped.
    #[must_use]
    pub fn gain_at(&self, elapsed_ms: u64) -> f32 {
        if elapsed_ms > self.duration_ms {
            return 0.0;
        }
        exponential_ramp(self.start_gain, self.end_gain, self.progress(elapsed_ms))
    }

    fn progress(&self, elapsed_ms: u64) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (elapsed_ms as f32 / self.duration_ms as f32).min(1.0)
    }
}

// Exponential ramps are undefined through zero; clamp to a tiny positive value.
fn exponential_ramp(from: f32, to: f32, t: f32) -> f32 {
    let from = from.max(f32::EPSILON);
    let to = to.max(f32::EPSILON);
    from * (to / from).powf(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_default_bursts() {
        let bursts = ExplosionSound::default().bursts();

        assert_eq!(bursts.len(), 3);
        let starts: Vec<f32> = bursts.iter().map(|b| b.start_frequency).collect();
        assert_eq!(starts, vec![220.0, 160.0, 100.0]);
        let offsets: Vec<u64> = bursts.iter().map(|b| b.offset_ms).collect();
        assert_eq!(offsets, vec![0, 200, 400]);
        assert!(bursts.iter().all(|b| b.duration_ms == 400 && b.waveform == Waveform::Square));
    }

    #[test]
    fn test_envelopes() {
        let burst = &ExplosionSound::default().bursts()[0];

        assert!(close(burst.frequency_at(0), 220.0));
        assert!(close(burst.frequency_at(400), 20.0));
        assert!(burst.frequency_at(200) < 220.0 && burst.frequency_at(200) > 20.0);
        assert!(close(burst.gain_at(0), 0.3));
        assert!(close(burst.gain_at(400), 0.01));
        assert_eq!(burst.gain_at(401), 0.0);
    }

    #[test]
    fn test_low_base_frequency_clamps() {
        let sound = ExplosionSound {
            base_frequency: 50.0,
            ..ExplosionSound::default()
        };
        assert!(sound.bursts().iter().all(|b| b.start_frequency >= END_FREQUENCY));
    }

    #[test]
    fn test_total_length() {
        assert_eq!(ExplosionSound::default().total_ms(), 900);
        let game_over = ExplosionSound {
            base_frequency: 220.0,
            duration: 0.5,
            gain: 0.4,
        };
        assert_eq!(game_over.total_ms(), 1000);
    }
}
