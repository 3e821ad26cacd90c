//! Sound effects.
//!
//! The gate plays one effect: a three-burst square-wave "explosion" on
//! game over. The device itself is a host concern behind `AudioOutput`.
//!
//! ## Key Types
//!
//! - `ExplosionSound`: tunable parameters of the effect
//! - `Burst`: one scheduled tone with its frequency and gain envelopes
//! - `EffectPlayer`: schedules bursts on the virtual clock
//! - `Playback`: what a caller gets back from `play_explosion`

pub mod player;
pub mod sound;

pub use player::{global, AudioOutput, EffectPlayer, NullOutput, Playback};
pub use sound::{Burst, ExplosionSound, Waveform};
