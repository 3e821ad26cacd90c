//! Core types: virtual clock, RNG, configuration.
//!
//! This module contains the building blocks shared by the session,
//! the widgets and the orchestrator.

pub mod clock;
pub mod config;
pub mod rng;

pub use clock::Millis;
pub use config::{AfterFailure, BridgeConfig, GateConfig};
pub use rng::GateRng;
