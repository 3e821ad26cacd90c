//! Hardware bridge client.
//!
//! A local bridge process forwards NFC card taps over a WebSocket. The
//! gate uses them as a physical "resume" button. Play never depends on
//! the bridge: connection failures are logged and retried in the
//! background.
//!
//! ## Key Types
//!
//! - `BridgeMessage`: JSON frames in both directions
//! - `BridgeClient`: background connection task and test trigger
//! - `BridgeEvent`: what the host forwards to `GameManager`

pub mod client;
pub mod protocol;

pub use client::{BridgeClient, BridgeEvent, DEFAULT_TEST_UID};
pub use protocol::BridgeMessage;
