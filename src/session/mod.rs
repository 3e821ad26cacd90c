//! Session state machine.
//!
//! ## Key Types
//!
//! - `SessionState`: immutable playthrough snapshot
//! - `SessionStatus`: idle / playing / waiting-to-resume / cleared / game over
//! - `SessionEvent`: input to `SessionState::apply`
//! - `SequencePlan`: opener and length of a playthrough

pub mod sequence;
pub mod state;
pub mod transitions;

pub use sequence::{build_sequence, SequencePlan};
pub use state::{SessionState, SessionStatus};
pub use transitions::SessionEvent;
