//! Mini-game widgets.
//!
//! ## Key Types
//!
//! - `MiniGame`: the trait every widget implements
//! - `Completion`: one-shot success/failure callbacks
//! - `WidgetProps`: per-mount parameters (time limit, earlier failures)
//! - `Input`: host-neutral user input
//! - `TimerSet`: widget-owned cancelable timers
//! - `Placeholder`: stand-in for catalog entries without a widget
//!
//! The concrete games live in `games`.

pub mod contract;
pub mod games;
pub mod placeholder;
pub mod timers;

pub use contract::{
    Completion, Direction, Input, MiniGame, Outcome, WidgetCore, WidgetProps,
};
pub use placeholder::Placeholder;
pub use timers::{TimerId, TimerSet};
