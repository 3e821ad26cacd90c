//! The mini-game widget contract.
//!
//! Every widget receives `WidgetProps` and a `Completion`, consumes
//! `Input` events and clock ticks, and reports exactly one `Outcome`
//! through the completion callbacks.
//!
//! ## Implementation Notes
//!
//! - `Completion` is one-shot: the first accepted report wins and every
//!   later one is swallowed, whether it comes from a stray timer or a
//!   duplicate input.
//! - `WidgetCore::finish` cancels all timers before reporting, so a
//!   finished widget has nothing left to fire.
//! - Widgets never outlive their mount. All state is rebuilt on remount.

use std::any::Any;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::timers::TimerSet;
use crate::catalog::MiniGameId;
use crate::core::Millis;

/// Result reported by a widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The player cleared the game.
    Success,
    /// The player failed the game.
    Failure,
}

/// Inputs a widget accepts from the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A user input event, in host-neutral terms.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Input {
    /// Click or tap on the widget's main control.
    Press,
    /// Pointer entered (or focused) the main control.
    Hover,
    /// Pointer position inside the widget's field.
    PointerMove { x: f32, y: f32 },
    /// Pointer pressed down on the main control.
    PressStart,
    /// Pointer released, left or cancelled.
    PressEnd,
    /// Pick the option, tile, cell, reel or note at this index.
    Choose(usize),
    /// Arrow-key movement.
    Move(Direction),
    /// Text field contents.
    Text(String),
    /// Submit the current text.
    Submit,
    /// Drop a dragged payload on the target.
    Drop(String),
}

/// Per-mount widget parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetProps {
    /// Time limit in seconds from the catalog, if any.
    pub time_limit: Option<u32>,

    /// Earlier failures of this same game in the current session.
    pub failed_attempts: u32,
}

impl WidgetProps {
    /// Create props.
    #[must_use]
    pub fn new(time_limit: Option<u32>, failed_attempts: u32) -> Self {
        Self {
            time_limit,
            failed_attempts,
        }
    }

    /// Time limit in milliseconds, falling back to the widget's own default.
    #[must_use]
    pub fn time_limit_ms(&self, default_secs: u32) -> u64 {
        u64::from(self.time_limit.unwrap_or(default_secs)) * 1000
    }

    /// True on the first attempt at this game.
    #[must_use]
    pub fn is_first_attempt(&self) -> bool {
        self.failed_attempts == 0
    }
}

type Callback = Box<dyn FnMut()>;

/// The success/failure callback pair with a one-shot guard.
///
/// ## Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use consent_gate::widgets::Completion;
///
/// let calls = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&calls);
/// let mut completion = Completion::new(move || counter.set(counter.get() + 1));
///
/// assert!(completion.succeed());
/// assert!(!completion.succeed());
/// assert!(!completion.fail());
/// assert_eq!(calls.get(), 1);
/// ```
pub struct Completion {
    on_success: Callback,
    on_failure: Option<Callback>,
    reported: Option<Outcome>,
}

impl Completion {
    /// Create a completion with only a success callback.
    pub fn new(on_success: impl FnMut() + 'static) -> Self {
        Self {
            on_success: Box::new(on_success),
            on_failure: None,
            reported: None,
        }
    }

    /// Completion whose callbacks do nothing. Used by tests and previews.
    #[must_use]
    pub fn detached() -> Self {
        Self::new(|| {})
    }

    /// Add a failure callback (builder pattern).
    #[must_use]
    pub fn with_failure(mut self, on_failure: impl FnMut() + 'static) -> Self {
        self.on_failure = Some(Box::new(on_failure));
        self
    }

    /// Report success. Returns false if an outcome was already reported.
    pub fn succeed(&mut self) -> bool {
        self.finish(Outcome::Success)
    }

    /// Report failure. Returns false if an outcome was already reported.
    pub fn fail(&mut self) -> bool {
        self.finish(Outcome::Failure)
    }

    /// Report an outcome. Returns false if one was already reported.
    pub fn finish(&mut self, outcome: Outcome) -> bool {
        if let Some(previous) = self.reported {
            trace!(?previous, ?outcome, "swallowed repeated completion");
            return false;
        }
        self.reported = Some(outcome);
        match outcome {
            Outcome::Success => (self.on_success)(),
            Outcome::Failure => {
                if let Some(on_failure) = self.on_failure.as_mut() {
                    on_failure();
                }
            }
        }
        true
    }

    /// The reported outcome, if any.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.reported
    }

    /// True once an outcome was reported.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.reported.is_some()
    }
}

impl std::fmt::Debug for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completion")
            .field("has_failure_callback", &self.on_failure.is_some())
            .field("reported", &self.reported)
            .finish()
    }
}

/// State every widget carries: props, completion and its timers.
#[derive(Debug)]
pub struct WidgetCore<K> {
    /// Mount parameters.
    pub props: WidgetProps,
    /// Widget-owned timers.
    pub timers: TimerSet<K>,
    completion: Completion,
    disposed: bool,
}

impl<K> WidgetCore<K> {
    /// Create a core for a fresh mount.
    pub fn new(props: WidgetProps, completion: Completion) -> Self {
        Self {
            props,
            timers: TimerSet::new(),
            completion,
            disposed: false,
        }
    }

    /// Cancel every timer, then report. No-op once finished or disposed.
    pub fn finish(&mut self, outcome: Outcome) -> bool {
        if self.disposed {
            return false;
        }
        self.timers.clear();
        self.completion.finish(outcome)
    }

    /// Report success.
    pub fn succeed(&mut self) -> bool {
        self.finish(Outcome::Success)
    }

    /// Report failure.
    pub fn fail(&mut self) -> bool {
        self.finish(Outcome::Failure)
    }

    /// True when the widget should ignore further events.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.disposed || self.completion.is_done()
    }

    /// The reported outcome, if any.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.completion.outcome()
    }

    /// Cancel everything and refuse further reports.
    pub fn dispose(&mut self) {
        self.timers.clear();
        self.disposed = true;
    }

    /// Pop the next due timer, unless the widget is inert.
    pub fn next_due(&mut self, now: Millis) -> Option<(Millis, K)> {
        if self.is_inert() {
            return None;
        }
        self.timers.pop_due(now)
    }
}

/// The behaviour every mini-game implements.
///
/// ## Implementation Notes
///
/// - `mount`: schedule initial timers relative to `now`
/// - `handle`: react to one input; ignore it once finished
/// - `tick`: fire every timer due at `now`, in deadline order
/// - `unmount`: cancel all timers; the widget must never report afterwards
pub trait MiniGame {
    /// Which game this widget implements.
    fn id(&self) -> MiniGameId;

    /// Start the widget's clock.
    fn mount(&mut self, _now: Millis) {}

    /// Process one input event.
    fn handle(&mut self, input: &Input, now: Millis);

    /// Fire due timers.
    fn tick(&mut self, _now: Millis) {}

    /// Dispose of the widget.
    fn unmount(&mut self);

    /// The reported outcome, if any.
    fn outcome(&self) -> Option<Outcome>;

    /// Number of timers still pending.
    fn pending_timers(&self) -> usize;

    /// True once an outcome was reported.
    fn is_finished(&self) -> bool {
        self.outcome().is_some()
    }

    /// True for the stand-in mounted when a game has no widget.
    fn is_placeholder(&self) -> bool {
        false
    }

    /// Concrete widget, for hosts that render its typed state.
    fn as_any(&self) -> &dyn Any;
}

/// Implements the bookkeeping half of `MiniGame` for a widget with a
/// `core: WidgetCore<_>` field.
macro_rules! widget_bookkeeping {
    ($id:expr) => {
        fn id(&self) -> $crate::catalog::MiniGameId {
            $id
        }

        fn unmount(&mut self) {
            self.core.dispose();
        }

        fn outcome(&self) -> Option<$crate::widgets::Outcome> {
            self.core.outcome()
        }

        fn pending_timers(&self) -> usize {
            self.core.timers.len()
        }

        fn as_any(&self) -> &dyn ::std::any::Any {
            self
        }
    };
}

pub(crate) use widget_bookkeeping;

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording() -> (Completion, Rc<RefCell<Vec<Outcome>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let on_success = Rc::clone(&log);
        let on_failure = Rc::clone(&log);
        let completion = Completion::new(move || on_success.borrow_mut().push(Outcome::Success))
            .with_failure(move || on_failure.borrow_mut().push(Outcome::Failure));
        (completion, log)
    }

    #[test]
    fn test_completion_is_one_shot() {
        let (mut completion, log) = recording();

        assert!(completion.fail());
        assert!(!completion.succeed());
        assert!(!completion.fail());

        assert_eq!(*log.borrow(), vec![Outcome::Failure]);
        assert_eq!(completion.outcome(), Some(Outcome::Failure));
    }

    #[test]
    fn test_missing_failure_callback_still_latches() {
        let mut completion = Completion::detached();
        assert!(completion.fail());
        assert!(completion.is_done());
        assert!(!completion.succeed());
    }

    #[test]
    fn test_core_finish_clears_timers() {
        let (completion, log) = recording();
        let mut core: WidgetCore<u8> = WidgetCore::new(WidgetProps::default(), completion);
        core.timers.schedule(Millis::new(10), 1);
        core.timers.schedule(Millis::new(20), 2);

        assert!(core.succeed());
        assert!(core.timers.is_empty());
        assert!(core.is_inert());
        assert_eq!(core.next_due(Millis::new(100)), None);
        assert_eq!(*log.borrow(), vec![Outcome::Success]);
    }

    #[test]
    fn test_disposed_core_never_reports() {
        let (completion, log) = recording();
        let mut core: WidgetCore<u8> = WidgetCore::new(WidgetProps::default(), completion);
        core.timers.schedule(Millis::new(10), 1);

        core.dispose();

        assert!(!core.fail());
        assert_eq!(core.next_due(Millis::new(100)), None);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_props() {
        let props = WidgetProps::new(Some(20), 0);
        assert_eq!(props.time_limit_ms(12), 20_000);
        assert!(props.is_first_attempt());

        let props = WidgetProps::new(None, 2);
        assert_eq!(props.time_limit_ms(12), 12_000);
        assert!(!props.is_first_attempt());
    }
}
