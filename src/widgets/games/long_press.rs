//! Hold the button for three seconds.

use crate::catalog::MiniGameId;
use crate::core::{GateRng, Millis};
use crate::widgets::contract::widget_bookkeeping;
use crate::widgets::{Completion, Input, MiniGame, WidgetCore, WidgetProps};

const HOLD_MS: u64 = 3000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct HoldComplete;

/// Success after an uninterrupted hold; releasing early fails.
#[derive(Debug)]
pub struct LongPress {
    core: WidgetCore<HoldComplete>,
    pressed_at: Option<Millis>,
}

impl LongPress {
    /// Create the widget.
    pub fn new(props: WidgetProps, completion: Completion, _rng: GateRng) -> Self {
        Self {
            core: WidgetCore::new(props, completion),
            pressed_at: None,
        }
    }

    /// True while the button is held.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }

    /// Hold progress in 0.0..=1.0.
    #[must_use]
    pub fn hold_progress(&self, now: Millis) -> f32 {
        self.pressed_at
            .map_or(0.0, |at| (now.since(at) as f32 / HOLD_MS as f32).min(1.0))
    }
}

impl MiniGame for LongPress {
    widget_bookkeeping!(MiniGameId::LongPress);

    fn handle(&mut self, input: &Input, now: Millis) {
        if self.core.is_inert() {
            return;
        }
        match input {
            Input::PressStart => {
                self.core.timers.cancel_key(&HoldComplete);
                self.pressed_at = Some(now);
                self.core.timers.schedule_after(now, HOLD_MS, HoldComplete);
            }
            Input::PressEnd => {
                if self.pressed_at.take().is_some() {
                    self.core.fail();
                }
            }
            _ => {}
        }
    }

    fn tick(&mut self, now: Millis) {
        if let Some((_, HoldComplete)) = self.core.next_due(now) {
            self.pressed_at = None;
            self.core.succeed();
        }
    }
}
