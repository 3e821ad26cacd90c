//! Mash the button before the countdown runs out.

use crate::catalog::MiniGameId;
use crate::core::{GateRng, Millis};
use crate::widgets::contract::widget_bookkeeping;
use crate::widgets::{Completion, Input, MiniGame, Outcome, WidgetCore, WidgetProps};

const TARGET_CLICKS: u32 = 12;
const DEFAULT_LIMIT_SECS: u32 = 6;
const COUNTDOWN_INTERVAL_MS: u64 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Countdown;

/// Twelve presses inside the time limit.
#[derive(Debug)]
pub struct RapidClick {
    core: WidgetCore<Countdown>,
    clicks: u32,
    seconds_left: u32,
}

impl RapidClick {
    /// Create the widget.
    pub fn new(props: WidgetProps, completion: Completion, _rng: GateRng) -> Self {
        let seconds_left = props.time_limit.unwrap_or(DEFAULT_LIMIT_SECS);
        Self {
            core: WidgetCore::new(props, completion),
            clicks: 0,
            seconds_left,
        }
    }

    /// Presses so far.
    #[must_use]
    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    /// Whole seconds remaining on the countdown.
    #[must_use]
    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    /// Progress towards the target in percent, capped at 100.
    #[must_use]
    pub fn progress(&self) -> f32 {
        (self.clicks as f32 / TARGET_CLICKS as f32 * 100.0).min(100.0)
    }
}

impl MiniGame for RapidClick {
    widget_bookkeeping!(MiniGameId::RapidClick);

    fn mount(&mut self, now: Millis) {
        self.core
            .timers
            .schedule_after(now, COUNTDOWN_INTERVAL_MS, Countdown);
    }

    fn handle(&mut self, input: &Input, _now: Millis) {
        if self.core.is_inert() || !matches!(input, Input::Press) {
            return;
        }
        self.clicks += 1;
        if self.clicks >= TARGET_CLICKS {
            self.core.succeed();
        }
    }

    fn tick(&mut self, now: Millis) {
        while let Some((at, Countdown)) = self.core.next_due(now) {
            if self.seconds_left <= 1 {
                self.seconds_left = 0;
                let reached = self.clicks >= TARGET_CLICKS;
                self.core.finish(if reached {
                    Outcome::Success
                } else {
                    Outcome::Failure
                });
            } else {
                self.seconds_left -= 1;
                self.core
                    .timers
                    .schedule_after(at, COUNTDOWN_INTERVAL_MS, Countdown);
            }
        }
    }
}
