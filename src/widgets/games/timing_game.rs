//! Stop the bouncing gauge inside the green window.

use crate::catalog::MiniGameId;
use crate::core::{GateRng, Millis};
use crate::widgets::contract::widget_bookkeeping;
use crate::widgets::{Completion, Input, MiniGame, WidgetCore, WidgetProps};

const WINDOW_MIN: f32 = 45.0;
const WINDOW_MAX: f32 = 55.0;
const STEP: f32 = 2.4;
const FRAME_MS: u64 = 30;
const READ_DELAY_MS: u64 = 15_000;
const DEFAULT_LIMIT_SECS: u32 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Timer {
    ReadDone,
    Frame,
    Deadline,
}

/// Gauge bouncing between 0 and 100.
///
/// On the first attempt the player gets a reading pause before the gauge
/// starts; presses during the pause are ignored.
#[derive(Debug)]
pub struct TimingGame {
    core: WidgetCore<Timer>,
    position: f32,
    direction: f32,
    reading: bool,
}

impl TimingGame {
    /// Create the widget.
    pub fn new(props: WidgetProps, completion: Completion, _rng: GateRng) -> Self {
        Self {
            reading: props.is_first_attempt(),
            core: WidgetCore::new(props, completion),
            position: 0.0,
            direction: 1.0,
        }
    }

    /// Gauge position in 0..=100.
    #[must_use]
    pub fn position(&self) -> f32 {
        self.position
    }

    /// True while the reading pause runs.
    #[must_use]
    pub fn is_reading(&self) -> bool {
        self.reading
    }

    /// The success window.
    #[must_use]
    pub fn window(&self) -> (f32, f32) {
        (WINDOW_MIN, WINDOW_MAX)
    }

    fn start_gauge(&mut self, now: Millis) {
        self.reading = false;
        let limit = self.core.props.time_limit_ms(DEFAULT_LIMIT_SECS);
        self.core.timers.schedule_after(now, FRAME_MS, Timer::Frame);
        self.core.timers.schedule_after(now, limit, Timer::Deadline);
    }

    fn step(&mut self) {
        let mut next = self.position + self.direction * STEP;
        if next >= 100.0 {
            next = 100.0;
            self.direction = -1.0;
        }
        if next <= 0.0 {
            next = 0.0;
            self.direction = 1.0;
        }
        self.position = next;
    }
}

impl MiniGame for TimingGame {
    widget_bookkeeping!(MiniGameId::TimingGame);

    fn mount(&mut self, now: Millis) {
        if self.reading {
            self.core
                .timers
                .schedule_after(now, READ_DELAY_MS, Timer::ReadDone);
        } else {
            self.start_gauge(now);
        }
    }

    fn handle(&mut self, input: &Input, _now: Millis) {
        if self.core.is_inert() || self.reading || !matches!(input, Input::Press) {
            return;
        }
        if (WINDOW_MIN..=WINDOW_MAX).contains(&self.position) {
            self.core.succeed();
        } else {
            self.core.fail();
        }
    }

    fn tick(&mut self, now: Millis) {
        while let Some((at, timer)) = self.core.next_due(now) {
            match timer {
                Timer::ReadDone => self.start_gauge(at),
                Timer::Frame => {
                    self.step();
                    self.core.timers.schedule_after(at, FRAME_MS, Timer::Frame);
                }
                Timer::Deadline => {
                    self.core.fail();
                }
            }
        }
    }
}
