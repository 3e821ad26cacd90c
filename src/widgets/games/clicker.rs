//! Click the button ten times.

use crate::catalog::MiniGameId;
use crate::core::{GateRng, Millis};
use crate::widgets::contract::widget_bookkeeping;
use crate::widgets::{Completion, Input, MiniGame, WidgetCore, WidgetProps};

const TARGET_CLICKS: u32 = 10;

/// Untimed click counter.
#[derive(Debug)]
pub struct Clicker {
    core: WidgetCore<()>,
    clicks: u32,
}

impl Clicker {
    /// Create the widget.
    pub fn new(props: WidgetProps, completion: Completion, _rng: GateRng) -> Self {
        Self {
            core: WidgetCore::new(props, completion),
            clicks: 0,
        }
    }

    /// Clicks so far.
    #[must_use]
    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    /// Clicks needed.
    #[must_use]
    pub const fn target(&self) -> u32 {
        TARGET_CLICKS
    }
}

impl MiniGame for Clicker {
    widget_bookkeeping!(MiniGameId::Clicker);

    fn handle(&mut self, input: &Input, _now: Millis) {
        if self.core.is_inert() || !matches!(input, Input::Press) {
            return;
        }
        self.clicks += 1;
        if self.clicks >= TARGET_CLICKS {
            self.core.succeed();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::games::testing::recorder;
    use crate::widgets::Outcome;

    #[test]
    fn test_tenth_click_succeeds() {
        let (completion, log) = recorder();
        let mut widget = Clicker::new(WidgetProps::default(), completion, GateRng::new(1));

        for i in 0..9 {
            widget.handle(&Input::Press, Millis::new(i));
        }
        assert!(log.borrow().is_empty());
        assert_eq!(widget.clicks(), 9);

        widget.handle(&Input::Press, Millis::new(100));
        widget.handle(&Input::Press, Millis::new(101));

        assert_eq!(*log.borrow(), vec![Outcome::Success]);
        assert_eq!(widget.clicks(), 10);
    }
}
