//! Press the agree button. The warm-up opener.

use crate::catalog::MiniGameId;
use crate::core::{GateRng, Millis};
use crate::widgets::contract::widget_bookkeeping;
use crate::widgets::{Completion, Input, MiniGame, WidgetCore, WidgetProps};

/// One press succeeds.
#[derive(Debug)]
pub struct BasicAgree {
    core: WidgetCore<()>,
}

impl BasicAgree {
    /// Create the widget.
    pub fn new(props: WidgetProps, completion: Completion, _rng: GateRng) -> Self {
        Self {
            core: WidgetCore::new(props, completion),
        }
    }
}

impl MiniGame for BasicAgree {
    widget_bookkeeping!(MiniGameId::BasicAgree);

    fn handle(&mut self, input: &Input, _now: Millis) {
        if self.core.is_inert() {
            return;
        }
        if matches!(input, Input::Press) {
            self.core.succeed();
        }
    }
}
