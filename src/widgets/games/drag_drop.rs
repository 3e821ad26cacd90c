//! Drag the right item onto the target.

use crate::catalog::MiniGameId;
use crate::core::{GateRng, Millis};
use crate::widgets::contract::widget_bookkeeping;
use crate::widgets::{Completion, Input, MiniGame, WidgetCore, WidgetProps};

/// Payload carried by the correct draggable item.
pub const CORRECT_PAYLOAD: &str = "correct";

/// Items offered for dragging: (payload, label).
const ITEMS: [(&str, &str); 2] = [(CORRECT_PAYLOAD, "Agree"), ("wrong", "Disagree")];

/// Drop the correct item to succeed; any other drop fails.
#[derive(Debug)]
pub struct DragDrop {
    core: WidgetCore<()>,
}

impl DragDrop {
    /// Create the widget.
    pub fn new(props: WidgetProps, completion: Completion, _rng: GateRng) -> Self {
        Self {
            core: WidgetCore::new(props, completion),
        }
    }

    /// Draggable items as (payload, label).
    #[must_use]
    pub fn items(&self) -> &'static [(&'static str, &'static str)] {
        &ITEMS
    }
}

impl MiniGame for DragDrop {
    widget_bookkeeping!(MiniGameId::DragDrop);

    fn handle(&mut self, input: &Input, _now: Millis) {
        if self.core.is_inert() {
            return;
        }
        if let Input::Drop(payload) = input {
            if payload == CORRECT_PAYLOAD {
                self.core.succeed();
            } else {
                self.core.fail();
            }
        }
    }
}
