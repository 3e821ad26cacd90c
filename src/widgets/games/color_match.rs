//! Pick the swatch that matches the target colour.

use crate::catalog::MiniGameId;
use crate::core::{GateRng, Millis};
use crate::widgets::contract::widget_bookkeeping;
use crate::widgets::{Completion, Input, MiniGame, WidgetCore, WidgetProps};

/// A labelled swatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorOption {
    pub label: &'static str,
    pub hex: &'static str,
}

/// Swatches offered, in display order.
pub const COLORS: [ColorOption; 4] = [
    ColorOption {
        label: "Mint",
        hex: "#34d399",
    },
    ColorOption {
        label: "Coral",
        hex: "#fb7185",
    },
    ColorOption {
        label: "Sand",
        hex: "#facc15",
    },
    ColorOption {
        label: "Ink",
        hex: "#38bdf8",
    },
];

#[derive(Debug)]
pub struct ColorMatch {
    core: WidgetCore<()>,
    target: usize,
}

impl ColorMatch {
    /// Create the widget with a random target.
    pub fn new(props: WidgetProps, completion: Completion, mut rng: GateRng) -> Self {
        Self {
            core: WidgetCore::new(props, completion),
            target: rng.gen_range_usize(0..COLORS.len()),
        }
    }

    /// Index of the target swatch in `COLORS`.
    #[must_use]
    pub fn target_index(&self) -> usize {
        self.target
    }

    #[must_use]
    pub fn target(&self) -> ColorOption {
        COLORS[self.target]
    }
}

impl MiniGame for ColorMatch {
    widget_bookkeeping!(MiniGameId::ColorMatch);

    fn handle(&mut self, input: &Input, _now: Millis) {
        if self.core.is_inert() {
            return;
        }
        match *input {
            Input::Choose(index) if index < COLORS.len() => {
                if index == self.target {
                    self.core.succeed();
                } else {
                    self.core.fail();
                }
            }
            _ => {}
        }
    }
}
