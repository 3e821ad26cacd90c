//! A button that runs away from the pointer until it gets tired.

use crate::catalog::MiniGameId;
use crate::core::{GateRng, Millis};
use crate::widgets::contract::widget_bookkeeping;
use crate::widgets::{Completion, Input, MiniGame, WidgetCore, WidgetProps};

/// Hover encounters before the button stops fleeing.
const ENCOUNTERS_BEFORE_SUCCESS: u32 = 5;

/// Minimum spacing between pointer-chase relocations.
const CHASE_COOLDOWN_MS: u64 = 120;

const BUTTON_WIDTH: f32 = 140.0;
const BUTTON_HEIGHT: f32 = 48.0;

const DEFAULT_FIELD: (f32, f32) = (480.0, 160.0);

/// Hover relocates the button; pressing it before it tires fails.
#[derive(Debug)]
pub struct EscapeButton {
    core: WidgetCore<()>,
    rng: GateRng,
    encounters: u32,
    field: (f32, f32),
    position: (f32, f32),
    last_chase: Option<Millis>,
}

impl EscapeButton {
    /// Create the widget with the button centred in the default field.
    pub fn new(props: WidgetProps, completion: Completion, rng: GateRng) -> Self {
        let field = DEFAULT_FIELD;
        Self {
            core: WidgetCore::new(props, completion),
            rng,
            encounters: 0,
            field,
            position: (field.0 / 2.0, field.1 / 2.0),
            last_chase: None,
        }
    }

    /// Resize the field the button moves in.
    pub fn set_field(&mut self, width: f32, height: f32) {
        self.field = (width.max(0.0), height.max(0.0));
    }

    /// Hover encounters so far.
    #[must_use]
    pub fn encounters(&self) -> u32 {
        self.encounters
    }

    /// True once the button has stopped fleeing.
    #[must_use]
    pub fn is_tired(&self) -> bool {
        self.encounters >= ENCOUNTERS_BEFORE_SUCCESS
    }

    /// Top-left corner of the button inside the field.
    #[must_use]
    pub fn position(&self) -> (f32, f32) {
        self.position
    }

    fn relocate(&mut self) {
        let max_x = (self.field.0 - BUTTON_WIDTH).max(0.0);
        let max_y = (self.field.1 - BUTTON_HEIGHT).max(0.0);
        let x = if max_x > 0.0 {
            self.rng.gen_range_f32(0.0..max_x)
        } else {
            0.0
        };
        let y = if max_y > 0.0 {
            self.rng.gen_range_f32(0.0..max_y)
        } else {
            0.0
        };
        self.position = (x, y);
    }
}

impl MiniGame for EscapeButton {
    widget_bookkeeping!(MiniGameId::EscapeButton);

    fn handle(&mut self, input: &Input, now: Millis) {
        if self.core.is_inert() {
            return;
        }
        match input {
            Input::Hover => {
                if self.is_tired() {
                    return;
                }
                self.encounters += 1;
                if !self.is_tired() {
                    self.relocate();
                }
            }
            Input::PointerMove { .. } => {
                if self.is_tired() {
                    return;
                }
                if let Some(last) = self.last_chase {
                    if now.since(last) < CHASE_COOLDOWN_MS {
                        return;
                    }
                }
                self.last_chase = Some(now);
                self.relocate();
            }
            Input::Press => {
                if self.is_tired() {
                    self.core.succeed();
                } else {
                    self.core.fail();
                }
            }
            _ => {}
        }
    }
}
