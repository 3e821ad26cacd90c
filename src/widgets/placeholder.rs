//! Stand-in for a catalog entry without a widget.
//!
//! Mounting a game that has no implementation is a content bug, not a
//! runtime fault. The placeholder renders as "not implemented", ignores
//! every input and never completes.

use std::any::Any;

use tracing::warn;

use super::contract::{Completion, Input, MiniGame, Outcome};
use crate::catalog::MiniGameId;
use crate::core::Millis;

/// Never-completing widget for unimplemented games.
#[derive(Debug)]
pub struct Placeholder {
    id: MiniGameId,
    // Held so the callbacks live exactly as long as the mount.
    _completion: Completion,
}

impl Placeholder {
    /// Create a placeholder for `id`.
    pub fn new(id: MiniGameId, completion: Completion) -> Self {
        warn!(game = %id, "no widget registered; mounting placeholder");
        Self {
            id,
            _completion: completion,
        }
    }

    /// Text a host should show in place of the game.
    #[must_use]
    pub fn message(&self) -> String {
        format!("{} is not implemented yet", self.id)
    }
}

impl MiniGame for Placeholder {
    fn id(&self) -> MiniGameId {
        self.id
    }

    fn handle(&mut self, _input: &Input, _now: Millis) {}

    fn unmount(&mut self) {}

    fn outcome(&self) -> Option<Outcome> {
        None
    }

    fn pending_timers(&self) -> usize {
        0
    }

    fn is_placeholder(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_never_completes() {
        let mut widget = Placeholder::new(MiniGameId::FinalChallenge, Completion::detached());
        widget.mount(Millis::ZERO);
        widget.handle(&Input::Press, Millis::new(10));
        widget.tick(Millis::from_secs(100));

        assert!(widget.is_placeholder());
        assert!(!widget.is_finished());
        assert_eq!(widget.message(), "final-challenge is not implemented yet");
    }
}
