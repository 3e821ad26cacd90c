//! Hit the notes on the beat.

use crate::catalog::MiniGameId;
use crate::core::{GateRng, Millis};
use crate::widgets::contract::widget_bookkeeping;
use crate::widgets::{Completion, Input, MiniGame, WidgetCore, WidgetProps};

const NOTE_COUNT: usize = 12;
const NOTE_SPACING_MS: u64 = 1000;
const GAME_DURATION_MS: u64 = NOTE_COUNT as u64 * NOTE_SPACING_MS + 1000;
const PERFECT_RANGE_MS: u64 = 250;
const GOOD_RANGE_MS: u64 = 400;
const TARGET_SCORE: u32 = 30;

/// Timing verdict for one note.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Judgement {
    Perfect,
    Good,
    Bad,
}

impl Judgement {
    fn from_offset(offset_ms: u64) -> Self {
        if offset_ms <= PERFECT_RANGE_MS {
            Judgement::Perfect
        } else if offset_ms <= GOOD_RANGE_MS {
            Judgement::Good
        } else {
            Judgement::Bad
        }
    }

    /// Points awarded.
    #[must_use]
    pub fn score(self) -> u32 {
        match self {
            Judgement::Perfect => 20,
            Judgement::Good => 10,
            Judgement::Bad => 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SongOver;

/// Twelve notes one second apart. `Choose(n)` hits note `n`.
///
/// Each note counts once. Reaching 30 points succeeds at once; otherwise
/// the song ends a second after the last note and the score decides.
#[derive(Debug)]
pub struct RhythmGame {
    core: WidgetCore<SongOver>,
    started_at: Option<Millis>,
    hit: [bool; NOTE_COUNT],
    score: u32,
    last_judgement: Option<Judgement>,
}

impl RhythmGame {
    /// Create the widget.
    pub fn new(props: WidgetProps, completion: Completion, _rng: GateRng) -> Self {
        Self {
            core: WidgetCore::new(props, completion),
            started_at: None,
            hit: [false; NOTE_COUNT],
            score: 0,
            last_judgement: None,
        }
    }

    /// Offset of note `index` from the start of the song.
    #[must_use]
    pub fn note_time(index: usize) -> Option<u64> {
        (index < NOTE_COUNT).then(|| (index as u64 + 1) * NOTE_SPACING_MS)
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Verdict of the most recent hit.
    #[must_use]
    pub fn last_judgement(&self) -> Option<Judgement> {
        self.last_judgement
    }

    /// True if note `index` was already hit.
    #[must_use]
    pub fn is_hit(&self, index: usize) -> bool {
        self.hit.get(index).copied().unwrap_or(false)
    }
}

impl MiniGame for RhythmGame {
    widget_bookkeeping!(MiniGameId::RhythmGame);

    fn mount(&mut self, now: Millis) {
        self.started_at = Some(now);
        self.core
            .timers
            .schedule_after(now, GAME_DURATION_MS, SongOver);
    }

    fn handle(&mut self, input: &Input, now: Millis) {
        if self.core.is_inert() {
            return;
        }
        let (Input::Choose(index), Some(started)) = (input, self.started_at) else {
            return;
        };
        let index = *index;
        let Some(note_time) = Self::note_time(index) else {
            return;
        };
        if self.hit[index] {
            return;
        }

        let elapsed = now.since(started);
        let judgement = Judgement::from_offset(elapsed.abs_diff(note_time));
        self.hit[index] = true;
        self.score += judgement.score();
        self.last_judgement = Some(judgement);

        if self.score >= TARGET_SCORE {
            self.core.succeed();
        }
    }

    fn tick(&mut self, now: Millis) {
        if let Some((_, SongOver)) = self.core.next_due(now) {
            if self.score >= TARGET_SCORE {
                self.core.succeed();
            } else {
                self.core.fail();
            }
        }
    }
}
