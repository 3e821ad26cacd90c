//! The orchestrator.
//!
//! `GameManager` owns the one active `SessionState` and the widget mounted
//! for it. The host drives it with inputs, clock ticks and bridge events;
//! every widget report is turned into a session transition inside the
//! same call.
//!
//! ## Mount Epochs
//!
//! Each mount gets a fresh epoch and its completion callbacks are tagged
//! with it. A report whose epoch is not the live one comes from a widget
//! that was already swapped out and is discarded.

pub mod screen;

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info};

use crate::audio::{self, Playback};
use crate::bridge::BridgeEvent;
use crate::catalog::{article_for, MiniGameRegistry};
use crate::core::{GateConfig, GateRng, Millis};
use crate::error::ConfigError;
use crate::session::{SessionState, SessionStatus};
use crate::widgets::{Completion, Input, MiniGame, Outcome, Placeholder, WidgetProps};

pub use screen::{LifeDisplay, Screen};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Report {
    epoch: u64,
    outcome: Outcome,
}

type ReportSink = Rc<RefCell<Vec<Report>>>;

/// Identifies what the live widget was mounted for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct MountKey {
    index: usize,
    failed_attempts: u32,
}

struct Mounted {
    key: MountKey,
    epoch: u64,
    widget: Box<dyn MiniGame>,
}

/// Session orchestrator.
///
/// ## Example
///
/// ```
/// use consent_gate::core::{GateConfig, Millis};
/// use consent_gate::manager::{GameManager, Screen};
/// use consent_gate::widgets::Input;
///
/// let config = GateConfig::default().with_seed(7).with_active_games(3);
/// let mut manager = GameManager::with_standard_catalog(config).unwrap();
///
/// manager.start(Millis::ZERO);
/// // The opener is "basic-agree": one press clears it.
/// manager.input(&Input::Press, Millis::new(10));
///
/// assert_eq!(manager.state().current_index(), 1);
/// assert!(matches!(manager.screen(), Screen::Playing { progress: 2, .. }));
/// ```
pub struct GameManager {
    config: GateConfig,
    registry: MiniGameRegistry,
    rng: GateRng,
    state: SessionState,
    mounted: Option<Mounted>,
    next_epoch: u64,
    reports: ReportSink,
    game_over_playback: Option<Playback>,
}

impl GameManager {
    /// Validate `config` against `registry` and build an idle session.
    pub fn new(config: GateConfig, registry: MiniGameRegistry) -> Result<Self, ConfigError> {
        config.validate(&registry)?;
        let mut rng = match config.seed {
            Some(seed) => GateRng::new(seed),
            None => GateRng::from_entropy(),
        };
        let state = SessionState::from_config(&config, &registry, &mut rng);
        debug!(seed = rng.seed(), total = state.total_games(), "session created");

        Ok(Self {
            config,
            registry,
            rng,
            state,
            mounted: None,
            next_epoch: 0,
            reports: Rc::new(RefCell::new(Vec::new())),
            game_over_playback: None,
        })
    }

    /// `new` with `MiniGameRegistry::standard()`.
    pub fn with_standard_catalog(config: GateConfig) -> Result<Self, ConfigError> {
        Self::new(config, MiniGameRegistry::standard())
    }

    /// The active session.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &MiniGameRegistry {
        &self.registry
    }

    /// The mounted widget, if a game is being played.
    #[must_use]
    pub fn widget(&self) -> Option<&dyn MiniGame> {
        self.mounted.as_ref().map(|m| m.widget.as_ref())
    }

    /// The mounted widget as its concrete type.
    #[must_use]
    pub fn widget_as<T: 'static>(&self) -> Option<&T> {
        self.widget()?.as_any().downcast_ref::<T>()
    }

    /// Epoch of the mounted widget.
    #[must_use]
    pub fn mount_epoch(&self) -> Option<u64> {
        self.mounted.as_ref().map(|m| m.epoch)
    }

    /// Result of the game-over sound, once it was triggered.
    #[must_use]
    pub fn game_over_playback(&self) -> Option<Playback> {
        self.game_over_playback
    }

    /// Start button.
    pub fn start(&mut self, now: Millis) {
        let next = self.state.start(now);
        self.commit(next, now);
    }

    /// Resume button. Always available while waiting.
    pub fn resume(&mut self, now: Millis) {
        let next = self.state.resume();
        self.commit(next, now);
    }

    /// Throw the session away and build a fresh idle one.
    pub fn reset(&mut self, now: Millis) {
        let next = SessionState::from_config(&self.config, &self.registry, &mut self.rng);
        info!(total = next.total_games(), "session reset");
        self.game_over_playback = None;
        self.commit(next, now);
    }

    /// Forward one input to the mounted widget.
    ///
    /// Widget timers due at or before `now` fire first, so the input is
    /// judged against the widget's state at `now`. If those timers end the
    /// game, the input is dropped rather than handed to its successor.
    pub fn input(&mut self, input: &Input, now: Millis) {
        let target = self.mount_epoch();
        if let Some(mounted) = self.mounted.as_mut() {
            mounted.widget.tick(now);
        }
        self.settle(now);

        match self.mounted.as_mut() {
            Some(mounted) if Some(mounted.epoch) == target => mounted.widget.handle(input, now),
            Some(_) => debug!(?input, "input outlived the game it was aimed at"),
            None => debug!(?input, status = ?self.state.status(), "input with no widget mounted"),
        }
        self.settle(now);
    }

    /// Advance the clock: widget timers first, then the audio player.
    pub fn tick(&mut self, now: Millis) {
        if let Some(mounted) = self.mounted.as_mut() {
            mounted.widget.tick(now);
        }
        self.settle(now);
        audio::global().lock().tick(now);
    }

    /// React to a bridge event. A card tap resumes a waiting session.
    pub fn handle_bridge_event(&mut self, event: &BridgeEvent, now: Millis) {
        match event {
            BridgeEvent::Card { uid, .. } => {
                if self.state.status() == SessionStatus::WaitingToResume {
                    info!(%uid, "card tap resumes session");
                    self.resume(now);
                } else {
                    debug!(%uid, status = ?self.state.status(), "card tap ignored");
                }
            }
            other => debug!(?other, "bridge event"),
        }
    }

    /// Unmount the widget and cancel pending sound timers.
    pub fn shutdown(&mut self) {
        self.unmount();
        audio::global().lock().clear_all_pending();
    }

    /// What the host should display.
    #[must_use]
    pub fn screen(&self) -> Screen {
        let lives = LifeDisplay {
            current: self.state.lives(),
            max: self.state.max_lives(),
        };
        match self.state.status() {
            SessionStatus::Idle => Screen::Idle {
                lives,
                returning: self.state.has_started(),
            },
            SessionStatus::Playing => match self.state.current_game() {
                Some(definition) => Screen::Playing {
                    definition: definition.clone(),
                    progress: self.state.progress(),
                    total: self.state.total_games(),
                    lives,
                    article: article_for(self.state.current_index()),
                    placeholder: self
                        .widget_as::<Placeholder>()
                        .map(Placeholder::message),
                },
                None => Screen::Idle {
                    lives,
                    returning: true,
                },
            },
            SessionStatus::WaitingToResume => Screen::WaitingToResume { lives },
            SessionStatus::Cleared => Screen::Cleared {
                cleared: self.state.cleared_games().len(),
                elapsed_ms: self.state.elapsed(),
            },
            SessionStatus::GameOver => Screen::GameOver {
                destination: self.config.destination_url.clone(),
            },
        }
    }

    /// Install a new state and bring the widget in line with it.
    pub(crate) fn commit(&mut self, next: SessionState, now: Millis) {
        let entering_game_over = next.status() == SessionStatus::GameOver
            && self.state.status() != SessionStatus::GameOver;
        self.state = next;

        if entering_game_over {
            let playback = audio::global()
                .lock()
                .play_explosion(&self.config.game_over_sound, now);
            self.game_over_playback = Some(playback);
        }
        self.sync_widget(now);
    }

    fn sync_widget(&mut self, now: Millis) {
        if self.state.status() != SessionStatus::Playing {
            self.unmount();
            return;
        }
        let key = MountKey {
            index: self.state.current_index(),
            failed_attempts: self.state.failed_attempts_for_current_game(),
        };
        if self.mounted.as_ref().map(|m| m.key) != Some(key) {
            self.mount(key, now);
        }
    }

    fn mount(&mut self, key: MountKey, now: Millis) {
        self.unmount();
        let Some(definition) = self.state.current_game() else {
            return;
        };
        let id = definition.id;
        let props = WidgetProps::new(definition.time_limit, key.failed_attempts);

        let epoch = self.next_epoch;
        self.next_epoch += 1;
        let on_success = Rc::clone(&self.reports);
        let on_failure = Rc::clone(&self.reports);
        let completion = Completion::new(move || {
            on_success.borrow_mut().push(Report {
                epoch,
                outcome: Outcome::Success,
            });
        })
        .with_failure(move || {
            on_failure.borrow_mut().push(Report {
                epoch,
                outcome: Outcome::Failure,
            });
        });

        let mut widget = self.registry.mount(id, props, completion, self.rng.fork());
        widget.mount(now);
        debug!(game = %id, epoch, attempt = key.failed_attempts, "widget mounted");
        self.mounted = Some(Mounted { key, epoch, widget });
    }

    fn unmount(&mut self) {
        if let Some(mut mounted) = self.mounted.take() {
            mounted.widget.unmount();
            debug!(game = %mounted.widget.id(), epoch = mounted.epoch, "widget unmounted");
        }
    }

    /// Apply every queued widget report.
    fn settle(&mut self, now: Millis) {
        loop {
            let reports: Vec<Report> = self.reports.borrow_mut().drain(..).collect();
            if reports.is_empty() {
                break;
            }
            for report in reports {
                if self.mount_epoch() != Some(report.epoch) {
                    debug!(epoch = report.epoch, "discarding report from stale mount");
                    continue;
                }
                let next = match report.outcome {
                    Outcome::Success => self.state.succeed(now),
                    Outcome::Failure => self.state.fail(now),
                };
                self.commit(next, now);
            }
        }
    }
}

impl std::fmt::Debug for GameManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameManager")
            .field("status", &self.state.status())
            .field("index", &self.state.current_index())
            .field("lives", &self.state.lives())
            .field("epoch", &self.mount_epoch())
            .finish()
    }
}
