//! Keep the player clear of falling obstacles for 25 seconds.

use crate::catalog::MiniGameId;
use crate::core::{GateRng, Millis};
use crate::widgets::contract::widget_bookkeeping;
use crate::widgets::{Completion, Input, MiniGame, WidgetCore, WidgetProps};

const FIELD_WIDTH: f32 = 400.0;
const FIELD_HEIGHT: f32 = 500.0;
const PLAYER_SIZE: f32 = 25.0;
const OBSTACLE_HEIGHT: f32 = 25.0;
const OBSTACLE_MIN_WIDTH: f32 = 30.0;
const OBSTACLE_MAX_WIDTH: f32 = 130.0;
const FALL_PER_FRAME: f32 = 6.0;
const FRAME_MS: u64 = 16;
const SPAWN_MS: u64 = 1000;
const SURVIVE_MS: u64 = 25_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Timer {
    Frame,
    Spawn,
    Survived,
}

/// A falling rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    fn overlaps(&self, px: f32, py: f32) -> bool {
        px < self.x + self.width
            && px + PLAYER_SIZE > self.x
            && py < self.y + self.height
            && py + PLAYER_SIZE > self.y
    }
}

/// The player square follows `PointerMove`. Any overlap fails.
#[derive(Debug)]
pub struct DodgeGame {
    core: WidgetCore<Timer>,
    rng: GateRng,
    player: (f32, f32),
    obstacles: Vec<Obstacle>,
    ends_at: Option<Millis>,
}

impl DodgeGame {
    /// Create the widget with the player near the bottom centre.
    pub fn new(props: WidgetProps, completion: Completion, rng: GateRng) -> Self {
        Self {
            core: WidgetCore::new(props, completion),
            rng,
            player: (
                FIELD_WIDTH / 2.0 - PLAYER_SIZE / 2.0,
                FIELD_HEIGHT - PLAYER_SIZE - 10.0,
            ),
            obstacles: Vec::new(),
            ends_at: None,
        }
    }

    /// Top-left corner of the player square.
    #[must_use]
    pub fn player(&self) -> (f32, f32) {
        self.player
    }

    #[must_use]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Whole seconds left to survive, rounded up.
    #[must_use]
    pub fn seconds_left(&self, now: Millis) -> u64 {
        self.ends_at
            .map_or(SURVIVE_MS, |end| end.since(now))
            .div_ceil(1000)
    }

    fn spawn(&mut self) {
        let width = self
            .rng
            .gen_range_f32(OBSTACLE_MIN_WIDTH..OBSTACLE_MAX_WIDTH);
        let x = self.rng.gen_range_f32(0.0..FIELD_WIDTH - width);
        self.obstacles.push(Obstacle {
            x,
            y: -OBSTACLE_HEIGHT,
            width,
            height: OBSTACLE_HEIGHT,
        });
    }

    /// Advance obstacles one frame. Returns true on collision.
    fn advance(&mut self) -> bool {
        for obstacle in &mut self.obstacles {
            obstacle.y += FALL_PER_FRAME;
        }
        self.obstacles.retain(|o| o.y < FIELD_HEIGHT);
        self.collides()
    }

    fn collides(&self) -> bool {
        let (px, py) = self.player;
        self.obstacles.iter().any(|o| o.overlaps(px, py))
    }
}

impl MiniGame for DodgeGame {
    widget_bookkeeping!(MiniGameId::DodgeGame);

    fn mount(&mut self, now: Millis) {
        self.ends_at = Some(now + SURVIVE_MS);
        self.core.timers.schedule_after(now, FRAME_MS, Timer::Frame);
        self.core.timers.schedule_after(now, SPAWN_MS, Timer::Spawn);
        self.core
            .timers
            .schedule_after(now, SURVIVE_MS, Timer::Survived);
    }

    fn handle(&mut self, input: &Input, _now: Millis) {
        if self.core.is_inert() {
            return;
        }
        if let Input::PointerMove { x, y } = *input {
            let px = (x - PLAYER_SIZE / 2.0).clamp(0.0, FIELD_WIDTH - PLAYER_SIZE);
            let py = (y - PLAYER_SIZE / 2.0).clamp(0.0, FIELD_HEIGHT - PLAYER_SIZE);
            self.player = (px, py);
        }
    }

    fn tick(&mut self, now: Millis) {
        while let Some((at, timer)) = self.core.next_due(now) {
            match timer {
                Timer::Frame => {
                    if self.advance() {
                        self.obstacles.clear();
                        self.core.fail();
                    } else {
                        self.core.timers.schedule_after(at, FRAME_MS, Timer::Frame);
                    }
                }
                Timer::Spawn => {
                    self.spawn();
                    self.core.timers.schedule_after(at, SPAWN_MS, Timer::Spawn);
                }
                Timer::Survived => {
                    self.core.succeed();
                }
            }
        }
    }
}
