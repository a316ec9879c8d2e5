/// The player character: action/facing state machine, frame animation,
/// shot rate limiting, the spin reaction to hits and the death fall.

use tracing::{debug, info};

use crate::assets::{AnimationTable, Visual};
use crate::config::{self, Viewport};
use crate::entities::{Action, Facing, Key};
use crate::geometry::{rotated_bounds, Rect, Vec2};

impl Facing {
    /// Direction the animation table is read with; no key reads as `Down`.
    pub fn from_key(key: Option<Key>) -> Facing {
        match key {
            Some(Key::Up) => Facing::Up,
            Some(Key::Left) => Facing::Left,
            Some(Key::Right) => Facing::Right,
            Some(Key::Down) | Some(Key::Space) | None => Facing::Down,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerSignal {
    /// Fell below the bottom of the viewport and left the game.
    Destroyed,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub visual: Visual,
    /// Image the spin reaction rotates; refreshed on every animated frame.
    pub original: Visual,
    /// Accumulated spin in degrees.
    pub angle: u32,
    pub health: i32,
    pub action: Action,
    pub facing: Facing,
    pub frame_index: usize,
    pub hit: bool,
    pub dead: bool,
    /// False once removed from the scene.
    pub present: bool,
    pub priority: i32,
    last_shot: Option<u64>,
}

impl Player {
    pub fn new(animations: &AnimationTable) -> Self {
        let visual = animations.get(Action::Idle, Facing::Right).frames[0];
        Self {
            rect: Rect::with_bottom_left(
                visual.width,
                visual.height,
                0.0,
                config::PLAYER_START_BOTTOM,
            ),
            visual,
            original: visual,
            angle: 0,
            health: config::PLAYER_MAX_HEALTH,
            action: Action::Idle,
            facing: Facing::Right,
            frame_index: 0,
            hit: false,
            dead: false,
            present: true,
            priority: config::PLAYER_PRIORITY,
            last_shot: None,
        }
    }

    // ── Control ───────────────────────────────────────────────────────────────

    pub fn fly(&mut self) {
        self.action = Action::Fly;
    }

    pub fn walk(&mut self) {
        self.action = Action::Walk;
    }

    pub fn idle(&mut self) {
        self.action = Action::Idle;
    }

    /// Drop by `speed` pixels; a controllable fall keeps steering available.
    pub fn fall(&mut self, speed: f32, controllable: bool) {
        if controllable {
            self.action = Action::Fly;
        }
        self.rect.y += speed;
    }

    /// Enter the shooting pose. Returns where a bullet should appear when
    /// the shot interval has elapsed since the previous bullet.
    pub fn shoot(&mut self, flying: bool, now_ms: u64, animations: &AnimationTable) -> Option<Vec2> {
        self.action = Action::Shoot;

        let ready = self
            .last_shot
            .map_or(true, |last| now_ms.saturating_sub(last) >= config::SHOT_INTERVAL_MS);
        let muzzle = if ready {
            self.last_shot = Some(now_ms);
            let (dx, dy) = config::BARREL_OFFSET;
            Some(Vec2::new(self.rect.x + dx, self.rect.y + dy))
        } else {
            None
        };

        let pose = animations.shoot_pose(flying);
        self.visual = pose;
        self.rect = Rect::with_center(pose.width, pose.height, self.rect.center());
        if flying {
            self.fall(config::DRIFT_FALL_SPEED, false);
        }
        muzzle
    }

    // ── Damage ────────────────────────────────────────────────────────────────

    pub fn attacked(&mut self, damage: i32) {
        if self.health + damage <= 0 {
            self.health = 0;
            if !self.dead {
                info!("player died");
            }
            self.dead = true;
        } else {
            self.health += damage;
        }
        self.hit = true;
        debug!(damage, health = self.health, "player attacked");
    }

    /// Remove from the scene immediately, e.g. when abducted.
    pub fn kill(&mut self) {
        self.health = 0;
        self.dead = true;
        self.present = false;
    }

    fn harm(&mut self) {
        let center = self.rect.center();
        self.angle += config::SPIN_STEP_DEGREES;

        if self.angle >= config::SPIN_TOTAL_DEGREES {
            self.angle = 0;
            self.hit = false;
            self.visual = self.original;
            self.rect = Rect::with_center(self.original.width, self.original.height, center);
        } else {
            let (w, h) = rotated_bounds(self.original.width, self.original.height, self.angle as f32);
            let (kx, ky) = config::SPIN_KNOCKBACK;
            self.visual = self.original;
            self.rect = Rect::with_center(w, h, center).translated(kx, ky);
        }
    }

    fn animate(&mut self, animations: &AnimationTable) {
        let motion = animations.get(self.action, self.facing);
        if motion.frames.is_empty() {
            return;
        }

        self.frame_index += 1;
        if self.frame_index >= motion.frames.len() {
            self.frame_index = 0;
        }

        self.original = self.visual;
        let center = self.rect.center();
        let frame = motion.frames[self.frame_index];
        self.visual = frame;
        self.rect = Rect::with_center(frame.width, frame.height, center);

        let (dx, dy) = motion.step;
        self.rect.x -= dx;
        self.rect.y -= dy;
    }

    // ── Per-frame update ──────────────────────────────────────────────────────

    pub fn update(
        &mut self,
        key: Option<Key>,
        animations: &AnimationTable,
        vp: Viewport,
    ) -> Option<PlayerSignal> {
        if !self.present {
            return None;
        }
        // A dead player drops straight down whatever is held.
        let key = if self.dead { None } else { key };
        if self.dead {
            self.fall(config::DEATH_FALL_SPEED, false);
        }
        self.facing = Facing::from_key(key);

        if self.rect.y > vp.height {
            self.present = false;
            info!("player fell out of the world");
            return Some(PlayerSignal::Destroyed);
        }

        self.rect.x = self.rect.x.rem_euclid(vp.width);
        if self.rect.top() < 0.0 {
            self.rect.y = 0.0;
        }

        if self.hit {
            self.harm();
        } else if !self.dead && self.action != Action::Shoot {
            self.animate(animations);
        }
        None
    }

    /// Rotation to draw `visual` with.
    pub fn draw_angle(&self) -> f32 {
        if self.hit {
            self.angle as f32
        } else {
            0.0
        }
    }
}
