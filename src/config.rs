/// Fixed tuning values for the simulation.
///
/// Everything here is tick-based: speeds are pixels per frame and decay
/// rates are per frame, all calibrated against `FPS`.

use std::time::Duration;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Size of the visible play area in world pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

pub const FPS: u32 = 60;

pub fn frame_duration(fps: u32) -> Duration {
    Duration::from_micros(1_000_000 / u64::from(fps.max(1)))
}

// ── World population ──────────────────────────────────────────────────────────

pub const CLOUD_COUNT: usize = 6;
pub const CLOUD_PRIORITY_MIN: i32 = -2;
pub const CLOUD_PRIORITY_MAX: i32 = 7;

pub const LANDSCAPE_PRIORITY: i32 = 0;
pub const MOUNTAIN_PRIORITY: i32 = 2;
pub const GROUND_PRIORITY: i32 = 3;
pub const ENEMY_PRIORITY: i32 = 4;
pub const PLAYER_PRIORITY: i32 = 5;
pub const BULLET_PRIORITY: i32 = 5;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_MAX_HEALTH: i32 = 100;
/// Player's bottom edge at start, measured from the top of the viewport.
pub const PLAYER_START_BOTTOM: f32 = 600.0 - 185.0;
pub const SHOT_INTERVAL_MS: u64 = 250;
pub const BARREL_OFFSET: (f32, f32) = (0.0, 18.0);
pub const SPIN_STEP_DEGREES: u32 = 30;
pub const SPIN_TOTAL_DEGREES: u32 = 720;
pub const SPIN_KNOCKBACK: (f32, f32) = (-4.0, -4.0);
pub const DEATH_FALL_SPEED: f32 = 5.0;
pub const DRIFT_FALL_SPEED: f32 = 1.0;

// ── Projectiles & enemies ─────────────────────────────────────────────────────

pub const BULLET_SPEED: f32 = 20.0;
pub const EXPLOSION_FRAMES: usize = 9;
/// Where an exploded enemy is parked so that it retires on its next scroll.
pub const EXPLOSION_PARK_X: f32 = -500.0;

pub const BOMB_SPEED_INCREMENTS: [f32; 4] = [0.2, 0.25, 0.5, 1.0];
pub const BOMB_SPEED_CAP: f32 = 12.0;
pub const BOMB_SPEED_RESET: f32 = 5.0;

pub const UFO_COUNTER_START: f32 = 700.0;
pub const UFO_COUNTER_DECAY: f32 = 0.2;
pub const UFO_COUNTER_FLOOR: f32 = 1.0;
pub const UFO_WARNING_THRESHOLD: f32 = 400.0;
/// Counter window during which the outer loop shows the warning banner.
pub const UFO_BANNER_WINDOW: (f32, f32) = (300.0, 400.0);

// ── Asset names ───────────────────────────────────────────────────────────────

pub const LANDSCAPE_VISUAL: &str = "background.png";
pub const MOUNTAIN_VISUAL: &str = "mountain.png";
pub const GROUND_VISUAL: &str = "ground.png";
pub const CACTUS_VISUAL: &str = "cactus.png";
pub const BOMB_VISUAL: &str = "bomb.png";
pub const UFO_VISUAL: &str = "ufo0.png";
pub const UFO_ALERT_VISUAL: &str = "ufo1.png";
pub const UFO_ABDUCTION_VISUAL: &str = "ufo2.png";
pub const BULLET_VISUAL: &str = "bullet.png";
pub const CLOUD_VISUALS: [&str; 3] = ["cloud1.png", "cloud2.png", "cloud3.png"];

pub const EXPLOSION_SOUND: &str = "explosion.wav";
pub const ALERT_SOUND: &str = "aliens.wav";
pub const SHOT_SOUND: &str = "shot.wav";
pub const MUSIC_SOUND: &str = "main.wav";

pub fn explosion_visual(frame: usize) -> String {
    format!("explosion{}.png", frame)
}
