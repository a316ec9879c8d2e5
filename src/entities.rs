/// Entity data for scenery, enemies and bullets; behaviour lives elsewhere.

use bitflags::bitflags;

use crate::assets::Visual;
use crate::config;
use crate::geometry::Rect;

// ── Kinds & groups ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Landscape,
    Mountain,
    Ground,
    Cloud,
    Cactus,
    Bomb,
    Ufo,
    Bullet,
}

bitflags! {
    /// Labels an entity carries; membership, not ownership.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Groups: u8 {
        /// Drawn and updated every frame.
        const LAYERS   = 0b0000_0001;
        /// Parallax-scrolling scenery and enemies.
        const MOVEABLE = 0b0000_0010;
        /// Surfaces the player can stand on.
        const FLOOR    = 0b0000_0100;
        /// Enemies that can still hurt the player or be shot.
        const ENEMIES  = 0b0000_1000;
        const BULLETS  = 0b0001_0000;
    }
}

// ── Player enums ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Idle,
    Walk,
    Fly,
    /// Transient pose; freezes walk/fly/idle animation while set.
    Shoot,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Idle, Action::Walk, Action::Fly, Action::Shoot];

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Up, Facing::Down, Facing::Left, Facing::Right];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// A key the core reacts to; everything else stays in the outer loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
}

// ── Enemy sub-state ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Combat {
    /// Negative; added to the player's health on contact.
    pub damage: i32,
    /// Latched on the first collision.
    pub struck: bool,
    pub explosion_frame: usize,
}

impl Combat {
    pub fn new(damage: i32) -> Self {
        Self {
            damage,
            struck: false,
            explosion_frame: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pursuit {
    pub counter: f32,
    pub warning_triggered: bool,
    pub abducted: bool,
}

impl Default for Pursuit {
    fn default() -> Self {
        Self {
            counter: config::UFO_COUNTER_START,
            warning_triggered: false,
            abducted: false,
        }
    }
}

// ── Entity ────────────────────────────────────────────────────────────────────

/// One scenery object, enemy or bullet.
#[derive(Clone, Debug)]
pub struct Entity {
    pub kind: EntityKind,
    /// Asset name the entity was built from; replacements reuse it.
    pub name: String,
    pub groups: Groups,
    pub priority: i32,
    pub rect: Rect,
    pub visual: Visual,
    /// Un-rotated image that spinning is applied to.
    pub base_visual: Visual,
    /// Rotation of `visual` relative to `base_visual`, in degrees.
    pub angle: f32,
    pub scroll_speed: f32,
    /// Groups the entity was built with; a replacement rejoins all of them
    /// even after a strike has dropped this instance from some.
    pub spawn_groups: Groups,
    /// Set once this instance has spawned its replacement.
    pub replaced: bool,
    pub combat: Option<Combat>,
    pub pursuit: Option<Pursuit>,
}

impl Entity {
    pub fn is_struck(&self) -> bool {
        self.combat.as_ref().map_or(false, |c| c.struck)
    }

    pub fn is_abducted(&self) -> bool {
        self.pursuit.as_ref().map_or(false, |p| p.abducted)
    }
}

/// What the renderer needs for one object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawItem {
    pub visual: Visual,
    pub rect: Rect,
    pub angle: f32,
    pub priority: i32,
}
