/// Leftward scrolling and the retire-and-replace cycle.
///
/// Each kind has a small behaviour table: speed, where a fresh instance is
/// anchored, when it counts as gone, and how far from its anchor the
/// replacement appears. [`advance`] applies one frame of it.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use tracing::{debug, trace};

use crate::arena::{Arena, EntityId};
use crate::assets::{SpriteBank, Visual};
use crate::config::{self, Viewport};
use crate::entities::{Combat, Entity, EntityKind, Groups, Pursuit};
use crate::geometry::{Rect, Vec2};

// ── Per-kind table ────────────────────────────────────────────────────────────

impl EntityKind {
    /// Speed a fresh instance starts with, in pixels per frame.
    pub fn initial_speed(self, rng: &mut dyn RngCore) -> f32 {
        match self {
            EntityKind::Landscape => 1.0,
            EntityKind::Mountain => 2.0,
            EntityKind::Ground => 12.0,
            EntityKind::Cloud => rng.gen_range(2..=5) as f32,
            EntityKind::Cactus => 5.0,
            EntityKind::Bomb => 1.0,
            // Homing thrust; the UFO never scrolls sideways.
            EntityKind::Ufo => 200.0,
            EntityKind::Bullet => config::BULLET_SPEED,
        }
    }

    /// Kinds that keep moving whatever the player is doing.
    pub fn ignores_motion_gate(self) -> bool {
        matches!(self, EntityKind::Cloud | EntityKind::Bomb | EntityKind::Bullet)
    }

    pub fn scrolls_left(self) -> bool {
        !matches!(self, EntityKind::Ufo | EntityKind::Bullet)
    }

    pub fn damage(self) -> Option<i32> {
        match self {
            EntityKind::Cactus => Some(-10),
            EntityKind::Bomb => Some(-20),
            EntityKind::Ufo => Some(-100),
            _ => None,
        }
    }

    /// Rectangle of a freshly built instance.
    pub fn anchor(self, visual: &Visual, vp: Viewport, rng: &mut dyn RngCore) -> Rect {
        let (w, h) = (visual.width, visual.height);
        match self {
            EntityKind::Landscape | EntityKind::Ground => Rect::with_bottom_left(w, h, 0.0, vp.height),
            EntityKind::Mountain => Rect::with_bottom_right(w, h, vp.width, vp.height),
            EntityKind::Cactus => Rect::with_bottom_right(w, h, vp.width, vp.height - 160.0),
            EntityKind::Cloud => {
                let right = vp.width + rng.gen_range(0..=600) as f32;
                let top = rng.gen_range(1..=250) as f32;
                Rect::with_top_right(w, h, right, top)
            }
            EntityKind::Bomb => {
                let cx = vp.width + rng.gen_range(0..=500) as f32;
                Rect::with_center(w, h, Vec2::new(cx, vp.height / 2.0))
            }
            EntityKind::Ufo => Rect::with_center(w, h, Vec2::new(300.0, -500.0)),
            EntityKind::Bullet => Rect::new(0.0, 0.0, w, h),
        }
    }

    /// Disappear predicate: true once a replacement is due.
    pub fn has_vanished(self, rect: &Rect, vp: Viewport) -> bool {
        match self {
            EntityKind::Landscape | EntityKind::Ground => rect.right() <= vp.width,
            EntityKind::Bullet => rect.left() >= vp.width,
            _ => rect.right() <= 0.0,
        }
    }

    /// Offset applied to a replacement's anchor.
    pub fn destination(self, visual: &Visual, vp: Viewport, rng: &mut dyn RngCore) -> (f32, f32) {
        match self {
            EntityKind::Landscape | EntityKind::Ground | EntityKind::Bullet => (0.0, 0.0),
            EntityKind::Mountain | EntityKind::Cloud => (beyond(vp, rng, 500), 0.0),
            EntityKind::Cactus => (beyond(vp, rng, 1000), 0.0),
            EntityKind::Bomb => (beyond(vp, rng, 500), rng.gen_range(-290..=100) as f32),
            EntityKind::Ufo => {
                let lo = visual.width as i32;
                let hi = ((vp.width - visual.height) as i32).max(lo);
                (rng.gen_range(lo..=hi) as f32, 200.0)
            }
        }
    }
}

/// Somewhere past the right edge, up to `jitter` pixels further.
fn beyond(vp: Viewport, rng: &mut dyn RngCore, jitter: i32) -> f32 {
    vp.width + rng.gen_range(0..=jitter) as f32
}

// ── Factory ───────────────────────────────────────────────────────────────────

/// Identity a replacement inherits from the instance it replaces.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnParams {
    pub kind: EntityKind,
    pub name: String,
    pub groups: Groups,
    pub priority: i32,
}

impl SpawnParams {
    pub fn new(kind: EntityKind, name: &str, groups: Groups, priority: i32) -> Self {
        Self {
            kind,
            name: name.to_string(),
            groups,
            priority,
        }
    }

    fn of(entity: &Entity) -> Self {
        Self::new(entity.kind, &entity.name, entity.spawn_groups, entity.priority)
    }
}

pub type Factory = fn(&SpawnParams, &SpriteBank, Viewport, &mut dyn RngCore) -> Entity;

fn build_plain(params: &SpawnParams, bank: &SpriteBank, vp: Viewport, rng: &mut dyn RngCore) -> Entity {
    let visual = bank.base_visual(params.kind, &params.name);
    let scroll_speed = params.kind.initial_speed(rng);
    let rect = params.kind.anchor(&visual, vp, rng);
    Entity {
        kind: params.kind,
        name: params.name.clone(),
        groups: params.groups,
        priority: params.priority,
        rect,
        visual,
        base_visual: visual,
        angle: 0.0,
        scroll_speed,
        spawn_groups: params.groups,
        replaced: false,
        combat: None,
        pursuit: None,
    }
}

fn build_enemy(params: &SpawnParams, bank: &SpriteBank, vp: Viewport, rng: &mut dyn RngCore) -> Entity {
    let mut entity = build_plain(params, bank, vp, rng);
    entity.combat = params.kind.damage().map(Combat::new);
    entity
}

fn build_ufo(params: &SpawnParams, bank: &SpriteBank, vp: Viewport, rng: &mut dyn RngCore) -> Entity {
    let mut entity = build_enemy(params, bank, vp, rng);
    entity.pursuit = Some(Pursuit::default());
    entity
}

/// Constructor registered for each kind.
pub fn factory(kind: EntityKind) -> Factory {
    match kind {
        EntityKind::Cactus | EntityKind::Bomb => build_enemy,
        EntityKind::Ufo => build_ufo,
        _ => build_plain,
    }
}

pub fn build(params: &SpawnParams, bank: &SpriteBank, vp: Viewport, rng: &mut dyn RngCore) -> Entity {
    factory(params.kind)(params, bank, vp, rng)
}

/// Speed of a bomb's replacement; escalates until it would reach the cap.
pub fn next_bomb_speed(parent: f32, rng: &mut dyn RngCore) -> f32 {
    let increment = config::BOMB_SPEED_INCREMENTS
        .choose(rng)
        .copied()
        .unwrap_or(0.0);
    let next = parent + increment;
    if next < config::BOMB_SPEED_CAP {
        next
    } else {
        config::BOMB_SPEED_RESET
    }
}

// ── Per-frame step ────────────────────────────────────────────────────────────

pub struct ScrollContext<'a> {
    pub bank: &'a SpriteBank,
    pub viewport: Viewport,
    pub rng: &'a mut dyn RngCore,
}

/// One frame of scrolling for `id`: move, spawn the single replacement once
/// the disappear predicate holds, destroy once fully off-screen.
///
/// Entities outside `MOVEABLE` are left alone. Returns `false` if the entity
/// no longer exists afterwards.
pub fn advance(arena: &mut Arena, id: EntityId, motion: bool, ctx: &mut ScrollContext<'_>) -> bool {
    let vp = ctx.viewport;
    let screen = Rect::new(0.0, 0.0, vp.width, vp.height);

    let Some(entity) = arena.get_mut(id) else {
        return false;
    };
    if !entity.groups.contains(Groups::MOVEABLE) {
        return true;
    }
    if !motion && !entity.kind.ignores_motion_gate() {
        return true;
    }

    if entity.kind.scrolls_left() {
        entity.rect.x -= entity.scroll_speed;
        trace!(kind = ?entity.kind, x = entity.rect.x, "scrolled");
    }

    let due = !entity.replaced && entity.kind.has_vanished(&entity.rect, vp);
    let replacement = if due {
        entity.replaced = true;
        Some((SpawnParams::of(entity), entity.scroll_speed))
    } else {
        None
    };
    let gone = entity.replaced && !entity.rect.intersects(&screen);

    if let Some((params, parent_speed)) = replacement {
        let mut clone = build(&params, ctx.bank, vp, ctx.rng);
        let (dx, dy) = params.kind.destination(&clone.visual, vp, ctx.rng);
        clone.rect = clone.rect.translated(dx, dy);
        if params.kind == EntityKind::Bomb {
            clone.scroll_speed = next_bomb_speed(parent_speed, ctx.rng);
        }
        debug!(
            kind = ?params.kind,
            x = clone.rect.x,
            y = clone.rect.y,
            speed = clone.scroll_speed,
            "spawned replacement"
        );
        arena.insert(clone);
    }

    if gone {
        arena.remove(id);
        debug!(?id, "retired off-screen");
        return false;
    }
    true
}
