/// Strike and explosion handling shared by cacti, bombs and the UFO.

use rand::{Rng, RngCore};
use tracing::debug;

use crate::arena::{Arena, EntityId};
use crate::assets::Visual;
use crate::config;
use crate::entities::{Entity, EntityKind, Groups};
use crate::geometry::{rotated_bounds, Rect};

/// Latch `struck` and pull the enemy out of the collision set.
///
/// Returns `true` only on the first strike; stale handles and enemies that
/// are already exploding are ignored.
pub fn explode(arena: &mut Arena, id: EntityId) -> bool {
    let Some(entity) = arena.get_mut(id) else {
        return false;
    };
    let Some(combat) = entity.combat.as_mut() else {
        return false;
    };
    if combat.struck {
        return false;
    }
    combat.struck = true;
    entity.groups.remove(Groups::ENEMIES);
    debug!(kind = ?entity.kind, ?id, "enemy struck");
    true
}

/// Advance a struck enemy's explosion by one frame.
///
/// After the last frame the enemy is parked far to the left so the next
/// scroll retires it through the normal replacement path.
pub fn tick_explosion(entity: &mut Entity, frames: &[Visual]) {
    let Some(combat) = entity.combat.as_mut() else {
        return;
    };
    if !combat.struck || frames.is_empty() {
        return;
    }

    combat.explosion_frame += 1;
    let wrapped = combat.explosion_frame >= frames.len();
    if wrapped {
        combat.explosion_frame = 0;
    }

    let visual = frames[combat.explosion_frame];
    let center = entity.rect.center();
    entity.visual = visual;
    entity.angle = 0.0;
    entity.rect = Rect::with_center(visual.width, visual.height, center);
    if wrapped {
        entity.rect.x = config::EXPLOSION_PARK_X;
    }
}

/// Tumble an unstruck bomb by a few random degrees, keeping its centre.
pub fn spin(entity: &mut Entity, rng: &mut dyn RngCore) {
    if entity.kind != EntityKind::Bomb || entity.is_struck() {
        return;
    }
    entity.angle = (entity.angle + rng.gen_range(1..=10) as f32) % 360.0;
    let base = entity.base_visual;
    let (w, h) = rotated_bounds(base.width, base.height, entity.angle);
    entity.rect = Rect::with_center(w, h, entity.rect.center());
}
