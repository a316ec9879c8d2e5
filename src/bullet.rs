/// Player projectiles: fly right at a fixed speed, vanish at the right edge.

use crate::arena::{Arena, EntityId};
use crate::assets::SpriteBank;
use crate::config::{self, Viewport};
use crate::entities::{Entity, EntityKind, Groups};
use crate::geometry::{Rect, Vec2};

pub fn build(origin: Vec2, bank: &SpriteBank) -> Entity {
    let visual = bank.bullet;
    Entity {
        kind: EntityKind::Bullet,
        name: config::BULLET_VISUAL.to_string(),
        groups: Groups::LAYERS | Groups::BULLETS,
        priority: config::BULLET_PRIORITY,
        rect: Rect::new(origin.x, origin.y, visual.width, visual.height),
        visual,
        base_visual: visual,
        angle: 0.0,
        scroll_speed: config::BULLET_SPEED,
        spawn_groups: Groups::LAYERS | Groups::BULLETS,
        replaced: false,
        combat: None,
        pursuit: None,
    }
}

/// Returns `false` once the bullet has left the screen and been removed.
pub fn advance(arena: &mut Arena, id: EntityId, vp: Viewport) -> bool {
    let Some(bullet) = arena.get_mut(id) else {
        return false;
    };
    bullet.rect.x += bullet.scroll_speed;
    if EntityKind::Bullet.has_vanished(&bullet.rect, vp) {
        arena.remove(id);
        return false;
    }
    true
}
