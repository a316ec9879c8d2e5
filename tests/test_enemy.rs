mod common;

use common::{bare_world, count, params};
use dogfight::bullet;
use dogfight::entities::{EntityKind, Groups};
use dogfight::geometry::Vec2;
use dogfight::stats::StatKind;
use dogfight::GameEvent;

// ── explode ───────────────────────────────────────────────────────────────────

#[test]
fn explode_latches_once() {
    let mut world = bare_world();
    let id = world.spawn(&params(EntityKind::Cactus));

    assert!(world.explode(id));
    assert!(!world.explode(id));

    let cactus = world.entity(id).unwrap();
    assert!(cactus.is_struck());
    assert!(!cactus.groups.contains(Groups::ENEMIES));

    // One explosion sound for the one strike
    let explosion = world.bank().sounds.explosion;
    let sounds: Vec<_> = world
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::Sound { sound, .. } if *sound == explosion))
        .collect();
    assert_eq!(sounds.len(), 1);
}

#[test]
fn explosion_plays_nine_frames_then_parks() {
    let mut world = bare_world();
    let id = world.spawn(&params(EntityKind::Cactus));
    world.explode(id);

    // Gate closed: the cactus stays put but the explosion still runs
    for _ in 0..8 {
        world.update_all(false, None);
    }
    let cactus = world.entity(id).unwrap();
    assert_eq!(cactus.combat.as_ref().unwrap().explosion_frame, 8);
    assert_eq!(cactus.visual, world.bank().explosion[8]);
    assert!(cactus.rect.x > 0.0);

    world.update_all(false, None);
    let cactus = world.entity(id).unwrap();
    assert_eq!(cactus.combat.as_ref().unwrap().explosion_frame, 0);
    assert_eq!(cactus.rect.x, -500.0);
}

#[test]
fn parked_enemy_retires_and_is_replaced() {
    let mut world = bare_world();
    let id = world.spawn(&params(EntityKind::Cactus));
    world.explode(id);
    for _ in 0..9 {
        world.update_all(false, None);
    }

    world.update_all(true, None);
    assert!(world.entity(id).is_none());
    assert!(!world.explode(id));
    assert_eq!(count(&world, EntityKind::Cactus), 1);

    let (_, fresh) = world.entities_of(EntityKind::Cactus).next().unwrap();
    assert!(!fresh.is_struck());
    assert!(fresh.groups.contains(Groups::ENEMIES));
}

#[test]
fn replacement_of_struck_enemy_can_strike_again() {
    let mut world = bare_world();
    let id = world.spawn(&params(EntityKind::Bomb));
    world.explode(id);
    for _ in 0..9 {
        world.update_all(false, None);
    }
    // Parked at -500; bombs move with the gate closed too
    world.update_all(false, None);
    assert!(world.entity(id).is_none());

    let (fresh, bomb) = world.entities_of(EntityKind::Bomb).next().unwrap();
    assert_eq!(bomb.groups, params(EntityKind::Bomb).groups);
    {
        let bomb = world.entity_mut(fresh).unwrap();
        bomb.rect.x = 10.0;
        bomb.rect.y = 340.0;
    }

    world.resolve_collisions();
    assert_eq!(world.player().health, 80);
    assert!(world.entity(fresh).unwrap().is_struck());
}

#[test]
fn replacement_of_struck_enemy_can_be_shot() {
    let mut world = bare_world();
    let id = world.spawn(&params(EntityKind::Cactus));
    world.explode(id);
    for _ in 0..9 {
        world.update_all(false, None);
    }
    world.update_all(true, None);

    let (fresh, cactus) = world.entities_of(EntityKind::Cactus).next().unwrap();
    let target = cactus.rect;
    // Bring it on screen and line a bullet up with it
    world.entity_mut(fresh).unwrap().rect.x = 500.0;
    let shot = bullet::build(Vec2::new(505.0, target.y + 5.0), world.bank());
    world.insert(shot);

    world.resolve_collisions();
    assert_eq!(world.stats().get(StatKind::Score), 1);
}

// ── Bomb spin ─────────────────────────────────────────────────────────────────

#[test]
fn bomb_spins_until_struck() {
    let mut world = bare_world();
    let id = world.spawn(&params(EntityKind::Bomb));

    world.update_all(false, None);
    let angle = world.entity(id).unwrap().angle;
    assert!((1.0..=10.0).contains(&angle));

    world.explode(id);
    world.update_all(false, None);
    assert_eq!(world.entity(id).unwrap().angle, 0.0);
}

// ── Collisions ────────────────────────────────────────────────────────────────

#[test]
fn contact_damages_player_once() {
    let mut world = bare_world();
    let id = world.spawn(&params(EntityKind::Bomb));
    {
        let bomb = world.entity_mut(id).unwrap();
        bomb.rect.x = 10.0;
        bomb.rect.y = 340.0;
    }

    world.resolve_collisions();
    assert_eq!(world.player().health, 80);
    assert_eq!(world.stats().get(StatKind::Health), 80);
    assert!(world.player().hit);
    assert!(world.entity(id).unwrap().is_struck());

    // Struck enemies leave the collision set
    world.resolve_collisions();
    assert_eq!(world.player().health, 80);

    let events = world.drain_events();
    assert!(events.contains(&GameEvent::PlayerHit { damage: -20, health: 80 }));
}

#[test]
fn struck_enemy_cannot_strike_again() {
    let mut world = bare_world();
    let id = world.spawn(&params(EntityKind::Cactus));
    world.explode(id);

    assert!(!world.strike_player(id));
    assert_eq!(world.player().health, 100);
}

#[test]
fn bullet_hit_scores_a_point() {
    let mut world = bare_world();
    let cactus = world.spawn(&params(EntityKind::Cactus));
    let target = world.entity(cactus).unwrap().rect;
    let shot = bullet::build(Vec2::new(target.x + 5.0, target.y + 5.0), world.bank());
    let bullet_id = world.insert(shot);

    world.resolve_collisions();
    assert!(world.entity(bullet_id).is_none());
    assert!(world.entity(cactus).unwrap().is_struck());
    assert_eq!(world.stats().get(StatKind::Score), 1);
    assert!(world.drain_events().contains(&GameEvent::ScoreDelta(1)));
}

#[test]
fn bullet_leaves_at_right_edge() {
    let mut world = bare_world();
    let shot = bullet::build(Vec2::new(770.0, 100.0), world.bank());
    let id = world.insert(shot);

    world.update_all(false, None);
    assert_eq!(world.entity(id).unwrap().rect.x, 790.0);
    world.update_all(false, None);
    assert!(world.entity(id).is_none());
}
