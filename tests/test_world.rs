mod common;

use common::{bare_world, count, full_world, StubAssets};
use dogfight::config::Viewport;
use dogfight::entities::{Action, EntityKind, Groups, Key};
use dogfight::stats::{StatKind, Stats};
use dogfight::{AssetError, GameEvent, World};

// ── Setup ─────────────────────────────────────────────────────────────────────

#[test]
fn starting_scene() {
    let world = full_world();
    for kind in [
        EntityKind::Landscape,
        EntityKind::Mountain,
        EntityKind::Ground,
        EntityKind::Cactus,
        EntityKind::Bomb,
        EntityKind::Ufo,
    ] {
        assert_eq!(count(&world, kind), 1, "{:?}", kind);
    }
    assert_eq!(count(&world, EntityKind::Cloud), 6);
    assert!(world
        .entities_of(EntityKind::Cloud)
        .all(|(_, c)| (-2..=7).contains(&c.priority)));
    assert_eq!(world.arena().in_groups(Groups::ENEMIES).count(), 3);
    assert_eq!(world.arena().in_groups(Groups::FLOOR).count(), 1);
}

#[test]
fn music_starts_looped() {
    let mut world = full_world();
    let music = world.bank().sounds.music;
    let events = world.step(None, 0);
    assert!(events.contains(&GameEvent::Sound { sound: music, looped: true }));
}

#[test]
fn missing_image_is_reported() {
    let result = World::new(&mut StubAssets::without("ufo1.png"), common::seeded_rng(), Viewport::default());
    assert_eq!(result.err(), Some(AssetError::MissingVisual("ufo1.png".into())));
}

#[test]
fn missing_sound_is_reported() {
    let result = World::bare(&mut StubAssets::without("aliens.wav"), common::seeded_rng(), Viewport::default());
    assert_eq!(result.err(), Some(AssetError::MissingSound("aliens.wav".into())));
}

// ── Input and the motion gate ─────────────────────────────────────────────────

#[test]
fn walking_on_the_ground_keeps_scenery_still() {
    let mut world = full_world();
    world.step(Some(Key::Left), 0);
    assert!(!world.motion());
    assert_eq!(world.player().action, Action::Walk);
}

#[test]
fn taking_off_starts_scrolling() {
    let mut world = full_world();
    world.step(Some(Key::Up), 0);
    assert!(world.motion());
    assert_eq!(world.player().action, Action::Fly);
}

#[test]
fn shooting_from_the_ground() {
    let mut world = full_world();
    world.step(Some(Key::Space), 0);
    assert!(!world.motion());
    assert_eq!(count(&world, EntityKind::Bullet), 1);
}

#[test]
fn shooting_while_airborne() {
    let mut world = bare_world();
    world.step(Some(Key::Space), 0);
    assert!(world.motion());
    assert_eq!(count(&world, EntityKind::Bullet), 1);
}

#[test]
fn airborne_without_input_drifts_down() {
    // No floor in a bare world
    let mut world = bare_world();
    let y = world.player().rect.y;
    world.step(None, 0);
    assert!(world.motion());
    assert_eq!(world.player().action, Action::Fly);
    assert_eq!(world.player().rect.y, y + 1.0);
}

#[test]
fn dead_player_stops_the_world() {
    let mut world = full_world();
    world.player_mut().attacked(-100);
    world.step(Some(Key::Up), 0);
    assert!(!world.motion());
    assert!(world.is_game_over());
}

// ── Drawing and stats ─────────────────────────────────────────────────────────

#[test]
fn draw_list_is_sorted_by_priority() {
    let world = full_world();
    let items = world.draw_list();
    // Every scene object plus the player
    assert_eq!(items.len(), world.arena().len() + 1);
    assert!(items.windows(2).all(|w| w[0].priority <= w[1].priority));
}

#[test]
fn stats_never_go_negative() {
    let mut stats = Stats::default();
    stats.modify(StatKind::Health, -150);
    assert_eq!(stats.get(StatKind::Health), 0);
    stats.modify(StatKind::Score, 3);
    stats.modify(StatKind::Score, -1);
    assert_eq!(stats.get(StatKind::Score), 2);
    stats.zero(StatKind::Score);
    assert_eq!(stats.get(StatKind::Score), 0);
}
