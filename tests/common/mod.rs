#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::SeedableRng;

use dogfight::assets::{AssetLoader, SoundId, Visual, VisualId};
use dogfight::config::{self, Viewport};
use dogfight::entities::{EntityKind, Groups};
use dogfight::scroll::SpawnParams;
use dogfight::{AssetError, World};

/// Loader with fixed sizes; names listed in `missing` fail to load.
#[derive(Default)]
pub struct StubAssets {
    pub missing: HashSet<String>,
    ids: HashMap<String, u32>,
}

impl StubAssets {
    pub fn without(name: &str) -> Self {
        Self {
            missing: [name.to_string()].into_iter().collect(),
            ..Self::default()
        }
    }

    fn id_for(&mut self, name: &str) -> u32 {
        let next = self.ids.len() as u32;
        *self.ids.entry(name.to_string()).or_insert(next)
    }
}

fn size_of(name: &str) -> (f32, f32) {
    match name {
        "background.png" => (1600.0, 600.0),
        "ground.png" => (1600.0, 200.0),
        "mountain.png" => (900.0, 300.0),
        "cactus.png" => (60.0, 120.0),
        "bomb.png" => (50.0, 50.0),
        "ufo0.png" => (100.0, 50.0),
        "ufo1.png" => (100.0, 150.0),
        "ufo2.png" => (100.0, 200.0),
        "bullet.png" => (20.0, 10.0),
        n if n.starts_with("cloud") => (200.0, 80.0),
        n if n.starts_with("explosion") => (80.0, 80.0),
        _ => (60.0, 90.0),
    }
}

impl AssetLoader for StubAssets {
    fn load_visual(&mut self, name: &str) -> Result<Visual, AssetError> {
        if self.missing.contains(name) {
            return Err(AssetError::MissingVisual(name.to_string()));
        }
        let (width, height) = size_of(name);
        Ok(Visual {
            id: VisualId(self.id_for(name)),
            width,
            height,
        })
    }

    fn load_sound(&mut self, name: &str) -> Result<SoundId, AssetError> {
        if self.missing.contains(name) {
            return Err(AssetError::MissingSound(name.to_string()));
        }
        Ok(SoundId(self.id_for(name)))
    }
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// A world containing only the player.
pub fn bare_world() -> World {
    World::bare(&mut StubAssets::default(), seeded_rng(), Viewport::default())
        .expect("stub assets load")
}

pub fn full_world() -> World {
    World::new(&mut StubAssets::default(), seeded_rng(), Viewport::default())
        .expect("stub assets load")
}

/// Identity parameters the starting scene uses for `kind`.
pub fn params(kind: EntityKind) -> SpawnParams {
    let scenery = Groups::LAYERS | Groups::MOVEABLE;
    let hostile = scenery | Groups::ENEMIES;
    match kind {
        EntityKind::Landscape => SpawnParams::new(kind, config::LANDSCAPE_VISUAL, scenery, config::LANDSCAPE_PRIORITY),
        EntityKind::Mountain => SpawnParams::new(kind, config::MOUNTAIN_VISUAL, scenery, config::MOUNTAIN_PRIORITY),
        EntityKind::Ground => SpawnParams::new(kind, config::GROUND_VISUAL, scenery | Groups::FLOOR, config::GROUND_PRIORITY),
        EntityKind::Cloud => SpawnParams::new(kind, "cloud2.png", scenery, 7),
        EntityKind::Cactus => SpawnParams::new(kind, config::CACTUS_VISUAL, hostile, config::ENEMY_PRIORITY),
        EntityKind::Bomb => SpawnParams::new(kind, config::BOMB_VISUAL, hostile, config::ENEMY_PRIORITY),
        EntityKind::Ufo => SpawnParams::new(kind, config::UFO_VISUAL, hostile, config::ENEMY_PRIORITY),
        EntityKind::Bullet => SpawnParams::new(kind, config::BULLET_VISUAL, Groups::LAYERS | Groups::BULLETS, config::BULLET_PRIORITY),
    }
}

pub fn count(world: &World, kind: EntityKind) -> usize {
    world.entities_of(kind).count()
}
