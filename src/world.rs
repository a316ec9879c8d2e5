/// The simulation: every live object, the player, and the per-frame step.
///
/// Frame order is fixed: collisions and damage first, then input (which
/// yields the motion gate), then one update per live object in registration
/// order, then the player. Objects spawned mid-frame wait for the next one.

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info};

use crate::arena::{Arena, EntityId};
use crate::assets::{AssetLoader, SoundId, SpriteBank};
use crate::bullet;
use crate::config::{self, Viewport};
use crate::enemy;
use crate::entities::{DrawItem, Entity, EntityKind, Groups, Key};
use crate::error::AssetError;
use crate::player::{Player, PlayerSignal};
use crate::scroll::{self, ScrollContext, SpawnParams};
use crate::stats::{StatKind, Stats};
use crate::ufo::{self, UfoSignal};

/// Things the outer loop reacts to: sounds, HUD changes, banners.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Sound { sound: SoundId, looped: bool },
    ScoreDelta(i32),
    PlayerHit { damage: i32, health: i32 },
    PlayerDied,
    UfoWarning,
    PlayerAbducted,
    PlayerDestroyed,
}

pub struct World {
    viewport: Viewport,
    arena: Arena,
    player: Player,
    bank: SpriteBank,
    stats: Stats,
    rng: StdRng,
    events: Vec<GameEvent>,
    frame: u64,
    motion: bool,
}

impl World {
    /// A world with only the player in it.
    pub fn bare(loader: &mut dyn AssetLoader, rng: StdRng, viewport: Viewport) -> Result<Self, AssetError> {
        let bank = SpriteBank::load(loader)?;
        let player = Player::new(&bank.animations);
        Ok(Self {
            viewport,
            arena: Arena::new(),
            player,
            bank,
            stats: Stats::default(),
            rng,
            events: Vec::new(),
            frame: 0,
            motion: false,
        })
    }

    /// The full starting scene: scenery, one of each enemy, and clouds.
    pub fn new(loader: &mut dyn AssetLoader, rng: StdRng, viewport: Viewport) -> Result<Self, AssetError> {
        let mut world = Self::bare(loader, rng, viewport)?;
        let scenery = Groups::LAYERS | Groups::MOVEABLE;
        let hostile = scenery | Groups::ENEMIES;

        world.spawn(&SpawnParams::new(EntityKind::Landscape, config::LANDSCAPE_VISUAL, scenery, config::LANDSCAPE_PRIORITY));
        world.spawn(&SpawnParams::new(EntityKind::Mountain, config::MOUNTAIN_VISUAL, scenery, config::MOUNTAIN_PRIORITY));
        world.spawn(&SpawnParams::new(EntityKind::Ground, config::GROUND_VISUAL, scenery | Groups::FLOOR, config::GROUND_PRIORITY));
        world.spawn(&SpawnParams::new(EntityKind::Cactus, config::CACTUS_VISUAL, hostile, config::ENEMY_PRIORITY));
        world.spawn(&SpawnParams::new(EntityKind::Bomb, config::BOMB_VISUAL, hostile, config::ENEMY_PRIORITY));
        world.spawn(&SpawnParams::new(EntityKind::Ufo, config::UFO_VISUAL, hostile, config::ENEMY_PRIORITY));

        for _ in 0..config::CLOUD_COUNT {
            let index = world.rng.gen_range(0..config::CLOUD_VISUALS.len());
            let priority = world
                .rng
                .gen_range(config::CLOUD_PRIORITY_MIN..=config::CLOUD_PRIORITY_MAX);
            world.spawn(&SpawnParams::new(EntityKind::Cloud, config::CLOUD_VISUALS[index], scenery, priority));
        }

        let music = world.bank.sounds.music;
        world.events.push(GameEvent::Sound { sound: music, looped: true });
        info!(entities = world.arena.len(), "world initialised");
        Ok(world)
    }

    /// Build a fresh instance of `params.kind` at its anchor.
    pub fn spawn(&mut self, params: &SpawnParams) -> EntityId {
        let entity = scroll::build(params, &self.bank, self.viewport, &mut self.rng);
        self.arena.insert(entity)
    }

    /// Insert a prepared entity, e.g. one built with [`scroll::build`].
    pub fn insert(&mut self, entity: Entity) -> EntityId {
        self.arena.insert(entity)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn bank(&self) -> &SpriteBank {
        &self.bank
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.arena.get(id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.arena.get_mut(id)
    }

    pub fn entities_of(&self, kind: EntityKind) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.arena.iter().filter(move |(_, e)| e.kind == kind)
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Motion gate used by the most recent frame.
    pub fn motion(&self) -> bool {
        self.motion
    }

    pub fn is_game_over(&self) -> bool {
        self.player.dead
    }

    pub fn ufo_banner(&self) -> bool {
        self.entities_of(EntityKind::Ufo)
            .any(|(_, ufo)| ufo::banner_visible(ufo))
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Frame step ────────────────────────────────────────────────────────────

    /// Run one frame with the key currently held (if any) at `now_ms`.
    pub fn step(&mut self, key: Option<Key>, now_ms: u64) -> Vec<GameEvent> {
        self.resolve_collisions();
        let motion = self.apply_input(key, now_ms);
        self.update_all(motion, key);
        self.drain_events()
    }

    /// Update every live object once with the given motion gate, then the
    /// player with `key`.
    pub fn update_all(&mut self, motion: bool, key: Option<Key>) {
        self.frame += 1;
        self.motion = motion;

        for id in self.arena.ids() {
            let Some(kind) = self.arena.get(id).map(|e| e.kind) else {
                continue;
            };
            match kind {
                EntityKind::Bullet => {
                    bullet::advance(&mut self.arena, id, self.viewport);
                }
                EntityKind::Cactus | EntityKind::Bomb => {
                    self.update_enemy(id, motion);
                }
                EntityKind::Ufo => self.update_ufo(id, motion),
                _ => {
                    self.scroll(id, motion);
                }
            }
        }

        if let Some(PlayerSignal::Destroyed) =
            self.player.update(key, &self.bank.animations, self.viewport)
        {
            self.events.push(GameEvent::PlayerDestroyed);
        }
    }

    fn scroll(&mut self, id: EntityId, motion: bool) -> bool {
        let mut ctx = ScrollContext {
            bank: &self.bank,
            viewport: self.viewport,
            rng: &mut self.rng,
        };
        scroll::advance(&mut self.arena, id, motion, &mut ctx)
    }

    /// Shared enemy frame: scroll, then explosion or spin. Returns `false`
    /// if the enemy retired.
    fn update_enemy(&mut self, id: EntityId, motion: bool) -> bool {
        if !self.scroll(id, motion) {
            return false;
        }
        let Some(entity) = self.arena.get_mut(id) else {
            return false;
        };
        if entity.is_struck() {
            enemy::tick_explosion(entity, &self.bank.explosion);
        } else {
            enemy::spin(entity, &mut self.rng);
        }
        true
    }

    fn update_ufo(&mut self, id: EntityId, motion: bool) {
        if self.arena.get(id).map_or(true, |e| e.is_abducted()) {
            return;
        }
        if !self.update_enemy(id, motion) {
            return;
        }

        let target = self.player.present.then_some(self.player.rect);
        let Some(entity) = self.arena.get_mut(id) else {
            return;
        };
        match ufo::update(entity, target.as_ref(), &self.bank) {
            UfoSignal::Quiet => {}
            UfoSignal::Warning => {
                self.events.push(GameEvent::Sound {
                    sound: self.bank.sounds.alert,
                    looped: false,
                });
                self.events.push(GameEvent::UfoWarning);
            }
            UfoSignal::Abducted => {
                self.player.kill();
                self.stats.zero(StatKind::Health);
                self.events.push(GameEvent::PlayerAbducted);
                self.events.push(GameEvent::PlayerDestroyed);
            }
        }
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    fn is_grounded(&self) -> bool {
        self.arena
            .in_groups(Groups::FLOOR)
            .any(|(_, floor)| floor.rect.intersects(&self.player.rect))
    }

    /// Apply this frame's key to the player and return the motion gate.
    pub fn apply_input(&mut self, key: Option<Key>, now_ms: u64) -> bool {
        if self.player.dead || !self.player.present {
            return false;
        }

        if self.is_grounded() {
            match key {
                Some(Key::Up) => {
                    self.player.fly();
                    true
                }
                Some(Key::Left) | Some(Key::Right) => {
                    self.player.walk();
                    false
                }
                Some(Key::Space) => {
                    self.fire(false, now_ms);
                    false
                }
                Some(Key::Down) | None => {
                    self.player.idle();
                    false
                }
            }
        } else {
            match key {
                Some(Key::Down) | None => self.player.fall(config::DRIFT_FALL_SPEED, true),
                Some(Key::Space) => {
                    self.fire(true, now_ms);
                }
                Some(_) => self.player.fly(),
            }
            true
        }
    }

    /// Player shot; spawns a bullet when the rate limit allows.
    pub fn fire(&mut self, flying: bool, now_ms: u64) -> Option<EntityId> {
        let muzzle = self.player.shoot(flying, now_ms, &self.bank.animations)?;
        let id = self.arena.insert(bullet::build(muzzle, &self.bank));
        self.events.push(GameEvent::Sound {
            sound: self.bank.sounds.shot,
            looped: false,
        });
        Some(id)
    }

    // ── Collisions ────────────────────────────────────────────────────────────

    /// Strike an enemy. Returns `true` on the first strike only.
    pub fn explode(&mut self, id: EntityId) -> bool {
        if !enemy::explode(&mut self.arena, id) {
            return false;
        }
        self.events.push(GameEvent::Sound {
            sound: self.bank.sounds.explosion,
            looped: false,
        });
        true
    }

    /// Apply an enemy's contact damage to the player and blow it up.
    /// Stale or already-struck enemies are ignored.
    pub fn strike_player(&mut self, id: EntityId) -> bool {
        let Some(damage) = self
            .arena
            .get(id)
            .filter(|e| e.groups.contains(Groups::ENEMIES))
            .and_then(|e| e.combat.as_ref())
            .map(|c| c.damage)
        else {
            return false;
        };

        let was_dead = self.player.dead;
        self.player.attacked(damage);
        self.stats.modify(StatKind::Health, damage);
        self.events.push(GameEvent::PlayerHit {
            damage,
            health: self.player.health,
        });
        if self.player.dead && !was_dead {
            self.events.push(GameEvent::PlayerDied);
        }
        self.explode(id)
    }

    pub fn resolve_collisions(&mut self) {
        if self.player.present {
            let player = self.player.rect;
            let touching: Vec<EntityId> = self
                .arena
                .in_groups(Groups::ENEMIES)
                .filter(|(_, e)| e.rect.intersects(&player))
                .map(|(id, _)| id)
                .collect();
            for id in touching {
                self.strike_player(id);
            }
        }

        let bullets: Vec<EntityId> = self
            .arena
            .in_groups(Groups::BULLETS)
            .map(|(id, _)| id)
            .collect();
        for bullet_id in bullets {
            let Some(shot) = self.arena.get(bullet_id).map(|b| b.rect) else {
                continue;
            };
            let target = self
                .arena
                .in_groups(Groups::ENEMIES)
                .find(|(_, e)| e.rect.intersects(&shot))
                .map(|(id, _)| id);
            if let Some(enemy_id) = target {
                self.arena.remove(bullet_id);
                if self.explode(enemy_id) {
                    self.stats.modify(StatKind::Score, 1);
                    self.events.push(GameEvent::ScoreDelta(1));
                    debug!(?enemy_id, "enemy shot down");
                }
            }
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    /// Everything visible, lowest priority first; ties keep registration order.
    pub fn draw_list(&self) -> Vec<DrawItem> {
        let mut items: Vec<DrawItem> = self
            .arena
            .in_groups(Groups::LAYERS)
            .map(|(_, e)| DrawItem {
                visual: e.visual,
                rect: e.rect,
                angle: e.angle,
                priority: e.priority,
            })
            .collect();
        if self.player.present {
            items.push(DrawItem {
                visual: self.player.visual,
                rect: self.player.rect,
                angle: self.player.draw_angle(),
                priority: self.player.priority,
            });
        }
        items.sort_by_key(|item| item.priority);
        items
    }
}
