/// Handles to platform-loaded images and sounds, and the bank of every
/// visual the simulation can switch to at runtime.
///
/// The bank is filled once when a world is built so that spawning,
/// exploding and animating never touch the loader again.

use crate::config;
use crate::entities::{Action, EntityKind, Facing};
use crate::error::AssetError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VisualId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SoundId(pub u32);

/// A loaded image: opaque handle plus its pixel size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Visual {
    pub id: VisualId,
    pub width: f32,
    pub height: f32,
}

/// Provided by the platform layer.
pub trait AssetLoader {
    fn load_visual(&mut self, name: &str) -> Result<Visual, AssetError>;
    fn load_sound(&mut self, name: &str) -> Result<SoundId, AssetError>;
}

// ── Player animation table ────────────────────────────────────────────────────

/// Frame list and per-frame displacement for one (action, facing) pair.
///
/// `step` is subtracted from the position each frame, so a positive x
/// moves left and a positive y moves up.
#[derive(Clone, Debug)]
pub struct Motion {
    pub frames: Vec<Visual>,
    pub step: (f32, f32),
}

fn frame_names(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{}{}.png", prefix, i)).collect()
}

/// Asset names and displacement for every (action, facing) pair.
fn motion_recipe(action: Action, facing: Facing) -> (Vec<String>, (f32, f32)) {
    match (action, facing) {
        (Action::Walk, Facing::Up) => (frame_names("l_walk", 1), (0.0, 0.0)),
        (Action::Walk, Facing::Down) => (frame_names("r_walk", 1), (0.0, 0.0)),
        (Action::Walk, Facing::Left) => (frame_names("l_walk", 8), (2.0, 0.0)),
        (Action::Walk, Facing::Right) => (frame_names("r_walk", 8), (-2.0, 0.0)),

        (Action::Fly, Facing::Up) => (frame_names("r_fly", 1), (0.0, 5.0)),
        (Action::Fly, Facing::Down) => (frame_names("r_fly", 1), (0.0, 0.0)),
        (Action::Fly, Facing::Left) => (frame_names("r_fly", 1), (4.0, -4.0)),
        (Action::Fly, Facing::Right) => (frame_names("r_fly", 1), (-4.0, -4.0)),

        (Action::Idle, Facing::Up) | (Action::Idle, Facing::Left) => {
            (frame_names("l_idle", 1), (0.0, 0.0))
        }
        (Action::Idle, Facing::Down) | (Action::Idle, Facing::Right) => {
            (frame_names("r_idle", 1), (0.0, 0.0))
        }

        // Grounded pose first, airborne pose second.
        (Action::Shoot, _) => (frame_names("shoot", 2), (0.0, 0.0)),
    }
}

/// Fixed-size table indexed by `(Action, Facing)`.
#[derive(Clone, Debug)]
pub struct AnimationTable {
    motions: [[Motion; 4]; 4],
}

impl AnimationTable {
    pub fn load(loader: &mut dyn AssetLoader) -> Result<Self, AssetError> {
        let mut rows = Vec::with_capacity(4);
        for action in Action::ALL {
            rows.push(Self::load_row(loader, action)?);
        }
        let motions: [[Motion; 4]; 4] = rows
            .try_into()
            .map_err(|_| AssetError::MissingVisual("player animation table".to_string()))?;
        Ok(Self { motions })
    }

    fn load_row(loader: &mut dyn AssetLoader, action: Action) -> Result<[Motion; 4], AssetError> {
        let mut row = Vec::with_capacity(4);
        for facing in Facing::ALL {
            let (names, step) = motion_recipe(action, facing);
            let frames = names
                .iter()
                .map(|name| loader.load_visual(name))
                .collect::<Result<Vec<_>, _>>()?;
            row.push(Motion { frames, step });
        }
        row.try_into()
            .map_err(|_| AssetError::MissingVisual(format!("{:?} animation", action)))
    }

    pub fn get(&self, action: Action, facing: Facing) -> &Motion {
        &self.motions[action.index()][facing.index()]
    }

    pub fn shoot_pose(&self, flying: bool) -> Visual {
        let frames = &self.get(Action::Shoot, Facing::Down).frames;
        frames[usize::from(flying).min(frames.len() - 1)]
    }
}

// ── Sprite bank ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
pub struct Sounds {
    pub explosion: SoundId,
    pub alert: SoundId,
    pub shot: SoundId,
    pub music: SoundId,
}

#[derive(Clone, Debug)]
pub struct SpriteBank {
    pub landscape: Visual,
    pub mountain: Visual,
    pub ground: Visual,
    pub cactus: Visual,
    pub bomb: Visual,
    pub ufo: Visual,
    pub ufo_alert: Visual,
    pub ufo_abduction: Visual,
    pub bullet: Visual,
    pub clouds: Vec<(String, Visual)>,
    pub explosion: Vec<Visual>,
    pub animations: AnimationTable,
    pub sounds: Sounds,
}

impl SpriteBank {
    pub fn load(loader: &mut dyn AssetLoader) -> Result<Self, AssetError> {
        let clouds = config::CLOUD_VISUALS
            .iter()
            .map(|name| Ok((name.to_string(), loader.load_visual(name)?)))
            .collect::<Result<Vec<_>, AssetError>>()?;
        let explosion = (0..config::EXPLOSION_FRAMES)
            .map(|i| loader.load_visual(&config::explosion_visual(i)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            landscape: loader.load_visual(config::LANDSCAPE_VISUAL)?,
            mountain: loader.load_visual(config::MOUNTAIN_VISUAL)?,
            ground: loader.load_visual(config::GROUND_VISUAL)?,
            cactus: loader.load_visual(config::CACTUS_VISUAL)?,
            bomb: loader.load_visual(config::BOMB_VISUAL)?,
            ufo: loader.load_visual(config::UFO_VISUAL)?,
            ufo_alert: loader.load_visual(config::UFO_ALERT_VISUAL)?,
            ufo_abduction: loader.load_visual(config::UFO_ABDUCTION_VISUAL)?,
            bullet: loader.load_visual(config::BULLET_VISUAL)?,
            clouds,
            explosion,
            animations: AnimationTable::load(loader)?,
            sounds: Sounds {
                explosion: loader.load_sound(config::EXPLOSION_SOUND)?,
                alert: loader.load_sound(config::ALERT_SOUND)?,
                shot: loader.load_sound(config::SHOT_SOUND)?,
                music: loader.load_sound(config::MUSIC_SOUND)?,
            },
        })
    }

    /// Base visual for a kind; clouds look theirs up by name.
    pub fn base_visual(&self, kind: EntityKind, name: &str) -> Visual {
        match kind {
            EntityKind::Landscape => self.landscape,
            EntityKind::Mountain => self.mountain,
            EntityKind::Ground => self.ground,
            EntityKind::Cactus => self.cactus,
            EntityKind::Bomb => self.bomb,
            EntityKind::Ufo => self.ufo,
            EntityKind::Bullet => self.bullet,
            EntityKind::Cloud => self
                .clouds
                .iter()
                .find(|(cloud, _)| cloud == name)
                .or_else(|| self.clouds.first())
                .map(|(_, visual)| *visual)
                .unwrap_or(self.landscape),
        }
    }
}
