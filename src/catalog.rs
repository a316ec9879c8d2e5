/// Built-in asset catalogue for the terminal front end.
///
/// Every image the core asks for is a solid block of one glyph in one
/// colour, sized in world pixels; sounds are only logged.

use std::collections::HashMap;

use crossterm::style::Color;
use tracing::debug;

use dogfight::assets::{AssetLoader, SoundId, Visual, VisualId};
use dogfight::AssetError;

/// How a visual is painted onto the terminal grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Color,
    pub bg: Option<Color>,
}

const fn glyph(ch: char, fg: Color, bg: Option<Color>) -> Glyph {
    Glyph { ch, fg, bg }
}

/// Pixel size and glyph of a built-in image.
fn builtin_visual(name: &str) -> Option<(f32, f32, Glyph)> {
    let entry = match name {
        "background.png" => (1600.0, 600.0, glyph(' ', Color::White, Some(Color::DarkBlue))),
        "mountain.png" => (900.0, 300.0, glyph('▲', Color::Grey, Some(Color::DarkMagenta))),
        "ground.png" => (1600.0, 200.0, glyph('▓', Color::DarkYellow, Some(Color::Yellow))),
        "cloud1.png" => (220.0, 90.0, glyph('░', Color::White, None)),
        "cloud2.png" => (160.0, 70.0, glyph('░', Color::Grey, None)),
        "cloud3.png" => (260.0, 100.0, glyph('▒', Color::White, None)),
        "cactus.png" => (60.0, 130.0, glyph('¥', Color::Green, Some(Color::DarkGreen))),
        "bomb.png" => (50.0, 50.0, glyph('●', Color::Red, None)),
        "ufo0.png" => (140.0, 60.0, glyph('◊', Color::Cyan, Some(Color::DarkGrey))),
        "ufo1.png" => (140.0, 220.0, glyph('▼', Color::Yellow, Some(Color::DarkGrey))),
        "ufo2.png" => (140.0, 260.0, glyph('█', Color::Magenta, None)),
        "bullet.png" => (24.0, 8.0, glyph('-', Color::White, None)),
        "shoot0.png" | "shoot1.png" => (64.0, 96.0, glyph('»', Color::White, Some(Color::DarkRed))),
        "r_fly0.png" => (64.0, 96.0, glyph('^', Color::White, Some(Color::DarkRed))),
        "l_idle0.png" | "r_idle0.png" => (64.0, 96.0, glyph('@', Color::White, Some(Color::DarkRed))),
        _ => {
            if let Some(frame) = name
                .strip_prefix("explosion")
                .and_then(|rest| rest.strip_suffix(".png"))
                .and_then(|n| n.parse::<u32>().ok())
                .filter(|n| *n < 9)
            {
                let fg = if frame % 2 == 0 { Color::Red } else { Color::Yellow };
                (90.0, 90.0, glyph('*', fg, None))
            } else if is_walk_frame(name, "l_walk") {
                (64.0, 96.0, glyph('◄', Color::White, Some(Color::DarkRed)))
            } else if is_walk_frame(name, "r_walk") {
                (64.0, 96.0, glyph('►', Color::White, Some(Color::DarkRed)))
            } else {
                return None;
            }
        }
    };
    Some(entry)
}

fn is_walk_frame(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(".png"))
        .and_then(|n| n.parse::<u32>().ok())
        .map_or(false, |n| n < 8)
}

const SOUNDS: [&str; 4] = ["explosion.wav", "aliens.wav", "shot.wav", "main.wav"];

#[derive(Debug, Default)]
pub struct Catalog {
    ids: HashMap<String, VisualId>,
    glyphs: Vec<Glyph>,
    sounds: Vec<String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn glyph(&self, id: VisualId) -> Option<Glyph> {
        self.glyphs.get(id.0 as usize).copied()
    }

    pub fn sound_name(&self, id: SoundId) -> &str {
        self.sounds
            .get(id.0 as usize)
            .map(String::as_str)
            .unwrap_or("?")
    }

    /// Terminal builds have no mixer; playback is logged.
    pub fn play(&self, id: SoundId, looped: bool) {
        debug!(sound = self.sound_name(id), looped, "play sound");
    }
}

impl AssetLoader for Catalog {
    fn load_visual(&mut self, name: &str) -> Result<Visual, AssetError> {
        let (width, height, glyph) =
            builtin_visual(name).ok_or_else(|| AssetError::MissingVisual(name.to_string()))?;
        let id = match self.ids.get(name) {
            Some(id) => *id,
            None => {
                let id = VisualId(self.glyphs.len() as u32);
                self.glyphs.push(glyph);
                self.ids.insert(name.to_string(), id);
                id
            }
        };
        Ok(Visual { id, width, height })
    }

    fn load_sound(&mut self, name: &str) -> Result<SoundId, AssetError> {
        if !SOUNDS.contains(&name) {
            return Err(AssetError::MissingSound(name.to_string()));
        }
        if let Some(index) = self.sounds.iter().position(|s| s == name) {
            return Ok(SoundId(index as u32));
        }
        self.sounds.push(name.to_string());
        Ok(SoundId(self.sounds.len() as u32 - 1))
    }
}
