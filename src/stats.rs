/// Health and score counters shown on the HUD.

use crate::config;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatKind {
    Health,
    Score,
}

impl StatKind {
    pub fn label(self) -> &'static str {
        match self {
            StatKind::Health => "Health",
            StatKind::Score => "Score",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stats {
    health: u32,
    score: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            health: config::PLAYER_MAX_HEALTH as u32,
            score: 0,
        }
    }
}

impl Stats {
    pub fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Health => self.health,
            StatKind::Score => self.score,
        }
    }

    /// Add `step`, never going below zero.
    pub fn modify(&mut self, kind: StatKind, step: i32) {
        let slot = match kind {
            StatKind::Health => &mut self.health,
            StatKind::Score => &mut self.score,
        };
        *slot = (i64::from(*slot) + i64::from(step)).max(0) as u32;
    }

    pub fn zero(&mut self, kind: StatKind) {
        match kind {
            StatKind::Health => self.health = 0,
            StatKind::Score => self.score = 0,
        }
    }
}
