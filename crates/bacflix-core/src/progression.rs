//! Experience points, level and streak.
//!
//! Only `xp` moves. `level` and `streak` are carried through persistence
//! untouched; no rule derives level from xp or advances the streak.

use serde::{Deserialize, Serialize};

/// Actions that earn experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reward {
    /// Every plan generation, including regenerations.
    PlanGenerated,
    /// A task going from not-done to done.
    TaskCompleted,
    /// A focus session reaching zero.
    FocusCompleted,
}

impl Reward {
    pub fn xp(&self) -> u64 {
        match self {
            Reward::PlanGenerated => 20,
            Reward::TaskCompleted => 15,
            Reward::FocusCompleted => 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub xp: u64,
    pub level: u32,
    pub streak: u32,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            xp: 0,
            level: 1,
            streak: 0,
        }
    }
}

impl Progression {
    /// Add the reward's experience and return the amount awarded.
    pub fn award(&mut self, reward: Reward) -> u64 {
        let gained = reward.xp();
        self.xp = self.xp.saturating_add(gained);
        gained
    }

    /// Fill of the level bar, 0..100.
    pub fn level_progress_pct(&self) -> u8 {
        (self.xp % 100) as u8
    }
}
