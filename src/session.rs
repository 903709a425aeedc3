//! Run progression record
//!
//! The one piece of state that outlives a screen. The host owns exactly one
//! `Session` per run and lends it mutably to whichever controller is active;
//! starting a new playthrough resets it in place.

use serde::{Deserialize, Serialize};

use crate::consts::TICKS_PER_SECOND;

/// Enemy attack damage per wave, clamped at the last entry
pub const ENEMY_STRENGTH: [u64; 3] = [100, 10_000, 1_000_000];
/// Enemy starting life per wave, clamped at the last entry
pub const ENEMY_LIFE: [u64; 3] = [1_000, 100_000, 10_000_000];
/// Player attack damage per strength tier
pub const PLAYER_STRENGTH: [u64; 4] = [1, 100, 10_000, 1_000_000];
/// Player max life per stamina tier
pub const PLAYER_LIFE: [u64; 4] = [1, 1_000, 100_000, 10_000_000];
/// Currency granted per enemy kill, by wave
pub const WAVE_REWARD: [u64; 3] = [10, 1_000, 100_000];
/// Cost to buy the next tier, indexed by the current tier
pub const UPGRADE_COST: [u64; 4] = [0, 50, 5_000, 500_000];

/// Highest reachable upgrade tier on either track
pub const MAX_TIER: usize = PLAYER_STRENGTH.len() - 1;

/// Cross-screen progression state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Current arena wave (0-based)
    pub wave: u32,
    /// Strength upgrade tier, clamped to the stat tables
    pub strength_tier: usize,
    /// Stamina upgrade tier, clamped to the stat tables
    pub stamina_tier: usize,
    /// Accumulated currency
    pub currency: u64,
    /// Gameplay ticks elapsed this run (speedrun timer)
    pub ticks: u64,
}

fn clamped(table: &[u64], index: usize) -> u64 {
    table[index.min(table.len() - 1)]
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wipe everything back to a fresh playthrough
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn enemy_strength(&self) -> u64 {
        clamped(&ENEMY_STRENGTH, self.wave as usize)
    }

    pub fn enemy_life(&self) -> u64 {
        clamped(&ENEMY_LIFE, self.wave as usize)
    }

    pub fn wave_reward(&self) -> u64 {
        clamped(&WAVE_REWARD, self.wave as usize)
    }

    pub fn player_strength(&self) -> u64 {
        clamped(&PLAYER_STRENGTH, self.strength_tier)
    }

    pub fn player_max_life(&self) -> u64 {
        clamped(&PLAYER_LIFE, self.stamina_tier)
    }

    /// Cost of the next strength tier; `None` once the track is maxed
    pub fn next_strength_cost(&self) -> Option<u64> {
        Self::next_cost(self.strength_tier)
    }

    /// Cost of the next stamina tier; `None` once the track is maxed
    pub fn next_stamina_cost(&self) -> Option<u64> {
        Self::next_cost(self.stamina_tier)
    }

    fn next_cost(tier: usize) -> Option<u64> {
        (tier < MAX_TIER).then(|| clamped(&UPGRADE_COST, tier))
    }

    /// Elapsed run time as "Xm Ys Zms." for the outro page
    pub fn speedrun_string(&self) -> String {
        let total_seconds = self.ticks / TICKS_PER_SECOND;
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        let millis = (self.ticks % TICKS_PER_SECOND) * 1000 / TICKS_PER_SECOND;
        format!("{minutes}m {seconds}s {millis}ms.")
    }
}
