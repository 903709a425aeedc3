//! Storybrawl - a storybook brawler
//!
//! Core modules:
//! - `book`: story screen with the two-stage page-flip state machine
//! - `arena`: wave-based combat screen (player, enemies, upgrades)
//! - `engine`: capability traits for the external sprite/audio/UI engine
//! - `session`: progression record threaded through both screens
//! - `story`: paginated story text keyed by section

pub mod arena;
pub mod book;
pub mod engine;
pub mod input;
pub mod screen;
pub mod session;
pub mod settings;
pub mod story;

pub use input::FrameInput;
pub use screen::{Screen, ScreenChange, ScreenContext};
pub use session::Session;
pub use story::StoryText;

use glam::Vec2;

/// Game tuning constants
pub mod consts {
    /// Simulation ticks per second (one tick per rendered frame)
    pub const TICKS_PER_SECOND: u64 = 60;

    /// Play area bounds (arena floor), in stage pixels
    pub const PLAY_AREA_LEFT: f32 = 0.0;
    pub const PLAY_AREA_RIGHT: f32 = 320.0;
    pub const PLAY_AREA_TOP: f32 = 76.0;
    pub const PLAY_AREA_BOTTOM: f32 = 171.0;

    /// Movement speeds (pixels per tick)
    pub const PLAYER_SPEED: f32 = 2.0;
    pub const ENEMY_SPEED: f32 = 0.5;

    /// Page flip progress advance per tick
    pub const FLIP_STEP: f32 = 0.05;
    /// Outgoing page scale snaps to 0 below this
    pub const FLIP_SNAP_LOW: f32 = 0.01;
    /// Incoming page scale snaps to 1 above this
    pub const FLIP_SNAP_HIGH: f32 = 0.99;

    /// Fade length before a book screen exit
    pub const FADE_OUT_TICKS: u32 = 20;

    /// Ticks of damage immunity after the player is hit
    pub const INVINCIBILITY_TICKS: u32 = 60;
    /// Shared cooldown between enemy attack attempts
    pub const ENEMY_ATTACK_COOLDOWN: u32 = 60;
    /// Attack reach around the player
    pub const ATTACK_RANGE_X: f32 = 20.0;
    pub const ATTACK_RANGE_Y: f32 = 10.0;

    /// Wave banner auto-dismiss time
    pub const WAVE_BANNER_TICKS: u32 = 180;
    /// Victory screen auto-advance time
    pub const WIN_WAIT_TICKS: u32 = 600;
    /// Clearing this wave ends the run
    pub const FINAL_WAVE: u32 = 3;
    /// Enemies spawned per wave
    pub const ENEMIES_PER_WAVE: usize = 10;

    /// Dying animations release the actor at this step index
    pub const DEATH_FINAL_STEP: u32 = 5;
}

/// Depth (z) for a given floor y, so lower actors draw in front
#[inline]
pub fn y_to_depth(y: f32) -> f32 {
    let t = (y - consts::PLAY_AREA_TOP) / (consts::PLAY_AREA_BOTTOM - consts::PLAY_AREA_TOP);
    10.0 + 10.0 * t
}

/// Draw scale for a given floor y, shrinking actors toward the horizon
#[inline]
pub fn y_to_scale(y: f32) -> f32 {
    let t = (y - consts::PLAY_AREA_TOP) / (consts::PLAY_AREA_BOTTOM - consts::PLAY_AREA_TOP);
    0.5 + 0.5 * t
}

/// Clamp a position to the play area rectangle
#[inline]
pub fn clamp_to_play_area(pos: Vec2) -> Vec2 {
    Vec2::new(
        pos.x.clamp(consts::PLAY_AREA_LEFT, consts::PLAY_AREA_RIGHT),
        pos.y.clamp(consts::PLAY_AREA_TOP, consts::PLAY_AREA_BOTTOM),
    )
}
