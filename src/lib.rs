//! Cannon Defense - wave simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, wave state machine)
//! - `score`: Interpolated scoreboard
//! - `highscores`: Fixed-size high score table
//! - `persistence`: JSON storage for the high score table
//! - `replay`: Input recording and deterministic playback
//! - `config`: Data-driven simulation tuning
//! - `autopilot`: Demo input source
//! - `args`: Command-line parsing for the headless runner

pub mod args;
pub mod autopilot;
pub mod config;
pub mod highscores;
pub mod persistence;
pub mod replay;
pub mod score;
pub mod sim;

pub use config::SimConfig;
pub use highscores::HighScores;
pub use replay::{ReplayBuffer, Session};
pub use score::Scoreboard;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal simulation rate (one tick per rendered frame)
    pub const TICK_RATE: u32 = 60;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 1200.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Length of a wave in seconds
    pub const MAX_WAVE_TIME: u32 = 60;

    /// Per-kind spawn caps
    pub const MAX_BLOCKERS: u32 = 8;
    pub const MAX_BOMBERS: u32 = 10;
    pub const MAX_BRUTES: u32 = 3;
}

/// Unit vector for an angle given in degrees (0° points along +x, 90° along +y)
#[inline]
pub fn from_angle_degrees(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Unit vector pointing from `from` toward `to` (zero if they coincide)
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Wrap an angle in degrees into [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}
