//! Simulation configuration
//!
//! Every tunable the wave controller reads lives in [`SimConfig`], which is
//! handed to [`GameState::new`](crate::sim::GameState::new) at construction.
//! Defaults reproduce the arcade's standard balance; a JSON file may override
//! any subset of fields (missing keys fall back to the defaults).

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::StoreError;

/// Runtime-tunable simulation and balance settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === World ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Nominal ticks per second (wave timers count ticks, not wall time)
    pub tick_rate: u32,

    // === Wave timing ===
    /// Wave duration in seconds
    pub wave_seconds: u32,
    /// Hold after the last base is lost, in seconds
    pub base_lost_seconds: u32,

    // === Emplacement / projectiles ===
    pub emplacement: Vec2,
    pub magazine_size: u32,
    pub launch_power: f32,
    pub projectile_mass: f32,
    pub projectile_size: f32,
    /// Downward force applied to flying projectiles each tick
    pub gravity: f32,
    /// Quadratic drag coefficient
    pub drag_coefficient: f32,

    // === Bases ===
    pub base_count: u32,
    pub base_origin: Vec2,
    pub base_spacing: f32,
    pub base_size: Vec2,
    /// Leftward drift speed of bases (0 = stationary)
    pub base_drift: f32,

    // === Hostiles ===
    pub target_size: Vec2,
    pub blocker_size: Vec2,
    pub bomber_size: Vec2,
    pub brute_size: Vec2,
    pub max_blockers: u32,
    pub max_bombers: u32,
    pub max_brutes: u32,
    pub brute_speed: f32,
    /// Maximum orbital wobble radius of a brute's collision box
    pub brute_orbit_radius: f32,
    /// Ticks between bomber flash toggles
    pub bomber_flash_interval: u32,
    /// Horizontal nudge applied to a deflected projectile
    pub deflect_nudge: f32,

    // === Scoring ===
    pub target_award: i64,
    pub bomber_award: i64,
    pub brute_award: i64,
    pub blocker_penalty: i64,
    /// Fraction of the remaining gap the displayed score closes per tick
    pub score_lerp: f64,
    pub high_score_slots: usize,

    // === Determinism ===
    /// Base seed for the per-wave spawn generator
    pub spawn_seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            tick_rate: TICK_RATE,

            wave_seconds: MAX_WAVE_TIME,
            base_lost_seconds: 4,

            emplacement: Vec2::new(10.0, 550.0),
            magazine_size: 50,
            launch_power: 150.0,
            projectile_mass: 20.0,
            projectile_size: 10.0,
            gravity: 0.3,
            drag_coefficient: 0.012,

            base_count: 3,
            base_origin: Vec2::new(400.0, 580.0),
            base_spacing: 150.0,
            base_size: Vec2::new(50.0, 10.0),
            base_drift: 0.0,

            target_size: Vec2::new(12.0, 30.0),
            blocker_size: Vec2::new(3.0, 40.0),
            bomber_size: Vec2::new(12.0, 6.0),
            brute_size: Vec2::new(16.0, 16.0),
            max_blockers: MAX_BLOCKERS,
            max_bombers: MAX_BOMBERS,
            max_brutes: MAX_BRUTES,
            brute_speed: 1.2,
            brute_orbit_radius: 24.0,
            bomber_flash_interval: 10,
            deflect_nudge: 4.0,

            target_award: 250,
            bomber_award: 1000,
            brute_award: 2500,
            blocker_penalty: 50,
            score_lerp: 0.02,
            high_score_slots: 10,

            spawn_seed: 0x00C0_FFEE,
        }
    }
}

impl SimConfig {
    /// Ticks a full wave lasts before the countdown forces a reload
    pub fn wave_ticks(&self) -> u64 {
        self.wave_seconds as u64 * self.tick_rate as u64
    }

    /// Ticks spent in the base-lost hold
    pub fn base_lost_ticks(&self) -> u32 {
        self.base_lost_seconds * self.tick_rate
    }

    /// Read a config file, failing on I/O or parse errors
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&json)?;
        Ok(config)
    }

    /// Read a config file, falling back to defaults on any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(config) => {
                log::info!("Loaded simulation config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Using default config ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }
}
