//! Demo player
//!
//! Starts a game from the intro, then tracks the nearest on-screen target and
//! fires at a fixed cadence. Decisions only read the game state, so an
//! autopilot run is as deterministic as the simulation itself.

use glam::Vec2;

use crate::replay::{InputSource, LiveInput};
use crate::sim::{GamePhase, GameState};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Autopilot {
    /// Fire once every this many ticks
    pub fire_every: u64,
    /// How far ahead of a target's path to aim, in ticks of its motion
    pub lead_ticks: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            fire_every: 20,
            lead_ticks: 25.0,
        }
    }
}

impl Autopilot {
    pub fn new(fire_every: u64) -> Self {
        Self {
            fire_every: fire_every.max(1),
            ..Self::default()
        }
    }

    /// Aim point for the live target nearest the emplacement, if any is on screen
    pub fn aim_point(&self, state: &GameState) -> Option<Vec2> {
        let origin = state.config.emplacement;
        let width = state.config.screen_width;

        state
            .targets
            .iter()
            .filter(|t| !t.dead && t.pos.x < width)
            .min_by(|a, b| {
                a.pos
                    .distance_squared(origin)
                    .partial_cmp(&b.pos.distance_squared(origin))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|t| t.rect().center() + t.vel * self.lead_ticks)
    }
}

impl InputSource for Autopilot {
    fn next_input(&mut self, state: &GameState) -> LiveInput {
        match state.phase {
            GamePhase::Intro => LiveInput {
                start: true,
                ..Default::default()
            },
            GamePhase::InProgress => {
                let Some(aim) = self.aim_point(state) else {
                    return LiveInput::default();
                };
                let due = state.time_ticks % self.fire_every.max(1) == 0;
                LiveInput {
                    cursor: aim,
                    fire: due && state.rounds_left() > 0,
                    ..Default::default()
                }
            }
            GamePhase::BaseLost | GamePhase::Over => LiveInput::default(),
        }
    }
}
