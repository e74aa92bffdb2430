//! Fixed timestep simulation tick
//!
//! Core game loop that advances the wave controller deterministically.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GamePhase, GameState};
use super::{collision, physics, spawn};
use crate::direction_to;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Aim point (pointer position in screen coordinates)
    pub cursor: Vec2,
    /// Fire a projectile toward `cursor`
    pub fire: bool,
    /// Start a new game (only honored from Intro or Over)
    pub start: bool,
}

/// Advance the wave controller by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.start && matches!(state.phase, GamePhase::Intro | GamePhase::Over) {
        start_game(state);
    }

    match state.phase {
        GamePhase::Intro | GamePhase::Over => {}

        GamePhase::InProgress => {
            state.time_ticks += 1;
            if input.fire {
                fire(state, input.cursor);
            }
            advance_wave(state);
        }

        GamePhase::BaseLost => {
            state.time_ticks += 1;
            state.hold_ticks = state.hold_ticks.saturating_sub(1);
            if state.hold_ticks == 0 {
                finish_game(state);
            }
        }
    }
}

/// Reset score and entities, rebuild the bases and spawn wave 1
pub fn start_game(state: &mut GameState) {
    state.reset_ids();
    state.wave_number = 0;
    state.shots_fired = 0;
    state.shots_fired_total = 0;
    state.time_ticks = 0;
    state.hold_ticks = 0;
    state.scoreboard.reset();

    state.projectiles.clear();
    state.targets.clear();
    state.blockers.clear();
    state.bombers.clear();
    state.brutes.clear();

    spawn::create_bases(state);
    spawn::spawn_wave(state);
    state.phase = GamePhase::InProgress;
    log::info!("Game started with {} bases", state.bases.len());
}

/// Launch the next round from the magazine toward `aim`.
///
/// Returns false (and raises a dry-fire event) once the magazine is spent.
pub fn fire(state: &mut GameState, aim: Vec2) -> bool {
    if state.phase != GamePhase::InProgress || state.shots_fired >= state.config.magazine_size {
        state.emit(GameEvent::DryFire);
        return false;
    }

    let force = direction_to(state.config.emplacement, aim) * state.config.launch_power;
    let slot = state.projectiles.iter().position(|p| !p.flying && !p.dead);
    let Some(idx) = slot else {
        state.emit(GameEvent::DryFire);
        return false;
    };
    let round = &mut state.projectiles[idx];
    physics::launch(round, force);
    let id = round.id;

    state.shots_fired += 1;
    state.emit(GameEvent::Fired { id });
    true
}

/// One InProgress step: movement, physics, collisions, countdown, transitions
fn advance_wave(state: &mut GameState) {
    state.scoreboard.update();

    let gravity = state.config.gravity;
    let drag = state.config.drag_coefficient;
    let height = state.config.screen_height;
    for p in &mut state.projectiles {
        physics::step(p, gravity, drag, height);
    }

    let config = &state.config;
    for h in state
        .targets
        .iter_mut()
        .chain(&mut state.blockers)
        .chain(&mut state.bombers)
        .chain(&mut state.bases)
        .chain(&mut state.brutes)
    {
        h.update(config);
    }

    collision::resolve(state);

    state.wave_ticks += 1;
    let ticks_left = state.config.wave_ticks().saturating_sub(state.wave_ticks);
    state.wave_seconds = ticks_left.div_ceil(state.config.tick_rate.max(1) as u64) as u32;

    if state.bases.is_empty() {
        state.phase = GamePhase::BaseLost;
        state.hold_ticks = state.config.base_lost_ticks();
        log::info!("Last base lost on wave {}", state.wave_number);
        state.emit(GameEvent::BaseLost);
    } else if state.targets.is_empty() || state.wave_seconds == 0 {
        spawn::spawn_wave(state);
    }
}

/// Enter Over: settle the score and record it in the high score table
pub fn finish_game(state: &mut GameState) {
    state.scoreboard.finish();
    let score = state.scoreboard.target();
    let rank = if state.submit_scores {
        state.high_scores.submit(score)
    } else {
        None
    };
    state.phase = GamePhase::Over;
    log::info!(
        "Game over on wave {} with {} points ({} shots)",
        state.wave_number,
        score,
        state.shots_fired_total + state.shots_fired
    );
    state.emit(GameEvent::GameOver { score, rank });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::highscores::HighScores;
    use crate::sim::entity::EntityKind;
    use proptest::prelude::*;

    fn new_state(config: SimConfig) -> GameState {
        GameState::new(config, HighScores::with_defaults(10))
    }

    fn started(config: SimConfig) -> GameState {
        let mut state = new_state(config);
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        state.drain_events();
        state
    }

    fn aim_fire(x: f32, y: f32) -> TickInput {
        TickInput {
            cursor: Vec2::new(x, y),
            fire: true,
            start: false,
        }
    }

    #[test]
    fn test_intro_to_in_progress() {
        let mut state = new_state(SimConfig::default());
        tick(&mut state, &aim_fire(600.0, 100.0));
        assert_eq!(state.phase, GamePhase::Intro);
        assert!(state.projectiles.is_empty());

        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::InProgress);
        assert_eq!(state.wave_number, 1);
        assert_eq!(state.projectiles.len(), 50);
        assert_eq!(state.targets.len(), 1);
        assert_eq!(state.blockers.len(), 1);
        assert_eq!(state.bombers.len(), 1);
        assert!(state.brutes.is_empty());
        assert_eq!(state.bases.len(), 3);
    }

    #[test]
    fn test_magazine_exhaustion() {
        let mut state = started(SimConfig {
            magazine_size: 3,
            ..SimConfig::default()
        });

        for _ in 0..3 {
            tick(&mut state, &aim_fire(600.0, 100.0));
        }
        assert_eq!(state.shots_fired, 3);
        let events = state.drain_events();
        assert_eq!(
            events.iter().filter(|e| matches!(e, GameEvent::Fired { .. })).count(),
            3
        );

        tick(&mut state, &aim_fire(600.0, 100.0));
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::DryFire));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Fired { .. })));
        assert_eq!(state.projectiles.iter().filter(|p| p.flying).count(), 3);
    }

    #[test]
    fn test_magazine_on_floor_still_fires() {
        let mut state = started(SimConfig {
            emplacement: Vec2::new(10.0, 590.0),
            ..SimConfig::default()
        });
        assert_eq!(state.projectiles.len(), 50);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.projectiles.len(), 50);

        tick(&mut state, &aim_fire(600.0, 100.0));
        let events = state.drain_events();
        assert!(!events.contains(&GameEvent::DryFire));
        assert!(events.iter().any(|e| matches!(e, GameEvent::Fired { .. })));
        assert_eq!(state.shots_fired, 1);
    }

    #[test]
    fn test_launch_direction() {
        let mut state = started(SimConfig::default());
        tick(&mut state, &aim_fire(610.0, 550.0));
        let ball = state.projectiles.iter().find(|p| p.flying).unwrap();
        // 150 / 20 = 7.5 along +x, minus a little drag, plus gravity
        assert!(ball.vel.x > 7.0 && ball.vel.x <= 7.5);
        assert!(ball.vel.y > 0.0 && ball.vel.y < 0.1);
    }

    #[test]
    fn test_target_hit_scenario() {
        let mut state = started(SimConfig::default());
        state.targets[0].pos = Vec2::new(600.0, 300.0);
        let target_id = state.targets[0].id;

        let ball = &mut state.projectiles[0];
        ball.pos = Vec2::new(602.0, 305.0);
        ball.flying = true;
        let ball_id = ball.id;

        tick(&mut state, &TickInput::default());

        let events = state.drain_events();
        let killed: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::Killed { kind, id } => Some((*kind, *id)),
                _ => None,
            })
            .collect();
        assert_eq!(
            killed,
            vec![(EntityKind::Target, target_id), (EntityKind::Projectile, ball_id)]
        );
        assert_eq!(state.scoreboard.target(), 250);
        // Clearing every target reloads straight into the next wave
        assert!(events.contains(&GameEvent::WaveStarted { wave: 2 }));
        assert_eq!(state.targets.len(), 2);
        assert_eq!(state.projectiles.len(), 50);
    }

    #[test]
    fn test_blocker_deflection_survives() {
        let mut state = started(SimConfig::default());
        state.blockers[0].pos = Vec2::new(700.0, 200.0);

        let ball = &mut state.projectiles[0];
        ball.pos = Vec2::new(695.0, 210.0);
        ball.vel = Vec2::new(5.0, 0.0);
        ball.flying = true;
        let ball_id = ball.id;

        tick(&mut state, &TickInput::default());

        let ball = state.projectiles.iter().find(|p| p.id == ball_id).unwrap();
        assert!(ball.vel.x < 0.0);
        assert!(!ball.dead);
        assert_eq!(state.scoreboard.target(), -50);
    }

    #[test]
    fn test_wave_timeout_reloads() {
        let mut state = started(SimConfig {
            wave_seconds: 1,
            ..SimConfig::default()
        });
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.wave_seconds, 1);
        for _ in 0..28 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.wave_number, 1);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.wave_number, 2);
        assert_eq!(state.wave_seconds, 1);
    }

    #[test]
    fn test_last_base_spawns_brutes() {
        let mut state = started(SimConfig::default());
        assert!(state.brutes.is_empty());

        state.bases.truncate(1);
        state.targets.clear();
        tick(&mut state, &TickInput::default());

        assert_eq!(state.wave_number, 2);
        assert!(!state.brutes.is_empty());
        assert!(state.brutes.len() as u32 <= state.config.max_brutes);
    }

    #[test]
    fn test_base_lost_hold_then_over() {
        let mut state = started(SimConfig::default());
        state.scoreboard.add(50_000);
        state.bases.clear();

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::BaseLost);
        assert!(state.drain_events().contains(&GameEvent::BaseLost));

        for _ in 0..239 {
            tick(&mut state, &aim_fire(600.0, 100.0));
            assert_eq!(state.phase, GamePhase::BaseLost);
        }
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Over);
        assert_eq!(state.scoreboard.displayed(), 50_000);
        assert_eq!(state.high_scores.top_score(), Some(50_000));
        assert!(state.drain_events().contains(&GameEvent::GameOver {
            score: 50_000,
            rank: Some(1)
        }));

        // Over holds until a start signal
        tick(&mut state, &aim_fire(600.0, 100.0));
        assert_eq!(state.phase, GamePhase::Over);
    }

    #[test]
    fn test_restart_from_over() {
        let mut state = started(SimConfig::default());
        state.scoreboard.add(700);
        state.bases.clear();
        for _ in 0..300 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::Over);

        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::InProgress);
        assert_eq!(state.wave_number, 1);
        assert_eq!(state.scoreboard.target(), 0);
        assert_eq!(state.bases.len(), 3);
    }

    #[test]
    fn test_identical_inputs_identical_runs() {
        let mut a = started(SimConfig::default());
        let mut b = started(SimConfig::default());

        for i in 0..900u32 {
            let input = if i % 7 == 0 {
                aim_fire(300.0 + (i % 600) as f32, 50.0 + (i % 400) as f32)
            } else {
                TickInput::default()
            };
            tick(&mut a, &input);
            tick(&mut b, &input);
            assert_eq!(a.drain_events(), b.drain_events());
        }
        assert_eq!(a.scoreboard, b.scoreboard);
        assert_eq!(a.wave_number, b.wave_number);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_dead_entities_never_return(fire_every in 2u32..20, aim_x in 100.0f32..1100.0, aim_y in 0.0f32..500.0) {
            let mut state = started(SimConfig::default());
            let mut dead = std::collections::HashSet::new();

            for i in 0..600u32 {
                let input = if i % fire_every == 0 {
                    aim_fire(aim_x, aim_y)
                } else {
                    TickInput::default()
                };
                tick(&mut state, &input);

                for e in state.drain_events() {
                    if let GameEvent::Killed { kind, id } = e {
                        dead.insert((kind, id));
                    }
                }
                for view in state.entity_views() {
                    prop_assert!(!dead.contains(&(view.kind, view.id)));
                }
                prop_assert!(state.projectiles.iter().all(|p| !p.dead));
            }
        }
    }
}
