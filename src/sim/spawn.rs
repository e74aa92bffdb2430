//! Procedural wave generation
//!
//! Each wave reseeds the spawn generator from the config seed and the wave
//! number, so a given wave always has the same layout no matter what happened
//! before it. Replays depend on this.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::entity::{Hostile, Projectile};
use super::state::{GameEvent, GameState, RngState};

/// Seed for a wave's spawn generator
pub fn wave_seed(base_seed: u64, wave: u32) -> u64 {
    base_seed.wrapping_add((wave as u64).wrapping_mul(2654435761))
}

/// Targets grow with the wave number, uncapped
pub fn target_count(wave: u32) -> u32 {
    wave
}

pub fn blocker_count(wave: u32, cap: u32) -> u32 {
    wave.min(cap)
}

pub fn bomber_count(wave: u32, cap: u32) -> u32 {
    wave.min(cap)
}

/// Brutes only spawn while one base remains; at least one from wave 1
pub fn brute_count(wave: u32, cap: u32) -> u32 {
    wave.div_ceil(2).min(cap)
}

/// Whole-pixel uniform draw in `[lo, hi]`
fn pixel_between(rng: &mut Pcg32, lo: f32, hi: f32) -> f32 {
    let lo = lo as i32;
    let hi = (hi as i32).max(lo);
    rng.random_range(lo..=hi) as f32
}

/// Replace the fixed set of bases
pub fn create_bases(state: &mut GameState) {
    let count = state.config.base_count;
    let origin = state.config.base_origin;
    let spacing = state.config.base_spacing;
    let size = state.config.base_size;
    let drift = state.config.base_drift;

    state.bases.clear();
    for i in 0..count {
        let id = state.next_entity_id();
        let pos = origin + Vec2::new(i as f32 * spacing, 0.0);
        state.bases.push(Hostile::base(id, pos, drift, size));
    }
}

/// Discard every projectile and load a fresh magazine at the emplacement
pub fn reload(state: &mut GameState) {
    state.shots_fired_total += state.shots_fired;
    state.shots_fired = 0;

    let at = state.config.emplacement;
    let mass = state.config.projectile_mass;
    let size = state.config.projectile_size;
    state.projectiles.clear();
    for _ in 0..state.config.magazine_size {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile::new(id, at, mass, size));
    }
}

/// Advance to the next wave: reload, reseed, and repopulate the hostiles
pub fn spawn_wave(state: &mut GameState) {
    reload(state);
    state.wave_ticks = 0;
    state.wave_seconds = state.config.wave_seconds;
    state.wave_number += 1;

    let wave = state.wave_number;
    state.rng_state = RngState::new(wave_seed(state.config.spawn_seed, wave));
    state.rng = state.rng_state.to_rng();

    let w = state.config.screen_width;
    let h = state.config.screen_height;

    state.targets.clear();
    for _ in 0..target_count(wave) {
        let x = pixel_between(&mut state.rng, w - 200.0, w + 200.0);
        let y = pixel_between(&mut state.rng, 10.0, h - 100.0);
        let speed = 1.0 + state.rng.random::<f32>() * 1.5;
        let id = state.next_entity_id();
        let size = state.config.target_size;
        state.targets.push(Hostile::target(id, Vec2::new(x, y), speed, size));
    }

    state.blockers.clear();
    for _ in 0..blocker_count(wave, state.config.max_blockers) {
        let x = pixel_between(&mut state.rng, w - 200.0, w + 200.0);
        let y = pixel_between(&mut state.rng, 10.0, h - 100.0);
        let speed = 1.0 + state.rng.random::<f32>() * 0.5;
        let id = state.next_entity_id();
        let size = state.config.blocker_size;
        state.blockers.push(Hostile::blocker(id, Vec2::new(x, y), speed, size));
    }

    state.bombers.clear();
    for _ in 0..bomber_count(wave, state.config.max_bombers) {
        let x = pixel_between(&mut state.rng, w / 4.0, w * 2.0 / 3.0);
        let fall = 0.4 + state.rng.random::<f32>() * 0.4;
        let id = state.next_entity_id();
        let size = state.config.bomber_size;
        state.bombers.push(Hostile::bomber(id, Vec2::new(x, 0.0), fall, size));
    }

    state.brutes.clear();
    if state.bases.len() == 1 {
        let aim = state.bases[0].rect().center();
        for _ in 0..brute_count(wave, state.config.max_brutes) {
            let x = pixel_between(&mut state.rng, 100.0, w - 100.0);
            let id = state.next_entity_id();
            let speed = state.config.brute_speed;
            let size = state.config.brute_size;
            state.brutes.push(Hostile::brute(id, Vec2::new(x, 0.0), aim, speed, size));
        }
    }

    log::info!(
        "Wave {}: {} targets, {} blockers, {} bombers, {} brutes, {} bases",
        wave,
        state.targets.len(),
        state.blockers.len(),
        state.bombers.len(),
        state.brutes.len(),
        state.bases.len()
    );
    state.emit(GameEvent::WaveStarted { wave });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::highscores::HighScores;
    use proptest::prelude::*;

    fn state_with_bases(bases: u32) -> GameState {
        let config = SimConfig {
            base_count: bases,
            ..SimConfig::default()
        };
        let mut state = GameState::new(config, HighScores::with_defaults(10));
        create_bases(&mut state);
        state
    }

    #[test]
    fn test_wave_one_layout() {
        let mut state = state_with_bases(3);
        spawn_wave(&mut state);
        assert_eq!(state.wave_number, 1);
        assert_eq!(state.projectiles.len(), 50);
        assert_eq!(state.targets.len(), 1);
        assert_eq!(state.blockers.len(), 1);
        assert_eq!(state.bombers.len(), 1);
        assert!(state.brutes.is_empty());
        assert_eq!(state.events, vec![GameEvent::WaveStarted { wave: 1 }]);
    }

    #[test]
    fn test_spawn_positions_in_band() {
        let mut state = state_with_bases(3);
        for _ in 0..12 {
            spawn_wave(&mut state);
        }
        for t in state.targets.iter().chain(&state.blockers) {
            assert!((1000.0..=1400.0).contains(&t.pos.x));
            assert!((10.0..=500.0).contains(&t.pos.y));
            assert!(t.vel.x < 0.0);
        }
        for b in &state.bombers {
            assert!((300.0..=800.0).contains(&b.pos.x));
            assert_eq!(b.pos.y, 0.0);
        }
    }

    #[test]
    fn test_caps_bind_late() {
        let mut state = state_with_bases(3);
        for _ in 0..20 {
            spawn_wave(&mut state);
        }
        assert_eq!(state.targets.len(), 20);
        assert_eq!(state.blockers.len(), 8);
        assert_eq!(state.bombers.len(), 10);
    }

    #[test]
    fn test_brutes_only_with_last_base() {
        let mut state = state_with_bases(2);
        spawn_wave(&mut state);
        assert!(state.brutes.is_empty());

        state.bases.truncate(1);
        spawn_wave(&mut state);
        assert!(!state.brutes.is_empty());
        assert!(state.brutes.len() as u32 <= state.config.max_brutes);

        // Every brute heads toward the last base
        let aim = state.bases[0].rect().center();
        for b in &state.brutes {
            let expected = crate::direction_to(b.pos, aim);
            assert!((b.vel.normalize() - expected).length() < 1e-4);
        }
    }

    #[test]
    fn test_same_wave_same_layout() {
        let mut a = state_with_bases(3);
        let mut b = state_with_bases(3);
        spawn_wave(&mut a);
        // Consume generator output in b before the next spawn; layouts must still match
        spawn_wave(&mut b);
        for _ in 0..17 {
            let _: f32 = b.rng.random();
        }
        spawn_wave(&mut a);
        spawn_wave(&mut b);

        let pa: Vec<_> = a.targets.iter().map(|t| (t.pos, t.vel)).collect();
        let pb: Vec<_> = b.targets.iter().map(|t| (t.pos, t.vel)).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_reload_accumulates_totals() {
        let mut state = state_with_bases(3);
        spawn_wave(&mut state);
        state.shots_fired = 7;
        spawn_wave(&mut state);
        assert_eq!(state.shots_fired, 0);
        assert_eq!(state.shots_fired_total, 7);
        assert!(state.projectiles.iter().all(|p| !p.flying && !p.dead));
    }

    proptest! {
        #[test]
        fn prop_spawn_counts(wave in 1u32..200, cap in 1u32..20) {
            prop_assert_eq!(target_count(wave), wave);
            prop_assert_eq!(blocker_count(wave, cap), wave.min(cap));
            prop_assert_eq!(bomber_count(wave, cap), wave.min(cap));
            let brutes = brute_count(wave, cap);
            prop_assert!(brutes >= 1 && brutes <= cap);
        }
    }
}
