//! Wave controller state and core simulation types
//!
//! All state that determines the outcome of a run lives here, so two states
//! built from the same config and fed the same inputs stay identical.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{EntityKind, EntityView, Hostile, Projectile};
use crate::config::SimConfig;
use crate::highscores::HighScores;
use crate::score::Scoreboard;

/// Current phase of the wave state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for a start signal
    Intro,
    /// A wave is being fought
    InProgress,
    /// Last base destroyed; cosmetic hold before game over
    BaseLost,
    /// Run ended, waiting for start or replay
    Over,
}

/// Size of an explosion effect (selects the sound cue)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Blast {
    Small,
    Big,
}

/// Discrete notifications for audio/effects collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A projectile left the emplacement
    Fired { id: u32 },
    /// Fire rejected: magazine exhausted
    DryFire,
    /// Hostile destroyed by a projectile
    Explosion { pos: Vec2, blast: Blast, magnitude: u32 },
    /// Projectile bounced off a blocker
    Deflect { pos: Vec2 },
    /// A base was destroyed
    StructureDestroyed { pos: Vec2 },
    /// An entity died in a collision
    Killed { kind: EntityKind, id: u32 },
    /// A new wave was spawned
    WaveStarted { wave: u32 },
    /// No bases remain
    BaseLost,
    /// Final score, with the high score rank if one was earned
    GameOver { score: i64, rank: Option<usize> },
}

/// Sound cues a mixer maps to samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    SmallExplosion,
    BigExplosion,
    Deflect,
    StructureDestroyed,
    Gunfire,
    DryFire,
}

impl GameEvent {
    pub fn sound(&self) -> Option<SoundCue> {
        match self {
            GameEvent::Fired { .. } => Some(SoundCue::Gunfire),
            GameEvent::DryFire => Some(SoundCue::DryFire),
            GameEvent::Explosion { blast: Blast::Small, .. } => Some(SoundCue::SmallExplosion),
            GameEvent::Explosion { blast: Blast::Big, .. } => Some(SoundCue::BigExplosion),
            GameEvent::Deflect { .. } => Some(SoundCue::Deflect),
            GameEvent::StructureDestroyed { .. } => Some(SoundCue::StructureDestroyed),
            _ => None,
        }
    }
}

/// HUD numbers for the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub wave: u32,
    pub fired: u32,
    pub magazine: u32,
    pub score: i64,
    pub seconds_left: u32,
    pub total_fired: u32,
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete wave controller state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: SimConfig,
    pub phase: GamePhase,
    /// Seed the spawn generator was last reset to
    pub rng_state: RngState,
    /// Spawn/hit generator, reset at every wave spawn
    pub rng: Pcg32,
    /// Current wave (0 before the first spawn)
    pub wave_number: u32,
    /// Ticks elapsed in the current wave
    pub wave_ticks: u64,
    /// Whole seconds left on the wave countdown
    pub wave_seconds: u32,
    /// Ticks left in the base-lost hold
    pub hold_ticks: u32,
    pub shots_fired: u32,
    pub shots_fired_total: u32,
    /// Ticks since the last start signal
    pub time_ticks: u64,
    pub scoreboard: Scoreboard,
    pub high_scores: HighScores,
    /// Whether a finished game may enter the high score table
    pub submit_scores: bool,
    pub projectiles: Vec<Projectile>,
    pub targets: Vec<Hostile>,
    pub blockers: Vec<Hostile>,
    pub bombers: Vec<Hostile>,
    pub brutes: Vec<Hostile>,
    pub bases: Vec<Hostile>,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create an idle controller showing the intro
    pub fn new(config: SimConfig, high_scores: HighScores) -> Self {
        let rng_state = RngState::new(config.spawn_seed);
        let rng = rng_state.to_rng();
        let scoreboard = Scoreboard::new(config.score_lerp);
        let wave_seconds = config.wave_seconds;
        Self {
            config,
            phase: GamePhase::Intro,
            rng_state,
            rng,
            wave_number: 0,
            wave_ticks: 0,
            wave_seconds,
            hold_ticks: 0,
            shots_fired: 0,
            shots_fired_total: 0,
            time_ticks: 0,
            scoreboard,
            high_scores,
            submit_scores: true,
            projectiles: Vec::new(),
            targets: Vec::new(),
            blockers: Vec::new(),
            bombers: Vec::new(),
            brutes: Vec::new(),
            bases: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn reset_ids(&mut self) {
        self.next_id = 1;
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Projectiles in the magazine not yet launched
    pub fn rounds_left(&self) -> u32 {
        self.config.magazine_size.saturating_sub(self.shots_fired)
    }

    pub fn hud(&self) -> Hud {
        Hud {
            wave: self.wave_number,
            fired: self.shots_fired,
            magazine: self.config.magazine_size,
            score: self.scoreboard.displayed(),
            seconds_left: self.wave_seconds,
            total_fired: self.shots_fired_total + self.shots_fired,
        }
    }

    /// Every live entity, in draw order
    pub fn entity_views(&self) -> Vec<EntityView> {
        let hostiles = self
            .targets
            .iter()
            .chain(&self.blockers)
            .chain(&self.bombers)
            .chain(&self.brutes)
            .chain(&self.bases)
            .filter(|h| !h.dead)
            .map(EntityView::from);
        let projectiles = self
            .projectiles
            .iter()
            .filter(|p| !p.dead)
            .map(EntityView::from);
        hostiles.chain(projectiles).collect()
    }
}
