//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (timers count ticks, never wall time)
//! - Seeded RNG only, reseeded at every wave spawn
//! - Fixed collision rule order and stable collection order
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod entity;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Collider, resolve};
pub use entity::{EntityKind, EntityView, Hostile, Motion, Projectile, Rect, Visual};
pub use state::{Blast, GameEvent, GamePhase, GameState, Hud, SoundCue};
pub use tick::{TickInput, fire, start_game, tick};
