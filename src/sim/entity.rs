//! Entity records and per-kind movement rules
//!
//! Every hostile kind shares one [`Hostile`] record; the kind-specific state
//! lives in its [`Motion`] variant and [`Hostile::update`] dispatches on it.
//! Projectiles have their own record because they are driven by forces.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::{from_angle_degrees, wrap_degrees};

/// Bomber wobble phase advance per tick (degrees)
pub const BOMBER_WOBBLE_STEP: f32 = 4.0;
/// Peak horizontal wobble displacement per tick
pub const BOMBER_WOBBLE_AMPLITUDE: f32 = 0.5;
/// Brute orbit phase advance per tick (degrees)
pub const BRUTE_ORBIT_STEP: f32 = 6.0;
/// Brute orbit radius change per tick
pub const BRUTE_ORBIT_GROWTH: f32 = 0.5;

/// The closed set of entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Projectile,
    Target,
    Blocker,
    Bomber,
    Brute,
    Base,
}

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Strict overlap test; rectangles that only share an edge do not collide
    pub fn intersects(&self, other: &Rect) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// A cannonball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Accumulated force / mass for the current tick
    pub acc: Vec2,
    pub mass: f32,
    /// Edge length of the square extent
    pub size: f32,
    pub flying: bool,
    pub dead: bool,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec2, mass: f32, size: f32) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            mass,
            size,
            flying: false,
            dead: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(self.size))
    }

    /// Launched and now resting on the ground plane
    pub fn is_spent(&self, screen_height: f32) -> bool {
        self.flying && self.pos.y >= screen_height - self.size
    }

    /// Mark dead; returns true on the alive -> dead transition
    pub fn kill(&mut self) -> bool {
        !std::mem::replace(&mut self.dead, true)
    }
}

/// Kind-specific movement state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Horizontal drift, wrapping from the left edge to the right
    Drift,
    /// Falls straight down with a sinusoidal sideways wobble
    Bomber {
        wobble_angle: f32,
        ticks: u32,
        last_flash: u32,
        flash: bool,
    },
    /// Homes on a fixed point; the collision box orbits the logical position
    Brute {
        orbit_angle: f32,
        orbit_radius: f32,
        growing: bool,
    },
}

/// Discrete visual state for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visual {
    Plain,
    FlashOn,
    FlashOff,
}

/// A Target, Blocker, Bomber, Brute or Base
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub dead: bool,
    pub motion: Motion,
}

impl Hostile {
    fn drifting(id: u32, kind: EntityKind, pos: Vec2, speed: f32, size: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec2::new(-speed, 0.0),
            size,
            dead: false,
            motion: Motion::Drift,
        }
    }

    pub fn target(id: u32, pos: Vec2, speed: f32, size: Vec2) -> Self {
        Self::drifting(id, EntityKind::Target, pos, speed, size)
    }

    pub fn blocker(id: u32, pos: Vec2, speed: f32, size: Vec2) -> Self {
        Self::drifting(id, EntityKind::Blocker, pos, speed, size)
    }

    pub fn base(id: u32, pos: Vec2, speed: f32, size: Vec2) -> Self {
        Self::drifting(id, EntityKind::Base, pos, speed, size)
    }

    pub fn bomber(id: u32, pos: Vec2, fall_speed: f32, size: Vec2) -> Self {
        Self {
            id,
            kind: EntityKind::Bomber,
            pos,
            vel: Vec2::new(0.0, fall_speed),
            size,
            dead: false,
            motion: Motion::Bomber {
                wobble_angle: 0.0,
                ticks: 0,
                last_flash: 0,
                flash: false,
            },
        }
    }

    /// A brute heading from `pos` toward `aim` at a fixed speed
    pub fn brute(id: u32, pos: Vec2, aim: Vec2, speed: f32, size: Vec2) -> Self {
        Self {
            id,
            kind: EntityKind::Brute,
            pos,
            vel: crate::direction_to(pos, aim) * speed,
            size,
            dead: false,
            motion: Motion::Brute {
                orbit_angle: 0.0,
                orbit_radius: 0.0,
                growing: true,
            },
        }
    }

    /// Advance one tick according to the kind's movement rule
    pub fn update(&mut self, config: &SimConfig) {
        let width = config.screen_width;
        let height = config.screen_height;

        match &mut self.motion {
            Motion::Drift => {
                self.pos += self.vel;
                if self.pos.x < 0.0 {
                    self.pos.x = width;
                }
            }
            Motion::Bomber {
                wobble_angle,
                ticks,
                last_flash,
                flash,
            } => {
                *ticks += 1;
                if *ticks - *last_flash > config.bomber_flash_interval {
                    *flash = !*flash;
                    *last_flash = *ticks;
                }

                *wobble_angle = wrap_degrees(*wobble_angle + BOMBER_WOBBLE_STEP);
                let wobble = wobble_angle.to_radians().sin() * BOMBER_WOBBLE_AMPLITUDE;
                self.pos += self.vel + Vec2::new(wobble, 0.0);
                if self.pos.y > height {
                    self.dead = true;
                }
            }
            Motion::Brute {
                orbit_angle,
                orbit_radius,
                growing,
            } => {
                self.pos += self.vel;

                *orbit_angle = wrap_degrees(*orbit_angle + BRUTE_ORBIT_STEP);
                let cap = config.brute_orbit_radius;
                if *growing {
                    *orbit_radius += BRUTE_ORBIT_GROWTH;
                    if *orbit_radius >= cap {
                        *orbit_radius = cap;
                        *growing = false;
                    }
                } else {
                    *orbit_radius -= BRUTE_ORBIT_GROWTH;
                    if *orbit_radius <= 0.0 {
                        *orbit_radius = 0.0;
                        *growing = true;
                    }
                }

                let p = self.pos;
                if p.x < 0.0 || p.x > width || p.y < 0.0 || p.y > height {
                    self.dead = true;
                }
            }
        }
    }

    /// Collision rectangle (brutes are offset by their orbit)
    pub fn rect(&self) -> Rect {
        match self.motion {
            Motion::Brute {
                orbit_angle,
                orbit_radius,
                ..
            } => Rect::new(
                self.pos + from_angle_degrees(orbit_angle) * orbit_radius,
                self.size,
            ),
            _ => Rect::new(self.pos, self.size),
        }
    }

    pub fn visual(&self) -> Visual {
        match self.motion {
            Motion::Bomber { flash: true, .. } => Visual::FlashOn,
            Motion::Bomber { flash: false, .. } => Visual::FlashOff,
            _ => Visual::Plain,
        }
    }

    /// Mark dead; returns true on the alive -> dead transition
    pub fn kill(&mut self) -> bool {
        !std::mem::replace(&mut self.dead, true)
    }
}

/// Read-only snapshot of one live entity for drawing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub kind: EntityKind,
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub visual: Visual,
}

impl From<&Hostile> for EntityView {
    fn from(h: &Hostile) -> Self {
        let rect = h.rect();
        Self {
            kind: h.kind,
            id: h.id,
            pos: rect.pos,
            size: rect.size,
            visual: h.visual(),
        }
    }
}

impl From<&Projectile> for EntityView {
    fn from(p: &Projectile) -> Self {
        Self {
            kind: EntityKind::Projectile,
            id: p.id,
            pos: p.pos,
            size: Vec2::splat(p.size),
            visual: Visual::Plain,
        }
    }
}
