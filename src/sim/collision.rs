//! Collision resolution between entity groups
//!
//! Pair groups are checked in a fixed order and every overlap applies its
//! outcome immediately. Dead entities stay in their collections until the
//! compaction at the end of the pass, so a projectile killed by an earlier
//! rule can still trigger later rules in the same tick.

use rand::Rng;

use super::entity::{EntityKind, Hostile, Projectile, Rect};
use super::state::{Blast, GameEvent, GameState};

/// Explosion magnitudes above this use the big blast
pub const BIG_BLAST_THRESHOLD: u32 = 35;
/// Magnitude used for brute and bomber kills
pub const HEAVY_BLAST_MAGNITUDE: u32 = 50;

/// Anything that takes part in pair checks
pub trait Collider {
    fn bounds(&self) -> Rect;
    /// Whether the entity is currently in play for collisions
    fn collidable(&self) -> bool {
        true
    }
}

impl Collider for Hostile {
    fn bounds(&self) -> Rect {
        self.rect()
    }
}

impl Collider for Projectile {
    fn bounds(&self) -> Rect {
        self.rect()
    }

    /// Rounds still in the magazine are not in the air
    fn collidable(&self) -> bool {
        self.flying
    }
}

/// Call `on_hit` for every overlapping (a, b) pair, `a` in the outer loop
pub fn for_each_overlap<A, B, F>(a: &mut [A], b: &mut [B], mut on_hit: F)
where
    A: Collider,
    B: Collider,
    F: FnMut(&mut A, &mut B),
{
    for x in a.iter_mut().filter(|x| x.collidable()) {
        for y in b.iter_mut().filter(|y| y.collidable()) {
            if x.bounds().intersects(&y.bounds()) {
                on_hit(x, y);
            }
        }
    }
}

fn kill_hostile(h: &mut Hostile, events: &mut Vec<GameEvent>) {
    if h.kill() {
        events.push(GameEvent::Killed { kind: h.kind, id: h.id });
    }
}

fn kill_projectile(p: &mut Projectile, events: &mut Vec<GameEvent>) {
    if p.kill() {
        events.push(GameEvent::Killed {
            kind: EntityKind::Projectile,
            id: p.id,
        });
    }
}

fn destroy_base(base: &mut Hostile, events: &mut Vec<GameEvent>) {
    kill_hostile(base, events);
    events.push(GameEvent::StructureDestroyed {
        pos: base.rect().center(),
    });
}

/// Run every pair rule for this tick, then drop dead entities
pub fn resolve(state: &mut GameState) {
    let GameState {
        config,
        rng,
        scoreboard,
        events,
        projectiles,
        targets,
        blockers,
        bombers,
        brutes,
        bases,
        ..
    } = state;

    // 1. Brute x Base: structural loss, no score
    for_each_overlap(brutes, bases, |brute, base| {
        kill_hostile(brute, events);
        destroy_base(base, events);
    });

    // 2. Brute x Projectile
    for_each_overlap(brutes, projectiles, |brute, ball| {
        kill_hostile(brute, events);
        kill_projectile(ball, events);
        scoreboard.add(config.brute_award);
        events.push(GameEvent::Explosion {
            pos: brute.rect().center(),
            blast: Blast::Big,
            magnitude: HEAVY_BLAST_MAGNITUDE,
        });
    });

    // 3. Projectile x Base: friendly fire
    for_each_overlap(projectiles, bases, |ball, base| {
        kill_projectile(ball, events);
        destroy_base(base, events);
    });

    // 4. Target x Base
    for_each_overlap(targets, bases, |target, base| {
        kill_hostile(target, events);
        destroy_base(base, events);
    });

    // 5. Bomber x Base
    for_each_overlap(bombers, bases, |bomber, base| {
        kill_hostile(bomber, events);
        destroy_base(base, events);
    });

    // 6. Bomber x Projectile
    for_each_overlap(bombers, projectiles, |bomber, ball| {
        kill_hostile(bomber, events);
        kill_projectile(ball, events);
        scoreboard.add(config.bomber_award);
        events.push(GameEvent::Explosion {
            pos: bomber.rect().center(),
            blast: Blast::Big,
            magnitude: HEAVY_BLAST_MAGNITUDE,
        });
    });

    // 7. Blocker x Projectile: deflect, never destroy
    for_each_overlap(blockers, projectiles, |blocker, ball| {
        if ball.vel.x > 0.0 {
            ball.pos.x -= config.deflect_nudge;
        } else {
            ball.pos.x += config.deflect_nudge;
        }
        ball.vel.x = -ball.vel.x;
        scoreboard.add(-config.blocker_penalty);
        log::debug!("Projectile {} deflected by blocker {}", ball.id, blocker.id);
        events.push(GameEvent::Deflect { pos: ball.pos });
    });

    // 8. Target x Projectile: a target only dies once
    for_each_overlap(targets, projectiles, |target, ball| {
        if target.dead {
            return;
        }
        kill_hostile(target, events);
        kill_projectile(ball, events);
        scoreboard.add(config.target_award);
        let magnitude: u32 = rng.random_range(5..=50);
        let blast = if magnitude > BIG_BLAST_THRESHOLD {
            Blast::Big
        } else {
            Blast::Small
        };
        events.push(GameEvent::Explosion {
            pos: target.rect().center(),
            blast,
            magnitude,
        });
    });

    compact(state);
}

/// Keep only live members, in kind order: Target, Projectile, Bomber, Base, Brute
pub fn compact(state: &mut GameState) {
    let floor_height = state.config.screen_height;
    state.targets.retain(|t| !t.dead);
    state
        .projectiles
        .retain(|p| !p.dead && !p.is_spent(floor_height));
    state.bombers.retain(|b| !b.dead);
    state.bases.retain(|b| !b.dead);
    state.brutes.retain(|b| !b.dead);
}
