//! Force accumulation and semi-implicit Euler integration for projectiles

use glam::Vec2;

use super::entity::Projectile;

/// Accumulate `force / mass` into the projectile's acceleration
#[inline]
pub fn apply_force(p: &mut Projectile, force: Vec2) {
    p.acc += force / p.mass;
}

/// Apply the launch impulse and mark the projectile as flying
pub fn launch(p: &mut Projectile, force: Vec2) {
    apply_force(p, force);
    p.flying = true;
}

/// Constant downward pull (screen y grows downward)
#[inline]
pub fn gravity_force(gravity: f32) -> Vec2 {
    Vec2::new(0.0, gravity)
}

/// Quadratic drag opposing the velocity: magnitude `k * |v|^2`
pub fn drag_force(vel: Vec2, k: f32) -> Vec2 {
    let speed = vel.length();
    -vel.normalize_or_zero() * (k * speed * speed)
}

/// Advance one tick: `v += a; p += v; a = 0`, then clamp to the ground.
///
/// A projectile that reaches the ground plane comes to rest there.
pub fn integrate(p: &mut Projectile, screen_height: f32) {
    p.vel += p.acc;
    p.pos += p.vel;
    p.acc = Vec2::ZERO;

    let floor = screen_height - p.size;
    if p.pos.y > floor {
        p.pos.y = floor;
        p.vel = Vec2::ZERO;
    }
}

/// One physics step for a projectile: forces (if flying) then integration
pub fn step(p: &mut Projectile, gravity: f32, drag: f32, screen_height: f32) {
    if !p.flying {
        return;
    }
    apply_force(p, gravity_force(gravity));
    let drag = drag_force(p.vel, drag);
    apply_force(p, drag);
    integrate(p, screen_height);
}
