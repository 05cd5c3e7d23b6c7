//! Turns (dt, held keys) into a new caster state.
//!
//! Effects are applied in a fixed order every tick:
//!
//! 1. forward
//! 2. backward
//! 3. rotate-left
//! 4. rotate-right
//!
//! Translation runs before rotation, so a tick that both moves and turns
//! moves along the direction the caster faced at the *start* of the tick.

use glam::Vec2;
use serde::Deserialize;

use super::collision::{MoveOutcome, try_move};
use super::input::HeldKeys;
use crate::world::{Caster, GridMap};

/// Speed constants, fixed at startup.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub move_speed: f32,       // world units / second
    pub rotation_speed: f32,   // radians / second
    pub collision_radius: f32, // 0 = point test
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            move_speed: 64.0, // one 64-unit tile per second
            rotation_speed: 3.0,
            collision_radius: 0.0,
        }
    }
}

/// Advance `caster` by one tick of `dt` seconds.
pub fn step(caster: &mut Caster, grid: &GridMap, dt: f32, keys: HeldKeys, tuning: &Tuning) {
    let move_speed = dt * tuning.move_speed;
    let rot_speed = dt * tuning.rotation_speed;

    if keys.contains(HeldKeys::FORWARD) {
        translate(caster, grid, caster.dir * move_speed, tuning);
    }
    if keys.contains(HeldKeys::BACKWARD) {
        translate(caster, grid, -caster.dir * move_speed, tuning);
    }
    if keys.contains(HeldKeys::ROTATE_LEFT) {
        caster.rotate(-rot_speed);
    }
    if keys.contains(HeldKeys::ROTATE_RIGHT) {
        caster.rotate(rot_speed);
    }

    if log::log_enabled!(log::Level::Trace) {
        log::trace!(
            "tick dt={dt:.4} keys={keys:?} pos={:?} dir={:?}",
            caster.pos,
            caster.dir
        );
    }
}

fn translate(caster: &mut Caster, grid: &GridMap, delta: Vec2, tuning: &Tuning) {
    let proposed = caster.pos + delta;
    let outcome = try_move(caster, grid, proposed, tuning.collision_radius);
    if outcome != MoveOutcome::Moved {
        log::debug!("move to {proposed:?} resolved as {outcome:?}");
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
