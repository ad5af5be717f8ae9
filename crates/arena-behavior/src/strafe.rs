//! Strafe persistence for ranged kiters.
//!
//! A kiter inside its firing band keeps moving laterally in the direction it
//! held last tick. Each tick it may roll a fresh perpendicular direction, and
//! independently may drop the held direction and stand still.

use arena_core::config::RangedParams;
use arena_core::geometry::perpendicular;
use arena_core::types::DVec2;
use rand::Rng;

/// Next held strafe direction.
///
/// `toward_player` is the unit vector from the mob to the player; the
/// repicked direction is perpendicular to it with a random sign. A zero
/// `toward_player` never produces a new direction.
pub fn next_strafe<R: Rng + ?Sized>(
    held: DVec2,
    toward_player: DVec2,
    params: &RangedParams,
    rng: &mut R,
) -> DVec2 {
    let mut direction = if held.is_finite() { held } else { DVec2::ZERO };

    if rng.gen_bool(chance(params.strafe_repick_chance)) {
        let side = perpendicular(toward_player);
        direction = if rng.gen_bool(0.5) { side } else { -side };
    }

    if rng.gen_bool(chance(params.strafe_stop_chance)) {
        direction = DVec2::ZERO;
    }

    direction
}

fn chance(p: f64) -> f64 {
    if p.is_finite() {
        p.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
