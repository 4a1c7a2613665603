use crate::constants::*;
use crate::input::Intent;
use crate::types::*;

/// Feet at (or within `GROUNDED_EPSILON` of) the ground line.
pub fn is_grounded(f: &Fighter, arena: &ArenaConfig) -> bool {
    f.y + f.height as f64 >= arena.ground_y - GROUNDED_EPSILON
}

/// Full speed while the fighter's center is over the raised platform, half
/// speed off it.
pub fn speed_multiplier(f: &Fighter, arena: &ArenaConfig) -> f64 {
    let cx = f.center_x();
    if cx >= arena.platform_left && cx <= arena.platform_right {
        1.0
    } else {
        OFF_PLATFORM_SPEED_MULTIPLIER
    }
}

/// Apply the movement part of an intent: walking velocity, facing and jump.
///
/// Walking only overrides `vx` while residual knockback momentum is no faster
/// than the walk itself; without walking input `vx` is left to friction.
pub fn apply_intent(f: &Fighter, intent: &Intent, arena: &ArenaConfig) -> Fighter {
    let mut vx = f.vx;
    if intent.desired_vx != 0.0 && vx.abs() <= intent.desired_vx.abs() {
        vx = intent.desired_vx;
    }

    let mut vy = f.vy;
    if intent.jump && is_grounded(f, arena) {
        vy = -f.stats().jump_impulse;
    }

    Fighter {
        vx,
        vy,
        facing_left: intent.face_left.unwrap_or(f.facing_left),
        ..*f
    }
}

/// Reduce `|vx|` by `FRICTION_RATE * dt` without crossing zero.
pub fn apply_friction(vx: f64, dt: f64) -> f64 {
    let drop = FRICTION_RATE * dt;
    if vx > 0.0 {
        (vx - drop).max(0.0)
    } else if vx < 0.0 {
        (vx + drop).min(0.0)
    } else {
        0.0
    }
}

/// Advance one fighter by `dt`: gravity, horizontal move, friction, screen
/// clamp, vertical move and ground snap.
pub fn integrate(f: &Fighter, arena: &ArenaConfig, dt: f64) -> Fighter {
    let mut vy = f.vy + GRAVITY * dt;

    let mut x = f.x + f.vx * dt * speed_multiplier(f, arena);
    let vx = apply_friction(f.vx, dt);
    x = clamp_x(x, f.width, arena);

    let height = f.height as f64;
    let mut y = f.y + vy * dt;
    if y + height >= arena.ground_y {
        y = arena.ground_y - height;
        vy = 0.0;
    }
    if y < 0.0 {
        y = 0.0;
        vy = vy.max(0.0);
    }

    Fighter { x, y, vx, vy, ..*f }
}

pub fn clamp_x(x: f64, width: i32, arena: &ArenaConfig) -> f64 {
    let max_x = (arena.width - width as f64).max(0.0);
    x.clamp(0.0, max_x)
}

/// Pull a fighter back inside the arena after out-of-band displacement
/// such as knockback.
pub fn clamp_to_arena(f: &Fighter, arena: &ArenaConfig) -> Fighter {
    let height = f.height as f64;
    let max_y = arena.ground_y - height;
    let (y, vy) = if f.y > max_y {
        (max_y, f.vy.min(0.0))
    } else {
        (f.y.max(0.0), f.vy)
    };
    Fighter {
        x: clamp_x(f.x, f.width, arena),
        y,
        vy,
        ..*f
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::{create_fighter, default_config};

    fn fighter() -> (Fighter, ArenaConfig) {
        let config = default_config();
        let f = create_fighter(0, &config.fighters[0], &config.arena);
        (f, config.arena)
    }

    #[test]
    fn spawned_fighter_is_grounded() {
        let (f, arena) = fighter();
        assert!(is_grounded(&f, &arena));
        assert_eq!(f.y + f.height as f64, arena.ground_y);
    }

    #[test]
    fn ground_clamp_is_idempotent() {
        let (mut f, arena) = fighter();
        for dt in [1.0 / 60.0, 1.0 / 30.0, 0.1, 0.0, 0.0071] {
            f = integrate(&f, &arena, dt);
            assert_eq!(f.y + f.height as f64, arena.ground_y);
            assert_eq!(f.vy, 0.0);
        }
    }

    #[test]
    fn gravity_pulls_airborne_fighter_down() {
        let (mut f, arena) = fighter();
        f.y -= 100.0;
        let dt = 1.0 / 60.0;
        let next = integrate(&f, &arena, dt);
        assert_eq!(next.vy, GRAVITY * dt);
        assert!(next.y > f.y);
        assert!(!is_grounded(&next, &arena));
    }

    #[test]
    fn jump_only_when_grounded() {
        let (f, arena) = fighter();
        let intent = Intent {
            jump: true,
            ..Intent::default()
        };
        let jumped = apply_intent(&f, &intent, &arena);
        assert_eq!(jumped.vy, -f.stats().jump_impulse);

        let mut airborne = f;
        airborne.y -= 50.0;
        let result = apply_intent(&airborne, &intent, &arena);
        assert_eq!(result.vy, 0.0);
    }

    #[test]
    fn human_jumps_higher_than_frog() {
        let human = variant_stats(Variant::Human);
        let frog = variant_stats(Variant::Frog);
        assert!(human.jump_impulse > frog.jump_impulse);
    }

    #[test]
    fn off_platform_moves_at_half_speed() {
        let (mut f, arena) = fighter();
        f.vx = 100.0;
        let dt = 0.01;

        f.x = 300.0;
        let on = integrate(&f, &arena, dt);
        assert!((on.x - (300.0 + 100.0 * dt)).abs() < 1e-9);

        // Center left of the platform edge.
        f.x = 0.0;
        let off = integrate(&f, &arena, dt);
        assert!((off.x - 100.0 * dt * OFF_PLATFORM_SPEED_MULTIPLIER).abs() < 1e-9);
    }

    #[test]
    fn friction_never_overshoots_zero() {
        assert_eq!(apply_friction(5.0, 1.0), 0.0);
        assert_eq!(apply_friction(-5.0, 1.0), 0.0);
        assert_eq!(apply_friction(300.0, 0.1), 300.0 - FRICTION_RATE * 0.1);
        assert_eq!(apply_friction(-300.0, 0.1), -300.0 + FRICTION_RATE * 0.1);
    }

    #[test]
    fn walking_does_not_cancel_stronger_momentum() {
        let (mut f, arena) = fighter();
        f.vx = -380.0;
        let intent = Intent {
            desired_vx: 220.0,
            face_left: Some(false),
            ..Intent::default()
        };
        let result = apply_intent(&f, &intent, &arena);
        assert_eq!(result.vx, -380.0);
        assert!(!result.facing_left);

        f.vx = 50.0;
        let result = apply_intent(&f, &intent, &arena);
        assert_eq!(result.vx, 220.0);
    }

    #[test]
    fn x_is_clamped_to_screen() {
        let (mut f, arena) = fighter();
        f.x = 5.0;
        f.vx = -10_000.0;
        let left = integrate(&f, &arena, 0.1);
        assert_eq!(left.x, 0.0);

        f.x = arena.width - f.width as f64 - 5.0;
        f.vx = 10_000.0;
        let right = integrate(&f, &arena, 0.1);
        assert_eq!(right.x, arena.width - f.width as f64);
    }

    #[test]
    fn clamp_to_arena_pulls_back_inside() {
        let (mut f, arena) = fighter();
        f.x = -40.0;
        f.y = arena.ground_y;
        let result = clamp_to_arena(&f, &arena);
        assert_eq!(result.x, 0.0);
        assert_eq!(result.y + result.height as f64, arena.ground_y);
    }
}
