//! Attack state machine: whether a fighter may start an attack, how long it
//! lasts, where it can hit, and which animation the fighter shows.

use crate::constants::*;
use crate::physics::is_grounded;
use crate::types::*;

/// Start an attack if the fighter is grounded and not already attacking.
/// Returns `None` when the request is dropped; there is no input buffering.
pub fn try_start(f: &Fighter, kind: AttackType, arena: &ArenaConfig) -> Option<Fighter> {
    if f.is_attacking() || !is_grounded(f, arena) {
        return None;
    }
    Some(Fighter {
        attack: Some(kind),
        attack_timer: f.attack_duration,
        ..*f
    })
}

/// Count the attack timer down; the attack ends once it reaches zero.
pub fn tick(f: &Fighter, dt: f64) -> Fighter {
    if f.attack.is_none() {
        return *f;
    }
    let timer = f.attack_timer - dt;
    if timer <= 0.0 {
        Fighter {
            attack: None,
            attack_timer: 0.0,
            ..*f
        }
    } else {
        Fighter {
            attack_timer: timer,
            ..*f
        }
    }
}

/// Share of the attack already played, in `[0, 1]`. A zero duration is
/// floored to `ATTACK_DURATION_EPSILON`.
pub fn elapsed_fraction(f: &Fighter) -> f64 {
    let duration = f.attack_duration.max(ATTACK_DURATION_EPSILON);
    (1.0 - f.attack_timer / duration).clamp(0.0, 1.0)
}

/// Startup and recovery frames never deal damage.
pub fn is_active(f: &Fighter) -> bool {
    if f.attack.is_none() {
        return false;
    }
    let t = elapsed_fraction(f);
    (ACTIVE_WINDOW_START..=ACTIVE_WINDOW_END).contains(&t)
}

/// Region the current attack strikes, in front of the body. Kicks reach
/// further, cover more height and land lower than punches. Empty when not
/// attacking.
pub fn hitbox(f: &Fighter) -> Rect {
    let Some(kind) = f.attack else {
        return Rect::EMPTY;
    };
    let body = f.rect();
    let (w_ratio, h_ratio, y_ratio) = match kind {
        AttackType::Punch => (0.55, 0.2, 0.35),
        AttackType::Kick => (0.65, 0.25, 0.55),
    };
    let w = (body.w * w_ratio).floor();
    let h = (body.h * h_ratio).floor();
    let y = body.y + (body.h * y_ratio).floor();
    let x = if f.facing_left { body.x - w } else { body.right() };
    Rect::new(x, y, w, h)
}

/// Attacking beats airborne, airborne beats walking, walking beats idle.
pub fn animation_key(f: &Fighter) -> AnimationKey {
    if let Some(kind) = f.attack {
        AnimationKey::from_attack(kind)
    } else if f.vy < -JUMP_ANIM_VY_THRESHOLD {
        AnimationKey::Jump
    } else if f.vx.abs() > WALK_ANIM_VX_THRESHOLD {
        AnimationKey::Walk
    } else {
        AnimationKey::Idle
    }
}
