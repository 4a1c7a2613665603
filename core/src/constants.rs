use crate::types::{AttackType, Variant, VariantStats};

// All values are in arena units and seconds unless noted.

// Physics
pub const GRAVITY: f64 = 900.0;
pub const FRICTION_RATE: f64 = 1200.0;
pub const OFF_PLATFORM_SPEED_MULTIPLIER: f64 = 0.5;
pub const GROUNDED_EPSILON: f64 = 1.0;

// Frame timing
pub const TARGET_FPS: u32 = 60;
pub const MAX_FRAME_DT: f64 = 0.1;

// Arena (800x600 screen, ground 120 above the bottom edge)
pub const ARENA_WIDTH: f64 = 800.0;
pub const ARENA_HEIGHT: f64 = 600.0;
pub const GROUND_Y: f64 = ARENA_HEIGHT - 120.0;
pub const PLATFORM_LEFT: f64 = 60.0;
pub const PLATFORM_RIGHT: f64 = 740.0;

// Fighter body (sprite frame size is scaled up on screen)
pub const SPRITE_SCALE: f64 = 1.6;
pub const DEFAULT_FRAME_SIZE: u32 = 64;
pub const SPAWN_X: [f64; 2] = [100.0, 600.0];

// Attacks
pub const ATTACK_DURATION: f64 = 0.18;
pub const ATTACK_DURATION_EPSILON: f64 = 1e-6;
pub const ACTIVE_WINDOW_START: f64 = 0.2;
pub const ACTIVE_WINDOW_END: f64 = 0.8;
pub const PUNCH_DAMAGE: i32 = 10;
pub const KICK_DAMAGE: i32 = 15;
pub const HIT_COOLDOWN: f64 = 0.5;
pub const KNOCKBACK_POP_UP: f64 = 180.0;

// Combos
pub const COMBO_WINDOW: f64 = 0.4;
pub const COMBO_KNOCKBACK_STEP: f64 = 0.15;
pub const COMBO_KNOCKBACK_MAX_STEPS: u32 = 3;

// Fireballs
pub const FIREBALL_SPEED: f64 = 450.0;
pub const FIREBALL_DAMAGE: i32 = 12;
pub const FIREBALL_COOLDOWN: f64 = 0.8;
pub const FIREBALL_RADIUS: f64 = 12.0;
pub const FIREBALL_MARGIN: f64 = 50.0;
pub const FIREBALL_PUSH: f64 = 24.0;
pub const FIREBALL_MOMENTUM: f64 = 520.0;
pub const FIREBALL_POP_UP: f64 = 220.0;

// AI
pub const AI_ENGAGE_DISTANCE: f64 = 50.0;
/// Share of its variant's walk speed the AI approaches at.
pub const AI_WALK_SPEED_FACTOR: f64 = 2.0 / 3.0;

// Animation thresholds
pub const JUMP_ANIM_VY_THRESHOLD: f64 = 1.0;
pub const WALK_ANIM_VX_THRESHOLD: f64 = 10.0;

// Match rules (one clock for the whole match)
pub const ROUND_DURATION: f64 = 60.0;
pub const ROUNDS_TO_WIN: u32 = 1;
pub const ROUND_OVER_LINGER: f64 = 1.5;

pub fn variant_stats(variant: Variant) -> VariantStats {
    match variant {
        Variant::Human => VariantStats {
            max_health: 100,
            walk_speed: 220.0,
            jump_impulse: 420.0,
        },
        Variant::Frog => VariantStats {
            max_health: 120,
            walk_speed: 180.0,
            jump_impulse: 360.0,
        },
    }
}

/// Horizontal knockback applied by a melee hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnockbackProfile {
    /// Instant position displacement away from the attacker.
    pub push: f64,
    /// Horizontal velocity handed to the defender, decayed by friction.
    pub momentum: f64,
}

/// Knockback depends on who swings: human-driven fighters hit harder than the AI.
pub fn knockback_profile(attacker_is_ai: bool, attack: AttackType) -> KnockbackProfile {
    match (attacker_is_ai, attack) {
        (false, AttackType::Punch) => KnockbackProfile { push: 12.0, momentum: 260.0 },
        (false, AttackType::Kick) => KnockbackProfile { push: 20.0, momentum: 380.0 },
        (true, AttackType::Punch) => KnockbackProfile { push: 8.0, momentum: 200.0 },
        (true, AttackType::Kick) => KnockbackProfile { push: 14.0, momentum: 300.0 },
    }
}

pub fn attack_damage(attack: AttackType) -> i32 {
    match attack {
        AttackType::Punch => PUNCH_DAMAGE,
        AttackType::Kick => KICK_DAMAGE,
    }
}
