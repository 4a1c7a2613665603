//! Combat arbiter: melee hit detection, damage and knockback.

use tracing::debug;

use crate::attack;
use crate::combo::knockback_factor;
use crate::constants::*;
use crate::physics::clamp_to_arena;
use crate::types::*;

/// Subtract damage, never dropping below zero.
pub fn apply_damage(f: &Fighter, amount: i32) -> Fighter {
    Fighter {
        health: (f.health - amount.max(0)).clamp(0, f.max_health),
        ..*f
    }
}

/// Displace the defender by `push` along `direction` (sign only), hand it
/// `momentum` as horizontal velocity and pop it upward. The result is already
/// clamped to the arena.
pub fn apply_knockback(
    f: &Fighter,
    direction: f64,
    push: f64,
    momentum: f64,
    pop_up: f64,
    arena: &ArenaConfig,
) -> Fighter {
    let sign = if direction < 0.0 { -1.0 } else { 1.0 };
    let knocked = Fighter {
        x: f.x + sign * push,
        vx: sign * momentum,
        vy: -pop_up,
        ..*f
    };
    clamp_to_arena(&knocked, arena)
}

/// Direction that pushes the defender away from the attacker. Overlapping
/// centers fall back to the attacker's facing.
pub fn push_direction(attacker: &Fighter, defender: &Fighter) -> f64 {
    let dx = defender.center_x() - attacker.center_x();
    if dx > 0.0 {
        1.0
    } else if dx < 0.0 {
        -1.0
    } else if attacker.facing_left {
        -1.0
    } else {
        1.0
    }
}

pub struct MeleeHit {
    pub attacker: FighterId,
    pub defender: FighterId,
    pub attack: AttackType,
    pub damage: i32,
    pub combo: u32,
}

/// Test one attacker against one defender. Returns the updated defender when
/// the attack lands.
pub fn resolve_melee(
    attacker: &Fighter,
    defender: &Fighter,
    arena: &ArenaConfig,
) -> Option<(Fighter, MeleeHit)> {
    let kind = attacker.attack?;
    if !attack::is_active(attacker) {
        return None;
    }
    if defender.hit_cooldown > 0.0 {
        return None;
    }
    if !attack::hitbox(attacker).intersects(&defender.rect()) {
        return None;
    }

    let damage = attack_damage(kind);
    let profile = knockback_profile(attacker.is_ai, kind);
    let scale = knockback_factor(attacker.combo.count);

    let hurt = apply_damage(defender, damage);
    let knocked = apply_knockback(
        &hurt,
        push_direction(attacker, defender),
        profile.push * scale,
        profile.momentum * scale,
        KNOCKBACK_POP_UP,
        arena,
    );
    let updated = Fighter {
        hit_cooldown: HIT_COOLDOWN,
        ..knocked
    };

    Some((
        updated,
        MeleeHit {
            attacker: attacker.id,
            defender: defender.id,
            attack: kind,
            damage,
            combo: attacker.combo.count,
        },
    ))
}

pub struct MeleeResult {
    pub fighters: [Fighter; 2],
    pub hits: Vec<MeleeHit>,
}

/// Resolve both ordered (attacker, defender) pairs. Each pair sees the
/// defender as already modified by the previous pair.
pub fn resolve_melee_hits(fighters: &[Fighter; 2], arena: &ArenaConfig) -> MeleeResult {
    let mut updated = *fighters;
    let mut hits = Vec::new();

    for (a, d) in [(0usize, 1usize), (1, 0)] {
        if let Some((defender, hit)) = resolve_melee(&updated[a], &updated[d], arena) {
            debug!(
                attacker = a,
                defender = d,
                attack = ?hit.attack,
                damage = hit.damage,
                combo = hit.combo,
                health = defender.health,
                "melee hit"
            );
            updated[d] = defender;
            hits.push(hit);
        }
    }

    MeleeResult {
        fighters: updated,
        hits,
    }
}

/// Count hit cooldown down toward zero.
pub fn decay_hit_cooldown(f: &Fighter, dt: f64) -> Fighter {
    Fighter {
        hit_cooldown: (f.hit_cooldown - dt).max(0.0),
        ..*f
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::{create_fighter, default_config};
    use crate::physics::integrate;

    /// Two grounded fighters facing each other, close enough that a punch
    /// from either one reaches.
    fn face_off() -> ([Fighter; 2], ArenaConfig) {
        let config = default_config();
        let arena = config.arena;
        let mut a = create_fighter(0, &config.fighters[0], &arena);
        let mut d = create_fighter(1, &config.fighters[1], &arena);
        a.x = 300.0;
        a.facing_left = false;
        d.x = a.x + a.width as f64 + 10.0;
        d.facing_left = true;
        ([a, d], arena)
    }

    fn swing(f: &Fighter, kind: AttackType, arena: &ArenaConfig) -> Fighter {
        let mut f = attack::try_start(f, kind, arena).unwrap();
        // Middle of the attack.
        f.attack_timer = f.attack_duration * 0.5;
        f
    }

    #[test]
    fn punch_in_window_deals_damage() {
        let ([a, d], arena) = face_off();
        let a = swing(&a, AttackType::Punch, &arena);
        let (hit, info) = resolve_melee(&a, &d, &arena).expect("punch lands");
        assert_eq!(hit.health, d.max_health - PUNCH_DAMAGE);
        assert_eq!(info.damage, PUNCH_DAMAGE);
        assert_eq!(hit.hit_cooldown, HIT_COOLDOWN);
    }

    #[test]
    fn kick_hurts_more_than_punch() {
        assert!(KICK_DAMAGE > PUNCH_DAMAGE);
        let ([a, d], arena) = face_off();
        let a = swing(&a, AttackType::Kick, &arena);
        let (hit, _) = resolve_melee(&a, &d, &arena).expect("kick lands");
        assert_eq!(hit.health, d.max_health - KICK_DAMAGE);
    }

    #[test]
    fn active_window_gates_damage() {
        let ([a, d], arena) = face_off();
        let mut a = swing(&a, AttackType::Punch, &arena);
        a.attack_duration = 0.12;

        a.attack_timer = 0.10;
        assert!(resolve_melee(&a, &d, &arena).is_none());

        a.attack_timer = 0.06;
        let (hit, _) = resolve_melee(&a, &d, &arena).expect("mid-attack lands");
        assert_eq!(hit.health, d.max_health - PUNCH_DAMAGE);
    }

    #[test]
    fn cooldown_blocks_repeat_hits() {
        let ([a, d], arena) = face_off();
        let a = swing(&a, AttackType::Punch, &arena);
        let mut fighters = [a, d];
        let dt = 1.0 / 120.0;
        let mut landed = 0;
        // Hold the attack in its active window and keep the bodies
        // overlapping for longer than the cooldown.
        for _ in 0..50 {
            let result = resolve_melee_hits(&fighters, &arena);
            landed += result.hits.len();
            fighters = result.fighters;
            fighters[1].x = d.x;
            fighters[1] = decay_hit_cooldown(&fighters[1], dt);
        }
        // 50 frames at 1/120s is under the 0.5s cooldown.
        assert_eq!(landed, 1);
    }

    #[test]
    fn hit_lands_again_once_cooldown_expires() {
        let ([a, d], arena) = face_off();
        let a = swing(&a, AttackType::Punch, &arena);
        let mut fighters = [a, d];
        let dt = 1.0 / 60.0;
        let mut landed_at = Vec::new();
        // Keep the attack active and the bodies overlapping for 0.75s.
        for frame in 0..45 {
            let result = resolve_melee_hits(&fighters, &arena);
            if !result.hits.is_empty() {
                landed_at.push(frame);
            }
            fighters = result.fighters;
            fighters[1].x = d.x;
            fighters[1] = decay_hit_cooldown(&fighters[1], dt);
        }
        assert_eq!(landed_at.len(), 2);
        // The second hit waits for the full cooldown.
        let gap = (landed_at[1] - landed_at[0]) as f64 * dt;
        assert!(gap >= HIT_COOLDOWN - 1e-9);
        assert_eq!(fighters[1].health, d.max_health - 2 * PUNCH_DAMAGE);
    }

    #[test]
    fn health_never_negative() {
        let ([a, mut d], arena) = face_off();
        d.health = 3;
        let a = swing(&a, AttackType::Kick, &arena);
        let (hit, _) = resolve_melee(&a, &d, &arena).unwrap();
        assert_eq!(hit.health, 0);

        let dead = apply_damage(&hit, 50);
        assert_eq!(dead.health, 0);
        assert_eq!(apply_damage(&d, -20).health, d.health);
    }

    #[test]
    fn knockback_pushes_away_from_attacker() {
        let ([a, d], arena) = face_off();
        let a = swing(&a, AttackType::Punch, &arena);
        let (hit, _) = resolve_melee(&a, &d, &arena).unwrap();
        let profile = knockback_profile(false, AttackType::Punch);
        assert_eq!(hit.x, d.x + profile.push);
        assert_eq!(hit.vx, profile.momentum);
        assert_eq!(hit.vy, -KNOCKBACK_POP_UP);

        // Mirror: AI attacking from the right pushes left, with its own table.
        let ([a, d], arena) = face_off();
        let d = swing(&d, AttackType::Punch, &arena);
        let (hit, _) = resolve_melee(&d, &a, &arena).unwrap();
        let profile = knockback_profile(true, AttackType::Punch);
        assert_eq!(hit.x, a.x - profile.push);
        assert_eq!(hit.vx, -profile.momentum);
    }

    #[test]
    fn combo_scales_knockback() {
        let ([a, d], arena) = face_off();
        let mut a = swing(&a, AttackType::Punch, &arena);
        a.combo.count = 2;
        let (hit, info) = resolve_melee(&a, &d, &arena).unwrap();
        let profile = knockback_profile(false, AttackType::Punch);
        assert!((hit.vx - profile.momentum * 1.15).abs() < 1e-9);
        assert_eq!(info.combo, 2);
        // Damage is unaffected by the chain.
        assert_eq!(info.damage, PUNCH_DAMAGE);
    }

    #[test]
    fn knockback_stays_inside_arena() {
        let ([mut a, mut d], arena) = face_off();
        d.x = arena.width - d.width as f64;
        a.x = d.x - a.width as f64 + 5.0;
        let a = swing(&a, AttackType::Kick, &arena);
        let (hit, _) = resolve_melee(&a, &d, &arena).unwrap();
        assert!(hit.x >= 0.0 && hit.x <= arena.width - hit.width as f64);

        let next = integrate(&hit, &arena, 1.0 / 60.0);
        assert!(next.x >= 0.0 && next.x <= arena.width - next.width as f64);
    }

    #[test]
    fn idle_attacker_never_hits() {
        let ([a, d], arena) = face_off();
        assert!(resolve_melee(&a, &d, &arena).is_none());
    }

    #[test]
    fn out_of_reach_misses() {
        let ([a, mut d], arena) = face_off();
        d.x = a.x + 400.0;
        let a = swing(&a, AttackType::Kick, &arena);
        assert!(resolve_melee(&a, &d, &arena).is_none());
    }
}
