use tracing::debug;

use crate::combat::{apply_damage, apply_knockback};
use crate::constants::*;
use crate::types::*;

/// Launch a fireball from the front of the owner's body, if the owner's fire
/// cooldown has fully run out. Returns the owner with its cooldown restarted
/// and the new projectile.
pub fn fire(owner: &Fighter, id: u32) -> Option<(Fighter, Projectile)> {
    if owner.fire_cooldown > 0.0 {
        return None;
    }
    let direction: i8 = if owner.facing_left { -1 } else { 1 };
    let half_width = owner.width as f64 / 2.0;
    let projectile = Projectile {
        id,
        owner: owner.id,
        x: owner.center_x() + direction as f64 * half_width,
        y: owner.y + owner.height as f64 * 0.4,
        direction,
        speed: FIREBALL_SPEED,
        damage: FIREBALL_DAMAGE,
        active: true,
    };
    let owner = Fighter {
        fire_cooldown: FIREBALL_COOLDOWN,
        ..*owner
    };
    Some((owner, projectile))
}

/// Move a projectile along its direction.
pub fn advance(p: &Projectile, dt: f64) -> Projectile {
    Projectile {
        x: p.x + p.speed * p.direction as f64 * dt,
        ..*p
    }
}

/// Outside the arena by more than `FIREBALL_MARGIN`, so it can visually leave
/// the screen before despawning.
pub fn is_out_of_bounds(p: &Projectile, arena: &ArenaConfig) -> bool {
    p.x < -FIREBALL_MARGIN || p.x > arena.width + FIREBALL_MARGIN
}

pub fn rect(p: &Projectile) -> Rect {
    Rect::new(
        p.x - FIREBALL_RADIUS,
        p.y - FIREBALL_RADIUS,
        FIREBALL_RADIUS * 2.0,
        FIREBALL_RADIUS * 2.0,
    )
}

/// Advance every projectile and drop the ones that left the arena.
pub fn advance_all(projectiles: &[Projectile], arena: &ArenaConfig, dt: f64) -> Vec<Projectile> {
    projectiles
        .iter()
        .filter(|p| p.active)
        .map(|p| advance(p, dt))
        .filter(|p| !is_out_of_bounds(p, arena))
        .collect()
}

pub struct ProjectileHit {
    pub owner: FighterId,
    pub defender: FighterId,
    pub projectile: u32,
    pub damage: i32,
}

pub struct HitResult {
    pub remaining_projectiles: Vec<Projectile>,
    pub fighters: [Fighter; 2],
    pub hits: Vec<ProjectileHit>,
}

/// Resolve projectile–fighter collisions.
/// - Only the owner's opponent can be struck
/// - A defender still in hit cooldown lets the projectile pass
/// - A projectile that connects deactivates at once and is never reconsidered
pub fn resolve_hits(
    projectiles: &[Projectile],
    fighters: &[Fighter; 2],
    arena: &ArenaConfig,
) -> HitResult {
    let mut updated = *fighters;
    let mut remaining = Vec::with_capacity(projectiles.len());
    let mut hits = Vec::new();

    for proj in projectiles {
        if !proj.active {
            continue;
        }
        let defender_idx = 1 - proj.owner.min(1);
        let defender = &updated[defender_idx];

        if defender.hit_cooldown > 0.0 || !rect(proj).intersects(&defender.rect()) {
            remaining.push(*proj);
            continue;
        }

        let hurt = apply_damage(defender, proj.damage);
        let knocked = apply_knockback(
            &hurt,
            proj.direction as f64,
            FIREBALL_PUSH,
            FIREBALL_MOMENTUM,
            FIREBALL_POP_UP,
            arena,
        );
        updated[defender_idx] = Fighter {
            hit_cooldown: HIT_COOLDOWN,
            ..knocked
        };

        debug!(
            projectile = proj.id,
            owner = proj.owner,
            defender = defender_idx,
            health = updated[defender_idx].health,
            "fireball hit"
        );
        hits.push(ProjectileHit {
            owner: proj.owner,
            defender: defender_idx,
            projectile: proj.id,
            damage: proj.damage,
        });
    }

    HitResult {
        remaining_projectiles: remaining,
        fighters: updated,
        hits,
    }
}
